use crate::hardware::camera::{FrameSize, JpegQuality, SensorLevel};

/// XCLK の許容範囲 (OV2640 は最大 20MHz)
pub const MIN_XCLK_FREQ_HZ: u32 = 1_000_000;
pub const MAX_XCLK_FREQ_HZ: u32 = 20_000_000;

/// フレームバッファ数の上限
pub const MAX_FB_COUNT: u8 = 3;

/// ストリームのフレーム送信間隔の上限 (ミリ秒)
pub const MAX_STREAM_FRAME_INTERVAL_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidFrameSize(String),
    InvalidJpegQuality(u8),
    InvalidFbCount(u8),
    InvalidXclkFreq(u32),
    InvalidContrast(i8),
    InvalidSaturation(i8),
    InvalidCameraWarmupFrames(u8),
    MissingWifiSsid,
    InvalidStreamPort(u16),
    InvalidStreamFrameInterval(u32),
}

pub fn parse_frame_size(value: &str) -> Result<FrameSize, ValidationError> {
    value
        .parse()
        .map_err(|_| ValidationError::InvalidFrameSize(value.to_string()))
}

pub fn parse_jpeg_quality(value: u8) -> Result<JpegQuality, ValidationError> {
    JpegQuality::new(value).ok_or(ValidationError::InvalidJpegQuality(value))
}

pub fn parse_fb_count(value: u8) -> Result<u8, ValidationError> {
    if (1..=MAX_FB_COUNT).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidFbCount(value))
    }
}

pub fn parse_xclk_freq_hz(value: u32) -> Result<u32, ValidationError> {
    if (MIN_XCLK_FREQ_HZ..=MAX_XCLK_FREQ_HZ).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidXclkFreq(value))
    }
}

pub fn parse_contrast(value: i8) -> Result<SensorLevel, ValidationError> {
    SensorLevel::new(value).ok_or(ValidationError::InvalidContrast(value))
}

pub fn parse_saturation(value: i8) -> Result<SensorLevel, ValidationError> {
    SensorLevel::new(value).ok_or(ValidationError::InvalidSaturation(value))
}

pub fn parse_camera_warmup_frames(value: u8) -> Result<u8, ValidationError> {
    if value <= 10 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidCameraWarmupFrames(value))
    }
}

pub fn validate_wifi_ssid(ssid: &str) -> Result<(), ValidationError> {
    if ssid.is_empty() {
        Err(ValidationError::MissingWifiSsid)
    } else {
        Ok(())
    }
}

pub fn parse_stream_port(value: u16) -> Result<u16, ValidationError> {
    if value == 0 {
        Err(ValidationError::InvalidStreamPort(value))
    } else {
        Ok(value)
    }
}

pub fn parse_stream_frame_interval_ms(value: u32) -> Result<u32, ValidationError> {
    if value <= MAX_STREAM_FRAME_INTERVAL_MS {
        Ok(value)
    } else {
        Err(ValidationError::InvalidStreamFrameInterval(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_size() {
        assert_eq!(parse_frame_size("SVGA"), Ok(FrameSize::Svga));
        assert_eq!(
            parse_frame_size("8K"),
            Err(ValidationError::InvalidFrameSize("8K".to_string()))
        );
    }

    #[test]
    fn test_parse_jpeg_quality() {
        assert_eq!(parse_jpeg_quality(10).map(JpegQuality::get), Ok(10));
        assert_eq!(
            parse_jpeg_quality(64),
            Err(ValidationError::InvalidJpegQuality(64))
        );
    }

    #[test]
    fn test_parse_fb_count() {
        assert_eq!(parse_fb_count(1), Ok(1));
        assert_eq!(parse_fb_count(0), Err(ValidationError::InvalidFbCount(0)));
        assert_eq!(parse_fb_count(4), Err(ValidationError::InvalidFbCount(4)));
    }

    #[test]
    fn test_parse_xclk_freq_hz() {
        assert_eq!(parse_xclk_freq_hz(20_000_000), Ok(20_000_000));
        assert_eq!(parse_xclk_freq_hz(10_000_000), Ok(10_000_000));
        assert_eq!(
            parse_xclk_freq_hz(24_000_000),
            Err(ValidationError::InvalidXclkFreq(24_000_000))
        );
        assert_eq!(
            parse_xclk_freq_hz(0),
            Err(ValidationError::InvalidXclkFreq(0))
        );
    }

    #[test]
    fn test_parse_sensor_levels() {
        assert_eq!(parse_contrast(2), Ok(SensorLevel::MAX));
        assert_eq!(parse_saturation(-2), Ok(SensorLevel::MIN));
        assert_eq!(parse_contrast(3), Err(ValidationError::InvalidContrast(3)));
        assert_eq!(
            parse_saturation(-3),
            Err(ValidationError::InvalidSaturation(-3))
        );
    }

    #[test]
    fn test_parse_camera_warmup_frames() {
        assert_eq!(parse_camera_warmup_frames(0), Ok(0));
        assert_eq!(parse_camera_warmup_frames(10), Ok(10));
        assert_eq!(
            parse_camera_warmup_frames(11),
            Err(ValidationError::InvalidCameraWarmupFrames(11))
        );
    }

    #[test]
    fn test_validate_wifi_ssid() {
        assert_eq!(validate_wifi_ssid("farm-net"), Ok(()));
        assert_eq!(
            validate_wifi_ssid(""),
            Err(ValidationError::MissingWifiSsid)
        );
    }

    #[test]
    fn test_parse_stream_settings() {
        assert_eq!(parse_stream_port(80), Ok(80));
        assert_eq!(
            parse_stream_port(0),
            Err(ValidationError::InvalidStreamPort(0))
        );
        assert_eq!(parse_stream_frame_interval_ms(0), Ok(0));
        assert_eq!(
            parse_stream_frame_interval_ms(1001),
            Err(ValidationError::InvalidStreamFrameInterval(1001))
        );
    }
}
