use crate::core::config_validation::{
    parse_camera_warmup_frames, parse_contrast, parse_fb_count, parse_frame_size,
    parse_jpeg_quality, parse_saturation, parse_stream_frame_interval_ms, parse_stream_port,
    parse_xclk_freq_hz, validate_wifi_ssid, ValidationError,
};
use crate::hardware::camera::{CaptureSettings, PixelFormat, SensorTuning};
use crate::streaming::StreamSettings;

/// アプリケーション設定
///
/// この構造体はビルド時に`cfg.toml`ファイルから読み込まれた設定を保持します。
/// 既定値は AI-Thinker ESP32-CAM の標準設定と同じです。
#[toml_cfg::toml_config]
pub struct Config {
    #[default("SVGA")]
    frame_size: &'static str,

    #[default(10)] // 0-63, 小さいほど高画質
    jpeg_quality: u8,

    #[default(1)]
    fb_count: u8,

    #[default(20000000)]
    xclk_freq_hz: u32,

    #[default(true)]
    vflip: bool,

    #[default(2)]
    contrast: i8,

    #[default(-2)]
    saturation: i8,

    #[default(0)]
    camera_warmup_frames: u8,

    #[default(true)]
    capture_on_boot: bool,

    #[default(true)]
    stream_enabled: bool,

    #[default("")]
    wifi_ssid: &'static str,

    #[default("")]
    wifi_password: &'static str,

    #[default(80)]
    stream_port: u16,

    #[default(20)]
    stream_frame_interval_ms: u32,
}

/// 設定エラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("無効なフレームサイズ: {0}")]
    InvalidFrameSize(String),
    #[error("jpeg_quality の値が無効です (0-63): {0}")]
    InvalidJpegQuality(u8),
    #[error("fb_count の値が無効です (1-3): {0}")]
    InvalidFbCount(u8),
    #[error("xclk_freq_hz の値が無効です (1MHz-20MHz): {0}")]
    InvalidXclkFreq(u32),
    #[error("contrast の値が無効です (-2..2): {0}")]
    InvalidContrast(i8),
    #[error("saturation の値が無効です (-2..2): {0}")]
    InvalidSaturation(i8),
    #[error("camera_warmup_frames の値が無効です (0-10): {0}")]
    InvalidCameraWarmupFrames(u8),
    #[error("WiFi SSIDが設定されていません")]
    MissingWifiSsid,
    #[error("stream_port の値が無効です: {0}")]
    InvalidStreamPort(u16),
    #[error("stream_frame_interval_ms の値が無効です (0-1000): {0}")]
    InvalidStreamFrameInterval(u32),
}

/// WiFi 接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiSettings {
    pub ssid: String,
    /// 空ならオープンネットワーク
    pub password: String,
}

/// MJPEG 配信の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    pub wifi: WifiSettings,
    pub server: StreamSettings,
}

/// アプリケーション設定を表す構造体
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// キャプチャパラメータ
    pub capture: CaptureSettings,

    /// 初期化後のセンサー設定
    pub tuning: SensorTuning,

    /// 起動直後に捨てるフレーム数
    pub camera_warmup_frames: u8,

    /// 起動時に1枚撮影する
    pub capture_on_boot: bool,

    /// 配信設定。`stream_enabled = false` なら `None`
    pub stream: Option<StreamConfig>,
}

impl AppConfig {
    /// 設定ファイルから設定をロードします
    pub fn load() -> Result<Self, ConfigError> {
        // toml_cfg によって生成された定数
        Self::from_config(&CONFIG)
    }

    fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let frame_size = parse_frame_size(config.frame_size)
            .map_err(map_validation_error)?;
        let jpeg_quality = parse_jpeg_quality(config.jpeg_quality)
            .map_err(map_validation_error)?;
        let fb_count = parse_fb_count(config.fb_count)
            .map_err(map_validation_error)?;
        let xclk_freq_hz = parse_xclk_freq_hz(config.xclk_freq_hz)
            .map_err(map_validation_error)?;

        let contrast = parse_contrast(config.contrast)
            .map_err(map_validation_error)?;
        let saturation = parse_saturation(config.saturation)
            .map_err(map_validation_error)?;

        let camera_warmup_frames = parse_camera_warmup_frames(config.camera_warmup_frames)
            .map_err(map_validation_error)?;

        let stream = if config.stream_enabled {
            // WiFi設定を取得（パスワードはオープンネットワークのため空でもよい）
            validate_wifi_ssid(config.wifi_ssid)
                .map_err(map_validation_error)?;
            let port = parse_stream_port(config.stream_port)
                .map_err(map_validation_error)?;
            let frame_interval_ms = parse_stream_frame_interval_ms(config.stream_frame_interval_ms)
                .map_err(map_validation_error)?;

            Some(StreamConfig {
                wifi: WifiSettings {
                    ssid: config.wifi_ssid.to_string(),
                    password: config.wifi_password.to_string(),
                },
                server: StreamSettings {
                    port,
                    frame_interval_ms,
                },
            })
        } else {
            None
        };

        Ok(AppConfig {
            capture: CaptureSettings {
                xclk_freq_hz,
                pixel_format: PixelFormat::Jpeg,
                frame_size,
                jpeg_quality,
                fb_count,
            },
            tuning: SensorTuning {
                vflip: config.vflip,
                contrast,
                saturation,
            },
            camera_warmup_frames,
            capture_on_boot: config.capture_on_boot,
            stream,
        })
    }
}

fn map_validation_error(err: ValidationError) -> ConfigError {
    match err {
        ValidationError::InvalidFrameSize(v) => ConfigError::InvalidFrameSize(v),
        ValidationError::InvalidJpegQuality(v) => ConfigError::InvalidJpegQuality(v),
        ValidationError::InvalidFbCount(v) => ConfigError::InvalidFbCount(v),
        ValidationError::InvalidXclkFreq(v) => ConfigError::InvalidXclkFreq(v),
        ValidationError::InvalidContrast(v) => ConfigError::InvalidContrast(v),
        ValidationError::InvalidSaturation(v) => ConfigError::InvalidSaturation(v),
        ValidationError::InvalidCameraWarmupFrames(v) => ConfigError::InvalidCameraWarmupFrames(v),
        ValidationError::MissingWifiSsid => ConfigError::MissingWifiSsid,
        ValidationError::InvalidStreamPort(v) => ConfigError::InvalidStreamPort(v),
        ValidationError::InvalidStreamFrameInterval(v) => {
            ConfigError::InvalidStreamFrameInterval(v)
        }
    }
}
