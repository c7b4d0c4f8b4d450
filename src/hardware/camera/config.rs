//! カメラ設定型とコンフィグビルダー
//!
//! esp32-camera の camera_config_t に相当する `CameraConfig` と、
//! AI-Thinker ESP32-CAM 用に値を埋める `build_config` を提供します。

use std::fmt;
use std::str::FromStr;

use crate::hardware::pins::{CameraPins, AI_THINKER_PINS};

/// XCLK 周波数 (20MHz)
pub const XCLK_FREQ_HZ: u32 = 20_000_000;
/// JPEG 品質 (0-63, 小さいほど高画質)
pub const JPEG_QUALITY: u8 = 10;
/// フレームバッファ数 (ダブルバッファなし)
pub const FB_COUNT: u8 = 1;

/// 出力ピクセルフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    #[default]
    Rgb565,
    Yuv422,
    Grayscale,
    Jpeg,
    Rgb888,
}

/// 解像度列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameSize {
    #[default]
    Qqvga, // 160x120
    Qcif,  // 176x144
    Hqvga, // 240x176
    Qvga,  // 320x240
    Cif,   // 400x296
    Hvga,  // 480x320
    Vga,   // 640x480
    Svga,  // 800x600
    Xga,   // 1024x768
    Hd,    // 1280x720
    Sxga,  // 1280x1024
    Uxga,  // 1600x1200
}

impl FrameSize {
    /// 公称解像度 (幅, 高さ)
    pub fn dimensions(self) -> (u16, u16) {
        match self {
            FrameSize::Qqvga => (160, 120),
            FrameSize::Qcif => (176, 144),
            FrameSize::Hqvga => (240, 176),
            FrameSize::Qvga => (320, 240),
            FrameSize::Cif => (400, 296),
            FrameSize::Hvga => (480, 320),
            FrameSize::Vga => (640, 480),
            FrameSize::Svga => (800, 600),
            FrameSize::Xga => (1024, 768),
            FrameSize::Hd => (1280, 720),
            FrameSize::Sxga => (1280, 1024),
            FrameSize::Uxga => (1600, 1200),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FrameSize::Qqvga => "QQVGA",
            FrameSize::Qcif => "QCIF",
            FrameSize::Hqvga => "HQVGA",
            FrameSize::Qvga => "QVGA",
            FrameSize::Cif => "CIF",
            FrameSize::Hvga => "HVGA",
            FrameSize::Vga => "VGA",
            FrameSize::Svga => "SVGA",
            FrameSize::Xga => "XGA",
            FrameSize::Hd => "HD",
            FrameSize::Sxga => "SXGA",
            FrameSize::Uxga => "UXGA",
        }
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.dimensions();
        write!(f, "{} ({}x{})", self.name(), width, height)
    }
}

/// 解像度名のパースエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("未対応のフレームサイズです: {0}")]
pub struct UnknownFrameSize(pub String);

impl FromStr for FrameSize {
    type Err = UnknownFrameSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QQVGA" => Ok(FrameSize::Qqvga),
            "QCIF" => Ok(FrameSize::Qcif),
            "HQVGA" => Ok(FrameSize::Hqvga),
            "QVGA" => Ok(FrameSize::Qvga),
            "CIF" => Ok(FrameSize::Cif),
            "HVGA" => Ok(FrameSize::Hvga),
            "VGA" => Ok(FrameSize::Vga),
            "SVGA" => Ok(FrameSize::Svga),
            "XGA" => Ok(FrameSize::Xga),
            "HD" => Ok(FrameSize::Hd),
            "SXGA" => Ok(FrameSize::Sxga),
            "UXGA" => Ok(FrameSize::Uxga),
            _ => Err(UnknownFrameSize(s.to_string())),
        }
    }
}

/// JPEG 品質 (0-63)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct JpegQuality(u8);

impl JpegQuality {
    pub const MAX: u8 = 63;

    pub const fn new(quality: u8) -> Option<Self> {
        if quality <= Self::MAX {
            Some(Self(quality))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// XCLK を生成する LEDC チャンネル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedcChannel {
    #[default]
    Channel0,
    Channel1,
    Channel2,
    Channel3,
    Channel4,
    Channel5,
    Channel6,
    Channel7,
}

impl LedcChannel {
    pub fn index(self) -> u32 {
        self as u32
    }
}

/// XCLK を生成する LEDC タイマー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedcTimer {
    #[default]
    Timer0,
    Timer1,
    Timer2,
    Timer3,
}

impl LedcTimer {
    pub fn index(self) -> u32 {
        self as u32
    }
}

/// フレームバッファの確保先
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FbLocation {
    #[default]
    Psram,
    Dram,
}

/// フレームバッファが埋まっている時の取得モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrabMode {
    #[default]
    WhenEmpty,
    Latest,
}

/// キャプチャ設定 (camera_config_t 相当)
///
/// `Default` はゼロ初期化された構造体に相当します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CameraConfig {
    pub pins: CameraPins,
    pub ledc_channel: LedcChannel,
    pub ledc_timer: LedcTimer,
    pub xclk_freq_hz: u32,
    pub pixel_format: PixelFormat,
    pub frame_size: FrameSize,
    pub jpeg_quality: JpegQuality,
    pub fb_count: u8,
    pub fb_location: FbLocation,
    pub grab_mode: GrabMode,
}

impl CameraConfig {
    /// AI-Thinker ESP32-CAM の標準設定
    pub fn ai_thinker() -> Self {
        build_config(Self::default())
    }
}

/// ボードのピン以外で変更可能なキャプチャパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    pub xclk_freq_hz: u32,
    pub pixel_format: PixelFormat,
    pub frame_size: FrameSize,
    pub jpeg_quality: JpegQuality,
    pub fb_count: u8,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            xclk_freq_hz: XCLK_FREQ_HZ,
            pixel_format: PixelFormat::Jpeg,
            frame_size: FrameSize::Svga,
            jpeg_quality: JpegQuality(JPEG_QUALITY),
            fb_count: FB_COUNT,
        }
    }
}

impl CaptureSettings {
    pub fn with_frame_size(mut self, frame_size: FrameSize) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn with_jpeg_quality(mut self, jpeg_quality: JpegQuality) -> Self {
        self.jpeg_quality = jpeg_quality;
        self
    }

    pub fn with_fb_count(mut self, fb_count: u8) -> Self {
        self.fb_count = fb_count;
        self
    }
}

/// AI-Thinker のピン割り当てと固定のキャプチャパラメータで設定を埋める
///
/// ピン、LEDC、XCLK 周波数、フォーマット、解像度、品質、バッファ数は
/// 入力値に関係なく上書きされます。
pub fn build_config(base: CameraConfig) -> CameraConfig {
    build_config_with(base, &CaptureSettings::default())
}

/// `build_config` のキャプチャパラメータを差し替え可能にしたもの
pub fn build_config_with(base: CameraConfig, settings: &CaptureSettings) -> CameraConfig {
    let mut config = base;
    config.ledc_channel = LedcChannel::Channel0;
    config.ledc_timer = LedcTimer::Timer0;
    config.pins = AI_THINKER_PINS;
    config.xclk_freq_hz = settings.xclk_freq_hz;
    config.pixel_format = settings.pixel_format;
    config.frame_size = settings.frame_size;
    config.jpeg_quality = settings.jpeg_quality;
    config.fb_count = settings.fb_count;
    config
}
