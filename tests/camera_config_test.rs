//! カメラ設定ビルダーの統合テスト
//!
//! ゼロ初期化された設定から AI-Thinker ESP32-CAM の設定が組み立てられることを確認します。

use ai_thinker_cam::hardware::camera::config::{FbLocation, GrabMode, LedcChannel, LedcTimer};
use ai_thinker_cam::hardware::camera::{
    build_config, CameraConfig, FrameSize, JpegQuality, PixelFormat,
};
use ai_thinker_cam::hardware::pins::{GpioNum, PinAssignment};
use ai_thinker_cam::AI_THINKER_PINS;

#[test]
fn test_zeroed_config_gets_board_pins() {
    let config = build_config(CameraConfig::default());
    let pins = &config.pins;

    assert_eq!(pins.d0.raw(), 34);
    assert_eq!(pins.d1.raw(), 13);
    assert_eq!(pins.d2.raw(), 14);
    assert_eq!(pins.d3.raw(), 35);
    assert_eq!(pins.d4.raw(), 39);
    assert_eq!(pins.d5.raw(), 38);
    assert_eq!(pins.d6.raw(), 37);
    assert_eq!(pins.d7.raw(), 36);
    assert_eq!(pins.xclk.raw(), 4);
    assert_eq!(pins.pclk.raw(), 25);
    assert_eq!(pins.vsync.raw(), 5);
    assert_eq!(pins.href.raw(), 27);
    assert_eq!(pins.sccb_sda.raw(), 18);
    assert_eq!(pins.sccb_scl.raw(), 23);
    assert_eq!(pins.pwdn.raw(), -1);
    assert_eq!(pins.reset.raw(), -1);

    assert_eq!(config.xclk_freq_hz, 20_000_000);
    assert_eq!(config.jpeg_quality.get(), 10);
    assert_eq!(config.fb_count, 1);
    assert_eq!(config.pixel_format, PixelFormat::Jpeg);
    assert_eq!(config.frame_size, FrameSize::Svga);
    assert_eq!(config.ledc_channel, LedcChannel::Channel0);
    assert_eq!(config.ledc_timer, LedcTimer::Timer0);
}

#[test]
fn test_build_config_is_idempotent() {
    let once = build_config(CameraConfig::default());
    let twice = build_config(once);

    assert_eq!(once, twice);
    assert_eq!(build_config(CameraConfig::default()), once);
}

#[test]
fn test_build_config_ignores_caller_values() {
    let gpio2 = PinAssignment::Gpio(GpioNum::new(2).unwrap());
    let mut base = CameraConfig::default();
    base.pins.d0 = gpio2;
    base.pins.pwdn = gpio2;
    base.ledc_channel = LedcChannel::Channel5;
    base.ledc_timer = LedcTimer::Timer3;
    base.xclk_freq_hz = 10_000_000;
    base.pixel_format = PixelFormat::Grayscale;
    base.frame_size = FrameSize::Uxga;
    base.jpeg_quality = JpegQuality::new(63).unwrap();
    base.fb_count = 2;

    assert_eq!(build_config(base), build_config(CameraConfig::default()));
    assert_eq!(build_config(base).pins, AI_THINKER_PINS);
}

#[test]
fn test_build_config_keeps_untouched_fields() {
    let mut base = CameraConfig::default();
    base.fb_location = FbLocation::Dram;
    base.grab_mode = GrabMode::Latest;

    let config = build_config(base);
    assert_eq!(config.fb_location, FbLocation::Dram);
    assert_eq!(config.grab_mode, GrabMode::Latest);
}

#[test]
fn test_ai_thinker_shortcut() {
    assert_eq!(
        CameraConfig::ai_thinker(),
        build_config(CameraConfig::default())
    );
    assert_eq!(CameraConfig::ai_thinker().pins.validate(), Ok(()));
}
