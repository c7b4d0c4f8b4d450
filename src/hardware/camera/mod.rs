/// カメラモジュール (AI-Thinker ESP32-CAM)
///
/// - キャプチャ設定とコンフィグビルダー
/// - 初期化後のセンサーチューニング
/// - ドライバのインターフェースと実装 (esp32-camera / Mock)
pub mod config;
pub mod driver;
pub mod sensor;

#[cfg(feature = "esp")]
pub mod esp;

// Mock実装（テストとnon-espビルドで使用可能）
#[cfg(not(feature = "esp"))]
pub mod mock;

pub use config::{
    build_config, build_config_with, CameraConfig, CaptureSettings, FrameSize, JpegQuality,
    PixelFormat,
};
pub use driver::{CameraDriver, CameraError, SensorRegistry};
pub use sensor::{
    apply_tuning, tune_sensor, tune_sensor_with, SensorControl, SensorLevel, SensorTuning,
    TuningCommand,
};

#[cfg(feature = "esp")]
pub use esp::{EspCameraDriver, EspSensor, FrameBuffer};
