/*!
 * # AI-Thinker ESP32-CAM Camera Library
 *
 * AI-Thinker ESP32-CAM ボードのカメラピン定義と esp32-camera ドライバ向けの設定ライブラリ
 *
 * ## モジュール構成
 * - `core`: カメラ立ち上げ制御と設定値の検証
 * - `hardware`: ボードのピン定義、キャプチャ設定、センサーチューニング、ドライバ
 * - `config`: cfg.toml から読み込むアプリケーション設定
 * - `streaming`: MJPEG 配信 (HTTPサーバーは実機のみ)
 * - `communication`: WiFi 接続 (実機のみ)
 */

// 公開モジュール
pub mod config;
pub mod core;
pub mod hardware;
pub mod streaming;

#[cfg(feature = "esp")]
pub mod communication;

// 内部で使用する型をまとめてエクスポート
pub use crate::core::CameraBringUp;
pub use config::{AppConfig, ConfigError, StreamConfig, WifiSettings};
pub use hardware::camera::{
    build_config, tune_sensor, CameraConfig, CameraDriver, CameraError, SensorControl,
    SensorRegistry,
};
pub use hardware::{CameraPins, AI_THINKER_PINS};
pub use streaming::StreamSettings;

#[cfg(feature = "esp")]
pub use hardware::camera::EspCameraDriver;

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
