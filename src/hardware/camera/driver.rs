use crate::hardware::pins::PinError;

use super::config::CameraConfig;
use super::sensor::{SensorControl, TuningCommand};

/// カメラ制御のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    #[error("カメラセンサーが初期化されていません")]
    SensorNotInitialized,

    #[error("センサー設定 {command} に失敗しました (status: {code})")]
    TuningCommandFailed { command: TuningCommand, code: i32 },

    #[error("カメラの初期化に失敗しました (esp_err_t: {0:#x})")]
    InitFailed(i32),

    #[error("カメラは既に初期化されています")]
    AlreadyInitialized,

    #[error("フレームの取得に失敗しました")]
    CaptureFailed,

    #[error("ピン設定が不正です: {0}")]
    InvalidPins(#[from] PinError),
}

/// 初期化済みのセンサーを返すレジストリ
///
/// 返されるハンドルはレジストリから借用され、その寿命を超えて保持できません。
pub trait SensorRegistry {
    type Sensor<'a>: SensorControl
    where
        Self: 'a;

    /// 検出済みのセンサー。未初期化なら `None`
    fn sensor(&self) -> Option<Self::Sensor<'_>>;
}

/// カメラドライバのインターフェース
///
/// 実機用 (esp32-camera) とテスト用 (Mock) の実装を切り替えるためのトレイト。
pub trait CameraDriver: SensorRegistry {
    /// 設定を渡してドライバを初期化する。ステータスは必ず検査される
    fn init(&mut self, config: &CameraConfig) -> Result<(), CameraError>;
}
