/// コアモジュール（カメラ立ち上げ制御と設定の検証）
pub mod bring_up;
pub mod config_validation;

pub use bring_up::CameraBringUp;
pub use config_validation::ValidationError;
