/// ハードウェア制御モジュール
pub mod camera;
pub mod pins;

pub use pins::{CameraPins, PinAssignment, AI_THINKER_PINS};
