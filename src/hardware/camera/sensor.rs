//! イメージセンサーの初期化後チューニング
//!
//! ドライバから取得したセンサーハンドルに対して、上下反転・コントラスト・彩度を設定する。

use std::fmt;

use log::{debug, warn};

use super::driver::{CameraError, SensorRegistry};

/// センサー調整レベル (-2..=2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SensorLevel(i8);

impl SensorLevel {
    pub const MIN: SensorLevel = SensorLevel(-2);
    pub const MAX: SensorLevel = SensorLevel(2);

    pub const fn new(level: i8) -> Option<Self> {
        if level >= Self::MIN.0 && level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    pub const fn get(self) -> i8 {
        self.0
    }
}

/// センサーに対する設定コマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningCommand {
    SetVflip(bool),
    SetContrast(SensorLevel),
    SetSaturation(SensorLevel),
}

impl fmt::Display for TuningCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningCommand::SetVflip(enable) => write!(f, "set_vflip({})", enable),
            TuningCommand::SetContrast(level) => write!(f, "set_contrast({})", level.get()),
            TuningCommand::SetSaturation(level) => write!(f, "set_saturation({})", level.get()),
        }
    }
}

/// ドライバのセンサー設定関数群
///
/// 実機では sensor_t の関数ポインタ、テストではモックが実装します。
/// エラー値はドライバが返したステータスコードです。
pub trait SensorControl {
    fn set_vflip(&mut self, enable: bool) -> Result<(), i32>;
    fn set_contrast(&mut self, level: SensorLevel) -> Result<(), i32>;
    fn set_saturation(&mut self, level: SensorLevel) -> Result<(), i32>;
}

/// 初期化後に適用するセンサー設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorTuning {
    pub vflip: bool,
    pub contrast: SensorLevel,
    pub saturation: SensorLevel,
}

impl Default for SensorTuning {
    fn default() -> Self {
        Self {
            vflip: true,
            contrast: SensorLevel::MAX,
            saturation: SensorLevel::MIN,
        }
    }
}

impl SensorTuning {
    /// 発行するコマンドを順番に返す
    pub fn commands(&self) -> [TuningCommand; 3] {
        [
            TuningCommand::SetVflip(self.vflip),
            TuningCommand::SetContrast(self.contrast),
            TuningCommand::SetSaturation(self.saturation),
        ]
    }
}

/// 標準設定 (上下反転ON, コントラスト+2, 彩度-2) でセンサーを調整する
pub fn tune_sensor<R: SensorRegistry>(registry: &R) -> Result<R::Sensor<'_>, CameraError> {
    tune_sensor_with(registry, &SensorTuning::default())
}

/// 登録されているセンサーを取得して設定を適用する
///
/// センサーが未登録なら何も発行せずに `SensorNotInitialized` を返します。
pub fn tune_sensor_with<'a, R: SensorRegistry>(
    registry: &'a R,
    tuning: &SensorTuning,
) -> Result<R::Sensor<'a>, CameraError> {
    let Some(sensor) = registry.sensor() else {
        warn!("センサーが見つかりません。カメラが初期化されているか確認してください");
        return Err(CameraError::SensorNotInitialized);
    };

    apply_tuning(sensor, tuning)
}

/// 渡されたセンサーハンドルに設定を適用し、同じハンドルを返す
///
/// 最初に失敗したコマンドで中断します。
pub fn apply_tuning<S: SensorControl>(
    mut sensor: S,
    tuning: &SensorTuning,
) -> Result<S, CameraError> {
    for command in tuning.commands() {
        let result = match command {
            TuningCommand::SetVflip(enable) => sensor.set_vflip(enable),
            TuningCommand::SetContrast(level) => sensor.set_contrast(level),
            TuningCommand::SetSaturation(level) => sensor.set_saturation(level),
        };

        match result {
            Ok(()) => debug!("センサー設定: {}", command),
            Err(code) => return Err(CameraError::TuningCommandFailed { command, code }),
        }
    }

    Ok(sensor)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// コマンドを記録するだけの最小センサー
    #[derive(Debug, Default)]
    struct RecordingSensor {
        issued: Vec<TuningCommand>,
        fail_contrast: Option<i32>,
    }

    impl SensorControl for RecordingSensor {
        fn set_vflip(&mut self, enable: bool) -> Result<(), i32> {
            self.issued.push(TuningCommand::SetVflip(enable));
            Ok(())
        }

        fn set_contrast(&mut self, level: SensorLevel) -> Result<(), i32> {
            self.issued.push(TuningCommand::SetContrast(level));
            match self.fail_contrast {
                Some(code) => Err(code),
                None => Ok(()),
            }
        }

        fn set_saturation(&mut self, level: SensorLevel) -> Result<(), i32> {
            self.issued.push(TuningCommand::SetSaturation(level));
            Ok(())
        }
    }

    #[test]
    fn test_sensor_level_range() {
        assert_eq!(SensorLevel::new(-2), Some(SensorLevel::MIN));
        assert_eq!(SensorLevel::new(2), Some(SensorLevel::MAX));
        assert_eq!(SensorLevel::new(3), None);
        assert_eq!(SensorLevel::new(-3), None);
    }

    #[test]
    fn test_default_tuning_values() {
        let tuning = SensorTuning::default();
        assert!(tuning.vflip);
        assert_eq!(tuning.contrast.get(), 2);
        assert_eq!(tuning.saturation.get(), -2);
    }

    #[test]
    fn test_apply_tuning_order() {
        let sensor = apply_tuning(RecordingSensor::default(), &SensorTuning::default()).unwrap();

        assert_eq!(
            sensor.issued,
            vec![
                TuningCommand::SetVflip(true),
                TuningCommand::SetContrast(SensorLevel::MAX),
                TuningCommand::SetSaturation(SensorLevel::MIN),
            ]
        );
    }

    #[test]
    fn test_apply_tuning_stops_at_first_failure() {
        let sensor = RecordingSensor {
            fail_contrast: Some(-1),
            ..Default::default()
        };

        let err = apply_tuning(sensor, &SensorTuning::default()).unwrap_err();
        assert_eq!(
            err,
            CameraError::TuningCommandFailed {
                command: TuningCommand::SetContrast(SensorLevel::MAX),
                code: -1,
            }
        );
    }

    #[test]
    fn test_command_display() {
        assert_eq!(TuningCommand::SetVflip(true).to_string(), "set_vflip(true)");
        assert_eq!(
            TuningCommand::SetSaturation(SensorLevel::MIN).to_string(),
            "set_saturation(-2)"
        );
    }
}
