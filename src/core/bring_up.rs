//! カメラの立ち上げシーケンス
//!
//! 設定構築 → ドライバ初期化（ステータス検査あり）→ センサーチューニング の順に実行する。

use log::{error, info};

use crate::hardware::camera::{
    build_config_with, tune_sensor_with, CameraConfig, CameraDriver, CameraError,
    CaptureSettings, SensorRegistry, SensorTuning,
};

/// カメラ立ち上げコントローラー
pub struct CameraBringUp<D: CameraDriver> {
    driver: D,
    settings: CaptureSettings,
    tuning: SensorTuning,
}

impl<D: CameraDriver> CameraBringUp<D> {
    pub fn new(driver: D, settings: CaptureSettings, tuning: SensorTuning) -> Self {
        Self {
            driver,
            settings,
            tuning,
        }
    }

    /// ドライバに渡す設定
    pub fn config(&self) -> CameraConfig {
        build_config_with(CameraConfig::default(), &self.settings)
    }

    /// カメラを初期化してセンサーを調整し、調整済みのセンサーハンドルを返す
    ///
    /// 初期化に失敗した場合はチューニングを行わずにエラーを返します。
    pub fn start(&mut self) -> Result<<D as SensorRegistry>::Sensor<'_>, CameraError> {
        let config = self.config();
        config.pins.validate()?;

        for (field, value) in config.pins.raw_pins() {
            log::debug!("{} = {}", field, value);
        }
        info!(
            "カメラを初期化しています: {}, XCLK {}Hz, JPEG品質 {}, バッファ数 {}",
            config.frame_size,
            config.xclk_freq_hz,
            config.jpeg_quality.get(),
            config.fb_count
        );

        if let Err(e) = self.driver.init(&config) {
            error!("カメラの初期化に失敗しました: {}", e);
            return Err(e);
        }

        let sensor = tune_sensor_with(&self.driver, &self.tuning)?;
        info!("✓ センサー設定を適用しました: {:?}", self.tuning);
        Ok(sensor)
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }
}

#[cfg(all(test, not(feature = "esp")))]
mod tests {
    use super::*;
    use crate::hardware::camera::mock::{MockCamera, MockCommandKind, MockSensor};
    use crate::hardware::camera::{FrameSize, SensorLevel, TuningCommand};
    use crate::hardware::pins::AI_THINKER_PINS;

    #[test]
    fn test_start_initializes_then_tunes() {
        let sensor = MockSensor::new(1);
        let mut bring_up = CameraBringUp::new(
            MockCamera::with_sensor(sensor.clone()),
            CaptureSettings::default(),
            SensorTuning::default(),
        );

        let tuned = bring_up.start().unwrap();
        assert_eq!(tuned.id(), 1);
        assert_eq!(sensor.issued_commands().len(), 3);

        let driver = bring_up.into_driver();
        assert!(driver.is_initialized());
        assert_eq!(driver.init_configs().len(), 1);
        assert_eq!(driver.init_configs()[0].pins, AI_THINKER_PINS);
    }

    #[test]
    fn test_start_skips_tuning_when_init_fails() {
        let mut bring_up = CameraBringUp::new(
            MockCamera::failing_init(0x105),
            CaptureSettings::default(),
            SensorTuning::default(),
        );

        let err = bring_up.start().map(|_| ()).unwrap_err();
        assert_eq!(err, CameraError::InitFailed(0x105));
        assert!(!bring_up.driver().is_initialized());
    }

    #[test]
    fn test_start_without_sensor() {
        let mut bring_up = CameraBringUp::new(
            MockCamera::without_sensor(),
            CaptureSettings::default(),
            SensorTuning::default(),
        );

        let err = bring_up.start().map(|_| ()).unwrap_err();
        assert_eq!(err, CameraError::SensorNotInitialized);
    }

    #[test]
    fn test_start_reports_failed_command() {
        let sensor = MockSensor::new(1);
        sensor.fail_on(MockCommandKind::Saturation, 0x103);
        let mut bring_up = CameraBringUp::new(
            MockCamera::with_sensor(sensor),
            CaptureSettings::default(),
            SensorTuning::default(),
        );

        let err = bring_up.start().map(|_| ()).unwrap_err();
        assert_eq!(
            err,
            CameraError::TuningCommandFailed {
                command: TuningCommand::SetSaturation(SensorLevel::MIN),
                code: 0x103,
            }
        );
    }

    #[test]
    fn test_config_uses_settings() {
        let bring_up = CameraBringUp::new(
            MockCamera::new(),
            CaptureSettings::default().with_frame_size(FrameSize::Vga),
            SensorTuning::default(),
        );

        assert_eq!(bring_up.config().frame_size, FrameSize::Vga);
        assert_eq!(bring_up.config().xclk_freq_hz, 20_000_000);
    }
}
