use std::sync::{Arc, Mutex};

use super::config::CameraConfig;
use super::driver::{CameraDriver, CameraError, SensorRegistry};
use super::sensor::{SensorControl, SensorLevel, TuningCommand};

/// テスト用のセンサーモック
///
/// 発行されたコマンドを記録します。クローンは同じ記録を共有するため、
/// ハンドルを渡した後でもテスト側から検証できます。
#[derive(Debug, Clone)]
pub struct MockSensor {
    id: u32,
    issued: Arc<Mutex<Vec<TuningCommand>>>,
    failure: Arc<Mutex<Option<(MockCommandKind, i32)>>>,
}

/// 失敗させるコマンドの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCommandKind {
    Vflip,
    Contrast,
    Saturation,
}

impl MockSensor {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            issued: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// テスト用: 発行されたコマンドを取得
    pub fn issued_commands(&self) -> Vec<TuningCommand> {
        self.issued.lock().unwrap().clone()
    }

    /// テスト用: 指定コマンドでステータス `code` を返させる
    pub fn fail_on(&self, kind: MockCommandKind, code: i32) {
        *self.failure.lock().unwrap() = Some((kind, code));
    }

    fn record(&mut self, kind: MockCommandKind, command: TuningCommand) -> Result<(), i32> {
        self.issued.lock().unwrap().push(command);
        match *self.failure.lock().unwrap() {
            Some((failing, code)) if failing == kind => Err(code),
            _ => Ok(()),
        }
    }
}

impl SensorControl for MockSensor {
    fn set_vflip(&mut self, enable: bool) -> Result<(), i32> {
        self.record(MockCommandKind::Vflip, TuningCommand::SetVflip(enable))
    }

    fn set_contrast(&mut self, level: SensorLevel) -> Result<(), i32> {
        self.record(MockCommandKind::Contrast, TuningCommand::SetContrast(level))
    }

    fn set_saturation(&mut self, level: SensorLevel) -> Result<(), i32> {
        self.record(
            MockCommandKind::Saturation,
            TuningCommand::SetSaturation(level),
        )
    }
}

/// テスト用のカメラドライバモック
#[derive(Debug, Clone)]
pub struct MockCamera {
    sensor: Option<MockSensor>,
    init_status: i32,
    initialized: bool,
    init_configs: Vec<CameraConfig>,
}

impl Default for MockCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCamera {
    /// 初期化に成功し、センサーを検出するモック
    pub fn new() -> Self {
        Self::with_sensor(MockSensor::new(0x2642))
    }

    pub fn with_sensor(sensor: MockSensor) -> Self {
        Self {
            sensor: Some(sensor),
            init_status: 0,
            initialized: false,
            init_configs: Vec::new(),
        }
    }

    /// 初期化は成功するがセンサーが検出されないモック
    pub fn without_sensor() -> Self {
        Self {
            sensor: None,
            ..Self::new()
        }
    }

    /// テスト用: 初期化でステータス `status` を返させる
    pub fn failing_init(status: i32) -> Self {
        Self {
            init_status: status,
            ..Self::new()
        }
    }

    /// テスト用: 初期化済み状態にする（init を経由しない）
    pub fn initialized(mut self) -> Self {
        self.initialized = true;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// テスト用: init に渡された設定
    pub fn init_configs(&self) -> &[CameraConfig] {
        &self.init_configs
    }
}

impl SensorRegistry for MockCamera {
    type Sensor<'a> = MockSensor;

    fn sensor(&self) -> Option<MockSensor> {
        if self.initialized {
            self.sensor.clone()
        } else {
            None
        }
    }
}

impl CameraDriver for MockCamera {
    fn init(&mut self, config: &CameraConfig) -> Result<(), CameraError> {
        if self.initialized {
            return Err(CameraError::AlreadyInitialized);
        }

        self.init_configs.push(*config);
        if self.init_status != 0 {
            return Err(CameraError::InitFailed(self.init_status));
        }

        self.initialized = true;
        Ok(())
    }
}
