//! AI-Thinker ESP32-CAM のカメラピン定義
//!
//! esp32-camera ドライバが要求する16個の信号ロールを、ボード上のGPIO番号に割り当てる。
//! PWDN と RESET はこのボードでは配線されていない（ドライバには -1 を渡す）。

use std::fmt;

/// ESP32 の最大GPIO番号
pub const MAX_GPIO: u8 = 39;

/// GPIO34-39 は入力専用
const FIRST_INPUT_ONLY_GPIO: u8 = 34;

/// GPIO6-11 は内蔵SPIフラッシュに接続されている
const FLASH_GPIOS: std::ops::RangeInclusive<u8> = 6..=11;

/// ドライバに渡す「未接続」の値
pub const NOT_CONNECTED_RAW: i32 = -1;

/// ピン割り当てのエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    #[error("GPIO{0} は ESP32 に存在しません")]
    InvalidGpio(u8),

    #[error("GPIO{gpio} が {first} と {second} に重複して割り当てられています")]
    DuplicatePin {
        gpio: u8,
        first: PinRole,
        second: PinRole,
    },

    #[error("{role} は出力が必要ですが GPIO{gpio} は入力専用です")]
    InputOnlyPin { role: PinRole, gpio: u8 },

    #[error("{role} に割り当てられた GPIO{gpio} はSPIフラッシュ用です")]
    FlashPin { role: PinRole, gpio: u8 },
}

/// ESP32 のGPIO番号
///
/// 0-39 のうち、チップに存在しない 20, 24, 28-31 は作れない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GpioNum(u8);

impl GpioNum {
    pub const fn new(num: u8) -> Result<Self, PinError> {
        match num {
            20 | 24 | 28..=31 => Err(PinError::InvalidGpio(num)),
            n if n > MAX_GPIO => Err(PinError::InvalidGpio(num)),
            _ => Ok(Self(num)),
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// 入力専用ピンかどうか
    pub const fn is_input_only(self) -> bool {
        self.0 >= FIRST_INPUT_ONLY_GPIO
    }

    pub fn is_flash(self) -> bool {
        FLASH_GPIOS.contains(&self.0)
    }
}

impl fmt::Display for GpioNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// 1つの信号ロールに対する割り当て
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinAssignment {
    Gpio(GpioNum),
    /// このボードでは配線されていない
    NotConnected,
}

impl PinAssignment {
    /// ドライバの設定構造体に書き込む値
    pub const fn raw(self) -> i32 {
        match self {
            PinAssignment::Gpio(gpio) => gpio.0 as i32,
            PinAssignment::NotConnected => NOT_CONNECTED_RAW,
        }
    }

    pub const fn gpio(self) -> Option<GpioNum> {
        match self {
            PinAssignment::Gpio(gpio) => Some(gpio),
            PinAssignment::NotConnected => None,
        }
    }
}

/// コンパイル時にGPIO番号を検証して割り当てを作る
const fn gpio(num: u8) -> PinAssignment {
    match GpioNum::new(num) {
        Ok(gpio) => PinAssignment::Gpio(gpio),
        Err(_) => panic!("GPIO number out of range"),
    }
}

/// カメラインターフェースの信号ロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinRole {
    Pwdn,
    Reset,
    Xclk,
    SccbSda,
    SccbScl,
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    Vsync,
    Href,
    Pclk,
}

impl PinRole {
    /// camera_config_t のフィールド名
    pub const fn field_name(self) -> &'static str {
        match self {
            PinRole::Pwdn => "pin_pwdn",
            PinRole::Reset => "pin_reset",
            PinRole::Xclk => "pin_xclk",
            PinRole::SccbSda => "pin_sccb_sda",
            PinRole::SccbScl => "pin_sccb_scl",
            PinRole::D0 => "pin_d0",
            PinRole::D1 => "pin_d1",
            PinRole::D2 => "pin_d2",
            PinRole::D3 => "pin_d3",
            PinRole::D4 => "pin_d4",
            PinRole::D5 => "pin_d5",
            PinRole::D6 => "pin_d6",
            PinRole::D7 => "pin_d7",
            PinRole::Vsync => "pin_vsync",
            PinRole::Href => "pin_href",
            PinRole::Pclk => "pin_pclk",
        }
    }

    /// ESP32 側から駆動する必要があるロール
    pub const fn is_output(self) -> bool {
        matches!(
            self,
            PinRole::Pwdn | PinRole::Reset | PinRole::Xclk | PinRole::SccbSda | PinRole::SccbScl
        )
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

// AI-Thinker ESP32-CAM ピン配置
pub const PWDN: PinAssignment = PinAssignment::NotConnected;
pub const RESET: PinAssignment = PinAssignment::NotConnected;
pub const XCLK: PinAssignment = gpio(4);
pub const SIOD: PinAssignment = gpio(18);
pub const SIOC: PinAssignment = gpio(23);
pub const Y9: PinAssignment = gpio(36);
pub const Y8: PinAssignment = gpio(37);
pub const Y7: PinAssignment = gpio(38);
pub const Y6: PinAssignment = gpio(39);
pub const Y5: PinAssignment = gpio(35);
pub const Y4: PinAssignment = gpio(14);
pub const Y3: PinAssignment = gpio(13);
pub const Y2: PinAssignment = gpio(34);
pub const VSYNC: PinAssignment = gpio(5);
pub const HREF: PinAssignment = gpio(27);
pub const PCLK: PinAssignment = gpio(25);

/// カメラピン設定構造体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraPins {
    pub pwdn: PinAssignment,
    pub reset: PinAssignment,
    pub xclk: PinAssignment,
    pub sccb_sda: PinAssignment,
    pub sccb_scl: PinAssignment,
    pub d0: PinAssignment,
    pub d1: PinAssignment,
    pub d2: PinAssignment,
    pub d3: PinAssignment,
    pub d4: PinAssignment,
    pub d5: PinAssignment,
    pub d6: PinAssignment,
    pub d7: PinAssignment,
    pub vsync: PinAssignment,
    pub href: PinAssignment,
    pub pclk: PinAssignment,
}

/// AI-Thinker ESP32-CAM のピン割り当て
pub const AI_THINKER_PINS: CameraPins = CameraPins {
    pwdn: PWDN,
    reset: RESET,
    xclk: XCLK,
    sccb_sda: SIOD,
    sccb_scl: SIOC,
    d0: Y2,
    d1: Y3,
    d2: Y4,
    d3: Y5,
    d4: Y6,
    d5: Y7,
    d6: Y8,
    d7: Y9,
    vsync: VSYNC,
    href: HREF,
    pclk: PCLK,
};

impl CameraPins {
    /// 全フィールドが 0 の割り当て（ゼロ初期化された camera_config_t 相当）
    pub const fn zeroed() -> Self {
        let zero = gpio(0);
        Self {
            pwdn: zero,
            reset: zero,
            xclk: zero,
            sccb_sda: zero,
            sccb_scl: zero,
            d0: zero,
            d1: zero,
            d2: zero,
            d3: zero,
            d4: zero,
            d5: zero,
            d6: zero,
            d7: zero,
            vsync: zero,
            href: zero,
            pclk: zero,
        }
    }

    /// ロールと割り当ての一覧
    pub fn assignments(&self) -> [(PinRole, PinAssignment); 16] {
        [
            (PinRole::Pwdn, self.pwdn),
            (PinRole::Reset, self.reset),
            (PinRole::Xclk, self.xclk),
            (PinRole::SccbSda, self.sccb_sda),
            (PinRole::SccbScl, self.sccb_scl),
            (PinRole::D0, self.d0),
            (PinRole::D1, self.d1),
            (PinRole::D2, self.d2),
            (PinRole::D3, self.d3),
            (PinRole::D4, self.d4),
            (PinRole::D5, self.d5),
            (PinRole::D6, self.d6),
            (PinRole::D7, self.d7),
            (PinRole::Vsync, self.vsync),
            (PinRole::Href, self.href),
            (PinRole::Pclk, self.pclk),
        ]
    }

    /// ログ出力用に (フィールド名, 生の値) を返す
    pub fn raw_pins(&self) -> [(&'static str, i32); 16] {
        self.assignments()
            .map(|(role, assignment)| (role.field_name(), assignment.raw()))
    }

    /// 割り当てを検証する
    ///
    /// ロール間のGPIO重複、出力ロールへの入力専用ピン、フラッシュ用ピンを拒否します。
    pub fn validate(&self) -> Result<(), PinError> {
        let mut owners: [Option<PinRole>; MAX_GPIO as usize + 1] = [None; MAX_GPIO as usize + 1];

        for (role, assignment) in self.assignments() {
            let Some(gpio) = assignment.gpio() else {
                continue;
            };

            if gpio.is_flash() {
                return Err(PinError::FlashPin {
                    role,
                    gpio: gpio.get(),
                });
            }

            if role.is_output() && gpio.is_input_only() {
                return Err(PinError::InputOnlyPin {
                    role,
                    gpio: gpio.get(),
                });
            }

            let owner = &mut owners[gpio.get() as usize];
            if let Some(first) = *owner {
                return Err(PinError::DuplicatePin {
                    gpio: gpio.get(),
                    first,
                    second: role,
                });
            }
            *owner = Some(role);
        }

        Ok(())
    }
}

impl Default for CameraPins {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_thinker_pins_are_valid() {
        assert_eq!(AI_THINKER_PINS.validate(), Ok(()));
    }

    #[test]
    fn test_power_down_and_reset_are_not_connected() {
        assert_eq!(AI_THINKER_PINS.pwdn.raw(), -1);
        assert_eq!(AI_THINKER_PINS.reset.raw(), -1);
        assert_eq!(AI_THINKER_PINS.pwdn.gpio(), None);
    }

    #[test]
    fn test_gpio_out_of_range() {
        assert_eq!(GpioNum::new(40), Err(PinError::InvalidGpio(40)));
        assert_eq!(GpioNum::new(39).map(GpioNum::get), Ok(39));
    }

    #[test]
    fn test_duplicate_pin_is_rejected() {
        let mut pins = AI_THINKER_PINS;
        pins.href = pins.vsync;

        assert_eq!(
            pins.validate(),
            Err(PinError::DuplicatePin {
                gpio: 5,
                first: PinRole::Vsync,
                second: PinRole::Href,
            })
        );
    }

    #[test]
    fn test_input_only_pin_for_xclk_is_rejected() {
        let mut pins = AI_THINKER_PINS;
        pins.xclk = gpio(35);
        pins.d3 = gpio(32);

        assert_eq!(
            pins.validate(),
            Err(PinError::InputOnlyPin {
                role: PinRole::Xclk,
                gpio: 35,
            })
        );
    }

    #[test]
    fn test_missing_gpio_numbers_are_rejected() {
        for num in [20, 24, 28, 29, 30, 31] {
            assert_eq!(GpioNum::new(num), Err(PinError::InvalidGpio(num)));
        }
        for num in [19, 21, 23, 25, 27, 32] {
            assert_eq!(GpioNum::new(num).map(GpioNum::get), Ok(num));
        }
    }

    #[test]
    fn test_flash_pin_is_rejected() {
        let mut pins = AI_THINKER_PINS;
        pins.pclk = gpio(6);

        assert_eq!(
            pins.validate(),
            Err(PinError::FlashPin {
                role: PinRole::Pclk,
                gpio: 6,
            })
        );
    }

    #[test]
    fn test_raw_pins_uses_driver_field_names() {
        let raw = AI_THINKER_PINS.raw_pins();

        assert_eq!(raw[0], ("pin_pwdn", -1));
        assert_eq!(raw[5], ("pin_d0", 34));
        assert_eq!(raw[15], ("pin_pclk", 25));
    }
}
