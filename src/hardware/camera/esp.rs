//! esp32-camera コンポーネントを使った実機用ドライバ

use std::ffi::c_int;
use std::marker::PhantomData;
use std::ptr::NonNull;

use esp_idf_svc::sys::{self, camera, esp, EspError};
use log::{error, info, warn};

use super::config::{CameraConfig, FbLocation, FrameSize, GrabMode, PixelFormat};
use super::driver::{CameraDriver, CameraError, SensorRegistry};
use super::sensor::{SensorControl, SensorLevel};

type Setter = Option<unsafe extern "C" fn(*mut camera::sensor_t, c_int) -> c_int>;

fn pixel_format(format: PixelFormat) -> camera::pixformat_t {
    match format {
        PixelFormat::Rgb565 => camera::pixformat_t_PIXFORMAT_RGB565,
        PixelFormat::Yuv422 => camera::pixformat_t_PIXFORMAT_YUV422,
        PixelFormat::Grayscale => camera::pixformat_t_PIXFORMAT_GRAYSCALE,
        PixelFormat::Jpeg => camera::pixformat_t_PIXFORMAT_JPEG,
        PixelFormat::Rgb888 => camera::pixformat_t_PIXFORMAT_RGB888,
    }
}

fn frame_size(size: FrameSize) -> camera::framesize_t {
    match size {
        FrameSize::Qqvga => camera::framesize_t_FRAMESIZE_QQVGA,
        FrameSize::Qcif => camera::framesize_t_FRAMESIZE_QCIF,
        FrameSize::Hqvga => camera::framesize_t_FRAMESIZE_HQVGA,
        FrameSize::Qvga => camera::framesize_t_FRAMESIZE_QVGA,
        FrameSize::Cif => camera::framesize_t_FRAMESIZE_CIF,
        FrameSize::Hvga => camera::framesize_t_FRAMESIZE_HVGA,
        FrameSize::Vga => camera::framesize_t_FRAMESIZE_VGA,
        FrameSize::Svga => camera::framesize_t_FRAMESIZE_SVGA,
        FrameSize::Xga => camera::framesize_t_FRAMESIZE_XGA,
        FrameSize::Hd => camera::framesize_t_FRAMESIZE_HD,
        FrameSize::Sxga => camera::framesize_t_FRAMESIZE_SXGA,
        FrameSize::Uxga => camera::framesize_t_FRAMESIZE_UXGA,
    }
}

/// `CameraConfig` を esp32-camera の camera_config_t に変換する
fn to_raw_config(config: &CameraConfig) -> camera::camera_config_t {
    let pins = &config.pins;
    let mut raw = camera::camera_config_t::default();

    raw.pin_pwdn = pins.pwdn.raw();
    raw.pin_reset = pins.reset.raw();
    raw.pin_xclk = pins.xclk.raw();
    raw.__bindgen_anon_1.pin_sccb_sda = pins.sccb_sda.raw();
    raw.__bindgen_anon_2.pin_sccb_scl = pins.sccb_scl.raw();
    raw.pin_d7 = pins.d7.raw();
    raw.pin_d6 = pins.d6.raw();
    raw.pin_d5 = pins.d5.raw();
    raw.pin_d4 = pins.d4.raw();
    raw.pin_d3 = pins.d3.raw();
    raw.pin_d2 = pins.d2.raw();
    raw.pin_d1 = pins.d1.raw();
    raw.pin_d0 = pins.d0.raw();
    raw.pin_vsync = pins.vsync.raw();
    raw.pin_href = pins.href.raw();
    raw.pin_pclk = pins.pclk.raw();

    raw.xclk_freq_hz = config.xclk_freq_hz as _;
    raw.ledc_timer = config.ledc_timer.index() as _;
    raw.ledc_channel = config.ledc_channel.index() as _;
    raw.pixel_format = pixel_format(config.pixel_format);
    raw.frame_size = frame_size(config.frame_size);
    raw.jpeg_quality = config.jpeg_quality.get() as _;
    raw.fb_count = config.fb_count as _;
    raw.fb_location = match config.fb_location {
        FbLocation::Psram => camera::camera_fb_location_t_CAMERA_FB_IN_PSRAM,
        FbLocation::Dram => camera::camera_fb_location_t_CAMERA_FB_IN_DRAM,
    };
    raw.grab_mode = match config.grab_mode {
        GrabMode::WhenEmpty => camera::camera_grab_mode_t_CAMERA_GRAB_WHEN_EMPTY,
        GrabMode::Latest => camera::camera_grab_mode_t_CAMERA_GRAB_LATEST,
    };

    raw
}

/// esp32-camera ドライバ
///
/// 初期化に成功した場合のみ、ドロップ時に esp_camera_deinit を呼びます。
pub struct EspCameraDriver {
    initialized: bool,
}

impl Default for EspCameraDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl EspCameraDriver {
    pub fn new() -> Self {
        Self { initialized: false }
    }

    /// フレームを1枚取得する。ガードのドロップでドライバに返却される
    pub fn capture(&self) -> Result<FrameBuffer<'_>, CameraError> {
        if !self.initialized {
            return Err(CameraError::SensorNotInitialized);
        }

        let raw = NonNull::new(unsafe { camera::esp_camera_fb_get() })
            .ok_or(CameraError::CaptureFailed)?;
        Ok(FrameBuffer {
            raw,
            _driver: PhantomData,
        })
    }
}

impl SensorRegistry for EspCameraDriver {
    type Sensor<'a> = EspSensor<'a>;

    fn sensor(&self) -> Option<EspSensor<'_>> {
        if !self.initialized {
            return None;
        }

        NonNull::new(unsafe { camera::esp_camera_sensor_get() }).map(|raw| EspSensor {
            raw,
            _driver: PhantomData,
        })
    }
}

impl CameraDriver for EspCameraDriver {
    fn init(&mut self, config: &CameraConfig) -> Result<(), CameraError> {
        if self.initialized {
            return Err(CameraError::AlreadyInitialized);
        }

        let raw = to_raw_config(config);
        esp!(unsafe { camera::esp_camera_init(&raw) }).map_err(|e: EspError| {
            error!("esp_camera_init に失敗しました: {}", e);
            CameraError::InitFailed(e.code())
        })?;

        self.initialized = true;
        info!("✓ カメラを初期化しました ({})", config.frame_size);
        Ok(())
    }
}

impl Drop for EspCameraDriver {
    fn drop(&mut self) {
        if !self.initialized {
            return;
        }

        if let Err(e) = esp!(unsafe { camera::esp_camera_deinit() }) {
            warn!("esp_camera_deinit に失敗しました: {}", e);
        }
    }
}

/// ドライバが保持している sensor_t への借用ハンドル
pub struct EspSensor<'a> {
    raw: NonNull<camera::sensor_t>,
    _driver: PhantomData<&'a EspCameraDriver>,
}

impl EspSensor<'_> {
    /// センサーのプロダクトID (OV2640 なら 0x26)
    pub fn pid(&self) -> u16 {
        unsafe { self.raw.as_ref() }.id.PID as u16
    }

    fn call(&mut self, setter: Setter, value: c_int) -> Result<(), i32> {
        let setter = setter.ok_or(sys::ESP_ERR_NOT_SUPPORTED as i32)?;
        let status = unsafe { setter(self.raw.as_ptr(), value) };
        if status == 0 {
            Ok(())
        } else {
            Err(status)
        }
    }
}

impl SensorControl for EspSensor<'_> {
    fn set_vflip(&mut self, enable: bool) -> Result<(), i32> {
        let setter = unsafe { self.raw.as_ref() }.set_vflip;
        self.call(setter, c_int::from(enable))
    }

    fn set_contrast(&mut self, level: SensorLevel) -> Result<(), i32> {
        let setter = unsafe { self.raw.as_ref() }.set_contrast;
        self.call(setter, c_int::from(level.get()))
    }

    fn set_saturation(&mut self, level: SensorLevel) -> Result<(), i32> {
        let setter = unsafe { self.raw.as_ref() }.set_saturation;
        self.call(setter, c_int::from(level.get()))
    }
}

/// 取得したフレームバッファ。ドロップ時に esp_camera_fb_return で返却する
pub struct FrameBuffer<'a> {
    raw: NonNull<camera::camera_fb_t>,
    _driver: PhantomData<&'a EspCameraDriver>,
}

impl FrameBuffer<'_> {
    pub fn data(&self) -> &[u8] {
        let fb = unsafe { self.raw.as_ref() };
        unsafe { std::slice::from_raw_parts(fb.buf, fb.len) }
    }

    pub fn width(&self) -> usize {
        unsafe { self.raw.as_ref() }.width as usize
    }

    pub fn height(&self) -> usize {
        unsafe { self.raw.as_ref() }.height as usize
    }
}

impl Drop for FrameBuffer<'_> {
    fn drop(&mut self) {
        unsafe { camera::esp_camera_fb_return(self.raw.as_ptr()) }
    }
}
