use std::sync::Arc;

use ai_thinker_cam::communication::NetworkManager;
use ai_thinker_cam::streaming::start_stream_server;
use ai_thinker_cam::{AppConfig, CameraBringUp, EspCameraDriver, VERSION};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{error, info, warn};

/// アプリケーションのメインエントリーポイント
fn main() -> anyhow::Result<()> {
    // ESP-IDFの基本初期化
    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("AI-Thinker ESP32-CAM v{}", VERSION);

    // 設定ファイル読み込み
    let app_config = AppConfig::load().map_err(|e| {
        error!("設定ファイルの読み込みに失敗しました: {}", e);
        anyhow::anyhow!("設定ファイルの読み込みエラー: {}", e)
    })?;

    let mut bring_up = CameraBringUp::new(
        EspCameraDriver::new(),
        app_config.capture,
        app_config.tuning,
    );
    let sensor = bring_up.start()?;
    info!("✓ カメラ準備完了 (センサーPID: 0x{:02x})", sensor.pid());

    let camera = Arc::new(bring_up.into_driver());

    // 露出が安定するまで最初のフレームを捨てる
    for i in 1..=app_config.camera_warmup_frames {
        match camera.capture() {
            Ok(frame) => info!(
                "ウォームアップフレーム {} を破棄 ({} bytes)",
                i,
                frame.data().len()
            ),
            Err(e) => warn!("ウォームアップフレーム {} の取得に失敗しました: {}", i, e),
        }
        FreeRtos::delay_ms(100);
    }

    if app_config.capture_on_boot {
        let frame = camera.capture()?;
        info!(
            "✓ 画像を取得しました: {}x{}, {} bytes",
            frame.width(),
            frame.height(),
            frame.data().len()
        );
    }

    let Some(stream) = app_config.stream else {
        info!("配信は無効です。終了します");
        return Ok(());
    };

    // WiFi接続
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs_partition = EspDefaultNvsPartition::take()?;
    let _wifi =
        NetworkManager::connect_wifi(peripherals.modem, &sysloop, &nvs_partition, &stream.wifi)?;

    // WiFi とサーバーを保持したまま待機する
    let _server = start_stream_server(camera, stream.server)?;
    loop {
        FreeRtos::delay_ms(1000);
    }
}
