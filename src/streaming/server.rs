//! カメラ映像を配信するHTTPサーバー
//!
//! - `/stream`: MJPEG ストリーム (クライアントが切断するまで送り続ける)
//! - `/capture`: 1枚の JPEG

use std::sync::Arc;

use esp_idf_hal::delay::FreeRtos;
use esp_idf_svc::http::server::{Configuration, EspHttpServer};
use esp_idf_svc::http::Method;
use esp_idf_svc::io::Write;
use log::{debug, info, warn};

use crate::hardware::camera::EspCameraDriver;

use super::mjpeg::{is_complete_jpeg, part_header, CONTENT_TYPE};
use super::StreamSettings;

/// HTTPサーバーを起動してハンドラを登録する
///
/// 返されたサーバーをドロップすると配信が止まります。
pub fn start_stream_server(
    camera: Arc<EspCameraDriver>,
    settings: StreamSettings,
) -> anyhow::Result<EspHttpServer<'static>> {
    let mut server = EspHttpServer::new(&Configuration {
        http_port: settings.port,
        ..Default::default()
    })?;

    let stream_camera = camera.clone();
    server.fn_handler("/stream", Method::Get, move |request| {
        let headers = [("Content-Type", CONTENT_TYPE)];
        let mut response = request.into_response(200, Some("OK"), &headers)?;
        info!("ストリームクライアントが接続しました");

        let mut sent_frames: u32 = 0;
        loop {
            let frame = match stream_camera.capture() {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("フレームの取得に失敗しました: {}", e);
                    FreeRtos::delay_ms(settings.frame_interval_ms);
                    continue;
                }
            };

            let data = frame.data();
            if !is_complete_jpeg(data) {
                debug!("不完全なJPEGフレームをスキップしました ({} bytes)", data.len());
                continue;
            }

            let header = part_header(data.len());
            let sent = response
                .write_all(header.as_bytes())
                .and_then(|()| response.write_all(data));
            if sent.is_err() {
                info!("ストリームクライアントが切断しました (送信フレーム数: {})", sent_frames);
                break;
            }
            sent_frames = sent_frames.wrapping_add(1);

            // 次の取得前にフレームバッファを返却する
            drop(frame);
            FreeRtos::delay_ms(settings.frame_interval_ms);
        }

        Ok::<(), anyhow::Error>(())
    })?;

    server.fn_handler("/capture", Method::Get, move |request| {
        match camera.capture() {
            Ok(frame) => {
                let mut response =
                    request.into_response(200, Some("OK"), &[("Content-Type", "image/jpeg")])?;
                response.write_all(frame.data())?;
            }
            Err(e) => {
                warn!("静止画の取得に失敗しました: {}", e);
                request
                    .into_status_response(500)?
                    .write_all(b"Camera Capture Failed")?;
            }
        }

        Ok::<(), anyhow::Error>(())
    })?;

    info!(
        "✓ HTTPサーバーを起動しました (ポート {}: /stream, /capture)",
        settings.port
    );
    Ok(server)
}
