/// 映像配信モジュール
///
/// - MJPEG のフレーミング (ホストでテスト可能)
/// - HTTPサーバー (実機のみ)
pub mod mjpeg;

#[cfg(feature = "esp")]
pub mod server;

pub use mjpeg::{find_jpeg, is_complete_jpeg, part_header, BOUNDARY, CONTENT_TYPE};

#[cfg(feature = "esp")]
pub use server::start_stream_server;

/// ストリーム配信の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSettings {
    pub port: u16,
    /// フレーム送信間隔 (ミリ秒)
    pub frame_interval_ms: u32,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            port: 80,
            frame_interval_ms: 20,
        }
    }
}
