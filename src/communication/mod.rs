/// 通信モジュール (WiFi)
pub mod network_manager;

pub use network_manager::NetworkManager;
