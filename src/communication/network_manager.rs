use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    hal::modem::Modem,
    nvs::EspDefaultNvsPartition,
    wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi},
};
use log::info;

use crate::config::WifiSettings;

/// WiFi (STAモード) の接続を管理するモジュール
pub struct NetworkManager;

impl NetworkManager {
    /// アクセスポイントに接続し、IPアドレスが割り当てられるまで待つ
    ///
    /// 返された `BlockingWifi` をドロップすると切断されるため、配信中は保持してください。
    pub fn connect_wifi(
        modem: Modem,
        sysloop: &EspSystemEventLoop,
        nvs_partition: &EspDefaultNvsPartition,
        settings: &WifiSettings,
    ) -> anyhow::Result<BlockingWifi<EspWifi<'static>>> {
        info!("WiFiに接続しています: {}", settings.ssid);

        let mut wifi = BlockingWifi::wrap(
            EspWifi::new(modem, sysloop.clone(), Some(nvs_partition.clone()))?,
            sysloop.clone(),
        )?;

        // パスワードが空ならオープンネットワークとして扱う
        let auth_method = if settings.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: settings
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| anyhow::anyhow!("SSIDが長すぎます: {}", settings.ssid))?,
            password: settings
                .password
                .as_str()
                .try_into()
                .map_err(|_| anyhow::anyhow!("WiFi パスワードが長すぎます"))?,
            auth_method,
            ..Default::default()
        }))?;

        wifi.start()?;
        wifi.connect()?;
        wifi.wait_netif_up()?;

        let ip_info = wifi.wifi().sta_netif().get_ip_info()?;
        info!("✓ WiFiに接続しました (IP: {})", ip_info.ip);

        Ok(wifi)
    }
}
