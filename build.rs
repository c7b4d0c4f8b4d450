fn main() {
    // ESP-IDFのビルド環境変数はespフィーチャー有効時のみ出力する
    #[cfg(feature = "esp")]
    embuild::espidf::sysenv::output();

    println!("cargo:rerun-if-changed=cfg.toml");
}
