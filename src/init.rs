use env_logger::Env;

/// 初始化日誌，RUST_LOG 可覆寫等級
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
}
