use wishlist_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = rolling_logger::init_logger(config.log_dir.clone(), "wishlist") {
        eprintln!("Failed to init rolling logger: {}", e);
    }
    let _ = rolling_logger::info(&format!("Starting with {:?}", config));

    if let Err(e) = wishlist_server::run(config).await {
        if rolling_logger::error(&format!("Fatal: {}", e)).is_err() {
            eprintln!("Fatal: {}", e);
        }
        std::process::exit(1);
    }
}
