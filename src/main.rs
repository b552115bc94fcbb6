use quote_server::utils::logger;
use quote_server::{Config, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, logging)
    dotenv::dotenv().ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    logger::init_logger(log_dir.as_deref());

    // 2. Load configuration
    let config = Config::from_env()?;
    tracing::info!(environment = %config.environment, "quote-server starting...");

    // 3. Run the HTTP server (initializes pool + state internally)
    let server = Server::new(config);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
