use std::net::SocketAddr;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::{info, Level};

const DEFAULT_CONFIG_DIR: &str = "./config";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()),
        )
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let loader = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        holidays = loader.holidays().len(),
        "Configuration loaded"
    );

    let addr: SocketAddr = std::env::var("PAYROLL_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let app = create_router(AppState::new(loader));
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
