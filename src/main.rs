mod config;
mod contract;
mod dispatcher;
mod endpoint;
mod error;
mod handlers;
mod routes;
mod soap;
mod state;
mod translate;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translator_ws=debug,tower_http=debug")),
        )
        .init();

    // Load configuration - CONFIG_PATH first, then the working directory
    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut config = None;
    for path in &config_paths {
        match Config::load(path) {
            Ok(cfg) => {
                info!("Loaded configuration from: {}", path);
                config = Some(cfg);
                break;
            }
            Err(e) => {
                tracing::debug!("Failed to load config from {}: {}", path, e);
            }
        }
    }

    let config = config.ok_or_else(|| {
        anyhow::anyhow!("Could not find config file. Tried: {:?}", config_paths)
    })?;

    // Schema problems are fatal here, before the listener is bound
    let app_state = AppState::new(config.clone())?;
    let app = routes::create_app(app_state);

    let system_config = &config.system_config;
    let listener = tokio::net::TcpListener::bind((system_config.host.as_str(), system_config.port)).await?;
    info!(
        "Starting server on {}, service root {}",
        listener.local_addr()?,
        system_config.service_root
    );

    axum::serve(listener, app).await?;

    Ok(())
}
