//! Fuel optimizer HTTP service binary.
//!
//! # Configuration
//!
//! - `FUELOPT_DATA_DIR` - Directory holding `aircraft.csv` and route CSVs (default: `./data`)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - Set to `false` to disable the Prometheus recorder
//! - `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL` - Assistant upstream (optional)

use std::env;
use std::net::SocketAddr;

use tracing::{error, info, warn};

use fuelopt_service_shared::{
    init_logging, init_metrics, AppState, AssistantClient, AssistantConfig, LoggingConfig,
    MetricsConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::from_env().with_service("fuelopt-service"));

    if let Err(e) = init_metrics(&MetricsConfig::from_env()) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let data_dir = env::var("FUELOPT_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(data_dir = %data_dir, port = port, "starting fuel optimizer service");

    let assistant = match AssistantConfig::from_env() {
        Some(config) => {
            info!(model = %config.model, "assistant enabled");
            Some(AssistantClient::new(config)?)
        }
        None => {
            info!("OPENAI_API_KEY not set, /api/v1/ask-agent will answer 503");
            None
        }
    };

    let state = AppState::load(&data_dir, assistant).map_err(|e| {
        error!(error = %e, path = %data_dir, "failed to load application state");
        e
    })?;

    let app = fuelopt_service::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
