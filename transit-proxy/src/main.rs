use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_proxy::config::{SecretSourceKind, ServerConfig};
use transit_proxy::registry::RouteRegistry;
use transit_proxy::secrets::{EnvSecretSource, FileSecretSource, SecretSource};
use transit_proxy::service::PredictionService;
use transit_proxy::upstream::{HttpFetcher, MockFetcher, UpstreamFetcher};
use transit_proxy::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "transit_proxy=info".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Secrets are read per request; a missing file only fails requests
    let secrets: Arc<dyn SecretSource> = match config.secret_source {
        SecretSourceKind::File => {
            let source = FileSecretSource::new(&config.secret_path);
            info!(path = %source.path().display(), "reading API keys from file");
            Arc::new(source)
        }
        SecretSourceKind::Env => {
            info!("reading API keys from environment");
            Arc::new(EnvSecretSource::new())
        }
    };

    let fetcher = match &config.mock_data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "serving canned upstream responses");
            UpstreamFetcher::Mock(MockFetcher::from_dir(dir)?)
        }
        None => UpstreamFetcher::Http(HttpFetcher::new(&config.upstream)?),
    };

    let registry = Arc::new(RouteRegistry::chicago());
    let service = PredictionService::new(registry, fetcher, &config.upstream, secrets);
    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "transit proxy listening");
    info!("  GET /health                 - Health check");
    info!("  GET /predictions?routes=... - Arrival predictions");

    axum::serve(listener, app).await?;
    Ok(())
}
