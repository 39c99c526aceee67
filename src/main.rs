use anyhow::Result;
use clap::Parser;
use fashion_studio::backend;
use fashion_studio::config::Config;
use fashion_studio::routes::{router, AppState};
use fashion_studio::store::{DesignStore, RestStore};
use fashion_studio::studio::{DesignStudio, StudioOptions};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "fashion-studio")]
#[command(about = "AI fashion design studio server")]
struct CliArgs {
    /// Port to listen on (overrides the PORT environment variable).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fashion_studio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting fashion-studio");

    let args = CliArgs::parse();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // One HTTP connection pool shared by the backend and the record store.
    let http_client = reqwest::Client::new();

    let image_backend = backend::from_config(&config, http_client.clone())?;
    info!("Image backend: {}", config.backend);

    let store: Option<Box<dyn DesignStore>> = config.store_url.clone().map(|url| {
        info!("Design records will be saved to the configured store");
        Box::new(RestStore::new_with_client(
            url,
            config.store_api_key.clone(),
            http_client,
        )) as Box<dyn DesignStore>
    });

    let studio = DesignStudio::new(
        image_backend,
        store,
        StudioOptions {
            retry_attempts: config.retry_attempts,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            user_id: config.user_id.clone(),
        },
    );

    let app = router(AppState {
        studio: Arc::new(studio),
    });

    let port = args.port.unwrap_or(config.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
