use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use car_api::config::config;
use car_api::database::{DatabaseManager, TokenRepository};
use car_api::{app, AppState};

/// Read-only listing API for AI-scored crypto tokens
#[derive(Parser, Debug)]
#[command(name = "car-api", version, about)]
struct Args {
    /// Bind address (overrides CAR_API_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides CAR_API_PORT / PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "car_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    tracing::info!("Starting CoinAIRank listing API in {:?} mode", config.environment);
    if car_api::is_production!() && config.security.enable_cors && config.security.cors_origins.is_empty() {
        tracing::warn!("CORS allows any origin; set SECURITY_CORS_ORIGINS");
    }

    let pool = DatabaseManager::connect(&config.database).context("failed to configure database pool")?;
    let repository = TokenRepository::new(pool, &config.listing.table, &config.database)
        .context("invalid listing table")?;

    let state = AppState::new(Arc::new(repository), config);
    let app = app(state, config);

    let host = args.host.unwrap_or_else(|| config.api.host.clone());
    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
