pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod listing;

#[cfg(test)]
pub mod testing;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, ListingConfig};
use crate::database::SharedTokenStore;

/// Shared per-request state
#[derive(Clone)]
pub struct AppState {
    pub store: SharedTokenStore,
    pub listing: ListingConfig,
}

impl AppState {
    pub fn new(store: SharedTokenStore, config: &AppConfig) -> Self {
        Self {
            store,
            listing: config.listing.clone(),
        }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Listing
        .route("/listing", get(handlers::list_tokens))
        .route("/api/crypto-projects-rated", get(handlers::list_tokens))
        .fallback(handlers::not_found)
        .with_state(state);

    // Global middleware
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<_> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
}
