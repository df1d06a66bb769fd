use std::sync::Arc;

use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::ServiceExt;
use configs::{AppConfig, ItemsConfig};
use service::items::{ItemStore, RandomIdGenerator};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, App, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Fresh store for a process run: seeded or empty per config.
pub fn build_store(items: &ItemsConfig) -> Arc<ItemStore> {
    let ids = Arc::new(RandomIdGenerator);
    if items.seed {
        ItemStore::seeded(ids)
    } else {
        ItemStore::new(ids)
    }
}

/// Assemble the application around a new store, ready for `axum::serve`.
pub fn build_app(items: &ItemsConfig) -> IntoMakeService<App> {
    let state = AppState::new(build_store(items));
    let app = routes::build_router(state, &items.prefix, build_cors());
    ServiceExt::<Request>::into_make_service(app)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, draining connections");
    }
}

/// Public entry: validate config, build the app, and serve until Ctrl+C.
pub async fn run(mut cfg: AppConfig) -> Result<(), StartupError> {
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let app = build_app(&cfg.items);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, prefix = %cfg.items.prefix, seeded = cfg.items.seed, "items api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
