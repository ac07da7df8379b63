mod admin;
mod config;
mod errors;
mod insights;
mod models;
mod notify;
mod routes;
mod state;
mod store;
mod waitlist;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::notify::{NoopNotifier, Notifier, ResendNotifier};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SNOOOM waitlist API v{}", env!("CARGO_PKG_VERSION"));

    // Load the record store; seeds and writes the file on first boot.
    let store = Arc::new(Store::open(&config.data_path)?);
    info!("Store loaded from {}", config.data_path.display());

    let notifier: Arc<dyn Notifier> = match (&config.resend_api_key, &config.email_from) {
        (Some(key), Some(from)) => {
            info!("Email notifier initialized (from: {from})");
            Arc::new(ResendNotifier::new(key.clone(), from.clone()))
        }
        _ => {
            info!("RESEND_API_KEY or EMAIL_FROM not set; confirmation emails disabled");
            Arc::new(NoopNotifier)
        }
    };

    let state = AppState {
        store,
        notifier,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
