// src/main.rs

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use priya_collection::config::Config;
use priya_collection::state::AppState;
use priya_collection::storage::Storage;
use priya_collection::store::JsonFileStore;
use priya_collection::watcher::spawn_change_poller;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "priya_collection=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Priya's Collection...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let store = match JsonFileStore::open(&config.data_file).await {
        Ok(store) => {
            tracing::info!("Using data file {}", store.path().display());
            store
        }
        Err(e) => {
            tracing::error!("Cannot open data file {}: {:?}", config.data_file.display(), e);
            std::process::exit(1);
        }
    };

    let storage = Storage::new(Arc::new(store));
    if let Err(e) = storage.initialize_defaults().await {
        tracing::error!("Seeding default data failed: {:?}", e);
        std::process::exit(1);
    }

    spawn_change_poller(storage.clone(), config.poll_interval, config.debounce);

    let addr = config.bind_addr;
    let app = priya_collection::app(Arc::new(AppState::new(storage, config)));

    tracing::info!("Listening on {}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Cannot bind {}: {}", addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("Server error: {}", e);
    }
}
