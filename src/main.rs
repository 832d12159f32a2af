//! Match Ladder Back binary entrypoint wiring the REST API to the spreadsheet store.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use match_ladder_back::{
    config::{AppConfig, StorageBackend},
    dao::{
        sheet_store::{SheetStore, memory::MemorySheetStore},
        storage::StorageError,
    },
    routes,
    services::storage_supervisor,
    state::{AppState, SharedState},
};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let backend = config.storage_backend;
    let app_state = AppState::new(config);

    spawn_supervisor(app_state.clone(), backend);
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Start the background task keeping the configured sheet store connected.
fn spawn_supervisor(state: SharedState, backend: StorageBackend) {
    match backend {
        StorageBackend::Memory => {
            warn!("using in-memory sheet store; data is lost on restart");
            let store = MemorySheetStore::new();
            tokio::spawn(storage_supervisor::run(state, move || {
                let store = store.clone();
                async move { Ok::<_, StorageError>(Arc::new(store) as Arc<dyn SheetStore>) }
            }));
        }
        #[cfg(feature = "sheets-store")]
        StorageBackend::Sheets => {
            use match_ladder_back::dao::sheet_store::google::{GoogleSheetStore, SheetsConfig};

            tokio::spawn(storage_supervisor::run(state, || async {
                let config = SheetsConfig::from_env()?;
                let store = GoogleSheetStore::connect(config).await?;
                Ok::<_, StorageError>(Arc::new(store) as Arc<dyn SheetStore>)
            }));
        }
        #[cfg(not(feature = "sheets-store"))]
        StorageBackend::Sheets => {
            warn!("built without the `sheets-store` feature; staying in degraded mode");
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "cannot listen for SIGTERM; waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
