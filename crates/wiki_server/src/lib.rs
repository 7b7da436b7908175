//! HTTP surface for the wiki encyclopedia.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod templates;

use std::sync::Arc;

use axum::{routing::get, Router};
use log::{error, info};
use tokio::{net::TcpListener, signal};

pub use config::{Config, ConfigError, StoreBackend};
pub use error::AppError;
pub use state::{AppState, SharedStore};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/wiki/{title}", get(routes::entry))
        .route(
            "/wiki/{title}/edit",
            get(routes::edit_form).post(routes::edit),
        )
        .route("/search", get(routes::search))
        .route("/new", get(routes::new_form).post(routes::create))
        .route("/sections/{num}", get(routes::section))
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), AppError> {
    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("event=server_start module=server status=ok address={address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("event=signal_install module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("event=signal_install module=server status=error signal=terminate error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("event=server_shutdown module=server status=signal");
}
