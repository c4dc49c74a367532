//! REST server.
//!
//! This module provides:
//! - `/students` CRUD over the configured [`StudentStore`](crate::traits::StudentStore)
//! - `/reports/*` read-only aggregation endpoints
//! - Structured error bodies (see [`ApiError`])
//! - CORS, request tracing and graceful shutdown
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/students` | all records |
//! | POST | `/students` | `{message, id}` |
//! | PUT | `/students/{id}` | `{message}` |
//! | DELETE | `/students/{id}` | `{message}` |
//! | GET | `/reports/students?status=&section=&grade=&q=` | filtered records |
//! | GET | `/reports/summary` | dashboard statistics |
//! | GET | `/reports/sections` | distinct sections |
//! | GET | `/settings` | theme and default status |
//! | GET | `/health` | `ok` |
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use student_records::config::Config;
//! use student_records::server::{serve, AppState};
//! use student_records::store::SqlStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let store = SqlStore::new(&config.database_path).await?;
//! serve(AppState::new(Arc::new(store), config)).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod routes;
mod state;

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use routes::{MessageResponse, ReportQuery, SummaryResponse};
pub use state::AppState;

use crate::error::AppError;

/// Build the router with all routes and layers.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/students",
            get(routes::list_students).post(routes::create_student),
        )
        .route(
            "/students/{id}",
            axum::routing::put(routes::update_student).delete(routes::delete_student),
        )
        .route("/reports/students", get(routes::report_students))
        .route("/reports/summary", get(routes::report_summary))
        .route("/reports/sections", get(routes::report_sections))
        .route("/settings", get(routes::settings))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns [`AppError::Server`] if the address cannot be bound or the
/// server fails while running.
pub async fn serve(state: AppState) -> Result<(), AppError> {
    let address = state.config.listen_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::Server {
            message: format!("Failed to bind {address}: {e}"),
        })?;

    tracing::info!(%address, backend = %state.config.backend, "Server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server {
            message: e.to_string(),
        })?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
