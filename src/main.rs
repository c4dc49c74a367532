//! Student Record Service binary entry point.
//!
//! Loads configuration from the environment, opens the selected store
//! binding and serves the REST API until Ctrl+C or SIGTERM. Logs go to
//! stderr.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use student_records::config::Config;
use student_records::server::{serve, AppState};
use student_records::store::open_store;
use tracing_subscriber::EnvFilter;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!(
        backend = %config.backend,
        theme = %config.theme,
        default_status = %config.default_status,
        "student-records starting"
    );

    let store = match open_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to open store");
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(AppState::new(store, config)).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }

    tracing::info!("student-records shutdown complete");
}
