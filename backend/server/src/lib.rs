//! Backend for the indent/issue request form.
//!
//! The form itself lives in the frontend. This server sits between it and the spreadsheet.
//!
//!
//!
//! # General Infrastructure
//! - Frontend loads the ledger once from `/master-data` and prefills the indent number from `/next-indent`
//! - Every item line is previewed through `/lines` so the form can show stock after purchase while typing
//! - `/submit` validates, stamps and appends one spreadsheet row per item line
//! - Spreadsheet is either the Apps Script deployment (`SHEET_URL`) or an in-process workbook
//!
//!
//!
//! # Routes
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/master-data` | `{ itemNames, stockData }` |
//! | GET | `/items` | item names |
//! | GET | `/stores` | store names |
//! | GET | `/next-indent` | `I-NNN` as text |
//! | POST | `/refresh` | `{ items }` after reloading the ledger |
//! | POST | `/lines` | stock preview for one line |
//! | POST | `/submit` | `Success` |
//! | GET | `/health` | `OK` |
//!
//!
//!
//! # Notes
//!
//! ## Indent Numbers
//! Allocation is not atomic. Two people opening the form at the same time get the same
//! `/next-indent` answer, and two submissions without an indent number can both be stamped with
//! the same one. The Apps Script deployment behaves the same way, so the spreadsheet stays the
//! single source of truth and duplicates are fixed there by hand.
//!
//! ## Stock
//! The ledger is a snapshot. Submitting does not decrement it, `POST /refresh` reloads it.
//!
//!
//!
//! # Setup
//!
//! Run against the in-process workbook.
//! ```sh
//! RUST_LOG=info cargo run --bin indent
//! ```
//!
//! Run against a deployed Apps Script.
//! ```sh
//! SHEET_URL=https://script.google.com/macros/s/.../exec RUST_LOG=info cargo run --bin indent
//! ```
//!
//! Send a test submission.
//! ```sh
//! cargo run --bin tester -- --item "PVC Item Name 4 25 MM" --quantity 12
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod submission;
pub mod utils;

use config::Config;
use routes::{
    health_handler, items_handler, line_handler, master_data_handler, next_indent_handler,
    refresh_handler, stores_handler, submit_handler,
};
use state::State;

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/master-data", get(master_data_handler))
        .route("/items", get(items_handler))
        .route("/stores", get(stores_handler))
        .route("/next-indent", get(next_indent_handler))
        .route("/refresh", post(refresh_handler))
        .route("/lines", post(line_handler))
        .route("/submit", post(submit_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let config = Config::load()?;
    let state = State::new(config).await?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
}
