//! Demo backend for the portal API.
//!
//! Serves the HTTP contract the portal widgets call, from the static demo catalogue, using the
//! same triage rules as the offline catbot.

mod handlers;

use std::{collections::VecDeque, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::{error, info, instrument};

use crate::base::{
    config::Config,
    triage::Classifier,
    types::{Severity, Void},
};

/// How many emergencies the desk keeps; older ones are dropped first.
pub const MAX_EMERGENCY_RECORDS: usize = 256;

/// An emergency notice as received by the desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyRecord {
    pub severity: Severity,
    pub note: String,
    pub received_at: DateTime<Utc>,
}

/// Shared state for the request handlers.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub classifier: Classifier,
    emergencies: Arc<Mutex<VecDeque<EmergencyRecord>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            classifier: Classifier::standard(),
            emergencies: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_EMERGENCY_RECORDS))),
        }
    }

    /// Emergencies received so far, oldest first.
    pub async fn emergencies(&self) -> Vec<EmergencyRecord> {
        self.emergencies.lock().await.iter().cloned().collect()
    }

    /// Keep a received emergency, dropping the oldest once the log is full.
    pub async fn record_emergency(&self, record: EmergencyRecord) {
        let mut emergencies = self.emergencies.lock().await;

        if emergencies.len() == MAX_EMERGENCY_RECORDS {
            emergencies.pop_front();
        }

        emergencies.push_back(record);
    }
}

/// Build the router: the portal API under `/api`, plus `/health`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/stats/overview", get(handlers::quick_stats))
        .route("/medicines/search", get(handlers::search_medicines))
        .route("/doctors/availability", get(handlers::doctor_availability))
        .route("/catbot/triage", post(handlers::triage))
        .route("/emergency", post(handlers::emergency))
        .route("/auth/login", post(handlers::login))
        .route("/reports/upload", post(handlers::upload_report));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the demo backend until Ctrl-C.
#[instrument(skip_all)]
pub async fn serve(config: Config) -> Void {
    let addr = config.server_addr.clone();
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Serving the portal API on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down ..."),
        Err(err) => {
            error!("Could not listen for Ctrl-C, running until killed: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
