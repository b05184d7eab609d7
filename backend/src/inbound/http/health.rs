//! Health endpoints: the status summary plus liveness and readiness checks
//! for orchestration and load balancers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::ConnectivityCheck;
use crate::inbound::http::cache_control::no_store_header;

/// Shared health state for the checks and the status summary.
///
/// Starts live but not ready; the server marks it ready once bound.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    environment: String,
    database: Arc<dyn ConnectivityCheck>,
}

impl HealthState {
    /// Create a health state reporting `environment` and probing `database`.
    pub fn new(environment: impl Into<String>, database: Arc<dyn ConnectivityCheck>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            environment: environment.into(),
            database,
        }
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness checks during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn check_response(ok: bool) -> HttpResponse {
        let mut response = if ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response.insert_header(no_store_header()).finish()
    }
}

/// Database reachability as reported by `/api/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthReport {
    #[schema(example = "OK")]
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: DatabaseStatus,
    #[schema(example = "development")]
    pub environment: String,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
}

/// Service status summary; always 200 while the process can answer.
#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Status summary", body = HealthReport))
)]
#[get("/api/health")]
pub async fn status(state: web::Data<HealthState>) -> HttpResponse {
    let database = if state.database.is_connected().await {
        DatabaseStatus::Connected
    } else {
        DatabaseStatus::Disconnected
    };
    HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(HealthReport {
            status: "OK",
            timestamp: Utc::now(),
            database,
            environment: state.environment.clone(),
            version: env!("CARGO_PKG_VERSION"),
        })
}

/// Readiness check: 200 once the server is bound, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::check_response(state.is_ready())
}

/// Liveness check: 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::check_response(state.is_alive())
}
