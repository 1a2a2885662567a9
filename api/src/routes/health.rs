use actix_web::{web, HttpResponse};
use mb_infra::DatabasePool;
use mb_shared::types::{HealthResponse, HealthStatus};
use mb_shared::StorageBackend;

/// What `/health` reports on
pub struct HealthState {
    storage: StorageBackend,
    database: Option<DatabasePool>,
}

impl HealthState {
    pub fn new(storage: StorageBackend, database: Option<DatabasePool>) -> Self {
        Self { storage, database }
    }
}

/// Handler for GET /health
///
/// 200 when the backing store answers, 503 otherwise.
pub async fn health_check(state: web::Data<HealthState>) -> HttpResponse {
    let healthy = match &state.database {
        Some(pool) => pool.health_check().await.unwrap_or(false),
        None => true,
    };

    if healthy {
        HttpResponse::Ok().json(HealthResponse::new(
            HealthStatus::Healthy,
            state.storage.as_str(),
        ))
    } else {
        HttpResponse::ServiceUnavailable().json(HealthResponse::new(
            HealthStatus::Unhealthy,
            state.storage.as_str(),
        ))
    }
}
