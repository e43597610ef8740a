//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
}

/// `GET /api/health`: connection check for the client.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let database = ctx.core.open_db().is_ok();
    if !database {
        tracing::warn!(path = %ctx.core.db_path.display(), "Database unreachable");
    }

    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        database,
    })
}
