//! `POST /api/report/pdf`: render and store the fall report PDF.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Local;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::report::{self, ReportRequest};

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub url: String,
    pub filename: String,
}

pub async fn generate_pdf(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    let Json(request) = payload?;
    let core = ctx.core.clone();

    // Rendering and the file write are blocking work.
    let generated = tokio::task::spawn_blocking(move || {
        report::generate_report(&request, &core.facility, core.reports_dir(), Local::now())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("report task failed: {e}")))??;

    Ok(Json(ReportResponse {
        url: generated.url,
        filename: generated.filename,
    }))
}
