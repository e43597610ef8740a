//! Incident report endpoints. Reports are insert-only.
//!
//! - `POST /incident-reports`: store a narrative
//! - `GET /incident-reports/resident/:id`: reports for a resident, newest
//!   first; an unknown resident simply has no reports

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, CreatedId};
use crate::db::repository;
use crate::models::{opt_string_or_number, IncidentReport, NewIncidentReport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentReport {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub resident_id: Option<String>,
    #[serde(default)]
    pub narrative: Option<String>,
    #[serde(default)]
    pub nurse_id: Option<i64>,
}

impl CreateIncidentReport {
    fn into_new(self) -> Result<NewIncidentReport, ApiError> {
        let resident_id = self
            .resident_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::MissingData("residentId is required".into()))?;
        let resident_id: i64 = resident_id
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Invalid residentId: {resident_id}")))?;
        let narrative = self
            .narrative
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ApiError::MissingData("narrative is required".into()))?;

        Ok(NewIncidentReport {
            resident_id,
            narrative,
            nurse_id: self.nurse_id,
        })
    }
}

pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<CreateIncidentReport>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedId>), ApiError> {
    let Json(body) = payload?;
    let report = body.into_new()?;

    let conn = ctx.core.open_db()?;
    let id = repository::insert_incident_report(&conn, &report)?;
    tracing::info!(report_id = id, resident_id = report.resident_id, "Incident report stored");

    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

pub async fn list_for_resident(
    State(ctx): State<ApiContext>,
    Path(resident_id): Path<i64>,
) -> Result<Json<Vec<IncidentReport>>, ApiError> {
    let conn = ctx.core.open_db()?;
    let reports = repository::list_incident_reports_for_resident(&conn, resident_id)?;
    Ok(Json(reports))
}
