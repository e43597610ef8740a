//! Resident endpoints.
//!
//! - `GET /residents`: all residents, by name
//! - `POST /residents`: create a resident

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{NewResident, Resident};

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Resident>>, ApiError> {
    let conn = ctx.core.open_db()?;
    let residents = repository::list_residents(&conn)?;
    Ok(Json(residents))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewResident>, JsonRejection>,
) -> Result<(StatusCode, Json<Resident>), ApiError> {
    let Json(new_resident) = payload?;
    let conn = ctx.core.open_db()?;
    let resident = repository::insert_resident(&conn, &new_resident)?;
    tracing::info!(resident_id = resident.id, "Resident created");
    Ok((StatusCode::CREATED, Json(resident)))
}
