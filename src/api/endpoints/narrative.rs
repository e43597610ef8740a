//! `POST /api/narrative`: narrative from the wizard's answers.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::config::MAX_NARRATIVE_LENGTH;
use crate::models::IncidentDetails;
use crate::narrative::{build_narrative, display_length};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeResponse {
    pub narrative: String,
    pub length: usize,
    pub max_length: usize,
}

/// Unknown catalog ids fail JSON decoding and surface as 400.
pub async fn build(
    payload: Result<Json<IncidentDetails>, JsonRejection>,
) -> Result<Json<NarrativeResponse>, ApiError> {
    let Json(details) = payload?;
    let narrative = build_narrative(&details);
    let length = display_length(&narrative);

    tracing::debug!(
        condition = details.condition.as_str(),
        place = details.place_of_fall.id.as_str(),
        length,
        "Narrative built"
    );

    Ok(Json(NarrativeResponse {
        narrative,
        length,
        max_length: MAX_NARRATIVE_LENGTH,
    }))
}
