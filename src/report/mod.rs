//! Fall incident report export.
//!
//! `generate_report` validates the request, lays the page out, renders it
//! to PDF bytes and only then writes the file. A validation or render
//! failure therefore never touches the reports directory, and a storage
//! failure never leaves a partially written file behind.

pub mod content;
pub mod export;
pub mod layout;
pub mod pdf;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Facility;
use crate::models::enums::{Condition, FirstAidAction, Injury, MobilityAid};
use crate::models::{opt_string_or_number, PlaceOfFall, RecordedVitals, ResidentRef};

pub use content::ReportContent;
pub use layout::{compose, PageLayout};

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Missing data: {0}")]
    InputValidation(String),

    #[error("Cannot store report at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report rendering failed: {0}")]
    Render(String),
}

impl ReportError {
    /// Storage failures may clear up on their own; bad input will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ReportError::Storage { .. })
    }

    /// Message suitable for showing to the nurse.
    pub fn user_message(&self) -> String {
        match self {
            ReportError::InputValidation(detail) => format!("Missing data: {detail}"),
            ReportError::Storage { .. } | ReportError::Render(_) => {
                "Could not generate report, try again.".to_string()
            }
        }
    }
}

// ─── Types ────────────────────────────────────────────────────────────────────

/// Everything the client sends to export a report. Only `resident_id` and
/// `report_text` are mandatory; the rest fills the form's fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub resident_id: Option<String>,
    #[serde(default, alias = "narrative")]
    pub report_text: Option<String>,
    #[serde(default)]
    pub resident: Option<ResidentRef>,
    #[serde(default)]
    pub place_of_fall: Option<PlaceOfFall>,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub vitals: Option<RecordedVitals>,
    #[serde(default)]
    pub aids_present: Vec<MobilityAid>,
    #[serde(default)]
    pub injuries: Vec<Injury>,
    #[serde(default)]
    pub first_aid: Vec<FirstAidAction>,
}

impl ReportRequest {
    /// Returns `(resident_id, narrative)`, both trimmed and non-empty.
    pub fn validate(&self) -> Result<(&str, &str), ReportError> {
        let resident_id = self
            .resident_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ReportError::InputValidation("residentId is required".into()))?;
        let narrative = self
            .report_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ReportError::InputValidation("reportText is required".into()))?;
        Ok((resident_id, narrative))
    }
}

/// A report that has been rendered and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub filename: String,
    /// Public URL under which the static file route serves it.
    pub url: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub size_bytes: usize,
    pub report_date: String,
}

// ─── Generation ───────────────────────────────────────────────────────────────

/// Render the report PDF without storing it. Returns the filename it
/// should be stored under, the PDF bytes and the field texts used.
pub fn render_report(
    request: &ReportRequest,
    facility: &Facility,
    now: DateTime<Local>,
) -> Result<(String, Vec<u8>, ReportContent), ReportError> {
    let (resident_id, narrative) = request.validate()?;

    let content = ReportContent::build(request, resident_id, narrative, facility, &now);
    let page = compose(&content);
    let filename = export::report_filename(resident_id, now);

    let meta = pdf::DocumentMeta {
        title: format!("{} - {}", content.title, content.resident),
        document_id: export::document_id(&filename),
        created_at: now,
    };
    let bytes = pdf::render_pdf(&page, &meta)?;
    Ok((filename, bytes, content))
}

/// Validate, render and store a report in `reports_dir`.
pub fn generate_report(
    request: &ReportRequest,
    facility: &Facility,
    reports_dir: &Path,
    now: DateTime<Local>,
) -> Result<GeneratedReport, ReportError> {
    let (filename, bytes, content) = match render_report(request, facility, now) {
        Ok(rendered) => rendered,
        Err(e @ ReportError::InputValidation(_)) => {
            tracing::warn!(error = %e, "Report request rejected");
            return Err(e);
        }
        Err(e) => {
            tracing::error!(error = %e, "Report rendering failed");
            return Err(e);
        }
    };

    tracing::info!(
        resident_id = ?request.resident_id,
        condition = ?request.condition.map(|c| c.as_str()),
        filename = %filename,
        "Storing fall report"
    );

    let path = export::write_report(&bytes, &filename, reports_dir).inspect_err(|e| {
        tracing::error!(error = %e, "Report storage failed");
    })?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Fall report created");

    Ok(GeneratedReport {
        url: export::public_url(&filename),
        filename,
        path,
        size_bytes: bytes.len(),
        report_date: content.report_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::FallLocation;
    use crate::models::{RecordedBloodPressure, ResidentRef};

    fn facility() -> Facility {
        Facility {
            name: "Haus Linde".into(),
            address: "Lindenweg 4, Dresden".into(),
        }
    }

    fn full_request() -> ReportRequest {
        ReportRequest {
            resident_id: Some("1".into()),
            report_text: Some(
                "The patient was found conscious in the bathroom. No visible injuries were found on the head or body."
                    .into(),
            ),
            resident: Some(ResidentRef { id: "1".into(), name: "Sarah Müller".into() }),
            place_of_fall: Some(PlaceOfFall::new(FallLocation::Bathroom)),
            condition: Some(Condition::Conscious),
            vitals: Some(RecordedVitals {
                blood_pressure: Some(RecordedBloodPressure { systolic: Some(120.0), diastolic: Some(80.0) }),
                temperature: Some(37.0),
                oxygen_level: Some(95.0),
                glucose_level: Some(100.0),
            }),
            aids_present: vec![MobilityAid::Walker],
            injuries: vec![],
            first_aid: vec![FirstAidAction::BodyCheck],
        }
    }

    fn files_in(dir: &Path) -> Vec<PathBuf> {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    #[test]
    fn generates_pdf_in_reports_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let reports = tmp.path().join("public").join("reports");

        let report = generate_report(&full_request(), &facility(), &reports, Local::now()).unwrap();

        assert!(report.path.exists());
        assert!(report.path.starts_with(&reports));
        assert_eq!(report.url, format!("/reports/{}", report.filename));
        let bytes = std::fs::read(&report.path).unwrap();
        assert_eq!(&bytes[0..4], b"%PDF");
        assert_eq!(bytes.len(), report.size_bytes);
        assert_eq!(files_in(&reports).len(), 1);
    }

    #[test]
    fn minimal_request_renders_with_placeholders() {
        let tmp = tempfile::tempdir().unwrap();
        let request = ReportRequest {
            resident_id: Some("42".into()),
            report_text: Some("Found on the floor.".into()),
            ..Default::default()
        };
        let report = generate_report(&request, &facility(), tmp.path(), Local::now()).unwrap();
        assert!(report.filename.starts_with("fall_report_42_"));
    }

    #[test]
    fn missing_resident_id_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut request = full_request();
        request.resident_id = None;

        let err = generate_report(&request, &facility(), tmp.path(), Local::now()).unwrap_err();
        assert!(matches!(err, ReportError::InputValidation(_)));
        assert!(!err.is_retryable());
        assert!(files_in(tmp.path()).is_empty());
    }

    #[test]
    fn blank_narrative_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut request = full_request();
        request.report_text = Some("   ".into());

        let err = generate_report(&request, &facility(), tmp.path(), Local::now()).unwrap_err();
        assert!(matches!(err, ReportError::InputValidation(_)));
        assert!(err.user_message().starts_with("Missing data"));
    }

    #[test]
    fn uncreatable_directory_is_storage_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, b"file in the way").unwrap();
        let reports = blocker.join("reports");

        let err = generate_report(&full_request(), &facility(), &reports, Local::now()).unwrap_err();
        assert!(matches!(err, ReportError::Storage { .. }));
        assert!(err.is_retryable());
        assert_eq!(err.user_message(), "Could not generate report, try again.");
        // Only the blocking file remains.
        assert_eq!(files_in(tmp.path()), vec![blocker]);
    }

    #[test]
    fn unsupported_characters_are_render_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let mut request = full_request();
        request.report_text = Some("Resident fell 跌倒 near the bed.".into());

        let err = generate_report(&request, &facility(), tmp.path(), Local::now()).unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
        assert!(files_in(tmp.path()).is_empty());
    }

    #[test]
    fn repeated_exports_get_distinct_files() {
        let tmp = tempfile::tempdir().unwrap();
        let now = Local::now();
        let a = generate_report(&full_request(), &facility(), tmp.path(), now).unwrap();
        let b = generate_report(&full_request(), &facility(), tmp.path(), now).unwrap();
        assert_ne!(a.filename, b.filename);
        assert_eq!(files_in(tmp.path()).len(), 2);
    }

    #[test]
    fn request_accepts_numeric_resident_id() {
        let request: ReportRequest =
            serde_json::from_str(r#"{"residentId": 3, "reportText": "Text"}"#).unwrap();
        assert_eq!(request.validate().unwrap(), ("3", "Text"));
    }

    #[test]
    fn request_accepts_narrative_alias() {
        let request: ReportRequest =
            serde_json::from_str(r#"{"residentId": "3", "narrative": "Text"}"#).unwrap();
        assert_eq!(request.report_text.as_deref(), Some("Text"));
    }
}
