use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use uuid::Uuid;

use super::ReportError;

/// URL prefix the static file route serves reports under.
pub const PUBLIC_PREFIX: &str = "/reports";

const MAX_ID_CHARS: usize = 64;

/// `fall_report_<resident>_<unix millis>_<8 hex>.pdf`
///
/// The random suffix keeps two exports of the same resident within the
/// same millisecond from colliding.
pub fn report_filename<Tz: TimeZone>(resident_id: &str, now: DateTime<Tz>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "fall_report_{}_{}_{}.pdf",
        safe_component(resident_id),
        now.timestamp_millis(),
        &suffix[..8]
    )
}

/// PDF document id derived from the filename (stem, hex-safe).
pub fn document_id(filename: &str) -> String {
    let stem = filename.strip_suffix(".pdf").unwrap_or(filename);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, stem.as_bytes())
        .simple()
        .to_string()
}

pub fn public_url(filename: &str) -> String {
    format!("{PUBLIC_PREFIX}/{filename}")
}

/// Keep ids usable as a path component.
fn safe_component(id: &str) -> String {
    let cleaned: String = id
        .trim()
        .chars()
        .take(MAX_ID_CHARS)
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

/// Write PDF bytes into `reports_dir` under `filename`.
///
/// Bytes go to a temp file in the same directory first and are renamed into
/// place, so the final path only ever holds a complete document.
pub fn write_report(pdf_bytes: &[u8], filename: &str, reports_dir: &Path) -> Result<PathBuf, ReportError> {
    let storage = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ReportError::Storage { path, source }
    };

    std::fs::create_dir_all(reports_dir).map_err(storage(reports_dir))?;

    let path = reports_dir.join(filename);
    let mut tmp = tempfile::Builder::new()
        .prefix(".partial-")
        .suffix(".pdf")
        .tempfile_in(reports_dir)
        .map_err(storage(reports_dir))?;

    tmp.write_all(pdf_bytes).map_err(storage(&path))?;
    tmp.as_file().sync_all().map_err(storage(&path))?;
    tmp.persist(&path).map_err(|e| ReportError::Storage {
        path: path.clone(),
        source: e.error,
    })?;

    Ok(path)
}
