use chrono::{Local, NaiveDateTime, Timelike};
use rusqlite::{params, Connection, Row};

use super::DatabaseError;
use crate::models::{IncidentReport, NewIncidentReport, NewResident, Resident};

/// Local time truncated to whole seconds.
fn now_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

// ═══════════════════════════════════════════
// Resident Repository
// ═══════════════════════════════════════════

pub fn insert_resident(conn: &Connection, resident: &NewResident) -> Result<Resident, DatabaseError> {
    let name = resident.name.trim();
    if name.is_empty() {
        return Err(DatabaseError::ConstraintViolation("resident name is required".into()));
    }
    let created_at = now_timestamp();
    conn.execute(
        "INSERT INTO residents (name, gender, birth_date, insurer, fall_risk, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            name,
            resident.gender,
            resident.birth_date,
            resident.insurer,
            resident.fall_risk,
            created_at,
        ],
    )?;

    Ok(Resident {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        gender: resident.gender.clone(),
        birth_date: resident.birth_date,
        insurer: resident.insurer.clone(),
        fall_risk: resident.fall_risk.clone(),
        created_at,
    })
}

pub fn get_resident(conn: &Connection, id: i64) -> Result<Option<Resident>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, gender, birth_date, insurer, fall_risk, created_at
         FROM residents WHERE id = ?1",
    )?;

    match stmt.query_row(params![id], resident_from_row) {
        Ok(resident) => Ok(Some(resident)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_residents(conn: &Connection) -> Result<Vec<Resident>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, gender, birth_date, insurer, fall_risk, created_at
         FROM residents ORDER BY name COLLATE NOCASE, id",
    )?;
    let rows = stmt.query_map([], resident_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

fn resident_from_row(row: &Row<'_>) -> rusqlite::Result<Resident> {
    Ok(Resident {
        id: row.get(0)?,
        name: row.get(1)?,
        gender: row.get(2)?,
        birth_date: row.get(3)?,
        insurer: row.get(4)?,
        fall_risk: row.get(5)?,
        created_at: row.get(6)?,
    })
}

// ═══════════════════════════════════════════
// Incident Report Repository (insert-only)
// ═══════════════════════════════════════════

/// Persist a narrative for a resident. Returns the new report id.
pub fn insert_incident_report(
    conn: &Connection,
    report: &NewIncidentReport,
) -> Result<i64, DatabaseError> {
    if report.narrative.trim().is_empty() {
        return Err(DatabaseError::ConstraintViolation("narrative is required".into()));
    }
    if get_resident(conn, report.resident_id)?.is_none() {
        return Err(DatabaseError::NotFound {
            entity_type: "Resident".into(),
            id: report.resident_id.to_string(),
        });
    }

    conn.execute(
        "INSERT INTO incident_reports (resident_id, narrative, nurse_id, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![report.resident_id, report.narrative, report.nurse_id, now_timestamp()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Reports for one resident, newest first.
pub fn list_incident_reports_for_resident(
    conn: &Connection,
    resident_id: i64,
) -> Result<Vec<IncidentReport>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, resident_id, narrative, nurse_id, created_at
         FROM incident_reports WHERE resident_id = ?1
         ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![resident_id], |row| {
        Ok(IncidentReport {
            id: row.get(0)?,
            resident_id: row.get(1)?,
            narrative: row.get(2)?,
            nurse_id: row.get(3)?,
            created_at: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
