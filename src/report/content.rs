//! Text for every field on the report form, with placeholders for
//! anything the caller did not supply.

use chrono::{DateTime, TimeZone};

use crate::config::Facility;
use crate::humanize::{format_number, format_one_decimal, humanize_list};
use crate::models::enums::{FirstAidAction, Injury, MobilityAid};
use crate::models::RecordedVitals;

use super::ReportRequest;

pub const REPORT_TITLE: &str = "Fall Incident Report";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NONE_NOTED: &str = "None noted";
pub const NO_INJURIES_FOUND: &str = "No visible injuries found.";
pub const BASIC_FIRST_AID: &str = "Basic first aid by nursing staff.";
pub const VITALS_NOT_RECORDED: &str = "Vital signs not recorded";
const NOT_AVAILABLE: &str = "N/A";

/// Already-formatted strings for every slot on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContent {
    pub title: String,
    pub incident_time: String,
    pub facility: String,
    pub place: String,
    pub report_date: String,
    pub staff_notified: String,
    pub resident: String,
    pub narrative: String,
    pub injuries: String,
    pub treatment: String,
    pub vitals: String,
    pub aids: String,
    pub witnesses: String,
    pub signature_date: String,
    pub generated_on: String,
}

impl ReportContent {
    /// `resident_id` and `narrative` are the request's validated values.
    pub fn build<Tz>(
        request: &ReportRequest,
        resident_id: &str,
        narrative: &str,
        facility: &Facility,
        now: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let name = request.resident.as_ref().map(|r| r.name.as_str()).unwrap_or("");
        let date = now.format("%Y-%m-%d").to_string();

        Self {
            title: REPORT_TITLE.to_string(),
            incident_time: now.format("%Y-%m-%d %H:%M").to_string(),
            facility: facility.display(),
            place: request
                .place_of_fall
                .as_ref()
                .map(|p| p.label())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            report_date: date.clone(),
            staff_notified: NOT_SPECIFIED.to_string(),
            resident: resident_display(resident_id, name),
            narrative: narrative.to_string(),
            injuries: injuries_summary(&request.injuries),
            treatment: treatment_summary(&request.first_aid),
            vitals: vitals_summary(request.vitals.as_ref()),
            aids: aids_summary(&request.aids_present),
            witnesses: NONE_NOTED.to_string(),
            signature_date: date,
            generated_on: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// `"<name> (ID: <id>)"`, or `"ID: <id>"` when no name is known.
pub fn resident_display(id: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        format!("ID: {id}")
    } else {
        format!("{name} (ID: {id})")
    }
}

pub fn injuries_summary(injuries: &[Injury]) -> String {
    if injuries.is_empty() {
        return NO_INJURIES_FOUND.to_string();
    }
    format!("Injuries: {}", humanize_list(injuries.iter().map(|i| i.as_str())))
}

pub fn treatment_summary(first_aid: &[FirstAidAction]) -> String {
    if first_aid.is_empty() {
        return BASIC_FIRST_AID.to_string();
    }
    format!("Treatment: {}", humanize_list(first_aid.iter().map(|a| a.as_str())))
}

pub fn aids_summary(aids: &[MobilityAid]) -> String {
    if aids.is_empty() {
        return NONE_NOTED.to_string();
    }
    humanize_list(aids.iter().map(|a| a.as_str()))
}

/// `BP: s/d mmHg, BS: g mg/dL, Temp: t °C, O2: o%`, with `N/A` per missing value.
pub fn vitals_summary(vitals: Option<&RecordedVitals>) -> String {
    let Some(v) = vitals else {
        return VITALS_NOT_RECORDED.to_string();
    };
    let num = |value: Option<f64>| value.map(format_number).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let temp = v
        .temperature
        .map(format_one_decimal)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    format!(
        "BP: {}/{} mmHg, BS: {} mg/dL, Temp: {} °C, O2: {}%",
        num(v.systolic()),
        num(v.diastolic()),
        num(v.glucose_level),
        temp,
        num(v.oxygen_level),
    )
}
