//! Incident narrative synthesis.
//!
//! Turns the wizard's structured answers into one paragraph. The paragraph
//! is an ordered pipeline of sentence producers; each producer looks at the
//! shared [`IncidentDetails`] and either contributes a sentence or stays
//! silent. Output is a pure function of the input.

use crate::humanize::{format_number, format_one_decimal, humanize, humanize_list};
use crate::models::IncidentDetails;

/// Fixed sentence used when no injuries were selected.
pub const NO_INJURIES_SENTENCE: &str = "No visible injuries were found on the head or body.";

/// One step of the narrative: `None` means "nothing to say".
type SentenceProducer = fn(&IncidentDetails) -> Option<String>;

/// Order matters: this is the order sentences appear in the narrative.
const PIPELINE: &[SentenceProducer] = &[
    found_sentence,
    vitals_sentence,
    aids_sentence,
    first_aid_sentence,
    injuries_sentence,
];

/// Build the narrative for one incident. Sentences are joined by single spaces.
pub fn build_narrative(details: &IncidentDetails) -> String {
    PIPELINE
        .iter()
        .filter_map(|produce| produce(details))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Length shown in the client's counter (`n/5000`).
pub fn display_length(narrative: &str) -> usize {
    narrative.chars().count()
}

fn found_sentence(d: &IncidentDetails) -> Option<String> {
    Some(format!(
        "The patient was found {} in the {}.",
        humanize(d.condition.as_str()).to_lowercase(),
        d.place_of_fall.label().to_lowercase()
    ))
}

fn vitals_sentence(d: &IncidentDetails) -> Option<String> {
    let v = &d.vitals;
    Some(format!(
        "A quick body check was administered, blood pressure was measured at {}/{} mmHg, \
         blood sugar level at {} mg/dL, temperature at {} °C and oxygen saturation at {} %.",
        format_number(v.blood_pressure.systolic),
        format_number(v.blood_pressure.diastolic),
        format_number(v.glucose_level),
        format_one_decimal(v.temperature),
        format_number(v.oxygen_level),
    ))
}

fn aids_sentence(d: &IncidentDetails) -> Option<String> {
    if d.aids_present.is_empty() {
        return None;
    }
    Some(format!(
        "At the time of the incident, the resident was using {} on the side.",
        humanize_list(d.aids_present.iter().map(|a| a.as_str()))
    ))
}

fn first_aid_sentence(d: &IncidentDetails) -> Option<String> {
    if d.first_aid.is_empty() {
        return None;
    }
    Some(format!(
        "First aid measures were performed: {}.",
        humanize_list(d.first_aid.iter().map(|a| a.as_str()))
    ))
}

fn injuries_sentence(d: &IncidentDetails) -> Option<String> {
    if d.injuries.is_empty() {
        return Some(NO_INJURIES_SENTENCE.to_string());
    }
    Some(format!(
        "Injuries noted: {}. Emergency responders were informed by telephone.",
        humanize_list(d.injuries.iter().map(|i| i.as_str()))
    ))
}
