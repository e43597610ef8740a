use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::enums::{Condition, FallLocation, FirstAidAction, Injury, MobilityAid};

/// Identifies whose incident this is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Selected place of fall. The label is what the wizard tile showed;
/// when the client omits it the catalog label is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOfFall {
    pub id: FallLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PlaceOfFall {
    pub fn new(id: FallLocation) -> Self {
        Self { id, label: None }
    }

    pub fn label(&self) -> String {
        match &self.label {
            Some(l) if !l.trim().is_empty() => l.clone(),
            _ => self.id.label(),
        }
    }
}

impl From<FallLocation> for PlaceOfFall {
    fn from(id: FallLocation) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
}

/// Complete vitals as captured by the wizard's sliders.
///
/// Slider ranges (systolic 90–180, diastolic 60–120, temperature 35–42,
/// oxygen 80–100, glucose 70–180) are enforced upstream only; values
/// outside them are carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    pub blood_pressure: BloodPressure,
    /// °C
    pub temperature: f64,
    /// %
    pub oxygen_level: f64,
    /// mg/dL
    pub glucose_level: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedBloodPressure {
    #[serde(default)]
    pub systolic: Option<f64>,
    #[serde(default)]
    pub diastolic: Option<f64>,
}

/// Vitals as handed to the report engine, where any sub-value may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedVitals {
    #[serde(default)]
    pub blood_pressure: Option<RecordedBloodPressure>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub oxygen_level: Option<f64>,
    #[serde(default)]
    pub glucose_level: Option<f64>,
}

impl RecordedVitals {
    pub fn systolic(&self) -> Option<f64> {
        self.blood_pressure.and_then(|bp| bp.systolic)
    }

    pub fn diastolic(&self) -> Option<f64> {
        self.blood_pressure.and_then(|bp| bp.diastolic)
    }
}

impl From<Vitals> for RecordedVitals {
    fn from(v: Vitals) -> Self {
        Self {
            blood_pressure: Some(RecordedBloodPressure {
                systolic: Some(v.blood_pressure.systolic),
                diastolic: Some(v.blood_pressure.diastolic),
            }),
            temperature: Some(v.temperature),
            oxygen_level: Some(v.oxygen_level),
            glucose_level: Some(v.glucose_level),
        }
    }
}

/// The wizard's accumulated answers: the narrative builder's full input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDetails {
    pub condition: Condition,
    pub place_of_fall: PlaceOfFall,
    pub vitals: Vitals,
    #[serde(default)]
    pub aids_present: Vec<MobilityAid>,
    #[serde(default)]
    pub injuries: Vec<Injury>,
    #[serde(default)]
    pub first_aid: Vec<FirstAidAction>,
}

/// A persisted incident report. Insert-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReport {
    pub id: i64,
    pub resident_id: i64,
    pub narrative: String,
    pub nurse_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncidentReport {
    pub resident_id: i64,
    pub narrative: String,
    pub nurse_id: Option<i64>,
}

/// Accepts `"42"` and `42` alike; the mobile client sends numeric ids.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Optional variant of [`string_or_number`]; `null` and absence map to `None`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_deserialize_from_wizard_json() {
        let json = r#"{
            "condition": "conscious",
            "placeOfFall": { "id": "Bathroom", "label": "Bathroom" },
            "vitals": {
                "bloodPressure": { "systolic": 120, "diastolic": 80 },
                "temperature": 37.0,
                "oxygenLevel": 95,
                "glucoseLevel": 100
            },
            "aidsPresent": ["walker", "shoes"]
        }"#;
        let details: IncidentDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.condition, Condition::Conscious);
        assert_eq!(details.place_of_fall.id, FallLocation::Bathroom);
        assert_eq!(details.aids_present, vec![MobilityAid::Walker, MobilityAid::Shoes]);
        assert!(details.injuries.is_empty());
        assert!(details.first_aid.is_empty());
        assert_eq!(details.vitals.blood_pressure.systolic, 120.0);
    }

    #[test]
    fn place_label_falls_back_to_catalog() {
        let place = PlaceOfFall::new(FallLocation::LivingRoom);
        assert_eq!(place.label(), "Living Room");
        let custom = PlaceOfFall {
            id: FallLocation::FloorHallway,
            label: Some("Hallway, 2nd floor".into()),
        };
        assert_eq!(custom.label(), "Hallway, 2nd floor");
    }

    #[test]
    fn resident_ref_accepts_numeric_id() {
        let r: ResidentRef = serde_json::from_str(r#"{"id": 7, "name": "Sarah Müller"}"#).unwrap();
        assert_eq!(r.id, "7");
        assert_eq!(r.name, "Sarah Müller");
    }

    #[test]
    fn recorded_vitals_tolerate_missing_fields() {
        let v: RecordedVitals =
            serde_json::from_str(r#"{"bloodPressure": {"systolic": 130}, "temperature": 36.8}"#)
                .unwrap();
        assert_eq!(v.systolic(), Some(130.0));
        assert_eq!(v.diastolic(), None);
        assert_eq!(v.oxygen_level, None);
    }

    #[test]
    fn complete_vitals_convert_to_recorded() {
        let v = Vitals {
            blood_pressure: BloodPressure { systolic: 120.0, diastolic: 80.0 },
            temperature: 37.0,
            oxygen_level: 95.0,
            glucose_level: 100.0,
        };
        let r = RecordedVitals::from(v);
        assert_eq!(r.systolic(), Some(120.0));
        assert_eq!(r.glucose_level, Some(100.0));
    }
}
