use crate::db::DatabaseError;
use crate::humanize::humanize;

/// Macro to generate a closed catalog enum with as_str + label + std::str::FromStr.
///
/// Parsing is lenient about spelling: case, spaces, hyphens and underscores
/// are ignored, so the wizard's `"Floor Hallway"` and `"floor_hallway"`
/// both resolve to the same variant. Serialization always uses the
/// canonical snake_case id.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            /// Humanized display label (`head_injury` → `Head Injury`).
            pub fn label(&self) -> String {
                humanize(self.as_str())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = fold_id(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| fold_id(v.as_str()) == wanted)
                    .ok_or_else(|| DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Lowercase and drop separators so spelling variants compare equal.
fn fold_id(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | ' ' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

str_enum!(FallLocation {
    Bathroom => "bathroom",
    Bed => "bed",
    FloorHallway => "floor_hallway",
    DiningRoom => "dining_room",
    Kitchen => "kitchen",
    LivingRoom => "living_room",
    Stairs => "stairs",
    Sofa => "sofa",
});

str_enum!(Condition {
    Conscious => "conscious",
    Unconscious => "unconscious",
    Oriented => "oriented",
    Disoriented => "disoriented",
    Talkative => "talkative",
    NonTalkative => "non_talkative",
});

str_enum!(MobilityAid {
    HearingAid => "hearing_aid",
    Shoes => "shoes",
    Spectacles => "spectacles",
    WalkingStick => "walking_stick",
    Walker => "walker",
    WheelChair => "wheel_chair",
});

str_enum!(Injury {
    AnkleSprain => "ankle_sprain",
    HeadInjury => "head_injury",
    Burns => "burns",
    CutsScrapes => "cuts_scrapes",
    Fracture => "fracture",
    HipDislocation => "hip_dislocation",
    KneeInjury => "knee_injury",
    NeckPain => "neck_pain",
});

str_enum!(FirstAidAction {
    BodyCheck => "body_check",
    Cpr => "cpr",
    DoctorInformed => "doctor_informed",
    MedicationGiven => "medication_given",
    EmergencyServices => "emergency_services",
    FluidsOffered => "fluids_offered",
    StablePosition => "stable_position",
    WoundDressing => "wound_dressing",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trip_canonical_ids() {
        for injury in Injury::ALL {
            assert_eq!(Injury::from_str(injury.as_str()).unwrap(), *injury);
        }
        for action in FirstAidAction::ALL {
            assert_eq!(FirstAidAction::from_str(action.as_str()).unwrap(), *action);
        }
    }

    #[test]
    fn wizard_place_labels_parse() {
        assert_eq!(FallLocation::from_str("Floor Hallway").unwrap(), FallLocation::FloorHallway);
        assert_eq!(FallLocation::from_str("Bathroom").unwrap(), FallLocation::Bathroom);
        assert_eq!(FallLocation::from_str("living_room").unwrap(), FallLocation::LivingRoom);
    }

    #[test]
    fn wheel_chair_spellings_accepted() {
        assert_eq!(MobilityAid::from_str("wheel_chair").unwrap(), MobilityAid::WheelChair);
        assert_eq!(MobilityAid::from_str("Wheelchair").unwrap(), MobilityAid::WheelChair);
        assert_eq!(MobilityAid::WheelChair.label(), "Wheel Chair");
    }

    #[test]
    fn unknown_id_is_invalid_enum() {
        let err = Injury::from_str("broken_heart").unwrap_err();
        match err {
            DatabaseError::InvalidEnum { field, value } => {
                assert_eq!(field, "Injury");
                assert_eq!(value, "broken_heart");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn labels_are_humanized() {
        assert_eq!(Condition::NonTalkative.label(), "Non Talkative");
        assert_eq!(FirstAidAction::Cpr.label(), "Cpr");
        assert_eq!(Injury::CutsScrapes.label(), "Cuts Scrapes");
        assert_eq!(FallLocation::DiningRoom.label(), "Dining Room");
    }

    #[test]
    fn serde_uses_canonical_id() {
        let json = serde_json::to_string(&FirstAidAction::EmergencyServices).unwrap();
        assert_eq!(json, "\"emergency_services\"");
        let back: FirstAidAction = serde_json::from_str("\"Emergency Services\"").unwrap();
        assert_eq!(back, FirstAidAction::EmergencyServices);
    }

    #[test]
    fn serde_rejects_unknown() {
        let result: Result<Condition, _> = serde_json::from_str("\"asleep\"");
        assert!(result.is_err());
    }

    #[test]
    fn catalog_sizes() {
        assert_eq!(FallLocation::ALL.len(), 8);
        assert_eq!(Condition::ALL.len(), 6);
        assert_eq!(MobilityAid::ALL.len(), 6);
        assert_eq!(Injury::ALL.len(), 8);
        assert_eq!(FirstAidAction::ALL.len(), 8);
    }
}
