//! Profile - Report Profile and Blind/Hide Setting Data

use serde::{Deserialize, Serialize};

/// A report profile attached to a protocol
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique profile id
    pub profile_id: String,
    /// Display name
    pub profile_name: String,
    /// Owning protocol
    #[serde(default)]
    pub protocol_id: String,
    /// Whether this is the protocol's default profile
    #[serde(default)]
    pub is_default: bool,
}

/// Blind/Hide classification of a profile setting.
///
/// The backend stores single-letter codes ("B"/"H"); the UI always shows
/// the full words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BlindOrHide {
    #[default]
    #[serde(rename = "B")]
    Blind,
    #[serde(rename = "H")]
    Hide,
}

impl BlindOrHide {
    /// Display label ("Blind" / "Hide")
    pub fn label(&self) -> &'static str {
        match self {
            BlindOrHide::Blind => "Blind",
            BlindOrHide::Hide => "Hide",
        }
    }

    /// Wire code sent to the backend ("B" / "H")
    pub fn code(&self) -> &'static str {
        match self {
            BlindOrHide::Blind => "B",
            BlindOrHide::Hide => "H",
        }
    }

    /// Parse either the display label or the wire code
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Blind" | "B" => Some(BlindOrHide::Blind),
            "Hide" | "H" => Some(BlindOrHide::Hide),
            _ => None,
        }
    }
}

/// A versioned test reference inside a profile setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRef {
    pub study_test_id: String,
    #[serde(default)]
    pub test_name: String,
    pub version_number: u32,
}

/// A versioned cohort reference (filter options, cohort-test mapping)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortRef {
    pub cohort_id: String,
    #[serde(default)]
    pub cohort_name: String,
    pub version_number: u32,
}

/// A versioned visit reference inside a profile setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRef {
    pub visit_id: String,
    #[serde(default)]
    pub visit_name: String,
    pub version_number: u32,
}

/// One blind/hide configuration row of a report profile
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSetting {
    /// Unique setting id (row key in the detail table)
    pub profile_setting_id: String,
    #[serde(default)]
    pub tests: Vec<TestRef>,
    #[serde(default)]
    pub cohort_id: String,
    #[serde(default)]
    pub cohort_name: String,
    #[serde(default)]
    pub visits: Vec<VisitRef>,
    #[serde(default)]
    pub blind_or_hide: BlindOrHide,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blind_or_hide_codes() {
        assert_eq!(BlindOrHide::Blind.code(), "B");
        assert_eq!(BlindOrHide::Hide.label(), "Hide");
        assert_eq!(BlindOrHide::parse("B"), Some(BlindOrHide::Blind));
        assert_eq!(BlindOrHide::parse("Hide"), Some(BlindOrHide::Hide));
        assert_eq!(BlindOrHide::parse("X"), None);
    }

    #[test]
    fn test_profile_setting_deserializes_wire_shape() {
        let raw = r#"{
            "profileSettingId": "ps-1",
            "tests": [{"studyTestId": "T1", "testName": "ALT", "versionNumber": 2}],
            "cohortId": "C1",
            "cohortName": "Cohort A",
            "visits": [{"visitId": "V1", "visitName": "Baseline", "versionNumber": 1}],
            "blindOrHide": "H"
        }"#;
        let setting: ProfileSetting = serde_json::from_str(raw).expect("decode");
        assert_eq!(setting.tests[0].study_test_id, "T1");
        assert_eq!(setting.blind_or_hide, BlindOrHide::Hide);
    }
}
