use super::{Document, PatientRef};
use serde::{Deserialize, Serialize};

/// Files and patient context of an ambient-scribe encounter.
///
/// Which of these appear in the outline depends on the encounter lifecycle, not on this record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScribeEncounter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<PatientRef>,
    /// Files captured during the session (audio, uploads).
    #[serde(default)]
    pub session_files: Vec<Document>,
    /// Notes drafted from this session.
    #[serde(default)]
    pub session_notes: Vec<Document>,
    #[serde(default)]
    pub previous_notes: Vec<Document>,
    #[serde(default)]
    pub patient_files: Vec<Document>,
}

impl ScribeEncounter {
    pub fn has_patient(&self) -> bool {
        self.patient.is_some()
    }

    /// The same encounter with no patient attached.
    pub fn without_patient(&self) -> Self {
        Self {
            patient: None,
            ..self.clone()
        }
    }
}
