use super::{
    AppointmentAction, Direction, Document, HasOutline, MedicationAction, PatientRef, Priority,
    TaskAction, WorkflowState,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A phone call handled by the practice or its voice agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub id: String,
    pub caller: Caller,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<PatientRef>,
    #[serde(default)]
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<CallCategory>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: CallStatus,
    #[serde(default)]
    pub workflow_state: WorkflowState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub appointments: Vec<AppointmentAction>,
    #[serde(default)]
    pub medications: Vec<MedicationAction>,
    #[serde(default)]
    pub tasks: Vec<TaskAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caller {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub relationship: CallerRelationship,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerRelationship {
    /// The caller is the patient.
    #[serde(rename = "self")]
    Patient,
    Spouse,
    Parent,
    Child,
    Caregiver,
    Pharmacy,
    Provider,
    Insurance,
    #[serde(other)]
    Other,
}

impl CallerRelationship {
    /// Parse a relationship hint, mapping unrecognised values to `Other`.
    pub fn from_hint(hint: &str) -> Self {
        match hint {
            "self" => Self::Patient,
            "spouse" => Self::Spouse,
            "parent" => Self::Parent,
            "child" => Self::Child,
            "caregiver" => Self::Caregiver,
            "pharmacy" => Self::Pharmacy,
            "provider" => Self::Provider,
            "insurance" => Self::Insurance,
            _ => Self::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallCategory {
    Appointment,
    Prescription,
    Billing,
    Insurance,
    LabResults,
    Referral,
    ClinicalQuestion,
    FollowUp,
    Emergency,
    #[serde(other)]
    General,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    #[default]
    Answered,
    Missed,
    Voicemail,
    Abandoned,
    Transferred,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMetadata {
    pub confidence: f64,
    pub model: String,
    pub processed_at: DateTime<Utc>,
    pub requires_review: bool,
}

impl HasOutline for Call {
    /// Calls carry no attachments; the recording and transcript are content nodes.
    fn documents(&self) -> Vec<&Document> {
        Vec::new()
    }

    fn appointments(&self) -> &[AppointmentAction] {
        &self.appointments
    }

    fn tasks(&self) -> &[TaskAction] {
        &self.tasks
    }

    fn medications(&self) -> &[MedicationAction] {
        &self.medications
    }
}
