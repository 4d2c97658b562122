//! Backend call payloads and their translation into [`Call`] records.
//!
//! The backend reports calls in a snake_case shape with loosely typed `extracted_data` and
//! `call_metadata` objects. Fields the backend does not provide yet (categories, priority,
//! caller relationship) are inferred from those objects.

use crate::entities::{
    AiMetadata, Call, CallCategory, CallStatus, Caller, CallerRelationship, Direction, PatientRef,
    Priority, WorkflowState,
};
use crate::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Wire types
// ============================================================================

/// One call as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiCallResponse {
    pub id: String,
    #[serde(default)]
    pub caller_name: Option<String>,
    #[serde(default)]
    pub caller_phone: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub recording_url: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub workflow_state: Option<String>,
    #[serde(default)]
    pub transcript: Option<Vec<TranscriptMessage>>,
    #[serde(default)]
    pub extracted_data: Option<Value>,
    #[serde(default)]
    pub call_metadata: Option<Value>,
}

/// One utterance of a structured transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// Speaker, e.g. `agent` or `user`.
    pub role: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiCallList {
    pub calls: Vec<ApiCallResponse>,
}

/// Fields of a call the user changed and that must be written back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallPatch {
    pub notes: Option<String>,
    pub workflow_state: Option<WorkflowState>,
    pub patient_id: Option<String>,
}

impl CallPatch {
    /// Backend update body containing only the fields that are set.
    pub fn to_update(&self) -> Value {
        let mut update = Map::new();

        if let Some(notes) = &self.notes {
            let mut extracted = Map::new();
            extracted.insert("notes".into(), Value::String(notes.clone()));
            update.insert("extracted_data".into(), Value::Object(extracted));
        }
        if let Some(state) = self.workflow_state {
            update.insert("workflow_state".into(), Value::String(state.as_str().into()));
        }
        if let Some(patient_id) = &self.patient_id {
            update.insert("patient_id".into(), Value::String(patient_id.clone()));
        }

        Value::Object(update)
    }
}

// ============================================================================
// Public operations
// ============================================================================

/// Backend call translation.
///
/// Zero-sized namespace for the call translation operations.
pub struct CallTransformer;

impl CallTransformer {
    /// Parse a single backend call payload.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CallPayload`] if `json` is not a valid call response.
    pub fn from_json(json: &str) -> CoreResult<Call> {
        let wire: ApiCallResponse = serde_json::from_str(json).map_err(CoreError::CallPayload)?;
        Ok(wire_to_domain(&wire))
    }

    /// Parse a backend call list payload (`{"calls": [...]}`).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CallPayload`] if `json` is not a valid call list.
    pub fn list_from_json(json: &str) -> CoreResult<Vec<Call>> {
        let wire: ApiCallList = serde_json::from_str(json).map_err(CoreError::CallPayload)?;
        Ok(Self::list_to_domain(&wire))
    }

    pub fn to_domain(wire: &ApiCallResponse) -> Call {
        wire_to_domain(wire)
    }

    pub fn list_to_domain(list: &ApiCallList) -> Vec<Call> {
        list.calls.iter().map(wire_to_domain).collect()
    }
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn field<'a>(object: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    object.and_then(|o| o.get(key)).filter(|v| !v.is_null())
}

fn str_field<'a>(object: Option<&'a Value>, key: &str) -> Option<&'a str> {
    field(object, key).and_then(Value::as_str)
}

/// Whether a loosely typed hint counts as present.
///
/// `null`, `false`, `0`, empty strings and the absence of the key all count as absent.
fn is_set(object: Option<&Value>, key: &str) -> bool {
    match field(object, key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn map_call_status(status: &str) -> CallStatus {
    match status {
        "missed" => CallStatus::Missed,
        "voicemail" => CallStatus::Voicemail,
        "abandoned" => CallStatus::Abandoned,
        "transferred" => CallStatus::Transferred,
        _ => CallStatus::Answered,
    }
}

fn map_workflow_state(state: Option<&str>) -> WorkflowState {
    state.and_then(|s| s.parse().ok()).unwrap_or_default()
}

fn infer_relationship(wire: &ApiCallResponse) -> CallerRelationship {
    if let Some(hint) = str_field(wire.call_metadata.as_ref(), "relationship") {
        return CallerRelationship::from_hint(hint);
    }
    if wire.patient_id.is_some() {
        return CallerRelationship::Patient;
    }
    CallerRelationship::Other
}

fn infer_categories(extracted: Option<&Value>) -> Vec<CallCategory> {
    const RULES: [(&[&str], CallCategory); 9] = [
        (&["appointment", "scheduling"], CallCategory::Appointment),
        (&["medication", "prescription", "refill"], CallCategory::Prescription),
        (&["billing", "payment"], CallCategory::Billing),
        (&["insurance"], CallCategory::Insurance),
        (&["lab_results", "labs"], CallCategory::LabResults),
        (&["referral"], CallCategory::Referral),
        (&["clinical", "symptoms"], CallCategory::ClinicalQuestion),
        (&["follow_up"], CallCategory::FollowUp),
        (&["emergency", "urgent"], CallCategory::Emergency),
    ];

    let categories: Vec<CallCategory> = RULES
        .iter()
        .filter(|(keys, _)| keys.iter().any(|key| is_set(extracted, key)))
        .map(|(_, category)| *category)
        .collect();

    if categories.is_empty() {
        vec![CallCategory::General]
    } else {
        categories
    }
}

fn infer_priority(wire: &ApiCallResponse) -> Priority {
    if let Some(priority) = str_field(wire.call_metadata.as_ref(), "priority")
        .and_then(|p| p.parse::<Priority>().ok())
    {
        return priority;
    }

    let extracted = wire.extracted_data.as_ref();
    if is_set(extracted, "emergency") || is_set(extracted, "urgent") {
        return Priority::Stat;
    }
    if str_field(extracted, "priority") == Some("high") {
        return Priority::Urgent;
    }
    Priority::Routine
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn build_transcription(transcript: Option<&[TranscriptMessage]>) -> Option<String> {
    let transcript = transcript.filter(|t| !t.is_empty())?;
    let paragraphs: Vec<String> = transcript
        .iter()
        .map(|msg| format!("{}: {}", capitalize(&msg.role), msg.content))
        .collect();
    Some(paragraphs.join("\n\n"))
}

fn patient_ref(patient_id: &str, metadata: Option<&Value>) -> PatientRef {
    let mrn = str_field(metadata, "patient_mrn")
        .map(str::to_string)
        .unwrap_or_else(|| format!("MRN-{}", patient_id.chars().take(8).collect::<String>()));

    PatientRef {
        id: patient_id.to_string(),
        name: str_field(metadata, "patient_name")
            .unwrap_or("Unknown Patient")
            .to_string(),
        mrn,
        phone: str_field(metadata, "patient_phone").map(str::to_string),
        email: str_field(metadata, "patient_email").map(str::to_string),
    }
}

fn ai_metadata(extracted: Option<&Value>, updated_at: DateTime<Utc>) -> Option<AiMetadata> {
    let ai = field(extracted, "ai_metadata")?;
    let ai = Some(ai);

    let processed_at = str_field(ai, "processed_at")
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or(updated_at);

    Some(AiMetadata {
        confidence: field(ai, "confidence").and_then(Value::as_f64).unwrap_or(0.0),
        model: str_field(ai, "model").unwrap_or("unknown").to_string(),
        processed_at,
        requires_review: field(ai, "requires_review")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

fn wire_to_domain(wire: &ApiCallResponse) -> Call {
    let metadata = wire.call_metadata.as_ref();
    let extracted = wire.extracted_data.as_ref();

    let caller = Caller {
        name: wire
            .caller_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        phone: wire.caller_phone.clone(),
        relationship: infer_relationship(wire),
        organization: str_field(metadata, "caller_organization").map(str::to_string),
    };

    let direction = match wire.direction.as_deref() {
        Some("outbound") => Direction::Outbound,
        _ => Direction::Inbound,
    };

    Call {
        id: wire.id.clone(),
        caller,
        patient: wire
            .patient_id
            .as_deref()
            .map(|patient_id| patient_ref(patient_id, metadata)),
        direction,
        timestamp: wire.created_at,
        duration: wire.duration.unwrap_or(0),
        recording_url: wire.recording_url.clone().filter(|url| !url.is_empty()),
        categories: infer_categories(extracted),
        priority: infer_priority(wire),
        status: map_call_status(&wire.status),
        workflow_state: map_workflow_state(wire.workflow_state.as_deref()),
        transcription: build_transcription(wire.transcript.as_deref()),
        summary: str_field(extracted, "summary").map(str::to_string),
        notes: str_field(extracted, "notes").map(str::to_string),
        appointments: Vec::new(),
        medications: Vec::new(),
        tasks: Vec::new(),
        ai: ai_metadata(extracted, wire.updated_at),
        review: field(metadata, "review").cloned(),
        created_at: wire.created_at,
        updated_at: wire.updated_at,
    }
}
