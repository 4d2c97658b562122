use super::{
    AppointmentAction, Direction, Document, HasOutline, PatientRef, Priority, TaskAction,
    WorkflowState,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsConversation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<PatientRef>,
    #[serde(default)]
    pub messages: Vec<SmsMessage>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub workflow_state: WorkflowState,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub appointments: Vec<AppointmentAction>,
    #[serde(default)]
    pub tasks: Vec<TaskAction>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsMessage {
    pub id: String,
    pub direction: Direction,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// MMS attachments.
    #[serde(default)]
    pub media: Vec<Document>,
}

impl HasOutline for SmsConversation {
    /// Media from every message, in message order.
    fn documents(&self) -> Vec<&Document> {
        self.messages.iter().flat_map(|m| m.media.iter()).collect()
    }

    fn appointments(&self) -> &[AppointmentAction] {
        &self.appointments
    }

    fn tasks(&self) -> &[TaskAction] {
        &self.tasks
    }
}
