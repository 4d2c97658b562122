use super::{
    AppointmentAction, Authorization, Contact, Direction, Document, HasOutline, MedicationAction,
    PatientRef, Priority, Referral, TaskAction, WorkflowState,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: String,
    pub sender: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<PatientRef>,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub workflow_state: WorkflowState,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub appointments: Vec<AppointmentAction>,
    #[serde(default)]
    pub tasks: Vec<TaskAction>,
    #[serde(default)]
    pub medications: Vec<MedicationAction>,
    #[serde(default)]
    pub referrals: Vec<Referral>,
    #[serde(default)]
    pub authorizations: Vec<Authorization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl HasOutline for Email {
    fn documents(&self) -> Vec<&Document> {
        self.documents.iter().collect()
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

    fn referrals(&self) -> &[Referral] {
        &self.referrals
    }

    fn authorizations(&self) -> &[Authorization] {
        &self.authorizations
    }
}
