//! Typed communication records.
//!
//! Every communication kind the outline layer understands is a concrete struct here, and the
//! collections the outline builders read are exposed through [`HasOutline`] instead of probing
//! fields by name.

mod actions;
mod call;
mod common;
mod communication;
mod document;
mod email;
mod encounter;
mod fax;
mod sms;

pub use actions::{
    AppointmentAction, AppointmentStatus, Authorization, AuthorizationStatus, MedicationAction,
    MedicationStatus, Referral, ReferralStatus, TaskAction, TaskStatus,
};
pub use call::{AiMetadata, Call, CallCategory, CallStatus, Caller, CallerRelationship};
pub use common::{Contact, Direction, PatientRef, Priority, WorkflowState};
pub use communication::{Communication, CommunicationKind};
pub use document::{Document, DocumentStatus};
pub use email::Email;
pub use encounter::ScribeEncounter;
pub use fax::Fax;
pub use sms::{SmsConversation, SmsMessage};

/// Collections of a communication record that feed its outline.
///
/// Only `documents`, `appointments` and `tasks` are universal. Kinds that never carry a
/// collection keep the empty default.
pub trait HasOutline {
    /// Attached documents in display order.
    fn documents(&self) -> Vec<&Document>;

    fn appointments(&self) -> &[AppointmentAction];

    fn tasks(&self) -> &[TaskAction];

    fn medications(&self) -> &[MedicationAction] {
        &[]
    }

    fn referrals(&self) -> &[Referral] {
        &[]
    }

    fn authorizations(&self) -> &[Authorization] {
        &[]
    }
}

/// Outline-facing lifecycle tag of a record.
///
/// The tag is the record's wire status (for example `"sent-to-pharmacy"`), which the outline
/// layer maps onto its three-valued badge.
pub trait Lifecycle {
    fn status_tag(&self) -> &str;
}
