//! Section builders shared by the per-entity outlines.
//!
//! Every function here returns `None` instead of an empty section.

use super::{Icon, OutlineData, OutlineItem, OutlineItemType, OutlineStatus};
use crate::entities::{
    AppointmentAction, Authorization, Document, HasOutline, Lifecycle, MedicationAction, Referral,
    TaskAction,
};
use careflow_types::NonEmptyText;

/// Display form of a categorical value: `"new-patient"` becomes `"new patient"`.
pub fn category_label(raw: &str) -> String {
    raw.replace('-', " ")
}

pub(crate) fn text(literal: &'static str) -> NonEmptyText {
    NonEmptyText::new_or(literal, literal)
}

fn leaf_id(prefix: &str, source_id: &str) -> String {
    format!("{prefix}-{source_id}")
}

fn status_of(record: &impl Lifecycle) -> OutlineStatus {
    OutlineStatus::from_tag(record.status_tag())
}

fn non_empty_section(
    id: &str,
    label: &'static str,
    icon: Icon,
    children: Vec<OutlineItem>,
) -> Option<OutlineItem> {
    (!children.is_empty()).then(|| OutlineItem::section(id, text(label), icon, children))
}

fn non_empty_rollup(
    id: &str,
    label: &'static str,
    icon: Icon,
    children: Vec<OutlineItem>,
) -> Option<OutlineItem> {
    (!children.is_empty()).then(|| OutlineItem::rollup(id, text(label), icon, children))
}

/// Document leaves under `section_id`, one per attachment.
///
/// `label_for` receives the zero-based position so fax pages can be numbered.
pub(crate) fn documents_section(
    section_id: &str,
    section_label: &'static str,
    leaf_prefix: &str,
    documents: &[&Document],
    label_for: impl Fn(usize, &Document) -> NonEmptyText,
) -> Option<OutlineItem> {
    let children = documents
        .iter()
        .enumerate()
        .map(|(index, doc)| document_leaf(leaf_prefix, doc, label_for(index, doc)))
        .collect();
    non_empty_section(section_id, section_label, Icon::FileText, children)
}

pub(crate) fn document_leaf(prefix: &str, doc: &Document, label: NonEmptyText) -> OutlineItem {
    OutlineItem::leaf(
        leaf_id(prefix, &doc.id),
        OutlineItemType::Document,
        label,
        Icon::FileText,
        status_of(doc),
        OutlineData::Document(doc.clone()),
    )
}

/// Label a document by its file name.
pub(crate) fn document_name(_: usize, doc: &Document) -> NonEmptyText {
    NonEmptyText::new_or(&doc.name, "Untitled document")
}

fn appointments_section(appointments: &[AppointmentAction]) -> Option<OutlineItem> {
    let children = appointments
        .iter()
        .map(|apt| {
            OutlineItem::leaf(
                leaf_id("appointment", &apt.id),
                OutlineItemType::Appointment,
                NonEmptyText::new_or(category_label(&apt.kind), "Appointment"),
                Icon::Calendar,
                status_of(apt),
                OutlineData::Appointment(apt.clone()),
            )
        })
        .collect();
    non_empty_section("appointments", "Appointments", Icon::Calendar, children)
}

fn tasks_section(tasks: &[TaskAction]) -> Option<OutlineItem> {
    let children = tasks
        .iter()
        .map(|task| {
            OutlineItem::leaf(
                leaf_id("task", &task.id),
                OutlineItemType::Task,
                NonEmptyText::new_or(&task.title, "Untitled task"),
                Icon::ListTodo,
                status_of(task),
                OutlineData::Task(task.clone()),
            )
        })
        .collect();
    non_empty_section("tasks", "Tasks", Icon::ListTodo, children)
}

fn medications_section(section_id: &str, medications: &[MedicationAction]) -> Option<OutlineItem> {
    let children = medications
        .iter()
        .map(|med| {
            OutlineItem::leaf(
                leaf_id("medication", &med.id),
                OutlineItemType::Medication,
                NonEmptyText::new_or(&med.medication_name, "Medication"),
                Icon::Pill,
                status_of(med),
                OutlineData::Medication(med.clone()),
            )
        })
        .collect();
    non_empty_section(section_id, "Medications", Icon::Pill, children)
}

fn referrals_section(referrals: &[Referral]) -> Option<OutlineItem> {
    let children = referrals
        .iter()
        .map(|referral| {
            OutlineItem::leaf(
                leaf_id("referral", &referral.id),
                OutlineItemType::Referral,
                NonEmptyText::new_or(category_label(&referral.specialty), "Referral"),
                Icon::UserPlus,
                status_of(referral),
                OutlineData::Referral(referral.clone()),
            )
        })
        .collect();
    non_empty_section("referrals", "Referrals", Icon::UserPlus, children)
}

fn authorizations_section(authorizations: &[Authorization]) -> Option<OutlineItem> {
    let children = authorizations
        .iter()
        .map(|auth| {
            OutlineItem::leaf(
                leaf_id("authorization", &auth.id),
                OutlineItemType::Authorization,
                NonEmptyText::new_or(category_label(&auth.kind), "Authorization"),
                Icon::Shield,
                status_of(auth),
                OutlineData::Authorization(auth.clone()),
            )
        })
        .collect();
    non_empty_section("authorizations", "Authorizations", Icon::Shield, children)
}

/// Which sub-sections an actions roll-up carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ActionScope {
    /// Appointments and tasks.
    Standard,
    /// Appointments, medications and tasks. Medications use the id `medications-actions` so
    /// they never clash with a clinical `medications` section.
    WithMedications,
}

/// The `actions` roll-up, or `None` when the record has no actions.
pub(crate) fn actions_section(record: &impl HasOutline, scope: ActionScope) -> Option<OutlineItem> {
    let medications = match scope {
        ActionScope::Standard => None,
        ActionScope::WithMedications => {
            medications_section("medications-actions", record.medications())
        }
    };

    let children = [
        appointments_section(record.appointments()),
        medications,
        tasks_section(record.tasks()),
    ]
    .into_iter()
    .flatten()
    .collect();

    non_empty_rollup("actions", "Actions", Icon::Activity, children)
}

/// The `clinical` roll-up of medications, referrals and authorizations.
pub(crate) fn clinical_section(record: &impl HasOutline) -> Option<OutlineItem> {
    let children = [
        medications_section("medications", record.medications()),
        referrals_section(record.referrals()),
        authorizations_section(record.authorizations()),
    ]
    .into_iter()
    .flatten()
    .collect();

    non_empty_rollup("clinical", "Clinical", Icon::Activity, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_replaces_every_hyphen() {
        assert_eq!(category_label("new-patient"), "new patient");
        assert_eq!(category_label("prior-auth-renewal"), "prior auth renewal");
        assert_eq!(category_label("confirm"), "confirm");
    }

    #[test]
    fn empty_document_list_yields_no_section() {
        let section = documents_section("documents", "Documents", "document", &[], document_name);
        assert!(section.is_none());
    }

    #[test]
    fn blank_document_name_falls_back() {
        let doc = Document {
            id: "d1".into(),
            name: "   ".into(),
            kind: "pdf".into(),
            mime_type: None,
            size: None,
            pages: None,
            category: None,
            status: Default::default(),
        };
        let section =
            documents_section("documents", "Documents", "document", &[&doc], document_name)
                .expect("one document");
        assert_eq!(section.children()[0].label.as_str(), "Untitled document");
        assert_eq!(section.children()[0].id, "document-d1");
    }
}
