//! Outlines for communication records: email, fax, SMS conversation and call.
//!
//! Every outline opens with a non-collapsible content node, followed by the attachment
//! section, the `actions` roll-up and (for email and fax) the `clinical` roll-up. Each
//! section is emitted only when it has at least one leaf.

use super::sections::{
    actions_section, clinical_section, document_name, documents_section, text, ActionScope,
};
use super::{Icon, OutlineItem};
use crate::entities::{Call, Communication, Email, Fax, HasOutline, SmsConversation};
use careflow_types::NonEmptyText;

pub fn build_email_outline(email: &Email) -> Vec<OutlineItem> {
    let mut outline = vec![OutlineItem::content("message", text("Message"), Icon::Mail)];

    outline.extend(documents_section(
        "documents",
        "Documents",
        "document",
        &email.documents(),
        document_name,
    ));
    outline.extend(actions_section(email, ActionScope::Standard));
    outline.extend(clinical_section(email));

    outline
}

/// Fax pages are labelled by position (`Page 1`, `Page 2`, ...) rather than file name.
pub fn build_fax_outline(fax: &Fax) -> Vec<OutlineItem> {
    let mut outline = vec![OutlineItem::content(
        "cover-sheet",
        text("Cover Sheet"),
        Icon::Mail,
    )];

    outline.extend(documents_section(
        "pages",
        "Pages",
        "page",
        &fax.documents(),
        |index, _| NonEmptyText::new_or(format!("Page {}", index + 1), "Page"),
    ));
    outline.extend(actions_section(fax, ActionScope::Standard));
    outline.extend(clinical_section(fax));

    outline
}

pub fn build_sms_outline(conversation: &SmsConversation) -> Vec<OutlineItem> {
    let mut outline = vec![
        OutlineItem::content("messages", text("Conversation"), Icon::Mail)
            .with_count(conversation.messages.len()),
    ];

    outline.extend(documents_section(
        "media",
        "Media",
        "media",
        &conversation.documents(),
        document_name,
    ));
    outline.extend(actions_section(conversation, ActionScope::Standard));

    outline
}

/// Calls have no attachments. Recording and transcript get their own content nodes when
/// present, and medications are treated as actions.
pub fn build_call_outline(call: &Call) -> Vec<OutlineItem> {
    let mut outline = vec![OutlineItem::content(
        "call-details",
        text("Call Details"),
        Icon::Activity,
    )];

    if call.recording_url.is_some() {
        outline.push(OutlineItem::content(
            "recording",
            text("Recording"),
            Icon::AudioLines,
        ));
    }

    if call.transcription.is_some() {
        outline.push(OutlineItem::content(
            "transcript",
            text("Transcript"),
            Icon::FileText,
        ));
    }

    outline.extend(actions_section(call, ActionScope::WithMedications));

    outline
}

impl Communication {
    /// Build the outline with the builder matching this record's kind.
    pub fn build_outline(&self) -> Vec<OutlineItem> {
        match self {
            Self::Email(email) => build_email_outline(email),
            Self::Fax(fax) => build_fax_outline(fax),
            Self::Sms(conversation) => build_sms_outline(conversation),
            Self::Call(call) => build_call_outline(call),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        AppointmentAction, AppointmentStatus, Authorization, AuthorizationStatus, CallStatus,
        Caller, CallerRelationship, Contact, Direction, Document, DocumentStatus,
        MedicationAction, MedicationStatus, Priority, Referral, ReferralStatus, SmsMessage,
        TaskAction, TaskStatus, WorkflowState,
    };
    use crate::outline::{all_item_ids, OutlineItemType, OutlineStatus};
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    fn document(id: &str, name: &str, status: DocumentStatus) -> Document {
        Document {
            id: id.into(),
            name: name.into(),
            kind: "pdf".into(),
            mime_type: Some("application/pdf".into()),
            size: None,
            pages: None,
            category: None,
            status,
        }
    }

    fn appointment(id: &str, kind: &str, status: AppointmentStatus) -> AppointmentAction {
        AppointmentAction {
            id: id.into(),
            kind: kind.into(),
            appointment_type: None,
            provider: None,
            date: None,
            time: None,
            status,
        }
    }

    fn task(id: &str, title: &str, status: TaskStatus) -> TaskAction {
        TaskAction {
            id: id.into(),
            title: title.into(),
            description: None,
            kind: None,
            priority: None,
            assigned_to: None,
            due_date: None,
            status,
        }
    }

    fn medication(id: &str, name: &str, status: MedicationStatus) -> MedicationAction {
        MedicationAction {
            id: id.into(),
            kind: Some("refill".into()),
            medication_name: name.into(),
            dosage: None,
            frequency: None,
            status,
        }
    }

    fn email() -> Email {
        Email {
            id: "email-100".into(),
            sender: Contact {
                name: "Quest Diagnostics".into(),
                email: Some("results@quest.example".into()),
                phone: None,
                fax_number: None,
                organization: None,
            },
            patient: None,
            subject: "Lab results".into(),
            body: "Attached.".into(),
            direction: Direction::Inbound,
            timestamp: Utc.with_ymd_and_hms(2025, 10, 10, 9, 0, 0).unwrap(),
            priority: Priority::Routine,
            workflow_state: WorkflowState::AiNeedsReview,
            categories: vec![],
            documents: vec![],
            appointments: vec![],
            tasks: vec![],
            medications: vec![],
            referrals: vec![],
            authorizations: vec![],
            summary: None,
        }
    }

    fn scenario_email() -> Email {
        Email {
            documents: vec![
                document("d1", "labs.pdf", DocumentStatus::Extracted),
                document("d2", "ecg.pdf", DocumentStatus::Processing),
            ],
            appointments: vec![appointment("a1", "follow-up", AppointmentStatus::Completed)],
            medications: vec![medication("m1", "Lisinopril 10mg", MedicationStatus::Pending)],
            ..email()
        }
    }

    fn statuses(section: &OutlineItem) -> Vec<Option<OutlineStatus>> {
        section.children().iter().map(|child| child.status).collect()
    }

    fn assert_counts_consistent(items: &[OutlineItem]) {
        for item in items {
            if item.is_section() {
                assert!(!item.children().is_empty(), "empty section {}", item.id);
                let expected = if item.children().iter().all(OutlineItem::is_section) {
                    item.children().iter().filter_map(|c| c.count).sum()
                } else {
                    item.children().len()
                };
                assert_eq!(item.count, Some(expected), "count of {}", item.id);
            }
            assert_counts_consistent(item.children());
        }
    }

    #[test]
    fn email_scenario_produces_expected_sections() {
        let outline = build_email_outline(&scenario_email());

        let ids: Vec<&str> = outline.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["message", "documents", "actions", "clinical"]);

        let message = &outline[0];
        assert_eq!(message.item_type, OutlineItemType::Message);
        assert!(!message.collapsible);

        let documents = &outline[1];
        assert_eq!(documents.count, Some(2));
        assert_eq!(
            statuses(documents),
            [Some(OutlineStatus::Completed), Some(OutlineStatus::Pending)]
        );
        assert_eq!(documents.children()[0].id, "document-d1");
        assert_eq!(documents.children()[0].label.as_str(), "labs.pdf");

        let actions = &outline[2];
        assert_eq!(actions.count, Some(1));
        assert_eq!(actions.children().len(), 1);
        let appointments = &actions.children()[0];
        assert_eq!(appointments.id, "appointments");
        assert_eq!(statuses(appointments), [Some(OutlineStatus::Completed)]);
        assert_eq!(appointments.children()[0].label.as_str(), "follow up");

        let clinical = &outline[3];
        assert_eq!(clinical.count, Some(1));
        let medications = &clinical.children()[0];
        assert_eq!(medications.id, "medications");
        assert_eq!(statuses(medications), [Some(OutlineStatus::Pending)]);
        assert_eq!(medications.children()[0].label.as_str(), "Lisinopril 10mg");
    }

    #[test]
    fn bare_email_has_only_message_node() {
        let outline = build_email_outline(&email());
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].id, "message");
    }

    #[test]
    fn rebuilding_yields_identical_ids() {
        let record = scenario_email();
        assert_eq!(
            all_item_ids(&build_email_outline(&record)),
            all_item_ids(&build_email_outline(&record))
        );
    }

    #[test]
    fn email_clinical_section_groups_all_categories() {
        let record = Email {
            tasks: vec![
                task("t1", "Review labs", TaskStatus::InProgress),
                task("t2", "Call patient", TaskStatus::Todo),
            ],
            referrals: vec![Referral {
                id: "r1".into(),
                specialty: "physical-therapy".into(),
                provider: None,
                urgency: None,
                reason: None,
                status: ReferralStatus::Scheduled,
            }],
            authorizations: vec![Authorization {
                id: "au1".into(),
                kind: "procedure-auth".into(),
                service: None,
                auth_number: None,
                insurance_payer: None,
                status: AuthorizationStatus::Approved,
            }],
            ..scenario_email()
        };

        let outline = build_email_outline(&record);
        assert_counts_consistent(&outline);

        let actions = outline.iter().find(|i| i.id == "actions").unwrap();
        assert_eq!(actions.count, Some(3));
        let tasks = &actions.children()[1];
        assert_eq!(
            statuses(tasks),
            [Some(OutlineStatus::Pending), Some(OutlineStatus::None)]
        );

        let clinical = outline.iter().find(|i| i.id == "clinical").unwrap();
        assert_eq!(clinical.count, Some(3));
        let labels: Vec<&str> = clinical
            .children()
            .iter()
            .map(|section| section.children()[0].label.as_str())
            .collect();
        assert_eq!(labels, ["Lisinopril 10mg", "physical therapy", "procedure auth"]);
        assert_eq!(
            clinical.children()[2].children()[0].status,
            Some(OutlineStatus::Completed)
        );
    }

    #[test]
    fn fax_numbers_pages_and_always_shows_cover_sheet() {
        let fax = Fax {
            id: "fax-100".into(),
            sender: Contact {
                name: "LabCorp".into(),
                email: None,
                phone: None,
                fax_number: Some("+1-555-0100".into()),
                organization: None,
            },
            patient: None,
            subject: "Results".into(),
            cover_sheet: None,
            direction: Direction::Inbound,
            timestamp: Utc.with_ymd_and_hms(2025, 10, 12, 8, 0, 0).unwrap(),
            priority: Priority::Routine,
            workflow_state: WorkflowState::New,
            categories: vec![],
            total_pages: Some(2),
            documents: vec![
                document("p1", "scan-1.pdf", DocumentStatus::Extracted),
                document("p2", "scan-2.pdf", DocumentStatus::Error),
            ],
            appointments: vec![],
            tasks: vec![],
            medications: vec![medication("m1", "Metformin", MedicationStatus::SentToPharmacy)],
            referrals: vec![],
            authorizations: vec![],
        };

        let outline = build_fax_outline(&fax);
        let ids: Vec<&str> = outline.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["cover-sheet", "pages", "clinical"]);

        let pages = &outline[1];
        let labels: Vec<&str> = pages.children().iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Page 1", "Page 2"]);
        assert_eq!(pages.children()[1].id, "page-p2");
        assert_eq!(
            statuses(pages),
            [Some(OutlineStatus::Completed), Some(OutlineStatus::None)]
        );
        assert_eq!(
            outline[2].children()[0].children()[0].status,
            Some(OutlineStatus::Completed)
        );
    }

    #[test]
    fn sms_flattens_media_and_skips_clinical() {
        let message = |id: &str, media: Vec<Document>| SmsMessage {
            id: id.into(),
            direction: Direction::Inbound,
            message: "see attached".into(),
            timestamp: Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap(),
            media,
        };
        let conversation = SmsConversation {
            id: "sms-100".into(),
            patient: None,
            messages: vec![
                message("s1", vec![document("img1", "card-front.jpg", DocumentStatus::Extracted)]),
                message("s2", vec![]),
                message("s3", vec![document("img2", "card-back.jpg", DocumentStatus::Uploaded)]),
            ],
            unread_count: 1,
            priority: Priority::Routine,
            workflow_state: WorkflowState::New,
            categories: vec![],
            appointments: vec![appointment("a1", "confirm", AppointmentStatus::Pending)],
            tasks: vec![],
        };

        let outline = build_sms_outline(&conversation);
        let ids: Vec<&str> = outline.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["messages", "media", "actions"]);
        assert_eq!(outline[0].count, Some(3));
        assert_eq!(
            all_item_ids(&outline[1..2]),
            ["media", "media-img1", "media-img2"]
        );
    }

    #[test]
    fn call_outline_uses_optional_content_nodes_and_medication_actions() {
        let at = Utc.with_ymd_and_hms(2025, 10, 14, 15, 30, 0).unwrap();
        let mut call = Call {
            id: "call-100".into(),
            caller: Caller {
                name: "Robert Johnson".into(),
                phone: "+1-555-9876".into(),
                relationship: CallerRelationship::Patient,
                organization: None,
            },
            patient: None,
            direction: Direction::Inbound,
            timestamp: at,
            duration: 420,
            recording_url: None,
            categories: vec![],
            priority: Priority::Urgent,
            status: CallStatus::Answered,
            workflow_state: WorkflowState::AiNeedsReview,
            transcription: None,
            summary: None,
            notes: None,
            appointments: vec![],
            medications: vec![],
            tasks: vec![],
            ai: None,
            review: None,
            created_at: at,
            updated_at: at,
        };

        assert_eq!(all_item_ids(&build_call_outline(&call)), ["call-details"]);

        call.recording_url = Some("https://recordings.example/call-100.mp3".into());
        call.transcription = Some("Agent: Hello".into());
        call.medications = vec![medication("m1", "Lisinopril 10mg", MedicationStatus::Pending)];
        call.tasks = vec![task("t1", "Review side effects", TaskStatus::Todo)];

        let outline = build_call_outline(&call);
        let ids: Vec<&str> = outline.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["call-details", "recording", "transcript", "actions"]);

        let actions = &outline[3];
        assert_eq!(actions.count, Some(2));
        let sub_ids: Vec<&str> = actions.children().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(sub_ids, ["medications-actions", "tasks"]);
        assert_counts_consistent(&outline);
    }

    #[test]
    fn ids_are_unique_within_a_tree() {
        let outline = build_email_outline(&scenario_email());
        let ids = all_item_ids(&outline);
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn dispatch_matches_direct_builder() {
        let record = scenario_email();
        assert_eq!(
            Communication::Email(record.clone()).build_outline(),
            build_email_outline(&record)
        );
    }
}
