//! Outline for an ambient-scribe encounter.
//!
//! Driven by the recording lifecycle rather than by record contents. The `patient` and
//! `documents` sections are placeholders that stay visible before anything is attached, so
//! they are the only sections allowed to have no children.

use super::sections::{document_leaf, text};
use super::{Icon, OutlineData, OutlineItem};
use crate::entities::{Document, ScribeEncounter};
use crate::CoreError;
use careflow_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncounterState {
    PreRecording,
    ActiveRecording,
    PostRecording,
}

impl EncounterState {
    pub fn has_started(self) -> bool {
        !matches!(self, Self::PreRecording)
    }

    pub fn has_ended(self) -> bool {
        matches!(self, Self::PostRecording)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreRecording => "pre-recording",
            Self::ActiveRecording => "active-recording",
            Self::PostRecording => "post-recording",
        }
    }
}

impl FromStr for EncounterState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pre-recording" => Ok(Self::PreRecording),
            "active-recording" => Ok(Self::ActiveRecording),
            "post-recording" => Ok(Self::PostRecording),
            other => Err(CoreError::UnknownEncounterState(other.to_string())),
        }
    }
}

/// Leaves are prefixed per sub-section so a file listed in two of them keeps distinct ids.
fn file_section(
    id: &str,
    label: &'static str,
    leaf_prefix: &str,
    files: &[Document],
) -> Option<OutlineItem> {
    if files.is_empty() {
        return None;
    }
    let children = files
        .iter()
        .map(|doc| {
            let label = NonEmptyText::new_or(&doc.name, "Untitled document");
            document_leaf(leaf_prefix, doc, label)
        })
        .collect();
    Some(OutlineItem::section(id, text(label), Icon::FileText, children))
}

pub fn build_encounter_outline(
    state: EncounterState,
    encounter: &ScribeEncounter,
) -> Vec<OutlineItem> {
    let mut outline = Vec::new();

    let patient_children = encounter
        .patient
        .iter()
        .map(|patient| {
            let label = NonEmptyText::new_or(
                format!("{} - MRN: {}", patient.name, patient.mrn),
                "Patient",
            );
            OutlineItem::content("patient-info", label, Icon::UserPlus)
                .with_data(OutlineData::Patient(patient.clone()))
        })
        .collect();
    outline.push(
        OutlineItem::section("patient", text("Patient"), Icon::UserPlus, patient_children)
            .non_collapsible()
            .without_count(),
    );

    let has_patient = encounter.has_patient();

    if state.has_started() && has_patient {
        outline.push(OutlineItem::content(
            "transcript",
            text("Transcript"),
            Icon::FileText,
        ));
    }

    let mut document_children = Vec::new();
    if has_patient {
        if state.has_started() {
            document_children.extend(file_section(
                "session-files",
                "Session Files",
                "session-file",
                &encounter.session_files,
            ));
        }
        if state.has_ended() {
            document_children.extend(file_section(
                "session-notes",
                "Session Notes",
                "session-note",
                &encounter.session_notes,
            ));
        }
        document_children.extend(
            file_section(
                "previous-notes",
                "Previous Notes",
                "previous-note",
                &encounter.previous_notes,
            )
            .map(OutlineItem::initially_collapsed),
        );
        document_children.extend(
            file_section(
                "patient-files",
                "Patient Files",
                "patient-file",
                &encounter.patient_files,
            )
            .map(OutlineItem::initially_collapsed),
        );
    }

    let documents = if document_children.is_empty() {
        OutlineItem::section("documents", text("Documents"), Icon::FileText, Vec::new())
            .without_count()
    } else {
        OutlineItem::rollup("documents", text("Documents"), Icon::FileText, document_children)
    };
    outline.push(documents);

    outline
}
