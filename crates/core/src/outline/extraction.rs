//! Outline for a document-extraction session.

use super::sections::{document_name, documents_section, text};
use super::{Icon, OutlineItem};
use crate::entities::Document;
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionState {
    NoDocuments,
    Uploading,
    Processing,
    Viewing,
}

impl ExtractionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoDocuments => "no-documents",
            Self::Uploading => "uploading",
            Self::Processing => "processing",
            Self::Viewing => "viewing",
        }
    }
}

impl FromStr for ExtractionState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "no-documents" => Ok(Self::NoDocuments),
            "uploading" => Ok(Self::Uploading),
            "processing" => Ok(Self::Processing),
            "viewing" => Ok(Self::Viewing),
            other => Err(CoreError::InvalidInput(format!(
                "unknown extraction state: {other}"
            ))),
        }
    }
}

/// The extracted-data pane is a content node, not a section, so it never shows as empty.
pub fn build_extraction_outline(
    state: ExtractionState,
    documents: &[Document],
) -> Vec<OutlineItem> {
    let documents: Vec<&Document> = documents.iter().collect();
    let mut outline: Vec<OutlineItem> =
        documents_section("documents", "Documents", "document", &documents, document_name)
            .into_iter()
            .collect();

    if state == ExtractionState::Viewing {
        outline.push(OutlineItem::content(
            "extracted-data",
            text("Extracted Data"),
            Icon::Beaker,
        ));
    }

    outline
}
