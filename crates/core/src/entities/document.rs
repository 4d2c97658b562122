use super::Lifecycle;
use serde::{Deserialize, Serialize};

/// A file attached to a communication: email attachment, fax page or MMS media.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    /// Coarse file type such as `pdf`, `image` or `audio`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub status: DocumentStatus,
}

/// Extraction status of a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentStatus {
    Uploaded,
    Processing,
    /// Awaiting sign-off, e.g. a drafted note.
    Pending,
    Extracted,
    Completed,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Processing => "processing",
            Self::Pending => "pending",
            Self::Extracted => "extracted",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl Lifecycle for Document {
    fn status_tag(&self) -> &str {
        self.status.as_str()
    }
}
