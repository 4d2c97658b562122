//! Records shared by every communication kind.

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Patient a communication has been matched to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRef {
    pub id: String,
    pub name: String,
    pub mrn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Sender or counterpart of a communication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Inbound,
    Outbound,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Routine,
    Urgent,
    Stat,
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "routine" => Ok(Self::Routine),
            "urgent" => Ok(Self::Urgent),
            "stat" => Ok(Self::Stat),
            other => Err(CoreError::InvalidInput(format!("unknown priority: {other}"))),
        }
    }
}

/// Processing lifecycle of a communication, from intake to resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowState {
    #[default]
    New,
    Transcribing,
    AiProcessing,
    AiCompleted,
    AiNeedsReview,
    QueuedForReview,
    UnderReview,
    AwaitingInfo,
    CompletedByAi,
    CompletedByHuman,
    CompletedHybrid,
    RequiresCallback,
    Escalated,
    Cancelled,
    Failed,
}

impl WorkflowState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Transcribing => "transcribing",
            Self::AiProcessing => "ai-processing",
            Self::AiCompleted => "ai-completed",
            Self::AiNeedsReview => "ai-needs-review",
            Self::QueuedForReview => "queued-for-review",
            Self::UnderReview => "under-review",
            Self::AwaitingInfo => "awaiting-info",
            Self::CompletedByAi => "completed-by-ai",
            Self::CompletedByHuman => "completed-by-human",
            Self::CompletedHybrid => "completed-hybrid",
            Self::RequiresCallback => "requires-callback",
            Self::Escalated => "escalated",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for WorkflowState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let state = match s {
            "new" => Self::New,
            "transcribing" => Self::Transcribing,
            "ai-processing" => Self::AiProcessing,
            "ai-completed" => Self::AiCompleted,
            "ai-needs-review" => Self::AiNeedsReview,
            "queued-for-review" => Self::QueuedForReview,
            "under-review" => Self::UnderReview,
            "awaiting-info" => Self::AwaitingInfo,
            "completed-by-ai" => Self::CompletedByAi,
            "completed-by-human" => Self::CompletedByHuman,
            "completed-hybrid" => Self::CompletedHybrid,
            "requires-callback" => Self::RequiresCallback,
            "escalated" => Self::Escalated,
            "cancelled" => Self::Cancelled,
            "failed" => Self::Failed,
            other => {
                return Err(CoreError::InvalidInput(format!(
                    "unknown workflow state: {other}"
                )))
            }
        };
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_state_tags_match_wire_format() {
        for tag in ["new", "ai-needs-review", "completed-hybrid", "requires-callback"] {
            let state: WorkflowState = tag.parse().expect("known tag");
            assert_eq!(state.as_str(), tag);
            assert_eq!(serde_json::to_string(&state).unwrap(), format!("\"{tag}\""));
        }
        assert!(matches!(
            "archived".parse::<WorkflowState>(),
            Err(CoreError::InvalidInput(msg)) if msg.contains("archived")
        ));
    }

    #[test]
    fn priority_parses_wire_tags() {
        assert_eq!("stat".parse::<Priority>().unwrap(), Priority::Stat);
        assert!(matches!(
            "high".parse::<Priority>(),
            Err(CoreError::InvalidInput(msg)) if msg == "unknown priority: high"
        ));
    }
}
