use super::{Call, Document, Email, Fax, HasOutline, PatientRef, SmsConversation};
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationKind {
    Email,
    Fax,
    Sms,
    Call,
}

impl CommunicationKind {
    pub const ALL: [CommunicationKind; 4] = [Self::Email, Self::Fax, Self::Sms, Self::Call];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Fax => "fax",
            Self::Sms => "sms",
            Self::Call => "call",
        }
    }
}

impl fmt::Display for CommunicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommunicationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "fax" => Ok(Self::Fax),
            "sms" => Ok(Self::Sms),
            "call" => Ok(Self::Call),
            _ => Err(CoreError::UnknownKind(s.to_string())),
        }
    }
}

/// Any communication record the inbox can open.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "lowercase")]
pub enum Communication {
    Email(Email),
    Fax(Fax),
    Sms(SmsConversation),
    Call(Call),
}

impl Communication {
    pub fn kind(&self) -> CommunicationKind {
        match self {
            Self::Email(_) => CommunicationKind::Email,
            Self::Fax(_) => CommunicationKind::Fax,
            Self::Sms(_) => CommunicationKind::Sms,
            Self::Call(_) => CommunicationKind::Call,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Email(email) => &email.id,
            Self::Fax(fax) => &fax.id,
            Self::Sms(conversation) => &conversation.id,
            Self::Call(call) => &call.id,
        }
    }

    pub fn patient(&self) -> Option<&PatientRef> {
        match self {
            Self::Email(email) => email.patient.as_ref(),
            Self::Fax(fax) => fax.patient.as_ref(),
            Self::Sms(conversation) => conversation.patient.as_ref(),
            Self::Call(call) => call.patient.as_ref(),
        }
    }

    /// Attached documents (fax pages, SMS media) in display order.
    pub fn documents(&self) -> Vec<&Document> {
        match self {
            Self::Email(email) => email.documents(),
            Self::Fax(fax) => fax.documents(),
            Self::Sms(conversation) => conversation.documents(),
            Self::Call(call) => call.documents(),
        }
    }

    /// One-line description for list views.
    pub fn headline(&self) -> String {
        match self {
            Self::Email(email) => email.subject.clone(),
            Self::Fax(fax) => fax.subject.clone(),
            Self::Sms(conversation) => conversation
                .messages
                .last()
                .map(|m| m.message.clone())
                .unwrap_or_default(),
            Self::Call(call) => call
                .summary
                .clone()
                .unwrap_or_else(|| format!("Call from {}", call.caller.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_case_insensitively() {
        assert_eq!(" SMS ".parse::<CommunicationKind>().unwrap(), CommunicationKind::Sms);
        assert_eq!("Email".parse::<CommunicationKind>().unwrap(), CommunicationKind::Email);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "pager".parse::<CommunicationKind>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownKind(kind) if kind == "pager"));
    }

    #[test]
    fn display_matches_wire_name() {
        for kind in CommunicationKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
