//! Outline tree nodes.

use crate::entities::{
    AppointmentAction, Authorization, Document, MedicationAction, PatientRef, Referral, TaskAction,
};
use careflow_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// One node of an outline tree.
///
/// Sections group other nodes and carry a `count`; every other type is a leaf that may point
/// back at the record it was built from through `data`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineItem {
    /// Unique within one tree, derived from the record id so rebuilds are stable.
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: OutlineItemType,
    pub label: NonEmptyText,
    pub icon: Icon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub collapsible: bool,
    /// Initial collapse hint, only meaningful when `collapsible` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OutlineStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<OutlineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<OutlineData>,
}

impl OutlineItem {
    /// A non-collapsible primary content node such as the message body.
    pub fn content(id: impl Into<String>, label: NonEmptyText, icon: Icon) -> Self {
        Self {
            id: id.into(),
            item_type: OutlineItemType::Message,
            label,
            icon,
            count: None,
            collapsible: false,
            collapsed: None,
            status: None,
            children: None,
            data: None,
        }
    }

    /// An expanded, collapsible section whose count is its number of children.
    pub fn section(
        id: impl Into<String>,
        label: NonEmptyText,
        icon: Icon,
        children: Vec<OutlineItem>,
    ) -> Self {
        Self {
            id: id.into(),
            item_type: OutlineItemType::Section,
            label,
            icon,
            count: Some(children.len()),
            collapsible: true,
            collapsed: Some(false),
            status: None,
            children: Some(children),
            data: None,
        }
    }

    /// A section of sub-sections whose count is the sum of its children's counts.
    pub fn rollup(
        id: impl Into<String>,
        label: NonEmptyText,
        icon: Icon,
        children: Vec<OutlineItem>,
    ) -> Self {
        let total = children.iter().filter_map(|child| child.count).sum();
        Self {
            count: Some(total),
            ..Self::section(id, label, icon, children)
        }
    }

    /// A leaf referencing a domain record.
    pub fn leaf(
        id: impl Into<String>,
        item_type: OutlineItemType,
        label: NonEmptyText,
        icon: Icon,
        status: OutlineStatus,
        data: OutlineData,
    ) -> Self {
        Self {
            id: id.into(),
            item_type,
            label,
            icon,
            count: None,
            collapsible: false,
            collapsed: None,
            status: Some(status),
            children: None,
            data: Some(data),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn without_count(mut self) -> Self {
        self.count = None;
        self
    }

    /// Start collapsed. Has no effect on non-collapsible nodes.
    pub fn initially_collapsed(mut self) -> Self {
        if self.collapsible {
            self.collapsed = Some(true);
        }
        self
    }

    pub fn non_collapsible(mut self) -> Self {
        self.collapsible = false;
        self.collapsed = None;
        self
    }

    pub fn with_data(mut self, data: OutlineData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_section(&self) -> bool {
        self.item_type == OutlineItemType::Section
    }

    pub fn children(&self) -> &[OutlineItem] {
        self.children.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineItemType {
    Message,
    Section,
    Document,
    Appointment,
    Task,
    Medication,
    Referral,
    Authorization,
}

/// Symbolic icon name. Cosmetic only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Mail,
    FileText,
    Calendar,
    ListTodo,
    Pill,
    UserPlus,
    Shield,
    Activity,
    AudioLines,
    Beaker,
}

impl Icon {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mail => "mail",
            Self::FileText => "file-text",
            Self::Calendar => "calendar",
            Self::ListTodo => "list-todo",
            Self::Pill => "pill",
            Self::UserPlus => "user-plus",
            Self::Shield => "shield",
            Self::Activity => "activity",
            Self::AudioLines => "audio-lines",
            Self::Beaker => "beaker",
        }
    }
}

/// Badge shown next to a leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineStatus {
    Completed,
    Pending,
    None,
}

impl OutlineStatus {
    /// Map a record lifecycle tag onto a badge.
    ///
    /// Shared by every record kind so that the same tag always yields the same badge.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "extracted" | "completed" | "approved" | "sent-to-pharmacy" => Self::Completed,
            "processing" | "pending" | "in-progress" => Self::Pending,
            _ => Self::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::None => "none",
        }
    }
}

/// The record behind a leaf. Read-only from the outline's point of view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "recordType", rename_all = "lowercase")]
pub enum OutlineData {
    Document(Document),
    Appointment(AppointmentAction),
    Task(TaskAction),
    Medication(MedicationAction),
    Referral(Referral),
    Authorization(Authorization),
    Patient(PatientRef),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).unwrap()
    }

    #[test]
    fn icon_names_match_wire_format() {
        for icon in [Icon::Mail, Icon::FileText, Icon::ListTodo, Icon::AudioLines] {
            let wire = serde_json::to_value(icon).unwrap();
            assert_eq!(wire, serde_json::Value::String(icon.as_str().to_string()));
        }
    }

    #[test]
    fn status_tags_map_onto_badges() {
        for tag in ["extracted", "completed", "approved", "sent-to-pharmacy"] {
            assert_eq!(OutlineStatus::from_tag(tag), OutlineStatus::Completed, "{tag}");
        }
        for tag in ["processing", "pending", "in-progress"] {
            assert_eq!(OutlineStatus::from_tag(tag), OutlineStatus::Pending, "{tag}");
        }
        for tag in ["todo", "scheduled", "denied", "error", "unknown", ""] {
            assert_eq!(OutlineStatus::from_tag(tag), OutlineStatus::None, "{tag}");
        }
    }

    #[test]
    fn rollup_counts_sum_child_counts() {
        let child = |id: &str, n: usize| {
            let leaves = (0..n)
                .map(|i| OutlineItem::content(format!("{id}-{i}"), text("Leaf"), Icon::Mail))
                .collect();
            OutlineItem::section(id, text("Child"), Icon::FileText, leaves)
        };

        let rollup = OutlineItem::rollup(
            "actions",
            text("Actions"),
            Icon::Activity,
            vec![child("appointments", 2), child("tasks", 3)],
        );
        assert_eq!(rollup.count, Some(5));
        assert_eq!(rollup.children().len(), 2);
        assert_eq!(rollup.collapsed, Some(false));
    }

    #[test]
    fn collapse_hint_requires_collapsible_node() {
        let node =
            OutlineItem::content("message", text("Message"), Icon::Mail).initially_collapsed();
        assert_eq!(node.collapsed, None);

        let section = OutlineItem::section("notes", text("Notes"), Icon::FileText, vec![])
            .initially_collapsed();
        assert_eq!(section.collapsed, Some(true));
    }

    #[test]
    fn serializes_with_renderer_field_names() {
        let node = OutlineItem::content("cover-sheet", text("Cover Sheet"), Icon::Mail);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["icon"], "mail");
        assert_eq!(json["collapsible"], false);
        assert!(json.get("children").is_none());
        assert!(json.get("count").is_none());
    }
}
