//! Outline trees for the navigation panel.
//!
//! Builders are pure functions from a record (or a UI lifecycle state) to a forest of
//! [`OutlineItem`]s. They never fail: a record without qualifying data just yields fewer
//! sections.

mod communication;
mod encounter;
mod extraction;
mod item;
mod sections;
mod tree;

pub use communication::{
    build_call_outline, build_email_outline, build_fax_outline, build_sms_outline,
};
pub use encounter::{build_encounter_outline, EncounterState};
pub use extraction::{build_extraction_outline, ExtractionState};
pub use item::{Icon, OutlineData, OutlineItem, OutlineItemType, OutlineStatus};
pub use sections::category_label;
pub use tree::{
    all_item_ids, collapsible_section_ids, find_outline_item, initially_collapsed_ids,
    visible_items, VisibleItem,
};
