//! Navigation state for one view session.
//!
//! [`NavigationState`] owns the drill-down stack, the active outline, the selected outline id,
//! the set of collapsed sections and the displayed content view. One instance belongs to one
//! view; the owner constructs it and hands it to whatever renders it.
//!
//! The collapsed set is the live source of truth for expand/collapse. Builder-time `collapsed`
//! hints only seed it, through [`NavigationState::load_outline`].
//!
//! Level and content-view types are chosen by the caller and never inspected here.

use crate::outline::{
    collapsible_section_ids, find_outline_item, initially_collapsed_ids, OutlineItem,
};
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct NavigationState<L, V> {
    session_id: Uuid,
    revision: u64,
    stack: Vec<L>,
    outline: Vec<OutlineItem>,
    selected_outline_id: Option<String>,
    collapsed_sections: BTreeSet<String>,
    content_view: Option<V>,
}

impl<L, V> Default for NavigationState<L, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, V> NavigationState<L, V> {
    /// Creates an empty state with a fresh session id.
    pub fn new() -> Self {
        let session_id = Uuid::new_v4();
        tracing::debug!(%session_id, "navigation session created");
        Self {
            session_id,
            revision: 0,
            stack: Vec::new(),
            outline: Vec::new(),
            selected_outline_id: None,
            collapsed_sections: BTreeSet::new(),
            content_view: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Incremented by every mutating call, including ones that change nothing.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self, operation: &'static str) {
        self.revision += 1;
        tracing::debug!(
            session_id = %self.session_id,
            revision = self.revision,
            depth = self.stack.len(),
            operation,
            "navigation state changed"
        );
    }

    // ------------------------------------------------------------------
    // Stack
    // ------------------------------------------------------------------

    pub fn stack(&self) -> &[L] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The top of the stack, or `None` when the stack is empty.
    pub fn current_level(&self) -> Option<&L> {
        self.stack.last()
    }

    /// Push a level. The stack has no maximum depth.
    pub fn push(&mut self, level: L) {
        self.stack.push(level);
        self.touch("push");
    }

    /// Drop the top level. No-op on an empty stack.
    pub fn pop(&mut self) {
        self.stack.pop();
        self.touch("pop");
    }

    /// Keep levels `0..=index` and discard everything above.
    ///
    /// An index at or past the current depth leaves the stack unchanged.
    pub fn jump_to(&mut self, index: usize) {
        if index >= self.stack.len() {
            tracing::debug!(
                session_id = %self.session_id,
                index,
                depth = self.stack.len(),
                "jump_to index out of range; ignored"
            );
        } else {
            self.stack.truncate(index + 1);
        }
        self.touch("jump_to");
    }

    /// Return to the initial state: empty stack, outline and collapsed set, no selection and
    /// no content view.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.outline.clear();
        self.selected_outline_id = None;
        self.collapsed_sections.clear();
        self.content_view = None;
        self.touch("clear");
    }

    /// Empty the stack only. Outline, selection, collapsed set and content view are kept.
    pub fn clear_stack(&mut self) {
        self.stack.clear();
        self.touch("clear_stack");
    }

    // ------------------------------------------------------------------
    // Outline and selection
    // ------------------------------------------------------------------

    pub fn outline(&self) -> &[OutlineItem] {
        &self.outline
    }

    /// Replace the outline. Selection and collapsed ids are left as they are, even if they no
    /// longer exist in the new tree.
    pub fn set_outline(&mut self, outline: Vec<OutlineItem>) {
        self.outline = outline;
        self.touch("set_outline");
    }

    /// Replace the outline and add the builder's initially-collapsed sections to the
    /// collapsed set. Existing ids are kept.
    pub fn load_outline(&mut self, outline: Vec<OutlineItem>) {
        self.collapsed_sections
            .extend(initially_collapsed_ids(&outline));
        self.outline = outline;
        self.touch("load_outline");
    }

    pub fn selected_outline_id(&self) -> Option<&str> {
        self.selected_outline_id.as_deref()
    }

    /// Select an outline node. The id is not checked against the current outline.
    pub fn select_outline_item(&mut self, id: impl Into<String>) {
        self.selected_outline_id = Some(id.into());
        self.touch("select_outline_item");
    }

    /// The selected node, or `None` if nothing is selected or the selection is dangling.
    pub fn selected_item(&self) -> Option<&OutlineItem> {
        self.selected_outline_id
            .as_deref()
            .and_then(|id| find_outline_item(&self.outline, id))
    }

    // ------------------------------------------------------------------
    // Collapsed sections
    // ------------------------------------------------------------------

    pub fn collapsed_sections(&self) -> &BTreeSet<String> {
        &self.collapsed_sections
    }

    pub fn is_collapsed(&self, id: &str) -> bool {
        self.collapsed_sections.contains(id)
    }

    /// Flip membership of `id` in the collapsed set. Ids need not exist in the outline.
    pub fn toggle_section(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.collapsed_sections.remove(&id) {
            self.collapsed_sections.insert(id);
        }
        self.touch("toggle_section");
    }

    /// Collapse every collapsible section of the current outline.
    ///
    /// The set is replaced, so ids that are not in the current outline are dropped.
    pub fn collapse_all(&mut self) {
        self.collapsed_sections = collapsible_section_ids(&self.outline);
        self.touch("collapse_all");
    }

    pub fn expand_all(&mut self) {
        self.collapsed_sections.clear();
        self.touch("expand_all");
    }

    // ------------------------------------------------------------------
    // Content view
    // ------------------------------------------------------------------

    pub fn content_view(&self) -> Option<&V> {
        self.content_view.as_ref()
    }

    pub fn set_content_view(&mut self, view: V) {
        self.content_view = Some(view);
        self.touch("set_content_view");
    }
}
