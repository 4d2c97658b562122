//! Stateless queries over an outline forest.
//!
//! All traversals are pre-order: a node comes before its children, and siblings keep their
//! order.

use super::OutlineItem;
use std::collections::BTreeSet;

/// Depth-first lookup of a node by id. The first match in pre-order wins.
pub fn find_outline_item<'a>(items: &'a [OutlineItem], id: &str) -> Option<&'a OutlineItem> {
    for item in items {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_outline_item(item.children(), id) {
            return Some(found);
        }
    }
    None
}

/// Every node id in pre-order.
pub fn all_item_ids(items: &[OutlineItem]) -> Vec<String> {
    let mut ids = Vec::new();
    collect(items, &mut ids, &|_| true);
    ids
}

/// Ids of sections that can be collapsed.
pub fn collapsible_section_ids(items: &[OutlineItem]) -> BTreeSet<String> {
    let mut ids = Vec::new();
    collect(items, &mut ids, &|item| item.is_section() && item.collapsible);
    ids.into_iter().collect()
}

/// Ids the builder asked to start collapsed.
pub fn initially_collapsed_ids(items: &[OutlineItem]) -> BTreeSet<String> {
    let mut ids = Vec::new();
    collect(items, &mut ids, &|item| {
        item.collapsible && item.collapsed == Some(true)
    });
    ids.into_iter().collect()
}

fn collect(items: &[OutlineItem], out: &mut Vec<String>, keep: &dyn Fn(&OutlineItem) -> bool) {
    for item in items {
        if keep(item) {
            out.push(item.id.clone());
        }
        collect(item.children(), out, keep);
    }
}

/// A node as it appears on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleItem<'a> {
    pub depth: usize,
    pub item: &'a OutlineItem,
    pub collapsed: bool,
}

/// The rows a renderer would draw, given the live collapsed set.
///
/// Children of a collapsed section are skipped. Non-collapsible nodes are always expanded,
/// whatever the set says.
pub fn visible_items<'a>(
    items: &'a [OutlineItem],
    collapsed: &BTreeSet<String>,
) -> Vec<VisibleItem<'a>> {
    fn walk<'a>(
        items: &'a [OutlineItem],
        depth: usize,
        collapsed: &BTreeSet<String>,
        out: &mut Vec<VisibleItem<'a>>,
    ) {
        for item in items {
            let is_collapsed = item.collapsible && collapsed.contains(&item.id);
            out.push(VisibleItem {
                depth,
                item,
                collapsed: is_collapsed,
            });
            if !is_collapsed {
                walk(item.children(), depth + 1, collapsed, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(items, 0, collapsed, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::Icon;
    use careflow_types::NonEmptyText;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).unwrap()
    }

    fn leaf(id: &str) -> OutlineItem {
        OutlineItem::content(id, text(id), Icon::FileText)
    }

    fn forest() -> Vec<OutlineItem> {
        vec![
            leaf("message"),
            OutlineItem::section(
                "documents",
                text("Documents"),
                Icon::FileText,
                vec![leaf("document-1"), leaf("dup")],
            ),
            OutlineItem::rollup(
                "actions",
                text("Actions"),
                Icon::Activity,
                vec![
                    OutlineItem::section(
                        "tasks",
                        text("Tasks"),
                        Icon::ListTodo,
                        vec![leaf("task-1")],
                    )
                    .initially_collapsed(),
                ],
            ),
            leaf("dup"),
        ]
    }

    #[test]
    fn finds_nested_nodes() {
        let items = forest();
        assert_eq!(find_outline_item(&items, "task-1").map(|i| i.id.as_str()), Some("task-1"));
        assert!(find_outline_item(&items, "missing").is_none());
        assert!(find_outline_item(&[], "message").is_none());
    }

    #[test]
    fn first_match_in_pre_order_wins() {
        let items = forest();
        let found = find_outline_item(&items, "dup").unwrap();
        assert!(std::ptr::eq(found, &items[1].children()[1]));
    }

    #[test]
    fn lists_ids_in_pre_order() {
        assert_eq!(
            all_item_ids(&forest()),
            ["message", "documents", "document-1", "dup", "actions", "tasks", "task-1", "dup"]
        );
    }

    #[test]
    fn collapsible_and_hinted_ids() {
        let items = forest();
        let collapsible: Vec<String> = collapsible_section_ids(&items).into_iter().collect();
        assert_eq!(collapsible, ["actions", "documents", "tasks"]);
        let hinted: Vec<String> = initially_collapsed_ids(&items).into_iter().collect();
        assert_eq!(hinted, ["tasks"]);
    }

    #[test]
    fn collapsed_sections_hide_children() {
        let items = forest();
        let collapsed: BTreeSet<String> = ["documents".to_string(), "message".to_string()].into();
        let rows: Vec<(usize, &str, bool)> = visible_items(&items, &collapsed)
            .into_iter()
            .map(|row| (row.depth, row.item.id.as_str(), row.collapsed))
            .collect();
        assert_eq!(
            rows,
            [
                (0, "message", false),
                (0, "documents", true),
                (0, "actions", false),
                (1, "tasks", false),
                (2, "task-1", false),
                (0, "dup", false),
            ]
        );
    }
}
