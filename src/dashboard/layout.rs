use crate::api::widgets::WidgetItem;

/// Editing-session state for the dashboard widget list: a working copy the
/// drawer mutates freely and the last-known-good snapshot it can fall back
/// to. Only a successful commit moves the snapshot forward; persistence
/// itself is the caller's job, so every operation here is a pure in-memory
/// transform.
#[derive(Debug, Clone, Default)]
pub struct WidgetLayout {
    working: Vec<WidgetItem>,
    snapshot: Vec<WidgetItem>,
}

impl WidgetLayout {
    /// Start an editing session from the persisted configuration. Items are
    /// ordered by their `order` field; the source is left untouched.
    pub fn load(persisted: &[WidgetItem]) -> Self {
        let mut items = persisted.to_vec();
        items.sort_by_key(|item| item.order);
        Self {
            snapshot: items.clone(),
            working: items,
        }
    }

    pub fn items(&self) -> &[WidgetItem] {
        &self.working
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Whether the working copy has diverged from the last committed state.
    pub fn is_dirty(&self) -> bool {
        self.working != self.snapshot
    }

    /// Flip visibility for `key`. Order is untouched; an unknown key is a
    /// no-op.
    pub fn toggle_visibility(&mut self, key: &str) {
        if let Some(item) = self.working.iter_mut().find(|item| item.key == key) {
            item.visible = !item.visible;
        }
    }

    /// Move the source item to the target item's position (remove and
    /// reinsert, not swap), then rewrite every `order` to its index so the
    /// sequence is dense `0..n-1` whatever it was before. No-op when source
    /// and target are equal or either key is unknown.
    pub fn reorder(&mut self, source_key: &str, target_key: &str) {
        if source_key == target_key {
            return;
        }
        let Some(from) = self.working.iter().position(|item| item.key == source_key) else {
            return;
        };
        let Some(to) = self.working.iter().position(|item| item.key == target_key) else {
            return;
        };
        let item = self.working.remove(from);
        self.working.insert(to, item);
        self.renumber();
    }

    fn renumber(&mut self) {
        for (index, item) in self.working.iter_mut().enumerate() {
            item.order = index as i64;
        }
    }

    /// Accept the working copy as the new last-known-good state after the
    /// persistence call succeeded.
    pub fn commit_success(&mut self) {
        self.snapshot = self.working.clone();
    }

    /// Revert the working copy to the last-known-good state; used on cancel.
    pub fn discard(&mut self) {
        self.working = self.snapshot.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, visible: bool, order: i64) -> WidgetItem {
        WidgetItem {
            key: key.into(),
            visible,
            order,
        }
    }

    fn layout() -> WidgetLayout {
        WidgetLayout::load(&[
            item("summary", true, 0),
            item("event", true, 1),
            item("user", false, 2),
        ])
    }

    fn keys(layout: &WidgetLayout) -> Vec<&str> {
        layout.items().iter().map(|i| i.key.as_str()).collect()
    }

    fn orders(layout: &WidgetLayout) -> Vec<i64> {
        layout.items().iter().map(|i| i.order).collect()
    }

    #[test]
    fn load_sorts_by_order_without_mutating_the_source() {
        let persisted = vec![item("user", true, 2), item("summary", true, 0), item("event", true, 1)];
        let layout = WidgetLayout::load(&persisted);
        assert_eq!(keys(&layout), ["summary", "event", "user"]);
        // The source kept its original order.
        assert_eq!(persisted[0].key, "user");
    }

    #[test]
    fn reorder_moves_and_renumbers_densely() {
        let mut layout = layout();
        layout.reorder("user", "summary");
        assert_eq!(keys(&layout), ["user", "summary", "event"]);
        assert_eq!(orders(&layout), [0, 1, 2]);
    }

    #[test]
    fn reorder_preserves_relative_order_of_unmoved_items() {
        let mut layout = WidgetLayout::load(&[
            item("a", true, 0),
            item("b", true, 1),
            item("c", true, 2),
            item("d", true, 3),
        ]);
        layout.reorder("a", "c");
        assert_eq!(keys(&layout), ["b", "c", "a", "d"]);
        assert_eq!(orders(&layout), [0, 1, 2, 3]);
    }

    #[test]
    fn reorder_normalizes_gapped_orders() {
        let mut layout =
            WidgetLayout::load(&[item("a", true, 3), item("b", true, 10), item("c", true, 40)]);
        layout.reorder("c", "b");
        assert_eq!(keys(&layout), ["a", "c", "b"]);
        assert_eq!(orders(&layout), [0, 1, 2]);
    }

    #[test]
    fn reorder_is_a_noop_for_same_or_unknown_keys() {
        let mut layout = layout();
        let before = layout.items().to_vec();
        layout.reorder("event", "event");
        layout.reorder("event", "missing");
        layout.reorder("missing", "event");
        assert_eq!(layout.items(), &before[..]);
    }

    #[test]
    fn toggle_visibility_is_its_own_inverse() {
        let mut layout = layout();
        let before = layout.items().to_vec();
        layout.toggle_visibility("event");
        assert!(!layout.items()[1].visible);
        assert_eq!(orders(&layout), [0, 1, 2]);
        layout.toggle_visibility("event");
        assert_eq!(layout.items(), &before[..]);
    }

    #[test]
    fn toggle_visibility_ignores_unknown_keys() {
        let mut layout = layout();
        let before = layout.items().to_vec();
        layout.toggle_visibility("missing");
        assert_eq!(layout.items(), &before[..]);
    }

    #[test]
    fn discard_reverts_to_snapshot() {
        let mut layout = layout();
        layout.reorder("user", "summary");
        layout.toggle_visibility("event");
        assert!(layout.is_dirty());
        layout.discard();
        assert!(!layout.is_dirty());
        assert_eq!(keys(&layout), ["summary", "event", "user"]);
    }

    #[test]
    fn failed_commit_preserves_the_working_copy() {
        let mut layout = layout();
        layout.reorder("user", "summary");
        // The persistence call failed: nothing is committed, the edits stand
        // and the user may retry.
        assert!(layout.is_dirty());
        assert_eq!(keys(&layout), ["user", "summary", "event"]);
    }

    #[test]
    fn successful_commit_moves_the_snapshot() {
        let mut layout = layout();
        layout.reorder("user", "summary");
        layout.commit_success();
        assert!(!layout.is_dirty());
        layout.toggle_visibility("summary");
        layout.discard();
        assert_eq!(keys(&layout), ["user", "summary", "event"]);
    }
}
