//! Relationship picker
//!
//! Available/attached reconciliation for one relation. The two lists
//! come from distinct server endpoints and may arrive in either order;
//! each side renders its own loading state until it resolves. Server
//! disjointness is untrusted: the rendered available set is always
//! available minus attached ids once both lists are known.
//!
//! Mutations are not optimistic. An add/remove is reflected only after
//! the server confirms and both queries refetch; a failure leaves both
//! lists untouched. A per-id in-flight guard refuses a second add or
//! remove for an id whose first mutation has not settled.

use shared::models::EntityRecord;
use shared::Relation;
use std::collections::HashSet;

/// Which side of the picker has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerSide {
    Available,
    Attached,
}

/// Display item for either list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub id: i64,
    pub label: String,
    search_text: String,
}

impl PickerItem {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            search_text: label.to_lowercase(),
            id,
            label,
        }
    }

    pub fn from_record<R: EntityRecord>(record: &R) -> Self {
        let mut item = Self::new(record.record_id(), record.display_label());
        item.search_text = record.search_text().to_lowercase();
        item
    }

    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.label.to_lowercase().contains(needle)
            || self.search_text.contains(needle)
    }
}

/// What one side of the picker should render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerSection {
    /// Fetch still in flight (or superseded by an invalidation)
    Loading,
    /// Loaded but nothing to show, with the caller-supplied message
    Empty(String),
    Items(Vec<PickerItem>),
}

pub struct RelationPicker {
    relation: Relation,
    owner_id: i64,
    title: String,
    /// `None` while the fetch is in flight
    available: Option<Vec<PickerItem>>,
    attached: Option<Vec<PickerItem>>,
    in_flight: HashSet<i64>,
    search: String,
    focus: PickerSide,
    cursor: usize,
    empty_available_msg: String,
    empty_attached_msg: String,
}

impl RelationPicker {
    pub fn new(relation: Relation, owner_id: i64) -> Self {
        let related = relation.related.label();
        Self {
            relation,
            owner_id,
            title: format!("{related}s"),
            available: None,
            attached: None,
            in_flight: HashSet::new(),
            search: String::new(),
            focus: PickerSide::Available,
            cursor: 0,
            empty_available_msg: format!("No {related}s available"),
            empty_attached_msg: format!("No {related}s selected"),
        }
    }

    /// Override the empty-state messages shown per side
    pub fn with_empty_messages(
        mut self,
        available: impl Into<String>,
        attached: impl Into<String>,
    ) -> Self {
        self.empty_available_msg = available.into();
        self.empty_attached_msg = attached.into();
        self
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn focus(&self) -> PickerSide {
        self.focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    // ========== List state ==========

    pub fn set_available(&mut self, items: Vec<PickerItem>) {
        self.available = Some(items);
        self.clamp_cursor();
    }

    pub fn set_attached(&mut self, items: Vec<PickerItem>) {
        self.attached = Some(items);
        self.clamp_cursor();
    }

    /// Put a side back into its loading state (query invalidated)
    pub fn mark_loading(&mut self, side: PickerSide) {
        match side {
            PickerSide::Available => self.available = None,
            PickerSide::Attached => self.attached = None,
        }
    }

    pub fn is_loading(&self, side: PickerSide) -> bool {
        match side {
            PickerSide::Available => self.available.is_none(),
            PickerSide::Attached => self.attached.is_none(),
        }
    }

    /// Attached items surviving the local search
    pub fn visible_attached(&self) -> Option<Vec<PickerItem>> {
        let needle = self.search.to_lowercase();
        self.attached
            .as_ref()
            .map(|items| items.iter().filter(|i| i.matches(&needle)).cloned().collect())
    }

    /// Available items surviving the local search, minus anything
    /// already attached. The subtraction restores the disjointness
    /// invariant the server does not guarantee.
    pub fn visible_available(&self) -> Option<Vec<PickerItem>> {
        let available = self.available.as_ref()?;
        let attached_ids: HashSet<i64> = self
            .attached
            .as_ref()
            .map(|items| items.iter().map(|i| i.id).collect())
            .unwrap_or_default();
        let needle = self.search.to_lowercase();
        Some(
            available
                .iter()
                .filter(|i| !attached_ids.contains(&i.id) && i.matches(&needle))
                .cloned()
                .collect(),
        )
    }

    /// Render state for one side
    pub fn section(&self, side: PickerSide) -> PickerSection {
        let (visible, empty_msg) = match side {
            PickerSide::Available => (self.visible_available(), &self.empty_available_msg),
            PickerSide::Attached => (self.visible_attached(), &self.empty_attached_msg),
        };
        match visible {
            None => PickerSection::Loading,
            Some(items) if items.is_empty() => PickerSection::Empty(empty_msg.clone()),
            Some(items) => PickerSection::Items(items),
        }
    }

    // ========== Search (client-side only, never hits the server) ==========

    pub fn set_search(&mut self, value: impl Into<String>) {
        self.search = value.into();
        self.cursor = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.cursor = 0;
    }

    // ========== Mutation guard ==========

    /// Try to start a mutation for `id`. Returns false when a mutation
    /// for the same id is already pending - the caller must not fire a
    /// second request (double-click protection).
    pub fn begin_mutation(&mut self, id: i64) -> bool {
        self.in_flight.insert(id)
    }

    /// Settle the in-flight mutation for `id`, success or failure
    pub fn finish_mutation(&mut self, id: i64) {
        self.in_flight.remove(&id);
    }

    pub fn is_in_flight(&self, id: i64) -> bool {
        self.in_flight.contains(&id)
    }

    /// Id under the cursor on the focused side
    pub fn selected_id(&self) -> Option<i64> {
        let items = match self.section(self.focus) {
            PickerSection::Items(items) => items,
            _ => return None,
        };
        items.get(self.cursor).map(|i| i.id)
    }

    // ========== Focus and cursor ==========

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PickerSide::Available => PickerSide::Attached,
            PickerSide::Attached => PickerSide::Available,
        };
        self.cursor = 0;
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let len = match self.section(self.focus) {
            PickerSection::Items(items) => items.len(),
            _ => 0,
        };
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = match self.section(self.focus) {
            PickerSection::Items(items) => items.len(),
            _ => 0,
        };
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> RelationPicker {
        RelationPicker::new(Relation::USER_GROUPS, 1)
    }

    fn items(ids: &[(i64, &str)]) -> Vec<PickerItem> {
        ids.iter().map(|(id, l)| PickerItem::new(*id, *l)).collect()
    }

    #[test]
    fn both_sides_load_independently() {
        let mut p = picker();
        assert_eq!(p.section(PickerSide::Available), PickerSection::Loading);
        assert_eq!(p.section(PickerSide::Attached), PickerSection::Loading);

        // Attached resolves first; available must still show loading
        p.set_attached(items(&[(1, "admins")]));
        assert_eq!(p.section(PickerSide::Available), PickerSection::Loading);
        assert!(matches!(p.section(PickerSide::Attached), PickerSection::Items(_)));

        p.set_available(items(&[(2, "ops")]));
        assert!(matches!(p.section(PickerSide::Available), PickerSection::Items(_)));
    }

    #[test]
    fn available_excludes_attached_ids() {
        let mut p = picker();
        // Server returned overlapping lists; the overlap must not render
        p.set_available(items(&[(1, "admins"), (2, "ops"), (3, "dev")]));
        p.set_attached(items(&[(2, "ops")]));

        let visible = p.visible_available().unwrap();
        let ids: Vec<i64> = visible.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn search_filters_both_lists_case_insensitively() {
        let mut p = picker();
        p.set_available(items(&[(1, "Operations"), (2, "Developers")]));
        p.set_attached(items(&[(3, "Core-Ops")]));

        p.set_search("ops");
        assert_eq!(p.visible_available().unwrap().len(), 1);
        assert_eq!(p.visible_attached().unwrap().len(), 1);

        p.clear_search();
        assert_eq!(p.visible_available().unwrap().len(), 2);
    }

    #[test]
    fn empty_loaded_lists_show_messages() {
        let mut p = picker();
        p.set_available(Vec::new());
        p.set_attached(Vec::new());
        assert_eq!(
            p.section(PickerSide::Available),
            PickerSection::Empty("No Groups available".into())
        );
        assert_eq!(
            p.section(PickerSide::Attached),
            PickerSection::Empty("No Groups selected".into())
        );
    }

    #[test]
    fn in_flight_guard_blocks_double_submit() {
        let mut p = picker();
        assert!(p.begin_mutation(5));
        // Second click on the same id while the first is pending
        assert!(!p.begin_mutation(5));
        // Different ids may run concurrently
        assert!(p.begin_mutation(6));

        p.finish_mutation(5);
        assert!(p.begin_mutation(5));
    }

    #[test]
    fn add_then_remove_round_trip_membership() {
        let mut p = picker();
        p.set_available(items(&[(1, "a"), (2, "b")]));
        p.set_attached(items(&[(3, "c")]));

        // add(1) confirmed: both queries refetch
        p.set_available(items(&[(2, "b")]));
        p.set_attached(items(&[(1, "a"), (3, "c")]));
        assert!(p.visible_attached().unwrap().iter().any(|i| i.id == 1));
        assert!(!p.visible_available().unwrap().iter().any(|i| i.id == 1));

        // remove(1) confirmed
        p.set_available(items(&[(1, "a"), (2, "b")]));
        p.set_attached(items(&[(3, "c")]));
        assert!(p.visible_available().unwrap().iter().any(|i| i.id == 1));
        assert!(!p.visible_attached().unwrap().iter().any(|i| i.id == 1));
    }

    #[test]
    fn selected_id_follows_focus_and_search() {
        let mut p = picker();
        p.set_available(items(&[(1, "alpha"), (2, "beta")]));
        p.set_attached(items(&[(9, "gamma")]));

        assert_eq!(p.selected_id(), Some(1));
        p.cursor_down();
        assert_eq!(p.selected_id(), Some(2));

        p.toggle_focus();
        assert_eq!(p.focus(), PickerSide::Attached);
        assert_eq!(p.selected_id(), Some(9));
    }
}
