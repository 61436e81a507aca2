//! Dashboard page state

use shared::EntityKind;

use crate::query::QuerySlot;

/// Entity counts, one query slot per kind
pub struct DashboardPage {
    pub counts: Vec<(EntityKind, QuerySlot<u64>)>,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            counts: EntityKind::ALL
                .into_iter()
                .map(|kind| (kind, QuerySlot::new()))
                .collect(),
        }
    }

    pub fn slot_mut(&mut self, kind: EntityKind) -> Option<&mut QuerySlot<u64>> {
        self.counts
            .iter_mut()
            .find(|(k, _)| *k == kind)
            .map(|(_, slot)| slot)
    }
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}
