//! Query slots
//!
//! Minimal stale-while-refetch bookkeeping for one async read query.
//! Each fetch gets a generation number; a completion carrying an old
//! generation is discarded, so results arriving after a navigation or
//! a newer fetch never clobber state. `invalidate()` marks the slot
//! stale after a mutation; the owner refetches when it next observes
//! staleness, and until then the previous data keeps rendering
//! (transiently stale reads are accepted).

/// Lifecycle of one query's data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct QuerySlot<T> {
    state: QueryState<T>,
    generation: u64,
    stale: bool,
}

impl<T> QuerySlot<T> {
    pub fn new() -> Self {
        Self {
            state: QueryState::Idle,
            generation: 0,
            stale: false,
        }
    }

    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }

    /// Last known data, kept visible while a refetch is in flight
    pub fn data(&self) -> Option<&T> {
        match &self.state {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, QueryState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            QueryState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Start a fetch: bumps the generation (superseding any in-flight
    /// completion) and returns the token the completion must echo.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.stale = false;
        self.state = QueryState::Loading;
        self.generation
    }

    /// Apply a completion. Discarded unless `generation` matches the
    /// latest `begin_fetch`.
    pub fn resolve(&mut self, generation: u64, result: Result<T, String>) -> bool {
        if generation != self.generation {
            tracing::debug!("discarding superseded query completion");
            return false;
        }
        self.state = match result {
            Ok(data) => QueryState::Ready(data),
            Err(msg) => QueryState::Failed(msg),
        };
        true
    }

    /// Mark stale after a mutation touched what this query reads
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// True when the owner should kick off a (re)fetch
    pub fn needs_fetch(&self) -> bool {
        self.stale || matches!(self.state, QueryState::Idle)
    }
}

impl<T> Default for QuerySlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_resolve_cycle() {
        let mut slot: QuerySlot<u32> = QuerySlot::new();
        assert!(slot.needs_fetch());

        let generation = slot.begin_fetch();
        assert!(slot.is_loading());
        assert!(!slot.needs_fetch());

        assert!(slot.resolve(generation, Ok(7)));
        assert_eq!(slot.data(), Some(&7));
    }

    #[test]
    fn superseded_completion_is_discarded() {
        let mut slot: QuerySlot<u32> = QuerySlot::new();
        let old = slot.begin_fetch();
        let new = slot.begin_fetch();

        // The old fetch resolves after the new one started
        assert!(!slot.resolve(old, Ok(1)));
        assert!(slot.is_loading());

        assert!(slot.resolve(new, Ok(2)));
        assert_eq!(slot.data(), Some(&2));
    }

    #[test]
    fn invalidate_marks_for_refetch_without_dropping_data() {
        let mut slot: QuerySlot<u32> = QuerySlot::new();
        let generation = slot.begin_fetch();
        slot.resolve(generation, Ok(5));

        slot.invalidate();
        assert!(slot.needs_fetch());
        // Stale data keeps rendering until the refetch lands
        assert_eq!(slot.data(), Some(&5));
    }

    #[test]
    fn failure_is_recorded() {
        let mut slot: QuerySlot<u32> = QuerySlot::new();
        let generation = slot.begin_fetch();
        slot.resolve(generation, Err("boom".into()));
        assert_eq!(slot.error(), Some("boom"));
        assert_eq!(slot.data(), None);
    }
}
