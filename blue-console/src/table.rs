//! Generic data table state
//!
//! Headless server-driven table: column definitions, sort state, a
//! debounced global search, and per-field filters. In manual mode the
//! table renders exactly the rows it is given and reports page/filter
//! changes upward; without an external pager it filters, sorts, and
//! slices client-side over the full row set.
//!
//! Filter changes are reported as a flat merged map: per-field values
//! plus the debounced search value under the reserved
//! [`GLOBAL_SEARCH_KEY`] key. Clearing one filter never disturbs the
//! others, and no stale keys survive a clear.

use blue_client::GLOBAL_SEARCH_KEY;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::debounce::Debouncer;
use crate::pagination::Pager;

/// One column: header, accessor, sortable flag
#[derive(Clone)]
pub struct Column<R> {
    pub key: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    accessor: Arc<dyn Fn(&R) -> String + Send + Sync>,
}

impl<R> Column<R> {
    pub fn new(
        key: &'static str,
        header: &'static str,
        accessor: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            header,
            sortable: false,
            accessor: Arc::new(accessor),
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn cell(&self, row: &R) -> String {
        (self.accessor)(row)
    }
}

/// Filter control kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Select(Vec<String>),
    Bool,
    Date,
}

/// One per-field filter descriptor
#[derive(Debug, Clone)]
pub struct FilterDef {
    pub field: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: &'static str,
    pub dir: SortDir,
}

/// Pagination ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// Rows are one server page; page/filter changes are reported upward
    Manual,
    /// Full row set given; the table paginates and filters locally
    Local,
}

/// What to render instead of rows; loading wins over the empty state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Loading,
    NoResults,
}

pub struct TableState<R> {
    columns: Vec<Column<R>>,
    filter_defs: Vec<FilterDef>,
    rows: Vec<R>,
    mode: TableMode,
    local_pager: Pager,
    sort: Option<Sort>,
    search_input: String,
    committed_search: String,
    debouncer: Debouncer,
    filter_values: BTreeMap<String, String>,
    cursor: usize,
    loading: bool,
}

impl<R: Clone> TableState<R> {
    pub fn new(columns: Vec<Column<R>>, filter_defs: Vec<FilterDef>, mode: TableMode) -> Self {
        Self {
            columns,
            filter_defs,
            rows: Vec::new(),
            mode,
            local_pager: Pager::default(),
            sort: None,
            search_input: String::new(),
            committed_search: String::new(),
            debouncer: Debouncer::default(),
            filter_values: BTreeMap::new(),
            cursor: 0,
            loading: false,
        }
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn filter_defs(&self) -> &[FilterDef] {
        &self.filter_defs
    }

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace the row set (a fetched page in manual mode, the full
    /// set in local mode) and clear the loading flag.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.loading = false;
        if matches!(self.mode, TableMode::Local) {
            self.local_pager.set_total(self.filtered_rows().len() as u64);
        }
        self.clamp_cursor();
    }

    // ========== Search and filters ==========

    /// Record a search keystroke; the value is reported upstream only
    /// after the debounce window elapses.
    pub fn search_keystroke(&mut self, value: impl Into<String>, now: Instant) {
        self.search_input = value.into();
        self.debouncer.input(self.search_input.clone(), now);
    }

    /// Poll the debouncer; when it fires, the merged filter map to
    /// report upstream is returned (manual mode callers refetch).
    pub fn poll_search(&mut self, now: Instant) -> Option<BTreeMap<String, String>> {
        let value = self.debouncer.poll(now)?;
        self.committed_search = value;
        self.after_filter_change();
        Some(self.merged_filters())
    }

    /// Set one per-field filter value; empty removes the key.
    /// Returns the updated merged map.
    pub fn set_filter(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> BTreeMap<String, String> {
        let field = field.into();
        let value = value.into();
        if value.is_empty() {
            self.filter_values.remove(&field);
        } else {
            self.filter_values.insert(field, value);
        }
        self.after_filter_change();
        self.merged_filters()
    }

    /// Clear one filter, leaving every other active filter untouched
    pub fn clear_filter(&mut self, field: &str) -> BTreeMap<String, String> {
        self.filter_values.remove(field);
        self.after_filter_change();
        self.merged_filters()
    }

    /// Clear the search box immediately (no debounce on clearing)
    pub fn clear_search(&mut self) -> BTreeMap<String, String> {
        self.search_input.clear();
        self.committed_search.clear();
        self.debouncer.cancel();
        self.after_filter_change();
        self.merged_filters()
    }

    /// Clear everything: search and all per-field filters
    pub fn clear_all(&mut self) -> BTreeMap<String, String> {
        self.search_input.clear();
        self.committed_search.clear();
        self.debouncer.cancel();
        self.filter_values.clear();
        self.after_filter_change();
        self.merged_filters()
    }

    /// Per-field filters plus the committed search value under the
    /// reserved key. This is exactly what goes to the API layer.
    pub fn merged_filters(&self) -> BTreeMap<String, String> {
        let mut merged = self.filter_values.clone();
        if !self.committed_search.is_empty() {
            merged.insert(GLOBAL_SEARCH_KEY.to_string(), self.committed_search.clone());
        }
        merged
    }

    pub fn filter_value(&self, field: &str) -> Option<&str> {
        self.filter_values.get(field).map(String::as_str)
    }

    pub fn has_active_filters(&self) -> bool {
        !self.filter_values.is_empty() || !self.committed_search.is_empty()
    }

    fn after_filter_change(&mut self) {
        if matches!(self.mode, TableMode::Local) {
            self.local_pager.set_total(self.filtered_rows().len() as u64);
            self.local_pager.reset();
        }
        self.cursor = 0;
    }

    // ========== Sorting ==========

    /// Toggle sort on a column: Asc, then Desc, back to Asc. Ignored
    /// for non-sortable columns.
    pub fn toggle_sort(&mut self, key: &'static str) {
        let Some(column) = self.columns.iter().find(|c| c.key == key) else {
            return;
        };
        if !column.sortable {
            return;
        }
        self.sort = Some(match self.sort {
            Some(Sort {
                key: current,
                dir: SortDir::Asc,
            }) if current == key => Sort {
                key,
                dir: SortDir::Desc,
            },
            _ => Sort {
                key,
                dir: SortDir::Asc,
            },
        });
    }

    // ========== Row pipelines ==========

    /// Rows surviving the local filter pipeline (local mode only; in
    /// manual mode the server already filtered).
    fn filtered_rows(&self) -> Vec<&R> {
        let rows: Vec<&R> = self.rows.iter().collect();
        if matches!(self.mode, TableMode::Manual) {
            return rows;
        }
        rows.into_iter()
            .filter(|row| self.matches_search(row) && self.matches_filters(row))
            .collect()
    }

    fn matches_search(&self, row: &R) -> bool {
        if self.committed_search.is_empty() {
            return true;
        }
        let needle = self.committed_search.to_lowercase();
        self.columns
            .iter()
            .any(|c| c.cell(row).to_lowercase().contains(&needle))
    }

    fn matches_filters(&self, row: &R) -> bool {
        self.filter_values.iter().all(|(field, value)| {
            match self.columns.iter().find(|c| c.key == field.as_str()) {
                Some(column) => {
                    let cell = column.cell(row).to_lowercase();
                    let wanted = value.to_lowercase();
                    match self
                        .filter_defs
                        .iter()
                        .find(|d| d.field == field.as_str())
                        .map(|d| &d.kind)
                    {
                        Some(FilterKind::Text) | None => cell.contains(&wanted),
                        // Select/Bool/Date filters match exactly
                        _ => cell == wanted,
                    }
                }
                None => true,
            }
        })
    }

    /// The rows to render: sorted, and in local mode filtered and
    /// sliced to the current local page.
    pub fn visible_rows(&self) -> Vec<R> {
        let mut rows: Vec<R> = self.filtered_rows().into_iter().cloned().collect();

        if let Some(Sort { key, dir }) = self.sort {
            if let Some(column) = self.columns.iter().find(|c| c.key == key) {
                rows.sort_by(|a, b| {
                    let ord = column.cell(a).to_lowercase().cmp(&column.cell(b).to_lowercase());
                    match dir {
                        SortDir::Asc => ord,
                        SortDir::Desc => ord.reverse(),
                    }
                });
            }
        }

        match self.mode {
            TableMode::Manual => rows,
            TableMode::Local => {
                let size = self.local_pager.page_size() as usize;
                let start = self.local_pager.page_index() * size;
                rows.into_iter().skip(start).take(size).collect()
            }
        }
    }

    /// Loading placeholder wins over the empty state; rows render only
    /// when neither applies.
    pub fn placeholder(&self) -> Option<Placeholder> {
        if self.loading {
            Some(Placeholder::Loading)
        } else if self.visible_rows().is_empty() {
            Some(Placeholder::NoResults)
        } else {
            None
        }
    }

    /// Local pager (meaningful in local mode only)
    pub fn local_pager_mut(&mut self) -> &mut Pager {
        &mut self.local_pager
    }

    pub fn local_pager(&self) -> &Pager {
        &self.local_pager
    }

    // ========== Cursor ==========

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let len = self.visible_rows().len();
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn selected_row(&self) -> Option<R> {
        self.visible_rows().into_iter().nth(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_rows().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        email: String,
        active: bool,
    }

    fn row(name: &str, email: &str, active: bool) -> Row {
        Row {
            name: name.into(),
            email: email.into(),
            active,
        }
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("name", "Name", |r: &Row| r.name.clone()).sortable(),
            Column::new("email", "Email", |r: &Row| r.email.clone()),
            Column::new("active", "Active", |r: &Row| r.active.to_string()),
        ]
    }

    fn filter_defs() -> Vec<FilterDef> {
        vec![
            FilterDef {
                field: "name",
                label: "Name",
                kind: FilterKind::Text,
            },
            FilterDef {
                field: "active",
                label: "Active",
                kind: FilterKind::Bool,
            },
        ]
    }

    fn manual_table() -> TableState<Row> {
        TableState::new(columns(), filter_defs(), TableMode::Manual)
    }

    #[test]
    fn debounced_search_emits_once_with_final_value() {
        let mut table = manual_table();
        let start = Instant::now();

        table.search_keystroke("jo", start);
        table.search_keystroke("john", start + Duration::from_millis(300));

        assert_eq!(table.poll_search(start + Duration::from_millis(500)), None);
        let emitted = table
            .poll_search(start + Duration::from_millis(801))
            .expect("debounce should fire");
        assert_eq!(emitted.get(GLOBAL_SEARCH_KEY).map(String::as_str), Some("john"));
        assert_eq!(table.poll_search(start + Duration::from_secs(2)), None);
    }

    #[test]
    fn clearing_one_filter_leaves_others_untouched() {
        let mut table = manual_table();
        table.set_filter("name", "ops");
        let map = table.set_filter("active", "true");
        assert_eq!(map.len(), 2);

        let map = table.clear_filter("name");
        assert_eq!(map.get("active").map(String::as_str), Some("true"));
        assert!(!map.contains_key("name"));
    }

    #[test]
    fn clear_search_removes_reserved_key_only() {
        let mut table = manual_table();
        table.set_filter("active", "true");
        table.search_keystroke("jo", Instant::now());
        table.poll_search(Instant::now() + Duration::from_secs(1));
        assert!(table.merged_filters().contains_key(GLOBAL_SEARCH_KEY));

        let map = table.clear_search();
        assert!(!map.contains_key(GLOBAL_SEARCH_KEY));
        assert_eq!(map.get("active").map(String::as_str), Some("true"));
    }

    #[test]
    fn clear_all_leaves_no_stale_keys() {
        let mut table = manual_table();
        table.set_filter("name", "ops");
        table.set_filter("active", "true");
        table.search_keystroke("x", Instant::now());

        let map = table.clear_all();
        assert!(map.is_empty());
        assert!(!table.has_active_filters());
        assert!(!table.debouncer.is_pending());
    }

    #[test]
    fn empty_filter_value_removes_key() {
        let mut table = manual_table();
        table.set_filter("name", "ops");
        let map = table.set_filter("name", "");
        assert!(map.is_empty());
    }

    #[test]
    fn manual_mode_renders_rows_verbatim() {
        let mut table = manual_table();
        table.set_rows(vec![row("a", "a@x", true), row("b", "b@x", false)]);
        // Manual mode never slices or filters locally; the caller
        // already fetched the page the filters describe.
        table.set_filter("active", "true");
        assert_eq!(table.visible_rows().len(), 2);
    }

    #[test]
    fn local_mode_filters_sorts_and_slices() {
        let mut table = TableState::new(columns(), filter_defs(), TableMode::Local);
        table.local_pager_mut().set_page_size(2);
        table.set_rows(vec![
            row("carol", "carol@x", true),
            row("alice", "alice@x", true),
            row("bob", "bob@x", false),
        ]);

        table.set_filter("active", "true");
        table.toggle_sort("name");
        let visible = table.visible_rows();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].name, "alice");
        assert_eq!(visible[1].name, "carol");

        table.toggle_sort("name");
        assert_eq!(table.visible_rows()[0].name, "carol");
    }

    #[test]
    fn loading_takes_precedence_over_empty() {
        let mut table = manual_table();
        table.set_loading(true);
        assert_eq!(table.placeholder(), Some(Placeholder::Loading));

        table.set_rows(Vec::new());
        assert_eq!(table.placeholder(), Some(Placeholder::NoResults));

        table.set_rows(vec![row("a", "a@x", true)]);
        assert_eq!(table.placeholder(), None);
    }

    #[test]
    fn sort_ignored_for_unsortable_columns() {
        let mut table = manual_table();
        table.toggle_sort("email");
        assert_eq!(table.sort(), None);
        table.toggle_sort("name");
        assert_eq!(
            table.sort(),
            Some(Sort {
                key: "name",
                dir: SortDir::Asc
            })
        );
    }
}
