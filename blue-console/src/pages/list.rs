//! Entity list page state

use blue_client::ListQuery;
use shared::EntityKind;
use std::collections::BTreeMap;
use tui_input::Input;

use crate::entity_view::{self, RowData};
use crate::fetch::PageData;
use crate::forms::CreateForm;
use crate::pagination::Pager;
use crate::query::QuerySlot;
use crate::table::{TableMode, TableState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFocus {
    Rows,
    /// Typing in the global search box
    Search,
    /// Editing one per-field filter value
    Filter,
}

/// Listing screen for one entity kind: server-driven table plus pager
pub struct ListPage {
    pub kind: EntityKind,
    pub table: TableState<RowData>,
    pub pager: Pager,
    pub slot: QuerySlot<PageData>,
    /// Filters last reported by the table, sent with every fetch
    pub filters: BTreeMap<String, String>,
    pub focus: ListFocus,
    pub search: Input,
    pub filter_cursor: usize,
    pub filter_input: Input,
    /// Pending delete: id and label shown in the confirm dialog
    pub confirm_delete: Option<(i64, String)>,
    pub delete_in_flight: bool,
    pub create_form: Option<CreateForm>,
}

impl ListPage {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            table: TableState::new(
                entity_view::columns(kind),
                entity_view::filter_defs(kind),
                TableMode::Manual,
            ),
            pager: Pager::default(),
            slot: QuerySlot::new(),
            filters: BTreeMap::new(),
            focus: ListFocus::Rows,
            search: Input::default(),
            filter_cursor: 0,
            filter_input: Input::default(),
            confirm_delete: None,
            delete_in_flight: false,
            create_form: None,
        }
    }

    /// Query for the current page, size, and reported filters.
    /// `api_page` is the 1-based translation of the pager's index.
    pub fn current_query(&self) -> ListQuery {
        let mut query = ListQuery::new(self.pager.api_page(), self.pager.page_size());
        query.set_filters(self.filters.clone());
        query
    }

    /// Fold a fetched page into the table and pager
    pub fn apply_page(&mut self, data: PageData) {
        self.pager.set_total(data.total);
        self.table.set_rows(data.rows);
    }

    pub fn selected(&self) -> Option<RowData> {
        self.table.selected_row()
    }
}
