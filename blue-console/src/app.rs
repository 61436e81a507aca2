//! Application state and event handling
//!
//! Single-threaded event loop state: terminal input and fetch
//! completions both arrive as events; all data fetching is async and
//! keyed per query slot so the UI stays responsive while requests are
//! in flight. Navigation swaps the page state and cancels the previous
//! page's tasks, so late completions never touch a page that is gone.

use blue_client::{BlueAdminClient, ClientError};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use shared::EntityKind;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::fetch::{self, Msg, MsgSender};
use crate::notify::ToastStack;
use crate::pages::{DashboardPage, DetailFocus, DetailPage, ListFocus, ListPage, LoginPage};
use crate::picker::PickerSide;
use crate::route::Route;

/// Page sizes cycled by the size key
const PAGE_SIZES: [u32; 3] = [10, 25, 50];

pub struct App {
    client: BlueAdminClient,
    tx: MsgSender,
    /// Scope of the current page's fetches; recreated on navigation
    cancel: CancellationToken,
    pub route: Route,
    pub login: LoginPage,
    pub dashboard: DashboardPage,
    pub list: Option<ListPage>,
    pub detail: Option<DetailPage>,
    pub toasts: ToastStack,
    pub goto: Option<Input>,
    pub picker_search_active: bool,
    pub show_logs: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(client: BlueAdminClient, tx: MsgSender) -> Self {
        let authenticated = client.session().is_authenticated();
        let mut app = Self {
            client,
            tx,
            cancel: CancellationToken::new(),
            route: Route::Login,
            login: LoginPage::new(),
            dashboard: DashboardPage::new(),
            list: None,
            detail: None,
            toasts: ToastStack::new(),
            goto: None,
            picker_search_active: false,
            show_logs: false,
            should_quit: false,
        };
        app.navigate(if authenticated {
            Route::Dashboard
        } else {
            Route::Login
        });
        app
    }

    pub fn client(&self) -> &BlueAdminClient {
        &self.client
    }

    // ========== Navigation ==========

    pub fn navigate(&mut self, route: Route) {
        if route.requires_auth() && !self.client.session().is_authenticated() {
            tracing::info!("unauthenticated visit to {route}, redirecting to login");
            self.route = Route::Login;
            self.login = LoginPage::new();
            return;
        }

        // Abort the previous page's in-flight fetches
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.goto = None;
        self.picker_search_active = false;
        self.list = None;
        self.detail = None;
        self.route = route;

        match route {
            Route::Login => {
                self.login = LoginPage::new();
            }
            Route::Dashboard => {
                self.dashboard = DashboardPage::new();
                for kind in EntityKind::ALL {
                    self.refetch_count(kind);
                }
            }
            Route::EntityList(kind) => {
                self.list = Some(ListPage::new(kind));
                self.refetch_list();
            }
            Route::EntityDetail(kind, id) => {
                let page = DetailPage::new(kind, id);
                let picker_count = page.pickers.len();
                self.detail = Some(page);
                self.refetch_detail();
                for index in 0..picker_count {
                    self.refetch_picker(index, PickerSide::Available);
                    self.refetch_picker(index, PickerSide::Attached);
                }
            }
            Route::NotFound => {}
        }
    }

    fn back(&mut self) {
        let target = match self.route {
            Route::EntityDetail(kind, _) => Route::EntityList(kind),
            Route::Login => return,
            _ => Route::Dashboard,
        };
        self.navigate(target);
    }

    fn logout(&mut self) {
        self.client.auth().logout();
        self.toasts.info("Signed out");
        self.navigate(Route::Login);
    }

    // ========== Fetch triggers ==========

    fn refetch_list(&mut self) {
        let Some(list) = &mut self.list else { return };
        let generation = list.slot.begin_fetch();
        list.table.set_loading(true);
        let (kind, query) = (list.kind, list.current_query());
        fetch::spawn_list(
            self.client.clone(),
            kind,
            query,
            generation,
            self.tx.clone(),
            self.cancel.clone(),
        );
    }

    fn refetch_detail(&mut self) {
        let Some(detail) = &mut self.detail else { return };
        let generation = detail.slot.begin_fetch();
        let (kind, id) = (detail.kind, detail.id);
        fetch::spawn_detail(
            self.client.clone(),
            kind,
            id,
            generation,
            self.tx.clone(),
            self.cancel.clone(),
        );
    }

    fn refetch_picker(&mut self, index: usize, side: PickerSide) {
        let Some(detail) = &mut self.detail else { return };
        let Some(picker) = detail.picker_mut(index) else { return };
        picker.mark_loading(side);
        let (relation, owner_id) = (picker.relation(), picker.owner_id());
        fetch::spawn_picker(
            self.client.clone(),
            relation,
            owner_id,
            side,
            self.tx.clone(),
            self.cancel.clone(),
        );
    }

    /// Refetch both sides of a relation so an attach/detach moves the
    /// item across atomically from the UI's perspective.
    fn refetch_relation(&mut self, relation: shared::Relation, owner_id: i64) {
        let Some(detail) = &self.detail else { return };
        let Some(index) = detail
            .pickers
            .iter()
            .position(|p| p.relation() == relation && p.owner_id() == owner_id)
        else {
            return;
        };
        self.refetch_picker(index, PickerSide::Available);
        self.refetch_picker(index, PickerSide::Attached);
    }

    fn refetch_count(&mut self, kind: EntityKind) {
        let Some(slot) = self.dashboard.slot_mut(kind) else { return };
        let generation = slot.begin_fetch();
        fetch::spawn_count(
            self.client.clone(),
            kind,
            generation,
            self.tx.clone(),
            self.cancel.clone(),
        );
    }

    // ========== Error policy ==========

    /// Every failed query or mutation produces a toast; a 401 from
    /// anywhere additionally tears the session down and redirects.
    fn report_error(&mut self, err: &ClientError) {
        if err.is_session_expired() {
            self.toasts.error("Session expired, please log in again");
            self.navigate(Route::Login);
        } else {
            self.toasts.error(err.to_string());
        }
    }

    // ========== Completion handling ==========

    pub fn handle_msg(&mut self, msg: Msg) {
        match msg {
            Msg::ListLoaded {
                kind,
                generation,
                result,
            } => {
                let Some(list) = &mut self.list else { return };
                if list.kind != kind {
                    return;
                }
                match result {
                    Ok(data) => {
                        if list.slot.resolve(generation, Ok(data.clone())) {
                            list.apply_page(data);
                        }
                    }
                    Err(err) => {
                        // A superseded fetch's failure must not toast over
                        // the page that replaced it.
                        if list.slot.resolve(generation, Err(err.to_string())) {
                            list.table.set_loading(false);
                            self.report_error(&err);
                        }
                    }
                }
            }
            Msg::DetailLoaded {
                kind,
                id,
                generation,
                result,
            } => {
                let Some(detail) = &mut self.detail else { return };
                if detail.kind != kind || detail.id != id {
                    return;
                }
                match result {
                    Ok(data) => {
                        if detail.slot.resolve(generation, Ok(data.clone())) {
                            detail.apply_detail(data);
                        }
                    }
                    Err(err) => {
                        if detail.slot.resolve(generation, Err(err.to_string())) {
                            self.report_error(&err);
                        }
                    }
                }
            }
            Msg::PickerLoaded {
                relation,
                owner_id,
                side,
                result,
            } => {
                let Some(detail) = &mut self.detail else { return };
                let Some(picker) = detail
                    .pickers
                    .iter_mut()
                    .find(|p| p.relation() == relation && p.owner_id() == owner_id)
                else {
                    return;
                };
                match result {
                    Ok(items) => match side {
                        PickerSide::Available => picker.set_available(items),
                        PickerSide::Attached => picker.set_attached(items),
                    },
                    Err(err) => {
                        // Render the empty state rather than crash the panel
                        match side {
                            PickerSide::Available => picker.set_available(Vec::new()),
                            PickerSide::Attached => picker.set_attached(Vec::new()),
                        }
                        self.report_error(&err);
                    }
                }
            }
            Msg::CountLoaded {
                kind,
                generation,
                result,
            } => {
                let result = result.map_err(|e| e.to_string());
                let failed = result.as_ref().err().cloned();
                if let Some(slot) = self.dashboard.slot_mut(kind) {
                    slot.resolve(generation, result);
                }
                if let Some(message) = failed {
                    self.toasts.error(message);
                }
            }
            Msg::LoginDone { result } => {
                self.login.in_flight = false;
                match result {
                    Ok(user) => {
                        self.toasts.success(format!("Welcome, {}", user.display_name()));
                        self.navigate(Route::Dashboard);
                    }
                    Err(err) => {
                        self.login.error = Some(match err {
                            ClientError::Api { detail, .. } => detail,
                            other => other.to_string(),
                        });
                    }
                }
            }
            Msg::CreateDone { kind, result } => {
                match result {
                    Ok(id) => {
                        self.toasts.success(format!("{} created", kind.label()));
                        if let Some(list) = &mut self.list {
                            list.create_form = None;
                            list.slot.invalidate();
                        }
                        tracing::debug!("created {kind} id {id}");
                    }
                    Err(err) => {
                        if let Some(list) = &mut self.list {
                            if let Some(form) = &mut list.create_form {
                                form.submitting = false;
                            }
                        }
                        self.report_error(&err);
                    }
                }
            }
            Msg::FieldSaved {
                kind,
                id,
                field,
                result,
            } => {
                let Some(detail) = &mut self.detail else { return };
                if detail.kind != kind || detail.id != id {
                    return;
                }
                match result {
                    Ok(value) => {
                        if let Some(editor) = detail.field_mut(field) {
                            editor.save_ok(value);
                        }
                        self.toasts.success("Saved");
                    }
                    Err(err) => {
                        let message = err.to_string();
                        if let Some(editor) = detail.field_mut(field) {
                            editor.save_err(message);
                        }
                        self.report_error(&err);
                    }
                }
            }
            Msg::DeleteDone { kind, id, result } => {
                let Some(list) = &mut self.list else { return };
                list.delete_in_flight = false;
                match result {
                    Ok(()) => {
                        list.confirm_delete = None;
                        list.slot.invalidate();
                        self.toasts.success(format!("{} {id} deleted", kind.label()));
                    }
                    // Failed delete keeps the dialog open
                    Err(err) => self.report_error(&err),
                }
            }
            Msg::LinkDone {
                relation,
                owner_id,
                related_id,
                adding,
                result,
            } => {
                if let Some(detail) = &mut self.detail {
                    if let Some(picker) = detail
                        .pickers
                        .iter_mut()
                        .find(|p| p.relation() == relation && p.owner_id() == owner_id)
                    {
                        picker.finish_mutation(related_id);
                    }
                }
                match result {
                    Ok(()) => {
                        // Only now do the lists move: both queries
                        // refetch, no optimistic mutation beforehand.
                        self.refetch_relation(relation, owner_id);
                        let verb = if adding { "attached" } else { "detached" };
                        self.toasts.success(format!(
                            "{} {verb}",
                            relation.related.label()
                        ));
                    }
                    // Failure leaves both lists exactly as they were
                    Err(err) => self.report_error(&err),
                }
            }
        }
    }

    // ========== Tick ==========

    pub fn on_tick(&mut self, now: Instant) {
        self.toasts.prune(now);

        // Debounced search: at most one upstream emission per quiet
        // window, carrying the final keystroke's value.
        let mut search_fired = false;
        if let Some(list) = &mut self.list {
            if let Some(filters) = list.table.poll_search(now) {
                list.filters = filters;
                list.pager.reset();
                search_fired = true;
            }
        }
        if search_fired {
            self.refetch_list();
        }

        // Stale slots (invalidated by mutations) refetch on observation
        if self.list.as_ref().is_some_and(|l| l.slot.needs_fetch()) {
            self.refetch_list();
        }
        if self.detail.as_ref().is_some_and(|d| d.slot.needs_fetch()) {
            self.refetch_detail();
        }
    }

    // ========== Input ==========

    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = &event {
            if key.kind == KeyEventKind::Press {
                let key = *key;
                self.handle_key(key, event);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, raw: Event) {
        // The goto box captures everything while open
        if self.goto.is_some() {
            self.handle_goto_key(key, &raw);
            return;
        }

        match self.route {
            Route::Login => self.handle_login_key(key, &raw),
            Route::Dashboard | Route::NotFound => self.handle_global_key(key),
            Route::EntityList(_) => self.handle_list_key(key, &raw),
            Route::EntityDetail(..) => self.handle_detail_key(key, &raw),
        }
    }

    /// Keys available whenever no text input has focus
    fn handle_global_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('g') => self.goto = Some(Input::default()),
            KeyCode::Char('L') => self.show_logs = !self.show_logs,
            KeyCode::Char('o') if key.modifiers.contains(KeyModifiers::CONTROL) => self.logout(),
            KeyCode::Char('r') => {
                if matches!(self.route, Route::Dashboard) {
                    for kind in EntityKind::ALL {
                        self.refetch_count(kind);
                    }
                }
            }
            KeyCode::Char('1') => self.navigate(Route::EntityList(EntityKind::User)),
            KeyCode::Char('2') => self.navigate(Route::EntityList(EntityKind::Group)),
            KeyCode::Char('3') => self.navigate(Route::EntityList(EntityKind::Scope)),
            KeyCode::Char('4') => self.navigate(Route::EntityList(EntityKind::Resource)),
            KeyCode::Char('5') => self.navigate(Route::EntityList(EntityKind::App)),
            KeyCode::Char('h') => self.navigate(Route::Dashboard),
            KeyCode::Esc => self.back(),
            _ => {}
        }
    }

    fn handle_goto_key(&mut self, key: KeyEvent, raw: &Event) {
        match key.code {
            KeyCode::Esc => self.goto = None,
            KeyCode::Enter => {
                let path = self.goto.take().map(|i| i.value().to_string()).unwrap_or_default();
                let route = Route::parse(&path);
                if route == Route::NotFound {
                    self.toasts.error(format!("No such page: {path}"));
                }
                self.navigate(route);
            }
            _ => {
                if let Some(input) = &mut self.goto {
                    input.handle_event(raw);
                }
            }
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent, raw: &Event) {
        if self.login.in_flight {
            return;
        }
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => self.login.toggle_focus(),
            KeyCode::Enter => {
                match self.login.to_request() {
                    Some(request) => {
                        self.login.error = None;
                        self.login.in_flight = true;
                        fetch::spawn_login(self.client.clone(), request, self.tx.clone());
                    }
                    None => {
                        self.login.error = Some("Username and password are required".into());
                    }
                }
            }
            KeyCode::Esc => self.should_quit = true,
            _ => {
                match self.login.focus {
                    crate::pages::LoginFocus::Username => self.login.username.handle_event(raw),
                    crate::pages::LoginFocus::Password => self.login.password.handle_event(raw),
                };
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent, raw: &Event) {
        let Some(list) = &mut self.list else { return };

        // Modal layers first: create form, then confirm dialog
        if list.create_form.is_some() {
            self.handle_create_form_key(key);
            return;
        }
        if list.confirm_delete.is_some() {
            self.handle_confirm_key(key);
            return;
        }

        match list.focus {
            ListFocus::Search => match key.code {
                KeyCode::Esc | KeyCode::Enter => list.focus = ListFocus::Rows,
                _ => {
                    list.search.handle_event(raw);
                    let value = list.search.value().to_string();
                    list.table.search_keystroke(value, Instant::now());
                }
            },
            ListFocus::Filter => match key.code {
                KeyCode::Esc => list.focus = ListFocus::Rows,
                KeyCode::Tab => {
                    let count = list.table.filter_defs().len();
                    if count > 0 {
                        list.filter_cursor = (list.filter_cursor + 1) % count;
                        list.filter_input = Input::default();
                    }
                }
                KeyCode::Enter => {
                    let Some(def) = list.table.filter_defs().get(list.filter_cursor) else {
                        return;
                    };
                    let field = def.field;
                    let value = list.filter_input.value().to_string();
                    list.filters = list.table.set_filter(field, value);
                    list.focus = ListFocus::Rows;
                    list.pager.reset();
                    self.refetch_list();
                }
                _ => {
                    list.filter_input.handle_event(raw);
                }
            },
            ListFocus::Rows => match key.code {
                KeyCode::Up | KeyCode::Char('k') => list.table.cursor_up(),
                KeyCode::Down | KeyCode::Char('j') => list.table.cursor_down(),
                KeyCode::Enter => {
                    if let Some(row) = list.selected() {
                        let kind = list.kind;
                        self.navigate(Route::EntityDetail(kind, row.id));
                    }
                }
                KeyCode::Char('/') => {
                    list.focus = ListFocus::Search;
                }
                KeyCode::Char('f') => {
                    if !list.table.filter_defs().is_empty() {
                        list.focus = ListFocus::Filter;
                        list.filter_input = Input::default();
                    }
                }
                KeyCode::Char('c') => {
                    list.filters = list.table.clear_all();
                    list.search = Input::default();
                    list.pager.reset();
                    self.refetch_list();
                }
                KeyCode::Char('C') => {
                    list.filters = list.table.clear_search();
                    list.search = Input::default();
                    list.pager.reset();
                    self.refetch_list();
                }
                KeyCode::Left | KeyCode::Char('[') => {
                    if list.pager.prev() {
                        self.refetch_list();
                    }
                }
                KeyCode::Right | KeyCode::Char(']') => {
                    if list.pager.next() {
                        self.refetch_list();
                    }
                }
                KeyCode::Char('s') => {
                    let current = list.pager.page_size();
                    let next = PAGE_SIZES
                        .iter()
                        .cycle()
                        .skip_while(|&&s| s != current)
                        .nth(1)
                        .copied()
                        .unwrap_or(PAGE_SIZES[0]);
                    // Size change resets to page 1, exactly one refetch
                    if list.pager.set_page_size(next) {
                        self.refetch_list();
                    }
                }
                KeyCode::Char('S') => {
                    if let Some(column) = list
                        .table
                        .columns()
                        .iter()
                        .find(|c| c.sortable)
                        .map(|c| c.key)
                    {
                        list.table.toggle_sort(column);
                    }
                }
                KeyCode::Char('n') => {
                    list.create_form = Some(crate::entity_view::create_form(list.kind));
                }
                KeyCode::Char('d') | KeyCode::Delete => {
                    if let Some(row) = list.selected() {
                        list.confirm_delete = Some((row.id, row.label.clone()));
                    }
                }
                _ => self.handle_global_key(key),
            },
        }
    }

    fn handle_create_form_key(&mut self, key: KeyEvent) {
        let Some(list) = &mut self.list else { return };
        let Some(form) = &mut list.create_form else { return };
        if form.submitting {
            return;
        }
        match key.code {
            KeyCode::Esc => list.create_form = None,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Enter => {
                if form.validate() {
                    form.submitting = true;
                    let (kind, body) = (list.kind, form.to_json());
                    fetch::spawn_create(self.client.clone(), kind, body, self.tx.clone());
                }
            }
            KeyCode::Char(' ') => {
                if let Some(field) = form.current_mut() {
                    if matches!(field.kind, crate::forms::FieldKind::Bool) {
                        field.value = if field.value == "true" { "false" } else { "true" }.into();
                        return;
                    }
                    field.value.push(' ');
                }
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(field) = form.current_mut() {
                    if let crate::forms::FieldKind::Select(options) = &field.kind {
                        let len = options.len();
                        if len == 0 {
                            return;
                        }
                        let current = options.iter().position(|o| *o == field.value).unwrap_or(0);
                        let next = match key.code {
                            KeyCode::Right => (current + 1) % len,
                            _ => (current + len - 1) % len,
                        };
                        field.value = options[next].clone();
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = form.current_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = form.current_mut() {
                    if !matches!(
                        field.kind,
                        crate::forms::FieldKind::Bool | crate::forms::FieldKind::Select(_)
                    ) {
                        field.value.push(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Some(list) = &mut self.list else { return };
        if list.delete_in_flight {
            return;
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some((id, _)) = list.confirm_delete {
                    list.delete_in_flight = true;
                    let kind = list.kind;
                    fetch::spawn_delete(self.client.clone(), kind, id, self.tx.clone());
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => list.confirm_delete = None,
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent, raw: &Event) {
        let Some(detail) = &mut self.detail else { return };

        // A field being edited captures input until commit or escape
        if detail.is_editing() {
            match key.code {
                KeyCode::Esc => {
                    if let Some(field) = detail.current_field_mut() {
                        field.cancel();
                    }
                }
                KeyCode::Enter => {
                    let draft = detail.edit_input.value().to_string();
                    let (kind, id) = (detail.kind, detail.id);
                    let Some(field) = detail.current_field_mut() else { return };
                    field.set_draft(draft);
                    if let Some(value) = field.commit() {
                        let json = field.to_json_value(&value);
                        fetch::spawn_field_save(
                            self.client.clone(),
                            kind,
                            id,
                            field.key,
                            json,
                            self.tx.clone(),
                        );
                    }
                }
                _ => {
                    detail.edit_input.handle_event(raw);
                }
            }
            return;
        }

        // Picker search capture
        if self.picker_search_active {
            if let DetailFocus::Picker(index) = detail.focus {
                match key.code {
                    KeyCode::Esc => {
                        if let Some(picker) = detail.picker_mut(index) {
                            picker.clear_search();
                        }
                        self.picker_search_active = false;
                    }
                    KeyCode::Enter => self.picker_search_active = false,
                    KeyCode::Backspace => {
                        if let Some(picker) = detail.picker_mut(index) {
                            let mut value = picker.search().to_string();
                            value.pop();
                            picker.set_search(value);
                        }
                    }
                    KeyCode::Char(c) => {
                        if let Some(picker) = detail.picker_mut(index) {
                            let value = format!("{}{c}", picker.search());
                            picker.set_search(value);
                        }
                    }
                    _ => {}
                }
            } else {
                self.picker_search_active = false;
            }
            return;
        }

        match detail.focus {
            DetailFocus::Fields => match key.code {
                KeyCode::Tab => detail.next_focus(),
                KeyCode::Up | KeyCode::Char('k') => {
                    detail.field_cursor = detail.field_cursor.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if detail.field_cursor + 1 < detail.fields.len() {
                        detail.field_cursor += 1;
                    }
                }
                KeyCode::Enter => {
                    let Some(field) = detail.current_field_mut() else { return };
                    if field.begin_edit() {
                        let draft = field.draft().to_string();
                        detail.edit_input = Input::new(draft);
                    }
                }
                _ => self.handle_global_key(key),
            },
            DetailFocus::Picker(index) => match key.code {
                KeyCode::Tab => detail.next_focus(),
                KeyCode::Left | KeyCode::Right => {
                    if let Some(picker) = detail.picker_mut(index) {
                        picker.toggle_focus();
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    if let Some(picker) = detail.picker_mut(index) {
                        picker.cursor_up();
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if let Some(picker) = detail.picker_mut(index) {
                        picker.cursor_down();
                    }
                }
                KeyCode::Char('/') => self.picker_search_active = true,
                KeyCode::Enter => {
                    let Some(picker) = detail.picker_mut(index) else { return };
                    let Some(id) = picker.selected_id() else { return };
                    // In-flight guard: a second press on the same id
                    // before the first settles is dropped.
                    if !picker.begin_mutation(id) {
                        return;
                    }
                    let adding = picker.focus() == PickerSide::Available;
                    let (relation, owner_id) = (picker.relation(), picker.owner_id());
                    fetch::spawn_link(
                        self.client.clone(),
                        relation,
                        id,
                        owner_id,
                        adding,
                        self.tx.clone(),
                    );
                }
                _ => self.handle_global_key(key),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blue_client::ClientConfig;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let config = ClientConfig::new("http://127.0.0.1:9").without_persistence();
        let client = BlueAdminClient::new(&config).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(client, tx)
    }

    #[test]
    fn session_expiry_redirects_to_login() {
        let mut app = test_app();
        app.route = Route::Dashboard;

        app.report_error(&ClientError::SessionExpired);

        assert_eq!(app.route, Route::Login);
        assert!(!app.toasts.is_empty());
    }

    #[test]
    fn plain_errors_toast_without_redirect() {
        let mut app = test_app();
        app.route = Route::Dashboard;

        app.report_error(&ClientError::Timeout);

        assert_eq!(app.route, Route::Dashboard);
        assert!(!app.toasts.is_empty());
    }

    #[test]
    fn superseded_list_failure_is_discarded() {
        let mut app = test_app();
        let mut page = ListPage::new(EntityKind::User);
        let stale = page.slot.begin_fetch();
        let fresh = page.slot.begin_fetch();
        page.table.set_loading(true);
        app.list = Some(page);

        // The stale fetch fails after a newer one started: no toast,
        // and the table keeps waiting on the newer fetch.
        app.handle_msg(Msg::ListLoaded {
            kind: EntityKind::User,
            generation: stale,
            result: Err(ClientError::Timeout),
        });
        let list = app.list.as_ref().unwrap();
        assert!(list.table.is_loading());
        assert!(list.slot.is_loading());
        assert!(app.toasts.is_empty());

        // The current fetch's failure still lands normally
        app.handle_msg(Msg::ListLoaded {
            kind: EntityKind::User,
            generation: fresh,
            result: Err(ClientError::Timeout),
        });
        let list = app.list.as_ref().unwrap();
        assert!(!list.table.is_loading());
        assert!(!app.toasts.is_empty());
    }
}
