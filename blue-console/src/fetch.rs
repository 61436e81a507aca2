//! Async fetch tasks and completion messages
//!
//! Every server interaction runs on a spawned task and reports back to
//! the event loop over the message channel. Tasks are tied to the
//! current page's cancellation token: navigating away aborts them, so
//! a late completion can never touch state for a page that is gone.
//! Read queries additionally carry the generation token of their
//! [`QuerySlot`](crate::query::QuerySlot).

use blue_client::{BlueAdminClient, ClientError, ClientResult, EntityService, ListQuery, Page, RelationEndpoint};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::models::{AppCreate, EntityRecord, GroupCreate, ResourceCreate, ScopeCreate, UserCreate};
use shared::{EntityKind, LoginRequest, Relation, UserInfo};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::entity_view;
use crate::forms::FieldEditor;
use crate::picker::{PickerItem, PickerSide};

/// Page size used when loading picker lists
const PICKER_PAGE_SIZE: u32 = 200;

/// One fetched list page, erased for the table layer
#[derive(Debug, Clone)]
pub struct PageData {
    pub rows: Vec<entity_view::RowData>,
    pub page: u32,
    pub pages: u32,
    pub size: u32,
    pub total: u64,
}

/// One fetched detail record, as editable fields
#[derive(Clone)]
pub struct DetailData {
    pub id: i64,
    pub title: String,
    pub fields: Vec<FieldEditor>,
}

/// Completion messages delivered to the event loop
pub enum Msg {
    ListLoaded {
        kind: EntityKind,
        generation: u64,
        result: ClientResult<PageData>,
    },
    DetailLoaded {
        kind: EntityKind,
        id: i64,
        generation: u64,
        result: ClientResult<DetailData>,
    },
    PickerLoaded {
        relation: Relation,
        owner_id: i64,
        side: PickerSide,
        result: ClientResult<Vec<PickerItem>>,
    },
    CountLoaded {
        kind: EntityKind,
        generation: u64,
        result: ClientResult<u64>,
    },
    LoginDone {
        result: ClientResult<UserInfo>,
    },
    CreateDone {
        kind: EntityKind,
        result: ClientResult<i64>,
    },
    FieldSaved {
        kind: EntityKind,
        id: i64,
        field: &'static str,
        result: ClientResult<String>,
    },
    DeleteDone {
        kind: EntityKind,
        id: i64,
        result: ClientResult<()>,
    },
    LinkDone {
        relation: Relation,
        owner_id: i64,
        related_id: i64,
        adding: bool,
        result: ClientResult<()>,
    },
}

pub type MsgSender = UnboundedSender<Msg>;

/// Spawn a cancellable task; a cancelled task sends nothing
fn spawn_cancellable<F>(cancel: CancellationToken, future: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = future => {}
        }
    });
}

// ========== List and count ==========

async fn list_rows<T, F>(
    service: EntityService<T>,
    query: ListQuery,
    to_row: F,
) -> ClientResult<PageData>
where
    T: EntityRecord + DeserializeOwned,
    F: Fn(&T) -> entity_view::RowData,
{
    let page = service.list(&query).await?;
    Ok(PageData {
        rows: page.items.iter().map(to_row).collect(),
        page: page.page,
        pages: page.pages,
        size: page.size,
        total: page.total,
    })
}

async fn do_list(
    client: &BlueAdminClient,
    kind: EntityKind,
    query: ListQuery,
) -> ClientResult<PageData> {
    match kind {
        EntityKind::User => list_rows(client.users(), query, entity_view::user_row).await,
        EntityKind::Group => list_rows(client.groups(), query, entity_view::group_row).await,
        EntityKind::Scope => list_rows(client.scopes(), query, entity_view::scope_row).await,
        EntityKind::Resource => {
            list_rows(client.resources(), query, entity_view::resource_row).await
        }
        EntityKind::App => list_rows(client.apps(), query, entity_view::app_row).await,
    }
}

pub fn spawn_list(
    client: BlueAdminClient,
    kind: EntityKind,
    query: ListQuery,
    generation: u64,
    tx: MsgSender,
    cancel: CancellationToken,
) {
    spawn_cancellable(cancel, async move {
        let result = do_list(&client, kind, query).await;
        let _ = tx.send(Msg::ListLoaded {
            kind,
            generation,
            result,
        });
    });
}

pub fn spawn_count(
    client: BlueAdminClient,
    kind: EntityKind,
    generation: u64,
    tx: MsgSender,
    cancel: CancellationToken,
) {
    spawn_cancellable(cancel, async move {
        // Totals only; one row keeps the payload minimal
        let result = do_list(&client, kind, ListQuery::new(1, 1))
            .await
            .map(|page| page.total);
        let _ = tx.send(Msg::CountLoaded {
            kind,
            generation,
            result,
        });
    });
}

// ========== Detail ==========

async fn do_detail(client: &BlueAdminClient, kind: EntityKind, id: i64) -> ClientResult<DetailData> {
    let (title, fields) = match kind {
        EntityKind::User => {
            let user = client.users().get(id).await?;
            (user.display_label(), entity_view::user_fields(&user))
        }
        EntityKind::Group => {
            let group = client.groups().get(id).await?;
            (group.display_label(), entity_view::group_fields(&group))
        }
        EntityKind::Scope => {
            let scope = client.scopes().get(id).await?;
            (scope.display_label(), entity_view::scope_fields(&scope))
        }
        EntityKind::Resource => {
            let resource = client.resources().get(id).await?;
            (resource.display_label(), entity_view::resource_fields(&resource))
        }
        EntityKind::App => {
            let app = client.apps().get(id).await?;
            (app.display_label(), entity_view::app_fields(&app))
        }
    };
    Ok(DetailData { id, title, fields })
}

pub fn spawn_detail(
    client: BlueAdminClient,
    kind: EntityKind,
    id: i64,
    generation: u64,
    tx: MsgSender,
    cancel: CancellationToken,
) {
    spawn_cancellable(cancel, async move {
        let result = do_detail(&client, kind, id).await;
        let _ = tx.send(Msg::DetailLoaded {
            kind,
            id,
            generation,
            result,
        });
    });
}

// ========== Pickers ==========

async fn picker_items<R>(
    endpoint: RelationEndpoint<R>,
    owner_id: i64,
    side: PickerSide,
) -> ClientResult<Vec<PickerItem>>
where
    R: EntityRecord + DeserializeOwned,
{
    let query = ListQuery::new(1, PICKER_PAGE_SIZE);
    let page: Page<R> = match side {
        PickerSide::Available => endpoint.available(owner_id, &query).await?,
        PickerSide::Attached => endpoint.attached(owner_id, &query).await?,
    };
    Ok(page.items.iter().map(PickerItem::from_record).collect())
}

async fn do_picker(
    client: &BlueAdminClient,
    relation: Relation,
    owner_id: i64,
    side: PickerSide,
) -> ClientResult<Vec<PickerItem>> {
    use EntityKind::*;
    match (relation.owner, relation.related) {
        (User, Group) => picker_items(client.user_groups(), owner_id, side).await,
        (User, Scope) => picker_items(client.user_scopes(), owner_id, side).await,
        (Group, User) => picker_items(client.group_users(), owner_id, side).await,
        (Group, Scope) => picker_items(client.group_scopes(), owner_id, side).await,
        (Scope, User) => picker_items(client.scope_users(), owner_id, side).await,
        (Scope, Group) => picker_items(client.scope_groups(), owner_id, side).await,
        (Scope, Resource) => picker_items(client.scope_resources(), owner_id, side).await,
        (App, Group) => picker_items(client.app_groups(), owner_id, side).await,
        (App, Scope) => picker_items(client.app_scopes(), owner_id, side).await,
        (owner, related) => Err(ClientError::Validation(format!(
            "no relation between {owner} and {related}"
        ))),
    }
}

pub fn spawn_picker(
    client: BlueAdminClient,
    relation: Relation,
    owner_id: i64,
    side: PickerSide,
    tx: MsgSender,
    cancel: CancellationToken,
) {
    spawn_cancellable(cancel, async move {
        let result = do_picker(&client, relation, owner_id, side).await;
        let _ = tx.send(Msg::PickerLoaded {
            relation,
            owner_id,
            side,
            result,
        });
    });
}

// ========== Mutations ==========

pub fn spawn_login(client: BlueAdminClient, request: LoginRequest, tx: MsgSender) {
    tokio::spawn(async move {
        let result = client.auth().login(&request).await;
        let _ = tx.send(Msg::LoginDone { result });
    });
}

async fn create_validated<P, T>(
    service: EntityService<T>,
    body: serde_json::Value,
) -> ClientResult<i64>
where
    P: serde::de::DeserializeOwned + Serialize + Validate,
    T: EntityRecord + DeserializeOwned,
{
    let payload: P = serde_json::from_value(body)?;
    payload
        .validate()
        .map_err(|e| ClientError::Validation(e.to_string()))?;
    let created = service.create(&payload).await?;
    Ok(created.record_id())
}

async fn do_create(
    client: &BlueAdminClient,
    kind: EntityKind,
    body: serde_json::Value,
) -> ClientResult<i64> {
    match kind {
        EntityKind::User => create_validated::<UserCreate, _>(client.users(), body).await,
        EntityKind::Group => create_validated::<GroupCreate, _>(client.groups(), body).await,
        EntityKind::Scope => create_validated::<ScopeCreate, _>(client.scopes(), body).await,
        EntityKind::Resource => {
            create_validated::<ResourceCreate, _>(client.resources(), body).await
        }
        EntityKind::App => create_validated::<AppCreate, _>(client.apps(), body).await,
    }
}

pub fn spawn_create(
    client: BlueAdminClient,
    kind: EntityKind,
    body: serde_json::Value,
    tx: MsgSender,
) {
    tokio::spawn(async move {
        let result = do_create(&client, kind, body).await;
        let _ = tx.send(Msg::CreateDone { kind, result });
    });
}

/// Patch a single field and return its fresh display value
async fn do_field_save(
    client: &BlueAdminClient,
    kind: EntityKind,
    id: i64,
    field: &'static str,
    value: serde_json::Value,
) -> ClientResult<String> {
    let body = serde_json::json!({ field: value });
    let fields = match kind {
        EntityKind::User => {
            entity_view::user_fields(&client.users().update(id, &body).await?)
        }
        EntityKind::Group => {
            entity_view::group_fields(&client.groups().update(id, &body).await?)
        }
        EntityKind::Scope => {
            entity_view::scope_fields(&client.scopes().update(id, &body).await?)
        }
        EntityKind::Resource => {
            entity_view::resource_fields(&client.resources().update(id, &body).await?)
        }
        EntityKind::App => entity_view::app_fields(&client.apps().update(id, &body).await?),
    };
    fields
        .into_iter()
        .find(|f| f.key == field)
        .map(|f| f.value().to_string())
        .ok_or_else(|| ClientError::InvalidResponse(format!("field {field} missing from response")))
}

pub fn spawn_field_save(
    client: BlueAdminClient,
    kind: EntityKind,
    id: i64,
    field: &'static str,
    value: serde_json::Value,
    tx: MsgSender,
) {
    tokio::spawn(async move {
        let result = do_field_save(&client, kind, id, field, value).await;
        let _ = tx.send(Msg::FieldSaved {
            kind,
            id,
            field,
            result,
        });
    });
}

async fn do_delete(client: &BlueAdminClient, kind: EntityKind, id: i64) -> ClientResult<()> {
    match kind {
        EntityKind::User => client.users().delete(id).await,
        EntityKind::Group => client.groups().delete(id).await,
        EntityKind::Scope => client.scopes().delete(id).await,
        EntityKind::Resource => client.resources().delete(id).await,
        EntityKind::App => client.apps().delete(id).await,
    }
}

pub fn spawn_delete(client: BlueAdminClient, kind: EntityKind, id: i64, tx: MsgSender) {
    tokio::spawn(async move {
        let result = do_delete(&client, kind, id).await;
        let _ = tx.send(Msg::DeleteDone { kind, id, result });
    });
}

async fn link_op<R>(
    endpoint: RelationEndpoint<R>,
    related_id: i64,
    owner_id: i64,
    adding: bool,
) -> ClientResult<()>
where
    R: EntityRecord + DeserializeOwned,
{
    if adding {
        endpoint.add(related_id, owner_id).await
    } else {
        endpoint.remove(related_id, owner_id).await
    }
}

async fn do_link(
    client: &BlueAdminClient,
    relation: Relation,
    related_id: i64,
    owner_id: i64,
    adding: bool,
) -> ClientResult<()> {
    use EntityKind::*;
    match (relation.owner, relation.related) {
        (User, Group) => link_op(client.user_groups(), related_id, owner_id, adding).await,
        (User, Scope) => link_op(client.user_scopes(), related_id, owner_id, adding).await,
        (Group, User) => link_op(client.group_users(), related_id, owner_id, adding).await,
        (Group, Scope) => link_op(client.group_scopes(), related_id, owner_id, adding).await,
        (Scope, User) => link_op(client.scope_users(), related_id, owner_id, adding).await,
        (Scope, Group) => link_op(client.scope_groups(), related_id, owner_id, adding).await,
        (Scope, Resource) => {
            link_op(client.scope_resources(), related_id, owner_id, adding).await
        }
        (App, Group) => link_op(client.app_groups(), related_id, owner_id, adding).await,
        (App, Scope) => link_op(client.app_scopes(), related_id, owner_id, adding).await,
        (owner, related) => Err(ClientError::Validation(format!(
            "no relation between {owner} and {related}"
        ))),
    }
}

pub fn spawn_link(
    client: BlueAdminClient,
    relation: Relation,
    related_id: i64,
    owner_id: i64,
    adding: bool,
    tx: MsgSender,
) {
    tokio::spawn(async move {
        let result = do_link(&client, relation, related_id, owner_id, adding).await;
        let _ = tx.send(Msg::LinkDone {
            relation,
            owner_id,
            related_id,
            adding,
            result,
        });
    });
}
