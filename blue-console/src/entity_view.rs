//! Per-entity view descriptors
//!
//! Columns, filter descriptors, detail fields, create-form templates,
//! and relationship panels for each of the five entity kinds. The rest
//! of the console works against the erased [`RowData`] shape; this
//! module is the only place that knows which fields each entity shows.

use chrono::{DateTime, Utc};
use shared::models::{App, EntityRecord, Group, HttpMethod, Resource, Scope, User};
use shared::{EntityKind, Relation};

use crate::forms::{CreateForm, FieldEditor, FieldKind, FormField};
use crate::table::{Column, FilterDef, FilterKind};

/// One display row, erased from the typed entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowData {
    pub id: i64,
    pub label: String,
    pub cells: Vec<String>,
}

fn cell_column(index: usize, key: &'static str, header: &'static str) -> Column<RowData> {
    Column::new(key, header, move |row: &RowData| {
        row.cells.get(index).cloned().unwrap_or_default()
    })
}

fn fmt_ts(ts: &Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn flag(value: bool) -> String {
    if value { "yes".into() } else { "no".into() }
}

/// Table columns for a kind; order matches the cells built by `*_row`
pub fn columns(kind: EntityKind) -> Vec<Column<RowData>> {
    match kind {
        EntityKind::User => vec![
            cell_column(0, "id", "ID").sortable(),
            cell_column(1, "username", "Username").sortable(),
            cell_column(2, "email", "Email").sortable(),
            cell_column(3, "name", "Name"),
            cell_column(4, "disabled", "Disabled"),
            cell_column(5, "date_registered", "Registered").sortable(),
        ],
        EntityKind::Group => vec![
            cell_column(0, "id", "ID").sortable(),
            cell_column(1, "name", "Name").sortable(),
            cell_column(2, "description", "Description"),
            cell_column(3, "active", "Active"),
        ],
        EntityKind::Scope => vec![
            cell_column(0, "id", "ID").sortable(),
            cell_column(1, "name", "Name").sortable(),
            cell_column(2, "description", "Description"),
            cell_column(3, "active", "Active"),
        ],
        EntityKind::Resource => vec![
            cell_column(0, "id", "ID").sortable(),
            cell_column(1, "name", "Name").sortable(),
            cell_column(2, "method", "Method").sortable(),
            cell_column(3, "route_path", "Route"),
            cell_column(4, "description", "Description"),
        ],
        EntityKind::App => vec![
            cell_column(0, "id", "ID").sortable(),
            cell_column(1, "name", "Name").sortable(),
            cell_column(2, "description", "Description"),
            cell_column(3, "active", "Active"),
        ],
    }
}

/// Server-side filter descriptors per kind
pub fn filter_defs(kind: EntityKind) -> Vec<FilterDef> {
    let active = FilterDef {
        field: "active",
        label: "Active",
        kind: FilterKind::Bool,
    };
    let name = FilterDef {
        field: "name",
        label: "Name",
        kind: FilterKind::Text,
    };
    match kind {
        EntityKind::User => vec![
            FilterDef {
                field: "username",
                label: "Username",
                kind: FilterKind::Text,
            },
            FilterDef {
                field: "email",
                label: "Email",
                kind: FilterKind::Text,
            },
            FilterDef {
                field: "disabled",
                label: "Disabled",
                kind: FilterKind::Bool,
            },
        ],
        EntityKind::Group | EntityKind::Scope | EntityKind::App => vec![name, active],
        EntityKind::Resource => vec![
            name,
            FilterDef {
                field: "method",
                label: "Method",
                kind: FilterKind::Select(
                    HttpMethod::ALL.iter().map(|m| m.to_string()).collect(),
                ),
            },
        ],
    }
}

// ========== Row conversions ==========

pub fn user_row(user: &User) -> RowData {
    RowData {
        id: user.id,
        label: user.display_label(),
        cells: vec![
            user.id.to_string(),
            user.username.clone(),
            user.email.clone(),
            format!("{} {}", user.first_name, user.last_name).trim().to_string(),
            flag(user.disabled),
            fmt_ts(&user.date_registered),
        ],
    }
}

pub fn group_row(group: &Group) -> RowData {
    RowData {
        id: group.id,
        label: group.display_label(),
        cells: vec![
            group.id.to_string(),
            group.name.clone(),
            group.description.clone(),
            flag(group.active),
        ],
    }
}

pub fn scope_row(scope: &Scope) -> RowData {
    RowData {
        id: scope.id,
        label: scope.display_label(),
        cells: vec![
            scope.id.to_string(),
            scope.name.clone(),
            scope.description.clone(),
            flag(scope.active),
        ],
    }
}

pub fn resource_row(resource: &Resource) -> RowData {
    RowData {
        id: resource.id,
        label: resource.display_label(),
        cells: vec![
            resource.id.to_string(),
            resource.name.clone(),
            resource.method.to_string(),
            resource.route_path.clone(),
            resource.description.clone(),
        ],
    }
}

pub fn app_row(app: &App) -> RowData {
    RowData {
        id: app.id,
        label: app.display_label(),
        cells: vec![
            app.id.to_string(),
            app.name.clone(),
            app.description.clone(),
            flag(app.active),
        ],
    }
}

// ========== Detail fields ==========

fn id_field(id: i64) -> FieldEditor {
    FieldEditor::new("id", "ID", FieldKind::Text, id.to_string()).read_only()
}

fn audit_fields(created: &Option<DateTime<Utc>>, updated: &Option<DateTime<Utc>>) -> Vec<FieldEditor> {
    vec![
        FieldEditor::new("created_at", "Created", FieldKind::Text, fmt_ts(created)).read_only(),
        FieldEditor::new("updated_at", "Updated", FieldKind::Text, fmt_ts(updated)).read_only(),
    ]
}

pub fn user_fields(user: &User) -> Vec<FieldEditor> {
    let mut fields = vec![
        id_field(user.id),
        FieldEditor::new("uuid", "UUID", FieldKind::Text, user.uuid.to_string()).read_only(),
        FieldEditor::new("username", "Username", FieldKind::Text, user.username.clone()),
        FieldEditor::new("email", "Email", FieldKind::Email, user.email.clone()),
        FieldEditor::new("first_name", "First name", FieldKind::Text, user.first_name.clone()),
        FieldEditor::new(
            "middle_name",
            "Middle name",
            FieldKind::Text,
            user.middle_name.clone().unwrap_or_default(),
        ),
        FieldEditor::new("last_name", "Last name", FieldKind::Text, user.last_name.clone()),
        FieldEditor::new("disabled", "Disabled", FieldKind::Bool, user.disabled.to_string()),
        FieldEditor::new(
            "date_registered",
            "Registered",
            FieldKind::Text,
            fmt_ts(&user.date_registered),
        )
        .read_only(),
    ];
    fields.extend(audit_fields(&user.created_at, &user.updated_at));
    fields
}

pub fn group_fields(group: &Group) -> Vec<FieldEditor> {
    let mut fields = vec![
        id_field(group.id),
        FieldEditor::new("name", "Name", FieldKind::Text, group.name.clone()),
        FieldEditor::new("description", "Description", FieldKind::Text, group.description.clone()),
        FieldEditor::new("active", "Active", FieldKind::Bool, group.active.to_string()),
        FieldEditor::new(
            "app_id",
            "App ID",
            FieldKind::IntOptional,
            group.app_id.map(|id| id.to_string()).unwrap_or_default(),
        ),
    ];
    fields.extend(audit_fields(&group.created_at, &group.updated_at));
    fields
}

pub fn scope_fields(scope: &Scope) -> Vec<FieldEditor> {
    let mut fields = vec![
        id_field(scope.id),
        FieldEditor::new("name", "Name", FieldKind::Text, scope.name.clone()),
        FieldEditor::new("description", "Description", FieldKind::Text, scope.description.clone()),
        FieldEditor::new("active", "Active", FieldKind::Bool, scope.active.to_string()),
    ];
    fields.extend(audit_fields(&scope.created_at, &scope.updated_at));
    fields
}

pub fn resource_fields(resource: &Resource) -> Vec<FieldEditor> {
    let methods: Vec<String> = HttpMethod::ALL.iter().map(|m| m.to_string()).collect();
    let mut fields = vec![
        id_field(resource.id),
        FieldEditor::new("name", "Name", FieldKind::Text, resource.name.clone()),
        FieldEditor::new("route_path", "Route", FieldKind::Text, resource.route_path.clone()),
        FieldEditor::new(
            "method",
            "Method",
            FieldKind::Select(methods),
            resource.method.to_string(),
        ),
        FieldEditor::new(
            "description",
            "Description",
            FieldKind::Text,
            resource.description.clone(),
        ),
        FieldEditor::new(
            "scope_id",
            "Scope ID",
            FieldKind::IntOptional,
            resource.scope_id.map(|id| id.to_string()).unwrap_or_default(),
        ),
    ];
    fields.extend(audit_fields(&resource.created_at, &resource.updated_at));
    fields
}

pub fn app_fields(app: &App) -> Vec<FieldEditor> {
    let mut fields = vec![
        id_field(app.id),
        FieldEditor::new("uuid", "UUID", FieldKind::Text, app.uuid.to_string()).read_only(),
        FieldEditor::new("name", "Name", FieldKind::Text, app.name.clone()),
        FieldEditor::new("description", "Description", FieldKind::Text, app.description.clone()),
        FieldEditor::new("active", "Active", FieldKind::Bool, app.active.to_string()),
    ];
    fields.extend(audit_fields(&app.created_at, &app.updated_at));
    fields
}

// ========== Create forms ==========

pub fn create_form(kind: EntityKind) -> CreateForm {
    let title = format!("New {}", kind.label());
    let fields = match kind {
        EntityKind::User => vec![
            FormField::new("username", "Username", FieldKind::Text).required(),
            FormField::new("email", "Email", FieldKind::Email).required(),
            FormField::new("password", "Password", FieldKind::Text).required(),
            FormField::new("first_name", "First name", FieldKind::Text).required(),
            FormField::new("middle_name", "Middle name", FieldKind::Text),
            FormField::new("last_name", "Last name", FieldKind::Text).required(),
            FormField::new("disabled", "Disabled", FieldKind::Bool),
        ],
        EntityKind::Group => vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("description", "Description", FieldKind::Text),
            FormField::new("active", "Active", FieldKind::Bool),
            FormField::new("app_id", "App ID", FieldKind::IntOptional),
        ],
        EntityKind::Scope => vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("description", "Description", FieldKind::Text),
            FormField::new("active", "Active", FieldKind::Bool),
        ],
        EntityKind::Resource => vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("route_path", "Route", FieldKind::Text).required(),
            FormField::new(
                "method",
                "Method",
                FieldKind::Select(HttpMethod::ALL.iter().map(|m| m.to_string()).collect()),
            ),
            FormField::new("description", "Description", FieldKind::Text),
            FormField::new("scope_id", "Scope ID", FieldKind::IntOptional),
        ],
        EntityKind::App => vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("description", "Description", FieldKind::Text),
            FormField::new("active", "Active", FieldKind::Bool),
        ],
    };
    CreateForm::new(title, fields)
}

/// Relationship panels shown on a kind's detail page
pub fn relations(kind: EntityKind) -> Vec<Relation> {
    match kind {
        EntityKind::User => vec![Relation::USER_GROUPS, Relation::USER_SCOPES],
        EntityKind::Group => vec![Relation::GROUP_USERS, Relation::GROUP_SCOPES],
        EntityKind::Scope => vec![
            Relation::SCOPE_USERS,
            Relation::SCOPE_GROUPS,
            Relation::SCOPE_RESOURCES,
        ],
        // Resources belong to exactly one scope, edited via scope_id
        EntityKind::Resource => Vec::new(),
        EntityKind::App => vec![Relation::APP_GROUPS, Relation::APP_SCOPES],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_cells_match_column_count() {
        for kind in EntityKind::ALL {
            let columns = columns(kind);
            let cells = match kind {
                EntityKind::User => 6,
                EntityKind::Resource => 5,
                _ => 4,
            };
            assert_eq!(columns.len(), cells, "{kind}");
        }
    }

    #[test]
    fn every_kind_has_a_create_form() {
        for kind in EntityKind::ALL {
            let form = create_form(kind);
            assert!(!form.fields.is_empty());
            assert!(form.fields.iter().any(|f| f.required));
        }
    }

    #[test]
    fn resource_has_no_relation_panels() {
        assert!(relations(EntityKind::Resource).is_empty());
        assert_eq!(relations(EntityKind::Scope).len(), 3);
    }
}
