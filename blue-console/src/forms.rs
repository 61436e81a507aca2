//! Inline-edit field state machine
//!
//! Each detail-page field is a small state machine:
//! `Viewing -> Editing -> (Saving -> Viewing | Viewing-with-error)`.
//! Escape, or committing an unchanged draft, returns straight to
//! `Viewing` without touching the server.

/// Field value kinds, used to build typed update payloads and to
/// validate drafts before they leave the form layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Bool,
    /// One of a fixed set of options (e.g. HTTP method)
    Select(Vec<String>),
    /// Optional numeric foreign key
    IntOptional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMode {
    Viewing,
    Editing,
    Saving,
    /// Back to viewing, with the last save's error shown inline
    ViewingWithError(String),
}

/// One editable field on a detail page
#[derive(Debug, Clone)]
pub struct FieldEditor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub editable: bool,
    /// Last server-confirmed value
    value: String,
    draft: String,
    mode: FieldMode,
}

impl FieldEditor {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind, value: String) -> Self {
        Self {
            key,
            label,
            kind,
            editable: true,
            draft: value.clone(),
            value,
            mode: FieldMode::Viewing,
        }
    }

    /// Server-owned fields (ids, audit timestamps) render but never edit
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn mode(&self) -> &FieldMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FieldMode::Editing)
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.mode, FieldMode::Saving)
    }

    /// Enter editing; ignored for read-only fields or while saving
    pub fn begin_edit(&mut self) -> bool {
        if !self.editable || self.is_saving() {
            return false;
        }
        self.draft = self.value.clone();
        self.mode = FieldMode::Editing;
        true
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        if self.is_editing() {
            self.draft = draft.into();
        }
    }

    /// Escape: discard the draft, straight back to viewing
    pub fn cancel(&mut self) {
        if self.is_editing() {
            self.draft = self.value.clone();
            self.mode = FieldMode::Viewing;
        }
    }

    /// Enter or blur. An unchanged draft goes straight back to viewing
    /// with no save; otherwise validate, and on success return the
    /// value to send (state moves to Saving).
    pub fn commit(&mut self) -> Option<String> {
        if !self.is_editing() {
            return None;
        }
        if self.draft == self.value {
            self.mode = FieldMode::Viewing;
            return None;
        }
        if let Err(msg) = self.validate_draft() {
            self.mode = FieldMode::ViewingWithError(msg);
            return None;
        }
        self.mode = FieldMode::Saving;
        Some(self.draft.clone())
    }

    /// Server confirmed the save
    pub fn save_ok(&mut self, new_value: String) {
        self.value = new_value.clone();
        self.draft = new_value;
        self.mode = FieldMode::Viewing;
    }

    /// Server rejected the save; the confirmed value stays
    pub fn save_err(&mut self, msg: impl Into<String>) {
        self.draft = self.value.clone();
        self.mode = FieldMode::ViewingWithError(msg.into());
    }

    /// Draft checks that never reach the network
    fn validate_draft(&self) -> Result<(), String> {
        validate_value(&self.kind, &self.draft)
    }

    /// Convert a committed draft into the JSON value for the PATCH body
    pub fn to_json_value(&self, raw: &str) -> serde_json::Value {
        match &self.kind {
            FieldKind::Bool => serde_json::Value::Bool(raw == "true"),
            FieldKind::IntOptional => {
                if raw.is_empty() {
                    serde_json::Value::Null
                } else {
                    raw.parse::<i64>()
                        .map(serde_json::Value::from)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            _ => serde_json::Value::String(raw.to_string()),
        }
    }
}

/// Shared field-level checks for drafts and create-form values
pub fn validate_value(kind: &FieldKind, value: &str) -> Result<(), String> {
    match kind {
        FieldKind::Text => Ok(()),
        FieldKind::Email => {
            if value.contains('@') && !value.starts_with('@') {
                Ok(())
            } else {
                Err("invalid email address".to_string())
            }
        }
        FieldKind::Bool => match value {
            "true" | "false" => Ok(()),
            _ => Err("expected true or false".to_string()),
        },
        FieldKind::Select(options) => {
            if options.iter().any(|o| o == value) {
                Ok(())
            } else {
                Err(format!("must be one of: {}", options.join(", ")))
            }
        }
        FieldKind::IntOptional => {
            if value.is_empty() || value.parse::<i64>().is_ok() {
                Ok(())
            } else {
                Err("expected a number".to_string())
            }
        }
    }
}

/// One field of a create form
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub error: Option<String>,
}

impl FormField {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        let value = match &kind {
            FieldKind::Bool => "false".to_string(),
            FieldKind::Select(options) => options.first().cloned().unwrap_or_default(),
            _ => String::new(),
        };
        Self {
            key,
            label,
            kind,
            required: false,
            value,
            error: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Create-form state: fields, a cursor, and inline validation errors.
/// Submission is blocked until every field validates; errors render
/// per field and never leave the form layer.
#[derive(Debug, Clone)]
pub struct CreateForm {
    pub title: String,
    pub fields: Vec<FormField>,
    pub cursor: usize,
    pub submitting: bool,
}

impl CreateForm {
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            fields,
            cursor: 0,
            submitting: false,
        }
    }

    pub fn current_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.cursor)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.cursor = (self.cursor + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.cursor = (self.cursor + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Validate every field, recording inline errors. Returns true
    /// when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        let mut ok = true;
        for field in &mut self.fields {
            field.error = None;
            if field.required && field.value.trim().is_empty() {
                field.error = Some(format!("{} is required", field.label));
                ok = false;
                continue;
            }
            if !field.value.is_empty() {
                if let Err(msg) = validate_value(&field.kind, &field.value) {
                    field.error = Some(msg);
                    ok = false;
                }
            }
        }
        ok
    }

    /// Build the JSON create payload with per-kind typing
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for field in &self.fields {
            let value = match &field.kind {
                FieldKind::Bool => serde_json::Value::Bool(field.value == "true"),
                FieldKind::IntOptional => {
                    if field.value.is_empty() {
                        continue;
                    }
                    match field.value.parse::<i64>() {
                        Ok(n) => serde_json::Value::from(n),
                        Err(_) => continue,
                    }
                }
                _ => serde_json::Value::String(field.value.clone()),
            };
            object.insert(field.key.to_string(), value);
        }
        serde_json::Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(value: &str) -> FieldEditor {
        FieldEditor::new("name", "Name", FieldKind::Text, value.into())
    }

    #[test]
    fn edit_save_cycle() {
        let mut field = text_field("ops");
        assert!(field.begin_edit());
        field.set_draft("operations");

        let committed = field.commit().expect("changed draft should save");
        assert_eq!(committed, "operations");
        assert!(field.is_saving());

        field.save_ok("operations".into());
        assert_eq!(field.value(), "operations");
        assert_eq!(*field.mode(), FieldMode::Viewing);
    }

    #[test]
    fn escape_returns_to_viewing_without_save() {
        let mut field = text_field("ops");
        field.begin_edit();
        field.set_draft("oops");
        field.cancel();
        assert_eq!(*field.mode(), FieldMode::Viewing);
        assert_eq!(field.value(), "ops");
        assert_eq!(field.draft(), "ops");
    }

    #[test]
    fn unchanged_commit_skips_save() {
        let mut field = text_field("ops");
        field.begin_edit();
        assert_eq!(field.commit(), None);
        assert_eq!(*field.mode(), FieldMode::Viewing);
    }

    #[test]
    fn failed_save_restores_value_with_error() {
        let mut field = text_field("ops");
        field.begin_edit();
        field.set_draft("taken-name");
        field.commit();

        field.save_err("name already in use");
        assert_eq!(field.value(), "ops");
        assert_eq!(
            *field.mode(),
            FieldMode::ViewingWithError("name already in use".into())
        );
    }

    #[test]
    fn validation_blocks_submission() {
        let mut field = FieldEditor::new("email", "Email", FieldKind::Email, "a@b.c".into());
        field.begin_edit();
        field.set_draft("not-an-email");
        // Never reaches the network
        assert_eq!(field.commit(), None);
        assert!(matches!(field.mode(), FieldMode::ViewingWithError(_)));
        assert_eq!(field.value(), "a@b.c");
    }

    #[test]
    fn select_field_accepts_only_options() {
        let options = vec!["GET".to_string(), "POST".to_string()];
        let mut field =
            FieldEditor::new("method", "Method", FieldKind::Select(options), "GET".into());
        field.begin_edit();
        field.set_draft("TRACE");
        assert_eq!(field.commit(), None);

        field.begin_edit();
        field.set_draft("POST");
        assert_eq!(field.commit(), Some("POST".to_string()));
    }

    #[test]
    fn read_only_fields_never_edit() {
        let mut field = text_field("42").read_only();
        assert!(!field.begin_edit());
        assert_eq!(*field.mode(), FieldMode::Viewing);
    }

    #[test]
    fn create_form_blocks_invalid_submission() {
        let mut form = CreateForm::new(
            "New User",
            vec![
                FormField::new("username", "Username", FieldKind::Text).required(),
                FormField::new("email", "Email", FieldKind::Email).required(),
            ],
        );
        assert!(!form.validate());
        assert!(form.fields[0].error.is_some());

        form.fields[0].value = "jdoe".into();
        form.fields[1].value = "not-an-email".into();
        assert!(!form.validate());
        assert_eq!(
            form.fields[1].error.as_deref(),
            Some("invalid email address")
        );

        form.fields[1].value = "jdoe@example.com".into();
        assert!(form.validate());
        assert!(form.fields.iter().all(|f| f.error.is_none()));
    }

    #[test]
    fn create_form_builds_typed_json() {
        let mut form = CreateForm::new(
            "New Group",
            vec![
                FormField::new("name", "Name", FieldKind::Text).required(),
                FormField::new("active", "Active", FieldKind::Bool),
                FormField::new("app_id", "App", FieldKind::IntOptional),
            ],
        );
        form.fields[0].value = "ops".into();
        form.fields[1].value = "true".into();

        let json = form.to_json();
        assert_eq!(json["name"], "ops");
        assert_eq!(json["active"], true);
        // Empty optional id is omitted entirely
        assert!(json.get("app_id").is_none());
    }

    #[test]
    fn json_values_are_typed() {
        let bool_field = FieldEditor::new("active", "Active", FieldKind::Bool, "true".into());
        assert_eq!(bool_field.to_json_value("false"), serde_json::json!(false));

        let id_field = FieldEditor::new("app_id", "App", FieldKind::IntOptional, String::new());
        assert_eq!(id_field.to_json_value("9"), serde_json::json!(9));
        assert_eq!(id_field.to_json_value(""), serde_json::Value::Null);
    }
}
