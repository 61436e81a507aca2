//! Entity detail page state

use shared::EntityKind;
use tui_input::Input;

use crate::entity_view;
use crate::fetch::DetailData;
use crate::forms::FieldEditor;
use crate::picker::RelationPicker;
use crate::query::QuerySlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFocus {
    Fields,
    /// Index into `pickers`
    Picker(usize),
}

/// Detail screen: inline-editable fields plus one relationship picker
/// per relation the entity participates in.
pub struct DetailPage {
    pub kind: EntityKind,
    pub id: i64,
    pub slot: QuerySlot<DetailData>,
    pub title: String,
    pub fields: Vec<FieldEditor>,
    pub field_cursor: usize,
    pub pickers: Vec<RelationPicker>,
    pub focus: DetailFocus,
    /// Draft input while a field is in its editing state
    pub edit_input: Input,
}

impl DetailPage {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        let pickers = entity_view::relations(kind)
            .into_iter()
            .map(|relation| RelationPicker::new(relation, id))
            .collect();
        Self {
            kind,
            id,
            slot: QuerySlot::new(),
            title: String::new(),
            fields: Vec::new(),
            field_cursor: 0,
            pickers,
            focus: DetailFocus::Fields,
            edit_input: Input::default(),
        }
    }

    /// Fold the fetched record into editable field state
    pub fn apply_detail(&mut self, data: DetailData) {
        self.title = data.title;
        self.fields = data.fields;
        if self.field_cursor >= self.fields.len() {
            self.field_cursor = 0;
        }
    }

    pub fn current_field(&self) -> Option<&FieldEditor> {
        self.fields.get(self.field_cursor)
    }

    pub fn current_field_mut(&mut self) -> Option<&mut FieldEditor> {
        self.fields.get_mut(self.field_cursor)
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut FieldEditor> {
        self.fields.iter_mut().find(|f| f.key == key)
    }

    pub fn picker_mut(&mut self, index: usize) -> Option<&mut RelationPicker> {
        self.pickers.get_mut(index)
    }

    /// Cycle focus: fields, then each picker, back to fields
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            DetailFocus::Fields if !self.pickers.is_empty() => DetailFocus::Picker(0),
            DetailFocus::Fields => DetailFocus::Fields,
            DetailFocus::Picker(i) if i + 1 < self.pickers.len() => DetailFocus::Picker(i + 1),
            DetailFocus::Picker(_) => DetailFocus::Fields,
        };
    }

    pub fn is_editing(&self) -> bool {
        self.current_field().is_some_and(|f| f.is_editing())
    }
}
