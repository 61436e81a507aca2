//! Data models
//!
//! One module per administered entity, each with the server row type
//! plus `Create`/`Update` payloads. Identifiers and audit timestamps
//! are server-owned; payload types never carry them.

pub mod app;
pub mod group;
pub mod resource;
pub mod scope;
pub mod user;

// Re-exports
pub use app::*;
pub use group::*;
pub use resource::*;
pub use scope::*;
pub use user::*;

use crate::entity::EntityKind;

/// Common surface of every administered entity row.
///
/// The generic entity services and the console's relationship picker
/// only ever need the id, the kind, and a human-readable label.
pub trait EntityRecord: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Server-assigned identifier
    fn record_id(&self) -> i64;

    /// Label shown in pickers and table name columns
    fn display_label(&self) -> String;

    /// Secondary text matched by picker search alongside the label
    fn search_text(&self) -> String {
        self.display_label()
    }
}
