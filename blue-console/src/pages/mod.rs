//! Page state
//!
//! One state struct per screen; key handling and fetch orchestration
//! live in [`crate::app`], rendering in [`crate::ui`].

mod dashboard;
mod detail;
mod list;
mod login;

pub use dashboard::DashboardPage;
pub use detail::{DetailFocus, DetailPage};
pub use list::{ListFocus, ListPage};
pub use login::{LoginFocus, LoginPage};
