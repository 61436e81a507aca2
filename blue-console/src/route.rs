//! Console routes
//!
//! Prefix-style routes mirroring the admin paths: `/admin/login`,
//! `/admin/`, `/admin/users`, `/admin/users/3`, etc. Every admin route
//! requires authentication; an unauthenticated visit (or a session
//! expiry at any point) redirects to Login.

use shared::EntityKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    EntityList(EntityKind),
    EntityDetail(EntityKind, i64),
    NotFound,
}

impl Route {
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Parse a `/admin/...` path (the goto box accepts these)
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim().trim_end_matches('/');
        let rest = match trimmed.strip_prefix("/admin") {
            Some(rest) => rest.trim_start_matches('/'),
            None => return Route::NotFound,
        };
        if rest.is_empty() {
            return Route::Dashboard;
        }
        if rest == "login" {
            return Route::Login;
        }

        let mut parts = rest.split('/');
        let kind = match parts.next() {
            Some("users") => EntityKind::User,
            Some("groups") => EntityKind::Group,
            Some("scopes") => EntityKind::Scope,
            Some("resources") => EntityKind::Resource,
            Some("apps") => EntityKind::App,
            _ => return Route::NotFound,
        };
        match parts.next() {
            None => Route::EntityList(kind),
            Some(id) => match id.parse() {
                Ok(id) => Route::EntityDetail(kind, id),
                Err(_) => Route::NotFound,
            },
        }
    }

    fn segment(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::User => "users",
            EntityKind::Group => "groups",
            EntityKind::Scope => "scopes",
            EntityKind::Resource => "resources",
            EntityKind::App => "apps",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => write!(f, "/admin/login"),
            Route::Dashboard => write!(f, "/admin/"),
            Route::EntityList(kind) => write!(f, "/admin/{}", Route::segment(*kind)),
            Route::EntityDetail(kind, id) => {
                write!(f, "/admin/{}/{}", Route::segment(*kind), id)
            }
            Route::NotFound => write!(f, "/admin/404"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_admin_paths() {
        assert_eq!(Route::parse("/admin/login"), Route::Login);
        assert_eq!(Route::parse("/admin/"), Route::Dashboard);
        assert_eq!(Route::parse("/admin"), Route::Dashboard);
        assert_eq!(Route::parse("/admin/users"), Route::EntityList(EntityKind::User));
        assert_eq!(
            Route::parse("/admin/scopes/12"),
            Route::EntityDetail(EntityKind::Scope, 12)
        );
        assert_eq!(Route::parse("/admin/unknown"), Route::NotFound);
        assert_eq!(Route::parse("/elsewhere"), Route::NotFound);
    }

    #[test]
    fn display_round_trips() {
        for route in [
            Route::Login,
            Route::Dashboard,
            Route::EntityList(EntityKind::App),
            Route::EntityDetail(EntityKind::Group, 3),
        ] {
            assert_eq!(Route::parse(&route.to_string()), route);
        }
    }

    #[test]
    fn only_login_skips_auth() {
        assert!(!Route::Login.requires_auth());
        assert!(Route::Dashboard.requires_auth());
        assert!(Route::EntityList(EntityKind::User).requires_auth());
    }
}
