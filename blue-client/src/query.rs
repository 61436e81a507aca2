//! List query parameters and page results

use serde::de::DeserializeOwned;
use shared::PagedEnvelope;
use std::collections::BTreeMap;

use crate::error::{ClientError, ClientResult};

/// Reserved filter key carrying the debounced global search value.
/// Per-field filter keys must never collide with it.
pub const GLOBAL_SEARCH_KEY: &str = "search";

/// Query parameters for list endpoints.
///
/// `page` is 1-based: this type sits on the API side of the pagination
/// boundary and only ever sees API page numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    /// Flat field -> value filter map, global search under
    /// [`GLOBAL_SEARCH_KEY`]
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            filters: BTreeMap::new(),
        }
    }

    /// First page with the given size
    pub fn first_page(size: u32) -> Self {
        Self::new(1, size)
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    pub fn with_search(self, value: impl Into<String>) -> Self {
        self.with_filter(GLOBAL_SEARCH_KEY, value)
    }

    /// Replace the whole filter map, dropping empty values
    pub fn set_filters(&mut self, filters: BTreeMap<String, String>) {
        self.filters = filters.into_iter().filter(|(_, v)| !v.is_empty()).collect();
    }

    /// Serialize to query pairs; page/size first, filters in key order
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        for (k, v) in &self.filters {
            params.push((k.clone(), v.clone()));
        }
        params
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// One page of a list result, with the server's pagination metadata
/// passed through verbatim (1-based `page`).
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub pages: u32,
    pub size: u32,
    pub total: u64,
}

impl<T: DeserializeOwned> Page<T> {
    /// Unwrap a paged envelope, surfacing a `success: false` body as an
    /// API error with the server's detail message.
    pub fn from_envelope(env: PagedEnvelope<T>) -> ClientResult<Self> {
        if !env.success {
            return Err(ClientError::Api {
                status: 200,
                detail: if env.details.is_empty() {
                    "request failed".to_string()
                } else {
                    env.details
                },
            });
        }
        Ok(Self {
            items: env.data,
            page: env.page,
            pages: env.pages,
            size: env.size,
            total: env.total,
        })
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_include_page_size_and_filters() {
        let query = ListQuery::new(2, 25)
            .with_filter("active", "true")
            .with_search("jo");
        let params = query.to_params();
        assert_eq!(params[0], ("page".into(), "2".into()));
        assert_eq!(params[1], ("size".into(), "25".into()));
        assert!(params.contains(&("active".into(), "true".into())));
        assert!(params.contains(&(GLOBAL_SEARCH_KEY.into(), "jo".into())));
    }

    #[test]
    fn set_filters_drops_empty_values() {
        let mut query = ListQuery::default();
        let mut filters = BTreeMap::new();
        filters.insert("name".to_string(), "ops".to_string());
        filters.insert("stale".to_string(), String::new());
        query.set_filters(filters);
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters.get("name").map(String::as_str), Some("ops"));
    }

    #[test]
    fn failed_envelope_becomes_api_error() {
        let env: PagedEnvelope<i64> =
            serde_json::from_str(r#"{"data": [], "success": false, "details": "boom"}"#).unwrap();
        let err = Page::from_envelope(env).unwrap_err();
        assert!(matches!(err, ClientError::Api { detail, .. } if detail == "boom"));
    }
}
