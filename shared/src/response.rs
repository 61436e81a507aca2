//! API response envelopes
//!
//! Every Blue Admin endpoint wraps its payload in a uniform envelope.

use serde::{Deserialize, Serialize};

/// Unified single-entity response envelope
///
/// All single-entity endpoints respond with this format:
/// ```json
/// {
///     "data": { ... },
///     "success": true,
///     "details": "Success"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Response payload (absent on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable detail message
    #[serde(default)]
    pub details: String,
}

impl<T> Envelope<T> {
    /// Extract the payload, treating `success: false` or a missing
    /// `data` field as an error carrying the server's detail message.
    pub fn into_data(self) -> Result<T, String> {
        if !self.success {
            return Err(if self.details.is_empty() {
                "request failed".to_string()
            } else {
                self.details
            });
        }
        self.data.ok_or_else(|| "missing response data".to_string())
    }
}

/// Paginated list response envelope
///
/// List endpoints add pagination metadata. `page` is 1-based and
/// server-owned; clients translate to their own indexing at the
/// pagination boundary, nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub success: bool,
    #[serde(default)]
    pub details: String,
    /// Current page number (1-based)
    #[serde(default)]
    pub page: u32,
    /// Total number of pages
    #[serde(default)]
    pub pages: u32,
    /// Items per page
    #[serde(default)]
    pub size: u32,
    /// Total number of items across all pages
    #[serde(default)]
    pub total: u64,
}

impl<T> PagedEnvelope<T> {
    pub fn into_items(self) -> Result<Vec<T>, String> {
        if !self.success {
            return Err(if self.details.is_empty() {
                "request failed".to_string()
            } else {
                self.details
            });
        }
        Ok(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_unwraps_data() {
        let env: Envelope<i64> = serde_json::from_str(
            r#"{"data": 42, "success": true, "details": "Success"}"#,
        )
        .unwrap();
        assert_eq!(env.into_data().unwrap(), 42);
    }

    #[test]
    fn envelope_failure_carries_details() {
        let env: Envelope<i64> =
            serde_json::from_str(r#"{"success": false, "details": "record not found"}"#).unwrap();
        assert_eq!(env.into_data().unwrap_err(), "record not found");
    }

    #[test]
    fn envelope_missing_data_is_error() {
        let env: Envelope<i64> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(env.into_data().is_err());
    }

    #[test]
    fn paged_envelope_parses_metadata() {
        let env: PagedEnvelope<String> = serde_json::from_str(
            r#"{"data": ["a", "b"], "success": true, "details": "", "page": 1, "pages": 3, "size": 10, "total": 25}"#,
        )
        .unwrap();
        assert_eq!(env.page, 1);
        assert_eq!(env.pages, 3);
        assert_eq!(env.total, 25);
        assert_eq!(env.into_items().unwrap().len(), 2);
    }
}
