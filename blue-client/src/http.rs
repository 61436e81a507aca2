//! HTTP wrapper over the Blue Admin API
//!
//! All requests attach the session's bearer token when present.
//! Responses are parsed as JSON when the content type says so, else
//! returned as text. A 401 from any endpoint clears the session and
//! surfaces `SessionExpired` - the global teardown policy lives here,
//! not in individual callers. No retries: every call is at-most-once.

use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Raw response body, decoded per content type
#[derive(Debug)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

/// HTTP client carrying the base URL and session handle
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Build a client from configuration, wiring in the given session
    pub fn new(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    /// GET with query parameters, JSON response
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        self.execute(request).await
    }

    /// POST with a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        self.execute(request).await
    }

    /// POST without a body (relationship attach)
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)));
        self.execute(request).await
    }

    /// PATCH with a JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.patch(self.url(path)).json(body));
        self.execute(request).await
    }

    /// DELETE
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.delete(self.url(path)));
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| {
            let err = ClientError::from_transport(e);
            tracing::warn!("request failed: {err}");
            err
        })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);
        let body = response.text().await.map_err(ClientError::from_transport)?;

        if status == StatusCode::UNAUTHORIZED {
            // Global policy: any 401 tears the session down.
            tracing::info!("received 401, clearing session");
            self.session.clear();
            return Err(ClientError::SessionExpired);
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail: extract_detail(is_json, &body, status.as_u16()),
            });
        }

        match decode_body(is_json, body)? {
            ResponseBody::Json(value) => {
                serde_json::from_value(value).map_err(ClientError::Serialization)
            }
            // Plain-text success bodies (rare) deserialize via a JSON string
            ResponseBody::Text(text) => serde_json::from_value(serde_json::Value::String(text))
                .map_err(|_| {
                    ClientError::InvalidResponse("expected JSON response body".to_string())
                }),
        }
    }
}

/// Decode a success body per its content type
fn decode_body(is_json: bool, body: String) -> ClientResult<ResponseBody> {
    if is_json {
        let value = serde_json::from_str(&body)?;
        Ok(ResponseBody::Json(value))
    } else {
        Ok(ResponseBody::Text(body))
    }
}

/// Pull the server's detail message out of an error body, falling back
/// to a generic message when none is present.
fn extract_detail(is_json: bool, body: &str, status: u16) -> String {
    if is_json {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(details) = value.get("details").and_then(|d| d.as_str()) {
                if !details.is_empty() {
                    return details.to_string();
                }
            }
        }
    }
    if !body.trim().is_empty() && !is_json {
        return body.trim().to_string();
    }
    format!("request failed with status {status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_prefers_envelope_details() {
        let body = r#"{"data": null, "success": false, "details": "group not found"}"#;
        assert_eq!(extract_detail(true, body, 404), "group not found");
    }

    #[test]
    fn detail_falls_back_to_text_body() {
        assert_eq!(extract_detail(false, "upstream offline\n", 502), "upstream offline");
    }

    #[test]
    fn detail_falls_back_to_generic_message() {
        assert_eq!(extract_detail(true, "{}", 500), "request failed with status 500");
        assert_eq!(extract_detail(false, "  ", 500), "request failed with status 500");
    }

    #[test]
    fn decode_body_respects_content_type() {
        match decode_body(true, r#"{"ok": true}"#.into()).unwrap() {
            ResponseBody::Json(v) => assert_eq!(v["ok"], true),
            ResponseBody::Text(_) => panic!("expected JSON"),
        }
        match decode_body(false, "pong".into()).unwrap() {
            ResponseBody::Text(t) => assert_eq!(t, "pong"),
            ResponseBody::Json(_) => panic!("expected text"),
        }
    }
}
