//! HTTP client for tracker REST requests.
//!
//! This module wraps `reqwest` for the handful of GET requests the class
//! helper makes, decoding JSON bodies and sorting failures into the
//! application's error taxonomy.

use super::error::NetworkError;
use super::models::{value_text, Envelope, ErrorEnvelope};
use crate::error::{ClassHelperError, ClassHelperResult};
use crate::utils::text_processing::double_quoted;
use log::*;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;

/// HTTP basic credentials for trackers that deny anonymous REST access.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

/// A decoded response, successful or not.
///
#[derive(Debug)]
pub struct ApiResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    fn unexpected(self) -> NetworkError {
        NetworkError::UnexpectedResponse {
            url: self.url,
            status: self.status.as_u16(),
            body: self.body.to_string(),
        }
    }

    /// Return the collection envelope of a successful response.
    ///
    pub fn into_envelope(self) -> Result<Envelope, NetworkError> {
        if !self.status.is_success() {
            return Err(self.unexpected());
        }
        serde_json::from_value(self.body).map_err(|source| NetworkError::Envelope {
            url: self.url,
            source,
        })
    }

    /// Return the server's `error.msg`, if the body carries one.
    ///
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_value::<ErrorEnvelope>(self.body.clone())
            .ok()
            .map(|envelope| envelope.error.msg)
    }

    /// Return `(value, field)` when the error message names exactly one
    /// rejected value and one field, as in `Value "bogus" is invalid for "status"`.
    ///
    pub fn validation_failure(&self) -> Option<(String, String)> {
        let message = self.error_message()?;
        let mut quoted = double_quoted(&message);
        if quoted.len() != 2 {
            return None;
        }
        let field = quoted.pop()?;
        let value = quoted.pop()?;
        Some((value, field))
    }
}

/// Makes requests to the tracker and decodes the JSON responses.
///
#[derive(Clone, Debug, Default)]
pub struct RestClient {
    http: reqwest::Client,
    credentials: Option<Credentials>,
}

impl RestClient {
    /// Returns a new anonymous client.
    ///
    pub fn new() -> Self {
        RestClient {
            http: reqwest::Client::new(),
            credentials: None,
        }
    }

    /// Returns the client authenticating every request with the given
    /// credentials.
    ///
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Make a GET request and decode the JSON body, whatever the status.
    ///
    pub async fn get(&self, url: &str) -> Result<ApiResponse, NetworkError> {
        debug!("Requesting {}...", url);
        let mut request = self.http.get(url);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, credentials.password.as_ref());
        }

        let response = request.send().await.map_err(|source| NetworkError::Request {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| NetworkError::Request {
            url: url.to_string(),
            source,
        })?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|source| {
            error!(
                "Failed to parse response from {}: {}. Response body: {}",
                url,
                source,
                String::from_utf8_lossy(&bytes)
            );
            NetworkError::Decode {
                url: url.to_string(),
                source,
            }
        })?;

        Ok(ApiResponse {
            url: url.to_string(),
            status,
            body,
        })
    }

    /// Return the collection envelope of a listing url. Any non-success
    /// status is an error.
    ///
    pub async fn collection(&self, url: &str) -> Result<Envelope, NetworkError> {
        let response = self.get(url).await?;
        if !response.status.is_success() {
            error!(
                "API request failed with status {}: {}",
                response.status, response.body
            );
        }
        response.into_envelope()
    }

    /// Return the collection envelope of a search url.
    ///
    /// A 400 naming a rejected value and field becomes
    /// [`ClassHelperError::Validation`] and a 403 becomes
    /// [`ClassHelperError::Permission`]; both are recoverable. Anything else
    /// that is not a success is a network error.
    pub async fn search(&self, url: &str) -> ClassHelperResult<Envelope> {
        let response = self.get(url).await?;
        match response.status {
            StatusCode::BAD_REQUEST => {
                if let Some((value, field)) = response.validation_failure() {
                    warn!("Search rejected value '{}' for '{}' ({})", value, field, url);
                    return Err(ClassHelperError::Validation { value, field });
                }
            }
            StatusCode::FORBIDDEN => {
                let message = response
                    .error_message()
                    .unwrap_or_else(|| String::from("Permission denied"));
                warn!("Search forbidden ({}): {}", url, message);
                return Err(ClassHelperError::Permission { message });
            }
            _ => {}
        }
        Ok(response.into_envelope()?)
    }

    /// Return the flat `{key: label}` mapping of a translation url.
    ///
    pub async fn translations(&self, url: &str) -> Result<HashMap<String, String>, NetworkError> {
        let response = self.get(url).await?;
        if !response.status.is_success() {
            return Err(response.unexpected());
        }
        let labels: HashMap<String, Value> =
            serde_json::from_value(response.body).map_err(|source| NetworkError::Envelope {
                url: url.to_string(),
                source,
            })?;
        Ok(labels
            .into_iter()
            .map(|(key, label)| (key, value_text(&label)))
            .collect())
    }

    /// Return true when the tracker's REST root answers without an error.
    ///
    pub async fn probe(&self, base_url: &str) -> bool {
        let url = format!("{}/rest", base_url.trim_end_matches('/'));
        match self.get(&url).await {
            Ok(response) if response.body.get("error").is_some() => {
                warn!("REST interface reported an error: {}", response.body["error"]);
                false
            }
            Ok(_) => true,
            Err(e) => {
                error!("Failed to reach REST interface: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn collection_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/demo/rest/data/status");
                then.status(200).json_body(json!({
                    "data": {
                        "collection": [
                            {"id": "1", "name": "unread"},
                            {"id": "2", "name": "chatting"}
                        ],
                        "@links": {"self": [{"rel": "self", "uri": "x?@page_index=1"}]}
                    }
                }));
            })
            .await;

        let client = RestClient::new();
        let envelope = client
            .collection(&server.url("/demo/rest/data/status"))
            .await
            .unwrap();
        assert_eq!(envelope.data.collection.len(), 2);
        assert_eq!(envelope.data.links.self_uri(), Some("x?@page_index=1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn collection_unexpected_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/demo/rest/data/status");
                then.status(500)
                    .json_body(json!({"error": {"status": 500, "msg": "boom"}}));
            })
            .await;

        let result = RestClient::new()
            .collection(&server.url("/demo/rest/data/status"))
            .await;
        match result {
            Err(NetworkError::UnexpectedResponse { status, url, .. }) => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/demo/rest/data/status"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn collection_invalid_json() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/demo/rest/data/status");
                then.status(200).body("<html>login</html>");
            })
            .await;

        let result = RestClient::new()
            .collection(&server.url("/demo/rest/data/status"))
            .await;
        assert!(matches!(result, Err(NetworkError::Decode { .. })));
    }

    #[tokio::test]
    async fn search_validation_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/demo/rest/data/issue");
                then.status(400).json_body(json!({
                    "error": {"status": 400, "msg": "Value \"bogus\" is invalid for \"status\""}
                }));
            })
            .await;

        let result = RestClient::new()
            .search(&server.url("/demo/rest/data/issue"))
            .await;
        match result {
            Err(ClassHelperError::Validation { value, field }) => {
                assert_eq!(value, "bogus");
                assert_eq!(field, "status");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn search_bad_request_without_field_is_fatal() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/demo/rest/data/issue");
                then.status(400)
                    .json_body(json!({"error": {"status": 400, "msg": "Bad request"}}));
            })
            .await;

        let result = RestClient::new()
            .search(&server.url("/demo/rest/data/issue"))
            .await;
        assert!(matches!(result, Err(ClassHelperError::Network(_))));
    }

    #[tokio::test]
    async fn search_permission_denied() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/demo/rest/data/user");
                then.status(403).json_body(json!({
                    "error": {"status": 403, "msg": "Permission to search user denied"}
                }));
            })
            .await;

        let result = RestClient::new()
            .search(&server.url("/demo/rest/data/user"))
            .await;
        match result {
            Err(ClassHelperError::Permission { message }) => {
                assert_eq!(message, "Permission to search user denied")
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn translations_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/demo/")
                    .query_param("@template", "translation");
                then.status(200)
                    .json_body(json!({"apply": "Anwenden", "title": "Titel"}));
            })
            .await;

        let labels = RestClient::new()
            .translations(&server.url("/demo/?@template=translation&properties=apply,title"))
            .await
            .unwrap();
        assert_eq!(labels.get("apply").map(String::as_str), Some("Anwenden"));
        assert_eq!(labels.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn basic_auth_credentials_are_sent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/demo/rest/data/user")
                    .header_exists("Authorization");
                then.status(200).json_body(json!({"data": {"collection": []}}));
            })
            .await;

        let client = RestClient::new().with_credentials(Some(Credentials {
            username: "admin".to_string(),
            password: Some("secret".to_string()),
        }));
        client
            .collection(&server.url("/demo/rest/data/user"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn probe_reports_rest_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/demo/rest");
                then.status(200)
                    .json_body(json!({"error": {"status": 403, "msg": "Forbidden"}}));
            })
            .await;
        assert!(!RestClient::new().probe(&server.url("/demo")).await);
    }

    #[tokio::test]
    async fn probe_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/demo/rest");
                then.status(200).json_body(json!({"data": {"default_version": 1}}));
            })
            .await;
        assert!(RestClient::new().probe(&server.url("/demo")).await);
    }

    #[test]
    fn validation_failure_requires_two_quoted_strings() {
        let response = ApiResponse {
            url: "u".to_string(),
            status: StatusCode::BAD_REQUEST,
            body: json!({"error": {"msg": "Unknown \"status\""}}),
        };
        assert_eq!(response.validation_failure(), None);
    }
}
