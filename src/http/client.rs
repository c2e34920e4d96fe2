//! HTTP client for contract verification
//!
//! Thin reqwest wrapper that classifies transport failures for the executor.

#![allow(dead_code)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::Method;

/// Transport-level errors, classified per failure mode
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection failed to {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid header '{0}'")]
    InvalidHeader(String),
}

/// HTTP client with a fixed per-request timeout
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Option<String>,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a client with the given per-request timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: None,
            timeout_secs,
        })
    }

    /// Set the base URL prepended to relative request paths
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Build the full URL; absolute URLs pass through untouched
    fn build_url(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) => {
                if path.starts_with("http://") || path.starts_with("https://") {
                    path.to_string()
                } else {
                    format!("{}{}", base.trim_end_matches('/'), path)
                }
            }
            None => path.to_string(),
        }
    }

    /// Send one request, classifying the failure mode on error
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = self.build_url(&request.url);
        debug!("Sending {} request to {}", request.method, url);

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut req_builder = self.client.request(method, &url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let start = std::time::Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                HttpError::ConnectionFailed(url.clone())
            } else {
                HttpError::RequestFailed(e.to_string())
            }
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        let mut response_headers = HashMap::new();
        for (key, value) in response.headers().iter() {
            if let Ok(v) = value.to_str() {
                response_headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| HttpError::RequestFailed(e.to_string()))?;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers: response_headers,
            body,
            duration_ms,
        })
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Attach a JSON body with the matching content type
    pub fn json(mut self, value: &serde_json::Value) -> Self {
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(value.to_string());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// HTTP response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Parse the body as JSON, if it is structured data
    pub fn body_json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }

    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_request_builder() {
        let req = HttpRequest::get("/metadata/version")
            .header("Authorization", "Bearer token")
            .header("X-Custom", "value");

        assert_eq!(req.method, Method::Get);
        assert_eq!(req.headers.len(), 2);
        assert!(req.body.is_none());
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = HttpRequest::post("/sequences/batch").json(&json!({"count": 5}));
        assert_eq!(
            req.headers.get("Content-Type").unwrap(),
            "application/json"
        );
        assert!(req.body.unwrap().contains("\"count\":5"));
    }

    #[test]
    fn test_build_url() {
        let client = HttpClient::with_timeout(10)
            .unwrap()
            .base_url("http://localhost:9090/api/v1");

        assert_eq!(
            client.build_url("/metadata/version"),
            "http://localhost:9090/api/v1/metadata/version"
        );
        // Absolute URLs bypass the base
        assert_eq!(
            client.build_url("http://localhost:9090/health"),
            "http://localhost:9090/health"
        );
    }

    #[test]
    fn test_http_response_helpers() {
        let resp = HttpResponse {
            status_code: 404,
            headers: HashMap::new(),
            body: r#"{"code": 404, "message": "not found"}"#.to_string(),
            duration_ms: 3,
        };

        assert!(!resp.is_success());
        assert!(resp.is_client_error());
        assert_eq!(resp.body_json().unwrap()["code"], 404);
    }
}
