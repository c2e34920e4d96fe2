//! Authentication session management
//!
//! Acquires one credential per run and exposes it to authenticated cases.
//! Login failure degrades to a placeholder token instead of aborting: cases
//! still execute and the target's rejections end up in the report.

#![allow(dead_code)]

use anyhow::Result;
use tracing::{info, warn};

use crate::config::{HarnessConfig, LoginConfig};
use crate::http::{HttpClient, HttpRequest};

/// Token used when login does not succeed
pub const PLACEHOLDER_TOKEN: &str = "test_token_for_testing";

/// The run credential, immutable after acquisition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    /// Token from a successful login
    Authenticated(String),

    /// Placeholder token after a failed login
    Degraded(String),
}

impl Credential {
    pub fn token(&self) -> &str {
        match self {
            Credential::Authenticated(token) | Credential::Degraded(token) => token,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Credential::Degraded(_))
    }

    /// Header value for the Authorization header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }
}

/// Acquires and holds the authentication credential for a run
pub struct SessionManager {
    client: HttpClient,
    login_url: String,
    login: LoginConfig,
}

impl SessionManager {
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        let client = HttpClient::with_timeout(config.timeout_secs)?;
        Ok(Self {
            client,
            login_url: config.login_url(),
            login: config.login.clone(),
        })
    }

    /// Acquire the run credential, exactly once per run.
    ///
    /// Any failure mode (non-200, malformed body, missing token field,
    /// transport error) degrades to the placeholder token so downstream
    /// cases still execute.
    pub async fn acquire(&self) -> Credential {
        match self.try_login().await {
            Ok(token) => {
                info!("Login successful, token acquired");
                Credential::Authenticated(token)
            }
            Err(reason) => {
                warn!("Login failed ({reason}), continuing with placeholder token");
                Credential::Degraded(PLACEHOLDER_TOKEN.to_string())
            }
        }
    }

    async fn try_login(&self) -> Result<String, String> {
        let request =
            HttpRequest::post(&self.login_url).json(&self.login.to_request_body());

        let response = self
            .client
            .send(&request)
            .await
            .map_err(|e| e.to_string())?;

        if response.status_code != 200 {
            return Err(format!("HTTP {}", response.status_code));
        }

        let body = response
            .body_json()
            .ok_or_else(|| "response body is not JSON".to_string())?;

        body.pointer("/data/token")
            .and_then(|v| v.as_str())
            .map(|token| token.to_string())
            .ok_or_else(|| "response has no data.token field".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> HarnessConfig {
        HarnessConfig::default().with_base_url(server.uri())
    }

    #[test]
    fn test_credential_accessors() {
        let real = Credential::Authenticated("abc".to_string());
        assert_eq!(real.token(), "abc");
        assert_eq!(real.bearer(), "Bearer abc");
        assert!(!real.is_degraded());

        let fallback = Credential::Degraded(PLACEHOLDER_TOKEN.to_string());
        assert!(fallback.is_degraded());
        assert_eq!(fallback.token(), PLACEHOLDER_TOKEN);
    }

    #[tokio::test]
    async fn test_acquire_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": {"token": "jwt-token-xyz", "user": {"username": "admin"}}
            })))
            .mount(&server)
            .await;

        let manager = SessionManager::new(&config_for(&server)).unwrap();
        let credential = manager.acquire().await;

        assert_eq!(credential, Credential::Authenticated("jwt-token-xyz".to_string()));
    }

    #[tokio::test]
    async fn test_acquire_degrades_on_401() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": 401, "message": "bad credentials"
            })))
            .mount(&server)
            .await;

        let manager = SessionManager::new(&config_for(&server)).unwrap();
        let credential = manager.acquire().await;

        assert!(credential.is_degraded());
        assert_eq!(credential.token(), PLACEHOLDER_TOKEN);
    }

    #[tokio::test]
    async fn test_acquire_degrades_on_missing_token_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200, "data": {"user": {"username": "admin"}}
            })))
            .mount(&server)
            .await;

        let manager = SessionManager::new(&config_for(&server)).unwrap();
        assert!(manager.acquire().await.is_degraded());
    }

    #[tokio::test]
    async fn test_acquire_degrades_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let manager = SessionManager::new(&config_for(&server)).unwrap();
        assert!(manager.acquire().await.is_degraded());
    }

    #[tokio::test]
    async fn test_acquire_degrades_on_unreachable_target() {
        // Nothing listens on port 1
        let config = HarnessConfig::default().with_base_url("http://127.0.0.1:1");
        let manager = SessionManager::new(&config).unwrap();
        assert!(manager.acquire().await.is_degraded());
    }
}
