//! Declarative case specifications
//!
//! Defines HTTP methods, case specifications, suites, and the registry.

#![allow(dead_code)]

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors in a case declaration, rejected before any request is sent
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpecError {
    #[error("Unsupported HTTP method: {0}")]
    UnknownMethod(String),

    #[error("Case '{0}' declares no acceptable status codes")]
    EmptyAcceptable(String),

    #[error("Case '{0}' has an empty target path")]
    EmptyPath(String),
}

/// Supported HTTP methods
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Parse a method name, case-insensitive
    pub fn parse(s: &str) -> Result<Method, SpecError> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(SpecError::UnknownMethod(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether a request body is attached for this method
    pub fn takes_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }

    /// Get all supported methods
    pub fn all() -> Vec<Method> {
        vec![Method::Get, Method::Post, Method::Put, Method::Delete]
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Method::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn default_accept() -> Vec<u16> {
    vec![200, 201]
}

fn default_auth() -> bool {
    true
}

/// One declarative HTTP request plus its acceptance criteria
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseSpec {
    /// Human-readable case name used in reports
    pub name: String,

    /// HTTP method
    pub method: Method,

    /// Target path, relative to the API base
    pub path: String,

    /// Optional JSON request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    /// Acceptable HTTP status codes, never empty
    #[serde(default = "default_accept")]
    pub accept: Vec<u16>,

    /// Attach the run credential as a bearer header
    #[serde(default = "default_auth")]
    pub auth: bool,

    /// Additional header overrides, applied last
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl CaseSpec {
    pub fn new(name: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            body: None,
            accept: default_accept(),
            auth: default_auth(),
            headers: HashMap::new(),
        }
    }

    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, Method::Get, path)
    }

    pub fn post(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, Method::Post, path)
    }

    pub fn put(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, Method::Put, path)
    }

    pub fn delete(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, Method::Delete, path)
    }

    /// Set the JSON request body
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Replace the acceptable status codes
    pub fn accept(mut self, codes: &[u16]) -> Self {
        self.accept = codes.to_vec();
        self
    }

    /// Send the request without the run credential
    pub fn no_auth(mut self) -> Self {
        self.auth = false;
        self
    }

    /// Add a header override
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Check the declaration invariants
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.accept.is_empty() {
            return Err(SpecError::EmptyAcceptable(self.name.clone()));
        }
        if self.path.is_empty() {
            return Err(SpecError::EmptyPath(self.name.clone()));
        }
        Ok(())
    }

    /// Whether the observed status code satisfies this case
    pub fn accepts(&self, status_code: u16) -> bool {
        self.accept.contains(&status_code)
    }
}

impl fmt::Display for CaseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method, self.path, self.name)
    }
}

/// A named, ordered group of cases
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Suite {
    pub name: String,
    pub cases: Vec<CaseSpec>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Append a case, preserving declaration order
    pub fn case(mut self, spec: CaseSpec) -> Self {
        self.cases.push(spec);
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Ordered catalogue of suites; validated at construction, before any traffic
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registry {
    pub suites: Vec<Suite>,
}

impl Registry {
    /// Build a registry, rejecting malformed case declarations
    pub fn new(suites: Vec<Suite>) -> Result<Self, SpecError> {
        for suite in &suites {
            for case in &suite.cases {
                case.validate()?;
            }
        }
        Ok(Self { suites })
    }

    /// Load a registry from a YAML or JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry file: {}", path.display()))?;

        let registry: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML registry: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON registry: {}", path.display()))?
        };

        registry.validate()?;
        Ok(registry)
    }

    /// Save the registry to a YAML or JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize registry")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize registry")?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write registry file: {}", path.display()))?;
        Ok(())
    }

    /// Re-check every case declaration
    pub fn validate(&self) -> Result<(), SpecError> {
        for suite in &self.suites {
            for case in &suite.cases {
                case.validate()?;
            }
        }
        Ok(())
    }

    /// Total number of declared cases across all suites
    pub fn case_count(&self) -> usize {
        self.suites.iter().map(|s| s.cases.len()).sum()
    }

    /// Find a suite by name
    pub fn suite(&self, name: &str) -> Option<&Suite> {
        self.suites.iter().find(|s| s.name == name)
    }

    /// Restrict the registry to a single named suite
    pub fn only(&self, name: &str) -> Option<Registry> {
        self.suite(name).map(|s| Registry {
            suites: vec![s.clone()],
        })
    }
}

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parse_case_insensitive() {
        assert_eq!(Method::parse("get"), Ok(Method::Get));
        assert_eq!(Method::parse("Post"), Ok(Method::Post));
        assert_eq!(Method::parse("DELETE"), Ok(Method::Delete));
    }

    #[test]
    fn test_method_parse_unknown() {
        assert_eq!(
            Method::parse("PATCH"),
            Err(SpecError::UnknownMethod("PATCH".to_string()))
        );
    }

    #[test]
    fn test_method_takes_body() {
        assert!(Method::Post.takes_body());
        assert!(Method::Put.takes_body());
        assert!(!Method::Get.takes_body());
        assert!(!Method::Delete.takes_body());
    }

    #[test]
    fn test_case_spec_defaults() {
        let spec = CaseSpec::get("获取元数据版本", "/metadata/version");
        assert_eq!(spec.accept, vec![200, 201]);
        assert!(spec.auth);
        assert!(spec.body.is_none());
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_case_spec_builder() {
        let spec = CaseSpec::post("批量获取序号", "/sequences/batch")
            .body(json!({"seqName": "ORDER_NO", "count": 5}))
            .accept(&[200, 201])
            .header("X-Request-Id", "abc");

        assert!(spec.accepts(200));
        assert!(!spec.accepts(404));
        assert_eq!(spec.headers.get("X-Request-Id").unwrap(), "abc");
    }

    #[test]
    fn test_empty_accept_rejected() {
        let spec = CaseSpec::get("bad", "/x").accept(&[]);
        assert_eq!(
            spec.validate(),
            Err(SpecError::EmptyAcceptable("bad".to_string()))
        );
    }

    #[test]
    fn test_registry_rejects_invalid_case() {
        let suite = Suite::new("broken").case(CaseSpec::get("bad", "/x").accept(&[]));
        assert!(Registry::new(vec![suite]).is_err());
    }

    #[test]
    fn test_registry_counts() {
        let registry = Registry::new(vec![
            Suite::new("a").case(CaseSpec::get("one", "/one")),
            Suite::new("b")
                .case(CaseSpec::get("two", "/two"))
                .case(CaseSpec::delete("three", "/three").accept(&[200, 404])),
        ])
        .unwrap();

        assert_eq!(registry.case_count(), 3);
        assert_eq!(registry.suite("b").unwrap().len(), 2);
        assert_eq!(registry.only("a").unwrap().case_count(), 1);
    }

    #[test]
    fn test_registry_yaml_unknown_method_rejected() {
        let yaml = r#"
suites:
  - name: broken
    cases:
      - name: bad
        method: PATCH
        path: /x
"#;
        let parsed: Result<Registry, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_registry_yaml_roundtrip() {
        let yaml = r#"
suites:
  - name: metadata
    cases:
      - name: 获取元数据版本
        method: GET
        path: /metadata/version
        accept: [200]
      - name: 刷新元数据缓存
        method: POST
        path: /metadata/refresh
"#;
        let registry: Registry = serde_yaml::from_str(yaml).unwrap();
        assert!(registry.validate().is_ok());

        let first = &registry.suites[0].cases[0];
        assert_eq!(first.method, Method::Get);
        assert_eq!(first.accept, vec![200]);

        let second = &registry.suites[0].cases[1];
        assert_eq!(second.accept, vec![200, 201]);
        assert!(second.auth);
    }
}
