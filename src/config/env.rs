//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

#![allow(dead_code)]

use std::env;

use super::HarnessConfig;

/// Environment variable prefix
const ENV_PREFIX: &str = "API_HARNESS";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Base URL from API_HARNESS_BASE_URL
    pub base_url: Option<String>,
    /// Username from API_HARNESS_USERNAME
    pub username: Option<String>,
    /// Password from API_HARNESS_PASSWORD
    pub password: Option<String>,
    /// Timeout from API_HARNESS_TIMEOUT
    pub timeout: Option<u64>,
    /// Parallel from API_HARNESS_PARALLEL
    pub parallel: Option<bool>,
    /// Output format from API_HARNESS_FORMAT
    pub format: Option<String>,
    /// Config file from API_HARNESS_CONFIG
    pub config_file: Option<String>,
    /// Verbose from API_HARNESS_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_url: get_env("BASE_URL"),
            username: get_env("USERNAME"),
            password: get_env("PASSWORD"),
            timeout: get_env_parse("TIMEOUT"),
            parallel: get_env_bool("PARALLEL"),
            format: get_env("FORMAT"),
            config_file: get_env("CONFIG"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.username.is_some()
            || self.password.is_some()
            || self.timeout.is_some()
            || self.parallel.is_some()
            || self.format.is_some()
            || self.config_file.is_some()
            || self.verbose.is_some()
    }

    /// Fold the overrides into a loaded configuration
    pub fn apply_to(&self, config: &mut HarnessConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(username) = &self.username {
            config.login.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.login.password = password.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(parallel) = self.parallel {
            config.parallel = parallel;
        }
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_BASE_URL:  {:?}", ENV_PREFIX, self.base_url);
        println!("  {}_USERNAME:  {:?}", ENV_PREFIX, self.username);
        println!(
            "  {}_PASSWORD:  {}",
            ENV_PREFIX,
            if self.password.is_some() { "set" } else { "unset" }
        );
        println!("  {}_TIMEOUT:   {:?}", ENV_PREFIX, self.timeout);
        println!("  {}_PARALLEL:  {:?}", ENV_PREFIX, self.parallel);
        println!("  {}_FORMAT:    {:?}", ENV_PREFIX, self.format);
        println!("  {}_CONFIG:    {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_VERBOSE:   {:?}", ENV_PREFIX, self.verbose);
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables (useful for testing)
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_BASE_URL"), url.into()));
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_USERNAME"), username.into()));
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_PASSWORD"), password.into()));
        self
    }

    pub fn timeout(mut self, timeout: u64) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_TIMEOUT"), timeout.to_string()));
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_PARALLEL"), parallel.to_string()));
        self
    }

    /// Apply environment variables
    pub fn apply(self) {
        for (key, value) in self.vars {
            env::set_var(key, value);
        }
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        self.apply();

        EnvGuard { previous }
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all API_HARNESS environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_BASE_URL   Root URL of the target service");
    println!("  {ENV_PREFIX}_USERNAME   Login username");
    println!("  {ENV_PREFIX}_PASSWORD   Login password");
    println!("  {ENV_PREFIX}_TIMEOUT    Per-request timeout in seconds");
    println!("  {ENV_PREFIX}_PARALLEL   Run suites concurrently (true/false)");
    println!("  {ENV_PREFIX}_FORMAT     Output format (table, json, csv)");
    println!("  {ENV_PREFIX}_CONFIG     Path to configuration file");
    println!("  {ENV_PREFIX}_VERBOSE    Enable verbose output (true/false)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_BASE_URL=http://10.0.0.100:9090");
    println!("  api-harness run");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.base_url.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_env_builder() {
        let _guard = EnvBuilder::new()
            .base_url("http://10.0.0.1:9090")
            .username("tester")
            .timeout(60)
            .apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.base_url, Some("http://10.0.0.1:9090".to_string()));
        assert_eq!(config.username, Some("tester".to_string()));
        assert_eq!(config.timeout, Some(60));
    }

    #[test]
    fn test_apply_to_config() {
        let env = EnvConfig {
            base_url: Some("http://10.0.0.2:8080".to_string()),
            timeout: Some(5),
            ..Default::default()
        };

        let mut config = HarnessConfig::default();
        env.apply_to(&mut config);

        assert_eq!(config.base_url, "http://10.0.0.2:8080");
        assert_eq!(config.timeout_secs, 5);
        // Untouched fields keep their defaults
        assert_eq!(config.login.username, "admin");
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = EnvBuilder::new().parallel(true).apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.parallel, Some(true));
    }
}
