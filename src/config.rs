//! Configuration management for the contact sync service.
//!
//! Loads and validates configuration from environment variables, with an
//! optional `.env` file picked up via dotenvy.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the contact sync service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity service base URL
    pub identity_api_url: String,

    /// Identity service API key
    pub identity_api_key: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Address the HTTP server binds to (default: "0.0.0.0:8080")
    pub bind_addr: String,

    /// Contacts per listing page (default: 20)
    pub page_size: usize,

    /// Numbers rejected by the acceptability check, already in digit form
    pub blocked_numbers: Vec<String>,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `IDENTITY_API_BASE_URL`: Base URL for the identity service
    /// - `IDENTITY_API_KEY`: API key for authentication
    ///
    /// Optional environment variables:
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `CONTACTS_PAGE_SIZE`: Page size for listings (default: 20)
    /// - `BLOCKED_NUMBERS`: Comma-separated digit strings (default: empty)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present, without failing when it is absent
        let _ = dotenvy::dotenv();

        let identity_api_url = env::var("IDENTITY_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("IDENTITY_API_BASE_URL".to_string()))?;

        let identity_api_key = env::var("IDENTITY_API_KEY")
            .map_err(|_| ConfigError::MissingVar("IDENTITY_API_KEY".to_string()))?;

        if !identity_api_url.starts_with("http://") && !identity_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "IDENTITY_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if identity_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "IDENTITY_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let page_size = Self::parse_env_usize("CONTACTS_PAGE_SIZE", 20)?;

        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CONTACTS_PAGE_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let blocked_numbers = Self::parse_blocked_numbers()?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            identity_api_url,
            identity_api_key,
            request_timeout,
            bind_addr,
            page_size,
            blocked_numbers,
            log_level,
        })
    }

    /// Parse the comma-separated blocklist; entries must be digit strings.
    fn parse_blocked_numbers() -> ConfigResult<Vec<String>> {
        let Ok(raw) = env::var("BLOCKED_NUMBERS") else {
            return Ok(Vec::new());
        };

        let mut numbers = Vec::new();
        for entry in raw.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            if !entry.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::InvalidValue {
                    var: "BLOCKED_NUMBERS".to_string(),
                    reason: format!("Entries must be digit strings, got: {}", entry),
                });
            }
            numbers.push(entry.to_string());
        }
        Ok(numbers)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            identity_api_url: String::new(),
            identity_api_key: String::new(),
            request_timeout: 10,
            bind_addr: "0.0.0.0:8080".to_string(),
            page_size: 20,
            blocked_numbers: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.blocked_numbers.is_empty());
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("IDENTITY_API_BASE_URL", "not-a-url");
        guard.set("IDENTITY_API_KEY", "test-key");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "IDENTITY_API_BASE_URL");
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_api_key() {
        let mut guard = EnvGuard::new();
        guard.set("IDENTITY_API_BASE_URL", "https://identity.example.com");
        guard.set("IDENTITY_API_KEY", "   ");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "IDENTITY_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("IDENTITY_API_BASE_URL", "https://identity.example.com");
        guard.set("IDENTITY_API_KEY", "test-key-123");
        guard.set("CONTACTS_PAGE_SIZE", "50");
        guard.set("BLOCKED_NUMBERS", "11999999999, 11888888888,");

        let result = Config::from_env();
        assert!(result.is_ok(), "expected valid config, got {result:?}");

        let config = result.unwrap();
        assert_eq!(config.identity_api_url, "https://identity.example.com");
        assert_eq!(config.identity_api_key, "test-key-123");
        assert_eq!(config.page_size, 50);
        assert_eq!(
            config.blocked_numbers,
            vec!["11999999999".to_string(), "11888888888".to_string()]
        );
    }

    #[test]
    #[serial]
    fn test_config_rejects_non_digit_blocklist() {
        let mut guard = EnvGuard::new();
        guard.set("IDENTITY_API_BASE_URL", "https://identity.example.com");
        guard.set("IDENTITY_API_KEY", "test-key");
        guard.set("BLOCKED_NUMBERS", "11999999999,abc");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "BLOCKED_NUMBERS");
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_zero_page_size() {
        let mut guard = EnvGuard::new();
        guard.set("IDENTITY_API_BASE_URL", "https://identity.example.com");
        guard.set("IDENTITY_API_KEY", "test-key");
        guard.set("CONTACTS_PAGE_SIZE", "0");

        let result = Config::from_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_TIMEOUT", "42");

        let result = Config::parse_env_u64("TEST_TIMEOUT", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_TIMEOUT_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_TIMEOUT_INVALID", 10);
        assert!(result.is_err());
    }
}
