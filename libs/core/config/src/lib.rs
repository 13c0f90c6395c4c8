pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment (controls log format)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Load an environment variable, falling back to `default` when unset or empty.
///
/// Empty values count as unset so that `MAILINGLIST_DB=` behaves like an
/// absent variable.
pub fn env_or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Load and parse an environment variable, using `default` when unset.
pub fn env_parse_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });
    }

    #[test]
    fn test_env_or_default_with_value() {
        temp_env::with_var("MAILINGLIST_TEST_VAR", Some("custom.db"), || {
            assert_eq!(env_or_default("MAILINGLIST_TEST_VAR", "list.db"), "custom.db");
        });
    }

    #[test]
    fn test_env_or_default_treats_empty_as_unset() {
        temp_env::with_var("MAILINGLIST_TEST_EMPTY", Some(""), || {
            assert_eq!(env_or_default("MAILINGLIST_TEST_EMPTY", "list.db"), "list.db");
        });
    }

    #[test]
    fn test_env_parse_or_default_reports_key() {
        temp_env::with_var("MAILINGLIST_TEST_PORT", Some("not-a-number"), || {
            let err = env_parse_or_default::<u16>("MAILINGLIST_TEST_PORT", "8080").unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "MAILINGLIST_TEST_PORT"));
        });
    }
}
