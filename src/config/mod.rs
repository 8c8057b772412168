#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;

use crate::core::hasher::{DEFAULT_COST, MAX_COST, MIN_COST};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{RegistrationError, Result};
use crate::utils::validation::{validate_log_level, validate_range, validate_table_name, Validate};
use std::env;

pub const DEFAULT_USERS_TABLE: &str = "UsersTable";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings resolved once at startup and passed down by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub users_table: String,
    pub log_level: String,
    pub production: bool,
    pub debug: bool,
    pub bcrypt_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            users_table: DEFAULT_USERS_TABLE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            production: false,
            debug: false,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| RegistrationError::InvalidConfigValueError {
                    field: "BCRYPT_COST".to_string(),
                    value: raw.clone(),
                    reason: "Value must be an unsigned integer".to_string(),
                })?,
            None => DEFAULT_COST,
        };

        Ok(Self {
            users_table: lookup("USERS_TABLE").unwrap_or_else(|| DEFAULT_USERS_TABLE.to_string()),
            log_level: lookup("LOG_LEVEL")
                .map(|level| level.to_ascii_lowercase())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            production: lookup("APP_ENV")
                .map(|value| value.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            debug: lookup("DEBUG").map(|value| is_truthy(&value)).unwrap_or(false),
            bcrypt_cost,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

impl ConfigProvider for AppConfig {
    fn users_table(&self) -> &str {
        &self.users_table
    }

    fn log_level(&self) -> &str {
        &self.log_level
    }

    fn production(&self) -> bool {
        self.production
    }

    fn debug(&self) -> bool {
        self.debug
    }

    fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_table_name("users_table", &self.users_table)?;
        validate_log_level("log_level", &self.log_level)?;
        validate_range("bcrypt_cost", self.bcrypt_cost, MIN_COST, MAX_COST)?;

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.users_table(), "UsersTable");
        assert_eq!(config.bcrypt_cost(), 10);
        assert!(!config.production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reads_every_key() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("USERS_TABLE", "users-prod"),
            ("LOG_LEVEL", "WARN"),
            ("APP_ENV", "Production"),
            ("DEBUG", "true"),
            ("BCRYPT_COST", "12"),
        ]))
        .unwrap();

        assert_eq!(config.users_table, "users-prod");
        assert_eq!(config.log_level, "warn");
        assert!(config.production);
        assert!(config.debug);
        assert_eq!(config.bcrypt_cost, 12);
    }

    #[test]
    fn test_non_production_env_keeps_detail() {
        let config = AppConfig::from_lookup(lookup_from(&[("APP_ENV", "staging"), ("DEBUG", "no")])).unwrap();
        assert!(!config.production);
        assert!(!config.debug);
    }

    #[test]
    fn test_bad_cost_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("BCRYPT_COST", "ten")])).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidConfigValueError { .. }));

        let config = AppConfig::from_lookup(lookup_from(&[("BCRYPT_COST", "40")])).unwrap();
        assert!(config.validate().is_err());
    }
}
