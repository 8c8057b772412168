use crate::config::AppConfig;
use crate::core::hasher::DEFAULT_COST;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "user-registration")]
#[command(about = "Register a user locally against a JSON-file user store")]
pub struct CliConfig {
    /// Raw request body (JSON text)
    #[arg(long, conflicts_with = "input")]
    pub body: Option<String>,

    /// File holding the request body
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory that receives one JSON file per user
    #[arg(long, default_value = "./users")]
    pub store_path: PathBuf,

    #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_COST)]
    pub bcrypt_cost: u32,

    #[arg(long, help = "Suppress internal error detail in responses")]
    pub production: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Service settings for a local run. The table name keeps its default;
    /// records go to `store_path` instead.
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            log_level: if self.verbose { "debug" } else { "info" }.to_string(),
            production: self.production,
            debug: self.verbose,
            bcrypt_cost: self.bcrypt_cost,
            ..AppConfig::default()
        }
    }

    /// Body text from `--body` or `--input`; `None` when neither is given.
    pub async fn read_body(&self) -> Result<Option<String>> {
        if let Some(body) = &self.body {
            return Ok(Some(body.clone()));
        }
        match &self.input {
            Some(path) => Ok(Some(tokio::fs::read_to_string(path).await?)),
            None => Ok(None),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("store_path", &self.store_path.to_string_lossy())?;
        self.app_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = CliConfig::try_parse_from(["user-registration", "--body", "{}"]).unwrap();
        assert_eq!(config.body.as_deref(), Some("{}"));
        assert_eq!(config.store_path, PathBuf::from("./users"));
        assert_eq!(config.bcrypt_cost, 10);
        assert!(!config.production);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_body_and_input_conflict() {
        let result = CliConfig::try_parse_from([
            "user-registration",
            "--body",
            "{}",
            "--input",
            "payload.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_maps_to_debug() {
        let config = CliConfig::try_parse_from(["user-registration", "--verbose", "--production"]).unwrap();
        let app = config.app_config();
        assert_eq!(app.log_level, "debug");
        assert!(app.debug);
        assert!(app.production);
    }

    #[test]
    fn test_table_flag_is_not_accepted() {
        let result = CliConfig::try_parse_from(["user-registration", "--users-table", "Other"]);
        assert!(result.is_err());
    }
}
