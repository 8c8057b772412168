use crate::config::AppConfig;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub app: AppConfig,
    /// Falls back to the SDK's default region chain when unset.
    pub region: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            app: AppConfig::from_env()?,
            region: env::var("AWS_REGION").ok().filter(|r| !r.trim().is_empty()),
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn users_table(&self) -> &str {
        &self.app.users_table
    }

    fn log_level(&self) -> &str {
        &self.app.log_level
    }

    fn production(&self) -> bool {
        self.app.production
    }

    fn debug(&self) -> bool {
        self.app.debug
    }

    fn bcrypt_cost(&self) -> u32 {
        self.app.bcrypt_cost
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        self.app.validate()?;

        if let Some(region) = &self.region {
            validate_aws_region("aws_region", region)?;
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    use crate::utils::error::RegistrationError;

    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(RegistrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}
