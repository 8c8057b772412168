use crate::utils::error::{RegistrationError, Result};

/// Startup-time configuration checks. Request payloads go through
/// `core::validator` instead.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RegistrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// DynamoDB table names: 3-255 characters of `[A-Za-z0-9_.-]`.
pub fn validate_table_name(field_name: &str, table: &str) -> Result<()> {
    validate_non_empty_string(field_name, table)?;

    if table.len() < 3 || table.len() > 255 {
        return Err(RegistrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: table.to_string(),
            reason: "Table name must be between 3 and 255 characters".to_string(),
        });
    }

    if !table
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(RegistrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: table.to_string(),
            reason: "Table name can only contain letters, numbers, underscores, hyphens, and dots"
                .to_string(),
        });
    }

    Ok(())
}

pub fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        return Err(RegistrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: level.to_string(),
            reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
        });
    }
    Ok(())
}
