use crate::domain::model::{ErrorDetail, RegistrationRequest, ValidationOutcome};
use crate::utils::error::{RegistrationError, Result, INVALID_JSON_MESSAGE};
use crate::utils::logger::Logger;
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("email pattern compiles")
});

pub const MIN_PASSWORD_LENGTH: usize = 8;
const PHONE_PATTERN: &str = "/^[0-9]{10,15}$/";

/// Extra rule applied after the presence/type/emptiness checks. Returns the
/// violation message, if any.
pub type Check = fn(field: &str, value: &str) -> Option<String>;

pub struct FieldRule {
    pub name: &'static str,
    /// Strip surrounding whitespace before checking and storing.
    pub trim: bool,
    pub checks: &'static [Check],
}

pub struct Schema {
    pub fields: &'static [FieldRule],
}

pub static REGISTRATION_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule {
            name: "email",
            trim: true,
            checks: &[check_email],
        },
        FieldRule {
            name: "password",
            trim: false,
            checks: &[check_password_length],
        },
        FieldRule {
            name: "firstName",
            trim: true,
            checks: &[],
        },
        FieldRule {
            name: "lastName",
            trim: true,
            checks: &[],
        },
        FieldRule {
            name: "phoneNumber",
            trim: false,
            checks: &[check_phone_number],
        },
    ],
};

fn check_email(field: &str, value: &str) -> Option<String> {
    (!EMAIL_PATTERN.is_match(value)).then(|| format!("\"{}\" must be a valid email", field))
}

/// Length is measured in UTF-16 code units, as browsers and Joi measure it.
fn check_password_length(field: &str, value: &str) -> Option<String> {
    (value.encode_utf16().count() < MIN_PASSWORD_LENGTH).then(|| {
        format!(
            "\"{}\" length must be at least {} characters long",
            field, MIN_PASSWORD_LENGTH
        )
    })
}

fn check_phone_number(field: &str, value: &str) -> Option<String> {
    let valid = (10..=15).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit());
    (!valid).then(|| {
        format!(
            "\"{}\" with value \"{}\" fails to match the required pattern: {}",
            field, value, PHONE_PATTERN
        )
    })
}

/// Request body as it arrived: serialized text, an already-parsed value,
/// or nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBody {
    Text(String),
    Json(Value),
    Empty,
}

impl From<Option<Value>> for RawBody {
    fn from(body: Option<Value>) -> Self {
        match body {
            None | Some(Value::Null) => Self::Empty,
            Some(Value::String(text)) => Self::Text(text),
            Some(other) => Self::Json(other),
        }
    }
}

impl From<&str> for RawBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl RawBody {
    pub fn parse(self) -> Result<Value> {
        match self {
            Self::Text(text) => serde_json::from_str(&text).map_err(RegistrationError::MalformedInput),
            Self::Json(value) => Ok(value),
            Self::Empty => Ok(Value::Object(Map::new())),
        }
    }
}

impl Schema {
    /// Parses `raw` and checks every field, collecting all violations in
    /// declaration order. The normalized map holds only declared fields.
    pub fn check(&self, raw: RawBody, logger: &dyn Logger) -> Result<Map<String, Value>> {
        let input = match raw.parse() {
            Ok(input) => input,
            Err(err) => {
                logger.warn(INVALID_JSON_MESSAGE, json!({ "error": err.to_string() }));
                return Err(err);
            }
        };

        let Value::Object(object) = input else {
            let errors = vec!["\"value\" must be of type object".to_string()];
            logger.warn("Validation failed", json!({ "errors": errors }));
            return Err(RegistrationError::ValidationFailure(errors));
        };

        let mut normalized = Map::new();
        let mut errors = Vec::new();

        for rule in self.fields {
            match rule.apply(object.get(rule.name)) {
                Ok(value) => {
                    normalized.insert(rule.name.to_string(), Value::String(value));
                }
                Err(message) => errors.push(message),
            }
        }

        if !errors.is_empty() {
            logger.warn("Validation failed", json!({ "errors": errors }));
            return Err(RegistrationError::ValidationFailure(errors));
        }

        let fields: Vec<&str> = normalized.keys().map(String::as_str).collect();
        logger.info("Validation succeeded", json!({ "fields": fields }));
        Ok(normalized)
    }

    pub fn validate(&self, raw: RawBody, logger: &dyn Logger) -> ValidationOutcome<Map<String, Value>> {
        match self.check(raw, logger) {
            Ok(value) => ValidationOutcome::Valid(value),
            Err(err) => match err.detail() {
                ErrorDetail::Messages(messages) => ValidationOutcome::Invalid(messages),
                ErrorDetail::Message(message) => ValidationOutcome::Invalid(vec![message]),
            },
        }
    }
}

impl FieldRule {
    fn apply(&self, value: Option<&Value>) -> std::result::Result<String, String> {
        let raw = match value {
            None | Some(Value::Null) => return Err(format!("\"{}\" is required", self.name)),
            Some(Value::String(raw)) => raw,
            Some(_) => return Err(format!("\"{}\" must be a string", self.name)),
        };

        let value = if self.trim { raw.trim() } else { raw.as_str() };
        if value.is_empty() {
            return Err(format!("\"{}\" is not allowed to be empty", self.name));
        }

        for check in self.checks {
            if let Some(message) = check(self.name, value) {
                return Err(message);
            }
        }

        Ok(value.to_string())
    }
}

/// Validates a signup body into a typed request, keeping the
/// malformed-input and field-failure cases apart.
pub fn validate_registration(raw: RawBody, logger: &dyn Logger) -> Result<RegistrationRequest> {
    let normalized = REGISTRATION_SCHEMA.check(raw, logger)?;
    Ok(serde_json::from_value(Value::Object(normalized))?)
}
