use crate::domain::model::ErrorDetail;
use crate::utils::logger::Logger;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const RESPONSE_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Credentials", "true"),
    ("Content-Type", "application/json"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Success {
        status_code: u16,
        data: Value,
    },
    Failure {
        status_code: u16,
        message: String,
        detail: Option<ErrorDetail>,
    },
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Payload<'a> {
    Success {
        data: &'a Value,
    },
    Error {
        message: &'a str,
        #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
        detail: Option<&'a ErrorDetail>,
    },
}

/// API Gateway proxy response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { status_code, .. } | Self::Failure { status_code, .. } => *status_code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// JSON body sent to the caller.
    pub fn body(&self) -> Value {
        let payload = match self {
            Self::Success { data, .. } => Payload::Success { data },
            Self::Failure { message, detail, .. } => Payload::Error {
                message,
                detail: detail.as_ref(),
            },
        };
        serde_json::to_value(payload).unwrap_or_else(|_| json!({ "status": "error" }))
    }

    pub fn headers() -> BTreeMap<String, String> {
        RESPONSE_HEADERS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    pub fn into_http(self) -> HttpResponse {
        HttpResponse {
            status_code: self.status_code(),
            headers: Self::headers(),
            body: self.body().to_string(),
        }
    }
}

/// Shapes every response the endpoint returns and logs each one once.
#[derive(Clone)]
pub struct ResponseBuilder {
    production: bool,
    logger: Arc<dyn Logger>,
}

impl ResponseBuilder {
    pub fn new(production: bool, logger: Arc<dyn Logger>) -> Self {
        Self { production, logger }
    }

    pub fn success(&self, data: Value, status_code: u16) -> ApiResponse {
        self.logger.info(
            "Success response",
            json!({ "statusCode": status_code, "data": data }),
        );
        ApiResponse::Success { status_code, data }
    }

    /// Detail is logged in full but only returned outside production.
    pub fn error(&self, status_code: u16, message: &str, detail: Option<ErrorDetail>) -> ApiResponse {
        self.logger.error(
            &format!("Error response: {}", message),
            json!({ "statusCode": status_code, "errorDetails": detail }),
        );

        ApiResponse::Failure {
            status_code,
            message: message.to_string(),
            detail: if self.production { None } else { detail },
        }
    }
}
