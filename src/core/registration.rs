use crate::core::hasher::BcryptHasher;
use crate::core::response::{ApiResponse, ResponseBuilder};
use crate::core::validator::{validate_registration, RawBody};
use crate::domain::model::User;
use crate::domain::ports::{ConfigProvider, CredentialHasher, UserRepository};
use crate::utils::error::{error_chain, RegistrationError, Result};
use crate::utils::logger::Logger;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "User registered successfully";

/// Inbound event. Only `body` is read; it may be JSON text or an object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationEvent {
    #[serde(default)]
    pub body: Option<Value>,
}

impl RegistrationEvent {
    pub fn new(body: impl Into<Value>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    Hashed,
    Persisted,
    Responded,
    Rejected,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "Received",
            Self::Validated => "Validated",
            Self::Hashed => "Hashed",
            Self::Persisted => "Persisted",
            Self::Responded => "Responded",
            Self::Rejected => "Rejected",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// Turns one signup event into a persisted `PENDING` user and a response.
/// Holds no per-request state, so one instance serves concurrent calls.
pub struct RegistrationService<R: UserRepository, H: CredentialHasher> {
    repository: R,
    hasher: H,
    responses: ResponseBuilder,
    logger: Arc<dyn Logger>,
}

impl<R: UserRepository, H: CredentialHasher> RegistrationService<R, H> {
    pub fn new(repository: R, hasher: H, production: bool, logger: Arc<dyn Logger>) -> Self {
        Self {
            repository,
            hasher,
            responses: ResponseBuilder::new(production, logger.clone()),
            logger,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Always yields a response; no error escapes this boundary.
    pub async fn handle(&self, event: RegistrationEvent) -> ApiResponse {
        self.enter(Stage::Received, json!({ "hasBody": event.body.is_some() }));

        match self.register(RawBody::from(event.body)).await {
            Ok(user_id) => {
                self.enter(Stage::Responded, json!({ "userId": user_id }));
                self.logger.info(SUCCESS_MESSAGE, json!({ "userId": user_id }));
                self.responses.success(
                    json!({ "message": SUCCESS_MESSAGE, "userId": user_id }),
                    201,
                )
            }
            Err(err) => self.fail(err),
        }
    }

    async fn register(&self, raw: RawBody) -> Result<String> {
        let request = validate_registration(raw, self.logger.as_ref())?;
        self.enter(Stage::Validated, json!({}));

        let password_hash = self.hasher.hash(&request.password).await?;
        self.enter(Stage::Hashed, json!({}));

        let user_id = Uuid::new_v4().to_string();
        let user = User::new_pending(user_id, request, password_hash, Utc::now());
        self.repository.create_user(&user).await?;
        self.enter(Stage::Persisted, json!({ "userId": user.user_id }));

        self.logger.debug(
            "User record written",
            json!({ "userId": user.user_id, "createdAt": user.created_at }),
        );
        Ok(user.user_id)
    }

    fn fail(&self, err: RegistrationError) -> ApiResponse {
        let fields = json!({ "error": err.to_string(), "trace": error_chain(&err) });

        if err.status_code() < 500 {
            self.enter(Stage::Rejected, fields);
        } else {
            self.enter(Stage::Failed, fields.clone());
            self.logger.error("Error during user registration", fields);
        }

        self.responses
            .error(err.status_code(), err.public_message(), Some(err.detail()))
    }

    fn enter(&self, stage: Stage, fields: Value) {
        self.logger.info(
            &format!("Registration stage: {}", stage),
            json!({ "stage": stage.to_string(), "details": fields }),
        );
    }
}

impl<R: UserRepository> RegistrationService<R, BcryptHasher> {
    /// bcrypt at the configured cost, detail suppression per `production`.
    pub fn from_config<C: ConfigProvider>(repository: R, config: &C, logger: Arc<dyn Logger>) -> Self {
        Self::new(
            repository,
            BcryptHasher::new(config.bcrypt_cost()),
            config.production(),
            logger,
        )
    }
}
