use crate::domain::model::{format_timestamp, User};
use crate::domain::ports::UserRepository;
use crate::utils::error::{RegistrationError, Result};
use aws_sdk_dynamodb::error::ProvideErrorMetadata;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct DynamoUserRepository {
    client: DynamoClient,
    table: String,
}

impl DynamoUserRepository {
    pub fn new(client: DynamoClient, table: String) -> Self {
        Self { client, table }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

/// Item layout shared with the other consumers of the users table.
pub fn user_to_item(user: &User) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("userId".to_string(), AttributeValue::S(user.user_id.clone())),
        ("email".to_string(), AttributeValue::S(user.email.clone())),
        ("password".to_string(), AttributeValue::S(user.password_hash.clone())),
        ("firstName".to_string(), AttributeValue::S(user.first_name.clone())),
        ("lastName".to_string(), AttributeValue::S(user.last_name.clone())),
        ("phoneNumber".to_string(), AttributeValue::S(user.phone_number.clone())),
        (
            "verificationStatus".to_string(),
            AttributeValue::S(user.verification_status.as_str().to_string()),
        ),
        ("createdAt".to_string(), AttributeValue::S(format_timestamp(&user.created_at))),
        ("updatedAt".to_string(), AttributeValue::S(format_timestamp(&user.updated_at))),
    ])
}

impl UserRepository for DynamoUserRepository {
    async fn create_user(&self, user: &User) -> Result<()> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(user_to_item(user)))
            .condition_expression("attribute_not_exists(userId)")
            .send()
            .await;

        match result {
            Ok(_output) => {
                tracing::debug!("PutItem succeeded on {}", self.table);
                Ok(())
            }
            Err(err) => Err(put_error_to_repository(err.into_service_error(), &user.user_id, &self.table)),
        }
    }
}

/// A failed `attribute_not_exists` guard names the clashing id; anything
/// else is reported against the table.
fn put_error_to_repository(err: PutItemError, user_id: &str, table: &str) -> RegistrationError {
    match err {
        PutItemError::ConditionalCheckFailedException(e) => {
            RegistrationError::repository(format!("User {} already exists", user_id), e)
        }
        other => {
            tracing::warn!("PutItem on {} failed with code {:?}", table, other.code());
            RegistrationError::repository(format!("Failed to write user to {}", table), other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RegistrationRequest;
    use crate::utils::error::error_chain;
    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::types::error::ConditionalCheckFailedException;
    use chrono::{DateTime, Utc};

    #[test]
    fn test_user_to_item_uses_string_attributes() {
        let request = RegistrationRequest {
            email: "a@b.com".to_string(),
            password: "longenough1".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            phone_number: "1234567890".to_string(),
        };
        let now = DateTime::parse_from_rfc3339("2024-05-01T10:20:30.123Z")
            .unwrap()
            .with_timezone(&Utc);
        let user = User::new_pending("u-1".to_string(), request, "$2b$10$hash".to_string(), now);

        let item = user_to_item(&user);

        assert_eq!(item.len(), 9);
        assert_eq!(item["userId"], AttributeValue::S("u-1".to_string()));
        assert_eq!(item["password"], AttributeValue::S("$2b$10$hash".to_string()));
        assert_eq!(item["verificationStatus"], AttributeValue::S("PENDING".to_string()));
        assert_eq!(item["createdAt"], item["updatedAt"]);
        assert_eq!(
            item["createdAt"],
            AttributeValue::S("2024-05-01T10:20:30.123Z".to_string())
        );
    }

    #[test]
    fn test_conditional_check_failure_names_the_duplicate_id() {
        let err = PutItemError::ConditionalCheckFailedException(
            ConditionalCheckFailedException::builder()
                .message("The conditional request failed")
                .build(),
        );

        let mapped = put_error_to_repository(err, "u-1", "UsersTable");

        assert!(matches!(mapped, RegistrationError::RepositoryError { .. }));
        assert_eq!(mapped.to_string(), "Repository error: User u-1 already exists");
        assert_eq!(mapped.status_code(), 500);
        assert!(error_chain(&mapped).contains("The conditional request failed"));
    }

    #[test]
    fn test_other_put_failures_name_the_table() {
        let err = PutItemError::generic(
            ErrorMetadata::builder()
                .code("ThrottlingException")
                .message("Rate exceeded")
                .build(),
        );

        let mapped = put_error_to_repository(err, "u-1", "UsersTable");

        assert_eq!(mapped.to_string(), "Repository error: Failed to write user to UsersTable");
    }
}
