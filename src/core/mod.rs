pub mod hasher;
pub mod registration;
pub mod response;
pub mod validator;

pub use crate::domain::model::{RegistrationRequest, User, ValidationOutcome, VerificationStatus};
pub use crate::domain::ports::{ConfigProvider, CredentialHasher, UserRepository};
pub use crate::utils::error::Result;
