pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::adapters::local::LocalUserRepository;
#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

#[cfg(feature = "lambda")]
pub use crate::adapters::dynamo::DynamoUserRepository;
#[cfg(feature = "lambda")]
pub use crate::config::lambda::LambdaConfig;

pub use crate::adapters::memory::InMemoryUserRepository;
pub use crate::config::AppConfig;
pub use crate::core::{
    hasher::BcryptHasher,
    registration::{RegistrationEvent, RegistrationService},
    response::{ApiResponse, HttpResponse},
};
pub use crate::utils::error::{RegistrationError, Result};
