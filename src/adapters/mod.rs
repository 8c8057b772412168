// Adapters layer: concrete UserRepository backends.

pub mod memory;

#[cfg(feature = "cli")]
pub mod local;

#[cfg(feature = "lambda")]
pub mod dynamo;
