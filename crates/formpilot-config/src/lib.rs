//! # Formpilot Config
//!
//! Configuration management for the formpilot engine: schema, TOML loading
//! with environment substitution, and semantic validation.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
