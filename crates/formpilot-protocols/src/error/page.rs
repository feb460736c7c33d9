//! Page collaborator errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Field name '{name}' matches {count} controls")]
    AmbiguousField { name: String, count: usize },

    #[error("Script execution failed: {0}")]
    Script(String),

    #[error("Interaction failed: {0}")]
    Interaction(String),

    #[error("Option '{value}' not found in '{field}'")]
    OptionNotFound { field: String, value: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}
