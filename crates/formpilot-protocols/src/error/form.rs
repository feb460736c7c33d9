//! Engine-level errors.
//!
//! Everything except [`FormError::FormMissing`] is reported at field,
//! rule or dependency granularity and never aborts a pass.

use thiserror::Error;

use super::{CaptchaError, PageError, SensitiveError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Condition on '{field}' could not be evaluated: {message}")]
    ConditionEvaluation { field: String, message: String },

    #[error("Validation failed for '{field}': {}", messages.join("; "))]
    Validation { field: String, messages: Vec<String> },

    #[error("Action on '{field}' failed: {message}")]
    ActionApplication { field: String, message: String },

    #[error("Encryption unavailable: no secret configured")]
    EncryptionUnavailable,

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// The only failure that is fatal to a whole pass.
    #[error("Target form not found on {location}")]
    FormMissing { location: String },

    #[error("Autofill store error: {0}")]
    Autofill(String),

    #[error("CAPTCHA error: {0}")]
    Captcha(#[from] CaptchaError),

    #[error("Page error: {0}")]
    Page(#[from] PageError),
}

impl From<SensitiveError> for FormError {
    fn from(err: SensitiveError) -> Self {
        match err {
            SensitiveError::NoKey => FormError::EncryptionUnavailable,
            SensitiveError::InvalidCiphertext(msg) => FormError::DecryptionFailed(msg),
            SensitiveError::EncryptionFailed => FormError::EncryptionFailed,
        }
    }
}

impl FormError {
    /// Whether this error aborts the whole pass.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FormError::FormMissing { .. })
    }
}
