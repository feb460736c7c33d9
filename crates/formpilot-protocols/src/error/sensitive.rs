//! Sensitive-data processing errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensitiveError {
    #[error("No encryption secret configured")]
    NoKey,

    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    #[error("Encryption failed")]
    EncryptionFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_key_display() {
        assert!(SensitiveError::NoKey.to_string().contains("No encryption secret"));
    }

    #[test]
    fn test_invalid_ciphertext_display() {
        let err = SensitiveError::InvalidCiphertext("bad base64".to_string());
        assert!(err.to_string().contains("bad base64"));
    }
}
