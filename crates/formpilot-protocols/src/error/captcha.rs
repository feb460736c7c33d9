//! CAPTCHA collaborator errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptchaError {
    #[error("Unsupported CAPTCHA kind: {0}")]
    Unsupported(String),

    #[error("CAPTCHA solving failed: {0}")]
    SolveFailed(String),
}
