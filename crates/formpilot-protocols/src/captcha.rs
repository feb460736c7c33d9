//! CAPTCHA-solving collaborator.
//!
//! The engine never solves challenges itself. It hands a [`CaptchaChallenge`]
//! to a solver and injects the returned solution string into form data.

use serde::{Deserialize, Serialize};

use crate::error::CaptchaError;

/// Kind of CAPTCHA presented by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptchaKind {
    RecaptchaV2,
    Hcaptcha,
    Image,
}

impl CaptchaKind {
    /// Form field the solution is submitted under when none is configured.
    pub fn default_response_field(self) -> &'static str {
        match self {
            Self::RecaptchaV2 => "g-recaptcha-response",
            Self::Hcaptcha => "h-captcha-response",
            Self::Image => "captcha",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RecaptchaV2 => "recaptcha_v2",
            Self::Hcaptcha => "hcaptcha",
            Self::Image => "image",
        }
    }
}

/// A challenge handed to the solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaChallenge {
    /// Site key for widget CAPTCHAs, or base64 image data for image CAPTCHAs.
    pub site_key_or_image: String,
    pub kind: CaptchaKind,
    pub page_url: String,
}

/// Third-party CAPTCHA solving service.
pub trait CaptchaSolver {
    /// Solve a challenge and return the solution token or text.
    fn solve(&self, challenge: &CaptchaChallenge) -> Result<String, CaptchaError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_response_fields() {
        assert_eq!(CaptchaKind::RecaptchaV2.default_response_field(), "g-recaptcha-response");
        assert_eq!(CaptchaKind::Hcaptcha.default_response_field(), "h-captcha-response");
        assert_eq!(CaptchaKind::Image.default_response_field(), "captcha");
    }

    #[test]
    fn test_kind_deserialize() {
        let kind: CaptchaKind = serde_json::from_str("\"recaptcha_v2\"").unwrap();
        assert_eq!(kind, CaptchaKind::RecaptchaV2);
        assert_eq!(kind.as_str(), "recaptcha_v2");
    }
}
