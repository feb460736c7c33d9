//! # Formpilot Protocols
//!
//! Protocol definitions for the formpilot form automation engine.
//! Contains only interface definitions and plain data types - no engine logic.
//!
//! ## Core Traits
//!
//! - [`PageModel`] - A loaded page the engine borrows for one automation pass
//! - [`FieldHandle`] - A reference to a single form control on that page
//! - [`CaptchaSolver`] - Third-party CAPTCHA solving collaborator
//!
//! ## Form Types
//!
//! The declarative form description ([`FormDefinition`]) and its parts are
//! serde-enabled so that they can be read straight from configuration.

pub mod captcha;
pub mod error;
pub mod page;
pub mod script;
pub mod types;

pub use captcha::{CaptchaChallenge, CaptchaKind, CaptchaSolver};
pub use error::{CaptchaError, FormError, PageError, SensitiveError};
pub use page::{ControlKind, FieldHandle, PageModel};
pub use script::DomScript;
pub use types::*;
