//! # Formpilot Core
//!
//! Conditional field-dependency and validation engine.
//!
//! ## Components
//!
//! - [`ConditionEvaluator`] - Tests one field's state against an operator/value pair
//! - [`DependencyResolver`] - Applies show/hide/enable/disable/set/clear actions
//! - [`ValidationEngine`] - Evaluates declarative rules and aggregates messages
//! - [`SensitiveDataProcessor`] - Masks and encrypts sensitive values
//! - [`AutofillStore`] - Remembers submitted values between passes
//!
//! [`FormEngine`] runs a complete pass over a borrowed [`PageModel`]. A pass
//! only fails as a whole when the target form is missing; every other problem
//! is reported per field, rule or dependency.
//!
//! [`PageModel`]: formpilot_protocols::PageModel

pub mod autofill;
pub mod captcha;
pub mod condition;
pub mod dependency;
pub mod engine;
pub mod interact;
pub mod rate_limit;
pub mod sensitive;
pub mod validation;

pub use autofill::{AutofillAction, AutofillOutcome, AutofillStore};
pub use captcha::inject_solution;
pub use condition::ConditionEvaluator;
pub use dependency::{DependencyOutcome, DependencyResolver};
pub use engine::{FormEngine, PassReport};
pub use rate_limit::RateLimiter;
pub use sensitive::{ProtectedValue, SensitiveDataProcessor};
pub use validation::ValidationEngine;
