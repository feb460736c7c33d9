//! Error types for the formpilot protocol layer.

mod captcha;
mod form;
mod page;
mod sensitive;

pub use captcha::*;
pub use form::*;
pub use page::*;
pub use sensitive::*;
