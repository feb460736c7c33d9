//! Declarative form description types.

mod dependency;
mod form;
mod scalar;
mod sensitive;
mod validation;

pub use dependency::*;
pub use form::*;
pub use scalar::*;
pub use sensitive::*;
pub use validation::*;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
