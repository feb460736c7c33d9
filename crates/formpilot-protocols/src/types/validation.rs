//! Declarative validation rules.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Caller-supplied predicate for [`RuleKind::Custom`].
#[derive(Clone)]
pub struct CustomRule {
    name: String,
    predicate: Arc<dyn Fn(&str) -> bool + Send + Sync>,
}

impl CustomRule {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, value: &str) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Built-in and caller-supplied rule kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    Email,
    Phone,
    Url,
    Date,
    Number,
    Required,
    Pattern { pattern: String },
    /// Only constructible in code; predicates cannot come from configuration.
    #[serde(skip)]
    Custom(CustomRule),
}

impl RuleKind {
    pub fn name(&self) -> &str {
        match self {
            RuleKind::Email => "email",
            RuleKind::Phone => "phone",
            RuleKind::Url => "url",
            RuleKind::Date => "date",
            RuleKind::Number => "number",
            RuleKind::Required => "required",
            RuleKind::Pattern { .. } => "pattern",
            RuleKind::Custom(rule) => rule.name(),
        }
    }
}

/// One validation rule attached to a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(flatten)]
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValidationRule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            min_length: None,
            max_length: None,
            error_message: None,
        }
    }

    pub fn required() -> Self {
        Self::new(RuleKind::Required)
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::new(RuleKind::Pattern {
            pattern: pattern.into(),
        })
    }

    pub fn custom(
        name: impl Into<String>,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(RuleKind::Custom(CustomRule::new(name, predicate)))
    }

    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.kind, RuleKind::Required)
    }
}
