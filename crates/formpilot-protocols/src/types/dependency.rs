//! Conditional field dependencies.

use serde::{Deserialize, Serialize};

use super::Scalar;

/// Comparison applied by a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    IsEmpty,
    IsNotEmpty,
    IsChecked,
    IsNotChecked,
}

impl ConditionOperator {
    /// Whether the operator compares against [`Condition::value`].
    pub fn takes_value(self) -> bool {
        !matches!(
            self,
            Self::IsEmpty | Self::IsNotEmpty | Self::IsChecked | Self::IsNotChecked
        )
    }
}

/// Where the scalar under test is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    #[default]
    Value,
    Attribute(String),
    Property(String),
    Text,
}

/// A test of one field's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: ConditionOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,
    #[serde(default)]
    pub source: ValueSource,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: ConditionOperator) -> Self {
        Self {
            field: field.into(),
            operator,
            value: None,
            source: ValueSource::Value,
        }
    }

    pub fn with_value(mut self, value: impl Into<Scalar>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_source(mut self, source: ValueSource) -> Self {
        self.source = source;
        self
    }
}

/// How a dependency combines its conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Logic {
    #[default]
    And,
    Or,
}

/// Effect applied to a target field when its conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    Show,
    Hide,
    Enable,
    Disable,
    SetValue(Scalar),
    Clear,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Show => "show",
            Action::Hide => "hide",
            Action::Enable => "enable",
            Action::Disable => "disable",
            Action::SetValue(_) => "set_value",
            Action::Clear => "clear",
        }
    }
}

/// A rule mapping conditions on source fields to an action on a target field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub target: String,
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub logic: Logic,
    pub action: Action,
}

impl Dependency {
    pub fn new(target: impl Into<String>, action: Action) -> Self {
        Self {
            target: target.into(),
            conditions: Vec::new(),
            logic: Logic::And,
            action,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }
}
