//! Condition evaluation against a single field.

use std::cmp::Ordering;

use tracing::{debug, warn};

use formpilot_protocols::{
    Condition, ConditionOperator, FieldHandle, FormError, PageError, ValueSource,
};

/// Tests a field's current state against a [`Condition`].
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Evaluate a condition. Never fails: any extraction or comparison error
    /// is logged and the condition counts as false.
    pub fn evaluate(field: &dyn FieldHandle, condition: &Condition) -> bool {
        match Self::try_evaluate(field, condition) {
            Ok(result) => {
                debug!(
                    "Condition {:?} on '{}' evaluated to {}",
                    condition.operator, condition.field, result
                );
                result
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Evaluate a condition, reporting why it could not be evaluated.
    pub fn try_evaluate(field: &dyn FieldHandle, condition: &Condition) -> Result<bool, FormError> {
        let fail = |e: PageError| FormError::ConditionEvaluation {
            field: condition.field.clone(),
            message: e.to_string(),
        };

        match condition.operator {
            ConditionOperator::IsChecked => return field.is_checked().map_err(fail),
            ConditionOperator::IsNotChecked => return field.is_checked().map(|c| !c).map_err(fail),
            _ => {}
        }

        let actual = Self::extract(field, &condition.source).map_err(fail)?;

        if !condition.operator.takes_value() {
            let blank = actual.trim().is_empty();
            return Ok(match condition.operator {
                ConditionOperator::IsEmpty => blank,
                _ => !blank,
            });
        }

        let expected = condition
            .value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_default();

        Ok(Self::compare(condition.operator, &actual, &expected))
    }

    /// Read the scalar a condition tests. Missing attributes and properties
    /// yield an empty string.
    pub fn extract(field: &dyn FieldHandle, source: &ValueSource) -> Result<String, PageError> {
        match source {
            ValueSource::Value => field.value(),
            ValueSource::Text => field.text(),
            ValueSource::Attribute(name) => Ok(field.attribute(name)?.unwrap_or_default()),
            ValueSource::Property(name) => Ok(field
                .property(name)?
                .map(|v| match v {
                    serde_json::Value::Null => String::new(),
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or_default()),
        }
    }

    /// Apply a comparison operator. Operands are compared numerically when
    /// both parse as finite numbers, otherwise as strings. `Contains` and
    /// `NotContains` are always substring tests.
    pub fn compare(operator: ConditionOperator, actual: &str, expected: &str) -> bool {
        match operator {
            ConditionOperator::Contains => actual.contains(expected),
            ConditionOperator::NotContains => !actual.contains(expected),
            ConditionOperator::Equals => Self::ordering(actual, expected) == Some(Ordering::Equal),
            ConditionOperator::NotEquals => {
                Self::ordering(actual, expected) != Some(Ordering::Equal)
            }
            ConditionOperator::GreaterThan => {
                Self::ordering(actual, expected) == Some(Ordering::Greater)
            }
            ConditionOperator::LessThan => Self::ordering(actual, expected) == Some(Ordering::Less),
            ConditionOperator::GreaterOrEqual => matches!(
                Self::ordering(actual, expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            ConditionOperator::LessOrEqual => matches!(
                Self::ordering(actual, expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            ConditionOperator::IsEmpty => actual.trim().is_empty(),
            ConditionOperator::IsNotEmpty => !actual.trim().is_empty(),
            // Checked state is read from the handle, never from a scalar.
            ConditionOperator::IsChecked | ConditionOperator::IsNotChecked => false,
        }
    }

    fn ordering(actual: &str, expected: &str) -> Option<Ordering> {
        match (parse_number(actual), parse_number(expected)) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => Some(actual.cmp(expected)),
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
