//! Dependency resolution.
//!
//! Dependencies are applied once, in declaration order. An action that changes
//! a field does not cause earlier dependencies to be re-evaluated within the
//! same pass.

use serde::Serialize;
use tracing::{debug, info, warn};

use formpilot_protocols::{
    Action, Condition, Dependency, DomScript, FieldHandle, FormError, Logic, PageError, PageModel,
};

use crate::condition::ConditionEvaluator;
use crate::interact::set_field_value;

/// Result of resolving one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyOutcome {
    pub target: String,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Evaluates dependency conditions and applies their actions.
pub struct DependencyResolver;

impl DependencyResolver {
    /// Resolve every dependency against the page. Failures are recorded per
    /// dependency; resolution always continues with the next one.
    pub fn resolve(page: &dyn PageModel, dependencies: &[Dependency]) -> Vec<DependencyOutcome> {
        let outcomes: Vec<DependencyOutcome> = dependencies
            .iter()
            .map(|dep| match Self::resolve_one(page, dep) {
                Ok(applied) => DependencyOutcome {
                    target: dep.target.clone(),
                    applied,
                    error: None,
                },
                Err(e) => {
                    warn!("Dependency on '{}' failed: {}", dep.target, e);
                    DependencyOutcome {
                        target: dep.target.clone(),
                        applied: false,
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect();

        let applied = outcomes.iter().filter(|o| o.applied).count();
        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        info!(
            "Resolved {} dependencies: {} applied, {} failed",
            outcomes.len(),
            applied,
            failed
        );
        outcomes
    }

    fn resolve_one(page: &dyn PageModel, dep: &Dependency) -> Result<bool, FormError> {
        if dep.conditions.is_empty() {
            return Err(FormError::ConditionEvaluation {
                field: dep.target.clone(),
                message: "dependency declares no conditions".to_string(),
            });
        }

        let target = page
            .find_field(&dep.target)?
            .ok_or_else(|| FormError::FieldNotFound(dep.target.clone()))?;

        if !Self::conditions_hold(page, &dep.conditions, dep.logic) {
            debug!("Conditions for '{}' not met", dep.target);
            return Ok(false);
        }

        Self::apply_action(page, target.as_ref(), &dep.action).map_err(|e| {
            FormError::ActionApplication {
                field: dep.target.clone(),
                message: e.to_string(),
            }
        })?;
        debug!("Applied {} to '{}'", dep.action.name(), dep.target);
        Ok(true)
    }

    /// Combine condition results with `logic`.
    pub fn conditions_hold(page: &dyn PageModel, conditions: &[Condition], logic: Logic) -> bool {
        let mut results = conditions.iter().map(|c| Self::evaluate_condition(page, c));
        match logic {
            Logic::And => results.all(|r| r),
            Logic::Or => results.any(|r| r),
        }
    }

    /// Evaluate one condition against its source field. A source field that
    /// cannot be resolved makes the condition false.
    fn evaluate_condition(page: &dyn PageModel, condition: &Condition) -> bool {
        match page.find_field(&condition.field) {
            Ok(Some(field)) => ConditionEvaluator::evaluate(field.as_ref(), condition),
            Ok(None) => {
                warn!("Condition source field '{}' not found", condition.field);
                false
            }
            Err(e) => {
                warn!("Condition source field '{}' unavailable: {}", condition.field, e);
                false
            }
        }
    }

    /// Apply an action to the target field.
    ///
    /// `Enable` clears the field before re-enabling it so that a value left
    /// over from the disabled state is discarded.
    pub fn apply_action(
        page: &dyn PageModel,
        field: &dyn FieldHandle,
        action: &Action,
    ) -> Result<(), PageError> {
        let name = field.name().to_string();
        match action {
            Action::Show => page
                .execute_script(&DomScript::SetDisplay {
                    field: name,
                    visible: true,
                })
                .map(|_| ()),
            Action::Hide => page
                .execute_script(&DomScript::SetDisplay {
                    field: name,
                    visible: false,
                })
                .map(|_| ()),
            Action::Enable => {
                field.clear()?;
                page.execute_script(&DomScript::SetDisabled {
                    field: name,
                    disabled: false,
                })
                .map(|_| ())
            }
            Action::Disable => page
                .execute_script(&DomScript::SetDisabled {
                    field: name,
                    disabled: true,
                })
                .map(|_| ()),
            Action::SetValue(value) => set_field_value(field, value),
            Action::Clear => field.clear(),
        }
    }
}

#[cfg(test)]
#[path = "dependency_tests.rs"]
mod tests;
