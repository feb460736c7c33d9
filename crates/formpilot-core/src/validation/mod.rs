//! Declarative field validation.
//!
//! A field without a `Required` rule whose value is blank is optional: its
//! other rules are skipped. Otherwise every rule runs and every failure is
//! reported, so one field can carry several messages.

pub mod rules;

use std::collections::BTreeMap;

use regex::Regex;
use tracing::{debug, info, warn};

use formpilot_protocols::{FieldHandle, FormError, PageModel, RuleKind, ValidationRule};

/// Message reported for a configured field that is absent from the page.
pub const FIELD_NOT_FOUND: &str = "Field not found";

/// Evaluates validation rules against fields and values.
pub struct ValidationEngine;

impl ValidationEngine {
    /// Validate every configured field. Only fields with at least one error
    /// appear in the result.
    pub fn validate_form(
        page: &dyn PageModel,
        config: &BTreeMap<String, Vec<ValidationRule>>,
    ) -> BTreeMap<String, Vec<String>> {
        let mut errors = BTreeMap::new();

        for (name, rules) in config {
            let messages = match page.find_field(name) {
                Ok(Some(field)) => Self::validate_field(field.as_ref(), rules),
                Ok(None) => vec![FIELD_NOT_FOUND.to_string()],
                Err(e) => vec![e.to_string()],
            };

            if !messages.is_empty() {
                warn!(
                    "{}",
                    FormError::Validation {
                        field: name.clone(),
                        messages: messages.clone(),
                    }
                );
                errors.insert(name.clone(), messages);
            }
        }

        info!("Validated {} fields, {} invalid", config.len(), errors.len());
        errors
    }

    /// Validate one field's current value.
    pub fn validate_field(field: &dyn FieldHandle, rules: &[ValidationRule]) -> Vec<String> {
        match field.value() {
            Ok(value) => Self::validate_value(&value, rules),
            Err(e) => vec![format!("Could not read value: {}", e)],
        }
    }

    /// Validate a raw value.
    pub fn validate_value(value: &str, rules: &[ValidationRule]) -> Vec<String> {
        if !rules.iter().any(ValidationRule::is_required) && !rules::is_present(value) {
            debug!("Optional field is blank, skipping {} rules", rules.len());
            return Vec::new();
        }

        let mut messages = Vec::new();
        for rule in rules {
            let failures = Self::check_rule(value, rule);
            if failures.is_empty() {
                continue;
            }
            match &rule.error_message {
                Some(custom) => messages.push(custom.clone()),
                None => messages.extend(failures),
            }
        }
        messages
    }

    /// Default messages for each check of `rule` that `value` fails.
    fn check_rule(value: &str, rule: &ValidationRule) -> Vec<String> {
        let mut failures = Vec::new();

        let kind_failure = match &rule.kind {
            RuleKind::Required => failed(rules::is_present(value), "This field is required"),
            RuleKind::Email => failed(rules::is_email(value), "Invalid email address"),
            RuleKind::Phone => failed(rules::is_phone(value), "Invalid phone number"),
            RuleKind::Url => failed(rules::is_url(value), "Invalid URL"),
            RuleKind::Date => failed(rules::is_date(value), "Invalid date, expected YYYY-MM-DD"),
            RuleKind::Number => failed(rules::is_number(value), "Invalid number"),
            RuleKind::Pattern { pattern } => match Regex::new(pattern) {
                Ok(re) if re.is_match(value) => None,
                Ok(_) => Some(format!("Value does not match pattern {}", pattern)),
                Err(e) => Some(format!("Invalid pattern {}: {}", pattern, e)),
            },
            RuleKind::Custom(custom) => {
                failed(custom.check(value), &format!("Failed {} check", custom.name()))
            }
        };
        failures.extend(kind_failure);

        let len = rules::char_len(value);
        if let Some(min) = rule.min_length {
            if len < min {
                failures.push(format!("Must be at least {} characters", min));
            }
        }
        if let Some(max) = rule.max_length {
            if len > max {
                failures.push(format!("Must be at most {} characters", max));
            }
        }

        failures
    }
}

fn failed(passed: bool, message: &str) -> Option<String> {
    (!passed).then(|| message.to_string())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
