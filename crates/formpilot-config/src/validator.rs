//! Configuration validation.

use formpilot_protocols::{MaskType, RuleKind};

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_autofill(config, &mut result);
        Self::validate_dependencies(config, &mut result);
        Self::validate_rules(config, &mut result);
        Self::validate_sensitive(config, &mut result);
        Self::validate_captcha(config, &mut result);

        Ok(result)
    }

    fn validate_autofill(config: &Config, result: &mut ValidationResult) {
        if config.autofill.path.trim().is_empty() {
            result.add_error(ValidationError::new(
                "autofill.path",
                "Autofill store path cannot be empty",
            ));
        }

        for (field, entry) in &config.form.autofill {
            if !entry.use_saved && !entry.save_new && entry.suggestions.is_empty() {
                result.add_warning(ValidationWarning::new(
                    format!("form.autofill.{}", field),
                    "Entry has no effect: enable use_saved, save_new or add suggestions",
                ));
            }
        }
    }

    fn validate_dependencies(config: &Config, result: &mut ValidationResult) {
        for (i, dep) in config.form.dependencies.iter().enumerate() {
            let path = format!("form.dependencies[{}]", i);

            if dep.target.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.target", path),
                    "Target field cannot be empty",
                ));
            }

            if dep.conditions.is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.conditions", path),
                    "Dependency must declare at least one condition",
                ));
            }

            for (j, cond) in dep.conditions.iter().enumerate() {
                let cond_path = format!("{}.conditions[{}]", path, j);
                if cond.field.trim().is_empty() {
                    result.add_error(ValidationError::new(
                        format!("{}.field", cond_path),
                        "Condition field cannot be empty",
                    ));
                }
                if cond.operator.takes_value() && cond.value.is_none() {
                    result.add_warning(ValidationWarning::new(
                        format!("{}.value", cond_path),
                        format!(
                            "Operator {:?} has no value, it will compare against an empty string",
                            cond.operator
                        ),
                    ));
                }
                if !cond.operator.takes_value() && cond.value.is_some() {
                    result.add_warning(ValidationWarning::new(
                        format!("{}.value", cond_path),
                        format!("Operator {:?} ignores its value", cond.operator),
                    ));
                }
            }
        }
    }

    fn validate_rules(config: &Config, result: &mut ValidationResult) {
        for (field, rules) in &config.form.validation {
            for (i, rule) in rules.iter().enumerate() {
                let path = format!("form.validation.{}[{}]", field, i);

                if let RuleKind::Pattern { pattern } = &rule.kind {
                    if let Err(e) = regex::Regex::new(pattern) {
                        result.add_error(ValidationError::new(
                            format!("{}.pattern", path),
                            format!("Invalid regular expression: {}", e),
                        ));
                    }
                }

                if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
                    if min > max {
                        result.add_error(ValidationError::new(
                            path.clone(),
                            format!("min_length ({}) is greater than max_length ({})", min, max),
                        ));
                    }
                }
            }
        }
    }

    fn validate_sensitive(config: &Config, result: &mut ValidationResult) {
        let has_secret = config.sensitive.resolve_secret().is_some();

        for (field, cfg) in &config.form.sensitive {
            let path = format!("form.sensitive.{}", field);

            if cfg.mask && cfg.mask_type == MaskType::Partial && cfg.visible_chars == 0 {
                result.add_warning(ValidationWarning::new(
                    format!("{}.visible_chars", path),
                    "Partial mask with visible_chars = 0 masks the whole value",
                ));
            }

            if cfg.encrypt && !has_secret {
                result.add_warning(ValidationWarning::new(
                    format!("{}.encrypt", path),
                    format!(
                        "Encryption requested but no secret configured (set {} or sensitive.secret)",
                        config.sensitive.secret_env
                    ),
                ));
            }

            if !cfg.mask && !cfg.encrypt {
                result.add_warning(ValidationWarning::new(
                    path,
                    "Field is marked sensitive but neither masked nor encrypted",
                ));
            }
        }
    }

    fn validate_captcha(config: &Config, result: &mut ValidationResult) {
        if let Some(captcha) = &config.form.captcha {
            if captcha.site_key.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "form.captcha.site_key",
                    "CAPTCHA site key cannot be empty",
                ));
            }
            if captcha.response_field().trim().is_empty() {
                result.add_error(ValidationError::new(
                    "form.captcha.response_field",
                    "CAPTCHA response field cannot be empty",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
