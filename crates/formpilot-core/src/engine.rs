//! One automation pass over a loaded page.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use formpilot_config::{Config, ConfigLoader};
use formpilot_protocols::{
    CaptchaError, CaptchaSolver, FieldHandle, FormDefinition, FormError, PageModel,
};

use crate::autofill::{AutofillOutcome, AutofillStore};
use crate::captcha::inject_solution;
use crate::dependency::{DependencyOutcome, DependencyResolver};
use crate::interact::set_field_value;
use crate::rate_limit::RateLimiter;
use crate::sensitive::SensitiveDataProcessor;
use crate::validation::ValidationEngine;

/// Structured result of a pass. The caller decides whether to submit.
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub location: String,
    pub autofill: Vec<AutofillOutcome>,
    /// Fill-step failures keyed by field name.
    pub fill_errors: BTreeMap<String, String>,
    pub dependencies: Vec<DependencyOutcome>,
    pub validation_errors: BTreeMap<String, Vec<String>>,
    /// Form data ready for submission, with sensitive fields protected.
    pub form_data: BTreeMap<String, String>,
    /// Unprotected form data. Never serialized.
    #[serde(skip)]
    pub raw_form_data: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_error: Option<String>,
    pub persisted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_error: Option<String>,
    pub ready_to_submit: bool,
}

/// Runs passes of one form definition.
pub struct FormEngine {
    form: FormDefinition,
    sensitive: SensitiveDataProcessor,
    autofill: AutofillStore,
    rate_limiter: RateLimiter,
}

impl FormEngine {
    pub fn new(
        form: FormDefinition,
        sensitive: SensitiveDataProcessor,
        autofill: AutofillStore,
        rate_limiter: RateLimiter,
    ) -> Self {
        Self {
            form,
            sensitive,
            autofill,
            rate_limiter,
        }
    }

    /// Build an engine from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let secret = config.sensitive.resolve_secret();
        let store_path = ConfigLoader::expand_path(&config.autofill.path);

        Self::new(
            config.form.clone(),
            SensitiveDataProcessor::new(secret.as_deref()),
            AutofillStore::open(store_path),
            RateLimiter::from_millis(config.rate_limit.min_interval_ms),
        )
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    pub fn sensitive(&self) -> &SensitiveDataProcessor {
        &self.sensitive
    }

    pub fn autofill(&self) -> &AutofillStore {
        &self.autofill
    }

    /// Run autofill, fill, dependency resolution, validation, CAPTCHA
    /// injection, sensitive-field protection and autofill persistence.
    ///
    /// Fails only when the target form is absent; every other problem is
    /// recorded in the report.
    pub fn run_pass(
        &mut self,
        page: &dyn PageModel,
        solver: Option<&dyn CaptchaSolver>,
    ) -> Result<PassReport, FormError> {
        self.rate_limiter.acquire();

        let location = page.current_location();
        if !page.has_form(self.form.selector.as_deref())? {
            return Err(FormError::FormMissing { location });
        }
        info!("Starting pass on {}", location);

        let autofill = self.autofill.apply(page, &self.form.autofill);
        let fill_errors = self.fill(page);
        let dependencies = DependencyResolver::resolve(page, &self.form.dependencies);
        let validation_errors = ValidationEngine::validate_form(page, &self.form.validation);

        let mut raw_form_data = self.collect(page);
        let captcha_error = match (&self.form.captcha, solver) {
            (None, _) => None,
            (Some(cfg), Some(solver)) => inject_solution(&mut raw_form_data, cfg, solver, &location)
                .err()
                .map(|e| e.to_string()),
            (Some(cfg), None) => {
                let e = FormError::from(CaptchaError::Unsupported(format!(
                    "{} (no solver configured)",
                    cfg.kind.as_str()
                )));
                warn!("{}", e);
                Some(e.to_string())
            }
        };

        let form_data = self.sensitive.protect_all(&raw_form_data, &self.form.sensitive);

        let (persisted, persist_error) = match self.autofill.persist(page, &self.form.autofill) {
            Ok(n) => (n, None),
            Err(e) => {
                warn!("{}", e);
                (0, Some(e.to_string()))
            }
        };

        let ready_to_submit = validation_errors.is_empty() && captcha_error.is_none();
        info!(
            "Pass on {} finished: {} invalid fields, ready to submit: {}",
            location,
            validation_errors.len(),
            ready_to_submit
        );

        Ok(PassReport {
            location,
            autofill,
            fill_errors,
            dependencies,
            validation_errors,
            form_data,
            raw_form_data,
            captcha_error,
            persisted,
            persist_error,
            ready_to_submit,
        })
    }

    /// Write configured values, one field at a time.
    fn fill(&self, page: &dyn PageModel) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for (name, value) in &self.form.values {
            let result = page
                .find_field(name)
                .map_err(FormError::from)
                .and_then(|f| f.ok_or_else(|| FormError::FieldNotFound(name.clone())))
                .and_then(|f| set_field_value(f.as_ref(), value).map_err(FormError::from));
            match result {
                Ok(()) => debug!("Filled '{}'", name),
                Err(e) => {
                    warn!("Could not fill '{}': {}", name, e);
                    errors.insert(name.clone(), e.to_string());
                }
            }
        }
        errors
    }

    /// Current values of every field the definition refers to. Unchecked
    /// checkboxes and radios are left out, as a browser would on submit.
    fn collect(&self, page: &dyn PageModel) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        for name in self.form.referenced_fields() {
            let field = match page.find_field(&name) {
                Ok(Some(field)) => field,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping '{}' in form data: {}", name, e);
                    continue;
                }
            };
            match read_submitted(field.as_ref()) {
                Ok(Some(value)) => {
                    data.insert(name, value);
                }
                Ok(None) => {}
                Err(e) => warn!("Skipping '{}' in form data: {}", name, e),
            }
        }
        data
    }
}

fn read_submitted(field: &dyn FieldHandle) -> Result<Option<String>, FormError> {
    if field.kind()?.is_toggle() && !field.is_checked()? {
        return Ok(None);
    }
    Ok(Some(field.value()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formpilot_page_snapshot::{SnapshotField, SnapshotPage};
    use tempfile::TempDir;

    fn engine(dir: &TempDir, form: FormDefinition) -> FormEngine {
        FormEngine::new(
            form,
            SensitiveDataProcessor::new(None),
            AutofillStore::open(dir.path().join("autofill.json")),
            RateLimiter::from_millis(0),
        )
    }

    #[test]
    fn test_missing_form_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(
            &dir,
            FormDefinition {
                selector: Some("form#signup".to_string()),
                ..Default::default()
            },
        );
        let page = SnapshotPage::new("https://example.com").with_form("form#login");

        let err = engine.run_pass(&page, None).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("https://example.com"));
    }

    #[test]
    fn test_any_form_accepted_without_selector() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, FormDefinition::default());
        let page = SnapshotPage::new("about:blank").with_form("form");

        let report = engine.run_pass(&page, None).unwrap();
        assert!(report.ready_to_submit);
        assert!(report.form_data.is_empty());
    }

    #[test]
    fn test_unchecked_toggles_left_out_of_form_data() {
        let dir = TempDir::new().unwrap();
        let mut form = FormDefinition::default();
        form.values.insert("terms".to_string(), true.into());
        form.values.insert("newsletter".to_string(), false.into());
        let mut engine = engine(&dir, form);
        let page = SnapshotPage::new("about:blank")
            .with_form("form")
            .with_field(SnapshotField::checkbox("terms", false))
            .with_field(SnapshotField::checkbox("newsletter", true));

        let report = engine.run_pass(&page, None).unwrap();
        assert_eq!(report.form_data.get("terms").map(String::as_str), Some("on"));
        assert!(!report.form_data.contains_key("newsletter"));
    }

    #[test]
    fn test_fill_errors_do_not_abort_pass() {
        let dir = TempDir::new().unwrap();
        let mut form = FormDefinition::default();
        form.values.insert("ghost".to_string(), "x".into());
        form.values.insert("name".to_string(), "Ada".into());
        let mut engine = engine(&dir, form);
        let page = SnapshotPage::new("about:blank")
            .with_form("form")
            .with_field(SnapshotField::text("name", ""));

        let report = engine.run_pass(&page, None).unwrap();
        assert_eq!(report.fill_errors.len(), 1);
        assert!(report.fill_errors["ghost"].contains("Field not found"));
        assert_eq!(report.form_data["name"], "Ada");
    }
}
