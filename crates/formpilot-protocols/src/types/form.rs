//! Complete form description for one automation pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Dependency, Scalar, SensitiveFieldConfig, ValidationRule};
use crate::captcha::CaptchaKind;

/// Per-field autofill behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutofillFieldConfig {
    /// Write the stored value into the field when it differs.
    #[serde(default)]
    pub use_saved: bool,
    /// Store the field's final value when it changed.
    #[serde(default)]
    pub save_new: bool,
    /// Suggestions offered when nothing was restored and the field is blank.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// CAPTCHA present on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaConfig {
    pub kind: CaptchaKind,
    /// Site key, or base64 image data for image challenges.
    pub site_key: String,
    /// Form field that receives the solution. Defaults per kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_field: Option<String>,
}

impl CaptchaConfig {
    pub fn response_field(&self) -> &str {
        self.response_field
            .as_deref()
            .unwrap_or_else(|| self.kind.default_response_field())
    }
}

/// Everything the engine needs to run a pass against one form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormDefinition {
    /// CSS selector of the target form; `None` accepts any form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    /// Values written during the fill step.
    #[serde(default)]
    pub values: BTreeMap<String, Scalar>,

    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    #[serde(default)]
    pub validation: BTreeMap<String, Vec<ValidationRule>>,

    #[serde(default)]
    pub sensitive: BTreeMap<String, SensitiveFieldConfig>,

    #[serde(default)]
    pub autofill: BTreeMap<String, AutofillFieldConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha: Option<CaptchaConfig>,
}

impl FormDefinition {
    /// Every field name the definition refers to, in sorted order.
    pub fn referenced_fields(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .values
            .keys()
            .chain(self.validation.keys())
            .chain(self.sensitive.keys())
            .chain(self.autofill.keys())
            .cloned()
            .collect();
        for dep in &self.dependencies {
            names.push(dep.target.clone());
            names.extend(dep.conditions.iter().map(|c| c.field.clone()));
        }
        names.sort();
        names.dedup();
        names
    }
}
