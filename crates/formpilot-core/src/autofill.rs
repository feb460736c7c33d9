//! Persisted autofill values.
//!
//! The store is a single JSON object mapping field names to the last value
//! entered. It is read fully when opened and rewritten fully on every flush.
//! There is no file locking: callers running concurrent passes must not share
//! a store path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use formpilot_protocols::{
    AutofillFieldConfig, DomScript, FieldHandle, FormError, PageModel, Scalar,
};

use crate::interact::set_field_value;

/// What autofill did to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutofillAction {
    /// The stored value was written into the field.
    Restored,
    /// A suggestion list was attached to the blank field.
    Suggested,
    /// The field already held the stored value.
    Unchanged,
    /// Nothing applied, or the field could not be used.
    Skipped,
}

/// Per-field result of [`AutofillStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutofillOutcome {
    pub field: String,
    pub action: AutofillAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// File-backed map of remembered field values.
#[derive(Debug, Clone)]
pub struct AutofillStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl AutofillStore {
    /// Open the store at `path`, loading whatever it currently holds.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        Self { path, entries }
    }

    /// Read the persisted mapping. A missing or unreadable file yields an
    /// empty mapping.
    pub fn load(path: &Path) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No autofill store at {}", path.display());
                return BTreeMap::new();
            }
            Err(e) => {
                warn!("Cannot read autofill store {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring malformed autofill store {}: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    /// Restore stored values and attach suggestions.
    pub fn apply(
        &self,
        page: &dyn PageModel,
        config: &BTreeMap<String, AutofillFieldConfig>,
    ) -> Vec<AutofillOutcome> {
        let outcomes: Vec<AutofillOutcome> = config
            .iter()
            .map(|(name, cfg)| {
                let (action, error) = match self.apply_one(page, name, cfg) {
                    Ok(action) => (action, None),
                    Err(e) => {
                        warn!("Autofill for '{}' failed: {}", name, e);
                        (AutofillAction::Skipped, Some(e.to_string()))
                    }
                };
                AutofillOutcome {
                    field: name.clone(),
                    action,
                    error,
                }
            })
            .collect();

        let restored = outcomes
            .iter()
            .filter(|o| o.action == AutofillAction::Restored)
            .count();
        info!("Autofill restored {} of {} fields", restored, outcomes.len());
        outcomes
    }

    fn apply_one(
        &self,
        page: &dyn PageModel,
        name: &str,
        cfg: &AutofillFieldConfig,
    ) -> Result<AutofillAction, FormError> {
        let field = page
            .find_field(name)?
            .ok_or_else(|| FormError::FieldNotFound(name.to_string()))?;
        let toggle = field.kind()?.is_toggle();
        let current = stored_form(field.as_ref())?;

        if cfg.use_saved {
            if let Some(saved) = self.get(name) {
                let unchanged = if toggle {
                    Scalar::from(saved).truthy() == field.is_checked()?
                } else {
                    saved == current
                };
                if unchanged {
                    return Ok(AutofillAction::Unchanged);
                }
                set_field_value(field.as_ref(), &Scalar::from(saved))?;
                debug!("Restored saved value into '{}'", name);
                return Ok(AutofillAction::Restored);
            }
        }

        if !cfg.suggestions.is_empty() && current.trim().is_empty() {
            page.execute_script(&DomScript::AttachSuggestions {
                field: name.to_string(),
                suggestions: cfg.suggestions.clone(),
            })?;
            return Ok(AutofillAction::Suggested);
        }

        Ok(AutofillAction::Skipped)
    }

    /// Record final values of `save_new` fields that changed and flush them.
    /// Blank values are never stored. Returns the number of entries written.
    pub fn persist(
        &mut self,
        page: &dyn PageModel,
        config: &BTreeMap<String, AutofillFieldConfig>,
    ) -> Result<usize, FormError> {
        let mut changed = 0;

        for name in config.iter().filter(|(_, c)| c.save_new).map(|(n, _)| n) {
            let value = match read_value(page, name) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Not saving '{}': {}", name, e);
                    continue;
                }
            };
            if value.trim().is_empty() || self.get(name) == Some(value.as_str()) {
                continue;
            }
            self.entries.insert(name.clone(), value);
            changed += 1;
        }

        if changed > 0 {
            self.flush()?;
            info!("Saved {} autofill values to {}", changed, self.path.display());
        }
        Ok(changed)
    }

    /// Remove one entry. Returns whether it existed.
    pub fn forget(&mut self, field: &str) -> Result<bool, FormError> {
        if self.entries.remove(field).is_none() {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> Result<(), FormError> {
        self.entries.clear();
        self.flush()
    }

    fn flush(&self) -> Result<(), FormError> {
        let fail = |e: String| FormError::Autofill(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(&self.entries).map_err(|e| fail(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| fail(e.to_string()))
    }
}

fn read_value(page: &dyn PageModel, name: &str) -> Result<String, FormError> {
    let field = page
        .find_field(name)?
        .ok_or_else(|| FormError::FieldNotFound(name.to_string()))?;
    stored_form(field.as_ref())
}

/// What the store records for a field. Checkboxes and radios are stored as
/// their checked state, since their value attribute never changes.
fn stored_form(field: &dyn FieldHandle) -> Result<String, FormError> {
    if field.kind()?.is_toggle() {
        return Ok(field.is_checked()?.to_string());
    }
    Ok(field.value()?)
}

#[cfg(test)]
#[path = "autofill_tests.rs"]
mod tests;
