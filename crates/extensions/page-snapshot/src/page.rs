//! The snapshot-backed page model.

use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use formpilot_protocols::{DomScript, FieldHandle, PageError, PageModel};

use crate::error::SnapshotError;
use crate::field::{Interaction, SnapshotField, SnapshotFieldHandle};

/// Serializable page state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub location: String,
    /// Selectors of the forms present on the page.
    #[serde(default)]
    pub forms: Vec<String>,
    #[serde(default)]
    pub fields: Vec<SnapshotField>,
}

/// In-memory [`PageModel`].
pub struct SnapshotPage {
    state: Mutex<PageSnapshot>,
    scripts: Mutex<Vec<DomScript>>,
    interactions: Mutex<Vec<Interaction>>,
}

impl SnapshotPage {
    pub fn new(location: impl Into<String>) -> Self {
        Self::from_snapshot(PageSnapshot {
            location: location.into(),
            forms: Vec::new(),
            fields: Vec::new(),
        })
    }

    pub fn from_snapshot(snapshot: PageSnapshot) -> Self {
        Self {
            state: Mutex::new(snapshot),
            scripts: Mutex::new(Vec::new()),
            interactions: Mutex::new(Vec::new()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: PageSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the current state back to disk.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let content = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn with_form(self, selector: impl Into<String>) -> Self {
        self.state.lock().forms.push(selector.into());
        self
    }

    pub fn with_field(self, field: SnapshotField) -> Self {
        self.state.lock().fields.push(field);
        self
    }

    /// Current page state.
    pub fn snapshot(&self) -> PageSnapshot {
        self.state.lock().clone()
    }

    /// Copy of a field's state by name (first match).
    pub fn field(&self, name: &str) -> Option<SnapshotField> {
        self.state
            .lock()
            .fields
            .iter()
            .find(|f| f.name == name)
            .cloned()
    }

    /// Scripts executed so far, in order.
    pub fn executed_scripts(&self) -> Vec<DomScript> {
        self.scripts.lock().clone()
    }

    /// Field interactions performed so far, in order.
    pub fn interactions(&self) -> Vec<Interaction> {
        self.interactions.lock().clone()
    }

    pub(crate) fn read_field<T>(
        &self,
        index: usize,
        f: impl FnOnce(&SnapshotField) -> Result<T, PageError>,
    ) -> Result<T, PageError> {
        let state = self.state.lock();
        let field = state
            .fields
            .get(index)
            .ok_or_else(|| PageError::FieldNotFound(format!("#{}", index)))?;
        f(field)
    }

    pub(crate) fn write_field<T>(
        &self,
        index: usize,
        f: impl FnOnce(&mut SnapshotField) -> Result<T, PageError>,
    ) -> Result<T, PageError> {
        let mut state = self.state.lock();
        let field = state
            .fields
            .get_mut(index)
            .ok_or_else(|| PageError::FieldNotFound(format!("#{}", index)))?;
        f(field)
    }

    pub(crate) fn record(&self, interaction: Interaction) {
        self.interactions.lock().push(interaction);
    }

    fn apply_script(&self, script: &DomScript) -> Result<(), PageError> {
        let mut state = self.state.lock();
        let field = state
            .fields
            .iter_mut()
            .find(|f| f.name == script.field())
            .ok_or_else(|| PageError::Script(format!("no element named '{}'", script.field())))?;

        match script {
            DomScript::SetDisplay { visible, .. } => field.hidden = !visible,
            DomScript::SetDisabled { disabled, .. } => field.disabled = *disabled,
            DomScript::AttachSuggestions { suggestions, .. } => {
                field.suggestions = suggestions.clone()
            }
        }
        Ok(())
    }
}

impl PageModel for SnapshotPage {
    fn find_field(&self, name: &str) -> Result<Option<Box<dyn FieldHandle + '_>>, PageError> {
        let state = self.state.lock();
        let matches: Vec<usize> = state
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.name == name)
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [] => Ok(None),
            [index] => Ok(Some(Box::new(SnapshotFieldHandle {
                page: self,
                index: *index,
                name: name.to_string(),
            }))),
            many => Err(PageError::AmbiguousField {
                name: name.to_string(),
                count: many.len(),
            }),
        }
    }

    fn execute_script(&self, script: &DomScript) -> Result<Value, PageError> {
        debug!("Executing script on snapshot: {}", script.to_javascript());
        self.apply_script(script)?;
        self.scripts.lock().push(script.clone());
        Ok(Value::Bool(true))
    }

    fn current_location(&self) -> String {
        self.state.lock().location.clone()
    }

    fn has_form(&self, selector: Option<&str>) -> Result<bool, PageError> {
        let state = self.state.lock();
        Ok(match selector {
            Some(sel) => state.forms.iter().any(|f| f == sel),
            None => !state.forms.is_empty(),
        })
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
