//! Page and field capabilities consumed by the engine.
//!
//! These are implemented by a browser-automation collaborator (or by an
//! in-memory snapshot in tests). The engine only borrows them for the duration
//! of one pass; all calls are synchronous from the engine's point of view.

use serde::{Deserialize, Serialize};

use crate::error::PageError;
use crate::script::DomScript;

/// A loaded page that exposes its form controls.
pub trait PageModel {
    /// Look up a form control by its field name.
    ///
    /// Returns `Ok(None)` when no control carries the name. Implementations
    /// should return [`PageError::AmbiguousField`] when the name matches more
    /// than one control.
    fn find_field(&self, name: &str) -> Result<Option<Box<dyn FieldHandle + '_>>, PageError>;

    /// Run a DOM-level effect (visibility, disabled state, suggestions).
    fn execute_script(&self, script: &DomScript) -> Result<serde_json::Value, PageError>;

    /// Current page URL.
    fn current_location(&self) -> String;

    /// Whether the target form is present. `None` means "any form".
    fn has_form(&self, selector: Option<&str>) -> Result<bool, PageError>;
}

/// A single form control on a live page.
pub trait FieldHandle {
    /// Field name the handle was resolved from.
    fn name(&self) -> &str;

    /// Lower-case tag name (`input`, `select`, `textarea`, ...).
    fn tag_name(&self) -> Result<String, PageError>;

    /// Current value of the control.
    fn value(&self) -> Result<String, PageError>;

    /// HTML attribute value, `None` when absent.
    fn attribute(&self, name: &str) -> Result<Option<String>, PageError>;

    /// DOM property value, `None` when absent.
    fn property(&self, name: &str) -> Result<Option<serde_json::Value>, PageError>;

    /// Visible text content.
    fn text(&self) -> Result<String, PageError>;

    /// Checked state for checkboxes and radio buttons.
    fn is_checked(&self) -> Result<bool, PageError>;

    /// Type text into the control, appending to its current value.
    fn type_text(&self, text: &str) -> Result<(), PageError>;

    /// Clear the control's current value.
    fn clear(&self) -> Result<(), PageError>;

    /// Select the option whose value matches (selectable lists only).
    fn select_option(&self, value: &str) -> Result<(), PageError>;

    /// Click the control.
    fn click(&self) -> Result<(), PageError>;

    /// Classify the control from its tag and `type` attribute.
    fn kind(&self) -> Result<ControlKind, PageError> {
        let tag = self.tag_name()?;
        let input_type = self.attribute("type")?;
        Ok(ControlKind::classify(&tag, input_type.as_deref()))
    }
}

/// Broad kind of a form control, used to dispatch value writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Text,
    TextArea,
    Select,
    Checkbox,
    Radio,
}

impl ControlKind {
    /// Classify a control from its tag name and optional `type` attribute.
    pub fn classify(tag: &str, input_type: Option<&str>) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "select" => Self::Select,
            "textarea" => Self::TextArea,
            "input" => match input_type.map(|t| t.to_ascii_lowercase()).as_deref() {
                Some("checkbox") => Self::Checkbox,
                Some("radio") => Self::Radio,
                _ => Self::Text,
            },
            _ => Self::Text,
        }
    }

    /// Whether the control is toggled rather than typed into.
    pub fn is_toggle(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}
