//! Typed DOM effects executed through [`PageModel::execute_script`].
//!
//! The engine never builds raw JavaScript itself. It describes the effect it
//! needs and the page decides how to apply it: browser-backed pages run
//! [`DomScript::to_javascript`], in-memory pages update their own model.
//!
//! [`PageModel::execute_script`]: crate::page::PageModel::execute_script

use serde::{Deserialize, Serialize};

/// A DOM-level effect on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "script", rename_all = "snake_case")]
pub enum DomScript {
    /// Toggle CSS `display`. The element is never removed from the DOM.
    SetDisplay { field: String, visible: bool },
    /// Toggle the `disabled` state.
    SetDisabled { field: String, disabled: bool },
    /// Attach a suggestion list (`<datalist>`) to a text control.
    AttachSuggestions {
        field: String,
        suggestions: Vec<String>,
    },
}

impl DomScript {
    /// Name of the field the effect targets.
    pub fn field(&self) -> &str {
        match self {
            Self::SetDisplay { field, .. }
            | Self::SetDisabled { field, .. }
            | Self::AttachSuggestions { field, .. } => field,
        }
    }

    /// Render the effect as a self-contained JavaScript expression.
    pub fn to_javascript(&self) -> String {
        let selector = js_string(&format!("[name=\"{}\"]", self.field().replace('"', "\\\"")));
        match self {
            Self::SetDisplay { visible, .. } => {
                let display = if *visible { "''" } else { "'none'" };
                format!(
                    "(() => {{ const el = document.querySelector({selector}); \
                     if (!el) return false; el.style.display = {display}; return true; }})()"
                )
            }
            Self::SetDisabled { disabled, .. } => format!(
                "(() => {{ const el = document.querySelector({selector}); \
                 if (!el) return false; el.disabled = {disabled}; return true; }})()"
            ),
            Self::AttachSuggestions { field, suggestions } => {
                let list_id = js_string(&format!("{}-suggestions", field));
                let values = serde_json::to_string(suggestions).unwrap_or_else(|_| "[]".into());
                format!(
                    "(() => {{ const el = document.querySelector({selector}); \
                     if (!el) return false; \
                     let list = document.getElementById({list_id}); \
                     if (!list) {{ list = document.createElement('datalist'); list.id = {list_id}; \
                     document.body.appendChild(list); }} \
                     list.innerHTML = ''; \
                     for (const v of {values}) {{ const o = document.createElement('option'); \
                     o.value = v; list.appendChild(o); }} \
                     el.setAttribute('list', {list_id}); return true; }})()"
                )
            }
        }
    }
}

fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
