//! Snapshot field state and its [`FieldHandle`] implementation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use formpilot_protocols::{ControlKind, FieldHandle, PageError};

use crate::page::SnapshotPage;

/// State of one form control in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotField {
    pub name: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Element was removed from the DOM after lookup; every interaction fails.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub detached: bool,
}

fn default_tag() -> String {
    "input".to_string()
}

impl SnapshotField {
    fn blank(name: impl Into<String>, tag: &str) -> Self {
        Self {
            name: name.into(),
            tag: tag.to_string(),
            input_type: None,
            value: String::new(),
            checked: false,
            text: String::new(),
            attributes: BTreeMap::new(),
            properties: BTreeMap::new(),
            options: Vec::new(),
            hidden: false,
            disabled: false,
            suggestions: Vec::new(),
            detached: false,
        }
    }

    /// A text `<input>` with an initial value.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut field = Self::blank(name, "input");
        field.input_type = Some("text".to_string());
        field.value = value.into();
        field
    }

    pub fn textarea(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut field = Self::blank(name, "textarea");
        field.value = value.into();
        field
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        let mut field = Self::blank(name, "input");
        field.input_type = Some("checkbox".to_string());
        field.value = "on".to_string();
        field.checked = checked;
        field
    }

    pub fn radio(name: impl Into<String>, checked: bool) -> Self {
        let mut field = Self::checkbox(name, checked);
        field.input_type = Some("radio".to_string());
        field
    }

    /// A `<select>` with the given option values and current selection.
    pub fn select(name: impl Into<String>, options: &[&str], value: impl Into<String>) -> Self {
        let mut field = Self::blank(name, "select");
        field.options = options.iter().map(|o| o.to_string()).collect();
        field.value = value.into();
        field
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    pub fn kind(&self) -> ControlKind {
        ControlKind::classify(&self.tag, self.input_type.as_deref())
    }
}

/// A recorded field interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Interaction {
    Clear { field: String },
    Type { field: String, text: String },
    Select { field: String, value: String },
    Click { field: String },
}

/// Handle to one field of a [`SnapshotPage`].
pub(crate) struct SnapshotFieldHandle<'a> {
    pub(crate) page: &'a SnapshotPage,
    pub(crate) index: usize,
    pub(crate) name: String,
}

impl SnapshotFieldHandle<'_> {
    fn read<T>(&self, f: impl FnOnce(&SnapshotField) -> T) -> Result<T, PageError> {
        self.page.read_field(self.index, |field| {
            if field.detached {
                return Err(PageError::Interaction(format!(
                    "element '{}' is detached from the document",
                    field.name
                )));
            }
            Ok(f(field))
        })
    }

    fn write<T>(
        &self,
        interaction: Interaction,
        f: impl FnOnce(&mut SnapshotField) -> Result<T, PageError>,
    ) -> Result<T, PageError> {
        let result = self.page.write_field(self.index, |field| {
            if field.detached {
                return Err(PageError::Interaction(format!(
                    "element '{}' is detached from the document",
                    field.name
                )));
            }
            f(field)
        })?;
        self.page.record(interaction);
        Ok(result)
    }
}

impl FieldHandle for SnapshotFieldHandle<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag_name(&self) -> Result<String, PageError> {
        self.read(|f| f.tag.to_ascii_lowercase())
    }

    fn value(&self) -> Result<String, PageError> {
        self.read(|f| f.value.clone())
    }

    fn attribute(&self, name: &str) -> Result<Option<String>, PageError> {
        self.read(|f| match name {
            "name" => Some(f.name.clone()),
            "type" => f.input_type.clone(),
            _ => f.attributes.get(name).cloned(),
        })
    }

    fn property(&self, name: &str) -> Result<Option<Value>, PageError> {
        self.read(|f| match name {
            "value" => Some(Value::String(f.value.clone())),
            "checked" => Some(Value::Bool(f.checked)),
            "disabled" => Some(Value::Bool(f.disabled)),
            _ => f.properties.get(name).cloned(),
        })
    }

    fn text(&self) -> Result<String, PageError> {
        self.read(|f| f.text.clone())
    }

    fn is_checked(&self) -> Result<bool, PageError> {
        self.read(|f| f.checked)
    }

    fn type_text(&self, text: &str) -> Result<(), PageError> {
        let interaction = Interaction::Type {
            field: self.name.clone(),
            text: text.to_string(),
        };
        self.write(interaction, |f| {
            f.value.push_str(text);
            Ok(())
        })
    }

    fn clear(&self) -> Result<(), PageError> {
        let interaction = Interaction::Clear {
            field: self.name.clone(),
        };
        self.write(interaction, |f| {
            f.value.clear();
            Ok(())
        })
    }

    fn select_option(&self, value: &str) -> Result<(), PageError> {
        let interaction = Interaction::Select {
            field: self.name.clone(),
            value: value.to_string(),
        };
        self.write(interaction, |f| {
            if f.kind() != ControlKind::Select {
                return Err(PageError::Unsupported(format!(
                    "'{}' is not a selectable list",
                    f.name
                )));
            }
            if !f.options.iter().any(|o| o == value) {
                return Err(PageError::OptionNotFound {
                    field: f.name.clone(),
                    value: value.to_string(),
                });
            }
            f.value = value.to_string();
            Ok(())
        })
    }

    fn click(&self) -> Result<(), PageError> {
        let interaction = Interaction::Click {
            field: self.name.clone(),
        };
        self.write(interaction, |f| {
            match f.kind() {
                ControlKind::Checkbox => f.checked = !f.checked,
                ControlKind::Radio => f.checked = true,
                _ => {}
            }
            Ok(())
        })
    }
}
