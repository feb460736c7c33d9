//! Value writes dispatched by control kind.

use tracing::debug;

use formpilot_protocols::{ControlKind, FieldHandle, PageError, Scalar};

/// Write a value into a field the way a user would:
/// selectable lists pick the matching option, checkboxes and radios are
/// clicked only when their state differs from the requested one, and every
/// other control is cleared and typed into.
///
/// A click cannot uncheck a radio, so asking a checked radio for `false` is
/// an [`PageError::Interaction`] error.
pub fn set_field_value(field: &dyn FieldHandle, value: &Scalar) -> Result<(), PageError> {
    let kind = field.kind()?;
    match kind {
        ControlKind::Select => field.select_option(&value.to_string()),
        ControlKind::Checkbox | ControlKind::Radio => {
            let wanted = value.truthy();
            if field.is_checked()? != wanted {
                if kind == ControlKind::Radio && !wanted {
                    return Err(PageError::Interaction(format!(
                        "radio '{}' cannot be unchecked by clicking it",
                        field.name()
                    )));
                }
                debug!("Toggling '{}' to {}", field.name(), wanted);
                field.click()?;
            }
            Ok(())
        }
        ControlKind::Text | ControlKind::TextArea => {
            field.clear()?;
            field.type_text(&value.to_string())
        }
    }
}
