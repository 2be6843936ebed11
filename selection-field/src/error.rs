//! Error types

use crate::field::FieldId;

/// Why an element could not be bound as a selection field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The host has no element with this id.
    #[error("element '{element}' not found")]
    UnknownElement { element: String },

    /// The element is neither a checkbox nor a radio.
    #[error("element '{element}' is not a checkbox or radio input")]
    NotSelectionInput { element: String },

    /// The element is already bound.
    #[error("element '{element}' is already bound as {field}")]
    AlreadyBound { element: String, field: FieldId },
}

impl BindError {
    pub fn unknown_element(element: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
        }
    }

    pub fn not_selection_input(element: impl Into<String>) -> Self {
        Self::NotSelectionInput {
            element: element.into(),
        }
    }
}
