//! Form-level validation results.

use crate::field::FieldId;

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    /// The failing field.
    pub field: FieldId,
    /// Field key (input name, or element id for nameless inputs).
    pub key: String,
    /// Element id, for focusing.
    pub element: String,
}

/// Result of validating every bound field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation.
    Invalid(Vec<InvalidField>),
}

impl ValidationResult {
    pub(crate) fn from_failures(failures: Vec<InvalidField>) -> Self {
        if failures.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(failures)
        }
    }

    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Get all failing fields.
    pub fn failures(&self) -> &[InvalidField] {
        match self {
            Self::Valid => &[],
            Self::Invalid(failures) => failures,
        }
    }

    /// Element id of the first failing field.
    pub fn first_invalid_element(&self) -> Option<&str> {
        self.failures().first().map(|f| f.element.as_str())
    }
}
