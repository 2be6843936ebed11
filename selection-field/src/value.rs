//! Field values.

use std::fmt;

/// The value of a selection field.
///
/// Checkboxes report [`FieldValue::Bool`]. Radio groups report the value of the
/// checked member as [`FieldValue::Text`], or [`FieldValue::Empty`] when
/// nothing is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    #[default]
    Empty,
}

impl FieldValue {
    /// Loose truthiness used when coercing a value onto a checkbox.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Empty => false,
        }
    }

    /// Text form used to match against radio values. `Empty` has none.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Empty => None,
        }
    }

    /// Whether moving from `previous` to `current` counts as a change.
    ///
    /// An empty previous value followed by a falsy current value is not a
    /// change, so a field that starts out unset does not turn dirty on its
    /// first check.
    pub fn differs(previous: &FieldValue, current: &FieldValue) -> bool {
        if previous == current {
            return false;
        }
        !(matches!(previous, FieldValue::Empty) && !current.is_truthy())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Empty => Ok(()),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}
