//! Per-field creation options.

use std::collections::HashMap;

use serde::Deserialize;

/// Options accepted when binding an input.
///
/// `require` and `required` are aliases; either one marks the field as
/// required. Unset options may be filled from the element's attributes with
/// [`FieldOptions::with_attributes`].
///
/// # Example
///
/// ```
/// use selection_field::FieldOptions;
///
/// let options = FieldOptions::new().required(true).label("Accept terms");
/// assert!(options.is_required());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldOptions {
    pub require: Option<bool>,
    pub required: Option<bool>,
    pub label: Option<String>,
    /// Explicit radio group key. Radios without one are grouped by name.
    pub radio_group: Option<String>,
    /// Set from a `disabled` attribute; never deserialized.
    #[serde(skip)]
    pub disabled: bool,
}

impl FieldOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the required flag.
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets the label text.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Places the field in an explicit radio group.
    pub fn radio_group(mut self, group: impl Into<String>) -> Self {
        self.radio_group = Some(group.into());
        self
    }

    /// Whether either alias marks the field as required.
    pub fn is_required(&self) -> bool {
        self.require.unwrap_or(false) || self.required.unwrap_or(false)
    }

    /// Collapses both aliases into `required`.
    pub(crate) fn merge_required(&mut self) {
        let required = self.is_required();
        self.require = None;
        self.required = Some(required);
    }

    /// Fills unset options from element attributes.
    ///
    /// `data-label` (or `label`) supplies the label. `require`, `required`,
    /// `data-require` and `data-required` are toggles: present and not
    /// `"false"` means on. A `disabled` toggle disables the field.
    pub fn with_attributes(mut self, attributes: &HashMap<String, String>) -> Self {
        if self.label.is_none() {
            self.label = ["data-label", "label"]
                .iter()
                .find_map(|key| attributes.get(*key))
                .filter(|label| !label.is_empty())
                .cloned();
        }

        if self.require.is_none() {
            self.require = toggle(attributes, &["require", "data-require"]);
        }
        if self.required.is_none() {
            self.required = toggle(attributes, &["required", "data-required"]);
        }

        if toggle(attributes, &["disabled", "data-disabled"]) == Some(true) {
            self.disabled = true;
        }

        self
    }
}

fn toggle(attributes: &HashMap<String, String>, keys: &[&str]) -> Option<bool> {
    keys.iter()
        .find_map(|key| attributes.get(*key))
        .map(|value| !value.eq_ignore_ascii_case("false"))
}
