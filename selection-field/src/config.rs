//! Controller configuration

use std::time::Duration;

use serde::Deserialize;

/// Settings shared by every field of a [`SelectionFields`](crate::SelectionFields).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use selection_field::FieldsConfig;
///
/// let config = FieldsConfig::default()
///     .with_clean_check_delay(Duration::from_millis(500))
///     .with_dirty_class("changed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldsConfig {
    /// How long a dirty field waits after its last dirty check before
    /// re-comparing against its previous value.
    ///
    /// Default: 300 ms
    #[serde(rename = "cleanCheckDelayMs", with = "millis")]
    pub clean_check_delay: Duration,

    /// Class applied to the container of a dirty field.
    ///
    /// Default: `"dirty"`
    pub dirty_class: String,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            clean_check_delay: Duration::from_millis(300),
            dirty_class: "dirty".to_string(),
        }
    }
}

impl FieldsConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the clean-check debounce delay.
    pub fn with_clean_check_delay(mut self, delay: Duration) -> Self {
        self.clean_check_delay = delay;
        self
    }

    /// Sets the dirty class name.
    pub fn with_dirty_class(mut self, class: impl Into<String>) -> Self {
        self.dirty_class = class.into();
        self
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FieldsConfig::default();
        assert_eq!(config.clean_check_delay, Duration::from_millis(300));
        assert_eq!(config.dirty_class, "dirty");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: FieldsConfig = serde_json::from_str(r#"{"cleanCheckDelayMs": 50}"#).unwrap();
        assert_eq!(config.clean_check_delay, Duration::from_millis(50));
        assert_eq!(config.dirty_class, "dirty");
    }
}
