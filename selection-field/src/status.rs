//! Status flags carried by every selection field.
//!
//! A field has a fixed vocabulary of boolean statuses. Each one is rendered by
//! the host as a same-named class on the field container.

use std::fmt;
use std::str::FromStr;

/// One of the status flags a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusName {
    /// The field must be checked (checkbox) or have a selection (radio).
    Require,
    /// The field ignores pointer interaction.
    Disable,
    /// The last validation failed.
    Error,
    /// The pointer is over the field container.
    Hover,
    /// Host-defined warning state.
    Warn,
}

impl StatusName {
    /// Every status, in declaration order.
    pub const ALL: [StatusName; 5] = [
        StatusName::Require,
        StatusName::Disable,
        StatusName::Error,
        StatusName::Hover,
        StatusName::Warn,
    ];

    /// Name used for the container class and for string lookups.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusName::Require => "require",
            StatusName::Disable => "disable",
            StatusName::Error => "error",
            StatusName::Hover => "hover",
            StatusName::Warn => "warn",
        }
    }

    /// Whether a change on one radio must be mirrored on the rest of its group.
    pub fn syncs_across_group(self) -> bool {
        !matches!(self, StatusName::Hover)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a name outside the status vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for StatusName {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusName::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// The status flags of a single field. Flags that were never set read `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags([bool; 5]);

impl StatusFlags {
    /// Current value of a flag.
    pub fn get(&self, status: StatusName) -> bool {
        self.0[status.index()]
    }

    /// Store a flag. Returns `true` if the stored value changed.
    pub fn set(&mut self, status: StatusName, value: bool) -> bool {
        let slot = &mut self.0[status.index()];
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Flags currently set, in declaration order.
    pub fn active(&self) -> impl Iterator<Item = StatusName> + '_ {
        StatusName::ALL.into_iter().filter(|status| self.get(*status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for status in StatusName::ALL {
            assert_eq!(status.as_str().parse::<StatusName>(), Ok(status));
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "focus".parse::<StatusName>().unwrap_err();
        assert_eq!(err, UnknownStatus("focus".into()));
        assert_eq!(err.to_string(), "unknown status 'focus'");
    }

    #[test]
    fn test_flags_report_changes_only() {
        let mut flags = StatusFlags::default();
        assert!(!flags.get(StatusName::Warn));
        assert!(!flags.set(StatusName::Warn, false));
        assert!(flags.set(StatusName::Warn, true));
        assert!(!flags.set(StatusName::Warn, true));
        assert_eq!(flags.active().collect::<Vec<_>>(), vec![StatusName::Warn]);
    }

    #[test]
    fn test_hover_stays_local() {
        assert!(!StatusName::Hover.syncs_across_group());
        assert!(StatusName::Disable.syncs_across_group());
    }
}
