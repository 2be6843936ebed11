//! Radio group registry.
//!
//! Group membership is explicit: every bound radio is registered under a
//! [`GroupId`] and the registry keeps the ordered member list per group.

use std::collections::HashMap;
use std::fmt;

use crate::field::FieldId;

/// Key identifying a radio group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupId {
    /// Named through the `radio_group` option.
    Explicit(String),
    /// Radios sharing a `name` within one form scope.
    Named { form: Option<String>, name: String },
    /// A radio without a name, alone in its group.
    Solo(String),
}

impl GroupId {
    /// Resolve the group for a radio from its options and attributes.
    pub fn resolve(
        explicit: Option<&str>,
        name: Option<&str>,
        form: Option<&str>,
        element: &str,
    ) -> Self {
        match (explicit, name) {
            (Some(group), _) => GroupId::Explicit(group.to_string()),
            (None, Some(name)) if !name.is_empty() => GroupId::Named {
                form: form.map(str::to_string),
                name: name.to_string(),
            },
            _ => GroupId::Solo(element.to_string()),
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupId::Explicit(group) => write!(f, "group:{group}"),
            GroupId::Named { form: Some(form), name } => write!(f, "{form}/{name}"),
            GroupId::Named { form: None, name } => f.write_str(name),
            GroupId::Solo(element) => write!(f, "solo:{element}"),
        }
    }
}

/// Ordered member lists per radio group.
#[derive(Debug, Default)]
pub struct RadioGroups {
    groups: HashMap<GroupId, Vec<FieldId>>,
}

impl RadioGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members of a group, in join order. Empty for unknown groups.
    pub fn members(&self, group: &GroupId) -> &[FieldId] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Add a field to a group. Joining twice is a no-op.
    pub fn join(&mut self, group: GroupId, field: FieldId) {
        let members = self.groups.entry(group).or_default();
        if !members.contains(&field) {
            members.push(field);
        }
    }

    /// Remove a whole group, returning its former members.
    pub fn dissolve(&mut self, group: &GroupId) -> Vec<FieldId> {
        self.groups.remove(group).unwrap_or_default()
    }

    /// Number of live groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
