//! Per-field state.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::group::GroupId;
use crate::host::InputKind;
use crate::status::StatusFlags;
use crate::value::FieldValue;

/// Unique identifier for a bound selection field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(usize);

impl FieldId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__selection_field_{}", self.0)
    }
}

/// A dirty field whose local value diverges from an externally supplied one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Field key (input name, or element id for nameless inputs).
    pub key: String,
    /// The local, uncommitted value.
    pub v_old: FieldValue,
    /// The external value.
    pub v_new: FieldValue,
}

/// State of one bound input.
#[derive(Debug, Clone)]
pub(crate) struct FieldState {
    pub element: String,
    pub container: String,
    pub key: String,
    /// The input's own `value` attribute (radios match against it).
    pub value: String,
    pub kind: InputKind,
    /// Radio group; `None` for checkboxes and for radios detached during teardown.
    pub group: Option<GroupId>,
    pub label: Option<String>,
    /// Last committed value.
    pub prev_value: FieldValue,
    pub dirty: bool,
    pub states: StatusFlags,
}

impl FieldState {
    pub fn is_radio(&self) -> bool {
        self.kind == InputKind::Radio
    }
}
