//! Events flowing between the controller and its host.

use crate::field::FieldId;
use crate::status::StatusName;
use crate::value::FieldValue;

/// What happened to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEventKind {
    /// The field diverged from its previous value.
    Dirty,
    /// The field's dirty state was cleared.
    Clean,
    /// A value was written through `set`.
    AfterSet(FieldValue),
    /// A status flag changed.
    StatusUpdate { status: StatusName, value: bool },
}

/// An event emitted by a field, consumed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEvent {
    pub field: FieldId,
    pub kind: FieldEventKind,
}

impl FieldEvent {
    pub fn new(field: FieldId, kind: FieldEventKind) -> Self {
        Self { field, kind }
    }
}

/// Interaction reported by the host for one of its elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The input's checked state changed.
    Change(String),
    /// The pointer entered the field container.
    PointerEnter(String),
    /// The pointer left the field container.
    PointerLeave(String),
    /// The element was removed from the host.
    Removed(String),
}

impl HostEvent {
    /// The element this event targets.
    pub fn element(&self) -> &str {
        match self {
            HostEvent::Change(el)
            | HostEvent::PointerEnter(el)
            | HostEvent::PointerLeave(el)
            | HostEvent::Removed(el) => el,
        }
    }
}

/// Result of dispatching a host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The element is not bound; nothing happened.
    Ignored,
    /// The event was handled.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
