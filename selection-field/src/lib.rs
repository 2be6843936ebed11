//! Checkbox and radio selection fields for form builders.
//!
//! A [`SelectionFields`] controller binds checkbox and radio inputs of a host
//! rendering layer ([`FieldHost`]) into managed fields. Each field tracks its
//! dirty state against the last committed value, carries a set of status flags
//! ([`StatusName`]), validates its required constraint, and reports what
//! happened through [`FieldEvent`]s. Radios sharing a group keep their
//! required, disable, error, warn and dirty state in sync.
//!
//! # Example
//!
//! ```
//! use selection_field::{FieldEventKind, FieldOptions, MemoryHost, MemoryInput, SelectionFields};
//!
//! let host = MemoryHost::new().with("terms", MemoryInput::checkbox());
//! let mut fields = SelectionFields::new(host);
//! let terms = fields.bind("terms", FieldOptions::new().required(true)).unwrap();
//!
//! assert!(!fields.field(terms).unwrap().validate());
//!
//! fields.host_mut().click("terms");
//! let mut field = fields.field(terms).unwrap();
//! field.check_dirty();
//! assert!(field.is_dirty());
//! assert!(field.validate());
//!
//! let events: Vec<_> = fields.drain_events().into_iter().map(|e| e.kind).collect();
//! assert!(events.contains(&FieldEventKind::Dirty));
//! ```

mod config;
mod controller;
mod error;
mod event;
mod field;
mod group;
mod host;
mod options;
mod status;
mod timer;
mod validation;
mod value;

pub use config::FieldsConfig;
pub use controller::{Field, SelectionFields};
pub use error::BindError;
pub use event::{EventResult, FieldEvent, FieldEventKind, HostEvent};
pub use field::{Conflict, FieldId};
pub use group::{GroupId, RadioGroups};
pub use host::{
    FieldHost, InputInfo, InputKind, MemoryContainer, MemoryHost, MemoryInput, container_id,
};
pub use options::FieldOptions;
pub use status::{StatusFlags, StatusName, UnknownStatus};
pub use timer::{CleanCheckTimers, TimerToken};
pub use validation::{InvalidField, ValidationResult};
pub use value::FieldValue;
