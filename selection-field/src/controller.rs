//! The selection field controller.
//!
//! [`SelectionFields`] owns every bound field, the radio group registry and the
//! clean-check timers. Per-field operations go through a [`Field`] handle
//! obtained with [`SelectionFields::field`].

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{debug, trace};
use tokio::time::Instant;

use crate::config::FieldsConfig;
use crate::error::BindError;
use crate::event::{EventResult, FieldEvent, FieldEventKind, HostEvent};
use crate::field::{Conflict, FieldId, FieldState};
use crate::group::{GroupId, RadioGroups};
use crate::host::{FieldHost, InputKind};
use crate::options::FieldOptions;
use crate::status::{StatusFlags, StatusName};
use crate::timer::CleanCheckTimers;
use crate::validation::{InvalidField, ValidationResult};
use crate::value::FieldValue;

/// Every selection field bound against one host.
///
/// # Example
///
/// ```
/// use selection_field::{FieldOptions, FieldValue, MemoryHost, MemoryInput, SelectionFields};
///
/// let host = MemoryHost::new()
///     .with("s", MemoryInput::radio("size", "s"))
///     .with("m", MemoryInput::radio("size", "m"));
/// let mut fields = SelectionFields::new(host);
///
/// let small = fields.bind("s", FieldOptions::new()).unwrap();
/// let medium = fields.bind("m", FieldOptions::new()).unwrap();
///
/// fields.field(small).unwrap().set("m");
/// assert_eq!(fields.field(medium).unwrap().get(), FieldValue::from("m"));
/// ```
#[derive(Debug)]
pub struct SelectionFields<H: FieldHost> {
    host: H,
    config: FieldsConfig,
    fields: BTreeMap<FieldId, FieldState>,
    elements: HashMap<String, FieldId>,
    groups: RadioGroups,
    timers: CleanCheckTimers,
    events: Vec<FieldEvent>,
    #[cfg(test)]
    max_propagation_depth: usize,
}

impl<H: FieldHost> SelectionFields<H> {
    /// Create a controller with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, FieldsConfig::default())
    }

    pub fn with_config(host: H, config: FieldsConfig) -> Self {
        Self {
            host,
            config,
            fields: BTreeMap::new(),
            elements: HashMap::new(),
            groups: RadioGroups::new(),
            timers: CleanCheckTimers::new(),
            events: Vec::new(),
            #[cfg(test)]
            max_propagation_depth: 0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &FieldsConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------

    /// Bind a checkbox or radio element as a selection field.
    ///
    /// Unset options are filled from the element's attributes. Radios join
    /// their group and merge the required flag with the existing members.
    pub fn bind(&mut self, element: &str, options: FieldOptions) -> Result<FieldId, BindError> {
        if let Some(&field) = self.elements.get(element) {
            return Err(BindError::AlreadyBound {
                element: element.to_string(),
                field,
            });
        }

        let info = self
            .host
            .describe(element)
            .ok_or_else(|| BindError::unknown_element(element))?;
        let kind = info
            .kind
            .ok_or_else(|| BindError::not_selection_input(element))?;

        let mut options = options.with_attributes(&info.attributes);
        options.merge_required();

        let group = (kind == InputKind::Radio).then(|| {
            GroupId::resolve(
                options.radio_group.as_deref(),
                info.name.as_deref(),
                info.form.as_deref(),
                element,
            )
        });
        let key = info
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| element.to_string());

        let container = self.host.mount(element);
        let id = FieldId::new();
        self.fields.insert(
            id,
            FieldState {
                element: element.to_string(),
                container,
                key,
                value: info.value,
                kind,
                group: group.clone(),
                label: None,
                prev_value: FieldValue::Empty,
                dirty: false,
                states: StatusFlags::default(),
            },
        );
        self.elements.insert(element.to_string(), id);

        if let Some(label) = &options.label {
            self.set_label(id, label);
        }

        let mut required = options.is_required();
        match group {
            Some(group) => {
                let existing = self.groups.members(&group).to_vec();
                self.groups.join(group.clone(), id);

                // A new member adopts whatever the group already carries.
                let adopted = [
                    StatusName::Require,
                    StatusName::Disable,
                    StatusName::Error,
                    StatusName::Warn,
                ];
                for status in adopted {
                    let group_has = existing
                        .iter()
                        .any(|m| self.fields.get(m).is_some_and(|f| f.states.get(status)));
                    if status == StatusName::Require {
                        required |= group_has;
                    } else if group_has {
                        self.apply_status(id, status, true, false, 0);
                    }
                }
                let group_dirty = existing
                    .iter()
                    .any(|m| self.fields.get(m).is_some_and(|f| f.dirty));
                if group_dirty {
                    // A dirty group keeps its committed value.
                    let committed = existing
                        .first()
                        .and_then(|m| self.fields.get(m))
                        .map(|f| f.prev_value.clone());
                    if let Some(prev) = committed
                        && let Some(field) = self.fields.get_mut(&id)
                    {
                        field.prev_value = prev;
                    }
                    self.mark_dirty(&[id]);
                } else {
                    self.refresh_prev_value(id);
                }
                debug!("bound radio {element} as {id} in group {group}");
            }
            None => {
                let checked = self.host.is_checked(element);
                if let Some(field) = self.fields.get_mut(&id) {
                    field.prev_value = FieldValue::Bool(checked);
                }
                debug!("bound checkbox {element} as {id}");
            }
        }

        self.apply_status(id, StatusName::Require, required, false, 0);
        if options.disabled {
            self.apply_status(id, StatusName::Disable, true, false, 0);
        }

        Ok(id)
    }

    /// Handle to a bound field, or `None` if `id` is not (or no longer) bound.
    pub fn field(&mut self, id: FieldId) -> Option<Field<'_, H>> {
        if self.fields.contains_key(&id) {
            Some(Field { fields: self, id })
        } else {
            None
        }
    }

    /// Id of the field bound to `element`.
    pub fn field_id(&self, element: &str) -> Option<FieldId> {
        self.elements.get(element).copied()
    }

    /// Handle to the field bound to `element`.
    pub fn field_by_element(&mut self, element: &str) -> Option<Field<'_, H>> {
        let id = self.field_id(element)?;
        self.field(id)
    }

    /// Element bound as `id`.
    pub fn element(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).map(|field| field.element.as_str())
    }

    pub fn is_bound(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Bound field ids, in bind order.
    pub fn ids(&self) -> Vec<FieldId> {
        self.fields.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // -------------------------------------------------------------------------
    // Events and timers
    // -------------------------------------------------------------------------

    /// Take every event emitted since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Feed an interaction from the host into the bound field.
    pub fn dispatch(&mut self, event: &HostEvent) -> EventResult {
        let Some(id) = self.field_id(event.element()) else {
            return EventResult::Ignored;
        };

        match event {
            HostEvent::Change(_) => {
                self.validate(id);
            }
            HostEvent::PointerEnter(_) => self.apply_status(id, StatusName::Hover, true, true, 0),
            HostEvent::PointerLeave(_) => self.apply_status(id, StatusName::Hover, false, true, 0),
            HostEvent::Removed(_) => {
                self.destroy(id);
            }
        }
        EventResult::Consumed
    }

    /// Earliest pending clean check.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Whether a clean check is pending for `id`.
    pub fn has_pending_check(&self, id: FieldId) -> bool {
        self.timers.is_pending(id)
    }

    /// Run every clean check that is due now. Returns how many fields turned clean.
    pub fn poll_timers(&mut self) -> usize {
        self.poll_timers_at(Instant::now())
    }

    /// Run every clean check due at `now`.
    pub fn poll_timers_at(&mut self, now: Instant) -> usize {
        let mut cleaned = 0;
        for id in self.timers.take_due(now) {
            let Some(field) = self.fields.get(&id) else {
                continue;
            };
            if !field.dirty {
                continue;
            }
            let previous = field.prev_value.clone();
            if self.get(id) == previous {
                trace!("clean check passed for {id}");
                self.clear_dirty(id);
                cleaned += 1;
            }
        }
        cleaned
    }

    /// Wait until the next pending clean check is due and run it.
    ///
    /// Returns immediately with `0` when nothing is pending.
    pub async fn settle(&mut self) -> usize {
        let Some(deadline) = self.timers.next_deadline() else {
            return 0;
        };
        tokio::time::sleep_until(deadline).await;
        self.poll_timers_at(deadline.max(Instant::now()))
    }

    // -------------------------------------------------------------------------
    // Form-level helpers
    // -------------------------------------------------------------------------

    /// Validate every bound field. Radio groups are reported once.
    pub fn validate_all(&mut self) -> ValidationResult {
        let mut failures = Vec::new();
        let mut reported: HashSet<GroupId> = HashSet::new();

        for id in self.ids() {
            if self.validate(id) {
                continue;
            }
            let Some(field) = self.fields.get(&id) else {
                continue;
            };
            if let Some(group) = &field.group
                && !reported.insert(group.clone())
            {
                continue;
            }
            failures.push(InvalidField {
                field: id,
                key: field.key.clone(),
                element: field.element.clone(),
            });
        }

        ValidationResult::from_failures(failures)
    }

    /// Current value per field key.
    pub fn values(&self) -> BTreeMap<String, FieldValue> {
        self.fields
            .iter()
            .map(|(id, field)| (field.key.clone(), self.get(*id)))
            .collect()
    }

    /// Dirty fields, in bind order.
    pub fn dirty_fields(&self) -> Vec<FieldId> {
        self.fields
            .iter()
            .filter(|(_, field)| field.dirty)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Conflicts between dirty fields and an external key → value map.
    ///
    /// Each key is reported at most once; keys absent from `values` are skipped.
    pub fn conflicts_with(&self, values: &HashMap<String, FieldValue>) -> Vec<Conflict> {
        let mut seen = HashSet::new();
        self.fields
            .iter()
            .filter_map(|(id, field)| {
                let external = values.get(&field.key)?;
                if !seen.insert(field.key.clone()) {
                    return None;
                }
                self.conflicts(*id, external)
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Field operations
    // -------------------------------------------------------------------------

    fn emit(&mut self, field: FieldId, kind: FieldEventKind) {
        self.events.push(FieldEvent::new(field, kind));
    }

    /// Ids sharing state with `id`: its radio group, or just itself.
    fn members(&self, id: FieldId) -> Vec<FieldId> {
        let members = self
            .fields
            .get(&id)
            .and_then(|field| field.group.as_ref())
            .map(|group| self.groups.members(group))
            .unwrap_or(&[]);
        if members.is_empty() {
            vec![id]
        } else {
            members.to_vec()
        }
    }

    fn get(&self, id: FieldId) -> FieldValue {
        let Some(field) = self.fields.get(&id) else {
            return FieldValue::Empty;
        };
        match field.kind {
            InputKind::Checkbox => FieldValue::Bool(self.host.is_checked(&field.element)),
            InputKind::Radio => self
                .members(id)
                .iter()
                .filter_map(|m| self.fields.get(m))
                .find(|member| self.host.is_checked(&member.element))
                .map_or(FieldValue::Empty, |member| FieldValue::Text(member.value.clone())),
        }
    }

    /// Commit the current value as the previous value of `id` and its group.
    fn refresh_prev_value(&mut self, id: FieldId) {
        let value = self.get(id);
        for member in self.members(id) {
            if let Some(field) = self.fields.get_mut(&member) {
                field.prev_value = value.clone();
            }
        }
    }

    fn set(&mut self, id: FieldId, value: FieldValue) {
        let Some(field) = self.fields.get(&id) else {
            return;
        };

        let after = match field.kind {
            InputKind::Radio => {
                let members = self.members(id);
                for member in &members {
                    if let Some(m) = self.fields.get(member) {
                        self.host.set_checked(&m.element, false);
                    }
                }
                if let Some(text) = value.as_text() {
                    let target = members
                        .iter()
                        .filter_map(|m| self.fields.get(m))
                        .find(|m| m.value == text)
                        .map(|m| m.element.clone());
                    match target {
                        Some(element) => self.host.set_checked(&element, true),
                        None => trace!("no radio with value '{text}' in the group of {id}"),
                    }
                }
                self.refresh_prev_value(id);
                value
            }
            InputKind::Checkbox => {
                let checked = value.is_truthy();
                let element = field.element.clone();
                if let Some(field) = self.fields.get_mut(&id) {
                    field.prev_value = FieldValue::Bool(checked);
                }
                self.host.set_checked(&element, checked);
                FieldValue::Bool(checked)
            }
        };

        self.clear_dirty(id);
        self.emit(id, FieldEventKind::AfterSet(after));
    }

    fn mark_dirty(&mut self, ids: &[FieldId]) {
        for id in ids {
            if let Some(field) = self.fields.get_mut(id) {
                field.dirty = true;
                self.host.set_class(&field.container, &self.config.dirty_class, true);
            }
        }
    }

    fn check_dirty(&mut self, id: FieldId) {
        let Some(field) = self.fields.get(&id) else {
            return;
        };

        if field.dirty {
            self.timers
                .schedule(id, Instant::now(), self.config.clean_check_delay);
            return;
        }

        let previous = field.prev_value.clone();
        let current = self.get(id);
        if FieldValue::differs(&previous, &current) {
            debug!("{id} is dirty ({previous} -> {current})");
            let members = self.members(id);
            self.mark_dirty(&members);
            self.emit(id, FieldEventKind::Dirty);
        }
    }

    fn clear_dirty(&mut self, id: FieldId) {
        for member in self.members(id) {
            self.timers.cancel(member);
            if let Some(field) = self.fields.get_mut(&member) {
                field.dirty = false;
                self.host.set_class(&field.container, &self.config.dirty_class, false);
            }
        }
        self.emit(id, FieldEventKind::Clean);
    }

    fn conflicts(&self, id: FieldId, value: &FieldValue) -> Option<Conflict> {
        let field = self.fields.get(&id)?;
        if !field.dirty {
            return None;
        }
        let current = self.get(id);
        (current != *value).then(|| Conflict {
            key: field.key.clone(),
            v_old: current,
            v_new: value.clone(),
        })
    }

    fn validate(&mut self, id: FieldId) -> bool {
        let Some(field) = self.fields.get(&id) else {
            return true;
        };

        let valid = if !field.states.get(StatusName::Require) {
            true
        } else {
            match field.kind {
                InputKind::Checkbox => self.host.is_checked(&field.element),
                InputKind::Radio => {
                    let checked = self
                        .members(id)
                        .iter()
                        .filter_map(|m| self.fields.get(m))
                        .filter(|m| self.host.is_checked(&m.element))
                        .count();
                    checked == 1
                }
            }
        };

        self.apply_status(id, StatusName::Error, !valid, true, 0);
        valid
    }

    /// Store a status flag and mirror it onto the container and the radio group.
    ///
    /// Group members are only visited while out of sync, so the recursion
    /// depth is bounded by the group size.
    fn apply_status(
        &mut self,
        id: FieldId,
        status: StatusName,
        value: bool,
        fire: bool,
        depth: usize,
    ) {
        let Some(field) = self.fields.get_mut(&id) else {
            return;
        };
        if !field.states.set(status, value) {
            return;
        }

        let container = field.container.clone();
        let syncs = field.is_radio() && status.syncs_across_group();
        trace!("{id}: {status} = {value}");

        self.host.set_class(&container, status.as_str(), value);
        if status == StatusName::Disable {
            self.host.set_interactive(&container, !value);
        }

        #[cfg(test)]
        {
            self.max_propagation_depth = self.max_propagation_depth.max(depth);
        }

        if syncs {
            let out_of_sync: Vec<FieldId> = self
                .members(id)
                .into_iter()
                .filter(|m| *m != id)
                .filter(|m| self.fields.get(m).is_some_and(|f| f.states.get(status) != value))
                .collect();
            for member in out_of_sync {
                self.apply_status(member, status, value, false, depth + 1);
            }
        }

        if fire {
            self.emit(id, FieldEventKind::StatusUpdate { status, value });
        }
    }

    fn set_label(&mut self, id: FieldId, text: &str) {
        if let Some(field) = self.fields.get_mut(&id) {
            field.label = Some(text.to_string());
            self.host.set_label(&field.element, text);
        }
    }

    fn set_visible(&mut self, id: FieldId, visible: bool) {
        if let Some(field) = self.fields.get(&id) {
            self.host.set_visible(&field.container, visible);
        }
    }

    /// Tear down `id`. Radios take the rest of their group down with them.
    fn destroy(&mut self, id: FieldId) -> bool {
        let Some(field) = self.fields.remove(&id) else {
            return false;
        };
        self.elements.remove(&field.element);
        self.timers.cancel(id);
        self.host.unmount(&field.element);
        debug!("destroyed {id} ({})", field.element);

        if let Some(group) = &field.group {
            for member in self.groups.dissolve(group) {
                if member == id {
                    continue;
                }
                if let Some(other) = self.fields.get_mut(&member) {
                    other.group = None;
                }
                self.destroy(member);
            }
        }
        true
    }
}

/// Handle to one bound field.
///
/// Obtained from [`SelectionFields::field`]; the field stays bound for the
/// lifetime of the handle unless [`Field::destroy`] consumes it.
pub struct Field<'a, H: FieldHost> {
    fields: &'a mut SelectionFields<H>,
    id: FieldId,
}

impl<H: FieldHost> Field<'_, H> {
    fn state(&self) -> Option<&FieldState> {
        self.fields.fields.get(&self.id)
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The bound element id.
    pub fn element(&self) -> &str {
        self.state().map_or("", |f| f.element.as_str())
    }

    /// Field key (input name, or element id for nameless inputs).
    pub fn key(&self) -> &str {
        self.state().map_or("", |f| f.key.as_str())
    }

    pub fn kind(&self) -> Option<InputKind> {
        self.state().map(|f| f.kind)
    }

    pub fn group(&self) -> Option<&GroupId> {
        self.state().and_then(|f| f.group.as_ref())
    }

    pub fn label(&self) -> Option<&str> {
        self.state().and_then(|f| f.label.as_deref())
    }

    /// The last committed value.
    pub fn prev_value(&self) -> FieldValue {
        self.state().map(|f| f.prev_value.clone()).unwrap_or_default()
    }

    /// Container id wrapping the input.
    pub fn get_field(&self) -> &str {
        self.state().map_or("", |f| f.container.as_str())
    }

    pub fn set_label(&mut self, text: &str) {
        self.fields.set_label(self.id, text);
    }

    /// Current value: the checked state of a checkbox, or the value of the
    /// checked radio in the group.
    pub fn get(&self) -> FieldValue {
        self.fields.get(self.id)
    }

    /// Write a value, commit it as the previous value, clear dirty and emit
    /// `AfterSet`. Radio values that match no member leave nothing selected.
    pub fn set(&mut self, value: impl Into<FieldValue>) {
        self.fields.set(self.id, value.into());
    }

    /// Reset the field: unchecked checkbox, or no radio selected.
    pub fn clear(&mut self) {
        self.set(FieldValue::Empty);
    }

    /// Compare the current value with the previous one.
    ///
    /// A clean field that changed turns dirty (with its whole radio group) and
    /// emits `Dirty`. A dirty field schedules a debounced clean check instead.
    pub fn check_dirty(&mut self) {
        self.fields.check_dirty(self.id);
    }

    pub fn is_dirty(&self) -> bool {
        self.state().is_some_and(|f| f.dirty)
    }

    /// Cancel pending clean checks and clear dirty on the field (or its
    /// group). Always emits `Clean`.
    pub fn clear_dirty(&mut self) {
        self.fields.clear_dirty(self.id);
    }

    /// Describe the conflict between a local dirty value and `value`, if any.
    pub fn conflicts(&self, value: impl Into<FieldValue>) -> Option<Conflict> {
        self.fields.conflicts(self.id, &value.into())
    }

    /// Check the required constraint, update `error`, and return validity.
    pub fn validate(&mut self) -> bool {
        self.fields.validate(self.id)
    }

    pub fn hide(&mut self) {
        self.fields.set_visible(self.id, false);
    }

    pub fn show(&mut self) {
        self.fields.set_visible(self.id, true);
    }

    pub fn enable(&mut self) {
        self.status(StatusName::Disable, false);
    }

    pub fn disable(&mut self) {
        self.status(StatusName::Disable, true);
    }

    pub fn is_disabled(&self) -> bool {
        self.has_status(StatusName::Disable)
    }

    /// Set a status flag and emit `StatusUpdate` if it changed.
    pub fn status(&mut self, status: StatusName, value: bool) {
        self.status_with(status, value, true);
    }

    /// Set a status flag, emitting `StatusUpdate` only when `fire_events` is set.
    pub fn status_with(&mut self, status: StatusName, value: bool, fire_events: bool) {
        self.fields.apply_status(self.id, status, value, fire_events, 0);
    }

    /// String entry point for [`Field::status_with`]. Unknown names are ignored.
    pub fn status_by_name(&mut self, name: &str, value: bool, fire_events: bool) {
        match name.parse::<StatusName>() {
            Ok(status) => self.status_with(status, value, fire_events),
            Err(err) => trace!("{}: ignoring {err}", self.id),
        }
    }

    pub fn has_status(&self, status: StatusName) -> bool {
        self.state().is_some_and(|f| f.states.get(status))
    }

    /// Flags currently set on the field.
    pub fn statuses(&self) -> StatusFlags {
        self.state().map(|f| f.states).unwrap_or_default()
    }

    /// Tear the field down. Radios take their whole group with them.
    pub fn destroy(self) {
        self.fields.destroy(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryHost, MemoryInput};

    fn radio_group(n: usize) -> (SelectionFields<MemoryHost>, Vec<FieldId>) {
        let mut host = MemoryHost::new();
        for i in 0..n {
            host.insert(format!("r{i}"), MemoryInput::radio("pick", format!("v{i}")));
        }
        let mut fields = SelectionFields::new(host);
        let ids = (0..n)
            .map(|i| fields.bind(&format!("r{i}"), FieldOptions::new()).unwrap())
            .collect();
        (fields, ids)
    }

    #[test]
    fn test_propagation_depth_bounded_by_group_size() {
        let (mut fields, ids) = radio_group(5);
        fields.max_propagation_depth = 0;

        fields.field(ids[2]).unwrap().disable();

        assert!(fields.max_propagation_depth < ids.len());
        for id in &ids {
            assert!(fields.field(*id).unwrap().is_disabled());
        }
    }

    #[test]
    fn test_propagation_skips_members_already_in_sync() {
        let (mut fields, ids) = radio_group(3);
        fields.max_propagation_depth = 0;

        fields.field(ids[0]).unwrap().status(StatusName::Warn, true);
        fields.max_propagation_depth = 0;
        fields.field(ids[1]).unwrap().status(StatusName::Warn, true);

        assert_eq!(fields.max_propagation_depth, 0);
    }

    #[test]
    fn test_members_of_detached_field() {
        let (mut fields, ids) = radio_group(2);
        if let Some(field) = fields.fields.get_mut(&ids[0]) {
            field.group = None;
        }
        assert_eq!(fields.members(ids[0]), vec![ids[0]]);
    }
}
