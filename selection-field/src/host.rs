//! Host environment.
//!
//! The controller never touches a rendering layer directly. Everything it
//! needs from the outside world (reading and writing checked state, wrapping
//! inputs in containers, toggling classes) goes through [`FieldHost`].
//! [`MemoryHost`] is an in-memory implementation used by tests and the demo.

use std::collections::{BTreeSet, HashMap};

/// Kind of a bindable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Checkbox,
    Radio,
}

/// What the host knows about an input element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputInfo {
    /// `None` when the element is not a checkbox or radio.
    pub kind: Option<InputKind>,
    /// The `name` attribute.
    pub name: Option<String>,
    /// The `value` attribute.
    pub value: String,
    /// Form scope the element belongs to, if any.
    pub form: Option<String>,
    /// All other attributes.
    pub attributes: HashMap<String, String>,
}

/// The rendering layer hosting selection fields.
///
/// Elements and containers are addressed by string ids.
pub trait FieldHost {
    /// Describe an element, or `None` if it does not exist.
    fn describe(&self, element: &str) -> Option<InputInfo>;

    /// Read the checked state of an input.
    fn is_checked(&self, element: &str) -> bool;

    /// Write the checked state of an input.
    fn set_checked(&mut self, element: &str, checked: bool);

    /// Wrap an input in a field container and return the container id.
    ///
    /// The input's own classes move onto the container.
    fn mount(&mut self, element: &str) -> String;

    /// Undo [`FieldHost::mount`].
    fn unmount(&mut self, element: &str);

    /// Add or remove a class on a container.
    fn set_class(&mut self, container: &str, class: &str, on: bool);

    /// Enable or disable pointer interaction on a container.
    fn set_interactive(&mut self, container: &str, interactive: bool);

    /// Show or hide a container.
    fn set_visible(&mut self, container: &str, visible: bool);

    /// Set the label text shown next to an input.
    fn set_label(&mut self, element: &str, text: &str);
}

/// An input node held by [`MemoryHost`].
#[derive(Debug, Clone)]
pub struct MemoryInput {
    pub kind: Option<InputKind>,
    pub name: Option<String>,
    pub value: String,
    pub form: Option<String>,
    pub checked: bool,
    pub classes: BTreeSet<String>,
    pub attributes: HashMap<String, String>,
    pub label: Option<String>,
}

impl MemoryInput {
    /// A checkbox input.
    pub fn checkbox() -> Self {
        Self::new(Some(InputKind::Checkbox))
    }

    /// A radio input with the given `name` and `value`.
    pub fn radio(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut input = Self::new(Some(InputKind::Radio));
        input.name = Some(name.into());
        input.value = value.into();
        input
    }

    /// A non-selection input (text field and the like).
    pub fn other() -> Self {
        Self::new(None)
    }

    fn new(kind: Option<InputKind>) -> Self {
        Self {
            kind,
            name: None,
            value: String::new(),
            form: None,
            checked: false,
            classes: BTreeSet::new(),
            attributes: HashMap::new(),
            label: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A field container held by [`MemoryHost`].
#[derive(Debug, Clone)]
pub struct MemoryContainer {
    pub element: String,
    pub classes: BTreeSet<String>,
    pub interactive: bool,
    pub visible: bool,
}

/// In-memory [`FieldHost`].
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    inputs: HashMap<String, MemoryInput>,
    containers: HashMap<String, MemoryContainer>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input under the given id.
    pub fn insert(&mut self, id: impl Into<String>, input: MemoryInput) {
        self.inputs.insert(id.into(), input);
    }

    /// Builder form of [`MemoryHost::insert`].
    pub fn with(mut self, id: impl Into<String>, input: MemoryInput) -> Self {
        self.insert(id, input);
        self
    }

    /// Remove an input and its container.
    pub fn remove(&mut self, id: &str) -> Option<MemoryInput> {
        self.containers.remove(&container_id(id));
        self.inputs.remove(id)
    }

    pub fn input(&self, id: &str) -> Option<&MemoryInput> {
        self.inputs.get(id)
    }

    pub fn container(&self, id: &str) -> Option<&MemoryContainer> {
        self.containers.get(id)
    }

    /// Whether a container currently carries a class.
    pub fn has_class(&self, container: &str, class: &str) -> bool {
        self.containers
            .get(container)
            .is_some_and(|c| c.classes.contains(class))
    }

    /// Simulate a user click.
    ///
    /// Checkboxes toggle. Radios become checked and uncheck every other radio
    /// with the same name in the same form. Returns `false` for unknown or
    /// non-selection elements and for clicks on a non-interactive container.
    pub fn click(&mut self, id: &str) -> bool {
        let interactive = self
            .containers
            .get(&container_id(id))
            .is_none_or(|c| c.interactive);
        if !interactive {
            return false;
        }

        let Some(input) = self.inputs.get(id) else {
            return false;
        };
        match input.kind {
            Some(InputKind::Checkbox) => {
                let checked = !input.checked;
                self.set_checked(id, checked);
            }
            Some(InputKind::Radio) => {
                let named = input.name.as_deref().is_some_and(|name| !name.is_empty());
                let scope = (input.name.clone(), input.form.clone());
                for (other_id, other) in self.inputs.iter_mut() {
                    if named
                        && other.kind == Some(InputKind::Radio)
                        && (other.name.clone(), other.form.clone()) == scope
                    {
                        other.checked = false;
                    }
                    if other_id == id {
                        other.checked = true;
                    }
                }
            }
            None => return false,
        }
        true
    }
}

/// Container id used by [`MemoryHost`] for an element.
pub fn container_id(element: &str) -> String {
    format!("{element}-field")
}

impl FieldHost for MemoryHost {
    fn describe(&self, element: &str) -> Option<InputInfo> {
        self.inputs.get(element).map(|input| InputInfo {
            kind: input.kind,
            name: input.name.clone(),
            value: input.value.clone(),
            form: input.form.clone(),
            attributes: input.attributes.clone(),
        })
    }

    fn is_checked(&self, element: &str) -> bool {
        self.inputs.get(element).is_some_and(|input| input.checked)
    }

    fn set_checked(&mut self, element: &str, checked: bool) {
        if let Some(input) = self.inputs.get_mut(element) {
            input.checked = checked;
        }
    }

    fn mount(&mut self, element: &str) -> String {
        let id = container_id(element);
        let mut classes = BTreeSet::from(["selection-field".to_string()]);
        if let Some(input) = self.inputs.get_mut(element) {
            classes.append(&mut input.classes);
        }
        self.containers.insert(
            id.clone(),
            MemoryContainer {
                element: element.to_string(),
                classes,
                interactive: true,
                visible: true,
            },
        );
        id
    }

    fn unmount(&mut self, element: &str) {
        let Some(container) = self.containers.remove(&container_id(element)) else {
            return;
        };
        if let Some(input) = self.inputs.get_mut(element) {
            input.classes = container
                .classes
                .into_iter()
                .filter(|class| class != "selection-field")
                .collect();
        }
    }

    fn set_class(&mut self, container: &str, class: &str, on: bool) {
        if let Some(c) = self.containers.get_mut(container) {
            if on {
                c.classes.insert(class.to_string());
            } else {
                c.classes.remove(class);
            }
        }
    }

    fn set_interactive(&mut self, container: &str, interactive: bool) {
        if let Some(c) = self.containers.get_mut(container) {
            c.interactive = interactive;
        }
    }

    fn set_visible(&mut self, container: &str, visible: bool) {
        if let Some(c) = self.containers.get_mut(container) {
            c.visible = visible;
        }
    }

    fn set_label(&mut self, element: &str, text: &str) {
        if let Some(input) = self.inputs.get_mut(element) {
            input.label = Some(text.to_string());
        }
    }
}
