//! JSON form description driving the demo.

use std::collections::HashMap;

use selection_field::{FieldOptions, FieldsConfig, MemoryHost, MemoryInput};
use serde::Deserialize;

/// A form: controller config, the inputs to host, and a script to run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormSpec {
    pub config: FieldsConfig,
    pub inputs: Vec<InputSpec>,
    pub script: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Checkbox,
    Radio,
    Other,
}

/// One input element of the form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Skip binding; the element stays a plain host input.
    #[serde(default)]
    pub unbound: bool,
    #[serde(default)]
    pub options: FieldOptions,
}

/// A scripted interaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Click(String),
    CheckDirty(String),
    Set { element: String, value: Option<String> },
    Hover(String),
    Disable(String),
    Validate,
    Settle,
    Remove(String),
}

impl InputSpec {
    fn to_memory_input(&self) -> MemoryInput {
        let mut input = match self.input_type {
            InputType::Checkbox => MemoryInput::checkbox(),
            InputType::Radio => {
                MemoryInput::radio(self.name.clone().unwrap_or_default(), self.value.clone())
            }
            InputType::Other => MemoryInput::other(),
        };
        if let Some(name) = &self.name {
            input = input.name(name.clone());
        }
        if let Some(form) = &self.form {
            input = input.form(form.clone());
        }
        input.value = self.value.clone();
        input.checked = self.checked;
        for class in &self.classes {
            input = input.class(class.clone());
        }
        for (key, value) in &self.attributes {
            input = input.attr(key.clone(), value.clone());
        }
        input
    }
}

impl FormSpec {
    /// Build the in-memory host holding every input.
    pub fn host(&self) -> MemoryHost {
        self.inputs.iter().fold(MemoryHost::new(), |host, input| {
            host.with(input.id.clone(), input.to_memory_input())
        })
    }
}
