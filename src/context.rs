use crate::errors::CommandError;
use crate::types::{CommandOption, Interaction, OptionValue};

/// Read-only view of the interaction a command handler is answering.
#[derive(Debug, Clone)]
pub struct InteractionContext {
    interaction: Interaction,
}

impl InteractionContext {
    pub fn new(interaction: Interaction) -> Self {
        Self { interaction }
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn options(&self) -> &[CommandOption] {
        self.interaction
            .data
            .as_ref()
            .map(|d| d.options.as_slice())
            .unwrap_or_default()
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options()
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.value)
    }

    pub fn string_option(&self, name: &str) -> Result<Option<&str>, CommandError> {
        match self.option(name) {
            None => Ok(None),
            Some(OptionValue::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(type_error(name, "string")),
        }
    }

    pub fn number_option(&self, name: &str) -> Result<Option<f64>, CommandError> {
        match self.option(name) {
            None => Ok(None),
            Some(OptionValue::Number(n)) => Ok(Some(*n)),
            Some(_) => Err(type_error(name, "number")),
        }
    }

    pub fn bool_option(&self, name: &str) -> Result<Option<bool>, CommandError> {
        match self.option(name) {
            None => Ok(None),
            Some(OptionValue::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(type_error(name, "boolean")),
        }
    }

    pub fn required_string(&self, name: &str) -> Result<&str, CommandError> {
        self.string_option(name)?
            .ok_or_else(|| CommandError::MissingOption(name.to_string()))
    }

    pub fn required_number(&self, name: &str) -> Result<f64, CommandError> {
        self.number_option(name)?
            .ok_or_else(|| CommandError::MissingOption(name.to_string()))
    }
}

fn type_error(option: &str, expected: &'static str) -> CommandError {
    CommandError::ValueType {
        option: option.to_string(),
        expected,
    }
}
