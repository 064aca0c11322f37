//! Environment variable entries and where their values come from.

use crate::error::Result;
use crate::validation;

/// Where an entry's value is read from when the setter runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Embedded at authoring time.
    Literal(String),
    /// Read from the operator's environment.
    Env(String),
    /// Read from the system keychain.
    Keychain(String),
}

impl ValueSource {
    pub fn kind(&self) -> &'static str {
        match self {
            ValueSource::Literal(_) => "literal",
            ValueSource::Env(_) => "env",
            ValueSource::Keychain(_) => "keychain",
        }
    }

    /// Human description that never reveals a secret.
    pub fn describe(&self) -> String {
        match self {
            ValueSource::Literal(value) => format!("literal ({} chars)", value.chars().count()),
            ValueSource::Env(key) => format!("env ${}", key),
            ValueSource::Keychain(key) => format!("keychain {}", key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub name: String,
    pub value: ValueSource,
}

impl EnvEntry {
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ValueSource::Literal(value.into()),
        }
    }

    pub fn from_env(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ValueSource::Env(key.into()),
        }
    }

    pub fn from_keychain(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ValueSource::Keychain(key.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validation::require_env_var_name(&self.name)?;
        Ok(())
    }
}
