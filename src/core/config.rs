use std::collections::HashSet;

use crate::entry::{EnvEntry, ValueSource};
use crate::error::{Error, Result};
use crate::validation;

/// Everything a setter or remover run needs. Built once, then passed by
/// reference into the batch procedures.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub target: String,
    pub tool: ToolConfig,
    pub entries: Vec<EnvEntry>,
    pub removals: Vec<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            tool: ToolConfig::default(),
            entries: default_entries(),
            removals: default_removals(),
        }
    }
}

/// How the Vercel CLI is reached.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub program: String,
    pub base_args: Vec<String>,
    /// Appended after the operation arguments (e.g. `--scope <team>`).
    pub extra_args: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            base_args: default_base_args(),
            extra_args: Vec::new(),
        }
    }
}

impl ToolConfig {
    /// Parse a command prefix such as `npx vercel` or `~/bin/vercel`.
    ///
    /// The first word is the program (tilde and `$VAR` expanded), the rest
    /// become base arguments.
    pub fn from_command_line(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace();
        let program = words.next().ok_or_else(|| {
            Error::validation_invalid_argument("tool", "Tool command cannot be empty", None, None)
        })?;

        let program = shellexpand::full(program)
            .map_err(|e| {
                Error::validation_invalid_argument(
                    "tool",
                    format!("Cannot expand '{}': {}", program, e),
                    None,
                    None,
                )
            })?
            .into_owned();

        Ok(Self {
            program,
            base_args: words.map(str::to_string).collect(),
            extra_args: Vec::new(),
        })
    }
}

// =============================================================================
// Default value functions
// =============================================================================

pub const DEFAULT_TARGET: &str = "production";

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

fn default_program() -> String {
    "npx".to_string()
}

fn default_base_args() -> Vec<String> {
    vec!["vercel".to_string()]
}

const FIREBASE_API_KEY: &str = "NEXT_PUBLIC_FIREBASE_API_KEY";
const FIREBASE_AUTH_DOMAIN: &str = "NEXT_PUBLIC_FIREBASE_AUTH_DOMAIN";
const FIREBASE_PROJECT_ID: &str = "NEXT_PUBLIC_FIREBASE_PROJECT_ID";
const FIREBASE_STORAGE_BUCKET: &str = "NEXT_PUBLIC_FIREBASE_STORAGE_BUCKET";
const FIREBASE_MESSAGING_SENDER_ID: &str = "NEXT_PUBLIC_FIREBASE_MESSAGING_SENDER_ID";
const FIREBASE_APP_ID: &str = "NEXT_PUBLIC_FIREBASE_APP_ID";

fn default_entries() -> Vec<EnvEntry> {
    vec![
        // Credential: read from the operator's environment, never embedded.
        EnvEntry::from_env(FIREBASE_API_KEY, FIREBASE_API_KEY),
        EnvEntry::literal(FIREBASE_AUTH_DOMAIN, "gateway-korea-2026.firebaseapp.com"),
        EnvEntry::literal(FIREBASE_PROJECT_ID, "gateway-korea-2026"),
        EnvEntry::literal(
            FIREBASE_STORAGE_BUCKET,
            "gateway-korea-2026.firebasestorage.app",
        ),
        EnvEntry::literal(FIREBASE_MESSAGING_SENDER_ID, "46584294470"),
        EnvEntry::literal(FIREBASE_APP_ID, "1:46584294470:web:13e465564980904bb6ee47"),
    ]
}

fn default_removals() -> Vec<String> {
    [
        FIREBASE_API_KEY,
        FIREBASE_AUTH_DOMAIN,
        FIREBASE_PROJECT_ID,
        FIREBASE_STORAGE_BUCKET,
        FIREBASE_MESSAGING_SENDER_ID,
        FIREBASE_APP_ID,
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

// =============================================================================
// Construction and validation
// =============================================================================

impl EnvConfig {
    /// Built-in configuration, validated.
    pub fn builtin() -> Result<Self> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    pub fn with_target(mut self, target: &str) -> Result<Self> {
        self.target = validation::require_non_empty(
            target,
            "target",
            "Target environment cannot be empty",
        )?
        .to_string();
        Ok(self)
    }

    pub fn with_tool(mut self, tool: ToolConfig) -> Self {
        self.tool = tool;
        self
    }

    /// Keep only the named entries, in their declared order. An empty
    /// selection keeps everything.
    pub fn select_entries(mut self, names: &[String]) -> Result<Self> {
        let known: Vec<String> = self.entries.iter().map(|e| e.name.clone()).collect();
        require_known("only", names, &known)?;

        if !names.is_empty() {
            self.entries.retain(|e| names.contains(&e.name));
        }
        Ok(self)
    }

    /// Keep only the named removals, in their declared order. An empty
    /// selection keeps everything.
    pub fn select_removals(mut self, names: &[String]) -> Result<Self> {
        require_known("only", names, &self.removals)?;

        if !names.is_empty() {
            self.removals.retain(|name| names.contains(name));
        }
        Ok(self)
    }

    /// Read the named entries' values from the system keychain instead of
    /// their configured source. The keychain account is the variable name.
    pub fn source_from_keychain(mut self, names: &[String]) -> Result<Self> {
        let known: Vec<String> = self.entries.iter().map(|e| e.name.clone()).collect();
        require_known("from-keychain", names, &known)?;

        for entry in &mut self.entries {
            if names.contains(&entry.name) {
                entry.value = ValueSource::Keychain(entry.name.clone());
            }
        }
        Ok(self)
    }

    /// Names must be valid and unique within each list.
    pub fn validate(&self) -> Result<()> {
        validation::require_non_empty(&self.target, "target", "Target environment cannot be empty")?;
        validation::require_non_empty(&self.tool.program, "tool", "Tool program cannot be empty")?;

        let mut seen = HashSet::new();
        for entry in &self.entries {
            entry.validate()?;
            if !seen.insert(entry.name.as_str()) {
                return Err(Error::config_duplicate_key(&entry.name));
            }
        }

        let mut seen = HashSet::new();
        for name in &self.removals {
            validation::require_env_var_name(name)?;
            if !seen.insert(name.as_str()) {
                return Err(Error::config_duplicate_key(name));
            }
        }

        Ok(())
    }
}

fn require_known(field: &str, names: &[String], known: &[String]) -> Result<()> {
    match names.iter().find(|name| !known.contains(name)) {
        Some(unknown) => Err(Error::validation_invalid_argument(
            field,
            format!("'{}' is not a configured variable", unknown),
            Some(unknown.clone()),
            Some(known.to_vec()),
        )),
        None => Ok(()),
    }
}
