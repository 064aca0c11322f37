//! Value resolution for entries.
//!
//! Literal values are returned as-is. Env values come from the process
//! environment; keychain values come from the platform store (macOS Keychain,
//! Windows Credential Manager, the Linux kernel keyring) under the
//! `vercel-env` service, with the variable name as the account.

use keyring::Entry;
use std::env::{self, VarError};

use crate::entry::ValueSource;
use crate::{Error, Result};

const SERVICE_NAME: &str = "vercel-env";

/// Resolve the value an entry should be provisioned with.
pub fn resolve(source: &ValueSource) -> Result<String> {
    match source {
        ValueSource::Literal(value) => Ok(value.clone()),
        ValueSource::Env(key) => from_env(key),
        ValueSource::Keychain(key) => from_keychain(key),
    }
}

fn from_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) | Err(VarError::NotPresent) => Err(Error::secret_not_found("env", key)),
        Err(VarError::NotUnicode(_)) => Err(Error::secret_unavailable(
            "env",
            key,
            "value is not valid UTF-8",
        )),
    }
}

fn from_keychain(key: &str) -> Result<String> {
    log_status!("secret", "Reading '{}' from keychain", key);

    let entry = Entry::new(SERVICE_NAME, key)
        .map_err(|e| Error::secret_unavailable("keychain", key, e.to_string()))?;

    match entry.get_password() {
        Ok(value) => Ok(value),
        Err(keyring::Error::NoEntry) => Err(Error::secret_not_found("keychain", key)),
        Err(e) => Err(Error::secret_unavailable("keychain", key, e.to_string())),
    }
}
