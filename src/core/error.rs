use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidValue,
    ConfigDuplicateKey,

    ValidationInvalidArgument,

    SecretNotFound,
    SecretUnavailable,

    CommandFailed,
    CommandSpawnFailed,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidValue => "config.invalid_value",
            ErrorCode::ConfigDuplicateKey => "config.duplicate_key",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::SecretNotFound => "secret.not_found",
            ErrorCode::SecretUnavailable => "secret.unavailable",

            ErrorCode::CommandFailed => "command.failed",
            ErrorCode::CommandSpawnFailed => "command.spawn_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretDetails {
    pub source: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Failure of an external command. `command` is the display form; values
/// written to stdin are never part of it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandFailedDetails {
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn config_duplicate_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorCode::ConfigDuplicateKey,
            format!("Variable '{}' is listed more than once", key),
            serde_json::json!({ "key": key }),
        )
    }

    pub fn secret_not_found(source: impl Into<String>, key: impl Into<String>) -> Self {
        let source = source.into();
        let key = key.into();
        let hint = match source.as_str() {
            "env" => format!("Export {} before running", key),
            _ => format!("Store a value for '{}' in the system keychain", key),
        };

        Self::new(
            ErrorCode::SecretNotFound,
            format!("No value found for '{}' ({})", key, source),
            to_details(SecretDetails {
                source,
                key,
                error: None,
            }),
        )
        .with_hint(hint)
    }

    pub fn secret_unavailable(
        source: impl Into<String>,
        key: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let key = key.into();
        Self::new(
            ErrorCode::SecretUnavailable,
            format!("Could not read value for '{}'", key),
            to_details(SecretDetails {
                source: source.into(),
                key,
                error: Some(error.into()),
            }),
        )
    }

    pub fn command_failed(details: CommandFailedDetails) -> Self {
        let message = match first_line(&details.stderr).or_else(|| first_line(&details.stdout)) {
            Some(line) => format!("exit status {}: {}", details.exit_code, line),
            None => format!("exit status {}", details.exit_code),
        };

        Self::new(ErrorCode::CommandFailed, message, to_details(details))
    }

    pub fn command_spawn_failed(program: impl Into<String>, error: impl Into<String>) -> Self {
        let program = program.into();
        let error = error.into();
        Self::new(
            ErrorCode::CommandSpawnFailed,
            format!("Failed to run {}: {}", program, error),
            serde_json::json!({ "program": program, "error": error }),
        )
        .with_hint("Check that the Vercel CLI is installed and reachable on PATH")
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            serde_json::json!({ "error": error.into(), "context": context }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_message_uses_stderr_first_line() {
        let err = Error::command_failed(CommandFailedDetails {
            command: "npx vercel env add A production".to_string(),
            exit_code: 1,
            stdout: "ignored".to_string(),
            stderr: "\nError: A already exists\nmore".to_string(),
        });

        assert_eq!(err.code, ErrorCode::CommandFailed);
        assert_eq!(err.message, "exit status 1: Error: A already exists");
        assert_eq!(err.details["exitCode"], 1);
    }

    #[test]
    fn command_failed_message_without_output() {
        let err = Error::command_failed(CommandFailedDetails {
            command: "npx vercel env rm A production -y".to_string(),
            exit_code: 2,
            stdout: String::new(),
            stderr: "  ".to_string(),
        });

        assert_eq!(err.message, "exit status 2");
    }

    #[test]
    fn secret_not_found_carries_hint() {
        let err = Error::secret_not_found("env", "API_KEY");

        assert_eq!(err.code.as_str(), "secret.not_found");
        assert_eq!(err.hints.len(), 1);
        assert!(err.hints[0].message.contains("API_KEY"));
    }
}
