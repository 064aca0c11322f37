//! Sequential add/remove workflows over the configured entries.
//!
//! Every entry is processed exactly once, in declared order. A failure on
//! one entry (unresolvable value, spawn error, non-zero exit) is reported
//! and recorded, then the loop moves on. The run always ends with exactly
//! one completion notice.

use serde::Serialize;
use std::io::{self, Write};

use crate::config::EnvConfig;
use crate::entry::ValueSource;
use crate::error::{CommandFailedDetails, Error, Result};
use crate::executor::{Executor, Invocation};
use crate::output::{BulkResult, BulkSummary};
use crate::secret;
use crate::vercel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
}

impl Action {
    pub fn id(&self) -> &'static str {
        match self {
            Action::Add => vercel::ADD_ACTION,
            Action::Remove => vercel::REMOVE_ACTION,
        }
    }

    fn progressive(&self) -> &'static str {
        match self {
            Action::Add => "Adding",
            Action::Remove => "Removing",
        }
    }

    fn past(&self) -> &'static str {
        match self {
            Action::Add => "Added",
            Action::Remove => "Removed",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
        }
    }

    fn likely_cause(&self) -> &'static str {
        match self {
            Action::Add => "might already exist",
            Action::Remove => "maybe didn't exist",
        }
    }

    fn completion(&self) -> &'static str {
        match self {
            Action::Add => "🎉 All environment variables processed.",
            Action::Remove => "🗑️ Cleanup complete.",
        }
    }
}

/// Per-item result carried in the bulk report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarOutcome {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
}

/// Receives progress as a batch runs.
pub trait Reporter {
    fn item_started(&mut self, action: Action, name: &str);
    fn item_finished(&mut self, action: Action, name: &str, outcome: &Result<EnvVarOutcome>);
    fn completed(&mut self, action: Action, summary: &BulkSummary);
}

/// Human-readable progress lines, one start and one result line per entry
/// plus a single completion line.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // Progress output is best-effort; a closed stdout must not stop the batch.
    fn line(&mut self, text: String) {
        let _ = writeln!(self.out, "{}", text);
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn item_started(&mut self, action: Action, name: &str) {
        self.line(format!("{} {}...", action.progressive(), name));
    }

    fn item_finished(&mut self, action: Action, name: &str, outcome: &Result<EnvVarOutcome>) {
        let text = match outcome {
            Ok(result) if result.dry_run => {
                format!("🔎 Would {} {}: {}", action.verb(), name, result.command)
            }
            Ok(_) => format!("✅ {} {}", action.past(), name),
            Err(err) => format!(
                "⚠️ Failed to {} {} ({}): {}",
                action.verb(),
                name,
                action.likely_cause(),
                err
            ),
        };
        self.line(text);
    }

    fn completed(&mut self, action: Action, _summary: &BulkSummary) {
        self.line(action.completion().to_string());
    }
}

/// Discards progress; used when the bulk report is printed as JSON instead.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn item_started(&mut self, _action: Action, _name: &str) {}
    fn item_finished(&mut self, _action: Action, _name: &str, _outcome: &Result<EnvVarOutcome>) {}
    fn completed(&mut self, _action: Action, _summary: &BulkSummary) {}
}

/// A configured run of the setter or remover.
pub struct Batch<'a> {
    config: &'a EnvConfig,
    executor: &'a dyn Executor,
    resolve: fn(&ValueSource) -> Result<String>,
    dry_run: bool,
}

impl<'a> Batch<'a> {
    pub fn new(config: &'a EnvConfig, executor: &'a dyn Executor) -> Self {
        Self {
            config,
            executor,
            resolve: secret::resolve,
            dry_run: false,
        }
    }

    pub fn with_resolver(mut self, resolve: fn(&ValueSource) -> Result<String>) -> Self {
        self.resolve = resolve;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Add every configured entry to the target environment.
    pub fn apply(&self, reporter: &mut dyn Reporter) -> BulkResult<EnvVarOutcome> {
        let config = self.config;
        let mut bulk = BulkResult::new(Action::Add.id(), &config.target, self.dry_run);

        for entry in &config.entries {
            reporter.item_started(Action::Add, &entry.name);

            let outcome = self.value_for(&entry.value).and_then(|value| {
                self.run(vercel::add(&config.tool, &entry.name, &config.target, &value))
            });

            reporter.item_finished(Action::Add, &entry.name, &outcome);
            record(&mut bulk, &entry.name, outcome);
        }

        reporter.completed(Action::Add, &bulk.summary);
        bulk
    }

    /// Remove every configured name from the target environment.
    pub fn remove(&self, reporter: &mut dyn Reporter) -> BulkResult<EnvVarOutcome> {
        let config = self.config;
        let mut bulk = BulkResult::new(Action::Remove.id(), &config.target, self.dry_run);

        for name in &config.removals {
            reporter.item_started(Action::Remove, name);

            let outcome = self.run(vercel::remove(&config.tool, name, &config.target));

            reporter.item_finished(Action::Remove, name, &outcome);
            record(&mut bulk, name, outcome);
        }

        reporter.completed(Action::Remove, &bulk.summary);
        bulk
    }

    // Dry runs never touch the environment or the keychain.
    fn value_for(&self, source: &ValueSource) -> Result<String> {
        if self.dry_run {
            return Ok(String::new());
        }
        (self.resolve)(source)
    }

    fn run(&self, invocation: Invocation) -> Result<EnvVarOutcome> {
        let command = invocation.display();

        if self.dry_run {
            return Ok(EnvVarOutcome {
                command,
                exit_code: None,
                dry_run: true,
            });
        }

        let output = self.executor.execute(&invocation)?;

        if output.success {
            Ok(EnvVarOutcome {
                command,
                exit_code: Some(output.exit_code),
                dry_run: false,
            })
        } else {
            Err(Error::command_failed(CommandFailedDetails {
                command,
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            }))
        }
    }
}

fn record(bulk: &mut BulkResult<EnvVarOutcome>, name: &str, outcome: Result<EnvVarOutcome>) {
    match outcome {
        Ok(result) => bulk.record_success(name.to_string(), result),
        Err(err) => {
            let partial = err.details["command"].as_str().map(|command| EnvVarOutcome {
                command: command.to_string(),
                exit_code: err.details["exitCode"].as_i64().map(|code| code as i32),
                dry_run: false,
            });
            bulk.record_failure(name.to_string(), partial, err.message)
        }
    }
}

/// Run the setter with the system value resolver.
pub fn apply(
    config: &EnvConfig,
    executor: &dyn Executor,
    reporter: &mut dyn Reporter,
) -> BulkResult<EnvVarOutcome> {
    Batch::new(config, executor).apply(reporter)
}

/// Run the remover.
pub fn remove(
    config: &EnvConfig,
    executor: &dyn Executor,
    reporter: &mut dyn Reporter,
) -> BulkResult<EnvVarOutcome> {
    Batch::new(config, executor).remove(reporter)
}
