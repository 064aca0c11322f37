// Structured command execution: program + argument array, optional stdin.
// No shell is involved, so argument and stdin contents are never interpreted.

use serde::Serialize;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{Error, Result};
use crate::shell;

/// One external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Written to the child's stdin, which is then closed. `None` gives the
    /// child a null stdin so it can never block on a prompt.
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            stdin: None,
        }
    }

    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Shell-quoted rendering for logs and reports. Never includes stdin.
    pub fn display(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        shell::quote_args(&parts)
    }
}

/// Captured output from command execution.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: i32,
}

impl CommandOutput {
    /// Prefers stderr, falls back to stdout if stderr is empty.
    pub fn error_text(&self) -> &str {
        if !self.stderr.trim().is_empty() {
            self.stderr.trim()
        } else {
            self.stdout.trim()
        }
    }
}

/// Runs invocations. Returns `Err` only when the process could not be run at
/// all; a non-zero exit is reported through `CommandOutput`.
pub trait Executor {
    fn execute(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

/// Executes invocations as local child processes, blocking until exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<CommandOutput> {
        log_status!("exec", "{}", invocation.display());

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if invocation.stdin.is_some() {
            cmd.stdin(Stdio::piped());
        } else {
            cmd.stdin(Stdio::null());
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::command_spawn_failed(&invocation.program, e.to_string()))?;

        // stdin is fed from its own thread while stdout/stderr drain here, so
        // neither side can stall on a full pipe. The child is always reaped.
        let feed = child.stdin.take().zip(invocation.stdin.as_deref());
        let (out, written) = thread::scope(|scope| {
            let writer = feed.map(|(mut pipe, input)| {
                scope.spawn(move || pipe.write_all(input.as_bytes()))
            });
            let out = child.wait_with_output();
            let written = match writer {
                Some(handle) => handle
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked"))),
                None => Ok(()),
            };
            (out, written)
        });

        let out = out.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("wait for {}", invocation.program)))
        })?;

        // A child that exits without reading closes the pipe; its exit status
        // is what matters.
        if let Err(e) = written {
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(Error::internal_io(
                    e.to_string(),
                    Some(format!("write stdin for {}", invocation.program)),
                ));
            }
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
            success: out.status.success(),
            exit_code: out.status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_args_and_omits_stdin() {
        let invocation = Invocation::new(
            "npx",
            vec!["vercel".to_string(), "env".to_string(), "a b".to_string()],
        )
        .with_stdin("secret");

        assert_eq!(invocation.display(), "npx vercel env 'a b'");
    }

    #[test]
    fn error_text_prefers_stderr() {
        let output = CommandOutput {
            stdout: "stdout content".to_string(),
            stderr: "stderr content\n".to_string(),
            success: false,
            exit_code: 1,
        };
        assert_eq!(output.error_text(), "stderr content");
    }

    #[test]
    fn error_text_falls_back_to_stdout() {
        let output = CommandOutput {
            stdout: " stdout content ".to_string(),
            stderr: String::new(),
            success: false,
            exit_code: 1,
        };
        assert_eq!(output.error_text(), "stdout content");
    }

    #[cfg(unix)]
    #[test]
    fn process_executor_pipes_stdin_verbatim() {
        let invocation = Invocation::new("cat", vec![]).with_stdin("it's $HOME; `x`");
        let output = ProcessExecutor.execute(&invocation).unwrap();

        assert!(output.success);
        assert_eq!(output.stdout, "it's $HOME; `x`");
    }

    #[cfg(unix)]
    #[test]
    fn process_executor_reports_nonzero_exit() {
        let output = ProcessExecutor
            .execute(&Invocation::new("false", vec![]))
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.exit_code, 1);
    }

    #[cfg(unix)]
    #[test]
    fn process_executor_handles_value_larger_than_pipe_buffer() {
        // cat echoes while reading, so its stdout fills long before stdin is
        // fully written.
        let value = "x".repeat(1 << 20);
        let output = ProcessExecutor
            .execute(&Invocation::new("cat", vec![]).with_stdin(value.clone()))
            .unwrap();

        assert!(output.success);
        assert_eq!(output.stdout.len(), value.len());
    }

    #[cfg(unix)]
    #[test]
    fn process_executor_ignores_child_that_skips_stdin() {
        let invocation = Invocation::new("true", vec![]).with_stdin("x".repeat(1 << 20));
        let output = ProcessExecutor.execute(&invocation).unwrap();

        assert!(output.success);
    }

    #[test]
    fn process_executor_errors_when_program_missing() {
        let err = ProcessExecutor
            .execute(&Invocation::new("vercel_env_nonexistent_program_xyz", vec![]))
            .unwrap_err();

        assert_eq!(err.code, crate::ErrorCode::CommandSpawnFailed);
    }
}
