//! Testable external command execution.
//!
//! Every subprocess the gate touches (capture, statistics, helper build,
//! transcription) goes through the `CommandRunner` trait, so the pipeline is
//! testable without a microphone, sox, or a speech engine.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time;

/// Failure to obtain a command's output at all.
///
/// A command that ran and exited non-zero is NOT an error at this level —
/// callers inspect [`CommandOutput::exit_code`] and decide per stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("command not found: {command}")]
    NotFound { command: String },

    #[error("`{command}` timed out after {seconds}s")]
    TimedOut { command: String, seconds: u64 },

    #[error("failed to run {command}: {message}")]
    Spawn { command: String, message: String },
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for executing system commands under a timeout.
///
/// Object-safe, Send + Sync for use in concurrent contexts.
/// Enables testability by allowing mock implementations.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute a command with arguments, waiting at most `timeout`.
    async fn run(
        &self,
        command: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, RunError>;
}

/// Production runner using tokio's process support.
///
/// The child is spawned with `kill_on_drop`, so a timeout both abandons and
/// terminates it — a hung recorder never outlives the pipeline.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        command: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, RunError> {
        let child = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RunError::NotFound {
                        command: command.to_string(),
                    }
                } else {
                    RunError::Spawn {
                        command: command.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let output = match time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(RunError::Spawn {
                    command: command.to_string(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(RunError::TimedOut {
                    command: command.to_string(),
                    seconds: timeout.as_secs(),
                });
            }
        };

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        })
    }
}

/// Mock runner for testing.
///
/// Records all invocations and returns configured responses in order. Once
/// the queue is exhausted, further calls succeed with empty output.
#[derive(Debug, Default)]
pub struct MockCommandRunner {
    calls: std::sync::Mutex<Vec<(String, Vec<String>)>>,
    responses: std::sync::Mutex<std::collections::VecDeque<Result<CommandOutput, RunError>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a zero-exit response with the given stdout and stderr.
    pub fn with_success(self, stdout: &str, stderr: &str) -> Self {
        self.push(Ok(CommandOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code: Some(0),
        }));
        self
    }

    /// Queue a non-zero exit with the given code and stderr.
    pub fn with_exit(self, code: i32, stderr: &str) -> Self {
        self.push(Ok(CommandOutput {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code: Some(code),
        }));
        self
    }

    /// Queue a run failure.
    pub fn with_error(self, error: RunError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, response: Result<CommandOutput, RunError>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
    }

    /// All recorded invocations, in order.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run(
        &self,
        command: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<CommandOutput, RunError> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push((
            command.to_string(),
            args.iter().map(|s| s.to_string()).collect(),
        ));

        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Ok(CommandOutput {
                    exit_code: Some(0),
                    ..Default::default()
                })
            })
    }
}
