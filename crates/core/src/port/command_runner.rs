// Command Runner Port
// Abstraction for rendering a Command and running it synchronously

use crate::domain::Command;
use thiserror::Error;

/// Result of a single command run
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    /// Exact line handed to the shell
    pub rendered: String,
    pub exit_code: Option<i32>,
    /// Name of the signal that killed the shell itself.
    ///
    /// A program the shell forks and that is then killed shows up as a
    /// `Failed` run with the shell's `128 + N` exit code, not as a signal.
    pub signal: Option<String>,
    pub duration_ms: i64,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }

    /// Turn a non-successful child into an error.
    ///
    /// Runners never do this on their own; callers opt in.
    pub fn ensure_success(self) -> Result<Self, ExecutionError> {
        match self.status {
            ExecutionStatus::Success => Ok(self),
            ExecutionStatus::Failed => Err(ExecutionError::NonZeroExit {
                command: self.rendered,
                code: self.exit_code.unwrap_or(-1),
            }),
            ExecutionStatus::Signaled => Err(ExecutionError::Signaled {
                command: self.rendered,
                signal: self.signal.unwrap_or_else(|| "unknown".to_string()),
            }),
        }
    }
}

/// Execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Success,
    Failed,
    Signaled,
}

/// Execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command has no program set")]
    MissingProgram,

    #[error("Spawn failed for `{command}`: {reason}")]
    SpawnFailed { command: String, reason: String },

    #[error("`{command}` exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    #[error("`{command}` terminated by signal {signal}")]
    Signaled { command: String, signal: String },
}

/// Command Runner trait
///
/// Implementations:
/// - ShellCommandRunner: hands the rendered line to `sh -c`
/// - RecordingRunner: records rendered lines for tests
pub trait CommandRunner: Send + Sync {
    /// Render `cmd`, optionally announce it on stdout, and run it to completion.
    ///
    /// # Errors
    /// - ExecutionError::MissingProgram if no program was set
    /// - ExecutionError::SpawnFailed if the shell could not be started
    ///
    /// A child that runs and exits non-zero is NOT an error here; inspect
    /// `ExecutionResult::status` or call `ensure_success`.
    fn run(&self, cmd: &Command, announce: bool) -> Result<ExecutionResult, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Child exits 0
        Success,
        /// Child exits with the given code
        ExitCode(i32),
        /// Shell cannot be spawned
        SpawnFail(String),
    }

    /// Records every rendered line instead of running it
    #[derive(Clone)]
    pub struct RecordingRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        lines: Arc<Mutex<Vec<(String, bool)>>>,
    }

    impl RecordingRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                lines: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }

        /// Rendered lines, in run order
        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().iter().map(|(l, _)| l.clone()).collect()
        }

        /// Announce flag passed with each run
        pub fn announced(&self) -> Vec<bool> {
            self.lines.lock().unwrap().iter().map(|(_, a)| *a).collect()
        }

        pub fn call_count(&self) -> usize {
            self.lines.lock().unwrap().len()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, cmd: &Command, announce: bool) -> Result<ExecutionResult, ExecutionError> {
            if cmd.program().is_none() {
                return Err(ExecutionError::MissingProgram);
            }
            let rendered = cmd.render();
            self.lines.lock().unwrap().push((rendered.clone(), announce));

            let behavior = self.behavior.lock().unwrap().clone();
            match behavior {
                MockBehavior::Success => Ok(ExecutionResult {
                    status: ExecutionStatus::Success,
                    rendered,
                    exit_code: Some(0),
                    signal: None,
                    duration_ms: 0,
                }),
                MockBehavior::ExitCode(code) => Ok(ExecutionResult {
                    status: if code == 0 {
                        ExecutionStatus::Success
                    } else {
                        ExecutionStatus::Failed
                    },
                    rendered,
                    exit_code: Some(code),
                    signal: None,
                    duration_ms: 0,
                }),
                MockBehavior::SpawnFail(reason) => Err(ExecutionError::SpawnFailed {
                    command: rendered,
                    reason,
                }),
            }
        }
    }
}
