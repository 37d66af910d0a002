// Shell command runner implementation
// reason: std::process for blocking child management, nix for signal names
use std::io::Write;
use std::process::ExitStatus;
use std::sync::Arc;
use tracing::{info, warn};

use ccs_core::domain::Command;
use ccs_core::port::command_runner::{
    CommandRunner, ExecutionError, ExecutionResult, ExecutionStatus,
};
use ccs_core::port::TimeProvider;

/// Shell used to interpret rendered command lines
pub const DEFAULT_SHELL: &str = "sh";

/// Bold prefix printed before an announced command line
pub const ANNOUNCE_PREFIX: &str = "\x1b[1m>> Executing: ";

/// Escape sequence printed after an announced command line
pub const ANNOUNCE_SUFFIX: &str = "\x1b[1;39m";

/// Shell command runner
///
/// Renders a [`Command`] and hands the line to `sh -c`, so quoting,
/// globbing and operators follow shell rules. Blocks until the shell exits.
/// Exactly one attempt per call.
pub struct ShellCommandRunner {
    time_provider: Arc<dyn TimeProvider>,
    shell: String,
}

impl ShellCommandRunner {
    /// Create a runner using `sh`
    ///
    /// # Example
    /// ```ignore
    /// let runner = ShellCommandRunner::new(Arc::new(SystemTimeProvider));
    /// ```
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self::with_shell(time_provider, DEFAULT_SHELL)
    }

    /// Create a runner using another POSIX shell (must accept `-c <line>`)
    pub fn with_shell(time_provider: Arc<dyn TimeProvider>, shell: impl Into<String>) -> Self {
        Self {
            time_provider,
            shell: shell.into(),
        }
    }

    /// The exact line printed when a command is announced
    pub fn announcement(rendered: &str) -> String {
        format!("{}{}{}", ANNOUNCE_PREFIX, rendered, ANNOUNCE_SUFFIX)
    }

    fn announce(rendered: &str) {
        let mut stdout = std::io::stdout().lock();
        // Announcement must reach the terminal before the child writes to it
        if let Err(e) = writeln!(stdout, "{}", Self::announcement(rendered)).and_then(|_| stdout.flush()) {
            warn!(error = %e, "Failed to announce command");
        }
    }

    /// Build execution result from exit status
    fn build_result(&self, status: ExitStatus, rendered: String, duration_ms: i64) -> ExecutionResult {
        let signal = terminating_signal(&status);
        let status_kind = if status.success() {
            ExecutionStatus::Success
        } else if signal.is_some() {
            ExecutionStatus::Signaled
        } else {
            ExecutionStatus::Failed
        };

        ExecutionResult {
            status: status_kind,
            rendered,
            exit_code: status.code(),
            signal,
            duration_ms,
        }
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(&self, cmd: &Command, announce: bool) -> Result<ExecutionResult, ExecutionError> {
        if cmd.program().is_none() {
            return Err(ExecutionError::MissingProgram);
        }

        let rendered = cmd.render();
        if announce {
            Self::announce(&rendered);
        }

        info!(shell = %self.shell, rendered = %rendered, "Starting command");
        let start_time = self.time_provider.now_millis();

        let status = std::process::Command::new(&self.shell)
            .arg("-c")
            .arg(&rendered)
            .status()
            .map_err(|e| ExecutionError::SpawnFailed {
                command: rendered.clone(),
                reason: e.to_string(),
            })?;

        let duration_ms = self.time_provider.now_millis() - start_time;
        let result = self.build_result(status, rendered, duration_ms);

        info!(
            rendered = %result.rendered,
            duration_ms = %duration_ms,
            exit_code = ?result.exit_code,
            status = ?result.status,
            "Command completed"
        );
        if let Some(signal) = &result.signal {
            warn!(rendered = %result.rendered, signal = %signal, "Command terminated by signal");
        }

        Ok(result)
    }
}

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<String> {
    use nix::sys::signal::Signal;
    use std::os::unix::process::ExitStatusExt;

    status.signal().map(|raw| {
        Signal::try_from(raw)
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|_| raw.to_string())
    })
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<String> {
    None
}
