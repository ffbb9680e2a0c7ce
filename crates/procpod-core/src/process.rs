use crate::config::CommandSpec;
use crate::error::GroupError;
use async_trait::async_trait;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Process exited on its own with the given code.
    Exited(i32),
    /// Process was ended by the given signal number (Unix).
    Signaled(i32),
    /// The platform reported neither an exit code nor a signal.
    Unknown,
}

impl ExitStatus {
    /// Check for a clean zero exit.
    pub fn success(self) -> bool {
        matches!(self, ExitStatus::Exited(0))
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitStatus::Exited(code) => write!(f, "exit code {code}"),
            ExitStatus::Signaled(signal) => write!(f, "signal {signal}"),
            ExitStatus::Unknown => write!(f, "unknown status"),
        }
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitStatus::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitStatus::Signaled(signal);
            }
        }
        ExitStatus::Unknown
    }
}

/// Handle to one running child process.
///
/// The group tracks liveness only: it can ask the process to stop and wait
/// for the exit to happen. Exit codes are logged, never acted on, and child
/// I/O stays with whoever launched the group.
#[async_trait]
pub trait ProcessHandle: Send {
    /// Get the OS process id (None once the process has been reaped).
    fn pid(&self) -> Option<u32>;

    /// Get the program this handle was launched with, for logging.
    fn program(&self) -> &str;

    /// Send the graceful interrupt to the process.
    ///
    /// Must succeed when the process is already gone: teardown re-sends
    /// interrupts without checking liveness first, and a process that
    /// exited between signals is the desired outcome, not an error.
    fn interrupt(&self) -> Result<(), GroupError>;

    /// Wait until the process exits.
    ///
    /// Must be cancel safe. The group drops this future whenever a caller
    /// interrupt wins the race and later waits on the same handle again;
    /// no exit may be lost in between.
    async fn wait(&mut self) -> std::io::Result<ExitStatus>;
}

#[async_trait]
impl ProcessHandle for Box<dyn ProcessHandle> {
    fn pid(&self) -> Option<u32> {
        (**self).pid()
    }

    fn program(&self) -> &str {
        (**self).program()
    }

    fn interrupt(&self) -> Result<(), GroupError> {
        (**self).interrupt()
    }

    async fn wait(&mut self) -> std::io::Result<ExitStatus> {
        (**self).wait().await
    }
}

/// The process-launch facility a group is built on.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// The type of handle this launcher produces.
    type Handle: ProcessHandle;

    /// Launch `spec` and return a handle to the now-running process.
    ///
    /// Failures surface immediately to the caller of
    /// [`run`](crate::ProcessGroupInner::run); nothing is retried.
    async fn launch(&self, spec: &CommandSpec) -> Result<Self::Handle, GroupError>;
}
