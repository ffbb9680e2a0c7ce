//! Scoped groups of child processes: launch, track, interrupt, reap.
//!
//! [`ProcessGroup`] keeps an ordered collection of child processes.
//! [`run`](ProcessGroup::run) launches one and tracks it,
//! [`wait`](ProcessGroup::wait) blocks until all tracked processes have
//! exited, [`shutdown`](ProcessGroup::shutdown) asks each one to stop with
//! a graceful interrupt (SIGINT) and blocks until all are gone, and
//! [`scope`](ProcessGroup::scope) guarantees the shutdown when a block of
//! caller code ends, normally or with an error.
//!
//! A caller interrupt (Ctrl-C) never produces orphans: `wait` hands
//! control back with everything still tracked, and `shutdown` answers it
//! by re-sending the interrupt to the child it is currently reaping.
//! Nothing here ever escalates to a forceful kill.
//!
//! ```no_run
//! use procpod::{CommandSpec, ProcessGroup};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let spec = CommandSpec::builder().program("sleep").args(["2"]).build()?;
//!
//! ProcessGroup::new()?
//!     .scope(async |group| {
//!         group.run(&spec).await?;
//!         group.wait().await;
//!         Ok::<_, anyhow::Error>(())
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;

use tracing::error;

#[cfg(unix)]
use procpod_unix::{SigintSource, UnixProcessLauncher};

/// Process group bound to the platform backend: `tokio::process` for
/// launching and the process's own SIGINT stream for caller interrupts.
///
/// The generic machinery behind it lives in [`procpod_core`]; use
/// [`ProcessGroupInner`] directly to supply a custom launcher or
/// interrupt source.
#[cfg(unix)]
pub struct ProcessGroup {
    inner: ProcessGroupInner<UnixProcessLauncher, SigintSource>,
}

#[cfg(unix)]
impl ProcessGroup {
    /// Create an empty group and install the caller-interrupt listener.
    ///
    /// Installing the listener takes over SIGINT handling for the whole
    /// process for as long as the group lives.
    pub fn new() -> Result<Self, GroupError> {
        Ok(Self {
            inner: ProcessGroupInner::new(UnixProcessLauncher::new(), SigintSource::new()?),
        })
    }

    /// Launch `spec` and track the new process behind all existing ones.
    /// A launch failure surfaces immediately and changes nothing else.
    pub async fn run(&mut self, spec: &CommandSpec) -> Result<(), GroupError> {
        self.inner.run(spec).await
    }

    /// Block until every tracked process has exited, oldest first. A
    /// caller interrupt abandons the pass and leaves the rest tracked.
    pub async fn wait(&mut self) {
        self.inner.wait().await
    }

    /// Interrupt every tracked process, oldest first, and block until
    /// all have exited. A caller interrupt re-sends the interrupt to the
    /// process currently being reaped instead of giving up on it.
    pub async fn shutdown(&mut self) {
        self.inner.shutdown().await
    }

    /// Get the number of processes currently tracked.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check whether the group tracks no processes.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Run `body` with exclusive access to this group, then shut the
    /// group down no matter how `body` ended. An error from `body` is
    /// logged after the teardown and handed back unchanged.
    pub async fn scope<T, E>(
        mut self,
        body: impl AsyncFnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: fmt::Display + fmt::Debug,
    {
        let result = body(&mut self).await;
        self.inner.shutdown().await;
        if let Err(err) = &result {
            error!("error escaped process group scope: {err} ({err:?})");
        }
        result
    }
}

// Re-export core functionality
pub use procpod_core::*;
