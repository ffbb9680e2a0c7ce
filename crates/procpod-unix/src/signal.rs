use async_trait::async_trait;
use procpod_core::{GroupError, InterruptSource};
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Caller-interrupt source backed by the process's own SIGINT stream.
///
/// Installing the listener replaces the runtime's default
/// terminate-on-SIGINT behavior for the whole process: while a group is
/// live, a Ctrl-C is reported through [`InterruptSource::interrupted`]
/// instead of killing the parent outright, and the group decides whether
/// to abandon a wait or to re-signal a child.
pub struct SigintSource {
    signal: Signal,
}

impl SigintSource {
    /// Install the SIGINT listener for this process.
    pub fn new() -> Result<Self, GroupError> {
        let signal = signal(SignalKind::interrupt()).map_err(GroupError::interrupt_listener)?;
        Ok(Self { signal })
    }
}

#[async_trait]
impl InterruptSource for SigintSource {
    async fn interrupted(&mut self) {
        match self.signal.recv().await {
            Some(()) => {}
            // Stream closed: no further interrupt can ever arrive, so
            // pend instead of spuriously resolving the race.
            None => std::future::pending().await,
        }
    }
}
