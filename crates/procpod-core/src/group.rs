use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, error, info, warn};

use crate::config::CommandSpec;
use crate::error::GroupError;
use crate::interrupt::InterruptSource;
use crate::process::{ProcessHandle, ProcessLauncher};

/// Outcome of one blocking wait on the front child.
enum WaitOutcome {
    /// An exit was observed and the handle can be dropped.
    Exited,
    /// A caller interrupt won the race; the handle stays tracked.
    Interrupted,
}

/// Ordered group of child processes launched, tracked, and torn down
/// together.
///
/// Processes are tracked in launch order and always reaped oldest first.
/// The group is generic over the launch facility and the source of
/// caller interrupts so backends and tests can swap either; the `procpod`
/// crate binds both to the platform defaults.
///
/// Dropping a group that still tracks processes sends each one a single
/// best-effort interrupt. That is a safety net, not a teardown: use
/// [`shutdown`](Self::shutdown) or [`scope`](Self::scope) to actually wait
/// for the processes to go away.
pub struct ProcessGroupInner<L, I>
where
    L: ProcessLauncher,
    I: InterruptSource,
{
    launcher: L,
    interrupts: I,
    children: VecDeque<L::Handle>,
}

impl<L, I> ProcessGroupInner<L, I>
where
    L: ProcessLauncher,
    I: InterruptSource,
{
    /// Create an empty group on top of the given backend pair.
    pub fn new(launcher: L, interrupts: I) -> Self {
        Self {
            launcher,
            interrupts,
            children: VecDeque::new(),
        }
    }

    /// Get the number of processes currently tracked.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check whether the group tracks no processes.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Launch `spec` and track the new process behind all existing ones.
    ///
    /// A launch failure surfaces immediately and leaves the tracked
    /// sequence exactly as it was; nothing is retried.
    pub async fn run(&mut self, spec: &CommandSpec) -> Result<(), GroupError> {
        let handle = self.launcher.launch(spec).await?;
        info!(
            "launched `{}` (pid {:?}), {} processes tracked",
            spec.program,
            handle.pid(),
            self.children.len() + 1
        );
        self.children.push_back(handle);
        Ok(())
    }

    /// Block until every tracked process has exited, oldest first.
    ///
    /// Each observed exit removes the process from the group. If a caller
    /// interrupt arrives, the pass stops immediately: whatever has not
    /// exited yet stays tracked, a notice is logged, and control returns
    /// so the caller can decide what happens next (usually a
    /// [`shutdown`](Self::shutdown)).
    pub async fn wait(&mut self) {
        while let Some(child) = self.children.front_mut() {
            match await_exit(child, &mut self.interrupts).await {
                WaitOutcome::Exited => {
                    self.children.pop_front();
                }
                WaitOutcome::Interrupted => {
                    warn!(
                        "interrupted while waiting; {} processes left tracked",
                        self.children.len()
                    );
                    return;
                }
            }
        }
    }

    /// Interrupt every tracked process and block until all have exited.
    ///
    /// Processes are handled oldest first: send the graceful interrupt,
    /// then wait for the exit. A caller interrupt arriving during that
    /// wait re-sends the interrupt to the same process and keeps waiting;
    /// teardown is never abandoned and never escalates to a forceful
    /// kill. A process is removed only once its exit has been observed,
    /// so this returns with the group empty. On an empty group it is an
    /// immediate no-op.
    pub async fn shutdown(&mut self) {
        if self.children.is_empty() {
            return;
        }
        info!("shutting down {} tracked processes", self.children.len());
        while let Some(child) = self.children.front_mut() {
            send_interrupt(child);
            reap_with_retry(child, &mut self.interrupts).await;
            self.children.pop_front();
        }
        debug!("process group shut down");
    }

    /// Run `body` with exclusive access to this group, then shut the
    /// group down no matter how `body` ended.
    ///
    /// An error returned by `body` is logged with its display form and
    /// its debug detail after the shutdown completes, then handed back
    /// unchanged; this never swallows failures and never skips teardown.
    pub async fn scope<T, E>(
        mut self,
        body: impl AsyncFnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: fmt::Display + fmt::Debug,
    {
        let result = body(&mut self).await;
        self.shutdown().await;
        if let Err(error) = &result {
            error!("error escaped process group scope: {error} ({error:?})");
        }
        result
    }
}

impl<L, I> Drop for ProcessGroupInner<L, I>
where
    L: ProcessLauncher,
    I: InterruptSource,
{
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }
        warn!(
            "process group dropped with {} processes still tracked; sending best-effort interrupts",
            self.children.len()
        );
        for child in &self.children {
            if let Err(error) = child.interrupt() {
                warn!("failed to interrupt `{}` during drop: {error}", child.program());
            }
        }
    }
}

/// Wait for `child` to exit unless a caller interrupt arrives first.
///
/// The interrupt branch is polled first so an already-pending interrupt
/// beats an already-exited child.
async fn await_exit<H, I>(child: &mut H, interrupts: &mut I) -> WaitOutcome
where
    H: ProcessHandle,
    I: InterruptSource,
{
    tokio::select! {
        biased;
        _ = interrupts.interrupted() => WaitOutcome::Interrupted,
        result = child.wait() => {
            observe_exit(child, result);
            WaitOutcome::Exited
        }
    }
}

/// Wait for `child` to exit; every caller interrupt that arrives in the
/// meantime re-sends the graceful interrupt to the child instead of
/// abandoning it.
async fn reap_with_retry<H, I>(child: &mut H, interrupts: &mut I)
where
    H: ProcessHandle,
    I: InterruptSource,
{
    loop {
        tokio::select! {
            biased;
            _ = interrupts.interrupted() => {
                info!(
                    "interrupted during shutdown; re-sending interrupt to `{}`",
                    child.program()
                );
                send_interrupt(child);
            }
            result = child.wait() => {
                observe_exit(child, result);
                return;
            }
        }
    }
}

/// Send one graceful interrupt, logging delivery failures instead of
/// propagating them so a teardown pass is never cut short by one bad
/// signal.
fn send_interrupt<H: ProcessHandle>(child: &H) {
    debug!("interrupting `{}` (pid {:?})", child.program(), child.pid());
    if let Err(error) = child.interrupt() {
        warn!("failed to interrupt `{}`: {error}", child.program());
    }
}

/// Record an observed exit. A failed wait counts as one: the handle is
/// unusable and keeping it tracked would wedge every later pass.
fn observe_exit<H: ProcessHandle>(child: &H, result: std::io::Result<crate::process::ExitStatus>) {
    match result {
        Ok(status) => debug!("`{}` exited with {status}", child.program()),
        Err(error) => error!(
            "failed to wait for `{}`, treating as exited: {error}",
            child.program()
        ),
    }
}
