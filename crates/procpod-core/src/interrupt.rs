use async_trait::async_trait;

/// Source of caller-interrupt events, typically the operator pressing
/// Ctrl-C in the controlling terminal.
///
/// [`wait`](crate::ProcessGroupInner::wait) and
/// [`shutdown`](crate::ProcessGroupInner::shutdown) race the front child's
/// exit against this source: during `wait` an interrupt abandons the pass,
/// during `shutdown` it re-sends the graceful interrupt to the child being
/// waited on.
#[async_trait]
pub trait InterruptSource: Send {
    /// Resolve once the next interrupt reaches the caller.
    ///
    /// Must be cancel safe, and must pend forever when no further
    /// interrupt can ever arrive. Resolving spuriously would abandon
    /// waits and re-signal children for no reason.
    async fn interrupted(&mut self);
}
