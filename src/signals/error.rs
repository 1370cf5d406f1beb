use thiserror::Error;

/// Error returned by [`SignalSlot::recv`](crate::SignalSlot::recv).
///
/// The slot was closed and holds no pending value; no value will ever
/// arrive again.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("signal slot closed")]
pub struct RecvError;

/// Error returned by [`SignalSlot::recv_timeout`](crate::SignalSlot::recv_timeout).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvTimeoutError {
    /// No value arrived within the timeout window.
    #[error("timed out waiting for a signal")]
    Timeout,

    /// The slot was closed while (or before) waiting, with nothing pending.
    #[error("signal slot closed")]
    Closed,
}

/// Error returned by [`SignalSlot::try_recv`](crate::SignalSlot::try_recv).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    /// The slot is currently empty.
    #[error("no signal pending")]
    Empty,

    /// The slot was closed with nothing pending.
    #[error("signal slot closed")]
    Closed,
}
