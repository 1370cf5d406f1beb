//! # Single-slot signal channel.
//!
//! [`SignalSlot`] is a mutex + condvar handoff primitive holding **at most one**
//! pending value. It connects a producer that only cares about publishing the
//! *latest* state to receivers that block until state arrives.
//!
//! ## Architecture
//! ```text
//!   send(v) ──► ┌──────────────────┐ ──► recv() / recv_timeout()
//!   (overwrite) │ Mutex<Option<T>> │     (blocking take)
//!               │     Condvar      │
//!   close()  ──►└──────────────────┘ ──► all waiters unblocked
//! ```
//!
//! ## Rules
//! - **Overwrite, never queue**: a `send` replaces any undelivered value; the
//!   stale value is dropped silently. Memory stays O(1), and a receiver that
//!   fell behind never processes an outdated value.
//! - **Non-blocking send**: the producer never waits for a receiver.
//! - **Blocking receive**: `recv` parks on the condvar behind a predicate
//!   (`wait_while`), so spurious wakeups and already-consumed notifications
//!   cannot release it early. No busy-polling.
//! - **Single-consumer wakeup**: each `send` wakes one waiter. With several
//!   concurrent receivers, the others are released by later sends (or by
//!   `close`, which wakes everyone).
//! - **Drain then close**: a value already in the slot when `close` is called
//!   is still delivered; only an empty closed slot reports closure.

use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

use super::error::{RecvError, RecvTimeoutError, TryRecvError};

struct SlotInner<T> {
    value: Option<T>,
    closed: bool,
}

/// Single-slot, overwrite-on-send channel built on `Mutex` + `Condvar`.
///
/// Share it between threads behind an `Arc` (or borrow it from an owner that
/// outlives both sides); all methods take `&self`.
///
/// # Example
/// ```rust
/// use lightvisor::SignalSlot;
///
/// let slot = SignalSlot::new();
/// slot.send(1);
/// slot.send(2); // overwrites 1 — only the latest value survives
/// assert_eq!(slot.recv(), Ok(2));
/// ```
pub struct SignalSlot<T> {
    inner: Mutex<SlotInner<T>>,
    cond: Condvar,
}

impl<T> SignalSlot<T> {
    /// Creates an empty, open slot.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SlotInner {
                value: None,
                closed: false,
            }),
            cond: Condvar::new(),
        }
    }

    /// Publishes a value, replacing any undelivered one, and wakes one waiter.
    ///
    /// Never blocks and never fails; if a previous value was still pending it
    /// is dropped. Sends into a closed slot are discarded.
    pub fn send(&self, value: T) {
        let mut inner = self.lock();
        if inner.closed {
            return;
        }
        inner.value = Some(value);
        drop(inner);
        self.cond.notify_one();
    }

    /// Blocks until a value is available, then takes it out of the slot.
    ///
    /// Returns [`RecvError`] once the slot is closed and drained.
    pub fn recv(&self) -> Result<T, RecvError> {
        let inner = self.lock();
        let mut inner = self
            .cond
            .wait_while(inner, |s| s.value.is_none() && !s.closed)
            .expect("signal slot lock poisoned");
        inner.value.take().ok_or(RecvError)
    }

    /// Like [`recv`](Self::recv), but gives up after `timeout`.
    ///
    /// The wait is deadline-based: spurious wakeups re-enter the wait with the
    /// remaining time, they do not extend it.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        let inner = self.lock();
        let (mut inner, _timed_out) = self
            .cond
            .wait_timeout_while(inner, timeout, |s| s.value.is_none() && !s.closed)
            .expect("signal slot lock poisoned");
        match inner.value.take() {
            Some(value) => Ok(value),
            None if inner.closed => Err(RecvTimeoutError::Closed),
            None => Err(RecvTimeoutError::Timeout),
        }
    }

    /// Takes the pending value without blocking.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        let mut inner = self.lock();
        match inner.value.take() {
            Some(value) => Ok(value),
            None if inner.closed => Err(TryRecvError::Closed),
            None => Err(TryRecvError::Empty),
        }
    }

    /// Closes the slot and wakes **all** blocked receivers.
    ///
    /// Idempotent. A pending value survives and is delivered to the next
    /// receiver; after that every receive reports closure.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        drop(inner);
        self.cond.notify_all();
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, SlotInner<T>> {
        self.inner.lock().expect("signal slot lock poisoned")
    }
}

impl<T> Default for SignalSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_overwrite_keeps_only_latest() {
        let slot = SignalSlot::new();
        slot.send(1);
        slot.send(2);
        slot.send(3);
        assert_eq!(slot.recv(), Ok(3));
        assert_eq!(slot.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_recv_blocks_until_send() {
        let slot = Arc::new(SignalSlot::new());

        // Nothing pending: a short timed wait must come back empty-handed.
        assert_eq!(
            slot.recv_timeout(Duration::from_millis(20)),
            Err(RecvTimeoutError::Timeout)
        );

        let sender = {
            let slot = Arc::clone(&slot);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(30));
                slot.send(7);
            })
        };
        assert_eq!(slot.recv_timeout(Duration::from_secs(5)), Ok(7));
        sender.join().unwrap();
    }

    #[test]
    fn test_close_unblocks_all_receivers() {
        let slot: Arc<SignalSlot<u32>> = Arc::new(SignalSlot::new());
        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let slot = Arc::clone(&slot);
                thread::spawn(move || slot.recv())
            })
            .collect();

        thread::sleep(Duration::from_millis(30));
        slot.close();
        for waiter in waiters {
            assert_eq!(waiter.join().unwrap(), Err(RecvError));
        }
    }

    #[test]
    fn test_pending_value_survives_close() {
        let slot = SignalSlot::new();
        slot.send(9);
        slot.close();
        assert_eq!(slot.recv(), Ok(9));
        assert_eq!(slot.recv(), Err(RecvError));
    }

    #[test]
    fn test_send_after_close_is_discarded() {
        let slot = SignalSlot::new();
        slot.close();
        slot.send(1);
        assert_eq!(slot.try_recv(), Err(TryRecvError::Closed));
    }

    #[test]
    fn test_close_is_idempotent() {
        let slot: SignalSlot<u32> = SignalSlot::new();
        slot.close();
        slot.close();
        assert!(slot.is_closed());
    }
}
