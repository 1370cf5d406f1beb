//! Error types used by the light controller.
//!
//! All regular operations either succeed or block; [`LightError`] covers the
//! few caller-visible failures: starting a light twice, waiting on a light
//! that has been shut down, and failing to spawn the cycle worker. Lock
//! poisoning is not represented here: a panic while holding one of the
//! internal locks is unrecoverable and propagates as a panic.

use thiserror::Error;

/// Errors produced by [`TrafficLight`](crate::TrafficLight) operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LightError {
    /// `simulate` was called while a cycle worker is already active.
    #[error("phase cycle already running")]
    AlreadyRunning,

    /// The controller was shut down; no further phase will ever be published.
    #[error("light controller stopped")]
    Stopped,

    /// The cycle worker thread could not be spawned.
    #[error("failed to spawn cycle worker: {0}")]
    Spawn(#[from] std::io::Error),
}

impl LightError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use lightvisor::LightError;
    ///
    /// assert_eq!(LightError::Stopped.as_label(), "light_stopped");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LightError::AlreadyRunning => "light_already_running",
            LightError::Stopped => "light_stopped",
            LightError::Spawn(_) => "light_spawn_failed",
        }
    }
}
