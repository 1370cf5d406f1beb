//! # lightvisor
//!
//! **lightvisor** models a self-cycling traffic light and the synchronization
//! primitive that lets other threads block until a given phase is reached.
//!
//! The interesting part is not the light — it is the handoff between the
//! thread that flips phases and the threads that wait for one: a single-slot,
//! overwrite-on-send channel built on a mutex and a condition variable, used
//! to implement a phase-wait protocol without busy-polling or missed-wakeup
//! races.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!                  ┌───────────────────────────────────┐
//!                  │  TrafficLight                     │
//!  simulate() ───► │  ┌─────────────────────────────┐  │
//!                  │  │ cycle worker (one thread)   │  │
//!                  │  │  dwell = rand [4s, 6s)      │  │
//!                  │  │  flip Red ⇄ Green           │  │
//!                  │  └────────────┬────────────────┘  │
//!                  │     send(phase), under phase lock │
//!                  │               ▼                   │
//!                  │     ┌───────────────────┐         │
//!                  │     │ SignalSlot<Phase> │         │
//!                  │     │(overwrite-on-send)│         │
//!                  │     └─────────┬─────────┘         │
//!                  └───────────────┼───────────────────┘
//!                           recv() │ blocking
//!                 ┌────────────────┼────────────────┐
//!                 ▼                ▼                ▼
//!          wait_for_green() callers (arbitrary threads)
//! ```
//!
//! ### Guarantees
//! - The authoritative phase and the value pushed into the slot are updated
//!   together, under the phase lock: no observer can see a slot value that is
//!   inconsistent with a concurrent [`TrafficLight::current_phase`].
//! - The slot holds at most one pending value; a slow receiver sees the most
//!   recent transition, never a backlog of stale ones.
//! - Waits are level-triggered: a waiter may sleep through any number of
//!   interleaved transitions, and only a *future* green releases it.
//!
//! ## Features
//! | Area              | Description                                              | Key types            |
//! |-------------------|----------------------------------------------------------|----------------------|
//! | **Controller**    | Randomized phase cycling, blocking phase waits, shutdown.| [`TrafficLight`]     |
//! | **Signals**       | Single-slot overwrite-on-send channel (mutex + condvar). | [`SignalSlot`]       |
//! | **Configuration** | Dwell bounds and worker tick granularity.                | [`LightConfig`]      |
//! | **Errors**        | Typed errors for start, wait, and spawn failures.        | [`LightError`]       |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//! use lightvisor::{LightConfig, LightError, Phase, TrafficLight};
//!
//! fn main() -> Result<(), LightError> {
//!     let mut cfg = LightConfig::default();
//!     cfg.dwell_min = Duration::from_millis(10);
//!     cfg.dwell_max = Duration::from_millis(20);
//!
//!     let light = Arc::new(TrafficLight::new(cfg));
//!     assert_eq!(light.current_phase(), Phase::Red);
//!
//!     light.simulate()?;
//!
//!     // Any number of threads can block until the next green.
//!     let crosser = {
//!         let light = Arc::clone(&light);
//!         thread::spawn(move || light.wait_for_green())
//!     };
//!     crosser.join().expect("crosser panicked")?;
//!
//!     light.shutdown();
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod light;
mod signals;

// ---- Public re-exports ----

pub use config::LightConfig;
pub use error::LightError;
pub use light::{Phase, TrafficLight};
pub use signals::{RecvError, RecvTimeoutError, SignalSlot, TryRecvError};
