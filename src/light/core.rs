//! # Traffic light controller.
//!
//! [`TrafficLight`] owns the authoritative [`Phase`] and a cycle worker thread
//! that toggles it on a randomized schedule, publishing every transition
//! through a [`SignalSlot`]. Callers either poll
//! [`current_phase`](TrafficLight::current_phase) or block in
//! [`wait_for_green`](TrafficLight::wait_for_green) until the next green is
//! published.
//!
//! ## Lifecycle
//! ```text
//! TrafficLight::new(cfg)          phase = Red, worker idle
//!        │ simulate()
//!        ▼
//! ┌─────────────────────────────┐
//! │ cycle worker                │      wait_for_green() callers
//! │ loop {                      │            │
//! │   dwell = rand [min, max)   │            │ recv()  (blocks)
//! │   sleep in `tick` steps,    │            ▼
//! │     checking stop flag      │      ┌───────────────────┐
//! │   lock phase; flip;         │ ───► │ SignalSlot<Phase> │
//! │   send(phase); unlock       │      └───────────────────┘
//! │ }                           │      Red ─► discard, keep waiting
//! └─────────────────────────────┘      Green ─► return Ok(())
//!        │ shutdown() / Drop
//!        ▼
//! stop flag set, slot closed (waiters get Stopped), worker joined
//! ```
//!
//! ## Locking
//! The phase flip and the corresponding `send` happen under the phase lock, so
//! a value read from the slot is never older than what a concurrent
//! `current_phase` reported at the moment of the send. Lock order is always
//! phase lock → slot lock (only the worker holds both); receivers take only
//! the slot lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, trace, warn};

use super::phase::Phase;
use crate::config::LightConfig;
use crate::error::LightError;
use crate::signals::SignalSlot;

/// State shared between the controller handle and its cycle worker.
struct Shared {
    /// Authoritative phase; mutated only by the worker, under this lock.
    phase: Mutex<Phase>,
    /// Latest published transition.
    signals: SignalSlot<Phase>,
    /// Set once by `shutdown`; the worker exits at the next tick.
    stop: AtomicBool,
}

/// A self-cycling two-phase traffic light.
///
/// Starts in [`Phase::Red`] with the worker idle; nothing happens until
/// [`simulate`](Self::simulate) is called. All methods take `&self`, so a
/// single light can be shared across threads behind an `Arc`.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use lightvisor::{LightConfig, LightError, Phase, TrafficLight};
///
/// fn main() -> Result<(), LightError> {
///     let mut cfg = LightConfig::default();
///     cfg.dwell_min = Duration::from_millis(10);
///     cfg.dwell_max = Duration::from_millis(20);
///
///     let light = TrafficLight::new(cfg);
///     assert_eq!(light.current_phase(), Phase::Red);
///
///     light.simulate()?;
///     light.wait_for_green()?;
///     light.shutdown();
///     Ok(())
/// }
/// ```
pub struct TrafficLight {
    config: LightConfig,
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl TrafficLight {
    /// Creates a light in [`Phase::Red`] with the worker not yet started.
    pub fn new(config: LightConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Shared {
                phase: Mutex::new(Phase::Red),
                signals: SignalSlot::new(),
                stop: AtomicBool::new(false),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Returns a copy of the authoritative phase.
    ///
    /// Reads under the same lock that guards phase mutation; never blocks
    /// beyond lock contention.
    pub fn current_phase(&self) -> Phase {
        *self.shared.phase.lock().expect("phase lock poisoned")
    }

    /// Blocks until the next green transition is published.
    ///
    /// Level-triggered: red transitions are discarded, and a green that was
    /// overwritten before this caller started waiting is never replayed — only
    /// a *future* green releases the caller. Because the light toggles
    /// forever, every waiter is eventually released (each green wakes one
    /// waiter; the rest are served by later greens).
    ///
    /// Returns [`LightError::Stopped`] if the light is shut down while
    /// waiting.
    pub fn wait_for_green(&self) -> Result<(), LightError> {
        await_phase(&self.shared.signals, Phase::Green)
    }

    /// Starts the cycle worker thread.
    ///
    /// Does not block the caller. At most one worker runs per light:
    /// a second call fails with [`LightError::AlreadyRunning`], and a call
    /// after [`shutdown`](Self::shutdown) fails with [`LightError::Stopped`].
    /// A failure to spawn the thread is propagated, never swallowed.
    pub fn simulate(&self) -> Result<(), LightError> {
        let mut worker = self.worker.lock().expect("worker lock poisoned");
        if worker.is_some() {
            return Err(LightError::AlreadyRunning);
        }
        if self.shared.stop.load(Ordering::Relaxed) {
            return Err(LightError::Stopped);
        }

        let shared = Arc::clone(&self.shared);
        let config = self.config;
        let handle = thread::Builder::new()
            .name("light-cycle".into())
            .spawn(move || cycle_through_phases(&shared, &config))?;
        *worker = Some(handle);
        debug!(
            dwell_min_ms = self.config.dwell_min.as_millis() as u64,
            dwell_max_ms = self.config.dwell_max.as_millis() as u64,
            "phase cycle started"
        );
        Ok(())
    }

    /// Stops the cycle worker and releases every blocked waiter.
    ///
    /// Sets the stop flag (honored at the next worker tick), closes the
    /// signal slot so pending [`wait_for_green`](Self::wait_for_green) calls
    /// return [`LightError::Stopped`], and joins the worker. Idempotent; also
    /// invoked on drop.
    pub fn shutdown(&self) {
        self.shared.stop.store(true, Ordering::Relaxed);
        self.shared.signals.close();

        let handle = self.worker.lock().expect("worker lock poisoned").take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("cycle worker panicked");
            }
            debug!("phase cycle stopped");
        }
    }
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new(LightConfig::default())
    }
}

impl Drop for TrafficLight {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Receive loop behind `wait_for_green`: discard everything until `wanted`.
fn await_phase(signals: &SignalSlot<Phase>, wanted: Phase) -> Result<(), LightError> {
    loop {
        match signals.recv() {
            Ok(phase) if phase == wanted => return Ok(()),
            Ok(_) => continue,
            Err(_) => return Err(LightError::Stopped),
        }
    }
}

/// Cycle worker body: dwell, flip, publish, repeat until stopped.
fn cycle_through_phases(shared: &Shared, config: &LightConfig) {
    let mut rng = rand::rng();
    loop {
        let dwell = config.random_dwell(&mut rng);
        let deadline = Instant::now() + dwell;

        // Short sleeps keep the loop responsive to shutdown.
        while Instant::now() < deadline {
            if shared.stop.load(Ordering::Relaxed) {
                return;
            }
            thread::sleep(config.tick);
        }
        if shared.stop.load(Ordering::Relaxed) {
            return;
        }

        // Flip and publish under the phase lock, as one atomic transition.
        let mut phase = shared.phase.lock().expect("phase lock poisoned");
        *phase = phase.toggled();
        shared.signals.send(*phase);
        trace!(phase = %*phase, dwell_ms = dwell.as_millis() as u64, "phase flipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    fn fast_config() -> LightConfig {
        LightConfig {
            dwell_min: Duration::from_millis(10),
            dwell_max: Duration::from_millis(20),
            tick: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_initial_phase_is_red() {
        let light = TrafficLight::default();
        assert_eq!(light.current_phase(), Phase::Red);
    }

    #[test]
    fn test_wait_for_green_returns_on_green() {
        let light = TrafficLight::new(fast_config());
        light.simulate().unwrap();
        light.wait_for_green().unwrap();
        light.shutdown();
    }

    #[test]
    fn test_double_simulate_fails() {
        let light = TrafficLight::new(fast_config());
        light.simulate().unwrap();
        assert!(matches!(light.simulate(), Err(LightError::AlreadyRunning)));
        light.shutdown();
    }

    #[test]
    fn test_simulate_after_shutdown_fails() {
        let light = TrafficLight::new(fast_config());
        light.shutdown();
        assert!(matches!(light.simulate(), Err(LightError::Stopped)));
    }

    #[test]
    fn test_shutdown_unblocks_waiter() {
        let light = Arc::new(TrafficLight::new(fast_config()));
        let waiter = {
            let light = Arc::clone(&light);
            thread::spawn(move || light.wait_for_green())
        };

        thread::sleep(Duration::from_millis(30));
        light.shutdown();
        assert!(matches!(waiter.join().unwrap(), Err(LightError::Stopped)));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let light = TrafficLight::new(fast_config());
        light.simulate().unwrap();
        light.shutdown();
        light.shutdown();
    }

    #[test]
    fn test_await_phase_skips_red() {
        let signals = Arc::new(SignalSlot::new());
        let (done_tx, done_rx) = mpsc::channel();

        let waiter = {
            let signals = Arc::clone(&signals);
            thread::spawn(move || {
                let result = await_phase(&signals, Phase::Green);
                done_tx.send(()).unwrap();
                result
            })
        };

        signals.send(Phase::Red);
        thread::sleep(Duration::from_millis(20));
        signals.send(Phase::Red);
        assert!(
            done_rx.recv_timeout(Duration::from_millis(50)).is_err(),
            "waiter released by a red transition"
        );

        signals.send(Phase::Green);
        done_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("waiter not released by green");
        waiter.join().unwrap().unwrap();
    }

    #[test]
    fn test_phases_alternate_starting_green() {
        let light = TrafficLight::new(fast_config());
        light.simulate().unwrap();

        let mut observed = Vec::new();
        for _ in 0..5 {
            observed.push(light.shared.signals.recv().unwrap());
        }
        light.shutdown();

        assert_eq!(
            observed,
            vec![
                Phase::Green,
                Phase::Red,
                Phase::Green,
                Phase::Red,
                Phase::Green
            ]
        );
    }

    #[test]
    fn test_current_phase_matches_latest_sent() {
        let cfg = LightConfig {
            dwell_min: Duration::from_millis(50),
            dwell_max: Duration::from_millis(100),
            tick: Duration::from_millis(1),
        };
        let light = TrafficLight::new(cfg);
        light.simulate().unwrap();

        // Dwell is far above assertion latency, so no flip can intervene
        // between taking a value out of the slot and reading the phase.
        for _ in 0..4 {
            let sent = light.shared.signals.recv().unwrap();
            assert_eq!(
                light.current_phase(),
                sent,
                "authoritative phase diverged from the published transition"
            );
        }
        light.shutdown();
    }

    #[test]
    fn test_flip_intervals_track_dwell_bounds() {
        let cfg = LightConfig {
            dwell_min: Duration::from_millis(20),
            dwell_max: Duration::from_millis(40),
            tick: Duration::from_millis(1),
        };
        let light = TrafficLight::new(cfg);
        light.simulate().unwrap();

        let mut stamps = Vec::new();
        for _ in 0..5 {
            light.shared.signals.recv().unwrap();
            stamps.push(Instant::now());
        }
        light.shutdown();

        // Scheduling jitter widens the window; bounds stay tolerance-based.
        for pair in stamps.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(
                gap >= Duration::from_millis(15),
                "flip interval {gap:?} below dwell minimum"
            );
            assert!(
                gap <= Duration::from_millis(150),
                "flip interval {gap:?} above dwell maximum plus jitter allowance"
            );
        }
    }

    #[test]
    fn test_all_waiters_eventually_released() {
        let light = Arc::new(TrafficLight::new(fast_config()));
        light.simulate().unwrap();

        let (done_tx, done_rx) = mpsc::channel();
        for _ in 0..3 {
            let light = Arc::clone(&light);
            let done_tx = done_tx.clone();
            thread::spawn(move || {
                light.wait_for_green().unwrap();
                done_tx.send(()).unwrap();
            });
        }
        drop(done_tx);

        // Each green wakes one waiter; greens recur, so all three finish.
        for _ in 0..3 {
            done_rx
                .recv_timeout(Duration::from_secs(10))
                .expect("a waiter was never released");
        }
        light.shutdown();
    }
}
