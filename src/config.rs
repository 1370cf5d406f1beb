//! # Cycle timing configuration.
//!
//! [`LightConfig`] defines how long the light dwells in each phase and how
//! often the cycle worker wakes to check for shutdown:
//! - [`LightConfig::dwell_min`] / [`LightConfig::dwell_max`] bound the random
//!   dwell drawn for every phase, uniform over `[dwell_min, dwell_max)`;
//! - [`LightConfig::tick`] is the sleep granularity of the worker loop.
//!
//! The defaults reproduce a street-scale light (4–6 s per phase). Tests and
//! embedders that cannot afford real-time cycles shrink the dwell bounds to
//! milliseconds; the protocol is timing-independent.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use lightvisor::LightConfig;
//!
//! let mut cfg = LightConfig::default();
//! cfg.dwell_min = Duration::from_millis(10);
//! cfg.dwell_max = Duration::from_millis(20);
//!
//! let mut rng = rand::rng();
//! let dwell = cfg.random_dwell(&mut rng);
//! assert!(dwell >= cfg.dwell_min && dwell < cfg.dwell_max);
//! ```

use std::time::Duration;

use rand::Rng;

/// Timing parameters for the phase cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightConfig {
    /// Minimum dwell in one phase (inclusive bound).
    pub dwell_min: Duration,
    /// Maximum dwell in one phase (exclusive bound).
    pub dwell_max: Duration,
    /// Sleep increment of the cycle worker; bounds shutdown latency.
    pub tick: Duration,
}

impl Default for LightConfig {
    /// Provides the street-scale defaults:
    /// - `dwell_min = 4s`
    /// - `dwell_max = 6s`
    /// - `tick = 1ms`
    fn default() -> Self {
        Self {
            dwell_min: Duration::from_millis(4000),
            dwell_max: Duration::from_millis(6000),
            tick: Duration::from_millis(1),
        }
    }
}

impl LightConfig {
    /// Draws a dwell duration uniformly from `[dwell_min, dwell_max)`,
    /// at millisecond granularity.
    ///
    /// A degenerate range (`dwell_min >= dwell_max`) collapses to `dwell_min`.
    pub fn random_dwell(&self, rng: &mut impl Rng) -> Duration {
        let min = self.dwell_min.as_millis() as u64;
        let max = self.dwell_max.as_millis() as u64;
        if min >= max {
            return self.dwell_min;
        }
        Duration::from_millis(rng.random_range(min..max))
    }
}
