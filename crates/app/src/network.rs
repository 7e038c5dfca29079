//! In-process network strategies.
//!
//! [`SimulatedNetwork`] draws latency and failures from a random generator;
//! [`FixedNetwork`] always answers the same way and is meant for tests.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fleetdash_domain::error::ValidationError;

use crate::ports::NetworkConditions;

/// Recognized options of the simulated network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkConfig {
    /// Inclusive lower bound of the latency.
    pub latency_min: Duration,
    /// Exclusive upper bound of the latency (inclusive when equal to the minimum).
    pub latency_max: Duration,
    /// Probability in `[0, 1]` that a request fails.
    pub failure_probability: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            latency_min: Duration::from_millis(500),
            latency_max: Duration::from_millis(2000),
            failure_probability: 0.1,
        }
    }
}

impl NetworkConfig {
    /// Check the latency range and probability.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LatencyRange`] when the minimum exceeds the
    /// maximum and [`ValidationError::FailureProbability`] when the
    /// probability is outside `[0, 1]` or not a number.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.latency_min > self.latency_max {
            return Err(ValidationError::LatencyRange);
        }
        if !(0.0..=1.0).contains(&self.failure_probability) {
            return Err(ValidationError::FailureProbability);
        }
        Ok(())
    }
}

/// Random latency and failure injection.
pub struct SimulatedNetwork {
    config: NetworkConfig,
    rng: Mutex<StdRng>,
}

impl SimulatedNetwork {
    /// Create a network seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when `config` is invalid.
    pub fn new(config: NetworkConfig) -> Result<Self, ValidationError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a reproducible network from a fixed seed.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when `config` is invalid.
    pub fn seeded(config: NetworkConfig, seed: u64) -> Result<Self, ValidationError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: NetworkConfig, rng: StdRng) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: Mutex::new(rng),
        })
    }

    fn with_rng_locked<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

impl NetworkConditions for SimulatedNetwork {
    fn latency(&self) -> Duration {
        let min = self.config.latency_min;
        let max = self.config.latency_max;
        if min >= max {
            return min;
        }
        self.with_rng_locked(|rng| rng.random_range(min..max))
    }

    fn should_fail(&self) -> bool {
        let p = self.config.failure_probability;
        self.with_rng_locked(|rng| rng.random::<f64>() < p)
    }
}

/// Deterministic network: constant latency, constant outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedNetwork {
    pub latency: Duration,
    pub fail: bool,
}

impl FixedNetwork {
    /// Zero latency, never fails.
    #[must_use]
    pub fn reliable() -> Self {
        Self::default()
    }

    /// Zero latency, always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            latency: Duration::ZERO,
            fail: true,
        }
    }
}

impl NetworkConditions for FixedNetwork {
    fn latency(&self) -> Duration {
        self.latency
    }

    fn should_fail(&self) -> bool {
        self.fail
    }
}
