//! LNS configuration.

use crate::error::{Result, SchedulerError};

/// Acceptance settings of the [`Lns`](super::Lns) driver.
///
/// Termination is governed by the scheduler's
/// [`SchedulerConfig`](crate::scheduler::SchedulerConfig); this only
/// decides whether a repaired candidate replaces the current solution.
///
/// # Acceptance Criterion
///
/// Better candidates are always accepted. With `initial_temperature > 0`
/// a worse candidate is accepted with probability `exp(-delta / T)`,
/// where `delta` is the objective deterioration. T starts at
/// `initial_temperature` and decays geometrically by `cooling_rate` per
/// iteration down to `min_temperature`. With the default temperature of
/// zero only improvements are accepted.
///
/// # Examples
///
/// ```
/// use u_scheduler::lns::LnsConfig;
///
/// let config = LnsConfig::default()
///     .with_temperature(10.0, 0.999, 0.01)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LnsConfig {
    /// Initial temperature for SA acceptance; 0 disables it.
    pub initial_temperature: f64,

    /// Cooling rate (geometric), in (0, 1].
    pub cooling_rate: f64,

    /// Minimum temperature (stops cooling below this).
    pub min_temperature: f64,

    /// Random seed for the acceptance test. Destroy/repair order follows
    /// `SchedulerConfig::seed`.
    pub seed: Option<u64>,
}

impl Default for LnsConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 0.0,
            cooling_rate: 1.0,
            min_temperature: 0.0,
            seed: None,
        }
    }
}

impl LnsConfig {
    pub fn with_temperature(mut self, initial: f64, cooling_rate: f64, min: f64) -> Self {
        self.initial_temperature = initial;
        self.cooling_rate = cooling_rate;
        self.min_temperature = min;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.initial_temperature.is_nan() || self.initial_temperature < 0.0 {
            return Err(SchedulerError::Config(format!(
                "initial_temperature must be non-negative, got {}",
                self.initial_temperature
            )));
        }
        if self.cooling_rate.is_nan() || self.cooling_rate <= 0.0 || self.cooling_rate > 1.0 {
            return Err(SchedulerError::Config(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        if self.min_temperature.is_nan() || self.min_temperature < 0.0 {
            return Err(SchedulerError::Config(
                "min_temperature must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
