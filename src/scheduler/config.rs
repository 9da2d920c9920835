//! Scheduler configuration.

use crate::error::{Result, SchedulerError};

/// Configuration of a [`Scheduler`](super::Scheduler).
///
/// Every numeric termination threshold is turned off by a negative value.
///
/// # Termination
///
/// The run terminates as soon as any enabled criterion holds:
/// - `max_iterations`: total method applications
/// - `max_iterations_without_improvement`: applications since the
///   incumbent was found
/// - `max_time`: seconds since the scheduler was created
/// - `max_time_without_improvement`: seconds since the incumbent was found
/// - `target_objective`: the incumbent is at least as good as this value
///
/// # Iteration Log
///
/// `log_frequency` selects which iterations are logged:
/// `0` none, `F > 0` every F-th iteration, `F < 0` iterations 1, 2, 5, 10,
/// 20, 50, 100, ... Iterations yielding a new incumbent are logged as well
/// when `log_new_incumbent` is set, and the terminating iteration always is.
///
/// # Examples
///
/// ```
/// use u_scheduler::scheduler::SchedulerConfig;
///
/// let config = SchedulerConfig::default()
///     .with_max_iterations(10_000)
///     .with_max_time(60.0)
///     .with_log_frequency(-1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// Maximum number of iterations.
    pub max_iterations: i64,

    /// Maximum number of iterations without improvement.
    pub max_iterations_without_improvement: i64,

    /// Time limit in seconds.
    pub max_time: f64,

    /// Maximum time in seconds without improvement.
    pub max_time_without_improvement: f64,

    /// Objective value at which to stop once reached.
    pub target_objective: f64,

    /// Write an iteration log line for every new incumbent.
    pub log_new_incumbent: bool,

    /// Frequency of iteration log lines.
    pub log_frequency: i64,

    /// Run the solution's self-check after each method application.
    pub check_each_application: bool,

    /// Seed for shuffling methods. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            max_iterations_without_improvement: -1,
            max_time: -1.0,
            max_time_without_improvement: -1.0,
            target_objective: -1.0,
            log_new_incumbent: true,
            log_frequency: 0,
            check_each_application: false,
            seed: None,
        }
    }
}

impl SchedulerConfig {
    pub fn with_max_iterations(mut self, n: i64) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_max_iterations_without_improvement(mut self, n: i64) -> Self {
        self.max_iterations_without_improvement = n;
        self
    }

    pub fn with_max_time(mut self, secs: f64) -> Self {
        self.max_time = secs;
        self
    }

    pub fn with_max_time_without_improvement(mut self, secs: f64) -> Self {
        self.max_time_without_improvement = secs;
        self
    }

    pub fn with_target_objective(mut self, obj: f64) -> Self {
        self.target_objective = obj;
        self
    }

    pub fn with_log_new_incumbent(mut self, on: bool) -> Self {
        self.log_new_incumbent = on;
        self
    }

    pub fn with_log_frequency(mut self, freq: i64) -> Self {
        self.log_frequency = freq;
        self
    }

    pub fn with_check_each_application(mut self, on: bool) -> Self {
        self.check_each_application = on;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Configuration with every termination criterion turned off.
    ///
    /// A scheduler using it only stops when its driver runs out of work.
    pub fn unbounded() -> Self {
        Self {
            max_iterations: -1,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// The scheduler does not call this itself; it is offered to callers
    /// that build configurations from untrusted input.
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("max_time", self.max_time),
            ("max_time_without_improvement", self.max_time_without_improvement),
            ("target_objective", self.target_objective),
        ];
        for (name, value) in thresholds {
            if value.is_nan() {
                return Err(SchedulerError::Config(format!("{name} must not be NaN")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchedulerConfig::default();
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.max_iterations_without_improvement, -1);
        assert!(config.max_time < 0.0);
        assert!(config.max_time_without_improvement < 0.0);
        assert!(config.target_objective < 0.0);
        assert!(config.log_new_incumbent);
        assert_eq!(config.log_frequency, 0);
        assert!(!config.check_each_application);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(SchedulerConfig::default().validate().is_ok());
        assert!(SchedulerConfig::unbounded().validate().is_ok());
    }

    #[test]
    fn test_validate_nan() {
        let config = SchedulerConfig::default().with_max_time(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(SchedulerError::Config(msg)) if msg.contains("max_time")
        ));
    }

    #[test]
    fn test_unbounded() {
        let config = SchedulerConfig::unbounded();
        assert!(config.max_iterations < 0);
        assert!(config.max_iterations_without_improvement < 0);
    }

    #[test]
    fn test_builder_chain() {
        let config = SchedulerConfig::default()
            .with_max_iterations(500)
            .with_max_iterations_without_improvement(50)
            .with_max_time(10.0)
            .with_max_time_without_improvement(2.5)
            .with_target_objective(0.0)
            .with_log_new_incumbent(false)
            .with_log_frequency(-1)
            .with_check_each_application(true)
            .with_seed(7);

        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.max_iterations_without_improvement, 50);
        assert!((config.max_time - 10.0).abs() < 1e-10);
        assert!((config.max_time_without_improvement - 2.5).abs() < 1e-10);
        assert_eq!(config.target_objective, 0.0);
        assert!(!config.log_new_incumbent);
        assert_eq!(config.log_frequency, -1);
        assert!(config.check_each_application);
        assert_eq!(config.seed, Some(7));
    }
}
