//! Termination criteria.

use std::fmt;
use std::time::Duration;

use super::config::SchedulerConfig;
use super::types::Solution;

/// A termination criterion of [`SchedulerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    MaxIterations,
    MaxIterationsWithoutImprovement,
    MaxTime,
    MaxTimeWithoutImprovement,
    TargetObjective,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Criterion::MaxIterations => "iteration limit",
            Criterion::MaxIterationsWithoutImprovement => "iteration limit without improvement",
            Criterion::MaxTime => "time limit",
            Criterion::MaxTimeWithoutImprovement => "time limit without improvement",
            Criterion::TargetObjective => "target objective",
        };
        f.write_str(s)
    }
}

/// Snapshot of the run state the criteria are evaluated on.
#[derive(Debug, Clone)]
pub struct Progress<'a, S> {
    pub iteration: usize,
    /// Time since the run started.
    pub elapsed: Duration,
    pub incumbent: &'a S,
    pub incumbent_valid: bool,
    pub incumbent_iteration: usize,
    /// Time since the run started at which the incumbent was found.
    pub incumbent_time: Duration,
}

/// Returns all criteria that currently hold, in declaration order.
///
/// Every criterion is evaluated; the result is empty if the run goes on.
pub fn met_criteria<S: Solution>(config: &SchedulerConfig, p: &Progress<'_, S>) -> Vec<Criterion> {
    let iteration = p.iteration as i64;
    let stale_iterations = p.iteration.saturating_sub(p.incumbent_iteration) as i64;
    let elapsed = p.elapsed.as_secs_f64();
    let stale_time = p.elapsed.saturating_sub(p.incumbent_time).as_secs_f64();
    let target = config.target_objective;

    let checks = [
        (
            Criterion::MaxIterations,
            0 <= config.max_iterations && config.max_iterations <= iteration,
        ),
        (
            Criterion::MaxIterationsWithoutImprovement,
            0 <= config.max_iterations_without_improvement
                && config.max_iterations_without_improvement <= stale_iterations,
        ),
        (
            Criterion::MaxTime,
            0.0 <= config.max_time && config.max_time <= elapsed,
        ),
        (
            Criterion::MaxTimeWithoutImprovement,
            0.0 <= config.max_time_without_improvement
                && config.max_time_without_improvement <= stale_time,
        ),
        (
            Criterion::TargetObjective,
            0.0 <= target
                && p.incumbent_valid
                && !p
                    .incumbent
                    .is_worse_objective(p.incumbent.objective(), target),
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(criterion, met)| met.then_some(criterion))
        .collect()
}

/// Returns `true` if any enabled criterion holds.
pub fn check_termination<S: Solution>(config: &SchedulerConfig, p: &Progress<'_, S>) -> bool {
    !met_criteria(config, p).is_empty()
}
