//! Scheduler core: method application, incumbent tracking, termination.
//!
//! # Method Application
//!
//! Each call of [`Scheduler::perform_method`] is one iteration:
//!
//! 1. Remember the objective value of the solution
//! 2. Apply the method and measure its time
//! 3. Optionally run the solution's self-check
//! 4. Update the method's statistics (success and brutto time may be
//!    deferred to [`Scheduler::delayed_success_update`])
//! 5. Count the iteration and update the incumbent
//! 6. Check termination, write the iteration log line
//!
//! [`Scheduler::perform_method_pair`] does the same for a destroy and a
//! repair method applied back to back as one iteration.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::config::SchedulerConfig;
use super::logging::{self, IterationRecord, INITIAL_METHOD, ITER_TARGET};
use super::selection::MethodSequence;
use super::stats::{self, MethodStatistics};
use super::termination::{self, Progress};
use super::types::{Method, MethodResult, Solution};
use crate::error::{Result, SchedulerError};

/// Drives a metaheuristic built on a [`Scheduler`].
pub trait Metaheuristic {
    /// Performs the optimization.
    fn run(&mut self) -> Result<()>;
}

/// Bookkeeping engine shared by all scheduler-based metaheuristics.
///
/// Holds the incumbent (the best solution seen so far), the iteration
/// counter, and one [`MethodStatistics`] per configured method. Concrete
/// algorithms own a `Scheduler` and call into it from their
/// [`Metaheuristic::run`].
pub struct Scheduler<S, P = usize> {
    config: SchedulerConfig,
    incumbent: S,
    incumbent_valid: bool,
    incumbent_iteration: usize,
    incumbent_time: Duration,
    methods: Vec<Method<S, P>>,
    stats: Vec<(String, MethodStatistics)>,
    index: HashMap<String, usize>,
    iteration: usize,
    time_start: Instant,
    run_time: Option<Duration>,
    rng: StdRng,
}

impl<S: Solution, P: Clone> Scheduler<S, P> {
    /// Creates a scheduler.
    ///
    /// # Arguments
    /// * `solution` - Template for the incumbent
    /// * `methods` - All methods that may be performed; names must be unique
    /// * `config` - Termination and logging settings
    /// * `consider_initial_solution` - If set, `solution` is a valid
    ///   incumbent to improve upon; otherwise it is just a template
    pub fn new(
        solution: S,
        methods: Vec<Method<S, P>>,
        config: SchedulerConfig,
        consider_initial_solution: bool,
    ) -> Self {
        let stats: Vec<(String, MethodStatistics)> = methods
            .iter()
            .map(|m| (m.name().to_string(), MethodStatistics::default()))
            .collect();
        let index = stats
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        debug!(target: "u_scheduler", ?config, methods = stats.len(), "scheduler created");

        let scheduler = Self {
            config,
            incumbent: solution,
            incumbent_valid: consider_initial_solution,
            incumbent_iteration: 0,
            incumbent_time: Duration::ZERO,
            methods,
            stats,
            index,
            iteration: 0,
            time_start: Instant::now(),
            run_time: None,
            rng,
        };
        scheduler.log_iteration_header();
        if scheduler.incumbent_valid {
            scheduler.log_iteration(INITIAL_METHOD, &scheduler.incumbent, true, true, None);
        }
        scheduler
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// All methods the scheduler was created with.
    pub fn methods(&self) -> &[Method<S, P>] {
        &self.methods
    }

    pub fn incumbent(&self) -> &S {
        &self.incumbent
    }

    pub fn incumbent_valid(&self) -> bool {
        self.incumbent_valid
    }

    /// Iteration in which the incumbent was found.
    pub fn incumbent_iteration(&self) -> usize {
        self.incumbent_iteration
    }

    /// Time since the start at which the incumbent was found.
    pub fn incumbent_time(&self) -> Duration {
        self.incumbent_time
    }

    /// Number of completed method applications (a pair counts once).
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Total run time, fixed when termination first fired.
    pub fn run_time(&self) -> Option<Duration> {
        self.run_time
    }

    /// Time since the scheduler was created.
    pub fn elapsed(&self) -> Duration {
        self.time_start.elapsed()
    }

    pub fn method_statistics(&self, name: &str) -> Option<&MethodStatistics> {
        self.index.get(name).map(|&i| &self.stats[i].1)
    }

    /// Statistics of all methods in configuration order.
    pub fn statistics(&self) -> impl Iterator<Item = (&str, &MethodStatistics)> + Clone {
        self.stats.iter().map(|(name, ms)| (name.as_str(), ms))
    }

    /// Replaces the incumbent by `sol` if there is none yet or `sol` is better.
    ///
    /// Returns `true` if the incumbent was replaced.
    pub fn update_incumbent(&mut self, sol: &S, current_time: Duration) -> bool {
        if !self.incumbent_valid || sol.is_better(&self.incumbent) {
            self.incumbent.copy_from(sol);
            self.incumbent_iteration = self.iteration;
            self.incumbent_time = current_time;
            self.incumbent_valid = true;
            true
        } else {
            false
        }
    }

    /// Returns a sequence over `methods`, see [`MethodSequence`].
    ///
    /// Shuffling draws from the scheduler's seeded generator, so runs
    /// with the same seed see the same method order.
    pub fn next_method(
        &mut self,
        methods: &[Method<S, P>],
        randomize: bool,
        repeat: bool,
    ) -> MethodSequence<S, P> {
        MethodSequence::with_rng(methods, randomize, repeat, StdRng::from_rng(&mut self.rng))
    }

    /// Applies `method` to `sol` as one iteration.
    ///
    /// With `delayed_success` the brutto time and the success are not
    /// accounted now but by a later call of
    /// [`delayed_success_update`](Self::delayed_success_update).
    ///
    /// # Errors
    ///
    /// [`SchedulerError::UnknownMethod`] if `method` was not given at
    /// construction, [`SchedulerError::InvalidSolution`] if the self-check
    /// is enabled and fails.
    pub fn perform_method(
        &mut self,
        method: &Method<S, P>,
        sol: &mut S,
        delayed_success: bool,
    ) -> Result<MethodResult> {
        let idx = self.stat_index(method.name())?;
        let mut res = MethodResult::default();
        let obj_old = sol.objective();

        let t_start = Instant::now();
        method.apply(sol, &mut res);
        let t_end = Instant::now();
        self.check_solution(method.name(), sol)?;

        let ms = &mut self.stats[idx].1;
        let netto = t_end - t_start;
        ms.applications += 1;
        ms.netto_time += netto;
        if !delayed_success {
            ms.brutto_time += netto;
            let obj_new = sol.objective();
            if sol.is_better_objective(obj_new, obj_old) {
                ms.record_success(obj_old, obj_new);
            }
        }

        Ok(self.finish_iteration(method.name(), sol, t_end, res))
    }

    /// Applies a destroy and then a repair method to `sol` as one iteration.
    ///
    /// Each method is charged its own time. Success is judged once on the
    /// objective before destroying and after repairing, and an improvement
    /// is credited to both methods alike.
    pub fn perform_method_pair(
        &mut self,
        destroy: &Method<S, P>,
        repair: &Method<S, P>,
        sol: &mut S,
    ) -> Result<MethodResult> {
        let d_idx = self.stat_index(destroy.name())?;
        let r_idx = self.stat_index(repair.name())?;
        let name = format!("{}+{}", destroy.name(), repair.name());
        let mut res = MethodResult::default();
        let obj_old = sol.objective();

        let t_start = Instant::now();
        destroy.apply(sol, &mut res);
        let t_destroyed = Instant::now();
        repair.apply(sol, &mut res);
        let t_end = Instant::now();
        self.check_solution(&name, sol)?;

        let obj_new = sol.objective();
        let improved = sol.is_better_objective(obj_new, obj_old);
        for (idx, spent) in [(d_idx, t_destroyed - t_start), (r_idx, t_end - t_destroyed)] {
            let ms = &mut self.stats[idx].1;
            ms.applications += 1;
            ms.netto_time += spent;
            ms.brutto_time += spent;
            if improved {
                ms.record_success(obj_old, obj_new);
            }
        }

        Ok(self.finish_iteration(&name, sol, t_end, res))
    }

    /// Completes the accounting of an application performed with
    /// `delayed_success`.
    ///
    /// Must be called exactly once per deferred application.
    ///
    /// # Arguments
    /// * `method` - The method applied earlier
    /// * `obj_old` - Objective value before the method was applied
    /// * `t_start` - When the application started
    /// * `sol` - Solution regarded as the method's final result
    pub fn delayed_success_update(
        &mut self,
        method: &Method<S, P>,
        obj_old: f64,
        t_start: Instant,
        sol: &S,
    ) -> Result<()> {
        let idx = self.stat_index(method.name())?;
        let ms = &mut self.stats[idx].1;
        ms.brutto_time += t_start.elapsed();
        let obj_new = sol.objective();
        if sol.is_better_objective(obj_new, obj_old) {
            ms.record_success(obj_old, obj_new);
        }
        Ok(())
    }

    /// Applies `methods` once each in the given order.
    ///
    /// Returns `true` if termination fired, in which case the remaining
    /// methods are skipped.
    pub fn perform_sequentially(&mut self, sol: &mut S, methods: &[Method<S, P>]) -> Result<bool> {
        for m in self.next_method(methods, false, false) {
            if self.perform_method(&m, sol, false)?.terminate {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns `true` if any enabled termination criterion holds now.
    pub fn check_termination(&self) -> bool {
        termination::check_termination(&self.config, &self.progress())
    }

    /// Writes the iteration log column header.
    pub fn log_iteration_header(&self) {
        info!(target: ITER_TARGET, "{}", logging::header());
    }

    /// Writes an iteration log line if the log settings ask for one.
    ///
    /// `in_any_case` bypasses the filter.
    pub fn log_iteration(
        &self,
        method_name: &str,
        sol: &S,
        new_incumbent: bool,
        in_any_case: bool,
        log_info: Option<&str>,
    ) {
        let log = logging::should_log(
            self.iteration,
            self.config.log_frequency,
            self.config.log_new_incumbent,
            new_incumbent,
            in_any_case,
        );
        if log {
            let record = IterationRecord {
                iteration: self.iteration,
                best: self.incumbent.objective(),
                current: sol.objective(),
                elapsed: self.elapsed(),
                method: method_name,
                info: log_info,
            };
            info!(target: ITER_TARGET, "{}", record);
        }
    }

    /// Renders the per-method statistics table.
    pub fn method_statistics_report(&self) -> String {
        stats::render_report(self.statistics(), self.total_time())
    }

    pub fn log_method_statistics(&self) {
        info!(target: "u_scheduler", "{}", self.method_statistics_report());
    }

    fn total_time(&self) -> Duration {
        self.run_time.unwrap_or_else(|| self.elapsed())
    }

    fn progress(&self) -> Progress<'_, S> {
        Progress {
            iteration: self.iteration,
            elapsed: self.elapsed(),
            incumbent: &self.incumbent,
            incumbent_valid: self.incumbent_valid,
            incumbent_iteration: self.incumbent_iteration,
            incumbent_time: self.incumbent_time,
        }
    }

    fn stat_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| SchedulerError::UnknownMethod(name.to_string()))
    }

    fn check_solution(&self, method_name: &str, sol: &S) -> Result<()> {
        if !self.config.check_each_application {
            return Ok(());
        }
        sol.check().map_err(|reason| SchedulerError::InvalidSolution {
            method: method_name.to_string(),
            reason,
        })
    }

    fn finish_iteration(
        &mut self,
        method_name: &str,
        sol: &S,
        t_end: Instant,
        mut res: MethodResult,
    ) -> MethodResult {
        self.iteration += 1;
        let new_incumbent = self.update_incumbent(sol, t_end - self.time_start);
        let met = termination::met_criteria(&self.config, &self.progress());
        let terminate = !met.is_empty();
        if terminate {
            if self.run_time.is_none() {
                let run_time = self.elapsed();
                self.run_time = Some(run_time);
                debug!(
                    target: "u_scheduler",
                    iteration = self.iteration,
                    criterion = %met[0],
                    run_time = run_time.as_secs_f64(),
                    "termination"
                );
            }
            res.terminate = true;
        }
        self.log_iteration(method_name, sol, new_incumbent, terminate, res.log_info.as_deref());
        res
    }
}

impl<S: Solution + fmt::Debug, P: Clone> Scheduler<S, P> {
    /// Renders the main results of the run.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::InvalidSolution`] if the incumbent fails its
    /// self-check.
    pub fn main_results_report(&self) -> Result<String> {
        self.incumbent
            .check()
            .map_err(|reason| SchedulerError::InvalidSolution {
                method: INITIAL_METHOD.to_string(),
                reason,
            })?;
        Ok(format!(
            "best solution: {:?}\nbest obj: {}\nbest iteration: {}\ntotal iterations: {}\n\
             best time [s]: {:.3}\ntotal time [s]: {:.4}\n",
            self.incumbent,
            self.incumbent.objective(),
            self.incumbent_iteration,
            self.iteration,
            self.incumbent_time.as_secs_f64(),
            self.total_time().as_secs_f64(),
        ))
    }

    pub fn log_main_results(&self) -> Result<()> {
        let report = self.main_results_report()?;
        info!(target: "u_scheduler", "{}", report);
        Ok(())
    }
}
