//! General scheduler for GVNS, GRASP, iterated greedy, LNS and similar
//! metaheuristics.
//!
//! These metaheuristics repeatedly apply a set of methods (construction
//! heuristics, local searches, shaking moves, destroy and repair
//! operators) to candidate solutions. The [`Scheduler`] performs the
//! applications and keeps the books: it tracks the incumbent solution,
//! collects per-method statistics, checks the termination criteria, and
//! writes the iteration log. Concrete algorithms implement
//! [`Metaheuristic`] and decide which method to apply next.
//!
//! # Logging
//!
//! Iteration lines go to the `tracing` target `u_scheduler::iter`,
//! reports to `u_scheduler`.

mod config;
mod logging;
mod runner;
mod selection;
mod stats;
mod termination;
mod types;

pub use config::SchedulerConfig;
pub use logging::{is_logarithmic_number, should_log, IterationRecord, ITER_TARGET};
pub use runner::{Metaheuristic, Scheduler};
pub use selection::MethodSequence;
pub use stats::{sdiv, MethodStatistics};
pub use termination::{check_termination, met_criteria, Criterion, Progress};
pub use types::{Method, MethodFn, MethodResult, Solution};
