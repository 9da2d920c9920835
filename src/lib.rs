//! Generic method scheduler for metaheuristic optimization.
//!
//! Provides the bookkeeping engine shared by metaheuristics that work by
//! repeatedly applying operators ("methods") to a candidate solution,
//! and drivers built on it:
//!
//! - **Scheduler**: method application protocol, incumbent tracking,
//!   multi-criterion termination, per-method statistics, iteration log.
//! - **GVNS**: General Variable Neighborhood Search with construction,
//!   VND local improvement, and shaking methods.
//! - **LNS**: Large Neighborhood Search over destroy/repair method pairs.
//!
//! # Architecture
//!
//! The solution representation, its objective, and the operators are
//! supplied by the user through [`scheduler::Solution`] and
//! [`scheduler::Method`]. The scheduler only sees objective values and
//! delegates all comparisons to the solution, so minimization and
//! maximization are handled alike.

pub mod error;
pub mod gvns;
pub mod lns;
pub mod scheduler;

pub use error::{Result, SchedulerError};
