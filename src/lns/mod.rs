//! Large Neighborhood Search (LNS) framework.
//!
//! LNS iteratively destroys part of a solution and repairs it again,
//! using a portfolio of destroy and repair methods applied in randomized
//! round-robin order. Each destroy/repair pair counts as one scheduler
//! iteration and is judged as a unit.
//!
//! # References
//!
//! Shaw, P. (1998), "Using Constraint Programming and Local Search Methods
//! to Solve Vehicle Routing Problems"; Pisinger & Ropke (2010), "Large
//! Neighborhood Search", *Handbook of Metaheuristics*.

mod config;
mod runner;

pub use config::LnsConfig;
pub use runner::Lns;
