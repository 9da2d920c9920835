//! General Variable Neighborhood Search (GVNS).
//!
//! A single-solution metaheuristic that alternates random perturbations
//! (shaking) in increasingly distant neighborhoods with a systematic
//! Variable Neighborhood Descent (VND). If shaking plus VND yields an
//! improvement, the search moves there and resets to the first shaking
//! neighborhood; otherwise it proceeds to the next one.
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod runner;

pub use runner::Gvns;
