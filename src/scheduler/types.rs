//! Core types for the method scheduler.

use std::fmt;
use std::sync::Arc;

/// A candidate solution the scheduler can work on.
///
/// The scheduler never looks inside a solution. It only asks for the
/// objective value and delegates every comparison to the solution itself,
/// so the same scheduler handles minimization and maximization.
///
/// # Examples
///
/// ```
/// use u_scheduler::scheduler::Solution;
///
/// #[derive(Clone, Debug)]
/// struct OneMax(Vec<bool>);
///
/// impl Solution for OneMax {
///     fn objective(&self) -> f64 {
///         self.0.iter().filter(|&&b| b).count() as f64
///     }
///
///     fn to_maximize(&self) -> bool {
///         true
///     }
/// }
///
/// let a = OneMax(vec![true, false]);
/// let b = OneMax(vec![true, true]);
/// assert!(b.is_better(&a));
/// ```
pub trait Solution: Clone {
    /// Returns the objective value of the solution.
    fn objective(&self) -> f64;

    /// Returns `true` for maximization problems. Defaults to minimization.
    fn to_maximize(&self) -> bool {
        false
    }

    /// Returns `true` if objective `a` is strictly better than `b`.
    fn is_better_objective(&self, a: f64, b: f64) -> bool {
        if self.to_maximize() {
            a > b
        } else {
            a < b
        }
    }

    /// Returns `true` if objective `a` is strictly worse than `b`.
    fn is_worse_objective(&self, a: f64, b: f64) -> bool {
        if self.to_maximize() {
            a < b
        } else {
            a > b
        }
    }

    /// Returns `true` if this solution is strictly better than `other`.
    fn is_better(&self, other: &Self) -> bool {
        self.is_better_objective(self.objective(), other.objective())
    }

    /// Overwrites this solution's state with the state of `other`.
    fn copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }

    /// Checks the solution's internal invariants.
    ///
    /// Returns a description of the first violated invariant.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Outcome flags of a single method application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodResult {
    /// `false` if the method left the solution unchanged.
    pub changed: bool,
    /// `true` once a termination criterion has been met.
    pub terminate: bool,
    /// Free-form text appended to the iteration log line.
    pub log_info: Option<String>,
}

impl Default for MethodResult {
    fn default() -> Self {
        Self {
            changed: true,
            terminate: false,
            log_info: None,
        }
    }
}

/// Signature of an operator applied by the scheduler.
pub type MethodFn<S, P> = dyn Fn(&mut S, &P, &mut MethodResult) + Send + Sync;

/// A named operator together with the parameter it is called with.
///
/// The name identifies the method in the statistics and must be unique
/// among all methods handed to one [`Scheduler`](super::Scheduler).
/// Cloning is cheap; the operator is shared.
pub struct Method<S, P = usize> {
    name: String,
    func: Arc<MethodFn<S, P>>,
    par: P,
}

impl<S, P> Method<S, P> {
    pub fn new<F>(name: impl Into<String>, func: F, par: P) -> Self
    where
        F: Fn(&mut S, &P, &mut MethodResult) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
            par,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn par(&self) -> &P {
        &self.par
    }

    /// Calls the operator on `solution`.
    pub fn apply(&self, solution: &mut S, result: &mut MethodResult) {
        (self.func)(solution, &self.par, result);
    }
}

impl<S, P: Clone> Clone for Method<S, P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
            par: self.par.clone(),
        }
    }
}

impl<S, P: fmt::Debug> fmt::Debug for Method<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("par", &self.par)
            .finish_non_exhaustive()
    }
}
