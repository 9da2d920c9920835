//! General Variable Neighborhood Search on top of the scheduler.
//!
//! # Algorithm
//!
//! 1. Copy the incumbent, apply all construction methods in order
//! 2. Improve the result by VND
//! 3. While no termination criterion holds:
//!    a. **Shaking**: apply the next shaking method to a copy x' of x
//!    b. **VND**: improve x' with the local improvement methods
//!    c. **Move or not**: if x' is better than x, set x = x' and restart
//!    with the first shaking method; otherwise continue with the next one
//!
//! The success of a shaking method is judged after its VND, and the VND
//! time is booked as the shaking method's brutto time.
//!
//! # Reference
//!
//! Hansen, P., Mladenović, N. & Moreno Pérez, J. A. (2010). "Variable
//! neighbourhood search: methods and applications", *Annals of Operations
//! Research* 175(1), 367-407.

use std::time::Instant;

use crate::error::{Result, SchedulerError};
use crate::scheduler::{Metaheuristic, Method, Scheduler, SchedulerConfig, Solution};

/// A GVNS with construction, local improvement and shaking methods.
///
/// Using randomized construction methods and no shaking methods turns
/// this into a GRASP-like construct-and-improve scheme when run repeatedly.
pub struct Gvns<S, P = usize> {
    scheduler: Scheduler<S, P>,
    meths_ch: Vec<Method<S, P>>,
    meths_li: Vec<Method<S, P>>,
    meths_sh: Vec<Method<S, P>>,
}

impl<S: Solution, P: Clone> Gvns<S, P> {
    /// Creates a GVNS.
    ///
    /// # Arguments
    /// * `sol` - Template or initial solution
    /// * `meths_ch` - Construction methods, applied once each at the start
    /// * `meths_li` - Local improvement methods used by VND
    /// * `meths_sh` - Shaking methods
    /// * `config` - Scheduler configuration
    /// * `consider_initial_solution` - Whether `sol` is a valid incumbent
    pub fn new(
        sol: S,
        meths_ch: Vec<Method<S, P>>,
        meths_li: Vec<Method<S, P>>,
        meths_sh: Vec<Method<S, P>>,
        config: SchedulerConfig,
        consider_initial_solution: bool,
    ) -> Self {
        let all: Vec<Method<S, P>> = meths_ch
            .iter()
            .chain(&meths_li)
            .chain(&meths_sh)
            .cloned()
            .collect();
        Self {
            scheduler: Scheduler::new(sol, all, config, consider_initial_solution),
            meths_ch,
            meths_li,
            meths_sh,
        }
    }

    pub fn scheduler(&self) -> &Scheduler<S, P> {
        &self.scheduler
    }

    /// Best solution found so far.
    pub fn incumbent(&self) -> &S {
        self.scheduler.incumbent()
    }

    /// Variable neighborhood descent on `sol`.
    ///
    /// Cycles through the local improvement methods and restarts with the
    /// first one after every improvement. Returns `true` if termination
    /// fired.
    pub fn vnd(&mut self, sol: &mut S) -> Result<bool> {
        let mut sol2 = sol.clone();
        'descent: loop {
            for m in self.scheduler.next_method(&self.meths_li, false, false) {
                let res = self.scheduler.perform_method(&m, &mut sol2, false)?;
                if sol2.is_better(sol) {
                    sol.copy_from(&sol2);
                    if res.terminate {
                        return Ok(true);
                    }
                    continue 'descent;
                }
                if res.terminate {
                    return Ok(true);
                }
                if res.changed {
                    sol2.copy_from(sol);
                }
            }
            // Local optimum with respect to all neighborhoods.
            return Ok(false);
        }
    }

    /// Shaking and VND until termination, starting from `sol`.
    pub fn gvns(&mut self, sol: &mut S) -> Result<()> {
        if self.vnd(sol)? || self.meths_sh.is_empty() {
            return Ok(());
        }
        let use_vnd = !self.meths_li.is_empty();
        let mut sol2 = sol.clone();
        'shaking: loop {
            for m in self.scheduler.next_method(&self.meths_sh, false, true) {
                let obj_old = sol.objective();
                let t_start = Instant::now();
                let res = self.scheduler.perform_method(&m, &mut sol2, use_vnd)?;
                let mut terminate = res.terminate;
                if use_vnd {
                    if !terminate {
                        terminate = self.vnd(&mut sol2)?;
                    }
                    self.scheduler
                        .delayed_success_update(&m, obj_old, t_start, &sol2)?;
                }
                if sol2.is_better(sol) {
                    sol.copy_from(&sol2);
                    if terminate {
                        return Ok(());
                    }
                    continue 'shaking;
                }
                if terminate {
                    return Ok(());
                }
                sol2.copy_from(sol);
            }
            // Only reached if the repeating sequence yields nothing.
            return Ok(());
        }
    }
}

impl<S: Solution, P: Clone> Metaheuristic for Gvns<S, P> {
    fn run(&mut self) -> Result<()> {
        if !self.scheduler.incumbent_valid() && self.meths_ch.is_empty() {
            return Err(SchedulerError::NoMethods("construction"));
        }
        let mut sol = self.scheduler.incumbent().clone();
        let meths_ch = self.meths_ch.clone();
        if self.scheduler.perform_sequentially(&mut sol, &meths_ch)? {
            return Ok(());
        }
        self.gvns(&mut sol)
    }
}
