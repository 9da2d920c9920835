//! LNS execution loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::LnsConfig;
use crate::error::{Result, SchedulerError};
use crate::scheduler::{Metaheuristic, Method, Scheduler, SchedulerConfig, Solution};

/// Large Neighborhood Search driven by destroy/repair method pairs.
///
/// Each iteration picks the next destroy and the next repair method from
/// independently shuffled, repeating sequences and applies them to a copy
/// of the current solution via
/// [`Scheduler::perform_method_pair`].
pub struct Lns<S, P = usize> {
    scheduler: Scheduler<S, P>,
    meths_ch: Vec<Method<S, P>>,
    meths_de: Vec<Method<S, P>>,
    meths_re: Vec<Method<S, P>>,
    config: LnsConfig,
    rng: StdRng,
}

impl<S: Solution, P: Clone> Lns<S, P> {
    /// Creates an LNS.
    ///
    /// # Arguments
    /// * `sol` - Template or initial solution
    /// * `meths_ch` - Construction methods, applied once each at the start
    /// * `meths_de` - Destroy methods
    /// * `meths_re` - Repair methods
    /// * `scheduler_config` - Termination and logging settings
    /// * `config` - Acceptance settings
    /// * `consider_initial_solution` - Whether `sol` is a valid incumbent
    pub fn new(
        sol: S,
        meths_ch: Vec<Method<S, P>>,
        meths_de: Vec<Method<S, P>>,
        meths_re: Vec<Method<S, P>>,
        scheduler_config: SchedulerConfig,
        config: LnsConfig,
        consider_initial_solution: bool,
    ) -> Self {
        let all: Vec<Method<S, P>> = meths_ch
            .iter()
            .chain(&meths_de)
            .chain(&meths_re)
            .cloned()
            .collect();
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Self {
            scheduler: Scheduler::new(sol, all, scheduler_config, consider_initial_solution),
            meths_ch,
            meths_de,
            meths_re,
            config,
            rng,
        }
    }

    pub fn scheduler(&self) -> &Scheduler<S, P> {
        &self.scheduler
    }

    /// Best solution found so far.
    pub fn incumbent(&self) -> &S {
        self.scheduler.incumbent()
    }

    /// Decides whether `candidate` replaces `current`.
    fn accept(&mut self, current: &S, candidate: &S, temperature: f64) -> bool {
        if candidate.is_better(current) {
            return true;
        }
        if temperature <= 0.0 {
            return false;
        }
        let delta = (candidate.objective() - current.objective()).abs();
        let accept_prob = (-delta / temperature).exp();
        self.rng.random_range(0.0..1.0) < accept_prob
    }
}

impl<S: Solution, P: Clone> Metaheuristic for Lns<S, P> {
    fn run(&mut self) -> Result<()> {
        self.config.validate()?;
        if self.meths_de.is_empty() {
            return Err(SchedulerError::NoMethods("destroy"));
        }
        if self.meths_re.is_empty() {
            return Err(SchedulerError::NoMethods("repair"));
        }
        if !self.scheduler.incumbent_valid() && self.meths_ch.is_empty() {
            return Err(SchedulerError::NoMethods("construction"));
        }

        let mut sol = self.scheduler.incumbent().clone();
        let meths_ch = self.meths_ch.clone();
        if self.scheduler.perform_sequentially(&mut sol, &meths_ch)? {
            return Ok(());
        }

        let mut destroy_seq = self.scheduler.next_method(&self.meths_de, true, true);
        let mut repair_seq = self.scheduler.next_method(&self.meths_re, true, true);
        let mut temperature = self.config.initial_temperature;
        let mut candidate = sol.clone();
        // Both sequences repeat forever over non-empty sets.
        while let (Some(destroy), Some(repair)) = (destroy_seq.next(), repair_seq.next()) {
            candidate.copy_from(&sol);
            let res = self
                .scheduler
                .perform_method_pair(&destroy, &repair, &mut candidate)?;
            if self.accept(&sol, &candidate, temperature) {
                sol.copy_from(&candidate);
            }
            if res.terminate {
                break;
            }
            temperature = (temperature * self.config.cooling_rate).max(self.config.min_temperature);
        }
        Ok(())
    }
}
