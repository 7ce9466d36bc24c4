//! Energy bookkeeping: adaptive cooling of the step size and staleness detection.

/// Solver state carried across iterations of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineState {
    /// Sum of squared net-force magnitudes in the latest iteration.
    pub energy: f64,
    pub previous_energy: f64,
    /// Scale applied to the force buffer when positions are updated.
    pub step_size: f64,
    /// Consecutive improving iterations since the step size last changed upward.
    pub cooling_progress: usize,
    /// Consecutive iterations with relative energy change under the stale threshold.
    pub stale_count: usize,
    /// Force evaluations performed since the run started.
    pub iteration: usize,
    pub converged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cooling {
    /// Energy improved, but the streak is not long enough yet.
    Progress,
    SpedUp,
    SlowedDown,
}

impl EngineState {
    pub(crate) fn new(init_step_size: f64) -> Self {
        Self {
            energy: 0.0,
            previous_energy: 0.0,
            step_size: init_step_size,
            cooling_progress: 0,
            stale_count: 0,
            iteration: 0,
            converged: false,
        }
    }

    pub(crate) fn record_energy(&mut self, energy: f64) {
        self.previous_energy = self.energy;
        self.energy = energy;
    }

    pub fn improved(&self) -> bool {
        self.energy < self.previous_energy
    }

    pub(crate) fn cool(&mut self, cooling_factor: f64, max_cooling_exponent: usize) -> Cooling {
        if self.improved() {
            self.cooling_progress += 1;
            if self.cooling_progress >= max_cooling_exponent {
                self.cooling_progress = 0;
                self.step_size /= cooling_factor;
                return Cooling::SpedUp;
            }
            Cooling::Progress
        } else {
            self.cooling_progress = 0;
            self.step_size *= cooling_factor;
            Cooling::SlowedDown
        }
    }

    /// Updates the stale streak for iteration `t` and reports whether it exceeded `max_stale`.
    pub(crate) fn check_stale(
        &mut self,
        t: usize,
        min_iterations: usize,
        stale_threshold: f64,
        max_stale: usize,
    ) -> bool {
        if t < min_iterations || self.energy == 0.0 || self.previous_energy == 0.0 {
            return false;
        }
        let delta = ((self.energy - self.previous_energy) / self.previous_energy).abs();
        if delta < stale_threshold {
            self.stale_count += 1;
            self.stale_count > max_stale
        } else {
            self.stale_count = 0;
            false
        }
    }
}
