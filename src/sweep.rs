//! Metropolis sweep engine.
//!
//! One sweep visits every site of the chain in ascending order and applies
//! the Metropolis rule to each one. A run is a fixed number of sweeps with
//! one magnetization sample recorded after each.

use crate::chain::SpinChain;
use crate::energy::energy_difference;
use rand::Rng;

/// External field, coupling constant and inverse temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    pub field: f64,
    pub coupling: f64,
    pub beta: f64,
}

/// Returned by `metropolis_step`, allows O(1) book‑keeping in the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    pub accepted: bool,
    pub delta_m: i64, // change in Σ s (0 if rejected)
}

/// Aggregate of one full pass over the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepInfo {
    pub accepted: usize,
    pub delta_m: i64,
}

/// Emitted after every completed sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepProgress {
    pub completed: usize,
    pub total: usize,
}

impl SweepProgress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            100.0 * self.completed as f64 / self.total as f64
        }
    }
}

/// Thins sweep-boundary progress events down to roughly `steps` reports.
///
/// Thresholds are integer sweep counts `ceil(total * k / steps)`, so a report
/// fires on the first sweep at or past each one regardless of rounding.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    total: usize,
    steps: usize,
    next_step: usize,
}

impl ProgressThrottle {
    pub fn new(total: usize, steps: usize) -> Self {
        Self {
            total,
            steps: steps.max(1),
            next_step: 1,
        }
    }

    /// Report every 10% of the run.
    pub fn deciles(total: usize) -> Self {
        Self::new(total, 10)
    }

    fn threshold(&self, step: usize) -> usize {
        let num = self.total as u128 * step as u128;
        let steps = self.steps as u128;
        ((num + steps - 1) / steps) as usize
    }

    /// True when `completed` reaches a threshold not yet reported.
    pub fn should_report(&mut self, completed: usize) -> bool {
        let mut crossed = false;
        while self.next_step <= self.steps && completed >= self.threshold(self.next_step) {
            self.next_step += 1;
            crossed = true;
        }
        crossed
    }
}

/// Result of a run including acceptance counts.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub magnetization: Vec<f64>,
    pub attempted: u64,
    pub accepted: u64,
}

impl RunSummary {
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempted as f64
        }
    }
}

/// Stateless driver of Metropolis sweeps for fixed model parameters.
///
/// Nothing is carried from one run to the next: the chain and the random
/// source are supplied by the caller on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepEngine {
    params: ModelParams,
}

impl SweepEngine {
    pub fn new(params: ModelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> ModelParams {
        self.params
    }

    /// Metropolis trial for site `i`.
    ///
    /// A uniform number is drawn only when ΔE > 0. `exp(-βΔE)` underflowing
    /// to zero is a plain rejection.
    #[inline]
    pub fn metropolis_step<R: Rng + ?Sized>(
        &self,
        chain: &mut SpinChain,
        i: usize,
        rng: &mut R,
    ) -> StepInfo {
        let ModelParams {
            field,
            coupling,
            beta,
        } = self.params;
        let ene_diff = energy_difference(chain, i as i64, field, coupling);
        let accept = if ene_diff <= 0.0 {
            true
        } else {
            rng.gen::<f64>() < (-beta * ene_diff).exp()
        };

        if accept {
            let new_spin = chain.flip(i as i64);
            StepInfo {
                accepted: true,
                delta_m: 2 * new_spin as i64,
            }
        } else {
            StepInfo {
                accepted: false,
                delta_m: 0,
            }
        }
    }

    /// One pass over sites `0..n` in fixed ascending order.
    pub fn sweep<R: Rng + ?Sized>(&self, chain: &mut SpinChain, rng: &mut R) -> SweepInfo {
        let mut info = SweepInfo::default();
        for i in 0..chain.len() {
            let step = self.metropolis_step(chain, i, rng);
            if step.accepted {
                info.accepted += 1;
                info.delta_m += step.delta_m;
            }
        }
        info
    }

    /// Run `sweep_count` sweeps and collect acceptance statistics.
    ///
    /// `progress` is called once after every sweep. With `sweep_count == 0`
    /// the chain is left untouched and the series is empty.
    pub fn run_detailed<R, F>(
        &self,
        chain: &mut SpinChain,
        sweep_count: usize,
        rng: &mut R,
        mut progress: F,
    ) -> RunSummary
    where
        R: Rng + ?Sized,
        F: FnMut(SweepProgress),
    {
        let mut magnetization = Vec::with_capacity(sweep_count);
        let mut m = chain.magnetization();
        let mut accepted = 0u64;

        for isweep in 0..sweep_count {
            let info = self.sweep(chain, rng);
            m += info.delta_m;
            accepted += info.accepted as u64;
            magnetization.push(m as f64);
            progress(SweepProgress {
                completed: isweep + 1,
                total: sweep_count,
            });
        }
        debug_assert_eq!(m, chain.magnetization());

        RunSummary {
            magnetization,
            attempted: sweep_count as u64 * chain.len() as u64,
            accepted,
        }
    }

    pub fn run_with_progress<R, F>(
        &self,
        chain: &mut SpinChain,
        sweep_count: usize,
        rng: &mut R,
        progress: F,
    ) -> Vec<f64>
    where
        R: Rng + ?Sized,
        F: FnMut(SweepProgress),
    {
        self.run_detailed(chain, sweep_count, rng, progress)
            .magnetization
    }

    /// Magnetization series of `sweep_count` sweeps, no progress reporting.
    pub fn run<R: Rng + ?Sized>(
        &self,
        chain: &mut SpinChain,
        sweep_count: usize,
        rng: &mut R,
    ) -> Vec<f64> {
        self.run_with_progress(chain, sweep_count, rng, |_| {})
    }
}

/// Free-standing form of [`SweepEngine::run_with_progress`].
pub fn run<R, F>(
    config: &mut SpinChain,
    field: f64,
    coupling: f64,
    beta: f64,
    sweep_count: usize,
    rng: &mut R,
    progress: F,
) -> Vec<f64>
where
    R: Rng + ?Sized,
    F: FnMut(SweepProgress),
{
    SweepEngine::new(ModelParams {
        field,
        coupling,
        beta,
    })
    .run_with_progress(config, sweep_count, rng, progress)
}
