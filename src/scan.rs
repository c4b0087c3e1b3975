//! Field scan: one independent Metropolis run per external-field value.
//!
//! Field values run in parallel on rayon. Each gets its own chain and its own
//! ChaCha20 stream (`set_stream(field_index)` on a shared base seed), so the
//! result for a given seed does not depend on thread scheduling.

use crate::chain::SpinChain;
use crate::config::Config;
use crate::error::IsingError;
use crate::sweep::{ModelParams, ProgressThrottle, SweepEngine};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

/// Magnetization series for one field value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRow {
    pub field: f64,
    pub magnetization: Vec<f64>,
    pub acceptance_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub temperature: f64,
    pub seed: u64,
    pub rows: Vec<ScanRow>,
}

impl ScanResult {
    /// (rows, columns) of the magnetization table.
    pub fn shape(&self) -> (usize, usize) {
        let cols = self.rows.first().map_or(0, |r| r.magnetization.len());
        (self.rows.len(), cols)
    }
}

/// Events forwarded to the presentation layer while a scan runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// A run is about to start.
    Setup {
        field_index: usize,
        num_spin: usize,
        params: ModelParams,
    },
    /// Roughly every 10% of a run's sweeps.
    Progress { field_index: usize, percent: f64 },
    /// A run finished and its row is ready.
    FieldDone { field_index: usize },
}

/// RNG for the `field_index`-th run of a scan seeded with `seed`.
pub fn field_rng(seed: u64, field_index: usize) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(field_index as u64);
    rng
}

/// Run the whole scan described by `cfg`.
///
/// `on_event` is called from worker threads; it must be cheap and `Sync`.
pub fn run_scan<F>(cfg: &Config, on_event: F) -> Result<ScanResult, IsingError>
where
    F: Fn(ScanEvent) + Sync,
{
    cfg.validate()?;
    let beta = cfg.beta()?;
    let seed = cfg
        .seed
        .unwrap_or_else(|| ChaCha20Rng::from_entropy().next_u64());
    let fields = cfg.field_values();

    let rows = fields
        .par_iter()
        .enumerate()
        .map(|(field_index, &field)| -> Result<ScanRow, IsingError> {
            let mut rng = field_rng(seed, field_index);
            let mut chain = SpinChain::half_flipped_with(&mut rng, cfg.num_spin)?;

            let params = ModelParams {
                field,
                coupling: cfg.coupling,
                beta,
            };
            on_event(ScanEvent::Setup {
                field_index,
                num_spin: chain.len(),
                params,
            });

            let mut throttle = ProgressThrottle::deciles(cfg.num_sweeps);
            let summary = SweepEngine::new(params).run_detailed(
                &mut chain,
                cfg.num_sweeps,
                &mut rng,
                |p| {
                    if throttle.should_report(p.completed) {
                        on_event(ScanEvent::Progress {
                            field_index,
                            percent: p.percent(),
                        });
                    }
                },
            );

            on_event(ScanEvent::FieldDone { field_index });
            Ok(ScanRow {
                field,
                acceptance_rate: summary.acceptance_rate(),
                magnetization: summary.magnetization,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScanResult {
        temperature: cfg.temperature,
        seed,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn small_config() -> Config {
        Config {
            temperature: 2.0,
            num_spin: 12,
            num_sweeps: 30,
            num_field: 5,
            seed: Some(99),
            ..Config::default()
        }
    }

    #[test]
    fn rows_follow_field_grid() {
        let cfg = small_config();
        let result = run_scan(&cfg, |_| {}).unwrap();
        assert_eq!(result.shape(), (5, 30));
        assert_eq!(result.seed, 99);
        let fields: Vec<f64> = result.rows.iter().map(|r| r.field).collect();
        assert_eq!(fields, cfg.field_values());
    }

    #[test]
    fn seeded_scan_is_reproducible() {
        let cfg = small_config();
        let a = run_scan(&cfg, |_| {}).unwrap();
        let b = run_scan(&cfg, |_| {}).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn events_cover_every_field() {
        let cfg = small_config();
        let setups = AtomicUsize::new(0);
        let done = AtomicUsize::new(0);
        let progress = AtomicUsize::new(0);
        run_scan(&cfg, |ev| match ev {
            ScanEvent::Setup { .. } => {
                setups.fetch_add(1, Ordering::Relaxed);
            }
            ScanEvent::Progress { .. } => {
                progress.fetch_add(1, Ordering::Relaxed);
            }
            ScanEvent::FieldDone { .. } => {
                done.fetch_add(1, Ordering::Relaxed);
            }
        })
        .unwrap();
        assert_eq!(setups.into_inner(), 5);
        assert_eq!(done.into_inner(), 5);
        assert_eq!(progress.into_inner(), 5 * 10);
    }

    #[test]
    fn invalid_temperature_aborts_scan() {
        let cfg = Config {
            temperature: 0.0,
            ..small_config()
        };
        assert!(matches!(
            run_scan(&cfg, |_| {}),
            Err(IsingError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn distinct_streams_per_field() {
        let mut a = field_rng(5, 0);
        let mut b = field_rng(5, 1);
        assert_ne!(a.next_u64(), b.next_u64());
    }
}
