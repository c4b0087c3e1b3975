//! Run configuration for a field scan (single source of truth).

use crate::error::IsingError;
use std::path::PathBuf;

pub const NUM_SPIN: usize = 100;
pub const NUM_SWEEP: usize = 20_000;
pub const NUM_FIELD: usize = 51;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub temperature: f64,
    pub num_spin: usize,
    pub num_sweeps: usize,
    pub num_field: usize,
    pub field_min: f64,
    pub field_max: f64,
    pub coupling: f64,
    /// Base seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            num_spin: NUM_SPIN,
            num_sweeps: NUM_SWEEP,
            num_field: NUM_FIELD,
            field_min: -2.0,
            field_max: 2.0,
            coupling: 1.0,
            seed: None,
            output_dir: PathBuf::from("data"),
            verbose: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), IsingError> {
        inverse_temperature(self.temperature)?;
        if self.num_spin == 0 {
            return Err(IsingError::InvalidArgument(
                "num_spin must be at least 1".into(),
            ));
        }
        if self.num_field == 0 {
            return Err(IsingError::InvalidArgument(
                "num_field must be at least 1".into(),
            ));
        }
        if !self.field_min.is_finite() || !self.field_max.is_finite() {
            return Err(IsingError::InvalidArgument(format!(
                "field range [{}, {}] must be finite",
                self.field_min, self.field_max
            )));
        }
        if self.field_min > self.field_max {
            return Err(IsingError::InvalidArgument(format!(
                "field_min {} exceeds field_max {}",
                self.field_min, self.field_max
            )));
        }
        if !self.coupling.is_finite() {
            return Err(IsingError::InvalidArgument(format!(
                "coupling {} must be finite",
                self.coupling
            )));
        }
        Ok(())
    }

    pub fn beta(&self) -> Result<f64, IsingError> {
        inverse_temperature(self.temperature)
    }

    /// Evenly spaced field values from `field_min` to `field_max` inclusive.
    pub fn field_values(&self) -> Vec<f64> {
        linspace(self.field_min, self.field_max, self.num_field)
    }
}

/// β = 1 / T. Zero, negative and non-finite temperatures are rejected.
pub fn inverse_temperature(temperature: f64) -> Result<f64, IsingError> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(IsingError::InvalidTemperature(temperature));
    }
    Ok(1.0 / temperature)
}

/// Sweep count from a signed request; negative counts are an error.
pub fn sweep_count(requested: i64) -> Result<usize, IsingError> {
    usize::try_from(requested).map_err(|_| {
        IsingError::InvalidArgument(format!("sweep count {requested} must be non-negative"))
    })
}

/// `n` points from `start` to `stop`; the end points are exact.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut vals: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            vals[n - 1] = stop;
            vals
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_matches_constants() {
        let cfg = Config::default();
        let fields = cfg.field_values();
        assert_eq!(fields.len(), NUM_FIELD);
        assert_eq!(fields[0], -2.0);
        assert_eq!(fields[NUM_FIELD - 1], 2.0);
        assert!((fields[25]).abs() < 1e-12);
        assert!((fields[1] - fields[0] - 0.08).abs() < 1e-12);
    }

    #[test]
    fn zero_temperature_fails_fast() {
        assert!(matches!(
            inverse_temperature(0.0),
            Err(IsingError::InvalidTemperature(_))
        ));
        assert!(inverse_temperature(-1.0).is_err());
        assert!(inverse_temperature(f64::NAN).is_err());
        assert!(inverse_temperature(f64::INFINITY).is_err());
        assert_eq!(inverse_temperature(2.0).unwrap(), 0.5);
    }

    #[test]
    fn negative_sweep_count_is_invalid() {
        assert!(matches!(
            sweep_count(-1),
            Err(IsingError::InvalidArgument(_))
        ));
        assert_eq!(sweep_count(0).unwrap(), 0);
        assert_eq!(sweep_count(20_000).unwrap(), 20_000);
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        let mut cfg = Config::default();
        assert!(cfg.validate().is_ok());

        cfg.field_min = 3.0;
        assert!(cfg.validate().is_err());

        let cfg = Config {
            num_spin: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = Config {
            num_field: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = Config {
            temperature: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(IsingError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn single_point_grid_is_start() {
        assert_eq!(linspace(0.5, 1.0, 1), vec![0.5]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
