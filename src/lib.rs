pub mod error;
pub mod chain;
pub mod energy;
pub mod sweep;
pub mod config;
pub mod scan;
pub mod output;

pub use chain::SpinChain;
pub use energy::energy_difference;
pub use error::IsingError;
pub use sweep::{ModelParams, SweepEngine, SweepProgress};
