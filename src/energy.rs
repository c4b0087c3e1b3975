//! Single-spin-flip energy change for the periodic Ising chain.
//!
//! H = -J Σ s_i s_{i+1} - h Σ s_i, so flipping s_i changes the energy by
//! ΔE = 2 s_i (h + J s_{i-1} + J s_{i+1}).

use crate::chain::SpinChain;

/// Energy change of flipping the spin at `i mod n`, evaluated with the
/// current (pre-flip) spin value.
///
/// `i` may be any signed index. No special handling of NaN or infinite
/// parameters; they propagate through the arithmetic.
#[inline]
pub fn energy_difference(config: &SpinChain, i: i64, field: f64, coupling: f64) -> f64 {
    let spins = config.spins();
    let n = spins.len();
    let site = config.wrap(i);

    let s_i = spins[site] as f64;
    let s_left = spins[(site + n - 1) % n] as f64;
    let s_right = spins[(site + 1) % n] as f64;

    let mut ene_diff = 2.0 * s_i * field;
    ene_diff += 2.0 * s_i * s_left * coupling;
    ene_diff += 2.0 * s_i * s_right * coupling;
    ene_diff
}
