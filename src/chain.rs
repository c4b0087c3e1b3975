//! Periodic chain of Ising spins.

use crate::error::IsingError;
use rand::seq::index;
use rand::Rng;

/// A ring of `n` spins, each exactly -1 or +1.
///
/// Site `n - 1` is adjacent to site `0`. All index lookups through
/// [`SpinChain::spin`] wrap around, so callers may pass any signed index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinChain {
    spins: Vec<i8>,
}

impl SpinChain {
    /// Fully polarised chain, every spin +1.
    pub fn all_up(n: usize) -> Result<Self, IsingError> {
        if n == 0 {
            return Err(IsingError::InvalidArgument(
                "chain must contain at least one spin".into(),
            ));
        }
        Ok(Self { spins: vec![1; n] })
    }

    /// Chain with exactly `n / 2` spins, chosen without replacement, set to -1.
    ///
    /// Starts every run from zero (or ±1 for odd `n`) magnetization.
    pub fn half_flipped_with(rng: &mut impl Rng, n: usize) -> Result<Self, IsingError> {
        let mut chain = Self::all_up(n)?;
        for i in index::sample(rng, n, n / 2) {
            chain.spins[i] = -1;
        }
        Ok(chain)
    }

    /// Build from explicit spin values, rejecting anything other than ±1.
    pub fn from_spins(spins: Vec<i8>) -> Result<Self, IsingError> {
        if spins.is_empty() {
            return Err(IsingError::InvalidArgument(
                "chain must contain at least one spin".into(),
            ));
        }
        if let Some(index) = spins.iter().position(|&s| s != 1 && s != -1) {
            return Err(IsingError::InvalidSpin {
                index,
                value: spins[index],
            });
        }
        Ok(Self { spins })
    }

    /// Number of sites.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.spins.len()
    }

    /// True only for a chain with no sites.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    /// Reduce any signed index onto the ring.
    #[inline(always)]
    pub fn wrap(&self, i: i64) -> usize {
        i.rem_euclid(self.spins.len() as i64) as usize
    }

    /// Spin at site `i mod n`.
    #[inline(always)]
    pub fn spin(&self, i: i64) -> i8 {
        self.spins[self.wrap(i)]
    }

    /// Flip the spin at site `i mod n` and return its new value.
    #[inline(always)]
    pub fn flip(&mut self, i: i64) -> i8 {
        let idx = self.wrap(i);
        self.spins[idx] = -self.spins[idx];
        self.spins[idx]
    }

    /// Σ s_i over the whole chain.
    pub fn magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    pub fn spins(&self) -> &[i8] {
        &self.spins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn empty_chain_is_rejected() {
        assert!(matches!(
            SpinChain::all_up(0),
            Err(IsingError::InvalidArgument(_))
        ));
        assert!(matches!(
            SpinChain::from_spins(vec![]),
            Err(IsingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn from_spins_rejects_non_unit_values() {
        match SpinChain::from_spins(vec![1, -1, 0, 1]) {
            Err(IsingError::InvalidSpin { index, value }) => {
                assert_eq!(index, 2);
                assert_eq!(value, 0);
            }
            other => panic!("expected InvalidSpin, got {other:?}"),
        }
    }

    #[test]
    fn half_flipped_has_balanced_magnetization() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for n in [1usize, 2, 7, 100] {
            let chain = SpinChain::half_flipped_with(&mut rng, n).unwrap();
            let down = chain.spins().iter().filter(|&&s| s == -1).count();
            assert_eq!(down, n / 2);
            assert_eq!(chain.magnetization(), (n % 2) as i64);
        }
    }

    #[test]
    fn indices_wrap_in_both_directions() {
        let chain = SpinChain::from_spins(vec![1, -1, -1, 1, -1]).unwrap();
        assert_eq!(chain.spin(-1), chain.spin(4));
        assert_eq!(chain.spin(5), chain.spin(0));
        assert_eq!(chain.spin(-6), chain.spin(4));
        assert_eq!(chain.wrap(i64::MIN), (i64::MIN).rem_euclid(5) as usize);
    }

    #[test]
    fn flip_negates_one_site() {
        let mut chain = SpinChain::all_up(3).unwrap();
        assert_eq!(chain.flip(4), -1);
        assert_eq!(chain.spins(), &[1, -1, 1]);
        assert_eq!(chain.magnetization(), 1);
    }
}
