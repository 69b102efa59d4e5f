use crate::md_implementation::error::LjError;
use log::debug;
use ndarray::{Array, Array2, ArrayView2};
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::{StandardNormal, Uniform};
use ndarray_rand::RandomExt;
use rand_isaac::isaac64::Isaac64Rng;

/// Positions of a particle cluster, one row per atom (x, y, z).
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    pub positions: Array2<f64>,
}

impl Cluster {
    pub fn new(nb_atoms: usize) -> Self {
        Self {
            positions: Array2::zeros((nb_atoms, 3)),
        }
    }

    pub fn from_positions(positions: Array2<f64>) -> Result<Self, LjError> {
        if positions.ncols() != 3 {
            return Err(LjError::InvalidShape(positions.shape().to_vec()));
        }
        Ok(Self { positions })
    }

    /// Standard normal positions, reproducible for a given seed.
    pub fn random_normal(nb_atoms: usize, seed: u64) -> Self {
        let mut rng = Isaac64Rng::seed_from_u64(seed);
        debug!("generating {} normal distributed atoms, seed {}", nb_atoms, seed);
        Self {
            positions: Array::random_using((nb_atoms, 3), StandardNormal, &mut rng),
        }
    }

    /// Uniform positions inside the cube [low, high)^3. Fails unless
    /// `low < high` and both bounds are finite.
    pub fn random_uniform(nb_atoms: usize, low: f64, high: f64, seed: u64) -> Result<Self, LjError> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(LjError::InvalidBounds { low, high });
        }
        let mut rng = Isaac64Rng::seed_from_u64(seed);
        debug!(
            "generating {} uniform distributed atoms in [{}, {}), seed {}",
            nb_atoms, low, high, seed
        );
        Ok(Self {
            positions: Array::random_using((nb_atoms, 3), Uniform::new(low, high), &mut rng),
        })
    }

    pub fn nb_atoms(&self) -> usize {
        self.positions.nrows()
    }

    /// Number of unordered pairs visited by one direct summation.
    pub fn nb_pairs(&self) -> usize {
        let n = self.nb_atoms();
        n * n.saturating_sub(1) / 2
    }

    pub fn positions(&self) -> ArrayView2<f64> {
        self.positions.view()
    }
}
