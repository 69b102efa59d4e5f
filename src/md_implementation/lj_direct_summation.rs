use crate::md_implementation::cluster::Cluster;
use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Arrangement of the pair computation. All variants give the same energy,
/// they only differ in which intermediate values are passed between functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// `lj(distance(a, b))`
    Separated,
    /// `lj_merged(a, b)`
    Merged,
    /// `lj_rearranged(distance_inv(a, b))`
    Rearranged,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Separated, Variant::Merged, Variant::Rearranged];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Separated => "separated",
            Variant::Merged => "merged",
            Variant::Rearranged => "rearranged",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown variant '{}'", s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Sequential,
    Parallel,
}

impl ExecutionMode {
    pub const ALL: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

    pub fn name(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, ExecutionMode::Parallel)
    }
}

impl From<bool> for ExecutionMode {
    fn from(parallel: bool) -> Self {
        if parallel {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Cluster {
    pub fn potential_energy(&self, variant: Variant, mode: ExecutionMode) -> f64 {
        lj_direct_summation(self.positions.view(), variant, mode)
    }
}

/// Total LJ energy of `positions` (shape `(nb_atoms, 3)`) in reduced units,
/// separated formulation.
pub fn evaluate(positions: ArrayView2<f64>, parallel: bool) -> f64 {
    lj_direct_summation(positions, Variant::Separated, parallel.into())
}

pub fn lj_direct_summation(positions: ArrayView2<f64>, variant: Variant, mode: ExecutionMode) -> f64 {
    match variant {
        Variant::Separated => sum_pairs(positions, mode, |a, b| lj(distance(a, b))),
        Variant::Merged => sum_pairs(positions, mode, lj_merged),
        Variant::Rearranged => sum_pairs(positions, mode, |a, b| {
            lj_rearranged(distance_inv(a, b))
        }),
    }
}

/// Sums `pair_energy` over all pairs i < j. The outer loop over i is split
/// across the rayon pool in parallel mode, every worker keeps its own partial
/// sum and the partial sums are reduced at the end, so the result may differ
/// from the sequential one in the last bits.
///
/// Panics if `positions` does not have exactly 3 columns.
pub fn sum_pairs<F>(positions: ArrayView2<f64>, mode: ExecutionMode, pair_energy: F) -> f64
where
    F: Fn(ArrayView1<f64>, ArrayView1<f64>) -> f64 + Sync,
{
    assert_eq!(
        positions.ncols(),
        3,
        "positions must have shape (nb_atoms, 3), got {:?}",
        positions.shape()
    );
    let nb_atoms = positions.nrows();
    // continues `energy` so the sequential sum keeps one accumulator
    let add_row = |i: usize, mut energy: f64| -> f64 {
        let atom1 = positions.row(i);
        for j in i + 1..nb_atoms {
            energy += pair_energy(atom1, positions.row(j));
        }
        energy
    };

    match mode {
        ExecutionMode::Sequential => {
            (0..nb_atoms.saturating_sub(1)).fold(0f64, |energy, i| add_row(i, energy))
        }
        ExecutionMode::Parallel => (0..nb_atoms.saturating_sub(1))
            .into_par_iter()
            .fold(|| 0f64, |partial, i| add_row(i, partial))
            .reduce(|| 0f64, |a, b| a + b),
    }
}

#[inline]
pub fn distance(atom1: ArrayView1<f64>, atom2: ArrayView1<f64>) -> f64 {
    let dx = atom2[0] - atom1[0];
    let dy = atom2[1] - atom1[1];
    let dz = atom2[2] - atom1[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

#[inline]
pub fn lj(distance: f64) -> f64 {
    let sr6 = (1.0 / distance).powi(6);
    4.0 * (sr6 * sr6 - sr6)
}

#[inline]
pub fn lj_merged(atom1: ArrayView1<f64>, atom2: ArrayView1<f64>) -> f64 {
    let dx = atom2[0] - atom1[0];
    let dy = atom2[1] - atom1[1];
    let dz = atom2[2] - atom1[2];
    let r = (dx * dx + dy * dy + dz * dz).sqrt();

    let sr6 = (1.0 / r).powi(6);
    4.0 * (sr6 * sr6 - sr6)
}

#[inline]
pub fn distance_inv(atom1: ArrayView1<f64>, atom2: ArrayView1<f64>) -> f64 {
    let dx = atom2[0] - atom1[0];
    let dy = atom2[1] - atom1[1];
    let dz = atom2[2] - atom1[2];
    1.0 / (dx * dx + dy * dy + dz * dz).sqrt()
}

#[inline]
pub fn lj_rearranged(distance_inv: f64) -> f64 {
    let sr6 = distance_inv.powi(6);
    4.0 * (sr6 * sr6 - sr6)
}
