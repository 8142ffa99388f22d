//! Variation operators: mutation and crossover.
//!
//! Variators transform a working set of candidates; when several are
//! configured on an engine they chain in order, the output of one feeding
//! the next (typically a crossover followed by a mutation). Bounding is
//! not a variator concern — the engine applies the configured bounder to
//! every offspring after the whole chain has run.
//!
//! Crossover operators pair consecutive candidates (first with second,
//! third with fourth, …) and emit two children per pair; an odd trailing
//! candidate passes through unchanged.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata" (BLX-α)

use rand::Rng;
use rand::RngCore;
use rand_distr::{Distribution, Normal};

use crate::args::Args;

use super::pipeline::Variator;

/// Adds Gaussian noise to real-vector components.
///
/// The mutation rate applies element by element.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussianMutation {
    /// Per-component probability of perturbation.
    pub mutation_rate: f64,
    /// Mean of the Gaussian noise.
    pub mean: f64,
    /// Standard deviation of the Gaussian noise.
    pub stdev: f64,
}

impl Default for GaussianMutation {
    fn default() -> Self {
        Self { mutation_rate: 0.1, mean: 0.0, stdev: 1.0 }
    }
}

impl Variator<Vec<f64>> for GaussianMutation {
    fn vary(
        &mut self,
        candidates: Vec<Vec<f64>>,
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Vec<f64>> {
        let noise = Normal::new(self.mean, self.stdev)
            .expect("gaussian stdev must be finite and non-negative");
        candidates
            .into_iter()
            .map(|mut candidate| {
                for gene in candidate.iter_mut() {
                    if rng.random_range(0.0..1.0) < self.mutation_rate {
                        *gene += noise.sample(&mut *rng);
                    }
                }
                candidate
            })
            .collect()
    }
}

/// Flips bits of a bit-string candidate.
///
/// The mutation rate applies bit by bit.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitFlipMutation {
    /// Per-bit probability of flipping.
    pub mutation_rate: f64,
}

impl Default for BitFlipMutation {
    fn default() -> Self {
        Self { mutation_rate: 0.1 }
    }
}

impl Variator<Vec<bool>> for BitFlipMutation {
    fn vary(
        &mut self,
        candidates: Vec<Vec<bool>>,
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Vec<bool>> {
        candidates
            .into_iter()
            .map(|mut candidate| {
                for bit in candidate.iter_mut() {
                    if rng.random_range(0.0..1.0) < self.mutation_rate {
                        *bit = !*bit;
                    }
                }
                candidate
            })
            .collect()
    }
}

/// Recombines paired parents at `n` random cut points.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NPointCrossover {
    /// Probability that a pair is recombined at all.
    pub crossover_rate: f64,
    /// Number of cut points (clamped to the candidate length minus one).
    pub num_points: usize,
}

impl Default for NPointCrossover {
    fn default() -> Self {
        Self { crossover_rate: 1.0, num_points: 1 }
    }
}

impl<T: Clone> Variator<Vec<T>> for NPointCrossover {
    fn vary(
        &mut self,
        candidates: Vec<Vec<T>>,
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Vec<T>> {
        crossover_pairs(candidates, |mom, dad| {
            if rng.random_range(0.0..1.0) >= self.crossover_rate || mom.len() < 2 {
                return (mom.clone(), dad.clone());
            }
            let num_cuts = self.num_points.clamp(1, mom.len() - 1);
            let mut cuts = rand::seq::index::sample(&mut *rng, mom.len() - 1, num_cuts)
                .into_iter()
                .map(|i| i + 1)
                .collect::<Vec<usize>>();
            cuts.sort_unstable();

            let mut bro = dad.clone();
            let mut sis = mom.clone();
            let mut swapped = false;
            let mut next_cut = 0;
            for i in 0..mom.len().min(dad.len()) {
                if next_cut < cuts.len() && i == cuts[next_cut] {
                    swapped = !swapped;
                    next_cut += 1;
                }
                if swapped {
                    bro[i] = mom[i].clone();
                    sis[i] = dad[i].clone();
                }
            }
            (bro, sis)
        })
    }
}

/// Recombines paired parents element-wise with a biased coin.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformCrossover {
    /// Probability that a pair is recombined at all.
    pub crossover_rate: f64,
    /// Per-element probability of swapping parent contributions.
    pub bias: f64,
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self { crossover_rate: 1.0, bias: 0.5 }
    }
}

impl<T: Clone> Variator<Vec<T>> for UniformCrossover {
    fn vary(
        &mut self,
        candidates: Vec<Vec<T>>,
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Vec<T>> {
        crossover_pairs(candidates, |mom, dad| {
            if rng.random_range(0.0..1.0) >= self.crossover_rate {
                return (mom.clone(), dad.clone());
            }
            let mut bro = dad.clone();
            let mut sis = mom.clone();
            for i in 0..mom.len().min(dad.len()) {
                if rng.random_range(0.0..1.0) < self.bias {
                    bro[i] = mom[i].clone();
                    sis[i] = dad[i].clone();
                }
            }
            (bro, sis)
        })
    }
}

/// Blend (BLX-α) crossover for real vectors.
///
/// Each child component is drawn uniformly from the interval spanned by
/// the parents, extended on both sides by `alpha` times its width.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlendCrossover {
    /// Probability that a pair is recombined at all.
    pub crossover_rate: f64,
    /// Interval extension factor.
    pub alpha: f64,
}

impl Default for BlendCrossover {
    fn default() -> Self {
        Self { crossover_rate: 1.0, alpha: 0.1 }
    }
}

impl Variator<Vec<f64>> for BlendCrossover {
    fn vary(
        &mut self,
        candidates: Vec<Vec<f64>>,
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Vec<f64>> {
        crossover_pairs(candidates, |mom, dad| {
            if rng.random_range(0.0..1.0) >= self.crossover_rate {
                return (mom.clone(), dad.clone());
            }
            let mut bro = dad.clone();
            let mut sis = mom.clone();
            for i in 0..mom.len().min(dad.len()) {
                let (lo, hi) = (mom[i].min(dad[i]), mom[i].max(dad[i]));
                let delta = self.alpha * (hi - lo);
                let width = hi - lo + 2.0 * delta;
                bro[i] = lo - delta + rng.random_range(0.0..1.0) * width;
                sis[i] = lo - delta + rng.random_range(0.0..1.0) * width;
            }
            (bro, sis)
        })
    }
}

/// Pairs consecutive candidates and applies `cross` to each pair.
///
/// An odd trailing candidate passes through unchanged.
fn crossover_pairs<C>(
    candidates: Vec<C>,
    mut cross: impl FnMut(&C, &C) -> (C, C),
) -> Vec<C> {
    let mut children = Vec::with_capacity(candidates.len());
    let mut iter = candidates.into_iter();
    loop {
        match (iter.next(), iter.next()) {
            (Some(mom), Some(dad)) => {
                let (bro, sis) = cross(&mom, &dad);
                children.push(bro);
                children.push(sis);
            }
            (Some(last), None) => {
                children.push(last);
                break;
            }
            _ => break,
        }
    }
    children
}

// ============================================================================
// Tests
// ============================================================================
