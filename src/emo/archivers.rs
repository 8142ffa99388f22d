//! Pareto archives: unbounded, capacity-with-crowding, and adaptive grid.

use std::cmp::Ordering;

use rand::RngCore;

use crate::args::Args;
use crate::ec::{Archiver, Individual};

use super::pareto::Pareto;
use super::sorting::crowding_distance;

/// Maintains a nondominated set of the offspring seen so far.
///
/// Admission per candidate: rejected if any archive member dominates it
/// (or holds an identical candidate solution); otherwise admitted, and
/// every member it dominates is removed. With a capacity configured, an
/// overfull archive evicts from the most crowded region first — the member
/// with the smallest crowding distance. Extreme points carry infinite
/// crowding distance and are never evicted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParetoArchiver {
    /// Maximum archive size; `None` is unbounded.
    pub capacity: Option<usize>,
}

impl ParetoArchiver {
    /// Unbounded nondominated archive.
    pub fn new() -> Self {
        Self { capacity: None }
    }

    /// Nondominated archive evicting by crowding beyond `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity: Some(capacity) }
    }
}

impl<C: Clone + PartialEq> Archiver<C, Pareto> for ParetoArchiver {
    fn archive(
        &mut self,
        mut archive: Vec<Individual<C, Pareto>>,
        offspring: &[Individual<C, Pareto>],
        _population: &[Individual<C, Pareto>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, Pareto>> {
        for candidate in offspring {
            let duplicate =
                archive.iter().any(|a| a.candidate == candidate.candidate);
            if duplicate {
                continue;
            }
            let dominated = archive
                .iter()
                .any(|a| a.fitness().dominates(candidate.fitness()));
            if dominated {
                continue;
            }
            archive.retain(|a| !candidate.fitness().dominates(a.fitness()));
            archive.push(candidate.clone());

            if let Some(capacity) = self.capacity {
                while archive.len() > capacity {
                    let objectives: Vec<Pareto> =
                        archive.iter().map(|a| a.fitness().clone()).collect();
                    let distances = crowding_distance(&objectives);
                    let most_crowded = distances
                        .iter()
                        .enumerate()
                        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
                        .map(|(i, _)| i)
                        .expect("archive is non-empty");
                    archive.remove(most_crowded);
                }
            }
        }
        archive
    }
}

/// PAES-style adaptive grid archive.
///
/// Objective space is partitioned into a fixed-resolution hypergrid with
/// `2^num_grid_divisions` cells per objective, its bounds tracked from the
/// archive contents and padded by 20% on each side. Dominated candidates
/// are rejected and dominating candidates evict their victims; among
/// mutually nondominated candidates at capacity, a newcomer is admitted
/// only if its cell is less populated than the fullest cell, whose
/// occupant it replaces.
///
/// Grid memory grows as `cells_per_objective ^ num_objectives`; keep the
/// division count small for many-objective problems.
#[derive(Debug, Clone)]
pub struct GridArchiver {
    /// Maximum archive size.
    pub capacity: usize,
    /// Grid halvings per objective (resolution `2^divisions`).
    pub num_grid_divisions: usize,
    smallest: Vec<f64>,
    largest: Vec<f64>,
}

impl GridArchiver {
    /// Creates a grid archive.
    pub fn new(capacity: usize, num_grid_divisions: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            num_grid_divisions,
            smallest: Vec::new(),
            largest: Vec::new(),
        }
    }

    fn resolution(&self) -> usize {
        1usize << self.num_grid_divisions
    }

    /// Recomputes padded grid bounds from the archive plus one candidate.
    fn update_bounds<C>(
        &mut self,
        archive: &[Individual<C, Pareto>],
        candidate: &Pareto,
    ) {
        let m = candidate.len();
        let mut smallest = candidate.values().to_vec();
        let mut largest = candidate.values().to_vec();
        for member in archive {
            for (i, &v) in member.fitness().values().iter().enumerate().take(m) {
                smallest[i] = smallest[i].min(v);
                largest[i] = largest[i].max(v);
            }
        }
        self.smallest = smallest
            .iter()
            .map(|&s| s - (0.2 * s).abs())
            .collect();
        self.largest = largest
            .iter()
            .map(|&l| l + (0.2 * l).abs())
            .collect();
    }

    /// Row-major cell index, or `None` when outside the tracked bounds.
    fn cell_of(&self, fitness: &Pareto) -> Option<usize> {
        let resolution = self.resolution();
        let mut cell = 0usize;
        for (i, &v) in fitness.values().iter().enumerate() {
            let lo = *self.smallest.get(i)?;
            let hi = *self.largest.get(i)?;
            if v < lo || v > hi {
                return None;
            }
            let width = hi - lo;
            let coord = if width > 0.0 {
                (((v - lo) / width) * resolution as f64) as usize
            } else {
                0
            };
            cell = cell * resolution + coord.min(resolution - 1);
        }
        Some(cell)
    }

    /// Occupancy of every nonempty cell, as (cell, count) pairs.
    fn cell_counts<C>(&self, archive: &[Individual<C, Pareto>]) -> Vec<(usize, usize)> {
        let mut counts: Vec<(usize, usize)> = Vec::new();
        for member in archive {
            if let Some(cell) = self.cell_of(member.fitness()) {
                match counts.iter_mut().find(|(c, _)| *c == cell) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((cell, 1)),
                }
            }
        }
        counts
    }
}

impl<C: Clone + PartialEq> Archiver<C, Pareto> for GridArchiver {
    fn archive(
        &mut self,
        mut archive: Vec<Individual<C, Pareto>>,
        offspring: &[Individual<C, Pareto>],
        _population: &[Individual<C, Pareto>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, Pareto>> {
        for candidate in offspring {
            let rejected = archive.iter().any(|a| {
                a.candidate == candidate.candidate
                    || a.fitness().dominates(candidate.fitness())
            });
            if rejected {
                continue;
            }
            archive.retain(|a| !candidate.fitness().dominates(a.fitness()));

            self.update_bounds(&archive, candidate.fitness());
            if archive.len() < self.capacity {
                archive.push(candidate.clone());
                continue;
            }

            // At capacity among mutually nondominated solutions: prefer
            // the less crowded grid cell.
            let counts = self.cell_counts(&archive);
            let candidate_count = self
                .cell_of(candidate.fitness())
                .and_then(|cell| counts.iter().find(|(c, _)| *c == cell))
                .map(|(_, n)| *n)
                .unwrap_or(0);
            let fullest = counts.iter().max_by_key(|(_, n)| *n).copied();
            if let Some((fullest_cell, fullest_count)) = fullest {
                if fullest_count > candidate_count {
                    let victim = archive
                        .iter()
                        .position(|a| self.cell_of(a.fitness()) == Some(fullest_cell))
                        .expect("fullest cell has an occupant");
                    archive[victim] = candidate.clone();
                }
            }
        }
        archive
    }
}

// ============================================================================
// Tests
// ============================================================================
