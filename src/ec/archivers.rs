//! Archival strategies.
//!
//! Archives live beside the population and persist across generations.
//! Entries are clones taken at admission, so later population mutation
//! cannot corrupt archived state. The Pareto-specific archivers (capacity
//! + crowding, adaptive grid) live in [`crate::emo`].

use rand::RngCore;

use crate::args::Args;

use super::pipeline::Archiver;
use super::types::{Fitness, Individual};

/// Keeps the archive unchanged (the engine default: an empty archive).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultArchiver;

impl<C, F: Fitness> Archiver<C, F> for DefaultArchiver {
    fn archive(
        &mut self,
        archive: Vec<Individual<C, F>>,
        _offspring: &[Individual<C, F>],
        _population: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        archive
    }
}

/// Replaces the archive with a snapshot of the current population.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopulationArchiver;

impl<C: Clone, F: Fitness> Archiver<C, F> for PopulationArchiver {
    fn archive(
        &mut self,
        _archive: Vec<Individual<C, F>>,
        _offspring: &[Individual<C, F>],
        population: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        population.to_vec()
    }
}

/// Keeps only the best solutions seen so far.
///
/// Each offspring is admitted unless an archive member is at least as good
/// (or holds an identical candidate); admission evicts every member the
/// newcomer beats. Under scalar fitness the archive converges to the
/// best-ever individuals; under [`Pareto`](crate::emo::Pareto) fitness the
/// same rule maintains an unbounded nondominated set.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestArchiver;

impl<C: Clone + PartialEq, F: Fitness> Archiver<C, F> for BestArchiver {
    fn archive(
        &mut self,
        mut archive: Vec<Individual<C, F>>,
        offspring: &[Individual<C, F>],
        _population: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        for candidate in offspring {
            let duplicate = archive.iter().any(|a| a.candidate == candidate.candidate);
            if duplicate {
                continue;
            }
            let beaten = archive.iter().any(|a| a.better_than(candidate));
            if beaten {
                continue;
            }
            archive.retain(|a| !candidate.better_than(a));
            archive.push(candidate.clone());
        }
        archive
    }
}
