//! Replacement strategies.
//!
//! Replacers build the next population from the current population, the
//! selected parents, and the evaluated offspring. The engine does not
//! require the result to match the previous population size — a replacer
//! may shrink or grow the population and the engine never re-pads.
//!
//! The NSGA-II replacement for multiobjective runs lives in
//! [`crate::emo::NsgaReplacer`].

use rand::RngCore;

use crate::args::Args;

use super::pipeline::Replacer;
use super::types::{preference_cmp, sort_best_first, Fitness, Individual};

/// Keeps the current population unchanged (the engine default).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReplacer;

impl<C, F: Fitness> Replacer<C, F> for DefaultReplacer {
    fn replace(
        &mut self,
        population: Vec<Individual<C, F>>,
        _parents: &[Individual<C, F>],
        _offspring: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        population
    }
}

/// Replaces the population with the offspring, with optional weak elitism.
///
/// The best `num_elites` of the current population survive alongside the
/// offspring; the combined pool is truncated back to the previous
/// population size.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationalReplacer {
    /// How many of the current best individuals may survive.
    pub num_elites: usize,
}

impl<C: Clone, F: Fitness> Replacer<C, F> for GenerationalReplacer {
    fn replace(
        &mut self,
        mut population: Vec<Individual<C, F>>,
        _parents: &[Individual<C, F>],
        offspring: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        let pop_size = population.len();
        sort_best_first(&mut population);
        let mut survivors: Vec<Individual<C, F>> = offspring.to_vec();
        survivors.extend(population.into_iter().take(self.num_elites));
        sort_best_first(&mut survivors);
        survivors.truncate(pop_size);
        survivors
    }
}

/// Keeps the best of the current population and the offspring combined.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncationReplacer;

impl<C: Clone, F: Fitness> Replacer<C, F> for TruncationReplacer {
    fn replace(
        &mut self,
        mut population: Vec<Individual<C, F>>,
        _parents: &[Individual<C, F>],
        offspring: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        let pop_size = population.len();
        population.extend(offspring.iter().cloned());
        sort_best_first(&mut population);
        population.truncate(pop_size);
        population
    }
}

/// Offspring replace the worst of the current population unconditionally.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteadyStateReplacer;

impl<C: Clone, F: Fitness> Replacer<C, F> for SteadyStateReplacer {
    fn replace(
        &mut self,
        mut population: Vec<Individual<C, F>>,
        _parents: &[Individual<C, F>],
        offspring: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        // Worst first, so the head of the list is overwritten.
        population.sort_by(|a, b| preference_cmp(a, b));
        let n = offspring.len().min(population.len());
        population[..n].clone_from_slice(&offspring[..n]);
        population
    }
}

/// "Plus" replacement: the best population-many from parents ∪ offspring.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlusReplacer;

impl<C: Clone, F: Fitness> Replacer<C, F> for PlusReplacer {
    fn replace(
        &mut self,
        population: Vec<Individual<C, F>>,
        parents: &[Individual<C, F>],
        offspring: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        let mut pool: Vec<Individual<C, F>> = offspring.to_vec();
        pool.extend(parents.iter().cloned());
        sort_best_first(&mut pool);
        pool.truncate(population.len());
        pool
    }
}

/// "Comma" replacement: the best population-many from the offspring alone.
///
/// Assumes at least population-many offspring were produced; with fewer,
/// the population shrinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommaReplacer;

impl<C: Clone, F: Fitness> Replacer<C, F> for CommaReplacer {
    fn replace(
        &mut self,
        population: Vec<Individual<C, F>>,
        _parents: &[Individual<C, F>],
        offspring: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        let mut pool: Vec<Individual<C, F>> = offspring.to_vec();
        sort_best_first(&mut pool);
        pool.truncate(population.len());
        pool
    }
}

/// Offspring replace random non-elite members of the population.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomReplacer {
    /// How many of the current best individuals are protected.
    pub num_elites: usize,
}

impl<C: Clone, F: Fitness> Replacer<C, F> for RandomReplacer {
    fn replace(
        &mut self,
        mut population: Vec<Individual<C, F>>,
        _parents: &[Individual<C, F>],
        offspring: &[Individual<C, F>],
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        sort_best_first(&mut population);
        let replaceable = population.len().saturating_sub(self.num_elites);
        let n = offspring.len().min(replaceable);
        if n == 0 {
            return population;
        }
        let victims = rand::seq::index::sample(&mut *rng, replaceable, n);
        for (child, victim) in offspring.iter().zip(victims.iter()) {
            population[self.num_elites + victim] = child.clone();
        }
        population
    }
}

/// Crowding replacement, a niching scheme.
///
/// Each offspring competes against the closest of a random crowd drawn
/// from the current survivors (closeness measured by the configured
/// distance function) and replaces it only if better. An offspring may
/// displace an earlier offspring admitted in the same generation.
pub struct CrowdingReplacer<C> {
    /// Crowd sample size per offspring.
    pub crowd_size: usize,
    /// Distance between two candidates.
    pub distance: Box<dyn Fn(&C, &C) -> f64>,
}

impl CrowdingReplacer<Vec<f64>> {
    /// Crowding with Euclidean distance over real vectors.
    pub fn euclidean(crowd_size: usize) -> Self {
        Self {
            crowd_size,
            distance: Box::new(|a: &Vec<f64>, b: &Vec<f64>| {
                a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
            }),
        }
    }
}

impl<C: Clone> CrowdingReplacer<C> {
    /// Crowding with a custom distance function.
    pub fn with_distance(crowd_size: usize, distance: impl Fn(&C, &C) -> f64 + 'static) -> Self {
        Self { crowd_size, distance: Box::new(distance) }
    }
}

impl<C: Clone, F: Fitness> Replacer<C, F> for CrowdingReplacer<C> {
    fn replace(
        &mut self,
        mut population: Vec<Individual<C, F>>,
        _parents: &[Individual<C, F>],
        offspring: &[Individual<C, F>],
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        for child in offspring {
            if population.is_empty() {
                break;
            }
            let k = self.crowd_size.clamp(1, population.len());
            let crowd = rand::seq::index::sample(&mut *rng, population.len(), k);
            let closest = crowd
                .iter()
                .min_by(|&a, &b| {
                    let da = (self.distance)(&child.candidate, &population[a].candidate);
                    let db = (self.distance)(&child.candidate, &population[b].candidate);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
                .expect("crowd has at least one member");
            if child.better_than(&population[closest]) {
                population[closest] = child.clone();
            }
        }
        population
    }
}

// ============================================================================
// Tests
// ============================================================================
