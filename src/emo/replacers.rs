//! NSGA-II replacement.

use rand::RngCore;

use crate::args::Args;
use crate::ec::{Individual, Replacer};

use super::pareto::Pareto;
use super::sorting::{crowding_distance, non_dominated_sort};

/// Nondominated-sorting replacement with crowding truncation (NSGA-II).
///
/// The current population and the offspring are pooled and partitioned
/// into fronts; fronts fill the next population in rank order, and the
/// first front that does not fit is truncated by descending crowding
/// distance. Dominance follows the tuples' own per-objective directions,
/// so runs using this replacer should leave the run direction at its
/// default `Maximize`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NsgaReplacer;

impl<C: Clone> Replacer<C, Pareto> for NsgaReplacer {
    fn replace(
        &mut self,
        population: Vec<Individual<C, Pareto>>,
        _parents: &[Individual<C, Pareto>],
        offspring: &[Individual<C, Pareto>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, Pareto>> {
        let pop_size = population.len();
        let mut combined = population;
        combined.extend(offspring.iter().cloned());
        if combined.is_empty() {
            return combined;
        }

        let objectives: Vec<Pareto> =
            combined.iter().map(|ind| ind.fitness().clone()).collect();
        let sorted = non_dominated_sort(&objectives);

        let mut survivors: Vec<Individual<C, Pareto>> = Vec::with_capacity(pop_size);
        for front in &sorted.fronts {
            if survivors.len() + front.len() <= pop_size {
                survivors.extend(front.iter().map(|&i| combined[i].clone()));
                if survivors.len() == pop_size {
                    break;
                }
            } else {
                // Truncate this front by crowding distance, most isolated
                // first.
                let front_objectives: Vec<Pareto> =
                    front.iter().map(|&i| objectives[i].clone()).collect();
                let distances = crowding_distance(&front_objectives);
                let mut ranked: Vec<(usize, f64)> =
                    front.iter().copied().zip(distances).collect();
                ranked.sort_by(|a, b| {
                    b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
                });
                let remaining = pop_size - survivors.len();
                survivors.extend(ranked.into_iter().take(remaining).map(|(i, _)| combined[i].clone()));
                break;
            }
        }
        survivors
    }
}

// ============================================================================
// Tests
// ============================================================================
