//! Selection strategies.
//!
//! Selectors choose the parents for a generation. How many individuals a
//! selector returns is its own decision, independent of the population
//! size. All strategies here honor the run [`Direction`](super::Direction)
//! through the individuals' preference order.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;
use rand::RngCore;

use crate::args::Args;

use super::pipeline::Selector;
use super::types::{sort_best_first, Direction, Fitness, Individual};

/// Selects the entire population, in order.
///
/// The engine default; also the conventional choice for evolution
/// strategies and swarm-style algorithms where every individual is varied.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSelector;

impl<C: Clone, F: Fitness> Selector<C, F> for DefaultSelector {
    fn select(
        &mut self,
        population: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        population.to_vec()
    }
}

/// Deterministically selects the best individuals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncationSelector {
    /// How many to select; `None` selects as many as the population holds.
    pub num_selected: Option<usize>,
}

impl<C: Clone, F: Fitness> Selector<C, F> for TruncationSelector {
    fn select(
        &mut self,
        population: &[Individual<C, F>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        let n = self.num_selected.unwrap_or(population.len()).min(population.len());
        let mut sorted = population.to_vec();
        sort_best_first(&mut sorted);
        sorted.truncate(n);
        sorted
    }
}

/// Uniform random sampling with replacement.
#[derive(Debug, Clone, Copy)]
pub struct UniformSelector {
    /// How many to select; `None` selects as many as the population holds.
    pub num_selected: Option<usize>,
}

impl Default for UniformSelector {
    fn default() -> Self {
        Self { num_selected: Some(1) }
    }
}

impl<C: Clone, F: Fitness> Selector<C, F> for UniformSelector {
    fn select(
        &mut self,
        population: &[Individual<C, F>],
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        assert!(!population.is_empty(), "cannot select from empty population");
        let n = self.num_selected.unwrap_or(population.len());
        (0..n)
            .map(|_| population[rng.random_range(0..population.len())].clone())
            .collect()
    }
}

/// Fitness-proportionate ("roulette wheel") sampling.
///
/// Selection probability is proportional to scalar fitness, shifted so the
/// worst individual still has a small positive weight. Only defined for
/// maximization; a minimization population is a caller error.
///
/// # Panics
///
/// Panics when the run direction is `Minimize` or when fitness has no
/// scalar projection.
#[derive(Debug, Clone, Copy)]
pub struct FitnessProportionateSelector {
    /// How many to select; `None` selects as many as the population holds.
    pub num_selected: Option<usize>,
}

impl Default for FitnessProportionateSelector {
    fn default() -> Self {
        Self { num_selected: Some(1) }
    }
}

impl<C: Clone, F: Fitness> Selector<C, F> for FitnessProportionateSelector {
    fn select(
        &mut self,
        population: &[Individual<C, F>],
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        assert!(!population.is_empty(), "cannot select from empty population");
        assert!(
            population[0].direction == Direction::Maximize,
            "fitness-proportionate selection is not valid for minimization"
        );

        let scalars: Vec<f64> = population
            .iter()
            .map(|ind| {
                ind.fitness()
                    .to_scalar()
                    .unwrap_or_else(|| panic!("fitness-proportionate selection requires scalar fitness"))
            })
            .collect();
        let min = scalars.iter().cloned().fold(f64::INFINITY, f64::min);
        let epsilon = 1e-10;
        let weights: Vec<f64> = scalars.iter().map(|&s| s - min + epsilon).collect();
        let total: f64 = weights.iter().sum();

        let n = self.num_selected.unwrap_or(population.len());
        (0..n)
            .map(|_| {
                let threshold = rng.random_range(0.0..total);
                let mut cumulative = 0.0;
                for (i, &w) in weights.iter().enumerate() {
                    cumulative += w;
                    if cumulative > threshold {
                        return population[i].clone();
                    }
                }
                population[population.len() - 1].clone() // floating-point fallback
            })
            .collect()
    }
}

/// Rank-based sampling with linear ranking.
///
/// Probability is proportional to the individual's rank rather than its
/// raw fitness, which sidesteps the scaling problems of roulette selection
/// and works for both directions.
///
/// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
/// Algorithms"
#[derive(Debug, Clone, Copy)]
pub struct RankSelector {
    /// How many to select; `None` selects as many as the population holds.
    pub num_selected: Option<usize>,
}

impl Default for RankSelector {
    fn default() -> Self {
        Self { num_selected: Some(1) }
    }
}

impl<C: Clone, F: Fitness> Selector<C, F> for RankSelector {
    fn select(
        &mut self,
        population: &[Individual<C, F>],
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        assert!(!population.is_empty(), "cannot select from empty population");
        let mut sorted = population.to_vec();
        sort_best_first(&mut sorted);

        let len = sorted.len();
        let total = (len * (len + 1)) as f64 / 2.0;
        let n = self.num_selected.unwrap_or(len);
        (0..n)
            .map(|_| {
                let threshold = rng.random_range(0.0..total);
                let mut cumulative = 0.0;
                for (rank, ind) in sorted.iter().enumerate() {
                    cumulative += (len - rank) as f64;
                    if cumulative > threshold {
                        return ind.clone();
                    }
                }
                sorted[len - 1].clone() // floating-point fallback
            })
            .collect()
    }
}

/// Tournament sampling without replacement.
///
/// Each selection draws `tournament_size` distinct individuals and keeps
/// the best. Larger tournaments mean stronger selection pressure; a
/// tournament larger than the population is clamped to the population.
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelector {
    /// How many to select; `None` selects as many as the population holds.
    pub num_selected: Option<usize>,
    /// Individuals drawn per tournament.
    pub tournament_size: usize,
}

impl Default for TournamentSelector {
    fn default() -> Self {
        Self { num_selected: Some(1), tournament_size: 2 }
    }
}

impl<C: Clone, F: Fitness> Selector<C, F> for TournamentSelector {
    fn select(
        &mut self,
        population: &[Individual<C, F>],
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        assert!(!population.is_empty(), "cannot select from empty population");
        let k = self.tournament_size.clamp(1, population.len());
        let n = self.num_selected.unwrap_or(population.len());
        (0..n)
            .map(|_| {
                let entrants = rand::seq::index::sample(&mut *rng, population.len(), k);
                let winner = entrants
                    .iter()
                    .max_by(|&a, &b| {
                        super::types::preference_cmp(&population[a], &population[b])
                    })
                    .expect("tournament has at least one entrant");
                population[winner].clone()
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64], direction: Direction) -> Vec<Individual<usize, f64>> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| Individual::evaluated(i, f, 0, direction))
            .collect()
    }

    fn count_selections<S: Selector<usize, f64>>(
        selector: &mut S,
        population: &[Individual<usize, f64>],
        draws: usize,
    ) -> Vec<u32> {
        let mut rng = create_rng(42);
        let mut counts = vec![0u32; population.len()];
        for _ in 0..draws {
            for ind in selector.select(population, &mut rng, &Args::new()) {
                counts[ind.candidate] += 1;
            }
        }
        counts
    }

    #[test]
    fn test_default_returns_whole_population_in_order() {
        let pop = make_population(&[3.0, 1.0, 2.0], Direction::Maximize);
        let mut rng = create_rng(0);
        let selected = DefaultSelector.select(&pop, &mut rng, &Args::new());
        let order: Vec<usize> = selected.iter().map(|i| i.candidate).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_truncation_takes_best() {
        let pop = make_population(&[3.0, 1.0, 5.0, 2.0], Direction::Maximize);
        let mut rng = create_rng(0);
        let selected = TruncationSelector { num_selected: Some(2) }
            .select(&pop, &mut rng, &Args::new());
        let fits: Vec<f64> = selected.iter().map(|i| *i.fitness()).collect();
        assert_eq!(fits, vec![5.0, 3.0]);
    }

    #[test]
    fn test_truncation_minimize() {
        let pop = make_population(&[3.0, 1.0, 5.0], Direction::Minimize);
        let mut rng = create_rng(0);
        let selected = TruncationSelector { num_selected: Some(1) }
            .select(&pop, &mut rng, &Args::new());
        assert_eq!(*selected[0].fitness(), 1.0);
    }

    #[test]
    fn test_uniform_is_roughly_uniform() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0], Direction::Maximize);
        let counts =
            count_selections(&mut UniformSelector { num_selected: Some(1) }, &pop, 10_000);
        for &c in &counts {
            assert!(c > 2_000, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0], Direction::Maximize);
        let mut selector =
            TournamentSelector { num_selected: Some(1), tournament_size: 3 };
        let counts = count_selections(&mut selector, &pop, 10_000);
        let best = counts[0];
        let worst = counts[2];
        assert!(best > worst, "best should dominate: best={best}, worst={worst}");
        assert!(best > 4_000, "tournament(3) should pick the best often, got {counts:?}");
    }

    #[test]
    fn test_tournament_respects_minimize() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0], Direction::Minimize);
        let mut selector =
            TournamentSelector { num_selected: Some(1), tournament_size: 4 };
        let counts = count_selections(&mut selector, &pop, 1_000);
        // Full-population tournament without replacement always finds the minimum.
        assert_eq!(counts[2], 1_000);
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0], Direction::Maximize);
        let counts =
            count_selections(&mut RankSelector { num_selected: Some(1) }, &pop, 10_000);
        assert!(
            counts[0] > counts[2],
            "best should be selected more often: {counts:?}"
        );
    }

    #[test]
    fn test_fitness_proportionate_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0], Direction::Maximize);
        let counts = count_selections(
            &mut FitnessProportionateSelector { num_selected: Some(1) },
            &pop,
            10_000,
        );
        assert!(
            counts[0] > counts[2],
            "highest fitness should be selected most: {counts:?}"
        );
    }

    #[test]
    #[should_panic(expected = "not valid for minimization")]
    fn test_fitness_proportionate_rejects_minimization() {
        let pop = make_population(&[1.0, 2.0], Direction::Minimize);
        let mut rng = create_rng(0);
        FitnessProportionateSelector::default().select(&pop, &mut rng, &Args::new());
    }

    #[test]
    fn test_num_selected_independent_of_pop_size() {
        let pop = make_population(&[1.0, 2.0, 3.0], Direction::Maximize);
        let mut rng = create_rng(0);
        let selected = UniformSelector { num_selected: Some(10) }
            .select(&pop, &mut rng, &Args::new());
        assert_eq!(selected.len(), 10);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Individual<usize, f64>> = Vec::new();
        let mut rng = create_rng(0);
        TournamentSelector::default().select(&pop, &mut rng, &Args::new());
    }
}
