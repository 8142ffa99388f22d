//! Stop conditions.
//!
//! Terminators are checked at the end of every generation; the first one
//! returning `true` ends the run and short-circuits the rest of the list.
//! Stateful terminators (no-improvement, wall-clock) keep their state in
//! the strategy object, so a fresh instance per run is expected.

use std::time::{Duration, Instant};

use crate::args::Args;

use super::pipeline::Terminator;
use super::types::{best_of, Fitness, Individual};

/// Stops once a number of generations have completed.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationTerminator {
    /// Generation count at which to stop.
    pub max_generations: usize,
}

impl GenerationTerminator {
    /// Stops when `num_generations >= max_generations`.
    pub fn new(max_generations: usize) -> Self {
        Self { max_generations }
    }
}

impl<C, F: Fitness> Terminator<C, F> for GenerationTerminator {
    fn should_terminate(
        &mut self,
        _population: &[Individual<C, F>],
        num_generations: usize,
        _num_evaluations: usize,
        _args: &Args,
    ) -> bool {
        num_generations >= self.max_generations
    }
}

/// Stops once a number of fitness evaluations have been spent.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationTerminator {
    /// Evaluation count at which to stop.
    pub max_evaluations: usize,
}

impl EvaluationTerminator {
    /// Stops when `num_evaluations >= max_evaluations`.
    pub fn new(max_evaluations: usize) -> Self {
        Self { max_evaluations }
    }
}

impl<C, F: Fitness> Terminator<C, F> for EvaluationTerminator {
    fn should_terminate(
        &mut self,
        _population: &[Individual<C, F>],
        _num_generations: usize,
        num_evaluations: usize,
        _args: &Args,
    ) -> bool {
        num_evaluations >= self.max_evaluations
    }
}

/// Stops when the population's mean fitness is within `tolerance` of its
/// best fitness.
///
/// Requires scalar fitness; individuals without a scalar projection make
/// this terminator panic.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AverageFitnessTerminator {
    /// Maximum allowed gap between best and mean fitness.
    pub tolerance: f64,
}

impl Default for AverageFitnessTerminator {
    fn default() -> Self {
        Self { tolerance: 0.001 }
    }
}

impl<C, F: Fitness> Terminator<C, F> for AverageFitnessTerminator {
    fn should_terminate(
        &mut self,
        population: &[Individual<C, F>],
        _num_generations: usize,
        _num_evaluations: usize,
        _args: &Args,
    ) -> bool {
        if population.is_empty() {
            return true;
        }
        let scalars: Vec<f64> = population
            .iter()
            .map(|ind| {
                ind.fitness()
                    .to_scalar()
                    .unwrap_or_else(|| panic!("average-fitness termination requires scalar fitness"))
            })
            .collect();
        let mean = scalars.iter().sum::<f64>() / scalars.len() as f64;
        let best = best_of(population)
            .and_then(|b| b.fitness().to_scalar())
            .expect("population is non-empty");
        (best - mean).abs() < self.tolerance
    }
}

/// Stops when the population has collapsed to a small region.
///
/// Diversity is the maximum pairwise Euclidean distance between candidate
/// vectors; only defined for real-vector candidates.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiversityTerminator {
    /// Minimum required diversity.
    pub min_diversity: f64,
}

impl Default for DiversityTerminator {
    fn default() -> Self {
        Self { min_diversity: 0.001 }
    }
}

impl<F: Fitness> Terminator<Vec<f64>, F> for DiversityTerminator {
    fn should_terminate(
        &mut self,
        population: &[Individual<Vec<f64>, F>],
        _num_generations: usize,
        _num_evaluations: usize,
        _args: &Args,
    ) -> bool {
        let mut max_distance = 0.0f64;
        for (i, p) in population.iter().enumerate() {
            for q in &population[i + 1..] {
                let d: f64 = p
                    .candidate
                    .iter()
                    .zip(q.candidate.iter())
                    .map(|(x, y)| (x - y) * (x - y))
                    .sum::<f64>()
                    .sqrt();
                max_distance = max_distance.max(d);
            }
        }
        max_distance < self.min_diversity
    }
}

/// Stops after a number of generations without best-fitness improvement.
#[derive(Debug, Clone)]
pub struct NoImprovementTerminator<F> {
    /// Generations allowed without improvement.
    pub max_stagnant: usize,
    previous_best: Option<F>,
    stagnant: usize,
}

impl<F> NoImprovementTerminator<F> {
    /// Stops after `max_stagnant` consecutive generations whose best
    /// fitness does not improve on the best seen so far.
    pub fn new(max_stagnant: usize) -> Self {
        Self { max_stagnant, previous_best: None, stagnant: 0 }
    }
}

impl<C, F: Fitness> Terminator<C, F> for NoImprovementTerminator<F> {
    fn should_terminate(
        &mut self,
        population: &[Individual<C, F>],
        _num_generations: usize,
        _num_evaluations: usize,
        _args: &Args,
    ) -> bool {
        let Some(current) = best_of(population) else {
            return true;
        };
        let improved = match &self.previous_best {
            None => true,
            Some(previous) => {
                current.fitness().compare(previous, current.direction)
                    == Some(std::cmp::Ordering::Greater)
            }
        };
        if improved {
            self.previous_best = Some(current.fitness().clone());
            self.stagnant = 0;
            false
        } else {
            self.stagnant += 1;
            self.stagnant >= self.max_stagnant
        }
    }
}

/// Stops once a wall-clock budget has elapsed.
///
/// The clock starts at the first check, so setup and initial evaluation
/// time are not charged against the budget.
#[derive(Debug, Clone)]
pub struct TimeTerminator {
    /// Wall-clock budget.
    pub max_time: Duration,
    start: Option<Instant>,
}

impl TimeTerminator {
    /// Stops once `max_time` has elapsed since the first check.
    pub fn new(max_time: Duration) -> Self {
        Self { max_time, start: None }
    }
}

impl<C, F: Fitness> Terminator<C, F> for TimeTerminator {
    fn should_terminate(
        &mut self,
        _population: &[Individual<C, F>],
        _num_generations: usize,
        _num_evaluations: usize,
        _args: &Args,
    ) -> bool {
        let start = *self.start.get_or_insert_with(Instant::now);
        start.elapsed() >= self.max_time
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::types::Direction;

    fn pop(fitnesses: &[f64]) -> Vec<Individual<(), f64>> {
        fitnesses
            .iter()
            .map(|&f| Individual::evaluated((), f, 0, Direction::Maximize))
            .collect()
    }

    #[test]
    fn test_generation_terminator() {
        let mut t = GenerationTerminator::new(2);
        let p = pop(&[1.0]);
        assert!(!t.should_terminate(&p, 1, 0, &Args::new()));
        assert!(t.should_terminate(&p, 2, 0, &Args::new()));
        assert!(t.should_terminate(&p, 3, 0, &Args::new()));
    }

    #[test]
    fn test_evaluation_terminator() {
        let mut t = EvaluationTerminator::new(100);
        let p = pop(&[1.0]);
        assert!(!t.should_terminate(&p, 0, 99, &Args::new()));
        assert!(t.should_terminate(&p, 0, 100, &Args::new()));
    }

    #[test]
    fn test_average_fitness_converged() {
        let mut t = AverageFitnessTerminator { tolerance: 0.5 };
        assert!(t.should_terminate(&pop(&[1.0, 1.1, 1.2]), 0, 0, &Args::new()));
        assert!(!t.should_terminate(&pop(&[1.0, 5.0]), 0, 0, &Args::new()));
    }

    #[test]
    fn test_diversity_terminator() {
        let close: Vec<Individual<Vec<f64>, f64>> = vec![
            Individual::evaluated(vec![0.0, 0.0], 1.0, 0, Direction::Maximize),
            Individual::evaluated(vec![0.0001, 0.0], 1.0, 0, Direction::Maximize),
        ];
        let spread: Vec<Individual<Vec<f64>, f64>> = vec![
            Individual::evaluated(vec![0.0, 0.0], 1.0, 0, Direction::Maximize),
            Individual::evaluated(vec![5.0, 0.0], 1.0, 0, Direction::Maximize),
        ];
        let mut t = DiversityTerminator::default();
        assert!(t.should_terminate(&close, 0, 0, &Args::new()));
        assert!(!t.should_terminate(&spread, 0, 0, &Args::new()));
    }

    #[test]
    fn test_no_improvement_counts_stagnant_generations() {
        let mut t = NoImprovementTerminator::new(2);
        assert!(!t.should_terminate(&pop(&[1.0]), 1, 0, &Args::new())); // first sighting
        assert!(!t.should_terminate(&pop(&[1.0]), 2, 0, &Args::new())); // stagnant 1
        assert!(t.should_terminate(&pop(&[1.0]), 3, 0, &Args::new())); // stagnant 2
    }

    #[test]
    fn test_no_improvement_resets_on_progress() {
        let mut t = NoImprovementTerminator::new(2);
        assert!(!t.should_terminate(&pop(&[1.0]), 1, 0, &Args::new()));
        assert!(!t.should_terminate(&pop(&[1.0]), 2, 0, &Args::new()));
        assert!(!t.should_terminate(&pop(&[2.0]), 3, 0, &Args::new())); // improved
        assert!(!t.should_terminate(&pop(&[2.0]), 4, 0, &Args::new()));
        assert!(t.should_terminate(&pop(&[2.0]), 5, 0, &Args::new()));
    }

    #[test]
    fn test_time_terminator_zero_budget() {
        let mut t = TimeTerminator::new(Duration::from_secs(0));
        assert!(t.should_terminate(&pop(&[1.0]), 0, 0, &Args::new()));
    }
}
