//! Population fitness statistics.

use crate::ec::{best_of, preference_cmp, Fitness, Individual};

/// Summary statistics over a population's scalar fitness values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessStatistics {
    /// Fitness of the most preferred individual.
    pub best: f64,
    /// Fitness of the least preferred individual.
    pub worst: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// Computes fitness statistics for a population.
///
/// "Best" and "worst" follow the run direction, so under minimization the
/// best value is the smallest. Returns `None` for an empty population or
/// when any fitness has no scalar projection (multiobjective runs).
pub fn fitness_statistics<C, F: Fitness>(
    population: &[Individual<C, F>],
) -> Option<FitnessStatistics> {
    if population.is_empty() {
        return None;
    }
    let mut scalars = Vec::with_capacity(population.len());
    for ind in population {
        scalars.push(ind.fitness().to_scalar()?);
    }

    let n = scalars.len() as f64;
    let mean = scalars.iter().sum::<f64>() / n;
    let variance = scalars.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;

    let mut sorted = scalars.clone();
    sorted.sort_by(f64::total_cmp);
    let median = if sorted.len() % 2 == 1 {
        sorted[sorted.len() / 2]
    } else {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
    };

    let best = best_of(population)?.fitness().to_scalar()?;
    let worst = population
        .iter()
        .min_by(|a, b| preference_cmp(a, b))?
        .fitness()
        .to_scalar()?;

    Some(FitnessStatistics { best, worst, mean, median, std_dev: variance.sqrt() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::Direction;

    fn pop(fitnesses: &[f64], direction: Direction) -> Vec<Individual<(), f64>> {
        fitnesses
            .iter()
            .map(|&f| Individual::evaluated((), f, 0, direction))
            .collect()
    }

    #[test]
    fn test_statistics_maximize() {
        let stats = fitness_statistics(&pop(&[1.0, 2.0, 3.0, 4.0], Direction::Maximize)).unwrap();
        assert_eq!(stats.best, 4.0);
        assert_eq!(stats.worst, 1.0);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert!((stats.std_dev - 1.118033988749895).abs() < 1e-12);
    }

    #[test]
    fn test_statistics_minimize() {
        let stats = fitness_statistics(&pop(&[1.0, 2.0, 3.0], Direction::Minimize)).unwrap();
        assert_eq!(stats.best, 1.0);
        assert_eq!(stats.worst, 3.0);
        assert_eq!(stats.median, 2.0);
    }

    #[test]
    fn test_empty_population() {
        let empty: Vec<Individual<(), f64>> = Vec::new();
        assert!(fitness_statistics(&empty).is_none());
    }

    #[test]
    fn test_single_individual() {
        let stats = fitness_statistics(&pop(&[5.0], Direction::Maximize)).unwrap();
        assert_eq!(stats.best, 5.0);
        assert_eq!(stats.worst, 5.0);
        assert_eq!(stats.std_dev, 0.0);
    }
}
