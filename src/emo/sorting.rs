//! Nondominated sorting and crowding distance.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic
//!   Algorithm: NSGA-II", IEEE Transactions on Evolutionary Computation,
//!   6(2), 182-197

use std::cmp::Ordering;

use super::pareto::Pareto;

/// Result of nondominated sorting.
///
/// `ranks[i]` is the Pareto rank of the tuple at index `i`; rank 0 is the
/// nondominated front. `fronts` groups indices by rank.
#[derive(Debug, Clone)]
pub struct NondominatedSortResult {
    /// Pareto rank per tuple (0 = nondominated front).
    pub ranks: Vec<usize>,
    /// Indices grouped by front: `fronts[0]` holds the rank-0 indices.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast nondominated sorting (Deb et al., 2002).
///
/// Partitions the input into fronts: tuples with no dominator form front
/// 0; removing front 0 and repeating yields front 1, and so on. Dominance
/// follows each tuple's own per-objective directions.
///
/// Complexity is O(m·n²) for n tuples of m objectives.
///
/// # Panics
/// Panics if `objectives` is empty or arities are inconsistent.
///
/// # Example
///
/// ```
/// use evoflow::emo::{non_dominated_sort, Pareto};
///
/// let objectives = vec![
///     Pareto::new(vec![1.0, 5.0]),
///     Pareto::new(vec![3.0, 3.0]),
///     Pareto::new(vec![5.0, 1.0]),
///     Pareto::new(vec![2.0, 2.0]), // dominated by (3, 3)
/// ];
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort(objectives: &[Pareto]) -> NondominatedSortResult {
    let n = objectives.len();
    assert!(n > 0, "objectives must not be empty");

    if n == 1 {
        return NondominatedSortResult { ranks: vec![0], fronts: vec![vec![0]] };
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];
    let mut front_0 = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            match objectives[i].dominance(&objectives[j]) {
                Some(Ordering::Greater) => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Some(Ordering::Less) => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                _ => {}
            }
        }
        if domination_count[i] == 0 {
            ranks[i] = 0;
            front_0.push(i);
        }
    }

    let mut fronts = vec![front_0];
    loop {
        let current = fronts.last().expect("fronts starts with front 0");
        let mut next_front = Vec::new();
        for &i in current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len();
                    next_front.push(j);
                }
            }
        }
        if next_front.is_empty() {
            break;
        }
        fronts.push(next_front);
    }

    NondominatedSortResult { ranks, fronts }
}

/// Crowding distance assignment (Deb et al., 2002).
///
/// Measures how isolated each tuple is within its set: per objective, the
/// set is sorted by value, the two boundary tuples receive infinite
/// distance, and every interior tuple accumulates the normalized gap
/// between its neighbors. Larger distance = more isolated = preferred when
/// truncating a front.
///
/// Sets of one or two tuples are all-boundary and receive infinity.
///
/// # Example
///
/// ```
/// use evoflow::emo::{crowding_distance, Pareto};
///
/// let front = vec![
///     Pareto::new(vec![1.0, 5.0]),
///     Pareto::new(vec![3.0, 3.0]),
///     Pareto::new(vec![5.0, 1.0]),
/// ];
/// let distances = crowding_distance(&front);
/// assert!(distances[0].is_infinite());
/// assert!(distances[1].is_finite());
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distance(objectives: &[Pareto]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];

    for obj_idx in 0..m {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            objectives[a][obj_idx]
                .partial_cmp(&objectives[b][obj_idx])
                .unwrap_or(Ordering::Equal)
        });

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = objectives[indices[0]][obj_idx];
        let max_val = objectives[indices[n - 1]][obj_idx];
        let range = max_val - min_val;
        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = objectives[indices[i - 1]][obj_idx];
                let next = objectives[indices[i + 1]][obj_idx];
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

// ============================================================================
// Tests
// ============================================================================
