//! Pareto multiobjective fitness.

use std::cmp::Ordering;

use crate::ec::{Direction, Fitness};

/// An ordered tuple of per-objective fitness values.
///
/// Pareto tuples have no total order — only the dominance relation: a
/// tuple dominates another when it is no worse in every objective and
/// strictly better in at least one, each objective compared under its own
/// direction. Incomparable pairs (neither dominates) are the normal case
/// on a front.
///
/// When objectives mix maximization and minimization, encode the senses
/// in the tuple via [`with_directions`](Pareto::with_directions) and leave
/// the run direction at its default `Maximize`; a run-level `Minimize`
/// inverts the whole comparison.
///
/// ```
/// use evoflow::emo::Pareto;
///
/// let a = Pareto::new(vec![2.0, 4.0]);
/// let b = Pareto::new(vec![1.0, 4.0]);
/// let c = Pareto::new(vec![4.0, 1.0]);
/// assert!(a.dominates(&b));
/// assert!(!a.dominates(&c) && !c.dominates(&a)); // incomparable
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pareto {
    values: Vec<f64>,
    directions: Vec<Direction>,
}

impl Pareto {
    /// Creates a tuple with every objective maximized.
    pub fn new(values: Vec<f64>) -> Self {
        let directions = vec![Direction::Maximize; values.len()];
        Self { values, directions }
    }

    /// Creates a tuple with per-objective directions.
    ///
    /// # Panics
    /// Panics if `values` and `directions` have different lengths.
    pub fn with_directions(values: Vec<f64>, directions: Vec<Direction>) -> Self {
        assert_eq!(
            values.len(),
            directions.len(),
            "one direction per objective is required"
        );
        Self { values, directions }
    }

    /// The objective values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The per-objective directions.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Number of objectives.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the tuple has no objectives.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `self` dominates `other` under the per-objective directions.
    ///
    /// # Panics
    /// Panics if the tuples have different arity.
    pub fn dominates(&self, other: &Pareto) -> bool {
        self.dominance(other) == Some(Ordering::Greater)
    }

    /// Full dominance comparison.
    ///
    /// `Greater` means `self` dominates, `Less` means `other` dominates,
    /// `Equal` means the tuples tie in every objective, and `None` means
    /// they are incomparable.
    ///
    /// # Panics
    /// Panics if the tuples have different arity.
    pub fn dominance(&self, other: &Pareto) -> Option<Ordering> {
        assert_eq!(self.len(), other.len(), "objective arity mismatch");
        let mut self_better = false;
        let mut other_better = false;
        for ((a, b), direction) in
            self.values.iter().zip(other.values.iter()).zip(self.directions.iter())
        {
            match a.compare(b, *direction)? {
                Ordering::Greater => self_better = true,
                Ordering::Less => other_better = true,
                Ordering::Equal => {}
            }
        }
        match (self_better, other_better) {
            (true, false) => Some(Ordering::Greater),
            (false, true) => Some(Ordering::Less),
            (false, false) => Some(Ordering::Equal),
            (true, true) => None,
        }
    }
}

impl Fitness for Pareto {
    fn compare(&self, other: &Self, direction: Direction) -> Option<Ordering> {
        let ord = self.dominance(other)?;
        Some(match direction {
            Direction::Maximize => ord,
            Direction::Minimize => ord.reverse(),
        })
    }
}

impl std::ops::Index<usize> for Pareto {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl From<Vec<f64>> for Pareto {
    fn from(values: Vec<f64>) -> Self {
        Pareto::new(values)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominates_when_better_everywhere() {
        let a = Pareto::new(vec![2.0, 2.0]);
        let b = Pareto::new(vec![1.0, 1.0]);
        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
    }

    #[test]
    fn test_dominates_when_no_worse_and_better_somewhere() {
        let a = Pareto::new(vec![2.0, 1.0]);
        let b = Pareto::new(vec![1.0, 1.0]);
        assert!(a.dominates(&b));
    }

    #[test]
    fn test_incomparable_pair() {
        let a = Pareto::new(vec![1.0, 5.0]);
        let b = Pareto::new(vec![5.0, 1.0]);
        assert_eq!(a.dominance(&b), None);
    }

    #[test]
    fn test_irreflexive() {
        let a = Pareto::new(vec![3.0, 4.0]);
        assert!(!a.dominates(&a));
        assert_eq!(a.dominance(&a), Some(Ordering::Equal));
    }

    #[test]
    fn test_mixed_directions() {
        // First objective maximized, second minimized.
        let directions = vec![Direction::Maximize, Direction::Minimize];
        let a = Pareto::with_directions(vec![2.0, 1.0], directions.clone());
        let b = Pareto::with_directions(vec![1.0, 3.0], directions);
        assert!(a.dominates(&b));
    }

    #[test]
    fn test_run_level_minimize_inverts() {
        let a = Pareto::new(vec![2.0, 2.0]);
        let b = Pareto::new(vec![1.0, 1.0]);
        assert_eq!(a.compare(&b, Direction::Maximize), Some(Ordering::Greater));
        assert_eq!(a.compare(&b, Direction::Minimize), Some(Ordering::Less));
    }

    #[test]
    #[should_panic(expected = "objective arity mismatch")]
    fn test_arity_mismatch_panics() {
        let a = Pareto::new(vec![1.0, 2.0]);
        let b = Pareto::new(vec![1.0]);
        let _ = a.dominance(&b);
    }

    #[test]
    fn test_transitive_chain() {
        let a = Pareto::new(vec![3.0, 3.0]);
        let b = Pareto::new(vec![2.0, 2.0]);
        let c = Pareto::new(vec![1.0, 1.0]);
        assert!(a.dominates(&b) && b.dominates(&c) && a.dominates(&c));
    }
}
