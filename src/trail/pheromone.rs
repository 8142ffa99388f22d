//! The shared pheromone matrix.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

/// Trail strengths indexed by component identifier.
///
/// The matrix is run-scoped shared state: the constructing variator reads
/// it while the trail updater (an archiver) is its only writer, and both
/// hold the same matrix through an `Arc`. Island engines may share one
/// matrix the same way; interior locking makes concurrent readers safe.
///
/// Components that have never been deposited on carry a *base* strength
/// that starts at the configured initial value and evaporates along with
/// everything else, so decay is uniform over the whole component space.
///
/// Invariants: strengths are never negative and never fall below the
/// configured floor, which keeps every option reachable during
/// construction.
#[derive(Debug)]
pub struct PheromoneMatrix<K> {
    inner: RwLock<Inner<K>>,
    floor: f64,
}

#[derive(Debug)]
struct Inner<K> {
    trails: HashMap<K, f64>,
    base: f64,
}

impl<K: Eq + Hash + Clone> PheromoneMatrix<K> {
    /// Creates a matrix where every component starts at `initial`.
    ///
    /// # Panics
    /// Panics unless `0 < floor <= initial`.
    pub fn new(initial: f64, floor: f64) -> Self {
        assert!(floor > 0.0, "pheromone floor must be positive");
        assert!(initial >= floor, "initial pheromone must not sit below the floor");
        Self {
            inner: RwLock::new(Inner { trails: HashMap::new(), base: initial }),
            floor,
        }
    }

    /// The configured floor.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Current trail strength of `component`.
    pub fn get(&self, component: &K) -> f64 {
        let inner = self.inner.read().expect("pheromone matrix poisoned");
        inner.trails.get(component).copied().unwrap_or(inner.base)
    }

    /// Evaporates every trail: `trail *= (1 - rate)`, floored.
    ///
    /// Must run strictly before any reinforcement in an update cycle.
    pub fn decay(&self, rate: f64) {
        let mut inner = self.inner.write().expect("pheromone matrix poisoned");
        let keep = 1.0 - rate;
        inner.base = (inner.base * keep).max(self.floor);
        let floor = self.floor;
        for trail in inner.trails.values_mut() {
            *trail = (*trail * keep).max(floor);
        }
    }

    /// Reinforces `component` by `amount` (negative amounts are ignored).
    pub fn deposit(&self, component: &K, amount: f64) {
        let mut inner = self.inner.write().expect("pheromone matrix poisoned");
        let current = inner.trails.get(component).copied().unwrap_or(inner.base);
        let updated = (current + amount.max(0.0)).max(self.floor);
        inner.trails.insert(component.clone(), updated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_components_carry_initial() {
        let matrix: PheromoneMatrix<u32> = PheromoneMatrix::new(1.0, 0.01);
        assert_eq!(matrix.get(&7), 1.0);
    }

    #[test]
    fn test_decay_applies_to_unseen_components() {
        let matrix: PheromoneMatrix<u32> = PheromoneMatrix::new(1.0, 0.01);
        matrix.decay(0.5);
        assert_eq!(matrix.get(&7), 0.5);
    }

    #[test]
    fn test_decay_then_deposit_formula() {
        let matrix: PheromoneMatrix<u32> = PheromoneMatrix::new(1.0, 0.01);
        matrix.decay(0.5);
        matrix.deposit(&0, 1.0);
        // trail_new = trail_old * (1 - rho) + delta
        assert_eq!(matrix.get(&0), 1.5);
        assert_eq!(matrix.get(&1), 0.5);
    }

    #[test]
    fn test_floor_is_never_crossed() {
        let matrix: PheromoneMatrix<u32> = PheromoneMatrix::new(1.0, 0.1);
        matrix.deposit(&0, 0.0);
        for _ in 0..100 {
            matrix.decay(0.9);
        }
        assert_eq!(matrix.get(&0), 0.1);
        assert_eq!(matrix.get(&1), 0.1);
    }

    #[test]
    fn test_negative_deposit_is_ignored() {
        let matrix: PheromoneMatrix<u32> = PheromoneMatrix::new(1.0, 0.1);
        matrix.deposit(&0, -5.0);
        assert_eq!(matrix.get(&0), 1.0);
    }

    #[test]
    #[should_panic(expected = "pheromone floor must be positive")]
    fn test_zero_floor_rejected() {
        let _: PheromoneMatrix<u32> = PheromoneMatrix::new(1.0, 0.0);
    }
}
