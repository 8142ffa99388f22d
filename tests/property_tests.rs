//! Property-based tests for evoflow
//!
//! Uses proptest to verify algebraic invariants: the dominance relation,
//! front partitioning, crowding distance, bounding, and pheromone bounds.

use evoflow::args::Args;
use evoflow::ec::{Bounder, Bounds, Direction, Fitness};
use evoflow::emo::{crowding_distance, non_dominated_sort, Pareto};
use evoflow::trail::PheromoneMatrix;
use proptest::prelude::*;

/// Two objective tuples of matching arity.
fn tuple_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..5).prop_flat_map(|arity| {
        (
            prop::collection::vec(-100.0..100.0f64, arity),
            prop::collection::vec(-100.0..100.0f64, arity),
        )
    })
}

/// A set of objective tuples of matching arity.
fn tuple_set() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..4).prop_flat_map(|arity| {
        prop::collection::vec(prop::collection::vec(-100.0..100.0f64, arity), 3..20)
    })
}

proptest! {
    // ==================== Dominance ====================

    #[test]
    fn dominance_is_irreflexive(values in prop::collection::vec(-100.0..100.0f64, 1..6)) {
        let a = Pareto::new(values);
        prop_assert!(!a.dominates(&a));
    }

    #[test]
    fn dominance_is_antisymmetric((a, b) in tuple_pair()) {
        let a = Pareto::new(a);
        let b = Pareto::new(b);
        prop_assert!(!(a.dominates(&b) && b.dominates(&a)));
    }

    #[test]
    fn dominance_agrees_with_scalar_order_in_one_dimension(x in -100.0..100.0f64, y in -100.0..100.0f64) {
        let a = Pareto::new(vec![x]);
        let b = Pareto::new(vec![y]);
        prop_assert_eq!(a.dominates(&b), x > y);
    }

    #[test]
    fn dominance_inverts_under_minimization((a, b) in tuple_pair()) {
        let arity = a.len();
        let max_a = Pareto::new(a.clone());
        let max_b = Pareto::new(b.clone());
        let min_a = Pareto::with_directions(a, vec![Direction::Minimize; arity]);
        let min_b = Pareto::with_directions(b, vec![Direction::Minimize; arity]);
        prop_assert_eq!(max_a.dominates(&max_b), min_b.dominates(&min_a));
    }

    // ==================== Nondominated sorting ====================

    #[test]
    fn fronts_partition_the_set(values in tuple_set()) {
        let objectives: Vec<Pareto> = values.into_iter().map(Pareto::new).collect();
        let result = non_dominated_sort(&objectives);

        let mut seen: Vec<usize> = result.fronts.iter().flatten().copied().collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..objectives.len()).collect::<Vec<_>>());
    }

    #[test]
    fn dominators_sit_in_earlier_fronts(values in tuple_set()) {
        let objectives: Vec<Pareto> = values.into_iter().map(Pareto::new).collect();
        let result = non_dominated_sort(&objectives);

        for i in 0..objectives.len() {
            for j in 0..objectives.len() {
                if objectives[i].dominates(&objectives[j]) {
                    prop_assert!(result.ranks[i] < result.ranks[j]);
                }
            }
        }
    }

    #[test]
    fn front_zero_is_nondominated(values in tuple_set()) {
        let objectives: Vec<Pareto> = values.into_iter().map(Pareto::new).collect();
        let result = non_dominated_sort(&objectives);

        for &i in &result.fronts[0] {
            for other in &objectives {
                prop_assert!(!other.dominates(&objectives[i]));
            }
        }
    }

    // ==================== Crowding distance ====================

    #[test]
    fn crowding_distances_are_non_negative(values in tuple_set()) {
        let objectives: Vec<Pareto> = values.into_iter().map(Pareto::new).collect();
        for d in crowding_distance(&objectives) {
            prop_assert!(d >= 0.0);
        }
    }

    #[test]
    fn crowding_has_unbounded_extremes(values in tuple_set()) {
        let objectives: Vec<Pareto> = values.into_iter().map(Pareto::new).collect();
        let distances = crowding_distance(&objectives);
        let unbounded = distances.iter().filter(|d| d.is_infinite()).count();
        prop_assert!(unbounded >= 2);
    }

    // ==================== Bounding ====================

    #[test]
    fn clamped_candidates_stay_in_range(
        candidate in prop::collection::vec(-1000.0..1000.0f64, 1..20),
        lower in -50.0..0.0f64,
        width in 0.1..100.0f64,
    ) {
        let upper = lower + width;
        let bounded = Bounds::uniform(lower, upper).bound(candidate, &Args::new());
        for component in bounded {
            prop_assert!(component >= lower && component <= upper);
        }
    }

    // ==================== Pheromone bounds ====================

    #[test]
    fn trails_respect_the_floor(
        initial in 0.1..10.0f64,
        rho in 0.0..0.99f64,
        deposits in prop::collection::vec((0u32..8, 0.0..5.0f64), 0..20),
    ) {
        let floor = 0.05f64;
        let matrix: PheromoneMatrix<u32> = PheromoneMatrix::new(initial.max(floor), floor);
        for (component, amount) in deposits {
            matrix.decay(rho);
            matrix.deposit(&component, amount);
            prop_assert!(matrix.get(&component) >= floor);
        }
        for component in 0u32..8 {
            prop_assert!(matrix.get(&component) >= floor);
        }
    }

    #[test]
    fn evaporation_then_reinforcement_formula(
        initial in 0.1..10.0f64,
        rho in 0.0..0.9f64,
        delta in 0.0..5.0f64,
    ) {
        let floor = 1e-6f64;
        let matrix: PheromoneMatrix<u32> = PheromoneMatrix::new(initial, floor);
        matrix.decay(rho);
        matrix.deposit(&0, delta);
        let expected = (initial * (1.0 - rho)).max(floor) + delta;
        prop_assert!((matrix.get(&0) - expected).abs() < 1e-9);
        prop_assert!(matrix.get(&0) >= floor);
    }

    // ==================== Scalar fitness ====================

    #[test]
    fn scalar_comparison_flips_with_direction(x in -100.0..100.0f64, y in -100.0..100.0f64) {
        let forward = x.compare(&y, Direction::Maximize);
        let backward = x.compare(&y, Direction::Minimize);
        prop_assert_eq!(forward.map(std::cmp::Ordering::reverse), backward);
    }
}
