//! Evolutionary multiobjective optimization.
//!
//! Multiobjective fitness has no total order — only the dominance
//! relation on [`Pareto`] tuples. This module provides the machinery
//! built on it:
//!
//! - [`non_dominated_sort`] / [`crowding_distance`]: NSGA-II ranking
//! - [`NsgaReplacer`]: nondominated-sorting replacement with crowding
//!   truncation
//! - [`ParetoArchiver`]: nondominated archive, optionally capacity-bounded
//!   with crowding-based eviction
//! - [`GridArchiver`]: PAES-style adaptive hypergrid archive
//! - [`nsga2_engine`]: an [`Engine`] preset wired for NSGA-II
//!
//! # Example
//!
//! ```
//! use evoflow::args::Args;
//! use evoflow::ec::EcConfig;
//! use evoflow::emo::{nsga2_engine, Pareto};
//! use rand::{Rng, RngCore};
//!
//! // Two objectives: maximize x and maximize 1 - x over [0, 1].
//! let mut generator =
//!     |rng: &mut dyn RngCore, _: &Args| vec![rng.random_range(0.0..1.0)];
//! let mut evaluator = |candidates: &[Vec<f64>], _: &Args| {
//!     candidates
//!         .iter()
//!         .map(|c| Pareto::new(vec![c[0], 1.0 - c[0]]))
//!         .collect::<Vec<_>>()
//! };
//!
//! let mut engine = nsga2_engine::<Vec<f64>>()
//!     .with_terminator(evoflow::ec::terminators::GenerationTerminator::new(5));
//! let config = EcConfig::default().with_pop_size(20).with_seed(42);
//! let outcome = engine
//!     .evolve(&mut generator, &mut evaluator, &config, &Args::new())
//!     .unwrap();
//! assert!(!outcome.archive.is_empty());
//! ```
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic
//!   Algorithm: NSGA-II"
//! - Knowles & Corne (2000), "Approximating the Nondominated Front Using
//!   the Pareto Archived Evolution Strategy"

mod archivers;
mod pareto;
mod replacers;
mod sorting;

pub use archivers::{GridArchiver, ParetoArchiver};
pub use pareto::Pareto;
pub use replacers::NsgaReplacer;
pub use sorting::{crowding_distance, non_dominated_sort, NondominatedSortResult};

use crate::ec::selectors::TournamentSelector;
use crate::ec::Engine;

/// NSGA-II wiring: binary tournament selection producing population-size
/// parents, nondominated-sorting replacement, and an unbounded Pareto
/// archive.
///
/// Add variators appropriate to the candidate representation and a
/// terminator before running.
pub fn nsga2_engine<C: Clone + PartialEq + 'static>() -> Engine<C, Pareto> {
    Engine::new()
        .with_selector(TournamentSelector { num_selected: None, tournament_size: 2 })
        .with_replacer(NsgaReplacer)
        .with_archiver(ParetoArchiver::new())
}
