//! Composable engine for population-based stochastic optimization.
//!
//! One control loop drives every algorithm family in this crate. Users
//! supply the problem-specific parts (how candidates are created and
//! scored); the engine supplies the algorithm-specific parts — selection,
//! variation, replacement, migration, and archival — as independently
//! swappable strategy objects invoked in a fixed order each generation.
//!
//! # Modules
//!
//! - [`ec`]: The [`Engine`](ec::Engine) control loop, the operator
//!   pipeline contract, and catalogs of selectors, variators, replacers,
//!   terminators, observers, migrators, archivers, and bounders.
//! - [`emo`]: Multiobjective extension — [`Pareto`](emo::Pareto) fitness
//!   tuples, nondominated sorting, crowding distance, NSGA-II replacement,
//!   and Pareto/grid archives.
//! - [`swarm`]: Particle swarm optimization — particle state, star/ring
//!   neighborhood topologies, and the velocity update rule.
//! - [`trail`]: Ant-colony-style constructive search — a shared pheromone
//!   matrix, probabilistic construction, and the evaporate-then-reinforce
//!   update.
//! - [`analysis`]: Population fitness statistics for observers.
//!
//! # Architecture
//!
//! The engine is the sole caller of every pipeline role; roles never call
//! each other directly. The loop is strictly single-threaded — the only
//! concurrency lives inside an evaluator implementation (see
//! `ec::evaluators::ParallelEvaluator` behind the `parallel` feature).
//! All run-scoped side state (archive, pheromone matrix) is explicit and
//! owned per engine instance, so several engines can run concurrently as
//! islands and exchange individuals through a migrator.
//!
//! # References
//!
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Knowles & Corne (2000), *Approximating the Nondominated Front Using
//!   the Pareto Archived Evolution Strategy*
//! - Kennedy & Eberhart (1995), *Particle Swarm Optimization*
//! - Dorigo & Gambardella (1997), *Ant Colony System*

pub mod analysis;
pub mod args;
pub mod ec;
pub mod emo;
pub mod error;
pub mod random;
pub mod swarm;
pub mod trail;
