//! Evolutionary computation core: the engine and its operator pipeline.
//!
//! The [`Engine`] runs the canonical cycle — generate → evaluate →
//! select → vary → evaluate → replace → migrate → archive → observe →
//! terminate? — over pluggable strategy objects. Users supply a
//! [`Generator`] and an [`Evaluator`] (the problem definition); all other
//! roles default to inert implementations and are swapped in per
//! algorithm.
//!
//! # Core types
//!
//! - [`Individual`] / [`Population`]: a candidate with its fitness; the
//!   engine's unit of work and its bookkeeping container.
//! - [`Fitness`] / [`Direction`]: the comparison semantics.
//! - [`EcConfig`]: run parameters (population size, seeds, direction,
//!   RNG seed).
//!
//! # Operator catalogs
//!
//! - [`selectors`]: truncation, uniform, fitness-proportionate, rank,
//!   tournament
//! - [`variators`]: Gaussian and bit-flip mutation; n-point, uniform, and
//!   blend crossover
//! - [`replacers`]: generational, truncation, steady-state, plus, comma,
//!   random, crowding
//! - [`terminators`]: generation, evaluation, convergence, diversity,
//!   no-improvement, wall-clock
//! - [`observers`], [`migrators`], [`archivers`], [`evaluators`],
//!   [`bounder`]
//!
//! # Example
//!
//! ```
//! use evoflow::args::Args;
//! use evoflow::ec::replacers::GenerationalReplacer;
//! use evoflow::ec::selectors::TournamentSelector;
//! use evoflow::ec::terminators::GenerationTerminator;
//! use evoflow::ec::variators::GaussianMutation;
//! use evoflow::ec::{Bounds, EcConfig, Direction, Engine};
//! use rand::{Rng, RngCore};
//!
//! // Minimize the sphere function over [-5, 5]^4.
//! let mut generator = |rng: &mut dyn RngCore, _: &Args| {
//!     (0..4).map(|_| rng.random_range(-5.0..5.0)).collect::<Vec<f64>>()
//! };
//! let mut evaluator = |candidates: &[Vec<f64>], _: &Args| {
//!     candidates
//!         .iter()
//!         .map(|c| c.iter().map(|x| x * x).sum::<f64>())
//!         .collect::<Vec<f64>>()
//! };
//!
//! let mut engine = Engine::new()
//!     .with_selector(TournamentSelector { num_selected: None, tournament_size: 2 })
//!     .with_variator(GaussianMutation { mutation_rate: 0.25, mean: 0.0, stdev: 0.5 })
//!     .with_replacer(GenerationalReplacer { num_elites: 1 })
//!     .with_bounder(Bounds::uniform(-5.0, 5.0))
//!     .with_terminator(GenerationTerminator::new(50));
//!
//! let config = EcConfig::default()
//!     .with_pop_size(30)
//!     .with_direction(Direction::Minimize)
//!     .with_seed(42);
//! let outcome = engine
//!     .evolve(&mut generator, &mut evaluator, &config, &Args::new())
//!     .unwrap();
//! assert!(*outcome.population.best().unwrap().fitness() < 5.0);
//! ```

pub mod archivers;
pub mod bounder;
mod engine;
pub mod evaluators;
pub mod migrators;
pub mod observers;
mod pipeline;
pub mod replacers;
pub mod selectors;
pub mod terminators;
mod types;
pub mod variators;

pub use bounder::{Bounder, Bounds, DiscreteBounder, IdentityBounder};
pub use engine::{ga_engine, EcConfig, Engine, EvolveOutcome};
pub use migrators::SharedBufferMigrator;
pub use pipeline::{
    Archiver, Evaluator, Generator, Migrator, Observer, Replacer, Selector, Terminator, Variator,
};
pub use types::{
    best_of, preference_cmp, sort_best_first, Direction, Fitness, Individual, Population,
};
