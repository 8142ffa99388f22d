//! Particle swarm optimization.
//!
//! A swarm run reinterprets the engine's individuals as particles: the
//! candidate is a [`Particle`] whose position is the solution, and the
//! selector/variator/replacer trio implements the velocity update instead
//! of generic selection and variation. Neighborhoods come from a
//! [`Topology`] recomputed from the population order each cycle.
//!
//! # Example
//!
//! ```
//! use evoflow::args::Args;
//! use evoflow::ec::terminators::GenerationTerminator;
//! use evoflow::ec::{Bounds, Direction, EcConfig};
//! use evoflow::swarm::{pso_engine, ParticleBounder, ParticleEvaluator,
//!     ParticleGenerator, PsoConfig};
//! use rand::{Rng, RngCore};
//!
//! // Maximize -x² over [-10, 10].
//! let mut generator = ParticleGenerator::new(|rng: &mut dyn RngCore, _: &Args| {
//!     vec![rng.random_range(-10.0..10.0)]
//! });
//! let mut evaluator =
//!     ParticleEvaluator::new(|position: &[f64], _: &Args| -(position[0] * position[0]));
//!
//! let mut engine = pso_engine(&PsoConfig::default(), Direction::Maximize)
//!     .unwrap()
//!     .with_bounder(ParticleBounder::new(Bounds::uniform(-10.0, 10.0)))
//!     .with_terminator(GenerationTerminator::new(30));
//!
//! let config = EcConfig::default().with_pop_size(10).with_seed(42);
//! let outcome = engine
//!     .evolve(&mut generator, &mut evaluator, &config, &Args::new())
//!     .unwrap();
//! let best_visited = outcome
//!     .population
//!     .iter()
//!     .filter_map(|ind| ind.candidate.best_fitness)
//!     .fold(f64::NEG_INFINITY, f64::max);
//! assert!(best_visited > -25.0);
//! ```
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Clerc & Kennedy (2002), "The Particle Swarm — Explosion, Stability,
//!   and Convergence in a Multidimensional Complex Space"

mod particle;
mod topology;

pub use particle::{
    Particle, ParticleBounder, ParticleEvaluator, ParticleGenerator, SwarmReplacer,
    SwarmSelector, SwarmVariator,
};
pub use topology::Topology;

use crate::ec::{Direction, Engine};
use crate::error::EcError;

/// Swarm parameters.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Neighborhood structure (default: star).
    pub topology: Topology,
    /// Cognitive rate φ1 — pull toward the particle's own best.
    pub cognitive_rate: f64,
    /// Social rate φ2 — pull toward the neighborhood best.
    pub social_rate: f64,
    /// Scale the update by the Clerc constriction coefficient.
    ///
    /// Requires `φ1 + φ2 > 4`.
    pub constriction: bool,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            topology: Topology::Star,
            cognitive_rate: 2.1,
            social_rate: 2.1,
            constriction: false,
        }
    }
}

impl PsoConfig {
    /// Sets the topology.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Sets the cognitive rate.
    pub fn with_cognitive_rate(mut self, rate: f64) -> Self {
        self.cognitive_rate = rate;
        self
    }

    /// Sets the social rate.
    pub fn with_social_rate(mut self, rate: f64) -> Self {
        self.social_rate = rate;
        self
    }

    /// Enables or disables constriction.
    pub fn with_constriction(mut self, constriction: bool) -> Self {
        self.constriction = constriction;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), EcError> {
        if self.cognitive_rate < 0.0 || self.social_rate < 0.0 {
            return Err(EcError::Config("swarm rates must be non-negative".into()));
        }
        if self.constriction && self.cognitive_rate + self.social_rate <= 4.0 {
            return Err(EcError::Config(
                "constriction requires cognitive_rate + social_rate > 4".into(),
            ));
        }
        Ok(())
    }
}

/// Wires an [`Engine`] for particle swarm optimization.
///
/// `direction` must match the direction passed to
/// [`EcConfig`](crate::ec::EcConfig) at run time — the variator ranks
/// personal bests with it. Install a [`ParticleBounder`] and a terminator
/// before running.
pub fn pso_engine(
    config: &PsoConfig,
    direction: Direction,
) -> Result<Engine<Particle, f64>, EcError> {
    config.validate()?;
    Ok(Engine::new()
        .with_selector(SwarmSelector)
        .with_variator(SwarmVariator {
            topology: config.topology,
            cognitive_rate: config.cognitive_rate,
            social_rate: config.social_rate,
            constriction: config.constriction,
            direction,
        })
        .with_replacer(SwarmReplacer))
}

// ============================================================================
// Tests
// ============================================================================
