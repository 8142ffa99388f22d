//! Particle state and the swarm operator set.
//!
//! A particle is the engine's candidate: its position is the solution, and
//! it carries the velocity and personal-best memory the update rule needs.
//! The swarm roles divide the work so that no state lives outside the
//! pipeline:
//!
//! - [`SwarmSelector`] selects every particle and folds the current
//!   evaluation into its personal best (which also primes the very first
//!   cycle).
//! - [`SwarmVariator`] applies the velocity update per dimension.
//! - The engine's bounder then maps positions back into feasible space.
//! - [`SwarmReplacer`] installs the re-evaluated particles as the new
//!   population and refreshes each personal best.

use rand::Rng;
use rand::RngCore;

use crate::args::Args;
use crate::ec::{Bounder, Direction, Evaluator, Fitness, Generator, Individual, Replacer,
    Selector, Variator};
use crate::error::EvalError;

use super::topology::Topology;

/// A particle: a position in real space plus swarm state.
///
/// The position *is* the candidate solution; `best_position` and
/// `best_fitness` record the best point this particle has visited.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    /// Current position.
    pub position: Vec<f64>,
    /// Current velocity, one component per dimension.
    pub velocity: Vec<f64>,
    /// Best position this particle has visited.
    pub best_position: Vec<f64>,
    /// Fitness at `best_position`; `None` until first evaluated.
    pub best_fitness: Option<f64>,
}

impl Particle {
    /// Creates a particle at rest at `position`.
    pub fn new(position: Vec<f64>) -> Self {
        let velocity = vec![0.0; position.len()];
        let best_position = position.clone();
        Self { position, velocity, best_position, best_fitness: None }
    }

    /// Folds `fitness` into the personal best if it improves it.
    fn update_best(&mut self, fitness: f64, direction: Direction) {
        let improved = match self.best_fitness {
            None => true,
            Some(best) => {
                fitness.compare(&best, direction) == Some(std::cmp::Ordering::Greater)
            }
        };
        if improved {
            self.best_fitness = Some(fitness);
            self.best_position = self.position.clone();
        }
    }
}

/// Wraps a position generator into a particle generator.
pub struct ParticleGenerator<G> {
    positions: G,
}

impl<G> ParticleGenerator<G> {
    /// Generates particles at rest at positions drawn from `positions`.
    pub fn new(positions: G) -> Self {
        Self { positions }
    }
}

impl<G: Generator<Vec<f64>>> Generator<Particle> for ParticleGenerator<G> {
    fn generate(&mut self, rng: &mut dyn RngCore, args: &Args) -> Particle {
        Particle::new(self.positions.generate(rng, args))
    }
}

/// Wraps a position-scoring function into a particle evaluator.
pub struct ParticleEvaluator<T> {
    score: T,
}

impl<T> ParticleEvaluator<T> {
    /// Scores each particle's position with `score`.
    pub fn new(score: T) -> Self {
        Self { score }
    }
}

impl<T> Evaluator<Particle, f64> for ParticleEvaluator<T>
where
    T: FnMut(&[f64], &Args) -> f64,
{
    fn evaluate(&mut self, candidates: &[Particle], args: &Args) -> Result<Vec<f64>, EvalError> {
        Ok(candidates.iter().map(|p| (self.score)(&p.position, args)).collect())
    }
}

/// Lifts a position bounder to particles.
///
/// Only the position is bounded; velocity is left untouched.
pub struct ParticleBounder<B> {
    inner: B,
}

impl<B> ParticleBounder<B> {
    /// Bounds particle positions with `inner`.
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

impl<B: Bounder<Vec<f64>>> Bounder<Particle> for ParticleBounder<B> {
    fn bound(&self, mut particle: Particle, args: &Args) -> Particle {
        particle.position = self.inner.bound(particle.position, args);
        particle
    }
}

/// Selects every particle as a parent, syncing personal bests first.
///
/// Folding the current fitness into each particle's memory here means the
/// variator always sees a populated personal best, including on the first
/// cycle right after the initial evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwarmSelector;

impl Selector<Particle, f64> for SwarmSelector {
    fn select(
        &mut self,
        population: &[Individual<Particle, f64>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<Particle, f64>> {
        population
            .iter()
            .map(|ind| {
                let mut parent = ind.clone();
                let fitness = *ind.fitness();
                parent.candidate.update_best(fitness, ind.direction);
                parent
            })
            .collect()
    }
}

/// The per-cycle velocity and position update.
///
/// For each dimension `d` of each particle:
///
/// ```text
/// v[d] = K · (v[d] + φ1·R1·(best[d] − x[d]) + φ2·R2·(hood_best[d] − x[d]))
/// x[d] = x[d] + v[d]
/// ```
///
/// `R1`, `R2` are fresh uniform draws in `[0, 1)` per dimension per
/// particle per cycle. `K` is 1 unless constriction is enabled, in which
/// case `K = 2 / |2 − φ − sqrt(φ² − 4φ)|` with `φ = φ1 + φ2 > 4`
/// (enforced by [`PsoConfig::validate`](super::PsoConfig::validate)).
///
/// The neighborhood best is the best personal best among the particle's
/// neighbors under the configured topology, recomputed from the current
/// population order every cycle.
#[derive(Debug, Clone, Copy)]
pub struct SwarmVariator {
    /// Neighborhood structure.
    pub topology: Topology,
    /// Cognitive rate φ1.
    pub cognitive_rate: f64,
    /// Social rate φ2.
    pub social_rate: f64,
    /// Whether to scale the update by the constriction coefficient.
    pub constriction: bool,
    /// Run direction, used to rank personal bests.
    pub direction: Direction,
}

impl SwarmVariator {
    fn coefficient(&self) -> f64 {
        if !self.constriction {
            return 1.0;
        }
        let phi = self.cognitive_rate + self.social_rate;
        2.0 / (2.0 - phi - (phi * phi - 4.0 * phi).sqrt()).abs()
    }
}

impl Variator<Particle> for SwarmVariator {
    fn vary(
        &mut self,
        candidates: Vec<Particle>,
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Particle> {
        let neighborhoods = self.topology.neighborhoods(candidates.len());
        let k = self.coefficient();

        candidates
            .iter()
            .zip(neighborhoods)
            .map(|(particle, hood)| {
                let hood_best = hood
                    .iter()
                    .filter_map(|&j| {
                        candidates[j].best_fitness.map(|f| (j, f))
                    })
                    .max_by(|a, b| {
                        a.1.compare(&b.1, self.direction)
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|(j, _)| &candidates[j].best_position)
                    .unwrap_or(&particle.best_position);

                let dims = particle.position.len();
                let mut velocity = Vec::with_capacity(dims);
                let mut position = Vec::with_capacity(dims);
                for d in 0..dims {
                    let x = particle.position[d];
                    let r1: f64 = rng.random_range(0.0..1.0);
                    let r2: f64 = rng.random_range(0.0..1.0);
                    let v = k * (particle.velocity[d]
                        + self.cognitive_rate * r1 * (particle.best_position[d] - x)
                        + self.social_rate * r2 * (hood_best[d] - x));
                    velocity.push(v);
                    position.push(x + v);
                }

                Particle {
                    position,
                    velocity,
                    best_position: particle.best_position.clone(),
                    best_fitness: particle.best_fitness,
                }
            })
            .collect()
    }
}

/// Installs the re-evaluated particles as the new population, refreshing
/// each personal best against its new fitness.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwarmReplacer;

impl Replacer<Particle, f64> for SwarmReplacer {
    fn replace(
        &mut self,
        _population: Vec<Individual<Particle, f64>>,
        _parents: &[Individual<Particle, f64>],
        offspring: &[Individual<Particle, f64>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<Particle, f64>> {
        offspring
            .iter()
            .map(|ind| {
                let mut survivor = ind.clone();
                let fitness = *ind.fitness();
                survivor.candidate.update_best(fitness, ind.direction);
                survivor
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
