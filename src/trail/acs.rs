//! Constructive search guided by pheromone trails.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use rand::Rng;
use rand::RngCore;

use crate::args::Args;
use crate::ec::replacers::GenerationalReplacer;
use crate::ec::{best_of, Archiver, Direction, Engine, Generator, Individual, Variator};
use crate::error::EcError;

use super::pheromone::PheromoneMatrix;

/// A problem solved by incremental construction over discrete components.
///
/// The engine's candidate is the ordered component sequence built so far.
/// Construction repeatedly asks for the feasible extensions of the
/// current partial solution and stops when none remain.
pub trait TrailProblem {
    /// Identifier for a discrete solution component.
    type Component: Clone + Eq + Hash + fmt::Debug + 'static;

    /// Components that may extend `partial`; an empty result means the
    /// solution is complete.
    fn feasible_components(&self, partial: &[Self::Component]) -> Vec<Self::Component>;

    /// Greedy desirability η of appending `component` to `partial`.
    ///
    /// Values must be non-negative; larger means more desirable.
    fn heuristic(&self, partial: &[Self::Component], component: &Self::Component) -> f64;
}

/// Builds one candidate by probabilistic construction.
///
/// At each step, option *k* is chosen with probability proportional to
/// `trail[k]^alpha * heuristic[k]^beta`, normalized over the currently
/// feasible options. When every weight is zero the choice falls back to
/// uniform, so a cold matrix still constructs.
fn construct<P: TrailProblem>(
    problem: &P,
    pheromones: &PheromoneMatrix<P::Component>,
    alpha: f64,
    beta: f64,
    rng: &mut dyn RngCore,
) -> Vec<P::Component> {
    let mut partial: Vec<P::Component> = Vec::new();
    loop {
        let mut feasible = problem.feasible_components(&partial);
        if feasible.is_empty() {
            return partial;
        }
        let weights: Vec<f64> = feasible
            .iter()
            .map(|component| {
                let trail = pheromones.get(component).powf(alpha);
                let desirability =
                    problem.heuristic(&partial, component).max(0.0).powf(beta);
                trail * desirability
            })
            .collect();
        let total: f64 = weights.iter().sum();

        let choice = if total > 0.0 {
            let threshold = rng.random_range(0.0..total);
            let mut cumulative = 0.0;
            let mut selected = weights.len() - 1; // floating-point fallback
            for (i, &w) in weights.iter().enumerate() {
                cumulative += w;
                if cumulative > threshold {
                    selected = i;
                    break;
                }
            }
            selected
        } else {
            rng.random_range(0..feasible.len())
        };
        partial.push(feasible.swap_remove(choice));
    }
}

/// Generates initial candidates by construction.
pub struct TrailGenerator<P: TrailProblem> {
    problem: Arc<P>,
    pheromones: Arc<PheromoneMatrix<P::Component>>,
    alpha: f64,
    beta: f64,
}

impl<P: TrailProblem> Generator<Vec<P::Component>> for TrailGenerator<P> {
    fn generate(&mut self, rng: &mut dyn RngCore, _args: &Args) -> Vec<P::Component> {
        construct(&*self.problem, &self.pheromones, self.alpha, self.beta, rng)
    }
}

/// The constructive "variation" step.
///
/// Unlike a genetic variator, construction does not perturb its inputs:
/// the incoming candidates only fix how many fresh solutions to build,
/// each guided by the current trail matrix.
pub struct TrailVariator<P: TrailProblem> {
    problem: Arc<P>,
    pheromones: Arc<PheromoneMatrix<P::Component>>,
    alpha: f64,
    beta: f64,
}

impl<P: TrailProblem> Variator<Vec<P::Component>> for TrailVariator<P> {
    fn vary(
        &mut self,
        candidates: Vec<Vec<P::Component>>,
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Vec<P::Component>> {
        (0..candidates.len())
            .map(|_| construct(&*self.problem, &self.pheromones, self.alpha, self.beta, rng))
            .collect()
    }
}

/// The trail update step, run in the archiver slot.
///
/// Keeps a best-ever archive of one individual, then updates the matrix:
/// every trail evaporates by the configured rate, strictly before the
/// components of the generation's best candidate are reinforced by
/// `learning_rate × quality`. Quality is the fitness itself under
/// maximization and its reciprocal under minimization (the Δτ = Q/L
/// form), so better solutions always deposit more.
pub struct TrailUpdater<K> {
    pheromones: Arc<PheromoneMatrix<K>>,
    evaporation_rate: f64,
    learning_rate: f64,
}

impl<K> TrailUpdater<K> {
    fn quality(fitness: f64, direction: Direction) -> f64 {
        match direction {
            Direction::Maximize => fitness.max(0.0),
            Direction::Minimize => {
                if fitness > 0.0 {
                    1.0 / fitness
                } else {
                    0.0
                }
            }
        }
    }
}

impl<K: Clone + Eq + Hash + fmt::Debug + 'static> Archiver<Vec<K>, f64> for TrailUpdater<K> {
    fn archive(
        &mut self,
        mut archive: Vec<Individual<Vec<K>, f64>>,
        offspring: &[Individual<Vec<K>, f64>],
        _population: &[Individual<Vec<K>, f64>],
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<Vec<K>, f64>> {
        let Some(generation_best) = best_of(offspring) else {
            return archive;
        };

        match archive.first() {
            None => archive.push(generation_best.clone()),
            Some(best_ever) => {
                if generation_best.better_than(best_ever) {
                    archive[0] = generation_best.clone();
                }
            }
        }

        self.pheromones.decay(self.evaporation_rate);
        let quality = Self::quality(*generation_best.fitness(), generation_best.direction);
        let amount = self.learning_rate * quality;
        for component in &generation_best.candidate {
            self.pheromones.deposit(component, amount);
        }
        archive
    }
}

/// Trail-search parameters.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcsConfig {
    /// Exponent weighting learned trail strength.
    pub alpha: f64,
    /// Exponent weighting the problem heuristic.
    pub beta: f64,
    /// Evaporation factor ρ applied each cycle.
    pub evaporation_rate: f64,
    /// Scale applied to each reinforcement deposit.
    pub learning_rate: f64,
    /// Trail strength components start with.
    pub initial_pheromone: f64,
    /// Floor keeping every option reachable.
    pub min_pheromone: f64,
}

impl Default for AcsConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.1,
            learning_rate: 0.1,
            initial_pheromone: 1.0,
            min_pheromone: 1e-4,
        }
    }
}

impl AcsConfig {
    /// Sets the trail exponent α.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic exponent β.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation factor ρ.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Sets the reinforcement scale.
    pub fn with_learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Sets the initial trail strength.
    pub fn with_initial_pheromone(mut self, initial: f64) -> Self {
        self.initial_pheromone = initial;
        self
    }

    /// Sets the trail floor.
    pub fn with_min_pheromone(mut self, floor: f64) -> Self {
        self.min_pheromone = floor;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), EcError> {
        if self.alpha < 0.0 || self.beta < 0.0 {
            return Err(EcError::Config("trail exponents must be non-negative".into()));
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(EcError::Config("evaporation rate must be in [0, 1)".into()));
        }
        if self.learning_rate <= 0.0 {
            return Err(EcError::Config("learning rate must be positive".into()));
        }
        if self.min_pheromone <= 0.0 {
            return Err(EcError::Config("minimum pheromone must be positive".into()));
        }
        if self.initial_pheromone < self.min_pheromone {
            return Err(EcError::Config(
                "initial pheromone must not sit below the minimum".into(),
            ));
        }
        Ok(())
    }
}

/// Ant-colony-style search over a [`TrailProblem`].
///
/// Owns the problem and the shared pheromone matrix and wires the engine:
/// construction in the generator and variator slots, the trail update in
/// the archiver slot, and generational replacement, with the final
/// archive holding the best solution ever constructed.
///
/// # Example
///
/// ```
/// use evoflow::args::Args;
/// use evoflow::ec::terminators::GenerationTerminator;
/// use evoflow::ec::{Direction, EcConfig};
/// use evoflow::trail::{Acs, AcsConfig, TrailProblem};
///
/// // Pick one of three options; option 2 pays the most.
/// struct PickOne;
/// impl TrailProblem for PickOne {
///     type Component = usize;
///     fn feasible_components(&self, partial: &[usize]) -> Vec<usize> {
///         if partial.is_empty() { vec![0, 1, 2] } else { Vec::new() }
///     }
///     fn heuristic(&self, _partial: &[usize], component: &usize) -> f64 {
///         [1.0, 2.0, 4.0][*component]
///     }
/// }
///
/// let acs = Acs::new(PickOne, AcsConfig::default()).unwrap();
/// let mut generator = acs.generator();
/// let mut evaluator = |candidates: &[Vec<usize>], _: &Args| {
///     candidates
///         .iter()
///         .map(|c| [1.0, 2.0, 4.0][c[0]])
///         .collect::<Vec<f64>>()
/// };
/// let mut engine = acs
///     .engine()
///     .with_terminator(GenerationTerminator::new(20));
/// let config = EcConfig::default()
///     .with_pop_size(10)
///     .with_direction(Direction::Maximize)
///     .with_seed(42);
/// let outcome = engine
///     .evolve(&mut generator, &mut evaluator, &config, &Args::new())
///     .unwrap();
/// assert_eq!(outcome.archive[0].candidate, vec![2]);
/// ```
pub struct Acs<P: TrailProblem> {
    problem: Arc<P>,
    pheromones: Arc<PheromoneMatrix<P::Component>>,
    config: AcsConfig,
}

impl<P: TrailProblem + 'static> Acs<P> {
    /// Creates the search with a fresh pheromone matrix.
    pub fn new(problem: P, config: AcsConfig) -> Result<Self, EcError> {
        config.validate()?;
        let pheromones = Arc::new(PheromoneMatrix::new(
            config.initial_pheromone,
            config.min_pheromone,
        ));
        Ok(Self { problem: Arc::new(problem), pheromones, config })
    }

    /// The shared pheromone matrix.
    ///
    /// Clone the `Arc` to share trails with another engine instance.
    pub fn pheromones(&self) -> &Arc<PheromoneMatrix<P::Component>> {
        &self.pheromones
    }

    /// A construction-based generator for the initial population.
    pub fn generator(&self) -> TrailGenerator<P> {
        TrailGenerator {
            problem: Arc::clone(&self.problem),
            pheromones: Arc::clone(&self.pheromones),
            alpha: self.config.alpha,
            beta: self.config.beta,
        }
    }

    /// An engine wired for trail search.
    ///
    /// Add a terminator before running; supply the evaluator at
    /// [`evolve`](Engine::evolve) time.
    pub fn engine(&self) -> Engine<Vec<P::Component>, f64> {
        Engine::new()
            .with_variator(TrailVariator {
                problem: Arc::clone(&self.problem),
                pheromones: Arc::clone(&self.pheromones),
                alpha: self.config.alpha,
                beta: self.config.beta,
            })
            .with_replacer(GenerationalReplacer::default())
            .with_archiver(TrailUpdater {
                pheromones: Arc::clone(&self.pheromones),
                evaporation_rate: self.config.evaporation_rate,
                learning_rate: self.config.learning_rate,
            })
    }
}

// ============================================================================
// Tests
// ============================================================================
