//! The evolutionary control loop.
//!
//! [`Engine`] owns the operator pipeline and drives the canonical cycle:
//!
//! ```text
//! generate → evaluate → [ select → vary → evaluate → replace
//!                          → migrate → archive → observe → terminate? ]*
//! ```
//!
//! Each stage completes fully, including all side effects, before the next
//! stage runs; there is no overlap within a generation. The engine is the
//! sole caller of every role and forwards the caller's [`Args`] map to each
//! invocation verbatim.

use log::debug;

use crate::args::Args;
use crate::error::EcError;
use crate::random::create_rng;

use super::archivers::DefaultArchiver;
use super::bounder::{Bounder, IdentityBounder};
use super::migrators::DefaultMigrator;
use super::pipeline::{
    Archiver, Evaluator, Generator, Migrator, Observer, Replacer, Selector, Terminator, Variator,
};
use super::replacers::DefaultReplacer;
use super::selectors::DefaultSelector;
use super::types::{Direction, Fitness, Individual, Population};

/// Run parameters for [`Engine::evolve`].
///
/// Follows the usual builder pattern:
///
/// ```
/// use evoflow::ec::{Direction, EcConfig};
///
/// let config: EcConfig<Vec<f64>> = EcConfig::default()
///     .with_pop_size(50)
///     .with_direction(Direction::Minimize)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct EcConfig<C> {
    /// Number of individuals in the initial population.
    pub pop_size: usize,

    /// Candidates to include in the initial population.
    ///
    /// Seeds are prepended and count toward `pop_size`; the generator fills
    /// the remainder.
    pub seeds: Vec<C>,

    /// Optimization direction, fixed for the whole run.
    pub direction: Direction,

    /// Random seed for reproducibility. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl<C> Default for EcConfig<C> {
    fn default() -> Self {
        Self { pop_size: 100, seeds: Vec::new(), direction: Direction::default(), seed: None }
    }
}

impl<C> EcConfig<C> {
    /// Sets the population size.
    pub fn with_pop_size(mut self, n: usize) -> Self {
        self.pop_size = n;
        self
    }

    /// Sets the initial seed candidates.
    pub fn with_seeds(mut self, seeds: Vec<C>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Sets the optimization direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Called by [`Engine::evolve`] before any candidate is generated or
    /// evaluated.
    pub fn validate(&self) -> Result<(), EcError> {
        if self.pop_size == 0 {
            return Err(EcError::Config("population size must be at least 1".into()));
        }
        Ok(())
    }
}

/// Final state of a completed run.
#[derive(Debug, Clone)]
pub struct EvolveOutcome<C, F> {
    /// The final population, with generation and evaluation counters.
    pub population: Population<C, F>,
    /// The final archive (empty unless an archiver maintains one).
    pub archive: Vec<Individual<C, F>>,
}

/// Orchestrates the operator pipeline over a population.
///
/// Roles default to inert implementations: the selector returns the whole
/// population, the variator list is empty (offspring are parent copies),
/// the replacer keeps the current population, and the migrator, archiver,
/// and bounder are identities. With no terminator configured the run stops
/// after a single generation; real runs install one or more terminators.
///
/// # Failure semantics
///
/// An evaluator error aborts the run immediately and is returned
/// unmodified. A panic inside any role propagates — no retries, no
/// partial-generation recovery. The engine also never checks that operator
/// outputs are mutually compatible (sizes, shapes); mismatches surface as
/// whatever failure the next stage produces.
pub struct Engine<C, F: Fitness> {
    /// Chooses parents each generation.
    pub selector: Box<dyn Selector<C, F>>,
    /// Variation pipeline applied to parent copies, in order.
    pub variators: Vec<Box<dyn Variator<C>>>,
    /// Builds the next population.
    pub replacer: Box<dyn Replacer<C, F>>,
    /// Incorporates individuals from other populations.
    pub migrator: Box<dyn Migrator<C, F>>,
    /// Maintains the solution archive.
    pub archiver: Box<dyn Archiver<C, F>>,
    /// Per-generation side-effect hooks, invoked in order.
    pub observers: Vec<Box<dyn Observer<C, F>>>,
    /// Stop conditions, checked in order with short-circuiting.
    pub terminators: Vec<Box<dyn Terminator<C, F>>>,
    /// Maps offspring candidates back into feasible space after variation.
    pub bounder: Box<dyn Bounder<C>>,
}

impl<C: Clone + 'static, F: Fitness> Default for Engine<C, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone + 'static, F: Fitness> Engine<C, F> {
    /// Creates an engine with inert default roles.
    pub fn new() -> Self {
        Self {
            selector: Box::new(DefaultSelector),
            variators: Vec::new(),
            replacer: Box::new(DefaultReplacer),
            migrator: Box::new(DefaultMigrator),
            archiver: Box::new(DefaultArchiver),
            observers: Vec::new(),
            terminators: Vec::new(),
            bounder: Box::new(IdentityBounder),
        }
    }

    /// Replaces the selector.
    pub fn with_selector(mut self, selector: impl Selector<C, F> + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Appends a variator to the variation pipeline.
    pub fn with_variator(mut self, variator: impl Variator<C> + 'static) -> Self {
        self.variators.push(Box::new(variator));
        self
    }

    /// Replaces the replacer.
    pub fn with_replacer(mut self, replacer: impl Replacer<C, F> + 'static) -> Self {
        self.replacer = Box::new(replacer);
        self
    }

    /// Replaces the migrator.
    pub fn with_migrator(mut self, migrator: impl Migrator<C, F> + 'static) -> Self {
        self.migrator = Box::new(migrator);
        self
    }

    /// Replaces the archiver.
    pub fn with_archiver(mut self, archiver: impl Archiver<C, F> + 'static) -> Self {
        self.archiver = Box::new(archiver);
        self
    }

    /// Appends an observer.
    pub fn with_observer(mut self, observer: impl Observer<C, F> + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Appends a terminator.
    pub fn with_terminator(mut self, terminator: impl Terminator<C, F> + 'static) -> Self {
        self.terminators.push(Box::new(terminator));
        self
    }

    /// Replaces the bounder.
    pub fn with_bounder(mut self, bounder: impl Bounder<C> + 'static) -> Self {
        self.bounder = Box::new(bounder);
        self
    }

    /// Runs the evolution until a terminator fires.
    ///
    /// Builds the initial population from `config.seeds` plus generated
    /// candidates, evaluates it, then cycles through the pipeline until any
    /// terminator returns `true` at the end of a generation. Terminators
    /// are checked after each completed cycle, so every run executes at
    /// least one generation.
    pub fn evolve<G, E>(
        &mut self,
        generator: &mut G,
        evaluator: &mut E,
        config: &EcConfig<C>,
        args: &Args,
    ) -> Result<EvolveOutcome<C, F>, EcError>
    where
        G: Generator<C> + ?Sized,
        E: Evaluator<C, F> + ?Sized,
    {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        debug!("generating initial population");
        let mut initial: Vec<C> = config.seeds.clone();
        let num_generated = config.pop_size.saturating_sub(initial.len());
        for _ in 0..num_generated {
            initial.push(generator.generate(&mut rng, args));
        }

        debug!("evaluating initial population of {} candidates", initial.len());
        let fitnesses = evaluator.evaluate(&initial, args)?;
        let num_evaluations = fitnesses.len();
        let individuals: Vec<Individual<C, F>> = initial
            .into_iter()
            .zip(fitnesses)
            .map(|(c, f)| Individual::evaluated(c, f, 0, config.direction))
            .collect();
        let mut population =
            Population { individuals, num_generations: 0, num_evaluations };
        let mut archive: Vec<Individual<C, F>> = Vec::new();

        for observer in &mut self.observers {
            observer.observe(&population.individuals, 0, population.num_evaluations, args);
        }

        loop {
            debug!(
                "selection at generation {} and evaluation {}",
                population.num_generations, population.num_evaluations
            );
            let parents = self.selector.select(&population.individuals, &mut rng, args);
            debug!("selected {} parents", parents.len());

            let mut offspring_cs: Vec<C> =
                parents.iter().map(|p| p.candidate.clone()).collect();
            for variator in &mut self.variators {
                offspring_cs = variator.vary(offspring_cs, &mut rng, args);
            }
            let bounder = &*self.bounder;
            let offspring_cs: Vec<C> =
                offspring_cs.into_iter().map(|c| bounder.bound(c, args)).collect();
            debug!("created {} offspring", offspring_cs.len());

            let fitnesses = evaluator.evaluate(&offspring_cs, args)?;
            let evaluated = fitnesses.len();
            let birthdate = population.num_generations + 1;
            let offspring: Vec<Individual<C, F>> = offspring_cs
                .into_iter()
                .zip(fitnesses)
                .map(|(c, f)| Individual::evaluated(c, f, birthdate, config.direction))
                .collect();
            population.num_evaluations += evaluated;

            debug!("replacement at generation {}", population.num_generations);
            let current = std::mem::take(&mut population.individuals);
            let replaced = self.replacer.replace(current, &parents, &offspring, &mut rng, args);
            debug!("population size is now {}", replaced.len());

            let migrated = self.migrator.migrate(replaced, &mut rng, args);

            archive = self.archiver.archive(archive, &offspring, &migrated, &mut rng, args);
            debug!("archive size is now {}", archive.len());

            population.individuals = migrated;
            population.num_generations += 1;

            for observer in &mut self.observers {
                observer.observe(
                    &population.individuals,
                    population.num_generations,
                    population.num_evaluations,
                    args,
                );
            }

            let mut terminate = self.terminators.is_empty();
            for terminator in &mut self.terminators {
                if terminator.should_terminate(
                    &population.individuals,
                    population.num_generations,
                    population.num_evaluations,
                    args,
                ) {
                    debug!("termination at generation {}", population.num_generations);
                    terminate = true;
                    break;
                }
            }
            if terminate {
                break;
            }
        }

        Ok(EvolveOutcome { population, archive })
    }
}

/// Canonical genetic algorithm wiring over bit-string candidates.
///
/// Rank selection over the whole population, single-point crossover plus
/// bit-flip mutation, and generational replacement — add a terminator and
/// supply a generator/evaluator pair to run it.
pub fn ga_engine() -> Engine<Vec<bool>, f64> {
    use super::replacers::GenerationalReplacer;
    use super::selectors::RankSelector;
    use super::variators::{BitFlipMutation, NPointCrossover};

    Engine::new()
        .with_selector(RankSelector { num_selected: None })
        .with_variator(NPointCrossover::default())
        .with_variator(BitFlipMutation::default())
        .with_replacer(GenerationalReplacer::default())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::selectors::TournamentSelector;
    use crate::ec::terminators::GenerationTerminator;
    use crate::ec::variators::GaussianMutation;
    use rand::RngCore;

    fn identity_evaluator() -> impl FnMut(&[f64], &Args) -> Vec<f64> {
        |cs: &[f64], _: &Args| cs.to_vec()
    }

    #[test]
    fn test_scalar_ga_end_to_end() {
        // Fixed candidates 0..9, fitness = candidate, maximize, stop at
        // exactly two generations.
        let mut next = 0.0f64;
        let mut generator = move |_: &mut dyn RngCore, _: &Args| {
            let c = next;
            next += 1.0;
            c
        };
        let mut evaluator = identity_evaluator();

        let mut engine: Engine<f64, f64> =
            Engine::new().with_terminator(GenerationTerminator::new(2));
        let config = EcConfig::default().with_pop_size(10).with_seed(7);
        let outcome = engine
            .evolve(&mut generator, &mut evaluator, &config, &Args::new())
            .unwrap();

        assert_eq!(outcome.population.num_generations, 2);
        assert!(outcome.population.num_evaluations >= 10);
        assert_eq!(*outcome.population.best().unwrap().fitness(), 9.0);
    }

    #[test]
    fn test_evaluation_accounting() {
        // Selector size held constant: evaluations = pop_size + g * offspring.
        let mut generator = |rng: &mut dyn RngCore, _: &Args| {
            use rand::Rng;
            rng.random_range(-1.0..1.0)
        };
        let mut evaluator = identity_evaluator();

        let mut engine: Engine<f64, f64> = Engine::new()
            .with_selector(TournamentSelector {
                num_selected: Some(4),
                tournament_size: 2,
            })
            .with_terminator(GenerationTerminator::new(5));
        let config = EcConfig::default().with_pop_size(10).with_seed(1);
        let outcome = engine
            .evolve(&mut generator, &mut evaluator, &config, &Args::new())
            .unwrap();

        assert_eq!(outcome.population.num_evaluations, 10 + 5 * 4);
    }

    #[test]
    fn test_terminator_short_circuit() {
        use std::cell::Cell;
        use std::rc::Rc;

        let second_called = Rc::new(Cell::new(false));
        let flag = second_called.clone();

        let mut generator = |_: &mut dyn RngCore, _: &Args| 0.0f64;
        let mut evaluator = identity_evaluator();

        let mut engine: Engine<f64, f64> = Engine::new()
            .with_terminator(|_: &[Individual<f64, f64>], _: usize, _: usize, _: &Args| true)
            .with_terminator(move |_: &[Individual<f64, f64>], _: usize, _: usize, _: &Args| {
                flag.set(true);
                true
            });
        let config = EcConfig::default().with_pop_size(3).with_seed(0);
        engine.evolve(&mut generator, &mut evaluator, &config, &Args::new()).unwrap();

        assert!(!second_called.get(), "second terminator must be short-circuited");
    }

    #[test]
    fn test_seeds_count_toward_pop_size() {
        use std::cell::Cell;
        use std::rc::Rc;

        let generated = Rc::new(Cell::new(0usize));
        let counter = generated.clone();
        let mut generator = move |_: &mut dyn RngCore, _: &Args| {
            counter.set(counter.get() + 1);
            0.5f64
        };
        let mut evaluator = identity_evaluator();

        let mut engine: Engine<f64, f64> =
            Engine::new().with_terminator(GenerationTerminator::new(1));
        let config = EcConfig::default()
            .with_pop_size(5)
            .with_seeds(vec![1.0, 2.0, 3.0])
            .with_seed(0);
        let outcome = engine
            .evolve(&mut generator, &mut evaluator, &config, &Args::new())
            .unwrap();

        assert_eq!(generated.get(), 2);
        assert_eq!(outcome.population.num_evaluations, 5 + 5);
    }

    #[test]
    fn test_zero_pop_size_fails_fast() {
        let mut generator = |_: &mut dyn RngCore, _: &Args| 0.0f64;
        let mut evaluator = identity_evaluator();
        let mut engine: Engine<f64, f64> = Engine::new();
        let config = EcConfig::default().with_pop_size(0);
        let err = engine
            .evolve(&mut generator, &mut evaluator, &config, &Args::new())
            .unwrap_err();
        assert!(matches!(err, EcError::Config(_)));
    }

    #[test]
    fn test_evaluator_error_propagates() {
        struct FailingEvaluator;
        impl Evaluator<f64, f64> for FailingEvaluator {
            fn evaluate(
                &mut self,
                _candidates: &[f64],
                _args: &Args,
            ) -> Result<Vec<f64>, crate::error::EvalError> {
                Err("worker pool exhausted".into())
            }
        }

        let mut generator = |_: &mut dyn RngCore, _: &Args| 0.0f64;
        let mut engine: Engine<f64, f64> = Engine::new();
        let config = EcConfig::default().with_pop_size(2);
        let err = engine
            .evolve(&mut generator, &mut FailingEvaluator, &config, &Args::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "worker pool exhausted");
    }

    #[test]
    fn test_population_may_shrink() {
        // A replacer that halves the population each generation; the
        // engine never re-pads.
        struct Halver;
        impl Replacer<f64, f64> for Halver {
            fn replace(
                &mut self,
                mut population: Vec<Individual<f64, f64>>,
                _parents: &[Individual<f64, f64>],
                _offspring: &[Individual<f64, f64>],
                _rng: &mut dyn RngCore,
                _args: &Args,
            ) -> Vec<Individual<f64, f64>> {
                let keep = population.len().div_ceil(2);
                population.truncate(keep);
                population
            }
        }

        let mut generator = |_: &mut dyn RngCore, _: &Args| 1.0f64;
        let mut evaluator = identity_evaluator();
        let mut engine: Engine<f64, f64> = Engine::new()
            .with_replacer(Halver)
            .with_terminator(GenerationTerminator::new(2));
        let config = EcConfig::default().with_pop_size(8).with_seed(0);
        let outcome = engine
            .evolve(&mut generator, &mut evaluator, &config, &Args::new())
            .unwrap();
        assert_eq!(outcome.population.len(), 2);
    }

    #[test]
    fn test_variator_pipeline_order() {
        // Stage outputs feed the next stage: (+1) then (*2) over a fixed
        // candidate 3.0 gives 8.0, not 7.0.
        let mut generator = |_: &mut dyn RngCore, _: &Args| 3.0f64;
        let mut evaluator = identity_evaluator();

        let mut engine: Engine<f64, f64> = Engine::new()
            .with_variator(|cs: Vec<f64>, _: &mut dyn RngCore, _: &Args| {
                cs.into_iter().map(|c| c + 1.0).collect::<Vec<f64>>()
            })
            .with_variator(|cs: Vec<f64>, _: &mut dyn RngCore, _: &Args| {
                cs.into_iter().map(|c| c * 2.0).collect::<Vec<f64>>()
            })
            .with_replacer(crate::ec::replacers::GenerationalReplacer::default())
            .with_terminator(GenerationTerminator::new(1));
        let config = EcConfig::default().with_pop_size(1).with_seed(0);
        let outcome = engine
            .evolve(&mut generator, &mut evaluator, &config, &Args::new())
            .unwrap();
        assert_eq!(outcome.population.individuals[0].candidate, 8.0);
    }

    #[test]
    fn test_bounder_applied_after_variation() {
        let mut generator = |_: &mut dyn RngCore, _: &Args| vec![0.0f64];
        let mut evaluator = |cs: &[Vec<f64>], _: &Args| {
            cs.iter().map(|c| c[0]).collect::<Vec<f64>>()
        };

        let mut engine: Engine<Vec<f64>, f64> = Engine::new()
            .with_variator(GaussianMutation { mutation_rate: 1.0, mean: 100.0, stdev: 0.01 })
            .with_bounder(crate::ec::bounder::Bounds::uniform(-1.0, 1.0))
            .with_replacer(crate::ec::replacers::GenerationalReplacer::default())
            .with_terminator(GenerationTerminator::new(3));
        let config = EcConfig::default().with_pop_size(4).with_seed(11);
        let outcome = engine
            .evolve(&mut generator, &mut evaluator, &config, &Args::new())
            .unwrap();
        for ind in outcome.population.iter() {
            assert!(ind.candidate[0] >= -1.0 && ind.candidate[0] <= 1.0);
        }
    }
}
