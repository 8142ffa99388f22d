//! The operator pipeline contract.
//!
//! Each generation, the [`Engine`](super::Engine) invokes these roles in a
//! fixed order: select → vary → evaluate → replace → migrate → archive →
//! observe → terminate?. Roles are independent strategy objects; the
//! engine is their sole caller and they never call each other.
//!
//! Every role receives the run's random stream and the shared [`Args`]
//! option map as trailing arguments. Roles configured as lists follow two
//! different conventions:
//!
//! - **Variators** form a data pipeline: the output of each stage is the
//!   sole input of the next.
//! - **Observers** and **terminators** are independent calls over the same
//!   population; a terminator returning `true` short-circuits the rest of
//!   the terminator list.
//!
//! Closures can stand in for the simpler roles (generator, variator,
//! observer, terminator, and infallible evaluators) without any adapter.

use rand::RngCore;

use crate::args::Args;
use crate::error::EvalError;

use super::types::{Fitness, Individual};

/// Produces one candidate solution.
///
/// Called `pop_size` times (less any caller-supplied seeds) when the
/// initial population is built.
pub trait Generator<C> {
    /// Creates a new candidate.
    fn generate(&mut self, rng: &mut dyn RngCore, args: &Args) -> C;
}

impl<C, T> Generator<C> for T
where
    T: FnMut(&mut dyn RngCore, &Args) -> C,
{
    fn generate(&mut self, rng: &mut dyn RngCore, args: &Args) -> C {
        self(rng, args)
    }
}

/// Scores a batch of candidates.
///
/// The returned fitness sequence must correspond to the candidates by
/// position. The engine does **not** check the lengths match: a shorter
/// fitness list silently produces fewer offspring, a deliberate
/// permissiveness trade-off inherited from the pipeline design. An
/// evaluator may fan work out internally (see
/// [`ParallelEvaluator`](super::evaluators::ParallelEvaluator)) but is
/// synchronous from the engine's point of view.
pub trait Evaluator<C, F> {
    /// Evaluates `candidates`, returning one fitness per candidate.
    fn evaluate(&mut self, candidates: &[C], args: &Args) -> Result<Vec<F>, EvalError>;
}

impl<C, F, T> Evaluator<C, F> for T
where
    T: FnMut(&[C], &Args) -> Vec<F>,
{
    fn evaluate(&mut self, candidates: &[C], args: &Args) -> Result<Vec<F>, EvalError> {
        Ok(self(candidates, args))
    }
}

/// Chooses the parents for the next generation.
///
/// How many parents to return is the selector's decision, independent of
/// the population size.
pub trait Selector<C, F: Fitness> {
    /// Returns the ordered parent sequence.
    fn select(
        &mut self,
        population: &[Individual<C, F>],
        rng: &mut dyn RngCore,
        args: &Args,
    ) -> Vec<Individual<C, F>>;
}

/// Transforms a working set of candidates.
///
/// Variators may change the number of candidates. When several variators
/// are configured they are chained in order, each consuming the previous
/// stage's output.
pub trait Variator<C> {
    /// Produces the next working set from `candidates`.
    fn vary(&mut self, candidates: Vec<C>, rng: &mut dyn RngCore, args: &Args) -> Vec<C>;
}

impl<C, T> Variator<C> for T
where
    T: FnMut(Vec<C>, &mut dyn RngCore, &Args) -> Vec<C>,
{
    fn vary(&mut self, candidates: Vec<C>, rng: &mut dyn RngCore, args: &Args) -> Vec<C> {
        self(candidates, rng, args)
    }
}

/// Builds the next population from the current one, the parents, and the
/// evaluated offspring.
///
/// The returned population's size is not checked against the previous
/// size — shrinking or growing between generations is legitimate and the
/// engine never re-pads.
pub trait Replacer<C, F: Fitness> {
    /// Returns the next population.
    fn replace(
        &mut self,
        population: Vec<Individual<C, F>>,
        parents: &[Individual<C, F>],
        offspring: &[Individual<C, F>],
        rng: &mut dyn RngCore,
        args: &Args,
    ) -> Vec<Individual<C, F>>;
}

/// Incorporates individuals arriving from other concurrently-running
/// populations.
///
/// The default is the identity. A migrator that shares state across
/// engines owns all cross-population synchronization; the engine itself
/// sees one population at a time and provides no locking.
pub trait Migrator<C, F: Fitness> {
    /// Returns the possibly-modified population.
    fn migrate(
        &mut self,
        population: Vec<Individual<C, F>>,
        rng: &mut dyn RngCore,
        args: &Args,
    ) -> Vec<Individual<C, F>>;
}

/// Maintains a solution archive independent of the population.
///
/// Archived entries are clones taken at admission time, so later
/// population mutation cannot corrupt them.
pub trait Archiver<C, F: Fitness> {
    /// Returns the updated archive.
    fn archive(
        &mut self,
        archive: Vec<Individual<C, F>>,
        offspring: &[Individual<C, F>],
        population: &[Individual<C, F>],
        rng: &mut dyn RngCore,
        args: &Args,
    ) -> Vec<Individual<C, F>>;
}

/// Side-effecting per-generation hook; return values are discarded.
pub trait Observer<C, F: Fitness> {
    /// Called once per generation (including generation 0) after the new
    /// population is in place.
    fn observe(
        &mut self,
        population: &[Individual<C, F>],
        num_generations: usize,
        num_evaluations: usize,
        args: &Args,
    );
}

impl<C, F: Fitness, T> Observer<C, F> for T
where
    T: FnMut(&[Individual<C, F>], usize, usize, &Args),
{
    fn observe(
        &mut self,
        population: &[Individual<C, F>],
        num_generations: usize,
        num_evaluations: usize,
        args: &Args,
    ) {
        self(population, num_generations, num_evaluations, args)
    }
}

/// Decides when the run stops.
///
/// Terminators are checked at the end of each generation; the first one
/// returning `true` ends the run and short-circuits the rest of the list.
pub trait Terminator<C, F: Fitness> {
    /// Whether the run should stop now.
    fn should_terminate(
        &mut self,
        population: &[Individual<C, F>],
        num_generations: usize,
        num_evaluations: usize,
        args: &Args,
    ) -> bool;
}

impl<C, F: Fitness, T> Terminator<C, F> for T
where
    T: FnMut(&[Individual<C, F>], usize, usize, &Args) -> bool,
{
    fn should_terminate(
        &mut self,
        population: &[Individual<C, F>],
        num_generations: usize,
        num_evaluations: usize,
        args: &Args,
    ) -> bool {
        self(population, num_generations, num_evaluations, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_closure_generator() {
        let mut counter = 0usize;
        let mut generator = move |_: &mut dyn RngCore, _: &Args| {
            counter += 1;
            counter
        };
        let mut rng = create_rng(0);
        let args = Args::new();
        assert_eq!(generator.generate(&mut rng, &args), 1);
        assert_eq!(generator.generate(&mut rng, &args), 2);
    }

    #[test]
    fn test_closure_evaluator_is_infallible() {
        let mut evaluator =
            |cs: &[i32], _: &Args| cs.iter().map(|&c| c as f64).collect::<Vec<f64>>();
        let fits: Vec<f64> =
            Evaluator::<i32, f64>::evaluate(&mut evaluator, &[1, 2, 3], &Args::new()).unwrap();
        assert_eq!(fits, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_closure_terminator() {
        let mut terminator =
            |_: &[Individual<(), f64>], ng: usize, _: usize, _: &Args| ng >= 3;
        assert!(!terminator.should_terminate(&[], 2, 0, &Args::new()));
        assert!(terminator.should_terminate(&[], 3, 0, &Args::new()));
    }
}
