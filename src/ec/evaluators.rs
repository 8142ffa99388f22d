//! Evaluator adapters.
//!
//! The engine's [`Evaluator`](super::Evaluator) contract is batch-oriented:
//! a sequence of candidates in, a same-order sequence of fitness values
//! out. Most problems are more naturally written as a per-candidate
//! scoring function; the adapters here lift such functions to the batch
//! contract, optionally fanning the batch out across a rayon thread pool.
//! Either way the engine blocks until the full fitness list is back —
//! evaluation concurrency never leaks into the control loop.

use crate::args::Args;
use crate::error::EvalError;

use super::pipeline::Evaluator;

/// Lifts a per-candidate scoring function to the batch contract.
///
/// ```
/// use evoflow::args::Args;
/// use evoflow::ec::evaluators::CandidateEvaluator;
/// use evoflow::ec::Evaluator;
///
/// let mut evaluator = CandidateEvaluator::new(|c: &Vec<f64>, _: &Args| {
///     -c.iter().map(|x| x * x).sum::<f64>()
/// });
/// let fits = evaluator.evaluate(&[vec![0.0], vec![2.0]], &Args::new()).unwrap();
/// assert_eq!(fits, vec![0.0, -4.0]);
/// ```
pub struct CandidateEvaluator<T> {
    score: T,
}

impl<T> CandidateEvaluator<T> {
    /// Wraps a `fn(&C, &Args) -> F` scoring function.
    pub fn new(score: T) -> Self {
        Self { score }
    }
}

impl<C, F, T> Evaluator<C, F> for CandidateEvaluator<T>
where
    T: FnMut(&C, &Args) -> F,
{
    fn evaluate(&mut self, candidates: &[C], args: &Args) -> Result<Vec<F>, EvalError> {
        Ok(candidates.iter().map(|c| (self.score)(c, args)).collect())
    }
}

/// Evaluates candidates in parallel on the rayon thread pool.
///
/// Fitness values come back in candidate order regardless of completion
/// order. Only worthwhile when a single evaluation is expensive enough to
/// amortize the fan-out.
#[cfg(feature = "parallel")]
pub struct ParallelEvaluator<T> {
    score: T,
}

#[cfg(feature = "parallel")]
impl<T> ParallelEvaluator<T> {
    /// Wraps a thread-safe `fn(&C, &Args) -> F` scoring function.
    pub fn new(score: T) -> Self {
        Self { score }
    }
}

#[cfg(feature = "parallel")]
impl<C, F, T> Evaluator<C, F> for ParallelEvaluator<T>
where
    C: Sync,
    F: Send,
    T: Fn(&C, &Args) -> F + Sync,
{
    fn evaluate(&mut self, candidates: &[C], args: &Args) -> Result<Vec<F>, EvalError> {
        use rayon::prelude::*;
        Ok(candidates.par_iter().map(|c| (self.score)(c, args)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_evaluator_preserves_order() {
        let mut evaluator = CandidateEvaluator::new(|c: &i32, _: &Args| *c as f64 * 2.0);
        let fits = evaluator.evaluate(&[3, 1, 2], &Args::new()).unwrap();
        assert_eq!(fits, vec![6.0, 2.0, 4.0]);
    }

    #[test]
    fn test_candidate_evaluator_reads_args() {
        let mut evaluator = CandidateEvaluator::new(|c: &f64, args: &Args| {
            c * args.get_or("scale", 1.0f64)
        });
        let args = Args::new().with("scale", 10.0f64);
        let fits = evaluator.evaluate(&[1.0, 2.0], &args).unwrap();
        assert_eq!(fits, vec![10.0, 20.0]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let score = |c: &f64, _: &Args| c * c;
        let candidates: Vec<f64> = (0..64).map(|i| i as f64).collect();
        let mut sequential = CandidateEvaluator::new(score);
        let mut parallel = ParallelEvaluator::new(score);
        assert_eq!(
            sequential.evaluate(&candidates, &Args::new()).unwrap(),
            parallel.evaluate(&candidates, &Args::new()).unwrap()
        );
    }
}
