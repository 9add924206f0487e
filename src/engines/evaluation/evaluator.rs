use crate::engines::generation::chromosome::Chromosome;
use anyhow::Result;

/// Boundary to the external simulation that scores candidate solutions.
///
/// An evaluator is called exactly once per chromosome per generation and must
/// treat each call as an independent unit of work with respect to its own
/// scratch state. Implementations commonly carry mutable state and perform
/// side-effecting I/O, so one instance is never shared between workers; the
/// engine takes one instance per worker when evaluating in parallel.
pub trait FitnessEvaluator: Send {
    /// Score `chromosome`, returning its cost (lower is better). May record
    /// auxiliary metrics on the chromosome as a side effect.
    ///
    /// Failures (I/O, resource exhaustion, simulation faults) propagate to
    /// the evolution engine, which aborts the run; retry policy belongs to
    /// the caller.
    fn evaluate(&mut self, chromosome: &mut Chromosome) -> Result<f64>;
}

/// Adapts a closure into a [`FitnessEvaluator`], mostly for tests and
/// embedding analytic cost functions.
pub struct FnEvaluator<F> {
    scorer: F,
}

impl<F> FnEvaluator<F>
where
    F: FnMut(&mut Chromosome) -> Result<f64> + Send,
{
    pub fn new(scorer: F) -> Self {
        Self { scorer }
    }
}

impl<F> FitnessEvaluator for FnEvaluator<F>
where
    F: FnMut(&mut Chromosome) -> Result<f64> + Send,
{
    fn evaluate(&mut self, chromosome: &mut Chromosome) -> Result<f64> {
        (self.scorer)(chromosome)
    }
}
