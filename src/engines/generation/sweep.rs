use crate::config::sweep::SweepConfig;
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::chromosome::{Chromosome, Encoding};
use crate::engines::generation::operators::index_best;
use crate::error::{Result, SimcalibError};
use rand::Rng;
use std::collections::HashSet;

/// Outcome of a random sweep: the full scored population plus the index of
/// its best member.
pub struct SweepReport {
    pub population: Vec<Chromosome>,
    pub best: usize,
    pub evaluations: usize,
}

/// Random-search baseline over the parameter space.
///
/// Draws a population of chromosomes whose gene signatures are pairwise
/// distinct (re-drawing duplicates up to `max_attempts` times per slot),
/// scores every one, and reports the lot. Useful for sizing the search space
/// and as a control against the evolutionary run.
pub fn parameter_sweep<E: FitnessEvaluator, R: Rng>(
    config: &SweepConfig,
    gene_length: usize,
    encoding: Encoding,
    evaluator: &mut E,
    rng: &mut R,
) -> Result<SweepReport> {
    let mut population = Vec::with_capacity(config.population_size);
    let mut seen = HashSet::new();

    for slot in 0..config.population_size {
        let mut accepted = None;

        for _ in 0..config.max_attempts {
            let candidate = Chromosome::random(gene_length, encoding, rng);
            if seen.insert(candidate.signature()) {
                accepted = Some(candidate);
                break;
            }
        }

        let candidate = accepted.ok_or_else(|| {
            SimcalibError::Configuration(format!(
                "could not draw a distinct chromosome for sweep slot {} within {} attempts; \
                 the space is too small for a sweep population of {}",
                slot, config.max_attempts, config.population_size
            ))
        })?;
        population.push(candidate);
    }

    for chromosome in &mut population {
        let fitness = evaluator.evaluate(chromosome)?;
        chromosome.set_fitness(fitness);
        log::debug!("sweep: {} scored {}", chromosome, fitness);
    }

    let best = index_best(&population);
    let evaluations = population.len();

    Ok(SweepReport {
        population,
        best,
        evaluations,
    })
}
