use crate::config::evolution::{CrossoverMethod, EvolutionConfig, MutationMethod};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::chromosome::{Chromosome, Encoding};
use crate::engines::generation::hall_of_fame::HallOfFame;
use crate::engines::generation::operators::{
    index_best, one_point_crossover, route_crossover, tournament_select, uniform_crossover,
};
use crate::error::{Result, SimcalibError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Engine-level knobs for one evolution run.
pub struct EngineConfig {
    pub population_size: usize,
    pub generations: usize,
    pub gene_length: usize,
    pub encoding: Encoding,
    pub crossover: CrossoverMethod,
    pub mutation: MutationMethod,
    pub mutation_rate: f64,
    pub tournament_size: usize,
    pub hall_of_fame_size: usize,
    pub seed: Option<u64>,
}

impl From<&EvolutionConfig> for EngineConfig {
    fn from(config: &EvolutionConfig) -> Self {
        Self {
            population_size: config.population_size,
            generations: config.num_generations,
            gene_length: config.gene_length,
            encoding: config.encoding,
            crossover: config.crossover_method,
            mutation: config.mutation_method,
            mutation_rate: config.mutation_rate,
            tournament_size: config.tournament_size,
            hall_of_fame_size: config.hall_of_fame_size,
            seed: config.seed,
        }
    }
}

/// Receives progress notifications during a run.
///
/// `on_candidate_evaluated` fires per candidate only when the engine runs a
/// single worker; parallel batches report at generation granularity.
pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, evaluations: usize);
    fn on_candidate_evaluated(&mut self, candidate_num: usize, total: usize);
}

/// Outcome of a completed run.
pub struct EvolutionReport {
    /// The final generation, evaluation results included.
    pub population: Vec<Chromosome>,
    /// Index of the best chromosome in `population`.
    pub best_index: usize,
    pub generations: usize,
    /// Total evaluator calls across the run, initial population included.
    pub evaluations: usize,
}

impl EvolutionReport {
    /// Best chromosome of the final generation.
    pub fn best(&self) -> &Chromosome {
        &self.population[self.best_index]
    }
}

/// Generational evolution loop with single-slot elitism.
///
/// The engine owns the population; each generation it selects two parents per
/// slot by tournament, produces a candidate through the configured crossover
/// and mutation, scores every candidate through the evaluator(s), and then
/// replaces the population wholesale. Slot 0 is the exception: it keeps the
/// previous generation's best whenever that best is strictly better than the
/// candidate that would occupy it.
pub struct EvolutionEngine<E: FitnessEvaluator> {
    config: EngineConfig,
    evaluators: Vec<E>,
    hall_of_fame: HallOfFame,
    rng: StdRng,
    evaluations: usize,
}

impl<E: FitnessEvaluator> EvolutionEngine<E> {
    /// Engine with a single evaluator; evaluation runs sequentially.
    pub fn new(config: EngineConfig, evaluator: E) -> Self {
        Self::build(config, vec![evaluator])
    }

    /// Engine with one evaluator instance per worker; a generation's
    /// candidates are split across the workers and evaluated in parallel.
    pub fn with_workers(config: EngineConfig, evaluators: Vec<E>) -> Result<Self> {
        if evaluators.is_empty() {
            return Err(SimcalibError::Configuration(
                "At least one evaluator instance is required".to_string(),
            ));
        }
        Ok(Self::build(config, evaluators))
    }

    fn build(config: EngineConfig, evaluators: Vec<E>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        Self {
            config,
            evaluators,
            hall_of_fame,
            rng,
            evaluations: 0,
        }
    }

    /// Run the full evolution and return the best solution found.
    ///
    /// An evaluator failure aborts the run and propagates; the population
    /// assembled so far is discarded, nothing is retried.
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<EvolutionReport> {
        let mut population = self.initialize_population();
        self.evaluate_population(&mut population, &mut callback)?;
        for chromosome in &population {
            self.hall_of_fame.try_add(chromosome);
        }

        let mut best = index_best(&population);
        log::debug!(
            "initial population of {} scored, best fitness {}",
            population.len(),
            population[best].fitness()
        );

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);

            let mut candidates = self.breed_candidates(&population)?;
            self.evaluate_population(&mut candidates, &mut callback)?;
            for chromosome in &candidates {
                self.hall_of_fame.try_add(chromosome);
            }

            // Single-slot elitism: the previous best survives in slot 0 when
            // it strictly beats the candidate bred for that slot. The slot
            // index does not matter since selection is randomized.
            if candidates[0].fitness() > population[best].fitness() {
                candidates[0] = population[best].clone();
            }
            population = candidates;
            best = index_best(&population);

            log::debug!(
                "generation {}: best fitness {} ({})",
                generation,
                population[best].fitness(),
                population[best]
            );
            callback.on_generation_complete(generation, population[best].fitness(), self.evaluations);
        }

        Ok(EvolutionReport {
            population,
            best_index: best,
            generations: self.config.generations,
            evaluations: self.evaluations,
        })
    }

    fn initialize_population(&mut self) -> Vec<Chromosome> {
        (0..self.config.population_size)
            .map(|_| Chromosome::random(self.config.gene_length, self.config.encoding, &mut self.rng))
            .collect()
    }

    /// Breed a full replacement population from the current one. Selection,
    /// crossover and mutation all draw from the engine's single random
    /// stream, so runs are reproducible under a fixed seed.
    fn breed_candidates(&mut self, population: &[Chromosome]) -> Result<Vec<Chromosome>> {
        let mut candidates = Vec::with_capacity(self.config.population_size);

        for _ in 0..self.config.population_size {
            let p1 = tournament_select(population, self.config.tournament_size, &mut self.rng);
            let p2 = tournament_select(population, self.config.tournament_size, &mut self.rng);

            let mut child = self.crossover(&population[p1], &population[p2])?;
            self.mutate(&mut child);
            candidates.push(child);
        }

        Ok(candidates)
    }

    fn crossover(&mut self, p1: &Chromosome, p2: &Chromosome) -> Result<Chromosome> {
        match self.config.crossover {
            CrossoverMethod::OnePoint => Ok(one_point_crossover(p1, p2, &mut self.rng)),
            CrossoverMethod::Uniform => Ok(uniform_crossover(p1, p2, &mut self.rng)),
            CrossoverMethod::Route => route_crossover(p1, p2, &mut self.rng),
        }
    }

    fn mutate(&mut self, child: &mut Chromosome) {
        match self.config.mutation {
            MutationMethod::Boolean => child.mutate_boolean(self.config.mutation_rate, &mut self.rng),
            MutationMethod::Real => child.mutate_real(self.config.mutation_rate, &mut self.rng),
            MutationMethod::Route => child.mutate_route(self.config.mutation_rate, &mut self.rng),
        }
    }

    /// Score every chromosome in place, preserving slot identity. With
    /// several workers the slice is split into contiguous chunks, one worker
    /// and one evaluator instance per chunk; a failure cancels the rest of
    /// the batch and leaves the previous generation untouched.
    fn evaluate_population<C: ProgressCallback>(
        &mut self,
        population: &mut [Chromosome],
        callback: &mut C,
    ) -> Result<()> {
        let total = population.len();

        if self.evaluators.len() == 1 {
            let evaluator = &mut self.evaluators[0];
            for (i, chromosome) in population.iter_mut().enumerate() {
                let fitness = evaluator.evaluate(chromosome)?;
                chromosome.set_fitness(fitness);
                callback.on_candidate_evaluated(i + 1, total);
            }
        } else {
            let chunk_size = (total + self.evaluators.len() - 1) / self.evaluators.len();
            population
                .par_chunks_mut(chunk_size)
                .zip(self.evaluators.par_iter_mut())
                .try_for_each(|(chunk, evaluator)| {
                    for chromosome in chunk {
                        let fitness = evaluator.evaluate(chromosome)?;
                        chromosome.set_fitness(fitness);
                    }
                    Ok::<(), SimcalibError>(())
                })?;
        }

        self.evaluations += total;
        Ok(())
    }

    pub fn hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    /// Evaluator calls made so far; proportional to the work spent searching.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}
