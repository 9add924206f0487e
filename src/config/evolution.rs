use super::traits::ConfigSection;
use crate::engines::generation::chromosome::Encoding;
use crate::error::SimcalibError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverMethod {
    OnePoint,
    Uniform,
    Route,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationMethod {
    Boolean,
    Real,
    Route,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub gene_length: usize,
    pub encoding: Encoding,
    pub crossover_method: CrossoverMethod,
    pub mutation_method: MutationMethod,
    pub mutation_rate: f64,
    pub tournament_size: usize,
    pub hall_of_fame_size: usize,
    /// Number of evaluator workers; each worker needs its own evaluator
    /// instance.
    pub workers: usize,
    /// Seed for the engine's random stream; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            num_generations: 20,
            gene_length: 12,
            encoding: Encoding::Real,
            crossover_method: CrossoverMethod::OnePoint,
            mutation_method: MutationMethod::Real,
            mutation_rate: 0.05,
            tournament_size: 4,
            hall_of_fame_size: 10,
            workers: 1,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), SimcalibError> {
        if self.population_size < 2 {
            return Err(SimcalibError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.gene_length == 0 {
            return Err(SimcalibError::Configuration(
                "Gene length must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SimcalibError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(SimcalibError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.hall_of_fame_size == 0 {
            return Err(SimcalibError::Configuration(
                "Hall of fame size must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(SimcalibError::Configuration(
                "Worker count must be at least 1".to_string(),
            ));
        }

        let route_crossover = self.crossover_method == CrossoverMethod::Route;
        let route_mutation = self.mutation_method == MutationMethod::Route;
        let permutation = self.encoding == Encoding::Permutation;
        if permutation && !(route_crossover && route_mutation) {
            return Err(SimcalibError::Configuration(
                "Permutation encoding requires the route crossover and route mutation"
                    .to_string(),
            ));
        }
        if (route_crossover || route_mutation) && !permutation {
            return Err(SimcalibError::Configuration(
                "Route operators are only valid for the permutation encoding".to_string(),
            ));
        }

        Ok(())
    }
}
