use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Gene encoding used by a problem instance.
///
/// The engine does not interpret gene values itself; the encoding decides how
/// chromosomes are initialized and which mutation/crossover operators are
/// meaningful for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    /// Each gene is a 0/1 switch.
    Boolean,
    /// Each gene is a continuous value in [0, 1).
    Real,
    /// Genes are a permutation of the location indices `0..length`.
    Permutation,
}

/// Fixed-length gene vector underlying a candidate solution.
pub type Genome = Vec<f64>;

/// A candidate solution: one gene vector plus the fitness and auxiliary
/// metrics reported by the last evaluation (lower fitness is better).
///
/// Metrics are written by the evaluator and read by reporting; they are empty
/// until the chromosome has been evaluated. Gene values are only changed
/// through the defined mutation operators and `set_gene`.
#[derive(Debug, Clone)]
pub struct Chromosome {
    genes: Genome,
    fitness: f64,
    metrics: HashMap<String, f64>,
}

impl Chromosome {
    /// Create a random chromosome of `length` genes appropriate to `encoding`.
    pub fn random<R: Rng>(length: usize, encoding: Encoding, rng: &mut R) -> Self {
        let genes = match encoding {
            Encoding::Boolean => (0..length)
                .map(|_| if rng.gen::<f64>() < 0.5 { 0.0 } else { 1.0 })
                .collect(),
            Encoding::Real => (0..length).map(|_| rng.gen::<f64>()).collect(),
            Encoding::Permutation => {
                let mut indices: Genome = (0..length).map(|i| i as f64).collect();
                indices.shuffle(rng);
                indices
            }
        };

        Self {
            genes,
            fitness: 0.0,
            metrics: HashMap::new(),
        }
    }

    /// Create an un-evaluated copy of `template`: the gene vector is
    /// deep-copied, fitness is reset to zero and metrics are not carried over.
    /// Fitness and metrics describe the evaluator's last call on the template,
    /// not the copy.
    pub fn from_template(template: &Chromosome) -> Self {
        Self {
            genes: template.genes.clone(),
            fitness: 0.0,
            metrics: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Gene value at `index`. Panics if `index` is out of range.
    pub fn gene(&self, index: usize) -> f64 {
        self.genes[index]
    }

    /// Overwrite the gene at `index`. Panics if `index` is out of range.
    pub fn set_gene(&mut self, index: usize, value: f64) {
        self.genes[index] = value;
    }

    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Auxiliary metric reported by the evaluator, if present.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// Record an auxiliary metric. Intended for the evaluator; the engine
    /// treats the metric map as opaque.
    pub fn set_metric(&mut self, name: &str, value: f64) {
        self.metrics.insert(name.to_string(), value);
    }

    pub fn metrics(&self) -> &HashMap<String, f64> {
        &self.metrics
    }

    /// Read a permutation-encoded gene vector back as location indices.
    pub fn routes(&self) -> Vec<usize> {
        self.genes.iter().map(|&g| g as usize).collect()
    }

    /// Flip 0/1 genes, each independently with probability `probability`.
    /// Any nonzero value flips to zero.
    pub fn mutate_boolean<R: Rng>(&mut self, probability: f64, rng: &mut R) {
        for g in 0..self.genes.len() {
            if rng.gen::<f64>() < probability {
                if self.genes[g] == 0.0 {
                    self.genes[g] = 1.0;
                } else {
                    self.genes[g] = 0.0;
                }
            }
        }
    }

    /// Resample genes uniformly from [0, 1), each independently with
    /// probability `probability`. The old value is discarded.
    pub fn mutate_real<R: Rng>(&mut self, probability: f64, rng: &mut R) {
        for g in 0..self.genes.len() {
            if rng.gen::<f64>() < probability {
                self.genes[g] = rng.gen::<f64>();
            }
        }
    }

    /// Swap each gene position, with probability `probability / 2`, with a
    /// uniformly chosen random position (possibly itself). Halving the rate
    /// keeps the disruption comparable to the other operators since a single
    /// pass only initiates swaps from one side.
    pub fn mutate_route<R: Rng>(&mut self, probability: f64, rng: &mut R) {
        let size = self.genes.len();

        for g in 0..size {
            if rng.gen::<f64>() < probability / 2.0 {
                let other = rng.gen_range(0..size);
                self.genes.swap(g, other);
            }
        }
    }

    /// Stable text form of the gene vector, also used as a deduplication
    /// signature. Switch and index genes print as integers, continuous genes
    /// to two decimal places.
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if gene.fract() == 0.0 {
                write!(f, "{:.0}", gene)?;
            } else {
                write!(f, "{:.2}", gene)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_boolean_genes_are_flags() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = Chromosome::random(32, Encoding::Boolean, &mut rng);

        assert_eq!(c.len(), 32);
        assert!(c.genes().iter().all(|&g| g == 0.0 || g == 1.0));
    }

    #[test]
    fn test_random_real_genes_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(2);
        let c = Chromosome::random(64, Encoding::Real, &mut rng);

        assert!(c.genes().iter().all(|&g| (0.0..1.0).contains(&g)));
    }

    #[test]
    fn test_random_permutation_covers_all_indices() {
        let mut rng = StdRng::seed_from_u64(3);
        let c = Chromosome::random(16, Encoding::Permutation, &mut rng);

        let mut routes = c.routes();
        routes.sort_unstable();
        assert_eq!(routes, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_from_template_resets_evaluation_state() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut original = Chromosome::random(8, Encoding::Real, &mut rng);
        original.set_fitness(12.5);
        original.set_metric("deaths", 3.0);

        let copy = Chromosome::from_template(&original);

        assert_eq!(copy.genes(), original.genes());
        assert_eq!(copy.fitness(), 0.0);
        assert!(copy.metrics().is_empty());
    }

    #[test]
    fn test_mutation_with_zero_probability_is_identity() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut c = Chromosome::random(20, Encoding::Real, &mut rng);
        let before = c.genes().to_vec();

        c.mutate_boolean(0.0, &mut rng);
        c.mutate_real(0.0, &mut rng);
        c.mutate_route(0.0, &mut rng);

        assert_eq!(c.genes(), &before[..]);
    }

    #[test]
    fn test_mutate_real_resamples_every_gene_at_full_rate() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut c = Chromosome::random(20, Encoding::Real, &mut rng);
        let before = c.genes().to_vec();

        c.mutate_real(1.0, &mut rng);

        // Every gene is redrawn from [0, 1); a redraw landing on the exact
        // old double is not a realistic outcome.
        assert!(c.genes().iter().all(|&g| (0.0..1.0).contains(&g)));
        for (old, new) in before.iter().zip(c.genes()) {
            assert_ne!(old, new);
        }
    }

    #[test]
    fn test_mutate_boolean_flips_values() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut c = Chromosome::random(10, Encoding::Boolean, &mut rng);
        let before = c.genes().to_vec();

        c.mutate_boolean(1.0, &mut rng);

        for (old, new) in before.iter().zip(c.genes()) {
            assert_eq!(*new, if *old == 0.0 { 1.0 } else { 0.0 });
        }
    }

    #[test]
    fn test_mutate_route_preserves_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut c = Chromosome::random(12, Encoding::Permutation, &mut rng);

        c.mutate_route(1.0, &mut rng);

        let mut routes = c.routes();
        routes.sort_unstable();
        assert_eq!(routes, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_display_rounds_by_gene_kind() {
        let c = Chromosome {
            genes: vec![1.0, 0.0, 0.256],
            fitness: 0.0,
            metrics: HashMap::new(),
        };

        assert_eq!(c.to_string(), "1 0 0.26");
    }
}
