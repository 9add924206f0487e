use crate::engines::generation::chromosome::Chromosome;
use crate::error::{Result, SimcalibError};
use rand::Rng;

/// Draw `k` indices into `population` uniformly at random, with replacement.
pub fn sample_with_replacement<R: Rng>(
    population: &[Chromosome],
    k: usize,
    rng: &mut R,
) -> Vec<usize> {
    (0..k).map(|_| rng.gen_range(0..population.len())).collect()
}

/// Index of the lowest-fitness chromosome. The first index wins ties.
pub fn index_best(population: &[Chromosome]) -> usize {
    let mut best = 0;

    for p in 1..population.len() {
        if population[p].fitness() < population[best].fitness() {
            best = p;
        }
    }

    best
}

/// Index of the highest-fitness chromosome. The first index wins ties.
pub fn index_worst(population: &[Chromosome]) -> usize {
    let mut worst = 0;

    for p in 1..population.len() {
        if population[p].fitness() > population[worst].fitness() {
            worst = p;
        }
    }

    worst
}

/// Tournament selection: sample `tournament_size` individuals with
/// replacement and return the index of the best (lowest fitness) one.
///
/// A tournament of 1 degenerates to uniform random selection; a tournament
/// the size of the population is close to always picking the current best.
/// The earliest sampled index wins ties.
pub fn tournament_select<R: Rng>(
    population: &[Chromosome],
    tournament_size: usize,
    rng: &mut R,
) -> usize {
    let sample = sample_with_replacement(population, tournament_size, rng);
    let mut best = sample[0];

    for &idx in &sample[1..] {
        if population[idx].fitness() < population[best].fitness() {
            best = idx;
        }
    }

    best
}

/// Tournament selection of the worst individual: same sampling as
/// [`tournament_select`], returns the index of the highest-fitness member of
/// the sample. Used by culling variants.
pub fn inverse_tournament_select<R: Rng>(
    population: &[Chromosome],
    tournament_size: usize,
    rng: &mut R,
) -> usize {
    let sample = sample_with_replacement(population, tournament_size, rng);
    let mut worst = sample[0];

    for &idx in &sample[1..] {
        if population[idx].fitness() > population[worst].fitness() {
            worst = idx;
        }
    }

    worst
}

/// One-point crossover: genes `[0, cut)` come from `p1`, genes
/// `[cut, length)` from `p2`, with the cut drawn uniformly from
/// `[0, length)`. A cut of 0 reproduces `p2` exactly; a cut equal to the
/// length would reproduce `p1`.
pub fn one_point_crossover<R: Rng>(p1: &Chromosome, p2: &Chromosome, rng: &mut R) -> Chromosome {
    assert_eq!(p1.len(), p2.len(), "parents must have equal gene counts");

    let num_genes = p1.len();
    let cut = rng.gen_range(0..num_genes);
    let mut child = Chromosome::from_template(p1);

    for g in 0..num_genes {
        if g < cut {
            child.set_gene(g, p1.gene(g));
        } else {
            child.set_gene(g, p2.gene(g));
        }
    }

    child
}

/// Uniform crossover: each gene is taken from `p1` or `p2` on a fair coin
/// flip, independently per position. The child never holds a value absent
/// from both parents at that position.
pub fn uniform_crossover<R: Rng>(p1: &Chromosome, p2: &Chromosome, rng: &mut R) -> Chromosome {
    assert_eq!(p1.len(), p2.len(), "parents must have equal gene counts");

    let mut child = Chromosome::from_template(p1);

    for g in 0..child.len() {
        if rng.gen::<f64>() < 0.5 {
            child.set_gene(g, p1.gene(g));
        } else {
            child.set_gene(g, p2.gene(g));
        }
    }

    child
}

/// Permutation-preserving crossover for route encodings.
///
/// Starting from `p1`'s ordering, repeat once per location: pick a random
/// position in the working order, look up that location's rank in `p2`, and
/// re-splice it at that rank. The child stays a valid permutation while its
/// adjacency structure drifts toward `p2`.
///
/// Fails with [`SimcalibError::Encoding`] when a location in the working
/// order does not exist in `p2`: the parents do not encode permutations of
/// the same location set, and the run must stop rather than continue on a
/// corrupted genome.
pub fn route_crossover<R: Rng>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> Result<Chromosome> {
    assert_eq!(p1.len(), p2.len(), "parents must have equal gene counts");

    let mut working = p1.routes();
    let parent2 = p2.routes();
    let locations = working.len();

    for _ in 0..locations {
        let n1 = rng.gen_range(0..working.len());
        let location = working[n1];

        let rank = parent2
            .iter()
            .position(|&other| other == location)
            .ok_or_else(|| {
                SimcalibError::Encoding(format!(
                    "location {} not found in second parent; parents do not encode \
                     permutations of the same location set",
                    location
                ))
            })?;

        working.remove(n1);
        if rank < working.len() {
            working.insert(rank, location);
        } else {
            working.push(location);
        }
    }

    let mut child = Chromosome::from_template(p1);
    for (g, location) in working.iter().enumerate() {
        child.set_gene(g, *location as f64);
    }

    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::chromosome::Encoding;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chromosome_with_fitness(genes: Vec<f64>, fitness: f64) -> Chromosome {
        let mut rng = StdRng::seed_from_u64(0);
        let mut c = Chromosome::random(genes.len(), Encoding::Real, &mut rng);
        for (i, g) in genes.iter().enumerate() {
            c.set_gene(i, *g);
        }
        c.set_fitness(fitness);
        c
    }

    fn population(fitnesses: &[f64]) -> Vec<Chromosome> {
        fitnesses
            .iter()
            .map(|&f| chromosome_with_fitness(vec![f; 4], f))
            .collect()
    }

    #[test]
    fn test_index_best_prefers_lowest_index_on_ties() {
        let pop = population(&[2.0, 1.0, 1.0, 3.0]);
        assert_eq!(index_best(&pop), 1);
    }

    #[test]
    fn test_index_worst_prefers_lowest_index_on_ties() {
        let pop = population(&[3.0, 1.0, 3.0]);
        assert_eq!(index_worst(&pop), 0);
    }

    #[test]
    fn test_sample_with_replacement_size_and_range() {
        let pop = population(&[1.0, 2.0, 3.0]);
        let mut rng = StdRng::seed_from_u64(11);

        let sample = sample_with_replacement(&pop, 10, &mut rng);

        assert_eq!(sample.len(), 10);
        assert!(sample.iter().all(|&i| i < pop.len()));
    }

    #[test]
    fn test_tournament_select_is_exploitative_with_large_tournaments() {
        // A tournament far larger than the population all but guarantees the
        // global best is sampled; with a fixed seed the draw is repeatable.
        let pop = population(&[5.0, 3.0, 0.5, 4.0, 2.0, 9.0]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(tournament_select(&pop, 96, &mut rng), 2);
        }
    }

    #[test]
    fn test_inverse_tournament_select_finds_worst() {
        let pop = population(&[5.0, 3.0, 0.5, 4.0, 2.0, 9.0]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(inverse_tournament_select(&pop, 96, &mut rng), 5);
        }
    }

    #[test]
    fn test_one_point_crossover_preserves_length_and_segments() {
        let p1 = chromosome_with_fitness(vec![1.0, 1.0, 1.0, 1.0, 1.0], 0.0);
        let p2 = chromosome_with_fitness(vec![2.0, 2.0, 2.0, 2.0, 2.0], 0.0);
        let mut rng = StdRng::seed_from_u64(9);

        let child = one_point_crossover(&p1, &p2, &mut rng);

        assert_eq!(child.len(), 5);
        // Genes must form a p1-prefix followed by a p2-suffix.
        let first_from_p2 = child
            .genes()
            .iter()
            .position(|&g| g == 2.0)
            .unwrap_or(child.len());
        assert!(child.genes()[..first_from_p2].iter().all(|&g| g == 1.0));
        assert!(child.genes()[first_from_p2..].iter().all(|&g| g == 2.0));
    }

    #[test]
    fn test_one_point_crossover_cut_zero_copies_second_parent() {
        let p1 = chromosome_with_fitness(vec![1.0, 1.0, 1.0], 0.0);
        let p2 = chromosome_with_fitness(vec![2.0, 3.0, 4.0], 0.0);
        // A constant-zero random stream pins the cut at 0.
        let mut rng = StepRng::new(0, 0);

        let child = one_point_crossover(&p1, &p2, &mut rng);

        assert_eq!(child.genes(), p2.genes());
    }

    #[test]
    fn test_uniform_crossover_takes_each_gene_from_a_parent() {
        let p1 = chromosome_with_fitness(vec![1.0, 3.0, 5.0, 7.0], 0.0);
        let p2 = chromosome_with_fitness(vec![2.0, 4.0, 6.0, 8.0], 0.0);
        let mut rng = StdRng::seed_from_u64(13);

        let child = uniform_crossover(&p1, &p2, &mut rng);

        for g in 0..child.len() {
            let v = child.gene(g);
            assert!(v == p1.gene(g) || v == p2.gene(g), "gene {} interpolated", g);
        }
    }

    #[test]
    fn test_route_crossover_outputs_valid_permutation() {
        let mut rng = StdRng::seed_from_u64(21);
        let p1 = Chromosome::random(10, Encoding::Permutation, &mut rng);
        let p2 = Chromosome::random(10, Encoding::Permutation, &mut rng);

        let child = route_crossover(&p1, &p2, &mut rng).unwrap();

        let mut routes = child.routes();
        routes.sort_unstable();
        assert_eq!(routes, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_route_crossover_rejects_mismatched_location_sets() {
        let mut rng = StdRng::seed_from_u64(22);
        let p1 = chromosome_with_fitness(vec![0.0, 1.0, 2.0], 0.0);
        // Parent 2 is missing locations 0..=2 entirely.
        let p2 = chromosome_with_fitness(vec![5.0, 6.0, 7.0], 0.0);

        let result = route_crossover(&p1, &p2, &mut rng);

        assert!(matches!(result, Err(SimcalibError::Encoding(_))));
    }

    #[test]
    fn test_crossover_children_start_unevaluated() {
        let mut p1 = chromosome_with_fitness(vec![1.0, 2.0, 3.0], 4.0);
        p1.set_metric("infections", 10.0);
        let p2 = chromosome_with_fitness(vec![3.0, 2.0, 1.0], 6.0);
        let mut rng = StdRng::seed_from_u64(23);

        let child = uniform_crossover(&p1, &p2, &mut rng);

        assert_eq!(child.fitness(), 0.0);
        assert!(child.metrics().is_empty());
    }
}
