use crate::engines::generation::chromosome::Chromosome;
use std::collections::HashSet;

/// A chromosome archived with the signature used for deduplication.
#[derive(Clone, Debug)]
pub struct EliteSolution {
    pub chromosome: Chromosome,
    pub signature: String,
}

/// Bounded archive of the best solutions seen across a whole run, kept
/// sorted ascending by fitness (best first) and deduplicated by gene
/// signature. The generational loop can regress; the hall of fame cannot.
pub struct HallOfFame {
    solutions: Vec<EliteSolution>,
    max_size: usize,
    seen_signatures: HashSet<String>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            solutions: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
        }
    }

    /// Attempt to archive a chromosome. Returns false when an identical gene
    /// vector is already present or the candidate does not make the cut.
    pub fn try_add(&mut self, chromosome: &Chromosome) -> bool {
        let signature = chromosome.signature();
        if self.seen_signatures.contains(&signature) {
            return false;
        }

        self.solutions.push(EliteSolution {
            chromosome: chromosome.clone(),
            signature: signature.clone(),
        });
        self.seen_signatures.insert(signature.clone());
        self.sort_and_trim();

        // The candidate survived only if it was not the one trimmed away.
        self.solutions.iter().any(|s| s.signature == signature)
    }

    fn sort_and_trim(&mut self) {
        // Lower fitness is better.
        self.solutions.sort_by(|a, b| {
            a.chromosome
                .fitness()
                .partial_cmp(&b.chromosome.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if self.solutions.len() > self.max_size {
            if let Some(removed) = self.solutions.pop() {
                self.seen_signatures.remove(&removed.signature);
            }
        }
    }

    /// Best archived solution, if any.
    pub fn best(&self) -> Option<&EliteSolution> {
        self.solutions.first()
    }

    pub fn get_all(&self) -> &[EliteSolution] {
        &self.solutions
    }

    pub fn get_top_n(&self, n: usize) -> &[EliteSolution] {
        &self.solutions[..n.min(self.solutions.len())]
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}
