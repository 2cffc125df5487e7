use crate::engines::generation::genome::Gene;
use crate::engines::generation::mapper::PhenotypeMapper;
use crate::engines::generation::operators;
use crate::error::Result;
use crate::types::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Decodes every gene in parallel against the same tree, keeping input order.
pub fn decode_batch(mapper: &PhenotypeMapper, genes: &[Gene]) -> Vec<Result<Value>> {
    genes.par_iter().map(|gene| mapper.decode(gene)).collect()
}

/// Seeded generator, or one from entropy when no seed is configured.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// `count` random genes; a fixed `seed` gives a reproducible population.
pub fn sample_population(mapper: &PhenotypeMapper, count: usize, seed: Option<u64>) -> Vec<Gene> {
    let mut rng = seeded_rng(seed);
    (0..count).map(|_| mapper.sample(&mut rng)).collect()
}

/// One offspring per parent: consecutive parents are crossed over, then every
/// child is mutated within the mapper's domain. An unpaired last parent is
/// only mutated.
pub fn next_generation<R: Rng>(
    mapper: &PhenotypeMapper,
    parents: &[Gene],
    mutation_rate: f64,
    rng: &mut R,
) -> Vec<Gene> {
    let domain = mapper.domain();
    let mut offspring = Vec::with_capacity(parents.len());

    for pair in parents.chunks(2) {
        match pair {
            [first, second] => {
                let (child1, child2) = operators::crossover(first, second, rng);
                offspring.push(child1);
                offspring.push(child2);
            }
            [single] => offspring.push(single.clone()),
            _ => {}
        }
    }
    for child in offspring.iter_mut() {
        operators::mutate(child, &domain, mutation_rate, rng);
    }
    offspring
}
