use crate::engines::generation::genome::Gene;
use crate::types::Range;
use rand::Rng;

/// Uniform sample of one slot; unbounded sides fall back to the finite one.
pub fn sample_slot<R: Rng>(range: &Range, rng: &mut R) -> f64 {
    let (low, high) = if range.min <= range.max {
        (range.min, range.max)
    } else {
        (range.max, range.min)
    };
    match (low.is_finite(), high.is_finite()) {
        (true, true) if low < high => {
            let t = rng.gen::<f64>();
            let value = if (high - low).is_finite() {
                low + (high - low) * t
            } else {
                low * (1.0 - t) + high * t
            };
            value.min(high)
        }
        (true, true) => low,
        (true, false) => low,
        (false, true) => high,
        (false, false) => 0.0,
    }
}

/// Generate a random gene over `domain`
pub fn sample_gene<R: Rng>(domain: &[Range], rng: &mut R) -> Gene {
    domain.iter().map(|range| sample_slot(range, rng)).collect()
}

/// Mutation: resample each slot from its range with probability `mutation_rate`
pub fn mutate<R: Rng>(gene: &mut [f64], domain: &[Range], mutation_rate: f64, rng: &mut R) {
    for (slot, range) in gene.iter_mut().zip(domain) {
        if rng.gen::<f64>() < mutation_rate {
            *slot = sample_slot(range, rng);
        }
    }
}

/// Single-point crossover: swap gene segments
pub fn crossover<R: Rng>(parent1: &[f64], parent2: &[f64], rng: &mut R) -> (Gene, Gene) {
    let len = parent1.len().min(parent2.len());
    if len <= 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let point = rng.gen_range(1..len);

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    child1[point..len].copy_from_slice(&parent2[point..len]);
    child2[point..len].copy_from_slice(&parent1[point..len]);

    (child1, child2)
}
