/// Real-valued gene vector.
///
/// A gene is a flat sequence of `f64` slots that a resolver tree decodes into
/// a phenotype. Each slot has a valid range given by the tree's domain; values
/// outside it are clamped on decode rather than rejected.
///
/// Genetic operators work on this flat form because it stays simple:
/// - **Crossover**: swapping gene segments is array slicing
/// - **Mutation**: resampling one slot from its range
/// - **No invalid states**: every gene of the right length decodes
///
/// # Conversion
///
/// Use `PhenotypeMapper::decode()` for Gene -> Value and
/// `PhenotypeMapper::encode()` for the inverse.
pub type Gene = Vec<f64>;
