use crate::error::{CodecError, Result};
use crate::types::{Kind, Range, Value};
use std::fmt;

/// Bidirectional mapping between a fixed-length slot region of a gene and a
/// phenotype value.
///
/// Every implementation consumes exactly [`Resolver::len`] slots in `resolve`
/// and `encode`, and writes exactly that many ranges in `domain`. Slices longer
/// than `len()` are accepted; only the leading `len()` entries are touched.
pub trait Resolver: fmt::Debug + Send + Sync {
    /// Number of gene slots this resolver owns.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode `gene` into a value of `target` kind.
    fn resolve(&self, target: &Kind, gene: &[f64]) -> Result<Value>;

    /// Write the valid range of every owned slot.
    ///
    /// # Panics
    ///
    /// If `ranges` is shorter than `len()`.
    fn domain(&self, ranges: &mut [Range]);

    /// Inverse of `resolve`: write the slots that decode back to `representative`.
    fn encode(&self, representative: &Value, gene: &mut [f64]) -> Result<()>;

    fn domain_vec(&self) -> Vec<Range> {
        let mut ranges = vec![Range::default(); self.len()];
        self.domain(&mut ranges);
        ranges
    }

    fn encode_vec(&self, representative: &Value) -> Result<Vec<f64>> {
        let mut gene = vec![0.0; self.len()];
        self.encode(representative, &mut gene)?;
        Ok(gene)
    }
}

pub(crate) fn ensure_len(expected: usize, actual: usize) -> Result<()> {
    if actual < expected {
        return Err(CodecError::GeneLength { expected, actual });
    }
    Ok(())
}

pub(crate) fn unsupported(kind: &Kind, resolver: &'static str) -> CodecError {
    CodecError::UnsupportedKind {
        kind: kind.to_string(),
        resolver,
    }
}
