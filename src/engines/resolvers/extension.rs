use super::accessor::FieldBinding;
use super::composite::{
    bindings_len, domain_bindings, encode_bindings, expect_object, resolve_bindings,
};
use super::traits::{ensure_len, Resolver};
use crate::error::{CodecError, Result};
use crate::types::{Kind, Range, Value};
use std::sync::Arc;

/// Inheritance-extension composite.
///
/// Delegates the leading slots to the base type's resolver, which builds the
/// full instance, then applies the members this level declares over the
/// trailing slots.
#[derive(Debug, Clone)]
pub struct ExtensionResolver {
    base: Arc<dyn Resolver>,
    bindings: Vec<FieldBinding>,
    len: usize,
}

impl ExtensionResolver {
    pub fn new(base: Arc<dyn Resolver>, bindings: Vec<FieldBinding>) -> Self {
        let len = base.len() + bindings_len(&bindings);
        Self {
            base,
            bindings,
            len,
        }
    }

    pub fn base(&self) -> &Arc<dyn Resolver> {
        &self.base
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }
}

impl Resolver for ExtensionResolver {
    fn len(&self) -> usize {
        self.len
    }

    fn resolve(&self, target: &Kind, gene: &[f64]) -> Result<Value> {
        ensure_len(self.len, gene.len())?;
        let (head, tail) = gene[..self.len].split_at(self.base.len());
        match self.base.resolve(target, head)? {
            Value::Object(mut instance) => {
                resolve_bindings(&self.bindings, &mut instance, tail);
                Ok(Value::Object(instance))
            }
            other => Err(CodecError::Decode(format!(
                "Base resolver produced {} instead of an object",
                other.describe()
            ))),
        }
    }

    fn domain(&self, ranges: &mut [Range]) {
        let (head, tail) = ranges[..self.len].split_at_mut(self.base.len());
        self.base.domain(head);
        domain_bindings(&self.bindings, tail);
    }

    fn encode(&self, representative: &Value, gene: &mut [f64]) -> Result<()> {
        ensure_len(self.len, gene.len())?;
        let (head, tail) = gene[..self.len].split_at_mut(self.base.len());
        self.base.encode(representative, head)?;
        let instance = expect_object(representative, "ExtensionResolver")?;
        encode_bindings(&self.bindings, instance, tail)
    }
}
