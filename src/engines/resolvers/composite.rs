use super::accessor::FieldBinding;
use super::traits::{ensure_len, unsupported, Resolver};
use crate::engines::generation::gene_consumer::{GeneConsumer, SlotWriter};
use crate::error::{CodecError, Result};
use crate::schema::{Instance, TypeDef};
use crate::types::{Kind, Range, Value};

/// Fixed composite: one node per declared type, its bindings laid out back to back.
#[derive(Debug, Clone, Default)]
pub struct CompositeResolver {
    bindings: Vec<FieldBinding>,
    len: usize,
}

impl CompositeResolver {
    pub fn new(bindings: Vec<FieldBinding>) -> Self {
        let len = bindings_len(&bindings);
        Self { bindings, len }
    }

    /// Like [`CompositeResolver::new`], but every binding must name a member of `def`.
    pub fn for_type(def: &TypeDef, bindings: Vec<FieldBinding>) -> Result<Self> {
        if let Some(unknown) = bindings
            .iter()
            .find(|b| def.member(b.accessor.name()).is_none())
        {
            return Err(CodecError::Schema(format!(
                "{} has no member {}",
                def.name(),
                unknown.accessor.name()
            )));
        }
        Ok(Self::new(bindings))
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }
}

impl Resolver for CompositeResolver {
    fn len(&self) -> usize {
        self.len
    }

    fn resolve(&self, target: &Kind, gene: &[f64]) -> Result<Value> {
        ensure_len(self.len, gene.len())?;
        let def = match target {
            Kind::Object(def) => def,
            other => return Err(unsupported(other, "CompositeResolver")),
        };
        let mut instance = Instance::new(def)?;
        resolve_bindings(&self.bindings, &mut instance, gene);
        Ok(Value::Object(instance))
    }

    fn domain(&self, ranges: &mut [Range]) {
        domain_bindings(&self.bindings, ranges);
    }

    fn encode(&self, representative: &Value, gene: &mut [f64]) -> Result<()> {
        ensure_len(self.len, gene.len())?;
        let instance = expect_object(representative, "CompositeResolver")?;
        encode_bindings(&self.bindings, instance, gene)
    }
}

pub(crate) fn bindings_len(bindings: &[FieldBinding]) -> usize {
    bindings.iter().map(FieldBinding::len).sum()
}

/// Best-effort decode: a failing member is logged and keeps its default value.
pub(crate) fn resolve_bindings(bindings: &[FieldBinding], instance: &mut Instance, gene: &[f64]) {
    let mut consumer = GeneConsumer::new(gene);
    for binding in bindings {
        let slots = consumer.take(binding.len());
        if let Err(e) = binding.resolve_into(instance, slots) {
            log::warn!(
                "Failed to resolve member {} of {}: {}",
                binding.accessor.name(),
                instance.type_name(),
                e
            );
        }
    }
}

pub(crate) fn domain_bindings(bindings: &[FieldBinding], ranges: &mut [Range]) {
    let mut writer = SlotWriter::new(ranges);
    for binding in bindings {
        binding.domain(writer.take(binding.len()));
    }
}

pub(crate) fn encode_bindings(
    bindings: &[FieldBinding],
    instance: &Instance,
    gene: &mut [f64],
) -> Result<()> {
    let mut writer = SlotWriter::new(gene);
    for binding in bindings {
        binding.encode_from(instance, writer.take(binding.len()))?;
    }
    Ok(())
}

pub(crate) fn expect_object<'a>(value: &'a Value, resolver: &str) -> Result<&'a Instance> {
    value.as_object().ok_or_else(|| {
        CodecError::Encode(format!("{} cannot encode {}", resolver, value.describe()))
    })
}
