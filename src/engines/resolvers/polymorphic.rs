use super::numeric::NumericResolver;
use super::traits::{ensure_len, Resolver};
use crate::error::{CodecError, Result};
use crate::schema::TypeDef;
use crate::types::{Kind, Range, Value};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// One entry of the alternative table.
#[derive(Debug, Clone)]
pub struct AlternativeEntry {
    pub target: Kind,
    pub resolver: Arc<dyn Resolver>,
    pub directly_instantiable: bool,
}

/// Closed set of named alternatives selected by slot 0.
///
/// The gene length is `1 + max(alternative length)` whichever alternative is
/// picked; shorter alternatives ignore the trailing slots.
#[derive(Debug, Default)]
pub struct PolymorphicResolver {
    names: Vec<String>,
    alternatives: HashMap<String, AlternativeEntry>,
    index: OnceLock<NumericResolver>,
}

impl PolymorphicResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `def` as an alternative decoded by `resolver`.
    pub fn add_alternative(&mut self, def: &Arc<TypeDef>, resolver: Arc<dyn Resolver>) -> Result<()> {
        let name = def.name().to_string();
        if self.alternatives.contains_key(&name) {
            return Err(CodecError::Schema(format!(
                "Alternative {} is registered twice",
                name
            )));
        }
        let entry = AlternativeEntry {
            target: Kind::object(def),
            resolver,
            directly_instantiable: !def.is_abstract(),
        };
        if !entry.directly_instantiable {
            return Err(CodecError::Schema(format!(
                "Alternative {} is abstract and cannot be instantiated",
                name
            )));
        }
        self.alternatives.insert(name.clone(), entry);
        self.names.push(name);
        // Count changed, so any index resolver built so far is stale
        self.index = OnceLock::new();
        Ok(())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn alternative(&self, name: &str) -> Option<&AlternativeEntry> {
        self.alternatives.get(name)
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    fn index_resolver(&self) -> &NumericResolver {
        self.index.get_or_init(|| {
            NumericResolver::with_range(0.0, self.names.len().saturating_sub(1) as f64)
        })
    }

    fn entries(&self) -> impl Iterator<Item = &AlternativeEntry> {
        self.names.iter().filter_map(|name| self.alternatives.get(name))
    }
}

impl Resolver for PolymorphicResolver {
    fn len(&self) -> usize {
        1 + self.entries().map(|e| e.resolver.len()).max().unwrap_or(0)
    }

    /// `target` is the declared base kind; the decoded value carries the
    /// chosen alternative's own type.
    fn resolve(&self, _target: &Kind, gene: &[f64]) -> Result<Value> {
        ensure_len(self.len(), gene.len())?;
        if self.names.is_empty() {
            return Err(CodecError::Decode("No alternatives registered".to_string()));
        }
        let index = match self.index_resolver().resolve(&Kind::U64, &gene[..1])? {
            Value::U64(i) => i as usize,
            other => {
                return Err(CodecError::Decode(format!(
                    "Unexpected alternative index {}",
                    other.describe()
                )))
            }
        };
        let name = &self.names[index.min(self.names.len() - 1)];
        let entry = self
            .alternatives
            .get(name)
            .ok_or_else(|| CodecError::UnknownAlternative(name.clone()))?;
        let width = entry.resolver.len();
        entry.resolver.resolve(&entry.target, &gene[1..1 + width])
    }

    fn domain(&self, ranges: &mut [Range]) {
        let len = self.len();
        let mut combined = vec![Range::EMPTY; len - 1];
        for entry in self.entries() {
            // Fresh buffer per alternative so earlier ones cannot leak into later ones
            let own = entry.resolver.domain_vec();
            for (slot, range) in combined.iter_mut().zip(own) {
                *slot = slot.combine(range);
            }
        }
        ranges[0] = Range::new(0.0, self.names.len() as f64);
        ranges[1..len].copy_from_slice(&combined);
    }

    fn encode(&self, representative: &Value, gene: &mut [f64]) -> Result<()> {
        ensure_len(self.len(), gene.len())?;
        let type_name = match representative {
            Value::Object(instance) => instance.type_name(),
            other => {
                return Err(CodecError::Encode(format!(
                    "PolymorphicResolver cannot encode {}",
                    other.describe()
                )))
            }
        };
        let index = self
            .names
            .iter()
            .position(|name| name == type_name)
            .ok_or_else(|| CodecError::UnknownAlternative(type_name.to_string()))?;
        let entry = &self.alternatives[&self.names[index]];
        gene[0] = index as f64;
        let width = entry.resolver.len();
        entry.resolver.encode(representative, &mut gene[1..1 + width])
    }
}
