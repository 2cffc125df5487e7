use super::traits::Resolver;
use crate::error::{CodecError, Result};
use crate::schema::Instance;
use crate::types::{Kind, Range, Value};
use std::fmt;
use std::sync::Arc;

/// Reads and writes one named member of an [`Instance`].
pub trait Accessor: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Declared kind of the member on the instance's runtime type.
    fn accessed_type(&self, target: &Instance) -> Result<Kind>;

    fn get<'a>(&self, target: &'a Instance) -> Result<&'a Value>;

    fn set(&self, target: &mut Instance, value: Value) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FieldAccessor {
    field_name: String,
}

impl FieldAccessor {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}

impl Accessor for FieldAccessor {
    fn name(&self) -> &str {
        &self.field_name
    }

    fn accessed_type(&self, target: &Instance) -> Result<Kind> {
        target
            .def()
            .member(&self.field_name)
            .map(|m| m.kind.clone())
            .ok_or_else(|| CodecError::MemberNotFound {
                member: self.field_name.clone(),
                type_name: target.type_name().to_string(),
            })
    }

    fn get<'a>(&self, target: &'a Instance) -> Result<&'a Value> {
        target.get(&self.field_name)
    }

    fn set(&self, target: &mut Instance, value: Value) -> Result<()> {
        target.set(&self.field_name, value)
    }
}

/// Pairs an accessor with the resolver owning that member's slot region.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    pub accessor: Arc<dyn Accessor>,
    pub resolver: Arc<dyn Resolver>,
}

impl FieldBinding {
    pub fn new(accessor: Arc<dyn Accessor>, resolver: Arc<dyn Resolver>) -> Self {
        Self { accessor, resolver }
    }

    /// Binding through a [`FieldAccessor`] on `member`.
    pub fn field(member: &str, resolver: Arc<dyn Resolver>) -> Self {
        Self::new(Arc::new(FieldAccessor::new(member)), resolver)
    }

    pub fn len(&self) -> usize {
        self.resolver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn resolve_into(&self, instance: &mut Instance, gene: &[f64]) -> Result<()> {
        let kind = self.accessor.accessed_type(instance)?;
        let value = self.resolver.resolve(&kind, gene)?;
        self.accessor.set(instance, value)
    }

    pub fn domain(&self, ranges: &mut [Range]) {
        self.resolver.domain(ranges);
    }

    pub fn encode_from(&self, instance: &Instance, gene: &mut [f64]) -> Result<()> {
        let value = self.accessor.get(instance)?;
        self.resolver.encode(value, gene)
    }
}
