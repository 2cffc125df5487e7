use crate::engines::resolvers::{
    ArrayResolver, CompositeResolver, ExtensionResolver, FieldBinding, NumericResolver,
    PolymorphicResolver, Resolver, StringResolver,
};
use crate::error::{CodecError, Result};
use crate::schema::{Charset, TypeDef};
use crate::types::Kind;
use std::sync::Arc;

/// Hand-wired alternative to [`super::ResolverDeriver`].
///
/// ```ignore
/// let point = ResolverBuilder::model(&point_def)
///     .numeric("x", -1.0, 1.0)?
///     .numeric("y", -1.0, 1.0)?
///     .build();
/// ```
pub struct ResolverBuilder;

impl ResolverBuilder {
    pub fn model(def: &Arc<TypeDef>) -> ModelStep {
        ModelStep {
            def: Arc::clone(def),
            base: None,
            bindings: Vec::new(),
        }
    }

    /// Bindings added to the returned step occupy the slots after `base`.
    pub fn extend(def: &Arc<TypeDef>, base: Arc<dyn Resolver>) -> ModelStep {
        ModelStep {
            def: Arc::clone(def),
            base: Some(base),
            bindings: Vec::new(),
        }
    }

    pub fn many() -> ManyStep {
        ManyStep {
            resolver: PolymorphicResolver::new(),
        }
    }
}

pub struct ModelStep {
    def: Arc<TypeDef>,
    base: Option<Arc<dyn Resolver>>,
    bindings: Vec<FieldBinding>,
}

impl ModelStep {
    pub fn property(mut self, name: &str, resolver: Arc<dyn Resolver>) -> Result<Self> {
        if self.def.member(name).is_none() {
            return Err(CodecError::Schema(format!(
                "{} has no member {}",
                self.def.name(),
                name
            )));
        }
        self.bindings.push(FieldBinding::field(name, resolver));
        Ok(self)
    }

    pub fn numeric(self, name: &str, min: f64, max: f64) -> Result<Self> {
        let kind = self.member_kind(name)?;
        self.property(name, Arc::new(NumericResolver::with_range(min, max).for_kind(&kind)))
    }

    pub fn unclamped_numeric(self, name: &str, min: f64, max: f64) -> Result<Self> {
        let kind = self.member_kind(name)?;
        let resolver = NumericResolver::with_range(min, max).for_kind(&kind).unclamped();
        self.property(name, Arc::new(resolver))
    }

    pub fn flag(self, name: &str) -> Result<Self> {
        self.property(name, Arc::new(NumericResolver::with_range(-1.0, 1.0)))
    }

    pub fn text(self, name: &str, min: usize, max: usize, charset: Charset) -> Result<Self> {
        let resolver = StringResolver::new(charset.chars(), min, max)?;
        self.property(name, Arc::new(resolver))
    }

    pub fn array(
        self,
        name: &str,
        element: Arc<dyn Resolver>,
        min: usize,
        max: usize,
    ) -> Result<Self> {
        let resolver = ArrayResolver::new(element, min, max)?;
        self.property(name, Arc::new(resolver))
    }

    pub fn build(self) -> Arc<dyn Resolver> {
        match self.base {
            Some(base) => Arc::new(ExtensionResolver::new(base, self.bindings)),
            None => Arc::new(CompositeResolver::new(self.bindings)),
        }
    }

    fn member_kind(&self, name: &str) -> Result<Kind> {
        self.def
            .member(name)
            .map(|m| m.kind.clone())
            .ok_or_else(|| CodecError::Schema(format!("{} has no member {}", self.def.name(), name)))
    }
}

pub struct ManyStep {
    resolver: PolymorphicResolver,
}

impl ManyStep {
    pub fn for_type(mut self, def: &Arc<TypeDef>, resolver: Arc<dyn Resolver>) -> Result<Self> {
        self.resolver.add_alternative(def, resolver)?;
        Ok(self)
    }

    pub fn build(self) -> Arc<dyn Resolver> {
        Arc::new(self.resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Instance, MemberSpec};
    use crate::types::{Range, Value};

    fn shapes() -> (Arc<TypeDef>, Arc<TypeDef>, Arc<TypeDef>) {
        let shape = TypeDef::builder("Shape")
            .abstract_type()
            .member(MemberSpec::new("x", Kind::I32))
            .member(MemberSpec::new("visible", Kind::Bool))
            .build()
            .unwrap();
        let circle = TypeDef::builder("Circle")
            .extends(&shape)
            .member(MemberSpec::new("radius", Kind::F32))
            .build()
            .unwrap();
        let label = TypeDef::builder("Label")
            .extends(&shape)
            .member(MemberSpec::new("text", Kind::Str))
            .member(MemberSpec::new("sizes", Kind::list(Kind::U8)))
            .build()
            .unwrap();
        (shape, circle, label)
    }

    #[test]
    fn test_unknown_member_rejected() {
        let (_, circle, _) = shapes();
        let result = ResolverBuilder::model(&circle).numeric("diameter", 0.0, 1.0);
        assert!(matches!(result, Err(CodecError::Schema(_))));
    }

    #[test]
    fn test_extend_appends_after_base() {
        let (shape, circle, _) = shapes();
        let base = ResolverBuilder::model(&shape)
            .numeric("x", 0.0, 10.0)
            .unwrap()
            .flag("visible")
            .unwrap()
            .build();
        let resolver = ResolverBuilder::extend(&circle, base)
            .unclamped_numeric("radius", 1.0, 2.0)
            .unwrap()
            .build();
        assert_eq!(resolver.len(), 3);
        assert_eq!(
            resolver.domain_vec(),
            vec![
                Range::new(0.0, 10.0),
                Range::new(-1.0, 1.0),
                Range::new(1.0, 2.0)
            ]
        );

        let value = resolver.resolve(&Kind::object(&circle), &[12.0, -1.0, 4.5]).unwrap();
        let instance = value.as_object().unwrap();
        assert_eq!(instance.get("x").unwrap(), &Value::I32(10));
        assert_eq!(instance.get("visible").unwrap(), &Value::Bool(false));
        assert_eq!(instance.get("radius").unwrap(), &Value::F32(4.5));
    }

    #[test]
    fn test_many_chooses_by_type() {
        let (shape, circle, label) = shapes();
        let base = ResolverBuilder::model(&shape).numeric("x", 0.0, 10.0).unwrap().build();
        let circles = ResolverBuilder::extend(&circle, Arc::clone(&base))
            .numeric("radius", 1.0, 2.0)
            .unwrap()
            .build();
        let labels = ResolverBuilder::extend(&label, base)
            .text("text", 1, 3, Charset::AlphaLower)
            .unwrap()
            .array("sizes", Arc::new(NumericResolver::with_range(8.0, 16.0)), 0, 2)
            .unwrap()
            .build();
        let resolver = ResolverBuilder::many()
            .for_type(&circle, circles)
            .unwrap()
            .for_type(&label, labels)
            .unwrap()
            .build();

        // 1 index + x + text(1 + 2*2) + sizes(2*2)
        assert_eq!(resolver.len(), 1 + 1 + 5 + 4);

        let instance = Instance::new(&label)
            .unwrap()
            .with("x", Value::I32(3))
            .unwrap()
            .with("text", Value::Str("ab".to_string()))
            .unwrap()
            .with("sizes", Value::List(vec![Value::U8(9)]))
            .unwrap();
        let gene = resolver.encode_vec(&Value::Object(instance.clone())).unwrap();
        assert_eq!(gene[0], 1.0);
        let decoded = resolver.resolve(&Kind::object(&shape), &gene).unwrap();
        assert_eq!(decoded, Value::Object(instance));
    }
}
