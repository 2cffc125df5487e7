use super::tree::TypeTreeAssembler;
use crate::config::DerivationConfig;
use crate::engines::resolvers::{
    ArrayResolver, CharResolver, CompositeResolver, FieldBinding, NumericResolver, Resolver,
    StringResolver,
};
use crate::error::{CodecError, Result};
use crate::schema::{Charset, MemberSpec, TypeDef};
use crate::types::Kind;
use std::sync::Arc;

/// Turns member metadata into resolver trees.
///
/// Precedence per member: explicit resolver override, then the member's kind
/// (list, string, bool, char, numeric, object). Unspecified ranges, lengths and
/// charsets fall back to the [`DerivationConfig`] defaults.
#[derive(Debug, Clone, Default)]
pub struct ResolverDeriver {
    config: DerivationConfig,
}

impl ResolverDeriver {
    pub fn new(config: DerivationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DerivationConfig {
        &self.config
    }

    /// Fixed composite over every parameterized member of a concrete type.
    pub fn derive(&self, def: &Arc<TypeDef>) -> Result<Arc<dyn Resolver>> {
        if def.is_abstract() {
            return Err(Self::abstract_error(def, def.name()));
        }
        Ok(Arc::new(self.composite(def)?))
    }

    /// Resolver choosing between `root` and the listed subtypes.
    pub fn derive_polymorphic(
        &self,
        root: &Arc<TypeDef>,
        subtypes: &[Arc<TypeDef>],
    ) -> Result<Arc<dyn Resolver>> {
        let tree = TypeTreeAssembler::new(self).assemble(root, subtypes)?;
        Ok(Arc::new(tree.into_resolver()?))
    }

    pub fn composite(&self, def: &Arc<TypeDef>) -> Result<CompositeResolver> {
        CompositeResolver::for_type(def, self.bindings(def, false)?)
    }

    /// Bindings for the parameterized members of `def`, optionally only those it declares.
    pub fn bindings(&self, def: &TypeDef, declared_only: bool) -> Result<Vec<FieldBinding>> {
        def.parameterized_members(declared_only)
            .into_iter()
            .map(|member| -> Result<FieldBinding> {
                Ok(FieldBinding::field(&member.name, self.member_resolver(member)?))
            })
            .collect()
    }

    pub fn member_resolver(&self, member: &MemberSpec) -> Result<Arc<dyn Resolver>> {
        self.create(member, &member.kind)
    }

    fn create(&self, member: &MemberSpec, kind: &Kind) -> Result<Arc<dyn Resolver>> {
        if let Some(resolver) = &member.resolver {
            return Ok(Arc::clone(resolver));
        }
        let resolver: Arc<dyn Resolver> = match kind {
            Kind::List(element) => {
                let (min, max) = self.length(member);
                Arc::new(ArrayResolver::new(self.create(member, element)?, min, max)?)
            }
            Kind::Str => {
                let (min, max) = self.length(member);
                Arc::new(StringResolver::new(self.charset(member).chars(), min, max)?)
            }
            Kind::Char => Arc::new(CharResolver::from_charset(self.charset(member))),
            Kind::Bool => {
                let range = self.config.bool_range;
                Arc::new(NumericResolver::with_range(range.min, range.max))
            }
            Kind::Object(def) if member.subtypes.is_empty() => {
                if def.is_abstract() {
                    return Err(Self::abstract_error(def, &member.name));
                }
                Arc::new(self.composite(def)?)
            }
            Kind::Object(def) => self.derive_polymorphic(def, &member.subtypes)?,
            numeric => {
                let range = member.range.unwrap_or(self.config.default_range);
                let resolver = NumericResolver::with_range(range.min, range.max).for_kind(numeric);
                if member.clamped {
                    Arc::new(resolver)
                } else {
                    Arc::new(resolver.unclamped())
                }
            }
        };
        Ok(resolver)
    }

    fn length(&self, member: &MemberSpec) -> (usize, usize) {
        member.length.unwrap_or((
            self.config.default_min_length,
            self.config.default_max_length,
        ))
    }

    fn charset(&self, member: &MemberSpec) -> Charset {
        member.charset.unwrap_or(self.config.default_charset)
    }

    fn abstract_error(def: &TypeDef, member: &str) -> CodecError {
        CodecError::Schema(format!(
            "Cannot create resolver for {} because {} is abstract; declare concrete subtypes",
            member,
            def.name()
        ))
    }
}
