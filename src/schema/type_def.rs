use super::charsets::Charset;
use crate::engines::resolvers::Resolver;
use crate::error::{CodecError, Result};
use crate::types::{Kind, Range, Value};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;

/// Metadata describing one member of a phenotype type.
///
/// Only members flagged `parameterized` receive a slot region in the gene.
#[derive(Debug, Clone)]
pub struct MemberSpec {
    pub name: String,
    pub kind: Kind,
    pub parameterized: bool,
    pub range: Option<Range>,
    pub length: Option<(usize, usize)>,
    pub subtypes: Vec<Arc<TypeDef>>,
    pub charset: Option<Charset>,
    pub resolver: Option<Arc<dyn Resolver>>,
    pub clamped: bool,
}

impl MemberSpec {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            parameterized: true,
            range: None,
            length: None,
            subtypes: Vec::new(),
            charset: None,
            resolver: None,
            clamped: true,
        }
    }

    /// Member that exists on the type but is never driven by the gene.
    pub fn plain(mut self) -> Self {
        self.parameterized = false;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(Range::new(min, max));
        self
    }

    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.length = Some((min, max));
        self
    }

    pub fn with_subtype(mut self, subtype: &Arc<TypeDef>) -> Self {
        self.subtypes.push(Arc::clone(subtype));
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = Some(charset);
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn unclamped(mut self) -> Self {
        self.clamped = false;
        self
    }
}

/// A named phenotype type with single inheritance.
///
/// Each level lists only the members it declares; inherited members are
/// reached through `parent`.
#[derive(Debug)]
pub struct TypeDef {
    name: String,
    parent: Option<Arc<TypeDef>>,
    is_abstract: bool,
    members: Vec<MemberSpec>,
}

impl PartialEq for TypeDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl TypeDef {
    pub fn builder(name: impl Into<String>) -> TypeDefBuilder {
        TypeDefBuilder {
            def: TypeDef {
                name: name.into(),
                parent: None,
                is_abstract: false,
                members: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<TypeDef>> {
        self.parent.as_ref()
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn declared_members(&self) -> &[MemberSpec] {
        &self.members
    }

    /// Distance from the universal base; a type without a parent has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |p| p.depth())
    }

    /// Type chain from the outermost ancestor down to `self`.
    pub fn lineage(&self) -> Vec<&TypeDef> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent.as_deref() {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// True if a value of type `other` can stand where `self` is expected.
    pub fn is_assignable_from(&self, other: &TypeDef) -> bool {
        other.lineage().iter().any(|t| t.name == self.name)
    }

    /// Looks a member up on this type or any ancestor.
    pub fn member(&self, name: &str) -> Option<&MemberSpec> {
        let mut current = Some(self);
        while let Some(def) = current {
            if let Some(member) = def.members.iter().find(|m| m.name == name) {
                return Some(member);
            }
            current = def.parent.as_deref();
        }
        None
    }

    /// Every member, ancestors' first.
    pub fn all_members(&self) -> Vec<&MemberSpec> {
        self.lineage()
            .into_iter()
            .flat_map(|def| def.members.iter())
            .collect()
    }

    pub fn parameterized_members(&self, declared_only: bool) -> Vec<&MemberSpec> {
        let members = if declared_only {
            self.members.iter().collect()
        } else {
            self.all_members()
        };
        members.into_iter().filter(|m| m.parameterized).collect()
    }
}

pub struct TypeDefBuilder {
    def: TypeDef,
}

impl TypeDefBuilder {
    pub fn extends(mut self, parent: &Arc<TypeDef>) -> Self {
        self.def.parent = Some(Arc::clone(parent));
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.def.is_abstract = true;
        self
    }

    pub fn member(mut self, member: MemberSpec) -> Self {
        self.def.members.push(member);
        self
    }

    /// Fails if a member name is declared twice along the inheritance chain.
    pub fn build(self) -> Result<Arc<TypeDef>> {
        let mut seen = HashSet::new();
        for member in self.def.all_members() {
            if !seen.insert(member.name.as_str()) {
                return Err(CodecError::Schema(format!(
                    "Member {} is declared more than once in the hierarchy of {}",
                    member.name, self.def.name
                )));
            }
        }
        Ok(Arc::new(self.def))
    }
}

/// Live object of some [`TypeDef`]: the type handle plus one value per member.
#[derive(Debug, Clone)]
pub struct Instance {
    def: Arc<TypeDef>,
    fields: Vec<(String, Value)>,
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.def.name == other.def.name && self.fields == other.fields
    }
}

impl Instance {
    /// Creates an instance with every member at its kind's default value.
    pub fn new(def: &Arc<TypeDef>) -> Result<Self> {
        if def.is_abstract {
            return Err(CodecError::Decode(format!(
                "Cannot instantiate abstract type {}",
                def.name
            )));
        }
        let fields = def
            .all_members()
            .into_iter()
            .map(|m| (m.name.clone(), m.kind.default_value()))
            .collect();
        Ok(Self {
            def: Arc::clone(def),
            fields,
        })
    }

    pub fn def(&self) -> &Arc<TypeDef> {
        &self.def
    }

    pub fn type_name(&self) -> &str {
        &self.def.name
    }

    pub fn get(&self, member: &str) -> Result<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == member)
            .map(|(_, value)| value)
            .ok_or_else(|| self.missing(member))
    }

    pub fn set(&mut self, member: &str, value: Value) -> Result<()> {
        match self.fields.iter_mut().find(|(name, _)| name == member) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.missing(member)),
        }
    }

    pub fn with(mut self, member: &str, value: Value) -> Result<Self> {
        self.set(member, value)?;
        Ok(self)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    fn missing(&self, member: &str) -> CodecError {
        CodecError::MemberNotFound {
            member: member.to_string(),
            type_name: self.def.name.clone(),
        }
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("$type", self.type_name())?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hierarchy() -> (Arc<TypeDef>, Arc<TypeDef>, Arc<TypeDef>) {
        let base = TypeDef::builder("Base")
            .abstract_type()
            .member(MemberSpec::new("a", Kind::I32))
            .build()
            .unwrap();
        let mid = TypeDef::builder("Mid")
            .extends(&base)
            .member(MemberSpec::new("b", Kind::F64))
            .member(MemberSpec::new("note", Kind::Str).plain())
            .build()
            .unwrap();
        let leaf = TypeDef::builder("Leaf")
            .extends(&mid)
            .member(MemberSpec::new("c", Kind::Bool))
            .build()
            .unwrap();
        (base, mid, leaf)
    }

    #[test]
    fn test_depth_and_assignability() {
        let (base, mid, leaf) = hierarchy();
        assert_eq!(base.depth(), 1);
        assert_eq!(mid.depth(), 2);
        assert_eq!(leaf.depth(), 3);
        assert!(base.is_assignable_from(&leaf));
        assert!(mid.is_assignable_from(&leaf));
        assert!(!leaf.is_assignable_from(&mid));
    }

    #[test]
    fn test_members_follow_lineage() {
        let (_, _, leaf) = hierarchy();
        let names: Vec<_> = leaf.all_members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "note", "c"]);

        let params: Vec<_> = leaf
            .parameterized_members(false)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(params, vec!["a", "b", "c"]);
        assert_eq!(leaf.parameterized_members(true).len(), 1);
        assert!(leaf.member("a").is_some());
        assert!(leaf.member("zzz").is_none());
    }

    #[test]
    fn test_instance_defaults_and_errors() {
        let (base, _, leaf) = hierarchy();
        assert!(Instance::new(&base).is_err());

        let mut instance = Instance::new(&leaf).unwrap();
        assert_eq!(instance.get("a").unwrap(), &Value::I32(0));
        instance.set("c", Value::Bool(true)).unwrap();
        assert_eq!(instance.get("c").unwrap(), &Value::Bool(true));

        let err = instance.set("missing", Value::Null).unwrap_err();
        assert!(matches!(err, CodecError::MemberNotFound { .. }));
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let (base, _, _) = hierarchy();
        let result = TypeDef::builder("Dup")
            .extends(&base)
            .member(MemberSpec::new("a", Kind::I32))
            .build();
        assert!(matches!(result, Err(CodecError::Schema(_))));
    }
}
