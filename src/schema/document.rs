use super::charsets::Charset;
use super::type_def::{MemberSpec, TypeDef};
use crate::error::{CodecError, Result};
use crate::types::Kind;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Declarative description of a phenotype schema, loadable from TOML or JSON.
///
/// ```toml
/// [[types]]
/// name = "Dog"
/// extends = "Animal"
///
/// [[types.members]]
/// name = "spots"
/// type = "i32"
/// range = [1, 9]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_expr: String,
    #[serde(default)]
    pub range: Option<[f64; 2]>,
    #[serde(default)]
    pub length: Option<[usize; 2]>,
    #[serde(default)]
    pub subtypes: Vec<String>,
    #[serde(default)]
    pub charset: Option<Charset>,
    #[serde(default = "enabled")]
    pub clamp: bool,
    #[serde(default = "enabled")]
    pub parameterize: bool,
}

fn enabled() -> bool {
    true
}

impl SchemaDocument {
    /// Builds every declared type, dependencies first.
    pub fn build_types(&self) -> Result<HashMap<String, Arc<TypeDef>>> {
        let mut decls = HashMap::new();
        for decl in &self.types {
            if decls.insert(decl.name.as_str(), decl).is_some() {
                return Err(CodecError::Schema(format!("Type {} is declared twice", decl.name)));
            }
        }

        let mut builder = DocumentBuilder {
            decls,
            built: HashMap::new(),
            visiting: HashSet::new(),
        };
        for decl in &self.types {
            builder.define(&decl.name)?;
        }
        Ok(builder.built)
    }
}

struct DocumentBuilder<'a> {
    decls: HashMap<&'a str, &'a TypeDecl>,
    built: HashMap<String, Arc<TypeDef>>,
    visiting: HashSet<String>,
}

impl DocumentBuilder<'_> {
    fn define(&mut self, name: &str) -> Result<Arc<TypeDef>> {
        if let Some(def) = self.built.get(name) {
            return Ok(Arc::clone(def));
        }
        let decl = *self
            .decls
            .get(name)
            .ok_or_else(|| CodecError::Schema(format!("Unknown type {}", name)))?;
        if !self.visiting.insert(name.to_string()) {
            return Err(CodecError::Schema(format!(
                "Type {} refers back to itself",
                name
            )));
        }

        let mut type_builder = TypeDef::builder(&decl.name);
        if let Some(parent) = &decl.extends {
            let parent = self.define(parent)?;
            type_builder = type_builder.extends(&parent);
        }
        if decl.is_abstract {
            type_builder = type_builder.abstract_type();
        }
        for member in &decl.members {
            type_builder = type_builder.member(self.member(&decl.name, member)?);
        }
        let def = type_builder.build()?;

        self.visiting.remove(name);
        self.built.insert(name.to_string(), Arc::clone(&def));
        log::debug!("Defined schema type {} at depth {}", name, def.depth());
        Ok(def)
    }

    fn member(&mut self, owner: &str, decl: &MemberDecl) -> Result<MemberSpec> {
        let kind = self.parse_kind(decl.type_expr.trim()).map_err(|e| {
            CodecError::Schema(format!("Member {} of {}: {}", decl.name, owner, e))
        })?;
        let mut spec = MemberSpec::new(&decl.name, kind);
        if let Some([min, max]) = decl.range {
            spec = spec.with_range(min, max);
        }
        if let Some([min, max]) = decl.length {
            spec = spec.with_length(min, max);
        }
        if let Some(charset) = decl.charset {
            spec = spec.with_charset(charset);
        }
        for subtype in &decl.subtypes {
            let def = self.define(subtype)?;
            spec = spec.with_subtype(&def);
        }
        if !decl.clamp {
            spec = spec.unclamped();
        }
        if !decl.parameterize {
            spec = spec.plain();
        }
        Ok(spec)
    }

    fn parse_kind(&mut self, expr: &str) -> Result<Kind> {
        if let Some(element) = expr.strip_suffix("[]") {
            return Ok(Kind::list(self.parse_kind(element.trim())?));
        }
        let kind = match expr {
            "bool" => Kind::Bool,
            "i8" => Kind::I8,
            "u8" => Kind::U8,
            "i16" => Kind::I16,
            "u16" => Kind::U16,
            "i32" => Kind::I32,
            "u32" => Kind::U32,
            "i64" => Kind::I64,
            "u64" => Kind::U64,
            "f32" => Kind::F32,
            "f64" => Kind::F64,
            "char" => Kind::Char,
            "string" => Kind::Str,
            name if self.decls.contains_key(name) => Kind::Object(self.define(name)?),
            other => {
                return Err(CodecError::Schema(format!(
                    "No scalar resolver or declared type matches {}",
                    other
                )))
            }
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZOO: &str = r#"
        [[types]]
        name = "Zoo"
        [[types.members]]
        name = "animals"
        type = "Animal[]"
        length = [1, 4]
        subtypes = ["Dog", "Cat"]

        [[types]]
        name = "Animal"
        abstract = true
        [[types.members]]
        name = "name"
        type = "string"
        length = [2, 6]
        charset = "alpha_lower"

        [[types]]
        name = "Dog"
        extends = "Animal"
        [[types.members]]
        name = "spots"
        type = "i32"
        range = [1, 9]
    "#;

    #[test]
    fn test_builds_in_dependency_order() {
        let doc: SchemaDocument = toml::from_str(ZOO).unwrap();
        let err = doc.build_types().unwrap_err();
        // Cat is referenced but never declared
        assert!(err.to_string().contains("Cat"));

        let doc: SchemaDocument = toml::from_str(&format!(
            "{}\n[[types]]\nname = \"Cat\"\nextends = \"Animal\"\n",
            ZOO
        ))
        .unwrap();
        let types = doc.build_types().unwrap();
        assert_eq!(types.len(), 4);
        assert_eq!(types["Dog"].depth(), 2);
        let animals = types["Zoo"].member("animals").unwrap();
        assert_eq!(animals.kind, Kind::list(Kind::object(&types["Animal"])));
        assert_eq!(animals.subtypes.len(), 2);
        assert_eq!(animals.length, Some((1, 4)));
    }

    #[test]
    fn test_unknown_primitive_is_schema_error() {
        let doc: SchemaDocument = serde_json::from_str(
            r#"{"types": [{"name": "Bad", "members": [{"name": "x", "type": "decimal"}]}]}"#,
        )
        .unwrap();
        assert!(matches!(doc.build_types(), Err(CodecError::Schema(_))));
    }

    #[test]
    fn test_reference_cycle_is_schema_error() {
        let doc: SchemaDocument = serde_json::from_str(
            r#"{"types": [{"name": "Node", "members": [{"name": "next", "type": "Node"}]}]}"#,
        )
        .unwrap();
        assert!(matches!(doc.build_types(), Err(CodecError::Schema(_))));
    }

    #[test]
    fn test_member_flags() {
        let doc: SchemaDocument = serde_json::from_str(
            r#"{"types": [{"name": "T", "members": [
                {"name": "raw", "type": "f32", "clamp": false},
                {"name": "label", "type": "string", "parameterize": false}
            ]}]}"#,
        )
        .unwrap();
        let types = doc.build_types().unwrap();
        let t = &types["T"];
        assert!(!t.member("raw").unwrap().clamped);
        assert!(!t.member("label").unwrap().parameterized);
    }
}
