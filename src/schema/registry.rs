use super::document::SchemaDocument;
use super::type_def::TypeDef;
use crate::error::{CodecError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Named lookup of every phenotype type known to a schema.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    types: HashMap<String, Arc<TypeDef>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: &SchemaDocument) -> Result<Self> {
        Ok(Self {
            types: document.build_types()?,
        })
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let document: SchemaDocument = toml::from_str(source)?;
        Self::from_document(&document)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let document: SchemaDocument = serde_json::from_str(source)?;
        Self::from_document(&document)
    }

    /// Loads a `.json` document, anything else is read as TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_toml_str(&source),
        }
    }

    /// Registers `def` and its ancestors under their names.
    pub fn register(&mut self, def: &Arc<TypeDef>) {
        if let Some(parent) = def.parent() {
            self.register(parent);
        }
        self.types.insert(def.name().to_string(), Arc::clone(def));
    }

    pub fn get(&self, name: &str) -> Option<Arc<TypeDef>> {
        self.types.get(name).cloned()
    }

    pub fn require(&self, name: &str) -> Result<Arc<TypeDef>> {
        self.get(name)
            .ok_or_else(|| CodecError::Schema(format!("Type {} is not registered", name)))
    }

    /// Registered strict descendants of `root`, shallowest first then by name.
    pub fn descendants(&self, root: &TypeDef) -> Vec<Arc<TypeDef>> {
        let mut found: Vec<_> = self
            .types
            .values()
            .filter(|def| def.name() != root.name() && root.is_assignable_from(def))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.depth().cmp(&b.depth()).then_with(|| a.name().cmp(b.name())));
        found
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
