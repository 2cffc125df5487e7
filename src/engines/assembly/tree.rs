use super::deriver::ResolverDeriver;
use crate::engines::resolvers::{
    CompositeResolver, ExtensionResolver, PolymorphicResolver, Resolver,
};
use crate::error::{CodecError, Result};
use crate::schema::TypeDef;
use std::collections::HashSet;
use std::sync::Arc;

/// One type of an assembled hierarchy.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub def: Arc<TypeDef>,
    pub depth: usize,
    pub resolver: Arc<dyn Resolver>,
    /// Index of the node this one extends; `None` for the shallowest type.
    pub base: Option<usize>,
    /// Members whose bindings this node owns.
    pub members: Vec<String>,
    /// Listed by the caller (or the root) rather than inserted as a missing ancestor.
    pub explicit: bool,
}

impl TreeNode {
    /// Concrete types the caller asked for become alternatives.
    pub fn is_alternative(&self) -> bool {
        self.explicit && !self.def.is_abstract()
    }
}

/// Resolver nodes for a root type and its subtypes, in processing order.
#[derive(Debug, Clone)]
pub struct TypeTree {
    nodes: Vec<TreeNode>,
}

impl TypeTree {
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&TreeNode> {
        self.nodes.iter().find(|n| n.def.name() == name)
    }

    pub fn alternatives(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter().filter(|n| n.is_alternative())
    }

    /// Alternative table over the concrete, explicitly requested types.
    pub fn into_resolver(self) -> Result<PolymorphicResolver> {
        let mut resolver = PolymorphicResolver::new();
        for node in self.alternatives() {
            resolver.add_alternative(&node.def, Arc::clone(&node.resolver))?;
        }
        if resolver.count() == 0 {
            let root = self.nodes.first().map(|n| n.def.name()).unwrap_or_default();
            return Err(CodecError::Schema(format!(
                "No concrete types available for {}",
                root
            )));
        }
        Ok(resolver)
    }
}

/// Builds the inheritance-aware resolver chain for a polymorphic member.
///
/// Types are processed by increasing depth, ties kept in listing order. The
/// first becomes a fixed composite over all of its members; every later type
/// extends its deepest already-built ancestor with the members it declares.
/// Ancestors between the root and a listed subtype are inserted so that each
/// level owns exactly its own members.
pub struct TypeTreeAssembler<'a> {
    deriver: &'a ResolverDeriver,
}

impl<'a> TypeTreeAssembler<'a> {
    pub fn new(deriver: &'a ResolverDeriver) -> Self {
        Self { deriver }
    }

    pub fn assemble(&self, root: &Arc<TypeDef>, subtypes: &[Arc<TypeDef>]) -> Result<TypeTree> {
        let order = Self::processing_order(root, subtypes)?;
        let mut nodes: Vec<TreeNode> = Vec::with_capacity(order.len());

        for (def, explicit) in order {
            let depth = def.depth();
            let node = match Self::nearest_ancestor(&nodes, &def) {
                None => {
                    let bindings = self.deriver.bindings(&def, false)?;
                    let members = bindings.iter().map(|b| b.accessor.name().to_string()).collect();
                    let resolver: Arc<dyn Resolver> =
                        Arc::new(CompositeResolver::for_type(&def, bindings)?);
                    TreeNode {
                        def,
                        depth,
                        resolver,
                        base: None,
                        members,
                        explicit,
                    }
                }
                Some(base) => {
                    let bindings = self.deriver.bindings(&def, true)?;
                    let members = bindings.iter().map(|b| b.accessor.name().to_string()).collect();
                    let resolver: Arc<dyn Resolver> = Arc::new(ExtensionResolver::new(
                        Arc::clone(&nodes[base].resolver),
                        bindings,
                    ));
                    log::debug!(
                        "Type {} extends resolver of {}",
                        def.name(),
                        nodes[base].def.name()
                    );
                    TreeNode {
                        def,
                        depth,
                        resolver,
                        base: Some(base),
                        members,
                        explicit,
                    }
                }
            };
            nodes.push(node);
        }

        Ok(TypeTree { nodes })
    }

    /// Listed subtypes, then the root if absent, then missing intermediate
    /// ancestors; stably sorted by depth.
    fn processing_order(
        root: &Arc<TypeDef>,
        subtypes: &[Arc<TypeDef>],
    ) -> Result<Vec<(Arc<TypeDef>, bool)>> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();

        for subtype in subtypes {
            if !root.is_assignable_from(subtype) {
                return Err(CodecError::Schema(format!(
                    "Subtype {} does not derive from {}",
                    subtype.name(),
                    root.name()
                )));
            }
            if seen.insert(subtype.name().to_string()) {
                order.push((Arc::clone(subtype), true));
            }
        }
        if seen.insert(root.name().to_string()) {
            order.push((Arc::clone(root), true));
        }

        let root_depth = root.depth();
        for subtype in subtypes {
            let mut missing = Vec::new();
            let mut current = subtype.parent();
            while let Some(ancestor) = current {
                if ancestor.depth() <= root_depth {
                    break;
                }
                missing.push(Arc::clone(ancestor));
                current = ancestor.parent();
            }
            for ancestor in missing.into_iter().rev() {
                if seen.insert(ancestor.name().to_string()) {
                    order.push((ancestor, false));
                }
            }
        }

        order.sort_by_key(|(def, _)| def.depth());
        Ok(order)
    }

    /// Deepest built node the candidate derives from; first match on ties.
    fn nearest_ancestor(nodes: &[TreeNode], def: &TypeDef) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (index, node) in nodes.iter().enumerate() {
            if node.def.name() == def.name() || !node.def.is_assignable_from(def) {
                continue;
            }
            if best.map_or(true, |b| node.depth > nodes[b].depth) {
                best = Some(index);
            }
        }
        best
    }
}
