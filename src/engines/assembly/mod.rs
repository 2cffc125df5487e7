pub mod builder;
pub mod deriver;
pub mod tree;

pub use builder::{ManyStep, ModelStep, ResolverBuilder};
pub use deriver::ResolverDeriver;
pub use tree::{TreeNode, TypeTree, TypeTreeAssembler};
