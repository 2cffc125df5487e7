pub mod charsets;
pub mod document;
pub mod registry;
pub mod type_def;

pub use charsets::Charset;
pub use document::{MemberDecl, SchemaDocument, TypeDecl};
pub use registry::SchemaRegistry;
pub use type_def::{Instance, MemberSpec, TypeDef, TypeDefBuilder};
