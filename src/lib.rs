pub mod config;
pub mod engines;
pub mod error;
pub mod schema;
pub mod types;

pub use engines::assembly::{ResolverBuilder, ResolverDeriver};
pub use engines::generation::{Gene, PhenotypeMapper};
pub use engines::resolvers::Resolver;
pub use error::{CodecError, Result};
pub use schema::{Instance, MemberSpec, SchemaRegistry, TypeDef};
pub use types::{Kind, Range, Value};
