pub mod accessor;
pub mod array;
pub mod character;
pub mod composite;
pub mod extension;
pub mod numeric;
pub mod polymorphic;
pub mod traits;

pub use accessor::{Accessor, FieldAccessor, FieldBinding};
pub use array::{ArrayResolver, StringResolver};
pub use character::CharResolver;
pub use composite::CompositeResolver;
pub use extension::ExtensionResolver;
pub use numeric::NumericResolver;
pub use polymorphic::{AlternativeEntry, PolymorphicResolver};
pub use traits::Resolver;
