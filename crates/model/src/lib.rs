pub mod condition;
pub mod definition;
pub mod policy;
pub mod resolver;

pub use condition::Condition;
pub use definition::{Definitions, FilterDefinition};
pub use policy::{CachePolicy, CompilerPolicy};
pub use resolver::{BoxError, LeafResolver};
