//! Backend-agnostic compiler for filter combination expressions.
//!
//! `compile()` turns text like `"f1 & (f2 | !f3)"` into an immutable,
//! reusable [`CompiledExpression`]; `resolve()` binds it to the caller's
//! filter definitions and backend leaf resolver, producing a composed
//! condition tree. Trees are cached by structural signature so requests
//! sharing the same filter shape, but different runtime values, reuse work.

pub mod builder;
pub mod cache;
pub mod compiler;
pub mod error;
pub mod signature;

pub use compiler::{CompiledExpression, FilterCompiler};
pub use error::{FilterError, Result};
