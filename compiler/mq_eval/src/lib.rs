//! MolQL evaluation - compiling expression trees and running them.
//!
//! - [`Compiler`]: resolves symbols against a [`SymbolTable`](mq_ir::SymbolTable)
//!   and a [`RuntimeTable`], checks arguments and produces a [`CompiledExpr`]
//! - [`CompiledExpr`]: an immutable, shareable evaluation tree
//! - [`Environment`]: one evaluation against one model, with the reusable
//!   element and bond slots
//! - [`Value`]: what evaluation produces
//! - [`QueryConfig`]: tunables (mask density, result caps)
//!
//! Errors: [`CompileError`] is all-or-nothing and raised before anything
//! runs; [`EvalError`] fails a single evaluation and leaves the compiled
//! expression and the model's caches usable.

mod compiler;
mod config;
mod environment;
mod errors;
pub mod runtime;
mod stack;
#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod test_model;
mod value;

pub use compiler::{CompileError, CompiledExpr, Compiler};
pub use config::{QueryConfig, QueryConfigBuilder};
pub use environment::{BondAddress, Context, ElementAddress, Environment, Slots};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use runtime::{Implementation, RuntimeTable};
pub use stack::ensure_sufficient_stack;
pub use value::{SetKey, Value, ValueSet};
