//! MolQL - query molecular structures with typed expression trees.
//!
//! # Architecture
//!
//! ```text
//! Expression (built in code or deserialized)
//!     │
//!     ▼
//! Query::compile ──► CompiledExpr    symbols resolved, arguments checked
//!     │
//!     ▼
//! Query::execute(&Model) ──► AtomSelection
//!     │
//!     ▼
//! flatten / to_mask                  for renderers or further queries
//! ```
//!
//! The crates underneath can be used on their own:
//! - [`mq_ir`]: types, the symbol registry, expression trees
//! - [`mq_structure`]: the model, atom sets, selections and masks
//! - [`mq_eval`]: the compiler and the evaluator
//!
//! # Example
//!
//! ```text
//! use molql::builder as b;
//! use molql::catalog::structure::{ATOM_NAME, RES_SEQ_NUMBER};
//!
//! let expr = b::and([
//!     b::eq(b::prop(ATOM_NAME), b::str("CA")),
//!     b::gr(b::prop(RES_SEQ_NUMBER), b::num(10.0)),
//! ]);
//! let query = molql::Query::compile(&expr)?;
//! let selection = query.execute(&model)?;
//! ```

mod error;
mod query;
mod tracing_setup;

pub use error::Error;
pub use query::Query;
pub use tracing_setup::init_tracing;

pub use mq_eval::{
    CompileError, CompiledExpr, Compiler, Environment, EvalError, EvalErrorKind, QueryConfig,
    QueryConfigBuilder, RuntimeTable, Value, ValueSet,
};
pub use mq_ir::{builder, catalog, ArgKey, Expression, Literal, Name, SymbolId, SymbolTable, Type};
pub use mq_structure::{
    AtomRecord, AtomSelection, AtomSet, BondFlags, Mask, MaskDensity, Model, ModelBuilder,
    ModelError, SecondaryStructure, Vec3,
};

/// Compile `expr` and run it against `model` with the default configuration.
pub fn select(expr: &Expression, model: &Model) -> Result<AtomSelection, Error> {
    Ok(Query::compile(expr)?.execute(model)?)
}
