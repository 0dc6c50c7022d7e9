//! MolQL IR - types, symbols and expression trees.
//!
//! This crate defines what a query *is*:
//! - [`Name`] / [`StringInterner`]: interned strings shared by queries and models
//! - [`Type`]: structural value types and the compatibility relation
//! - [`Symbol`], [`Arguments`], [`SymbolTable`]: the typed symbol registry
//! - [`catalog`]: the built-in symbols (`core.*`, `struct.*`)
//! - [`Expression`]: the syntax tree parsers produce and the compiler consumes
//! - [`builder`]: helpers for building trees in code
//!
//! Nothing here evaluates anything; run-time behaviour lives in `mq_eval`.
//!
//! # Features
//!
//! - `serde`: (de)serialize expression trees as
//!   `{ "symbol": id, "args": { key: expr } }` / `{ "value": v, "type": t }`.

pub mod builder;
pub mod catalog;
mod expr;
pub mod interner;
mod name;
mod registry;
mod symbol;
mod types;

pub use expr::{Apply, ArgKey, Expression, Literal};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use registry::{standard, RegistrationError, SymbolTable};
pub use symbol::{Argument, Arguments, ListArguments, Symbol, SymbolId};
pub use types::Type;
