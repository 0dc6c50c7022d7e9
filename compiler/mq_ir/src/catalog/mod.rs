//! The built-in symbol catalog.
//!
//! This is the language surface only: names, signatures and return types.
//! Each back end supplies its own run-time table keyed by these ids.
//!
//! Ids are exported as constants (`catalog::core::AND`, …) so that back ends
//! and tree builders never spell them twice.

pub mod core;
pub mod structure;

use crate::{Arguments, RegistrationError, SymbolTable, Type};

/// Register every built-in symbol.
pub fn register_standard(table: &mut SymbolTable) -> Result<(), RegistrationError> {
    core::register(table)?;
    structure::register(table)?;
    Ok(())
}

/// Register `id` (a full `namespace.name`) with the table.
fn define(
    table: &mut SymbolTable,
    id: &str,
    args: Arguments,
    return_type: Type,
    description: &'static str,
) -> Result<(), RegistrationError> {
    let (namespace, name) = id.rsplit_once('.').unwrap_or(("", id));
    table.register(namespace, name, args, return_type, description)?;
    Ok(())
}

/// Type of the `entity-type` enumeration.
pub fn entity_type() -> Type {
    Type::one_of("entity-type", &["polymer", "non-polymer", "water", "unknown"])
}

/// Type of the `secondary-structure` enumeration.
pub fn secondary_structure_type() -> Type {
    Type::one_of("secondary-structure", &["helix", "sheet", "none"])
}
