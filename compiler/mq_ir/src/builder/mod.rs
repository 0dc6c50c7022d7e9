//! Helpers for building expression trees in code.
//!
//! Parsers for the textual dialects and hand-written queries both go through
//! these; each helper produces exactly the `Apply` node the corresponding
//! catalog symbol expects.
//!
//! ```text
//! use mq_ir::builder as b;
//! let ca_after_10 = b::and([
//!     b::eq(b::prop(ATOM_NAME), b::str("CA")),
//!     b::gr(b::prop(RES_SEQ_NUMBER), b::num(10.0)),
//! ]);
//! ```

use crate::catalog::{core, structure};
use crate::{ArgKey, Expression, SymbolId};

pub fn num(value: f64) -> Expression {
    Expression::num(value)
}

pub fn str(value: &str) -> Expression {
    Expression::str(value)
}

pub fn bool(value: bool) -> Expression {
    Expression::bool(value)
}

/// Positional application of a catalog id.
pub fn call(id: &str, args: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::call(SymbolId::new(id), args)
}

/// Named application of a catalog id; keys made of digits are positional.
pub fn apply<'a>(id: &str, args: impl IntoIterator<Item = (&'a str, Expression)>) -> Expression {
    Expression::apply(
        SymbolId::new(id),
        args.into_iter().map(|(k, e)| (ArgKey::parse(k), e)),
    )
}

/// A zero-argument property accessor, e.g. `prop(ATOM_NAME)`.
pub fn prop(id: &str) -> Expression {
    call(id, [])
}

pub fn not(operand: Expression) -> Expression {
    call(core::NOT, [operand])
}

pub fn and(operands: impl IntoIterator<Item = Expression>) -> Expression {
    call(core::AND, operands)
}

pub fn or(operands: impl IntoIterator<Item = Expression>) -> Expression {
    call(core::OR, operands)
}

pub fn eq(a: Expression, b: Expression) -> Expression {
    call(core::EQ, [a, b])
}

pub fn neq(a: Expression, b: Expression) -> Expression {
    call(core::NEQ, [a, b])
}

pub fn gr(a: Expression, b: Expression) -> Expression {
    call(core::GR, [a, b])
}

pub fn lt(a: Expression, b: Expression) -> Expression {
    call(core::LT, [a, b])
}

pub fn set(values: impl IntoIterator<Item = Expression>) -> Expression {
    call(core::TYPE_SET, values)
}

pub fn all() -> Expression {
    call(structure::GENERATOR_ALL, [])
}

pub fn empty() -> Expression {
    call(structure::GENERATOR_EMPTY, [])
}

/// Tests for `struct.generator.atomGroups`; unset tests are omitted.
#[derive(Clone, Debug, Default)]
pub struct AtomGroups {
    pub entity_test: Option<Expression>,
    pub chain_test: Option<Expression>,
    pub residue_test: Option<Expression>,
    pub atom_test: Option<Expression>,
    pub group_by: Option<Expression>,
}

pub fn atom_groups(groups: AtomGroups) -> Expression {
    let args = [
        ("entity-test", groups.entity_test),
        ("chain-test", groups.chain_test),
        ("residue-test", groups.residue_test),
        ("atom-test", groups.atom_test),
        ("group-by", groups.group_by),
    ];
    apply(
        structure::GENERATOR_ATOM_GROUPS,
        args.into_iter().filter_map(|(k, e)| e.map(|e| (k, e))),
    )
}

/// `atomGroups` with only an atom test: one atom set of matching atoms.
pub fn atoms(test: Expression) -> Expression {
    atom_groups(AtomGroups {
        atom_test: Some(test),
        ..AtomGroups::default()
    })
}

/// `atomGroups` grouping matching atoms into residues.
pub fn residues(test: Expression) -> Expression {
    atom_groups(AtomGroups {
        atom_test: Some(test),
        group_by: Some(prop(structure::RESIDUE_KEY)),
        ..AtomGroups::default()
    })
}
