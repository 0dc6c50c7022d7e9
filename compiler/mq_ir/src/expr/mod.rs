//! Expression trees.
//!
//! An [`Expression`] is either a constant [`Literal`] or an [`Apply`] of a
//! symbol to argument expressions. Trees are produced by the dialect parsers
//! (or by [`crate::builder`]) and consumed by the compiler. They never change
//! after construction and carry no free variables; everything dynamic comes
//! from the environment supplied at evaluation time.

#[cfg(feature = "serde")]
mod serde_impl;

use std::fmt;

use crate::{Name, SymbolId, Type};

/// A compile-time constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Literal {
    Bool(bool),
    Num(f64),
    Str(Name),
}

impl Literal {
    pub fn str(s: &str) -> Self {
        Literal::Str(Name::intern(s))
    }

    /// The static type of the literal.
    pub fn ty(&self) -> Type {
        match self {
            Literal::Bool(_) => Type::Bool,
            Literal::Num(_) => Type::Num,
            Literal::Str(_) => Type::Str,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Num(n) => write!(f, "{n}"),
            Literal::Str(s) => write!(f, "{:?}", s.as_str()),
        }
    }
}

/// Key of an argument in an [`Apply`] node.
///
/// Positional keys bind to dictionary keys `"0"`, `"1"`, ... or to list
/// elements in index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArgKey {
    Positional(u32),
    Named(Name),
}

impl ArgKey {
    pub fn named(name: &str) -> Self {
        ArgKey::Named(Name::intern(name))
    }

    /// Parse a key as written in serialized trees: decimal digits are
    /// positional, everything else is a name.
    pub fn parse(key: &str) -> Self {
        match key.parse::<u32>() {
            Ok(i) if !key.starts_with('+') => ArgKey::Positional(i),
            _ => ArgKey::named(key),
        }
    }
}

impl fmt::Display for ArgKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKey::Positional(i) => write!(f, "{i}"),
            ArgKey::Named(n) => f.write_str(n.as_str()),
        }
    }
}

/// Application of a symbol to argument expressions.
#[derive(Clone, Debug, PartialEq)]
pub struct Apply {
    pub symbol: SymbolId,
    pub args: Vec<(ArgKey, Expression)>,
}

/// A node of the query language syntax tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Apply(Apply),
}

impl Expression {
    pub fn bool(value: bool) -> Self {
        Expression::Literal(Literal::Bool(value))
    }

    pub fn num(value: f64) -> Self {
        Expression::Literal(Literal::Num(value))
    }

    pub fn str(value: &str) -> Self {
        Expression::Literal(Literal::str(value))
    }

    /// Apply `symbol` to keyed arguments.
    pub fn apply(
        symbol: SymbolId,
        args: impl IntoIterator<Item = (ArgKey, Expression)>,
    ) -> Self {
        Expression::Apply(Apply {
            symbol,
            args: args.into_iter().collect(),
        })
    }

    /// Apply `symbol` to positional arguments.
    pub fn call(symbol: SymbolId, args: impl IntoIterator<Item = Expression>) -> Self {
        Expression::apply(
            symbol,
            args.into_iter()
                .enumerate()
                .map(|(i, e)| (ArgKey::Positional(i as u32), e)),
        )
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Expression::Literal(_) => 1,
            Expression::Apply(apply) => {
                1 + apply
                    .args
                    .iter()
                    .map(|(_, e)| e.node_count())
                    .sum::<usize>()
            }
        }
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

impl fmt::Display for Expression {
    /// Lisp-like rendering, e.g. `(core.rel.eq (…atomName) "CA")`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(l) => write!(f, "{l}"),
            Expression::Apply(apply) => {
                write!(f, "({}", apply.symbol)?;
                for (key, arg) in &apply.args {
                    match key {
                        ArgKey::Positional(_) => write!(f, " {arg}")?,
                        ArgKey::Named(n) => write!(f, " :{n} {arg}")?,
                    }
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
