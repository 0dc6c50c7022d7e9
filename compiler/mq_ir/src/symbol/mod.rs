//! Symbols: the named, typed callables of the query language.
//!
//! A [`Symbol`] is pure metadata. It knows its signature and return type and
//! can build [`Apply`](crate::Apply) nodes, but it has no behaviour; run-time
//! behaviour is looked up separately by the evaluator.

use std::fmt;

use crate::{ArgKey, Expression, Literal, Name, Type};

/// Globally unique symbol identifier, `namespace + "." + name`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SymbolId(Name);

impl SymbolId {
    pub fn new(id: &str) -> Self {
        SymbolId(Name::intern(id))
    }

    pub fn of(namespace: &str, name: &str) -> Self {
        if namespace.is_empty() {
            return SymbolId::new(name);
        }
        SymbolId::new(&format!("{namespace}.{name}"))
    }

    pub const fn from_name(name: Name) -> Self {
        SymbolId(name)
    }

    pub const fn name(self) -> Name {
        self.0
    }

    pub fn as_str(self) -> &'static str {
        self.0.as_str()
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.as_str())
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub ty: Type,
    pub is_optional: bool,
    /// Collects every positional argument from this position onwards.
    pub is_rest: bool,
    /// Value used when an optional argument is omitted.
    pub default_value: Option<Literal>,
    pub description: Option<&'static str>,
}

impl Argument {
    /// A required argument.
    pub fn new(ty: Type) -> Self {
        Argument {
            ty,
            is_optional: false,
            is_rest: false,
            default_value: None,
            description: None,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Optional argument with a default.
    #[must_use]
    pub fn with_default(mut self, value: Literal) -> Self {
        self.is_optional = true;
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn rest(mut self) -> Self {
        self.is_rest = true;
        self
    }

    #[must_use]
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// Homogeneous variadic parameter list.
#[derive(Clone, Debug, PartialEq)]
pub struct ListArguments {
    pub ty: Type,
    /// Minimum number of elements.
    pub min: usize,
    /// Maximum number of elements, if capped.
    pub max: Option<usize>,
}

/// A symbol's signature.
#[derive(Clone, Debug, PartialEq)]
pub enum Arguments {
    /// Named parameters in declaration order. Keys never change after
    /// registration.
    Dictionary(Vec<(Name, Argument)>),
    List(ListArguments),
}

impl Arguments {
    /// No parameters.
    pub fn none() -> Self {
        Arguments::Dictionary(Vec::new())
    }

    pub fn dictionary<'a>(entries: impl IntoIterator<Item = (&'a str, Argument)>) -> Self {
        Arguments::Dictionary(
            entries
                .into_iter()
                .map(|(k, a)| (Name::intern(k), a))
                .collect(),
        )
    }

    /// Unbounded list, possibly empty.
    pub fn list(ty: Type) -> Self {
        Arguments::List(ListArguments { ty, min: 0, max: None })
    }

    /// Unbounded list with at least one element.
    pub fn non_empty_list(ty: Type) -> Self {
        Arguments::List(ListArguments { ty, min: 1, max: None })
    }

    /// Dictionary parameter by key, with its declaration index.
    pub fn param(&self, key: Name) -> Option<(usize, &Argument)> {
        match self {
            Arguments::Dictionary(entries) => entries
                .iter()
                .enumerate()
                .find(|(_, (k, _))| *k == key)
                .map(|(i, (_, a))| (i, a)),
            Arguments::List(_) => None,
        }
    }
}

/// An immutable registry entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub id: SymbolId,
    pub namespace: Name,
    pub name: Name,
    pub args: Arguments,
    pub return_type: Type,
    pub description: Option<&'static str>,
}

impl Symbol {
    /// Build an `Apply` node for this symbol. Nothing is evaluated.
    pub fn apply(&self, args: impl IntoIterator<Item = (ArgKey, Expression)>) -> Expression {
        Expression::apply(self.id, args)
    }

    /// Build an `Apply` node from positional arguments.
    pub fn call(&self, args: impl IntoIterator<Item = Expression>) -> Expression {
        Expression::call(self.id, args)
    }
}

#[cfg(test)]
mod tests;
