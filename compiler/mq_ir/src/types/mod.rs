//! Value types of the query language.
//!
//! Types are structural: two types are the same when their tags and element
//! types match. [`Type::is_assignable_to`] is the single compatibility
//! relation the compiler uses when checking an argument against its declared
//! parameter type.

use std::fmt;

use crate::Name;

/// The static type of a value or expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// Any value. Accepted everywhere; produced only by polymorphic symbols.
    Any,
    Bool,
    /// 64-bit floating point number.
    Num,
    Str,
    /// Upper-cased chemical element symbol (`C`, `FE`, ...).
    ElementSymbol,
    /// A single group of atoms.
    AtomSet,
    /// An ordered sequence of atom sets; the result of generators.
    AtomSelection,
    /// The bond currently under test (read through the bond slot).
    BondReference,
    /// Unordered collection of distinct values.
    Set(Box<Type>),
    /// Ordered collection of values.
    List(Box<Type>),
    /// A string restricted to a fixed enumeration, e.g. entity types.
    OneOf { name: Name, values: Box<[Name]> },
    /// Any of several types.
    Union(Box<[Type]>),
}

impl Type {
    pub fn set(element: Type) -> Self {
        Type::Set(Box::new(element))
    }

    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    pub fn one_of(name: &str, values: &[&str]) -> Self {
        Type::OneOf {
            name: Name::intern(name),
            values: values.iter().map(|v| Name::intern(v)).collect(),
        }
    }

    pub fn union(members: impl IntoIterator<Item = Type>) -> Self {
        Type::Union(members.into_iter().collect())
    }

    /// Element type of a container type.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::Set(t) | Type::List(t) => Some(t),
            _ => None,
        }
    }

    /// Whether a value of static type `self` may be passed where `expected`
    /// is declared.
    ///
    /// The relation:
    /// - `Any` on either side is compatible (values typed `Any` are checked
    ///   at run time by the consuming implementation);
    /// - element symbols and enumerated strings are strings;
    /// - containers are covariant in their element type;
    /// - a `List(a)` is accepted where `Set(b)` is expected (the evaluator
    ///   converts it), never the other way round;
    /// - a union is accepted when every member is, and a union is satisfied by
    ///   any member.
    pub fn is_assignable_to(&self, expected: &Type) -> bool {
        if self == expected {
            return true;
        }
        match (self, expected) {
            (Type::Any, _) | (_, Type::Any) => true,
            (Type::Union(members), _) => members.iter().all(|m| m.is_assignable_to(expected)),
            (_, Type::Union(members)) => members.iter().any(|m| self.is_assignable_to(m)),
            (Type::ElementSymbol | Type::OneOf { .. }, Type::Str) => true,
            (Type::OneOf { name: a, .. }, Type::OneOf { name: b, .. }) => a == b,
            (Type::Set(a) | Type::List(a), Type::Set(b)) | (Type::List(a), Type::List(b)) => {
                a.is_assignable_to(b)
            }
            _ => false,
        }
    }

    /// Whether a string literal with text `value` is accepted where `self` is
    /// expected. Literals are allowed to narrow: `"c"` is a valid element
    /// symbol and `"water"` a valid entity type.
    pub fn accepts_str_literal(&self, value: Name) -> bool {
        match self {
            Type::Any | Type::Str | Type::ElementSymbol => true,
            Type::OneOf { values, .. } => values.contains(&value),
            Type::Union(members) => members.iter().any(|m| m.accepts_str_literal(value)),
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => f.write_str("any"),
            Type::Bool => f.write_str("bool"),
            Type::Num => f.write_str("number"),
            Type::Str => f.write_str("string"),
            Type::ElementSymbol => f.write_str("element-symbol"),
            Type::AtomSet => f.write_str("atom-set"),
            Type::AtomSelection => f.write_str("atom-selection"),
            Type::BondReference => f.write_str("bond-reference"),
            Type::Set(t) => write!(f, "set<{t}>"),
            Type::List(t) => write!(f, "list<{t}>"),
            Type::OneOf { name, .. } => write!(f, "one-of<{name}>"),
            Type::Union(members) => {
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{m}")?;
                }
                Ok(())
            }
        }
    }
}
