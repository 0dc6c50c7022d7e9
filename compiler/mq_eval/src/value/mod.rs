//! Runtime values.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use mq_ir::{Literal, Name, Type};
use mq_structure::{AtomSelection, AtomSet};
use rustc_hash::FxHashSet;

use crate::errors::{
    incomparable, invalid_conversion, type_mismatch, unhashable, EvalResult,
};

/// The result of evaluating a compiled expression.
#[derive(Clone, Debug)]
pub enum Value {
    Bool(bool),
    Num(f64),
    Str(Name),
    List(Arc<[Value]>),
    Set(Arc<ValueSet>),
    AtomSet(AtomSet),
    Selection(AtomSelection),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(Name::intern(s))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Num(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::AtomSet(_) => "atom-set",
            Value::Selection(_) => "atom-selection",
        }
    }

    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(type_mismatch(Type::Bool, other.type_name())),
        }
    }

    pub fn as_num(&self) -> EvalResult<f64> {
        match self {
            Value::Num(n) => Ok(*n),
            other => Err(type_mismatch(Type::Num, other.type_name())),
        }
    }

    pub fn as_str(&self) -> EvalResult<Name> {
        match self {
            Value::Str(s) => Ok(*s),
            other => Err(type_mismatch(Type::Str, other.type_name())),
        }
    }

    /// A set value; lists are converted.
    pub fn into_set(self) -> EvalResult<Arc<ValueSet>> {
        match self {
            Value::Set(set) => Ok(set),
            Value::List(items) => ValueSet::from_values(items.iter()).map(Arc::new),
            other => Err(type_mismatch(Type::set(Type::Any), other.type_name())),
        }
    }

    pub fn into_selection(self) -> EvalResult<AtomSelection> {
        match self {
            Value::Selection(selection) => Ok(selection),
            other => Err(type_mismatch(Type::AtomSelection, other.type_name())),
        }
    }

    /// Truthiness used by `core.type.bool`.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Set(set) => !set.is_empty(),
            Value::AtomSet(set) => !set.is_empty(),
            Value::Selection(selection) => !selection.is_empty(),
        }
    }

    /// Conversion used by `core.type.num`. Strings are parsed.
    pub fn to_num(&self) -> EvalResult<f64> {
        match self {
            Value::Bool(b) => Ok(f64::from(u8::from(*b))),
            Value::Num(n) => Ok(*n),
            Value::Str(s) => {
                let text = s.as_str().trim();
                text.parse::<f64>()
                    .ok()
                    .filter(|n| !text.is_empty() && !n.is_nan())
                    .ok_or_else(|| invalid_conversion(format!("{text:?}"), Type::Num))
            }
            other => Err(invalid_conversion(other.type_name(), Type::Num)),
        }
    }

    /// Conversion used by `core.type.str`.
    pub fn to_text(&self) -> EvalResult<Name> {
        match self {
            Value::Bool(b) => Ok(Name::intern(if *b { "true" } else { "false" })),
            Value::Num(n) => Ok(Name::intern(&format_num(*n))),
            Value::Str(s) => Ok(*s),
            other => Err(invalid_conversion(other.type_name(), Type::Str)),
        }
    }

    /// Structural equality. Values of different kinds are never equal.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::AtomSet(a), Value::AtomSet(b)) => a == b,
            (Value::Selection(a), Value::Selection(b)) => a == b,
            _ => false,
        }
    }

    /// Ordering of numbers, and of strings by text.
    pub fn compare(&self, other: &Value) -> EvalResult<Ordering> {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a
                .partial_cmp(b)
                .ok_or_else(|| incomparable("NaN", "number")),
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp_text(*b)),
            (a, b) => Err(incomparable(a.type_name(), b.type_name())),
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Bool(b) => Value::Bool(b),
            Literal::Num(n) => Value::Num(n),
            Literal::Str(s) => Value::Str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<AtomSelection> for Value {
    fn from(selection: AtomSelection) -> Self {
        Value::Selection(selection)
    }
}

/// Integers print without a fractional part.
fn format_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Num(n) => f.write_str(&format_num(*n)),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Set(set) => {
                f.write_str("#{")?;
                for (i, key) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", Value::from(*key))?;
                }
                f.write_str("}")
            }
            Value::AtomSet(set) => write!(f, "{set:?}"),
            Value::Selection(selection) => write!(f, "<{} atom sets>", selection.len()),
        }
    }
}

/// Hashable form of a scalar value. `-0.0` and `0.0` are the same key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SetKey {
    Bool(bool),
    Num(u64),
    Str(Name),
}

impl SetKey {
    pub fn of(value: &Value) -> EvalResult<SetKey> {
        match value {
            Value::Bool(b) => Ok(SetKey::Bool(*b)),
            Value::Num(n) => Ok(SetKey::Num(if *n == 0.0 { 0 } else { n.to_bits() })),
            Value::Str(s) => Ok(SetKey::Str(*s)),
            other => Err(unhashable(other.type_name())),
        }
    }
}

impl From<SetKey> for Value {
    fn from(key: SetKey) -> Self {
        match key {
            SetKey::Bool(b) => Value::Bool(b),
            SetKey::Num(bits) => Value::Num(f64::from_bits(bits)),
            SetKey::Str(s) => Value::Str(s),
        }
    }
}

/// Distinct scalar values in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ValueSet {
    order: Vec<SetKey>,
    members: FxHashSet<SetKey>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> EvalResult<Self> {
        let mut set = ValueSet::new();
        for value in values {
            set.insert(value)?;
        }
        Ok(set)
    }

    /// Returns whether the value was new.
    pub fn insert(&mut self, value: &Value) -> EvalResult<bool> {
        Ok(self.insert_key(SetKey::of(value)?))
    }

    pub fn insert_key(&mut self, key: SetKey) -> bool {
        let fresh = self.members.insert(key);
        if fresh {
            self.order.push(key);
        }
        fresh
    }

    /// Non-scalar values are never members.
    pub fn contains(&self, value: &Value) -> bool {
        SetKey::of(value).is_ok_and(|key| self.members.contains(&key))
    }

    pub fn is_subset(&self, other: &ValueSet) -> bool {
        self.order.iter().all(|key| other.members.contains(key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SetKey> {
        self.order.iter()
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl Eq for ValueSet {}
