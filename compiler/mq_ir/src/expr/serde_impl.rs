//! JSON-friendly shape of expression trees.
//!
//! ```text
//! { "symbol": "core.rel.eq", "args": { "0": …, "1": { "value": "CA", "type": "string" } } }
//! ```
//!
//! Named and positional keys share the `args` map; positional keys are
//! decimal strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ArgKey, Expression, Literal};
use crate::{Name, SymbolId};

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ExprRepr {
    Apply {
        symbol: Name,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        args: BTreeMap<String, ExprRepr>,
    },
    Literal {
        value: ValueRepr,
        #[serde(rename = "type")]
        ty: LiteralType,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ValueRepr {
    Bool(bool),
    Num(f64),
    Str(Name),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LiteralType {
    Bool,
    Number,
    String,
}

impl From<&Expression> for ExprRepr {
    fn from(expr: &Expression) -> Self {
        match expr {
            Expression::Literal(Literal::Bool(b)) => ExprRepr::Literal {
                value: ValueRepr::Bool(*b),
                ty: LiteralType::Bool,
            },
            Expression::Literal(Literal::Num(n)) => ExprRepr::Literal {
                value: ValueRepr::Num(*n),
                ty: LiteralType::Number,
            },
            Expression::Literal(Literal::Str(s)) => ExprRepr::Literal {
                value: ValueRepr::Str(*s),
                ty: LiteralType::String,
            },
            Expression::Apply(apply) => ExprRepr::Apply {
                symbol: apply.symbol.name(),
                args: apply
                    .args
                    .iter()
                    .map(|(k, e)| (k.to_string(), ExprRepr::from(e)))
                    .collect(),
            },
        }
    }
}

impl TryFrom<ExprRepr> for Expression {
    type Error = String;

    fn try_from(repr: ExprRepr) -> Result<Self, Self::Error> {
        match repr {
            ExprRepr::Literal { value, ty } => {
                let literal = match (value, ty) {
                    (ValueRepr::Bool(b), LiteralType::Bool) => Literal::Bool(b),
                    (ValueRepr::Num(n), LiteralType::Number) => Literal::Num(n),
                    (ValueRepr::Str(s), LiteralType::String) => Literal::Str(s),
                    (ValueRepr::Str(s), LiteralType::Number) => {
                        // numbers that JSON cannot carry (inf, nan) travel as strings
                        Literal::Num(s.as_str().parse::<f64>().map_err(|e| {
                            format!("literal {:?} is not a number: {e}", s.as_str())
                        })?)
                    }
                    (_, ty) => {
                        let ty = match ty {
                            LiteralType::Bool => "bool",
                            LiteralType::Number => "number",
                            LiteralType::String => "string",
                        };
                        return Err(format!("literal value does not match declared type `{ty}`"));
                    }
                };
                Ok(Expression::Literal(literal))
            }
            ExprRepr::Apply { symbol, args } => {
                let mut converted = Vec::with_capacity(args.len());
                for (key, arg) in args {
                    converted.push((ArgKey::parse(&key), Expression::try_from(arg)?));
                }
                converted.sort_by_key(|(k, _)| match k {
                    ArgKey::Positional(i) => (0, *i, Name::EMPTY),
                    ArgKey::Named(n) => (1, 0, *n),
                });
                Ok(Expression::apply(SymbolId::from_name(symbol), converted))
            }
        }
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ExprRepr::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = ExprRepr::deserialize(deserializer)?;
        Expression::try_from(repr).map_err(serde::de::Error::custom)
    }
}
