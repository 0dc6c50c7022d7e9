//! `core.*` and `struct.type.*`: scalar logic, arithmetic, strings and sets.

use std::cmp::Ordering;
use std::sync::Arc;

use mq_ir::Name;
use mq_structure::rings::fingerprint;
use mq_structure::{ElementSymbol, EntityType};
use smallvec::SmallVec;

use crate::compiler::Call;
use crate::errors::{division_by_zero, EvalResult};
use crate::{Environment, Value, ValueSet};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Conversion {
    Bool,
    Num,
    Str,
    List,
    Set,
    ElementSymbol,
    EntityType,
    RingFingerprint,
}

impl Conversion {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        match self {
            Conversion::Bool => Ok(Value::Bool(call.value(0, env)?.to_bool())),
            Conversion::Num => Ok(Value::Num(call.value(0, env)?.to_num()?)),
            Conversion::Str => Ok(Value::Str(call.value(0, env)?.to_text()?)),
            Conversion::List => Ok(Value::List(Arc::from(call.rest_values(env)?))),
            Conversion::Set => {
                let values = call.rest_values(env)?;
                Ok(Value::Set(Arc::new(ValueSet::from_values(&values)?)))
            }
            Conversion::ElementSymbol => {
                let text = call.str(0, env)?;
                Ok(Value::Str(ElementSymbol::new(text.as_str()).name()))
            }
            Conversion::EntityType => {
                let text = call.str(0, env)?;
                Ok(Value::Str(EntityType::normalize(text.as_str()).name()))
            }
            Conversion::RingFingerprint => {
                let mut symbols: SmallVec<[&'static str; 8]> = SmallVec::new();
                for value in call.rest_values(env)? {
                    symbols.push(ElementSymbol::new(value.as_str()?.as_str()).as_str());
                }
                Ok(Value::str(&fingerprint(&symbols)))
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Logic {
    Not,
    And,
    Or,
}

impl Logic {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        match self {
            Logic::Not => Ok(Value::Bool(!call.bool(0, env)?)),
            Logic::And => {
                for operand in call.rest() {
                    if !operand.eval_bool(env)? {
                        return Ok(Value::Bool(false));
                    }
                }
                Ok(Value::Bool(true))
            }
            Logic::Or => {
                for operand in call.rest() {
                    if operand.eval_bool(env)? {
                        return Ok(Value::Bool(true));
                    }
                }
                Ok(Value::Bool(false))
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    If,
}

impl Control {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        match self {
            Control::If => {
                if call.bool(0, env)? {
                    call.value(1, env)
                } else {
                    call.value(2, env)
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Neq,
    Lt,
    Lte,
    Gr,
    Gre,
    InRange,
}

impl Relation {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        let result = match self {
            Relation::InRange => {
                let x = call.num(0, env)?;
                let min = call.num(1, env)?;
                let max = call.num(2, env)?;
                min <= x && x <= max
            }
            Relation::Eq => call.value(0, env)?.equals(&call.value(1, env)?),
            Relation::Neq => !call.value(0, env)?.equals(&call.value(1, env)?),
            Relation::Lt | Relation::Lte | Relation::Gr | Relation::Gre => {
                let ordering = call.value(0, env)?.compare(&call.value(1, env)?)?;
                match self {
                    Relation::Lt => ordering == Ordering::Less,
                    Relation::Lte => ordering != Ordering::Greater,
                    Relation::Gr => ordering == Ordering::Greater,
                    _ => ordering != Ordering::Less,
                }
            }
        };
        Ok(Value::Bool(result))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MathOp {
    Add,
    Sub,
    Mult,
    Div,
    Abs,
    Min,
    Max,
}

impl MathOp {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        let n = match self {
            MathOp::Add => fold_nums(call, env, 0.0, |a, b| a + b)?,
            MathOp::Mult => fold_nums(call, env, 1.0, |a, b| a * b)?,
            MathOp::Min => fold_nums(call, env, f64::INFINITY, f64::min)?,
            MathOp::Max => fold_nums(call, env, f64::NEG_INFINITY, f64::max)?,
            MathOp::Sub => call.num(0, env)? - call.num(1, env)?,
            MathOp::Div => {
                let numerator = call.num(0, env)?;
                let denominator = call.num(1, env)?;
                if denominator == 0.0 {
                    return Err(division_by_zero());
                }
                numerator / denominator
            }
            MathOp::Abs => call.num(0, env)?.abs(),
        };
        Ok(Value::Num(n))
    }
}

fn fold_nums(
    call: &Call,
    env: &mut Environment<'_>,
    init: f64,
    f: impl Fn(f64, f64) -> f64,
) -> EvalResult<f64> {
    let mut acc = init;
    for operand in call.rest() {
        acc = f(acc, operand.eval(env)?.as_num()?);
    }
    Ok(acc)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextOp {
    Concat,
    ToUpperCase,
}

impl TextOp {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        match self {
            TextOp::Concat => {
                let mut out = String::new();
                for operand in call.rest() {
                    out.push_str(operand.eval(env)?.as_str()?.as_str());
                }
                Ok(Value::str(&out))
            }
            TextOp::ToUpperCase => {
                let text = call.str(0, env)?;
                if text.is_empty() {
                    return Ok(Value::Str(Name::EMPTY));
                }
                Ok(Value::str(&text.as_str().to_uppercase()))
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetOp {
    Has,
    IsSubset,
}

impl SetOp {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        let set = call.value(0, env)?.into_set()?;
        match self {
            SetOp::Has => {
                let value = call.value(1, env)?;
                Ok(Value::Bool(set.contains(&value)))
            }
            SetOp::IsSubset => {
                let other = call.value(1, env)?.into_set()?;
                Ok(Value::Bool(set.is_subset(&other)))
            }
        }
    }
}
