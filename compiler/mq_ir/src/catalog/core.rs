//! `core.*`: scalar logic, relations, arithmetic, strings and sets.

use super::define;
use crate::{Argument, Arguments, RegistrationError, SymbolTable, Type};

pub const TYPE_BOOL: &str = "core.type.bool";
pub const TYPE_NUM: &str = "core.type.num";
pub const TYPE_STR: &str = "core.type.str";
pub const TYPE_LIST: &str = "core.type.list";
pub const TYPE_SET: &str = "core.type.set";

pub const NOT: &str = "core.logic.not";
pub const AND: &str = "core.logic.and";
pub const OR: &str = "core.logic.or";

pub const IF: &str = "core.ctrl.if";

pub const EQ: &str = "core.rel.eq";
pub const NEQ: &str = "core.rel.neq";
pub const LT: &str = "core.rel.lt";
pub const LTE: &str = "core.rel.lte";
pub const GR: &str = "core.rel.gr";
pub const GRE: &str = "core.rel.gre";
pub const IN_RANGE: &str = "core.rel.inRange";

pub const ADD: &str = "core.math.add";
pub const SUB: &str = "core.math.sub";
pub const MULT: &str = "core.math.mult";
pub const DIV: &str = "core.math.div";
pub const ABS: &str = "core.math.abs";
pub const MIN: &str = "core.math.min";
pub const MAX: &str = "core.math.max";

pub const CONCAT: &str = "core.str.concat";
pub const TO_UPPER_CASE: &str = "core.str.toUpperCase";

pub const SET_HAS: &str = "core.set.has";
pub const SET_IS_SUBSET: &str = "core.set.isSubset";

fn unary(ty: Type) -> Arguments {
    Arguments::dictionary([("0", Argument::new(ty))])
}

fn binary(ty: Type) -> Arguments {
    Arguments::dictionary([("0", Argument::new(ty.clone())), ("1", Argument::new(ty))])
}

pub(super) fn register(table: &mut SymbolTable) -> Result<(), RegistrationError> {
    define(table, TYPE_BOOL, unary(Type::Any), Type::Bool, "Convert to a boolean.")?;
    define(table, TYPE_NUM, unary(Type::Any), Type::Num, "Convert to a number.")?;
    define(table, TYPE_STR, unary(Type::Any), Type::Str, "Convert to a string.")?;
    define(
        table,
        TYPE_LIST,
        Arguments::list(Type::Any),
        Type::list(Type::Any),
        "Ordered list of the argument values.",
    )?;
    define(
        table,
        TYPE_SET,
        Arguments::list(Type::Any),
        Type::set(Type::Any),
        "Set of the distinct argument values.",
    )?;

    define(table, NOT, unary(Type::Bool), Type::Bool, "Logical negation.")?;
    define(
        table,
        AND,
        Arguments::non_empty_list(Type::Bool),
        Type::Bool,
        "True when every operand is true; stops at the first false operand.",
    )?;
    define(
        table,
        OR,
        Arguments::non_empty_list(Type::Bool),
        Type::Bool,
        "True when any operand is true; stops at the first true operand.",
    )?;

    define(
        table,
        IF,
        Arguments::dictionary([
            ("0", Argument::new(Type::Bool)),
            ("1", Argument::new(Type::Any)),
            ("2", Argument::new(Type::Any)),
        ]),
        Type::Any,
        "Evaluate `1` when `0` holds, otherwise `2`.",
    )?;

    define(table, EQ, binary(Type::Any), Type::Bool, "Equality.")?;
    define(table, NEQ, binary(Type::Any), Type::Bool, "Inequality.")?;
    for (id, description) in [
        (LT, "Less than."),
        (LTE, "Less than or equal."),
        (GR, "Greater than."),
        (GRE, "Greater than or equal."),
    ] {
        define(
            table,
            id,
            binary(Type::union([Type::Num, Type::Str])),
            Type::Bool,
            description,
        )?;
    }
    define(
        table,
        IN_RANGE,
        Arguments::dictionary([
            ("0", Argument::new(Type::Num)),
            ("min", Argument::new(Type::Num)),
            ("max", Argument::new(Type::Num)),
        ]),
        Type::Bool,
        "`min <= 0 <= max`.",
    )?;

    define(table, ADD, Arguments::non_empty_list(Type::Num), Type::Num, "Sum.")?;
    define(table, SUB, binary(Type::Num), Type::Num, "Difference.")?;
    define(table, MULT, Arguments::non_empty_list(Type::Num), Type::Num, "Product.")?;
    define(table, DIV, binary(Type::Num), Type::Num, "Quotient.")?;
    define(table, ABS, unary(Type::Num), Type::Num, "Absolute value.")?;
    define(table, MIN, Arguments::non_empty_list(Type::Num), Type::Num, "Minimum.")?;
    define(table, MAX, Arguments::non_empty_list(Type::Num), Type::Num, "Maximum.")?;

    define(table, CONCAT, Arguments::list(Type::Str), Type::Str, "String concatenation.")?;
    define(
        table,
        TO_UPPER_CASE,
        unary(Type::Str),
        Type::Str,
        "Upper-case a string.",
    )?;

    define(
        table,
        SET_HAS,
        Arguments::dictionary([
            ("0", Argument::new(Type::set(Type::Any))),
            ("1", Argument::new(Type::Any)),
        ]),
        Type::Bool,
        "Set membership.",
    )?;
    define(
        table,
        SET_IS_SUBSET,
        Arguments::dictionary([
            ("0", Argument::new(Type::set(Type::Any))),
            ("1", Argument::new(Type::set(Type::Any))),
        ]),
        Type::Bool,
        "Whether every member of `0` is in `1`.",
    )?;

    Ok(())
}
