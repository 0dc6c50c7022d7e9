//! Evaluation errors.
//!
//! An [`EvalError`] is a structured [`EvalErrorKind`] plus the symbol and
//! argument it was raised for. The innermost symbol wins: the evaluator
//! attaches context on the way out and never overwrites it.
//!
//! Construct errors through the `#[cold]` factory functions below.

use mq_ir::{Name, SymbolId, Type};
use thiserror::Error;

pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: &'static str },
    #[error("cannot compare {left} with {right}")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("cannot convert {value} to {target}")]
    InvalidConversion { value: String, target: Type },
    #[error("{type_name} values cannot be set members")]
    Unhashable { type_name: &'static str },
    #[error("no atom is bound; atom properties are only defined inside atom tests")]
    NoCurrentAtom,
    #[error("no bond is bound; bond properties are only defined inside bond tests")]
    NoCurrentBond,
    #[error("no current atom set; atom set functions are only defined inside per-set tests")]
    NoCurrentAtomSet,
    #[error("result exceeds the limit of {limit} atom sets")]
    TooManyResults { limit: usize },
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}{}", context_suffix(.symbol, .argument))]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Symbol whose implementation raised the error.
    pub symbol: Option<SymbolId>,
    /// Argument being evaluated or converted, when known.
    pub argument: Option<Name>,
}

fn context_suffix(symbol: &Option<SymbolId>, argument: &Option<Name>) -> String {
    match (symbol, argument) {
        (Some(s), Some(a)) => format!(" (in `{s}`, argument `{a}`)"),
        (Some(s), None) => format!(" (in `{s}`)"),
        (None, Some(a)) => format!(" (argument `{a}`)"),
        (None, None) => String::new(),
    }
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            symbol: None,
            argument: None,
        }
    }

    /// Attach `symbol` unless an inner symbol is already recorded.
    #[must_use]
    pub fn in_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol.get_or_insert(symbol);
        self
    }

    #[must_use]
    pub fn in_argument(mut self, argument: Name) -> Self {
        if self.symbol.is_none() {
            self.argument.get_or_insert(argument);
        }
        self
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self.kind {
            EvalErrorKind::TypeMismatch { .. } => "E3001",
            EvalErrorKind::Incomparable { .. } => "E3002",
            EvalErrorKind::DivisionByZero => "E3003",
            EvalErrorKind::InvalidConversion { .. } => "E3004",
            EvalErrorKind::Unhashable { .. } => "E3005",
            EvalErrorKind::NoCurrentAtom => "E3006",
            EvalErrorKind::NoCurrentBond => "E3007",
            EvalErrorKind::NoCurrentAtomSet => "E3008",
            EvalErrorKind::TooManyResults { .. } => "E3009",
            EvalErrorKind::InvalidArgument { .. } => "E3010",
        }
    }
}

#[cold]
pub fn type_mismatch(expected: Type, found: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { expected, found })
}

#[cold]
pub fn incomparable(left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Incomparable { left, right })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn invalid_conversion(value: impl Into<String>, target: Type) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidConversion {
        value: value.into(),
        target,
    })
}

#[cold]
pub fn unhashable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unhashable { type_name })
}

#[cold]
pub fn no_current_atom() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoCurrentAtom)
}

#[cold]
pub fn no_current_bond() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoCurrentBond)
}

#[cold]
pub fn no_current_atom_set() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoCurrentAtomSet)
}

#[cold]
pub fn too_many_results(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyResults { limit })
}

#[cold]
pub fn invalid_argument(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        message: message.into(),
    })
}
