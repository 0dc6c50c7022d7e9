use mq_ir::{ArgKey, Name, SymbolId, Type};
use thiserror::Error;

/// Why an expression could not be compiled. Compilation stops at the first
/// error and produces nothing.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CompileError {
    #[error("unknown symbol `{symbol}`")]
    UnknownSymbol { symbol: SymbolId },
    #[error("`{symbol}` is missing required argument `{key}`")]
    MissingArgument { symbol: SymbolId, key: Name },
    #[error("`{symbol}` has no argument `{key}`")]
    UnknownArgument { symbol: SymbolId, key: ArgKey },
    #[error("`{symbol}` received argument `{key}` twice")]
    DuplicateArgument { symbol: SymbolId, key: Name },
    #[error("`{symbol}` argument `{key}` expects {expected}, found {found}")]
    TypeMismatch {
        symbol: SymbolId,
        key: ArgKey,
        expected: Type,
        found: Type,
    },
    #[error("`{symbol}` needs at least {min} argument(s), found {found}")]
    TooFewArguments {
        symbol: SymbolId,
        min: usize,
        found: usize,
    },
    #[error("`{symbol}` accepts at most {max} argument(s), found {found}")]
    TooManyArguments {
        symbol: SymbolId,
        max: usize,
        found: usize,
    },
    #[error("`{symbol}` has no runtime implementation")]
    MissingImplementation { symbol: SymbolId },
    #[error("invalid literal {literal}{}: {reason}", location(.symbol, .key))]
    InvalidLiteral {
        symbol: Option<SymbolId>,
        key: Option<ArgKey>,
        literal: String,
        reason: &'static str,
    },
}

fn location(symbol: &Option<SymbolId>, key: &Option<ArgKey>) -> String {
    match (symbol, key) {
        (Some(s), Some(k)) => format!(" for `{s}` argument `{k}`"),
        (Some(s), None) => format!(" for `{s}`"),
        _ => String::new(),
    }
}

impl CompileError {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::UnknownSymbol { .. } => "E2001",
            CompileError::MissingArgument { .. } => "E2002",
            CompileError::UnknownArgument { .. } => "E2003",
            CompileError::DuplicateArgument { .. } => "E2004",
            CompileError::TypeMismatch { .. } => "E2005",
            CompileError::TooFewArguments { .. } => "E2006",
            CompileError::TooManyArguments { .. } => "E2007",
            CompileError::MissingImplementation { .. } => "E2008",
            CompileError::InvalidLiteral { .. } => "E2009",
        }
    }

    /// The symbol the error was raised for, if any.
    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            CompileError::UnknownSymbol { symbol }
            | CompileError::MissingArgument { symbol, .. }
            | CompileError::UnknownArgument { symbol, .. }
            | CompileError::DuplicateArgument { symbol, .. }
            | CompileError::TypeMismatch { symbol, .. }
            | CompileError::TooFewArguments { symbol, .. }
            | CompileError::TooManyArguments { symbol, .. }
            | CompileError::MissingImplementation { symbol } => Some(*symbol),
            CompileError::InvalidLiteral { symbol, .. } => *symbol,
        }
    }
}
