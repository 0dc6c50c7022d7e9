use mq_eval::{CompileError, EvalError};
use thiserror::Error;

/// Either stage of running a query.
#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Compile(e) => e.code(),
            Error::Eval(e) => e.code(),
        }
    }
}
