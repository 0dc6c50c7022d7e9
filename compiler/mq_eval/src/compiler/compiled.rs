use mq_ir::{Name, SymbolId, Type};
use mq_structure::AtomSelection;

use crate::errors::{invalid_argument, EvalResult};
use crate::runtime::Implementation;
use crate::stack::ensure_sufficient_stack;
use crate::{Environment, Value};

/// An executable expression: constants and resolved calls.
///
/// Immutable after compilation; share it freely across threads and evaluate
/// it against as many environments as needed.
#[derive(Clone, Debug)]
pub struct CompiledExpr {
    node: Node,
    ty: Type,
}

#[derive(Clone, Debug)]
enum Node {
    Const(Value),
    Call(Box<Call>),
}

/// A resolved symbol application. Dictionary arguments sit in declaration
/// order (`None` for omitted optional arguments); list elements and rest
/// arguments sit in `rest`, in index order.
#[derive(Clone, Debug)]
pub(crate) struct Call {
    pub(crate) symbol: SymbolId,
    pub(crate) op: Implementation,
    pub(crate) keys: Box<[Name]>,
    pub(crate) args: Box<[Option<CompiledExpr>]>,
    pub(crate) rest: Box<[CompiledExpr]>,
}

impl CompiledExpr {
    pub(crate) fn constant(value: Value, ty: Type) -> Self {
        CompiledExpr {
            node: Node::Const(value),
            ty,
        }
    }

    pub(crate) fn call(call: Call, ty: Type) -> Self {
        CompiledExpr {
            node: Node::Call(Box::new(call)),
            ty,
        }
    }

    /// Static type of the result.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The value, when the expression is a constant.
    pub fn as_constant(&self) -> Option<&Value> {
        match &self.node {
            Node::Const(value) => Some(value),
            Node::Call(_) => None,
        }
    }

    /// The symbol applied at the root, when the expression is a call.
    pub fn symbol(&self) -> Option<SymbolId> {
        match &self.node {
            Node::Const(_) => None,
            Node::Call(call) => Some(call.symbol),
        }
    }

    pub fn eval(&self, env: &mut Environment<'_>) -> EvalResult {
        match &self.node {
            Node::Const(value) => Ok(value.clone()),
            Node::Call(call) => ensure_sufficient_stack(|| call.op.invoke(call, env))
                .map_err(|e| e.in_symbol(call.symbol)),
        }
    }

    pub fn eval_bool(&self, env: &mut Environment<'_>) -> EvalResult<bool> {
        self.eval(env)?.as_bool()
    }

    pub fn eval_selection(&self, env: &mut Environment<'_>) -> EvalResult<AtomSelection> {
        self.eval(env)?.into_selection()
    }
}

impl Call {
    pub(crate) fn arg(&self, index: usize) -> Option<&CompiledExpr> {
        self.args.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn rest(&self) -> &[CompiledExpr] {
        &self.rest
    }

    fn key(&self, index: usize) -> Name {
        self.keys.get(index).copied().unwrap_or(Name::EMPTY)
    }

    /// Evaluate a required argument.
    pub(crate) fn value(&self, index: usize, env: &mut Environment<'_>) -> EvalResult {
        match self.arg(index) {
            Some(expr) => expr.eval(env),
            None => Err(invalid_argument(format!(
                "argument `{}` was not bound",
                self.key(index)
            ))),
        }
    }

    /// Evaluate an optional argument without a default.
    pub(crate) fn opt_value(&self, index: usize, env: &mut Environment<'_>) -> EvalResult<Option<Value>> {
        self.arg(index).map(|expr| expr.eval(env)).transpose()
    }

    pub(crate) fn bool(&self, index: usize, env: &mut Environment<'_>) -> EvalResult<bool> {
        self.value(index, env)?
            .as_bool()
            .map_err(|e| e.in_argument(self.key(index)))
    }

    pub(crate) fn num(&self, index: usize, env: &mut Environment<'_>) -> EvalResult<f64> {
        self.value(index, env)?
            .as_num()
            .map_err(|e| e.in_argument(self.key(index)))
    }

    pub(crate) fn str(&self, index: usize, env: &mut Environment<'_>) -> EvalResult<Name> {
        self.value(index, env)?
            .as_str()
            .map_err(|e| e.in_argument(self.key(index)))
    }

    pub(crate) fn selection(&self, index: usize, env: &mut Environment<'_>) -> EvalResult<AtomSelection> {
        self.value(index, env)?
            .into_selection()
            .map_err(|e| e.in_argument(self.key(index)))
    }

    /// Evaluate every list element or rest argument, in order.
    pub(crate) fn rest_values(&self, env: &mut Environment<'_>) -> EvalResult<Vec<Value>> {
        self.rest.iter().map(|expr| expr.eval(env)).collect()
    }
}
