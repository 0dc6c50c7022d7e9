//! Expression compilation.
//!
//! One post-order pass over the tree: every `Apply` is resolved against the
//! symbol table and the runtime table, its arguments are bound to the
//! declared parameters and type-checked, defaults are filled in, and the
//! node becomes a [`Call`]. Literals become constants. Nothing is
//! re-validated at run time.

mod compiled;
mod error;

use mq_ir::{
    Apply, ArgKey, Argument, Arguments, Expression, ListArguments, Literal, Name, Symbol, SymbolId,
    SymbolTable, Type,
};

use crate::runtime::{Implementation, RuntimeTable};
use crate::stack::ensure_sufficient_stack;
use crate::Value;

pub(crate) use compiled::Call;
pub use compiled::CompiledExpr;
pub use error::CompileError;

/// Compiles expressions against a symbol table and a runtime table.
#[derive(Copy, Clone, Debug)]
pub struct Compiler<'t> {
    symbols: &'t SymbolTable,
    runtime: &'t RuntimeTable,
}

impl Compiler<'static> {
    /// The built-in catalog with the built-in implementations.
    pub fn standard() -> Self {
        Compiler::new(mq_ir::standard(), RuntimeTable::standard())
    }
}

/// Where an argument expression ends up.
enum Target {
    Slot(usize),
    Rest(usize),
}

impl<'t> Compiler<'t> {
    pub fn new(symbols: &'t SymbolTable, runtime: &'t RuntimeTable) -> Self {
        Compiler { symbols, runtime }
    }

    pub fn symbols(&self) -> &'t SymbolTable {
        self.symbols
    }

    #[tracing::instrument(level = "debug", skip_all, fields(nodes = expr.node_count()))]
    pub fn compile(&self, expr: &Expression) -> Result<CompiledExpr, CompileError> {
        let compiled = self.compile_expr(expr)?;
        tracing::debug!(ty = %compiled.ty(), "compiled expression");
        Ok(compiled)
    }

    fn compile_expr(&self, expr: &Expression) -> Result<CompiledExpr, CompileError> {
        ensure_sufficient_stack(|| match expr {
            Expression::Literal(literal) => literal_constant(*literal, None, None),
            Expression::Apply(apply) => self.compile_apply(apply),
        })
    }

    fn compile_apply(&self, apply: &Apply) -> Result<CompiledExpr, CompileError> {
        let symbol = self
            .symbols
            .get(apply.symbol)
            .ok_or(CompileError::UnknownSymbol {
                symbol: apply.symbol,
            })?;
        let op = self
            .runtime
            .get(symbol.id)
            .ok_or(CompileError::MissingImplementation { symbol: symbol.id })?;

        let call = match &symbol.args {
            Arguments::Dictionary(params) => self.bind_dictionary(symbol, op, params, &apply.args)?,
            Arguments::List(list) => self.bind_list(symbol, op, list, &apply.args)?,
        };
        Ok(CompiledExpr::call(call, symbol.return_type.clone()))
    }

    fn bind_dictionary(
        &self,
        symbol: &Symbol,
        op: Implementation,
        params: &[(Name, Argument)],
        args: &[(ArgKey, Expression)],
    ) -> Result<Call, CompileError> {
        let rest_param = params.iter().position(|(_, p)| p.is_rest);
        let mut slots: Vec<Option<CompiledExpr>> = (0..params.len()).map(|_| None).collect();
        let mut rest: Vec<(ArgKey, CompiledExpr)> = Vec::new();

        for (key, expr) in args {
            let declared = match key {
                ArgKey::Positional(i) => symbol.args.param(Name::intern(&i.to_string())),
                ArgKey::Named(name) => symbol.args.param(*name),
            };
            let target = match declared {
                Some((index, param)) if param.is_rest => Target::Rest(index),
                Some((index, _)) => Target::Slot(index),
                None => match (key, rest_param) {
                    (ArgKey::Positional(_), Some(index)) => Target::Rest(index),
                    _ => {
                        return Err(CompileError::UnknownArgument {
                            symbol: symbol.id,
                            key: *key,
                        })
                    }
                },
            };
            match target {
                Target::Slot(index) => {
                    let (name, param) = &params[index];
                    if slots[index].is_some() {
                        return Err(CompileError::DuplicateArgument {
                            symbol: symbol.id,
                            key: *name,
                        });
                    }
                    slots[index] = Some(self.compile_argument(symbol.id, *key, &param.ty, expr)?);
                }
                Target::Rest(index) => {
                    let compiled = self.compile_argument(symbol.id, *key, &params[index].1.ty, expr)?;
                    rest.push((*key, compiled));
                }
            }
        }

        for (index, (name, param)) in params.iter().enumerate() {
            if slots[index].is_some() || param.is_rest {
                continue;
            }
            if let Some(default) = param.default_value {
                let key = ArgKey::Named(*name);
                slots[index] = Some(self.compile_argument(
                    symbol.id,
                    key,
                    &param.ty,
                    &Expression::Literal(default),
                )?);
            } else if !param.is_optional {
                return Err(CompileError::MissingArgument {
                    symbol: symbol.id,
                    key: *name,
                });
            }
        }

        rest.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Call {
            symbol: symbol.id,
            op,
            keys: params.iter().map(|(name, _)| *name).collect(),
            args: slots.into_boxed_slice(),
            rest: rest.into_iter().map(|(_, expr)| expr).collect(),
        })
    }

    fn bind_list(
        &self,
        symbol: &Symbol,
        op: Implementation,
        list: &ListArguments,
        args: &[(ArgKey, Expression)],
    ) -> Result<Call, CompileError> {
        let mut items: Vec<(u32, &Expression)> = Vec::with_capacity(args.len());
        for (key, expr) in args {
            match key {
                ArgKey::Positional(i) => items.push((*i, expr)),
                ArgKey::Named(_) => {
                    return Err(CompileError::UnknownArgument {
                        symbol: symbol.id,
                        key: *key,
                    })
                }
            }
        }
        if items.len() < list.min {
            return Err(CompileError::TooFewArguments {
                symbol: symbol.id,
                min: list.min,
                found: items.len(),
            });
        }
        if let Some(max) = list.max.filter(|&max| items.len() > max) {
            return Err(CompileError::TooManyArguments {
                symbol: symbol.id,
                max,
                found: items.len(),
            });
        }
        items.sort_by_key(|(i, _)| *i);

        let rest = items
            .into_iter()
            .map(|(i, expr)| self.compile_argument(symbol.id, ArgKey::Positional(i), &list.ty, expr))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Call {
            symbol: symbol.id,
            op,
            keys: Box::default(),
            args: Box::default(),
            rest: rest.into_boxed_slice(),
        })
    }

    /// Compile `expr` as the value of parameter `key` declared as `expected`.
    fn compile_argument(
        &self,
        symbol: SymbolId,
        key: ArgKey,
        expected: &Type,
        expr: &Expression,
    ) -> Result<CompiledExpr, CompileError> {
        let compiled = match expr {
            Expression::Literal(Literal::Str(text)) => {
                return str_argument(symbol, key, expected, *text);
            }
            Expression::Literal(literal) => literal_constant(*literal, Some(symbol), Some(key))?,
            Expression::Apply(_) => self.compile_expr(expr)?,
        };
        if compiled.ty().is_assignable_to(expected) {
            Ok(compiled)
        } else {
            Err(CompileError::TypeMismatch {
                symbol,
                key,
                expected: expected.clone(),
                found: compiled.ty().clone(),
            })
        }
    }
}

fn literal_constant(
    literal: Literal,
    symbol: Option<SymbolId>,
    key: Option<ArgKey>,
) -> Result<CompiledExpr, CompileError> {
    if let Literal::Num(n) = literal {
        if !n.is_finite() {
            return Err(CompileError::InvalidLiteral {
                symbol,
                key,
                literal: literal.to_string(),
                reason: "numbers must be finite",
            });
        }
    }
    Ok(CompiledExpr::constant(Value::from(literal), literal.ty()))
}

/// String literals may narrow to element symbols (upper-cased) and to
/// enumerations they are a member of.
fn str_argument(
    symbol: SymbolId,
    key: ArgKey,
    expected: &Type,
    text: Name,
) -> Result<CompiledExpr, CompileError> {
    if expected.accepts_str_literal(text) {
        return Ok(match expected {
            Type::ElementSymbol => CompiledExpr::constant(
                Value::str(&text.as_str().to_ascii_uppercase()),
                Type::ElementSymbol,
            ),
            Type::OneOf { .. } => CompiledExpr::constant(Value::Str(text), expected.clone()),
            _ => CompiledExpr::constant(Value::Str(text), Type::Str),
        });
    }
    if matches!(expected, Type::OneOf { .. }) {
        return Err(CompileError::InvalidLiteral {
            symbol: Some(symbol),
            key: Some(key),
            literal: Literal::Str(text).to_string(),
            reason: "not a member of the enumeration",
        });
    }
    Err(CompileError::TypeMismatch {
        symbol,
        key,
        expected: expected.clone(),
        found: Type::Str,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
