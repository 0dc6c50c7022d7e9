//! Compiled queries.

use std::sync::Arc;

use mq_eval::{CompileError, CompiledExpr, Compiler, Environment, EvalError, QueryConfig, Value};
use mq_ir::{builder, Expression, Type};
use mq_structure::{AtomSelection, Model};
use rayon::prelude::*;

/// A compiled query, ready to run against any number of models.
///
/// Compilation happens once; the compiled tree is immutable and shared, so
/// a `Query` is cheap to clone and can run on several threads at once.
#[derive(Clone, Debug)]
pub struct Query {
    compiled: Arc<CompiledExpr>,
}

impl Query {
    /// Compile against the built-in catalog and implementations.
    ///
    /// A query whose static type is `Bool` is treated as an atom test:
    /// `q` becomes `atomGroups(atom-test: q)`.
    pub fn compile(expr: &Expression) -> Result<Query, CompileError> {
        Self::compile_with(Compiler::standard(), expr)
    }

    pub fn compile_with(compiler: Compiler<'_>, expr: &Expression) -> Result<Query, CompileError> {
        let mut compiled = compiler.compile(expr)?;
        if *compiled.ty() == Type::Bool {
            tracing::debug!("lifting boolean query to an atom test");
            compiled = compiler.compile(&builder::atoms(expr.clone()))?;
        }
        Ok(Query {
            compiled: Arc::new(compiled),
        })
    }

    /// Static type of the query's result.
    pub fn ty(&self) -> &Type {
        self.compiled.ty()
    }

    pub fn compiled(&self) -> &CompiledExpr {
        &self.compiled
    }

    pub fn execute(&self, model: &Model) -> Result<AtomSelection, EvalError> {
        self.execute_with(model, &QueryConfig::default())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(model = %model.id(), atoms = model.atom_count()))]
    pub fn execute_with(&self, model: &Model, config: &QueryConfig) -> Result<AtomSelection, EvalError> {
        let mut env = Environment::for_model(model, config);
        let selection = self.compiled.eval_selection(&mut env)?;
        tracing::debug!(sets = selection.len(), "query executed");
        Ok(selection)
    }

    /// Run against every model in parallel. Results are in model order.
    pub fn execute_many(&self, models: &[Model]) -> Vec<Result<AtomSelection, EvalError>> {
        self.execute_many_with(models, &QueryConfig::default())
    }

    pub fn execute_many_with(
        &self,
        models: &[Model],
        config: &QueryConfig,
    ) -> Vec<Result<AtomSelection, EvalError>> {
        models
            .par_iter()
            .map(|model| self.execute_with(model, config))
            .collect()
    }

    /// Evaluate a query of any type, e.g. a count or a property set.
    pub fn evaluate_value(&self, model: &Model) -> Result<Value, EvalError> {
        let config = QueryConfig::default();
        let mut env = Environment::for_model(model, &config);
        self.compiled.eval(&mut env)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
