//! `struct.combinator.*`: combine whole selections.

use mq_structure::{AtomSelection, AtomSet};
use rustc_hash::FxHashSet;

use super::unique;
use crate::compiler::Call;
use crate::errors::EvalResult;
use crate::{Environment, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CombinatorOp {
    /// Atom sets of the first selection that occur, atom for atom, in every
    /// other selection.
    Intersect,
    /// Every atom set of every selection, duplicates removed.
    Merge,
}

impl CombinatorOp {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        let mut selections = Vec::with_capacity(call.rest().len());
        for operand in call.rest() {
            selections.push(operand.eval_selection(env)?);
        }
        let result = match self {
            CombinatorOp::Intersect => intersect(selections, env)?,
            CombinatorOp::Merge => {
                let mut out = unique(env);
                for selection in selections {
                    for set in selection.into_sets() {
                        out.add_non_empty(set)?;
                    }
                }
                out.finish()
            }
        };
        Ok(Value::Selection(result))
    }
}

fn intersect(selections: Vec<AtomSelection>, env: &Environment<'_>) -> EvalResult<AtomSelection> {
    let mut selections = selections.into_iter();
    let Some(pivot) = selections.next() else {
        return Ok(env.context().empty_selection());
    };
    let others: Vec<FxHashSet<AtomSet>> = selections
        .map(|selection| selection.into_sets().into_iter().collect())
        .collect();

    let mut out = unique(env);
    for set in pivot.into_sets() {
        if others.iter().all(|other| other.contains(&set)) {
            out.add_non_empty(set)?;
        }
    }
    Ok(out.finish())
}
