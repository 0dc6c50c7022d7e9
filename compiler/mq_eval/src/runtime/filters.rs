//! `struct.filter.*`: keep or drop whole atom sets.

use mq_structure::{AtomSelection, AtomSet, BondTable};

use super::linear;
use crate::compiler::Call;
use crate::errors::{invalid_argument, EvalResult};
use crate::{CompiledExpr, Environment, Value};

const SELECTION: usize = 0;
const TEST: usize = 1;

const TARGET: usize = 1;
const MAX_RADIUS: usize = 2;
const MIN_RADIUS: usize = 3;
const WITHIN_INVERT: usize = 4;

const BOND_TEST: usize = 2;
const DISJUNCT: usize = 3;
const CONNECTED_INVERT: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Pick,
    First,
    Within,
    IsConnectedTo,
}

impl FilterOp {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        let selection = call.selection(SELECTION, env)?;
        let result = match self {
            FilterOp::Pick => pick(selection, call, env)?,
            FilterOp::First => {
                let atom_count = selection.atom_count();
                let first = selection.into_sets().into_iter().next();
                AtomSelection::new(atom_count, first.into_iter().collect())
            }
            FilterOp::Within => within(selection, call, env)?,
            FilterOp::IsConnectedTo => is_connected_to(selection, call, env)?,
        };
        Ok(Value::Selection(result))
    }
}

fn pick(selection: AtomSelection, call: &Call, env: &mut Environment<'_>) -> EvalResult<AtomSelection> {
    let Some(test) = call.arg(TEST) else {
        return Err(invalid_argument("test was not bound"));
    };
    let mut out = linear(env);
    for set in selection.into_sets() {
        if env.with_atom_set(&set, |env| test.eval_bool(env))? {
            out.add(set)?;
        }
    }
    Ok(out.finish())
}

fn within(selection: AtomSelection, call: &Call, env: &mut Environment<'_>) -> EvalResult<AtomSelection> {
    let target = call.selection(TARGET, env)?;
    let max = call.num(MAX_RADIUS, env)?;
    let min = call.num(MIN_RADIUS, env)?;
    let invert = call.bool(WITHIN_INVERT, env)?;
    if max.is_nan() || min.is_nan() || min < 0.0 {
        return Err(invalid_argument(format!(
            "radii must be non-negative numbers, got min {min} and max {max}"
        )));
    }

    let model = env.model();
    let target = target.flatten_with(env.config().dense_mask_threshold());
    let mut out = linear(env);
    for set in selection.into_sets() {
        // Both paths compare squared distances against `max * max`.
        let close = if min > 0.0 {
            let d_sq = set.distance_sq(&target, model);
            d_sq >= min * min && d_sq < max * max
        } else {
            set.are_within(&target, model, max)
        };
        if close != invert {
            out.add(set)?;
        }
    }
    Ok(out.finish())
}

fn is_connected_to(
    selection: AtomSelection,
    call: &Call,
    env: &mut Environment<'_>,
) -> EvalResult<AtomSelection> {
    let target = call.selection(TARGET, env)?;
    let disjunct = call.bool(DISJUNCT, env)?;
    let invert = call.bool(CONNECTED_INVERT, env)?;
    let bond_test = call.arg(BOND_TEST);
    let mask = target.to_mask_with(env.config().dense_mask_threshold());
    let bonds = env.model().bonds();

    let mut out = linear(env);
    for set in selection.into_sets() {
        let accepts = |partner| mask.test(partner) && !(disjunct && set.contains(partner));
        let connected = connects(&set, accepts, bonds, bond_test, env)?;
        if connected != invert {
            out.add(set)?;
        }
    }
    Ok(out.finish())
}

/// Whether some bond leaving `set` reaches an accepted partner and passes
/// the bond test.
fn connects(
    set: &AtomSet,
    accepts: impl Fn(u32) -> bool,
    bonds: &BondTable,
    bond_test: Option<&CompiledExpr>,
    env: &mut Environment<'_>,
) -> EvalResult<bool> {
    for atom in set.iter() {
        for (partner, bond) in bonds.bonds_of(atom) {
            if accepts(partner) && env.test_bond(atom, bond, bond_test)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
