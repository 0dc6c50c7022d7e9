//! `struct.modifier.*`: transform each atom set of a selection.
//!
//! Results are deduplicated and sets that end up empty are dropped.

use mq_structure::{AtomSelection, AtomSet, Model};

use super::unique;
use crate::compiler::Call;
use crate::environment::Context;
use crate::errors::{invalid_argument, EvalResult};
use crate::{Environment, Value};

const SELECTION: usize = 0;
const OTHER: usize = 1;

const RADIUS: usize = 1;
const SURROUNDINGS_WHOLE_RESIDUES: usize = 2;

const BOND_TEST: usize = 1;
const LAYER_COUNT: usize = 2;
const CONNECTED_WHOLE_RESIDUES: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModifierOp {
    QueryEach,
    IntersectBy,
    ExceptBy,
    Union,
    WholeResidues,
    IncludeSurroundings,
    IncludeConnected,
}

impl ModifierOp {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        let selection = call.selection(SELECTION, env)?;
        let result = match self {
            ModifierOp::QueryEach => query_each(&selection, call, env)?,
            ModifierOp::IntersectBy | ModifierOp::ExceptBy => {
                let by = call.selection(OTHER, env)?;
                let mask = by.to_mask_with(env.config().dense_mask_threshold());
                let keep = self == ModifierOp::IntersectBy;
                let mut out = unique(env);
                for set in &selection {
                    let filtered: Vec<u32> = set.iter().filter(|&i| mask.test(i) == keep).collect();
                    out.add_non_empty(AtomSet::from_sorted_unique(filtered))?;
                }
                out.finish()
            }
            ModifierOp::Union => {
                let flat = selection.flatten_with(env.config().dense_mask_threshold());
                let mut out = unique(env);
                out.add_non_empty(flat)?;
                out.finish()
            }
            ModifierOp::WholeResidues => {
                let mut out = unique(env);
                for set in &selection {
                    out.add_non_empty(whole_residues(set, env.model(), env.context()))?;
                }
                out.finish()
            }
            ModifierOp::IncludeSurroundings => include_surroundings(&selection, call, env)?,
            ModifierOp::IncludeConnected => include_connected(&selection, call, env)?,
        };
        Ok(Value::Selection(result))
    }
}

fn query_each(selection: &AtomSelection, call: &Call, env: &mut Environment<'_>) -> EvalResult<AtomSelection> {
    let Some(query) = call.arg(OTHER) else {
        return Err(invalid_argument("query was not bound"));
    };
    let mut out = unique(env);
    for set in selection {
        for found in env.find_in_atom_set(set, query)?.into_sets() {
            out.add_non_empty(found)?;
        }
    }
    Ok(out.finish())
}

/// Every atom of every residue `set` touches, limited to the universe.
pub(crate) fn whole_residues(set: &AtomSet, model: &Model, context: &Context<'_>) -> AtomSet {
    let residues = &set.hierarchy(model).residues;
    let mut atoms = Vec::with_capacity(set.len());
    for &residue in residues {
        for atom in model.residues().atom_range(residue as usize) {
            let atom = atom as u32;
            if context.contains(atom) {
                atoms.push(atom);
            }
        }
    }
    AtomSet::from_sorted_unique(atoms)
}

fn non_negative(value: f64, what: &str) -> EvalResult<f64> {
    if value.is_nan() || value < 0.0 {
        return Err(invalid_argument(format!("{what} must be a non-negative number, got {value}")));
    }
    Ok(value)
}

fn include_surroundings(
    selection: &AtomSelection,
    call: &Call,
    env: &mut Environment<'_>,
) -> EvalResult<AtomSelection> {
    let radius = non_negative(call.num(RADIUS, env)?, "radius")?;
    let as_whole_residues = call.bool(SURROUNDINGS_WHOLE_RESIDUES, env)?;
    let model = env.model();
    let grid = model.spatial();
    let positions = model.atoms().positions();

    let mut out = unique(env);
    for set in selection {
        let mut atoms: Vec<u32> = set.indices().to_vec();
        for i in set.iter() {
            grid.for_each_within(positions[i as usize], radius, |j| {
                if env.context().contains(j) {
                    atoms.push(j);
                }
            });
        }
        let mut grown = AtomSet::from_unsorted_indices(atoms);
        if as_whole_residues {
            grown = whole_residues(&grown, model, env.context());
        }
        out.add_non_empty(grown)?;
    }
    Ok(out.finish())
}

/// Grows each set by `layer-count` layers of atoms bonded to it through
/// bonds passing the bond test.
fn include_connected(
    selection: &AtomSelection,
    call: &Call,
    env: &mut Environment<'_>,
) -> EvalResult<AtomSelection> {
    let layers = non_negative(call.num(LAYER_COUNT, env)?, "layer-count")?;
    let max_layers = env.config().max_connection_layers();
    if layers.fract() != 0.0 || layers > f64::from(max_layers) {
        return Err(invalid_argument(format!(
            "layer-count must be an integer of at most {max_layers}, got {layers}"
        )));
    }
    let layers = layers as u32;
    let as_whole_residues = call.bool(CONNECTED_WHOLE_RESIDUES, env)?;
    let bond_test = call.arg(BOND_TEST);
    let model = env.model();
    let bonds = model.bonds();

    let mut out = unique(env);
    for set in selection {
        let mut current = set.clone();
        if as_whole_residues {
            current = whole_residues(&current, model, env.context());
        }
        let mut frontier: Vec<u32> = current.indices().to_vec();
        for _ in 0..layers {
            let mut reached = Vec::new();
            for &atom in &frontier {
                for (partner, bond) in bonds.bonds_of(atom) {
                    if current.contains(partner) || !env.context().contains(partner) {
                        continue;
                    }
                    if env.test_bond(atom, bond, bond_test)? {
                        reached.push(partner);
                    }
                }
            }
            if reached.is_empty() {
                break;
            }
            let mut next = current.union(&AtomSet::from_unsorted_indices(reached));
            if as_whole_residues {
                next = whole_residues(&next, model, env.context());
            }
            frontier = next.subtract(&current).indices().to_vec();
            current = next;
        }
        out.add_non_empty(current)?;
    }
    Ok(out.finish())
}
