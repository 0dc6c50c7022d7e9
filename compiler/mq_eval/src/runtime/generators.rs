//! `struct.generator.*`: produce selections from the model.

use mq_ir::Name;
use mq_structure::rings::fingerprint;
use mq_structure::{AtomSelection, AtomSet, ElementSymbol};
use rustc_hash::FxHashMap;

use super::unique;
use crate::compiler::{Call, CompiledExpr};
use crate::errors::{too_many_results, EvalResult};
use crate::{Environment, SetKey, Value};

const ENTITY_TEST: usize = 0;
const CHAIN_TEST: usize = 1;
const RESIDUE_TEST: usize = 2;
const ATOM_TEST: usize = 3;
const GROUP_BY: usize = 4;

const ONLY_AROMATIC: usize = 0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeneratorOp {
    All,
    Empty,
    AtomGroups,
    Rings,
}

impl GeneratorOp {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        let selection = match self {
            GeneratorOp::All => {
                let universe = env.context().universe_set();
                let atom_count = env.model().atom_count();
                if universe.is_empty() {
                    AtomSelection::empty(atom_count)
                } else {
                    AtomSelection::new(atom_count, vec![universe])
                }
            }
            GeneratorOp::Empty => env.context().empty_selection(),
            GeneratorOp::AtomGroups => atom_groups(call, env)?,
            GeneratorOp::Rings => rings(call, env)?,
        };
        tracing::trace!(generator = ?self, sets = selection.len(), "generated selection");
        Ok(Value::Selection(selection))
    }
}

fn passes(test: Option<&CompiledExpr>, atom: u32, env: &mut Environment<'_>) -> EvalResult<bool> {
    match test {
        None => Ok(true),
        Some(test) => env.with_element(atom, |env| test.eval_bool(env)),
    }
}

/// Atoms passing the entity, chain, residue and atom tests. Each unit test
/// runs once per unit, with the element slot on the unit's first atom in the
/// universe; a failing unit skips all of its atoms.
fn atom_groups(call: &Call, env: &mut Environment<'_>) -> EvalResult<AtomSelection> {
    let model = env.model();
    let entity_test = call.arg(ENTITY_TEST);
    let chain_test = call.arg(CHAIN_TEST);
    let residue_test = call.arg(RESIDUE_TEST);
    let atom_test = call.arg(ATOM_TEST);
    let group_by = call.arg(GROUP_BY);

    let atoms: Vec<u32> = env.context().atoms().collect();
    let mut ungrouped: Vec<u32> = Vec::new();
    let mut groups: Vec<Vec<u32>> = Vec::new();
    let mut group_of: FxHashMap<SetKey, usize> = FxHashMap::default();
    let limit = env.config().max_result_sets();

    let (mut entity, mut chain, mut residue) = (u32::MAX, u32::MAX, u32::MAX);
    let (mut entity_ok, mut chain_ok, mut residue_ok) = (false, false, false);

    for atom in atoms {
        let r = model.residue_of(atom);
        let c = model.chain_of(atom);
        let e = model.entity_of(atom);

        if e != entity {
            entity = e;
            chain = u32::MAX;
            residue = u32::MAX;
            entity_ok = passes(entity_test, atom, env)?;
        }
        if !entity_ok {
            continue;
        }
        if c != chain {
            chain = c;
            residue = u32::MAX;
            chain_ok = passes(chain_test, atom, env)?;
        }
        if !chain_ok {
            continue;
        }
        if r != residue {
            residue = r;
            residue_ok = passes(residue_test, atom, env)?;
        }
        if !residue_ok || !passes(atom_test, atom, env)? {
            continue;
        }

        match group_by {
            None => ungrouped.push(atom),
            Some(key_expr) => {
                let key = env.with_element(atom, |env| key_expr.eval(env))?;
                let key = SetKey::of(&key)?;
                let next = groups.len();
                let index = *group_of.entry(key).or_insert(next);
                if index == next {
                    if let Some(limit) = limit.filter(|&limit| next >= limit) {
                        return Err(too_many_results(limit));
                    }
                    groups.push(Vec::new());
                }
                groups[index].push(atom);
            }
        }
    }

    let atom_count = model.atom_count();
    let sets: Vec<AtomSet> = if group_by.is_some() {
        groups.into_iter().map(AtomSet::from_sorted_unique).collect()
    } else if ungrouped.is_empty() {
        Vec::new()
    } else {
        vec![AtomSet::from_sorted_unique(ungrouped)]
    };
    Ok(AtomSelection::new(atom_count, sets))
}

/// One atom set per ring, optionally restricted to aromatic rings and to
/// the given fingerprints. In a narrowed universe only rings lying entirely
/// inside it are reported.
fn rings(call: &Call, env: &mut Environment<'_>) -> EvalResult<AtomSelection> {
    let only_aromatic = call.bool(ONLY_AROMATIC, env)?;
    let mut fingerprints = Vec::with_capacity(call.rest().len());
    for value in call.rest_values(env)? {
        fingerprints.push(canonical_fingerprint(value.as_str()?));
    }

    let model = env.model();
    let table = model.rings();
    let mut out = unique(env);
    let candidates: Vec<u32> = if fingerprints.is_empty() {
        (0..table.len() as u32).collect()
    } else {
        let mut ids: Vec<u32> = fingerprints
            .iter()
            .flat_map(|&print| table.with_fingerprint(print).iter().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    };

    for id in candidates {
        let ring = &table.rings()[id as usize];
        if only_aromatic && !ring.is_aromatic() {
            continue;
        }
        if !ring.atoms().iter().all(|&a| env.context().contains(a)) {
            continue;
        }
        out.add(AtomSet::from_unsorted_indices(ring.atoms().to_vec()))?;
    }
    Ok(out.finish())
}

/// `"o-c-c-c-c"` and `"C-C-C-C-O"` name the same ring.
fn canonical_fingerprint(text: Name) -> Name {
    let symbols: Vec<&str> = text
        .as_str()
        .split('-')
        .map(|s| ElementSymbol::new(s).as_str())
        .collect();
    Name::intern(&fingerprint(&symbols))
}
