//! Atom and bond property accessors. They read the element or bond slot and
//! fail when the slot is unbound.

use std::sync::Arc;

use crate::errors::EvalResult;
use crate::{Environment, Value, ValueSet};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AtomProperty {
    ElementSymbol,
    X,
    Y,
    Z,
    AtomKey,
    AtomName,
    ResName,
    ResSeqNumber,
    InsCode,
    ChainName,
    EntityType,
    SecondaryStructure,
    BFactor,
    Occupancy,
    IsHet,
    ResidueKey,
    ChainKey,
    EntityKey,
    ConnectedComponentKey,
    InRing,
}

impl AtomProperty {
    pub(crate) fn read(self, env: &mut Environment<'_>) -> EvalResult {
        let atom = env.current_atom()?;
        let model = env.model();
        let i = atom as usize;
        let atoms = model.atoms();
        let value = match self {
            AtomProperty::ElementSymbol => Value::Str(atoms.elements()[i].name()),
            AtomProperty::X => Value::Num(atoms.positions()[i].x),
            AtomProperty::Y => Value::Num(atoms.positions()[i].y),
            AtomProperty::Z => Value::Num(atoms.positions()[i].z),
            AtomProperty::AtomKey => Value::Num(f64::from(atom)),
            AtomProperty::AtomName => Value::Str(atoms.names()[i]),
            AtomProperty::ResName => Value::Str(model.residues().names()[model.residue_of(atom) as usize]),
            AtomProperty::ResSeqNumber => {
                Value::Num(f64::from(model.residues().seq_numbers()[model.residue_of(atom) as usize]))
            }
            AtomProperty::InsCode => Value::Str(model.residues().ins_codes()[model.residue_of(atom) as usize]),
            AtomProperty::ChainName => Value::Str(model.chains().names()[model.chain_of(atom) as usize]),
            AtomProperty::EntityType => {
                Value::Str(model.entities().types()[model.entity_of(atom) as usize].name())
            }
            AtomProperty::SecondaryStructure => Value::Str(
                model.residues().secondary_structure()[model.residue_of(atom) as usize].name(),
            ),
            AtomProperty::BFactor => Value::Num(atoms.b_factors()[i]),
            AtomProperty::Occupancy => Value::Num(atoms.occupancies()[i]),
            AtomProperty::IsHet => Value::Bool(atoms.is_het()[i]),
            AtomProperty::ResidueKey => Value::Num(f64::from(model.residue_of(atom))),
            AtomProperty::ChainKey => Value::Num(f64::from(model.chain_of(atom))),
            AtomProperty::EntityKey => Value::Num(f64::from(model.entity_of(atom))),
            AtomProperty::ConnectedComponentKey => Value::Num(f64::from(model.components().key(atom))),
            AtomProperty::InRing => Value::Bool(model.rings().in_ring(atom)),
        };
        Ok(value)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BondProperty {
    Order,
    Flags,
    IsCovalent,
}

impl BondProperty {
    pub(crate) fn read(self, env: &mut Environment<'_>) -> EvalResult {
        let bond = env.current_bond()?;
        let value = match self {
            BondProperty::Order => Value::Num(f64::from(bond.order)),
            BondProperty::Flags => {
                let mut flags = ValueSet::new();
                for name in bond.flags.names() {
                    flags.insert(&Value::str(name))?;
                }
                Value::Set(Arc::new(flags))
            }
            BondProperty::IsCovalent => Value::Bool(bond.flags.is_covalent()),
        };
        Ok(value)
    }
}
