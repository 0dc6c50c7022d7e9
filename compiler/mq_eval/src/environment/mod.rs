//! Evaluation state.
//!
//! A [`Context`] binds evaluation to one model, one configuration and an
//! atom universe (the whole model, or one atom set when a query runs inside
//! another). An [`Environment`] adds the mutable parts: the element and bond
//! slots, overwritten in place before each nested evaluation, and the stack
//! of current atom sets.
//!
//! Nested queries get a fresh `Environment` over a narrowed `Context`; they
//! can read the model but never the parent's slots.

use std::ops::Range;

use mq_structure::{AtomSelection, AtomSet, Bond, BondFlags, Model};

use crate::errors::{no_current_atom, no_current_atom_set, no_current_bond, EvalResult};
use crate::{CompiledExpr, QueryConfig};

/// The atom currently under test.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementAddress {
    pub atom: Option<u32>,
}

/// The bond currently under test. `atom_a` is the atom the bond was reached
/// from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BondAddress {
    pub atom_a: u32,
    pub atom_b: u32,
    pub order: u8,
    pub flags: BondFlags,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Slots {
    pub element: ElementAddress,
    pub bond: Option<BondAddress>,
}

#[derive(Clone, Debug)]
pub struct Context<'m> {
    model: &'m Model,
    config: &'m QueryConfig,
    universe: Option<AtomSet>,
}

impl<'m> Context<'m> {
    pub fn new(model: &'m Model, config: &'m QueryConfig) -> Self {
        Context {
            model,
            config,
            universe: None,
        }
    }

    /// Same model and configuration, universe restricted to `set`.
    pub fn narrowed(&self, set: AtomSet) -> Self {
        Context {
            model: self.model,
            config: self.config,
            universe: Some(set),
        }
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    pub fn config(&self) -> &'m QueryConfig {
        self.config
    }

    pub fn is_narrowed(&self) -> bool {
        self.universe.is_some()
    }

    /// Atoms of the universe, ascending.
    pub fn atoms(&self) -> UniverseAtoms<'_> {
        match &self.universe {
            None => UniverseAtoms::All(0..self.model.atom_count() as u32),
            Some(set) => UniverseAtoms::Subset(set.indices().iter()),
        }
    }

    pub fn universe_len(&self) -> usize {
        self.universe
            .as_ref()
            .map_or(self.model.atom_count(), AtomSet::len)
    }

    pub fn contains(&self, atom: u32) -> bool {
        match &self.universe {
            None => (atom as usize) < self.model.atom_count(),
            Some(set) => set.contains(atom),
        }
    }

    /// The universe as a single atom set.
    pub fn universe_set(&self) -> AtomSet {
        match &self.universe {
            None => AtomSet::range(0, self.model.atom_count() as u32),
            Some(set) => set.clone(),
        }
    }

    /// An empty selection over this model.
    pub fn empty_selection(&self) -> AtomSelection {
        AtomSelection::empty(self.model.atom_count())
    }
}

/// Iterator over a [`Context`]'s atoms.
#[derive(Clone, Debug)]
pub enum UniverseAtoms<'a> {
    All(Range<u32>),
    Subset(std::slice::Iter<'a, u32>),
}

impl Iterator for UniverseAtoms<'_> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        match self {
            UniverseAtoms::All(range) => range.next(),
            UniverseAtoms::Subset(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            UniverseAtoms::All(range) => range.size_hint(),
            UniverseAtoms::Subset(iter) => iter.size_hint(),
        }
    }
}

/// One evaluation's mutable state.
#[derive(Debug)]
pub struct Environment<'m> {
    context: Context<'m>,
    pub slots: Slots,
    atom_sets: Vec<AtomSet>,
}

impl<'m> Environment<'m> {
    pub fn new(context: Context<'m>) -> Self {
        Environment {
            context,
            slots: Slots::default(),
            atom_sets: Vec::new(),
        }
    }

    pub fn for_model(model: &'m Model, config: &'m QueryConfig) -> Self {
        Self::new(Context::new(model, config))
    }

    pub fn context(&self) -> &Context<'m> {
        &self.context
    }

    pub fn model(&self) -> &'m Model {
        self.context.model
    }

    pub fn config(&self) -> &'m QueryConfig {
        self.context.config
    }

    pub fn current_atom(&self) -> EvalResult<u32> {
        match self.slots.element.atom {
            Some(atom) if (atom as usize) < self.model().atom_count() => Ok(atom),
            _ => Err(no_current_atom()),
        }
    }

    pub fn current_bond(&self) -> EvalResult<BondAddress> {
        self.slots.bond.ok_or_else(no_current_bond)
    }

    pub fn current_atom_set(&self) -> EvalResult<&AtomSet> {
        self.atom_sets.last().ok_or_else(no_current_atom_set)
    }

    /// Run `f` with the element slot pointing at `atom`, then restore it.
    pub fn with_element<R>(&mut self, atom: u32, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.slots.element, ElementAddress { atom: Some(atom) });
        let result = f(self);
        self.slots.element = saved;
        result
    }

    /// Run `f` with `set` as the current atom set and the element slot on its
    /// first atom.
    pub fn with_atom_set<R>(&mut self, set: &AtomSet, f: impl FnOnce(&mut Self) -> R) -> R {
        self.atom_sets.push(set.clone());
        let saved = std::mem::replace(
            &mut self.slots.element,
            ElementAddress { atom: set.first() },
        );
        let result = f(self);
        self.slots.element = saved;
        self.atom_sets.pop();
        result
    }

    /// Bind the bond slot to `bond`, seen from `from`, and evaluate `test`.
    /// Without a test, a bond passes when it is covalent.
    pub fn test_bond(&mut self, from: u32, bond: &Bond, test: Option<&CompiledExpr>) -> EvalResult<bool> {
        let Some(test) = test else {
            return Ok(bond.flags.is_covalent());
        };
        let address = BondAddress {
            atom_a: from,
            atom_b: bond.partner(from),
            order: bond.order,
            flags: bond.flags,
        };
        let saved = self.slots.bond.replace(address);
        let result = test.eval(self).and_then(|v| v.as_bool());
        self.slots.bond = saved;
        result
    }

    /// Evaluate a selection-valued `query` with the universe narrowed to
    /// `set`. The nested evaluation sees none of this environment's slots.
    pub fn find_in_atom_set(&self, set: &AtomSet, query: &CompiledExpr) -> EvalResult<AtomSelection> {
        let mut nested = Environment::new(self.context.narrowed(set.clone()));
        query.eval(&mut nested)?.into_selection()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
