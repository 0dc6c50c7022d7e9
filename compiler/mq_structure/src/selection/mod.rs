//! Atom selections and their builders.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{AtomSet, Mask, MaskDensity, UniqueSequenceBuilder};

/// Ordered atom sets over a universe of `atom_count` atoms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomSelection {
    atom_count: usize,
    sets: Vec<AtomSet>,
}

impl AtomSelection {
    pub fn new(atom_count: usize, sets: Vec<AtomSet>) -> Self {
        AtomSelection { atom_count, sets }
    }

    pub fn empty(atom_count: usize) -> Self {
        Self::new(atom_count, Vec::new())
    }

    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    pub fn sets(&self) -> &[AtomSet] {
        &self.sets
    }

    pub fn into_sets(self) -> Vec<AtomSet> {
        self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AtomSet> {
        self.sets.iter()
    }

    /// Sum of member sizes; overcounts atoms shared between members.
    pub fn estimated_size(&self) -> usize {
        self.sets.iter().map(AtomSet::len).sum()
    }

    /// Sorted union of all members.
    pub fn flatten(&self) -> AtomSet {
        self.flatten_with(MaskDensity::default())
    }

    pub fn flatten_with(&self, density: MaskDensity) -> AtomSet {
        match self.sets.as_slice() {
            [] => AtomSet::empty(),
            [only] => only.clone(),
            sets => {
                let mut unique =
                    UniqueSequenceBuilder::for_estimate(self.estimated_size(), self.atom_count, density);
                for set in sets {
                    for i in set.iter() {
                        unique.add(i, i);
                    }
                }
                AtomSet::from_unsorted_indices(unique.into_vec())
            }
        }
    }

    /// Membership test equivalent to `flatten().contains(i)`.
    pub fn to_mask(&self) -> Mask {
        self.to_mask_with(MaskDensity::default())
    }

    pub fn to_mask_with(&self, density: MaskDensity) -> Mask {
        match self.sets.as_slice() {
            [] => Mask::never(),
            [only] => Mask::of_set(only, self.atom_count, density),
            sets => Mask::of_sets(sets.iter(), self.atom_count, density),
        }
    }
}

impl<'a> IntoIterator for &'a AtomSelection {
    type Item = &'a AtomSet;
    type IntoIter = std::slice::Iter<'a, AtomSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}

/// Accumulates atom sets into an [`AtomSelection`].
pub trait SelectionBuilder {
    /// Returns whether `set` was kept.
    fn add(&mut self, set: AtomSet) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn finish(self) -> AtomSelection;
}

/// Keeps every set, duplicates included.
#[derive(Debug)]
pub struct LinearBuilder {
    atom_count: usize,
    sets: Vec<AtomSet>,
}

impl LinearBuilder {
    pub fn new(atom_count: usize) -> Self {
        LinearBuilder {
            atom_count,
            sets: Vec::new(),
        }
    }
}

impl SelectionBuilder for LinearBuilder {
    fn add(&mut self, set: AtomSet) -> bool {
        self.sets.push(set);
        true
    }

    fn len(&self) -> usize {
        self.sets.len()
    }

    fn finish(self) -> AtomSelection {
        AtomSelection::new(self.atom_count, self.sets)
    }
}

/// Keeps the first of each group of equal sets. Sets are bucketed by hash
/// code and compared element-wise within a bucket.
#[derive(Debug)]
pub struct UniqueBuilder {
    atom_count: usize,
    sets: Vec<AtomSet>,
    by_hash: FxHashMap<i32, SmallVec<[u32; 1]>>,
}

impl UniqueBuilder {
    pub fn new(atom_count: usize) -> Self {
        UniqueBuilder {
            atom_count,
            sets: Vec::new(),
            by_hash: FxHashMap::default(),
        }
    }
}

impl SelectionBuilder for UniqueBuilder {
    fn add(&mut self, set: AtomSet) -> bool {
        let chain = self.by_hash.entry(set.hash_code()).or_default();
        if chain.iter().any(|&i| self.sets[i as usize] == set) {
            return false;
        }
        chain.push(self.sets.len() as u32);
        self.sets.push(set);
        true
    }

    fn len(&self) -> usize {
        self.sets.len()
    }

    fn finish(self) -> AtomSelection {
        AtomSelection::new(self.atom_count, self.sets)
    }
}
