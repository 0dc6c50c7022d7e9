//! Immutable sorted atom sets.
//!
//! An [`AtomSet`] is a cheaply clonable handle over ascending, duplicate-free
//! atom indices. The hash code, hierarchy rollup and bounding sphere are each
//! computed at most once per set; the latter two assume the set is always
//! used with the model it was built from.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::{Model, UniqueSequenceBuilder, Vec3};

/// Residues, chains and entities touched by a set, in first-seen order
/// (which is ascending, since atoms are sorted and units are contiguous).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hierarchy {
    pub residues: Vec<u32>,
    pub chains: Vec<u32>,
    pub entities: Vec<u32>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f64,
}

#[derive(Default)]
struct Inner {
    indices: Box<[u32]>,
    hash: OnceLock<i32>,
    hierarchy: OnceLock<Hierarchy>,
    sphere: OnceLock<BoundingSphere>,
}

#[derive(Clone, Default)]
pub struct AtomSet(Arc<Inner>);

impl AtomSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn singleton(atom: u32) -> Self {
        Self::from_sorted_unique(vec![atom])
    }

    fn new(indices: Vec<u32>) -> Self {
        AtomSet(Arc::new(Inner {
            indices: indices.into_boxed_slice(),
            ..Inner::default()
        }))
    }

    /// Sorts and removes duplicates.
    pub fn from_unsorted_indices(mut indices: Vec<u32>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self::new(indices)
    }

    /// For input produced in ascending order. Falls back to sorting when the
    /// input is not strictly increasing.
    pub fn from_sorted_unique(indices: Vec<u32>) -> Self {
        if indices.windows(2).all(|w| w[0] < w[1]) {
            Self::new(indices)
        } else {
            Self::from_unsorted_indices(indices)
        }
    }

    /// Every atom in `[start, end)`.
    pub fn range(start: u32, end: u32) -> Self {
        Self::new((start..end.max(start)).collect())
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.0.indices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.indices.is_empty()
    }

    pub fn first(&self) -> Option<u32> {
        self.0.indices.first().copied()
    }

    pub fn contains(&self, atom: u32) -> bool {
        self.0.indices.binary_search(&atom).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.indices.iter().copied()
    }

    /// Polynomial hash over the indices: seed 23, base 31, wrapping 32-bit.
    pub fn hash_code(&self) -> i32 {
        *self.0.hash.get_or_init(|| {
            self.0.indices.iter().fold(23i32, |code, &i| {
                code.wrapping_mul(31).wrapping_add(i as i32)
            })
        })
    }

    pub fn ptr_eq(&self, other: &AtomSet) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn hierarchy(&self, model: &Model) -> &Hierarchy {
        self.0.hierarchy.get_or_init(|| {
            let mut residues = UniqueSequenceBuilder::sparse();
            let mut chains = UniqueSequenceBuilder::sparse();
            let mut entities = UniqueSequenceBuilder::sparse();
            for &atom in self.indices() {
                let residue = model.residue_of(atom);
                if residues.add(residue, residue) {
                    let chain = model.chain_of(atom);
                    if chains.add(chain, chain) {
                        let entity = model.entity_of(atom);
                        entities.add(entity, entity);
                    }
                }
            }
            Hierarchy {
                residues: residues.into_vec(),
                chains: chains.into_vec(),
                entities: entities.into_vec(),
            }
        })
    }

    /// Center is the mean position, radius the largest distance from it.
    pub fn bounding_sphere(&self, model: &Model) -> BoundingSphere {
        *self.0.sphere.get_or_init(|| {
            if self.is_empty() {
                return BoundingSphere::default();
            }
            let positions = model.atoms().positions();
            let n = self.len() as f64;
            let sum = self.iter().fold(Vec3::ZERO, |acc, i| {
                let p = positions[i as usize];
                Vec3::new(acc.x + p.x, acc.y + p.y, acc.z + p.z)
            });
            let center = Vec3::new(sum.x / n, sum.y / n, sum.z / n);
            let radius_sq = self
                .iter()
                .map(|i| positions[i as usize].distance_sq(center))
                .fold(0.0, f64::max);
            BoundingSphere {
                center,
                radius: radius_sq.sqrt(),
            }
        })
    }

    /// Smallest distance between an atom of `self` and an atom of `other`.
    /// Infinite when either set is empty.
    pub fn distance(&self, other: &AtomSet, model: &Model) -> f64 {
        self.distance_sq(other, model).sqrt()
    }

    /// Square of [`AtomSet::distance`]. Radius checks compare against this
    /// so that no square root sits between them and the coordinates.
    pub fn distance_sq(&self, other: &AtomSet, model: &Model) -> f64 {
        let positions = model.atoms().positions();
        let mut best = f64::INFINITY;
        for i in self.iter() {
            let p = positions[i as usize];
            for j in other.iter() {
                best = best.min(p.distance_sq(positions[j as usize]));
            }
        }
        best
    }

    /// Whether some pair of atoms is strictly closer than `max_distance`.
    ///
    /// Agrees exactly with `distance_sq(other) < max_distance * max_distance`.
    pub fn are_within(&self, other: &AtomSet, model: &Model, max_distance: f64) -> bool {
        if self.is_empty() || other.is_empty() || max_distance.is_nan() || max_distance <= 0.0 {
            return false;
        }
        let a = self.bounding_sphere(model);
        let b = other.bounding_sphere(model);
        // Slack keeps rounding in the sphere bound from rejecting a real hit.
        let gap = a.center.distance(b.center) - a.radius - b.radius;
        if gap > max_distance * (1.0 + 1e-9) + 1e-9 {
            return false;
        }
        let positions = model.atoms().positions();
        let max_sq = max_distance * max_distance;
        self.iter().any(|i| {
            let p = positions[i as usize];
            other
                .iter()
                .any(|j| p.distance_sq(positions[j as usize]) < max_sq)
        })
    }

    pub fn union(&self, other: &AtomSet) -> AtomSet {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let (a, b) = (self.indices(), other.indices());
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        Self::new(out)
    }

    pub fn intersect(&self, other: &AtomSet) -> AtomSet {
        let (a, b) = (self.indices(), other.indices());
        let mut out = Vec::with_capacity(a.len().min(b.len()));
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        Self::new(out)
    }

    pub fn subtract(&self, other: &AtomSet) -> AtomSet {
        if other.is_empty() {
            return self.clone();
        }
        Self::new(self.iter().filter(|&i| !other.contains(i)).collect())
    }

    pub fn intersects(&self, other: &AtomSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|i| large.contains(i))
    }
}

impl PartialEq for AtomSet {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.indices() == other.indices()
    }
}

impl Eq for AtomSet {}

impl Hash for AtomSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Debug for AtomSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.indices()).finish()
    }
}

impl From<Vec<u32>> for AtomSet {
    fn from(indices: Vec<u32>) -> Self {
        Self::from_unsorted_indices(indices)
    }
}

impl FromIterator<u32> for AtomSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::from_unsorted_indices(iter.into_iter().collect())
    }
}
