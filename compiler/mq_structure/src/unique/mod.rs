//! First-seen deduplication.
//!
//! [`UniqueSequenceBuilder`] is the single deduplication primitive of the
//! selection algebra: hierarchy rollups and selection flattening are both
//! built from it. The "seen" structure is either a hash set or one flag per
//! key, chosen with the same density trade-off as [`Mask`](crate::Mask).

use rustc_hash::FxHashSet;

use crate::MaskDensity;

#[derive(Clone, Debug)]
enum Seen {
    Sparse(FxHashSet<u32>),
    Dense(Vec<bool>),
}

/// Ordered output plus a record of which keys were already added.
#[derive(Clone, Debug)]
pub struct UniqueSequenceBuilder<V> {
    values: Vec<V>,
    seen: Seen,
}

impl<V> UniqueSequenceBuilder<V> {
    /// Hash-set backed builder, for few keys out of a large key space.
    pub fn sparse() -> Self {
        Self {
            values: Vec::new(),
            seen: Seen::Sparse(FxHashSet::default()),
        }
    }

    /// Flag-array backed builder over keys `[0, universe)`.
    pub fn dense(universe: usize) -> Self {
        Self {
            values: Vec::new(),
            seen: Seen::Dense(vec![false; universe]),
        }
    }

    /// Pick the representation for roughly `estimated` keys out of `universe`.
    pub fn for_estimate(estimated: usize, universe: usize, density: MaskDensity) -> Self {
        if density.prefers_dense(estimated, universe) {
            Self::dense(universe)
        } else {
            let mut builder = Self::sparse();
            if let Seen::Sparse(set) = &mut builder.seen {
                set.reserve(estimated);
            }
            builder.values.reserve(estimated);
            builder
        }
    }

    /// Append `value` if `key` has not been seen. Returns whether it was added.
    #[inline]
    pub fn add(&mut self, key: u32, value: V) -> bool {
        let fresh = match &mut self.seen {
            Seen::Sparse(set) => set.insert(key),
            Seen::Dense(flags) => {
                let i = key as usize;
                if i >= flags.len() {
                    flags.resize(i + 1, false);
                }
                !std::mem::replace(&mut flags[i], true)
            }
        };
        if fresh {
            self.values.push(value);
        }
        fresh
    }

    pub fn contains(&self, key: u32) -> bool {
        match &self.seen {
            Seen::Sparse(set) => set.contains(&key),
            Seen::Dense(flags) => flags.get(key as usize).copied().unwrap_or(false),
        }
    }

    pub fn is_dense(&self) -> bool {
        matches!(self.seen, Seen::Dense(_))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[V] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<V> {
        self.values
    }
}
