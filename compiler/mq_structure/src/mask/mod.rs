//! Membership masks over the atom universe `[0, atom_count)`.
//!
//! A [`Mask`] answers `test(i)` and nothing else; which representation backs
//! it is decided once, from how much of the universe it is expected to cover.

use rustc_hash::FxHashSet;

use crate::AtomSet;

/// Fraction of the universe above which a dense representation wins.
///
/// Stored as a ratio so the comparison is exact at the boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaskDensity {
    numerator: u32,
    denominator: u32,
}

impl MaskDensity {
    /// One twelfth of the universe.
    pub const DEFAULT: MaskDensity = MaskDensity {
        numerator: 1,
        denominator: 12,
    };

    /// Dense representations are never chosen.
    pub const ALWAYS_SPARSE: MaskDensity = MaskDensity {
        numerator: 1,
        denominator: 0,
    };

    /// A `numerator / denominator` threshold. A zero denominator disables
    /// dense representations altogether.
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        MaskDensity {
            numerator,
            denominator,
        }
    }

    /// `estimated / universe > numerator / denominator`.
    #[inline]
    pub fn prefers_dense(self, estimated: usize, universe: usize) -> bool {
        if self.denominator == 0 || universe == 0 {
            return false;
        }
        (estimated as u128) * u128::from(self.denominator)
            > (universe as u128) * u128::from(self.numerator)
    }

    pub fn ratio(self) -> f64 {
        if self.denominator == 0 {
            f64::INFINITY
        } else {
            f64::from(self.numerator) / f64::from(self.denominator)
        }
    }
}

impl Default for MaskDensity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which representation a mask uses. Exposed for diagnostics and tests only;
/// answers never depend on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MaskKind {
    Never,
    Dense,
    Sparse,
    Sorted,
}

#[derive(Clone, Debug)]
enum Repr {
    Never,
    Dense { flags: Box<[bool]>, size: usize },
    Sparse(FxHashSet<u32>),
    Sorted(AtomSet),
}

/// Opaque membership test.
#[derive(Clone, Debug)]
pub struct Mask {
    repr: Repr,
}

impl Mask {
    pub fn never() -> Self {
        Mask { repr: Repr::Never }
    }

    /// Mask over a single atom set: binary search over its indices, or flags
    /// when the set covers enough of the universe.
    pub fn of_set(set: &AtomSet, universe: usize, density: MaskDensity) -> Self {
        if set.is_empty() {
            return Self::never();
        }
        if density.prefers_dense(set.len(), universe) {
            Self::dense_from(std::iter::once(set), universe)
        } else {
            Mask {
                repr: Repr::Sorted(set.clone()),
            }
        }
    }

    /// Mask over the union of several sets.
    pub fn of_sets<'a>(
        sets: impl IntoIterator<Item = &'a AtomSet> + Clone,
        universe: usize,
        density: MaskDensity,
    ) -> Self {
        let estimated: usize = sets.clone().into_iter().map(AtomSet::len).sum();
        if estimated == 0 {
            return Self::never();
        }
        let mask = if density.prefers_dense(estimated, universe) {
            Self::dense_from(sets, universe)
        } else {
            let mut members = FxHashSet::default();
            members.reserve(estimated);
            for set in sets {
                members.extend(set.indices().iter().copied());
            }
            Mask {
                repr: Repr::Sparse(members),
            }
        };
        tracing::trace!(estimated, universe, kind = ?mask.kind(), "built mask");
        mask
    }

    fn dense_from<'a>(sets: impl IntoIterator<Item = &'a AtomSet>, universe: usize) -> Self {
        let mut flags = vec![false; universe];
        let mut size = 0;
        for set in sets {
            for &i in set.indices() {
                let i = i as usize;
                if i >= flags.len() {
                    flags.resize(i + 1, false);
                }
                if !flags[i] {
                    flags[i] = true;
                    size += 1;
                }
            }
        }
        Mask {
            repr: Repr::Dense {
                flags: flags.into_boxed_slice(),
                size,
            },
        }
    }

    #[inline]
    pub fn test(&self, atom: u32) -> bool {
        match &self.repr {
            Repr::Never => false,
            Repr::Dense { flags, .. } => flags.get(atom as usize).copied().unwrap_or(false),
            Repr::Sparse(set) => set.contains(&atom),
            Repr::Sorted(set) => set.contains(atom),
        }
    }

    /// Number of distinct atoms the mask accepts.
    pub fn size(&self) -> usize {
        match &self.repr {
            Repr::Never => 0,
            Repr::Dense { size, .. } => *size,
            Repr::Sparse(set) => set.len(),
            Repr::Sorted(set) => set.len(),
        }
    }

    pub fn kind(&self) -> MaskKind {
        match self.repr {
            Repr::Never => MaskKind::Never,
            Repr::Dense { .. } => MaskKind::Dense,
            Repr::Sparse(_) => MaskKind::Sparse,
            Repr::Sorted(_) => MaskKind::Sorted,
        }
    }
}
