//! MolQL structure - the model and the atom selection algebra.
//!
//! - [`Model`]: struct-of-arrays atoms, residues, chains and entities with
//!   derived properties ([`BondTable`], [`RingTable`], [`SpatialGrid`],
//!   [`ConnectedComponents`]) computed once on first access
//! - [`AtomSet`]: sorted, duplicate-free atom indices with memoized hash,
//!   hierarchy rollup and bounding sphere
//! - [`AtomSelection`]: ordered atom sets, built linearly or deduplicated
//! - [`Mask`]: membership test with a density-driven representation
//! - [`UniqueSequenceBuilder`]: the deduplication primitive behind both

mod atom_set;
pub mod bonds;
mod components;
#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod fixtures;
mod mask;
pub mod model;
pub mod rings;
mod selection;
mod spatial;
mod unique;

pub use atom_set::{AtomSet, BoundingSphere, Hierarchy};
pub use bonds::{Bond, BondFlags, BondTable};
pub use components::ConnectedComponents;
pub use mask::{Mask, MaskDensity, MaskKind};
pub use model::{
    AtomRecord, ElementSymbol, EntityType, Model, ModelBuilder, ModelError, SecondaryStructure,
    Vec3,
};
pub use rings::{Ring, RingTable};
pub use selection::{AtomSelection, LinearBuilder, SelectionBuilder, UniqueBuilder};
pub use spatial::SpatialGrid;
pub use unique::UniqueSequenceBuilder;
