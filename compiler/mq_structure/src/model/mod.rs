//! The structural model.
//!
//! Atoms, residues, chains and entities are stored column-wise. Each level
//! owns a contiguous range of the level below it (residues own atom ranges,
//! chains own residue ranges, entities own chain ranges), so a parent index
//! is always recoverable from a child index and ranges are always
//! ascending.
//!
//! Derived properties are computed on first access and cached for the life
//! of the model. Computing one never fails and never observes another
//! evaluation's state.

mod builder;

use std::ops::Range;
use std::sync::OnceLock;

use mq_ir::Name;

use crate::bonds::{Bond, BondTable};
use crate::components::ConnectedComponents;
use crate::rings::{RingInput, RingTable};
use crate::spatial::SpatialGrid;

pub use builder::{AtomRecord, ModelBuilder, ModelError};

/// Cartesian position in ångström.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    #[inline]
    pub fn distance_sq(self, other: Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f64 {
        self.distance_sq(other).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Upper-cased chemical element symbol.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct ElementSymbol(Name);

impl ElementSymbol {
    /// Normalizes case: `"fe"`, `"Fe"` and `"FE"` are the same element.
    pub fn new(symbol: &str) -> Self {
        let trimmed = symbol.trim();
        if trimmed.bytes().any(|b| b.is_ascii_lowercase()) || trimmed.len() != symbol.len() {
            ElementSymbol(Name::intern(&trimmed.to_ascii_uppercase()))
        } else {
            ElementSymbol(Name::intern(trimmed))
        }
    }

    pub fn name(self) -> Name {
        self.0
    }

    pub fn as_str(self) -> &'static str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ElementSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EntityType {
    Polymer,
    NonPolymer,
    Water,
    Unknown,
}

impl EntityType {
    /// Case-insensitive; anything unrecognized is [`EntityType::Unknown`].
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "polymer" => EntityType::Polymer,
            "non-polymer" => EntityType::NonPolymer,
            "water" => EntityType::Water,
            _ => EntityType::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Polymer => "polymer",
            EntityType::NonPolymer => "non-polymer",
            EntityType::Water => "water",
            EntityType::Unknown => "unknown",
        }
    }

    pub fn name(self) -> Name {
        Name::intern(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum SecondaryStructure {
    Helix,
    Sheet,
    #[default]
    None,
}

impl SecondaryStructure {
    pub fn as_str(self) -> &'static str {
        match self {
            SecondaryStructure::Helix => "helix",
            SecondaryStructure::Sheet => "sheet",
            SecondaryStructure::None => "none",
        }
    }

    pub fn name(self) -> Name {
        Name::intern(self.as_str())
    }
}

/// Per-atom columns.
#[derive(Clone, Debug, Default)]
pub struct Atoms {
    pub(crate) names: Vec<Name>,
    pub(crate) elements: Vec<ElementSymbol>,
    pub(crate) positions: Vec<Vec3>,
    pub(crate) b_factors: Vec<f64>,
    pub(crate) occupancies: Vec<f64>,
    pub(crate) is_het: Vec<bool>,
    pub(crate) residue_index: Vec<u32>,
}

impl Atoms {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn elements(&self) -> &[ElementSymbol] {
        &self.elements
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn b_factors(&self) -> &[f64] {
        &self.b_factors
    }

    pub fn occupancies(&self) -> &[f64] {
        &self.occupancies
    }

    pub fn is_het(&self) -> &[bool] {
        &self.is_het
    }

    pub fn residue_index(&self) -> &[u32] {
        &self.residue_index
    }
}

/// Per-residue columns. `atom_offsets` has one more entry than residues.
#[derive(Clone, Debug, Default)]
pub struct Residues {
    pub(crate) names: Vec<Name>,
    pub(crate) seq_numbers: Vec<i32>,
    pub(crate) ins_codes: Vec<Name>,
    pub(crate) secondary_structure: Vec<SecondaryStructure>,
    pub(crate) chain_index: Vec<u32>,
    pub(crate) atom_offsets: Vec<u32>,
}

impl Residues {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn seq_numbers(&self) -> &[i32] {
        &self.seq_numbers
    }

    pub fn ins_codes(&self) -> &[Name] {
        &self.ins_codes
    }

    pub fn secondary_structure(&self) -> &[SecondaryStructure] {
        &self.secondary_structure
    }

    pub fn chain_index(&self) -> &[u32] {
        &self.chain_index
    }

    pub fn atom_range(&self, residue: usize) -> Range<usize> {
        self.atom_offsets[residue] as usize..self.atom_offsets[residue + 1] as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct Chains {
    pub(crate) names: Vec<Name>,
    pub(crate) entity_index: Vec<u32>,
    pub(crate) residue_offsets: Vec<u32>,
}

impl Chains {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn entity_index(&self) -> &[u32] {
        &self.entity_index
    }

    pub fn residue_range(&self, chain: usize) -> Range<usize> {
        self.residue_offsets[chain] as usize..self.residue_offsets[chain + 1] as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct Entities {
    pub(crate) ids: Vec<Name>,
    pub(crate) types: Vec<EntityType>,
    pub(crate) chain_offsets: Vec<u32>,
}

impl Entities {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[Name] {
        &self.ids
    }

    pub fn types(&self) -> &[EntityType] {
        &self.types
    }

    pub fn chain_range(&self, entity: usize) -> Range<usize> {
        self.chain_offsets[entity] as usize..self.chain_offsets[entity + 1] as usize
    }
}

/// Caches filled on first access.
#[derive(Debug, Default)]
struct Derived {
    spatial: OnceLock<SpatialGrid>,
    bonds: OnceLock<BondTable>,
    rings: OnceLock<RingTable>,
    components: OnceLock<ConnectedComponents>,
}

/// One structural model, immutable after [`ModelBuilder::build`].
#[derive(Debug)]
pub struct Model {
    id: Name,
    atoms: Atoms,
    residues: Residues,
    chains: Chains,
    entities: Entities,
    bond_input: Vec<Bond>,
    ring_input: Vec<RingInput>,
    derived: Derived,
}

impl Model {
    pub fn builder(id: &str) -> ModelBuilder {
        ModelBuilder::new(id)
    }

    pub fn id(&self) -> Name {
        self.id
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    pub fn residues(&self) -> &Residues {
        &self.residues
    }

    pub fn chains(&self) -> &Chains {
        &self.chains
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    #[inline]
    pub fn residue_of(&self, atom: u32) -> u32 {
        self.atoms.residue_index[atom as usize]
    }

    #[inline]
    pub fn chain_of(&self, atom: u32) -> u32 {
        self.residues.chain_index[self.residue_of(atom) as usize]
    }

    #[inline]
    pub fn entity_of(&self, atom: u32) -> u32 {
        self.chains.entity_index[self.chain_of(atom) as usize]
    }

    #[inline]
    pub fn position(&self, atom: u32) -> Vec3 {
        self.atoms.positions[atom as usize]
    }

    /// Cell grid over all atom positions.
    pub fn spatial(&self) -> &SpatialGrid {
        self.derived.spatial.get_or_init(|| {
            tracing::trace!(model = %self.id, "computing spatial grid");
            SpatialGrid::new(&self.atoms.positions, SpatialGrid::DEFAULT_CELL_SIZE)
        })
    }

    pub fn bonds(&self) -> &BondTable {
        self.derived.bonds.get_or_init(|| {
            tracing::trace!(model = %self.id, bonds = self.bond_input.len(), "computing bond table");
            BondTable::new(self.atom_count(), &self.bond_input, &self.atoms.residue_index)
        })
    }

    pub fn rings(&self) -> &RingTable {
        self.derived.rings.get_or_init(|| {
            tracing::trace!(model = %self.id, rings = self.ring_input.len(), "computing ring table");
            RingTable::new(self.atom_count(), &self.ring_input, &self.atoms.elements)
        })
    }

    /// Covalently connected components.
    pub fn components(&self) -> &ConnectedComponents {
        self.derived.components.get_or_init(|| {
            tracing::trace!(model = %self.id, "computing connected components");
            ConnectedComponents::new(self.atom_count(), self.bonds())
        })
    }
}
