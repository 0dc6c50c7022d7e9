use mq_ir::Name;
use thiserror::Error;

use super::{
    Atoms, Chains, Derived, ElementSymbol, Entities, EntityType, Model, Residues,
    SecondaryStructure, Vec3,
};
use crate::bonds::{Bond, BondFlags};
use crate::rings::RingInput;

/// Inconsistent input while assembling a [`Model`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("a chain was opened before any entity")]
    NoOpenEntity,
    #[error("a residue was opened before any chain")]
    NoOpenChain,
    #[error("an atom was added before any residue")]
    NoOpenResidue,
    #[error("{kind} {index} has no children")]
    EmptyUnit { kind: &'static str, index: usize },
    #[error("atom {atom} has a non-finite coordinate")]
    NonFiniteCoordinate { atom: usize },
    #[error("bond {a}-{b} references an atom outside [0, {atom_count})")]
    BondOutOfRange { a: u32, b: u32, atom_count: usize },
    #[error("atom {atom} is bonded to itself")]
    SelfBond { atom: u32 },
    #[error("ring {index} is invalid: {reason}")]
    InvalidRing { index: usize, reason: &'static str },
}

impl ModelError {
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::NoOpenEntity => "E4001",
            ModelError::NoOpenChain => "E4002",
            ModelError::NoOpenResidue => "E4003",
            ModelError::EmptyUnit { .. } => "E4004",
            ModelError::NonFiniteCoordinate { .. } => "E4005",
            ModelError::BondOutOfRange { .. } => "E4006",
            ModelError::SelfBond { .. } => "E4007",
            ModelError::InvalidRing { .. } => "E4008",
        }
    }
}

/// One atom as delivered by ingestion.
#[derive(Clone, Debug)]
pub struct AtomRecord {
    pub name: Name,
    pub element: ElementSymbol,
    pub position: Vec3,
    pub b_factor: f64,
    pub occupancy: f64,
    pub is_het: bool,
}

impl AtomRecord {
    pub fn new(name: &str, element: &str, position: Vec3) -> Self {
        AtomRecord {
            name: Name::intern(name),
            element: ElementSymbol::new(element),
            position,
            b_factor: 0.0,
            occupancy: 1.0,
            is_het: false,
        }
    }

    #[must_use]
    pub fn b_factor(mut self, b_factor: f64) -> Self {
        self.b_factor = b_factor;
        self
    }

    #[must_use]
    pub fn occupancy(mut self, occupancy: f64) -> Self {
        self.occupancy = occupancy;
        self
    }

    #[must_use]
    pub fn het(mut self) -> Self {
        self.is_het = true;
        self
    }
}

/// Assembles a [`Model`] top-down: open an entity, then its chains, then
/// their residues, then atoms. Opening a unit closes the previous sibling.
///
/// ```
/// use mq_structure::{AtomRecord, ModelBuilder, Vec3};
///
/// let mut builder = ModelBuilder::new("demo");
/// builder.entity("1", "polymer");
/// builder.chain("A")?;
/// builder.residue("GLY", 1, "")?;
/// builder.atom(AtomRecord::new("CA", "C", Vec3::ZERO))?;
/// let model = builder.build()?;
/// assert_eq!(model.atom_count(), 1);
/// # Ok::<(), mq_structure::ModelError>(())
/// ```
#[derive(Debug)]
pub struct ModelBuilder {
    id: Name,
    atoms: Atoms,
    residues: Residues,
    chains: Chains,
    entities: Entities,
    bonds: Vec<Bond>,
    rings: Vec<RingInput>,
}

impl ModelBuilder {
    pub fn new(id: &str) -> Self {
        ModelBuilder {
            id: Name::intern(id),
            atoms: Atoms::default(),
            residues: Residues {
                atom_offsets: vec![0],
                ..Residues::default()
            },
            chains: Chains {
                residue_offsets: vec![0],
                ..Chains::default()
            },
            entities: Entities {
                chain_offsets: vec![0],
                ..Entities::default()
            },
            bonds: Vec::new(),
            rings: Vec::new(),
        }
    }

    /// Opens a new entity. `entity_type` is normalized.
    pub fn entity(&mut self, id: &str, entity_type: &str) {
        self.entities.ids.push(Name::intern(id));
        self.entities.types.push(EntityType::normalize(entity_type));
        self.entities.chain_offsets.push(self.chains.names.len() as u32);
    }

    pub fn chain(&mut self, name: &str) -> Result<(), ModelError> {
        let Some(entity) = self.entities.ids.len().checked_sub(1) else {
            return Err(ModelError::NoOpenEntity);
        };
        self.chains.names.push(Name::intern(name));
        self.chains.entity_index.push(entity as u32);
        self.chains.residue_offsets.push(self.residues.names.len() as u32);
        if let Some(end) = self.entities.chain_offsets.last_mut() {
            *end = self.chains.names.len() as u32;
        }
        Ok(())
    }

    pub fn residue(&mut self, name: &str, seq_number: i32, ins_code: &str) -> Result<(), ModelError> {
        let Some(chain) = self.chains.names.len().checked_sub(1) else {
            return Err(ModelError::NoOpenChain);
        };
        self.residues.names.push(Name::intern(name));
        self.residues.seq_numbers.push(seq_number);
        self.residues.ins_codes.push(Name::intern(ins_code));
        self.residues.secondary_structure.push(SecondaryStructure::None);
        self.residues.chain_index.push(chain as u32);
        self.residues.atom_offsets.push(self.atoms.names.len() as u32);
        if let Some(end) = self.chains.residue_offsets.last_mut() {
            *end = self.residues.names.len() as u32;
        }
        Ok(())
    }

    /// Sets the secondary structure of the most recently opened residue.
    pub fn secondary_structure(&mut self, kind: SecondaryStructure) -> Result<(), ModelError> {
        let slot = self
            .residues
            .secondary_structure
            .last_mut()
            .ok_or(ModelError::NoOpenResidue)?;
        *slot = kind;
        Ok(())
    }

    /// Appends an atom to the open residue and returns its index.
    pub fn atom(&mut self, record: AtomRecord) -> Result<u32, ModelError> {
        let Some(residue) = self.residues.names.len().checked_sub(1) else {
            return Err(ModelError::NoOpenResidue);
        };
        let index = self.atoms.names.len();
        if !record.position.is_finite() {
            return Err(ModelError::NonFiniteCoordinate { atom: index });
        }
        self.atoms.names.push(record.name);
        self.atoms.elements.push(record.element);
        self.atoms.positions.push(record.position);
        self.atoms.b_factors.push(record.b_factor);
        self.atoms.occupancies.push(record.occupancy);
        self.atoms.is_het.push(record.is_het);
        self.atoms.residue_index.push(residue as u32);
        if let Some(end) = self.residues.atom_offsets.last_mut() {
            *end = self.atoms.names.len() as u32;
        }
        Ok(index as u32)
    }

    /// Records an explicit bond. Checked against the atom count at build time.
    pub fn bond(&mut self, a: u32, b: u32, order: u8, flags: BondFlags) {
        self.bonds.push(Bond::new(a, b, order, flags));
    }

    /// Records a ring as its atoms in cycle order.
    pub fn ring(&mut self, atoms: Vec<u32>, aromatic: bool) {
        self.rings.push(RingInput { atoms, aromatic });
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.names.len()
    }

    pub fn build(self) -> Result<Model, ModelError> {
        check_non_empty("entity", &self.entities.chain_offsets)?;
        check_non_empty("chain", &self.chains.residue_offsets)?;
        check_non_empty("residue", &self.residues.atom_offsets)?;

        let atom_count = self.atoms.names.len();
        for bond in &self.bonds {
            if bond.a == bond.b {
                return Err(ModelError::SelfBond { atom: bond.a });
            }
            if bond.b as usize >= atom_count {
                return Err(ModelError::BondOutOfRange {
                    a: bond.a,
                    b: bond.b,
                    atom_count,
                });
            }
        }
        for (index, ring) in self.rings.iter().enumerate() {
            if ring.atoms.len() < 3 {
                return Err(ModelError::InvalidRing {
                    index,
                    reason: "fewer than three atoms",
                });
            }
            if ring.atoms.iter().any(|&a| a as usize >= atom_count) {
                return Err(ModelError::InvalidRing {
                    index,
                    reason: "atom index out of range",
                });
            }
        }

        tracing::debug!(
            model = %self.id,
            atoms = atom_count,
            residues = self.residues.names.len(),
            chains = self.chains.names.len(),
            entities = self.entities.ids.len(),
            "built model"
        );

        Ok(Model {
            id: self.id,
            atoms: self.atoms,
            residues: self.residues,
            chains: self.chains,
            entities: self.entities,
            bond_input: self.bonds,
            ring_input: self.rings,
            derived: Derived::default(),
        })
    }
}

fn check_non_empty(kind: &'static str, offsets: &[u32]) -> Result<(), ModelError> {
    match offsets.windows(2).position(|w| w[0] == w[1]) {
        Some(index) => Err(ModelError::EmptyUnit { kind, index }),
        None => Ok(()),
    }
}
