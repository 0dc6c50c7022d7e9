//! Bonds and the per-model bond table.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

bitflags! {
    /// Bond classification.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BondFlags: u16 {
        const COVALENT = 0x01;
        const METALLIC_COORDINATION = 0x02;
        const HYDROGEN = 0x04;
        const ION = 0x08;
        const SULFIDE = 0x10;
        const AROMATIC = 0x20;
    }
}

const FLAG_NAMES: [(BondFlags, &str); 6] = [
    (BondFlags::COVALENT, "covalent"),
    (BondFlags::METALLIC_COORDINATION, "metallic"),
    (BondFlags::HYDROGEN, "hydrogen"),
    (BondFlags::ION, "ion"),
    (BondFlags::SULFIDE, "sulfide"),
    (BondFlags::AROMATIC, "aromatic"),
];

impl BondFlags {
    /// Flags for an mmCIF `struct_conn.conn_type_id`. Unknown types get no flags.
    pub fn from_conn_type(conn_type: &str) -> Self {
        match conn_type.trim().to_ascii_lowercase().as_str() {
            "covale" | "covale_base" | "covale_phosphate" | "covale_sugar" | "modres" => {
                BondFlags::COVALENT
            }
            "disulf" => BondFlags::COVALENT | BondFlags::SULFIDE,
            "hydrog" => BondFlags::HYDROGEN,
            "metalc" => BondFlags::METALLIC_COORDINATION,
            "saltbr" => BondFlags::ION,
            _ => BondFlags::empty(),
        }
    }

    pub fn is_covalent(self) -> bool {
        self.contains(BondFlags::COVALENT)
    }

    /// Lower-case names of the set flags, in a fixed order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        FLAG_NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

/// Bond order for an mmCIF `value_order`. Unknown orders count as single.
pub fn bond_order_from_str(order: &str) -> u8 {
    match order.trim().to_ascii_lowercase().as_str() {
        "doub" | "delo" => 2,
        "trip" => 3,
        "quad" => 4,
        _ => 1,
    }
}

/// An undirected bond, stored with `a < b`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bond {
    pub a: u32,
    pub b: u32,
    pub order: u8,
    pub flags: BondFlags,
}

impl Bond {
    pub fn new(a: u32, b: u32, order: u8, flags: BondFlags) -> Self {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        Bond { a, b, order, flags }
    }

    /// The atom on the other side of `atom`.
    #[inline]
    pub fn partner(&self, atom: u32) -> u32 {
        if self.a == atom {
            self.b
        } else {
            self.a
        }
    }
}

/// Per-atom adjacency in compressed rows plus an index of the bonds joining
/// each residue pair.
#[derive(Clone, Debug, Default)]
pub struct BondTable {
    bonds: Vec<Bond>,
    offsets: Vec<u32>,
    neighbors: Vec<u32>,
    bond_of_neighbor: Vec<u32>,
    by_residue_pair: FxHashMap<(u32, u32), SmallVec<[u32; 4]>>,
}

impl BondTable {
    /// Duplicate pairs are merged: flags are combined, the highest order wins.
    pub fn new(atom_count: usize, input: &[Bond], residue_index: &[u32]) -> Self {
        let mut position: FxHashMap<(u32, u32), usize> = FxHashMap::default();
        let mut bonds: Vec<Bond> = Vec::with_capacity(input.len());
        for bond in input {
            let bond = Bond::new(bond.a, bond.b, bond.order, bond.flags);
            if bond.b as usize >= atom_count || bond.a == bond.b {
                continue;
            }
            match position.get(&(bond.a, bond.b)) {
                Some(&i) => {
                    let merged = &mut bonds[i];
                    merged.flags |= bond.flags;
                    merged.order = merged.order.max(bond.order);
                }
                None => {
                    position.insert((bond.a, bond.b), bonds.len());
                    bonds.push(bond);
                }
            }
        }

        let mut degree = vec![0u32; atom_count + 1];
        for bond in &bonds {
            degree[bond.a as usize + 1] += 1;
            degree[bond.b as usize + 1] += 1;
        }
        for i in 1..degree.len() {
            degree[i] += degree[i - 1];
        }
        let offsets = degree;

        let mut cursor = offsets.clone();
        let mut neighbors = vec![0u32; bonds.len() * 2];
        let mut bond_of_neighbor = vec![0u32; bonds.len() * 2];
        let mut by_residue_pair: FxHashMap<(u32, u32), SmallVec<[u32; 4]>> = FxHashMap::default();
        for (i, bond) in bonds.iter().enumerate() {
            for (from, to) in [(bond.a, bond.b), (bond.b, bond.a)] {
                let slot = cursor[from as usize] as usize;
                neighbors[slot] = to;
                bond_of_neighbor[slot] = i as u32;
                cursor[from as usize] += 1;
            }
            if let (Some(&ra), Some(&rb)) = (
                residue_index.get(bond.a as usize),
                residue_index.get(bond.b as usize),
            ) {
                by_residue_pair
                    .entry((ra.min(rb), ra.max(rb)))
                    .or_default()
                    .push(i as u32);
            }
        }

        BondTable {
            bonds,
            offsets,
            neighbors,
            bond_of_neighbor,
            by_residue_pair,
        }
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Number of bonds on `atom`.
    pub fn degree(&self, atom: u32) -> usize {
        self.row(atom).len()
    }

    fn row(&self, atom: u32) -> std::ops::Range<usize> {
        let i = atom as usize;
        match (self.offsets.get(i), self.offsets.get(i + 1)) {
            (Some(&start), Some(&end)) => start as usize..end as usize,
            _ => 0..0,
        }
    }

    /// `(partner, bond)` for every bond on `atom`.
    pub fn bonds_of(&self, atom: u32) -> impl Iterator<Item = (u32, &Bond)> + '_ {
        self.row(atom).map(move |slot| {
            (
                self.neighbors[slot],
                &self.bonds[self.bond_of_neighbor[slot] as usize],
            )
        })
    }

    pub fn bond_between(&self, a: u32, b: u32) -> Option<&Bond> {
        self.bonds_of(a)
            .find_map(|(partner, bond)| (partner == b).then_some(bond))
    }

    /// Bonds with one atom in each residue (or both in it, when `a == b`).
    pub fn bonds_between_residues(&self, a: u32, b: u32) -> impl Iterator<Item = &Bond> + '_ {
        self.by_residue_pair
            .get(&(a.min(b), a.max(b)))
            .into_iter()
            .flat_map(|ids| ids.iter().map(|&i| &self.bonds[i as usize]))
    }
}
