//! Rings supplied at ingestion, indexed by atom and by fingerprint.

use mq_ir::Name;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::ElementSymbol;

/// A ring as ingestion hands it over: atoms in cycle order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingInput {
    pub atoms: Vec<u32>,
    pub aromatic: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ring {
    atoms: Box<[u32]>,
    aromatic: bool,
    fingerprint: Name,
}

impl Ring {
    /// Atoms in cycle order.
    pub fn atoms(&self) -> &[u32] {
        &self.atoms
    }

    pub fn is_aromatic(&self) -> bool {
        self.aromatic
    }

    pub fn fingerprint(&self) -> Name {
        self.fingerprint
    }
}

/// Canonical name of a ring: its element symbols read from the rotation and
/// direction that give the lexicographically smallest sequence, joined by `-`.
///
/// `["O", "C", "C", "C", "C", "C"]` and `["C", "C", "O", "C", "C", "C"]`
/// both give `"C-C-C-C-C-O"`.
pub fn fingerprint<S: AsRef<str>>(elements: &[S]) -> String {
    let n = elements.len();
    if n == 0 {
        return String::new();
    }
    let at = |start: usize, step: usize, forward: bool| -> &str {
        let i = if forward {
            (start + step) % n
        } else {
            (start + n - step % n) % n
        };
        elements[i].as_ref()
    };

    let mut best: Option<(usize, bool)> = None;
    for start in 0..n {
        for forward in [true, false] {
            let better = match best {
                None => true,
                Some((b_start, b_forward)) => (0..n)
                    .map(|k| at(start, k, forward).cmp(at(b_start, k, b_forward)))
                    .find(|o| o.is_ne())
                    .is_some_and(std::cmp::Ordering::is_lt),
            };
            if better {
                best = Some((start, forward));
            }
        }
    }

    let (start, forward) = best.unwrap_or((0, true));
    let mut out = String::new();
    for k in 0..n {
        if k > 0 {
            out.push('-');
        }
        out.push_str(at(start, k, forward));
    }
    out
}

/// All rings of a model.
#[derive(Clone, Debug, Default)]
pub struct RingTable {
    rings: Vec<Ring>,
    atom_offsets: Vec<u32>,
    atom_rings: Vec<u32>,
    by_fingerprint: FxHashMap<Name, SmallVec<[u32; 4]>>,
}

impl RingTable {
    pub fn new(atom_count: usize, input: &[RingInput], elements: &[ElementSymbol]) -> Self {
        let mut rings = Vec::with_capacity(input.len());
        let mut by_fingerprint: FxHashMap<Name, SmallVec<[u32; 4]>> = FxHashMap::default();
        let mut counts = vec![0u32; atom_count + 1];

        for ring in input {
            if ring.atoms.iter().any(|&a| a as usize >= atom_count) {
                continue;
            }
            let symbols: SmallVec<[&str; 8]> = ring
                .atoms
                .iter()
                .map(|&a| elements.get(a as usize).map_or("", |e| e.as_str()))
                .collect();
            let print = Name::intern(&fingerprint(&symbols));
            by_fingerprint.entry(print).or_default().push(rings.len() as u32);
            for &a in &ring.atoms {
                counts[a as usize + 1] += 1;
            }
            rings.push(Ring {
                atoms: ring.atoms.clone().into_boxed_slice(),
                aromatic: ring.aromatic,
                fingerprint: print,
            });
        }

        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }
        let atom_offsets = counts;
        let mut cursor = atom_offsets.clone();
        let mut atom_rings = vec![0u32; atom_offsets.last().copied().unwrap_or(0) as usize];
        for (r, ring) in rings.iter().enumerate() {
            for &a in ring.atoms.iter() {
                let slot = &mut cursor[a as usize];
                atom_rings[*slot as usize] = r as u32;
                *slot += 1;
            }
        }

        RingTable {
            rings,
            atom_offsets,
            atom_rings,
            by_fingerprint,
        }
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Indices of the rings containing `atom`.
    pub fn rings_of(&self, atom: u32) -> &[u32] {
        let i = atom as usize;
        match (self.atom_offsets.get(i), self.atom_offsets.get(i + 1)) {
            (Some(&start), Some(&end)) => &self.atom_rings[start as usize..end as usize],
            _ => &[][..],
        }
    }

    pub fn in_ring(&self, atom: u32) -> bool {
        !self.rings_of(atom).is_empty()
    }

    /// Indices of the rings with the given fingerprint, in ingestion order.
    pub fn with_fingerprint(&self, fingerprint: Name) -> &[u32] {
        self.by_fingerprint
            .get(&fingerprint)
            .map_or(&[][..], |ids| ids.as_slice())
    }
}

#[cfg(test)]
mod tests;
