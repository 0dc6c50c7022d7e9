//! Covalently connected components.

use crate::BondTable;

/// Per-atom component label. Labels are dense and numbered in order of each
/// component's lowest atom index.
#[derive(Clone, Debug, Default)]
pub struct ConnectedComponents {
    labels: Vec<u32>,
    count: usize,
}

impl ConnectedComponents {
    pub fn new(atom_count: usize, bonds: &BondTable) -> Self {
        let mut parent: Vec<u32> = (0..atom_count as u32).collect();
        for bond in bonds.bonds().iter().filter(|b| b.flags.is_covalent()) {
            let ra = find(&mut parent, bond.a);
            let rb = find(&mut parent, bond.b);
            if ra != rb {
                // Lower index becomes the root so labels follow atom order.
                let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
                parent[hi as usize] = lo;
            }
        }

        let mut labels = vec![0u32; atom_count];
        let mut count = 0u32;
        for atom in 0..atom_count as u32 {
            let root = find(&mut parent, atom);
            labels[atom as usize] = if root == atom {
                count += 1;
                count - 1
            } else {
                labels[root as usize]
            };
        }

        ConnectedComponents {
            labels,
            count: count as usize,
        }
    }

    /// Component of `atom`.
    #[inline]
    pub fn key(&self, atom: u32) -> u32 {
        self.labels[atom as usize]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }
}

fn find(parent: &mut [u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        let grand = parent[parent[x as usize] as usize];
        parent[x as usize] = grand;
        x = grand;
    }
    x
}

#[cfg(test)]
mod tests;
