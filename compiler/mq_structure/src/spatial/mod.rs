//! Uniform cell grid for radius queries.
//!
//! Only occupied cells are stored, so sparse or elongated structures do not
//! pay for the empty space of their bounding box.

use rustc_hash::FxHashMap;

use crate::Vec3;

type Cell = [i64; 3];

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f64,
    origin: Vec3,
    positions: Vec<Vec3>,
    cells: FxHashMap<Cell, Vec<u32>>,
}

impl SpatialGrid {
    /// Edge length in ångström used by [`Model::spatial`](crate::Model::spatial).
    pub const DEFAULT_CELL_SIZE: f64 = 4.0;

    pub fn new(positions: &[Vec3], cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            Self::DEFAULT_CELL_SIZE
        };
        let origin = positions.iter().fold(
            Vec3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            |min, p| Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
        );
        let origin = if origin.is_finite() { origin } else { Vec3::ZERO };

        let mut grid = SpatialGrid {
            cell_size,
            origin,
            positions: positions.to_vec(),
            cells: FxHashMap::default(),
        };
        for (i, &p) in positions.iter().enumerate() {
            let cell = grid.cell_of(p);
            grid.cells.entry(cell).or_default().push(i as u32);
        }
        grid
    }

    fn cell_of(&self, p: Vec3) -> Cell {
        [
            ((p.x - self.origin.x) / self.cell_size).floor() as i64,
            ((p.y - self.origin.y) / self.cell_size).floor() as i64,
            ((p.z - self.origin.z) / self.cell_size).floor() as i64,
        ]
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calls `f` for every atom within `radius` (inclusive) of `center`.
    pub fn for_each_within(&self, center: Vec3, radius: f64, mut f: impl FnMut(u32)) {
        if radius.is_nan() || radius < 0.0 || !center.is_finite() || self.cells.is_empty() {
            return;
        }
        let r_sq = radius * radius;
        if !radius.is_finite() {
            for members in self.cells.values() {
                self.visit(members, center, r_sq, &mut f);
            }
            return;
        }
        let lo = self.cell_of(Vec3::new(center.x - radius, center.y - radius, center.z - radius));
        let hi = self.cell_of(Vec3::new(center.x + radius, center.y + radius, center.z + radius));

        let span = (0..3).fold(1u128, |acc, d| {
            acc.saturating_mul(hi[d].saturating_sub(lo[d]).saturating_add(1).max(0) as u128)
        });
        if span > self.cells.len() as u128 {
            // The query box covers more cells than are occupied.
            for members in self.cells.values() {
                self.visit(members, center, r_sq, &mut f);
            }
            return;
        }
        for x in lo[0]..=hi[0] {
            for y in lo[1]..=hi[1] {
                for z in lo[2]..=hi[2] {
                    if let Some(members) = self.cells.get(&[x, y, z]) {
                        self.visit(members, center, r_sq, &mut f);
                    }
                }
            }
        }
    }

    fn visit(&self, members: &[u32], center: Vec3, r_sq: f64, f: &mut impl FnMut(u32)) {
        for &i in members {
            if self.positions[i as usize].distance_sq(center) <= r_sq {
                f(i);
            }
        }
    }

    /// Atoms within `radius` of `center`, ascending.
    pub fn find_within(&self, center: Vec3, radius: f64) -> Vec<u32> {
        let mut found = Vec::new();
        self.for_each_within(center, radius, |i| found.push(i));
        found.sort_unstable();
        found
    }
}

#[cfg(test)]
mod tests;
