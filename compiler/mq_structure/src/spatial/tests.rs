use proptest::prelude::*;

use super::*;

fn line(n: usize, spacing: f64) -> Vec<Vec3> {
    (0..n).map(|i| Vec3::new(i as f64 * spacing, 0.0, 0.0)).collect()
}

#[test]
fn test_find_within_inclusive() {
    let grid = SpatialGrid::new(&line(10, 1.5), 4.0);
    assert_eq!(grid.find_within(Vec3::ZERO, 3.0), vec![0, 1, 2]);
    assert_eq!(grid.find_within(Vec3::new(7.5, 0.0, 0.0), 1.5), vec![4, 5, 6]);
    assert!(grid.find_within(Vec3::new(0.0, 50.0, 0.0), 2.0).is_empty());
}

#[test]
fn test_degenerate_inputs() {
    let empty = SpatialGrid::new(&[], 4.0);
    assert!(empty.is_empty());
    assert!(empty.find_within(Vec3::ZERO, 10.0).is_empty());

    let grid = SpatialGrid::new(&line(3, 1.0), -1.0);
    assert_eq!(grid.cell_size(), SpatialGrid::DEFAULT_CELL_SIZE);
    assert!(grid.find_within(Vec3::ZERO, f64::NAN).is_empty());
    assert!(grid.find_within(Vec3::ZERO, -1.0).is_empty());
    assert_eq!(grid.find_within(Vec3::ZERO, 0.0), vec![0]);
}

#[test]
fn test_huge_radius_scans_occupied_cells() {
    let grid = SpatialGrid::new(&line(5, 100.0), 1.0);
    assert_eq!(grid.find_within(Vec3::ZERO, 1e6), vec![0, 1, 2, 3, 4]);
}

proptest! {
    #[test]
    fn grid_matches_brute_force(
        points in prop::collection::vec((-20.0f64..20.0, -20.0f64..20.0, -20.0f64..20.0), 0..60),
        center in (-25.0f64..25.0, -25.0f64..25.0, -25.0f64..25.0),
        radius in 0.0f64..15.0,
        cell in 0.5f64..8.0,
    ) {
        let positions: Vec<Vec3> = points.iter().map(|&(x, y, z)| Vec3::new(x, y, z)).collect();
        let center = Vec3::new(center.0, center.1, center.2);
        let grid = SpatialGrid::new(&positions, cell);
        let expected: Vec<u32> = positions
            .iter()
            .enumerate()
            .filter(|(_, p)| p.distance_sq(center) <= radius * radius)
            .map(|(i, _)| i as u32)
            .collect();
        prop_assert_eq!(grid.find_within(center, radius), expected);
    }
}
