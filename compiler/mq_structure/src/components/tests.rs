use pretty_assertions::assert_eq;

use super::*;
use crate::{Bond, BondFlags};

#[test]
fn test_components_follow_covalent_bonds_only() {
    let residue_index = [0; 7];
    let bonds = [
        Bond::new(0, 1, 1, BondFlags::COVALENT),
        Bond::new(4, 1, 1, BondFlags::COVALENT),
        Bond::new(2, 3, 1, BondFlags::COVALENT | BondFlags::SULFIDE),
        Bond::new(3, 5, 1, BondFlags::HYDROGEN),
    ];
    let table = BondTable::new(7, &bonds, &residue_index);
    let components = ConnectedComponents::new(7, &table);

    assert_eq!(components.labels(), &[0, 0, 1, 1, 0, 2, 3]);
    assert_eq!(components.count(), 4);
    assert_eq!(components.key(4), components.key(0));
    assert_ne!(components.key(5), components.key(3));
}

#[test]
fn test_no_atoms() {
    let components = ConnectedComponents::new(0, &BondTable::default());
    assert_eq!(components.count(), 0);
}
