use pretty_assertions::assert_eq;

use super::*;

fn elements(symbols: &[&str]) -> Vec<ElementSymbol> {
    symbols.iter().map(|s| ElementSymbol::new(s)).collect()
}

#[test]
fn test_fingerprint_is_rotation_and_direction_invariant() {
    assert_eq!(fingerprint(&["O", "C", "C", "C", "C", "C"]), "C-C-C-C-C-O");
    assert_eq!(fingerprint(&["C", "C", "O", "C", "C", "C"]), "C-C-C-C-C-O");
    assert_eq!(fingerprint(&["C", "N", "C", "C", "O"]), fingerprint(&["O", "C", "C", "N", "C"]));
    assert_eq!(fingerprint(&["N", "C", "O"]), "C-N-O");
    assert_eq!(fingerprint::<&str>(&[]), "");
}

#[test]
fn test_table_membership_and_lookup() {
    // benzene 0..6, furan-like 6..11, atom 11 outside any ring
    let els = elements(&["c", "c", "c", "c", "c", "c", "o", "c", "c", "c", "c", "n"]);
    let input = [
        RingInput {
            atoms: (0..6).collect(),
            aromatic: true,
        },
        RingInput {
            atoms: vec![6, 7, 8, 9, 10],
            aromatic: false,
        },
        RingInput {
            atoms: vec![0, 1, 99],
            aromatic: false,
        },
    ];
    let table = RingTable::new(12, &input, &els);

    assert_eq!(table.len(), 2);
    assert!(table.in_ring(0));
    assert!(!table.in_ring(11));
    assert_eq!(table.rings_of(7), &[1]);
    assert_eq!(table.rings_of(500), &[] as &[u32]);

    let benzene = Name::intern("C-C-C-C-C-C");
    assert_eq!(table.with_fingerprint(benzene), &[0]);
    assert!(table.rings()[0].is_aromatic());
    assert_eq!(table.rings()[1].fingerprint(), Name::intern("C-C-C-C-O"));
    assert!(table.with_fingerprint(Name::intern("N-N-N")).is_empty());
}
