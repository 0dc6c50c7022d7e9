#![allow(dead_code, clippy::unwrap_used)]

use molql::{AtomRecord, BondFlags, Model, ModelBuilder, SecondaryStructure, Vec3};

/// A short two-chain protein with a ligand and waters.
///
/// Chain A: residues 8..=13, each N, CA, C, O along x; residues 10..=12
/// are helical. Chain B: residues 9..=11, same layout, shifted 6 Å in y.
/// Chain L: one HEM ligand atom (FE) near chain A residue 11.
/// Chain W: two waters.
pub fn protein() -> Model {
    let mut m = ModelBuilder::new("1ABC");
    m.entity("1", "polymer");
    let mut atom = 0u32;
    for (chain, seqs, y) in [("A", 8..=13, 0.0), ("B", 9..=11, 6.0)] {
        m.chain(chain).unwrap();
        let mut previous_c: Option<u32> = None;
        for seq in seqs {
            m.residue("ALA", seq, "").unwrap();
            if chain == "A" && (10..=12).contains(&seq) {
                m.secondary_structure(SecondaryStructure::Helix).unwrap();
            }
            let x = f64::from(seq) * 3.8;
            let n = m.atom(AtomRecord::new("N", "N", Vec3::new(x, y, 0.0))).unwrap();
            let ca = m.atom(AtomRecord::new("CA", "C", Vec3::new(x + 1.0, y, 0.0))).unwrap();
            let c = m.atom(AtomRecord::new("C", "C", Vec3::new(x + 2.0, y, 0.0))).unwrap();
            let o = m.atom(AtomRecord::new("O", "O", Vec3::new(x + 2.0, y + 1.2, 0.0))).unwrap();
            m.bond(n, ca, 1, BondFlags::COVALENT);
            m.bond(ca, c, 1, BondFlags::COVALENT);
            m.bond(c, o, 2, BondFlags::COVALENT);
            if let Some(prev) = previous_c {
                m.bond(prev, n, 1, BondFlags::COVALENT);
            }
            previous_c = Some(c);
            atom = o + 1;
        }
    }
    m.entity("2", "non-polymer");
    m.chain("L").unwrap();
    m.residue("HEM", 200, "").unwrap();
    let fe = m
        .atom(AtomRecord::new("FE", "Fe", Vec3::new(11.0 * 3.8 + 1.0, 2.5, 0.0)).het())
        .unwrap();
    assert_eq!(fe, atom);
    m.entity("3", "water");
    m.chain("W").unwrap();
    m.residue("HOH", 301, "").unwrap();
    m.atom(AtomRecord::new("O", "O", Vec3::new(100.0, 0.0, 0.0)).het()).unwrap();
    m.residue("HOH", 302, "").unwrap();
    m.atom(AtomRecord::new("O", "O", Vec3::new(8.0 * 3.8, -2.0, 0.0)).het()).unwrap();
    m.build().unwrap()
}

/// Atom index of `name` in chain `chain`, residue `seq`.
pub fn atom_of(chain: &str, seq: i32, name: &str) -> u32 {
    let chain_a = ["N", "CA", "C", "O"];
    let slot = chain_a.iter().position(|n| *n == name).unwrap() as u32;
    match chain {
        "A" => (seq - 8) as u32 * 4 + slot,
        "B" => 24 + (seq - 9) as u32 * 4 + slot,
        _ => panic!("no such chain {chain}"),
    }
}
