//! Small hand-built models shared by unit tests.

use crate::{AtomRecord, Model, ModelBuilder, Vec3};

/// Five atoms: residues ALA 1 (atoms 0, 1) and GLY 2 (atoms 2, 3) in polymer
/// chain A, and a water HOH 100 (atom 4) in chain W.
pub(crate) fn five_atoms() -> Model {
    let mut b = ModelBuilder::new("five");
    b.entity("1", "polymer");
    b.chain("A").unwrap();
    b.residue("ALA", 1, "").unwrap();
    b.atom(AtomRecord::new("N", "N", Vec3::new(0.0, 0.0, 0.0))).unwrap();
    b.atom(AtomRecord::new("CA", "C", Vec3::new(1.0, 0.0, 0.0))).unwrap();
    b.residue("GLY", 2, "").unwrap();
    b.atom(AtomRecord::new("N", "N", Vec3::new(3.0, 4.0, 0.0))).unwrap();
    b.atom(AtomRecord::new("CA", "C", Vec3::new(4.0, 4.0, 0.0))).unwrap();
    b.entity("2", "water");
    b.chain("W").unwrap();
    b.residue("HOH", 100, "").unwrap();
    b.atom(AtomRecord::new("O", "O", Vec3::new(10.0, 0.0, 0.0)).het())
        .unwrap();
    b.build().unwrap()
}
