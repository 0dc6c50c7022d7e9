//! A small peptide with a ring, shared by unit tests.

use mq_ir::Expression;
use mq_structure::{AtomRecord, AtomSelection, BondFlags, Model, ModelBuilder, Vec3};

use crate::{Compiler, EvalResult, Environment, QueryConfig, Value};

/// Thirteen atoms:
///
/// - chain A (polymer): ALA 1 (atoms 0..=2), GLY 2 (3..=4), PHE 11 (5..=11),
///   where atoms 6..=11 form an aromatic six-carbon ring;
/// - chain W (water): HOH 100 (atom 12), far away from everything else.
///
/// Atoms 0..=11 are covalently bonded in a chain closing the ring; atom 12
/// has a single hydrogen bond to atom 4.
pub(crate) fn peptide() -> Model {
    let mut b = ModelBuilder::new("peptide");
    b.entity("1", "polymer");
    b.chain("A").unwrap();
    b.residue("ALA", 1, "").unwrap();
    b.atom(AtomRecord::new("N", "N", Vec3::new(0.0, 0.0, 0.0)).b_factor(10.0))
        .unwrap();
    b.atom(AtomRecord::new("CA", "C", Vec3::new(1.5, 0.0, 0.0))).unwrap();
    b.atom(AtomRecord::new("C", "C", Vec3::new(2.5, 1.0, 0.0))).unwrap();
    b.residue("GLY", 2, "").unwrap();
    b.atom(AtomRecord::new("N", "N", Vec3::new(3.5, 1.0, 0.0))).unwrap();
    b.atom(AtomRecord::new("CA", "C", Vec3::new(5.0, 1.0, 0.0))).unwrap();
    b.residue("PHE", 11, "").unwrap();
    b.atom(AtomRecord::new("CA", "C", Vec3::new(6.5, 1.0, 0.0))).unwrap();
    let ring = [
        ("CG", 8.0, 1.0),
        ("CD1", 8.7, 2.2124),
        ("CE1", 10.1, 2.2124),
        ("CZ", 10.8, 1.0),
        ("CE2", 10.1, -0.2124),
        ("CD2", 8.7, -0.2124),
    ];
    for (name, x, y) in ring {
        b.atom(AtomRecord::new(name, "C", Vec3::new(x, y, 0.0))).unwrap();
    }
    b.entity("2", "water");
    b.chain("W").unwrap();
    b.residue("HOH", 100, "").unwrap();
    b.atom(AtomRecord::new("O", "O", Vec3::new(30.0, 0.0, 0.0)).het())
        .unwrap();

    for a in 0..11 {
        b.bond(a, a + 1, 1, BondFlags::COVALENT);
    }
    b.bond(11, 6, 1, BondFlags::COVALENT | BondFlags::AROMATIC);
    b.bond(4, 12, 1, BondFlags::HYDROGEN);
    b.ring((6..=11).collect(), true);
    b.build().unwrap()
}

pub(crate) fn run(expr: &Expression, model: &Model) -> EvalResult {
    run_with(expr, model, &QueryConfig::default())
}

pub(crate) fn run_with(expr: &Expression, model: &Model, config: &QueryConfig) -> EvalResult {
    let compiled = Compiler::standard().compile(expr).unwrap();
    let mut env = Environment::for_model(model, config);
    compiled.eval(&mut env)
}

/// Atom indices of each set of a selection-valued result.
pub(crate) fn sets(value: Value) -> Vec<Vec<u32>> {
    to_vecs(&value.into_selection().unwrap())
}

pub(crate) fn to_vecs(selection: &AtomSelection) -> Vec<Vec<u32>> {
    selection.iter().map(|set| set.indices().to_vec()).collect()
}
