//! End-to-end queries against a small protein.

#![allow(clippy::unwrap_used)]

mod common;

use common::{atom_of, protein};
use molql::builder::{self as b, AtomGroups};
use molql::catalog::{core as c, structure as s};
use molql::{AtomRecord, BondFlags, Expression, Model, ModelBuilder, Query, QueryConfig, Vec3};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn select(expr: &Expression) -> Vec<Vec<u32>> {
    molql::select(expr, &protein())
        .unwrap()
        .iter()
        .map(|set| set.indices().to_vec())
        .collect()
}

fn residue_of_a(seq: i32) -> Vec<u32> {
    let n = atom_of("A", seq, "N");
    (n..n + 4).collect()
}

fn by_chain() -> Expression {
    b::atom_groups(AtomGroups {
        group_by: Some(b::prop(s::CHAIN_KEY)),
        ..AtomGroups::default()
    })
}

fn ca_after_10() -> Expression {
    b::and([
        b::eq(b::prop(s::ATOM_NAME), b::str("CA")),
        b::gr(b::prop(s::RES_SEQ_NUMBER), b::num(10.0)),
    ])
}

#[test]
fn alpha_carbons_after_residue_10() {
    let expected = vec![
        atom_of("A", 11, "CA"),
        atom_of("A", 12, "CA"),
        atom_of("A", 13, "CA"),
        atom_of("B", 11, "CA"),
    ];
    assert_eq!(select(&ca_after_10()), vec![expected]);
}

#[test]
fn json_queries() {
    let json = r#"{
        "symbol": "core.logic.and",
        "args": {
            "0": {
                "symbol": "core.rel.eq",
                "args": {
                    "0": { "symbol": "struct.atomProperty.macromolecular.atomName" },
                    "1": { "value": "CA", "type": "string" }
                }
            },
            "1": {
                "symbol": "core.rel.gr",
                "args": {
                    "0": { "symbol": "struct.atomProperty.macromolecular.resSeqNumber" },
                    "1": { "value": 10, "type": "number" }
                }
            }
        }
    }"#;
    let parsed: Expression = serde_json::from_str(json).unwrap();
    assert_eq!(parsed, ca_after_10());
    assert_eq!(select(&parsed), select(&ca_after_10()));

    let written = serde_json::to_string(&parsed).unwrap();
    let reread: Expression = serde_json::from_str(&written).unwrap();
    assert_eq!(reread, parsed);
}

#[test]
fn helix_alpha_carbons() {
    let expr = b::and([
        b::eq(b::prop(s::SECONDARY_STRUCTURE), b::str("helix")),
        b::eq(b::prop(s::ATOM_NAME), b::str("CA")),
    ]);
    let expected = vec![
        atom_of("A", 10, "CA"),
        atom_of("A", 11, "CA"),
        atom_of("A", 12, "CA"),
    ];
    assert_eq!(select(&expr), vec![expected]);
}

#[test]
fn ligand_binding_site() {
    let ligand = b::atoms(b::eq(b::prop(s::RES_NAME), b::str("HEM")));
    let site = b::apply(
        s::MODIFIER_INCLUDE_SURROUNDINGS,
        [
            ("0", ligand),
            ("radius", b::num(3.0)),
            ("as-whole-residues", b::bool(true)),
        ],
    );
    let mut expected = residue_of_a(11);
    expected.push(36);
    assert_eq!(select(&site), vec![expected]);
}

#[test]
fn waters_near_the_polymer() {
    let waters = b::atom_groups(AtomGroups {
        entity_test: Some(b::eq(b::prop(s::ENTITY_TYPE), b::str("water"))),
        group_by: Some(b::prop(s::RESIDUE_KEY)),
        ..AtomGroups::default()
    });
    let polymer = b::atom_groups(AtomGroups {
        entity_test: Some(b::eq(b::prop(s::ENTITY_TYPE), b::str("polymer"))),
        ..AtomGroups::default()
    });
    let near = b::apply(
        s::FILTER_WITHIN,
        [("0", waters), ("target", polymer), ("max-radius", b::num(5.0))],
    );
    assert_eq!(select(&near), vec![vec![38]]);
}

#[test]
fn neighbours_along_the_backbone() {
    let residue_10 = b::atom_groups(AtomGroups {
        chain_test: Some(b::eq(b::prop(s::CHAIN_NAME), b::str("A"))),
        residue_test: Some(b::eq(b::prop(s::RES_SEQ_NUMBER), b::num(10.0))),
        ..AtomGroups::default()
    });
    let expr = b::apply(
        s::FILTER_IS_CONNECTED_TO,
        [("0", b::residues(b::bool(true))), ("target", residue_10)],
    );
    assert_eq!(select(&expr), vec![residue_of_a(9), residue_of_a(11)]);
}

#[test]
fn first_residue_of_every_chain() {
    let expr = b::apply(
        s::MODIFIER_QUERY_EACH,
        [
            ("0", by_chain()),
            ("query", b::call(s::FILTER_FIRST, [b::residues(b::bool(true))])),
        ],
    );
    let b9 = atom_of("B", 9, "N");
    assert_eq!(
        select(&expr),
        vec![residue_of_a(8), (b9..b9 + 4).collect(), vec![36], vec![37]]
    );
}

#[test]
fn chains_with_more_than_three_residues() {
    let count = b::call(s::ATOM_SET_COUNT_QUERY, [b::residues(b::bool(true))]);
    let expr = b::apply(
        s::FILTER_PICK,
        [("0", by_chain()), ("test", b::gr(count, b::num(3.0)))],
    );
    assert_eq!(select(&expr), vec![(0..24).collect::<Vec<u32>>()]);
}

#[test]
fn isolated_atoms_stay_alone() {
    let fe = b::atoms(b::eq(b::prop(s::ELEMENT_SYMBOL), b::str("FE")));
    let expr = b::call(s::MODIFIER_INCLUDE_CONNECTED, [fe]);
    assert_eq!(select(&expr), vec![vec![36]]);
}

#[test]
fn everything_but_het_atoms() {
    let expr = b::apply(
        s::MODIFIER_EXCEPT_BY,
        [("0", b::all()), ("by", b::atoms(b::prop(s::IS_HET)))],
    );
    assert_eq!(select(&expr), vec![(0..36).collect::<Vec<u32>>()]);
}

#[test]
fn selections_become_masks() {
    let model = protein();
    let selection = Query::compile(&b::residues(b::eq(b::prop(s::ATOM_NAME), b::str("CA"))))
        .unwrap()
        .execute(&model)
        .unwrap();
    assert_eq!(selection.len(), 9);
    let mask = selection.to_mask();
    assert!(mask.test(atom_of("A", 8, "CA")));
    assert!(!mask.test(atom_of("A", 8, "N")));
    assert_eq!(mask.size(), 9);
    assert_eq!(selection.flatten().len(), 9);
}

#[test]
fn errors_carry_codes() {
    let model = protein();
    let unknown = b::call("struct.generator.everything", []);
    assert_eq!(molql::select(&unknown, &model).unwrap_err().code(), "E2001");

    let div = b::gr(
        b::call(c::DIV, [b::prop(s::X), b::num(0.0)]),
        b::num(1.0),
    );
    let err = molql::select(&div, &model).unwrap_err();
    assert_eq!(err.code(), "E3003");
    assert!(err.to_string().contains("core.math.div"), "{err}");
}

/// Two bonded atoms with a nonzero B-factor, no ligand.
fn warm_dimer() -> Model {
    let mut m = ModelBuilder::new("2WRM");
    m.entity("1", "polymer");
    m.chain("A").unwrap();
    m.residue("GLY", 1, "").unwrap();
    let n = m
        .atom(AtomRecord::new("N", "N", Vec3::new(0.0, 0.0, 0.0)).b_factor(20.0))
        .unwrap();
    let ca = m
        .atom(AtomRecord::new("CA", "C", Vec3::new(1.5, 0.0, 0.0)).b_factor(20.0))
        .unwrap();
    m.bond(n, ca, 1, BondFlags::COVALENT);
    m.build().unwrap()
}

#[test]
fn failed_evaluation_leaves_query_and_model_usable() {
    let ligand = b::atoms(b::eq(b::prop(s::RES_NAME), b::str("HEM")));
    let site = b::apply(
        s::MODIFIER_INCLUDE_SURROUNDINGS,
        [("0", ligand), ("radius", b::num(3.0))],
    );
    let bonded = b::apply(
        s::FILTER_IS_CONNECTED_TO,
        [
            ("0", b::residues(b::bool(true))),
            ("target", b::atoms(b::eq(b::prop(s::RES_SEQ_NUMBER), b::num(10.0)))),
        ],
    );
    // every atom of the protein has a zero B-factor
    let warm = b::atoms(b::gr(
        b::call(c::DIV, [b::num(1.0), b::prop(s::B_FACTOR)]),
        b::num(0.0),
    ));
    let query = Query::compile(&b::call(s::COMBINATOR_MERGE, [site.clone(), bonded, warm])).unwrap();

    let model = protein();
    let bonds_before = model.bonds().bonds().to_vec();
    let near_fe_before = model.spatial().find_within(Vec3::new(11.0 * 3.8 + 1.0, 2.5, 0.0), 3.0);

    let err = query.execute(&model).unwrap_err();
    assert_eq!(err.code(), "E3003");

    let dimer = warm_dimer();
    let ok = query.execute(&dimer).unwrap();
    let sets: Vec<Vec<u32>> = ok.iter().map(|set| set.indices().to_vec()).collect();
    assert_eq!(sets, vec![vec![0, 1]]);

    // the caches filled before the failure are intact
    assert_eq!(model.bonds().bonds(), bonds_before.as_slice());
    assert_eq!(
        model.spatial().find_within(Vec3::new(11.0 * 3.8 + 1.0, 2.5, 0.0), 3.0),
        near_fe_before
    );
    // and the failed model answers later queries like a fresh one
    let again = Query::compile(&site).unwrap();
    assert_eq!(again.execute(&model).unwrap(), again.execute(&protein()).unwrap());
    assert_eq!(query.execute(&model).unwrap_err().code(), "E3003");
}

#[test]
fn one_query_many_models() {
    let query = Query::compile(&ca_after_10()).unwrap();
    let models = vec![protein(), protein()];
    let results = query.execute_many_with(&models, &QueryConfig::default());
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap(), results[1].as_ref().unwrap());
}

proptest! {
    #[test]
    fn coordinate_filter_matches_a_scan(threshold in 20.0f64..60.0) {
        let model = protein();
        let expr = b::atoms(b::gr(b::prop(s::X), b::num(threshold)));
        let found: Vec<u32> = molql::select(&expr, &model)
            .unwrap()
            .flatten()
            .indices()
            .to_vec();
        let expected: Vec<u32> = model
            .atoms()
            .positions()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.x > threshold)
            .map(|(i, _)| i as u32)
            .collect();
        prop_assert_eq!(found, expected);
    }
}
