use mq_ir::builder as b;
use mq_ir::catalog::structure as s;
use mq_structure::{AtomRecord, ModelBuilder, Vec3};
use pretty_assertions::assert_eq;

use super::*;

fn two_residues() -> Model {
    let mut m = ModelBuilder::new("two");
    m.entity("1", "polymer");
    m.chain("A").unwrap();
    m.residue("SER", 1, "").unwrap();
    m.atom(AtomRecord::new("CA", "C", Vec3::new(0.0, 0.0, 0.0))).unwrap();
    m.atom(AtomRecord::new("OG", "O", Vec3::new(1.4, 0.0, 0.0))).unwrap();
    m.residue("SER", 2, "").unwrap();
    m.atom(AtomRecord::new("CA", "C", Vec3::new(3.8, 0.0, 0.0))).unwrap();
    m.build().unwrap()
}

#[test]
fn test_boolean_queries_are_lifted() {
    let query = Query::compile(&b::eq(b::prop(s::ATOM_NAME), b::str("CA"))).unwrap();
    assert_eq!(query.ty(), &Type::AtomSelection);
    assert_eq!(
        query.compiled().symbol(),
        Some(mq_ir::SymbolId::new(s::GENERATOR_ATOM_GROUPS))
    );
    let selection = query.execute(&two_residues()).unwrap();
    assert_eq!(selection.len(), 1);
    assert_eq!(selection.sets()[0].indices(), &[0, 2]);
}

#[test]
fn test_selection_queries_are_not_lifted() {
    let query = Query::compile(&b::all()).unwrap();
    assert_eq!(query.compiled().symbol(), Some(mq_ir::SymbolId::new(s::GENERATOR_ALL)));
}

#[test]
fn test_numeric_queries_evaluate_but_do_not_execute() {
    let query = Query::compile(&b::call(mq_ir::catalog::core::ADD, [b::num(1.0), b::num(2.0)])).unwrap();
    let model = two_residues();
    assert_eq!(query.evaluate_value(&model).unwrap().as_num().unwrap(), 3.0);
    assert_eq!(query.execute(&model).unwrap_err().code(), "E3001");
}

#[test]
fn test_result_cap_applies() {
    let query = Query::compile(&b::residues(b::bool(true))).unwrap();
    let model = two_residues();
    assert_eq!(query.execute(&model).unwrap().len(), 2);
    let config = QueryConfig::builder().max_result_sets(1).build();
    assert_eq!(query.execute_with(&model, &config).unwrap_err().code(), "E3009");
}

#[test]
fn test_execute_many_keeps_model_order() {
    let query = Query::compile(&b::residues(b::bool(true))).unwrap();
    let mut small = ModelBuilder::new("small");
    small.entity("1", "water");
    small.chain("W").unwrap();
    small.residue("HOH", 1, "").unwrap();
    small.atom(AtomRecord::new("O", "O", Vec3::ZERO)).unwrap();
    let models = vec![two_residues(), small.build().unwrap(), two_residues()];

    let counts: Vec<usize> = query
        .execute_many(&models)
        .into_iter()
        .map(|result| result.unwrap().len())
        .collect();
    assert_eq!(counts, vec![2, 1, 2]);
}
