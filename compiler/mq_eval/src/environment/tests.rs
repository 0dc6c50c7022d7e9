use mq_ir::builder as b;
use mq_ir::catalog::structure as s;
use mq_structure::{AtomSet, BondFlags};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_model::{peptide, to_vecs};
use crate::Compiler;

#[test]
fn test_whole_model_context() {
    let model = peptide();
    let config = QueryConfig::default();
    let context = Context::new(&model, &config);
    assert!(!context.is_narrowed());
    assert_eq!(context.universe_len(), 13);
    assert_eq!(context.atoms().count(), 13);
    assert!(context.contains(12));
    assert!(!context.contains(13));
    assert_eq!(context.universe_set().len(), 13);
}

#[test]
fn test_narrowed_context() {
    let model = peptide();
    let config = QueryConfig::default();
    let context = Context::new(&model, &config).narrowed(AtomSet::from(vec![3, 4]));
    assert!(context.is_narrowed());
    assert_eq!(context.atoms().collect::<Vec<_>>(), vec![3, 4]);
    assert!(context.contains(4));
    assert!(!context.contains(5));
    assert_eq!(context.universe_len(), 2);
    assert_eq!(context.empty_selection().atom_count(), 13);
}

#[test]
fn test_slots_start_unbound() {
    let model = peptide();
    let config = QueryConfig::default();
    let env = Environment::for_model(&model, &config);
    assert_eq!(env.current_atom().unwrap_err().code(), "E3006");
    assert_eq!(env.current_bond().unwrap_err().code(), "E3007");
    assert_eq!(env.current_atom_set().unwrap_err().code(), "E3008");
}

#[test]
fn test_out_of_range_atom_is_not_current() {
    let model = peptide();
    let config = QueryConfig::default();
    let mut env = Environment::for_model(&model, &config);
    env.slots.element.atom = Some(99);
    assert!(env.current_atom().is_err());
}

#[test]
fn test_with_element_restores_the_slot() {
    let model = peptide();
    let config = QueryConfig::default();
    let mut env = Environment::for_model(&model, &config);
    let seen = env.with_element(4, |env| {
        let outer = env.current_atom().unwrap();
        let inner = env.with_element(5, |env| env.current_atom().unwrap());
        (outer, inner, env.current_atom().unwrap())
    });
    assert_eq!(seen, (4, 5, 4));
    assert_eq!(env.slots.element.atom, None);
}

#[test]
fn test_with_atom_set_points_at_the_first_atom() {
    let model = peptide();
    let config = QueryConfig::default();
    let mut env = Environment::for_model(&model, &config);
    let set = AtomSet::from(vec![5, 6, 7]);
    let (atom, len) = env.with_atom_set(&set, |env| {
        (env.current_atom().unwrap(), env.current_atom_set().unwrap().len())
    });
    assert_eq!((atom, len), (5, 3));
    assert!(env.current_atom_set().is_err());
}

#[test]
fn test_default_bond_test_is_covalence() {
    let model = peptide();
    let config = QueryConfig::default();
    let mut env = Environment::for_model(&model, &config);
    let bonds = model.bonds();
    let peptide_bond = bonds.bond_between(2, 3).unwrap();
    let hydrogen_bond = bonds.bond_between(4, 12).unwrap();
    assert!(env.test_bond(2, peptide_bond, None).unwrap());
    assert!(!env.test_bond(4, hydrogen_bond, None).unwrap());
}

#[test]
fn test_bond_slot_is_bound_during_the_test() {
    let model = peptide();
    let config = QueryConfig::default();
    let mut env = Environment::for_model(&model, &config);
    let test = Compiler::standard()
        .compile(&b::eq(b::prop(s::BOND_ORDER), b::num(1.0)))
        .unwrap();
    let bond = model.bonds().bond_between(4, 12).unwrap();
    assert!(env.test_bond(12, bond, Some(&test)).unwrap());
    assert_eq!(env.slots.bond, None);

    let address = BondAddress {
        atom_a: 12,
        atom_b: 4,
        order: 1,
        flags: BondFlags::HYDROGEN,
    };
    env.slots.bond = Some(address);
    assert_eq!(env.current_bond().unwrap(), address);
}

#[test]
fn test_find_in_atom_set_narrows_the_universe() {
    let model = peptide();
    let config = QueryConfig::default();
    let mut env = Environment::for_model(&model, &config);
    let query = Compiler::standard()
        .compile(&b::atoms(b::eq(b::prop(s::ATOM_NAME), b::str("CA"))))
        .unwrap();

    let gly = AtomSet::from(vec![3, 4]);
    let found = env.find_in_atom_set(&gly, &query).unwrap();
    assert_eq!(to_vecs(&found), vec![vec![4]]);

    // The caller's slots are neither visible nor touched.
    env.slots.element.atom = Some(1);
    let water = AtomSet::from(vec![12]);
    assert!(env.find_in_atom_set(&water, &query).unwrap().is_empty());
    assert_eq!(env.slots.element.atom, Some(1));
}

#[test]
fn test_find_in_atom_set_rejects_non_selection_queries() {
    let model = peptide();
    let config = QueryConfig::default();
    let env = Environment::for_model(&model, &config);
    let query = Compiler::standard().compile(&b::num(1.0)).unwrap();
    assert!(env.find_in_atom_set(&AtomSet::singleton(0), &query).is_err());
}
