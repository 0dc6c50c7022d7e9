use mq_ir::builder as b;
use mq_ir::catalog::{core as c, secondary_structure_type, structure as s};
use mq_ir::{ArgKey, Argument, Arguments, Expression, ListArguments, Name, SymbolTable, Type};
use pretty_assertions::assert_eq;

use super::*;
use crate::runtime::{MathOp, TextOp};
use crate::test_model::{peptide, run};

fn compile(expr: &Expression) -> Result<CompiledExpr, CompileError> {
    Compiler::standard().compile(expr)
}

fn id(text: &str) -> SymbolId {
    SymbolId::new(text)
}

#[test]
fn test_literals_compile_to_constants() {
    let compiled = compile(&b::num(2.0)).unwrap();
    assert_eq!(compiled.ty(), &Type::Num);
    assert!(compiled.as_constant().is_some());
    assert_eq!(compiled.symbol(), None);
}

#[test]
fn test_applications_carry_the_return_type() {
    let compiled = compile(&b::atoms(b::bool(true))).unwrap();
    assert_eq!(compiled.ty(), &Type::AtomSelection);
    assert_eq!(compiled.symbol(), Some(id(s::GENERATOR_ATOM_GROUPS)));
}

#[test]
fn test_unknown_symbol() {
    let err = compile(&b::call("core.math.pow", [b::num(2.0)])).unwrap_err();
    assert_eq!(err, CompileError::UnknownSymbol { symbol: id("core.math.pow") });
    assert_eq!(err.code(), "E2001");
}

#[test]
fn test_unknown_symbol_deep_in_the_tree() {
    let expr = b::atoms(b::and([b::bool(true), b::call("nope", [])]));
    assert_eq!(
        compile(&expr).unwrap_err(),
        CompileError::UnknownSymbol { symbol: id("nope") }
    );
}

#[test]
fn test_missing_required_argument() {
    let expr = b::apply(s::FILTER_WITHIN, [("0", b::all()), ("target", b::all())]);
    assert_eq!(
        compile(&expr).unwrap_err(),
        CompileError::MissingArgument {
            symbol: id(s::FILTER_WITHIN),
            key: Name::intern("max-radius"),
        }
    );
}

#[test]
fn test_unknown_named_argument() {
    let expr = b::apply(c::NOT, [("0", b::bool(true)), ("negate", b::bool(true))]);
    let err = compile(&expr).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnknownArgument {
            symbol: id(c::NOT),
            key: ArgKey::Named(Name::intern("negate")),
        }
    );
    assert_eq!(err.code(), "E2003");
}

#[test]
fn test_positional_argument_beyond_the_signature() {
    let expr = b::call(c::NOT, [b::bool(true), b::bool(false)]);
    assert_eq!(
        compile(&expr).unwrap_err(),
        CompileError::UnknownArgument {
            symbol: id(c::NOT),
            key: ArgKey::Positional(1),
        }
    );
}

#[test]
fn test_named_argument_in_a_list() {
    let expr = b::apply(c::AND, [("first", b::bool(true))]);
    assert!(matches!(
        compile(&expr).unwrap_err(),
        CompileError::UnknownArgument { .. }
    ));
}

#[test]
fn test_duplicate_argument() {
    let expr = b::apply(c::NOT, [("0", b::bool(true)), ("0", b::bool(false))]);
    assert_eq!(
        compile(&expr).unwrap_err(),
        CompileError::DuplicateArgument {
            symbol: id(c::NOT),
            key: Name::intern("0"),
        }
    );
}

#[test]
fn test_type_mismatch() {
    let err = compile(&b::not(b::num(1.0))).unwrap_err();
    assert_eq!(
        err,
        CompileError::TypeMismatch {
            symbol: id(c::NOT),
            key: ArgKey::Positional(0),
            expected: Type::Bool,
            found: Type::Num,
        }
    );
    assert_eq!(err.code(), "E2005");
}

#[test]
fn test_type_mismatch_of_a_nested_result() {
    let expr = b::atoms(b::prop(s::ATOM_NAME));
    assert!(matches!(
        compile(&expr).unwrap_err(),
        CompileError::TypeMismatch { found: Type::Str, .. }
    ));
}

#[test]
fn test_string_literal_where_a_number_is_expected() {
    let expr = b::call(c::ADD, [b::num(1.0), b::str("2")]);
    assert!(matches!(
        compile(&expr).unwrap_err(),
        CompileError::TypeMismatch { expected: Type::Num, found: Type::Str, .. }
    ));
}

#[test]
fn test_empty_list_below_minimum() {
    let err = compile(&b::and([])).unwrap_err();
    assert_eq!(
        err,
        CompileError::TooFewArguments {
            symbol: id(c::AND),
            min: 1,
            found: 0,
        }
    );
    assert_eq!(err.code(), "E2006");
}

#[test]
fn test_missing_implementation() {
    let runtime = RuntimeTable::new();
    let compiler = Compiler::new(mq_ir::standard(), &runtime);
    assert_eq!(
        compiler.compile(&b::all()).unwrap_err(),
        CompileError::MissingImplementation {
            symbol: id(s::GENERATOR_ALL)
        }
    );
}

#[test]
fn test_non_finite_literal() {
    let err = compile(&b::call(c::ABS, [b::num(f64::INFINITY)])).unwrap_err();
    assert_eq!(err.code(), "E2009");
    assert_eq!(err.symbol(), Some(id(c::ABS)));
    assert!(compile(&b::num(f64::NAN)).is_err());
}

#[test]
fn test_element_symbol_literals_are_upper_cased() {
    let expr = b::call(s::TYPE_RING_FINGERPRINT, [b::str("c"), b::str("n")]);
    assert!(compile(&expr).is_ok());
    let value = run(&expr, &peptide()).unwrap();
    assert_eq!(value.as_str().unwrap().as_str(), "C-N");
}

#[test]
fn test_defaults_are_filled_in() {
    // min-radius and invert come from their defaults.
    let expr = b::apply(
        s::FILTER_WITHIN,
        [("0", b::all()), ("target", b::all()), ("max-radius", b::num(1.0))],
    );
    let selection = run(&expr, &peptide()).unwrap().into_selection().unwrap();
    assert_eq!(selection.len(), 1);
}

#[test]
fn test_compiled_expressions_are_reusable() {
    let compiled = compile(&b::call(c::ADD, [b::num(1.0), b::num(2.0)])).unwrap();
    let model = peptide();
    let config = crate::QueryConfig::default();
    for _ in 0..3 {
        let mut env = crate::Environment::for_model(&model, &config);
        assert_eq!(compiled.eval(&mut env).unwrap().as_num().unwrap(), 3.0);
    }
}

#[test]
fn test_deeply_nested_expressions_compile() {
    let mut expr = b::bool(true);
    for _ in 0..2_000 {
        expr = b::not(expr);
    }
    let compiled = compile(&expr).unwrap();
    let model = peptide();
    let config = crate::QueryConfig::default();
    let mut env = crate::Environment::for_model(&model, &config);
    assert!(compiled.eval_bool(&mut env).unwrap());
}

// Custom tables

fn custom() -> (SymbolTable, RuntimeTable) {
    let mut symbols = SymbolTable::new();
    symbols
        .register(
            "test",
            "pair",
            Arguments::List(ListArguments {
                ty: Type::Num,
                min: 1,
                max: Some(2),
            }),
            Type::Num,
            "",
        )
        .unwrap();
    symbols
        .register(
            "test",
            "shade",
            Arguments::dictionary([("0", Argument::new(secondary_structure_type()))]),
            Type::Str,
            "",
        )
        .unwrap();
    let mut runtime = RuntimeTable::new();
    runtime.register(id("test.pair"), Implementation::Math(MathOp::Add));
    runtime.register(id("test.shade"), Implementation::Text(TextOp::ToUpperCase));
    (symbols, runtime)
}

#[test]
fn test_list_above_maximum() {
    let (symbols, runtime) = custom();
    let compiler = Compiler::new(&symbols, &runtime);
    let ok = b::call("test.pair", [b::num(1.0), b::num(2.0)]);
    assert!(compiler.compile(&ok).is_ok());
    let too_many = b::call("test.pair", [b::num(1.0), b::num(2.0), b::num(3.0)]);
    let err = compiler.compile(&too_many).unwrap_err();
    assert_eq!(
        err,
        CompileError::TooManyArguments {
            symbol: id("test.pair"),
            max: 2,
            found: 3,
        }
    );
    assert_eq!(err.code(), "E2007");
}

#[test]
fn test_enumeration_literals() {
    let (symbols, runtime) = custom();
    let compiler = Compiler::new(&symbols, &runtime);
    let helix = compiler.compile(&b::call("test.shade", [b::str("helix")])).unwrap();
    assert_eq!(helix.ty(), &Type::Str);

    let err = compiler
        .compile(&b::call("test.shade", [b::str("coil")]))
        .unwrap_err();
    assert!(matches!(err, CompileError::InvalidLiteral { .. }));
    assert_eq!(err.code(), "E2009");
}
