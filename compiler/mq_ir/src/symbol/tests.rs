use super::*;

#[test]
fn test_symbol_id_joins_namespace() {
    assert_eq!(SymbolId::of("core.logic", "and"), SymbolId::new("core.logic.and"));
    assert_eq!(SymbolId::of("", "and").as_str(), "and");
}

#[test]
fn test_argument_builders() {
    let arg = Argument::new(Type::Num).with_default(Literal::Num(1.0));
    assert!(arg.is_optional);
    assert_eq!(arg.default_value, Some(Literal::Num(1.0)));

    let rest = Argument::new(Type::Str).rest().describe("fingerprints");
    assert!(rest.is_rest);
    assert!(!rest.is_optional);
    assert_eq!(rest.description, Some("fingerprints"));
}

#[test]
fn test_dictionary_param_lookup() {
    let args = Arguments::dictionary([
        ("0", Argument::new(Type::AtomSelection)),
        ("radius", Argument::new(Type::Num)),
    ]);
    let (index, arg) = args.param(Name::intern("radius")).unwrap_or_else(|| panic!("radius"));
    assert_eq!(index, 1);
    assert_eq!(arg.ty, Type::Num);
    assert!(args.param(Name::intern("missing")).is_none());
    assert!(Arguments::list(Type::Num).param(Name::intern("0")).is_none());
}

#[test]
fn test_symbol_apply_builds_tree() {
    let symbol = Symbol {
        id: SymbolId::new("core.logic.not"),
        namespace: Name::intern("core.logic"),
        name: Name::intern("not"),
        args: Arguments::dictionary([("0", Argument::new(Type::Bool))]),
        return_type: Type::Bool,
        description: None,
    };
    let expr = symbol.call([Expression::bool(true)]);
    assert_eq!(expr.to_string(), "(core.logic.not true)");
}
