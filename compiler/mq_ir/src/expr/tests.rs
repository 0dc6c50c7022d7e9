use super::*;

#[test]
fn test_arg_key_parse() {
    assert_eq!(ArgKey::parse("0"), ArgKey::Positional(0));
    assert_eq!(ArgKey::parse("12"), ArgKey::Positional(12));
    assert_eq!(ArgKey::parse("atom-test"), ArgKey::named("atom-test"));
    assert_eq!(ArgKey::parse("+1"), ArgKey::named("+1"));
    assert_eq!(ArgKey::parse("-1"), ArgKey::named("-1"));
}

#[test]
fn test_literal_types() {
    assert_eq!(Literal::Bool(true).ty(), Type::Bool);
    assert_eq!(Literal::Num(1.5).ty(), Type::Num);
    assert_eq!(Literal::str("CA").ty(), Type::Str);
}

#[test]
fn test_call_assigns_positions() {
    let id = SymbolId::new("core.rel.eq");
    let expr = Expression::call(id, [Expression::num(1.0), Expression::num(2.0)]);
    let Expression::Apply(apply) = expr else {
        panic!("expected apply");
    };
    assert_eq!(apply.args[0].0, ArgKey::Positional(0));
    assert_eq!(apply.args[1].0, ArgKey::Positional(1));
}

#[test]
fn test_display_and_node_count() {
    let expr = Expression::apply(
        SymbolId::new("struct.generator.atomGroups"),
        [(
            ArgKey::named("atom-test"),
            Expression::call(SymbolId::new("core.logic.not"), [Expression::bool(false)]),
        )],
    );
    assert_eq!(
        expr.to_string(),
        "(struct.generator.atomGroups :atom-test (core.logic.not false))"
    );
    assert_eq!(expr.node_count(), 3);
}

#[cfg(feature = "serde")]
mod json {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn eq_name() -> Expression {
        Expression::call(
            SymbolId::new("core.rel.eq"),
            [
                Expression::call(
                    SymbolId::new("struct.atomProperty.macromolecular.atomName"),
                    std::iter::empty(),
                ),
                Expression::str("CA"),
            ],
        )
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(eq_name()).unwrap();
        assert_eq!(
            value,
            json!({
                "symbol": "core.rel.eq",
                "args": {
                    "0": { "symbol": "struct.atomProperty.macromolecular.atomName" },
                    "1": { "value": "CA", "type": "string" }
                }
            })
        );
    }

    #[test]
    fn test_json_round_trip_keeps_positional_and_named_keys() {
        let expr = Expression::apply(
            SymbolId::new("struct.filter.within"),
            [
                (ArgKey::Positional(0), eq_name()),
                (ArgKey::Positional(1), Expression::bool(false)),
                (ArgKey::named("max-radius"), Expression::num(4.5)),
            ],
        );
        let text = serde_json::to_string(&expr).unwrap();
        let back: Expression = serde_json::from_str(&text).unwrap();
        assert_eq!(back, expr);
    }

    #[test]
    fn test_json_positional_keys_sort_numerically() {
        let expr: Expression = serde_json::from_value(json!({
            "symbol": "core.logic.and",
            "args": {
                "10": { "value": true, "type": "bool" },
                "2": { "value": 3, "type": "number" },
                "atom-test": { "value": "x", "type": "string" }
            }
        }))
        .unwrap();
        let Expression::Apply(apply) = expr else {
            panic!("expected apply");
        };
        let keys: Vec<ArgKey> = apply.args.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                ArgKey::Positional(2),
                ArgKey::Positional(10),
                ArgKey::named("atom-test"),
            ]
        );
        assert_eq!(apply.args[0].1, Expression::num(3.0));
    }

    #[test]
    fn test_json_literals() {
        let inf: Expression =
            serde_json::from_value(json!({ "value": "inf", "type": "number" })).unwrap();
        assert_eq!(inf, Expression::num(f64::INFINITY));

        let mismatched =
            serde_json::from_value::<Expression>(json!({ "value": true, "type": "number" }));
        assert!(mismatched.is_err());
        let not_a_number =
            serde_json::from_value::<Expression>(json!({ "value": "CA", "type": "number" }));
        assert!(not_a_number.is_err());
    }
}
