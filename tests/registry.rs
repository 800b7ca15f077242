//! Tests for the computation registry and the stock computations.

use anyhow::Result;
use paramio::testing::*;
use paramio::*;

#[test]
fn builtins_are_registered_by_name() {
    let registry = ComputationRegistry::with_builtins();
    assert_eq!(registry.names(), vec!["add", "add_mul", "add_sub"]);
    assert!(registry.contains("add"));
    assert_eq!(registry.len(), 3);
}

#[test]
fn unknown_names_list_the_known_ones() {
    let registry = ComputationRegistry::with_builtins();
    let err = registry.require("mul").err().expect("mul is not registered");
    let msg = err.to_string();
    assert!(msg.contains("unknown computation 'mul'"));
    assert!(msg.contains("add, add_mul, add_sub"));
}

#[test]
fn registering_a_name_twice_replaces_it() -> Result<()> {
    let mut registry = ComputationRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.register("f", builtins::add()).is_none());
    let replaced = registry.register("f", computation(["a", "b"], |_| Ok(0)));
    assert!(replaced.is_some());

    let f = registry.require("f")?;
    let out = Adapter::default().run(&scalar_pair(), f.as_ref())?;
    assert_output_values(&out, "c", [0]);
    Ok(())
}

#[test]
fn builtins_mix_integers_and_floats() -> Result<()> {
    let doc = DocumentBuilder::new()
        .vectorized("a", [Value::from(1), Value::from(1.5)])
        .vectorized("b", [Value::from(2), Value::from(2)])
        .output("sum")
        .output("product")
        .build();
    let out = Adapter::default().run(&doc, &builtins::add_mul())?;
    assert_output_values(&out, "sum", [Value::from(3), Value::from(3.5)]);
    assert_output_values(&out, "product", [Value::from(2), Value::from(3.0)]);
    Ok(())
}

#[test]
fn registry_debug_lists_names() {
    let registry = ComputationRegistry::with_builtins();
    let shown = format!("{registry:?}");
    assert!(shown.contains("add_sub"));
}

#[test]
fn float_overflow_fails_the_row() {
    let doc = DocumentBuilder::new()
        .scalar("a", 1e308)
        .scalar("b", 1e308)
        .output("c")
        .build();
    let err = Adapter::default().run(&doc, &builtins::add()).unwrap_err();
    match err {
        AdapterError::Computation { row, source } => {
            assert_eq!(row, 0);
            assert!(source.to_string().contains("no JSON form"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn closures_returning_non_finite_floats_fail() {
    let doc = vectorized_pair();
    let ratio = computation(["a", "b"], |args| {
        let a = args.number("a")?;
        Ok((a, a / (args.number("b")? - 20.0)))
    });
    let err = Adapter::default().run(&doc, &ratio).unwrap_err();
    assert!(matches!(err, AdapterError::Computation { row: 1, .. }));
}
