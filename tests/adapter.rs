//! Tests for running computations over documents.

use anyhow::Result;
use paramio::testing::*;
use paramio::*;

#[test]
fn scalar_round_trip() -> Result<()> {
    let doc = scalar_pair();
    let out = Adapter::default().run(&doc, &builtins::add())?;
    assert_output_values(&out, "c", [5]);
    assert_inputs_preserved(&doc, &out);
    Ok(())
}

#[test]
fn vectorized_round_trip() -> Result<()> {
    let doc = vectorized_pair();
    let out = Adapter::default().run(&doc, &builtins::add())?;
    assert_output_values(&out, "c", [11, 22, 33]);
    assert_inputs_preserved(&doc, &out);
    Ok(())
}

#[test]
fn multi_output_scalar() -> Result<()> {
    let out = Adapter::default().run(&scalar_two_outputs(), &builtins::add_mul())?;
    assert_output_values(&out, "sum", [5]);
    assert_output_values(&out, "product", [6]);
    Ok(())
}

#[test]
fn multi_output_vectorized() -> Result<()> {
    let out = Adapter::default().run(&vectorized_two_outputs(), &builtins::add_sub())?;
    assert_output_values(&out, "sum", [6, 12]);
    assert_output_values(&out, "difference", [4, 8]);
    Ok(())
}

#[test]
fn closure_returning_a_tuple() -> Result<()> {
    let doc = vectorized_two_outputs();
    let f = computation(["a", "b"], |args| {
        let (a, b) = (args.number("a")?, args.number("b")?);
        Ok((a + b, a - b))
    });
    let out = Adapter::default().run(&doc, &f)?;
    assert_output_values(&out, "sum", [6.0, 12.0]);
    assert_output_values(&out, "difference", [4.0, 8.0]);
    Ok(())
}

#[test]
fn mode_is_decided_by_the_first_parameter_only() -> Result<()> {
    let doc = DocumentBuilder::new()
        .scalar("a", 2)
        .vectorized("b", [3, 4, 5])
        .output("c")
        .build();
    assert_eq!(detect_mode(&doc)?, Mode::Scalar);

    let recorder = testing::Recording::new(builtins::add());
    let out = Adapter::default().run(&doc, &recorder)?;
    assert_eq!(recorder.calls(), vec![vec![Value::from(2), Value::from(3)]]);
    assert_output_values(&out, "c", [5]);
    Ok(())
}

#[test]
fn vectorized_mode_counts_rows_of_the_first_parameter() -> Result<()> {
    assert_eq!(detect_mode(&vectorized_pair())?, Mode::Vectorized { rows: 3 });
    assert_eq!(detect_mode(&scalar_pair())?, Mode::Scalar);
    Ok(())
}

#[test]
fn rows_are_invoked_in_order() -> Result<()> {
    let doc = DocumentBuilder::new()
        .generated("a", 5, |i| i as i64)
        .generated("b", 5, |i| (i * 10) as i64)
        .output("c")
        .build();
    let recorder = Recording::new(builtins::add());
    let out = Adapter::default().run(&doc, &recorder)?;

    let firsts: Vec<Value> = recorder.calls().into_iter().map(|row| row[0].clone()).collect();
    assert_eq!(firsts, (0..5).map(Value::from).collect::<Vec<_>>());
    assert_output_values(&out, "c", [0, 11, 22, 33, 44]);
    Ok(())
}

#[test]
fn arguments_follow_the_signature_not_the_document_order() -> Result<()> {
    let doc = DocumentBuilder::new()
        .vectorized("b", [1, 2])
        .vectorized("a", [10, 20])
        .output("c")
        .build();
    let sub = computation(["a", "b"], |args| Ok(args.integer("a")? - args.integer("b")?));
    let recorder = Recording::new(sub);
    let out = Adapter::default().run(&doc, &recorder)?;
    assert_eq!(recorder.calls()[0], vec![Value::from(10), Value::from(1)]);
    assert_output_values(&out, "c", [9, 18]);
    Ok(())
}

#[test]
fn arity_mismatch_fails_closed() {
    let doc = scalar_two_outputs();
    let err = Adapter::default().run(&doc, &builtins::add()).unwrap_err();
    match err {
        AdapterError::ArityMismatch {
            row,
            expected,
            actual,
        } => {
            assert_eq!(row, 0);
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn arity_mismatch_on_a_later_row_discards_earlier_rows() {
    let doc = DocumentBuilder::new()
        .vectorized("a", [1, 2, 3])
        .output("x")
        .output("y")
        .build();
    let f = computation(["a"], |args| {
        let a = args.integer("a")?;
        Ok(if a == 2 { vec![Value::from(a)] } else { vec![Value::from(a), Value::from(a)] })
    });
    let recorder = Recording::new(f);
    let err = Adapter::default().run(&doc, &recorder).unwrap_err();
    assert!(matches!(err, AdapterError::ArityMismatch { row: 1, .. }));
    assert_eq!(recorder.call_count(), 2, "no row after the failing one is invoked");
}

#[test]
fn computation_errors_carry_the_row() {
    let doc = vectorized_pair();
    let failing = FailingAt::new(["a", "b"], 1, 2);
    let err = Adapter::default().run(&doc, &failing).unwrap_err();
    assert_eq!(err.kind(), "computation");
    match err {
        AdapterError::Computation { row, source } => {
            assert_eq!(row, 2);
            assert!(source.to_string().contains("deliberate failure"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn type_errors_inside_the_computation_abort_the_run() {
    let doc = DocumentBuilder::new()
        .scalar("a", "text")
        .scalar("b", 1)
        .output("c")
        .build();
    let err = Adapter::default().run(&doc, &builtins::add()).unwrap_err();
    assert!(matches!(err, AdapterError::Computation { row: 0, .. }));
}

#[test]
fn signature_mismatch_is_reported_before_any_invocation() {
    let doc = DocumentBuilder::new()
        .scalar("a", 1)
        .scalar("z", 2)
        .output("c")
        .build();
    let recorder = Recording::new(builtins::add());
    let err = Adapter::default().run(&doc, &recorder).unwrap_err();
    match err {
        AdapterError::SignatureMismatch {
            missing,
            undeclared,
        } => {
            assert_eq!(missing, vec!["b".to_string()]);
            assert_eq!(undeclared, vec!["z".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(recorder.call_count(), 0);
}

#[test]
fn inconsistent_row_lengths_fail_before_any_invocation() {
    let doc = DocumentBuilder::new()
        .vectorized("a", [1, 2, 3])
        .vectorized("b", [10, 20])
        .output("c")
        .build();
    let recorder = Recording::new(builtins::add());
    let err = Adapter::default().run(&doc, &recorder).unwrap_err();
    match err {
        AdapterError::Malformed(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field.as_deref(), Some("b"));
            assert_eq!(errors[0].code.as_deref(), Some("row_length"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(recorder.call_count(), 0);
}

#[test]
fn lenient_row_lengths_fail_at_the_first_missing_row() {
    let doc = DocumentBuilder::new()
        .vectorized("a", [1, 2, 3])
        .vectorized("b", [10, 20])
        .output("c")
        .build();
    let recorder = Recording::new(builtins::add());
    let err = Adapter::new(AdapterConfig::lenient())
        .run(&doc, &recorder)
        .unwrap_err();
    assert!(matches!(err, AdapterError::Malformed(_)));
    assert_eq!(recorder.call_count(), 2);
}

#[test]
fn longer_later_columns_are_also_malformed_in_vectorized_mode() {
    let doc = DocumentBuilder::new()
        .vectorized("a", [1, 2])
        .vectorized("b", [10, 20, 30])
        .output("c")
        .build();
    let err = Adapter::default().run(&doc, &builtins::add()).unwrap_err();
    assert_eq!(err.kind(), "malformed");
}

#[test]
fn empty_documents_are_malformed() {
    let doc = ParameterDocument::new(vec![], vec![OutputParameter::empty("c")]);
    assert!(matches!(detect_mode(&doc), Err(AdapterError::Malformed(_))));
    let err = Adapter::default().run(&doc, &builtins::add()).unwrap_err();
    assert_eq!(err.kind(), "malformed");

    let doc = DocumentBuilder::new()
        .vectorized("a", Vec::<i64>::new())
        .scalar("b", 1)
        .output("c")
        .build();
    let err = Adapter::default().run(&doc, &builtins::add()).unwrap_err();
    assert_eq!(err.kind(), "malformed");
}

#[test]
fn previous_outputs_are_replaced() -> Result<()> {
    let doc = DocumentBuilder::new()
        .vectorized("a", [1, 2])
        .vectorized("b", [1, 1])
        .output_with("c", [100, 200, 300])
        .build();
    let out = Adapter::default().run(&doc, &builtins::add())?;
    assert_output_values(&out, "c", [2, 3]);
    Ok(())
}

#[test]
fn idempotent_for_deterministic_computations() -> Result<()> {
    let adapter = Adapter::default();
    let doc = vectorized_two_outputs();
    let mut first = adapter.run(&doc, &builtins::add_sub())?;
    first.reset_outputs();
    assert_outputs_empty(&first);
    let second = adapter.run(&first, &builtins::add_sub())?;
    let third = adapter.run(&doc, &builtins::add_sub())?;
    assert_eq!(second, third);
    Ok(())
}

#[test]
fn extra_keys_survive_a_run() -> Result<()> {
    let doc = DocumentBuilder::new()
        .extra("cardName", serde_json::json!("Auto"))
        .scalar("a", 1)
        .scalar("b", 1)
        .output("c")
        .build();
    let out = Adapter::default().run(&doc, &builtins::add())?;
    assert_inputs_preserved(&doc, &out);
    assert_eq!(out.extra["cardName"], "Auto");
    Ok(())
}

#[test]
fn non_numeric_values_pass_through() -> Result<()> {
    let doc = DocumentBuilder::new()
        .vectorized("name", ["x", "y"])
        .vectorized("flag", [true, false])
        .output("label")
        .output("missing")
        .build();
    let f = computation(["name", "flag"], |args| {
        let label = format!("{}:{}", args.string("name")?, args.boolean("flag")?);
        Ok((label, Value::Null))
    });
    let out = Adapter::default().run(&doc, &f)?;
    assert_output_values(&out, "label", ["x:true", "y:false"]);
    assert_output_values(&out, "missing", [Value::Null, Value::Null]);
    Ok(())
}

#[test]
fn report_describes_the_run() -> Result<()> {
    let (_, report) = Adapter::default().run_with_report(&vectorized_pair(), &builtins::add())?;
    assert_eq!(report.mode, Mode::Vectorized { rows: 3 });
    assert_eq!(report.invocations, 3);
    assert_eq!(report.inputs, 2);
    assert_eq!(report.outputs, 1);
    let json = report.to_json();
    assert_eq!(json["mode"]["kind"], "vectorized");
    assert_eq!(json["invocations"], 3);
    Ok(())
}

#[test]
fn integer_overflow_falls_back_to_float() -> Result<()> {
    let doc = DocumentBuilder::new()
        .scalar("a", i64::MAX)
        .scalar("b", 1)
        .output("c")
        .build();
    let out = Adapter::default().run(&doc, &builtins::add())?;
    assert!(out.output_params[0].values[0].as_i64().is_none());
    assert!(out.output_params[0].values[0].as_f64().is_some());
    Ok(())
}

#[test]
fn configs_are_usable_in_const_context() {
    const STRICT: AdapterConfig = AdapterConfig::strict();
    const LENIENT: AdapterConfig = AdapterConfig::lenient();
    assert_eq!(STRICT, AdapterConfig::default());
    assert!(STRICT.verify_row_lengths);
    assert!(!LENIENT.verify_row_lengths);
}
