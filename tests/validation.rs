//! Tests for document validation.

use paramio::testing::DocumentBuilder;
use paramio::validation::*;
use paramio::{AdapterError, InputParameter, OutputParameter, ParameterDocument};

fn codes(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().filter_map(|e| e.code.as_deref()).collect()
}

#[test]
fn well_formed_documents_pass() {
    let doc = DocumentBuilder::new()
        .vectorized("a", [1, 2])
        .vectorized("b", [3, 4])
        .output("c")
        .build();
    assert!(doc.validate().is_ok());
}

#[test]
fn every_problem_is_reported() {
    let doc = ParameterDocument::new(
        vec![
            InputParameter::new("a", vec![1.into(), 2.into()]),
            InputParameter::new("a", vec![1.into(), 2.into()]),
            InputParameter::new("b", vec![]),
        ],
        vec![OutputParameter::empty("c"), OutputParameter::empty("c")],
    );
    let errors = doc.validate().unwrap_err();
    let codes = codes(&errors);
    assert!(codes.contains(&"empty_values"));
    assert!(codes.contains(&"duplicate_input"));
    assert!(codes.contains(&"duplicate_output"));
    assert!(codes.contains(&"row_length"));
}

#[test]
fn no_inputs_is_an_error() {
    let doc = ParameterDocument::new(vec![], vec![OutputParameter::empty("c")]);
    let errors = inputs_present(&doc).unwrap_err();
    assert_eq!(codes(&errors), vec!["no_inputs"]);
}

#[test]
fn scalar_documents_skip_row_length_checks() {
    let doc = DocumentBuilder::new()
        .scalar("a", 1)
        .vectorized("b", [1, 2, 3])
        .output("c")
        .build();
    assert!(consistent_row_lengths(&doc).is_ok());
}

#[test]
fn row_length_errors_name_the_offending_parameter() {
    let doc = DocumentBuilder::new()
        .vectorized("a", [1, 2, 3])
        .scalar("b", 1)
        .vectorized("c", [1, 2, 3])
        .output("out")
        .build();
    let errors = consistent_row_lengths(&doc).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field.as_deref(), Some("b"));
    assert!(errors[0].message.contains("row count to 3"));
}

#[test]
fn display_includes_field_and_code() {
    let e = ValidationError::field("a", "input parameter has no values").with_code("empty_values");
    assert_eq!(e.to_string(), "[a] input parameter has no values (code: empty_values)");
    assert_eq!(ValidationError::new("plain").to_string(), "plain");
}

#[test]
fn malformed_error_lists_all_messages() {
    let err = AdapterError::from(vec![
        ValidationError::field("a", "first"),
        ValidationError::field("b", "second"),
    ]);
    assert_eq!(err.to_string(), "malformed document: [a] first, [b] second");
}

#[test]
fn combine_validations_merges_errors() {
    let merged = combine_validations(vec![
        Ok(()),
        Err(vec![ValidationError::new("x")]),
        Err(vec![ValidationError::new("y"), ValidationError::new("z")]),
    ]);
    assert_eq!(merged.unwrap_err().len(), 3);
    assert!(combine_validations(vec![Ok(()), Ok(())]).is_ok());
}
