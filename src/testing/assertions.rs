//! Assertion functions for populated documents.

use crate::document::ParameterDocument;
use crate::value::Value;

/// Assert that output `name` holds exactly `expected`, in order.
///
/// # Panics
///
/// Panics if the output is not declared or its values differ.
///
/// # Example
///
/// ```
/// use paramio::testing::{DocumentBuilder, assert_output_values};
///
/// let doc = DocumentBuilder::new().scalar("a", 1).output_with("c", [5]).build();
/// assert_output_values(&doc, "c", [5]);
/// ```
pub fn assert_output_values<I, V>(doc: &ParameterDocument, name: &str, expected: I)
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let expected: Vec<Value> = expected.into_iter().map(Into::into).collect();
    let Some(output) = doc.output(name) else {
        let declared: Vec<&str> = doc.output_names().collect();
        panic!("Output '{name}' is not declared\n  Declared outputs: {declared:?}");
    };
    assert_eq!(
        output.values.len(),
        expected.len(),
        "Output '{name}' length mismatch:\n  Expected: {expected:?}\n  Actual: {:?}",
        output.values
    );
    for (i, (a, e)) in output.values.iter().zip(&expected).enumerate() {
        assert_eq!(
            a, e,
            "Output '{name}' mismatch at row {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {:?}",
            output.values
        );
    }
}

/// Assert that every output column is empty.
///
/// # Panics
///
/// Panics if any output carries a value.
pub fn assert_outputs_empty(doc: &ParameterDocument) {
    for output in &doc.output_params {
        assert!(
            output.values.is_empty(),
            "Output '{}' should be empty but holds {:?}",
            output.name,
            output.values
        );
    }
}

/// Assert that `actual` carries the same inputs and extra keys as `original`.
///
/// # Panics
///
/// Panics if input parameters, their order, or extra keys differ.
pub fn assert_inputs_preserved(original: &ParameterDocument, actual: &ParameterDocument) {
    assert_eq!(
        actual.input_params, original.input_params,
        "Input parameters changed"
    );
    assert_eq!(actual.extra, original.extra, "Extra document keys changed");
    let original_outputs: Vec<&str> = original.output_names().collect();
    let actual_outputs: Vec<&str> = actual.output_names().collect();
    assert_eq!(
        actual_outputs, original_outputs,
        "Output declarations changed"
    );
}
