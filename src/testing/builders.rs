//! Fluent construction of parameter documents.

use crate::document::{InputParameter, OutputParameter, ParameterDocument};
use crate::value::Value;

/// A fluent builder for parameter documents.
///
/// Inputs and outputs keep the order in which they are added.
///
/// # Example
///
/// ```
/// use paramio::testing::DocumentBuilder;
///
/// let doc = DocumentBuilder::new()
///     .scalar("a", 2)
///     .scalar("b", 3)
///     .output("sum")
///     .output("product")
///     .build();
///
/// assert_eq!(doc.input_params.len(), 2);
/// assert_eq!(doc.output_params.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: ParameterDocument,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-valued input.
    #[must_use]
    pub fn scalar<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.doc.input_params.push(InputParameter::scalar(name, value));
        self
    }

    /// Add an input with one value per row.
    #[must_use]
    pub fn vectorized<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.doc.input_params.push(InputParameter::new(name, values));
        self
    }

    /// Add an input whose values are `generator(row)` for `rows` rows.
    #[must_use]
    pub fn generated<V, F>(self, name: &str, rows: usize, generator: F) -> Self
    where
        V: Into<Value>,
        F: Fn(usize) -> V,
    {
        self.vectorized(name, (0..rows).map(generator))
    }

    /// Declare an empty output.
    #[must_use]
    pub fn output(mut self, name: &str) -> Self {
        self.doc.output_params.push(OutputParameter::empty(name));
        self
    }

    /// Declare an output that already carries values, as a previous run
    /// would have left it.
    #[must_use]
    pub fn output_with<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.doc.output_params.push(OutputParameter {
            name: name.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add an unrecognised top-level key.
    #[must_use]
    pub fn extra(mut self, key: &str, value: serde_json::Value) -> Self {
        self.doc.extra.insert(key.to_string(), value);
        self
    }

    #[must_use]
    pub fn build(self) -> ParameterDocument {
        self.doc
    }
}
