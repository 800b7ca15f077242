//! Signature descriptors and argument binding.
//!
//! A computation declares its parameters as an ordered list of names. Before
//! any row is invoked, the adapter resolves each declared name to the input
//! column carrying it ([`Signature::bind`]). Per-row arguments are then built
//! positionally from that resolution, so the computation receives its values
//! in declaration order whatever order the document lists its inputs in.

use crate::adapter::Mode;
use crate::document::ParameterDocument;
use crate::error::AdapterError;
use crate::validation::ValidationError;
use crate::value::Value;

/// Ordered parameter names of a computation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<String>,
}

impl Signature {
    /// Build a signature from parameter names. A repeated name keeps only its
    /// first position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut params: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !params.contains(&name) {
                params.push(name);
            }
        }
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Position of `name` in the declared order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p == name)
    }

    /// Resolve every declared parameter to an input column of `doc`.
    ///
    /// # Errors
    /// [`AdapterError::SignatureMismatch`] when a declared parameter has no
    /// input column, or an input column is not a declared parameter.
    pub fn bind(&self, doc: &ParameterDocument) -> Result<Binding, AdapterError> {
        let mut columns = Vec::with_capacity(self.params.len());
        let mut missing = Vec::new();
        for name in &self.params {
            match doc.input_params.iter().position(|p| &p.name == name) {
                Some(col) => columns.push(col),
                None => missing.push(name.clone()),
            }
        }
        let undeclared: Vec<String> = doc
            .input_names()
            .filter(|name| self.position(name).is_none())
            .map(str::to_owned)
            .collect();

        if !missing.is_empty() || !undeclared.is_empty() {
            return Err(AdapterError::SignatureMismatch {
                missing,
                undeclared,
            });
        }
        Ok(Binding { columns })
    }
}

/// Column index of each declared parameter, in declared order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    columns: Vec<usize>,
}

impl Binding {
    #[must_use]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Positional arguments for `row`.
    ///
    /// Scalar documents read the first value of every column. Vectorized
    /// documents read value `row` of every column; a column too short for
    /// `row` is reported as malformed.
    pub fn row_values(
        &self,
        doc: &ParameterDocument,
        mode: Mode,
        row: usize,
    ) -> Result<Vec<Value>, AdapterError> {
        let index = match mode {
            Mode::Scalar => 0,
            Mode::Vectorized { .. } => row,
        };
        self.columns
            .iter()
            .map(|&col| {
                let param = &doc.input_params[col];
                param.values.get(index).cloned().ok_or_else(|| {
                    AdapterError::Malformed(vec![
                        ValidationError::field(
                            &param.name,
                            format!("has no value for row {row} of {}", mode.rows()),
                        )
                        .with_code("row_length"),
                    ])
                })
            })
            .collect()
    }
}
