//! The parameter document: named input columns and named output columns.
//!
//! On the wire a document is a JSON object:
//!
//! ```json
//! {
//!   "inputParams":  [{ "name": "a", "values": [1, 2, 3] }, { "name": "b", "values": [10, 20, 30] }],
//!   "outputParams": [{ "name": "c" }]
//! }
//! ```
//!
//! `outputParams[*].values` may be absent before a run. Any other top-level
//! keys are kept in [`ParameterDocument::extra`] and written back untouched.

use crate::value::Value;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A named input column. One value is a scalar parameter, more than one is a
/// vectorized parameter with one value per row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputParameter {
    pub name: String,
    pub values: Vec<Value>,
}

impl InputParameter {
    pub fn new<S: Into<String>>(name: S, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Shorthand for a single-valued input.
    pub fn scalar<S: Into<String>, V: Into<Value>>(name: S, value: V) -> Self {
        Self::new(name, vec![value.into()])
    }
}

/// A named output column, populated by the adapter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputParameter {
    pub name: String,
    #[serde(default)]
    pub values: Vec<Value>,
}

impl OutputParameter {
    /// An output with no values yet.
    pub fn empty<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }
}

const INPUTS: &str = "inputParams";
const OUTPUTS: &str = "outputParams";

/// Input and output parameter declarations, in declaration order.
///
/// A parsed document remembers the order of its top-level keys and writes
/// them back in that order. Documents built in code write `inputParams`,
/// then `outputParams`, then any extra keys.
#[derive(Clone, Debug, Default)]
pub struct ParameterDocument {
    pub input_params: Vec<InputParameter>,
    pub output_params: Vec<OutputParameter>,
    /// Unrecognised top-level keys.
    pub extra: Map<String, JsonValue>,
    /// Top-level keys as they were read.
    layout: Vec<String>,
}

/// Key order is presentation only and does not take part in equality.
impl PartialEq for ParameterDocument {
    fn eq(&self, other: &Self) -> bool {
        self.input_params == other.input_params
            && self.output_params == other.output_params
            && self.extra == other.extra
    }
}

impl Serialize for ParameterDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.extra.len() + 2))?;
        for key in self.key_order() {
            match key {
                INPUTS => map.serialize_entry(INPUTS, &self.input_params)?,
                OUTPUTS => map.serialize_entry(OUTPUTS, &self.output_params)?,
                other => {
                    if let Some(value) = self.extra.get(other) {
                        map.serialize_entry(other, value)?;
                    }
                }
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParameterDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, JsonValue>::deserialize(deserializer)?;
        let layout: Vec<String> = map.keys().cloned().collect();
        let mut inputs = None;
        let mut outputs = None;
        let mut extra = Map::new();
        for (key, value) in map {
            match key.as_str() {
                INPUTS => inputs = Some(value),
                OUTPUTS => outputs = Some(value),
                _ => {
                    extra.insert(key, value);
                }
            }
        }
        let inputs = inputs.ok_or_else(|| <D::Error as de::Error>::missing_field(INPUTS))?;
        let outputs = outputs.ok_or_else(|| <D::Error as de::Error>::missing_field(OUTPUTS))?;
        Ok(Self {
            input_params: serde_json::from_value(inputs)
                .map_err(|e| <D::Error as de::Error>::custom(format!("{INPUTS}: {e}")))?,
            output_params: serde_json::from_value(outputs)
                .map_err(|e| <D::Error as de::Error>::custom(format!("{OUTPUTS}: {e}")))?,
            extra,
            layout,
        })
    }
}

impl ParameterDocument {
    #[must_use]
    pub fn new(input_params: Vec<InputParameter>, output_params: Vec<OutputParameter>) -> Self {
        Self {
            input_params,
            output_params,
            extra: Map::new(),
            layout: Vec::new(),
        }
    }

    pub fn input(&self, name: &str) -> Option<&InputParameter> {
        self.input_params.iter().find(|p| p.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&OutputParameter> {
        self.output_params.iter().find(|p| p.name == name)
    }

    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.input_params.iter().map(|p| p.name.as_str())
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.output_params.iter().map(|p| p.name.as_str())
    }

    /// Clear every output column, leaving names and order in place.
    pub fn reset_outputs(&mut self) {
        for output in &mut self.output_params {
            output.values.clear();
        }
    }

    /// Top-level keys in write order: the order they were read in, then any
    /// key not seen on read.
    fn key_order(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .layout
            .iter()
            .map(String::as_str)
            .filter(|k| matches!(*k, INPUTS | OUTPUTS) || self.extra.contains_key(*k))
            .collect();
        for key in [INPUTS, OUTPUTS]
            .into_iter()
            .chain(self.extra.keys().map(String::as_str))
        {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Copy of this document whose output columns carry `columns`, one per
    /// declared output in order. Inputs and extra keys are cloned unchanged.
    #[must_use]
    pub(crate) fn with_output_columns(&self, columns: Vec<Vec<Value>>) -> Self {
        debug_assert_eq!(columns.len(), self.output_params.len());
        let output_params = self
            .output_params
            .iter()
            .zip(columns)
            .map(|(decl, values)| OutputParameter {
                name: decl.name.clone(),
                values,
            })
            .collect();
        Self {
            input_params: self.input_params.clone(),
            output_params,
            extra: self.extra.clone(),
            layout: self.layout.clone(),
        }
    }
}
