//! The computation contract.
//!
//! A [`Computation`] declares its parameters through a [`Signature`] and is
//! called once per row with the bound [`Args`]. Whatever it returns is
//! normalized into [`Outputs`], an ordered list of values, one per declared
//! output parameter. A single return value is simply a list of length one.
//!
//! Closures become computations through [`computation`]:
//!
//! ```
//! use paramio::{Computation, computation};
//!
//! let add_mul = computation(["a", "b"], |args| {
//!     let (a, b) = (args.number("a")?, args.number("b")?);
//!     Ok((a + b, a * b))
//! });
//! assert_eq!(add_mul.signature().params(), &["a", "b"]);
//! ```

use crate::signature::Signature;
use crate::value::Value;
use anyhow::{Result, anyhow};
use std::marker::PhantomData;

/// Arguments for one invocation, positional in signature order.
#[derive(Clone, Debug)]
pub struct Args<'a> {
    signature: &'a Signature,
    values: Vec<Value>,
}

impl<'a> Args<'a> {
    /// Pair `values` with the parameter names of `signature`.
    ///
    /// # Errors
    /// Fails when the value count differs from the declared parameter count.
    pub fn new(signature: &'a Signature, values: Vec<Value>) -> Result<Self> {
        if values.len() != signature.len() {
            return Err(anyhow!(
                "{} argument(s) supplied for {} declared parameter(s)",
                values.len(),
                signature.len()
            ));
        }
        Ok(Self { signature, values })
    }

    /// Arguments whose count the caller has already matched to `signature`.
    pub(crate) fn bound(signature: &'a Signature, values: Vec<Value>) -> Self {
        debug_assert_eq!(values.len(), signature.len());
        Self { signature, values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `(name, value)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.signature
            .params()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.signature.position(name).map(|i| &self.values[i])
    }

    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// The value bound to `name`.
    ///
    /// # Errors
    /// Fails when `name` is not a declared parameter.
    pub fn value(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| anyhow!("'{name}' is not a declared parameter"))
    }

    /// # Errors
    /// Fails when `name` is undeclared or its value is not a number.
    pub fn number(&self, name: &str) -> Result<f64> {
        let v = self.value(name)?;
        v.as_f64()
            .ok_or_else(|| anyhow!("'{name}': expected number, got {}", v.type_name()))
    }

    /// # Errors
    /// Fails when `name` is undeclared or its value is not an integer.
    pub fn integer(&self, name: &str) -> Result<i64> {
        let v = self.value(name)?;
        v.as_i64()
            .ok_or_else(|| anyhow!("'{name}': expected integer, got {}", v.type_name()))
    }

    /// # Errors
    /// Fails when `name` is undeclared or its value is not a string.
    pub fn string(&self, name: &str) -> Result<&str> {
        let v = self.value(name)?;
        v.as_str()
            .ok_or_else(|| anyhow!("'{name}': expected string, got {}", v.type_name()))
    }

    /// # Errors
    /// Fails when `name` is undeclared or its value is not a boolean.
    pub fn boolean(&self, name: &str) -> Result<bool> {
        let v = self.value(name)?;
        v.as_bool()
            .ok_or_else(|| anyhow!("'{name}': expected boolean, got {}", v.type_name()))
    }
}

/// Normalized result of one invocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outputs(Vec<Value>);

impl Outputs {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

impl FromIterator<Value> for Outputs {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Outputs {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Conversion of one returned element into a [`Value`].
///
/// Floats must be finite: NaN and infinities have no JSON form, and writing
/// them as `null` would hide the failure that produced them.
pub trait IntoOutputValue {
    /// # Errors
    /// Fails for non-finite floats.
    fn into_output_value(self) -> Result<Value>;
}

macro_rules! impl_exact_output_value {
    ($($t:ty),*) => {
        $(
            impl IntoOutputValue for $t {
                fn into_output_value(self) -> Result<Value> {
                    Ok(Value::from(self))
                }
            }
        )*
    };
}

impl_exact_output_value!(
    Value, bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, String, &str
);

impl IntoOutputValue for f64 {
    fn into_output_value(self) -> Result<Value> {
        Value::from_finite(self).ok_or_else(|| anyhow!("non-finite result {self}"))
    }
}

impl IntoOutputValue for f32 {
    fn into_output_value(self) -> Result<Value> {
        f64::from(self).into_output_value()
    }
}

impl<T: IntoOutputValue> IntoOutputValue for Option<T> {
    fn into_output_value(self) -> Result<Value> {
        self.map_or(Ok(Value::Null), IntoOutputValue::into_output_value)
    }
}

/// Conversion of a computation's return value into [`Outputs`].
///
/// Single values become one output; tuples become one output per element, in
/// order; `Vec<Value>` is taken as-is.
pub trait IntoOutputs {
    /// # Errors
    /// Fails when an element cannot become a [`Value`].
    fn into_outputs(self) -> Result<Outputs>;
}

impl IntoOutputs for Outputs {
    fn into_outputs(self) -> Result<Outputs> {
        Ok(self)
    }
}

impl IntoOutputs for Vec<Value> {
    fn into_outputs(self) -> Result<Outputs> {
        Ok(Outputs(self))
    }
}

impl IntoOutputs for () {
    fn into_outputs(self) -> Result<Outputs> {
        Ok(Outputs::default())
    }
}

macro_rules! impl_single_output {
    ($($t:ty),*) => {
        $(
            impl IntoOutputs for $t {
                fn into_outputs(self) -> Result<Outputs> {
                    Ok(Outputs(vec![self.into_output_value()?]))
                }
            }
        )*
    };
}

impl_single_output!(Value, bool, i32, i64, u32, u64, usize, f32, f64, String, &str);

macro_rules! impl_tuple_outputs {
    ($($name:ident),+) => {
        impl<$($name: IntoOutputValue),+> IntoOutputs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_outputs(self) -> Result<Outputs> {
                let ($($name,)+) = self;
                Ok(Outputs(vec![$($name.into_output_value()?),+]))
            }
        }
    };
}

impl_tuple_outputs!(A);
impl_tuple_outputs!(A, B);
impl_tuple_outputs!(A, B, C);
impl_tuple_outputs!(A, B, C, D);
impl_tuple_outputs!(A, B, C, D, E);
impl_tuple_outputs!(A, B, C, D, E, F);

/// A function over named parameters producing one or more values.
///
/// Implementations must be deterministic per row for runs to be repeatable,
/// but nothing here enforces it.
pub trait Computation: Send + Sync {
    /// Declared parameter names, in call order.
    fn signature(&self) -> &Signature;

    /// Invoke once with bound arguments.
    ///
    /// # Errors
    /// Any error aborts the run that made the call.
    fn call(&self, args: &Args<'_>) -> Result<Outputs>;
}

/// A [`Computation`] backed by a closure.
pub struct FnComputation<F, R> {
    signature: Signature,
    f: F,
    _r: PhantomData<fn() -> R>,
}

impl<F, R> Computation for FnComputation<F, R>
where
    F: Fn(&Args<'_>) -> Result<R> + Send + Sync,
    R: IntoOutputs,
{
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, args: &Args<'_>) -> Result<Outputs> {
        (self.f)(args)?.into_outputs()
    }
}

/// Wrap a closure as a computation over the named parameters.
pub fn computation<I, S, F, R>(params: I, f: F) -> FnComputation<F, R>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&Args<'_>) -> Result<R> + Send + Sync,
    R: IntoOutputs,
{
    FnComputation {
        signature: Signature::new(params),
        f,
        _r: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuples_normalize_in_order() {
        let out = (1_i64, "x", true).into_outputs().unwrap();
        assert_eq!(
            out.into_vec(),
            vec![Value::from(1), Value::from("x"), Value::from(true)]
        );
    }

    #[test]
    fn single_values_normalize_to_one_output() {
        assert_eq!(5.5_f64.into_outputs().unwrap().len(), 1);
        assert_eq!(Value::Null.into_outputs().unwrap().len(), 1);
        assert!(().into_outputs().unwrap().is_empty());
    }

    #[test]
    fn non_finite_floats_are_refused() {
        assert!(f64::NAN.into_outputs().is_err());
        assert!((1_i64, f64::INFINITY).into_outputs().is_err());
        assert!(f32::NEG_INFINITY.into_output_value().is_err());
        let none: Option<f64> = None;
        assert_eq!(none.into_output_value().unwrap(), Value::Null);
    }

    #[test]
    fn typed_accessors_report_wrong_types() {
        let sig = Signature::new(["a", "s"]);
        let args = Args::new(&sig, vec![Value::from(2), Value::from("hi")]).unwrap();
        assert_eq!(args.number("a").unwrap(), 2.0);
        assert_eq!(args.integer("a").unwrap(), 2);
        assert_eq!(args.string("s").unwrap(), "hi");
        assert!(args.number("s").is_err());
        assert!(args.value("zz").is_err());
        assert_eq!(args.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["a", "s"]);
    }

    #[test]
    fn accessor_errors_name_the_type() {
        let sig = Signature::new(["f", "s"]);
        let args = Args::new(&sig, vec![Value::from(2.5), Value::from("hi")]).unwrap();
        let err = args.integer("f").unwrap_err().to_string();
        assert_eq!(err, "'f': expected integer, got number");
        let err = args.integer("s").unwrap_err().to_string();
        assert_eq!(err, "'s': expected integer, got string");
    }

    #[test]
    fn bound_arguments_keep_their_order() {
        let sig = Signature::new(["a", "b"]);
        let args = Args::bound(&sig, vec![Value::from(1), Value::from(2)]);
        assert_eq!(args.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn argument_count_must_match_signature() {
        let sig = Signature::new(["a", "b"]);
        assert!(Args::new(&sig, vec![Value::from(1)]).is_err());
    }
}
