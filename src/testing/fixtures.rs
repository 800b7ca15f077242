//! Pre-built documents and computations for common testing scenarios.

use crate::computation::{Args, Computation, Outputs};
use crate::document::ParameterDocument;
use crate::signature::Signature;
use crate::testing::builders::DocumentBuilder;
use crate::value::Value;
use anyhow::{Result, bail};
use std::sync::{Mutex, PoisonError};

/// `a = 2`, `b = 3`, one output `c`.
#[must_use]
pub fn scalar_pair() -> ParameterDocument {
    DocumentBuilder::new()
        .scalar("a", 2)
        .scalar("b", 3)
        .output("c")
        .build()
}

/// `a = [1, 2, 3]`, `b = [10, 20, 30]`, one output `c`.
#[must_use]
pub fn vectorized_pair() -> ParameterDocument {
    DocumentBuilder::new()
        .vectorized("a", [1, 2, 3])
        .vectorized("b", [10, 20, 30])
        .output("c")
        .build()
}

/// `a = 2`, `b = 3`, outputs `sum` and `product`.
#[must_use]
pub fn scalar_two_outputs() -> ParameterDocument {
    DocumentBuilder::new()
        .scalar("a", 2)
        .scalar("b", 3)
        .output("sum")
        .output("product")
        .build()
}

/// `a = [5, 10]`, `b = [1, 2]`, outputs `sum` and `difference`.
#[must_use]
pub fn vectorized_two_outputs() -> ParameterDocument {
    DocumentBuilder::new()
        .vectorized("a", [5, 10])
        .vectorized("b", [1, 2])
        .output("sum")
        .output("difference")
        .build()
}

/// Wraps a computation and records the arguments of every call, in order.
pub struct Recording<C> {
    inner: C,
    calls: Mutex<Vec<Vec<Value>>>,
}

impl<C: Computation> Recording<C> {
    pub const fn new(inner: C) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Arguments of every call so far.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<C: Computation> Computation for Recording<C> {
    fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    fn call(&self, args: &Args<'_>) -> Result<Outputs> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(args.values().to_vec());
        self.inner.call(args)
    }
}

/// A computation over `params` that returns `outputs` nulls per call and
/// fails on call number `fail_at` (0-based).
pub struct FailingAt {
    signature: Signature,
    outputs: usize,
    fail_at: usize,
    calls: Mutex<usize>,
}

impl FailingAt {
    pub fn new<I, S>(params: I, outputs: usize, fail_at: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            signature: Signature::new(params),
            outputs,
            fail_at,
            calls: Mutex::new(0),
        }
    }
}

impl Computation for FailingAt {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, _args: &Args<'_>) -> Result<Outputs> {
        let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
        let call = *calls;
        *calls += 1;
        if call == self.fail_at {
            bail!("deliberate failure on call {call}");
        }
        Ok(Outputs::new(vec![Value::Null; self.outputs]))
    }
}
