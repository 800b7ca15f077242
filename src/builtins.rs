//! Stock computations over two numeric parameters `a` and `b`.
//!
//! Integer inputs produce integer results while they fit in `i64`; any float
//! input, or an overflow, produces a float. A float result that is not
//! finite fails the row.

use crate::computation::{Args, Computation, computation};
use crate::registry::ComputationRegistry;
use crate::value::Value;
use anyhow::{Result, anyhow};

fn arith(
    args: &Args<'_>,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value> {
    if let (Some(a), Some(b)) = (args.value("a")?.as_i64(), args.value("b")?.as_i64())
        && let Some(v) = int_op(a, b)
    {
        return Ok(Value::from(v));
    }
    let (a, b) = (args.number("a")?, args.number("b")?);
    let v = float_op(a, b);
    Value::from_finite(v)
        .ok_or_else(|| anyhow!("{a} and {b} give {v}, which has no JSON form"))
}

fn sum(args: &Args<'_>) -> Result<Value> {
    arith(args, i64::checked_add, |a, b| a + b)
}

fn product(args: &Args<'_>) -> Result<Value> {
    arith(args, i64::checked_mul, |a, b| a * b)
}

fn difference(args: &Args<'_>) -> Result<Value> {
    arith(args, i64::checked_sub, |a, b| a - b)
}

/// `c = a + b`
#[must_use]
pub fn add() -> impl Computation {
    computation(["a", "b"], sum)
}

/// `(a + b, a * b)`
#[must_use]
pub fn add_mul() -> impl Computation {
    computation(["a", "b"], |args| Ok(vec![sum(args)?, product(args)?]))
}

/// `(a + b, a - b)`
#[must_use]
pub fn add_sub() -> impl Computation {
    computation(["a", "b"], |args| Ok(vec![sum(args)?, difference(args)?]))
}

/// Register every stock computation under its function name.
pub fn register_builtins(registry: &mut ComputationRegistry) {
    registry.register("add", add());
    registry.register("add_mul", add_mul());
    registry.register("add_sub", add_sub());
}
