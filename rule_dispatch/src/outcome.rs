//! Control signals - what a handler invocation resolves to.

use serde::{Deserialize, Serialize};

use pattern_core::Value;

/// The outcome of one handler invocation.
///
/// A table's dispatch loop reduces a chain of these into a single result;
/// the stopping variants (`Abort`, `Handled`, `FinishWith`) end the chain
/// immediately and never reach the caller themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// A normal return: the value joins the running accumulation and the
    /// next handler is tried.
    Value(Value),

    /// The handler does not care about this event; nothing is accumulated
    /// and the next handler is tried.
    Decline,

    /// Stop immediately; the whole dispatch yields no outcome and the
    /// running accumulation is discarded.
    Abort,

    /// Stop immediately; the result is the accumulator applied to exactly
    /// these values. Anything accumulated earlier is discarded.
    Handled(Vec<Value>),

    /// The handler contributes several values to the running accumulation
    /// (and no single return value); the next handler is tried.
    MultipleResults(Vec<Value>),

    /// Stop immediately; the result is the accumulator applied to the
    /// running accumulation followed by these values.
    FinishWith(Vec<Value>),
}

impl Outcome {
    /// A normal return value.
    pub fn value(value: impl Into<Value>) -> Self {
        Outcome::Value(value.into())
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Outcome::Value(value)
    }
}

/// Decline unless a condition holds.
///
/// Early-returns `Outcome::Decline` from the enclosing handler when the
/// condition is false, so rule bodies can state their preconditions up
/// front:
///
/// ```ignore
/// table.add_handler(pattern, |inv| {
///     require!(inv.get("actor") == Some(&Value::str("kyle")));
///     Outcome::value("kyle did it")
/// });
/// ```
#[macro_export]
macro_rules! require {
    ($cond:expr) => {
        if !$cond {
            return $crate::Outcome::Decline;
        }
    };
}
