//! Rule tables - the three dispatch surfaces.
//!
//! All three run an ordered chain of entries and reduce per-entry outcomes;
//! they differ in how entries are selected. `PropertyTable` wants at most
//! one answer, `ActionTable` tries every handler unconditionally, and
//! `EventTable` tries only handlers whose pattern matches the event.

mod action;
mod event;
mod property;

pub use action::*;
pub use event::*;
pub use property::*;

use pattern_core::Value;

use crate::Outcome;

/// Reduces the values a dispatch accumulated into the table's result.
pub type Accumulator = Box<dyn Fn(Vec<Value>) -> Value>;

/// The default accumulator: the accumulation itself, as a list value.
pub(crate) fn identity_accumulator() -> Accumulator {
    Box::new(Value::List)
}

/// Which end of the registration order a dispatch starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOrder {
    /// Earliest-registered handler is tried first.
    FirstRegistered,

    /// Most-recently-registered handler is tried first, giving later
    /// (more specialized) rules priority over earlier (more general) ones.
    LastRegistered,
}

/// A dispatch step after absorbing one handler's outcome.
pub(crate) enum Control {
    /// Keep trying handlers.
    Continue,

    /// Stop; reduce these values into the table's result.
    Finished(Vec<Value>),

    /// Stop; the dispatch yields no outcome at all.
    NoOutcome,
}

/// The running accumulation of one dispatch call.
///
/// Owned by a single `notify`, never shared, so reentrant dispatch from
/// inside a handler cannot disturb it.
pub(crate) struct Accumulation {
    values: Vec<Value>,
}

impl Accumulation {
    pub(crate) fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Fold one handler outcome into the dispatch state.
    pub(crate) fn absorb(&mut self, outcome: Outcome) -> Control {
        match outcome {
            Outcome::Value(value) => {
                self.values.push(value);
                Control::Continue
            }
            Outcome::Decline => Control::Continue,
            Outcome::Abort => Control::NoOutcome,
            Outcome::Handled(values) => Control::Finished(values),
            Outcome::MultipleResults(values) => {
                self.values.extend(values);
                Control::Continue
            }
            Outcome::FinishWith(values) => {
                let mut finished = std::mem::take(&mut self.values);
                finished.extend(values);
                Control::Finished(finished)
            }
        }
    }

    /// The accumulation after the chain is exhausted without a stop signal.
    pub(crate) fn into_values(self) -> Vec<Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Vec<Value> {
        ns.iter().map(|n| Value::Int(*n)).collect()
    }

    #[test]
    fn test_values_and_declines_accumulate() {
        let mut acc = Accumulation::new();
        assert!(matches!(acc.absorb(Outcome::value(Value::Int(1))), Control::Continue));
        assert!(matches!(acc.absorb(Outcome::Decline), Control::Continue));
        assert!(matches!(acc.absorb(Outcome::value(Value::Int(2))), Control::Continue));

        assert_eq!(acc.into_values(), ints(&[1, 2]));
    }

    #[test]
    fn test_multiple_results_extend() {
        let mut acc = Accumulation::new();
        acc.absorb(Outcome::value(Value::Int(1)));
        assert!(matches!(
            acc.absorb(Outcome::MultipleResults(ints(&[2, 3]))),
            Control::Continue
        ));

        assert_eq!(acc.into_values(), ints(&[1, 2, 3]));
    }

    #[test]
    fn test_handled_discards_prior_accumulation() {
        let mut acc = Accumulation::new();
        acc.absorb(Outcome::value(Value::Int(1)));

        match acc.absorb(Outcome::Handled(ints(&[9]))) {
            Control::Finished(values) => assert_eq!(values, ints(&[9])),
            _ => panic!("Handled must finish the dispatch"),
        }
    }

    #[test]
    fn test_finish_with_keeps_accumulation() {
        let mut acc = Accumulation::new();
        acc.absorb(Outcome::value(Value::Int(1)));

        match acc.absorb(Outcome::FinishWith(ints(&[2, 3]))) {
            Control::Finished(values) => assert_eq!(values, ints(&[1, 2, 3])),
            _ => panic!("FinishWith must finish the dispatch"),
        }
    }

    #[test]
    fn test_abort_yields_no_outcome() {
        let mut acc = Accumulation::new();
        acc.absorb(Outcome::value(Value::Int(1)));

        assert!(matches!(acc.absorb(Outcome::Abort), Control::NoOutcome));
    }
}
