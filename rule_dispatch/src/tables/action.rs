//! Action tables - an unconditional handler chain.

use tracing::{debug, trace};

use pattern_core::Value;

use crate::{Accumulator, Context, Outcome};

use super::{identity_accumulator, Accumulation, Control, HandlerOrder};

/// A handler in an action table. Receives the caller's positional
/// arguments and context; always tried, in table order.
pub type ActionHandler = Box<dyn Fn(&[Value], &Context<'_>) -> Outcome>;

/// An ordered, unkeyed handler chain with accumulation semantics.
///
/// Used when a fixed action always runs the same handler sequence - every
/// handler is tried (unless an earlier one stops the chain), none of them
/// is selected by a pattern. Handlers run in registration order by default.
pub struct ActionTable {
    handlers: Vec<ActionHandler>,
    accumulator: Accumulator,
    order: HandlerOrder,
}

impl ActionTable {
    /// Create a table trying handlers in registration order.
    pub fn new() -> Self {
        Self::with_order(HandlerOrder::FirstRegistered)
    }

    /// Create a table with an explicit order policy.
    pub fn with_order(order: HandlerOrder) -> Self {
        Self {
            handlers: Vec::new(),
            accumulator: identity_accumulator(),
            order,
        }
    }

    /// Replace the accumulator reducing the dispatch's values.
    pub fn with_accumulator(mut self, f: impl Fn(Vec<Value>) -> Value + 'static) -> Self {
        self.accumulator = Box::new(f);
        self
    }

    /// Register a handler.
    pub fn add_handler(&mut self, f: impl Fn(&[Value], &Context<'_>) -> Outcome + 'static) {
        match self.order {
            HandlerOrder::FirstRegistered => self.handlers.push(Box::new(f)),
            HandlerOrder::LastRegistered => self.handlers.insert(0, Box::new(f)),
        }
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every handler against `args`, reducing their outcomes.
    ///
    /// Returns `None` only when a handler aborts the dispatch; an exhausted
    /// chain (even an empty one) reduces whatever accumulated.
    pub fn notify(&self, args: &[Value], context: &Context<'_>) -> Option<Value> {
        trace!(
            target: "rule_dispatch::action",
            handlers = self.handlers.len(),
            "dispatching action"
        );

        let mut accumulation = Accumulation::new();
        for (index, handler) in self.handlers.iter().enumerate() {
            match accumulation.absorb(handler(args, context)) {
                Control::Continue => {}
                Control::Finished(values) => {
                    trace!(target: "rule_dispatch::action", index, "handler finished dispatch");
                    return Some((self.accumulator)(values));
                }
                Control::NoOutcome => {
                    debug!(target: "rule_dispatch::action", index, "handler aborted dispatch");
                    return None;
                }
            }
        }
        Some((self.accumulator)(accumulation.into_values()))
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionTable")
            .field("handlers", &self.handlers.len())
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
