//! Event tables - a pattern-keyed handler chain.

use tracing::{debug, trace};

use pattern_core::{MatchError, Pattern, Value};

use crate::{Accumulator, Context, DispatchError, Invocation, Outcome};

use super::{identity_accumulator, Accumulation, Control, HandlerOrder};

/// A handler in an event table. Invoked only when its pattern matches the
/// event; receives the bindings the match produced plus the caller's
/// context.
pub type EventHandler = Box<dyn Fn(&Invocation<'_>) -> Outcome>;

/// An ordered, pattern-keyed handler chain - the general dispatch case.
///
/// Only handlers whose pattern structurally (and guard-) matches the event
/// participate; everything else is skipped without being invoked. By
/// default the most-recently-registered handler is tried first, so
/// specialized rules defined later take priority over general ones.
pub struct EventTable {
    handlers: Vec<(Pattern, EventHandler)>,
    accumulator: Accumulator,
    order: HandlerOrder,
}

impl EventTable {
    /// Create a table trying the most recently registered handler first.
    pub fn new() -> Self {
        Self::with_order(HandlerOrder::LastRegistered)
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

    /// Register a handler for events matching `pattern`.
    pub fn add_handler(
        &mut self,
        pattern: Pattern,
        f: impl Fn(&Invocation<'_>) -> Outcome + 'static,
    ) {
        let entry = (pattern, Box::new(f) as EventHandler);
        match self.order {
            HandlerOrder::FirstRegistered => self.handlers.push(entry),
            HandlerOrder::LastRegistered => self.handlers.insert(0, entry),
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

    /// Dispatch an event to every handler whose pattern matches it,
    /// reducing their outcomes.
    ///
    /// `Ok(None)` means a handler aborted the dispatch; an event nothing
    /// matched is not an error, it reduces an empty accumulation. A
    /// `DuplicateBinding` in a registered pattern propagates - the rule set
    /// itself is malformed.
    pub fn notify(
        &self,
        event: &Value,
        context: &Context<'_>,
    ) -> Result<Option<Value>, DispatchError> {
        trace!(
            target: "rule_dispatch::event",
            %event,
            handlers = self.handlers.len(),
            "dispatching event"
        );

        let mut accumulation = Accumulation::new();
        for (index, (pattern, handler)) in self.handlers.iter().enumerate() {
            let bindings = match pattern.matches(event, context.world()) {
                Ok(bindings) => bindings,
                Err(MatchError::NoMatch) => continue,
                Err(err) => return Err(err.into()),
            };

            trace!(target: "rule_dispatch::event", index, %pattern, "handler matched");
            let invocation = Invocation::new(&bindings, context);
            match accumulation.absorb(handler(&invocation)) {
                Control::Continue => {}
                Control::Finished(values) => {
                    trace!(target: "rule_dispatch::event", index, "handler finished dispatch");
                    return Ok(Some((self.accumulator)(values)));
                }
                Control::NoOutcome => {
                    debug!(target: "rule_dispatch::event", index, %event, "handler aborted dispatch");
                    return Ok(None);
                }
            }
        }
        Ok(Some((self.accumulator)(accumulation.into_values())))
    }
}

impl Default for EventTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTable")
            .field("handlers", &self.handlers.len())
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
