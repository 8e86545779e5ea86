//! Contextual data carried into handler invocations.

use std::collections::HashMap;

use pattern_core::{Bindings, Value, WorldQuery};

/// Data the dispatching caller supplies alongside an event: the active
/// world-query handle plus an open map of named values (the acting entity,
/// the current turn, and so on).
///
/// The world handle is always passed explicitly; handlers and guards have
/// no ambient way to reach world state.
pub struct Context<'w> {
    world: &'w dyn WorldQuery,
    values: HashMap<String, Value>,
}

impl<'w> Context<'w> {
    /// Create a context around a world-query handle.
    pub fn new(world: &'w dyn WorldQuery) -> Self {
        Self {
            world,
            values: HashMap::new(),
        }
    }

    /// Add a named value.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Insert or replace a named value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get a named value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The world-query handle.
    pub fn world(&self) -> &dyn WorldQuery {
        self.world
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

/// What a pattern-keyed handler receives: the bindings its pattern
/// captured, merged over the caller's context.
///
/// This replaces passing "whatever named values happen to be present" as
/// loose arguments - handlers name what they need and look it up.
pub struct Invocation<'a> {
    bindings: &'a Bindings,
    context: &'a Context<'a>,
}

impl<'a> Invocation<'a> {
    pub fn new(bindings: &'a Bindings, context: &'a Context<'a>) -> Self {
        Self { bindings, context }
    }

    /// Look up a name: bindings first, then the context's named values.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name).or_else(|| self.context.get(name))
    }

    /// Look up a pattern variable only.
    pub fn binding(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// All bindings this invocation's pattern captured.
    pub fn bindings(&self) -> &Bindings {
        self.bindings
    }

    /// The dispatching caller's context.
    pub fn context(&self) -> &Context<'a> {
        self.context
    }

    /// The world-query handle.
    pub fn world(&self) -> &dyn WorldQuery {
        self.context.world()
    }
}
