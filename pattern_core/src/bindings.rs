//! Binding maps - the result of a successful match.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{MatchError, Value};

/// A mapping from variable name to the value it matched.
///
/// Produced fresh per match attempt. Each name may be bound at most once
/// per attempt; `bind` enforces this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bindings {
    map: HashMap<String, Value>,
}

impl Bindings {
    /// Create an empty binding map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable to a value.
    ///
    /// Fails with `DuplicateBinding` if the name is already bound - a
    /// pattern may use each variable name only once.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> Result<(), MatchError> {
        let name = name.into();
        if self.map.contains_key(&name) {
            return Err(MatchError::DuplicateBinding(name));
        }
        self.map.insert(name, value);
        Ok(())
    }

    /// Get the value bound to a name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    /// Check whether a name is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Iterate over all bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
