//! The world-query interface guards evaluate against.
//!
//! The world itself - rooms, objects, relations - lives outside this crate.
//! Guard conditions only ever read from it through this trait.

use std::collections::HashMap;

use crate::Value;

/// Read-only access to current world state, keyed by ground facts.
///
/// A "fact" is a fully-substituted tagged value such as `Open("door")` or
/// `Description("ball")`. `lookup` returns its current value, or `None`
/// when the world has no entry for it.
pub trait WorldQuery {
    /// Current value of a ground fact, or `None` if absent.
    fn lookup(&self, fact: &Value) -> Option<Value>;

    /// Convenience for the common entity/property shape: queries the fact
    /// `Property(entity)`.
    fn property(&self, property: &str, entity: &Value) -> Option<Value> {
        self.lookup(&Value::tagged(property, vec![entity.clone()]))
    }
}

/// A world with no facts at all. Useful when matching patterns that carry
/// no guards.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWorld;

impl WorldQuery for EmptyWorld {
    fn lookup(&self, _fact: &Value) -> Option<Value> {
        None
    }
}

/// A plain fact-to-value map is a usable world on its own; outer layers
/// with richer stores implement the trait themselves.
impl WorldQuery for HashMap<Value, Value> {
    fn lookup(&self, fact: &Value) -> Option<Value> {
        self.get(fact).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_world_lookup() {
        let mut world = HashMap::new();
        world.insert(
            Value::tagged("Open", vec![Value::str("door")]),
            Value::Bool(true),
        );

        assert_eq!(
            world.lookup(&Value::tagged("Open", vec![Value::str("door")])),
            Some(Value::Bool(true))
        );
        assert_eq!(
            world.lookup(&Value::tagged("Open", vec![Value::str("chest")])),
            None
        );
    }

    #[test]
    fn test_property_convenience() {
        let mut world = HashMap::new();
        world.insert(
            Value::tagged("Description", vec![Value::str("ball")]),
            Value::str("It's red."),
        );

        assert_eq!(
            world.property("Description", &Value::str("ball")),
            Some(Value::str("It's red."))
        );
    }

    #[test]
    fn test_empty_world() {
        assert_eq!(
            EmptyWorld.lookup(&Value::tagged("Open", vec![Value::str("door")])),
            None
        );
    }
}
