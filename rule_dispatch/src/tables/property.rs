//! Property tables - pattern-keyed lookups with at most one answer.

use std::collections::HashMap;

use tracing::trace;

use pattern_core::{MatchError, Pattern, Value};

use crate::{Context, DispatchError, Invocation};

/// A computed property definition. Returns `None` to decline, letting the
/// lookup move on to the next (older) entry.
pub type PropertyHandler = Box<dyn Fn(&Invocation<'_>) -> Option<Value>>;

/// The fallback invoked when no entry answered a query. Receives the query
/// and the same context a normal lookup would; `None` means the lookup
/// fails.
pub type DefaultHandler = Box<dyn Fn(&Value, &Context<'_>) -> Option<Value>>;

enum PropertyBody {
    Static(Value),
    Computed(PropertyHandler),
}

struct PropertyEntry {
    pattern: Pattern,
    body: PropertyBody,
}

/// A priority-ordered table keyed by pattern, for "ask the world a computed
/// question" lookups such as `Description("ball")`.
///
/// Definitions for the same tag are tried newest-first, so redefining a
/// property shadows the older definition without removing it. Entries are
/// bucketed by the tag their key pattern files under; the bucketing is an
/// optimization and carries no ordering meaning across tags.
#[derive(Default)]
pub struct PropertyTable {
    buckets: HashMap<String, Vec<PropertyEntry>>,
    default_handler: Option<DefaultHandler>,
}

impl PropertyTable {
    /// Create an empty property table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a property with a static value.
    ///
    /// Fails with `InvalidKey` if the pattern files under no tag.
    pub fn define(
        &mut self,
        pattern: Pattern,
        value: impl Into<Value>,
    ) -> Result<(), DispatchError> {
        self.insert(pattern, PropertyBody::Static(value.into()))
    }

    /// Define a property computed by a handler at lookup time.
    pub fn define_computed(
        &mut self,
        pattern: Pattern,
        f: impl Fn(&Invocation<'_>) -> Option<Value> + 'static,
    ) -> Result<(), DispatchError> {
        self.insert(pattern, PropertyBody::Computed(Box::new(f)))
    }

    /// Install the fallback handler for queries nothing answered.
    pub fn set_default(&mut self, f: impl Fn(&Value, &Context<'_>) -> Option<Value> + 'static) {
        self.default_handler = Some(Box::new(f));
    }

    fn insert(&mut self, pattern: Pattern, body: PropertyBody) -> Result<(), DispatchError> {
        let tag = pattern
            .key_tag()
            .ok_or_else(|| DispatchError::InvalidKey(pattern.clone()))?
            .to_owned();

        // Newest definition first, so it shadows older ones.
        self.buckets
            .entry(tag)
            .or_default()
            .insert(0, PropertyEntry { pattern, body });
        Ok(())
    }

    /// Look up the value of a property query such as `Description("ball")`.
    ///
    /// Scans the query tag's bucket newest-first; the first entry whose
    /// pattern matches (structure plus guards) answers. A computed entry
    /// returning `None` declines and the scan continues. When nothing
    /// answers, the default handler is consulted; without one the lookup
    /// fails with `LookupFailure`.
    pub fn lookup(&self, query: &Value, context: &Context<'_>) -> Result<Value, DispatchError> {
        let tagged = query
            .as_tagged()
            .ok_or_else(|| DispatchError::InvalidQuery(query.clone()))?;

        if let Some(entries) = self.buckets.get(&tagged.tag) {
            for entry in entries {
                let bindings = match entry.pattern.matches(query, context.world()) {
                    Ok(bindings) => bindings,
                    Err(MatchError::NoMatch) => continue,
                    Err(err) => return Err(err.into()),
                };

                match &entry.body {
                    PropertyBody::Static(value) => {
                        trace!(target: "rule_dispatch::property", %query, "static entry answered");
                        return Ok(value.clone());
                    }
                    PropertyBody::Computed(f) => {
                        let invocation = Invocation::new(&bindings, context);
                        if let Some(value) = f(&invocation) {
                            trace!(target: "rule_dispatch::property", %query, "computed entry answered");
                            return Ok(value);
                        }
                        // Declined; fall through to the next entry.
                    }
                }
            }
        }

        if let Some(default) = &self.default_handler {
            trace!(target: "rule_dispatch::property", %query, "falling back to default handler");
            if let Some(value) = default(query, context) {
                return Ok(value);
            }
        }
        Err(DispatchError::LookupFailure(query.clone()))
    }

    /// Number of definitions across all tags.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True if nothing is defined.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl std::fmt::Debug for PropertyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyTable")
            .field("definitions", &self.len())
            .field("has_default", &self.default_handler.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_core::{Condition, EmptyWorld};
    use std::collections::HashMap;

    fn description_of(name: &str) -> Value {
        Value::tagged("Description", vec![Value::str(name)])
    }

    fn description_key(name: &str) -> Pattern {
        Pattern::tagged("Description", vec![Pattern::literal(name)])
    }

    #[test]
    fn test_last_definition_wins() {
        let mut table = PropertyTable::new();
        table.define(description_key("ball"), "It's red.").unwrap();
        table.define(description_key("ball"), "It's blue.").unwrap();

        let context = Context::new(&EmptyWorld);
        assert_eq!(
            table.lookup(&description_of("ball"), &context).unwrap(),
            Value::str("It's blue.")
        );
    }

    #[test]
    fn test_lookup_failure_without_default() {
        let mut table = PropertyTable::new();
        table.define(description_key("ball"), "It's red.").unwrap();

        let context = Context::new(&EmptyWorld);
        assert_eq!(
            table.lookup(&description_of("lamp"), &context),
            Err(DispatchError::LookupFailure(description_of("lamp")))
        );
        // Unknown tag altogether.
        assert_eq!(
            table.lookup(&Value::tagged("Weight", vec![Value::str("ball")]), &context),
            Err(DispatchError::LookupFailure(Value::tagged(
                "Weight",
                vec![Value::str("ball")]
            )))
        );
    }

    #[test]
    fn test_computed_property_sees_bindings() {
        let mut table = PropertyTable::new();
        table
            .define_computed(
                Pattern::tagged("Description", vec![Pattern::var("obj")]),
                |inv| {
                    let obj = inv.binding("obj")?;
                    Some(Value::Str(format!("You see {}.", obj)))
                },
            )
            .unwrap();

        let context = Context::new(&EmptyWorld);
        assert_eq!(
            table.lookup(&description_of("ball"), &context).unwrap(),
            Value::Str("You see \"ball\".".to_owned())
        );
    }

    #[test]
    fn test_declining_computed_entry_falls_through() {
        let mut table = PropertyTable::new();
        table.define(description_key("ball"), "the older answer").unwrap();
        table
            .define_computed(description_key("ball"), |_| None)
            .unwrap();

        let context = Context::new(&EmptyWorld);
        assert_eq!(
            table.lookup(&description_of("ball"), &context).unwrap(),
            Value::str("the older answer")
        );
    }

    #[test]
    fn test_guarded_definition_shadows_conditionally() {
        let mut world = HashMap::new();
        world.insert(
            Value::tagged("Lit", vec![Value::str("cellar")]),
            Value::Bool(false),
        );

        let mut table = PropertyTable::new();
        table
            .define(description_key("cellar"), "Racks of dusty bottles.")
            .unwrap();
        table
            .define(
                description_key("cellar").when(Condition::not(Condition::holds(
                    Pattern::tagged("Lit", vec![Pattern::literal("cellar")]),
                ))),
                "It is pitch dark.",
            )
            .unwrap();

        let context = Context::new(&world);
        assert_eq!(
            table.lookup(&description_of("cellar"), &context).unwrap(),
            Value::str("It is pitch dark.")
        );

        let mut lit = HashMap::new();
        lit.insert(
            Value::tagged("Lit", vec![Value::str("cellar")]),
            Value::Bool(true),
        );
        let context = Context::new(&lit);
        assert_eq!(
            table.lookup(&description_of("cellar"), &context).unwrap(),
            Value::str("Racks of dusty bottles.")
        );
    }

    #[test]
    fn test_default_handler_receives_query_and_context() {
        let mut table = PropertyTable::new();
        table.set_default(|query, context| {
            let who = context.get("actor")?;
            Some(Value::Str(format!("{} knows nothing about {}.", who, query)))
        });

        let context = Context::new(&EmptyWorld).with_value("actor", "kyle");
        assert_eq!(
            table.lookup(&description_of("ball"), &context).unwrap(),
            Value::Str("\"kyle\" knows nothing about Description(\"ball\").".to_owned())
        );
    }

    #[test]
    fn test_default_handler_may_decline() {
        let mut table = PropertyTable::new();
        table.set_default(|_, _| None);

        let context = Context::new(&EmptyWorld);
        assert_eq!(
            table.lookup(&description_of("ball"), &context),
            Err(DispatchError::LookupFailure(description_of("ball")))
        );
    }

    #[test]
    fn test_invalid_key_rejected_at_definition() {
        let mut table = PropertyTable::new();
        let err = table.define(Pattern::var("x"), "anything").unwrap_err();
        assert!(matches!(err, DispatchError::InvalidKey(_)));
    }

    #[test]
    fn test_invalid_query_rejected() {
        let table = PropertyTable::new();
        let context = Context::new(&EmptyWorld);
        assert_eq!(
            table.lookup(&Value::str("ball"), &context),
            Err(DispatchError::InvalidQuery(Value::str("ball")))
        );
    }

    #[test]
    fn test_duplicate_binding_key_propagates() {
        let mut table = PropertyTable::new();
        table
            .define(
                Pattern::tagged("Pair", vec![Pattern::var("x"), Pattern::var("x")]),
                "broken",
            )
            .unwrap();

        let context = Context::new(&EmptyWorld);
        let err = table
            .lookup(
                &Value::tagged("Pair", vec![Value::Int(1), Value::Int(2)]),
                &context,
            )
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::Match(MatchError::DuplicateBinding("x".to_owned()))
        );
    }
}
