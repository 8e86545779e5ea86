//! Guard conditions - boolean tests over bound values and world state.

use serde::{Deserialize, Serialize};

use crate::{Bindings, MatchError, Pattern, Value, WorldQuery};

/// A boolean condition attached to a pattern via `Pattern::when`.
///
/// Conditions never produce bindings; they are evaluated against the
/// world-query interface after structural matching has bound everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// The fact named by the (substituted) pattern has a truthy value in
    /// the world.
    Holds(Pattern),

    /// All of the conditions hold.
    All(Vec<Condition>),

    /// The condition does not hold.
    Not(Box<Condition>),

    /// The two terms evaluate to equal values.
    Equals(Term, Term),
}

/// One side of an `Equals` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    /// A literal value.
    Value(Value),

    /// The value bound to a variable, compared directly (no world access).
    Var(String),

    /// A fact pattern, substituted and then looked up in the world.
    Fact(Pattern),
}

impl Condition {
    /// Condition that a world fact holds.
    pub fn holds(fact: Pattern) -> Self {
        Condition::Holds(fact)
    }

    /// Conjunction of conditions.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::All(conditions.into_iter().collect())
    }

    /// Negation of a condition.
    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Equality of two terms.
    pub fn equals(a: impl Into<Term>, b: impl Into<Term>) -> Self {
        Condition::Equals(a.into(), b.into())
    }

    /// Evaluate this condition under `bindings` against the world.
    ///
    /// A referenced fact absent from the world fails the condition as
    /// `NoMatch` (not as `false`): the original rule author asserted a fact
    /// the world cannot answer, so the whole match attempt is abandoned.
    /// An unbound variable surfaces as `UnboundVariable`; `Pattern::matches`
    /// degrades it to `NoMatch`.
    pub fn test(&self, bindings: &Bindings, world: &dyn WorldQuery) -> Result<bool, MatchError> {
        match self {
            Condition::Holds(fact) => {
                let fact = fact.expand(bindings)?;
                let value = world.lookup(&fact).ok_or(MatchError::NoMatch)?;
                Ok(value.is_truthy())
            }
            Condition::All(conditions) => {
                for condition in conditions {
                    if !condition.test(bindings, world)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Not(condition) => Ok(!condition.test(bindings, world)?),
            Condition::Equals(a, b) => Ok(a.eval(bindings, world)? == b.eval(bindings, world)?),
        }
    }
}

impl Term {
    /// A term naming a bound variable.
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    /// A term naming a world fact.
    pub fn fact(pattern: Pattern) -> Self {
        Term::Fact(pattern)
    }

    fn eval(&self, bindings: &Bindings, world: &dyn WorldQuery) -> Result<Value, MatchError> {
        match self {
            Term::Value(value) => Ok(value.clone()),
            Term::Var(name) => bindings
                .get(name)
                .cloned()
                .ok_or_else(|| MatchError::UnboundVariable(name.clone())),
            Term::Fact(pattern) => {
                let fact = pattern.expand(bindings)?;
                world.lookup(&fact).ok_or(MatchError::NoMatch)
            }
        }
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Term::Value(value)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::Value(Value::from(s))
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::Value(Value::from(n))
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::Value(Value::from(b))
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Holds(fact) => write!(f, "holds {}", fact),
            Condition::All(conditions) => {
                write!(f, "(")?;
                for (i, condition) in conditions.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    write!(f, "{}", condition)?;
                }
                write!(f, ")")
            }
            Condition::Not(condition) => write!(f, "not {}", condition),
            Condition::Equals(a, b) => write!(f, "{} == {}", a, b),
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Value(value) => write!(f, "{}", value),
            Term::Var(name) => write!(f, "?{}", name),
            Term::Fact(pattern) => write!(f, "{}", pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmptyWorld;
    use std::collections::HashMap;

    fn world_with(facts: Vec<(Value, Value)>) -> HashMap<Value, Value> {
        facts.into_iter().collect()
    }

    fn bound(pairs: Vec<(&str, Value)>) -> Bindings {
        let mut bindings = Bindings::new();
        for (name, value) in pairs {
            bindings.bind(name, value).unwrap();
        }
        bindings
    }

    #[test]
    fn test_holds_truthiness() {
        let world = world_with(vec![
            (
                Value::tagged("Open", vec![Value::str("door")]),
                Value::Bool(true),
            ),
            (
                Value::tagged("Open", vec![Value::str("chest")]),
                Value::Bool(false),
            ),
        ]);

        let open = |name: &str| {
            Condition::holds(Pattern::tagged("Open", vec![Pattern::literal(name)]))
        };

        assert_eq!(open("door").test(&Bindings::new(), &world), Ok(true));
        assert_eq!(open("chest").test(&Bindings::new(), &world), Ok(false));
        // Absent fact abandons the match rather than reading as false.
        assert_eq!(
            open("gate").test(&Bindings::new(), &world),
            Err(MatchError::NoMatch)
        );
    }

    #[test]
    fn test_holds_substitutes_bindings() {
        let world = world_with(vec![(
            Value::tagged("Awake", vec![Value::str("kyle")]),
            Value::Bool(true),
        )]);
        let condition =
            Condition::holds(Pattern::tagged("Awake", vec![Pattern::var("actor")]));

        let bindings = bound(vec![("actor", Value::str("kyle"))]);
        assert_eq!(condition.test(&bindings, &world), Ok(true));

        assert_eq!(
            condition.test(&Bindings::new(), &world),
            Err(MatchError::UnboundVariable("actor".to_owned()))
        );
    }

    #[test]
    fn test_not_inverts() {
        let world = world_with(vec![(
            Value::tagged("Open", vec![Value::str("chest")]),
            Value::Bool(false),
        )]);
        let condition = Condition::not(Condition::holds(Pattern::tagged(
            "Open",
            vec![Pattern::literal("chest")],
        )));

        assert_eq!(condition.test(&Bindings::new(), &world), Ok(true));
    }

    #[test]
    fn test_not_of_absent_fact_still_abandons() {
        // Negating an unanswerable fact is still NoMatch, not true.
        let condition = Condition::not(Condition::holds(Pattern::tagged(
            "Open",
            vec![Pattern::literal("gate")],
        )));

        assert_eq!(
            condition.test(&Bindings::new(), &EmptyWorld),
            Err(MatchError::NoMatch)
        );
    }

    #[test]
    fn test_all_short_circuits() {
        let world = world_with(vec![
            (
                Value::tagged("Open", vec![Value::str("door")]),
                Value::Bool(true),
            ),
            (
                Value::tagged("Lit", vec![Value::str("room")]),
                Value::Bool(false),
            ),
        ]);

        let open = Condition::holds(Pattern::tagged("Open", vec![Pattern::literal("door")]));
        let lit = Condition::holds(Pattern::tagged("Lit", vec![Pattern::literal("room")]));

        assert_eq!(
            Condition::all(vec![open.clone(), lit.clone()]).test(&Bindings::new(), &world),
            Ok(false)
        );
        assert_eq!(
            Condition::all(vec![open.clone()]).test(&Bindings::new(), &world),
            Ok(true)
        );
        assert_eq!(Condition::all(vec![]).test(&Bindings::new(), &world), Ok(true));
    }

    #[test]
    fn test_equals_var_against_literal() {
        let bindings = bound(vec![("room", Value::str("vestibule"))]);
        let condition = Condition::equals(Term::var("room"), Term::from("vestibule"));

        assert_eq!(condition.test(&bindings, &EmptyWorld), Ok(true));

        let other = bound(vec![("room", Value::str("library"))]);
        assert_eq!(condition.test(&other, &EmptyWorld), Ok(false));
    }

    #[test]
    fn test_equals_fact_against_var() {
        let world = world_with(vec![(
            Value::tagged("Location", vec![Value::str("kyle")]),
            Value::str("vestibule"),
        )]);
        let bindings = bound(vec![("room", Value::str("vestibule"))]);

        let condition = Condition::equals(
            Term::fact(Pattern::tagged("Location", vec![Pattern::literal("kyle")])),
            Term::var("room"),
        );
        assert_eq!(condition.test(&bindings, &world), Ok(true));
    }
}
