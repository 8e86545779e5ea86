//! Pattern definitions and the structural matching algorithm.

mod condition;

pub use condition::*;

use serde::{Deserialize, Serialize};

use crate::{Bindings, MatchError, Value, WorldQuery};

/// An immutable, composable matcher over tagged tuple values.
///
/// Matching is purely structural; world state is consulted only by the
/// guard conditions of `Guarded` nodes, and only after the structure of the
/// whole pattern tree has matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    /// Matches only an equal value.
    Literal(Value),

    /// Matches anything and binds it to `name`. If `inner` is present the
    /// matched value must also satisfy it.
    Var {
        name: String,
        inner: Option<Box<Pattern>>,
    },

    /// Matches a tagged tuple with the same tag and arity, element-wise.
    Tagged { tag: String, args: Vec<Pattern> },

    /// Matches iff `pattern` matches and `condition` then holds in the
    /// world, with bound variables substituted.
    Guarded {
        pattern: Box<Pattern>,
        condition: Box<Condition>,
    },
}

impl Pattern {
    /// A literal pattern matching only values equal to `value`.
    pub fn literal(value: impl Into<Value>) -> Self {
        Pattern::Literal(value.into())
    }

    /// A variable pattern matching anything.
    pub fn var(name: impl Into<String>) -> Self {
        Pattern::Var {
            name: name.into(),
            inner: None,
        }
    }

    /// A variable pattern whose captured value must also match `inner`.
    pub fn var_matching(name: impl Into<String>, inner: Pattern) -> Self {
        Pattern::Var {
            name: name.into(),
            inner: Some(Box::new(inner)),
        }
    }

    /// A tagged tuple pattern.
    pub fn tagged(tag: impl Into<String>, args: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Tagged {
            tag: tag.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Attach a guard condition, to be tested after structural matching.
    pub fn when(self, condition: Condition) -> Self {
        Pattern::Guarded {
            pattern: Box::new(self),
            condition: Box::new(condition),
        }
    }

    /// The tag this pattern files under when used as a table key.
    ///
    /// Tables bucket their entries by this tag. Variable and non-tagged
    /// literal patterns have no key.
    pub fn key_tag(&self) -> Option<&str> {
        match self {
            Pattern::Tagged { tag, .. } => Some(tag),
            Pattern::Guarded { pattern, .. } => pattern.key_tag(),
            Pattern::Literal(value) => value.tag(),
            Pattern::Var { .. } => None,
        }
    }

    /// Match this pattern against `input`, returning the variable bindings
    /// on success.
    ///
    /// Fails with `NoMatch` when structure disagrees or a guard does not
    /// hold, and with `DuplicateBinding` when the pattern binds the same
    /// variable name twice. Guards that reference a variable which was
    /// never bound, or a fact the world has no entry for, degrade to
    /// `NoMatch` rather than erroring.
    pub fn matches(&self, input: &Value, world: &dyn WorldQuery) -> Result<Bindings, MatchError> {
        let mut bindings = Bindings::new();
        let mut guards = Vec::new();
        self.match_structure(input, &mut bindings, &mut guards)?;

        // Guards run strictly after the whole tree has bound its variables,
        // so a guard may reference variables bound by sibling subpatterns.
        for guard in guards {
            match guard.test(&bindings, world) {
                Ok(true) => {}
                Ok(false) => return Err(MatchError::NoMatch),
                Err(MatchError::UnboundVariable(_)) => return Err(MatchError::NoMatch),
                Err(other) => return Err(other),
            }
        }
        Ok(bindings)
    }

    /// The structural half of matching: walks the tree, binds variables,
    /// and collects guard conditions for later evaluation.
    fn match_structure<'a>(
        &'a self,
        input: &Value,
        bindings: &mut Bindings,
        guards: &mut Vec<&'a Condition>,
    ) -> Result<(), MatchError> {
        match self {
            Pattern::Literal(value) => {
                if value == input {
                    Ok(())
                } else {
                    Err(MatchError::NoMatch)
                }
            }
            Pattern::Var { name, inner } => {
                // Bind first, so a duplicate use inside `inner` is caught.
                bindings.bind(name.clone(), input.clone())?;
                if let Some(inner) = inner {
                    inner.match_structure(input, bindings, guards)?;
                }
                Ok(())
            }
            Pattern::Tagged { tag, args } => {
                let tagged = input.as_tagged().ok_or(MatchError::NoMatch)?;
                if tagged.tag != *tag || tagged.args.len() != args.len() {
                    return Err(MatchError::NoMatch);
                }
                for (sub, arg) in args.iter().zip(&tagged.args) {
                    sub.match_structure(arg, bindings, guards)?;
                }
                Ok(())
            }
            Pattern::Guarded { pattern, condition } => {
                pattern.match_structure(input, bindings, guards)?;
                guards.push(condition);
                Ok(())
            }
        }
    }

    /// Substitute bound variables to materialize a concrete value.
    ///
    /// Fails with `UnboundVariable` if a variable has no entry in
    /// `bindings`. Expanding a `Guarded` pattern materializes its
    /// structural part; the guard has no value form.
    pub fn expand(&self, bindings: &Bindings) -> Result<Value, MatchError> {
        match self {
            Pattern::Literal(value) => Ok(value.clone()),
            Pattern::Var { name, .. } => bindings
                .get(name)
                .cloned()
                .ok_or_else(|| MatchError::UnboundVariable(name.clone())),
            Pattern::Tagged { tag, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.expand(bindings))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::tagged(tag.clone(), args))
            }
            Pattern::Guarded { pattern, .. } => pattern.expand(bindings),
        }
    }
}

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Pattern::Literal(value)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Literal(value) => write!(f, "{}", value),
            Pattern::Var { name, inner: None } => write!(f, "?{}", name),
            Pattern::Var {
                name,
                inner: Some(inner),
            } => write!(f, "?{}@{}", name, inner),
            Pattern::Tagged { tag, args } => {
                write!(f, "{}(", tag)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Pattern::Guarded { pattern, condition } => {
                write!(f, "{} when {}", pattern, condition)
            }
        }
    }
}
