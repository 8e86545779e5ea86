//! Value definitions - the tagged tuple values events and world facts are
//! made of.

use serde::{Deserialize, Serialize};

/// A runtime value: an event, a world fact, or a fragment of either.
///
/// Events are usually `Tagged` values such as `Enters("kyle", "vestibule")`;
/// the scalar variants carry their payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Tagged(TaggedValue),
}

/// A tagged tuple: a tag naming the kind of fact or event, plus its
/// positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedValue {
    pub tag: String,
    pub args: Vec<Value>,
}

impl Value {
    /// Create a string value.
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create a tagged tuple value.
    pub fn tagged(tag: impl Into<String>, args: impl IntoIterator<Item = Value>) -> Self {
        Value::Tagged(TaggedValue {
            tag: tag.into(),
            args: args.into_iter().collect(),
        })
    }

    /// The tag of a `Tagged` value, if this is one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Value::Tagged(t) => Some(&t.tag),
            _ => None,
        }
    }

    /// Get the tagged tuple, if this is one.
    pub fn as_tagged(&self) -> Option<&TaggedValue> {
        match self {
            Value::Tagged(t) => Some(t),
            _ => None,
        }
    }

    /// Truthiness as used by guard evaluation.
    ///
    /// Empty strings and lists are falsy; a tagged tuple is always truthy
    /// (its presence in the world is what carries the meaning).
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Tagged(_) => true,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<TaggedValue> for Value {
    fn from(t: TaggedValue) -> Self {
        Value::Tagged(t)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Tagged(t) => write!(f, "{}", t),
        }
    }
}

impl std::fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.tag)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
