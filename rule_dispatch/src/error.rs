//! Error types for the dispatch layer.

use thiserror::Error;

use pattern_core::{MatchError, Pattern, Value};

/// Failures surfacing from table registration and dispatch.
///
/// `NoMatch` never appears here - tables consume it by moving on to their
/// next entry. A `DuplicateBinding` inside an entry's pattern does
/// propagate, since it marks the rule set itself as malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// No property entry matched the query and no default handler is
    /// installed.
    #[error("no property entry matched `{0}`")]
    LookupFailure(Value),

    /// The pattern registered as a property key files under no tag.
    #[error("property keys must file under a tag, got `{0}`")]
    InvalidKey(Pattern),

    /// A property query must be a tagged tuple value.
    #[error("property queries must be tagged values, got `{0}`")]
    InvalidQuery(Value),

    /// A malformed pattern was detected while matching.
    #[error(transparent)]
    Match(#[from] MatchError),
}
