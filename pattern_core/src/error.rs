//! Error types for the matching layer.

use thiserror::Error;

/// Failures raised while matching or expanding patterns.
///
/// `NoMatch` is a normal, locally-recovered outcome: rule tables respond to
/// it by trying their next entry. The other two indicate a malformed pattern
/// or binding set and propagate to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The input's structure disagrees with the pattern, or a guard
    /// condition did not hold.
    #[error("pattern does not match input")]
    NoMatch,

    /// A variable name was bound twice within a single match attempt.
    #[error("variable `{0}` is bound more than once in a single match")]
    DuplicateBinding(String),

    /// Expansion referenced a variable absent from the binding map.
    #[error("variable `{0}` has no binding")]
    UnboundVariable(String),
}
