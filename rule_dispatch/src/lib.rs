//! # Rule Dispatch
//!
//! The dispatch layer of Fabula: rule tables that run ordered handler
//! chains against matched events and reduce their outcomes.
//!
//! ## Core Components
//!
//! - **tables**: The three table kinds - `PropertyTable` (pattern-keyed,
//!   at most one answer), `ActionTable` (unconditional handler chain),
//!   `EventTable` (pattern-keyed handler chain)
//! - **outcome**: The control signals a handler resolves to
//! - **context**: Contextual data carried into every handler invocation
//!
//! ## Design Philosophy
//!
//! - **No central switch**: independently-authored rules register against
//!   patterns; the tables decide who participates
//! - **Explicit control flow**: handlers return an `Outcome` sum type, and
//!   the reduction loop is an ordinary `match` - no unwinding
//! - **Reentrant by construction**: each dispatch owns its accumulation and
//!   bindings, so handlers may freely trigger further dispatches

pub mod context;
pub mod error;
pub mod outcome;
pub mod tables;

pub use context::*;
pub use error::*;
pub use outcome::*;
pub use tables::*;
