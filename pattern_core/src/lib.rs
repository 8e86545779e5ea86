//! # Pattern Core
//!
//! The matching layer of Fabula - patterns over tagged tuple values.
//! This crate knows nothing about rule tables or dispatch; it only answers
//! "does this pattern match this value, and what did its variables capture?"
//!
//! ## Core Components
//!
//! - **value**: The `Value` sum type - tagged tuples, literals, lists
//! - **pattern**: Patterns with variable capture and world-state guards
//! - **bindings**: The binding map produced by a successful match
//! - **world**: The read-only query interface guards evaluate against

pub mod bindings;
pub mod error;
pub mod pattern;
pub mod value;
pub mod world;

pub use bindings::*;
pub use error::*;
pub use pattern::*;
pub use value::*;
pub use world::*;
