//! Generic utility primitives with zero domain knowledge.
//!
//! - `shell` - Shell quoting for display
//! - `validation` - Input validation helpers

pub mod shell;
pub mod validation;
