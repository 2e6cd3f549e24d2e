//! Gateway API error and wire types.
pub mod error;
pub mod types;
