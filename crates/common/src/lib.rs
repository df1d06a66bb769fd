//! Shared building blocks for the items service crates.
//!
//! Wire types that several crates serialize, and the tracing setup used by
//! every entry point.

pub mod types;
pub mod utils;
