//! Shared foundation: core value types, error taxonomy, math helpers.

pub mod core;
pub mod error;
pub mod math;
