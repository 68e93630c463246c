//! Read-only compound catalog.
//!
//! The catalog lists every compound available to a simulation context together
//! with the descriptive fields used for display and search. It is loaded once
//! from a CSV or TOML file and then shared, never mutated, by the rest of the
//! library.

pub mod entry;
pub mod registry;
