//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::core`] and [`crate::engine`] layers
//! together.
//!
//! - **Editing Workflow** ([`edit`]) - Loads the catalog and flowsheet layout named by a
//!   [`crate::engine::config::SessionConfig`], applies the layout's initial selection
//!   through the synchronizer, and drives toggles and searches against the result.

pub mod edit;
