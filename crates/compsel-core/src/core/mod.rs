//! # Core Module
//!
//! Stateless foundations: the compound catalog, the flowsheet data model and
//! file readers. Nothing in this layer changes the selection; that is the job of
//! the [`crate::engine`].

pub mod catalog;
pub mod io;
pub mod models;
