//! # COMPSEL Core Library
//!
//! A selection-consistency engine for process flowsheets. It keeps the compound
//! lists attached to every phase of every material stream in exact
//! correspondence with the flowsheet's selected compound set, while a search
//! filter narrows which catalog entries are offered for selection.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** The read-only compound catalog, the flowsheet data model
//!   (streams, phases, per-phase compounds) and file readers.
//!
//! - **[`engine`]: The Logic Core.** Filtering, view building, and the selection synchronizer
//!   that applies one toggle at a time to the selected set and to every dependent phase,
//!   rolling back if any phase rejects the change.
//!
//! - **[`workflows`]: The Public API.** Opens an editing session from configuration (loading the
//!   catalog and flowsheet layout) and applies batches of toggles.

pub mod core;
pub mod engine;
pub mod workflows;
