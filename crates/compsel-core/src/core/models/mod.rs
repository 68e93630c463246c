//! # Core Models Module
//!
//! Data structures describing a simulation context as far as compound selection
//! is concerned.
//!
//! ## Key Components
//!
//! - [`flowsheet`] - The simulation context: catalog, selected set and objects
//! - [`object`] - Simulation objects (material streams, energy streams, unit operations)
//! - [`phase`] - Phases of a material stream and their compound collections
//! - [`compound`] - Per-phase compound records and the collection interface the
//!   synchronizer drives
//! - [`selection`] - The selected compound set
//! - [`ids`] - Stable identifiers for simulation objects

pub mod compound;
pub mod flowsheet;
pub mod ids;
pub mod object;
pub mod phase;
pub mod selection;
