//! # Engine Module
//!
//! The stateful layer that keeps a flowsheet's selection and its dependent phase
//! collections consistent, and that produces the filtered, ordered view the
//! presentation layer renders.
//!
//! ## Architecture
//!
//! - **Filtering** ([`filter`]) - Pure, case-insensitive containment search over the catalog
//! - **View Building** ([`view`]) - Projection of filtered entries into rows, selected first
//! - **Synchronization** ([`sync`]) - Edge-triggered toggles propagated to every phase of
//!   every material stream, atomically
//! - **Editing Sessions** ([`session`]) - Query tickets, stale-result discarding and view refresh
//! - **Configuration** ([`config`]) - Session parameters and their builder
//! - **Events** ([`events`]) - Optional observer callbacks for queries and toggles
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod session;
pub mod sync;
pub(crate) mod transaction;
pub mod view;
