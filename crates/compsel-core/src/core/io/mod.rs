//! Readers for flowsheet layout descriptions.

pub mod layout;
