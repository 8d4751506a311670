//! Foundation types for Tessera.
//!
//! Shared by every Tessera crate: the error enum, the value-parser error,
//! and the TOML-backed terminal configuration.

pub mod config;
pub mod error;
