//! Common utilities for the chainsel workspace.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - deduplicated, colored stderr diagnostics for
//!   recoverable oddities (unknown character references, suspicious input)

pub mod warning;
