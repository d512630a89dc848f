//! Common utilities for the Fennec style and layout core.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - deduplicated, colored terminal output for
//!   non-fatal style and layout diagnostics

pub mod warning;
