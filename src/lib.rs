//! Lassoscope - Lasso bundle inspector with per-module size and compression metrics
//!
//! This crate analyzes a single pre-bundled JavaScript file produced by the
//! Lasso module loader, inventories every module registration it contains,
//! and reports raw and compressed sizes for each unit and for the bundle as
//! a whole.

pub mod analysis;
pub mod compress;
pub mod export;
pub mod stats;
