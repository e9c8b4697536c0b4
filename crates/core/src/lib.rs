//! AquaCheck domain logic.
//!
//! Threshold registry, classification and verdict engine, and the tabular
//! import/export helpers around it. Everything in this crate is pure: no
//! network, no files, no environment, no global state.

pub mod compliance;
pub mod error;
pub mod measurement_import;
pub mod parameters;
pub mod registry;
pub mod report_export;
