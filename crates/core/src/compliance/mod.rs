//! Classification and verdict engine.
//!
//! Pure logic: callers pass an immutable measurement snapshot and resolved
//! thresholds and get fresh rows and a verdict back. Nothing here performs
//! I/O or keeps state between runs.

pub mod classifier;
pub mod engine;
pub mod evaluator;
pub mod measurement;
pub mod status;
pub mod verdict;

pub use classifier::{classify, classify_with_margin, MARGIN_RATIO};
pub use engine::{Analysis, ComplianceEngine};
pub use evaluator::{evaluate, evaluate_with_margin, EvaluationRow};
pub use measurement::{MeasurementSet, Reading};
pub use status::{OverallTier, StatusTier};
pub use verdict::{aggregate, aggregate_with_labels, summarize, TierSummary, Verdict};
