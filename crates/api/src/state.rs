use std::sync::Arc;

use aquacheck_core::compliance::ComplianceEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable and read-only: every request works on its own input and
/// the engine is never mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Threshold registry, panel and margin, bundled.
    pub engine: Arc<ComplianceEngine>,
}
