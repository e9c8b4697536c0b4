//! Request handlers.
//!
//! Handlers are thin: they decode the request, call into
//! `aquacheck_core` through the shared [`ComplianceEngine`], and map errors
//! via [`AppError`].
//!
//! [`ComplianceEngine`]: aquacheck_core::compliance::ComplianceEngine
//! [`AppError`]: crate::error::AppError

pub mod analysis;
pub mod standards;
