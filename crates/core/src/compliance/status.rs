//! Per-parameter status tiers and the overall verdict tier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of one parameter's reading against its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTier {
    Compliant,
    NearLimit,
    NonCompliant,
    Indicative,
    Missing,
    Invalid,
}

impl StatusTier {
    /// All tiers, in export/report order.
    pub const ALL: [StatusTier; 6] = [
        Self::Compliant,
        Self::NearLimit,
        Self::NonCompliant,
        Self::Indicative,
        Self::Missing,
        Self::Invalid,
    ];

    /// Stable string representation matching serde's `rename_all = "snake_case"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NearLimit => "near_limit",
            Self::NonCompliant => "non_compliant",
            Self::Indicative => "indicative",
            Self::Missing => "missing",
            Self::Invalid => "invalid",
        }
    }

    /// Severity rank used to surface the most serious row.
    ///
    /// Missing and Indicative rank lowest, Invalid ranks alongside
    /// NonCompliant. Only the enforced tiers (Compliant, NearLimit,
    /// NonCompliant) feed the verdict.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Missing | Self::Indicative => 0,
            Self::Compliant => 1,
            Self::NearLimit => 2,
            Self::NonCompliant | Self::Invalid => 3,
        }
    }
}

impl fmt::Display for StatusTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall verdict for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallTier {
    Ok,
    Warn,
    Bad,
}

impl OverallTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Bad => "bad",
        }
    }
}

impl fmt::Display for OverallTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
