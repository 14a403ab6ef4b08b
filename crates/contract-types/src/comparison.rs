//! Derived comparison structures produced by the clause engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clause::ClauseValue;

/// Consistency classification of one clause across the compared
/// contracts. Ordered so that `High` dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// All values identical and present.
    Low,
    /// Identical but at least one value missing.
    Medium,
    /// Values differ across contracts.
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown risk tier: {0}")]
pub struct ParseRiskTierError(String);

impl FromStr for RiskTier {
    type Err = ParseRiskTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskTier::Low),
            "medium" => Ok(RiskTier::Medium),
            "high" => Ok(RiskTier::High),
            other => Err(ParseRiskTierError(other.to_string())),
        }
    }
}

/// One clause aligned across all compared contracts.
///
/// `values` always has one entry per compared contract, in selection
/// order; a contract lacking the clause contributes `Absent` at its
/// position rather than being skipped. Recomputed on every render,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub clause: String,
    pub values: Vec<ClauseValue>,
    pub risk: RiskTier,
    /// Nested sub-clauses, present when at least one aligned value is a
    /// map. Same alignment guarantee holds at every depth.
    pub subrows: Vec<ComparisonRow>,
}

impl ComparisonRow {
    /// A row is expandable exactly when it produced subrows.
    pub fn is_expandable(&self) -> bool {
        !self.subrows.is_empty()
    }
}
