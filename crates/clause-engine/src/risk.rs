//! Risk-tier classification of aligned clause values.

use std::collections::HashSet;

use contract_types::{ClauseValue, RiskTier};

/// Classify one clause's aligned values.
///
/// - more than one distinct serialized value -> High
/// - identical, but any value missing (absent / null / "") -> Medium
/// - identical and all present -> Low
///
/// "Differs" always dominates "missing": a clause that both differs and
/// has a hole is High, not Medium. A clause absent everywhere is still
/// Medium, never Low. Absent and empty string are distinct values for
/// the difference check even though both count as missing.
pub fn classify(values: &[ClauseValue]) -> RiskTier {
    let distinct: HashSet<String> = values.iter().map(ClauseValue::canonical).collect();
    if distinct.len() > 1 {
        RiskTier::High
    } else if values.iter().any(ClauseValue::is_missing) {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}
