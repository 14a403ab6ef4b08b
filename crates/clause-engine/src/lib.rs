//! Clause comparison engine for the contract dashboard.
//!
//! Given the contracts a user selected, the reconciler unions their SLA
//! clause keys, aligns values positionally, classifies each clause into
//! a risk tier and expands nested clause objects into sub-rows. The
//! whole pass is pure and synchronous: no input mutation, no side
//! effects, identical output for identical input order.

pub mod align;
pub mod format;
pub mod risk;

use contract_types::{ComparisonRow, ContractRecord};

pub use format::{format_value, FormatMode, DASH};
pub use risk::classify;

/// ClauseSetReconciler entry point
pub struct ClauseSetReconciler;

impl ClauseSetReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Build the full risk-annotated comparison structure.
    ///
    /// Meaningful output needs at least two contracts; the dashboard
    /// guards that before calling. With fewer the result is still
    /// well-defined (rows of width 0 or 1), never an error.
    pub fn reconcile(&self, contracts: &[ContractRecord]) -> Vec<ComparisonRow> {
        align::clause_union(contracts)
            .into_iter()
            .map(|clause| {
                let values = align::aligned_values(contracts, &clause);
                build_row(clause, values)
            })
            .collect()
    }
}

impl Default for ClauseSetReconciler {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify one clause and recurse into nested maps. Recursion ends
/// when no aligned value is a map; arrays stay atomic.
fn build_row(clause: String, values: Vec<contract_types::ClauseValue>) -> ComparisonRow {
    let subrows = if values.iter().any(|v| v.as_map().is_some()) {
        align::subkey_union(&values)
            .into_iter()
            .map(|subkey| {
                let subvalues = align::aligned_subvalues(&values, &subkey);
                build_row(subkey, subvalues)
            })
            .collect()
    } else {
        Vec::new()
    };

    ComparisonRow {
        risk: risk::classify(&values),
        clause,
        values,
        subrows,
    }
}
