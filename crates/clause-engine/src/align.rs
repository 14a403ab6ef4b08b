//! Clause-key union and positional value alignment.

use contract_types::{ClauseValue, ContractRecord};

/// Every clause key appearing in any contract's SLA map, in first-seen
/// order across the contracts. Display stability depends on this order
/// staying deterministic for identical input order.
pub fn clause_union(contracts: &[ContractRecord]) -> Vec<String> {
    let mut keys = Vec::new();
    for contract in contracts {
        for key in contract.sla.keys() {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }
    keys
}

/// One value per contract for `clause`, in contract order. A contract
/// lacking the clause contributes `Absent`; positions are never skipped.
pub fn aligned_values(contracts: &[ContractRecord], clause: &str) -> Vec<ClauseValue> {
    contracts
        .iter()
        .map(|c| c.sla.get(clause).cloned().unwrap_or(ClauseValue::Absent))
        .collect()
}

/// Union of sub-keys across every aligned value that is a map, in
/// first-seen order. Non-map values contribute nothing.
pub fn subkey_union(values: &[ClauseValue]) -> Vec<String> {
    let mut keys = Vec::new();
    for value in values {
        if let Some(map) = value.as_map() {
            for key in map.keys() {
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.to_string());
                }
            }
        }
    }
    keys
}

/// Re-alignment one level down: each position's value becomes
/// `value[subkey]`, or `Absent` when the position's value is not a map
/// or lacks the sub-key. Width is preserved.
pub fn aligned_subvalues(values: &[ClauseValue], subkey: &str) -> Vec<ClauseValue> {
    values
        .iter()
        .map(|v| match v.as_map() {
            Some(map) => map.get(subkey).cloned().unwrap_or(ClauseValue::Absent),
            None => ClauseValue::Absent,
        })
        .collect()
}
