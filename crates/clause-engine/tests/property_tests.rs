//! Property-based tests for the clause reconciler.
//!
//! Exercises the engine over randomly generated contract sets and
//! checks the structural guarantees the dashboard relies on.

use std::collections::HashSet;

use clause_engine::ClauseSetReconciler;
use contract_types::{ClauseMap, ClauseValue, ComparisonRow, ContractRecord, RiskTier};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn clause_value() -> impl Strategy<Value = ClauseValue> {
    let leaf = prop_oneof![
        Just(ClauseValue::Absent),
        "[a-z0-9 ]{0,12}".prop_map(ClauseValue::Text),
        (-10_000i64..10_000).prop_map(|n| ClauseValue::Number(n.into())),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ClauseValue::List),
            prop::collection::vec(("[a-e]{1,3}", inner), 0..4)
                .prop_map(|entries| ClauseValue::Map(entries.into_iter().collect())),
        ]
    })
}

fn sla_map() -> impl Strategy<Value = ClauseMap> {
    prop::collection::vec(("(term|apr|fees|deposit|[a-d])", clause_value()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

fn contracts() -> impl Strategy<Value = Vec<ContractRecord>> {
    prop::collection::vec(sla_map(), 2..5).prop_map(|maps| {
        maps.into_iter()
            .enumerate()
            .map(|(i, sla)| ContractRecord {
                id: i as i64 + 1,
                file_name: format!("contract_{}.pdf", i + 1),
                created_at: "2025-11-03T10:00:00+00:00".to_string(),
                sla,
            })
            .collect()
    })
}

/// Recursively check the alignment and classification invariants.
fn check_rows(rows: &[ComparisonRow], width: usize) -> Result<(), TestCaseError> {
    for row in rows {
        prop_assert_eq!(row.values.len(), width, "row {} lost alignment", row.clause);

        let distinct: HashSet<String> =
            row.values.iter().map(ClauseValue::canonical).collect();
        let any_missing = row.values.iter().any(ClauseValue::is_missing);

        match row.risk {
            RiskTier::High => prop_assert!(distinct.len() > 1),
            RiskTier::Medium => {
                prop_assert!(distinct.len() <= 1);
                prop_assert!(any_missing);
            }
            RiskTier::Low => {
                prop_assert!(distinct.len() <= 1);
                prop_assert!(!any_missing);
            }
        }

        // Sub-rows exist exactly when some aligned value is a map, and
        // cover the union of sub-keys.
        let map_values: Vec<&ClauseMap> =
            row.values.iter().filter_map(ClauseValue::as_map).collect();
        if map_values.is_empty() {
            prop_assert!(row.subrows.is_empty());
        } else {
            let subkeys: HashSet<&str> =
                map_values.iter().flat_map(|m| m.keys()).collect();
            prop_assert_eq!(row.subrows.len(), subkeys.len());
            for sub in &row.subrows {
                prop_assert!(subkeys.contains(sub.clause.as_str()));
            }
        }

        check_rows(&row.subrows, width)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn reconcile_covers_the_clause_union(contracts in contracts()) {
        let rows = ClauseSetReconciler::new().reconcile(&contracts);

        let union: HashSet<&str> = contracts
            .iter()
            .flat_map(|c| c.sla.keys())
            .collect();
        prop_assert_eq!(rows.len(), union.len());

        let row_clauses: HashSet<&str> =
            rows.iter().map(|r| r.clause.as_str()).collect();
        prop_assert_eq!(row_clauses, union);
    }

    #[test]
    fn every_row_keeps_alignment_and_classification(contracts in contracts()) {
        let rows = ClauseSetReconciler::new().reconcile(&contracts);
        check_rows(&rows, contracts.len())?;
    }

    #[test]
    fn reconcile_is_deterministic_and_pure(contracts in contracts()) {
        let snapshot = contracts.clone();
        let engine = ClauseSetReconciler::new();

        let first = engine.reconcile(&contracts);
        let second = engine.reconcile(&contracts);

        prop_assert_eq!(first, second);
        prop_assert_eq!(contracts, snapshot);
    }

    #[test]
    fn formatting_is_total(value in clause_value()) {
        // Both display modes must produce something for any value the
        // backend can emit; missing leaves render as the dash.
        let collapsed = clause_engine::format_value(&value, clause_engine::FormatMode::Collapsed);
        let expanded = clause_engine::format_value(&value, clause_engine::FormatMode::Expanded);
        prop_assert!(!collapsed.is_empty() || matches!(value, ClauseValue::List(_)));
        prop_assert!(!expanded.is_empty() || matches!(value, ClauseValue::List(_)));
    }
}
