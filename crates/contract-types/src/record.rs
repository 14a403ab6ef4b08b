//! Backend wire types: stored contracts, analysis results, VIN lookups.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::clause::ClauseMap;

/// A contract stored by the backend after upload analysis. Immutable
/// from the client's perspective; ids are backend row ids, treated as
/// opaque here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub id: i64,
    pub file_name: String,
    pub created_at: String,
    pub sla: ClauseMap,
}

impl ContractRecord {
    /// Parsed creation timestamp, when the backend emitted RFC 3339.
    /// Callers fall back to the raw string for display.
    pub fn created_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }
}

/// Response of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub contract_id: i64,
    pub sla: ClauseMap,
    pub fairness: FairnessReport,
    pub negotiation_points: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessReport {
    pub fairness_score: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Response of `GET /vin/{vin}`: a flat field map decoded by the
/// backend's NHTSA lookup. Null-valued fields render as a dash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleDetails(pub ClauseMap);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::ClauseValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_contract_record_decodes_backend_shape() {
        let json = r#"{
            "id": 7,
            "file_name": "lease_a.pdf",
            "created_at": "2025-11-03T10:22:41+00:00",
            "sla": {"term": "12mo", "fees": {"late": 50}}
        }"#;
        let record: ContractRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.sla.get("term"), Some(&ClauseValue::from("12mo")));
        assert!(record.created_at_parsed().is_some());
    }

    #[test]
    fn test_created_at_parse_falls_back_gracefully() {
        let record = ContractRecord {
            id: 1,
            file_name: "a.pdf".to_string(),
            created_at: "yesterday".to_string(),
            sla: ClauseMap::new(),
        };
        assert!(record.created_at_parsed().is_none());
    }

    #[test]
    fn test_analysis_report_decodes_without_reasons() {
        let json = r#"{
            "contract_id": 3,
            "sla": {"term": "36mo"},
            "fairness": {"fairness_score": 72.5},
            "negotiation_points": "Ask for a lower late fee."
        }"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.fairness.fairness_score, 72.5);
        assert!(report.fairness.reasons.is_empty());
    }

    #[test]
    fn test_vehicle_details_keep_field_order() {
        let json = r#"{"make": "Honda", "model": "Accord", "year": "2003", "plant": null}"#;
        let details: VehicleDetails = serde_json::from_str(json).unwrap();
        let fields: Vec<&str> = details.0.keys().collect();
        assert_eq!(fields, vec!["make", "model", "year", "plant"]);
    }
}
