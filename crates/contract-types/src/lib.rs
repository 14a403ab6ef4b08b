pub mod clause;
pub mod comparison;
pub mod record;

pub use clause::{ClauseMap, ClauseValue};
pub use comparison::{ComparisonRow, ParseRiskTierError, RiskTier};
pub use record::{AnalysisReport, ContractRecord, FairnessReport, VehicleDetails};
