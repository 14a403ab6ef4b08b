//! AutoLexis - Contract Analysis Dashboard
//!
//! Browser front end for the contract-analysis backend: sign in,
//! upload PDF contracts, inspect the AI-derived analysis, decode VINs
//! and compare SLA clauses across contracts. All heavy lifting (PDF
//! parsing, fairness scoring, VIN decoding, persistence) happens on
//! the backend; this crate is presentation state and request plumbing
//! driven from a thin HTML/JS shell.

use wasm_bindgen::prelude::*;

pub mod api;
pub mod auth;
pub mod badge;
pub mod comparison;
pub mod dashboard;
pub mod session;
pub mod upload;
pub mod vin;

pub use api::{ApiClient, ApiError};
pub use auth::AuthPanel;
pub use badge::{badge_for, badge_for_risk, RiskBadge};
pub use comparison::{ComparisonPanel, DisplayRow};
pub use dashboard::Dashboard;
pub use session::{SessionContext, SessionState};
pub use upload::UploadBox;
pub use vin::{is_valid_vin, VinLookup, DEMO_VINS};

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"AutoLexis WASM initialized".into());
}
