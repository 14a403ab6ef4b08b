//! VIN lookup panel.
//!
//! The 17-character gate runs locally; an invalid VIN never produces a
//! network call. Decoding itself is backend-owned (`GET /vin/{vin}`).
//! Panel state sits behind a scoped `RefCell` so the shell can poll
//! `loading`/`error` during a lookup; no borrow is held across the
//! await.

use std::cell::RefCell;
use std::rc::Rc;

use clause_engine::{format_value, FormatMode};
use contract_types::VehicleDetails;
use lazy_static::lazy_static;
use regex::Regex;
use wasm_bindgen::prelude::*;

use crate::api::ApiClient;

lazy_static! {
    /// 17 characters from the VIN alphabet, which excludes I, O and Q.
    static ref VIN_PATTERN: Regex =
        Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").expect("VIN pattern is valid");
}

/// Known-good VINs surfaced in the UI for quick demos.
pub const DEMO_VINS: &[&str] = &[
    "1HGCM82633A004352",
    "1C4RJFBG5FC625797",
    "3VW4T7AJ5EM123456",
    "2T1BURHE5JC123456",
    "5NPE34AF7JH123456",
];

pub fn is_valid_vin(vin: &str) -> bool {
    VIN_PATTERN.is_match(vin)
}

struct VinState {
    api: ApiClient,
    result: Option<VehicleDetails>,
    error: Option<String>,
    loading: bool,
}

impl VinState {
    /// Local gate: normalize, validate, latch. Returns the normalized
    /// VIN and a client handle when a request should go out.
    fn begin(&mut self, vin: &str) -> Option<(ApiClient, String)> {
        if self.loading {
            return None;
        }
        self.error = None;
        self.result = None;

        let vin = vin.trim().to_uppercase();
        if !is_valid_vin(&vin) {
            self.error = Some("Enter a valid 17-character VIN.".to_string());
            return None;
        }
        self.loading = true;
        Some((self.api.clone(), vin))
    }
}

#[wasm_bindgen]
pub struct VinLookup {
    state: Rc<RefCell<VinState>>,
}

#[wasm_bindgen]
impl VinLookup {
    #[wasm_bindgen(constructor)]
    pub fn new(api: ApiClient) -> VinLookup {
        Self {
            state: Rc::new(RefCell::new(VinState {
                api,
                result: None,
                error: None,
                loading: false,
            })),
        }
    }

    /// Look up one VIN. Input is uppercased and trimmed first, matching
    /// the input field behavior. Failures land in `error`; the previous
    /// result is always cleared.
    pub async fn lookup(&self, vin: &str) {
        let (api, vin) = match self.state.borrow_mut().begin(vin) {
            Some(prepared) => prepared,
            None => return,
        };

        let result = api.vin(&vin).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(details) => state.result = Some(details),
            Err(err) => state.error = Some(err.to_string()),
        }
        state.loading = false;
    }

    /// Decoded fields as `[field, display value]` pairs, JSON-encoded.
    /// Null-valued fields render as the dash.
    #[wasm_bindgen(js_name = resultRowsJson)]
    pub fn result_rows_json(&self) -> String {
        let state = self.state.borrow();
        let rows: Vec<(String, String)> = match &state.result {
            Some(details) => details
                .0
                .iter()
                .map(|(field, value)| {
                    (
                        field.to_string(),
                        format_value(value, FormatMode::Collapsed),
                    )
                })
                .collect(),
            None => Vec::new(),
        };
        serde_json::to_string(&rows).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = demoVins)]
    pub fn demo_vins() -> js_sys::Array {
        DEMO_VINS.iter().map(|v| JsValue::from_str(v)).collect()
    }

    #[wasm_bindgen(js_name = isValidVin)]
    pub fn is_valid_vin_js(vin: &str) -> bool {
        is_valid_vin(vin)
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    #[wasm_bindgen(js_name = hasResult)]
    pub fn has_result(&self) -> bool {
        self.state.borrow().result.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionContext;

    fn panel() -> VinLookup {
        VinLookup::new(ApiClient::new(
            "http://127.0.0.1:8000",
            SessionContext::in_memory(),
        ))
    }

    #[test]
    fn test_demo_vins_are_valid() {
        for vin in DEMO_VINS {
            assert!(is_valid_vin(vin), "demo VIN should validate: {vin}");
        }
    }

    #[test]
    fn test_wrong_length_is_invalid() {
        assert!(!is_valid_vin("1HGCM82633A00435"));
        assert!(!is_valid_vin("1HGCM82633A0043522"));
        assert!(!is_valid_vin(""));
    }

    #[test]
    fn test_excluded_letters_are_invalid() {
        // I, O and Q are not part of the VIN alphabet.
        assert!(!is_valid_vin("IHGCM82633A004352"));
        assert!(!is_valid_vin("1HGCM82633A00435O"));
        assert!(!is_valid_vin("1HGCM8Q633A004352"));
    }

    #[test]
    fn test_lowercase_is_invalid_before_normalization() {
        assert!(!is_valid_vin("1hgcm82633a004352"));
    }

    #[test]
    fn test_invalid_vin_fails_locally_without_latching() {
        let panel = panel();
        assert!(panel.state.borrow_mut().begin("nope").is_none());

        assert!(panel.error().is_some());
        assert!(!panel.loading());
    }

    #[test]
    fn test_begin_normalizes_and_latches() {
        let panel = panel();
        let (_, vin) = panel
            .state
            .borrow_mut()
            .begin("  1hgcm82633a004352 ")
            .unwrap();

        assert_eq!(vin, "1HGCM82633A004352");
        assert!(panel.loading());
        assert!(panel.error().is_none());

        // A second lookup is refused while the first is pending.
        assert!(panel.state.borrow_mut().begin(&vin).is_none());
    }
}
