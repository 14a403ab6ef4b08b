//! Top-level dashboard state: contract list, selection set, comparison.
//!
//! A comparison fetch can be superseded by another selection change
//! while still in flight; each fetch therefore carries a generation
//! number and only the response matching the latest issued generation
//! is applied. State sits behind a scoped `RefCell` and no borrow is
//! held across an await, so the shell can keep toggling the selection
//! and issuing new fetches while one is pending. Contract-list and
//! comparison failures are logged only, leaving the previous state on
//! screen.

use std::cell::RefCell;
use std::rc::Rc;

use contract_types::ContractRecord;
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::api::ApiClient;
use crate::comparison::ComparisonPanel;

struct DashboardState {
    api: ApiClient,
    contracts: Vec<ContractRecord>,
    selected: Vec<i64>,
    comparison: ComparisonPanel,
    generation: u64,
}

impl DashboardState {
    /// Issue a new fetch generation. Called on every selection-driven
    /// reload, including ones that end up clearing the view, so that
    /// an in-flight response from before the change is discarded.
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply a comparison response unless it was superseded. Returns
    /// whether the response was applied.
    fn apply_comparison(&mut self, generation: u64, records: Vec<ContractRecord>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.comparison.set_records(&records);
        true
    }
}

#[wasm_bindgen]
pub struct Dashboard {
    state: Rc<RefCell<DashboardState>>,
}

#[wasm_bindgen]
impl Dashboard {
    #[wasm_bindgen(constructor)]
    pub fn new(api: ApiClient) -> Dashboard {
        Self {
            state: Rc::new(RefCell::new(DashboardState {
                api,
                contracts: Vec::new(),
                selected: Vec::new(),
                comparison: ComparisonPanel::new(),
                generation: 0,
            })),
        }
    }

    /// Reload the stored contract list. Failures keep the previous
    /// list and are logged only.
    #[wasm_bindgen(js_name = refreshContracts)]
    pub async fn refresh_contracts(&self) {
        let api = self.state.borrow().api.clone();
        match api.contracts().await {
            Ok(contracts) => self.state.borrow_mut().contracts = contracts,
            Err(err) => {
                console::error_1(&format!("Failed to load contracts: {err}").into());
            }
        }
    }

    /// Toggle a contract in or out of the comparison selection.
    /// Returns whether it is selected afterwards.
    #[wasm_bindgen(js_name = toggleContract)]
    pub fn toggle_contract(&self, id: i64) -> bool {
        let mut state = self.state.borrow_mut();
        match state.selected.iter().position(|&s| s == id) {
            Some(index) => {
                state.selected.remove(index);
                false
            }
            None => {
                state.selected.push(id);
                true
            }
        }
    }

    #[wasm_bindgen(js_name = isSelected)]
    pub fn is_selected(&self, id: i64) -> bool {
        self.state.borrow().selected.contains(&id)
    }

    #[wasm_bindgen(js_name = selectedCount)]
    pub fn selected_count(&self) -> usize {
        self.state.borrow().selected.len()
    }

    /// Fetch comparison-ready records for the current selection and
    /// apply them unless a newer fetch was issued meanwhile. Below two
    /// selected contracts the comparison empties without a request.
    #[wasm_bindgen(js_name = loadComparison)]
    pub async fn load_comparison(&self) {
        let (api, ids, generation) = {
            let mut state = self.state.borrow_mut();
            let generation = state.next_generation();
            if state.selected.len() < 2 {
                state.comparison.set_records(&[]);
                return;
            }
            (state.api.clone(), state.selected.clone(), generation)
        };

        match api.compare(&ids).await {
            Ok(records) => {
                if !self.state.borrow_mut().apply_comparison(generation, records) {
                    console::log_1(&"Discarded stale comparison response".into());
                }
            }
            Err(err) => {
                console::error_1(&format!("Comparison failed: {err}").into());
            }
        }
    }

    #[wasm_bindgen(js_name = contractsJson)]
    pub fn contracts_json(&self) -> String {
        serde_json::to_string(&self.state.borrow().contracts).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = comparisonHeadersJson)]
    pub fn comparison_headers_json(&self) -> String {
        self.state.borrow().comparison.headers_json()
    }

    #[wasm_bindgen(js_name = comparisonRowsJson)]
    pub fn comparison_rows_json(&self) -> String {
        self.state.borrow().comparison.display_rows_json()
    }

    #[wasm_bindgen(js_name = toggleComparisonRow)]
    pub fn toggle_comparison_row(&self, path: &str) -> bool {
        self.state.borrow_mut().comparison.toggle(path)
    }

    #[wasm_bindgen(js_name = comparisonIsEmpty)]
    pub fn comparison_is_empty(&self) -> bool {
        self.state.borrow().comparison.is_empty()
    }
}

impl Dashboard {
    pub fn contracts(&self) -> Vec<ContractRecord> {
        self.state.borrow().contracts.clone()
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.state.borrow().selected.clone()
    }
}
