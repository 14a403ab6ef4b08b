//! Contract upload panel.
//!
//! Validates the selection locally (file present, PDF name, size cap)
//! before anything goes on the wire, and latches while a request is in
//! flight so the analyze action cannot be double-submitted. State sits
//! behind a scoped `RefCell`; the shell can read `inFlight`/`error`
//! while the upload is pending because no borrow spans the await.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::File;

use crate::api::ApiClient;

/// The backend rejects anything larger; catching it here saves the
/// round trip.
const MAX_UPLOAD_BYTES: f64 = 10.0 * 1024.0 * 1024.0;

struct UploadState {
    api: ApiClient,
    file_name: Option<String>,
    file_size: f64,
    in_flight: bool,
    error: Option<String>,
}

impl UploadState {
    fn select(&mut self, name: &str, size: f64) {
        self.file_name = Some(name.to_string());
        self.file_size = size;
        self.error = None;
    }

    /// Local validation gate. Nothing touches the network unless this
    /// passes and the in-flight latch was clear.
    fn begin(&mut self) -> Result<(), String> {
        if self.in_flight {
            let message = "Analysis already in progress.".to_string();
            self.error = Some(message.clone());
            return Err(message);
        }
        if let Err(message) = self.validate() {
            self.error = Some(message.clone());
            return Err(message);
        }
        self.error = None;
        self.in_flight = true;
        Ok(())
    }

    fn validate(&self) -> Result<(), String> {
        let name = match &self.file_name {
            Some(name) => name,
            None => return Err("Please upload a PDF contract.".to_string()),
        };
        if !name.to_lowercase().ends_with(".pdf") {
            return Err("Only PDF files are supported".to_string());
        }
        if self.file_size > MAX_UPLOAD_BYTES {
            return Err("File too large (maximum 10MB allowed)".to_string());
        }
        Ok(())
    }
}

#[wasm_bindgen]
pub struct UploadBox {
    state: Rc<RefCell<UploadState>>,
}

#[wasm_bindgen]
impl UploadBox {
    #[wasm_bindgen(constructor)]
    pub fn new(api: ApiClient) -> UploadBox {
        Self {
            state: Rc::new(RefCell::new(UploadState {
                api,
                file_name: None,
                file_size: 0.0,
                in_flight: false,
                error: None,
            })),
        }
    }

    /// Record the file chosen in the input element.
    #[wasm_bindgen(js_name = selectFile)]
    pub fn select_file(&self, name: &str, size: f64) {
        self.state.borrow_mut().select(name, size);
    }

    #[wasm_bindgen(js_name = clearFile)]
    pub fn clear_file(&self) {
        let mut state = self.state.borrow_mut();
        state.file_name = None;
        state.file_size = 0.0;
    }

    /// Upload the selected PDF and run analysis. Returns the analysis
    /// report as JSON for the result panel; failures land in `error`.
    /// The shell refreshes the contract list on success.
    pub async fn analyze(&self, file: File) -> Option<String> {
        let api = {
            let mut state = self.state.borrow_mut();
            state.select(&file.name(), file.size());
            if state.begin().is_err() {
                return None;
            }
            state.api.clone()
        };

        let result = api.analyze(&file).await;

        let mut state = self.state.borrow_mut();
        state.in_flight = false;
        match result {
            Ok(report) => serde_json::to_string(&report).ok(),
            Err(err) => {
                state.error = Some(err.to_string());
                None
            }
        }
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    #[wasm_bindgen(getter, js_name = inFlight)]
    pub fn in_flight(&self) -> bool {
        self.state.borrow().in_flight
    }

    #[wasm_bindgen(getter, js_name = fileName)]
    pub fn file_name(&self) -> Option<String> {
        self.state.borrow().file_name.clone()
    }
}
