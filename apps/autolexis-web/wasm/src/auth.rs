//! Sign-in / sign-up flows.
//!
//! Credentials are validated locally before anything is sent; a missing
//! field never produces a network call. Panel state sits behind a
//! scoped `RefCell` so the shell can poll `loading`/`error` while a
//! request is in flight; no borrow is held across an await.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::api::{ApiClient, ApiError};

fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required.".to_string(),
        ));
    }
    Ok(())
}

struct AuthState {
    api: ApiClient,
    error: Option<String>,
    loading: bool,
}

impl AuthState {
    /// Local gate: validation first, then the in-flight latch. Returns
    /// the client handle to run the request on.
    fn begin(&mut self, email: &str, password: &str) -> Result<ApiClient, ()> {
        self.error = None;
        if let Err(err) = validate_credentials(email, password) {
            self.error = Some(err.to_string());
            return Err(());
        }
        if self.loading {
            return Err(());
        }
        self.loading = true;
        Ok(self.api.clone())
    }
}

#[wasm_bindgen]
pub struct AuthPanel {
    state: Rc<RefCell<AuthState>>,
}

#[wasm_bindgen]
impl AuthPanel {
    #[wasm_bindgen(constructor)]
    pub fn new(api: ApiClient) -> AuthPanel {
        Self {
            state: Rc::new(RefCell::new(AuthState {
                api,
                error: None,
                loading: false,
            })),
        }
    }

    /// Exchange credentials for a token. Returns whether the sign-in
    /// succeeded; on failure the message is available via `error`.
    #[wasm_bindgen(js_name = signIn)]
    pub async fn sign_in(&self, email: &str, password: &str) -> bool {
        self.run(email, password, Flow::SignIn).await
    }

    /// Create an account. Does not sign the user in; the shell routes
    /// back to the sign-in page on success.
    #[wasm_bindgen(js_name = signUp)]
    pub async fn sign_up(&self, email: &str, password: &str) -> bool {
        self.run(email, password, Flow::SignUp).await
    }

    #[wasm_bindgen(js_name = signOut)]
    pub fn sign_out(&self) -> Result<(), JsValue> {
        self.state.borrow_mut().api.session_mut().clear_session()
    }

    #[wasm_bindgen(js_name = isAuthenticated)]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().api.is_authenticated()
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }
}

enum Flow {
    SignIn,
    SignUp,
}

impl AuthPanel {
    async fn run(&self, email: &str, password: &str, flow: Flow) -> bool {
        let api = match self.state.borrow_mut().begin(email, password) {
            Ok(api) => api,
            Err(()) => return false,
        };

        let result = match flow {
            Flow::SignIn => api.login(email, password).await.map(Some),
            Flow::SignUp => api.register(email, password).await.map(|()| None),
        };

        let mut state = self.state.borrow_mut();
        state.loading = false;
        match result {
            Ok(Some(token)) => match state.api.session_mut().set_session(&token) {
                Ok(()) => true,
                Err(err) => {
                    state.error = Some(
                        err.as_string()
                            .unwrap_or_else(|| "failed to store session".to_string()),
                    );
                    false
                }
            },
            Ok(None) => true,
            Err(err) => {
                state.error = Some(err.to_string());
                false
            }
        }
    }

    /// Local validation only, for the guard tests; the async flows call
    /// this before touching the network.
    pub fn check_credentials(email: &str, password: &str) -> Result<(), String> {
        validate_credentials(email, password).map_err(|e| e.to_string())
    }
}
