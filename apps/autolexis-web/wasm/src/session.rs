//! Tab-scoped authentication session.
//!
//! The backend token lives in sessionStorage under `auth_token`, so it
//! dies with the tab. Instead of reading ambient storage from every
//! call site, the token is wrapped in an explicit `SessionContext` that
//! gets injected into the API client at construction.

use wasm_bindgen::prelude::*;
use web_sys::Storage;

const TOKEN_KEY: &str = "auth_token";

/// Lifecycle of a session context. Purely informational for the shell;
/// `is_authenticated` is always a storage presence check.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Authenticated,
    Cleared,
}

#[derive(Debug, Clone)]
enum TokenStore {
    Browser(Storage),
    Memory(Option<String>),
}

impl TokenStore {
    fn get(&self) -> Option<String> {
        match self {
            TokenStore::Browser(storage) => storage.get_item(TOKEN_KEY).ok().flatten(),
            TokenStore::Memory(token) => token.clone(),
        }
    }

    fn set(&mut self, token: &str) -> Result<(), JsValue> {
        match self {
            TokenStore::Browser(storage) => storage.set_item(TOKEN_KEY, token),
            TokenStore::Memory(slot) => {
                *slot = Some(token.to_string());
                Ok(())
            }
        }
    }

    fn remove(&mut self) -> Result<(), JsValue> {
        match self {
            TokenStore::Browser(storage) => storage.remove_item(TOKEN_KEY),
            TokenStore::Memory(slot) => {
                *slot = None;
                Ok(())
            }
        }
    }
}

/// Holds the opaque backend token for one tab.
///
/// No expiry or signature validation happens client-side; the backend
/// rejects stale tokens on each request.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct SessionContext {
    store: TokenStore,
    state: SessionState,
}

#[wasm_bindgen]
impl SessionContext {
    /// Browser session backed by the tab's sessionStorage.
    #[wasm_bindgen(js_name = fromWindow)]
    pub fn from_window() -> Result<SessionContext, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let storage = window.session_storage()?.ok_or("No sessionStorage")?;
        Ok(Self::with_store(TokenStore::Browser(storage)))
    }

    #[wasm_bindgen(js_name = setSession)]
    pub fn set_session(&mut self, token: &str) -> Result<(), JsValue> {
        self.store.set(token)?;
        self.state = SessionState::Authenticated;
        Ok(())
    }

    #[wasm_bindgen(js_name = clearSession)]
    pub fn clear_session(&mut self) -> Result<(), JsValue> {
        self.store.remove()?;
        self.state = SessionState::Cleared;
        Ok(())
    }

    /// Presence check only.
    #[wasm_bindgen(js_name = isAuthenticated)]
    pub fn is_authenticated(&self) -> bool {
        self.store.get().is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> SessionState {
        self.state
    }
}

impl SessionContext {
    fn with_store(store: TokenStore) -> Self {
        // A token left by an earlier page load still authenticates the tab.
        let state = if store.get().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Uninitialized
        };
        Self { store, state }
    }

    /// In-memory session for tests and headless use.
    pub fn in_memory() -> Self {
        Self::with_store(TokenStore::Memory(None))
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.store.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut session = SessionContext::in_memory();

        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(!session.is_authenticated());

        session.set_session("tok-123").unwrap();
        assert_eq!(session.state(), SessionState::Authenticated);
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok-123"));

        session.clear_session().unwrap();
        assert_eq!(session.state(), SessionState::Cleared);
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_set_after_clear_reauthenticates() {
        let mut session = SessionContext::in_memory();
        session.set_session("a").unwrap();
        session.clear_session().unwrap();
        session.set_session("b").unwrap();

        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.token().as_deref(), Some("b"));
    }
}
