//! Authenticated HTTP plumbing to the analysis backend.
//!
//! Thin fetch wrapper: attaches the bearer token from the injected
//! session, surfaces backend error payloads to callers unmodified, and
//! decodes success bodies into the shared wire types. No retries; every
//! failure is terminal for the action that triggered it.

use contract_types::{AnalysisReport, ContractRecord, VehicleDetails};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

use crate::session::SessionContext;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Caught before any network call; rendered inline by the panels.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with an error payload.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered 2xx with a body we cannot decode.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<ApiError> for JsValue {
    fn from(err: ApiError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

pub(crate) fn js_error(err: JsValue) -> ApiError {
    ApiError::Network(
        err.as_string()
            .unwrap_or_else(|| "request failed".to_string()),
    )
}

/// Backend error payloads surface unmodified: `detail` first (the
/// backend's validation errors), then `error`, else a generic fallback.
fn backend_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["detail", "error"] {
            if let Some(message) = value.get(field).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    format!("request failed with status {status}")
}

/// Decode a success body. The backend reports some analysis failures as
/// 200s carrying only an error field; those still surface as backend
/// errors rather than decode errors.
fn decode<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(err) => {
            let reported = serde_json::from_str::<serde_json::Value>(text)
                .ok()
                .and_then(|value| {
                    ["detail", "error"].iter().find_map(|field| {
                        value
                            .get(field)
                            .and_then(|m| m.as_str())
                            .map(str::to_owned)
                    })
                });
            match reported {
                Some(message) => Err(ApiError::Backend {
                    status: 200,
                    message,
                }),
                None => Err(ApiError::Decode(err.to_string())),
            }
        }
    }
}

/// HTTP client bound to one backend base URL and one session context.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    session: SessionContext,
}

#[wasm_bindgen]
impl ApiClient {
    #[wasm_bindgen(constructor)]
    pub fn new(base_url: &str, session: SessionContext) -> ApiClient {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Fresh handle over the same base URL and session backing, for
    /// panels that each own their client.
    #[wasm_bindgen(js_name = cloneClient)]
    pub fn clone_client(&self) -> ApiClient {
        self.clone()
    }

    #[wasm_bindgen(js_name = isAuthenticated)]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    #[wasm_bindgen(getter, js_name = baseUrl)]
    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }
}

impl ApiClient {
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionContext {
        &mut self.session
    }

    fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<&JsValue>,
        content_type: Option<&str>,
    ) -> Result<Request, ApiError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            opts.set_body(body);
        }

        let url = format!("{}{}", self.base_url, path);
        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;

        if let Some(content_type) = content_type {
            request
                .headers()
                .set("Content-Type", content_type)
                .map_err(js_error)?;
        }
        if let Some(token) = self.session.token() {
            request
                .headers()
                .set("Authorization", &format!("Bearer {token}"))
                .map_err(js_error)?;
        }
        Ok(request)
    }

    async fn send(&self, request: Request) -> Result<String, ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ApiError::Network("fetch did not yield a Response".into()))?;

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        if !response.ok() {
            let status = response.status();
            return Err(ApiError::Backend {
                status,
                message: backend_message(&text, status),
            });
        }
        Ok(text)
    }

    async fn get(&self, path: &str) -> Result<String, ApiError> {
        let request = self.request("GET", path, None, None)?;
        self.send(request).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String, ApiError> {
        let body_str =
            serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let request = self.request(
            "POST",
            path,
            Some(&JsValue::from_str(&body_str)),
            Some("application/json"),
        )?;
        self.send(request).await
    }

    async fn post_file(&self, path: &str, file: &File) -> Result<String, ApiError> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob("file", file).map_err(js_error)?;
        // No explicit Content-Type: the browser sets the multipart boundary.
        let request = self.request("POST", path, Some(form.as_ref()), None)?;
        self.send(request).await
    }

    /// POST /auth/login. Returns the backend token; the caller decides
    /// which session context stores it.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        #[derive(serde::Deserialize)]
        struct TokenResponse {
            token: String,
        }

        let body = serde_json::json!({ "email": email, "password": password });
        let text = self.post_json("/auth/login", &body).await?;
        let response: TokenResponse = decode(&text)?;
        Ok(response.token)
    }

    /// POST /auth/register. Success body is ignored.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.post_json("/auth/register", &body).await?;
        Ok(())
    }

    /// POST /analyze: upload a PDF and run the full analysis pipeline.
    pub async fn analyze(&self, file: &File) -> Result<AnalysisReport, ApiError> {
        decode(&self.post_file("/analyze", file).await?)
    }

    /// POST /upload: alternate ingestion path, arbitrary JSON back.
    pub async fn upload(&self, file: &File) -> Result<serde_json::Value, ApiError> {
        decode(&self.post_file("/upload", file).await?)
    }

    /// GET /contracts.
    pub async fn contracts(&self) -> Result<Vec<ContractRecord>, ApiError> {
        decode(&self.get("/contracts").await?)
    }

    /// GET /compare?ids=a,b,c.
    pub async fn compare(&self, ids: &[i64]) -> Result<Vec<ContractRecord>, ApiError> {
        let ids = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        decode(&self.get(&format!("/compare?ids={ids}")).await?)
    }

    /// GET /vin/{vin}.
    pub async fn vin(&self, vin: &str) -> Result<VehicleDetails, ApiError> {
        decode(&self.get(&format!("/vin/{vin}")).await?)
    }
}
