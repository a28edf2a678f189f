use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("CSRF token meta tag is missing from the page")]
    MissingCsrfToken,
    #[error("Element not found: {0}")]
    MissingElement(&'static str),
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Invalid queue snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<JsValue> for DashboardError {
    fn from(value: JsValue) -> Self {
        DashboardError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
