//! Setup errors for the page subsystems.

use thiserror::Error;

pub type SetupResult<T> = Result<T, SetupError>;

/// Errors raised while wiring a subsystem to the page.
///
/// Nothing fails once a subsystem is running; these only occur during mount.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A required element is absent from the document
    #[error("element `{0}` not found")]
    MissingElement(&'static str),

    /// The canvas refused to hand out a 2D context
    #[error("2d rendering context unavailable")]
    NoContext,

    /// A browser API call threw
    #[error("browser call failed: {0}")]
    Js(String),

    /// The embedded config block is not valid JSON for [`crate::config::Config`]
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<wasm_bindgen::JsValue> for SetupError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SetupError::Js(format!("{value:?}"))
    }
}

impl From<SetupError> for wasm_bindgen::JsValue {
    fn from(err: SetupError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
