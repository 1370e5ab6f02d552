use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring a component to the browser.
#[derive(Debug, Error)]
pub enum HostError {
	#[error("no global window")]
	NoWindow,
	#[error("canvas has no 2d context")]
	NoContext,
	#[error("browser call failed: {0}")]
	Js(String),
}

impl From<JsValue> for HostError {
	fn from(value: JsValue) -> Self {
		HostError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
