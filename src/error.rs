use wasm_bindgen::JsValue;

/// Rejected uploader configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("attribute `{attribute}` expects a non-negative integer, got {value:?}")]
    InvalidNumber { attribute: String, value: String },
    #[error("min ({min}) is greater than max ({max})")]
    MinExceedsMax { min: usize, max: usize },
    #[error("max-file-size must be greater than zero")]
    ZeroMaxFileSize,
}

/// A browser API call made on behalf of the host form failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HostError {
    #[error("browser rejected the call: {0}")]
    Js(String),
    #[error("native file input is not mounted")]
    Detached,
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        let message = if let Some(err) = value.as_string() {
            err
        } else if let Some(err) = js_sys::Error::from(value).message().as_string() {
            err
        } else {
            "Unknown error".to_string()
        };

        HostError::Js(message)
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
