use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("{0}")]
    Server(String),

    /// The reply carried neither a result nor an `error` field.
    #[error("Unknown error")]
    NoOutcome,

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The draft could not be serialized for sending.
    #[error("Could not prepare the request: {0}")]
    Encode(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

impl ControllerError {
    /// Text shown to the user in a notice. Server messages pass through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ControllerError::Server(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn from_js(value: JsValue) -> Self {
        ControllerError::Browser(describe_js(&value))
    }

    pub fn transport_from_js(value: JsValue) -> Self {
        ControllerError::Transport(describe_js(&value))
    }
}

fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
