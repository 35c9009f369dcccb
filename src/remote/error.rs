use derive_more::Display;
use serde_json::Value;

/// Last-resort message when neither the server nor the transport said anything.
pub const GENERIC_ERROR: &str = "An error occurred";

/// Failure talking to the remote payroll API. `Display` is the message shown
/// to the operator.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Non-2xx response.
    #[display(fmt = "Error: {} - {}", status, message)]
    Server { status: u16, message: String },

    /// 2xx response whose envelope did not carry `isSuccess: true`.
    #[display(fmt = "{}", _0)]
    Rejected(String),

    /// 2xx response other than 200/204 to an update.
    #[display(fmt = "Unexpected response status: {}", _0)]
    UnexpectedStatus(u16),

    #[display(fmt = "{}", _0)]
    Network(reqwest::Error),

    #[display(fmt = "{}", _0)]
    Decode(String),
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e)
    }
}

impl ApiError {
    pub fn server(status: u16, body: &[u8]) -> Self {
        ApiError::Server {
            status,
            message: message_from_body(body).unwrap_or_else(|| GENERIC_ERROR.to_string()),
        }
    }

    pub fn rejected(message: Option<String>) -> Self {
        ApiError::Rejected(message.unwrap_or_else(|| GENERIC_ERROR.to_string()))
    }

    pub fn unexpected_format() -> Self {
        ApiError::Decode("Unexpected data format received from API".to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } | ApiError::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

/// Non-empty `message` string of a JSON object.
pub fn envelope_message(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Operator-facing text of an error body: the JSON `message` field, else the
/// JSON itself, else the raw text.
pub fn message_from_body(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => envelope_message(&value).or_else(|| match value {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }),
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        }
    }
}
