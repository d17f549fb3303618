// Console Error Types
use serde_json::Value;

/// Errors surfaced by gateways, controllers and the backup console
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Client-side form validation failed; no request was issued
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-success status
    #[error("{}", api_message(.message))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Not logged in")]
    NotLoggedIn,
}

fn api_message(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("request failed")
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::Validation(message.into())
    }

    /// Build an API error from a status code and the raw response body.
    ///
    /// The backend reports failures as `{"message": "..."}`; any other body
    /// leaves the message empty so callers fall back to their own text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|message| !message.is_empty());

        ConsoleError::Api { status, message }
    }

    /// HTTP status code, when the error came from the backend
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ConsoleError::Api { status, .. } => Some(*status),
            ConsoleError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401) | Some(403))
    }

    /// Text shown to the operator: validation text, else the server-provided
    /// message, else the per-action fallback.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ConsoleError::Validation(message) => message.clone(),
            ConsoleError::Api { message: Some(message), .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Stable code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::Validation(_) => "VALIDATION_ERROR",
            ConsoleError::Api { status: 401, .. } => "UNAUTHORIZED",
            ConsoleError::Api { status: 403, .. } => "FORBIDDEN",
            ConsoleError::Api { status: 404, .. } => "NOT_FOUND",
            ConsoleError::Api { status: 409, .. } => "CONFLICT",
            ConsoleError::Api { status, .. } if *status >= 500 => "SERVER_ERROR",
            ConsoleError::Api { .. } => "BAD_REQUEST",
            ConsoleError::Transport(_) => "TRANSPORT_ERROR",
            ConsoleError::Io(_) => "IO_ERROR",
            ConsoleError::Json(_) => "INVALID_JSON",
            ConsoleError::InvalidUrl(_) => "INVALID_URL",
            ConsoleError::NotLoggedIn => "NOT_LOGGED_IN",
        }
    }
}
