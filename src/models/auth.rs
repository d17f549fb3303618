use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    /// Reported by the backend (either an ISO string or epoch seconds) but
    /// never enforced client-side
    #[serde(default)]
    pub expiration: Option<Value>,
}
