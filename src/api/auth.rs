use super::ApiClient;
use crate::error::ConsoleError;
use crate::models::{LoginRequest, LoginResponse};

/// Token acquisition against `/api/auth`.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    client: ApiClient,
}

impl AuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a token and records both token and username
    /// in the client's session.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ConsoleError> {
        let url = self.client.url(["api", "auth", "login"]);
        let response: LoginResponse = self.client.post_public_json(url, credentials).await?;
        self.client.session().store(&response.token, &response.username)?;
        Ok(response)
    }

    pub fn logout(&self) -> Result<(), ConsoleError> {
        self.client.session().logout()
    }
}
