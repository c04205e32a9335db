use tracing::info;

use super::ApiClient;
use crate::errors::ClientError;
use crate::http::ApiRequest;
use crate::models::{Candidate, CreateCandidateRequest, HealthStatus, TokenResponse};

impl ApiClient {
    /// POST /auth/register
    pub async fn register(&self, request: &CreateCandidateRequest) -> Result<Candidate, ClientError> {
        self.call(ApiRequest::post("/auth/register").json(request)?)
            .await
    }

    /// POST /auth/token
    ///
    /// OAuth2 password flow: the email travels as `username`, form-encoded.
    /// The returned token is captured so every later call carries it.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ClientError> {
        let token: TokenResponse = self
            .call(ApiRequest::post("/auth/token").form(&[("username", email), ("password", password)]))
            .await?;
        self.credentials.set_token(Some(token.access_token.clone()));
        info!("Authenticated as {email}");
        Ok(token)
    }

    /// Forgets the captured token. The backend keeps no server-side session to end.
    pub fn logout(&self) {
        self.credentials.clear();
    }

    /// GET /health
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.call(ApiRequest::get("/health")).await
    }
}
