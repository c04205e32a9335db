//! Log-in and sign-up forms on the login page.
use tracing::{error, info};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{Candidate, CreateCandidateRequest, TokenResponse};
use crate::session::Session;

/// Fallback shown by both forms when the backend sends no `detail`.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pending: bool,
    error: Option<String>,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.pending && !self.email.trim().is_empty() && !self.password.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Exchanges the credentials for a token, then re-resolves the session.
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        session: &mut Session,
    ) -> Result<TokenResponse, ClientError> {
        if !self.can_submit() {
            return Err(ClientError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        self.pending = true;
        self.error = None;
        let result = api.login(self.email.trim(), &self.password).await;
        self.pending = false;

        match result {
            Ok(token) => {
                session.refresh_user().await;
                self.password.clear();
                Ok(token)
            }
            Err(e) => {
                error!("Login failed: {e}");
                self.error = Some(e.message_or(UNKNOWN_ERROR));
                Err(e)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pending: bool,
    error: Option<String>,
}

impl SignupForm {
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }

    pub fn can_submit(&self) -> bool {
        let filled = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.password,
            &self.confirm_password,
        ]
        .iter()
        .all(|field| !field.is_empty());
        !self.pending && filled && self.passwords_match()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn submit(&mut self, api: &ApiClient) -> Result<Candidate, ClientError> {
        if !self.can_submit() {
            let message = if self.passwords_match() {
                "All fields are required"
            } else {
                "Password does not match."
            };
            return Err(ClientError::Validation(message.to_string()));
        }

        let request = CreateCandidateRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        };

        self.pending = true;
        self.error = None;
        let result = api.register(&request).await;
        self.pending = false;

        result
            .map(|candidate| {
                info!("Registered candidate {}", candidate.id);
                candidate
            })
            .map_err(|e| {
                error!("Registration failed: {e}");
                self.error = Some(e.message_or(UNKNOWN_ERROR));
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::http::mock::{client, MockDispatcher};
    use crate::session::CachedIdentity;
    use crate::state::AppState;

    fn signup() -> SignupForm {
        SignupForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            ..SignupForm::default()
        }
    }

    #[tokio::test]
    async fn test_login_captures_token_and_refreshes_session() {
        let mock = MockDispatcher::new();
        mock.respond_json(
            Method::POST,
            "/auth/token",
            200,
            json!({"access_token": "tok-1", "token_type": "bearer"}),
        );
        mock.respond_json(
            Method::GET,
            "/me/",
            200,
            json!({"id": 1, "first_name": "Jane", "last_name": "Doe",
                   "email": "jane@example.com"}),
        );
        let state = AppState::new(client(&mock));
        let mut session = Session::new(state.identity());
        let mut form = LoginForm::new("jane@example.com", "hunter22");

        let token = form.submit(&state.api, &mut session).await.unwrap();

        assert_eq!(token.access_token, "tok-1");
        assert_eq!(state.api.credentials().token().as_deref(), Some("tok-1"));
        assert_eq!(session.user().unwrap().first_name, "Jane");
        assert!(form.password.is_empty());
    }

    #[tokio::test]
    async fn test_login_failure_shows_detail() {
        let mock = MockDispatcher::new();
        mock.respond_json(
            Method::POST,
            "/auth/token",
            401,
            json!({"detail": "Incorrect username or password"}),
        );
        let api = client(&mock);
        let mut session = Session::new(Arc::new(CachedIdentity::new(
            api.clone(),
            Default::default(),
        )));
        let mut form = LoginForm::new("jane@example.com", "wrong");

        assert!(form.submit(&api, &mut session).await.is_err());
        assert_eq!(form.error(), Some("Incorrect username or password"));
        assert_eq!(mock.calls_to(Method::GET, "/me/"), 0);
    }

    #[test]
    fn test_signup_requires_matching_passwords() {
        let mut form = signup();
        assert!(form.can_submit());

        form.confirm_password = "hunter2".to_string();
        assert!(!form.passwords_match());
        assert!(!form.can_submit());

        form.confirm_password = form.password.clone();
        form.phone.clear();
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn test_signup_failure_without_detail_is_unknown_error() {
        let mock = MockDispatcher::new();
        mock.respond_json(Method::POST, "/auth/register", 500, json!({}));
        let mut form = signup();

        assert!(form.submit(&client(&mock)).await.is_err());
        assert_eq!(form.error(), Some(UNKNOWN_ERROR));
    }

    #[tokio::test]
    async fn test_signup_sends_candidate() {
        let mock = MockDispatcher::new();
        mock.respond_json(
            Method::POST,
            "/auth/register",
            200,
            json!({"id": 5, "first_name": "Jane", "last_name": "Doe",
                   "email": "jane@example.com", "phone": "+1 555 0100"}),
        );
        let mut form = signup();

        let candidate = form.submit(&client(&mock)).await.unwrap();
        assert_eq!(candidate.id, 5);
        let body = mock
            .last_request_to(Method::POST, "/auth/register")
            .unwrap()
            .json_body()
            .cloned()
            .unwrap();
        assert_eq!(body["email"], "jane@example.com");
        assert!(body.get("confirm_password").is_none());
    }
}
