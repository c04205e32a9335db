//! Session hook: who is signed in right now.
//!
//! Identity is an explicit, re-runnable query behind `IdentitySource` rather than
//! a process-wide singleton, so any session state can be injected in tests.
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::Candidate;
use crate::query::{keys, QueryCache};

/// Snapshot the route guard and pages render from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<Candidate>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
            error: None,
        }
    }

    pub fn authenticated(user: Candidate) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
            error: None,
        }
    }

    pub fn anonymous(error: Option<String>) -> Self {
        Self {
            user: None,
            is_loading: false,
            error,
        }
    }
}

#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Resolves the current identity. `refresh` bypasses any cached answer.
    async fn current_user(&self, refresh: bool) -> Result<Candidate, ClientError>;
}

/// `GET /me/` through the query cache, so concurrent lookups share one request.
pub struct CachedIdentity {
    api: ApiClient,
    queries: QueryCache,
}

impl CachedIdentity {
    pub fn new(api: ApiClient, queries: QueryCache) -> Self {
        Self { api, queries }
    }
}

#[async_trait]
impl IdentitySource for CachedIdentity {
    async fn current_user(&self, refresh: bool) -> Result<Candidate, ClientError> {
        let api = self.api.clone();
        let fetcher = move || async move { api.get_me().await };
        if refresh {
            self.queries.refetch(&keys::me(), fetcher).await
        } else {
            self.queries.fetch(&keys::me(), fetcher).await
        }
    }
}

pub struct Session {
    source: Arc<dyn IdentitySource>,
    state: SessionState,
    mounted: bool,
}

impl Session {
    pub fn new(source: Arc<dyn IdentitySource>) -> Self {
        Self {
            source,
            state: SessionState::loading(),
            mounted: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&Candidate> {
        self.state.user.as_ref()
    }

    /// Issues the identity fetch once per mount. Later calls are no-ops.
    pub async fn mount(&mut self) -> &SessionState {
        if !self.mounted {
            self.mounted = true;
            self.resolve(false).await;
        }
        &self.state
    }

    /// Re-issues the identity fetch on demand.
    pub async fn refresh_user(&mut self) -> &SessionState {
        self.mounted = true;
        self.resolve(true).await;
        &self.state
    }

    async fn resolve(&mut self, refresh: bool) {
        self.state = match self.source.current_user(refresh).await {
            Ok(user) => {
                debug!("Session resolved for candidate {}", user.id);
                SessionState::authenticated(user)
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    warn!("Failed to resolve current user: {e}");
                }
                SessionState::anonymous(Some(e.user_message()))
            }
        };
    }
}
