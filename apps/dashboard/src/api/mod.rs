//! Typed client for the JobAgent backend, one method per backend operation.
//!
//! Request and response shapes are backend-owned; this layer only serializes
//! bodies, routes them through the dispatch adapter and decodes the result.
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::errors::ClientError;
use crate::http::{ApiRequest, CredentialStore, Dispatch};

mod auth;
mod jobs;
mod me;

#[derive(Clone)]
pub struct ApiClient {
    dispatcher: Arc<dyn Dispatch>,
    credentials: CredentialStore,
}

impl ApiClient {
    pub fn new(dispatcher: Arc<dyn Dispatch>, credentials: CredentialStore) -> Self {
        Self {
            dispatcher,
            credentials,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Sends one request and decodes the 2xx body, or propagates the failure unchanged.
    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let method = request.method.clone();
        let path = request.path.clone();

        let response = self.dispatcher.send(request).await?;
        let response = response.error_for_status().map_err(|e| {
            warn!("{method} {path} failed: {e}");
            e
        })?;
        response.decode()
    }
}
