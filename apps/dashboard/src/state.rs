use std::sync::Arc;

use crate::api::ApiClient;
use crate::query::QueryCache;
use crate::session::{CachedIdentity, IdentitySource};

/// Shared client state handed to every page and feature component.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub queries: QueryCache,
}

impl AppState {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            queries: QueryCache::new(),
        }
    }

    /// Identity resolution backed by the shared query cache.
    pub fn identity(&self) -> Arc<dyn IdentitySource> {
        Arc::new(CachedIdentity::new(self.api.clone(), self.queries.clone()))
    }
}
