//! HTTP dispatch adapter. Every API call leaves the client through here.
//!
//! Requests are merged with the configured base endpoint and carry the
//! credential-forwarding flag (cookie store plus the captured bearer token).
//! One attempt per call, with no retry or backoff.
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::ClientError;

#[cfg(test)]
pub mod mock;

/// Session cookies accompany every call, cross-origin included.
pub const WITH_CREDENTIALS: bool = true;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
    Multipart(Vec<MultipartPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartContent {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Bytes,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    pub name: String,
    pub content: PartContent,
}

impl MultipartPart {
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            content: PartContent::Text(value.to_string()),
        }
    }

    pub fn file(name: &str, file_name: &str, content_type: &str, bytes: Bytes) -> Self {
        Self {
            name: name.to_string(),
            content: PartContent::File {
                file_name: file_name.to_string(),
                content_type: content_type.to_string(),
                bytes,
            },
        }
    }
}

/// Request descriptor handed to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = RequestBody::Form(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// The JSON body, if any. Mostly useful for asserting on recorded requests.
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(v) => Some(v),
            _ => None,
        }
    }
}

/// Raw response handed back by the dispatcher before decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Converts a non-2xx response into `ClientError::Api`, keeping the structured payload.
    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::from_response(self.status, &self.body))
        }
    }

    /// Decodes the body into the caller's expected shape.
    /// Empty bodies (e.g. 204) decode as JSON `null`, which satisfies `()` and `Option<T>`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        let body: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        Ok(serde_json::from_slice(body)?)
    }
}

/// Seam between the API client and the network.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// Holds the bearer token captured at login. Shared by every clone.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    token: Arc<RwLock<Option<String>>>,
}

impl CredentialStore {
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    pub fn clear(&self) {
        self.set_token(None);
    }
}

/// reqwest-backed dispatcher pointed at the configured API base endpoint.
#[derive(Clone)]
pub struct HttpDispatcher {
    client: Client,
    base_url: Url,
    credentials: CredentialStore,
}

impl HttpDispatcher {
    pub fn new(base_url: Url, credentials: CredentialStore) -> Result<Self, ClientError> {
        let client = Client::builder().cookie_store(WITH_CREDENTIALS).build()?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends the request path to the base endpoint, keeping any path prefix the base carries.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(join_endpoint(&self.base_url, path)?)
    }
}

fn join_endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let base = base.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Url::parse(&format!("{base}/{path}"))
}

fn build_form(parts: Vec<MultipartPart>) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for part in parts {
        form = match part.content {
            PartContent::Text(value) => form.text(part.name, value),
            PartContent::File {
                file_name,
                content_type,
                bytes,
            } => {
                let file = Part::bytes(bytes.to_vec())
                    .file_name(file_name)
                    .mime_str(&content_type)?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl Dispatch for HttpDispatcher {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(&request.path)?;
        debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let mut has_authorization = false;
        for (key, value) in &request.headers {
            has_authorization |= key.eq_ignore_ascii_case(AUTHORIZATION.as_str());
            builder = builder.header(key.as_str(), value.as_str());
        }
        if !has_authorization {
            if let Some(token) = self.credentials.token() {
                builder = builder.bearer_auth(token);
            }
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!("{} {} -> {}", request.method, request.path, status);
        Ok(ApiResponse { status, body })
    }
}
