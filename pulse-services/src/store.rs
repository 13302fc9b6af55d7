//! Object store adapters.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use pulse_core::{ObjectStore, PulseError};

use crate::http;

/// Buckets as directories under a root; keys may contain `/`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn locate(&self, op: &str, bucket: &str, key: &str) -> Result<PathBuf, PulseError> {
        let rel = Path::new(bucket).join(key);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if bucket.is_empty() || key.is_empty() || escapes {
            return Err(PulseError::storage(op, bucket, key, "invalid bucket or key"));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    fn name(&self) -> &'static str {
        "fs"
    }

    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), PulseError> {
        let path = self.locate("put", bucket, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PulseError::storage("put", bucket, key, e.to_string()))?;
        }
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| PulseError::storage("put", bucket, key, e.to_string()))
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, PulseError> {
        let path = self.locate("get", bucket, key)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| PulseError::storage("get", bucket, key, e.to_string()))
    }
}

/// Path-style HTTP object store: `PUT`/`GET {base}/{bucket}/{key}`.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl HttpObjectStore {
    /// Store served from `base`.
    ///
    /// # Errors
    /// Returns `PulseError::InvalidArg` for a malformed URL.
    pub fn new(base: &str) -> Result<Self, PulseError> {
        Ok(Self {
            http: http::client()?,
            base: http::base_url(base)?,
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: reqwest::Method, bucket: &str, key: &str) -> reqwest::RequestBuilder {
        let req = self
            .http
            .request(method, format!("{}/{bucket}/{key}", self.base));
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), PulseError> {
        let resp = self
            .request(reqwest::Method::PUT, bucket, key)
            .body(body)
            .send()
            .await
            .map_err(|e| PulseError::storage("put", bucket, key, e.to_string()))?;
        if !resp.status().is_success() {
            return Err(PulseError::storage("put", bucket, key, http::failure(resp).await));
        }
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, PulseError> {
        let resp = self
            .request(reqwest::Method::GET, bucket, key)
            .send()
            .await
            .map_err(|e| PulseError::storage("get", bucket, key, e.to_string()))?;
        if !resp.status().is_success() {
            return Err(PulseError::storage("get", bucket, key, http::failure(resp).await));
        }
        resp.bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| PulseError::storage("get", bucket, key, e.to_string()))
    }
}
