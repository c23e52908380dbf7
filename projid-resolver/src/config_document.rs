//! Configuration-document reader
//!
//! The configuration document is a static JSON file served next to the
//! pages, e.g. `{ "currentProjectId": "p_42" }`. It is always fetched fresh:
//! a cached copy could point at the wrong project.

use crate::probe::Probe;
use async_trait::async_trait;
use projid_common::{Error, ProjectId, ResolverConfig, Result};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

/// Document field holding the current identifier
pub const CURRENT_PROJECT_FIELD: &str = "currentProjectId";

/// Source of the configuration document
#[async_trait]
pub trait ConfigDocumentSource: Send + Sync {
    /// Fetch and decode the document
    ///
    /// Network failures, non-success statuses and undecodable bodies are
    /// errors. Any decodable JSON is returned as-is.
    async fn fetch_document(&self) -> Result<Value>;
}

/// Fetches the configuration document over HTTP
#[derive(Debug, Clone)]
pub struct HttpConfigSource {
    http_client: reqwest::Client,
    url: Url,
}

impl HttpConfigSource {
    /// Build a source for `document_path` resolved against `page_base_url`
    ///
    /// No request timeout is applied unless one is given.
    pub fn new(page_base_url: &str, document_path: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(page_base_url)
            .map_err(|e| Error::Config(format!("Invalid page base URL '{}': {}", page_base_url, e)))?;
        let url = base
            .join(document_path)
            .map_err(|e| Error::Config(format!("Invalid document path '{}': {}", document_path, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::Config(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { http_client, url })
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Self::new(
            &config.page_base_url,
            &config.config_document_path,
            config.fetch_timeout(),
        )
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ConfigDocumentSource for HttpConfigSource {
    async fn fetch_document(&self) -> Result<Value> {
        tracing::debug!(url = %self.url, "Fetching configuration document");

        let response = self
            .http_client
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| Error::Parse(e.to_string()))
    }
}

/// Identifier carried by a decoded document, if any
///
/// Any shape other than an object with a non-empty string field reads as
/// "field absent".
pub fn current_project_id(document: &Value) -> Option<ProjectId> {
    document
        .get(CURRENT_PROJECT_FIELD)
        .and_then(Value::as_str)
        .and_then(ProjectId::new)
}

/// Fetch the document once and extract the identifier
pub async fn read_config_document(source: &dyn ConfigDocumentSource) -> Probe {
    match source.fetch_document().await {
        Ok(document) => match current_project_id(&document) {
            Some(id) => Probe::Found(id),
            None => Probe::Absent,
        },
        Err(e) => Probe::Failed(format!("configuration document: {}", e)),
    }
}
