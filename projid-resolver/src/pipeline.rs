//! Resolution pipeline
//!
//! Sources are consulted in fixed precedence order:
//! 1. Request parameters (`projectId`, then `id`)
//! 2. Configuration document (network fetch, the only suspension point)
//! 3. Persistent store
//!
//! The first source that yields an identifier wins; later sources are not
//! consulted. Each source is tried exactly once per call, with no retries.
//! A found identifier is written back to the store before it is returned.

use crate::config_document::{read_config_document, ConfigDocumentSource};
use crate::params::{read_request_params, RequestParams};
use crate::probe::{Probe, Source};
use crate::write_back::WriteBack;
use projid_common::{KeyValueStore, ProjectId, ResolverConfig};
use std::sync::Arc;
use tracing::debug;

/// A resolved identifier and the source that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub project_id: ProjectId,
    pub source: Source,
}

/// Persistent-store reader: the slot's value, or absent
pub fn read_store(store: &dyn KeyValueStore, key: &str) -> Probe {
    match store.get(key) {
        Ok(value) => Probe::from_value(value),
        Err(e) => Probe::Failed(format!("persistent store: {}", e)),
    }
}

/// Ordered, short-circuiting resolution over the three sources
#[derive(Clone)]
pub struct ResolutionPipeline {
    primary_param: String,
    fallback_param: String,
    config_source: Arc<dyn ConfigDocumentSource>,
    store: Arc<dyn KeyValueStore>,
    write_back: WriteBack,
}

impl ResolutionPipeline {
    pub fn new(
        config: &ResolverConfig,
        config_source: Arc<dyn ConfigDocumentSource>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            primary_param: config.primary_param.clone(),
            fallback_param: config.fallback_param.clone(),
            write_back: WriteBack::new(Arc::clone(&store), config.store_key.clone()),
            config_source,
            store,
        }
    }

    pub fn write_back(&self) -> &WriteBack {
        &self.write_back
    }

    /// Resolve the identifier, or `None` when every source is empty
    pub async fn resolve_identifier(&self, params: &RequestParams) -> Option<ProjectId> {
        self.resolve_detailed(params)
            .await
            .map(|resolution| resolution.project_id)
    }

    /// Resolve the identifier and report which source produced it
    pub async fn resolve_detailed(&self, params: &RequestParams) -> Option<Resolution> {
        let resolution = self.first_found(params).await?;

        // Write-before-return: the slot holds the value the caller receives
        self.write_back
            .persist_logged(Some(resolution.project_id.as_str()));

        Some(resolution)
    }

    async fn first_found(&self, params: &RequestParams) -> Option<Resolution> {
        let probe = read_request_params(params, &self.primary_param, &self.fallback_param);
        if let Some(project_id) = probe.observe(Source::RequestParams) {
            return Some(Resolution {
                project_id,
                source: Source::RequestParams,
            });
        }

        let probe = read_config_document(self.config_source.as_ref()).await;
        if let Some(project_id) = probe.observe(Source::ConfigDocument) {
            return Some(Resolution {
                project_id,
                source: Source::ConfigDocument,
            });
        }

        let probe = read_store(self.store.as_ref(), self.write_back.key());
        if let Some(project_id) = probe.observe(Source::LocalStore) {
            return Some(Resolution {
                project_id,
                source: Source::LocalStore,
            });
        }

        debug!("No source produced a project identifier");
        None
    }
}
