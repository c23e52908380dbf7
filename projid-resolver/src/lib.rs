//! projid-resolver - Project identifier resolution for client pages
//!
//! Resolves the current project identifier from an ordered chain of sources
//! (request parameters, configuration document, persistent store), writes a
//! resolved value back to the store, and redirects the page when nothing
//! can be resolved.

use projid_common::{KeyValueStore, ProjectId, ResolverConfig, Result, TomlFileStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config_document;
pub mod params;
pub mod pipeline;
pub mod probe;
pub mod redirect;
pub mod write_back;

pub use config_document::{ConfigDocumentSource, HttpConfigSource};
pub use params::RequestParams;
pub use pipeline::{Resolution, ResolutionPipeline};
pub use probe::{Probe, Source};
pub use redirect::{GuardOutcome, LoggingNavigator, PageNavigator, RedirectGuard};
pub use write_back::WriteBack;

/// Page-facing resolver surface
///
/// None of the operations fail: every source failure degrades to "try the
/// next source" and is logged as a warning.
#[derive(Clone)]
pub struct ProjectIdResolver {
    pipeline: ResolutionPipeline,
    guard: RedirectGuard,
}

impl ProjectIdResolver {
    /// Create a resolver from explicit collaborators
    pub fn new(
        config: &ResolverConfig,
        store: Arc<dyn KeyValueStore>,
        config_source: Arc<dyn ConfigDocumentSource>,
        navigator: Arc<dyn PageNavigator>,
    ) -> Self {
        Self {
            pipeline: ResolutionPipeline::new(config, config_source, store),
            guard: RedirectGuard::new(config, navigator),
        }
    }

    /// Create a resolver with the HTTP document source, the TOML file store
    /// and the logging navigator
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        let store = TomlFileStore::new(config.resolved_store_path());
        let config_source = HttpConfigSource::from_config(config)?;

        tracing::info!(
            document = %config_source.url(),
            store = %store.path().display(),
            "Project identifier resolver configured"
        );

        Ok(Self::new(
            config,
            Arc::new(store),
            Arc::new(config_source),
            Arc::new(LoggingNavigator),
        ))
    }

    /// Resolve the current project identifier
    pub async fn get_project_id(&self, params: &RequestParams) -> Option<ProjectId> {
        self.pipeline.resolve_identifier(params).await
    }

    /// Resolve, reporting which source produced the identifier
    pub async fn get_project_id_detailed(&self, params: &RequestParams) -> Option<Resolution> {
        self.pipeline.resolve_detailed(params).await
    }

    /// Set the identifier directly, bypassing resolution
    ///
    /// Empty or absent input leaves the store untouched.
    pub fn set_project_id(&self, identifier: Option<&str>) {
        self.pipeline.write_back().persist_logged(identifier);
    }

    /// Resolve, redirecting to `fallback_destination` when nothing is found
    ///
    /// Defaults to the configured destination (`dashboard.html`).
    pub async fn ensure_project_id_or_redirect(
        &self,
        params: &RequestParams,
        fallback_destination: Option<&str>,
    ) -> Option<ProjectId> {
        self.ensure_outcome(params, fallback_destination)
            .await
            .into_project_id()
    }

    /// `ensure_project_id_or_redirect`, returning the guard's terminal state
    pub async fn ensure_outcome(
        &self,
        params: &RequestParams,
        fallback_destination: Option<&str>,
    ) -> GuardOutcome {
        let resolved = self.pipeline.resolve_identifier(params).await;
        self.guard.settle(resolved, fallback_destination)
    }
}

/// Install a fmt subscriber filtered by `RUST_LOG`
///
/// Does nothing if the host already installed a global subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "projid_resolver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
