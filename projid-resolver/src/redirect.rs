//! Redirect guard
//!
//! Turns a total resolution failure into a blocking notice followed by a
//! navigation to a fallback page. Navigation is fire-and-forget: the guard
//! does not wait for the page to be torn down.

use projid_common::{ProjectId, ResolverConfig};
use std::sync::Arc;
use tracing::info;

/// Page-side effects used by the guard
pub trait PageNavigator: Send + Sync {
    /// Show a blocking notice to the user
    fn notify(&self, message: &str);

    /// Start navigating to `destination`
    fn navigate(&self, destination: &str);
}

/// Headless navigator that only records the effects in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl PageNavigator for LoggingNavigator {
    fn notify(&self, message: &str) {
        info!(notice = %message, "Project notice");
    }

    fn navigate(&self, destination: &str) {
        info!(destination = %destination, "Navigating away");
    }
}

/// Terminal state of one guarded resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Resolved(ProjectId),
    Redirecting { destination: String },
}

impl GuardOutcome {
    pub fn project_id(&self) -> Option<&ProjectId> {
        match self {
            GuardOutcome::Resolved(id) => Some(id),
            GuardOutcome::Redirecting { .. } => None,
        }
    }

    pub fn into_project_id(self) -> Option<ProjectId> {
        match self {
            GuardOutcome::Resolved(id) => Some(id),
            GuardOutcome::Redirecting { .. } => None,
        }
    }
}

#[derive(Clone)]
pub struct RedirectGuard {
    navigator: Arc<dyn PageNavigator>,
    notice: String,
    default_destination: String,
}

impl RedirectGuard {
    pub fn new(config: &ResolverConfig, navigator: Arc<dyn PageNavigator>) -> Self {
        Self {
            navigator,
            notice: config.redirect_notice.clone(),
            default_destination: config.fallback_destination.clone(),
        }
    }

    pub fn default_destination(&self) -> &str {
        &self.default_destination
    }

    /// Settle a resolution result
    ///
    /// An absent result shows the notice and navigates, exactly once each,
    /// to `fallback_destination` (or the configured default).
    pub fn settle(&self, resolved: Option<ProjectId>, fallback_destination: Option<&str>) -> GuardOutcome {
        if let Some(id) = resolved {
            return GuardOutcome::Resolved(id);
        }

        let destination = fallback_destination
            .filter(|d| !d.is_empty())
            .unwrap_or(self.default_destination.as_str())
            .to_string();

        info!(destination = %destination, "No project identifier resolved, redirecting");
        self.navigator.notify(&self.notice);
        self.navigator.navigate(&destination);

        GuardOutcome::Redirecting { destination }
    }
}
