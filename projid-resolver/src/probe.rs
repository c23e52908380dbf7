//! Per-source probe outcomes

use projid_common::ProjectId;
use std::fmt;
use tracing::{debug, warn};

/// Identifier sources, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    RequestParams,
    ConfigDocument,
    LocalStore,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::RequestParams => "request_params",
            Source::ConfigDocument => "config_document",
            Source::LocalStore => "local_store",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged result of one source reader
///
/// `Failed` and `Absent` both mean "try the next source"; they differ only
/// in how they are logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Found(ProjectId),
    Failed(String),
    Absent,
}

impl Probe {
    /// Collapse to the public contract, logging misses
    pub fn observe(self, source: Source) -> Option<ProjectId> {
        match self {
            Probe::Found(id) => {
                debug!(source = %source, project_id = %id, "Project identifier found");
                Some(id)
            }
            Probe::Failed(reason) => {
                warn!(source = %source, error = %reason, "Source unavailable, treating as absent");
                None
            }
            Probe::Absent => {
                debug!(source = %source, "No project identifier");
                None
            }
        }
    }

    pub(crate) fn from_value(value: Option<String>) -> Self {
        match value.and_then(ProjectId::new) {
            Some(id) => Probe::Found(id),
            None => Probe::Absent,
        }
    }
}
