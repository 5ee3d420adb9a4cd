// ── Core error types ──
//
// `StoreError` is what collaborator stores report. `ResolveError` is the
// per-section taxonomy of the resolver; it never escapes a resolution
// pass. `CoreError` is what admin-facing write operations return.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::ConfigShapeError;

/// Failure reported by a collaborator store or the section repository.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{store} store unavailable: {reason}")]
    Unavailable { store: &'static str, reason: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    #[error("{entity_type} conflict: {reason}")]
    Conflict {
        entity_type: &'static str,
        reason: String,
    },
}

/// Why a single section produced no view data.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The config references a missing entity or has the wrong shape.
    #[error("cannot resolve config: {reason}")]
    ConfigResolution { reason: String },

    #[error("unknown section type '{section_type}'")]
    UnknownSectionType { section_type: String },

    /// Resolution succeeded but found nothing worth rendering.
    #[error("nothing to show: {what}")]
    EmptyResult { what: &'static str },

    #[error("collaborator fetch failed: {0}")]
    CollaboratorFetch(#[from] StoreError),

    #[error("resolution timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl ResolveError {
    /// Empty results are routine and logged quietly; everything else is a warning.
    pub fn is_routine(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}

impl From<ConfigShapeError> for ResolveError {
    fn from(err: ConfigShapeError) -> Self {
        match err {
            ConfigShapeError::UnknownType { section_type } => {
                Self::UnknownSectionType { section_type }
            }
            malformed @ ConfigShapeError::Malformed { .. } => Self::ConfigResolution {
                reason: malformed.to_string(),
            },
        }
    }
}

/// Error type for admin-facing operations on sections.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    #[error("A section named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Section not found: {identifier}")]
    SectionNotFound { identifier: String },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound {
                entity_type: "section",
                identifier,
            } => Self::SectionNotFound { identifier },
            other => Self::Store(other),
        }
    }
}

impl From<ConfigShapeError> for CoreError {
    fn from(err: ConfigShapeError) -> Self {
        match err {
            ConfigShapeError::UnknownType { section_type } => Self::ValidationFailed {
                field: "type".into(),
                reason: format!(
                    "'{section_type}' is not a recognized section type"
                ),
            },
            ConfigShapeError::Malformed { source, .. } => Self::ValidationFailed {
                field: "config".into(),
                reason: source.to_string(),
            },
        }
    }
}

/// Failure loading or saving a store snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot access store snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid store snapshot {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize store snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}
