//! Errors reported to the user, rendered by miette.
//!
//! Maps core, config and snapshot errors into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use storefront_config::ConfigError;
use storefront_core::{CoreError, SnapshotError, StoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const STORE: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Store ────────────────────────────────────────────────────────

    #[error("No store snapshot given")]
    #[diagnostic(
        code(storefront::no_store),
        help(
            "Pass --store <FILE>, set STOREFRONT_STORE, or set `store` in the config file.\n\
             Config file: {config_path}"
        )
    )]
    NoStore { config_path: String },

    #[error(transparent)]
    #[diagnostic(
        code(storefront::snapshot),
        help("The store snapshot must be a JSON object with optional keys: sections, sliders, categories, products, banners, videoBanners, brands, media.")
    )]
    Snapshot(#[from] SnapshotError),

    #[error("Store error: {0}")]
    #[diagnostic(code(storefront::store))]
    Store(StoreError),

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(storefront::not_found),
        help("Run: storefront {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(code(storefront::conflict))]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    #[error("{failed} of {total} reorder entries failed")]
    #[diagnostic(
        code(storefront::partial_reorder),
        help("The other entries were applied. Run: storefront sections list")
    )]
    PartialReorder { failed: usize, total: usize },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(storefront::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(storefront::config),
        help("Check the config file, or regenerate it with: storefront config init --force")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' needs confirmation")]
    #[diagnostic(
        code(storefront::confirmation_required),
        help("No terminal to prompt on. Pass --yes (-y) to proceed.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Encoding ───────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(storefront::json), help("Check the JSON input and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    #[diagnostic(code(storefront::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } | Self::NoStore { .. } => {
                exit_code::USAGE
            }
            Self::Snapshot(_) | Self::Store(_) => exit_code::STORE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── From core ───────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationFailed { field, reason } => CliError::Validation { field, reason },

            CoreError::DuplicateName { name } => CliError::Conflict {
                resource_type: "section".into(),
                identifier: name,
            },

            CoreError::SectionNotFound { identifier } => CliError::NotFound {
                resource_type: "section".into(),
                identifier,
                list_command: "sections list".into(),
            },

            CoreError::Store(err) => CliError::Store(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let not_found: CliError = CoreError::SectionNotFound {
            identifier: "x".into(),
        }
        .into();
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);

        let dup: CliError = CoreError::DuplicateName { name: "Hero".into() }.into();
        assert_eq!(dup.exit_code(), exit_code::CONFLICT);

        let invalid: CliError = CoreError::ValidationFailed {
            field: "type".into(),
            reason: "unknown".into(),
        }
        .into();
        assert_eq!(invalid.exit_code(), exit_code::USAGE);
    }
}
