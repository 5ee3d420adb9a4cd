// ── Command API ──
//
// All section write operations flow through the `SectionCommand` enum.
// `SectionAdmin` validates each one and applies it to the repository.

mod admin;
pub mod requests;

use crate::model::{EntityId, Section};

pub use admin::{SectionAdmin, SectionIssue, validate_section};
pub use requests::{
    CreateSectionRequest, ReorderEntry, ReorderFailure, ReorderReport, UpdateSectionRequest,
    config_object,
};

/// All possible write operations against the section list.
#[derive(Debug, Clone)]
pub enum SectionCommand {
    Create(CreateSectionRequest),
    Update {
        id: EntityId,
        update: UpdateSectionRequest,
    },
    Delete {
        id: EntityId,
    },
    Reorder {
        entries: Vec<ReorderEntry>,
    },
}

/// Result of a command execution.
#[derive(Debug)]
pub enum CommandResult {
    Created(Section),
    Updated(Section),
    Deleted(Section),
    Reordered(ReorderReport),
}
