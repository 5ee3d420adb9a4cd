// ── Section administration ──
//
// Validation and write orchestration for homepage sections. The
// repository stores whatever it is given; every rule about names,
// types and config shapes is enforced here.

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::requests::{
    CreateSectionRequest, ReorderEntry, ReorderFailure, ReorderReport, UpdateSectionRequest,
};
use super::{CommandResult, SectionCommand};
use crate::error::CoreError;
use crate::model::{EntityId, Section, SectionConfig, sort_for_display};
use crate::store::SectionRepository;

/// Check a section's own fields: non-empty name, known type, and a
/// config that parses for that type. Name uniqueness needs the rest of
/// the list and is checked by [`SectionAdmin`].
pub fn validate_section(section: &Section) -> Result<(), CoreError> {
    validate_name(section)?;
    SectionConfig::parse(&section.section_type, &section.config)?;
    Ok(())
}

fn validate_name(section: &Section) -> Result<(), CoreError> {
    if section.name.trim().is_empty() {
        return Err(CoreError::ValidationFailed {
            field: "name".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

/// A stored section that would be rejected if written today.
#[derive(Debug, Clone, Serialize)]
pub struct SectionIssue {
    pub id: EntityId,
    pub name: String,
    pub problem: String,
}

/// Admin-facing operations on the section list.
pub struct SectionAdmin<R> {
    repo: Arc<R>,
}

impl<R> Clone for SectionAdmin<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: SectionRepository> SectionAdmin<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Route a command to the matching operation.
    pub async fn execute(&self, command: SectionCommand) -> Result<CommandResult, CoreError> {
        match command {
            SectionCommand::Create(req) => self.create(req).await.map(CommandResult::Created),
            SectionCommand::Update { id, update } => {
                self.update(&id, update).await.map(CommandResult::Updated)
            }
            SectionCommand::Delete { id } => self.delete(&id).await.map(CommandResult::Deleted),
            SectionCommand::Reorder { entries } => {
                Ok(CommandResult::Reordered(self.reorder(entries).await))
            }
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Every section, published or not, in display order.
    pub async fn list(&self) -> Result<Vec<Section>, CoreError> {
        let mut sections = self.repo.list().await?;
        sort_for_display(&mut sections);
        Ok(sections)
    }

    pub async fn get(&self, id: &EntityId) -> Result<Section, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::SectionNotFound {
                identifier: id.to_string(),
            })
    }

    /// Find by id, falling back to an exact name match.
    pub async fn find(&self, id_or_name: &str) -> Result<Section, CoreError> {
        if let Some(section) = self.repo.get(&EntityId::from(id_or_name)).await? {
            return Ok(section);
        }
        let wanted = id_or_name.trim();
        self.repo
            .list()
            .await?
            .into_iter()
            .find(|s| s.name.trim() == wanted)
            .ok_or_else(|| CoreError::SectionNotFound {
                identifier: wanted.to_owned(),
            })
    }

    /// Stored sections that fail validation or share a name.
    pub async fn audit(&self) -> Result<Vec<SectionIssue>, CoreError> {
        let sections = self.list().await?;
        let mut issues = Vec::new();
        for (idx, section) in sections.iter().enumerate() {
            if let Err(err) = validate_section(section) {
                issues.push(issue(section, err.to_string()));
            }
            let clash = sections
                .iter()
                .take(idx)
                .any(|earlier| same_name(&earlier.name, &section.name));
            if clash {
                issues.push(issue(section, format!("duplicate name '{}'", section.name)));
            }
        }
        Ok(issues)
    }

    // ── Writes ───────────────────────────────────────────────────────

    pub async fn create(&self, req: CreateSectionRequest) -> Result<Section, CoreError> {
        let existing = self.repo.list().await?;
        let ordering = req.ordering.unwrap_or_else(|| next_ordering(&existing));
        let now = Utc::now();
        let section = Section {
            id: EntityId::generate(),
            name: req.name.trim().to_owned(),
            section_type: req.section_type,
            title: req.title,
            subtitle: req.subtitle,
            description: req.description,
            config: req.config,
            ordering,
            is_active: req.is_active.unwrap_or(true),
            is_published: req.is_published.unwrap_or(true),
            display_on: req.display_on.unwrap_or_default(),
            updated_by: req.created_by.clone(),
            created_by: req.created_by,
            created_at: now,
            updated_at: now,
        };

        validate_section(&section)?;
        ensure_unique_name(&existing, &section)?;

        let created = self.repo.insert(section).await?;
        info!(
            section_id = %created.id,
            section_type = %created.section_type,
            ordering = created.ordering,
            "section created"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &EntityId,
        update: UpdateSectionRequest,
    ) -> Result<Section, CoreError> {
        let mut section = self.get(id).await?;
        if update.is_empty() {
            debug!(section_id = %id, "empty update, nothing to change");
            return Ok(section);
        }

        let renamed = update.name.is_some();
        // Type and config are only checked when this update touches them,
        // so a legacy section can still be retitled or unpublished
        let reshaped = update.section_type.is_some() || update.config.is_some();
        apply_update(&mut section, update);
        if reshaped {
            validate_section(&section)?;
        } else {
            validate_name(&section)?;
        }
        if renamed {
            ensure_unique_name(&self.repo.list().await?, &section)?;
        }

        let updated = self.repo.update(section).await?;
        info!(section_id = %updated.id, "section updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &EntityId) -> Result<Section, CoreError> {
        let removed = self.repo.delete(id).await?;
        info!(section_id = %removed.id, name = %removed.name, "section deleted");
        Ok(removed)
    }

    /// Apply each `(id, ordering)` pair as its own update. A failing
    /// entry is reported and never aborts the rest.
    pub async fn reorder(&self, entries: Vec<ReorderEntry>) -> ReorderReport {
        let outcomes = join_all(entries.into_iter().map(|entry| async move {
            let result = self.set_ordering(&entry.id, entry.ordering).await;
            (entry.id, result)
        }))
        .await;

        let mut report = ReorderReport::default();
        for (id, result) in outcomes {
            match result {
                Ok(()) => report.updated.push(id),
                Err(err) => {
                    warn!(section_id = %id, error = %err, "reorder entry failed");
                    report.failed.push(ReorderFailure {
                        id,
                        reason: err.to_string(),
                    });
                }
            }
        }
        info!(
            updated = report.updated.len(),
            failed = report.failed.len(),
            "sections reordered"
        );
        report
    }

    async fn set_ordering(&self, id: &EntityId, ordering: i32) -> Result<(), CoreError> {
        let mut section = self.get(id).await?;
        section.ordering = ordering;
        section.updated_at = Utc::now();
        self.repo.update(section).await?;
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn apply_update(section: &mut Section, update: UpdateSectionRequest) {
    if let Some(name) = update.name {
        section.name = name.trim().to_owned();
    }
    if let Some(section_type) = update.section_type {
        section.section_type = section_type;
    }
    if let Some(title) = update.title {
        section.title = Some(title).filter(|t| !t.is_empty());
    }
    if let Some(subtitle) = update.subtitle {
        section.subtitle = Some(subtitle).filter(|t| !t.is_empty());
    }
    if let Some(description) = update.description {
        section.description = Some(description).filter(|t| !t.is_empty());
    }
    if let Some(config) = update.config {
        section.config = config;
    }
    if let Some(ordering) = update.ordering {
        section.ordering = ordering;
    }
    if let Some(active) = update.is_active {
        section.is_active = active;
    }
    if let Some(published) = update.is_published {
        section.is_published = published;
    }
    if let Some(display_on) = update.display_on {
        section.display_on = display_on;
    }
    if update.updated_by.is_some() {
        section.updated_by = update.updated_by;
    }
    section.updated_at = Utc::now();
}

fn next_ordering(existing: &[Section]) -> i32 {
    existing
        .iter()
        .map(|s| s.ordering)
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}

fn ensure_unique_name(existing: &[Section], section: &Section) -> Result<(), CoreError> {
    let taken = existing
        .iter()
        .any(|other| other.id != section.id && same_name(&other.name, &section.name));
    if taken {
        return Err(CoreError::DuplicateName {
            name: section.name.clone(),
        });
    }
    Ok(())
}

fn issue(section: &Section, problem: String) -> SectionIssue {
    SectionIssue {
        id: section.id.clone(),
        name: section.name.clone(),
        problem,
    }
}
