//! Section command handlers.

use serde::Serialize;
use tabled::Tabled;

use storefront_core::{
    CreateSectionRequest, DisplayOn, EntityId, ReorderEntry, ReorderReport, Section,
    SectionIssue, SectionRepository, SectionType, UpdateSectionRequest,
};

use crate::cli::{GlobalOpts, SectionsArgs, SectionsCommand};
use crate::error::CliError;
use crate::output;

use super::{Workspace, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "#")]
    ordering: i32,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    section_type: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Shown On")]
    shown_on: String,
}

impl From<&Section> for SectionRow {
    fn from(s: &Section) -> Self {
        Self {
            ordering: s.ordering,
            id: s.id.to_string(),
            name: s.name.clone(),
            section_type: s.section_type.to_string(),
            status: status(s),
            shown_on: shown_on(s.display_on),
        }
    }
}

fn status(s: &Section) -> &'static str {
    match (s.is_active, s.is_published) {
        (false, _) => "inactive",
        (true, false) => "draft",
        (true, true) => "live",
    }
}

fn shown_on(display: DisplayOn) -> String {
    let devices: Vec<&str> = [
        (display.desktop, "desktop"),
        (display.tablet, "tablet"),
        (display.mobile, "mobile"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    if devices.is_empty() {
        "-".into()
    } else {
        devices.join(", ")
    }
}

fn detail(s: &Section) -> String {
    let config = serde_json::to_string_pretty(&s.config).unwrap_or_else(|_| "{}".into());
    vec![
        format!("ID:          {}", s.id),
        format!("Name:        {}", s.name),
        format!("Type:        {}", s.section_type),
        format!("Title:       {}", s.title.as_deref().unwrap_or("-")),
        format!("Subtitle:    {}", s.subtitle.as_deref().unwrap_or("-")),
        format!("Ordering:    {}", s.ordering),
        format!("Status:      {}", status(s)),
        format!("Shown on:    {}", shown_on(s.display_on)),
        format!("Created:     {}", s.created_at.format("%Y-%m-%d %H:%M:%S UTC")),
        format!("Updated:     {}", s.updated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        format!("Config:      {config}"),
    ]
    .join("\n")
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Problem")]
    problem: String,
}

impl From<&SectionIssue> for IssueRow {
    fn from(i: &SectionIssue) -> Self {
        Self {
            id: i.id.to_string(),
            name: i.name.clone(),
            problem: i.problem.clone(),
        }
    }
}

#[derive(Serialize)]
struct TypeInfo {
    #[serde(rename = "type")]
    section_type: SectionType,
    placement: &'static str,
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    section_type: String,
    #[tabled(rename = "Placement")]
    placement: &'static str,
}

fn placement(t: &SectionType) -> &'static str {
    if t.is_announcement() {
        "above header"
    } else if t.stacks_when_adjacent() {
        "main (stacks with neighbours)"
    } else {
        "main"
    }
}

fn report_detail(report: &ReorderReport) -> String {
    let mut lines = vec![format!("Updated: {}", report.updated.len())];
    for failure in &report.failed {
        lines.push(format!("Failed:  {} ({})", failure.id, failure.reason));
    }
    lines.join("\n")
}

// ── Request builders ────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn create_request(
    name: Option<String>,
    section_type: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
    description: Option<String>,
    config: Option<&str>,
    ordering: Option<i32>,
    inactive: bool,
    draft: bool,
) -> Result<CreateSectionRequest, CliError> {
    let name = name.ok_or_else(|| CliError::Validation {
        field: "name".into(),
        reason: "required".into(),
    })?;
    let section_type = section_type.ok_or_else(|| CliError::Validation {
        field: "type".into(),
        reason: "required".into(),
    })?;
    let mut req = CreateSectionRequest::new(name, SectionType::from(section_type));
    if let Some(raw) = config {
        req = req.with_config(util::parse_config_arg(raw)?);
    }
    req.title = title;
    req.subtitle = subtitle;
    req.description = description;
    req.ordering = ordering;
    req.is_active = inactive.then_some(false);
    req.is_published = draft.then_some(false);
    Ok(req)
}

fn parse_reorder_entry(raw: &str) -> Result<ReorderEntry, CliError> {
    let invalid = |reason: String| CliError::Validation {
        field: "reorder entry".into(),
        reason,
    };
    let (id, ordering) = raw
        .split_once('=')
        .ok_or_else(|| invalid(format!("expected ID=ORDERING, got '{raw}'")))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(invalid(format!("missing id in '{raw}'")));
    }
    let ordering = ordering
        .trim()
        .parse()
        .map_err(|_| invalid(format!("ordering must be an integer in '{raw}'")))?;
    Ok(ReorderEntry {
        id: EntityId::from(id),
        ordering,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    workspace: &mut Workspace,
    args: SectionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let admin = workspace.admin();

    match args.command {
        SectionsCommand::List { public } => {
            let sections = if public {
                admin.repository().public_sections().await.map_err(CliError::Store)?
            } else {
                admin.list().await?
            };
            let out = output::render_list(
                &global.output,
                &sections,
                |s| SectionRow::from(s),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SectionsCommand::Get { id } => {
            let section = admin.find(&id).await?;
            let out = output::render_single(&global.output, &section, detail, |s| s.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SectionsCommand::Create {
            name,
            section_type,
            title,
            subtitle,
            description,
            config,
            ordering,
            inactive,
            draft,
            from_file,
        } => {
            let req = if let Some(ref path) = from_file {
                serde_json::from_value(util::read_json_file(path)?)?
            } else {
                create_request(
                    name,
                    section_type,
                    title,
                    subtitle,
                    description,
                    config.as_deref(),
                    ordering,
                    inactive,
                    draft,
                )?
            };
            let created = admin.create(req).await?;
            workspace.save()?;

            let out = output::render_single(&global.output, &created, detail, |s| s.id.to_string())?;
            output::print_output(&out, global.quiet);
            output::success(
                &format!("Section '{}' created", created.name),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        SectionsCommand::Update {
            id,
            name,
            section_type,
            title,
            subtitle,
            description,
            config,
            ordering,
            active,
            published,
            from_file,
        } => {
            let target = admin.find(&id).await?;
            let update: UpdateSectionRequest = if let Some(ref path) = from_file {
                serde_json::from_value(util::read_json_file(path)?)?
            } else {
                UpdateSectionRequest {
                    name,
                    section_type: section_type.map(SectionType::from),
                    title,
                    subtitle,
                    description,
                    config: config.as_deref().map(util::parse_config_arg).transpose()?,
                    ordering,
                    is_active: active,
                    is_published: published,
                    ..UpdateSectionRequest::default()
                }
            };
            if update.is_empty() {
                output::warning("Nothing to update", &global.color, global.quiet);
                return Ok(());
            }
            let updated = admin.update(&target.id, update).await?;
            workspace.save()?;

            let out = output::render_single(&global.output, &updated, detail, |s| s.id.to_string())?;
            output::print_output(&out, global.quiet);
            output::success(
                &format!("Section '{}' updated", updated.name),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        SectionsCommand::Delete { id } => {
            let target = admin.find(&id).await?;
            let prompt = format!("Delete section '{}' ({})?", target.name, target.section_type);
            if !util::confirm(&prompt, "sections delete", global.yes)? {
                return Ok(());
            }
            let removed = admin.delete(&target.id).await?;
            workspace.save()?;
            output::success(
                &format!("Section '{}' deleted", removed.name),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        SectionsCommand::Reorder { entries, from_file } => {
            let entries: Vec<ReorderEntry> = if let Some(ref path) = from_file {
                serde_json::from_value(util::read_json_file(path)?)?
            } else {
                entries
                    .iter()
                    .map(|raw| parse_reorder_entry(raw))
                    .collect::<Result<_, _>>()?
            };
            let total = entries.len();
            let report = admin.reorder(entries).await;
            if !report.updated.is_empty() {
                workspace.save()?;
            }

            let out = output::render_single(&global.output, &report, report_detail, |r| {
                r.updated
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
            output::print_output(&out, global.quiet);

            if report.is_complete() {
                output::success(
                    &format!("{total} sections reordered"),
                    &global.color,
                    global.quiet,
                );
                Ok(())
            } else {
                Err(CliError::PartialReorder {
                    failed: report.failed.len(),
                    total,
                })
            }
        }

        SectionsCommand::Validate => {
            let issues = admin.audit().await?;
            if issues.is_empty() {
                output::success("All sections are valid", &global.color, global.quiet);
                return Ok(());
            }
            let out = output::render_list(
                &global.output,
                &issues,
                |i| IssueRow::from(i),
                |i| i.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Err(CliError::Validation {
                field: "sections".into(),
                reason: format!("{} problem(s) found", issues.len()),
            })
        }

        SectionsCommand::Types => {
            let types: Vec<TypeInfo> = SectionType::known()
                .map(|t| TypeInfo {
                    placement: placement(&t),
                    section_type: t,
                })
                .collect();
            let out = output::render_list(
                &global.output,
                &types,
                |t| TypeRow {
                    section_type: t.section_type.to_string(),
                    placement: t.placement,
                },
                |t| t.section_type.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
