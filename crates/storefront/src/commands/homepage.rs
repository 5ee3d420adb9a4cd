//! Homepage command handlers.

use std::path::Path;

use tabled::Tabled;
use tracing::info;

use storefront_core::{Page, RendererRegistry, ResolvedSection, ViewData};

use crate::cli::{GlobalOpts, HomepageArgs, HomepageCommand, RenderFormat};
use crate::error::CliError;
use crate::output;

use super::Workspace;

#[derive(Tabled)]
struct ResolvedRow {
    #[tabled(rename = "#")]
    ordering: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    section_type: String,
    #[tabled(rename = "Content")]
    content: String,
}

impl From<&ResolvedSection> for ResolvedRow {
    fn from(r: &ResolvedSection) -> Self {
        Self {
            ordering: r.meta.ordering,
            name: r.meta.name.clone(),
            section_type: r.meta.section_type.to_string(),
            content: r.view.as_ref().map_or_else(|| "(omitted)".into(), summary),
        }
    }
}

fn plural(n: usize, noun: &str) -> String {
    match (n, noun) {
        (1, _) => format!("1 {noun}"),
        (_, "category") => format!("{n} categories"),
        _ => format!("{n} {noun}s"),
    }
}

/// One-line description of what a section resolved to.
fn summary(view: &ViewData) -> String {
    match view {
        ViewData::Hero(v) => plural(v.slides.len(), "slide"),
        ViewData::Announcement(v) => plural(v.items.len(), "message"),
        ViewData::CategoryGrid(v) => plural(v.categories.len(), "category"),
        ViewData::CategoryCircles(v) => plural(v.categories.len(), "category"),
        ViewData::ProductTabs(v) => {
            let products: usize = v.tabs.iter().map(|t| t.products.len()).sum();
            format!("{}, {}", plural(v.tabs.len(), "tab"), plural(products, "product"))
        }
        ViewData::ProductCarousel(v) => plural(v.products.len(), "product"),
        ViewData::Banner(v) => format!("banner '{}'", v.title),
        ViewData::VideoBanner(v) => format!("video '{}'", v.title),
        ViewData::BrandMarquee(v) => plural(v.brands.len(), "brand"),
        ViewData::StoreCta(_) => "store call to action".into(),
        ViewData::BlogHighlights(_) => "blog highlights".into(),
        ViewData::CollectionLinks(_) => "collection links".into(),
        ViewData::NewsletterSocial(_) => "newsletter signup".into(),
        ViewData::Custom(v) if v.html.is_some() => "custom HTML".into(),
        ViewData::Custom(_) => "custom".into(),
    }
}

fn render_page(page: &Page, format: RenderFormat, header: Option<&Path>) -> Result<String, CliError> {
    match format {
        RenderFormat::Html => {
            let header_html = header.map(std::fs::read_to_string).transpose()?;
            Ok(page.to_html_with_header(header_html.as_deref().unwrap_or_default()))
        }
        RenderFormat::Json if header.is_some() => Err(CliError::Validation {
            field: "header".into(),
            reason: "a header fragment only applies to HTML output".into(),
        }),
        RenderFormat::Json => output::render_json(page, false),
    }
}

pub async fn handle(
    workspace: &mut Workspace,
    args: HomepageArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let resolver = workspace.resolver();

    match args.command {
        HomepageCommand::Resolve => {
            let resolved = resolver.resolve_public_sections().await;
            let out = output::render_list(
                &global.output,
                &resolved,
                |r| ResolvedRow::from(r),
                |r| r.meta.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        HomepageCommand::Render {
            format,
            header,
            out,
        } => {
            let resolved = resolver.resolve_public_sections().await;
            let page = RendererRegistry::with_defaults(workspace.homepage_config())
                .render_homepage(&resolved);
            info!(
                announcements = page.announcements.len(),
                blocks = page.main.len(),
                "homepage rendered"
            );
            let rendered = render_page(&page, format, header.as_deref())?;

            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    output::success(
                        &format!("Homepage written to {}", path.display()),
                        &global.color,
                        global.quiet,
                    );
                }
                None => output::print_output(&rendered, global.quiet),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn plural_counts() {
        assert_eq!(plural(1, "slide"), "1 slide");
        assert_eq!(plural(0, "brand"), "0 brands");
        assert_eq!(plural(3, "product"), "3 products");
        assert_eq!(plural(2, "category"), "2 categories");
    }

    #[test]
    fn empty_page_renders_empty_main() {
        let html = render_page(&Page::default(), RenderFormat::Html, None).unwrap();
        assert!(html.contains("<main class=\"homepage\">"));
        let json = render_page(&Page::default(), RenderFormat::Json, None).unwrap();
        assert!(json.contains("\"announcements\": []"));
    }

    #[test]
    fn header_is_rejected_for_json() {
        let err = render_page(&Page::default(), RenderFormat::Json, Some(Path::new("h.html")))
            .unwrap_err();
        assert!(matches!(err, CliError::Validation { field, .. } if field == "header"));
    }
}
