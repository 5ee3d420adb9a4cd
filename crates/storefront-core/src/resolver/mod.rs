// ── Section resolver ──
//
// Turns the stored section list into render-ready view data. One
// section's failure never affects another: errors, empty results and
// timeouts are logged and the section comes back with no view.

mod context;
mod routines;

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};

use self::context::ResolveContext;
use crate::config::HomepageConfig;
use crate::error::ResolveError;
use crate::model::{CustomView, ResolvedSection, Section, SectionConfig, ViewData};
use crate::store::{Catalog, SectionRepository};

/// Resolves sections against the collaborator catalog.
///
/// Cheap to clone; both stores sit behind `Arc`.
pub struct Resolver<C, S> {
    catalog: Arc<C>,
    sections: Arc<S>,
    config: HomepageConfig,
}

impl<C, S> Clone for Resolver<C, S> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            sections: Arc::clone(&self.sections),
            config: self.config.clone(),
        }
    }
}

impl<C: Catalog, S: SectionRepository> Resolver<C, S> {
    pub fn new(catalog: Arc<C>, sections: Arc<S>, config: HomepageConfig) -> Self {
        Self {
            catalog,
            sections,
            config,
        }
    }

    pub fn config(&self) -> &HomepageConfig {
        &self.config
    }

    /// Resolve every active, published section in display order.
    ///
    /// Always succeeds. If the section list itself cannot be read the
    /// homepage is simply empty.
    pub async fn resolve_public_sections(&self) -> Vec<ResolvedSection> {
        let sections = match self.sections.public_sections().await {
            Ok(sections) => sections,
            Err(err) => {
                warn!(error = %err, "cannot load homepage sections");
                return Vec::new();
            }
        };
        debug!(count = sections.len(), "resolving public sections");
        self.resolve_all(&sections).await
    }

    /// Resolve `sections` concurrently in one pass, keeping their order.
    ///
    /// The whole pass shares one fetch cache and one deadline.
    pub async fn resolve_all(&self, sections: &[Section]) -> Vec<ResolvedSection> {
        let ctx = ResolveContext::new(self.catalog.as_ref());
        let deadline = Instant::now() + self.config.resolve_timeout;
        join_all(
            sections
                .iter()
                .map(|section| self.resolve_logged(&ctx, section, deadline)),
        )
        .await
    }

    /// Resolve a single section with a fresh cache and no deadline.
    pub async fn resolve_section(&self, section: &Section) -> Result<ViewData, ResolveError> {
        let ctx = ResolveContext::new(self.catalog.as_ref());
        self.dispatch(&ctx, section).await
    }

    async fn resolve_logged(
        &self,
        ctx: &ResolveContext<'_, C>,
        section: &Section,
        deadline: Instant,
    ) -> ResolvedSection {
        let outcome = timeout_at(deadline, self.dispatch(ctx, section))
            .await
            .unwrap_or_else(|_| {
                Err(ResolveError::Timeout {
                    timeout_ms: u64::try_from(self.config.resolve_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                })
            });

        let view = match outcome {
            Ok(view) => Some(view),
            Err(err) if err.is_routine() => {
                debug!(
                    section_id = %section.id,
                    section_type = %section.section_type,
                    reason = %err,
                    "section has nothing to show"
                );
                None
            }
            Err(err) => {
                warn!(
                    section_id = %section.id,
                    section_type = %section.section_type,
                    error = %err,
                    "section skipped"
                );
                None
            }
        };
        ResolvedSection {
            meta: section.meta(),
            view,
        }
    }

    async fn dispatch(
        &self,
        ctx: &ResolveContext<'_, C>,
        section: &Section,
    ) -> Result<ViewData, ResolveError> {
        let limits = &self.config.limits;
        match SectionConfig::parse(&section.section_type, &section.config)? {
            SectionConfig::Hero(cfg) => routines::hero(ctx, cfg).await,
            SectionConfig::ScrollingText(cfg) => routines::scrolling_text(cfg),
            SectionConfig::CategoryGrid(cfg) => routines::category_grid(ctx, cfg).await,
            SectionConfig::CategoryCircles(cfg) => {
                routines::category_circles(ctx, cfg, limits).await
            }
            SectionConfig::ProductTabs(cfg) => routines::product_tabs(ctx, cfg, limits).await,
            SectionConfig::ProductCarousel(cfg) => {
                routines::product_carousel(ctx, cfg, limits).await
            }
            SectionConfig::Banner(cfg) => routines::banner(ctx, cfg).await,
            SectionConfig::VideoBanner(cfg) => routines::video_banner(ctx, cfg).await,
            SectionConfig::BrandMarquee(cfg) => routines::brand_marquee(ctx, cfg).await,
            SectionConfig::StoreCta(cfg) => routines::store_cta(cfg),
            SectionConfig::BlogHighlights(cfg) => routines::blog_highlights(cfg),
            SectionConfig::CollectionLinks(cfg) => routines::collection_links(cfg),
            SectionConfig::NewsletterSocial(cfg) => Ok(ViewData::NewsletterSocial(cfg)),
            SectionConfig::Custom(cfg) => Ok(ViewData::Custom(CustomView {
                html: cfg.html,
                config: cfg.raw,
            })),
        }
    }
}
