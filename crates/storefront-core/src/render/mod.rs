// ── Renderer dispatch ──
//
// Maps each section type to a renderer, walks the resolved sections in
// order and lays out the page: announcement bars go above the header,
// consecutive full-width banners share one stacked container.

pub mod markup;
pub mod renderers;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use self::markup::Element;
use self::renderers::{
    AnnouncementRenderer, BannerRenderer, BlogHighlightsRenderer, BrandMarqueeRenderer,
    CategoryCirclesRenderer, CategoryGridRenderer, CollectionLinksRenderer, CustomRenderer,
    HeroRenderer, NewsletterSocialRenderer, ProductCarouselRenderer, ProductTabsRenderer,
    SectionRenderer, StoreCtaRenderer, VideoBannerRenderer,
};
use crate::config::HomepageConfig;
use crate::model::{EntityId, ResolvedSection, SectionType};

/// One section that produced output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub element: Element,
}

/// A top-level block of the main content area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Block {
    Section(RenderedSection),
    /// Two or more adjacent sections of a stacking type.
    BannerStack { sections: Vec<RenderedSection> },
}

impl Block {
    pub fn sections(&self) -> &[RenderedSection] {
        match self {
            Self::Section(section) => std::slice::from_ref(section),
            Self::BannerStack { sections } => sections,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Section(section) => section.element.write_html(out),
            Self::BannerStack { sections } => {
                out.push_str("<div class=\"banner-stack\">");
                for section in sections {
                    section.element.write_html(out);
                }
                out.push_str("</div>");
            }
        }
    }
}

/// The rendered homepage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    /// Announcement bars, shown above the site header.
    pub announcements: Vec<RenderedSection>,
    pub main: Vec<Block>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.announcements.is_empty() && self.main.is_empty()
    }

    /// Ids of every section in the main area, in page order.
    pub fn main_section_ids(&self) -> Vec<&EntityId> {
        self.main
            .iter()
            .flat_map(Block::sections)
            .map(|s| &s.id)
            .collect()
    }

    /// HTML fragment without a site header.
    pub fn to_html(&self) -> String {
        self.to_html_with_header("")
    }

    /// HTML fragment with `header_html` placed between the announcement
    /// region and the main content. The header is inserted verbatim.
    pub fn to_html_with_header(&self, header_html: &str) -> String {
        let mut out = String::new();
        if !self.announcements.is_empty() {
            out.push_str("<div class=\"announcements\">");
            for bar in &self.announcements {
                bar.element.write_html(&mut out);
            }
            out.push_str("</div>");
        }
        out.push_str(header_html);
        out.push_str("<main class=\"homepage\">");
        for block in &self.main {
            block.write_html(&mut out);
        }
        out.push_str("</main>");
        out
    }
}

/// Table of renderers keyed by section type.
pub struct RendererRegistry {
    renderers: HashMap<SectionType, Arc<dyn SectionRenderer>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults(&HomepageConfig::default())
    }
}

impl RendererRegistry {
    /// A registry with no renderers at all.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Every built-in renderer. Aliased types share one instance.
    pub fn with_defaults(config: &HomepageConfig) -> Self {
        let placeholder = config.placeholder_image.clone();
        let mut registry = Self::empty();

        registry.register_shared(
            [SectionType::Hero, SectionType::HeroSlider],
            Arc::new(HeroRenderer),
        );
        registry.register(SectionType::ScrollingText, AnnouncementRenderer);
        registry.register_shared(
            [
                SectionType::PromoGrid,
                SectionType::CategoryFeatured,
                SectionType::CategoryGrid,
            ],
            Arc::new(CategoryGridRenderer {
                placeholder: placeholder.clone(),
            }),
        );
        registry.register(
            SectionType::CategoryCircles,
            CategoryCirclesRenderer {
                placeholder: placeholder.clone(),
            },
        );
        registry.register(
            SectionType::ProductTabs,
            ProductTabsRenderer {
                placeholder: placeholder.clone(),
            },
        );
        registry.register_shared(
            [SectionType::ProductCarousel, SectionType::ProductStrip],
            Arc::new(ProductCarouselRenderer { placeholder }),
        );
        registry.register(SectionType::BannerFullWidth, BannerRenderer);
        registry.register(SectionType::VideoBanner, VideoBannerRenderer);
        registry.register(SectionType::BrandMarquee, BrandMarqueeRenderer);
        registry.register(SectionType::StoreCta, StoreCtaRenderer);
        registry.register(SectionType::BlogHighlights, BlogHighlightsRenderer);
        registry.register(SectionType::CollectionLinks, CollectionLinksRenderer);
        registry.register(SectionType::NewsletterSocial, NewsletterSocialRenderer);
        registry.register_shared(
            [SectionType::CustomHtml, SectionType::Custom],
            Arc::new(CustomRenderer),
        );
        registry
    }

    /// Add or replace the renderer for `section_type`. Returns the
    /// renderer it replaced, if any.
    pub fn register(
        &mut self,
        section_type: SectionType,
        renderer: impl SectionRenderer + 'static,
    ) -> Option<Arc<dyn SectionRenderer>> {
        self.renderers.insert(section_type, Arc::new(renderer))
    }

    /// Register one renderer under several type tags.
    pub fn register_shared(
        &mut self,
        section_types: impl IntoIterator<Item = SectionType>,
        renderer: Arc<dyn SectionRenderer>,
    ) {
        for section_type in section_types {
            self.renderers.insert(section_type, Arc::clone(&renderer));
        }
    }

    pub fn get(&self, section_type: &SectionType) -> Option<&dyn SectionRenderer> {
        self.renderers.get(section_type).map(AsRef::as_ref)
    }

    pub fn contains(&self, section_type: &SectionType) -> bool {
        self.renderers.contains_key(section_type)
    }

    /// Render one resolved section, or `None` if it should be omitted.
    pub fn render_section(&self, resolved: &ResolvedSection) -> Option<RenderedSection> {
        let meta = &resolved.meta;
        let Some(renderer) = self.get(&meta.section_type) else {
            warn!(
                section_id = %meta.id,
                section_type = %meta.section_type,
                "no renderer registered, section skipped"
            );
            return None;
        };
        let Some(view) = &resolved.view else {
            debug!(section_id = %meta.id, "no view data, section omitted");
            return None;
        };
        if !meta.display_on.is_visible_anywhere() {
            debug!(section_id = %meta.id, "hidden on every breakpoint");
            return None;
        }

        let Some(element) = renderer.render(meta, view) else {
            debug!(section_id = %meta.id, "renderer produced nothing");
            return None;
        };
        let element = meta
            .display_on
            .hidden_classes()
            .into_iter()
            .fold(element, Element::class);

        Some(RenderedSection {
            id: meta.id.clone(),
            section_type: meta.section_type.clone(),
            element,
        })
    }

    /// Render the page. Input order is kept. Banners stack when they are
    /// consecutive in the resolved list: any entry of another type ends
    /// the run, even one that renders nothing, while an omitted banner of
    /// the same type does not.
    pub fn render_homepage(&self, resolved: &[ResolvedSection]) -> Page {
        let mut page = Page::default();
        // Type of the stackable run the last main block can still absorb
        let mut open_run: Option<&SectionType> = None;

        for entry in resolved {
            let section_type = &entry.meta.section_type;
            if open_run != Some(section_type) {
                open_run = None;
            }
            let Some(rendered) = self.render_section(entry) else {
                continue;
            };

            if section_type.is_announcement() {
                page.announcements.push(rendered);
            } else if section_type.stacks_when_adjacent() {
                if open_run.is_some() {
                    extend_stack(&mut page.main, rendered);
                } else {
                    page.main.push(Block::Section(rendered));
                }
                open_run = Some(section_type);
            } else {
                page.main.push(Block::Section(rendered));
            }
        }
        debug!(
            announcements = page.announcements.len(),
            blocks = page.main.len(),
            "homepage rendered"
        );
        page
    }
}

fn extend_stack(main: &mut Vec<Block>, rendered: RenderedSection) {
    match main.pop() {
        Some(Block::BannerStack { mut sections }) => {
            sections.push(rendered);
            main.push(Block::BannerStack { sections });
        }
        Some(Block::Section(prev)) => main.push(Block::BannerStack {
            sections: vec![prev, rendered],
        }),
        None => main.push(Block::Section(rendered)),
    }
}
