// ── Resolved view data ──
//
// Self-contained, ready-to-render payloads produced by the resolver.
// Every URL here is already resolved; renderers never touch a store.

use serde::Serialize;
use serde_json::{Map, Value};

use super::catalog::{BannerPosition, ProductFlag};
use super::entity_id::EntityId;
use super::section::SectionMeta;
use super::section_config::{
    BlogHighlightsConfig, CollectionLinksConfig, NewsletterSocialConfig, StoreCtaConfig,
};

/// Resolved payload for one section, tagged by section family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum ViewData {
    Hero(HeroView),
    Announcement(AnnouncementView),
    CategoryGrid(CategoryGridView),
    CategoryCircles(CategoryCirclesView),
    ProductTabs(ProductTabsView),
    ProductCarousel(ProductCarouselView),
    Banner(BannerView),
    VideoBanner(VideoBannerView),
    BrandMarquee(BrandMarqueeView),
    StoreCta(StoreCtaConfig),
    BlogHighlights(BlogHighlightsConfig),
    CollectionLinks(CollectionLinksConfig),
    NewsletterSocial(NewsletterSocialConfig),
    Custom(CustomView),
}

/// One entry of the resolver's output.
///
/// `view` is `None` when resolution failed or found nothing to show;
/// the renderer omits such sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSection {
    pub meta: SectionMeta,
    pub view: Option<ViewData>,
}

impl ResolvedSection {
    pub fn is_resolved(&self) -> bool {
        self.view.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideView {
    pub id: EntityId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct HeroView {
    pub slides: Vec<SlideView>,
    pub autoplay: bool,
    pub autoplay_speed_ms: u32,
    pub show_arrows: bool,
    pub show_dots: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementView {
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_speed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCard {
    pub id: EntityId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `None` when the category has no image; the renderer substitutes a
    /// placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGridView {
    pub categories: Vec<CategoryCard>,
    pub grid_columns: u32,
    pub show_title: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCirclesView {
    pub categories: Vec<CategoryCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: EntityId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub price: f64,
    pub final_price: f64,
    pub discount: f64,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTabView {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ProductFlag>,
    pub products: Vec<ProductCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTabsView {
    pub tabs: Vec<ProductTabView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCarouselView {
    pub products: Vec<ProductCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ProductFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<EntityId>,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerView {
    pub id: EntityId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub position: BannerPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoBannerView {
    pub id: EntityId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandLogoView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandMarqueeView {
    pub brands: Vec<BrandLogoView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub config: Map<String, Value>,
}
