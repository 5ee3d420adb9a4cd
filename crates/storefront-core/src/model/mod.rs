// ── Homepage domain model ──
//
// Sections, the typed configs parsed out of them, the collaborator
// records they reference, and the resolved view data handed to renderers.

pub mod catalog;
pub mod entity_id;
pub mod section;
pub mod section_config;
pub mod view;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use storefront_core::model::*` gives you everything.

// Core identity
pub use entity_id::{EntityId, normalize_ids};

// Sections
pub use section::{DisplayOn, Section, SectionMeta, SectionType, public_sections, sort_for_display};

// Typed configs
pub use section_config::{
    Article, BannerConfig, BlogHighlightsConfig, BrandLogo, BrandMarqueeConfig,
    CategoryCirclesConfig, CategoryGridConfig, CollectionLink, CollectionLinksConfig,
    ConfigShapeError, CtaAction, CustomConfig, HeroConfig, NewsletterSocialConfig,
    ProductCarouselConfig, ProductTabConfig, ProductTabsConfig, ScrollingTextConfig,
    SectionConfig, SocialLink, StoreCtaConfig, VideoBannerConfig,
};

// Collaborator records
pub use catalog::{
    Banner, BannerPosition, Brand, Category, Media, MediaRef, Product, ProductFlag, Slider,
    VideoBanner,
};

// View data
pub use view::{
    AnnouncementView, BannerView, BrandLogoView, BrandMarqueeView, CategoryCard,
    CategoryCirclesView, CategoryGridView, CustomView, HeroView, ProductCard,
    ProductCarouselView, ProductTabView, ProductTabsView, ResolvedSection, SlideView,
    VideoBannerView, ViewData,
};
