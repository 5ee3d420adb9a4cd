// ── Per-type resolution routines ──
//
// One routine per section family. Each reads its typed config, fetches
// through the pass context, applies the documented fallback when the
// config names nothing usable, and returns render-ready view data.

use std::collections::{HashMap, HashSet};

use futures_util::future::try_join_all;

use super::context::ResolveContext;
use crate::config::SectionLimits;
use crate::error::ResolveError;
use crate::model::{
    AnnouncementView, BannerConfig, BannerView, BlogHighlightsConfig, BrandLogoView,
    BrandMarqueeConfig, BrandMarqueeView, Category, CategoryCard, CategoryCirclesConfig,
    CategoryCirclesView, CategoryGridConfig, CategoryGridView, CollectionLinksConfig,
    EntityId, HeroConfig, HeroView, Product, ProductCard, ProductCarouselConfig,
    ProductCarouselView, ProductTabView, ProductTabsConfig, ProductTabsView,
    ScrollingTextConfig, SlideView, Slider, StoreCtaConfig, VideoBannerConfig, VideoBannerView,
    ViewData,
};
use crate::store::{BannerStore, Catalog, CategoryStore, ProductQuery, SliderStore, VideoBannerStore};

type Resolved = Result<ViewData, ResolveError>;

// ── Hero ────────────────────────────────────────────────────────────

pub(super) async fn hero<C: Catalog>(ctx: &ResolveContext<'_, C>, cfg: HeroConfig) -> Resolved {
    let mut slides = if cfg.slider_ids.is_empty() {
        Vec::new()
    } else {
        let found = ctx.catalog().find_sliders_by_ids(&cfg.slider_ids).await?;
        let explicit: Vec<Slider> = in_id_order(found, &cfg.slider_ids, |s| &s.id)
            .into_iter()
            .filter(|s| s.is_active)
            .collect();
        slides_for(ctx, &explicit).await?
    };
    // Referenced sliders that are all inactive or image-less count as unset
    if slides.is_empty() {
        slides = slides_for(ctx, ctx.active_sliders().await?).await?;
    }
    if slides.is_empty() {
        return Err(ResolveError::EmptyResult {
            what: "sliders with an image",
        });
    }

    Ok(ViewData::Hero(HeroView {
        slides,
        autoplay: cfg.autoplay,
        autoplay_speed_ms: cfg.autoplay_speed_ms(),
        show_arrows: cfg.show_arrows,
        show_dots: cfg.show_dots,
    }))
}

async fn slides_for<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    sliders: &[Slider],
) -> Result<Vec<SlideView>, ResolveError> {
    Ok(try_join_all(sliders.iter().map(|s| slide(ctx, s)))
        .await?
        .into_iter()
        .flatten()
        .collect())
}

/// A slider without any resolvable image is dropped.
async fn slide<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    slider: &Slider,
) -> Result<Option<SlideView>, ResolveError> {
    let Some(image_url) = ctx.image_url(&slider.image).await? else {
        return Ok(None);
    };
    let mobile_image_url = ctx.image_url(&slider.mobile_image).await?;
    Ok(Some(SlideView {
        id: slider.id.clone(),
        title: slider.title.clone(),
        description: slider.description.clone(),
        image_url,
        mobile_image_url,
        link: slider.link.clone(),
    }))
}

// ── Announcement bar ────────────────────────────────────────────────

pub(super) fn scrolling_text(cfg: ScrollingTextConfig) -> Resolved {
    let items: Vec<String> = cfg
        .items
        .iter()
        .flatten()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect();
    if items.is_empty() {
        return Err(ResolveError::EmptyResult {
            what: "announcement items",
        });
    }
    Ok(ViewData::Announcement(AnnouncementView {
        items,
        scroll_speed: cfg.scroll_speed,
        background_color: cfg.background_color,
        text_color: cfg.text_color,
    }))
}

// ── Categories ──────────────────────────────────────────────────────

pub(super) async fn category_grid<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    cfg: CategoryGridConfig,
) -> Resolved {
    let mut categories = explicit_categories(ctx, &cfg.category_ids).await?;
    if categories.is_empty() {
        categories = ctx.featured_categories().await?.to_vec();
    }
    if categories.is_empty() {
        return Err(ResolveError::EmptyResult {
            what: "featured categories",
        });
    }
    Ok(ViewData::CategoryGrid(CategoryGridView {
        categories: category_cards(ctx, &categories).await?,
        grid_columns: cfg.columns(),
        show_title: cfg.show_title,
    }))
}

pub(super) async fn category_circles<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    cfg: CategoryCirclesConfig,
    limits: &SectionLimits,
) -> Resolved {
    let mut categories = explicit_categories(ctx, &cfg.category_ids).await?;
    if categories.is_empty() {
        // Featured first, then the rest of the active catalog.
        let featured = ctx.featured_categories().await?;
        let mut seen: HashSet<&EntityId> = featured.iter().map(|c| &c.id).collect();
        categories = featured.to_vec();
        for category in ctx.active_categories().await? {
            if seen.insert(&category.id) {
                categories.push(category.clone());
            }
        }
    }
    categories.truncate(usize::try_from(limits.circles_max).unwrap_or(usize::MAX));
    if categories.is_empty() {
        return Err(ResolveError::EmptyResult {
            what: "active categories",
        });
    }
    Ok(ViewData::CategoryCircles(CategoryCirclesView {
        categories: category_cards(ctx, &categories).await?,
    }))
}

/// Active categories named by the config, in config order.
async fn explicit_categories<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    ids: &[EntityId],
) -> Result<Vec<Category>, ResolveError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let found = ctx.catalog().find_categories_by_ids(ids).await?;
    Ok(in_id_order(found, ids, |c| &c.id)
        .into_iter()
        .filter(|c| c.is_active)
        .collect())
}

async fn category_cards<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    categories: &[Category],
) -> Result<Vec<CategoryCard>, ResolveError> {
    try_join_all(categories.iter().map(|c| async move {
        Ok::<_, ResolveError>(CategoryCard {
            id: c.id.clone(),
            name: c.name.clone(),
            slug: c.slug.clone(),
            description: c.description.clone(),
            image_url: ctx.image_url(&c.image).await?,
        })
    }))
    .await
}

// ── Products ────────────────────────────────────────────────────────

pub(super) async fn product_tabs<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    cfg: ProductTabsConfig,
    limits: &SectionLimits,
) -> Resolved {
    if cfg.tabs.is_empty() {
        return Err(ResolveError::EmptyResult { what: "tabs" });
    }

    let tabs = try_join_all(cfg.tabs.into_iter().map(|tab| async move {
        let query = ProductQuery::new(limits.tab(tab.limit))
            .in_category(tab.category_id)
            .flagged(tab.filter);
        let products = product_cards(ctx, &ctx.products(&query).await?).await?;
        let label = match tab.label.trim() {
            "" => tab
                .filter
                .map_or_else(|| "All".to_owned(), |f| title_case(&f.to_string())),
            label => label.to_owned(),
        };
        Ok::<_, ResolveError>(ProductTabView {
            label,
            filter: tab.filter,
            products,
        })
    }))
    .await?;

    // Tabs with nothing to show are dropped.
    let tabs: Vec<ProductTabView> = tabs.into_iter().filter(|t| !t.products.is_empty()).collect();
    if tabs.is_empty() {
        return Err(ResolveError::EmptyResult {
            what: "products in any tab",
        });
    }
    Ok(ViewData::ProductTabs(ProductTabsView { tabs }))
}

pub(super) async fn product_carousel<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    cfg: ProductCarouselConfig,
    limits: &SectionLimits,
) -> Resolved {
    let query = ProductQuery::new(limits.carousel(cfg.limit))
        .in_category(cfg.category_id.clone())
        .flagged(cfg.filter);
    let products = ctx.products(&query).await?;
    if products.is_empty() {
        return Err(ResolveError::EmptyResult { what: "products" });
    }
    Ok(ViewData::ProductCarousel(ProductCarouselView {
        products: product_cards(ctx, &products).await?,
        filter: cfg.filter,
        category_id: cfg.category_id,
        autoplay: cfg.autoplay,
    }))
}

async fn product_cards<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    products: &[Product],
) -> Result<Vec<ProductCard>, ResolveError> {
    try_join_all(products.iter().map(|p| async move {
        Ok::<_, ResolveError>(ProductCard {
            id: p.id.clone(),
            name: p.name.clone(),
            slug: p.slug.clone(),
            price: p.price,
            final_price: p.final_price(),
            discount: p.discount,
            in_stock: p.in_stock(),
            image_url: ctx.image_url(&p.image).await?,
        })
    }))
    .await
}

// ── Banners ─────────────────────────────────────────────────────────

pub(super) async fn banner<C: Catalog>(ctx: &ResolveContext<'_, C>, cfg: BannerConfig) -> Resolved {
    let id = cfg.banner_id.ok_or_else(|| ResolveError::ConfigResolution {
        reason: "bannerId is not set".into(),
    })?;
    let banner = ctx
        .catalog()
        .find_banner(&id)
        .await?
        .ok_or_else(|| ResolveError::ConfigResolution {
            reason: format!("banner {id} not found"),
        })?;
    if !banner.is_active {
        return Err(ResolveError::ConfigResolution {
            reason: format!("banner {id} is inactive"),
        });
    }
    let image_url =
        ctx.image_url(&banner.image)
            .await?
            .ok_or_else(|| ResolveError::ConfigResolution {
                reason: format!("banner {id} has no image"),
            })?;

    Ok(ViewData::Banner(BannerView {
        id: banner.id,
        title: banner.title,
        description: banner.description,
        image_url,
        link: banner.link,
        position: banner.position,
    }))
}

pub(super) async fn video_banner<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    cfg: VideoBannerConfig,
) -> Resolved {
    let named = match &cfg.video_banner_id {
        Some(id) => ctx
            .catalog()
            .find_video_banner(id)
            .await?
            .filter(|v| v.is_active),
        None => None,
    };
    let chosen = match named {
        Some(video) => video,
        None => ctx
            .active_video_banners()
            .await?
            .first()
            .cloned()
            .ok_or(ResolveError::EmptyResult {
                what: "active video banners",
            })?,
    };

    let video_url =
        ctx.image_url(&chosen.video)
            .await?
            .ok_or_else(|| ResolveError::ConfigResolution {
                reason: format!("video banner {} has no video", chosen.id),
            })?;
    let poster_url = ctx.image_url(&chosen.poster).await?;

    Ok(ViewData::VideoBanner(VideoBannerView {
        id: chosen.id,
        title: chosen.title,
        description: chosen.description,
        video_url,
        poster_url,
        link: chosen.link,
    }))
}

// ── Brands ──────────────────────────────────────────────────────────

pub(super) async fn brand_marquee<C: Catalog>(
    ctx: &ResolveContext<'_, C>,
    cfg: BrandMarqueeConfig,
) -> Resolved {
    let brands = ctx.active_brands().await?;
    let logos: Vec<BrandLogoView> = if brands.is_empty() {
        cfg.logos
            .into_iter()
            .filter(|logo| !logo.name.trim().is_empty())
            .map(|logo| BrandLogoView {
                name: logo.name,
                image_url: logo.image.filter(|u| !u.trim().is_empty()),
                link: logo.link,
            })
            .collect()
    } else {
        try_join_all(brands.iter().map(|b| async move {
            Ok::<_, ResolveError>(BrandLogoView {
                name: b.name.clone(),
                image_url: ctx.image_url(&b.image).await?,
                link: b.link.clone(),
            })
        }))
        .await?
    };
    if logos.is_empty() {
        return Err(ResolveError::EmptyResult { what: "brands" });
    }
    Ok(ViewData::BrandMarquee(BrandMarqueeView { brands: logos }))
}

// ── Literal sections ────────────────────────────────────────────────

pub(super) fn store_cta(cfg: StoreCtaConfig) -> Resolved {
    let blank = |s: &Option<String>| s.as_deref().is_none_or(|s| s.trim().is_empty());
    if blank(&cfg.title) && blank(&cfg.description) {
        return Err(ResolveError::EmptyResult {
            what: "call-to-action text",
        });
    }
    Ok(ViewData::StoreCta(cfg))
}

pub(super) fn blog_highlights(cfg: BlogHighlightsConfig) -> Resolved {
    if cfg.articles.is_empty() {
        return Err(ResolveError::EmptyResult { what: "articles" });
    }
    Ok(ViewData::BlogHighlights(cfg))
}

pub(super) fn collection_links(mut cfg: CollectionLinksConfig) -> Resolved {
    cfg.links
        .retain(|link| !link.label.trim().is_empty() && !link.href.trim().is_empty());
    if cfg.links.is_empty() {
        return Err(ResolveError::EmptyResult {
            what: "collection links",
        });
    }
    Ok(ViewData::CollectionLinks(cfg))
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Reorder `items` to follow `ids`; ids with no match are skipped.
fn in_id_order<T>(items: Vec<T>, ids: &[EntityId], id_of: impl Fn(&T) -> &EntityId) -> Vec<T> {
    let mut by_id: HashMap<EntityId, T> = items
        .into_iter()
        .map(|item| (id_of(&item).clone(), item))
        .collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
