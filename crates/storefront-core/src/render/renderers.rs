// ── Built-in section renderers ──
//
// One renderer per section family. A renderer receives the section's
// display metadata and its resolved view, and returns the element to
// place on the page, or `None` to leave the section out entirely.

use serde_json::Value;

use super::markup::{Element, Markup};
use crate::model::{
    AnnouncementView, Article, BannerView, BlogHighlightsConfig, BrandMarqueeView, CategoryCard,
    CategoryCirclesView, CategoryGridView, CollectionLinksConfig, CtaAction, CustomView,
    HeroView, NewsletterSocialConfig, ProductCard, ProductCarouselView, ProductTabsView,
    SectionMeta, StoreCtaConfig, VideoBannerView, ViewData,
};

/// Renders one family of sections.
///
/// Returning `None` omits the section; the page leaves no blank slot.
pub trait SectionRenderer: Send + Sync {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element>;
}

impl<F> SectionRenderer for F
where
    F: Fn(&SectionMeta, &ViewData) -> Option<Element> + Send + Sync,
{
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        self(meta, view)
    }
}

// ── Shared pieces ───────────────────────────────────────────────────

/// Outer `<section>` with the standard classes and, if `with_heading`,
/// the section's title block.
fn shell(meta: &SectionMeta, with_heading: bool) -> Element {
    let token = meta.section_type.css_token();
    let el = Element::new("section")
        .class("section")
        .class(format!("section--{token}"))
        .attr("id", format!("section-{}", meta.id))
        .attr("data-section-type", meta.section_type.as_str());
    if !with_heading {
        return el;
    }
    el.child_opt(heading(meta))
}

fn heading(meta: &SectionMeta) -> Option<Element> {
    let title = non_blank(meta.title.as_deref());
    let subtitle = non_blank(meta.subtitle.as_deref());
    let description = non_blank(meta.description.as_deref());
    if title.is_none() && subtitle.is_none() && description.is_none() {
        return None;
    }
    Some(
        Element::new("header")
            .class("section__header")
            .child_opt(title.map(|t| Element::new("h2").class("section__title").text(t)))
            .child_opt(subtitle.map(|s| Element::new("p").class("section__subtitle").text(s)))
            .child_opt(
                description.map(|d| Element::new("p").class("section__description").text(d)),
            ),
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn image(src: &str, alt: &str) -> Element {
    Element::new("img")
        .attr("src", src)
        .attr("alt", alt)
        .attr("loading", "lazy")
}

/// `<a>` when there is a link, `<div>` otherwise.
fn maybe_link(link: Option<&str>) -> Element {
    match non_blank(link) {
        Some(href) => Element::new("a").attr("href", href),
        None => Element::new("div"),
    }
}

fn format_price(amount: f64) -> String {
    format!("{amount:.2}")
}

fn product_card(card: &ProductCard, placeholder: &str) -> Element {
    let href = format!(
        "/products/{}",
        card.slug.as_deref().unwrap_or(card.id.as_str())
    );
    let src = card.image_url.as_deref().unwrap_or(placeholder);

    let price = if card.discount > 0.0 {
        Element::new("p")
            .class("product-card__price")
            .child(
                Element::new("span")
                    .class("price price--final")
                    .text(format_price(card.final_price)),
            )
            .child(
                Element::new("s")
                    .class("price price--original")
                    .text(format_price(card.price)),
            )
            .child(
                Element::new("span")
                    .class("badge badge--discount")
                    .text(format!("-{}%", card.discount)),
            )
    } else {
        Element::new("p")
            .class("product-card__price")
            .child(Element::new("span").class("price").text(format_price(card.price)))
    };

    Element::new("article")
        .class("product-card")
        .attr("data-product-id", card.id.as_str())
        .child(
            Element::new("a")
                .class("product-card__image")
                .attr("href", href.clone())
                .child(image(src, &card.name)),
        )
        .child(
            Element::new("h3").class("product-card__name").child(
                Element::new("a").attr("href", href).text(card.name.clone()),
            ),
        )
        .child(price)
        .child_opt((!card.in_stock).then(|| {
            Element::new("span")
                .class("badge badge--sold-out")
                .text("Out of stock")
        }))
}

fn product_grid(products: &[ProductCard], placeholder: &str) -> Element {
    Element::new("div")
        .class("product-grid")
        .children(products.iter().map(|p| product_card(p, placeholder)))
}

fn category_href(card: &CategoryCard) -> String {
    format!(
        "/categories/{}",
        card.slug.as_deref().unwrap_or(card.id.as_str())
    )
}

// ── Hero ────────────────────────────────────────────────────────────

pub struct HeroRenderer;

impl SectionRenderer for HeroRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::Hero(hero) = view else {
            return None;
        };
        if hero.slides.is_empty() {
            return None;
        }
        Some(shell(meta, false).child(slider(hero)))
    }
}

fn slider(hero: &HeroView) -> Element {
    let slides = hero.slides.iter().enumerate().map(|(idx, slide)| {
        let picture = Element::new("picture")
            .child_opt(slide.mobile_image_url.as_deref().map(|src| {
                Element::new("source")
                    .attr("media", "(max-width: 767px)")
                    .attr("srcset", src)
            }))
            .child(image(&slide.image_url, &slide.title));
        let caption = (!slide.title.trim().is_empty() || slide.description.is_some()).then(|| {
            Element::new("div")
                .class("hero-slide__caption")
                .child_opt(
                    non_blank(Some(slide.title.as_str()))
                        .map(|t| Element::new("h2").class("hero-slide__title").text(t)),
                )
                .child_opt(
                    non_blank(slide.description.as_deref())
                        .map(|d| Element::new("p").class("hero-slide__text").text(d)),
                )
        });
        maybe_link(slide.link.as_deref())
            .class("hero-slide")
            .class(if idx == 0 { "is-active" } else { "" })
            .attr("data-slide", idx.to_string())
            .child(picture)
            .child_opt(caption)
    });

    let mut el = Element::new("div")
        .class("hero-slider")
        .attr("data-autoplay", hero.autoplay.to_string())
        .attr("data-autoplay-speed", hero.autoplay_speed_ms.to_string())
        .children(slides);
    if hero.show_arrows && hero.slides.len() > 1 {
        el = el
            .child(
                Element::new("button")
                    .class("hero-slider__arrow hero-slider__arrow--prev")
                    .attr("type", "button")
                    .attr("aria-label", "Previous slide"),
            )
            .child(
                Element::new("button")
                    .class("hero-slider__arrow hero-slider__arrow--next")
                    .attr("type", "button")
                    .attr("aria-label", "Next slide"),
            );
    }
    if hero.show_dots && hero.slides.len() > 1 {
        el = el.child(
            Element::new("div")
                .class("hero-slider__dots")
                .children((0..hero.slides.len()).map(|idx| {
                    Element::new("button")
                        .class("hero-slider__dot")
                        .attr("type", "button")
                        .attr("data-slide", idx.to_string())
                        .attr("aria-label", format!("Go to slide {}", idx + 1))
                })),
        );
    }
    el
}

// ── Announcement bar ────────────────────────────────────────────────

pub struct AnnouncementRenderer;

impl SectionRenderer for AnnouncementRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::Announcement(bar) = view else {
            return None;
        };
        if bar.items.is_empty() {
            return None;
        }
        Some(
            shell(meta, false)
                .class("announcement-bar")
                .attr_opt("style", announcement_style(bar))
                .child(
                    Element::new("div")
                        .class("announcement-bar__track")
                        .attr_opt("data-scroll-speed", bar.scroll_speed.map(|s| s.to_string()))
                        .children(bar.items.iter().map(|item| {
                            Element::new("span")
                                .class("announcement-bar__item")
                                .text(item.clone())
                        })),
                ),
        )
    }
}

fn announcement_style(bar: &AnnouncementView) -> Option<String> {
    let mut rules = Vec::new();
    if let Some(bg) = non_blank(bar.background_color.as_deref()) {
        rules.push(format!("background-color: {bg}"));
    }
    if let Some(fg) = non_blank(bar.text_color.as_deref()) {
        rules.push(format!("color: {fg}"));
    }
    (!rules.is_empty()).then(|| rules.join("; "))
}

// ── Categories ──────────────────────────────────────────────────────

pub struct CategoryGridRenderer {
    pub placeholder: String,
}

impl SectionRenderer for CategoryGridRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::CategoryGrid(grid) = view else {
            return None;
        };
        if grid.categories.is_empty() {
            return None;
        }
        Some(shell(meta, true).child(self.grid(grid)))
    }
}

impl CategoryGridRenderer {
    fn grid(&self, grid: &CategoryGridView) -> Element {
        Element::new("div")
            .class("category-grid")
            .attr("style", format!("--grid-columns: {}", grid.grid_columns))
            .children(grid.categories.iter().map(|card| {
                Element::new("a")
                    .class("category-card")
                    .attr("href", category_href(card))
                    .child(image(
                        card.image_url.as_deref().unwrap_or(&self.placeholder),
                        &card.name,
                    ))
                    .child_opt(grid.show_title.then(|| {
                        Element::new("span")
                            .class("category-card__name")
                            .text(card.name.clone())
                    }))
            }))
    }
}

pub struct CategoryCirclesRenderer {
    pub placeholder: String,
}

impl SectionRenderer for CategoryCirclesRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::CategoryCircles(CategoryCirclesView { categories }) = view else {
            return None;
        };
        if categories.is_empty() {
            return None;
        }
        let items = categories.iter().map(|card| {
            Element::new("li").class("category-circle").child(
                Element::new("a")
                    .attr("href", category_href(card))
                    .child(image(
                        card.image_url.as_deref().unwrap_or(&self.placeholder),
                        &card.name,
                    ))
                    .child(
                        Element::new("span")
                            .class("category-circle__name")
                            .text(card.name.clone()),
                    ),
            )
        });
        Some(shell(meta, true).child(Element::new("ul").class("category-circles").children(items)))
    }
}

// ── Products ────────────────────────────────────────────────────────

pub struct ProductTabsRenderer {
    pub placeholder: String,
}

impl SectionRenderer for ProductTabsRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::ProductTabs(ProductTabsView { tabs }) = view else {
            return None;
        };
        let tabs: Vec<_> = tabs.iter().filter(|t| !t.products.is_empty()).collect();
        if tabs.is_empty() {
            return None;
        }

        let nav = Element::new("div")
            .class("product-tabs__nav")
            .attr("role", "tablist")
            .children(tabs.iter().enumerate().map(|(idx, tab)| {
                Element::new("button")
                    .class("product-tabs__tab")
                    .class(if idx == 0 { "is-active" } else { "" })
                    .attr("type", "button")
                    .attr("role", "tab")
                    .attr("data-tab", idx.to_string())
                    .text(tab.label.clone())
            }));
        let panels = tabs.iter().enumerate().map(|(idx, tab)| {
            Element::new("div")
                .class("product-tabs__panel")
                .attr("role", "tabpanel")
                .attr("data-tab", idx.to_string())
                .attr_opt("data-filter", tab.filter.map(|f| f.to_string()))
                .flag("hidden", idx > 0)
                .child(product_grid(&tab.products, &self.placeholder))
        });

        Some(
            shell(meta, true).child(
                Element::new("div")
                    .class("product-tabs")
                    .child(nav)
                    .children(panels),
            ),
        )
    }
}

pub struct ProductCarouselRenderer {
    pub placeholder: String,
}

impl SectionRenderer for ProductCarouselRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::ProductCarousel(carousel) = view else {
            return None;
        };
        // Zero products renders nothing rather than an empty strip.
        if carousel.products.is_empty() {
            return None;
        }
        Some(shell(meta, true).child(self.track(carousel)))
    }
}

impl ProductCarouselRenderer {
    fn track(&self, carousel: &ProductCarouselView) -> Element {
        Element::new("div")
            .class("product-carousel")
            .attr("data-autoplay", carousel.autoplay.to_string())
            .attr_opt("data-filter", carousel.filter.map(|f| f.to_string()))
            .attr_opt(
                "data-category-id",
                carousel.category_id.as_ref().map(ToString::to_string),
            )
            .children(
                carousel
                    .products
                    .iter()
                    .map(|p| product_card(p, &self.placeholder).class("product-carousel__item")),
            )
    }
}

// ── Banners ─────────────────────────────────────────────────────────

pub struct BannerRenderer;

impl SectionRenderer for BannerRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::Banner(banner) = view else {
            return None;
        };
        Some(shell(meta, false).child(banner_body(banner)))
    }
}

fn banner_body(banner: &BannerView) -> Element {
    let caption = (!banner.title.trim().is_empty() || banner.description.is_some()).then(|| {
        Element::new("div")
            .class("banner__caption")
            .child_opt(
                non_blank(Some(banner.title.as_str())).map(|t| Element::new("h2").class("banner__title").text(t)),
            )
            .child_opt(
                non_blank(banner.description.as_deref())
                    .map(|d| Element::new("p").class("banner__text").text(d)),
            )
    });
    maybe_link(banner.link.as_deref())
        .class("banner")
        .class(format!("banner--{}", banner.position))
        .child(image(&banner.image_url, &banner.title))
        .child_opt(caption)
}

pub struct VideoBannerRenderer;

impl SectionRenderer for VideoBannerRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::VideoBanner(video) = view else {
            return None;
        };
        Some(shell(meta, false).child(video_body(video)))
    }
}

fn video_body(video: &VideoBannerView) -> Element {
    let player = Element::new("video")
        .class("video-banner__video")
        .attr("src", video.video_url.clone())
        .attr_opt("poster", video.poster_url.clone())
        .flag("autoplay", true)
        .flag("muted", true)
        .flag("loop", true)
        .flag("playsinline", true);
    let caption = Element::new("div")
        .class("video-banner__caption")
        .child_opt(
            non_blank(Some(video.title.as_str()))
                .map(|t| Element::new("h2").class("video-banner__title").text(t)),
        )
        .child_opt(
            non_blank(video.description.as_deref())
                .map(|d| Element::new("p").class("video-banner__text").text(d)),
        )
        .child_opt(non_blank(video.link.as_deref()).map(|href| {
            Element::new("a")
                .class("button")
                .attr("href", href)
                .text("Discover")
        }));
    Element::new("div")
        .class("video-banner")
        .child(player)
        .child(caption)
}

// ── Brands ──────────────────────────────────────────────────────────

pub struct BrandMarqueeRenderer;

impl SectionRenderer for BrandMarqueeRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::BrandMarquee(BrandMarqueeView { brands }) = view else {
            return None;
        };
        if brands.is_empty() {
            return None;
        }
        let logos = brands.iter().map(|brand| {
            let inner: Markup = match &brand.image_url {
                Some(src) => image(src, &brand.name).into(),
                None => Markup::text(brand.name.clone()),
            };
            maybe_link(brand.link.as_deref())
                .class("brand-logo")
                .attr("title", brand.name.clone())
                .child(inner)
        });
        Some(
            shell(meta, true).child(
                Element::new("div").class("brand-marquee").child(
                    Element::new("div")
                        .class("brand-marquee__track")
                        .children(logos),
                ),
            ),
        )
    }
}

// ── Literal sections ────────────────────────────────────────────────

pub struct StoreCtaRenderer;

impl SectionRenderer for StoreCtaRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::StoreCta(cta) = view else {
            return None;
        };
        Some(shell(meta, false).child(cta_body(cta)))
    }
}

fn cta_body(cta: &StoreCtaConfig) -> Element {
    let actions = [
        cta.primary_action.as_ref().map(|a| (a, "button--primary")),
        cta.secondary_action.as_ref().map(|a| (a, "button--secondary")),
    ];
    let buttons: Vec<Element> = actions
        .into_iter()
        .flatten()
        .filter(|(a, _)| !a.label.trim().is_empty() && !a.href.trim().is_empty())
        .map(|(a, variant)| action_link(a, variant))
        .collect();

    Element::new("div")
        .class("store-cta")
        .child(
            Element::new("div")
                .class("store-cta__content")
                .child_opt(
                    non_blank(cta.eyebrow.as_deref())
                        .map(|e| Element::new("p").class("store-cta__eyebrow").text(e)),
                )
                .child_opt(
                    non_blank(cta.title.as_deref())
                        .map(|t| Element::new("h2").class("store-cta__title").text(t)),
                )
                .child_opt(
                    non_blank(cta.description.as_deref())
                        .map(|d| Element::new("p").class("store-cta__text").text(d)),
                )
                .child_opt((!buttons.is_empty()).then(|| {
                    Element::new("div")
                        .class("store-cta__actions")
                        .children(buttons)
                })),
        )
        .child_opt(non_blank(cta.image.as_deref()).map(|src| {
            image(src, cta.title.as_deref().unwrap_or_default()).class("store-cta__image")
        }))
}

fn action_link(action: &CtaAction, variant: &str) -> Element {
    let el = Element::new("a")
        .class("button")
        .class(variant)
        .attr("href", action.href.clone())
        .text(action.label.clone());
    if action.external {
        el.attr("target", "_blank").attr("rel", "noopener noreferrer")
    } else {
        el
    }
}

pub struct BlogHighlightsRenderer;

impl SectionRenderer for BlogHighlightsRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::BlogHighlights(BlogHighlightsConfig { articles }) = view else {
            return None;
        };
        if articles.is_empty() {
            return None;
        }
        Some(
            shell(meta, true).child(
                Element::new("div")
                    .class("blog-highlights")
                    .children(articles.iter().map(article_card)),
            ),
        )
    }
}

fn article_card(article: &Article) -> Element {
    let title = Element::new("h3")
        .class("article-card__title")
        .text(article.title.clone());
    Element::new("article")
        .class("article-card")
        .child_opt(
            non_blank(article.image.as_deref()).map(|src| image(src, &article.title)),
        )
        .child_opt(
            non_blank(article.tag.as_deref())
                .map(|t| Element::new("span").class("article-card__tag").text(t)),
        )
        .child(match non_blank(article.href.as_deref()) {
            Some(href) => Element::new("a").attr("href", href).child(title),
            None => title,
        })
        .child_opt(
            non_blank(article.excerpt.as_deref())
                .map(|e| Element::new("p").class("article-card__excerpt").text(e)),
        )
        .child_opt(non_blank(article.date.as_deref()).map(|d| {
            Element::new("time")
                .class("article-card__date")
                .attr("datetime", d)
                .text(d)
        }))
}

pub struct CollectionLinksRenderer;

impl SectionRenderer for CollectionLinksRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::CollectionLinks(CollectionLinksConfig { links }) = view else {
            return None;
        };
        if links.is_empty() {
            return None;
        }
        let items = links.iter().map(|link| {
            Element::new("li").class("collection-link").child(
                Element::new("a")
                    .attr("href", link.href.clone())
                    .child_opt(non_blank(link.image.as_deref()).map(|src| image(src, &link.label)))
                    .child(Element::new("span").text(link.label.clone())),
            )
        });
        Some(shell(meta, true).child(Element::new("ul").class("collection-links").children(items)))
    }
}

pub struct NewsletterSocialRenderer;

impl SectionRenderer for NewsletterSocialRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::NewsletterSocial(cfg) = view else {
            return None;
        };
        Some(shell(meta, false).child(newsletter_body(cfg)))
    }
}

fn newsletter_body(cfg: &NewsletterSocialConfig) -> Element {
    let form = Element::new("form")
        .class("newsletter__form")
        .attr("method", "post")
        .attr("action", "/newsletter")
        .child(
            Element::new("input")
                .attr("type", "email")
                .attr("name", "email")
                .attr(
                    "placeholder",
                    non_blank(cfg.placeholder.as_deref()).unwrap_or("Your email address"),
                )
                .flag("required", true),
        )
        .child(
            Element::new("button")
                .class("button button--primary")
                .attr("type", "submit")
                .text(non_blank(cfg.button_label.as_deref()).unwrap_or("Subscribe")),
        );
    let socials = cfg
        .socials
        .iter()
        .filter(|s| !s.href.trim().is_empty())
        .map(|s| {
            Element::new("li").child(
                Element::new("a")
                    .class("social-link")
                    .attr("href", s.href.clone())
                    .attr("data-platform", s.platform.to_lowercase())
                    .attr("target", "_blank")
                    .attr("rel", "noopener noreferrer")
                    .text(s.platform.clone()),
            )
        })
        .collect::<Vec<_>>();

    Element::new("div")
        .class("newsletter")
        .child_opt(
            non_blank(cfg.heading.as_deref())
                .map(|h| Element::new("h2").class("newsletter__heading").text(h)),
        )
        .child_opt(
            non_blank(cfg.subheading.as_deref())
                .map(|s| Element::new("p").class("newsletter__subheading").text(s)),
        )
        .child(form)
        .child_opt(
            (!socials.is_empty())
                .then(|| Element::new("ul").class("social-links").children(socials)),
        )
}

// ── Custom ──────────────────────────────────────────────────────────

/// Admin-authored HTML goes out verbatim. Without an `html` key the
/// config is handed to client-side code as a data attribute.
pub struct CustomRenderer;

impl SectionRenderer for CustomRenderer {
    fn render(&self, meta: &SectionMeta, view: &ViewData) -> Option<Element> {
        let ViewData::Custom(CustomView { html, config }) = view else {
            return None;
        };
        let body = Element::new("div").class("custom-section");
        let body = match html.as_deref().filter(|h| !h.trim().is_empty()) {
            Some(html) => body.child(Markup::raw(html)),
            None if config.is_empty() => return None,
            None => body.attr(
                "data-config",
                Value::Object(config.clone()).to_string(),
            ),
        };
        Some(shell(meta, true).child(body))
    }
}
