// ── Typed section configs ──
//
// A section's `config` is stored as an untyped JSON object. This module
// parses it into one strongly-typed struct per section type, keyed by the
// section's `type` tag. Missing keys always fall back to defaults; only
// values of the wrong shape are rejected.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::catalog::ProductFlag;
use super::entity_id::EntityId;
use super::section::SectionType;

/// A section config that could not be interpreted for its type.
#[derive(Debug, Error)]
pub enum ConfigShapeError {
    #[error("unknown section type '{section_type}'")]
    UnknownType { section_type: String },

    #[error("invalid config for {section_type}: {source}")]
    Malformed {
        section_type: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parsed config, one variant per section family.
///
/// Aliased tags share a variant: `hero`/`heroSlider`,
/// `categoryFeatured`/`categoryGrid`/`promoGrid`,
/// `productCarousel`/`productStrip`, `customHTML`/`custom`.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionConfig {
    Hero(HeroConfig),
    ScrollingText(ScrollingTextConfig),
    CategoryGrid(CategoryGridConfig),
    CategoryCircles(CategoryCirclesConfig),
    ProductTabs(ProductTabsConfig),
    ProductCarousel(ProductCarouselConfig),
    Banner(BannerConfig),
    VideoBanner(VideoBannerConfig),
    BrandMarquee(BrandMarqueeConfig),
    StoreCta(StoreCtaConfig),
    BlogHighlights(BlogHighlightsConfig),
    CollectionLinks(CollectionLinksConfig),
    NewsletterSocial(NewsletterSocialConfig),
    Custom(CustomConfig),
}

impl SectionConfig {
    pub fn parse(
        section_type: &SectionType,
        config: &Map<String, Value>,
    ) -> Result<Self, ConfigShapeError> {
        let parsed = match section_type {
            SectionType::Hero | SectionType::HeroSlider => {
                Self::Hero(typed(section_type, config)?)
            }
            SectionType::ScrollingText => Self::ScrollingText(typed(section_type, config)?),
            SectionType::PromoGrid | SectionType::CategoryFeatured | SectionType::CategoryGrid => {
                Self::CategoryGrid(typed(section_type, config)?)
            }
            SectionType::CategoryCircles => Self::CategoryCircles(typed(section_type, config)?),
            SectionType::ProductTabs => Self::ProductTabs(typed(section_type, config)?),
            SectionType::ProductCarousel | SectionType::ProductStrip => {
                Self::ProductCarousel(typed(section_type, config)?)
            }
            SectionType::BannerFullWidth => Self::Banner(typed(section_type, config)?),
            SectionType::VideoBanner => Self::VideoBanner(typed(section_type, config)?),
            SectionType::BrandMarquee => Self::BrandMarquee(typed(section_type, config)?),
            SectionType::StoreCta => Self::StoreCta(typed(section_type, config)?),
            SectionType::BlogHighlights => Self::BlogHighlights(typed(section_type, config)?),
            SectionType::CollectionLinks => Self::CollectionLinks(typed(section_type, config)?),
            SectionType::NewsletterSocial => Self::NewsletterSocial(typed(section_type, config)?),
            SectionType::CustomHtml | SectionType::Custom => Self::Custom(CustomConfig {
                html: config
                    .get("html")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                raw: config.clone(),
            }),
            SectionType::Unknown(tag) => {
                return Err(ConfigShapeError::UnknownType {
                    section_type: tag.clone(),
                });
            }
        };
        Ok(parsed)
    }
}

fn typed<T: DeserializeOwned>(
    section_type: &SectionType,
    config: &Map<String, Value>,
) -> Result<T, ConfigShapeError> {
    serde_json::from_value(Value::Object(config.clone())).map_err(|source| {
        ConfigShapeError::Malformed {
            section_type: section_type.to_string(),
            source,
        }
    })
}

// ── Lenient scalar helpers ──────────────────────────────────────────
//
// Admin forms post numbers and booleans as strings ("8", "true"), empty
// strings for unset values, and `null` for fields never filled in. All of
// these mean "use the default" rather than a malformed config.

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

fn opt_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => u32::try_from(n).map(Some).map_err(de::Error::custom),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Text(String),
}

fn opt_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(de::Error::custom(format!("expected a boolean, got '{other}'"))),
        },
    }
}

/// Boolean that defaults to `true` when null or blank.
fn flag_on<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(opt_bool(deserializer)?.unwrap_or(true))
}

/// Boolean that defaults to `false` when null or blank.
fn flag_off<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(opt_bool(deserializer)?.unwrap_or(false))
}

fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<EntityId>, D::Error> {
    Ok(Option::<EntityId>::deserialize(deserializer)?.filter(|id| !id.is_empty()))
}

fn id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<EntityId>, D::Error> {
    let ids = Option::<Vec<EntityId>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(super::entity_id::normalize_ids(&ids))
}

fn opt_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ProductFlag>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|tag| ProductFlag::from_tag(&tag)))
}

// ── Hero ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct HeroConfig {
    #[serde(deserialize_with = "id_list")]
    pub slider_ids: Vec<EntityId>,
    #[serde(deserialize_with = "flag_on")]
    pub autoplay: bool,
    #[serde(deserialize_with = "opt_u32")]
    pub autoplay_speed: Option<u32>,
    #[serde(deserialize_with = "flag_on")]
    pub show_arrows: bool,
    #[serde(deserialize_with = "flag_on")]
    pub show_dots: bool,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            slider_ids: Vec::new(),
            autoplay: true,
            autoplay_speed: None,
            show_arrows: true,
            show_dots: true,
        }
    }
}

impl HeroConfig {
    pub const DEFAULT_AUTOPLAY_SPEED_MS: u32 = 5000;

    pub fn autoplay_speed_ms(&self) -> u32 {
        self.autoplay_speed
            .filter(|ms| *ms > 0)
            .unwrap_or(Self::DEFAULT_AUTOPLAY_SPEED_MS)
    }
}

// ── Scrolling text ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollingTextConfig {
    #[serde(deserialize_with = "list")]
    pub items: Vec<Option<String>>,
    #[serde(deserialize_with = "opt_u32")]
    pub scroll_speed: Option<u32>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

// ── Category sections ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryGridConfig {
    #[serde(deserialize_with = "id_list")]
    pub category_ids: Vec<EntityId>,
    #[serde(deserialize_with = "opt_u32")]
    pub grid_columns: Option<u32>,
    #[serde(deserialize_with = "flag_on")]
    pub show_title: bool,
}

impl Default for CategoryGridConfig {
    fn default() -> Self {
        Self {
            category_ids: Vec::new(),
            grid_columns: None,
            show_title: true,
        }
    }
}

impl CategoryGridConfig {
    /// Column count, clamped to 1..=6 (default 4).
    pub fn columns(&self) -> u32 {
        self.grid_columns.unwrap_or(4).clamp(1, 6)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryCirclesConfig {
    #[serde(deserialize_with = "id_list")]
    pub category_ids: Vec<EntityId>,
}

// ── Product sections ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductTabConfig {
    #[serde(deserialize_with = "text")]
    pub label: String,
    #[serde(deserialize_with = "opt_flag")]
    pub filter: Option<ProductFlag>,
    #[serde(deserialize_with = "opt_u32")]
    pub limit: Option<u32>,
    #[serde(deserialize_with = "opt_id")]
    pub category_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductTabsConfig {
    #[serde(deserialize_with = "list")]
    pub tabs: Vec<ProductTabConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductCarouselConfig {
    #[serde(deserialize_with = "opt_id")]
    pub category_id: Option<EntityId>,
    #[serde(deserialize_with = "opt_flag")]
    pub filter: Option<ProductFlag>,
    #[serde(deserialize_with = "opt_u32")]
    pub limit: Option<u32>,
    #[serde(deserialize_with = "flag_off")]
    pub autoplay: bool,
}

// ── Banners ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BannerConfig {
    #[serde(deserialize_with = "opt_id")]
    pub banner_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoBannerConfig {
    #[serde(deserialize_with = "opt_id")]
    pub video_banner_id: Option<EntityId>,
}

// ── Brand marquee ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandLogo {
    #[serde(deserialize_with = "text")]
    pub name: String,
    pub image: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandMarqueeConfig {
    /// Used only when the brand store has no active brands.
    #[serde(deserialize_with = "list")]
    pub logos: Vec<BrandLogo>,
}

// ── Literal sections ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaAction {
    #[serde(deserialize_with = "text")]
    pub label: String,
    #[serde(deserialize_with = "text")]
    pub href: String,
    #[serde(deserialize_with = "flag_off")]
    pub external: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreCtaConfig {
    pub eyebrow: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub primary_action: Option<CtaAction>,
    pub secondary_action: Option<CtaAction>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    #[serde(deserialize_with = "text")]
    pub title: String,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub href: Option<String>,
    pub date: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogHighlightsConfig {
    #[serde(deserialize_with = "list")]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionLink {
    #[serde(deserialize_with = "text")]
    pub label: String,
    #[serde(deserialize_with = "text")]
    pub href: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionLinksConfig {
    #[serde(deserialize_with = "list")]
    pub links: Vec<CollectionLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    #[serde(deserialize_with = "text")]
    pub platform: String,
    #[serde(deserialize_with = "text")]
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsletterSocialConfig {
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub placeholder: Option<String>,
    pub button_label: Option<String>,
    #[serde(deserialize_with = "list")]
    pub socials: Vec<SocialLink>,
}

/// Passthrough for `customHTML` / `custom`: rendered verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomConfig {
    pub html: Option<String>,
    pub raw: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(tag: &str, config: Value) -> Result<SectionConfig, ConfigShapeError> {
        let Value::Object(map) = config else {
            panic!("test config must be an object");
        };
        SectionConfig::parse(&SectionType::from(tag), &map)
    }

    #[test]
    fn empty_hero_config_uses_defaults() {
        let SectionConfig::Hero(cfg) = parse("heroSlider", json!({})).unwrap() else {
            panic!("expected hero config");
        };
        assert!(cfg.slider_ids.is_empty());
        assert!(cfg.autoplay && cfg.show_arrows && cfg.show_dots);
        assert_eq!(cfg.autoplay_speed_ms(), HeroConfig::DEFAULT_AUTOPLAY_SPEED_MS);
    }

    #[test]
    fn numeric_strings_and_blank_ids_are_accepted() {
        let SectionConfig::ProductCarousel(cfg) = parse(
            "productStrip",
            json!({ "limit": "6", "categoryId": "", "filter": "Discounted" }),
        )
        .unwrap() else {
            panic!("expected carousel config");
        };
        assert_eq!(cfg.limit, Some(6));
        assert_eq!(cfg.category_id, None);
        assert_eq!(cfg.filter, Some(ProductFlag::Discounted));
    }

    #[test]
    fn unrecognized_filter_means_no_filter() {
        let SectionConfig::ProductCarousel(cfg) =
            parse("productCarousel", json!({ "filter": "bestsellers" })).unwrap()
        else {
            panic!("expected carousel config");
        };
        assert_eq!(cfg.filter, None);
    }

    #[test]
    fn slider_ids_are_normalized() {
        let SectionConfig::Hero(cfg) =
            parse("hero", json!({ "sliderIds": ["a", "", "a", "b"] })).unwrap()
        else {
            panic!("expected hero config");
        };
        assert_eq!(cfg.slider_ids, vec![EntityId::from("a"), EntityId::from("b")]);
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let err = parse("productTabs", json!({ "tabs": "new" })).unwrap_err();
        assert!(matches!(err, ConfigShapeError::Malformed { .. }));
        let err = parse("productCarousel", json!({ "limit": "lots" })).unwrap_err();
        assert!(matches!(err, ConfigShapeError::Malformed { .. }));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = parse("megaMenu", json!({})).unwrap_err();
        assert!(matches!(err, ConfigShapeError::UnknownType { section_type } if section_type == "megaMenu"));
    }

    #[test]
    fn custom_passes_config_through() {
        let SectionConfig::Custom(cfg) =
            parse("customHTML", json!({ "html": "<b>hi</b>", "extra": 1 })).unwrap()
        else {
            panic!("expected custom config");
        };
        assert_eq!(cfg.html.as_deref(), Some("<b>hi</b>"));
        assert_eq!(cfg.raw.get("extra"), Some(&json!(1)));
    }

    #[test]
    fn grid_columns_are_clamped() {
        let SectionConfig::CategoryGrid(cfg) =
            parse("promoGrid", json!({ "gridColumns": 12 })).unwrap()
        else {
            panic!("expected grid config");
        };
        assert_eq!(cfg.columns(), 6);
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let SectionConfig::Hero(hero) = parse(
            "hero",
            json!({ "sliderIds": null, "autoplay": null, "autoplaySpeed": null, "showArrows": null, "showDots": null }),
        )
        .unwrap() else {
            panic!("expected hero config");
        };
        assert_eq!(hero, HeroConfig::default());

        let SectionConfig::CategoryGrid(grid) = parse(
            "categoryFeatured",
            json!({ "categoryIds": [], "showTitle": null, "gridColumns": null }),
        )
        .unwrap() else {
            panic!("expected grid config");
        };
        assert_eq!(grid, CategoryGridConfig::default());

        let SectionConfig::ScrollingText(bar) =
            parse("scrollingText", json!({ "items": null, "scrollSpeed": null })).unwrap()
        else {
            panic!("expected scrolling text config");
        };
        assert!(bar.items.is_empty());

        let SectionConfig::ProductTabs(tabs) = parse(
            "productTabs",
            json!({ "tabs": [{ "label": null, "filter": null, "limit": null, "categoryId": null }] }),
        )
        .unwrap() else {
            panic!("expected tabs config");
        };
        assert_eq!(tabs.tabs, vec![ProductTabConfig::default()]);

        let SectionConfig::ProductCarousel(carousel) =
            parse("productCarousel", json!({ "autoplay": null, "limit": null })).unwrap()
        else {
            panic!("expected carousel config");
        };
        assert!(!carousel.autoplay);
    }

    #[test]
    fn null_lists_in_literal_sections_are_empty() {
        for (tag, key) in [
            ("brandMarquee", "logos"),
            ("blogHighlights", "articles"),
            ("collectionLinks", "links"),
            ("newsletterSocial", "socials"),
        ] {
            let mut config = Map::new();
            config.insert(key.into(), Value::Null);
            assert!(
                SectionConfig::parse(&SectionType::from(tag), &config).is_ok(),
                "{tag} rejected a null {key}"
            );
        }

        let SectionConfig::StoreCta(cta) = parse(
            "storeCta",
            json!({ "title": null, "primaryAction": { "label": "Shop", "href": null, "external": null } }),
        )
        .unwrap() else {
            panic!("expected cta config");
        };
        let action = cta.primary_action.unwrap();
        assert_eq!(action.href, "");
        assert!(!action.external);
    }

    #[test]
    fn boolean_strings_are_accepted() {
        let SectionConfig::Hero(hero) =
            parse("heroSlider", json!({ "autoplay": "false", "showDots": "TRUE", "showArrows": "" }))
                .unwrap()
        else {
            panic!("expected hero config");
        };
        assert!(!hero.autoplay);
        assert!(hero.show_dots && hero.show_arrows);

        let err = parse("categoryGrid", json!({ "showTitle": "maybe" })).unwrap_err();
        assert!(matches!(err, ConfigShapeError::Malformed { .. }));
    }
}
