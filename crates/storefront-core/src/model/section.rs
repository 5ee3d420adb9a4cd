// ── Homepage section domain types ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{EnumIter, IntoEnumIterator};

use super::entity_id::EntityId;

/// Discriminant of a homepage section.
///
/// Drives both config parsing and renderer dispatch. Tags written by a
/// newer (or older) admin that this build does not know are preserved
/// verbatim in [`SectionType::Unknown`] so they round-trip through
/// storage; such sections are skipped at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
    Hero,
    HeroSlider,
    ScrollingText,
    PromoGrid,
    CategoryFeatured,
    CategoryGrid,
    CategoryCircles,
    ProductTabs,
    ProductCarousel,
    ProductStrip,
    BannerFullWidth,
    VideoBanner,
    CollectionLinks,
    NewsletterSocial,
    BrandMarquee,
    CustomHtml,
    StoreCta,
    BlogHighlights,
    Custom,
    Unknown(String),
}

impl SectionType {
    /// Wire tag, as stored in the `type` field.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hero => "hero",
            Self::HeroSlider => "heroSlider",
            Self::ScrollingText => "scrollingText",
            Self::PromoGrid => "promoGrid",
            Self::CategoryFeatured => "categoryFeatured",
            Self::CategoryGrid => "categoryGrid",
            Self::CategoryCircles => "categoryCircles",
            Self::ProductTabs => "productTabs",
            Self::ProductCarousel => "productCarousel",
            Self::ProductStrip => "productStrip",
            Self::BannerFullWidth => "bannerFullWidth",
            Self::VideoBanner => "videoBanner",
            Self::CollectionLinks => "collectionLinks",
            Self::NewsletterSocial => "newsletterSocial",
            Self::BrandMarquee => "brandMarquee",
            Self::CustomHtml => "customHTML",
            Self::StoreCta => "storeCta",
            Self::BlogHighlights => "blogHighlights",
            Self::Custom => "custom",
            Self::Unknown(tag) => tag,
        }
    }

    /// All recognized section types.
    pub fn known() -> impl Iterator<Item = SectionType> {
        Self::iter().filter(Self::is_known)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Announcement bars render above the page header, outside the main flow.
    pub fn is_announcement(&self) -> bool {
        matches!(self, Self::ScrollingText)
    }

    /// Consecutive sections of this type are stacked into one container.
    pub fn stacks_when_adjacent(&self) -> bool {
        matches!(self, Self::BannerFullWidth)
    }

    /// Kebab-case token used in CSS class names.
    pub fn css_token(&self) -> String {
        let mut out = String::new();
        let mut prev_lower = false;
        for ch in self.as_str().chars() {
            if ch.is_ascii_uppercase() {
                if prev_lower {
                    out.push('-');
                }
                out.push(ch.to_ascii_lowercase());
                prev_lower = false;
            } else if ch.is_ascii_alphanumeric() {
                out.push(ch);
                prev_lower = true;
            } else {
                if !out.is_empty() && !out.ends_with('-') {
                    out.push('-');
                }
                prev_lower = false;
            }
        }
        out.trim_end_matches('-').to_owned()
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SectionType {
    fn from(tag: &str) -> Self {
        let tag = tag.trim();
        Self::known()
            .find(|t| t.as_str() == tag)
            .unwrap_or_else(|| Self::Unknown(tag.to_owned()))
    }
}

impl From<String> for SectionType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<SectionType> for String {
    fn from(t: SectionType) -> Self {
        match t {
            SectionType::Unknown(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

/// Per-breakpoint visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOn {
    pub desktop: bool,
    pub tablet: bool,
    pub mobile: bool,
}

impl Default for DisplayOn {
    fn default() -> Self {
        Self {
            desktop: true,
            tablet: true,
            mobile: true,
        }
    }
}

impl DisplayOn {
    pub fn is_visible_anywhere(&self) -> bool {
        self.desktop || self.tablet || self.mobile
    }

    /// CSS classes that hide the section on the disabled breakpoints.
    pub fn hidden_classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if !self.desktop {
            classes.push("hide-desktop");
        }
        if !self.tablet {
            classes.push("hide-tablet");
        }
        if !self.mobile {
            classes.push("hide-mobile");
        }
        classes
    }
}

fn default_true() -> bool {
    true
}

/// An admin-configured homepage block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form config; its valid shape depends on `section_type`.
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub ordering: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub display_on: DisplayOn,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<EntityId>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Section {
    /// Visible on the public homepage.
    pub fn is_public(&self) -> bool {
        self.is_active && self.is_published
    }

    pub fn meta(&self) -> SectionMeta {
        SectionMeta {
            id: self.id.clone(),
            name: self.name.clone(),
            section_type: self.section_type.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            description: self.description.clone(),
            ordering: self.ordering,
            display_on: self.display_on,
        }
    }
}

/// The display-relevant part of a section, handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMeta {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ordering: i32,
    pub display_on: DisplayOn,
}

/// Stable sort by `ordering`, then creation time.
pub fn sort_for_display(sections: &mut [Section]) {
    sections.sort_by(|a, b| {
        a.ordering
            .cmp(&b.ordering)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

/// Keep only active + published sections, in display order.
pub fn public_sections(sections: impl IntoIterator<Item = Section>) -> Vec<Section> {
    let mut public: Vec<Section> = sections.into_iter().filter(Section::is_public).collect();
    sort_for_display(&mut public);
    public
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn section(name: &str, ordering: i32, offset_secs: i64) -> Section {
        serde_json::from_value(json!({
            "id": name,
            "name": name,
            "type": "hero",
            "ordering": ordering,
            "createdAt": (Utc::now() + Duration::seconds(offset_secs)).to_rfc3339(),
        }))
        .unwrap()
    }

    #[test]
    fn section_type_round_trips_known_tags() {
        for t in SectionType::known() {
            assert_eq!(SectionType::from(t.as_str()), t);
        }
        assert_eq!(SectionType::from("customHTML"), SectionType::CustomHtml);
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let t: SectionType = serde_json::from_str("\"megaMenu\"").unwrap();
        assert_eq!(t, SectionType::Unknown("megaMenu".into()));
        assert!(!t.is_known());
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"megaMenu\"");
    }

    #[test]
    fn known_excludes_unknown_variant() {
        assert_eq!(SectionType::known().count(), 19);
    }

    #[test]
    fn css_token_is_kebab_case() {
        assert_eq!(SectionType::BannerFullWidth.css_token(), "banner-full-width");
        assert_eq!(SectionType::CustomHtml.css_token(), "custom-html");
        assert_eq!(SectionType::Hero.css_token(), "hero");
        assert_eq!(SectionType::Unknown("mega menu!".into()).css_token(), "mega-menu");
    }

    #[test]
    fn section_defaults_apply() {
        let s: Section = serde_json::from_value(json!({
            "id": "s1", "name": "Hero", "type": "hero"
        }))
        .unwrap();
        assert!(s.is_active && s.is_published);
        assert_eq!(s.display_on, DisplayOn::default());
        assert!(s.config.is_empty());
    }

    #[test]
    fn config_must_be_an_object() {
        let res: Result<Section, _> = serde_json::from_value(json!({
            "id": "s1", "name": "Hero", "type": "hero", "config": [1, 2]
        }));
        assert!(res.is_err());
    }

    #[test]
    fn public_sections_filter_and_order() {
        let mut hidden = section("hidden", 0, 0);
        hidden.is_published = false;
        let mut inactive = section("inactive", 0, 0);
        inactive.is_active = false;

        let out = public_sections(vec![
            section("c", 3, 0),
            hidden,
            section("a", 1, 0),
            inactive,
            section("b", 2, 0),
        ]);
        let names: Vec<_> = out.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn equal_ordering_breaks_ties_by_creation_time() {
        let out = public_sections(vec![section("late", 1, 60), section("early", 1, -60)]);
        let names: Vec<_> = out.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["early", "late"]);
    }

    #[test]
    fn hidden_classes_follow_flags() {
        let d = DisplayOn {
            desktop: true,
            tablet: false,
            mobile: false,
        };
        assert_eq!(d.hidden_classes(), ["hide-tablet", "hide-mobile"]);
        assert!(d.is_visible_anywhere());
    }
}
