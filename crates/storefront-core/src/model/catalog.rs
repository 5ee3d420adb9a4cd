// ── Collaborator entities ──
//
// Records owned by other parts of the storefront (catalog, marketing,
// media library). The homepage core only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use strum::{Display, EnumString};

use super::entity_id::EntityId;

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PercentRepr {
    Number(f64),
    Text(String),
}

/// Percentage clamped to 0..=100. Fractions, numeric strings and null
/// are accepted so one odd product record cannot fail a whole snapshot.
fn percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = match Option::<PercentRepr>::deserialize(deserializer)? {
        None => 0.0,
        Some(PercentRepr::Number(n)) => n,
        Some(PercentRepr::Text(s)) if s.trim().is_empty() => 0.0,
        Some(PercentRepr::Text(s)) => s.trim().parse().map_err(de::Error::custom)?,
    };
    Ok(if raw.is_finite() { raw.clamp(0.0, 100.0) } else { 0.0 })
}

// ── Media references ────────────────────────────────────────────────

/// A reference to an image or video.
///
/// Either an uploaded media asset, a direct URL, or both. When both are
/// set the uploaded asset wins. Deserializes from a bare URL string as
/// well as from `{ "media": "...", "url": "..." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MediaRefRepr")]
pub struct MediaRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl MediaRef {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            media: None,
            url: Some(url.into()),
        }
    }

    pub fn from_media(id: impl Into<EntityId>) -> Self {
        Self {
            media: Some(id.into()),
            url: None,
        }
    }

    /// Uploaded media id, if one is set and non-empty.
    pub fn media_id(&self) -> Option<&EntityId> {
        self.media.as_ref().filter(|id| !id.is_empty())
    }

    /// Direct URL, if one is set and non-blank.
    pub fn direct_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.media_id().is_none() && self.direct_url().is_none()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MediaRefRepr {
    Null,
    Url(String),
    Full {
        #[serde(default)]
        media: Option<EntityId>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl From<MediaRefRepr> for MediaRef {
    fn from(repr: MediaRefRepr) -> Self {
        match repr {
            MediaRefRepr::Null => Self::default(),
            MediaRefRepr::Url(url) => Self::from_url(url),
            MediaRefRepr::Full { media, url } => Self { media, url },
        }
    }
}

/// An uploaded asset in the media library.
///
/// Stored either at an absolute URL or at a path relative to the media
/// host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

// ── Slider ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slider {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub image: MediaRef,
    #[serde(default)]
    pub mobile_image: MediaRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// ── Category ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub image: MediaRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<EntityId>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// ── Product ─────────────────────────────────────────────────────────

/// Merchandising flag a product query can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ProductFlag {
    Trending,
    Discounted,
    New,
    Featured,
}

impl ProductFlag {
    /// Parse an admin-supplied filter tag. Unrecognized tags mean "no filter".
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.trim().parse().ok()
    }

    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::Trending => product.is_trending,
            Self::Discounted => product.discount > 0.0,
            Self::New => product.is_new_arrival,
            Self::Featured => product.is_featured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub price: f64,
    /// Percentage off, clamped to 0–100.
    #[serde(default, deserialize_with = "percent")]
    pub discount: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image: MediaRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityId>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub is_new_arrival: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Price after discount, rounded to cents.
    pub fn final_price(&self) -> f64 {
        (self.price * (100.0 - self.discount.clamp(0.0, 100.0))).round() / 100.0
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// ── Banner ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BannerPosition {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub image: MediaRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub position: BannerPosition,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// ── Video banner ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoBanner {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub video: MediaRef,
    #[serde(default)]
    pub poster: MediaRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

// ── Brand ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub image: MediaRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(price: f64, discount: impl Serialize) -> Product {
        serde_json::from_value(json!({
            "id": "p1", "name": "Vitamin C", "price": price, "discount": discount
        }))
        .unwrap()
    }

    #[test]
    fn media_ref_accepts_bare_url() {
        let r: MediaRef = serde_json::from_value(json!("https://cdn.test/a.jpg")).unwrap();
        assert_eq!(r.direct_url(), Some("https://cdn.test/a.jpg"));
        assert!(r.media_id().is_none());
    }

    #[test]
    fn media_ref_accepts_object() {
        let r: MediaRef = serde_json::from_value(json!({ "media": "m1", "url": "  " })).unwrap();
        assert_eq!(r.media_id(), Some(&EntityId::from("m1")));
        assert!(r.direct_url().is_none());
        assert!(!r.is_empty());
    }

    #[test]
    fn null_media_ref_is_empty() {
        let r: MediaRef = serde_json::from_value(json!(null)).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn blank_media_ref_is_empty() {
        let r: MediaRef = serde_json::from_value(json!({ "media": "", "url": "" })).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn final_price_applies_discount() {
        assert!((product(20.0, 25).final_price() - 15.0).abs() < f64::EPSILON);
        assert!((product(9.99, 0).final_price() - 9.99).abs() < 1e-9);
        assert!((product(10.0, 150).final_price()).abs() < f64::EPSILON);
    }

    #[test]
    fn fractional_and_out_of_range_discounts_are_clamped() {
        let half = product(10.0, 12.5);
        assert!((half.discount - 12.5).abs() < f64::EPSILON);
        assert!((half.final_price() - 8.75).abs() < 1e-9);
        assert!((product(10.0, 150).discount - 100.0).abs() < f64::EPSILON);
        assert!(product(10.0, -5).discount.abs() < f64::EPSILON);
        assert!((product(10.0, "20").discount - 20.0).abs() < f64::EPSILON);
        assert!(product(10.0, json!(null)).discount.abs() < f64::EPSILON);
    }

    #[test]
    fn product_flag_parses_case_insensitively() {
        assert_eq!(ProductFlag::from_tag("Trending"), Some(ProductFlag::Trending));
        assert_eq!(ProductFlag::from_tag(" new "), Some(ProductFlag::New));
        assert_eq!(ProductFlag::from_tag("bestsellers"), None);
    }

    #[test]
    fn discounted_flag_requires_positive_discount() {
        assert!(ProductFlag::Discounted.matches(&product(10.0, 5)));
        assert!(!ProductFlag::Discounted.matches(&product(10.0, 0)));
    }
}
