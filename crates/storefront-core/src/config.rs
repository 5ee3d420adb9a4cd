// ── Runtime homepage configuration ──
//
// Tuning for a resolution pass and for rendering. Core never reads
// config files; the CLI (via `storefront-config`) builds a
// `HomepageConfig` and hands it in.

use std::time::Duration;

/// Product and category caps applied while resolving sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLimits {
    /// `productCarousel` / `productStrip` limit when the config has none.
    pub carousel_default: u32,
    /// Hard ceiling for a carousel's `limit`.
    pub carousel_max: u32,
    /// Per-tab limit for `productTabs` when the tab has none.
    pub tabs_default: u32,
    pub tabs_max: u32,
    /// Maximum number of circles in `categoryCircles`.
    pub circles_max: u32,
}

impl Default for SectionLimits {
    fn default() -> Self {
        Self {
            carousel_default: 12,
            carousel_max: 20,
            tabs_default: 8,
            tabs_max: 20,
            circles_max: 8,
        }
    }
}

impl SectionLimits {
    /// Effective carousel limit for a requested value.
    pub fn carousel(&self, requested: Option<u32>) -> u32 {
        cap(requested, self.carousel_default, self.carousel_max)
    }

    pub fn tab(&self, requested: Option<u32>) -> u32 {
        cap(requested, self.tabs_default, self.tabs_max)
    }
}

/// Zero or missing means "use the default"; anything above `max` is clamped.
fn cap(requested: Option<u32>, default: u32, max: u32) -> u32 {
    requested.filter(|n| *n > 0).unwrap_or(default).min(max)
}

/// Configuration for resolving and rendering the homepage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomepageConfig {
    /// Deadline for a whole resolution pass. Sections still resolving
    /// when it expires are omitted.
    pub resolve_timeout: Duration,
    /// Image shown for products and categories that have none.
    pub placeholder_image: String,
    pub limits: SectionLimits,
}

impl Default for HomepageConfig {
    fn default() -> Self {
        Self {
            resolve_timeout: Duration::from_secs(5),
            placeholder_image: "/images/placeholder.png".into(),
            limits: SectionLimits::default(),
        }
    }
}
