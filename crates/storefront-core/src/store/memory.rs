// ── In-memory collaborator stores ──
//
// `MemoryCatalog` backs every collaborator trait with an
// `EntityCollection`. Used by the CLI (loaded from a snapshot file)
// and by tests.

use std::future::{Future, ready};
use std::sync::Arc;

use url::Url;

use super::collection::EntityCollection;
use super::traits::{
    BannerStore, BrandStore, CategoryStore, MediaResolver, ProductQuery, ProductStore,
    SliderStore, VideoBannerStore,
};
use crate::error::StoreError;
use crate::model::{
    Banner, Brand, Category, EntityId, Media, Product, Slider, VideoBanner,
};

/// Every collaborator collection the homepage reads from.
pub struct MemoryCatalog {
    sliders: EntityCollection<Slider>,
    categories: EntityCollection<Category>,
    products: EntityCollection<Product>,
    banners: EntityCollection<Banner>,
    video_banners: EntityCollection<VideoBanner>,
    brands: EntityCollection<Brand>,
    media: EntityCollection<Media>,
    /// Host that relative media paths are joined onto.
    media_base: Option<Url>,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            sliders: EntityCollection::new(),
            categories: EntityCollection::new(),
            products: EntityCollection::new(),
            banners: EntityCollection::new(),
            video_banners: EntityCollection::new(),
            brands: EntityCollection::new(),
            media: EntityCollection::new(),
            media_base: None,
        }
    }

    /// Join relative media paths onto `base`. A base without a trailing
    /// slash is treated as a directory.
    pub fn with_media_base(mut self, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        self.media_base = Some(base);
        self
    }

    // ── Writers ──────────────────────────────────────────────────────

    pub fn add_slider(&self, slider: Slider) {
        self.sliders.upsert(slider.id.clone(), slider);
    }

    pub fn add_category(&self, category: Category) {
        self.categories.upsert(category.id.clone(), category);
    }

    pub fn add_product(&self, product: Product) {
        self.products.upsert(product.id.clone(), product);
    }

    pub fn add_banner(&self, banner: Banner) {
        self.banners.upsert(banner.id.clone(), banner);
    }

    pub fn add_video_banner(&self, video: VideoBanner) {
        self.video_banners.upsert(video.id.clone(), video);
    }

    pub fn add_brand(&self, brand: Brand) {
        self.brands.upsert(brand.id.clone(), brand);
    }

    pub fn add_media(&self, media: Media) {
        self.media.upsert(media.id.clone(), media);
    }

    // ── Readers ──────────────────────────────────────────────────────

    pub fn sliders(&self) -> Vec<Slider> {
        owned(&self.sliders.snapshot())
    }

    pub fn categories(&self) -> Vec<Category> {
        owned(&self.categories.snapshot())
    }

    pub fn products(&self) -> Vec<Product> {
        owned(&self.products.snapshot())
    }

    pub fn banners(&self) -> Vec<Banner> {
        owned(&self.banners.snapshot())
    }

    pub fn video_banners(&self) -> Vec<VideoBanner> {
        owned(&self.video_banners.snapshot())
    }

    pub fn brands(&self) -> Vec<Brand> {
        owned(&self.brands.snapshot())
    }

    pub fn media(&self) -> Vec<Media> {
        owned(&self.media.snapshot())
    }

    fn media_url(&self, id: &EntityId) -> Option<String> {
        let media = self.media.get(id)?;
        if let Some(url) = non_blank(media.url.as_deref()) {
            return Some(url.to_owned());
        }
        let path = non_blank(media.path.as_deref())?;
        match &self.media_base {
            Some(base) => base
                .join(path.trim_start_matches('/'))
                .ok()
                .map(String::from),
            None => Some(path.to_owned()),
        }
    }
}

fn owned<T: Clone>(snapshot: &Arc<Vec<Arc<T>>>) -> Vec<T> {
    snapshot.iter().map(|e| T::clone(e)).collect()
}

fn filtered<T: Clone>(snapshot: &Arc<Vec<Arc<T>>>, keep: impl Fn(&T) -> bool) -> Vec<T> {
    snapshot
        .iter()
        .filter(|e| keep(e))
        .map(|e| T::clone(e))
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ── Trait implementations ───────────────────────────────────────────

impl SliderStore for MemoryCatalog {
    fn find_active_sliders(&self) -> impl Future<Output = Result<Vec<Slider>, StoreError>> + Send {
        let mut active = filtered(&self.sliders.snapshot(), |s| s.is_active);
        active.sort_by_key(|s| s.order);
        ready(Ok(active))
    }

    fn find_sliders_by_ids(
        &self,
        ids: &[EntityId],
    ) -> impl Future<Output = Result<Vec<Slider>, StoreError>> + Send {
        ready(Ok(ids
            .iter()
            .filter_map(|id| self.sliders.get(id))
            .map(|s| Slider::clone(&s))
            .collect()))
    }
}

impl CategoryStore for MemoryCatalog {
    fn find_active_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send {
        ready(Ok(filtered(&self.categories.snapshot(), |c| c.is_active)))
    }

    fn find_featured_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send {
        ready(Ok(filtered(&self.categories.snapshot(), |c| {
            c.is_active && c.is_featured
        })))
    }

    fn find_categories_by_ids(
        &self,
        ids: &[EntityId],
    ) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send {
        ready(Ok(ids
            .iter()
            .filter_map(|id| self.categories.get(id))
            .map(|c| Category::clone(&c))
            .collect()))
    }
}

impl ProductStore for MemoryCatalog {
    fn find_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<Vec<Product>, StoreError>> + Send {
        let mut products = filtered(&self.products.snapshot(), |p| query.matches(p));
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products.truncate(usize::try_from(query.limit).unwrap_or(usize::MAX));
        ready(Ok(products))
    }
}

impl BannerStore for MemoryCatalog {
    fn find_banner(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Option<Banner>, StoreError>> + Send {
        ready(Ok(self.banners.get(id).map(|b| Banner::clone(&b))))
    }

    fn find_active_banners(&self) -> impl Future<Output = Result<Vec<Banner>, StoreError>> + Send {
        ready(Ok(filtered(&self.banners.snapshot(), |b| b.is_active)))
    }
}

impl VideoBannerStore for MemoryCatalog {
    fn find_video_banner(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Option<VideoBanner>, StoreError>> + Send {
        ready(Ok(self.video_banners.get(id).map(|v| VideoBanner::clone(&v))))
    }

    fn find_active_video_banners(
        &self,
    ) -> impl Future<Output = Result<Vec<VideoBanner>, StoreError>> + Send {
        let mut active = filtered(&self.video_banners.snapshot(), |v| v.is_active);
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ready(Ok(active))
    }
}

impl BrandStore for MemoryCatalog {
    fn find_active_brands(&self) -> impl Future<Output = Result<Vec<Brand>, StoreError>> + Send {
        let mut active = filtered(&self.brands.snapshot(), |b| b.is_active);
        active.sort_by_key(|b| b.order);
        ready(Ok(active))
    }
}

impl MediaResolver for MemoryCatalog {
    fn resolve_url(
        &self,
        media_id: &EntityId,
    ) -> impl Future<Output = Result<Option<String>, StoreError>> + Send {
        ready(Ok(self.media_url(media_id)))
    }
}
