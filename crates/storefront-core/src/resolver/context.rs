// ── Per-pass fetch cache ──
//
// One `ResolveContext` lives for exactly one resolution pass. Sections
// resolving concurrently share it, so two hero sections (or two
// carousels with the same query) hit the store once.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;

use crate::error::StoreError;
use crate::model::{Brand, Category, EntityId, MediaRef, Product, Slider, VideoBanner};
use crate::store::{Catalog, ProductQuery};

pub(crate) struct ResolveContext<'a, C> {
    catalog: &'a C,
    active_sliders: OnceCell<Vec<Slider>>,
    active_categories: OnceCell<Vec<Category>>,
    featured_categories: OnceCell<Vec<Category>>,
    active_video_banners: OnceCell<Vec<VideoBanner>>,
    active_brands: OnceCell<Vec<Brand>>,
    products: DashMap<ProductQuery, Arc<OnceCell<Vec<Product>>>>,
    media_urls: DashMap<EntityId, Option<String>>,
}

impl<'a, C: Catalog> ResolveContext<'a, C> {
    pub(crate) fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            active_sliders: OnceCell::new(),
            active_categories: OnceCell::new(),
            featured_categories: OnceCell::new(),
            active_video_banners: OnceCell::new(),
            active_brands: OnceCell::new(),
            products: DashMap::new(),
            media_urls: DashMap::new(),
        }
    }

    /// Direct store access for uncached lookups (by-id fetches).
    pub(crate) fn catalog(&self) -> &'a C {
        self.catalog
    }

    pub(crate) async fn active_sliders(&self) -> Result<&[Slider], StoreError> {
        self.active_sliders
            .get_or_try_init(|| self.catalog.find_active_sliders())
            .await
            .map(Vec::as_slice)
    }

    pub(crate) async fn active_categories(&self) -> Result<&[Category], StoreError> {
        self.active_categories
            .get_or_try_init(|| self.catalog.find_active_categories())
            .await
            .map(Vec::as_slice)
    }

    pub(crate) async fn featured_categories(&self) -> Result<&[Category], StoreError> {
        self.featured_categories
            .get_or_try_init(|| self.catalog.find_featured_categories())
            .await
            .map(Vec::as_slice)
    }

    pub(crate) async fn active_video_banners(&self) -> Result<&[VideoBanner], StoreError> {
        self.active_video_banners
            .get_or_try_init(|| self.catalog.find_active_video_banners())
            .await
            .map(Vec::as_slice)
    }

    pub(crate) async fn active_brands(&self) -> Result<&[Brand], StoreError> {
        self.active_brands
            .get_or_try_init(|| self.catalog.find_active_brands())
            .await
            .map(Vec::as_slice)
    }

    pub(crate) async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        // Clone the cell out so no map guard is held across the await.
        let cell = Arc::clone(&self.products.entry(query.clone()).or_default());
        cell.get_or_try_init(|| self.catalog.find_products(query))
            .await
            .cloned()
    }

    /// Display URL for an image: uploaded media first, then the direct URL.
    pub(crate) async fn image_url(&self, image: &MediaRef) -> Result<Option<String>, StoreError> {
        if let Some(media_id) = image.media_id() {
            if let Some(url) = self.media_url(media_id).await? {
                return Ok(Some(url));
            }
        }
        Ok(image.direct_url().map(str::to_owned))
    }

    async fn media_url(&self, media_id: &EntityId) -> Result<Option<String>, StoreError> {
        if let Some(cached) = self.media_urls.get(media_id) {
            return Ok(cached.clone());
        }
        let url = self
            .catalog
            .resolve_url(media_id)
            .await?
            .filter(|u| !u.trim().is_empty());
        self.media_urls.insert(media_id.clone(), url.clone());
        Ok(url)
    }
}
