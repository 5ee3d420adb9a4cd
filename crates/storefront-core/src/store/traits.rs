// ── Collaborator read contracts ──
//
// The resolver only ever reads through these traits. Persistence lives
// elsewhere; `MemoryCatalog` is the in-process implementation.

use std::future::Future;

use crate::error::StoreError;
use crate::model::{
    Banner, Brand, Category, EntityId, Product, ProductFlag, Slider, VideoBanner,
};

/// Filter for a product listing.
///
/// Stores return active products only, newest first, at most `limit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductQuery {
    pub category_id: Option<EntityId>,
    pub flag: Option<ProductFlag>,
    pub limit: u32,
}

impl ProductQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            category_id: None,
            flag: None,
            limit,
        }
    }

    pub fn in_category(mut self, category_id: Option<EntityId>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn flagged(mut self, flag: Option<ProductFlag>) -> Self {
        self.flag = flag;
        self
    }

    /// Whether `product` passes every filter except the limit.
    pub fn matches(&self, product: &Product) -> bool {
        product.is_active
            && self
                .category_id
                .as_ref()
                .is_none_or(|id| product.category.as_ref() == Some(id))
            && self.flag.is_none_or(|flag| flag.matches(product))
    }
}

pub trait SliderStore: Send + Sync {
    /// Active sliders, ascending by `order`.
    fn find_active_sliders(&self) -> impl Future<Output = Result<Vec<Slider>, StoreError>> + Send;

    /// Sliders with the given ids, active or not, in any order.
    fn find_sliders_by_ids(
        &self,
        ids: &[EntityId],
    ) -> impl Future<Output = Result<Vec<Slider>, StoreError>> + Send;
}

pub trait CategoryStore: Send + Sync {
    /// Active categories in catalog order.
    fn find_active_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send;

    /// Categories that are both featured and active.
    fn find_featured_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send;

    fn find_categories_by_ids(
        &self,
        ids: &[EntityId],
    ) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send;
}

pub trait ProductStore: Send + Sync {
    fn find_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<Vec<Product>, StoreError>> + Send;
}

pub trait BannerStore: Send + Sync {
    fn find_banner(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Option<Banner>, StoreError>> + Send;

    fn find_active_banners(&self) -> impl Future<Output = Result<Vec<Banner>, StoreError>> + Send;
}

pub trait VideoBannerStore: Send + Sync {
    fn find_video_banner(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Option<VideoBanner>, StoreError>> + Send;

    /// Active video banners, newest first.
    fn find_active_video_banners(
        &self,
    ) -> impl Future<Output = Result<Vec<VideoBanner>, StoreError>> + Send;
}

pub trait BrandStore: Send + Sync {
    /// Active brands, ascending by `order`.
    fn find_active_brands(&self) -> impl Future<Output = Result<Vec<Brand>, StoreError>> + Send;
}

pub trait MediaResolver: Send + Sync {
    /// Public URL of an uploaded asset, or `None` if it does not exist.
    fn resolve_url(
        &self,
        media_id: &EntityId,
    ) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;
}

/// Everything the resolver reads besides sections.
pub trait Catalog:
    SliderStore + CategoryStore + ProductStore + BannerStore + VideoBannerStore + BrandStore + MediaResolver
{
}

impl<T> Catalog for T where
    T: SliderStore
        + CategoryStore
        + ProductStore
        + BannerStore
        + VideoBannerStore
        + BrandStore
        + MediaResolver
{
}
