// ── Store snapshot files ──
//
// A single JSON document holding sections and every collaborator
// collection. The CLI loads one, works on it in memory, and writes
// the sections back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::memory::MemoryCatalog;
use super::sections::MemorySectionStore;
use crate::error::SnapshotError;
use crate::model::{Banner, Brand, Category, Media, Product, Section, Slider, VideoBanner};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub sections: Vec<Section>,
    pub sliders: Vec<Slider>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub banners: Vec<Banner>,
    pub video_banners: Vec<VideoBanner>,
    pub brands: Vec<Brand>,
    pub media: Vec<Media>,
}

impl StoreSnapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let io_err = |source: std::io::Error| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut json = serde_json::to_string_pretty(self).map_err(SnapshotError::Serialize)?;
        json.push('\n');
        std::fs::write(path, json).map_err(io_err)
    }

    /// Populate a catalog with every collaborator collection.
    pub fn catalog(&self) -> MemoryCatalog {
        self.fill_catalog(MemoryCatalog::new())
    }

    pub fn fill_catalog(&self, catalog: MemoryCatalog) -> MemoryCatalog {
        for slider in &self.sliders {
            catalog.add_slider(slider.clone());
        }
        for category in &self.categories {
            catalog.add_category(category.clone());
        }
        for product in &self.products {
            catalog.add_product(product.clone());
        }
        for banner in &self.banners {
            catalog.add_banner(banner.clone());
        }
        for video in &self.video_banners {
            catalog.add_video_banner(video.clone());
        }
        for brand in &self.brands {
            catalog.add_brand(brand.clone());
        }
        for media in &self.media {
            catalog.add_media(media.clone());
        }
        catalog
    }

    pub fn section_store(&self) -> MemorySectionStore {
        MemorySectionStore::from_sections(self.sections.iter().cloned())
    }
}
