// ── Stores ──
//
// Read contracts for collaborator data, the section repository, and
// their in-memory implementations.

pub(crate) mod collection;
mod memory;
mod sections;
mod snapshot;
mod traits;

pub use memory::MemoryCatalog;
pub use sections::{MemorySectionStore, SectionRepository};
pub use snapshot::StoreSnapshot;
pub use traits::{
    BannerStore, BrandStore, Catalog, CategoryStore, MediaResolver, ProductQuery, ProductStore,
    SliderStore, VideoBannerStore,
};
