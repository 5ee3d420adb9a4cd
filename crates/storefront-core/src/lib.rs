//! Homepage section composition for the storefront.
//!
//! Admins author an ordered list of typed sections, each with a free-form
//! `config` object. This crate turns that list into a rendered page:
//!
//! - **[`SectionAdmin`]**: validated create / update / delete / reorder
//!   on top of any [`SectionRepository`]. Reorder applies each entry on
//!   its own, so one bad id never blocks the rest.
//!
//! - **[`Resolver`]**: reads active, published sections in display order
//!   and resolves each one against the collaborator [`Catalog`] (sliders,
//!   categories, products, banners, brands, media) into self-contained
//!   [`ViewData`]. Sections resolve concurrently under one deadline and
//!   share a per-pass fetch cache. A failing section is logged and comes
//!   back without a view; the pass itself never fails.
//!
//! - **[`RendererRegistry`]**: maps each section type to a
//!   [`SectionRenderer`] and lays out the [`Page`]. Announcement bars
//!   go above the header, adjacent full-width banners stack.
//!
//! - **In-memory stores** ([`MemoryCatalog`], [`MemorySectionStore`]) built
//!   on `DashMap` + `ArcSwap`, loadable from a JSON [`StoreSnapshot`].

pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod resolver;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::requests::*;
pub use command::{CommandResult, SectionAdmin, SectionCommand, SectionIssue, validate_section};
pub use config::{HomepageConfig, SectionLimits};
pub use error::{CoreError, ResolveError, SnapshotError, StoreError};
pub use render::markup::{Element, Markup};
pub use render::renderers::SectionRenderer;
pub use render::{Block, Page, RenderedSection, RendererRegistry};
pub use resolver::Resolver;
pub use store::{
    Catalog, MemoryCatalog, MemorySectionStore, ProductQuery, SectionRepository, StoreSnapshot,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    DisplayOn, EntityId, ResolvedSection, Section, SectionConfig, SectionMeta, SectionType,
    ViewData,
};
