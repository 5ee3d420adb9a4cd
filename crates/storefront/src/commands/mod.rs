//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod config_cmd;
pub mod homepage;
pub mod sections;
pub mod util;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use storefront_config::Config;
use storefront_core::{
    HomepageConfig, MemoryCatalog, MemorySectionStore, Resolver, SectionAdmin, StoreSnapshot,
};
use tracing::debug;
use url::Url;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// A loaded store snapshot plus the settings needed to work on it.
pub struct Workspace {
    path: PathBuf,
    snapshot: StoreSnapshot,
    homepage: HomepageConfig,
    media_base: Option<Url>,
    sections: Arc<MemorySectionStore>,
}

impl Workspace {
    /// Load the snapshot named by `--store` or the config file.
    pub fn open(global: &GlobalOpts, cfg: &Config, config_path: &Path) -> Result<Self, CliError> {
        let path = global
            .store
            .clone()
            .or_else(|| cfg.store.clone())
            .ok_or_else(|| CliError::NoStore {
                config_path: config_path.display().to_string(),
            })?;
        let snapshot = StoreSnapshot::load(&path)?;
        debug!(
            path = %path.display(),
            sections = snapshot.sections.len(),
            products = snapshot.products.len(),
            "store snapshot loaded"
        );
        Ok(Self {
            sections: Arc::new(snapshot.section_store()),
            homepage: cfg.to_homepage_config()?,
            media_base: cfg.media_base()?,
            path,
            snapshot,
        })
    }

    pub fn admin(&self) -> SectionAdmin<MemorySectionStore> {
        SectionAdmin::new(Arc::clone(&self.sections))
    }

    pub fn resolver(&self) -> Resolver<MemoryCatalog, MemorySectionStore> {
        let catalog = match &self.media_base {
            Some(base) => MemoryCatalog::new().with_media_base(base.clone()),
            None => MemoryCatalog::new(),
        };
        Resolver::new(
            Arc::new(self.snapshot.fill_catalog(catalog)),
            Arc::clone(&self.sections),
            self.homepage.clone(),
        )
    }

    pub fn homepage_config(&self) -> &HomepageConfig {
        &self.homepage
    }

    /// Write the current sections back to the snapshot file.
    pub fn save(&mut self) -> Result<(), CliError> {
        self.snapshot.sections = self.sections.all();
        self.snapshot.save(&self.path)?;
        debug!(path = %self.path.display(), "store snapshot saved");
        Ok(())
    }
}

/// Dispatch a store-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    workspace: &mut Workspace,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Sections(args) => sections::handle(workspace, args, global).await,
        Command::Homepage(args) => homepage::handle(workspace, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
