//! Shared configuration for the storefront CLI.
//!
//! A TOML file merged over built-in defaults and `STOREFRONT_*`
//! environment variables, and its translation to
//! `storefront_core::HomepageConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use storefront_core::{HomepageConfig, SectionLimits};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("cannot write config as TOML: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("cannot read config: {0}")]
    Figment(Box<figment::Error>),

    #[error("config file I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default store snapshot used when `--store` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,

    /// Deadline for one homepage resolution pass, in milliseconds.
    #[serde(default = "default_resolve_timeout_ms")]
    pub resolve_timeout_ms: u64,

    /// Image used for products and categories without one.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,

    /// Base URL that relative media paths are joined onto.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_base_url: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: None,
            resolve_timeout_ms: default_resolve_timeout_ms(),
            placeholder_image: default_placeholder_image(),
            media_base_url: None,
            defaults: Defaults::default(),
            limits: Limits::default(),
        }
    }
}

fn default_resolve_timeout_ms() -> u64 {
    5000
}
fn default_placeholder_image() -> String {
    "/images/placeholder.png".into()
}

/// CLI presentation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// `[limits]` table. Missing keys take the core defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Limits {
    pub carousel_default: u32,
    pub carousel_max: u32,
    pub tabs_default: u32,
    pub tabs_max: u32,
    pub circles_max: u32,
}

impl Default for Limits {
    fn default() -> Self {
        let core = SectionLimits::default();
        Self {
            carousel_default: core.carousel_default,
            carousel_max: core.carousel_max,
            tabs_default: core.tabs_default,
            tabs_max: core.tabs_max,
            circles_max: core.circles_max,
        }
    }
}

impl Limits {
    fn to_section_limits(self) -> Result<SectionLimits, ConfigError> {
        let pairs = [
            ("limits.carousel", self.carousel_default, self.carousel_max),
            ("limits.tabs", self.tabs_default, self.tabs_max),
        ];
        for (field, default, max) in pairs {
            if default == 0 || max == 0 {
                return Err(invalid(field, "limits must be at least 1"));
            }
            if default > max {
                return Err(invalid(
                    field,
                    format!("default ({default}) exceeds max ({max})"),
                ));
            }
        }
        if self.circles_max == 0 {
            return Err(invalid("limits.circles_max", "must be at least 1"));
        }
        Ok(SectionLimits {
            carousel_default: self.carousel_default,
            carousel_max: self.carousel_max,
            tabs_default: self.tabs_default,
            tabs_max: self.tabs_max,
            circles_max: self.circles_max,
        })
    }
}

impl Config {
    /// Translate into the core's runtime config, validating as we go.
    pub fn to_homepage_config(&self) -> Result<HomepageConfig, ConfigError> {
        if self.resolve_timeout_ms == 0 {
            return Err(invalid("resolve_timeout_ms", "must be greater than 0"));
        }
        let placeholder_image = self.placeholder_image.trim();
        if placeholder_image.is_empty() {
            return Err(invalid("placeholder_image", "must not be empty"));
        }
        Ok(HomepageConfig {
            resolve_timeout: Duration::from_millis(self.resolve_timeout_ms),
            placeholder_image: placeholder_image.to_owned(),
            limits: self.limits.to_section_limits()?,
        })
    }

    /// Parsed `media_base_url`, if set.
    pub fn media_base(&self) -> Result<Option<Url>, ConfigError> {
        let Some(raw) = self.media_base_url.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| invalid("media_base_url", format!("invalid URL: {raw}")))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// `config.toml` in the platform config directory, or
/// `$HOME/.config/storefront/` when there is none.
pub fn config_path() -> PathBuf {
    let dir = ProjectDirs::from("com", "storefront", "storefront").map_or_else(
        || {
            let home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
            home.join(".config").join("storefront")
        },
        |dirs| dirs.config_dir().to_path_buf(),
    );
    dir.join("config.toml")
}

// ── Config loading ──────────────────────────────────────────────────

/// Defaults, then the TOML file at `path`, then `STOREFRONT_*` env vars.
///
/// Nested keys use a double underscore: `STOREFRONT_LIMITS__CAROUSEL_MAX`.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("STOREFRONT_").split("__"))
}

/// Load the full Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file just means defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Write to [`config_path`] and return where it went.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
