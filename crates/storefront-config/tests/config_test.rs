#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use storefront_config::{Config, ConfigError, Limits, load_config_from, save_config_to};

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn file_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
store = "/srv/storefront/store.json"
resolve_timeout_ms = 1500
media_base_url = "https://cdn.example.com/media/"

[defaults]
output = "json"

[limits]
carousel_max = 10
"#,
    )
    .unwrap();

    let cfg = load_config_from(&path).unwrap();
    assert_eq!(cfg.defaults.output, "json");
    assert_eq!(cfg.defaults.color, "auto");
    assert_eq!(cfg.limits.carousel_max, 10);
    assert_eq!(cfg.limits.tabs_max, Limits::default().tabs_max);

    let homepage = cfg.to_homepage_config().unwrap();
    assert_eq!(homepage.resolve_timeout, Duration::from_millis(1500));
    assert_eq!(homepage.limits.carousel(Some(50)), 10);
    assert_eq!(homepage.placeholder_image, "/images/placeholder.png");
    assert!(cfg.media_base().unwrap().is_some());
}

#[test]
fn saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let cfg = Config {
        placeholder_image: "/img/none.svg".into(),
        limits: Limits {
            circles_max: 6,
            ..Limits::default()
        },
        ..Config::default()
    };

    save_config_to(&cfg, &path).unwrap();
    assert_eq!(load_config_from(&path).unwrap(), cfg);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "resolve_timeout_ms = \"soon\"\n").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Figment(_)));
}
