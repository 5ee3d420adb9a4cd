//! Integration tests for the `storefront` CLI binary.
//!
//! Every test runs against the JSON fixture (or a temp copy of it when
//! the command writes), with config lookups pointed at a nonexistent
//! directory.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/store.json")
}

/// Build a [`Command`] for the `storefront` binary with env isolation.
fn storefront_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("storefront");
    cmd.env("HOME", "/tmp/storefront-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/storefront-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("STOREFRONT_STORE")
        .env_remove("STOREFRONT_CONFIG")
        .env_remove("STOREFRONT_OUTPUT")
        .env_remove("STOREFRONT_MEDIA_BASE_URL")
        .env_remove("STOREFRONT_RESOLVE_TIMEOUT_MS");
    cmd
}

/// Same as [`storefront_cmd`] with `--store` pointing at `store`.
fn with_store(store: &Path) -> assert_cmd::Command {
    let mut cmd = storefront_cmd();
    cmd.arg("--store").arg(store);
    cmd
}

/// Writable copy of the fixture. Keep the `TempDir` alive.
fn scratch_store() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::copy(fixture(), &path).unwrap();
    (dir, path)
}

fn stdout_json(cmd: &mut assert_cmd::Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed:\n{}",
        combined_output(&output)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn stdout_text(cmd: &mut assert_cmd::Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed:\n{}",
        combined_output(&output)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = storefront_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    storefront_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("sections")
            .and(predicate::str::contains("homepage"))
            .and(predicate::str::contains("completions")),
    );
}

#[test]
fn test_version_flag() {
    storefront_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("storefront"));
}

#[test]
fn test_completions() {
    storefront_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
    storefront_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let output = with_store(&fixture())
        .args(["sections", "list", "-o", "xml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_store_is_a_usage_error() {
    let output = storefront_cmd().args(["sections", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("No store snapshot"));
}

#[test]
fn test_unreadable_store_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();
    let output = with_store(&path).args(["sections", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(7));
}

// ── Sections ────────────────────────────────────────────────────────

#[test]
fn test_sections_list_in_display_order() {
    let json = stdout_json(with_store(&fixture()).args(["sections", "list", "-o", "json"]));
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        [
            "sec-announce",
            "sec-hero",
            "sec-summer",
            "sec-winter",
            "sec-deals",
            "sec-draft",
            "sec-brands"
        ]
    );
}

#[test]
fn test_sections_list_public_hides_drafts() {
    let text = stdout_text(with_store(&fixture()).args(["sections", "list", "--public", "-o", "plain"]));
    assert_eq!(text.lines().count(), 6);
    assert!(!text.contains("sec-draft"));
}

#[test]
fn test_sections_table_output() {
    let text = stdout_text(with_store(&fixture()).args(["sections", "list"]));
    assert!(text.contains("Summer Banner"));
    assert!(text.contains("draft"));
}

#[test]
fn test_sections_get_by_name() {
    let json = stdout_json(with_store(&fixture()).args(["sections", "get", "Deals", "-o", "json"]));
    assert_eq!(json["id"], "sec-deals");
    assert_eq!(json["type"], "productCarousel");
}

#[test]
fn test_sections_get_unknown_is_not_found() {
    let output = with_store(&fixture())
        .args(["sections", "get", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("sections list"));
}

#[test]
fn test_sections_create_appends_and_persists() {
    let (_dir, store) = scratch_store();
    let json = stdout_json(with_store(&store).args([
        "sections",
        "create",
        "--name",
        "Spring",
        "--type",
        "bannerFullWidth",
        "--config",
        r#"{"bannerId":"b-summer"}"#,
        "-o",
        "json",
    ]));
    assert_eq!(json["ordering"], 7);
    let id = json["id"].as_str().unwrap().to_owned();

    let listed = stdout_text(with_store(&store).args(["sections", "list", "-o", "plain"]));
    assert_eq!(listed.lines().last(), Some(id.as_str()));
}

#[test]
fn test_sections_create_from_file() {
    let (dir, store) = scratch_store();
    let payload = dir.path().join("section.json");
    std::fs::write(
        &payload,
        r#"{ "name": "Teaser", "type": "customHtml", "ordering": 3, "isPublished": false,
             "config": { "html": "<p>soon</p>" } }"#,
    )
    .unwrap();
    let json = stdout_json(
        with_store(&store)
            .args(["sections", "create", "-o", "json", "--from-file"])
            .arg(&payload),
    );
    assert_eq!(json["name"], "Teaser");
    assert_eq!(json["isPublished"], false);
}

#[test]
fn test_sections_create_duplicate_name_conflicts() {
    let (_dir, store) = scratch_store();
    let output = with_store(&store)
        .args(["sections", "create", "--name", " Deals ", "--type", "productCarousel"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
}

#[test]
fn test_sections_create_rejects_unknown_type_and_bad_config() {
    let (_dir, store) = scratch_store();
    let unknown = with_store(&store)
        .args(["sections", "create", "--name", "Mega", "--type", "megaMenu"])
        .output()
        .unwrap();
    assert_eq!(unknown.status.code(), Some(2));

    let bad_config = with_store(&store)
        .args([
            "sections",
            "create",
            "--name",
            "Tabs",
            "--type",
            "productTabs",
            "--config",
            "[1,2]",
        ])
        .output()
        .unwrap();
    assert_eq!(bad_config.status.code(), Some(2));

    // Nothing was written
    let listed = stdout_text(with_store(&store).args(["sections", "list", "-o", "plain"]));
    assert_eq!(listed.lines().count(), 7);
}

#[test]
fn test_sections_update_unpublishes() {
    let (_dir, store) = scratch_store();
    with_store(&store)
        .args(["sections", "update", "sec-hero", "--published", "false"])
        .assert()
        .success();
    let public = stdout_text(with_store(&store).args(["sections", "list", "--public", "-o", "plain"]));
    assert!(!public.contains("sec-hero"));
}

#[test]
fn test_sections_delete_requires_confirmation() {
    let (_dir, store) = scratch_store();
    let output = with_store(&store)
        .args(["sections", "delete", "sec-hero"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));

    with_store(&store)
        .args(["sections", "delete", "sec-hero", "--yes"])
        .assert()
        .success();
    let saved = std::fs::read_to_string(&store).unwrap();
    assert!(!saved.contains("sec-hero"));
    assert!(saved.contains("\"products\""));
}

#[test]
fn test_sections_reorder_partial_failure_keeps_valid_entries() {
    let (_dir, store) = scratch_store();
    let output = with_store(&store)
        .args(["sections", "reorder", "sec-brands=-1", "ghost=2", "sec-deals=-2"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("1 of 3 reorder entries failed"));

    let listed = stdout_text(with_store(&store).args(["sections", "list", "-o", "plain"]));
    let first: Vec<&str> = listed.lines().take(2).collect();
    assert_eq!(first, ["sec-deals", "sec-brands"]);
}

#[test]
fn test_sections_reorder_rejects_malformed_entry() {
    let output = with_store(&fixture())
        .args(["sections", "reorder", "sec-deals"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_sections_validate() {
    with_store(&fixture())
        .args(["sections", "validate"])
        .assert()
        .success();

    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    std::fs::write(
        &store,
        r#"{ "sections": [
            { "id": "a", "name": "Menu", "type": "megaMenu" },
            { "id": "b", "name": "Tabs", "type": "productTabs", "ordering": 1, "config": { "tabs": 3 } }
        ] }"#,
    )
    .unwrap();
    let output = with_store(&store)
        .args(["sections", "validate", "-o", "plain"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn test_sections_types() {
    let text = stdout_text(with_store(&fixture()).args(["sections", "types", "-o", "plain"]));
    assert!(text.lines().any(|l| l == "heroSlider"));
    assert!(text.lines().any(|l| l == "scrollingText"));
}

// ── Homepage ────────────────────────────────────────────────────────

#[test]
fn test_homepage_render_html() {
    let dir = tempfile::tempdir().unwrap();
    let header = dir.path().join("header.html");
    std::fs::write(&header, "<header id=\"site\"></header>").unwrap();

    let html = stdout_text(
        with_store(&fixture())
            .args(["homepage", "render", "--header"])
            .arg(&header),
    );
    let bar = html.find("announcement-bar").unwrap();
    let site = html.find("id=\"site\"").unwrap();
    let main = html.find("<main").unwrap();
    assert!(bar < site && site < main);

    assert_eq!(html.matches("banner-stack").count(), 1);
    assert!(html.contains("Vitamin C Serum"));
    assert!(html.contains("Argan Oil"));
    assert!(!html.contains("Clay Mask"));
}

#[test]
fn test_homepage_render_json_rejects_header() {
    let dir = tempfile::tempdir().unwrap();
    let header = dir.path().join("header.html");
    std::fs::write(&header, "<header></header>").unwrap();

    let output = with_store(&fixture())
        .args(["homepage", "render", "-f", "json", "--header"])
        .arg(&header)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("HTML output"));
}

#[test]
fn test_homepage_render_quiet_prints_nothing() {
    with_store(&fixture())
        .args(["homepage", "render", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_homepage_render_json_layout() {
    let json = stdout_json(with_store(&fixture()).args(["homepage", "render", "-f", "json"]));
    assert_eq!(json["announcements"].as_array().unwrap().len(), 1);
    let kinds: Vec<&str> = json["main"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["section", "bannerStack", "section", "section"]);
}

#[test]
fn test_homepage_render_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("home.html");
    with_store(&fixture())
        .args(["homepage", "render", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(std::fs::read_to_string(&out).unwrap().contains("<main"));
}

#[test]
fn test_homepage_resolve_applies_media_base() {
    let mut cmd = with_store(&fixture());
    cmd.env("STOREFRONT_MEDIA_BASE_URL", "https://media.test/assets")
        .args(["homepage", "resolve", "-o", "json"]);
    let json = stdout_json(&mut cmd);

    let resolved = json.as_array().unwrap();
    assert_eq!(resolved.len(), 6);
    let hero = &resolved[1]["view"];
    assert_eq!(hero["kind"], "hero");
    let images: Vec<&str> = hero["data"]["slides"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["imageUrl"].as_str().unwrap())
        .collect();
    assert_eq!(
        images,
        ["https://cdn.test/glow.jpg", "https://media.test/assets/uploads/spa.jpg"]
    );
}

#[test]
fn test_homepage_resolve_table() {
    let text = stdout_text(with_store(&fixture()).args(["homepage", "resolve"]));
    assert!(text.contains("2 slides"));
    assert!(text.contains("banner 'Summer sale'"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    storefront_cmd()
        .args(["config", "path", "--config", "/tmp/elsewhere/storefront.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/elsewhere/storefront.toml"));
}

#[test]
fn test_config_show_defaults() {
    let json = stdout_json(storefront_cmd().args(["config", "show", "-o", "json"]));
    assert_eq!(json["resolve_timeout_ms"], 5000);
    assert_eq!(json["limits"]["circles_max"], 8);
}

#[test]
fn test_config_init_then_store_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    storefront_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--store")
        .arg(fixture())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(std::fs::read_to_string(&config).unwrap().contains("resolve_timeout_ms"));

    let again = storefront_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .output()
        .unwrap();
    assert_eq!(again.status.code(), Some(6));

    // The store path now comes from the config file
    let listed = stdout_text(
        storefront_cmd()
            .arg("--config")
            .arg(&config)
            .args(["sections", "list", "-o", "plain"]),
    );
    assert_eq!(listed.lines().count(), 7);
}

#[test]
fn test_config_defaults_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[defaults]\noutput = \"plain\"\n").unwrap();

    let text = stdout_text(
        with_store(&fixture())
            .arg("--config")
            .arg(&config)
            .args(["sections", "list", "--public"]),
    );
    assert_eq!(text.lines().next(), Some("sec-announce"));
}

#[test]
fn test_invalid_config_value() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "resolve_timeout_ms = 0\n").unwrap();

    let output = with_store(&fixture())
        .arg("--config")
        .arg(&config)
        .args(["homepage", "render"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("resolve_timeout_ms"));
}
