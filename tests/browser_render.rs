//! Browser tests over the built site: language pages, switcher links, and
//! revealed rows as a real browser sees them.
//!
//! Run with: `cargo test --test browser_render -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, OnceLock};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn generated_dir() -> &'static Path {
    static OUT: OnceLock<TempDir> = OnceLock::new();
    OUT.get_or_init(|| {
        let out = TempDir::new().expect("failed to create output dir");
        let bin = env!("CARGO_BIN_EXE_folio");
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

        let status = Command::new(bin)
            .args(["build", "--content"])
            .arg(root.join("fixtures/data.json"))
            .arg("--assets")
            .arg(root.join("fixtures/assets"))
            .arg("--output")
            .arg(out.path())
            .arg("--config")
            .arg(out.path().join("no-config.toml"))
            .status()
            .expect("failed to run folio");
        assert!(status.success(), "fixture build failed");
        out
    })
    .path()
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn load(page: &str) -> Arc<Tab> {
    let file = generated_dir().join(page);
    assert!(file.exists(), "missing: {}", file.display());

    let tab = browser().new_tab().unwrap();
    tab.navigate_to(&format!("file://{}", file.display()))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab
}

fn eval_str(tab: &Tab, js: &str) -> String {
    tab.evaluate(js, false)
        .expect("failed to evaluate JS")
        .value
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_else(|| panic!("no string returned for: {js}"))
}

fn eval_u64(tab: &Tab, js: &str) -> u64 {
    tab.evaluate(js, false)
        .expect("failed to evaluate JS")
        .value
        .and_then(|v| v.as_u64())
        .unwrap_or_else(|| panic!("no number returned for: {js}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn default_page_is_thai() {
    let tab = load("index.html");
    assert_eq!(eval_str(&tab, "document.documentElement.lang"), "th");
    assert_eq!(
        eval_str(&tab, "document.querySelector('.lang-btn.active').id"),
        "btnTh"
    );
    assert_eq!(
        eval_str(&tab, "document.getElementById('secWork').textContent"),
        "ผลงานที่เลือก"
    );
}

#[test]
#[ignore]
fn english_page_renders_english_rows() {
    let tab = load("en/index.html");
    assert_eq!(eval_str(&tab, "document.documentElement.lang"), "en");
    assert_eq!(eval_u64(&tab, "document.querySelectorAll('#projectsList .project').length"), 2);
    assert_eq!(
        eval_str(&tab, "document.querySelector('#projectsList .project-name').textContent"),
        "Coffee Shop Online"
    );
    assert_eq!(
        eval_u64(&tab, "document.querySelectorAll('#expList .anim-row').length"),
        3
    );
}

#[test]
#[ignore]
fn switcher_links_point_at_the_other_page() {
    let tab = load("en/index.html");
    let href = eval_str(&tab, "document.getElementById('btnTh').href");
    assert!(href.ends_with("/index.html") || href.ends_with('/'), "href was {href}");
    assert!(!href.contains("/en/"), "href was {href}");
}

#[test]
#[ignore]
fn rows_and_counters_are_revealed() {
    let tab = load("index.html");
    let hidden = eval_u64(
        &tab,
        "document.querySelectorAll('.anim-row:not(.vis)').length",
    );
    assert_eq!(hidden, 0);
    assert_eq!(
        eval_str(&tab, "document.getElementById('stat-years-count').textContent"),
        "5"
    );
}

#[test]
#[ignore]
fn icons_load_on_the_nested_page() {
    let tab = load("en/index.html");
    let broken = eval_u64(
        &tab,
        "Array.from(document.querySelectorAll('img.skill-icon')).filter(i => !i.complete || i.naturalWidth === 0).length",
    );
    assert_eq!(broken, 0);
}
