//! Static site generation.
//!
//! Renders the page once per language into plain HTML so the portfolio can
//! be served without any client runtime. Pages are rendered in their
//! revealed state: counters show their targets and fill bars their widths.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html          # Default language
//! ├── en/
//! │   └── index.html      # Every other language under its code
//! ├── data.json           # The content document, copied as-is
//! └── assets/             # Copied from --assets, if given
//!     └── icons/...
//! ```
//!
//! The language toggle on each page links to the other pages. Relative icon
//! references are rebased for pages in a language subdirectory.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time; the color custom
//! properties from `config.toml` are prepended to it.

use crate::config::{self, SiteConfig};
use crate::content::{self, ContentDocument, ContentError, Gap};
use crate::render::{DocumentOptions, RevealMode, render_document};
use crate::state::PresentationState;
use crate::types::Lang;
use crate::view::{build_page_view, localization_gaps};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("error walking assets: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Inputs of a build.
#[derive(Debug, Clone)]
pub struct BuildOptions<'a> {
    pub content_path: &'a Path,
    pub assets_dir: Option<&'a Path>,
    pub output_dir: &'a Path,
    /// Value of the generator meta tag.
    pub generator: &'a str,
}

/// One generated page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutput {
    pub lang: Lang,
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub projects: usize,
    pub experience: usize,
}

/// What a build produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub pages: Vec<PageOutput>,
    /// Copied content document, relative to the output directory.
    pub content: PathBuf,
    /// Number of asset files copied.
    pub assets: usize,
    /// Values the document lacks; they render as `undefined`.
    pub gaps: Vec<Gap>,
}

/// Directory of a language's page, relative to the output root.
fn page_dir(lang: Lang, default: Lang) -> PathBuf {
    if lang == default {
        PathBuf::new()
    } else {
        PathBuf::from(lang.code())
    }
}

/// Link from the page of `from` to the page of `to`.
fn lang_href(from: Lang, to: Lang, default: Lang) -> String {
    if from == to {
        return "./".to_string();
    }
    let up = if from == default { "" } else { "../" };
    let down = if to == default {
        String::new()
    } else {
        format!("{}/", to.code())
    };
    format!("{up}{down}")
}

/// Prefix a relative reference so it resolves from a subdirectory.
/// Absolute paths, URLs and data URIs are left alone.
fn rebase(reference: &str, prefix: &str) -> String {
    let is_absolute = reference.starts_with('/')
        || reference.starts_with("data:")
        || reference.contains("://");
    if prefix.is_empty() || reference.is_empty() || is_absolute {
        reference.to_string()
    } else {
        format!("{prefix}{reference}")
    }
}

/// Render the page for one language.
pub fn render_page(
    doc: &ContentDocument,
    config: &SiteConfig,
    lang: Lang,
    css: &str,
    generator: &str,
) -> String {
    let default = config.presentation.default_lang;
    let state = PresentationState::new(lang, config.presentation.default_theme);
    let mut view = build_page_view(doc, &state, &config.skills.invert_on_light);

    if lang != default {
        for skill in view.skill_groups.iter_mut().flat_map(|g| g.skills.iter_mut()) {
            skill.icon = rebase(&skill.icon, "../");
        }
    }

    let href = |to: Lang| lang_href(lang, to, default);
    render_document(
        &view,
        &DocumentOptions {
            css,
            mode: RevealMode::Immediate,
            generator,
            lang_href: &href,
        },
    )
    .into_string()
}

/// Build the static site.
pub fn build(config: &SiteConfig, opts: &BuildOptions<'_>) -> Result<BuildReport, GenerateError> {
    let doc = content::load(opts.content_path)?;
    let gaps = localization_gaps(&doc);
    if !gaps.is_empty() {
        tracing::warn!(count = gaps.len(), "content has missing translations");
    }

    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );

    fs::create_dir_all(opts.output_dir)?;

    let default = config.presentation.default_lang;
    let mut pages = Vec::new();
    for lang in Lang::ALL {
        let rel = page_dir(lang, default).join("index.html");
        let path = opts.output_dir.join(&rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, render_page(&doc, config, lang, &css, opts.generator))?;
        tracing::info!(%lang, path = %rel.display(), "generated page");
        pages.push(PageOutput {
            lang,
            path: rel,
            projects: doc.projects_for(lang).len(),
            experience: doc.experience_for(lang).len(),
        });
    }

    let content = PathBuf::from(
        opts.content_path
            .file_name()
            .unwrap_or_else(|| OsStr::new("data.json")),
    );
    fs::copy(opts.content_path, opts.output_dir.join(&content))?;

    let assets = match opts.assets_dir {
        Some(dir) => copy_assets(dir, opts.output_dir)?,
        None => 0,
    };

    tracing::info!(
        output = %opts.output_dir.display(),
        pages = pages.len(),
        assets,
        "site generated"
    );

    Ok(BuildReport {
        output_dir: opts.output_dir.to_path_buf(),
        pages,
        content,
        assets,
        gaps,
    })
}

/// Copy an assets directory into the output under its own name.
/// Returns the number of files copied.
fn copy_assets(src: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    let name = src.file_name().unwrap_or_else(|| OsStr::new("assets"));
    let dst_root = output_dir.join(name);
    let mut copied = 0;

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let dst = dst_root.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &dst)?;
            tracing::debug!(path = %rel.display(), "copied asset");
            copied += 1;
        }
    }
    Ok(copied)
}
