//! CLI output formatting.
//!
//! Output is **content-first**: each language leads with its code and what
//! the document holds for it; file paths follow as secondary context.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! th → index.html
//!     2 projects, 3 experience entries
//! en → en/index.html
//!     2 projects, 3 experience entries
//! Content → data.json
//! Assets: 8 files
//! Generated 2 pages in dist
//! ```
//!
//! ## Check
//!
//! ```text
//! Skill groups
//! 001 frontend (3 skills)
//! 002 tools (3 skills)
//!
//! Stats
//!     clients = 24
//!     years = 5
//!
//! Missing translations (2)
//!     th
//!         contact.linkedin
//!         i18n.btnSent.th
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::content::{ContentDocument, Gap};
use crate::generate::BuildReport;
use crate::types::Lang;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Per-language list sizes: `2 projects, 3 experience entries`.
fn list_counts(projects: usize, experience: usize) -> String {
    format!(
        "{}, {}",
        plural(projects, "project", "projects"),
        plural(experience, "experience entry", "experience entries")
    )
}

// ============================================================================
// Build
// ============================================================================

/// Format the result of `folio build`.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    for page in &report.pages {
        lines.push(format!("{} \u{2192} {}", page.lang, page.path.display()));
        lines.push(format!(
            "{}{}",
            indent(1),
            list_counts(page.projects, page.experience)
        ));
    }
    lines.push(format!("Content \u{2192} {}", report.content.display()));
    if report.assets > 0 {
        lines.push(format!("Assets: {}", plural(report.assets, "file", "files")));
    }
    if !report.gaps.is_empty() {
        lines.push(format!(
            "Warning: {} (run `folio check` for details)",
            plural(report.gaps.len(), "missing translation", "missing translations")
        ));
    }
    lines.push(format!(
        "Generated {} in {}",
        plural(report.pages.len(), "page", "pages"),
        report.output_dir.display()
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format gaps grouped by language.
pub fn format_gaps(gaps: &[Gap]) -> Vec<String> {
    if gaps.is_empty() {
        return vec!["No missing translations".to_string()];
    }
    let mut lines = vec![format!("Missing translations ({})", gaps.len())];
    for lang in Lang::ALL {
        let locations: Vec<&str> = gaps
            .iter()
            .filter(|g| g.lang == lang)
            .map(|g| g.location.as_str())
            .collect();
        if locations.is_empty() {
            continue;
        }
        lines.push(format!("{}{}", indent(1), lang));
        for location in locations {
            lines.push(format!("{}{}", indent(2), location));
        }
    }
    lines
}

/// Format the result of `folio check`: a content inventory, then the gaps.
pub fn format_check_output(doc: &ContentDocument, gaps: &[Gap]) -> Vec<String> {
    let mut lines = vec!["Skill groups".to_string()];
    for (i, group) in doc.skill_groups.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            group.key,
            plural(group.skills.len(), "skill", "skills")
        ));
    }

    lines.push(String::new());
    lines.push("Lists".to_string());
    for lang in Lang::ALL {
        lines.push(format!(
            "{}{}: {}",
            indent(1),
            lang,
            list_counts(doc.projects_for(lang).len(), doc.experience_for(lang).len())
        ));
    }

    if !doc.stats.is_empty() {
        lines.push(String::new());
        lines.push("Stats".to_string());
        for (key, stat) in &doc.stats {
            lines.push(format!("{}{} = {}", indent(1), key, stat.value));
        }
    }

    lines.push(String::new());
    lines.extend(format_gaps(gaps));
    lines
}

pub fn print_check_output(doc: &ContentDocument, gaps: &[Gap]) {
    for line in format_check_output(doc, gaps) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
