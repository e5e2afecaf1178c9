//! The content document: every displayable string and list on the page.
//!
//! A single JSON file supplies the skills, projects, experience, stats and
//! the free-form `i18n` string tree. The document is parsed once at boot and
//! then treated as read-only data; nothing here knows about the page layout.
//!
//! ## Shape
//!
//! ```json
//! {
//!   "skillGroups": [
//!     { "key": "frontend", "skills": [
//!       { "icon": "icons/react.svg", "label": { "th": "รีแอค", "en": "React" }, "pct": 90 }
//!     ] }
//!   ],
//!   "projects":   { "th": [ ... ], "en": [ { "name": "Foo", "github": "...", "live": "...", "tags": ["A"], "desc": "..." } ] },
//!   "experience": { "th": [ ... ], "en": [ { "date": "2023", "role": "...", "company": "...", "desc": "..." } ] },
//!   "i18n":    { "hero": { "en": { "title": "...", "desc": "..." } }, "nav": { "skills": { "en": "Skills" } } },
//!   "contact": { "email": "...", "github": "...", "linkedin": "..." },
//!   "footer":  { "copy": "..." },
//!   "stats":   { "years": { "value": 5, "label": { "th": "ปี", "en": "Years" } } }
//! }
//! ```
//!
//! ## Missing values
//!
//! There is no schema validation. Absent strings resolve to `None` and the
//! view-model writes [`MISSING`](crate::types::MISSING) in their place; an
//! absent per-language list renders as an empty list. [`ContentDocument::gaps`]
//! enumerates everything that would fall back this way.

use crate::types::{Lang, MISSING};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-language text keyed by language code (`"th"`, `"en"`).
///
/// Unknown codes are kept so a document written for more languages still
/// parses; only the supported ones are ever looked up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localized(BTreeMap<String, String>);

impl Localized {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, lang: Lang) -> Option<&str> {
        self.0.get(lang.code()).map(String::as_str)
    }

    /// The text for `lang`, or [`MISSING`] when the document has none.
    pub fn text(&self, lang: Lang) -> &str {
        self.get(lang).unwrap_or(MISSING)
    }
}

/// The parsed content document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    #[serde(default)]
    pub skill_groups: Vec<SkillGroup>,
    #[serde(default)]
    pub projects: BTreeMap<String, Vec<Project>>,
    #[serde(default)]
    pub experience: BTreeMap<String, Vec<Experience>>,
    /// Free-form localized string tree, see [`I18nPath`].
    #[serde(default)]
    pub i18n: Value,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub footer: Footer,
    #[serde(default)]
    pub stats: BTreeMap<String, Stat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillGroup {
    /// Group key; the header text lives at `i18n.skillGroups.<key>.<lang>`.
    pub key: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skill {
    /// Icon reference (path or URL), emitted as-is.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub label: Localized,
    /// Proficiency percentage; skills with one render a fill bar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: Option<String>,
    /// Repository link.
    pub github: Option<String>,
    pub live: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    pub date: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Footer {
    pub copy: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stat {
    /// Counter target.
    pub value: u64,
    #[serde(default)]
    pub label: Localized,
}

/// A segment of a path into the `i18n` tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seg<'a> {
    Key(&'a str),
    /// Replaced by the active language code at lookup time.
    Lang,
}

/// A path into the `i18n` tree.
///
/// The tree mixes two layouts, `hero.<lang>.title` and `nav.skills.<lang>`,
/// so the language position is part of the path rather than fixed.
pub type I18nPath<'a> = &'a [Seg<'a>];

/// Format a path for diagnostics: `hero.<lang>.title` → `hero.en.title`.
pub fn format_path(path: I18nPath<'_>, lang: Lang) -> String {
    path.iter()
        .map(|seg| match seg {
            Seg::Key(k) => *k,
            Seg::Lang => lang.code(),
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Resolve a scalar in a JSON tree to display text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Text for a plain (non-localized) field, or [`MISSING`].
pub fn or_missing(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(MISSING)
}

/// A localization gap found by [`ContentDocument::gaps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gap {
    pub lang: Lang,
    /// Dotted location of the missing value, e.g. `skillGroups[0].skills[2].label`.
    pub location: String,
}

impl ContentDocument {
    /// Parse a content document from JSON text.
    pub fn parse(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up a localized string in the `i18n` tree.
    pub fn i18n(&self, path: I18nPath<'_>, lang: Lang) -> Option<String> {
        let mut node = &self.i18n;
        for seg in path {
            let key = match seg {
                Seg::Key(k) => *k,
                Seg::Lang => lang.code(),
            };
            node = node.get(key)?;
        }
        scalar_text(node)
    }

    /// Like [`i18n`](Self::i18n) but falls back to [`MISSING`].
    pub fn i18n_text(&self, path: I18nPath<'_>, lang: Lang) -> String {
        self.i18n(path, lang).unwrap_or_else(|| MISSING.to_string())
    }

    /// Projects for a language, empty when the document has no list for it.
    pub fn projects_for(&self, lang: Lang) -> &[Project] {
        self.projects
            .get(lang.code())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Experience entries for a language, empty when absent.
    pub fn experience_for(&self, lang: Lang) -> &[Experience] {
        self.experience
            .get(lang.code())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Header text of a skill group.
    pub fn skill_group_title(&self, key: &str, lang: Lang) -> String {
        self.i18n_text(&[Seg::Key("skillGroups"), Seg::Key(key), Seg::Lang], lang)
    }

    /// Label of a stat: its own `label` map first, then `i18n.stats.<key>`.
    pub fn stat_label(&self, key: &str, lang: Lang) -> String {
        self.stats
            .get(key)
            .and_then(|s| s.label.get(lang))
            .map(str::to_string)
            .or_else(|| self.i18n(&[Seg::Key("stats"), Seg::Key(key), Seg::Lang], lang))
            .unwrap_or_else(|| MISSING.to_string())
    }

    /// Every language-dependent value the document lacks, for all languages.
    ///
    /// Covers the structured parts of the document. Fixed page slots are
    /// checked by [`view::slot_gaps`](crate::view::slot_gaps).
    pub fn gaps(&self) -> Vec<Gap> {
        let mut gaps = Vec::new();
        for lang in Lang::ALL {
            let mut push = |location: String| gaps.push(Gap { lang, location });

            for (gi, group) in self.skill_groups.iter().enumerate() {
                let header = [Seg::Key("skillGroups"), Seg::Key(&group.key), Seg::Lang];
                if self.i18n(&header, lang).is_none() {
                    push(format!("i18n.{}", format_path(&header, lang)));
                }
                for (si, skill) in group.skills.iter().enumerate() {
                    if skill.label.get(lang).is_none() {
                        push(format!("skillGroups[{gi}].skills[{si}].label"));
                    }
                }
            }
            if !self.projects.contains_key(lang.code()) {
                push(format!("projects.{}", lang.code()));
            }
            if !self.experience.contains_key(lang.code()) {
                push(format!("experience.{}", lang.code()));
            }
            for key in self.stats.keys() {
                if self.stat_label(key, lang) == MISSING {
                    push(format!("stats.{key}.label"));
                }
            }
        }
        gaps
    }
}

/// Read and parse a content document from disk.
pub fn load(path: &Path) -> Result<ContentDocument, ContentError> {
    let json = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    ContentDocument::parse(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_document;
    use serde_json::json;

    #[test]
    fn parses_camel_case_skill_groups() {
        let doc = ContentDocument::parse(
            r#"{"skillGroups": [{"key": "tools", "skills": [{"icon": "git.svg", "label": {"th": "กิต", "en": "Git"}}]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.skill_groups.len(), 1);
        assert_eq!(doc.skill_groups[0].skills[0].label.text(Lang::En), "Git");
        assert_eq!(doc.skill_groups[0].skills[0].pct, None);
    }

    #[test]
    fn empty_object_is_a_valid_document() {
        let doc = ContentDocument::parse("{}").unwrap();
        assert!(doc.skill_groups.is_empty());
        assert!(doc.projects_for(Lang::En).is_empty());
        assert!(doc.i18n.is_null());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            ContentDocument::parse("{\"projects\": "),
            Err(ContentError::Json(_))
        ));
    }

    #[test]
    fn localized_text_falls_back_to_missing() {
        let label = Localized::new([("th", "ปี")]);
        assert_eq!(label.text(Lang::Th), "ปี");
        assert_eq!(label.text(Lang::En), MISSING);
    }

    #[test]
    fn i18n_lookup_supports_both_layouts() {
        let doc = ContentDocument {
            i18n: json!({
                "hero": { "en": { "title": "Hello" } },
                "nav": { "skills": { "en": "Skills" } }
            }),
            ..Default::default()
        };
        let hero = [Seg::Key("hero"), Seg::Lang, Seg::Key("title")];
        let nav = [Seg::Key("nav"), Seg::Key("skills"), Seg::Lang];
        assert_eq!(doc.i18n(&hero, Lang::En).as_deref(), Some("Hello"));
        assert_eq!(doc.i18n(&nav, Lang::En).as_deref(), Some("Skills"));
        assert_eq!(doc.i18n(&nav, Lang::Th), None);
        assert_eq!(doc.i18n_text(&nav, Lang::Th), MISSING);
    }

    #[test]
    fn i18n_lookup_stringifies_numbers() {
        let doc = ContentDocument {
            i18n: json!({ "since": { "en": 2019 } }),
            ..Default::default()
        };
        let path = [Seg::Key("since"), Seg::Lang];
        assert_eq!(doc.i18n(&path, Lang::En).as_deref(), Some("2019"));
    }

    #[test]
    fn i18n_lookup_of_a_subtree_is_missing() {
        let doc = ContentDocument {
            i18n: json!({ "hero": { "en": { "title": "Hello" } } }),
            ..Default::default()
        };
        assert_eq!(doc.i18n(&[Seg::Key("hero"), Seg::Lang], Lang::En), None);
    }

    #[test]
    fn format_path_substitutes_language() {
        let path = [Seg::Key("hero"), Seg::Lang, Seg::Key("title")];
        assert_eq!(format_path(&path, Lang::Th), "hero.th.title");
    }

    #[test]
    fn stat_label_prefers_own_label_then_i18n() {
        let mut doc = ContentDocument::parse(
            r#"{
                "stats": {
                    "years": {"value": 5, "label": {"th": "ปี", "en": "Years"}},
                    "repos": {"value": 40}
                },
                "i18n": {"stats": {"repos": {"en": "Repositories"}}}
            }"#,
        )
        .unwrap();
        assert_eq!(doc.stat_label("years", Lang::En), "Years");
        assert_eq!(doc.stat_label("repos", Lang::En), "Repositories");
        assert_eq!(doc.stat_label("repos", Lang::Th), MISSING);

        doc.stats.remove("years");
        assert_eq!(doc.stat_label("years", Lang::En), MISSING);
    }

    #[test]
    fn per_language_lists_are_selected_by_code() {
        let doc = sample_document();
        assert_eq!(doc.projects_for(Lang::En)[0].name.as_deref(), Some("Foo"));
        assert_eq!(doc.projects_for(Lang::Th)[0].name.as_deref(), Some("ฟู"));
        assert_eq!(doc.experience_for(Lang::En).len(), 2);
    }

    #[test]
    fn sample_document_has_no_gaps() {
        assert!(sample_document().gaps().is_empty());
    }

    #[test]
    fn gaps_report_missing_lists_and_labels() {
        let doc = ContentDocument::parse(
            r#"{
                "skillGroups": [{"key": "tools", "skills": [{"icon": "git.svg", "label": {"en": "Git"}}]}],
                "projects": {"en": []},
                "experience": {"th": [], "en": []},
                "i18n": {"skillGroups": {"tools": {"th": "เครื่องมือ", "en": "Tools"}}}
            }"#,
        )
        .unwrap();
        let gaps = doc.gaps();
        assert_eq!(
            gaps,
            vec![
                Gap {
                    lang: Lang::Th,
                    location: "skillGroups[0].skills[0].label".to_string()
                },
                Gap {
                    lang: Lang::Th,
                    location: "projects.th".to_string()
                },
            ]
        );
    }

    #[test]
    fn load_reads_fixture_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/data.json");
        let doc = load(&path).unwrap();
        assert!(!doc.skill_groups.is_empty());
        assert!(!doc.projects_for(Lang::Th).is_empty());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/data.json"));
    }
}
