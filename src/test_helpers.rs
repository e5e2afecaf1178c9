//! Shared test utilities for the folio test suite.
//!
//! Provides a small bilingual sample document, lookup helpers over a
//! [`MemorySurface`], and extractors that collect every string a document
//! holds for one language.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let doc = sample_document();
//! let th = document_strings(&doc, Lang::Th);
//! assert!(th.contains("ทักษะ"));
//!
//! let surface = MemorySurface::for_document(&doc, Layout::default());
//! let counter = find_element(&surface, "stat-years-count");
//! assert_eq!(counter.content, "0");
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

use crate::config::SkillsConfig;
use crate::content::ContentDocument;
use crate::surface::{Element, MemorySurface};
use crate::types::Lang;

// =========================================================================
// Sample content
// =========================================================================

/// A complete document: every slot, label and list exists in both
/// languages, and every translated string differs between them.
pub fn sample_document() -> ContentDocument {
    serde_json::from_value(sample_document_json()).unwrap()
}

/// The JSON form of [`sample_document`].
pub fn sample_document_json() -> Value {
    json!({
        "skillGroups": [
            {
                "key": "frontend",
                "skills": [
                    { "icon": "icons/react.svg", "label": { "th": "รีแอค", "en": "React" }, "pct": 90 },
                    { "icon": "icons/nextjs.svg", "label": { "th": "เน็กซ์เจเอส", "en": "Next.js" } }
                ]
            },
            {
                "key": "tools",
                "skills": [
                    { "icon": "icons/github.svg", "label": { "th": "กิตฮับ", "en": "GitHub" } }
                ]
            }
        ],
        "projects": {
            "th": [
                { "name": "ฟู", "github": "https://x", "live": "https://y", "tags": ["A", "B"], "desc": "คำอธิบาย" }
            ],
            "en": [
                { "name": "Foo", "github": "https://x", "live": "https://y", "tags": ["A", "B"], "desc": "D" }
            ]
        },
        "experience": {
            "th": [
                { "date": "2566 - ปัจจุบัน", "role": "วิศวกรฟรอนต์เอนด์", "company": "แอคมี", "desc": "ดูแลหน้าร้านออนไลน์" },
                { "date": "2564", "role": "นักศึกษาฝึกงาน", "company": "แอคมี", "desc": "แก้บั๊ก" }
            ],
            "en": [
                { "date": "2023 - Now", "role": "Frontend Engineer", "company": "Acme", "desc": "Owns the storefront." },
                { "date": "2021", "role": "Intern", "company": "Acme", "desc": "Fixed bugs." }
            ]
        },
        "i18n": {
            "hero": {
                "th": { "title": "สวัสดี ฉันชื่อ <em>นก</em>", "desc": "นักพัฒนาฟรอนต์เอนด์" },
                "en": { "title": "Hi, I'm <em>Nok</em>", "desc": "Frontend developer" }
            },
            "status": { "th": "พร้อมรับงาน", "en": "Open to work" },
            "btnWork": { "th": "ดูผลงาน", "en": "See work" },
            "btnContact": { "th": "ติดต่อ", "en": "Get in touch" },
            "nav": {
                "skills": { "th": "ทักษะ", "en": "Skills" },
                "work": { "th": "ผลงาน", "en": "Work" },
                "experience": { "th": "ประสบการณ์", "en": "Experience" },
                "contact": { "th": "ติดต่อเรา", "en": "Contact" }
            },
            "secSkills": { "th": "ทักษะของฉัน", "en": "My skills" },
            "secWork": { "th": "ผลงานที่เลือก", "en": "Selected work" },
            "secExp": { "th": "เส้นทางการทำงาน", "en": "Career" },
            "secContact": { "th": "ช่องทางติดต่อ", "en": "Say hello" },
            "contactHeading": { "th": "มาคุย<br>กันเถอะ", "en": "Let's<br>talk" },
            "form": {
                "th": {
                    "nameLabel": "ชื่อ", "emailLabel": "อีเมล", "msgLabel": "ข้อความ",
                    "name": "ชื่อของคุณ", "email": "อีเมลของคุณ", "msg": "เขียนข้อความ"
                },
                "en": {
                    "nameLabel": "Name", "emailLabel": "Email", "msgLabel": "Message",
                    "name": "Your name", "email": "Your email", "msg": "Write a message"
                }
            },
            "footer": {
                "github": { "th": "กิตฮับของฉัน", "en": "GitHub" },
                "linkedin": { "th": "ลิงกด์อิน", "en": "LinkedIn" },
                "resume": { "th": "เรซูเม่", "en": "Resume" }
            },
            "btnSend": { "th": "ส่ง", "en": "Send" },
            "btnSent": { "th": "ส่งแล้ว ✓", "en": "Sent ✓" },
            "githubLbl": { "th": "ซอร์สโค้ด", "en": "GitHub" },
            "liveLbl": { "th": "เว็บจริง", "en": "Live" },
            "skillGroups": {
                "frontend": { "th": "ฟรอนต์เอนด์", "en": "Frontend" },
                "tools": { "th": "เครื่องมือ", "en": "Tools" }
            }
        },
        "contact": {
            "email": "nok@example.com",
            "github": "github.com/nok",
            "linkedin": "linkedin.com/in/nok"
        },
        "footer": { "copy": "© 2026 Nok" },
        "stats": {
            "years": { "value": 5, "label": { "th": "ปี", "en": "Years" } }
        }
    })
}

/// The stock icon substrings drawn inverted in the light theme.
pub fn default_invert_patterns() -> Vec<String> {
    SkillsConfig::default().invert_on_light
}

// =========================================================================
// Fixtures
// =========================================================================

/// Path of the sample content document under `fixtures/`.
pub fn fixture_content_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/data.json")
}

/// A temp directory holding [`sample_document_json`] as `data.json`.
pub fn setup_content() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data.json");
    std::fs::write(&path, sample_document_json().to_string()).unwrap();
    (tmp, path)
}

// =========================================================================
// Document extractors
// =========================================================================

/// Every string the document holds for `lang`: i18n leaves under that
/// language code, skill and stat labels, and the language's lists.
pub fn document_strings(doc: &ContentDocument, lang: Lang) -> HashSet<String> {
    let mut out = HashSet::new();
    collect_i18n(&doc.i18n, lang.code(), false, &mut out);

    for group in &doc.skill_groups {
        out.extend(group.skills.iter().filter_map(|s| s.label.get(lang)).map(String::from));
    }
    for p in doc.projects_for(lang) {
        out.extend([&p.name, &p.github, &p.live, &p.desc].into_iter().flatten().cloned());
        out.extend(p.tags.iter().cloned());
    }
    for e in doc.experience_for(lang) {
        out.extend([&e.date, &e.role, &e.company, &e.desc].into_iter().flatten().cloned());
    }
    out.extend(doc.stats.values().filter_map(|s| s.label.get(lang)).map(String::from));
    out
}

fn collect_i18n(node: &Value, code: &str, under_lang: bool, out: &mut HashSet<String>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                collect_i18n(child, code, under_lang || key == code, out);
            }
        }
        Value::String(s) if under_lang => {
            out.insert(s.clone());
        }
        _ => {}
    }
}

// =========================================================================
// Surface lookups (panic with the available ids on miss)
// =========================================================================

/// Find an element by id. Panics if not found.
pub fn find_element<'a>(surface: &'a MemorySurface, id: &str) -> &'a Element {
    surface.element(id).unwrap_or_else(|| {
        let ids: Vec<&str> = surface.elements().map(|(id, _)| id).collect();
        panic!("element '{id}' not found. Available: {ids:?}")
    })
}
