//! The UI surface the presentation controller writes into.
//!
//! [`Surface`] is the seam between presentation logic and a concrete page.
//! The host provides a fixed set of elements, addressed by id:
//!
//! - one element per [`Slot`](crate::view::Slot) (`heroTitle`, `submitBtn`, ...)
//! - the language toggle buttons (`btnTh`, `btnEn`)
//! - three mount points ([`Mount`]) that receive rendered rows
//! - a counter element per stat, tagged with its numeric target
//! - a label element per stat, tagged with its stat key
//!
//! [`MemorySurface`] is a complete in-memory implementation with simple
//! vertical geometry. It backs the tests and any headless session.

use crate::content::ContentDocument;
use crate::render::{Row, counter_id, stat_label_id};
use crate::reveal::{Rect, VISIBLE_CLASS};
use crate::types::Lang;
use crate::view::{Slot, SlotKind};
use std::collections::BTreeMap;

/// Attribute carrying a counter's target value.
pub const COUNT_ATTR: &str = "data-count";
/// Attribute carrying a counter's stat key.
pub const STAT_ATTR: &str = "data-stat";
/// Attribute tagging a stat label with its key.
pub const STAT_KEY_ATTR: &str = "data-stat-key";
/// Attribute carrying a fill bar's target width.
pub const FILL_ATTR: &str = "data-w";

/// A mount point for rendered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mount {
    Skills,
    Projects,
    Experience,
}

impl Mount {
    /// Document order.
    pub const ALL: [Mount; 3] = [Mount::Skills, Mount::Projects, Mount::Experience];

    pub fn id(self) -> &'static str {
        match self {
            Mount::Skills => "skillsList",
            Mount::Projects => "projectsList",
            Mount::Experience => "expList",
        }
    }
}

/// A counter element found on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterTag {
    pub id: String,
    pub key: String,
    pub target: u64,
}

pub trait Surface {
    /// Height of the visible area, in pixels.
    fn viewport_height(&self) -> f64;

    /// Position of an element relative to the viewport, `None` when it does
    /// not exist or has no layout.
    fn rect(&self, id: &str) -> Option<Rect>;

    fn exists(&self, id: &str) -> bool;

    /// Set the root `lang` attribute.
    fn set_root_lang(&mut self, lang: Lang);

    /// Replace the whole root class list.
    fn set_root_classes(&mut self, classes: &[String]);

    /// Add or remove a single root class.
    fn set_root_marker(&mut self, class: &str, on: bool);

    fn write(&mut self, id: &str, kind: SlotKind, value: &str);

    fn add_class(&mut self, id: &str, class: &str);

    fn remove_class(&mut self, id: &str, class: &str);

    /// Transition delay in seconds.
    fn set_transition_delay(&mut self, id: &str, seconds: f64);

    fn set_fill_width(&mut self, id: &str, pct: u32);

    /// `None` clears an inline opacity.
    fn set_opacity(&mut self, id: &str, opacity: Option<f64>);

    /// Replace the contents of a mount point with `rows`.
    fn mount(&mut self, mount: Mount, rows: &[Row]);

    /// Ids of every reveal row, in document order.
    fn reveal_rows(&self) -> Vec<String>;

    /// Fill bars of the mounted rows with their target percentage.
    fn fill_bars(&self) -> Vec<(String, u32)>;

    fn counters(&self) -> Vec<CounterTag>;

    /// Stat label elements as `(element id, stat key)`.
    fn stat_labels(&self) -> Vec<(String, String)>;
}

/// Geometry of a [`MemorySurface`]. All offsets are page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub viewport_height: f64,
    pub row_height: f64,
    pub stats_top: f64,
    pub skills_top: f64,
    pub projects_top: f64,
    pub experience_top: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            viewport_height: 800.0,
            row_height: 120.0,
            stats_top: 500.0,
            skills_top: 1000.0,
            projects_top: 2200.0,
            experience_top: 3600.0,
        }
    }
}

impl Layout {
    fn origin(&self, mount: Mount) -> f64 {
        match mount {
            Mount::Skills => self.skills_top,
            Mount::Projects => self.projects_top,
            Mount::Experience => self.experience_top,
        }
    }
}

/// One element of a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Text or markup content.
    pub content: String,
    pub is_html: bool,
    pub placeholder: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub opacity: Option<f64>,
    pub transition_delay: Option<f64>,
    pub width_pct: Option<u32>,
    /// Page offset of the top edge, `None` without layout.
    pub top: Option<f64>,
    pub height: f64,
    mount: Option<Mount>,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn positioned(top: f64, height: f64) -> Self {
        Self {
            top: Some(top),
            height,
            ..Default::default()
        }
    }
}

/// In-memory surface. Writes to unknown ids create the element.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySurface {
    layout: Layout,
    scroll_y: f64,
    root_lang: Option<String>,
    root_classes: Vec<String>,
    elements: BTreeMap<String, Element>,
    mounts: BTreeMap<Mount, Vec<String>>,
}

impl MemorySurface {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            scroll_y: 0.0,
            root_lang: None,
            root_classes: Vec::new(),
            elements: BTreeMap::new(),
            mounts: Mount::ALL.into_iter().map(|m| (m, Vec::new())).collect(),
        }
    }

    /// The host page for a document: every slot, both toggle buttons, and a
    /// counter plus label per stat.
    pub fn for_document(doc: &ContentDocument, layout: Layout) -> Self {
        let mut surface = Self::new(layout);
        for slot in Slot::ALL {
            surface.insert(slot.id(), Element::default());
        }
        for lang in Lang::ALL {
            surface.insert(
                lang.toggle_id(),
                Element {
                    content: lang.code().to_uppercase(),
                    classes: vec!["lang-btn".to_string()],
                    ..Default::default()
                },
            );
        }
        let top = surface.layout.stats_top;
        for (key, stat) in &doc.stats {
            surface.add_stat(key, stat.value, top);
        }
        surface
    }

    /// Add a stat counter and its label.
    pub fn add_stat(&mut self, key: &str, target: u64, top: f64) {
        let mut counter = Element::positioned(top, 40.0);
        counter.content = "0".to_string();
        counter.attrs.insert(COUNT_ATTR.to_string(), target.to_string());
        counter.attrs.insert(STAT_ATTR.to_string(), key.to_string());
        self.insert(&counter_id(key), counter);

        let mut label = Element::positioned(top + 40.0, 20.0);
        label.attrs.insert(STAT_KEY_ATTR.to_string(), key.to_string());
        self.insert(&stat_label_id(key), label);
    }

    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn root_lang(&self) -> Option<&str> {
        self.root_lang.as_deref()
    }

    pub fn root_classes(&self) -> &[String] {
        &self.root_classes
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn elements(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.elements.iter().map(|(id, el)| (id.as_str(), el))
    }

    /// Content of an element, empty when it does not exist.
    pub fn text(&self, id: &str) -> &str {
        self.elements.get(id).map(|e| e.content.as_str()).unwrap_or("")
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.has_class(class))
    }

    /// Row ids currently in a mount point.
    pub fn mounted(&self, mount: Mount) -> &[String] {
        self.mounts.get(&mount).map(Vec::as_slice).unwrap_or_default()
    }

    fn element_mut(&mut self, id: &str) -> &mut Element {
        self.elements.entry(id.to_string()).or_default()
    }
}

impl Surface for MemorySurface {
    fn viewport_height(&self) -> f64 {
        self.layout.viewport_height
    }

    fn rect(&self, id: &str) -> Option<Rect> {
        let el = self.elements.get(id)?;
        el.top.map(|top| Rect {
            top: top - self.scroll_y,
            height: el.height,
        })
    }

    fn exists(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_root_lang(&mut self, lang: Lang) {
        self.root_lang = Some(lang.code().to_string());
    }

    fn set_root_classes(&mut self, classes: &[String]) {
        self.root_classes = classes.to_vec();
    }

    fn set_root_marker(&mut self, class: &str, on: bool) {
        let present = self.root_classes.iter().any(|c| c == class);
        if on && !present {
            self.root_classes.push(class.to_string());
        } else if !on {
            self.root_classes.retain(|c| c != class);
        }
    }

    fn write(&mut self, id: &str, kind: SlotKind, value: &str) {
        let el = self.element_mut(id);
        match kind {
            SlotKind::Text => {
                el.content = value.to_string();
                el.is_html = false;
            }
            SlotKind::Html => {
                el.content = value.to_string();
                el.is_html = true;
            }
            SlotKind::Placeholder => el.placeholder = Some(value.to_string()),
        }
    }

    fn add_class(&mut self, id: &str, class: &str) {
        self.element_mut(id).add_class(class);
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        self.element_mut(id).classes.retain(|c| c != class);
    }

    fn set_transition_delay(&mut self, id: &str, seconds: f64) {
        self.element_mut(id).transition_delay = Some(seconds);
    }

    fn set_fill_width(&mut self, id: &str, pct: u32) {
        self.element_mut(id).width_pct = Some(pct);
    }

    fn set_opacity(&mut self, id: &str, opacity: Option<f64>) {
        self.element_mut(id).opacity = opacity;
    }

    fn mount(&mut self, mount: Mount, rows: &[Row]) {
        self.elements.retain(|_, el| el.mount != Some(mount));

        let origin = self.layout.origin(mount);
        let row_height = self.layout.row_height;
        let mut ids = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let top = origin + i as f64 * row_height;
            let mut el = Element::positioned(top, row_height);
            el.content = row.markup.clone().into_string();
            el.is_html = true;
            el.mount = Some(mount);
            el.add_class("anim-row");
            if row.visible {
                el.add_class(VISIBLE_CLASS);
            }
            self.elements.insert(row.id.clone(), el);

            for fill in &row.fills {
                let mut bar = Element::positioned(top + row_height / 2.0, 6.0);
                bar.mount = Some(mount);
                bar.add_class("sk-fill");
                bar.attrs.insert(FILL_ATTR.to_string(), fill.pct.to_string());
                self.elements.insert(fill.id.clone(), bar);
            }
            ids.push(row.id.clone());
        }
        self.mounts.insert(mount, ids);
    }

    fn reveal_rows(&self) -> Vec<String> {
        Mount::ALL
            .iter()
            .flat_map(|m| self.mounted(*m))
            .filter(|id| self.has_class(id, "anim-row"))
            .cloned()
            .collect()
    }

    fn fill_bars(&self) -> Vec<(String, u32)> {
        self.elements
            .iter()
            .filter(|(_, el)| el.mount.is_some())
            .filter_map(|(id, el)| {
                let pct = el.attrs.get(FILL_ATTR)?.parse().ok()?;
                Some((id.clone(), pct))
            })
            .collect()
    }

    fn counters(&self) -> Vec<CounterTag> {
        self.elements
            .iter()
            .filter_map(|(id, el)| {
                let target = el.attrs.get(COUNT_ATTR)?.parse().ok()?;
                Some(CounterTag {
                    id: id.clone(),
                    key: el.attrs.get(STAT_ATTR).cloned().unwrap_or_default(),
                    target,
                })
            })
            .collect()
    }

    fn stat_labels(&self) -> Vec<(String, String)> {
        self.elements
            .iter()
            .filter_map(|(id, el)| Some((id.clone(), el.attrs.get(STAT_KEY_ATTR)?.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Fill;
    use crate::test_helpers::sample_document;
    use maud::html;

    fn row(id: &str, visible: bool, fills: Vec<Fill>) -> Row {
        Row {
            id: id.to_string(),
            markup: html! { div { (id) } },
            visible,
            fills,
        }
    }

    #[test]
    fn host_page_has_slots_toggles_and_stats() {
        let surface = MemorySurface::for_document(&sample_document(), Layout::default());
        for slot in Slot::ALL {
            assert!(surface.exists(slot.id()), "missing {}", slot.id());
        }
        assert!(surface.exists("btnTh"));
        assert!(surface.exists("btnEn"));
        assert_eq!(
            surface.counters(),
            vec![CounterTag {
                id: "stat-years-count".into(),
                key: "years".into(),
                target: 5
            }]
        );
        assert_eq!(
            surface.stat_labels(),
            vec![("stat-years-label".to_string(), "years".to_string())]
        );
        assert_eq!(surface.text("stat-years-count"), "0");
    }

    #[test]
    fn writes_create_missing_elements() {
        let mut surface = MemorySurface::new(Layout::default());
        surface.write("nowhere", SlotKind::Text, "hello");
        assert_eq!(surface.text("nowhere"), "hello");
    }

    #[test]
    fn placeholder_writes_leave_content_alone() {
        let mut surface = MemorySurface::new(Layout::default());
        surface.write("fEmail", SlotKind::Placeholder, "Your email");
        let el = surface.element("fEmail").unwrap();
        assert_eq!(el.placeholder.as_deref(), Some("Your email"));
        assert!(el.content.is_empty());
    }

    #[test]
    fn mount_replaces_previous_rows_and_fills() {
        let mut surface = MemorySurface::new(Layout::default());
        let fill = Fill {
            id: "r0-fill".into(),
            pct: 40,
        };
        surface.mount(Mount::Skills, &[row("r0", false, vec![fill]), row("r1", false, vec![])]);
        assert_eq!(surface.mounted(Mount::Skills), ["r0", "r1"]);
        assert_eq!(surface.fill_bars(), vec![("r0-fill".to_string(), 40)]);

        surface.mount(Mount::Skills, &[row("r0", false, vec![])]);
        assert!(!surface.exists("r1"));
        assert!(surface.fill_bars().is_empty());
    }

    #[test]
    fn mounting_one_block_leaves_others() {
        let mut surface = MemorySurface::new(Layout::default());
        surface.mount(Mount::Projects, &[row("p0", true, vec![])]);
        surface.mount(Mount::Experience, &[row("e0", true, vec![])]);
        surface.mount(Mount::Projects, &[]);
        assert!(surface.exists("e0"));
        assert!(!surface.exists("p0"));
    }

    #[test]
    fn reveal_rows_follow_document_order() {
        let mut surface = MemorySurface::new(Layout::default());
        surface.mount(Mount::Experience, &[row("e0", true, vec![])]);
        surface.mount(Mount::Skills, &[row("s0", false, vec![]), row("s1", false, vec![])]);
        assert_eq!(surface.reveal_rows(), vec!["s0", "s1", "e0"]);
        assert!(surface.has_class("e0", VISIBLE_CLASS));
        assert!(!surface.has_class("s0", VISIBLE_CLASS));
    }

    #[test]
    fn rect_follows_scroll() {
        let mut surface = MemorySurface::new(Layout::default());
        surface.mount(Mount::Skills, &[row("s0", false, vec![]), row("s1", false, vec![])]);
        assert_eq!(
            surface.rect("s1"),
            Some(Rect {
                top: 1120.0,
                height: 120.0
            })
        );
        surface.scroll_to(1000.0);
        assert_eq!(surface.rect("s1").map(|r| r.top), Some(120.0));
        assert_eq!(surface.rect("missing"), None);
    }

    #[test]
    fn root_marker_toggles_without_touching_other_classes() {
        let mut surface = MemorySurface::new(Layout::default());
        surface.set_root_classes(&["scroll-smooth".to_string(), "lang-th".to_string()]);
        surface.set_root_marker("light", true);
        surface.set_root_marker("light", true);
        assert_eq!(surface.root_classes(), ["scroll-smooth", "lang-th", "light"]);
        surface.set_root_marker("light", false);
        assert_eq!(surface.root_classes(), ["scroll-smooth", "lang-th"]);
    }
}
