//! Scroll reveal tracking.
//!
//! One [`RevealController`] per session tracks every element that reacts to
//! entering the viewport. Elements are tagged with a [`RevealKind`]:
//!
//! | Kind | On crossing the threshold | Tracking afterwards |
//! |------|---------------------------|---------------------|
//! | `Counter` | start the count-up animation | unobserved (fires once, ever) |
//! | `FillBar` | grow the bar to its percentage | unobserved |
//! | `Row` | add the `vis` marker class | still observed; the marker is idempotent |
//!
//! The controller decides; it never touches a surface. Callers feed it
//! [`Intersection`]s computed from element geometry and apply the
//! [`RevealAction`]s it returns.

use crate::config::RevealConfig;
use std::collections::BTreeMap;

/// Marker class of a revealed row.
pub const VISIBLE_CLASS: &str = "vis";

/// Element position relative to the top of the viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Fraction of `rect` inside a viewport of the given height.
///
/// Zero-height elements count as fully visible while their top edge is
/// inside the viewport.
pub fn intersection_ratio(rect: Rect, viewport_height: f64) -> f64 {
    if rect.height <= 0.0 {
        return if rect.top >= 0.0 && rect.top < viewport_height {
            1.0
        } else {
            0.0
        };
    }
    let visible = rect.bottom().min(viewport_height) - rect.top.max(0.0);
    (visible.max(0.0) / rect.height).min(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealKind {
    Counter { target: u64 },
    FillBar { pct: u32 },
    Row,
}

/// Visibility of one tracked element.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub id: String,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealAction {
    StartCounter { id: String, target: u64 },
    Fill { id: String, pct: u32 },
    MarkVisible { id: String },
}

/// Outcome of the re-registration pass for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Already on screen; marked visible without waiting.
    Visible,
    /// Below the fold; observed for a later reveal.
    Observed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowPlacement {
    pub id: String,
    /// Transition delay in seconds.
    pub delay: f64,
    pub placement: Placement,
}

#[derive(Debug, Clone)]
pub struct RevealController {
    settings: RevealConfig,
    tracked: BTreeMap<String, RevealKind>,
}

impl RevealController {
    pub fn new(settings: &RevealConfig) -> Self {
        Self {
            settings: settings.clone(),
            tracked: BTreeMap::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.settings.threshold
    }

    /// Start (or restart) tracking an element.
    pub fn observe(&mut self, id: &str, kind: RevealKind) {
        self.tracked.insert(id.to_string(), kind);
    }

    /// Stop tracking an element. Returns whether it was tracked.
    pub fn unobserve(&mut self, id: &str) -> bool {
        self.tracked.remove(id).is_some()
    }

    pub fn is_observed(&self, id: &str) -> bool {
        self.tracked.contains_key(id)
    }

    pub fn kind_of(&self, id: &str) -> Option<RevealKind> {
        self.tracked.get(id).copied()
    }

    pub fn tracked_ids(&self) -> Vec<String> {
        self.tracked.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Drop tracked elements that no longer exist on the surface.
    pub fn retain(&mut self, mut exists: impl FnMut(&str) -> bool) {
        self.tracked.retain(|id, _| exists(id));
    }

    pub fn is_intersecting(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.settings.threshold
    }

    /// Handle a batch of visibility reports.
    ///
    /// Entries for untracked elements or below the threshold are ignored.
    /// One-shot kinds are unobserved before their action is returned, so a
    /// counter can never start twice.
    pub fn intersect(&mut self, entries: &[Intersection]) -> Vec<RevealAction> {
        let mut actions = Vec::new();
        for entry in entries {
            if !self.is_intersecting(entry.ratio) {
                continue;
            }
            let Some(kind) = self.kind_of(&entry.id) else {
                continue;
            };
            let id = entry.id.clone();
            match kind {
                RevealKind::Counter { target } => {
                    self.tracked.remove(&id);
                    tracing::debug!(%id, target, "counter revealed");
                    actions.push(RevealAction::StartCounter { id, target });
                }
                RevealKind::FillBar { pct } => {
                    self.tracked.remove(&id);
                    actions.push(RevealAction::Fill { id, pct });
                }
                RevealKind::Row => actions.push(RevealAction::MarkVisible { id }),
            }
        }
        actions
    }

    /// Transition delay of row `index` on first load.
    pub fn initial_delay(&self, index: usize) -> f64 {
        index as f64 * self.settings.initial_stagger
    }

    /// Transition delay of row `index` after a content refresh.
    pub fn stagger_delay(&self, index: usize) -> f64 {
        (index % self.settings.stagger_cycle) as f64 * self.settings.stagger_step
    }

    /// Re-registration pass after a content refresh.
    ///
    /// `rows` lists every reveal row in document order with its current
    /// position (`None` when it has no layout). Rows starting within
    /// `viewport_margin` of the viewport are shown at once; the rest are
    /// observed.
    pub fn reattach(&mut self, rows: &[(String, Option<Rect>)], viewport_height: f64) -> Vec<RowPlacement> {
        let fold = viewport_height * self.settings.viewport_margin;
        rows.iter()
            .enumerate()
            .map(|(i, (id, rect))| {
                let placement = match rect {
                    Some(r) if r.top < fold => Placement::Visible,
                    _ => {
                        self.observe(id, RevealKind::Row);
                        Placement::Observed
                    }
                };
                RowPlacement {
                    id: id.clone(),
                    delay: self.stagger_delay(i),
                    placement,
                }
            })
            .collect()
    }
}
