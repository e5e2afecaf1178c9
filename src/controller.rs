//! The presentation session.
//!
//! A [`PresentationController`] owns everything a page session needs: the
//! content document, the presentation state, the reveal tracker, the
//! timeline of deferred work, the preference store and the surface it
//! writes into. It is constructed once by [`PresentationController::boot`]
//! and then driven by the user operations:
//!
//! - [`set_language`](PresentationController::set_language) re-renders all
//!   language-dependent content and re-registers reveal tracking
//! - [`toggle_theme`](PresentationController::toggle_theme) flips the theme
//!   marker and persists the choice
//! - [`submit_form`](PresentationController::submit_form) runs the form stub
//!
//! and by the host's event loop:
//!
//! - [`observe_viewport`](PresentationController::observe_viewport) after
//!   scrolling or layout changes
//! - [`tick`](PresentationController::tick) once per frame
//!
//! Nothing happens in the background; time only moves through `tick`.

use crate::animation::CounterAnimation;
use crate::config::SiteConfig;
use crate::content::ContentDocument;
use crate::form::FormStub;
use crate::render::{RevealMode, render_experience, render_projects, render_skills};
use crate::reveal::{
    Intersection, Placement, Rect, RevealAction, RevealController, RevealKind, VISIBLE_CLASS,
    intersection_ratio,
};
use crate::scheduler::Timeline;
use crate::state::{PreferenceStore, PresentationState, StoreError, restore_theme};
use crate::surface::{Mount, Surface};
use crate::types::{Lang, Theme};
use crate::view::{PageView, SlotKind, build_page_view};
use std::collections::{BTreeMap, BTreeSet};

/// Class of the active language toggle button.
pub const ACTIVE_CLASS: &str = "active";

/// Deferred work on the session timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Next frame of the counter with this element id.
    CounterStep { id: String },
    /// Put the submit button label back.
    RestoreSubmit,
}

pub struct PresentationController<S: Surface, P: PreferenceStore> {
    config: SiteConfig,
    doc: ContentDocument,
    state: PresentationState,
    reveal: RevealController,
    timeline: Timeline<Task>,
    counters: BTreeMap<String, CounterAnimation>,
    /// Rows that carry the visible class. Survives re-mounts.
    revealed: BTreeSet<String>,
    /// Fill bars that reached their width, by id.
    filled: BTreeMap<String, u32>,
    form: FormStub,
    store: P,
    surface: S,
}

impl<S: Surface, P: PreferenceStore> PresentationController<S, P> {
    /// Start a session: restore the stored theme, render the default
    /// language and start tracking counters, fill bars and reveal rows.
    pub fn boot(
        doc: ContentDocument,
        config: SiteConfig,
        store: P,
        surface: S,
    ) -> Result<Self, StoreError> {
        let presentation = &config.presentation;
        let theme = restore_theme(&store, &presentation.storage_key, presentation.default_theme)?;
        let state = PresentationState::new(presentation.default_lang, theme);

        let mut session = Self {
            reveal: RevealController::new(&config.reveal),
            form: FormStub::new(&config.form),
            timeline: Timeline::new(),
            counters: BTreeMap::new(),
            revealed: BTreeSet::new(),
            filled: BTreeMap::new(),
            config,
            doc,
            state,
            store,
            surface,
        };
        session
            .surface
            .set_root_marker(Theme::LIGHT_MARKER, theme.has_marker());
        session.render();

        for counter in session.surface.counters() {
            session.reveal.observe(
                &counter.id,
                RevealKind::Counter {
                    target: counter.target,
                },
            );
        }
        session.observe_fills();
        for (i, id) in session.surface.reveal_rows().iter().enumerate() {
            let delay = session.reveal.initial_delay(i);
            session.surface.set_transition_delay(id, delay);
            session.reveal.observe(id, RevealKind::Row);
        }
        session.observe_viewport();

        tracing::debug!(
            lang = %session.state.language,
            theme = %session.state.theme,
            tracked = session.reveal.len(),
            "session booted"
        );
        Ok(session)
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn document(&self) -> &ContentDocument {
        &self.doc
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for the host, e.g. to scroll before
    /// [`observe_viewport`](Self::observe_viewport).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn now_ms(&self) -> u64 {
        self.timeline.now_ms()
    }

    /// Number of counters still animating.
    pub fn running_counters(&self) -> usize {
        self.counters.len()
    }

    /// The view for the current state.
    pub fn view(&self) -> PageView {
        build_page_view(&self.doc, &self.state, &self.config.skills.invert_on_light)
    }

    /// Switch the page language. Calling it again with the same language
    /// leaves the surface unchanged.
    pub fn set_language(&mut self, lang: Lang) {
        tracing::debug!(%lang, "switching language");
        self.state.language = lang;
        self.render();

        let surface = &self.surface;
        self.reveal.retain(|id| surface.exists(id));
        self.reattach_rows();
        self.observe_fills();
        self.observe_viewport();
    }

    /// Flip the theme and persist the new value.
    ///
    /// The marker class is applied before the store is written, so a store
    /// failure leaves the page in the new theme for this session.
    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        let theme = self.state.theme.toggled();
        self.state.theme = theme;
        self.surface
            .set_root_marker(Theme::LIGHT_MARKER, theme.has_marker());
        tracing::debug!(%theme, "theme toggled");
        self.store
            .set(&self.config.presentation.storage_key, theme.as_str())?;
        Ok(theme)
    }

    /// Check every tracked element against the current viewport and apply
    /// whatever reveals are due.
    pub fn observe_viewport(&mut self) {
        let viewport = self.surface.viewport_height();
        let entries: Vec<Intersection> = self
            .reveal
            .tracked_ids()
            .into_iter()
            .filter_map(|id| {
                let rect = self.surface.rect(&id)?;
                Some(Intersection {
                    ratio: intersection_ratio(rect, viewport),
                    id,
                })
            })
            .collect();

        for action in self.reveal.intersect(&entries) {
            self.apply(action);
        }
    }

    /// Advance the session clock to `now_ms`, running due timers and one
    /// frame of counter steps.
    pub fn tick(&mut self, now_ms: u64) {
        for fired in self.timeline.advance(now_ms) {
            match fired.task {
                Task::CounterStep { id } => self.step_counter(id, fired.at_ms),
                Task::RestoreSubmit => {
                    self.form
                        .restore(&mut self.surface, &self.doc, self.state.language);
                }
            }
        }
    }

    /// Tick at the configured frame interval until the clock reaches
    /// `end_ms`.
    pub fn run_until(&mut self, end_ms: u64) {
        let step = self.config.counter.frame_interval_ms.max(1);
        let mut now = self.timeline.now_ms();
        while now < end_ms {
            now = now.saturating_add(step).min(end_ms);
            self.tick(now);
        }
    }

    pub fn submit_form(&mut self) {
        self.form.submit(
            &mut self.timeline,
            Task::RestoreSubmit,
            &mut self.surface,
            &self.doc,
            self.state.language,
        );
    }

    /// Write every language-dependent part of the page for the current
    /// state. Counter values are left alone.
    fn render(&mut self) {
        let view = self.view();

        self.surface.set_root_lang(view.lang);
        self.surface.set_root_classes(&view.root_classes);
        for lang in Lang::ALL {
            if lang == view.lang {
                self.surface.add_class(lang.toggle_id(), ACTIVE_CLASS);
            } else {
                self.surface.remove_class(lang.toggle_id(), ACTIVE_CLASS);
            }
        }

        for slot in &view.slots {
            self.surface.write(slot.slot.id(), slot.slot.kind(), &slot.value);
        }
        for (id, key) in self.surface.stat_labels() {
            self.surface.write(&id, SlotKind::Text, view.stat_label(&key));
        }

        self.surface.mount(
            Mount::Skills,
            &render_skills(&view.skill_groups, RevealMode::Deferred),
        );
        self.surface
            .mount(Mount::Projects, &render_projects(&view.projects));
        self.surface
            .mount(Mount::Experience, &render_experience(&view.experience));
    }

    /// Re-registration pass after a re-render: stagger every row, show the
    /// ones already revealed or on screen, observe the rest.
    fn reattach_rows(&mut self) {
        let viewport = self.surface.viewport_height();
        let rows: Vec<(String, Option<Rect>)> = self
            .surface
            .reveal_rows()
            .into_iter()
            .map(|id| {
                let rect = self.surface.rect(&id);
                (id, rect)
            })
            .collect();

        for row in self.reveal.reattach(&rows, viewport) {
            self.surface.set_transition_delay(&row.id, row.delay);
            if row.placement == Placement::Visible || self.revealed.contains(&row.id) {
                self.surface.add_class(&row.id, VISIBLE_CLASS);
                self.revealed.insert(row.id);
            }
        }
    }

    fn observe_fills(&mut self) {
        for (id, pct) in self.surface.fill_bars() {
            match self.filled.get(&id) {
                Some(&width) => self.surface.set_fill_width(&id, width),
                None => self.reveal.observe(&id, RevealKind::FillBar { pct }),
            }
        }
    }

    fn apply(&mut self, action: RevealAction) {
        match action {
            RevealAction::StartCounter { id, target } => {
                let animation = CounterAnimation::new(target, self.config.counter.duration_ms);
                self.counters.insert(id.clone(), animation);
                self.timeline.request_frame(Task::CounterStep { id });
            }
            RevealAction::Fill { id, pct } => {
                self.surface.set_fill_width(&id, pct);
                self.filled.insert(id, pct);
            }
            RevealAction::MarkVisible { id } => {
                self.surface.add_class(&id, VISIBLE_CLASS);
                self.revealed.insert(id);
            }
        }
    }

    fn step_counter(&mut self, id: String, at_ms: u64) {
        let Some(animation) = self.counters.get_mut(&id) else {
            return;
        };
        let frame = animation.frame(at_ms);
        self.surface
            .write(&id, SlotKind::Text, &frame.value.to_string());
        if frame.finished {
            self.counters.remove(&id);
            tracing::debug!(%id, value = frame.value, "counter finished");
        } else {
            self.timeline.request_frame(Task::CounterStep { id });
        }
    }
}
