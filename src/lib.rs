//! # Folio
//!
//! Presentation logic for a bilingual (Thai / English) personal portfolio
//! page, and a static site build around it.
//!
//! All page text and lists come from one JSON content document. The crate
//! renders that document for the active language, switches languages and
//! themes, reveals rows and starts stat counters as they scroll into view,
//! and runs a cosmetic contact-form handler.
//!
//! # Architecture
//!
//! ```text
//! ContentDocument ─┐
//!                  ├─ build_page_view ─→ PageView ─→ render (maud) ─→ rows / full page
//! PresentationState┘                                      │
//!                                                         ▼
//!          PresentationController ── writes ──→ Surface (MemorySurface, ...)
//!            │  RevealController   (what became visible)
//!            │  Timeline           (counter frames, form restore timer)
//!            └  PreferenceStore    (persisted theme)
//! ```
//!
//! The view-model is a pure function of (document, state), so everything a
//! language switch changes can be tested without markup. The controller is
//! single-threaded and deterministic: time only moves when the host calls
//! [`tick`](controller::PresentationController::tick).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | The JSON content document, localized lookups, gap detection |
//! | [`state`] | Presentation state and the persisted theme preference |
//! | [`view`] | Pure view-model builder and the fixed slot table |
//! | [`render`] | Maud rendering of rows and of the full page |
//! | [`reveal`] | Visibility tracking: counters, fill bars, reveal rows |
//! | [`animation`] | Eased count-up animation |
//! | [`scheduler`] | Virtual timeline of frame callbacks and timers |
//! | [`surface`] | The UI surface trait and its in-memory implementation |
//! | [`controller`] | The presentation session tying it all together |
//! | [`form`] | Contact form stub |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`generate`] | Static build: one page per language plus assets |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Language and theme codes |
//!
//! # Design Decisions
//!
//! ## Missing Translations Render as `undefined`
//!
//! A value the document lacks is written as the literal text `undefined`
//! instead of failing the render or leaving the element empty. The page
//! stays usable and the gap is easy to spot; `folio check` lists all of
//! them.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Interpolation is
//! escaped by default; the only raw markup is the two content slots that
//! carry inline emphasis and line breaks.

pub mod animation;
pub mod config;
pub mod content;
pub mod controller;
pub mod form;
pub mod generate;
pub mod logging;
pub mod output;
pub mod render;
pub mod reveal;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
