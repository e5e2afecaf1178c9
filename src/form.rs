//! Cosmetic contact-form handler.
//!
//! Nothing is sent. A submit swaps the button label to the "sent" text and
//! dims it, then a timer restores the regular label. Only one restore is
//! ever pending: a second submit cancels the first timer before scheduling
//! its own, so the label always returns `restore_delay_ms` after the latest
//! submit.

use crate::config::FormConfig;
use crate::content::ContentDocument;
use crate::scheduler::{TaskId, Timeline};
use crate::surface::Surface;
use crate::types::Lang;
use crate::view::{Slot, SlotKind, send_label, sent_label};

#[derive(Debug, Clone)]
pub struct FormStub {
    settings: FormConfig,
    pending: Option<TaskId>,
}

impl FormStub {
    pub fn new(settings: &FormConfig) -> Self {
        Self {
            settings: settings.clone(),
            pending: None,
        }
    }

    /// Whether a label restore is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a submit. `restore` is the task the timeline hands back when
    /// the restore is due; the owner routes it to [`FormStub::restore`].
    pub fn submit<T>(
        &mut self,
        timeline: &mut Timeline<T>,
        restore: T,
        surface: &mut impl Surface,
        doc: &ContentDocument,
        lang: Lang,
    ) {
        let button = Slot::SubmitBtn.id();
        surface.write(button, SlotKind::Text, &sent_label(doc, lang));
        surface.set_opacity(button, Some(self.settings.sent_opacity));

        if let Some(previous) = self.pending.take() {
            timeline.cancel(previous);
            tracing::debug!("pending form restore replaced");
        }
        self.pending = Some(timeline.set_timeout(self.settings.restore_delay_ms, restore));
    }

    /// Put the resting label back, in the language active now.
    pub fn restore(&mut self, surface: &mut impl Surface, doc: &ContentDocument, lang: Lang) {
        self.pending = None;
        let button = Slot::SubmitBtn.id();
        surface.write(button, SlotKind::Text, &send_label(doc, lang));
        surface.set_opacity(button, None);
    }
}
