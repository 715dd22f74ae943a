//! The form's event handling, independent of the page that hosts it.

use std::cell::Cell;
use std::future::Future;
use std::time::Duration;

use leptos::logging::warn;

use crate::api::ResumeService;
use crate::config::ControllerConfig;
use crate::draft::{needs_initial_preview, ResumeDraft};
use crate::form::FormSource;
use crate::preview::{Debouncer, PreviewController, PreviewState, Scheduler};
use crate::submit::{generate, SubmitIntent, SubmitUi};

/// What a submit amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A preview ran. `None` when a newer preview superseded it.
    Previewed(Option<PreviewState>),
    Generated,
    /// A generation was already running.
    Ignored,
}

pub struct FormController<S: ResumeService, D: Scheduler> {
    previewer: PreviewController<S>,
    debouncer: Debouncer<D>,
    scheduler: D,
    initial_delay: Duration,
    generating: Cell<bool>,
}

/// Clears the busy flag however the generate future ends.
struct Busy<'a>(&'a Cell<bool>);

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<S: ResumeService, D: Scheduler + Clone> FormController<S, D> {
    pub fn new(service: S, scheduler: D, config: &ControllerConfig) -> Self {
        Self {
            previewer: PreviewController::new(service),
            debouncer: Debouncer::new(scheduler.clone(), config.quiet_period()),
            scheduler,
            initial_delay: config.initial_preview_delay(),
            generating: Cell::new(false),
        }
    }

    /// A field changed. `preview` runs once input has been quiet long enough.
    pub fn input_changed(&self, preview: impl FnOnce() + 'static) {
        self.debouncer.trigger(preview);
    }

    /// Preview `draft` now, dropping any debounced preview still pending.
    pub fn preview(&self, draft: ResumeDraft) -> impl Future<Output = Option<PreviewState>> + '_ {
        self.debouncer.cancel();
        self.previewer.request(draft)
    }

    /// Arrange the one preview a restored form gets after load.
    ///
    /// The form is read when the delay elapses rather than at mount, so values
    /// the browser autofills or restores in the meantime still count.
    pub fn schedule_initial<F, R, P>(&self, read_form: R, preview: P) -> bool
    where
        F: FormSource,
        R: FnOnce() -> Option<F> + 'static,
        P: FnOnce() + 'static,
    {
        let task = move || {
            if read_form().is_some_and(|form| needs_initial_preview(&form)) {
                preview();
            }
        };
        match self.scheduler.schedule(self.initial_delay, Box::new(task)) {
            Some(handle) => {
                self.scheduler.detach(handle);
                true
            }
            None => {
                warn!("Could not schedule the initial preview");
                false
            }
        }
    }

    /// Handle a form submit. Preview never touches the builder, and Generate is
    /// ignored while another generation is in flight.
    pub async fn submit<U>(
        &self,
        intent: SubmitIntent,
        draft: ResumeDraft,
        ui: &U,
        filename: &str,
    ) -> SubmitOutcome
    where
        U: SubmitUi<S::Artifact> + ?Sized,
    {
        match intent {
            SubmitIntent::Preview => SubmitOutcome::Previewed(self.preview(draft).await),
            SubmitIntent::Generate => {
                if self.generating.replace(true) {
                    return SubmitOutcome::Ignored;
                }
                let _busy = Busy(&self.generating);
                generate(self.previewer.service(), ui, &draft, filename).await;
                SubmitOutcome::Generated
            }
        }
    }
}
