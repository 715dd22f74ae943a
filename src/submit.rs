//! Form submission: intent resolution, the generate flow and transient notices.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use leptos::logging::error;

use crate::api::ResumeService;
use crate::draft::ResumeDraft;
use crate::error::ControllerError;
use crate::preview::Scheduler;

pub const DOWNLOAD_SUCCESS_MESSAGE: &str = "PDF downloaded successfully!";

/// Name of the submit control that requests a preview.
pub const PREVIEW_SUBMITTER: &str = "preview";
pub const GENERATE_SUBMITTER: &str = "generate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitIntent {
    Preview,
    Generate,
}

impl SubmitIntent {
    /// Resolve the intent from the `name` of the control that submitted the form.
    pub fn from_submitter(name: Option<&str>) -> Self {
        match name {
            Some(PREVIEW_SUBMITTER) => SubmitIntent::Preview,
            _ => SubmitIntent::Generate,
        }
    }
}

pub trait ProgressIndicator {
    fn show(&self);
    fn hide(&self);
}

/// Shows the indicator on acquire and hides it on drop.
#[must_use = "the progress indicator is hidden as soon as the guard is dropped"]
pub struct ProgressGuard<'a, P: ProgressIndicator + ?Sized> {
    indicator: &'a P,
}

impl<'a, P: ProgressIndicator + ?Sized> ProgressGuard<'a, P> {
    pub fn acquire(indicator: &'a P) -> Self {
        indicator.show();
        Self { indicator }
    }
}

impl<P: ProgressIndicator + ?Sized> Drop for ProgressGuard<'_, P> {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

pub trait Notifier {
    fn notify(&self, kind: NoticeKind, message: String);
}

/// Everything the generate flow needs from the page.
pub trait SubmitUi<A>: ProgressIndicator + Notifier {
    /// Hand the artifact to the user as a file download.
    fn save_artifact(&self, artifact: A, filename: &str) -> Result<(), ControllerError>;
}

/// A single notice slot with auto-dismiss.
///
/// Posting replaces whatever is showing. Each notice schedules its own
/// dismissal, which only takes effect while that notice is still current.
pub struct NoticeBoard<S: Scheduler> {
    scheduler: S,
    ttl: Duration,
    next_id: Cell<u64>,
    current: Rc<Cell<Option<u64>>>,
    publish: Rc<dyn Fn(Option<Notice>)>,
}

impl<S: Scheduler> NoticeBoard<S> {
    pub fn new(scheduler: S, ttl: Duration, publish: impl Fn(Option<Notice>) + 'static) -> Self {
        Self {
            scheduler,
            ttl,
            next_id: Cell::new(0),
            current: Rc::new(Cell::new(None)),
            publish: Rc::new(publish),
        }
    }

    pub fn post(&self, kind: NoticeKind, message: String) {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.current.set(Some(id));
        (self.publish)(Some(Notice { id, kind, message }));

        let current = Rc::clone(&self.current);
        let publish = Rc::clone(&self.publish);
        let expire = self.scheduler.schedule(
            self.ttl,
            Box::new(move || {
                if current.get() == Some(id) {
                    current.set(None);
                    publish(None);
                }
            }),
        );
        if let Some(handle) = expire {
            self.scheduler.detach(handle);
        }
    }

    pub fn dismiss(&self) {
        if self.current.take().is_some() {
            (self.publish)(None);
        }
    }
}

/// Generate the document and download it.
///
/// The progress indicator is released before any notice is posted, on every
/// path out of the request.
pub async fn generate<S, U>(service: &S, ui: &U, draft: &ResumeDraft, filename: &str)
where
    S: ResumeService,
    U: SubmitUi<S::Artifact> + ?Sized,
{
    let artifact = {
        let _progress = ProgressGuard::acquire(ui);
        match service.build_document(draft).await {
            Ok(ticket) => service.fetch_document(&ticket).await,
            Err(e) => Err(e),
        }
    };

    match artifact.and_then(|artifact| ui.save_artifact(artifact, filename)) {
        Ok(()) => ui.notify(NoticeKind::Success, DOWNLOAD_SUCCESS_MESSAGE.to_string()),
        Err(e) => {
            error!("Resume generation failed: {}", e);
            ui.notify(NoticeKind::Error, e.user_message());
        }
    }
}
