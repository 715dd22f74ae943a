//! Live preview: debounced triggering and the stale-response guard.

use std::cell::Cell;
use std::time::Duration;

use leptos::logging::{log, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::api::ResumeService;
use crate::draft::ResumeDraft;

/// One-shot timers.
pub trait Scheduler {
    type Handle;

    /// Run `task` once after `delay`. `None` if the timer could not be set.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<Self::Handle>;

    /// Cancel a timer. Cancelling one that already fired is a no-op.
    fn cancel(&self, handle: Self::Handle);

    /// Let a timer run without keeping its handle around.
    fn detach(&self, _handle: Self::Handle) {}
}

/// A pending `setTimeout` together with the callback it will invoke.
///
/// Dropping the handle frees the callback, so it must outlive the timer
/// unless the timer was cleared first.
pub struct Timeout {
    id: i32,
    callback: Closure<dyn FnMut()>,
}

/// `window.setTimeout` / `clearTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowScheduler;

impl Scheduler for WindowScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<Timeout> {
        let window = web_sys::window()?;
        let callback = Closure::once(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )
            .ok()?;
        Some(Timeout { id, callback })
    }

    fn cancel(&self, handle: Timeout) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle.id);
        }
    }

    fn detach(&self, handle: Timeout) {
        handle.callback.forget();
    }
}

/// Holds at most one pending timer; each trigger replaces it.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    quiet: Duration,
    pending: Cell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, quiet: Duration) -> Self {
        Self {
            scheduler,
            quiet,
            pending: Cell::new(None),
        }
    }

    /// Run `task` once the quiet period passes without another trigger.
    pub fn trigger(&self, task: impl FnOnce() + 'static) {
        self.cancel();
        self.pending
            .set(self.scheduler.schedule(self.quiet, Box::new(task)));
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

/// What the preview pane shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewState {
    #[default]
    Placeholder,
    Rendered(String),
}

impl PreviewState {
    pub fn html(&self) -> Option<&str> {
        match self {
            PreviewState::Rendered(html) => Some(html),
            PreviewState::Placeholder => None,
        }
    }
}

/// Issues preview requests and drops replies that a newer request superseded.
pub struct PreviewController<S> {
    service: S,
    latest: Cell<u64>,
}

impl<S: ResumeService> PreviewController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            latest: Cell::new(0),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Start a preview request for `draft`.
    ///
    /// The request's ticket is taken immediately, before the returned future
    /// is polled. The future yields `None` when a later request was issued
    /// before this one's reply arrived.
    pub fn request(&self, draft: ResumeDraft) -> impl std::future::Future<Output = Option<PreviewState>> + '_ {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);

        async move {
            let outcome = self.service.render_preview(&draft).await;

            if self.latest.get() != ticket {
                log!("Discarding stale preview reply #{}", ticket);
                return None;
            }

            Some(match outcome {
                Ok(html) => PreviewState::Rendered(html),
                Err(e) => {
                    warn!("Preview failed: {}", e);
                    PreviewState::Placeholder
                }
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    type Task = Box<dyn FnOnce()>;

    /// Scheduler driven by hand from tests.
    #[derive(Default)]
    pub struct ManualClock {
        now: Cell<u64>,
        next_id: Cell<u64>,
        timers: RefCell<Vec<(u64, u64, Task)>>,
    }

    impl ManualClock {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub fn pending(&self) -> usize {
            self.timers.borrow().len()
        }

        /// Move time forward, firing due timers in deadline order.
        pub fn advance(&self, millis: u64) {
            let target = self.now.get() + millis;
            loop {
                let due = {
                    let mut timers = self.timers.borrow_mut();
                    let next = timers
                        .iter()
                        .enumerate()
                        .filter(|(_, (_, at, _))| *at <= target)
                        .min_by_key(|(_, (id, at, _))| (*at, *id))
                        .map(|(idx, _)| idx);
                    next.map(|idx| timers.remove(idx))
                };
                match due {
                    Some((_, at, task)) => {
                        self.now.set(at);
                        task();
                    }
                    None => break,
                }
            }
            self.now.set(target);
        }
    }

    impl Scheduler for Rc<ManualClock> {
        type Handle = u64;

        fn schedule(&self, delay: Duration, task: Task) -> Option<u64> {
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            let at = self.now.get() + delay.as_millis() as u64;
            self.timers.borrow_mut().push((id, at, task));
            Some(id)
        }

        fn cancel(&self, handle: u64) {
            self.timers.borrow_mut().retain(|(id, _, _)| *id != handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::executor::block_on;

    use super::testing::ManualClock;
    use super::*;
    use crate::api::DownloadTicket;
    use crate::error::ControllerError;

    /// Renders the draft's name, or fails when the name is "boom".
    #[derive(Default)]
    struct EchoService {
        calls: RefCell<Vec<String>>,
    }

    impl ResumeService for EchoService {
        type Artifact = Vec<u8>;

        async fn render_preview(&self, draft: &ResumeDraft) -> Result<String, ControllerError> {
            let name = draft.personal_info.name.clone();
            self.calls.borrow_mut().push(name.clone());
            if name == "boom" {
                return Err(ControllerError::Server("template error".to_string()));
            }
            Ok(format!("<h1>{}</h1>", name))
        }

        async fn build_document(&self, _draft: &ResumeDraft) -> Result<DownloadTicket, ControllerError> {
            Err(ControllerError::NoOutcome)
        }

        async fn fetch_document(&self, _ticket: &DownloadTicket) -> Result<Vec<u8>, ControllerError> {
            Err(ControllerError::NoOutcome)
        }
    }

    fn draft_named(name: &str) -> ResumeDraft {
        let mut draft = ResumeDraft::default();
        draft.personal_info.name = name.to_string();
        draft
    }

    #[test]
    fn test_burst_of_input_fires_once() {
        let clock = ManualClock::new();
        let debouncer = Debouncer::new(Rc::clone(&clock), Duration::from_millis(800));
        let fired = Rc::new(Cell::new(0));

        for _ in 0..5 {
            let fired = Rc::clone(&fired);
            debouncer.trigger(move || fired.set(fired.get() + 1));
            clock.advance(100);
        }
        assert_eq!(fired.get(), 0);
        assert_eq!(clock.pending(), 1);

        // 100ms already passed since the last trigger.
        clock.advance(699);
        assert_eq!(fired.get(), 0);
        clock.advance(1);
        assert_eq!(fired.get(), 1);

        clock.advance(5000);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let clock = ManualClock::new();
        let debouncer = Debouncer::new(Rc::clone(&clock), Duration::from_millis(800));
        let fired = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let counter = Rc::clone(&fired);
            debouncer.trigger(move || counter.set(counter.get() + 1));
            clock.advance(800);
        }
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_cancel_drops_pending_trigger() {
        let clock = ManualClock::new();
        let debouncer = Debouncer::new(Rc::clone(&clock), Duration::from_millis(800));
        let fired = Rc::new(Cell::new(false));

        let flag = Rc::clone(&fired);
        debouncer.trigger(move || flag.set(true));
        debouncer.cancel();
        clock.advance(1000);

        assert!(!fired.get());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_replaced_triggers_release_their_tasks() {
        let clock = ManualClock::new();
        let debouncer = Debouncer::new(Rc::clone(&clock), Duration::from_millis(800));
        let token = Rc::new(());

        for _ in 0..5 {
            let held = Rc::clone(&token);
            debouncer.trigger(move || drop(held));
        }
        assert_eq!(Rc::strong_count(&token), 2);

        debouncer.cancel();
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn test_preview_renders_fragment() {
        let controller = PreviewController::new(EchoService::default());
        let state = block_on(controller.request(draft_named("Jane Doe")));
        assert_eq!(state, Some(PreviewState::Rendered("<h1>Jane Doe</h1>".to_string())));
    }

    #[test]
    fn test_preview_failure_reverts_to_placeholder() {
        let controller = PreviewController::new(EchoService::default());
        let state = block_on(controller.request(draft_named("boom")));
        assert_eq!(state, Some(PreviewState::Placeholder));
    }

    #[test]
    fn test_stale_reply_is_discarded() {
        let controller = PreviewController::new(EchoService::default());

        let first = controller.request(draft_named("A"));
        let second = controller.request(draft_named("B"));

        // B resolves first, then A's late reply arrives.
        let newest = block_on(second);
        let stale = block_on(first);

        assert_eq!(newest, Some(PreviewState::Rendered("<h1>B</h1>".to_string())));
        assert_eq!(stale, None);
        assert_eq!(*controller.service.calls.borrow(), vec!["B", "A"]);
    }

    #[test]
    fn test_sequential_requests_all_apply() {
        let controller = PreviewController::new(EchoService::default());
        assert!(block_on(controller.request(draft_named("A"))).is_some());
        assert!(block_on(controller.request(draft_named("B"))).is_some());
    }

    #[test]
    fn test_preview_state_html() {
        assert_eq!(PreviewState::Placeholder.html(), None);
        assert_eq!(PreviewState::Rendered("<p/>".to_string()).html(), Some("<p/>"));
    }
}
