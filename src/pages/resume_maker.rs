use std::rc::Rc;

use leptos::ev::SubmitEvent;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Blob;

use crate::api::HttpResumeService;
use crate::components::entry_section::EntrySection;
use crate::components::notice_banner::NoticeBanner;
use crate::components::preview_pane::PreviewPane;
use crate::components::progress_overlay::ProgressOverlay;
use crate::components::skill_group::SkillGroupFields;
use crate::config::ControllerConfig;
use crate::controller::{FormController, SubmitOutcome};
use crate::dom::{self, DomForm};
use crate::draft::build_draft;
use crate::error::ControllerError;
use crate::form::{SectionKind, SkillGroup, PERSONAL_FIELDS, PERSONAL_SECTION, SUMMARY_FIELD};
use crate::preview::{PreviewState, WindowScheduler};
use crate::submit::{
    Notice, NoticeBoard, NoticeKind, Notifier, ProgressIndicator, SubmitIntent, SubmitUi,
    GENERATE_SUBMITTER, PREVIEW_SUBMITTER,
};

/// Page-side hooks for the generate flow.
#[derive(Clone, Copy)]
struct PageUi {
    progress: WriteSignal<bool>,
    notices: StoredValue<NoticeBoard<WindowScheduler>, LocalStorage>,
}

impl ProgressIndicator for PageUi {
    fn show(&self) {
        self.progress.set(true);
    }

    fn hide(&self) {
        self.progress.set(false);
    }
}

impl Notifier for PageUi {
    fn notify(&self, kind: NoticeKind, message: String) {
        self.notices.with_value(|board| board.post(kind, message));
    }
}

impl SubmitUi<Blob> for PageUi {
    fn save_artifact(&self, artifact: Blob, filename: &str) -> Result<(), ControllerError> {
        dom::save_blob(&artifact, filename)
    }
}

#[component]
pub fn ResumeMakerPage() -> impl IntoView {
    let config = use_context::<ControllerConfig>().unwrap_or_default();
    let form_ref = NodeRef::<html::Form>::new();

    let (preview, set_preview) = signal(PreviewState::Placeholder);
    let (generating, set_generating) = signal(false);
    let (notice, set_notice) = signal::<Option<Notice>>(None);

    let controller = StoredValue::new_local(Rc::new(FormController::new(
        HttpResumeService::new(&config),
        WindowScheduler,
        &config,
    )));
    let filename = StoredValue::new(config.artifact_filename.clone());

    let ui = PageUi {
        progress: set_generating,
        notices: StoredValue::new_local(NoticeBoard::new(
            WindowScheduler,
            config.notice_ttl(),
            move |n| set_notice.set(n),
        )),
    };

    let read_form = move || form_ref.get_untracked().map(DomForm::new);
    // Fresh projection of the form on every call
    let read_draft = move || read_form().map(|form| build_draft(&form));

    let run_preview = move || {
        let Some(draft) = read_draft() else {
            return;
        };
        let controller = controller.get_value();
        spawn_local(async move {
            if let Some(state) = controller.preview(draft).await {
                set_preview.set(state);
            }
        });
    };

    let on_input = move |_| {
        controller.with_value(|c| c.input_changed(run_preview));
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let submitter = ev.submitter().and_then(|el| el.get_attribute("name"));
        let intent = SubmitIntent::from_submitter(submitter.as_deref());

        let Some(draft) = read_draft() else {
            return;
        };
        let controller = controller.get_value();
        let filename = filename.get_value();
        spawn_local(async move {
            let outcome = controller.submit(intent, draft, &ui, &filename).await;
            if let SubmitOutcome::Previewed(Some(state)) = outcome {
                set_preview.set(state);
            }
        });
    };

    Effect::new(move |_| {
        controller.with_value(|c| {
            c.schedule_initial(read_form, run_preview);
        });
    });

    view! {
        <div class="page resume-maker-page">
            <style>{include_str!("resume_maker.css")}</style>

            <h2>"Resume Maker"</h2>
            <p class="page-description">
                "Fill in your details. The preview updates as you type."
            </p>

            <div class="maker-layout">
                <form
                    id="resumeForm"
                    class="resume-form"
                    node_ref=form_ref
                    on:input=on_input
                    on:submit=on_submit
                >
                    <fieldset id=PERSONAL_SECTION class="form-section">
                        <legend>"Personal Information"</legend>
                        {PERSONAL_FIELDS.iter().map(|&(name, placeholder)| view! {
                            <input
                                type="text"
                                name=name
                                placeholder=placeholder
                                aria-label=placeholder
                                class="input"
                            />
                        }).collect::<Vec<_>>()}
                    </fieldset>

                    <fieldset class="form-section">
                        <legend>"Summary"</legend>
                        <textarea
                            name=SUMMARY_FIELD
                            placeholder="Professional summary"
                            aria-label="Professional summary"
                            class="input"
                        ></textarea>
                    </fieldset>

                    {SectionKind::ALL.into_iter().map(|kind| view! {
                        <EntrySection kind=kind />
                    }).collect::<Vec<_>>()}

                    <fieldset class="form-section">
                        <legend>"Skills"</legend>
                        {SkillGroup::ALL.into_iter().map(|group| view! {
                            <SkillGroupFields group=group />
                        }).collect::<Vec<_>>()}
                    </fieldset>

                    <div class="form-actions">
                        <button type="submit" name=PREVIEW_SUBMITTER class="btn">
                            "Preview"
                        </button>
                        <button
                            type="submit"
                            name=GENERATE_SUBMITTER
                            class="btn btn-primary"
                            disabled=move || generating.get()
                        >
                            {move || if generating.get() { "Generating..." } else { "Download PDF" }}
                        </button>
                    </div>
                </form>

                <PreviewPane state=preview />
            </div>

            <ProgressOverlay visible=generating />
            <NoticeBanner
                notice=notice
                on_dismiss=move |_| ui.notices.with_value(|board| board.dismiss())
            />
        </div>
    }
}
