use leptos::prelude::*;

use crate::submit::{Notice, NoticeKind};

/// The transient success/error banner.
#[component]
pub fn NoticeBanner(
    notice: ReadSignal<Option<Notice>>,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            let class = match n.kind {
                NoticeKind::Success => "notice notice-success",
                NoticeKind::Error => "notice notice-error",
            };
            view! {
                <div class=class role="status">
                    <span class="notice-message">{n.message}</span>
                    <button
                        type="button"
                        class="notice-close"
                        aria-label="Dismiss"
                        on:click=move |_| on_dismiss.run(())
                    >
                        "\u{2715}"
                    </button>
                </div>
            }
        })
    }
}
