use leptos::prelude::*;

use crate::preview::PreviewState;

/// Rendered preview, or a placeholder when there is nothing to show.
#[component]
pub fn PreviewPane(state: ReadSignal<PreviewState>) -> impl IntoView {
    view! {
        <section class="preview-panel">
            <h3>"Live Preview"</h3>
            <Show
                when=move || state.with(|s| s.html().is_some())
                fallback=|| view! {
                    <p class="preview-placeholder">
                        "Start filling in the form to see your resume here."
                    </p>
                }
            >
                <div
                    id="previewContent"
                    class="preview-content"
                    inner_html=move || state.with(|s| s.html().unwrap_or_default().to_string())
                ></div>
            </Show>
        </section>
    }
}
