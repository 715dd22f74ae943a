use leptos::prelude::*;

#[component]
pub fn ProgressOverlay(visible: ReadSignal<bool>) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <div class="progress-overlay" role="progressbar" aria-busy="true">
                <div class="loading-spinner">
                    <div class="spinner"></div>
                    <span>"Generating your resume... This may take a moment."</span>
                </div>
            </div>
        </Show>
    }
}
