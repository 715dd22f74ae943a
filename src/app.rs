use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::config::ControllerConfig;
use crate::pages::resume_maker::ResumeMakerPage;

#[component]
pub fn App() -> impl IntoView {
    provide_context(ControllerConfig::load());

    view! {
        <Router>
            <main class="content">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=ResumeMakerPage />
                    <Route path=path!("/builder") view=ResumeMakerPage />
                </Routes>
            </main>
        </Router>
    }
}
