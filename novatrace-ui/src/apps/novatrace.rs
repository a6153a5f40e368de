//! NovaTrace App Root
//!
//! Internal routes are picked from the navigator's current sub-path instead
//! of a client-side router: inside the shell the frame is reloaded at the
//! new URL, so the page only ever renders the route it was loaded at (or the
//! one just clicked, until the reload lands).

use leptos::*;
use novatrace::frame::ShellManifest;

use crate::api::load_manifest;
use crate::components::{GuestNav, Loading, PreformattedModal, Toast};
use crate::frame::provide_guest_navigator;
use crate::pages::{Alerts, Events, NotFound, Status};
use crate::settings;
use crate::state::global::provide_global_state;

pub const NOVATRACE_ID: &str = "novatrace";

#[component]
pub fn NovaTraceApp() -> impl IntoView {
    let manifest = create_local_resource(|| (), |_| load_manifest(settings::shell_api_base()));

    view! {
        <Suspense fallback=|| view! { <Loading /> }>
            {move || manifest.get().map(|manifest| view! { <NovaTraceRoot manifest=manifest /> })}
        </Suspense>
    }
}

#[component]
fn NovaTraceRoot(manifest: ShellManifest) -> impl IntoView {
    let Some(navigator) = provide_guest_navigator(NOVATRACE_ID, &manifest) else {
        return view! { <p class="p-8 text-red-400">"NovaTrace microfrontend is not configured."</p> }
            .into_view();
    };
    let state = provide_global_state();

    let current = navigator.current();
    let home = navigator.clone();

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <main class="flex-1 container mx-auto px-4 py-6">
                <GuestNav links=vec![("/", "Alerts"), ("/status", "Status"), ("/events", "Events")] />

                {move || match current.get().as_str() {
                    "/" => view! { <Alerts /> }.into_view(),
                    "/status" => view! { <Status /> }.into_view(),
                    "/events" => view! { <Events /> }.into_view(),
                    _ => {
                        let home = home.clone();
                        view! { <NotFound on_home=move |_| home.navigate("/") /> }.into_view()
                    }
                }}
            </main>

            <footer class="border-t border-gray-800 py-3 px-4 text-sm text-gray-500">
                {move || {
                    state.last_sync.get()
                        .and_then(chrono::DateTime::from_timestamp_millis)
                        .map(|dt| format!("Last sync: {}", dt.format("%H:%M:%S")))
                        .unwrap_or_else(|| "Not synced".to_string())
                }}
            </footer>

            <PreformattedModal />
            <Toast />
        </div>
    }
    .into_view()
}
