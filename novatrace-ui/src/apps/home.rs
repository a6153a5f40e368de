//! Home App Root

use leptos::*;
use novatrace::frame::ShellManifest;

use crate::api::load_manifest;
use crate::components::Loading;
use crate::frame::provide_guest_navigator;
use crate::pages::Home;
use crate::settings;

pub const HOME_ID: &str = "home";

#[component]
pub fn HomeApp() -> impl IntoView {
    let manifest = create_local_resource(|| (), |_| load_manifest(settings::shell_api_base()));

    view! {
        <Suspense fallback=|| view! { <Loading /> }>
            {move || manifest.get().map(|manifest| view! { <HomeRoot manifest=manifest /> })}
        </Suspense>
    }
}

#[component]
fn HomeRoot(manifest: ShellManifest) -> impl IntoView {
    if provide_guest_navigator(HOME_ID, &manifest).is_none() {
        return view! { <p class="p-8 text-red-400">"Home microfrontend is not configured."</p> }
            .into_view();
    }

    view! {
        <div class="min-h-screen bg-gray-900 text-white">
            <main class="container mx-auto px-4 py-8">
                <Home />
            </main>
        </div>
    }
    .into_view()
}
