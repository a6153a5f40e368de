//! Shell App Root
//!
//! Owns the browser URL. Every host route renders the header and one
//! microfrontend frame. The route table comes from the server that served
//! this page.

use leptos::*;
use leptos_router::*;

use crate::api::load_manifest;
use crate::components::{FrameHost, Loading, ShellNav};

#[component]
pub fn ShellApp() -> impl IntoView {
    let manifest = create_local_resource(|| (), |_| load_manifest(String::new()));

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Suspense fallback=|| view! { <Loading /> }>
                    {move || manifest.get().map(|manifest| {
                        let table = manifest.route_table().unwrap_or_default();
                        view! {
                            <ShellNav table=table.clone() />
                            <main class="flex-1">
                                <FrameHost table=table manifest=manifest />
                            </main>
                        }
                    })}
                </Suspense>
            </div>
        </Router>
    }
}
