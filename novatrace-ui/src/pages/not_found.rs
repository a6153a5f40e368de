//! 404 Not Found page

use leptos::*;

/// Shown by the shell for unmatched host paths and by a microfrontend for
/// unknown internal routes.
///
/// Without `on_home` the link is a plain anchor to `/`.
#[component]
pub fn NotFound(#[prop(optional, into)] on_home: Option<Callback<()>>) -> impl IntoView {
    let action = match on_home {
        Some(on_home) => view! {
            <button
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                on:click=move |_| on_home.call(())
            >
                "Go Home"
            </button>
        }
        .into_view(),
        None => view! {
            <a
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go Home"
            </a>
        }
        .into_view(),
    };

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"Nothing is mounted at this address."</p>
            {action}
        </div>
    }
}
