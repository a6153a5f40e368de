//! Home Page
//!
//! Landing view of the `home` microfrontend.

use leptos::*;

use crate::frame::GuestNavigator;

#[component]
pub fn Home() -> impl IntoView {
    let navigator = use_context::<GuestNavigator>().expect("GuestNavigator not found");
    let open_dashboard = move |_| navigator.navigate_host("/novatrace");

    view! {
        <div class="flex flex-col items-center justify-center min-h-[70vh] text-center space-y-6">
            <div class="text-6xl">"🔭"</div>
            <h1 class="text-4xl font-bold">"NovaTrace"</h1>
            <p class="text-gray-400 max-w-xl">
                "Transient alerts from the community brokers, grouped into events and \
                 tracked per broker. Open the dashboard to browse the latest alerts."
            </p>
            <button
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                on:click=open_dashboard
            >
                "Open Dashboard"
            </button>
        </div>
    }
}
