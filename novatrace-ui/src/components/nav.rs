//! Navigation Components
//!
//! `ShellNav` is the shell's header and uses the shell router directly.
//! `GuestNav` runs inside a microfrontend and routes every click through
//! the [`GuestNavigator`], so an embedded frame never changes its own URL.

use leptos::*;
use leptos_router::*;
use novatrace::frame::RouteTable;

use crate::frame::GuestNavigator;

/// Shell header with one link per microfrontend
#[component]
pub fn ShellNav(table: RouteTable) -> impl IntoView {
    let links = table
        .entries()
        .iter()
        .map(|entry| (entry.host_prefix.clone(), entry.title.clone()))
        .collect::<Vec<_>>();

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🔭"</span>
                        <span class="text-xl font-bold text-white">"NovaTrace"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        {links.into_iter().map(|(href, label)| view! {
                            <A
                                href=href
                                class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                                active_class="bg-gray-700 text-white"
                                exact=true
                            >
                                {label}
                            </A>
                        }).collect_view()}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// In-frame tab bar over the microfrontend's internal routes
#[component]
pub fn GuestNav(
    /// `(sub_path, label)` pairs
    links: Vec<(&'static str, &'static str)>,
) -> impl IntoView {
    let navigator = use_context::<GuestNavigator>().expect("GuestNavigator not found");
    let current = navigator.current();

    view! {
        <nav class="flex items-center space-x-1 border-b border-gray-700 mb-6">
            {links.into_iter().map(|(sub_path, label)| {
                let navigator = navigator.clone();
                let href = navigator.microfrontend().host_path(sub_path);
                let class = move || {
                    if current.get() == sub_path {
                        "px-4 py-2 text-white border-b-2 border-primary-500"
                    } else {
                        "px-4 py-2 text-gray-400 hover:text-white"
                    }
                };
                view! {
                    <a
                        href=href
                        class=class
                        on:click=move |ev| {
                            ev.prevent_default();
                            navigator.navigate(sub_path);
                        }
                    >
                        {label}
                    </a>
                }
            }).collect_view()}
        </nav>
    }
}
