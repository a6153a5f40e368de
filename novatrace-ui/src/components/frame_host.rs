//! Frame Host Component
//!
//! Mounts the microfrontend for the current shell route in an iframe and
//! follows navigation messages posted by that frame.

use leptos::*;
use leptos_router::*;
use novatrace::frame::{
    FrameWindow, HostFrameResolver, RouteTable, ShellManifest, ShellRouter, ShellView, Transition,
};

use crate::frame::{BrowserWindow, WindowMessageSource};
use crate::pages::NotFound;

/// What the host area shows
#[derive(Clone, Debug, PartialEq)]
enum Hosted {
    Frame(String),
    NotFound,
    Unavailable(String),
}

/// Iframe host driven by [`ShellView`], resolving against `table` in the
/// manifest's environment
#[component]
pub fn FrameHost(table: RouteTable, manifest: ShellManifest) -> impl IntoView {
    let location = use_location();
    let navigate = use_navigate();
    let (hosted, set_hosted) = create_signal(Hosted::NotFound);


    let setup = BrowserWindow::current()
        .ok_or_else(|| "no browser window".to_string())
        .and_then(|window| window.origin().map_err(|e| e.to_string()))
        .and_then(|origin| {
            WindowMessageSource::current()
                .map(|source| (origin, source))
                .ok_or_else(|| "no browser window".to_string())
        });

    let (shell_origin, source) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            web_sys::console::error_1(&format!("Frame host unavailable: {}", e).into());
            set_hosted.set(Hosted::Unavailable(e));
            return view! { <HostedView hosted=hosted /> }.into_view();
        }
    };

    let policy = manifest.origin_policy(&table, &shell_origin);
    let resolver = HostFrameResolver::new(table, manifest.environment);
    let view_state = store_value(ShellView::new(ShellRouter::new(resolver)));

    let apply = move |transition: Option<Transition>| match transition {
        Some(Transition::Reload { src }) => set_hosted.set(Hosted::Frame(src)),
        Some(Transition::NotFound) => set_hosted.set(Hosted::NotFound),
        Some(Transition::Unchanged) | Some(Transition::NotMounted) | None => {}
    };

    let initial = location.pathname.get_untracked();
    let on_navigate = move |path: String| navigate(&path, Default::default());
    apply(view_state.try_update_value(|view| view.mount(&initial, &source, policy, on_navigate)));

    // Router location -> frame src. The first run sees the mount path and
    // reports `Unchanged`.
    create_effect(move |_| {
        let path = location.pathname.get();
        apply(view_state.try_update_value(|view| view.show(&path)));
    });

    on_cleanup(move || {
        view_state.try_update_value(|view| view.unmount());
    });

    view! { <HostedView hosted=hosted /> }.into_view()
}

#[component]
fn HostedView(hosted: ReadSignal<Hosted>) -> impl IntoView {
    // Re-rendering on every change replaces the iframe element, so a new
    // src is a full reload of the microfrontend.
    move || match hosted.get() {
        Hosted::Frame(src) => view! {
            <iframe
                src=src
                title="NovaTrace microfrontend"
                class="w-full h-[calc(100vh-4rem)] border-0 bg-gray-900"
            />
        }
        .into_view(),
        Hosted::NotFound => view! { <NotFound /> }.into_view(),
        Hosted::Unavailable(reason) => view! {
            <div class="p-8 text-red-400">{format!("Cannot host microfrontends: {}", reason)}</div>
        }
        .into_view(),
    }
}
