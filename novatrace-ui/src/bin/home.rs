//! Home microfrontend bundle

use leptos::*;
use novatrace_ui::apps::HomeApp;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <HomeApp /> });
}
