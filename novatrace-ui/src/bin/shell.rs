//! NovaTrace shell bundle

use leptos::*;
use novatrace_ui::apps::ShellApp;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <ShellApp /> });
}
