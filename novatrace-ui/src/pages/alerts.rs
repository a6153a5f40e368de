//! Alerts Page
//!
//! Root view of the NovaTrace microfrontend: the latest alerts with broker
//! and tag filters.

use leptos::*;
use novatrace::records::AlertFilter;

use crate::api;
use crate::components::{AlertCard, ListSkeleton};
use crate::state::global::GlobalState;

#[component]
pub fn Alerts() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch alerts on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);
            match api::fetch_alerts().await {
                Ok(alerts) => {
                    state.alerts.set(alerts);
                    state.mark_synced();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch alerts: {}", e).into());
                    state.show_error(&format!("Could not load alerts: {}", e));
                }
            }
            state.loading.set(false);
        });
    });

    let broker_options = {
        let state = state.clone();
        move || state.alerts.with(|alerts| AlertFilter::broker_options(alerts))
    };
    let tag_options = {
        let state = state.clone();
        move || state.alerts.with(|alerts| AlertFilter::tag_options(alerts))
    };

    let broker_state = state.clone();
    let tag_state = state.clone();
    let list_state = state.clone();

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Alerts"</h1>
                    <p class="text-gray-400 mt-1">"Most recent first"</p>
                </div>

                <div class="flex items-center space-x-3">
                    <FilterSelect
                        label="Broker"
                        options=Signal::derive(broker_options)
                        on_change=Callback::new(move |value| broker_state.select_broker(value))
                    />
                    <FilterSelect
                        label="Tag"
                        options=Signal::derive(tag_options)
                        on_change=Callback::new(move |value| tag_state.select_tag(value))
                    />
                </div>
            </div>

            {move || {
                if list_state.loading.get() {
                    return view! { <ListSkeleton count=5 /> }.into_view();
                }

                let alerts = list_state.visible_alerts();
                if alerts.is_empty() {
                    view! {
                        <p class="text-gray-400 text-center py-12">"No alerts match the current filters."</p>
                    }
                    .into_view()
                } else {
                    view! {
                        <div class="space-y-3">
                            {alerts.into_iter().map(|alert| view! { <AlertCard alert=alert /> }).collect_view()}
                        </div>
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

/// Dropdown with an "All" entry mapped to the empty string
#[component]
fn FilterSelect(
    label: &'static str,
    #[prop(into)]
    options: Signal<Vec<String>>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="flex items-center space-x-2 text-sm text-gray-400">
            <span>{label}</span>
            <select
                class="bg-gray-800 border border-gray-700 rounded-lg px-3 py-2 text-white"
                on:change=move |ev| on_change.call(event_target_value(&ev))
            >
                <option value="">"All"</option>
                {move || options.get().into_iter().map(|option| view! {
                    <option value=option.clone()>{option}</option>
                }).collect_view()}
            </select>
        </label>
    }
}
