//! Events Page
//!
//! Events grouping related alerts, with their payloads on demand.

use leptos::*;

use crate::api;
use crate::components::ListSkeleton;
use crate::state::global::GlobalState;

#[component]
pub fn Events() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);
            match api::fetch_events().await {
                Ok(mut events) => {
                    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                    state.events.set(events);
                    state.mark_synced();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch events: {}", e).into());
                    state.show_error(&format!("Could not load events: {}", e));
                }
            }
            state.loading.set(false);
        });
    });

    let list_state = state.clone();

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Events"</h1>

            {move || {
                if list_state.loading.get() {
                    return view! { <ListSkeleton /> }.into_view();
                }

                let state = list_state.clone();
                list_state.events.get().into_iter().map(move |event| {
                    let state = state.clone();
                    let title = event.title.clone().unwrap_or_else(|| event.id.clone());
                    let detail_title = format!("Event {}", event.id);
                    let payload = event.pretty_payload();
                    view! {
                        <div class="bg-gray-800 rounded-lg p-4 flex items-start justify-between">
                            <div>
                                <h3 class="font-semibold">{title}</h3>
                                <p class="text-sm text-gray-400">
                                    {format!(
                                        "{} · {} · {} alert(s)",
                                        event.source,
                                        event.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                                        event.alert_ids.len()
                                    )}
                                </p>
                                {event.kind.map(|kind| view! {
                                    <span class="inline-block mt-2 px-2 py-0.5 text-xs rounded bg-gray-700">{kind}</span>
                                })}
                            </div>
                            <button
                                class="text-sm text-primary-400 hover:text-primary-300"
                                on:click=move |_| state.show_detail(detail_title.clone(), payload.clone())
                            >
                                "Payload"
                            </button>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}
