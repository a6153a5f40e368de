//! Status Page
//!
//! Connectivity of each alert broker.

use leptos::*;
use novatrace::records::BrokerState;

use crate::api;
use crate::components::Loading;
use crate::state::global::GlobalState;

#[component]
pub fn Status() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);
            match api::fetch_broker_status().await {
                Ok(brokers) => {
                    state.brokers.set(brokers);
                    state.mark_synced();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch status: {}", e).into());
                    state.show_error(&format!("Could not load broker status: {}", e));
                }
            }
            state.loading.set(false);
        });
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Broker Status"</h1>

            {move || {
                if state.loading.get() {
                    return view! { <Loading /> }.into_view();
                }

                view! {
                    <table class="w-full text-left bg-gray-800 rounded-lg overflow-hidden">
                        <thead class="bg-gray-700 text-gray-300 text-sm">
                            <tr>
                                <th class="px-4 py-3">"Broker"</th>
                                <th class="px-4 py-3">"State"</th>
                                <th class="px-4 py-3">"Last alert"</th>
                                <th class="px-4 py-3 text-right">"Alerts (1h)"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {state.brokers.get().into_iter().map(|row| {
                                let (label, class) = match row.state {
                                    BrokerState::Online => ("Online", "text-green-400"),
                                    BrokerState::Degraded => ("Degraded", "text-yellow-400"),
                                    BrokerState::Offline => ("Offline", "text-red-400"),
                                };
                                let last = row
                                    .last_alert_at
                                    .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
                                    .unwrap_or_else(|| "never".to_string());
                                view! {
                                    <tr class="border-t border-gray-700">
                                        <td class="px-4 py-3 font-medium">{row.broker}</td>
                                        <td class=format!("px-4 py-3 {}", class)>{label}</td>
                                        <td class="px-4 py-3 text-gray-400">{last}</td>
                                        <td class="px-4 py-3 text-right">{row.alerts_last_hour}</td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }
                .into_view()
            }}
        </div>
    }
}
