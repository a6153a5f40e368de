//! Alert Card Component
//!
//! One alert in the NovaTrace list.

use leptos::*;
use novatrace::records::Alert;

use crate::state::global::GlobalState;

#[component]
pub fn AlertCard(alert: Alert) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let title = format!("{} · {}", alert.broker, alert.object_id.as_deref().unwrap_or(alert.id.as_str()));
    let raw_title = format!("Alert {}", alert.id);
    let raw = alert.pretty_raw();

    let magnitude = alert.magnitude.map(|m| match alert.magnitude_error {
        Some(err) => format!("{:.2} ± {:.2}", m, err),
        None => format!("{:.2}", m),
    });

    view! {
        <div class="bg-gray-800 rounded-lg p-4 hover:bg-gray-750 transition-colors">
            <div class="flex items-start justify-between">
                <div>
                    <h3 class="font-semibold text-white">{title}</h3>
                    <p class="text-sm text-gray-400">
                        {alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()}
                    </p>
                </div>
                {alert.classification.clone().map(|class| view! {
                    <span class="px-2 py-1 text-xs rounded bg-primary-700 text-white">{class}</span>
                })}
            </div>

            <dl class="grid grid-cols-2 md:grid-cols-4 gap-2 mt-3 text-sm">
                <Field label="Position" value=alert.coordinates() />
                <Field label="Magnitude" value=magnitude />
                <Field label="Band" value=alert.band.clone() />
                <Field label="Object" value=alert.object_id.clone() />
            </dl>

            <div class="flex items-center justify-between mt-3">
                <div class="flex flex-wrap gap-1">
                    {alert.tags.iter().map(|tag| view! {
                        <span class="px-2 py-0.5 text-xs rounded-full bg-gray-700 text-gray-300">{tag.clone()}</span>
                    }).collect_view()}
                </div>
                <button
                    class="text-sm text-primary-400 hover:text-primary-300"
                    on:click=move |_| state.show_detail(raw_title.clone(), raw.clone())
                >
                    "Raw payload"
                </button>
            </div>
        </div>
    }
}

#[component]
fn Field(label: &'static str, value: Option<String>) -> impl IntoView {
    view! {
        <div>
            <dt class="text-gray-500">{label}</dt>
            <dd class="text-gray-200">{value.unwrap_or_else(|| "-".to_string())}</dd>
        </div>
    }
}
