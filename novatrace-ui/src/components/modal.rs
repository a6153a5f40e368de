//! Preformatted Modal
//!
//! Overlay showing a raw JSON payload.

use leptos::*;

use crate::state::global::GlobalState;

/// Modal bound to `GlobalState::detail`; hidden while it is `None`
#[component]
pub fn PreformattedModal() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let close_state = state.clone();

    view! {
        {move || {
            state.detail.get().map(|detail| {
                let close_state = close_state.clone();
                view! {
                    <div class="fixed inset-0 z-40 bg-gray-900/80 flex items-center justify-center p-4">
                        <div class="bg-gray-800 rounded-xl shadow-xl w-full max-w-3xl max-h-[80vh] flex flex-col">
                            <div class="flex items-center justify-between px-6 py-4 border-b border-gray-700">
                                <h3 class="text-lg font-semibold">{detail.title}</h3>
                                <button
                                    class="text-gray-400 hover:text-white"
                                    on:click=move |_| close_state.close_detail()
                                >
                                    "✕"
                                </button>
                            </div>
                            <pre class="flex-1 overflow-auto p-6 text-sm text-gray-200 font-mono whitespace-pre">
                                {detail.body}
                            </pre>
                        </div>
                    </div>
                }
            })
        }}
    }
}
