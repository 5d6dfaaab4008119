use dioxus::prelude::*;

use storecast_common::compose::{ComposeAction, ComposeState};

use super::create_message::dispatch;

/// Modal list of active stores with a search box; ticking a row toggles it.
#[component]
pub fn StorePicker(state: Signal<ComposeState>) -> Element {
    let view = state.read();
    let rows = view.picker_rows();
    let query = view.picker_query.clone();
    let no_stores = view.directory().is_empty();
    drop(view);

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                div { class: "modal-header",
                    h2 { "Select Stores" }
                    button {
                        class: "btn-close",
                        onclick: move |_| dispatch(state, ComposeAction::ClosePicker),
                        "×"
                    }
                }

                input {
                    class: "picker-search",
                    r#type: "search",
                    placeholder: "Search by code, name or area...",
                    value: "{query}",
                    oninput: move |evt| dispatch(state, ComposeAction::SetPickerQuery(evt.value())),
                }

                div { class: "picker-rows",
                    if no_stores {
                        p { class: "empty-state", "No active stores." }
                    } else if rows.is_empty() {
                        p { class: "empty-state", "No stores match \"{query}\"." }
                    }
                    for (code, text, checked) in rows {
                        label { key: "{code}", class: "picker-row",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onchange: move |_| dispatch(state, ComposeAction::Toggle(code.clone())),
                            }
                            span { "{text}" }
                        }
                    }
                }

                div { class: "modal-footer",
                    button {
                        class: "btn-primary",
                        onclick: move |_| dispatch(state, ComposeAction::ClosePicker),
                        "Done"
                    }
                }
            }
        }
    }
}
