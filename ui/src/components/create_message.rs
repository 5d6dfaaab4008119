use dioxus::prelude::*;

use storecast_common::compose::{ComposeAction, ComposeState};
use storecast_common::generation::Generation;
use storecast_common::targeting::TargetingMode;
use storecast_gateway::ops;

use super::app::Route;
use super::gateway_api::{targeting_config, use_gateway};
use super::prompt;
use super::session_state::use_session;
use super::store_picker::StorePicker;

pub fn dispatch(mut state: Signal<ComposeState>, action: ComposeAction) {
    let mut current = state.write();
    *current = std::mem::take(&mut *current).apply(action);
}

#[component]
pub fn CreateMessageView() -> Element {
    let gateway = use_gateway();
    let session = use_session();
    let nav = use_navigator();
    let state = use_signal(|| ComposeState::new(targeting_config()));
    let lifetime = use_hook(Generation::new);

    use_drop({
        let lifetime = lifetime.clone();
        move || {
            lifetime.advance();
        }
    });

    // Active stores for the picker and "send to all".
    use_effect({
        let gateway = gateway.clone();
        let lifetime = lifetime.clone();
        move || {
            let Some(current) = session.peek().current().cloned() else {
                return;
            };
            let ticket = lifetime.ticket();
            let gateway = gateway.clone();
            let lifetime = lifetime.clone();
            spawn(async move {
                let Ok(directory) = ops::fetch_active_stores(&gateway, &current).await else {
                    return;
                };
                if lifetime.is_current(ticket) {
                    dispatch(state, ComposeAction::DirectoryLoaded(directory));
                }
            });
        }
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = state.peek().clone();
        let current = session.peek().current().cloned();
        if let Err(e) = draft.prepare(current.as_ref()) {
            prompt::alert(&e.to_string());
            return;
        }
        dispatch(state, ComposeAction::SubmitStarted);
        let gateway = gateway.clone();
        let ticket = lifetime.ticket();
        let lifetime = lifetime.clone();
        spawn(async move {
            let result = ops::submit_message(&gateway, current.as_ref(), &draft).await;
            if !lifetime.is_current(ticket) {
                return;
            }
            match result {
                Ok(()) => {
                    dispatch(state, ComposeAction::SubmitSucceeded);
                    nav.push(Route::Messages {});
                }
                Err(e) => {
                    dispatch(state, ComposeAction::SubmitFailed);
                    prompt::alert(&e.notice());
                }
            }
        });
    };

    let cancel_action = move |_| {
        if prompt::confirm("Are you sure you want to cancel? All unsaved changes will be lost.") {
            dispatch(state, ComposeAction::Reset);
            nav.push(Route::Messages {});
        }
    };

    let view = state.read().clone();
    let selected = view.targeting().selected().to_vec();
    let selected_count = selected.len();

    rsx! {
        div { class: "create-message",
            h1 { "Create Message" }

            form { onsubmit: submit,
                div { class: "form-group",
                    label { r#for: "subject", "Subject" }
                    input {
                        id: "subject",
                        r#type: "text",
                        value: "{view.title}",
                        oninput: move |evt| dispatch(state, ComposeAction::SetTitle(evt.value())),
                    }
                }
                div { class: "form-group",
                    label { r#for: "message", "Message" }
                    textarea {
                        id: "message",
                        rows: "6",
                        value: "{view.body}",
                        oninput: move |evt| dispatch(state, ComposeAction::SetBody(evt.value())),
                    }
                }

                div { class: "store-selection",
                    h2 { "Store Selection" }
                    div { class: "selection-modes",
                        button {
                            r#type: "button",
                            class: if view.mode() == TargetingMode::Manual { "mode active" } else { "mode" },
                            onclick: move |_| dispatch(state, ComposeAction::EnterManual),
                            "Enter list of stores"
                        }
                        button {
                            r#type: "button",
                            class: if view.mode() == TargetingMode::List { "mode active" } else { "mode" },
                            onclick: move |_| dispatch(state, ComposeAction::EnterList),
                            "Choose stores from list"
                        }
                        button {
                            r#type: "button",
                            class: if view.mode() == TargetingMode::All { "mode active" } else { "mode" },
                            onclick: move |_| dispatch(state, ComposeAction::SendToAll),
                            "Send to all stores"
                        }
                        button {
                            r#type: "button",
                            class: "mode",
                            onclick: cancel_action,
                            "Cancel action"
                        }
                    }

                    if view.mode() == TargetingMode::Manual {
                        div { class: "manual-entry",
                            label { "Enter store codes (comma-separated)" }
                            div { class: "form-row",
                                input {
                                    r#type: "text",
                                    placeholder: "e.g., ST001, ST002, ST003",
                                    value: "{view.manual_input}",
                                    oninput: move |evt| dispatch(state, ComposeAction::SetManualInput(evt.value())),
                                }
                                button {
                                    r#type: "button",
                                    onclick: move |_| dispatch(state, ComposeAction::AddManualCodes),
                                    "Add"
                                }
                            }
                        }
                    }

                    if !selected.is_empty() {
                        div { class: "selected-stores",
                            h3 { "Selected Stores ({selected_count})" }
                            div { class: "chips",
                                for (index, code) in selected.iter().cloned().enumerate() {
                                    span { key: "{index}-{code}", class: "chip",
                                        "{code}"
                                        button {
                                            r#type: "button",
                                            class: "chip-remove",
                                            onclick: move |_| dispatch(state, ComposeAction::Remove(code.clone())),
                                            "×"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                div { class: "form-actions",
                    button {
                        r#type: "submit",
                        class: "btn-primary",
                        disabled: view.submitting,
                        if view.submitting { "Creating..." } else { "Create Message" }
                    }
                    button {
                        r#type: "button",
                        onclick: move |_| { nav.push(Route::Messages {}); },
                        "Cancel"
                    }
                }
            }

            if view.picker_open {
                StorePicker { state }
            }
        }
    }
}
