use dioxus::prelude::*;

use storecast_common::generation::Generation;
use storecast_common::message::{Message, MessageId};
use storecast_common::message_list::{MessageListAction, MessageListState};
use storecast_gateway::error::DELETE_FAILED_NOTICE;
use storecast_gateway::ops;

use super::app::Route;
use super::gateway_api::use_gateway;
use super::prompt;
use super::session_state::use_session;

/// Characters of the body shown in the table before it is cut off.
const BODY_PREVIEW_CHARS: usize = 80;

fn dispatch(mut state: Signal<MessageListState>, action: MessageListAction) {
    let mut current = state.write();
    *current = std::mem::take(&mut *current).apply(action);
}

fn preview(body: &str) -> String {
    if body.chars().count() <= BODY_PREVIEW_CHARS {
        return body.to_string();
    }
    let cut: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}

fn created_label(message: &Message) -> String {
    message
        .date_created
        .with_timezone(&chrono::Local)
        .format("%x %X")
        .to_string()
}

#[component]
pub fn MessagesView() -> Element {
    let gateway = use_gateway();
    let session = use_session();
    let nav = use_navigator();
    let state = use_signal(MessageListState::new);
    let mut reloads = use_signal(|| 0u32);
    // `loads` moves on with every load so only the newest lands; `lifetime`
    // only moves when the screen goes away.
    let loads = use_hook(Generation::new);
    let lifetime = use_hook(Generation::new);

    use_drop({
        let loads = loads.clone();
        let lifetime = lifetime.clone();
        move || {
            loads.advance();
            lifetime.advance();
        }
    });

    let page = use_memo(move || state.read().pager().page());

    // Runs on mount, on every page change and after each delete.
    use_effect({
        let gateway = gateway.clone();
        let generation = loads.clone();
        move || {
            let _ = page();
            let _ = reloads();
            let Some(current) = session.peek().current().cloned() else {
                return;
            };
            let ticket = generation.advance();
            dispatch(state, MessageListAction::LoadStarted);
            let pager = state.peek().pager();
            let gateway = gateway.clone();
            let generation = generation.clone();
            spawn(async move {
                let result = ops::load_message_page(&gateway, &current, pager).await;
                if !generation.is_current(ticket) {
                    return;
                }
                let action = match result {
                    Ok(loaded) => MessageListAction::Loaded {
                        total_count: loaded.total_count,
                        messages: loaded.messages,
                    },
                    Err(_) => MessageListAction::LoadFailed,
                };
                dispatch(state, action);
            });
        }
    });

    let delete = use_callback({
        let gateway = gateway.clone();
        let generation = lifetime.clone();
        move |id: MessageId| {
            if !prompt::confirm("Are you sure you want to delete this message?") {
                return;
            }
            let Some(current) = session.peek().current().cloned() else {
                return;
            };
            let ticket = generation.ticket();
            dispatch(state, MessageListAction::DeleteStarted(id.clone()));
            let gateway = gateway.clone();
            let generation = generation.clone();
            spawn(async move {
                let result = ops::delete_message(&gateway, &current, &id).await;
                if !generation.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(()) => {
                        dispatch(state, MessageListAction::Deleted(id));
                        reloads += 1;
                    }
                    Err(_) => {
                        dispatch(state, MessageListAction::DeleteFailed(id));
                        prompt::alert(DELETE_FAILED_NOTICE);
                    }
                }
            });
        }
    });

    let view = state.read().clone();

    rsx! {
        div { class: "messages-view",
            div { class: "view-header",
                h1 { "Messages" }
                button {
                    class: "btn-primary",
                    onclick: move |_| { nav.push(Route::CreateMessage {}); },
                    "Create Message"
                }
            }

            if view.is_loading() {
                div { class: "empty-state", "Loading messages..." }
            } else if view.messages().is_empty() {
                div { class: "empty-state", "No messages found. Create your first message!" }
            } else {
                table { class: "message-table",
                    thead {
                        tr {
                            th { "ID" }
                            th { "Date Created" }
                            th { "Title" }
                            th { "Body" }
                            th { class: "actions", "Actions" }
                        }
                    }
                    tbody {
                        for message in view.messages().iter().cloned() {
                            {
                                let deleting = view.is_deleting(&message.id);
                                let id = message.id.clone();
                                let details = message.details();
                                rsx! {
                                    tr { key: "{message.id}",
                                        td { class: "mono", "{message.id.short()}" }
                                        td { "{created_label(&message)}" }
                                        td { class: "title", "{message.title}" }
                                        td { class: "body", "{preview(&message.body)}" }
                                        td { class: "actions",
                                            button {
                                                class: "btn-link",
                                                onclick: move |_| prompt::alert(&details),
                                                "View"
                                            }
                                            button {
                                                class: "btn-link btn-danger",
                                                disabled: deleting,
                                                onclick: move |_| delete.call(id.clone()),
                                                if deleting { "Deleting..." } else { "Delete" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            // Kept visible on an emptied trailing page so the operator can step back.
            if !view.is_loading() && (view.pager().total_count() > 0 || view.pager().page() > 1) {
                div { class: "pager",
                    button {
                        disabled: !view.pager().has_previous(),
                        onclick: move |_| dispatch(state, MessageListAction::PreviousPage),
                        "Previous"
                    }
                    span { "{view.page_label()}" }
                    button {
                        disabled: !view.pager().has_next(),
                        onclick: move |_| dispatch(state, MessageListAction::NextPage),
                        "Next"
                    }
                }
            }
        }
    }
}
