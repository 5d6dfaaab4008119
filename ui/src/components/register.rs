use dioxus::prelude::*;

use storecast_common::identity::Registration;
use storecast_gateway::error::REGISTER_FAILED_NOTICE;
use storecast_gateway::ops;

use super::app::Route;
use super::gateway_api::use_gateway;
use super::session_state::{self, use_session};

#[component]
pub fn RegisterView() -> Element {
    let gateway = use_gateway();
    let session = use_session();
    let nav = use_navigator();
    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error_msg = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let registration = match Registration::from_form(
            &full_name.read(),
            &email.read(),
            &password.read(),
            &confirm.read(),
        ) {
            Ok(registration) => registration,
            Err(e) => {
                error_msg.set(Some(e.to_string()));
                return;
            }
        };
        error_msg.set(None);
        loading.set(true);
        let gateway = gateway.clone();
        spawn(async move {
            match ops::register(&gateway, &registration).await {
                Ok(Some(signed_in)) => {
                    session_state::sign_in(session, signed_in);
                    nav.replace(Route::Messages {});
                }
                Ok(None) => notice.set(Some(
                    "Account created. Check your email to confirm it, then sign in.".into(),
                )),
                Err(_) => error_msg.set(Some(REGISTER_FAILED_NOTICE.to_string())),
            }
            loading.set(false);
        });
    };

    let is_loading = *loading.read();

    rsx! {
        div { class: "auth-screen",
            form { class: "auth-form", onsubmit: submit,
                h1 { "Demo Message" }
                h2 { "Create account" }

                if let Some(ref err) = *error_msg.read() {
                    div { class: "alert alert-error", "{err}" }
                }
                if let Some(ref msg) = *notice.read() {
                    div { class: "alert alert-info", "{msg}" }
                }

                div { class: "form-group",
                    label { r#for: "full-name", "Full name" }
                    input {
                        id: "full-name",
                        r#type: "text",
                        value: "{full_name}",
                        oninput: move |evt| full_name.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { r#for: "confirm-password", "Confirm password" }
                    input {
                        id: "confirm-password",
                        r#type: "password",
                        value: "{confirm}",
                        oninput: move |evt| confirm.set(evt.value()),
                    }
                }

                button { r#type: "submit", disabled: is_loading,
                    if is_loading { "Creating account..." } else { "Create Account" }
                }
                p { class: "auth-switch",
                    "Already registered? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
