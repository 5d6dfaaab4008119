use dioxus::prelude::*;

use storecast_common::identity::Credentials;
use storecast_gateway::error::SIGN_IN_FAILED_NOTICE;
use storecast_gateway::ops;

use super::app::Route;
use super::gateway_api::use_gateway;
use super::session_state::{self, use_session};

#[component]
pub fn LoginView() -> Element {
    let gateway = use_gateway();
    let session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let credentials = match Credentials::from_form(&email.read(), &password.read()) {
            Ok(credentials) => credentials,
            Err(e) => {
                error_msg.set(Some(e.to_string()));
                return;
            }
        };
        error_msg.set(None);
        loading.set(true);
        let gateway = gateway.clone();
        spawn(async move {
            match ops::sign_in(&gateway, &credentials).await {
                Ok(signed_in) => {
                    session_state::sign_in(session, signed_in);
                    nav.replace(Route::Messages {});
                }
                Err(_) => error_msg.set(Some(SIGN_IN_FAILED_NOTICE.to_string())),
            }
            loading.set(false);
        });
    };

    let is_loading = *loading.read();

    rsx! {
        div { class: "auth-screen",
            form { class: "auth-form", onsubmit: submit,
                h1 { "Demo Message" }
                h2 { "Sign in" }

                if let Some(ref err) = *error_msg.read() {
                    div { class: "alert alert-error", "{err}" }
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

                button { r#type: "submit", disabled: is_loading,
                    if is_loading { "Signing in..." } else { "Sign In" }
                }
                p { class: "auth-switch",
                    "No account yet? "
                    Link { to: Route::Register {}, "Create one" }
                }
            }
        }
    }
}
