use dioxus::prelude::*;

use storecast_common::access::{gate, GateDecision, Screen, MENU};
use storecast_common::identity::SessionContext;
use storecast_gateway::ops;

use super::coming_soon::ComingSoon;
use super::create_message::CreateMessageView;
use super::gateway_api::{connect, use_gateway, AppGateway};
use super::login::LoginView;
use super::messages_view::MessagesView;
use super::register::RegisterView;
use super::session_state::{self, use_session};

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(AppLayout)]
    #[route("/messages")]
    Messages {},
    #[route("/messages/create")]
    CreateMessage {},
    #[route("/stores")]
    Stores {},
    #[route("/products")]
    Products {},
    #[route("/suppliers")]
    Suppliers {},
    #[route("/credits")]
    Credits {},
    #[route("/returns")]
    Returns {},
    #[route("/reports")]
    Reports {},
    #[route("/service-status")]
    ServiceStatus {},
    #[route("/admin")]
    Admin {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    fn screen(&self) -> Screen {
        match self {
            Route::Root {} | Route::NotFound { .. } => Screen::Root,
            Route::Login {} => Screen::Login,
            Route::Register {} => Screen::Register,
            Route::Messages {} => Screen::Messages,
            Route::CreateMessage {} => Screen::CreateMessage,
            Route::Stores {} => Screen::Stores,
            Route::Products {} => Screen::Products,
            Route::Suppliers {} => Screen::Suppliers,
            Route::Credits {} => Screen::Credits,
            Route::Returns {} => Screen::Returns,
            Route::Reports {} => Screen::Reports,
            Route::ServiceStatus {} => Screen::ServiceStatus,
            Route::Admin {} => Screen::Admin,
        }
    }
}

impl From<Screen> for Route {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Root => Route::Root {},
            Screen::Login => Route::Login {},
            Screen::Register => Route::Register {},
            Screen::Messages => Route::Messages {},
            Screen::CreateMessage => Route::CreateMessage {},
            Screen::Stores => Route::Stores {},
            Screen::Products => Route::Products {},
            Screen::Suppliers => Route::Suppliers {},
            Screen::Credits => Route::Credits {},
            Screen::Returns => Route::Returns {},
            Screen::Reports => Route::Reports {},
            Screen::ServiceStatus => Route::ServiceStatus {},
            Screen::Admin => Route::Admin {},
        }
    }
}

#[component]
pub fn App() -> Element {
    match use_hook(connect) {
        Ok(gateway) => rsx! { Console { gateway } },
        Err(e) => rsx! {
            div { class: "startup-error",
                h1 { "Demo Message" }
                p { "The data service is not configured: {e}" }
            }
        },
    }
}

#[component]
fn Console(gateway: AppGateway) -> Element {
    use_context_provider(|| gateway);
    let session = use_context_provider(|| {
        Signal::new(SessionContext::restored(session_state::load_saved()))
    });
    use_session_check(session);

    rsx! { Router::<Route> {} }
}

/// Re-validate a session restored from storage; drop it if the token is dead.
fn use_session_check(mut session: Signal<SessionContext>) {
    let gateway = use_gateway();
    use_effect(move || {
        let Some(saved) = session.peek().current().cloned() else {
            return;
        };
        let token = saved.access_token.clone();
        let gateway = gateway.clone();
        spawn(async move {
            // A Log Out or fresh sign-in during the check wins over its outcome.
            match ops::restore_session(&gateway, saved).await {
                Ok(fresh) => {
                    if session.write().refresh(&token, fresh.clone()) {
                        session_state::persist(&fresh);
                    }
                }
                Err(e) => {
                    tracing::info!("Saved session rejected: {e}");
                    if session.write().revoke(&token).is_some() {
                        session_state::clear_saved();
                    }
                }
            }
        });
    });
}

/// Apply the route gate; `Some(element)` means the screen must not render.
fn use_route_gate(route: &Route, session: Signal<SessionContext>) -> Option<Element> {
    let nav = use_navigator();
    match gate(route.screen(), session.read().current()) {
        GateDecision::Render(_) => None,
        GateDecision::Redirect(target) => {
            nav.replace(Route::from(target));
            Some(rsx! {})
        }
    }
}

#[component]
fn AppLayout() -> Element {
    let mut session = use_session();
    let gateway = use_gateway();
    let route = use_route::<Route>();
    let nav = use_navigator();

    if let Some(redirect) = use_route_gate(&route, session) {
        return redirect;
    }

    let display_name = session
        .read()
        .current()
        .map(|s| s.display_name().to_string())
        .unwrap_or_default();
    let current = route.screen();

    let sign_out = move |_| {
        let mut signed_in = session.peek().clone();
        session.write().sign_out();
        session_state::clear_saved();
        nav.replace(Route::Login {});
        let gateway = gateway.clone();
        // The layout unmounts with the redirect; the revoke must outlive it.
        spawn_forever(async move {
            ops::sign_out(&gateway, &mut signed_in).await;
        });
    };

    rsx! {
        div { class: "console",
            aside { class: "sidebar",
                h1 { "Demo Message" }
                nav {
                    ul {
                        for item in MENU {
                            li { key: "{item.screen.path()}",
                                Link {
                                    class: if item.is_active(current) { "menu-item active" } else { "menu-item" },
                                    to: Route::from(item.screen),
                                    "{item.name}"
                                }
                            }
                        }
                    }
                }
            }
            div { class: "console-body",
                header { class: "console-header",
                    span { class: "user-name", "{display_name}" }
                    button { class: "sign-out", onclick: sign_out, "Log Out" }
                }
                main {
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn Root() -> Element {
    let session = use_session();
    use_route_gate(&Route::Root {}, session).unwrap_or_else(|| rsx! {})
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!("no screen at /{}", segments.join("/"));
    let session = use_session();
    use_route_gate(&Route::Root {}, session).unwrap_or_else(|| rsx! {})
}

#[component]
fn Login() -> Element {
    let session = use_session();
    if let Some(redirect) = use_route_gate(&Route::Login {}, session) {
        return redirect;
    }
    rsx! { LoginView {} }
}

#[component]
fn Register() -> Element {
    let session = use_session();
    if let Some(redirect) = use_route_gate(&Route::Register {}, session) {
        return redirect;
    }
    rsx! { RegisterView {} }
}

#[component]
fn Messages() -> Element {
    rsx! { MessagesView {} }
}

#[component]
fn CreateMessage() -> Element {
    rsx! { CreateMessageView {} }
}

#[component]
fn Stores() -> Element {
    rsx! { ComingSoon {} }
}

#[component]
fn Products() -> Element {
    rsx! { ComingSoon {} }
}

#[component]
fn Suppliers() -> Element {
    rsx! { ComingSoon {} }
}

#[component]
fn Credits() -> Element {
    rsx! { ComingSoon {} }
}

#[component]
fn Returns() -> Element {
    rsx! { ComingSoon {} }
}

#[component]
fn Reports() -> Element {
    rsx! { ComingSoon {} }
}

#[component]
fn ServiceStatus() -> Element {
    rsx! { ComingSoon {} }
}

#[component]
fn Admin() -> Element {
    rsx! { ComingSoon {} }
}
