use dioxus::prelude::*;

/// Placeholder for sections of the console that are not built yet.
#[component]
pub fn ComingSoon() -> Element {
    rsx! {
        div { class: "coming-soon",
            h1 { "Coming Soon" }
            p { "This page is under construction." }
        }
    }
}
