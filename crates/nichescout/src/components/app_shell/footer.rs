use dioxus::prelude::*;

/// Footer with grounding disclaimer
#[component]
pub fn Footer() -> Element {
    rsx! {
        footer { class: "ns-footer",
            span { class: "ns-footer-text",
                "Research is AI-generated from live web sources. Validate before you build."
            }
        }
    }
}
