//! Landing view: hero copy and the topic search card.

use crate::components::{use_flow, use_workflow, WorkflowMessage};
use dioxus::prelude::*;
use nichescout_core::WorkflowState;

/// Suggested topics rendered as chips under the input. Clicking one fills
/// the search box without submitting, so the user can edit it first.
const POPULAR_TOPICS: [&str; 4] = ["Remote Work", "AI Tools", "Fitness", "E-commerce"];

#[component]
pub fn SearchView() -> Element {
    let flow = use_flow();
    let workflow = use_workflow();

    let mut topic = use_signal(String::new);
    let searching = flow.read().phase == WorkflowState::Searching;

    let submit = move |value: String| {
        if !value.trim().is_empty() {
            workflow.send(WorkflowMessage::SubmitSearch(value));
        }
    };

    rsx! {
        section { class: "ns-hero",
            h1 { class: "ns-hero-title", "Find your next product idea" }
            p { class: "ns-hero-subtitle",
                "Scan Reddit, IndieHackers, and niche forums for real pain points people "
                "are complaining about right now."
            }
        }

        section { class: "ns-search-card",
            div { class: "ns-search-input-row",
                input {
                    class: "ns-search-input",
                    r#type: "text",
                    placeholder: "Enter a niche, e.g. home coffee brewing…",
                    value: "{topic}",
                    disabled: searching,
                    oninput: move |evt| topic.set(evt.value()),
                    onkeypress: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            submit(topic.read().clone());
                        }
                    },
                }
                button {
                    class: "ns-btn ns-btn--primary",
                    disabled: searching,
                    onclick: move |_| submit(topic.read().clone()),
                    if searching {
                        "Researching…"
                    } else {
                        "Research"
                    }
                }
            }

            div { class: "ns-search-hints",
                span { class: "ns-search-hints-label", "Popular:" }
                for suggestion in POPULAR_TOPICS {
                    button {
                        class: "ns-chip",
                        disabled: searching,
                        onclick: move |_| topic.set(suggestion.to_string()),
                        "{suggestion}"
                    }
                }
            }

            if searching {
                div { class: "ns-progress",
                    span { class: "ns-spinner" }
                    span { class: "ns-progress-text",
                        "Scanning forums and communities for \"{flow.read().topic}\"…"
                    }
                }
            }
        }
    }
}
