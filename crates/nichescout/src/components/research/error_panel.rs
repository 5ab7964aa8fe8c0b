//! Terminal error state with a retry path back to the search form.

use crate::components::{use_flow, use_workflow, WorkflowMessage};
use dioxus::prelude::*;

#[component]
pub fn ErrorPanel() -> Element {
    let flow = use_flow();
    let workflow = use_workflow();

    let state = flow.read();
    let message = state
        .error
        .clone()
        .unwrap_or_else(|| "Something went wrong.".to_string());
    // The failed search's topic is kept in the state, so the same search
    // can be retried with one click instead of retyping it.
    let topic = state.topic.clone();
    drop(state);

    let retry_topic = topic.clone();
    rsx! {
        section { class: "ns-error-card",
            h2 { class: "ns-error-title", "That didn't work" }
            p { class: "ns-error-text", "{message}" }
            div { class: "ns-error-actions",
                if !topic.trim().is_empty() {
                    button {
                        class: "ns-btn ns-btn--primary",
                        onclick: move |_| {
                            workflow.send(WorkflowMessage::SubmitSearch(retry_topic.clone()));
                        },
                        "Try \"{topic}\" Again"
                    }
                }
                button {
                    class: "ns-btn ns-btn--ghost",
                    onclick: move |_| workflow.send(WorkflowMessage::Reset),
                    "Start Over"
                }
            }
        }
    }
}
