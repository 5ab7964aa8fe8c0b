//! Idea grid shown after ideation succeeds.

use super::IdeaCard;
use crate::components::{use_flow, use_workflow, WorkflowMessage};
use dioxus::prelude::*;

#[component]
pub fn IdeasView() -> Element {
    let flow = use_flow();
    let workflow = use_workflow();

    let state = flow.read();
    let topic = state.topic.clone();
    let ideas = state.ideas.clone();
    drop(state);

    rsx! {
        section { class: "ns-ideas",
            header { class: "ns-ideas-header",
                div {
                    span { class: "ns-report-kicker", "App ideas" }
                    h2 { class: "ns-report-topic", "{topic}" }
                }
                div { class: "ns-ideas-header-actions",
                    button {
                        class: "ns-btn ns-btn--ghost",
                        onclick: move |_| workflow.send(WorkflowMessage::GenerateIdeas),
                        "Regenerate"
                    }
                    button {
                        class: "ns-btn ns-btn--secondary",
                        onclick: move |_| workflow.send(WorkflowMessage::Reset),
                        "New Search"
                    }
                }
            }

            div { class: "ns-idea-grid",
                for idea in ideas {
                    IdeaCard {
                        key: "{idea.title}",
                        idea: idea.clone(),
                        topic: topic.clone(),
                    }
                }
            }
        }
    }
}
