//! Pain-point report: research write-up, sources, and the ideation CTA.

use crate::components::{use_flow, use_workflow, WorkflowMessage};
use dioxus::prelude::*;
use nichescout_core::WorkflowState;

#[component]
pub fn ReportView() -> Element {
    let flow = use_flow();
    let workflow = use_workflow();

    let state = flow.read();
    let generating = state.phase == WorkflowState::GeneratingIdeas;
    let Some(pain_points) = state.pain_points.clone() else {
        // Unreachable by routing; render nothing rather than panic.
        return rsx! {};
    };
    let topic = state.topic.clone();
    drop(state);

    rsx! {
        section { class: "ns-report",
            header { class: "ns-report-header",
                div {
                    span { class: "ns-report-kicker", "Market pain points" }
                    h2 { class: "ns-report-topic", "{topic}" }
                }
                button {
                    class: "ns-btn ns-btn--secondary",
                    disabled: generating,
                    onclick: move |_| workflow.send(WorkflowMessage::Reset),
                    "New Search"
                }
            }

            article { class: "ns-report-body", "{pain_points.summary}" }

            aside { class: "ns-sources",
                h3 { class: "ns-sources-title", "Sources" }
                if pain_points.sources.is_empty() {
                    p { class: "ns-sources-empty", "Synthesized from general knowledge base." }
                } else {
                    ul { class: "ns-sources-list",
                        for source in pain_points.sources.clone() {
                            li { class: "ns-sources-item",
                                a {
                                    class: "ns-sources-link",
                                    href: "{source.uri}",
                                    target: "_blank",
                                    rel: "noopener noreferrer",
                                    "{source.title}"
                                }
                            }
                        }
                    }
                }
            }

            div { class: "ns-report-actions",
                button {
                    class: "ns-btn ns-btn--primary ns-btn--large",
                    disabled: generating,
                    onclick: move |_| workflow.send(WorkflowMessage::GenerateIdeas),
                    if generating {
                        "Generating ideas…"
                    } else {
                        "Generate App Ideas"
                    }
                }
                if generating {
                    span { class: "ns-spinner" }
                }
            }
        }
    }
}
