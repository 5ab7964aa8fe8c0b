//! Build plan view: roadmap, PRD, and the starter prompt.
//!
//! Also renders the generating state, since the plan call can take a while.

use crate::components::{use_flow, use_workflow, WorkflowMessage};
use dioxus::prelude::*;
use nichescout_core::WorkflowState;

#[component]
pub fn PlanView() -> Element {
    let flow = use_flow();
    let workflow = use_workflow();
    let mut copied = use_signal(|| false);

    let state = flow.read();
    let generating = state.phase == WorkflowState::GeneratingPlan;
    let idea_title = state
        .selected_idea
        .as_ref()
        .map(|idea| idea.title.clone())
        .unwrap_or_default();
    let plan = state.build_plan.clone();
    drop(state);

    if generating {
        return rsx! {
            section { class: "ns-plan ns-plan--loading",
                span { class: "ns-spinner" }
                p { class: "ns-progress-text", "Drafting a build plan for {idea_title}…" }
            }
        };
    }

    let Some(plan) = plan else {
        return rsx! {};
    };

    rsx! {
        section { class: "ns-plan",
            header { class: "ns-plan-header",
                div {
                    span { class: "ns-report-kicker", "Build plan" }
                    h2 { class: "ns-report-topic", "{idea_title}" }
                }
                button {
                    class: "ns-btn ns-btn--secondary",
                    onclick: move |_| workflow.send(WorkflowMessage::BackToIdeas),
                    "Back to Ideas"
                }
            }

            div { class: "ns-plan-section",
                h3 { class: "ns-plan-section-title", "MVP Roadmap" }
                ol { class: "ns-roadmap",
                    for phase in plan.roadmap.clone() {
                        li { class: "ns-roadmap-phase",
                            div { class: "ns-roadmap-phase-header",
                                span { class: "ns-roadmap-phase-name", "{phase.phase}" }
                                span { class: "ns-roadmap-phase-duration", "{phase.duration}" }
                            }
                            ul { class: "ns-roadmap-tasks",
                                for task in phase.tasks {
                                    li { "{task}" }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "ns-plan-section",
                h3 { class: "ns-plan-section-title", "Product Requirement Document" }
                article { class: "ns-plan-document", "{plan.prd}" }
            }

            div { class: "ns-plan-section",
                div { class: "ns-plan-section-header",
                    h3 { class: "ns-plan-section-title", "Vibe Coding Starter Prompt" }
                    button {
                        class: "ns-btn ns-btn--ghost",
                        onclick: {
                            let prompt = plan.vibe_coding_prompt.clone();
                            move |_| {
                                copied.set(true);
                                // JSON string literal doubles as a JS one.
                                let escaped = serde_json::to_string(&prompt)
                                    .unwrap_or_default();
                                document::eval(&format!(
                                    "navigator.clipboard.writeText({escaped});"
                                ));
                            }
                        },
                        if copied() {
                            "Copied"
                        } else {
                            "Copy"
                        }
                    }
                }
                p { class: "ns-plan-hint",
                    "Paste this into an AI coding assistant to scaffold the project."
                }
                pre { class: "ns-plan-prompt", "{plan.vibe_coding_prompt}" }
            }
        }
    }
}
