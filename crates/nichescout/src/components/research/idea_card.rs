//! One generated idea, with save toggle and build-plan CTA.

use crate::components::{use_saved_titles, use_store, use_workflow, WorkflowMessage};
use dioxus::logger::tracing::error;
use dioxus::prelude::*;
use nichescout_core::{AppIdea, RecordStore, TechComplexity};
use std::sync::Arc;

fn complexity_class(complexity: TechComplexity) -> &'static str {
    match complexity {
        TechComplexity::Low => "ns-badge ns-badge--low",
        TechComplexity::Medium => "ns-badge ns-badge--medium",
        TechComplexity::High => "ns-badge ns-badge--high",
    }
}

fn complexity_label(complexity: TechComplexity) -> &'static str {
    match complexity {
        TechComplexity::Low => "Low complexity",
        TechComplexity::Medium => "Medium complexity",
        TechComplexity::High => "High complexity",
    }
}

/// Card for one idea. `topic` is the search topic the idea came from,
/// required when persisting a save.
#[component]
pub fn IdeaCard(idea: AppIdea, topic: String) -> Element {
    let store = use_store();
    let mut saved_titles = use_saved_titles();
    let workflow = use_workflow();

    let mut save_error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let saved = saved_titles.read().contains(&idea.title);

    let handle_save = {
        let store = Arc::clone(&store);
        let idea = idea.clone();
        let topic = topic.clone();
        move |_| {
            if saving() {
                return;
            }
            saving.set(true);
            save_error.set(None);

            let store = Arc::clone(&store);
            let idea = idea.clone();
            let topic = topic.clone();
            let currently_saved = saved_titles.read().contains(&idea.title);
            spawn(async move {
                let result = if currently_saved {
                    store.delete_saved_idea_by_title(&idea.title).await
                } else {
                    store.save_idea(&idea, &topic, None).await
                };
                match result {
                    Ok(()) => {
                        let mut titles = saved_titles.read().clone();
                        if currently_saved {
                            titles.remove(&idea.title);
                        } else {
                            titles.insert(idea.title.clone());
                        }
                        saved_titles.set(titles);
                    }
                    Err(err) => {
                        error!("save toggle failed for '{}': {err}", idea.title);
                        save_error.set(Some(err.to_string()));
                    }
                }
                saving.set(false);
            });
        }
    };

    let idea_for_plan = idea.clone();

    rsx! {
        article { class: "ns-idea-card",
            header { class: "ns-idea-header",
                h3 { class: "ns-idea-title", "{idea.title}" }
                span { class: complexity_class(idea.tech_complexity),
                    {complexity_label(idea.tech_complexity)}
                }
            }
            p { class: "ns-idea-oneliner", "{idea.one_liner}" }

            dl { class: "ns-idea-details",
                dt { "Solves" }
                dd { "{idea.problem_solved}" }
                dt { "For" }
                dd { "{idea.target_audience}" }
                dt { "Monetization" }
                dd { "{idea.monetization}" }
            }

            ul { class: "ns-idea-features",
                for feature in idea.core_features.clone() {
                    li { "{feature}" }
                }
            }

            if let Some(message) = save_error() {
                p { class: "ns-field-error", "{message}" }
            }

            footer { class: "ns-idea-actions",
                button {
                    class: if saved { "ns-btn ns-btn--secondary" } else { "ns-btn ns-btn--ghost" },
                    disabled: saving(),
                    onclick: handle_save,
                    if saved {
                        "★ Saved"
                    } else {
                        "☆ Save"
                    }
                }
                button {
                    class: "ns-btn ns-btn--primary",
                    onclick: move |_| {
                        workflow.send(WorkflowMessage::BuildPlan(idea_for_plan.clone()));
                    },
                    "Create Build Plan"
                }
            }
        }
    }
}
