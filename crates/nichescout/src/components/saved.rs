//! Saved ideas list: open a build plan or remove a bookmark.

use crate::components::{use_saved_titles, use_store, use_workflow, WorkflowMessage};
use crate::utils::format_created_at;
use dioxus::logger::tracing::error;
use dioxus::prelude::*;
use nichescout_core::{RecordStore, SavedIdeaRecord};
use std::sync::Arc;

#[component]
pub fn SavedView() -> Element {
    let store = use_store();
    let workflow = use_workflow();
    let mut saved_titles = use_saved_titles();

    let mut records = use_signal(Vec::<SavedIdeaRecord>::new);
    let mut loading = use_signal(|| true);
    let mut load_error = use_signal(|| None::<String>);

    // Fetch once on mount; reads no signals so the effect never re-runs.
    {
        let store = Arc::clone(&store);
        use_effect(move || {
            let store = Arc::clone(&store);
            spawn(async move {
                match store.list_saved_ideas().await {
                    Ok(fetched) => records.set(fetched),
                    Err(err) => {
                        error!("failed to load saved ideas: {err}");
                        load_error.set(Some("Failed to load your saved ideas.".to_string()));
                    }
                }
                loading.set(false);
            });
        });
    }

    // Removal is by title, not id, so race-created duplicates go too.
    let handle_remove = {
        let store = Arc::clone(&store);
        move |title: String| {
            let store = Arc::clone(&store);
            spawn(async move {
                match store.delete_saved_idea_by_title(&title).await {
                    Ok(()) => {
                        let remaining: Vec<_> = records
                            .read()
                            .iter()
                            .filter(|record| record.title != title)
                            .cloned()
                            .collect();
                        records.set(remaining);

                        let mut titles = saved_titles.read().clone();
                        titles.remove(&title);
                        saved_titles.set(titles);
                    }
                    Err(err) => error!("failed to remove saved idea '{title}': {err}"),
                }
            });
        }
    };

    rsx! {
        section { class: "ns-records",
            h2 { class: "ns-records-title", "Saved Ideas" }

            if loading() {
                div { class: "ns-progress",
                    span { class: "ns-spinner" }
                    span { class: "ns-progress-text", "Loading saved ideas…" }
                }
            } else if let Some(message) = load_error() {
                p { class: "ns-field-error", "{message}" }
            } else if records.read().is_empty() {
                p { class: "ns-records-empty",
                    "Nothing saved yet. Star an idea from a research session to keep it."
                }
            } else {
                ul { class: "ns-record-list",
                    for record in records.read().iter().cloned() {
                        li { class: "ns-record-row", key: "{record.id}",
                            div { class: "ns-record-main",
                                div { class: "ns-record-top",
                                    span { class: "ns-record-topic", "{record.title}" }
                                    span { class: "ns-record-time",
                                        {format_created_at(&record.created_at)}
                                    }
                                    if record.build_plan.is_some() {
                                        span { class: "ns-badge ns-badge--low", "Plan ready" }
                                    }
                                }
                                p { class: "ns-record-preview", "{record.one_liner}" }
                                span { class: "ns-record-meta", "Niche: {record.topic}" }
                            }
                            div { class: "ns-record-actions",
                                button {
                                    class: "ns-btn ns-btn--primary",
                                    onclick: {
                                        let record = record.clone();
                                        move |_| {
                                            workflow
                                                .send(WorkflowMessage::ViewSavedIdea(record.clone()));
                                        }
                                    },
                                    if record.build_plan.is_some() {
                                        "View Plan"
                                    } else {
                                        "Generate Plan"
                                    }
                                }
                                button {
                                    class: "ns-btn ns-btn--danger",
                                    onclick: {
                                        let handle_remove = handle_remove.clone();
                                        let title = record.title.clone();
                                        move |_| handle_remove(title.clone())
                                    },
                                    "Remove"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
