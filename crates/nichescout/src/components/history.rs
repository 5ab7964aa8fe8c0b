//! Search history list: restore or delete past research sessions.

use crate::components::{use_store, use_workflow, WorkflowMessage};
use crate::utils::format_created_at;
use dioxus::logger::tracing::error;
use dioxus::prelude::*;
use nichescout_core::{RecordStore, SearchHistoryRecord};
use std::sync::Arc;

/// Character budget for the summary preview on each row.
const PREVIEW_LEN: usize = 140;

fn preview(summary: &str) -> String {
    let flat = summary.replace('\n', " ");
    if flat.chars().count() <= PREVIEW_LEN {
        return flat;
    }
    let truncated: String = flat.chars().take(PREVIEW_LEN).collect();
    format!("{}…", truncated.trim_end())
}

#[component]
pub fn HistoryView() -> Element {
    let store = use_store();
    let workflow = use_workflow();

    let mut records = use_signal(Vec::<SearchHistoryRecord>::new);
    let mut loading = use_signal(|| true);
    let mut load_error = use_signal(|| None::<String>);

    // Fetch once on mount; reads no signals so the effect never re-runs.
    {
        let store = Arc::clone(&store);
        use_effect(move || {
            let store = Arc::clone(&store);
            spawn(async move {
                match store.list_history().await {
                    Ok(fetched) => records.set(fetched),
                    Err(err) => {
                        error!("failed to load history: {err}");
                        load_error.set(Some("Failed to load your search history.".to_string()));
                    }
                }
                loading.set(false);
            });
        });
    }

    let handle_delete = {
        let store = Arc::clone(&store);
        move |id: String| {
            let store = Arc::clone(&store);
            spawn(async move {
                match store.delete_history(&id).await {
                    Ok(()) => {
                        let remaining: Vec<_> = records
                            .read()
                            .iter()
                            .filter(|record| record.id != id)
                            .cloned()
                            .collect();
                        records.set(remaining);
                    }
                    Err(err) => error!("failed to delete history record {id}: {err}"),
                }
            });
        }
    };

    rsx! {
        section { class: "ns-records",
            h2 { class: "ns-records-title", "Search History" }

            if loading() {
                div { class: "ns-progress",
                    span { class: "ns-spinner" }
                    span { class: "ns-progress-text", "Loading history…" }
                }
            } else if let Some(message) = load_error() {
                p { class: "ns-field-error", "{message}" }
            } else if records.read().is_empty() {
                p { class: "ns-records-empty",
                    "No research sessions yet. Run a search and it will show up here."
                }
            } else {
                ul { class: "ns-record-list",
                    for record in records.read().iter().cloned() {
                        li { class: "ns-record-row", key: "{record.id}",
                            div { class: "ns-record-main",
                                div { class: "ns-record-top",
                                    span { class: "ns-record-topic", "{record.topic}" }
                                    span { class: "ns-record-time",
                                        {format_created_at(&record.created_at)}
                                    }
                                    if record.has_ideas() {
                                        span { class: "ns-badge ns-badge--low", "Ideas" }
                                    }
                                }
                                p { class: "ns-record-preview", {preview(&record.summary)} }
                                if let Some(ideas) = record.ideas.as_ref() {
                                    span { class: "ns-record-meta",
                                        "Ideas: "
                                        {
                                            ideas
                                                .iter()
                                                .take(3)
                                                .map(|idea| idea.title.as_str())
                                                .collect::<Vec<_>>()
                                                .join(", ")
                                        }
                                    }
                                }
                            }
                            div { class: "ns-record-actions",
                                button {
                                    class: "ns-btn ns-btn--primary",
                                    onclick: {
                                        let record = record.clone();
                                        move |_| {
                                            workflow.send(WorkflowMessage::Restore(record.clone()));
                                        }
                                    },
                                    "View"
                                }
                                button {
                                    class: "ns-btn ns-btn--danger",
                                    onclick: {
                                        let handle_delete = handle_delete.clone();
                                        let id = record.id.clone();
                                        move |_| handle_delete(id.clone())
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
