//! UI components for the Nichescout application.
//!
//! This module contains all Dioxus components that make up the user
//! interface.
//!
//! # Architecture
//!
//! - `app_shell`: AppBar, Footer
//! - `research`: SearchView, ReportView, IdeasView, PlanView (the main
//!   research flow, routed by workflow phase)
//! - `history` / `saved`: record list views
//! - `auth_dialog`: modal email/password sign-in
//!
//! All research state lives in one [`ResearchFlowState`] signal. Components
//! send [`WorkflowMessage`]s to a [`WorkflowHandle`]: pure transitions
//! (navigation, reset, restore, back) are applied to the signal on the spot,
//! while remote operations are forwarded to a coroutine that drives the
//! [`Workflow`] one request at a time and mirrors its state back into the
//! signal. A view change therefore never waits behind an in-flight network
//! call.
//!
//! # Context Providers
//!
//! ```ignore
//! // Read-only snapshot of the research flow
//! let flow = use_flow();
//!
//! // Drive the workflow
//! let workflow = use_workflow();
//! workflow.send(WorkflowMessage::SubmitSearch("Fitness".to_string()));
//! ```

mod app_shell;
mod auth_dialog;
mod history;
pub mod research;
mod saved;

pub use app_shell::{AppBar, Footer};
pub use auth_dialog::AuthDialog;
pub use history::HistoryView;
pub use research::{ErrorPanel, IdeasView, PlanView, ReportView, SearchView};
pub use saved::SavedView;

use crate::config::BackendConfig;
use crate::services::{AuthClient, GeminiResearch, SupabaseStore};
use dioxus::logger::tracing::error;
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use nichescout_core::{
    AppIdea, NavTarget, RecordStore, ResearchFlowState, SavedIdeaRecord, SearchHistoryRecord, User,
    UserSession, Workflow, WorkflowState,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Messages for the research workflow.
pub enum WorkflowMessage {
    SubmitSearch(String),
    GenerateIdeas,
    BuildPlan(AppIdea),
    ViewSavedIdea(SavedIdeaRecord),
    BackToIdeas,
    Restore(SearchHistoryRecord),
    Navigate(NavTarget),
    Reset,
}

/// Dispatcher for [`WorkflowMessage`]s.
///
/// Pure transitions mutate the flow signal immediately so the app bar keeps
/// working while a remote request is suspended; only the remote operations
/// queue on the coroutine. No request fencing: a remote result arriving
/// after such a transition still overwrites the state (last response wins).
#[derive(Clone, Copy)]
pub struct WorkflowHandle {
    flow: Signal<ResearchFlowState>,
    remote: Coroutine<WorkflowMessage>,
}

impl WorkflowHandle {
    pub fn send(&self, message: WorkflowMessage) {
        let mut flow = self.flow;
        match message {
            WorkflowMessage::BackToIdeas => flow.with_mut(|state| state.back_to_ideas()),
            WorkflowMessage::Restore(record) => flow.with_mut(|state| state.restore(record)),
            WorkflowMessage::Navigate(target) => flow.with_mut(|state| state.navigate(target)),
            WorkflowMessage::Reset => flow.with_mut(|state| state.reset()),
            remote_op => self.remote.send(remote_op),
        }
    }
}

/// Read-only snapshot of the research flow state.
pub fn use_flow() -> Signal<ResearchFlowState> {
    use_context::<Signal<ResearchFlowState>>()
}

/// Handle for sending messages to the workflow.
pub fn use_workflow() -> WorkflowHandle {
    use_context::<WorkflowHandle>()
}

/// Record store shared with the list views and save buttons.
pub fn use_store() -> Arc<SupabaseStore> {
    use_context::<Arc<SupabaseStore>>()
}

/// Auth client for the sign-in dialog and app bar.
pub fn use_auth() -> Arc<AuthClient> {
    use_context::<Arc<AuthClient>>()
}

/// Reactive mirror of the signed-in user.
pub fn use_current_user() -> Signal<Option<User>> {
    use_context::<Signal<Option<User>>>()
}

/// Titles of the current user's saved ideas, for save-button state.
pub fn use_saved_titles() -> Signal<HashSet<String>> {
    use_context::<Signal<HashSet<String>>>()
}

#[component]
pub fn App() -> Element {
    // Credentials are fixed for the process lifetime; resolve once.
    let config = use_hook(|| BackendConfig::resolve().map_err(|e| e.to_string()));

    match config {
        Ok(config) => rsx! {
            Shell { config }
        },
        Err(message) => rsx! {
            div { class: "ns-app",
                main { class: "ns-main",
                    section { class: "ns-error-card",
                        h2 { class: "ns-error-title", "Configuration error" }
                        p { class: "ns-error-text", "{message}" }
                    }
                }
            }
        },
    }
}

/// The configured application: services, workflow coroutine, and routing.
#[component]
fn Shell(config: BackendConfig) -> Element {
    let session = use_hook(|| Arc::new(UserSession::new()));

    let auth = use_context_provider({
        let session = Arc::clone(&session);
        let config = config.clone();
        move || {
            Arc::new(AuthClient::new(
                &config.supabase_url,
                config.supabase_anon_key.clone(),
                session,
            ))
        }
    });

    let store = use_context_provider({
        let session = Arc::clone(&session);
        let auth = Arc::clone(&auth);
        let supabase_url = config.supabase_url.clone();
        move || Arc::new(SupabaseStore::new(&supabase_url, auth, session))
    });

    let flow = use_signal(ResearchFlowState::default);
    use_context_provider(|| flow);

    let current_user = use_signal(|| None::<User>);
    use_context_provider(|| current_user);

    let saved_titles = use_signal(HashSet::<String>::new);
    use_context_provider(|| saved_titles);

    // Refresh the saved-title set whenever the signed-in user changes.
    {
        let store = Arc::clone(&store);
        let mut saved_titles = saved_titles;
        use_effect(move || {
            let signed_in = current_user.read().is_some();
            if !signed_in {
                saved_titles.set(HashSet::new());
                return;
            }
            let store = Arc::clone(&store);
            spawn(async move {
                match store.list_saved_ideas().await {
                    Ok(records) => {
                        saved_titles
                            .set(records.into_iter().map(|record| record.title).collect());
                    }
                    Err(err) => error!("failed to load saved idea titles: {err}"),
                }
            });
        });
    }

    let workflow_coroutine = use_coroutine({
        let mut flow_signal = flow;
        let gemini_api_key = config.gemini_api_key.clone();
        let store = Arc::clone(&store);
        move |mut rx: UnboundedReceiver<WorkflowMessage>| {
            let research = GeminiResearch::new(gemini_api_key.clone());
            let store = Arc::clone(&store);
            async move {
                let mut workflow = Workflow::new(research, store);
                while let Some(msg) = rx.next().await {
                    // Pick up pure transitions the handle applied to the
                    // signal while this loop was idle or suspended.
                    workflow.state = flow_signal.peek().clone();
                    match msg {
                        WorkflowMessage::SubmitSearch(topic) => {
                            if !topic.trim().is_empty() {
                                // Mirror the in-flight phase so the view
                                // updates while the request runs.
                                let mut pending = workflow.state.clone();
                                pending.phase = WorkflowState::Searching;
                                pending.topic = topic.clone();
                                flow_signal.set(pending);
                            }
                            workflow.submit_search(&topic).await;
                        }
                        WorkflowMessage::GenerateIdeas => {
                            if workflow.state.pain_points.is_some() {
                                let mut pending = workflow.state.clone();
                                pending.phase = WorkflowState::GeneratingIdeas;
                                flow_signal.set(pending);
                            }
                            workflow.generate_ideas().await;
                        }
                        WorkflowMessage::BuildPlan(idea) => {
                            let mut pending = workflow.state.clone();
                            pending.phase = WorkflowState::GeneratingPlan;
                            pending.selected_idea = Some(idea.clone());
                            flow_signal.set(pending);
                            workflow.build_plan(idea).await;
                        }
                        WorkflowMessage::ViewSavedIdea(record) => {
                            if record.build_plan.is_none() {
                                let mut pending = workflow.state.clone();
                                pending.phase = WorkflowState::GeneratingPlan;
                                pending.selected_idea = Some(record.full_idea_json.clone());
                                flow_signal.set(pending);
                            }
                            workflow.view_saved_idea(record).await;
                        }
                        // Pure transitions are applied by the handle and
                        // never reach this queue; handled here anyway so
                        // the match stays total.
                        WorkflowMessage::BackToIdeas => workflow.back_to_ideas(),
                        WorkflowMessage::Restore(record) => workflow.restore(record),
                        WorkflowMessage::Navigate(target) => workflow.navigate(target),
                        WorkflowMessage::Reset => workflow.reset(),
                    }
                    flow_signal.set(workflow.state.clone());
                }
            }
        }
    });
    use_context_provider(|| WorkflowHandle {
        flow,
        remote: workflow_coroutine,
    });

    let mut auth_open = use_signal(|| false);

    let phase = flow.read().phase;
    rsx! {
        div { class: "ns-app",
            AppBar {
                on_sign_in_click: move |_| auth_open.set(true),
            }

            main { class: "ns-main",
                match phase {
                    WorkflowState::Idle | WorkflowState::Searching => rsx! {
                        SearchView {}
                    },
                    WorkflowState::ReviewingPains | WorkflowState::GeneratingIdeas => rsx! {
                        ReportView {}
                    },
                    WorkflowState::DisplayIdeas => rsx! {
                        IdeasView {}
                    },
                    WorkflowState::GeneratingPlan | WorkflowState::DisplayPlan => rsx! {
                        PlanView {}
                    },
                    WorkflowState::History => rsx! {
                        HistoryView {}
                    },
                    WorkflowState::Saved => rsx! {
                        SavedView {}
                    },
                    WorkflowState::Error => rsx! {
                        ErrorPanel {}
                    },
                }
            }

            Footer {}

            if auth_open() {
                AuthDialog {
                    on_close: move |_| auth_open.set(false),
                }
            }
        }
    }
}
