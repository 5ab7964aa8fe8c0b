//! Top app bar: brand, navigation, and session controls.
//!
//! History and Saved navigation only renders for a signed-in user; the
//! anonymous app bar carries just the brand and a Sign In button.

use crate::components::{
    use_auth, use_current_user, use_flow, use_workflow, WorkflowMessage,
};
use dioxus::prelude::*;
use nichescout_core::{NavTarget, WorkflowState};
use std::sync::Arc;

#[component]
pub fn AppBar(on_sign_in_click: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut current_user = use_current_user();
    let flow = use_flow();
    let workflow = use_workflow();

    let phase = flow.read().phase;
    let user = current_user.read().clone();

    let handle_sign_out = move |_| {
        let auth = Arc::clone(&auth);
        spawn(async move {
            auth.sign_out().await;
            current_user.set(None);
            workflow.send(WorkflowMessage::Reset);
        });
    };

    rsx! {
        header { class: "ns-appbar",
            button {
                class: "ns-brand",
                onclick: move |_| workflow.send(WorkflowMessage::Reset),
                span { class: "ns-brand-mark", "◎" }
                span { class: "ns-brand-name", "Nichescout" }
            }

            nav { class: "ns-nav",
                if user.is_some() {
                    button {
                        class: if matches!(
                            phase,
                            WorkflowState::History | WorkflowState::Saved
                        ) { "ns-nav-item" } else { "ns-nav-item ns-nav-item--active" },
                        onclick: move |_| workflow.send(WorkflowMessage::Navigate(NavTarget::Home)),
                        "Dashboard"
                    }
                    button {
                        class: if phase == WorkflowState::History {
                            "ns-nav-item ns-nav-item--active"
                        } else {
                            "ns-nav-item"
                        },
                        onclick: move |_| {
                            workflow.send(WorkflowMessage::Navigate(NavTarget::History));
                        },
                        "History"
                    }
                    button {
                        class: if phase == WorkflowState::Saved {
                            "ns-nav-item ns-nav-item--active"
                        } else {
                            "ns-nav-item"
                        },
                        onclick: move |_| {
                            workflow.send(WorkflowMessage::Navigate(NavTarget::Saved));
                        },
                        "Saved Ideas"
                    }
                }
            }

            div { class: "ns-session",
                if let Some(user) = user {
                    span { class: "ns-session-email", "{user.email}" }
                    button {
                        class: "ns-btn ns-btn--secondary",
                        onclick: handle_sign_out,
                        "Sign Out"
                    }
                } else {
                    button {
                        class: "ns-btn ns-btn--primary",
                        onclick: move |_| on_sign_in_click.call(()),
                        "Sign In"
                    }
                }
            }
        }
    }
}
