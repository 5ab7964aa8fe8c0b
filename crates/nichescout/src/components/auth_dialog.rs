//! Sign-in dialog for email/password authentication.

use crate::components::{use_auth, use_current_user};
use dioxus::logger::tracing::info;
use dioxus::prelude::*;
use std::sync::Arc;

/// Modal sign-in dialog.
///
/// Displayed as a modal overlay when the user clicks Sign In. On success
/// the shared session is updated and the dialog closes itself.
#[component]
pub fn AuthDialog(on_close: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut current_user = use_current_user();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut auth_error = use_signal(|| None::<String>);

    let mut handle_submit = move |_| {
        if submitting() {
            return;
        }
        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();
        if email_value.is_empty() || password_value.is_empty() {
            auth_error.set(Some("Email and password are required.".to_string()));
            return;
        }

        submitting.set(true);
        auth_error.set(None);

        let auth = Arc::clone(&auth);
        spawn(async move {
            match auth.sign_in(&email_value, &password_value).await {
                Ok(()) => {
                    info!("sign-in dialog completed");
                    current_user.set(auth.session_user());
                    on_close.call(());
                }
                Err(err) => {
                    auth_error.set(Some(err.to_string()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        // Modal backdrop
        div {
            class: "ns-modal-backdrop",
            onclick: move |_| on_close.call(()),

            // Modal content (stop propagation to prevent close on content click)
            div {
                class: "ns-modal",
                onclick: move |e| e.stop_propagation(),

                div { class: "ns-modal-header",
                    h2 { class: "ns-modal-title", "Sign In" }
                    button {
                        class: "ns-modal-close",
                        onclick: move |_| on_close.call(()),
                        "aria-label": "Close sign in",
                        "\u{2715}"
                    }
                }

                div { class: "ns-modal-content",
                    label { class: "ns-field-label", r#for: "ns-auth-email", "Email" }
                    input {
                        id: "ns-auth-email",
                        class: "ns-field-input",
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        disabled: submitting(),
                        oninput: move |evt| email.set(evt.value()),
                    }

                    label { class: "ns-field-label", r#for: "ns-auth-password", "Password" }
                    input {
                        id: "ns-auth-password",
                        class: "ns-field-input",
                        r#type: "password",
                        value: "{password}",
                        disabled: submitting(),
                        oninput: move |evt| password.set(evt.value()),
                        onkeypress: {
                            let mut handle_submit = handle_submit.clone();
                            move |evt: KeyboardEvent| {
                                if evt.key() == Key::Enter {
                                    handle_submit(());
                                }
                            }
                        },
                    }

                    if let Some(message) = auth_error() {
                        p { class: "ns-field-error", "{message}" }
                    }

                    button {
                        class: "ns-btn ns-btn--primary ns-btn--block",
                        disabled: submitting(),
                        onclick: move |_| handle_submit(()),
                        if submitting() {
                            "Signing in…"
                        } else {
                            "Sign In"
                        }
                    }
                }
            }
        }
    }
}
