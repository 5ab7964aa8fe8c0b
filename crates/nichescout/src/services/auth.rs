//! Password auth against the hosted backend's GoTrue endpoint.
//!
//! Successful sign-in updates the shared [`UserSession`] and caches the
//! access token for the record store's authenticated requests. Sign-out
//! revokes the token server-side on a best-effort basis and always clears
//! local state.

use super::http::HTTP_CLIENT;
use dioxus::logger::tracing::{error, info, warn};
use nichescout_core::{User, UserSession};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email/password or unconfirmed account.
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Sign in failed. Please try again.")]
    RequestFailed,
}

/// GoTrue password-grant client bound to one project.
pub struct AuthClient {
    auth_url: String,
    anon_key: String,
    session: Arc<UserSession>,
    access_token: RwLock<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl AuthClient {
    pub fn new(supabase_url: &str, anon_key: String, session: Arc<UserSession>) -> Self {
        Self {
            auth_url: format!("{}/auth/v1", supabase_url.trim_end_matches('/')),
            anon_key,
            session,
            access_token: RwLock::new(None),
        }
    }

    /// Bearer token for data-plane requests: the user's access token when
    /// signed in, the anon key otherwise.
    pub fn bearer_token(&self) -> String {
        self.access_token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_else(|| self.anon_key.clone())
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// The signed-in user per the shared session, if any.
    pub fn session_user(&self) -> Option<User> {
        self.session.current_user()
    }

    /// Exchanges email/password for an access token and signs the session in.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let response = HTTP_CLIENT
            .post(format!("{}/token?grant_type=password", self.auth_url))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| {
                error!("sign-in request failed: {}", e);
                AuthError::RequestFailed
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST
            || status == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            error!("sign-in returned HTTP {}", status);
            return Err(AuthError::RequestFailed);
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            error!("sign-in returned invalid body: {}", e);
            AuthError::RequestFailed
        })?;

        if let Ok(mut guard) = self.access_token.write() {
            *guard = Some(token.access_token);
        }
        let email = token.user.email.unwrap_or_else(|| email.to_string());
        info!(%email, "signed in");
        self.session.set_user(User {
            id: token.user.id,
            email,
        });
        Ok(())
    }

    /// Revokes the token and clears the session. Local state is cleared even
    /// when the revocation request fails.
    pub async fn sign_out(&self) {
        let token = self
            .access_token
            .read()
            .ok()
            .and_then(|guard| guard.clone());

        if let Some(token) = token {
            let result = HTTP_CLIENT
                .post(format!("{}/logout", self.auth_url))
                .header("apikey", &self.anon_key)
                .bearer_auth(&token)
                .send()
                .await;
            if let Err(e) = result {
                warn!("sign-out revocation failed: {}", e);
            }
        }

        if let Ok(mut guard) = self.access_token.write() {
            *guard = None;
        }
        self.session.sign_out();
        info!("signed out");
    }
}
