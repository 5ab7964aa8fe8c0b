//! PostgREST-backed record store.
//!
//! Two tables, both row-level-secured by `user_id`:
//!
//! - `search_history`: one row per research session; `ideas` starts NULL
//!   and is patched in after ideation.
//! - `saved_ideas`: one row per bookmarked idea; `build_plan` starts NULL.
//!
//! The user filter is sent explicitly on every query even though RLS would
//! enforce it anyway, so anonymous requests fail closed instead of scanning.

use super::auth::AuthClient;
use super::http::HTTP_CLIENT;
use dioxus::logger::tracing::error;
use nichescout_core::{
    AppIdea, BuildPlan, PainPointResult, RecordStore, SavedIdeaRecord, SearchHistoryRecord,
    StoreError, UserSession,
};
use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Record store over the hosted backend's REST endpoint.
pub struct SupabaseStore {
    rest_url: String,
    auth: Arc<AuthClient>,
    session: Arc<UserSession>,
}

/// `search_history` row. Flattens into [`SearchHistoryRecord`] minus the
/// owner column.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryRow {
    id: String,
    user_id: String,
    topic: String,
    summary: String,
    pain_points: PainPointResult,
    #[serde(default)]
    ideas: Option<Vec<AppIdea>>,
    created_at: String,
}

/// `saved_ideas` row.
#[derive(Debug, Serialize, Deserialize)]
struct SavedIdeaRow {
    id: String,
    user_id: String,
    title: String,
    topic: String,
    one_liner: String,
    full_idea_json: AppIdea,
    #[serde(default)]
    build_plan: Option<BuildPlan>,
    created_at: String,
}

impl From<HistoryRow> for SearchHistoryRecord {
    fn from(row: HistoryRow) -> Self {
        SearchHistoryRecord {
            id: row.id,
            topic: row.topic,
            summary: row.summary,
            pain_points: row.pain_points,
            ideas: row.ideas,
            created_at: row.created_at,
        }
    }
}

impl From<SavedIdeaRow> for SavedIdeaRecord {
    fn from(row: SavedIdeaRow) -> Self {
        SavedIdeaRecord {
            id: row.id,
            title: row.title,
            topic: row.topic,
            one_liner: row.one_liner,
            full_idea_json: row.full_idea_json,
            build_plan: row.build_plan,
            created_at: row.created_at,
        }
    }
}

fn database_error(op: &str, cause: impl std::fmt::Display) -> StoreError {
    error!("{} failed: {}", op, cause);
    StoreError::Database(format!("{} failed", op))
}

impl SupabaseStore {
    pub fn new(supabase_url: &str, auth: Arc<AuthClient>, session: Arc<UserSession>) -> Self {
        Self {
            rest_url: format!("{}/rest/v1", supabase_url.trim_end_matches('/')),
            auth,
            session,
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        HTTP_CLIENT
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", self.auth.anon_key())
            .bearer_auth(self.auth.bearer_token())
    }

    /// Sends a mutation and maps any transport or HTTP failure to a
    /// database error named after `op`.
    async fn execute(&self, builder: RequestBuilder, op: &str) -> Result<(), StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| database_error(op, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(database_error(op, format!("HTTP {}", status)));
        }
        Ok(())
    }

    async fn fetch_rows<T: serde::de::DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        op: &str,
    ) -> Result<Vec<T>, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| database_error(op, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(database_error(op, format!("HTTP {}", status)));
        }
        response.json().await.map_err(|e| database_error(op, e))
    }
}

#[async_trait::async_trait(?Send)]
impl RecordStore for SupabaseStore {
    async fn create_history(
        &self,
        topic: &str,
        summary: &str,
        pain_points: &PainPointResult,
    ) -> Result<Option<String>, StoreError> {
        let Some(user) = self.session.current_user() else {
            return Ok(None);
        };

        let rows: Vec<HistoryRow> = self
            .fetch_rows(
                self.request(Method::POST, "search_history")
                    .header("Prefer", "return=representation")
                    .json(&json!({
                        "user_id": user.id,
                        "topic": topic,
                        "summary": summary,
                        "pain_points": pain_points,
                    })),
                "create history",
            )
            .await?;

        Ok(rows.into_iter().next().map(|row| row.id))
    }

    async fn attach_ideas_to_history(
        &self,
        history_id: &str,
        ideas: &[AppIdea],
    ) -> Result<(), StoreError> {
        self.execute(
            self.request(Method::PATCH, "search_history")
                .query(&[("id", format!("eq.{}", history_id))])
                .json(&json!({ "ideas": ideas })),
            "attach ideas",
        )
        .await
    }

    async fn list_history(&self) -> Result<Vec<SearchHistoryRecord>, StoreError> {
        let Some(user) = self.session.current_user() else {
            return Ok(Vec::new());
        };

        let rows: Vec<HistoryRow> = self
            .fetch_rows(
                self.request(Method::GET, "search_history").query(&[
                    ("select", "*".to_string()),
                    ("user_id", format!("eq.{}", user.id)),
                    ("order", "created_at.desc".to_string()),
                ]),
                "list history",
            )
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_history(&self, id: &str) -> Result<(), StoreError> {
        self.execute(
            self.request(Method::DELETE, "search_history")
                .query(&[("id", format!("eq.{}", id))]),
            "delete history",
        )
        .await
    }

    async fn save_idea(
        &self,
        idea: &AppIdea,
        topic: &str,
        build_plan: Option<&BuildPlan>,
    ) -> Result<(), StoreError> {
        let user = self.session.current_user().ok_or(StoreError::NotSignedIn)?;
        if topic.trim().is_empty() {
            return Err(StoreError::MissingTopic);
        }

        let existing: Vec<SavedIdeaRow> = self
            .fetch_rows(
                self.request(Method::GET, "saved_ideas").query(&[
                    ("select", "*".to_string()),
                    ("user_id", format!("eq.{}", user.id)),
                    ("title", format!("eq.{}", idea.title)),
                ]),
                "check saved idea",
            )
            .await?;

        if let Some(row) = existing.first() {
            // Already saved. Only a supplied plan changes anything.
            if let Some(plan) = build_plan {
                return self.attach_plan_to_saved_idea(&row.id, plan).await;
            }
            return Ok(());
        }

        self.execute(
            self.request(Method::POST, "saved_ideas").json(&json!({
                "user_id": user.id,
                "title": idea.title,
                "topic": topic,
                "one_liner": idea.one_liner,
                "full_idea_json": idea,
                "build_plan": build_plan,
            })),
            "save idea",
        )
        .await
    }

    async fn list_saved_ideas(&self) -> Result<Vec<SavedIdeaRecord>, StoreError> {
        let Some(user) = self.session.current_user() else {
            return Ok(Vec::new());
        };

        let rows: Vec<SavedIdeaRow> = self
            .fetch_rows(
                self.request(Method::GET, "saved_ideas").query(&[
                    ("select", "*".to_string()),
                    ("user_id", format!("eq.{}", user.id)),
                    ("order", "created_at.desc".to_string()),
                ]),
                "list saved ideas",
            )
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_saved_idea(&self, id: &str) -> Result<(), StoreError> {
        self.execute(
            self.request(Method::DELETE, "saved_ideas")
                .query(&[("id", format!("eq.{}", id))]),
            "delete saved idea",
        )
        .await
    }

    async fn delete_saved_idea_by_title(&self, title: &str) -> Result<(), StoreError> {
        // Signed out means nothing is saved; unsaving is a silent no-op.
        let Some(user) = self.session.current_user() else {
            return Ok(());
        };

        // Deliberately unfiltered by id: removes race-created duplicates too.
        self.execute(
            self.request(Method::DELETE, "saved_ideas").query(&[
                ("user_id", format!("eq.{}", user.id)),
                ("title", format!("eq.{}", title)),
            ]),
            "delete saved idea by title",
        )
        .await
    }

    async fn attach_plan_to_saved_idea(
        &self,
        id: &str,
        plan: &BuildPlan,
    ) -> Result<(), StoreError> {
        self.execute(
            self.request(Method::PATCH, "saved_ideas")
                .query(&[("id", format!("eq.{}", id))])
                .json(&json!({ "build_plan": plan })),
            "attach build plan",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_row_maps_to_record() {
        let row: HistoryRow = serde_json::from_value(json!({
            "id": "row-1",
            "user_id": "user-1",
            "topic": "Remote Work",
            "summary": "### 1. Meeting overload",
            "pain_points": {
                "summary": "### 1. Meeting overload",
                "rawText": "Meeting overload",
                "sources": [{ "title": "r/remotework", "uri": "https://reddit.com/r/remotework" }]
            },
            "ideas": null,
            "created_at": "2026-02-10T09:30:00+00:00"
        }))
        .unwrap();

        let record: SearchHistoryRecord = row.into();
        assert_eq!(record.id, "row-1");
        assert!(record.ideas.is_none());
        assert_eq!(record.pain_points.sources.len(), 1);
    }

    #[test]
    fn saved_idea_row_maps_to_record() {
        let row: SavedIdeaRow = serde_json::from_value(json!({
            "id": "row-2",
            "user_id": "user-1",
            "title": "MeetShield",
            "topic": "Remote Work",
            "one_liner": "Blocks meetings that should be emails",
            "full_idea_json": {
                "title": "MeetShield",
                "oneLiner": "Blocks meetings that should be emails",
                "problemSolved": "Meeting overload",
                "targetAudience": "Remote teams",
                "coreFeatures": ["Calendar triage"],
                "monetization": "Subscription",
                "techComplexity": "Low"
            },
            "build_plan": null,
            "created_at": "2026-02-10T09:31:00+00:00"
        }))
        .unwrap();

        let record: SavedIdeaRecord = row.into();
        assert_eq!(record.title, "MeetShield");
        assert_eq!(record.full_idea_json.core_features, vec!["Calendar triage"]);
        assert!(record.build_plan.is_none());
    }

    #[test]
    fn rest_url_strips_trailing_slash() {
        let session = Arc::new(UserSession::new());
        let auth = Arc::new(AuthClient::new(
            "https://example.supabase.co/",
            "anon".to_string(),
            Arc::clone(&session),
        ));
        let store = SupabaseStore::new("https://example.supabase.co/", auth, session);
        assert_eq!(store.rest_url, "https://example.supabase.co/rest/v1");
    }

    #[tokio::test]
    async fn signed_out_delete_by_title_is_a_silent_no_op() {
        // Matches the in-memory store: unsaving while signed out succeeds
        // without issuing any request.
        let session = Arc::new(UserSession::new());
        let auth = Arc::new(AuthClient::new(
            "https://example.supabase.co",
            "anon".to_string(),
            Arc::clone(&session),
        ));
        let store = SupabaseStore::new("https://example.supabase.co", auth, session);

        assert!(store.delete_saved_idea_by_title("MeetShield").await.is_ok());
    }
}
