//! Record store trait and in-memory implementation.
//!
//! The store owns the two persisted collections: search history and saved
//! ideas. Every user-scoped operation reads the injected [`UserSession`];
//! writes while signed out are a silent no-op (history) or an explicit
//! error (saved ideas), never a crash.
//!
//! # Implementations
//!
//! - [`InMemoryRecordStore`] - RwLock-backed store for tests and anonymous
//!   sessions; rows scoped by owner exactly like the hosted backend's
//!   row-level security.
//! - `SupabaseStore` - PostgREST-backed store (in the app crate).

use crate::error::StoreError;
use crate::session::UserSession;
use crate::types::{AppIdea, BuildPlan, PainPointResult, SavedIdeaRecord, SearchHistoryRecord};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Per-user CRUD over search history and saved ideas.
///
/// # Design notes
///
/// - `create_history` returns `Ok(None)` when nobody is signed in; callers
///   must tolerate a missing id and may retry creation later (the workflow
///   does so at ideation time).
/// - Saved-idea dedup is check-then-act by (user, title) with no
///   transactional guarantee. Two tabs saving concurrently can still race
///   into duplicates; `delete_saved_idea_by_title` removes all matches as
///   the self-heal for exactly that case.
#[async_trait::async_trait(?Send)]
pub trait RecordStore {
    /// Creates a history record for a fresh search.
    ///
    /// Returns the server-assigned id, or `Ok(None)` when signed out.
    async fn create_history(
        &self,
        topic: &str,
        summary: &str,
        pain_points: &PainPointResult,
    ) -> Result<Option<String>, StoreError>;

    /// Attaches generated ideas to an existing history record.
    ///
    /// Updating a missing id is a no-op, matching an UPDATE with no rows.
    async fn attach_ideas_to_history(
        &self,
        history_id: &str,
        ideas: &[AppIdea],
    ) -> Result<(), StoreError>;

    /// Returns the current user's research sessions, newest first.
    async fn list_history(&self) -> Result<Vec<SearchHistoryRecord>, StoreError>;

    /// Deletes one history record by id.
    async fn delete_history(&self, id: &str) -> Result<(), StoreError>;

    /// Saves an idea for the current user, deduplicated by title.
    ///
    /// If a record with the same (user, title) exists and `build_plan` is
    /// supplied, only the plan field is overwritten; if one exists and no
    /// plan is supplied, this is an idempotent no-op. Otherwise inserts.
    async fn save_idea(
        &self,
        idea: &AppIdea,
        topic: &str,
        build_plan: Option<&BuildPlan>,
    ) -> Result<(), StoreError>;

    /// Returns the current user's saved ideas, newest first.
    async fn list_saved_ideas(&self) -> Result<Vec<SavedIdeaRecord>, StoreError>;

    /// Deletes one saved idea by id.
    async fn delete_saved_idea(&self, id: &str) -> Result<(), StoreError>;

    /// Deletes every saved idea matching (user, title).
    ///
    /// Bulk on purpose: this also cleans up duplicates created by the
    /// check-then-act race in [`RecordStore::save_idea`]. Signed out is a
    /// silent no-op; there is nothing to remove.
    async fn delete_saved_idea_by_title(&self, title: &str) -> Result<(), StoreError>;

    /// Overwrites the build plan on one saved idea by id.
    async fn attach_plan_to_saved_idea(
        &self,
        id: &str,
        plan: &BuildPlan,
    ) -> Result<(), StoreError>;
}

fn lock_poisoned<T>(err: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Database(format!("Lock poisoned: {}", err))
}

/// In-memory record store for tests and anonymous sessions.
///
/// Rows carry their owner's user id and every read/write filters by the
/// session's current user, mirroring row-level security on the hosted
/// backend. Nothing is persisted across process restarts.
pub struct InMemoryRecordStore {
    session: Arc<UserSession>,
    history: RwLock<Vec<(String, SearchHistoryRecord)>>,
    saved: RwLock<Vec<(String, SavedIdeaRecord)>>,
    next_id: AtomicU64,
}

impl InMemoryRecordStore {
    /// Creates an empty store scoped to `session`.
    pub fn new(session: Arc<UserSession>) -> Self {
        Self {
            session,
            history: RwLock::new(Vec::new()),
            saved: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn assign_id(&self) -> String {
        format!("mem-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

#[async_trait::async_trait(?Send)]
impl RecordStore for InMemoryRecordStore {
    async fn create_history(
        &self,
        topic: &str,
        summary: &str,
        pain_points: &PainPointResult,
    ) -> Result<Option<String>, StoreError> {
        let Some(user) = self.session.current_user() else {
            return Ok(None);
        };

        let record = SearchHistoryRecord {
            id: self.assign_id(),
            topic: topic.to_string(),
            summary: summary.to_string(),
            pain_points: pain_points.clone(),
            ideas: None,
            created_at: Self::now(),
        };
        let id = record.id.clone();

        let mut history = self.history.write().map_err(lock_poisoned)?;
        history.push((user.id, record));
        Ok(Some(id))
    }

    async fn attach_ideas_to_history(
        &self,
        history_id: &str,
        ideas: &[AppIdea],
    ) -> Result<(), StoreError> {
        let mut history = self.history.write().map_err(lock_poisoned)?;
        if let Some((_, record)) = history.iter_mut().find(|(_, r)| r.id == history_id) {
            record.ideas = Some(ideas.to_vec());
        }
        Ok(())
    }

    async fn list_history(&self) -> Result<Vec<SearchHistoryRecord>, StoreError> {
        let Some(user) = self.session.current_user() else {
            return Ok(Vec::new());
        };

        let history = self.history.read().map_err(lock_poisoned)?;
        // Insertion order is creation order; newest first.
        Ok(history
            .iter()
            .rev()
            .filter(|(owner, _)| *owner == user.id)
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn delete_history(&self, id: &str) -> Result<(), StoreError> {
        let mut history = self.history.write().map_err(lock_poisoned)?;
        history.retain(|(_, record)| record.id != id);
        Ok(())
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

        let mut saved = self.saved.write().map_err(lock_poisoned)?;

        // Check-then-act: look for an existing (user, title) record first.
        if let Some((_, existing)) = saved
            .iter_mut()
            .find(|(owner, record)| *owner == user.id && record.title == idea.title)
        {
            if let Some(plan) = build_plan {
                existing.build_plan = Some(plan.clone());
            }
            return Ok(());
        }

        let record = SavedIdeaRecord {
            id: self.assign_id(),
            title: idea.title.clone(),
            topic: topic.to_string(),
            one_liner: idea.one_liner.clone(),
            full_idea_json: idea.clone(),
            build_plan: build_plan.cloned(),
            created_at: Self::now(),
        };
        saved.push((user.id, record));
        Ok(())
    }

    async fn list_saved_ideas(&self) -> Result<Vec<SavedIdeaRecord>, StoreError> {
        let Some(user) = self.session.current_user() else {
            return Ok(Vec::new());
        };

        let saved = self.saved.read().map_err(lock_poisoned)?;
        Ok(saved
            .iter()
            .rev()
            .filter(|(owner, _)| *owner == user.id)
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn delete_saved_idea(&self, id: &str) -> Result<(), StoreError> {
        let mut saved = self.saved.write().map_err(lock_poisoned)?;
        saved.retain(|(_, record)| record.id != id);
        Ok(())
    }

    async fn delete_saved_idea_by_title(&self, title: &str) -> Result<(), StoreError> {
        let Some(user) = self.session.current_user() else {
            return Ok(());
        };

        let mut saved = self.saved.write().map_err(lock_poisoned)?;
        saved.retain(|(owner, record)| !(*owner == user.id && record.title == title));
        Ok(())
    }

    async fn attach_plan_to_saved_idea(
        &self,
        id: &str,
        plan: &BuildPlan,
    ) -> Result<(), StoreError> {
        let mut saved = self.saved.write().map_err(lock_poisoned)?;
        if let Some((_, record)) = saved.iter_mut().find(|(_, r)| r.id == id) {
            record.build_plan = Some(plan.clone());
        }
        Ok(())
    }
}

// Forwarding impl so a store can be shared between the workflow and views.
#[async_trait::async_trait(?Send)]
impl<T: RecordStore> RecordStore for Arc<T> {
    async fn create_history(
        &self,
        topic: &str,
        summary: &str,
        pain_points: &PainPointResult,
    ) -> Result<Option<String>, StoreError> {
        (**self).create_history(topic, summary, pain_points).await
    }

    async fn attach_ideas_to_history(
        &self,
        history_id: &str,
        ideas: &[AppIdea],
    ) -> Result<(), StoreError> {
        (**self).attach_ideas_to_history(history_id, ideas).await
    }

    async fn list_history(&self) -> Result<Vec<SearchHistoryRecord>, StoreError> {
        (**self).list_history().await
    }

    async fn delete_history(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete_history(id).await
    }

    async fn save_idea(
        &self,
        idea: &AppIdea,
        topic: &str,
        build_plan: Option<&BuildPlan>,
    ) -> Result<(), StoreError> {
        (**self).save_idea(idea, topic, build_plan).await
    }

    async fn list_saved_ideas(&self) -> Result<Vec<SavedIdeaRecord>, StoreError> {
        (**self).list_saved_ideas().await
    }

    async fn delete_saved_idea(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete_saved_idea(id).await
    }

    async fn delete_saved_idea_by_title(&self, title: &str) -> Result<(), StoreError> {
        (**self).delete_saved_idea_by_title(title).await
    }

    async fn attach_plan_to_saved_idea(
        &self,
        id: &str,
        plan: &BuildPlan,
    ) -> Result<(), StoreError> {
        (**self).attach_plan_to_saved_idea(id, plan).await
    }
}
