//! The workflow controller state machine.
//!
//! [`Workflow`] owns all mutable flow state and mediates between user
//! intents, the remote research service, and the record store. One async
//! handler per event; every handler leaves the state machine in a definite
//! [`WorkflowState`], never stuck in a loading state.
//!
//! Remote events are processed one at a time by the caller (the app drives
//! them from a single coroutine). Pure transitions (navigation, reset,
//! restore, back) live on [`ResearchFlowState`] directly so the caller can
//! apply them synchronously while a remote call is still suspended; a view
//! change never waits on the network. There is no request fencing: a remote
//! handler that resolves after such a transition still writes its result
//! (last response wins).

use crate::research::ResearchService;
use crate::store::RecordStore;
use crate::types::{AppIdea, BuildPlan, PainPointResult, SavedIdeaRecord, SearchHistoryRecord};
use tracing::{debug, warn};

/// The application states, one per rendered view or loading phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Searching,
    ReviewingPains,
    GeneratingIdeas,
    DisplayIdeas,
    GeneratingPlan,
    DisplayPlan,
    History,
    Saved,
    Error,
}

/// Navigation targets forwarded from the app bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// The dashboard; resolves to the deepest state the in-memory research
    /// supports, or Idle when nothing is loaded.
    Home,
    History,
    Saved,
}

/// Everything the presentation layer observes.
///
/// Cloned into a signal after every handled event; cheap relative to the
/// remote calls that produce it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResearchFlowState {
    pub phase: WorkflowState,
    pub topic: String,
    pub pain_points: Option<PainPointResult>,
    pub ideas: Vec<AppIdea>,
    pub selected_idea: Option<AppIdea>,
    pub build_plan: Option<BuildPlan>,
    pub error: Option<String>,
    /// Id of the history record tracking the current session, captured at
    /// search time so ideation can update the same record later.
    pub history_id: Option<String>,
}

/// Pure transitions, usable on the state alone so the presentation layer
/// can apply them without going through the remote-event queue.
impl ResearchFlowState {
    /// Returns from the build plan to the idea grid.
    pub fn back_to_ideas(&mut self) {
        self.phase = WorkflowState::DisplayIdeas;
        self.build_plan = None;
        self.selected_idea = None;
    }

    /// Clears the whole session back to the idle search form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Restores a past research session from a history record.
    pub fn restore(&mut self, record: SearchHistoryRecord) {
        self.topic = record.topic;
        self.pain_points = Some(record.pain_points);
        self.history_id = Some(record.id);

        match record.ideas {
            Some(ideas) if !ideas.is_empty() => {
                self.ideas = ideas;
                self.phase = WorkflowState::DisplayIdeas;
            }
            _ => {
                self.ideas.clear();
                self.phase = WorkflowState::ReviewingPains;
            }
        }
    }

    /// Switches between the dashboard, history, and saved views.
    pub fn navigate(&mut self, target: NavTarget) {
        match target {
            NavTarget::History => self.phase = WorkflowState::History,
            NavTarget::Saved => self.phase = WorkflowState::Saved,
            NavTarget::Home => {
                // Only meaningful when leaving History/Saved; the dashboard
                // button is already active everywhere else.
                if matches!(self.phase, WorkflowState::History | WorkflowState::Saved) {
                    self.phase = resume_view(
                        self.pain_points.is_some(),
                        !self.ideas.is_empty(),
                        self.build_plan.is_some(),
                    );
                }
            }
        }
    }
}

/// Pure view-resumption rule for navigating home from History/Saved.
///
/// Returns the deepest state the in-memory research supports: the build
/// plan if one is loaded, else the idea grid, else the pain-point report,
/// else the idle search form.
pub fn resume_view(has_pain_points: bool, has_ideas: bool, has_plan: bool) -> WorkflowState {
    if !has_pain_points {
        WorkflowState::Idle
    } else if has_plan {
        WorkflowState::DisplayPlan
    } else if has_ideas {
        WorkflowState::DisplayIdeas
    } else {
        WorkflowState::ReviewingPains
    }
}

/// The orchestration core: state machine plus the two services it drives.
pub struct Workflow<R, S> {
    research: R,
    store: S,
    pub state: ResearchFlowState,
}

impl<R: ResearchService, S: RecordStore> Workflow<R, S> {
    pub fn new(research: R, store: S) -> Self {
        Self {
            research,
            store,
            state: ResearchFlowState::default(),
        }
    }

    /// Starts a fresh research session for `topic`.
    ///
    /// An empty or whitespace-only topic is rejected before any call is
    /// made and causes no state change. The history record is created
    /// best-effort; a missing id is tolerated and retried at ideation time.
    pub async fn submit_search(&mut self, topic: &str) {
        if topic.trim().is_empty() {
            return;
        }

        self.state.topic = topic.to_string();
        self.state.phase = WorkflowState::Searching;
        self.state.error = None;
        self.state.pain_points = None;
        self.state.ideas.clear();
        self.state.build_plan = None;
        self.state.history_id = None;

        match self.research.search_pain_points(topic).await {
            Ok(result) => {
                match self
                    .store
                    .create_history(topic, &result.summary, &result)
                    .await
                {
                    Ok(Some(id)) => self.state.history_id = Some(id),
                    Ok(None) => debug!("no signed-in user; search not recorded to history"),
                    Err(err) => warn!("failed to save history record: {err}"),
                }
                self.state.pain_points = Some(result);
                self.state.phase = WorkflowState::ReviewingPains;
            }
            Err(err) => {
                self.state.error = Some(err.to_string());
                self.state.phase = WorkflowState::Error;
            }
        }
    }

    /// Generates ideas from the current pain-point result.
    ///
    /// The ideate call must succeed before any history bookkeeping runs,
    /// and that bookkeeping is best-effort: if the search-time record
    /// creation failed, one is created now from the pain points already in
    /// hand; failures here are logged and never block displaying the ideas.
    pub async fn generate_ideas(&mut self) {
        let Some(pain_points) = self.state.pain_points.clone() else {
            return;
        };

        self.state.phase = WorkflowState::GeneratingIdeas;
        self.state.error = None;

        let generated = match self
            .research
            .generate_ideas(&self.state.topic, &pain_points.raw_text)
            .await
        {
            Ok(ideas) => ideas,
            Err(err) => {
                self.state.error = Some(err.to_string());
                self.state.phase = WorkflowState::Error;
                return;
            }
        };

        self.state.ideas = generated.clone();
        self.state.phase = WorkflowState::DisplayIdeas;

        // Recovery branch: make sure a history record exists before
        // attaching ideas to it.
        if self.state.history_id.is_none() {
            match self
                .store
                .create_history(&self.state.topic, &pain_points.summary, &pain_points)
                .await
            {
                Ok(Some(id)) => self.state.history_id = Some(id),
                Ok(None) => debug!("no signed-in user; ideas not recorded to history"),
                Err(err) => warn!("failed to recover history session: {err}"),
            }
        }

        if let Some(id) = self.state.history_id.clone() {
            if let Err(err) = self.store.attach_ideas_to_history(&id, &generated).await {
                warn!("failed to attach ideas to history record {id}: {err}");
            }
        }
    }

    /// Generates a build plan for `idea` from the idea grid.
    pub async fn build_plan(&mut self, idea: AppIdea) {
        self.state.selected_idea = Some(idea.clone());
        self.state.phase = WorkflowState::GeneratingPlan;
        self.state.error = None;

        match self.research.generate_build_plan(&idea).await {
            Ok(plan) => {
                self.state.build_plan = Some(plan);
                self.state.phase = WorkflowState::DisplayPlan;
            }
            Err(err) => {
                self.state.error = Some(err.to_string());
                self.state.phase = WorkflowState::Error;
            }
        }
    }

    /// Opens a saved idea's build plan.
    ///
    /// A cached plan is displayed directly without any remote call. With no
    /// cached plan, exactly one plan call is made and the result persisted
    /// onto the same saved record before display; that persistence is
    /// required, so its failure surfaces as the error state.
    pub async fn view_saved_idea(&mut self, record: SavedIdeaRecord) {
        self.state.selected_idea = Some(record.full_idea_json.clone());

        if let Some(plan) = record.build_plan {
            self.state.build_plan = Some(plan);
            self.state.phase = WorkflowState::DisplayPlan;
            return;
        }

        self.state.phase = WorkflowState::GeneratingPlan;
        self.state.error = None;

        match self.research.generate_build_plan(&record.full_idea_json).await {
            Ok(plan) => {
                if let Err(err) = self
                    .store
                    .attach_plan_to_saved_idea(&record.id, &plan)
                    .await
                {
                    self.state.error = Some(err.to_string());
                    self.state.phase = WorkflowState::Error;
                    return;
                }
                self.state.build_plan = Some(plan);
                self.state.phase = WorkflowState::DisplayPlan;
            }
            Err(err) => {
                self.state.error = Some(err.to_string());
                self.state.phase = WorkflowState::Error;
            }
        }
    }

    /// Returns from the build plan to the idea grid.
    pub fn back_to_ideas(&mut self) {
        self.state.back_to_ideas();
    }

    /// Clears the whole session back to the idle search form.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Restores a past research session from a history record.
    pub fn restore(&mut self, record: SearchHistoryRecord) {
        self.state.restore(record);
    }

    /// Switches between the dashboard, history, and saved views.
    pub fn navigate(&mut self, target: NavTarget) {
        self.state.navigate(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ResearchError, StoreError};
    use crate::session::{User, UserSession};
    use crate::store::InMemoryRecordStore;
    use crate::types::{RoadmapPhase, Source, TechComplexity};
    use std::cell::{Cell, RefCell};
    use std::sync::Arc;

    fn make_pain_points(summary: &str, sources: Vec<Source>) -> PainPointResult {
        PainPointResult {
            summary: summary.to_string(),
            raw_text: summary.to_string(),
            sources,
        }
    }

    fn make_idea(title: &str) -> AppIdea {
        AppIdea {
            title: title.to_string(),
            one_liner: "Does one thing well".to_string(),
            problem_solved: "A specific complaint".to_string(),
            target_audience: "Indie hackers".to_string(),
            core_features: vec!["Feature A".to_string()],
            monetization: "Subscription".to_string(),
            tech_complexity: TechComplexity::Low,
        }
    }

    fn make_plan() -> BuildPlan {
        BuildPlan {
            roadmap: vec![RoadmapPhase {
                phase: "Planning".to_string(),
                duration: "1 Week".to_string(),
                tasks: vec!["Scope".to_string()],
            }],
            prd: "# PRD".to_string(),
            vibe_coding_prompt: "Scaffold the app".to_string(),
        }
    }

    /// Scripted research service with per-operation call counters. Results
    /// sit behind RefCell so a test can rescript mid-flow.
    struct StubResearch {
        search_result: RefCell<Result<PainPointResult, ResearchError>>,
        ideas_result: RefCell<Result<Vec<AppIdea>, ResearchError>>,
        plan_result: RefCell<Result<BuildPlan, ResearchError>>,
        search_calls: Cell<usize>,
        ideas_calls: Cell<usize>,
        plan_calls: Cell<usize>,
    }

    impl StubResearch {
        fn happy() -> Self {
            Self {
                search_result: RefCell::new(Ok(make_pain_points(
                    "### 1. Subscription Fatigue",
                    vec![Source {
                        title: "Forum thread".to_string(),
                        uri: "https://example.com/thread".to_string(),
                    }],
                ))),
                ideas_result: RefCell::new(Ok(vec![
                    make_idea("A"),
                    make_idea("B"),
                    make_idea("C"),
                ])),
                plan_result: RefCell::new(Ok(make_plan())),
                search_calls: Cell::new(0),
                ideas_calls: Cell::new(0),
                plan_calls: Cell::new(0),
            }
        }
    }

    #[async_trait::async_trait(?Send)]
    impl ResearchService for &StubResearch {
        async fn search_pain_points(&self, _topic: &str) -> Result<PainPointResult, ResearchError> {
            self.search_calls.set(self.search_calls.get() + 1);
            self.search_result.borrow().clone()
        }

        async fn generate_ideas(
            &self,
            _topic: &str,
            _pain_points_raw: &str,
        ) -> Result<Vec<AppIdea>, ResearchError> {
            self.ideas_calls.set(self.ideas_calls.get() + 1);
            self.ideas_result.borrow().clone()
        }

        async fn generate_build_plan(&self, _idea: &AppIdea) -> Result<BuildPlan, ResearchError> {
            self.plan_calls.set(self.plan_calls.get() + 1);
            self.plan_result.borrow().clone()
        }
    }

    /// Store wrapper that fails the first `failures` history creations,
    /// simulating a write error during the initial search save.
    struct FlakyCreateStore {
        inner: InMemoryRecordStore,
        failures: Cell<u32>,
    }

    #[async_trait::async_trait(?Send)]
    impl RecordStore for FlakyCreateStore {
        async fn create_history(
            &self,
            topic: &str,
            summary: &str,
            pain_points: &PainPointResult,
        ) -> Result<Option<String>, StoreError> {
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(StoreError::Database("insert failed".to_string()));
            }
            self.inner.create_history(topic, summary, pain_points).await
        }

        async fn attach_ideas_to_history(
            &self,
            history_id: &str,
            ideas: &[AppIdea],
        ) -> Result<(), StoreError> {
            self.inner.attach_ideas_to_history(history_id, ideas).await
        }

        async fn list_history(&self) -> Result<Vec<SearchHistoryRecord>, StoreError> {
            self.inner.list_history().await
        }

        async fn delete_history(&self, id: &str) -> Result<(), StoreError> {
            self.inner.delete_history(id).await
        }

        async fn save_idea(
            &self,
            idea: &AppIdea,
            topic: &str,
            build_plan: Option<&BuildPlan>,
        ) -> Result<(), StoreError> {
            self.inner.save_idea(idea, topic, build_plan).await
        }

        async fn list_saved_ideas(&self) -> Result<Vec<SavedIdeaRecord>, StoreError> {
            self.inner.list_saved_ideas().await
        }

        async fn delete_saved_idea(&self, id: &str) -> Result<(), StoreError> {
            self.inner.delete_saved_idea(id).await
        }

        async fn delete_saved_idea_by_title(&self, title: &str) -> Result<(), StoreError> {
            self.inner.delete_saved_idea_by_title(title).await
        }

        async fn attach_plan_to_saved_idea(
            &self,
            id: &str,
            plan: &BuildPlan,
        ) -> Result<(), StoreError> {
            self.inner.attach_plan_to_saved_idea(id, plan).await
        }
    }

    fn signed_in_session() -> Arc<UserSession> {
        Arc::new(UserSession::signed_in(User {
            id: "user-1".to_string(),
            email: "ada@example.com".to_string(),
        }))
    }

    fn workflow<'a>(
        research: &'a StubResearch,
    ) -> Workflow<&'a StubResearch, Arc<InMemoryRecordStore>> {
        let store = Arc::new(InMemoryRecordStore::new(signed_in_session()));
        Workflow::new(research, store)
    }

    #[tokio::test]
    async fn search_transitions_to_reviewing_pains() {
        let research = StubResearch::happy();
        let mut flow = workflow(&research);

        flow.submit_search("Fitness").await;

        assert_eq!(flow.state.phase, WorkflowState::ReviewingPains);
        assert_eq!(flow.state.topic, "Fitness");
        assert!(flow.state.pain_points.is_some());
        assert!(flow.state.error.is_none());
        assert_eq!(research.search_calls.get(), 1);
    }

    #[tokio::test]
    async fn search_failure_lands_in_error_and_is_resumable() {
        let research = StubResearch::happy();
        research.search_result.replace(Err(ResearchError::RequestFailed(
            "Failed to search for pain points. Please try again.".to_string(),
        )));
        let mut flow = workflow(&research);

        flow.submit_search("Fitness").await;
        assert_eq!(flow.state.phase, WorkflowState::Error);
        assert!(flow.state.error.as_ref().unwrap().contains("pain points"));
        // The topic survives into the error state so the user can retry the
        // same search without retyping it.
        assert_eq!(flow.state.topic, "Fitness");

        // Error is not terminal: a new submission re-enters the flow.
        research
            .search_result
            .replace(Ok(make_pain_points("### 1. Something", Vec::new())));
        flow.submit_search("Fitness").await;
        assert_eq!(flow.state.phase, WorkflowState::ReviewingPains);
        assert!(flow.state.error.is_none());
    }

    #[tokio::test]
    async fn empty_topic_causes_no_state_change_and_no_call() {
        let research = StubResearch::happy();
        let mut flow = workflow(&research);

        flow.submit_search("   ").await;

        assert_eq!(flow.state, ResearchFlowState::default());
        assert_eq!(research.search_calls.get(), 0);
    }

    #[tokio::test]
    async fn search_then_ideate_updates_the_same_history_record() {
        let research = StubResearch::happy();
        let store = Arc::new(InMemoryRecordStore::new(signed_in_session()));
        let mut flow = Workflow::new(&research, Arc::clone(&store));

        flow.submit_search("Fitness").await;
        let history = store.list_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].ideas.is_none());
        assert_eq!(flow.state.history_id.as_deref(), Some(history[0].id.as_str()));

        flow.generate_ideas().await;
        assert_eq!(flow.state.phase, WorkflowState::DisplayIdeas);
        assert_eq!(flow.state.ideas.len(), 3);

        let history = store.list_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].ideas.as_ref().unwrap().len(), 3);

        // Round trip: restoring the record reproduces topic, pains, ideas.
        flow.reset();
        flow.restore(history[0].clone());
        assert_eq!(flow.state.phase, WorkflowState::DisplayIdeas);
        assert_eq!(flow.state.topic, "Fitness");
        assert!(flow.state.pain_points.is_some());
        assert_eq!(flow.state.ideas.len(), 3);
    }

    #[tokio::test]
    async fn restore_without_ideas_reviews_pains() {
        let research = StubResearch::happy();
        let mut flow = workflow(&research);

        flow.restore(SearchHistoryRecord {
            id: "h1".to_string(),
            topic: "Fitness".to_string(),
            summary: "### 1. Something".to_string(),
            pain_points: make_pain_points("### 1. Something", Vec::new()),
            ideas: None,
            created_at: "2026-01-05T12:00:00Z".to_string(),
        });

        assert_eq!(flow.state.phase, WorkflowState::ReviewingPains);
        assert!(flow.state.ideas.is_empty());
        assert_eq!(flow.state.history_id.as_deref(), Some("h1"));
    }

    #[tokio::test]
    async fn ideate_recovers_a_missing_history_record() {
        let research = StubResearch::happy();
        let store = Arc::new(FlakyCreateStore {
            inner: InMemoryRecordStore::new(signed_in_session()),
            failures: Cell::new(1),
        });
        let mut flow = Workflow::new(&research, Arc::clone(&store));

        // Search-time creation fails; the session continues without an id.
        flow.submit_search("Fitness").await;
        assert_eq!(flow.state.phase, WorkflowState::ReviewingPains);
        assert!(flow.state.history_id.is_none());
        assert!(store.list_history().await.unwrap().is_empty());

        // Ideation creates the record before attaching ideas to it.
        flow.generate_ideas().await;
        assert_eq!(flow.state.phase, WorkflowState::DisplayIdeas);
        let history = store.list_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].ideas.as_ref().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn failed_recovery_never_blocks_the_ideas() {
        let research = StubResearch::happy();
        let store = Arc::new(FlakyCreateStore {
            inner: InMemoryRecordStore::new(signed_in_session()),
            failures: Cell::new(2),
        });
        let mut flow = Workflow::new(&research, Arc::clone(&store));

        flow.submit_search("Fitness").await;
        flow.generate_ideas().await;

        // Both creations failed, but the ideas are displayed and no error
        // state was entered.
        assert_eq!(flow.state.phase, WorkflowState::DisplayIdeas);
        assert_eq!(flow.state.ideas.len(), 3);
        assert!(flow.state.error.is_none());
        assert!(store.list_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn anonymous_search_skips_history_silently() {
        let research = StubResearch::happy();
        let store = Arc::new(InMemoryRecordStore::new(Arc::new(UserSession::new())));
        let mut flow = Workflow::new(&research, Arc::clone(&store));

        flow.submit_search("Fitness").await;
        flow.generate_ideas().await;

        assert_eq!(flow.state.phase, WorkflowState::DisplayIdeas);
        assert!(flow.state.history_id.is_none());
        assert!(flow.state.error.is_none());
    }

    #[tokio::test]
    async fn build_plan_success_and_back() {
        let research = StubResearch::happy();
        let mut flow = workflow(&research);

        flow.submit_search("Fitness").await;
        flow.generate_ideas().await;
        flow.build_plan(flow.state.ideas[0].clone()).await;

        assert_eq!(flow.state.phase, WorkflowState::DisplayPlan);
        assert!(flow.state.build_plan.is_some());
        assert!(flow.state.selected_idea.is_some());

        flow.back_to_ideas();
        assert_eq!(flow.state.phase, WorkflowState::DisplayIdeas);
        assert!(flow.state.build_plan.is_none());
        assert!(flow.state.selected_idea.is_none());
    }

    #[tokio::test]
    async fn build_plan_failure_lands_in_error() {
        let research = StubResearch::happy();
        research.plan_result.replace(Err(ResearchError::EmptyResponse(
            "No build plan generated.".to_string(),
        )));
        let mut flow = workflow(&research);

        flow.submit_search("Fitness").await;
        flow.generate_ideas().await;
        flow.build_plan(flow.state.ideas[0].clone()).await;

        assert_eq!(flow.state.phase, WorkflowState::Error);
        assert!(flow.state.build_plan.is_none());
    }

    #[tokio::test]
    async fn cached_saved_plan_issues_no_remote_call() {
        let research = StubResearch::happy();
        let mut flow = workflow(&research);

        flow.view_saved_idea(SavedIdeaRecord {
            id: "s1".to_string(),
            title: "A".to_string(),
            topic: "Fitness".to_string(),
            one_liner: "Does one thing well".to_string(),
            full_idea_json: make_idea("A"),
            build_plan: Some(make_plan()),
            created_at: "2026-01-05T12:00:00Z".to_string(),
        })
        .await;

        assert_eq!(flow.state.phase, WorkflowState::DisplayPlan);
        assert_eq!(research.plan_calls.get(), 0);
    }

    #[tokio::test]
    async fn uncached_saved_plan_is_generated_once_and_persisted() {
        let research = StubResearch::happy();
        let store = Arc::new(InMemoryRecordStore::new(signed_in_session()));
        store
            .save_idea(&make_idea("A"), "Fitness", None)
            .await
            .unwrap();
        let record = store.list_saved_ideas().await.unwrap().remove(0);
        let record_id = record.id.clone();
        let mut flow = Workflow::new(&research, Arc::clone(&store));

        flow.view_saved_idea(record).await;

        assert_eq!(flow.state.phase, WorkflowState::DisplayPlan);
        assert_eq!(research.plan_calls.get(), 1);
        let saved = store.list_saved_ideas().await.unwrap();
        assert_eq!(saved[0].id, record_id);
        assert_eq!(saved[0].build_plan.as_ref(), flow.state.build_plan.as_ref());
    }

    #[tokio::test]
    async fn back_clears_plan_after_viewing_a_saved_idea() {
        let research = StubResearch::happy();
        let mut flow = workflow(&research);

        flow.view_saved_idea(SavedIdeaRecord {
            id: "s1".to_string(),
            title: "A".to_string(),
            topic: "Fitness".to_string(),
            one_liner: "Does one thing well".to_string(),
            full_idea_json: make_idea("A"),
            build_plan: Some(make_plan()),
            created_at: "2026-01-05T12:00:00Z".to_string(),
        })
        .await;
        assert_eq!(flow.state.phase, WorkflowState::DisplayPlan);

        flow.back_to_ideas();
        assert_eq!(flow.state.phase, WorkflowState::DisplayIdeas);
        assert!(flow.state.build_plan.is_none());
        assert!(flow.state.selected_idea.is_none());
    }

    #[tokio::test]
    async fn empty_sources_still_reaches_reviewing_pains() {
        let research = StubResearch::happy();
        research
            .search_result
            .replace(Ok(make_pain_points("### 1. Tracking fatigue", Vec::new())));
        let mut flow = workflow(&research);

        flow.submit_search("Fitness").await;

        assert_eq!(flow.state.phase, WorkflowState::ReviewingPains);
        assert!(flow.state.pain_points.as_ref().unwrap().sources.is_empty());
    }

    #[tokio::test]
    async fn navigation_resumes_the_deepest_state() {
        let research = StubResearch::happy();
        let mut flow = workflow(&research);

        flow.submit_search("Fitness").await;
        flow.generate_ideas().await;

        flow.navigate(NavTarget::History);
        assert_eq!(flow.state.phase, WorkflowState::History);

        flow.navigate(NavTarget::Home);
        assert_eq!(flow.state.phase, WorkflowState::DisplayIdeas);

        flow.build_plan(flow.state.ideas[0].clone()).await;
        flow.navigate(NavTarget::Saved);
        flow.navigate(NavTarget::Home);
        assert_eq!(flow.state.phase, WorkflowState::DisplayPlan);
    }

    #[tokio::test]
    async fn navigating_home_without_research_goes_idle() {
        let research = StubResearch::happy();
        let mut flow = workflow(&research);

        flow.navigate(NavTarget::Saved);
        flow.navigate(NavTarget::Home);
        assert_eq!(flow.state.phase, WorkflowState::Idle);
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let research = StubResearch::happy();
        let mut flow = workflow(&research);

        flow.submit_search("Fitness").await;
        flow.generate_ideas().await;
        flow.build_plan(flow.state.ideas[0].clone()).await;

        flow.reset();
        assert_eq!(flow.state, ResearchFlowState::default());
    }

    #[test]
    fn pure_transitions_apply_to_the_state_alone() {
        // While a remote call holds the workflow, view changes go straight
        // to the state; none of these need the services or an await.
        let mut state = ResearchFlowState {
            phase: WorkflowState::Searching,
            topic: "Fitness".to_string(),
            ..Default::default()
        };

        state.navigate(NavTarget::History);
        assert_eq!(state.phase, WorkflowState::History);

        state.navigate(NavTarget::Home);
        assert_eq!(state.phase, WorkflowState::Idle);

        state.ideas = vec![make_idea("A")];
        state.pain_points = Some(make_pain_points("### 1. Something", Vec::new()));
        state.build_plan = Some(make_plan());
        state.back_to_ideas();
        assert_eq!(state.phase, WorkflowState::DisplayIdeas);
        assert!(state.build_plan.is_none());

        state.reset();
        assert_eq!(state, ResearchFlowState::default());
    }

    #[test]
    fn resume_view_is_pure_and_exhaustive() {
        assert_eq!(resume_view(false, false, false), WorkflowState::Idle);
        assert_eq!(resume_view(false, true, true), WorkflowState::Idle);
        assert_eq!(resume_view(true, false, false), WorkflowState::ReviewingPains);
        assert_eq!(resume_view(true, true, false), WorkflowState::DisplayIdeas);
        assert_eq!(resume_view(true, false, true), WorkflowState::DisplayPlan);
        assert_eq!(resume_view(true, true, true), WorkflowState::DisplayPlan);
    }
}
