//! # Nichescout Core
//!
//! Platform-independent library for the Nichescout research workflow.
//!
//! This crate contains everything the UI does not: the domain model, the
//! workflow state machine, the service traits the app implements against
//! remote backends, and an in-memory record store used by tests.
//!
//! ## Modules
//!
//! - [`types`] - Domain and persisted record types
//! - [`error`] - Error types for research and persistence operations
//! - [`session`] - Explicit per-user session context
//! - [`research`] - Remote research service trait (search / ideate / plan)
//! - [`store`] - Record store trait and in-memory implementation
//! - [`workflow`] - The workflow controller state machine

pub mod error;
pub mod research;
pub mod session;
pub mod store;
pub mod types;
pub mod workflow;

pub use error::{ResearchError, StoreError};
pub use research::ResearchService;
pub use session::{User, UserSession};
pub use store::{InMemoryRecordStore, RecordStore};
pub use types::{
    AppIdea, BuildPlan, PainPointResult, RoadmapPhase, SavedIdeaRecord, SearchHistoryRecord,
    Source, TechComplexity,
};
pub use workflow::{resume_view, NavTarget, ResearchFlowState, Workflow, WorkflowState};
