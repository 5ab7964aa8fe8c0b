//! Remote research service trait.
//!
//! Three single-shot operations against a hosted generative backend. Calls
//! are non-streaming and carry no built-in retry; retry policy belongs to
//! the caller (in practice: the user re-issuing the action).

use crate::error::ResearchError;
use crate::types::{AppIdea, BuildPlan, PainPointResult};

/// The three remote operations the workflow orchestrates.
///
/// `?Send` because the app runs this on a single-threaded UI executor; the
/// in-process test stub holds non-Send interior state for call counting.
#[async_trait::async_trait(?Send)]
pub trait ResearchService {
    /// Performs a grounded web search for pain points around `topic`.
    ///
    /// The returned source list may be empty, meaning the write-up was
    /// synthesized rather than grounded.
    async fn search_pain_points(&self, topic: &str) -> Result<PainPointResult, ResearchError>;

    /// Generates exactly 3 product ideas from a pain-point write-up.
    ///
    /// Fails with [`ResearchError::EmptyResponse`] or
    /// [`ResearchError::InvalidResponse`] when the backend returns nothing
    /// parsable.
    async fn generate_ideas(
        &self,
        topic: &str,
        pain_points_raw: &str,
    ) -> Result<Vec<AppIdea>, ResearchError>;

    /// Generates a build plan (roadmap, PRD, coding prompt) for one idea.
    async fn generate_build_plan(&self, idea: &AppIdea) -> Result<BuildPlan, ResearchError>;
}
