//! Domain and persisted record types for the research workflow.
//!
//! Wire formats are pinned by serde attributes: research payloads use the
//! camelCase field names the generation backend returns (`oneLiner`,
//! `vibeCodingPrompt`, ...), while persisted records use the snake_case
//! column names of the backing store (`one_liner`, `pain_points`, ...).

use serde::{Deserialize, Serialize};

/// A single web source backing a pain-point report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Page or article title
    pub title: String,
    /// Resolved URL
    pub uri: String,
}

/// Result of a pain-point search for one topic.
///
/// Immutable once created. An empty `sources` list means the write-up was
/// synthesized without grounding rather than backed by web results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainPointResult {
    /// Formatted write-up with fixed section markers (markdown-like)
    pub summary: String,
    /// Unformatted source text, fed verbatim into ideation
    #[serde(rename = "rawText")]
    pub raw_text: String,
    /// Ordered web sources; may be empty
    pub sources: Vec<Source>,
}

/// Estimated coding effort for an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TechComplexity {
    Low,
    Medium,
    High,
}

/// A candidate product concept generated from pain points.
///
/// The title is the sole external identity of an idea for save/unsave
/// toggling: a user's saved set never holds two records with the same title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppIdea {
    /// Catchy name for the app; dedup key within a user's saved set
    pub title: String,
    /// Punchy 5-10 word value proposition
    pub one_liner: String,
    /// Which pain point this solves
    pub problem_solved: String,
    /// Primary customer
    pub target_audience: String,
    /// 3-4 key MVP features
    pub core_features: Vec<String>,
    /// How it makes money
    pub monetization: String,
    /// Estimated coding effort
    pub tech_complexity: TechComplexity,
}

/// One phase of the MVP roadmap inside a build plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub phase: String,
    /// Estimated time, e.g. "1 Week"
    pub duration: String,
    pub tasks: Vec<String>,
}

/// The build plan generated for a specific idea.
///
/// Always attached to an [`AppIdea`], never to a topic directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPlan {
    /// Phased MVP roadmap
    pub roadmap: Vec<RoadmapPhase>,
    /// Product requirement document, markdown text
    pub prd: String,
    /// Starter prompt for an AI coding assistant, plain text
    pub vibe_coding_prompt: String,
}

/// Persisted snapshot of one research session.
///
/// Created right after a successful search with `ideas` unset; ideas are
/// attached later by an update once ideation succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryRecord {
    /// Server-assigned, stable id
    pub id: String,
    pub topic: String,
    pub summary: String,
    pub pain_points: PainPointResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideas: Option<Vec<AppIdea>>,
    /// ISO-8601 timestamp assigned by the store
    pub created_at: String,
}

impl SearchHistoryRecord {
    /// Whether this session already has generated ideas attached.
    pub fn has_ideas(&self) -> bool {
        self.ideas.as_ref().is_some_and(|ideas| !ideas.is_empty())
    }
}

/// A user-bookmarked idea, optionally with its build plan attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedIdeaRecord {
    /// Server-assigned, stable id
    pub id: String,
    /// Copy of the idea title; (user, title) is the dedup key
    pub title: String,
    /// Topic the idea was generated for
    pub topic: String,
    pub one_liner: String,
    /// The full idea as generated
    pub full_idea_json: AppIdea,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_plan: Option<BuildPlan>,
    /// ISO-8601 timestamp assigned by the store
    pub created_at: String,
}
