//! Gemini-backed implementation of the research service.
//!
//! Three single-shot `generateContent` calls against the Generative
//! Language REST API:
//!
//! 1. **Search** - grounded via the `googleSearch` tool; sources come from
//!    the grounding metadata and may be empty (synthesized write-up).
//! 2. **Ideate** - JSON mode with a response schema producing 3 ideas.
//! 3. **Plan** - JSON mode with a response schema producing the build plan.
//!
//! Failures are logged with their cause and surfaced to the workflow as the
//! generic, user-retryable messages the views display verbatim.

use super::http::HTTP_CLIENT;
use dioxus::logger::tracing::error;
use nichescout_core::{AppIdea, BuildPlan, PainPointResult, ResearchError, ResearchService, Source};
use serde::Deserialize;
use serde_json::{json, Value};

const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Thinking budget for ideation; search and planning run without one.
const IDEATION_THINKING_BUDGET: u32 = 1024;

/// Research client calling the Gemini REST API.
pub struct GeminiResearch {
    api_key: String,
    model: String,
}

impl GeminiResearch {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE_URL, self.model, self.api_key
        )
    }

    /// Posts one generateContent request and decodes the envelope.
    async fn generate(&self, body: Value) -> Result<GenerateContentResponse, String> {
        let response = HTTP_CLIENT
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("backend returned HTTP {}", status));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| format!("invalid response body: {}", e))
    }
}

#[async_trait::async_trait(?Send)]
impl ResearchService for GeminiResearch {
    async fn search_pain_points(&self, topic: &str) -> Result<PainPointResult, ResearchError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": search_prompt(topic) }] }],
            "tools": [{ "googleSearch": {} }],
        });

        let response = self.generate(body).await.map_err(|cause| {
            error!("pain-point search failed: {}", cause);
            ResearchError::RequestFailed(
                "Failed to search for pain points. Please try again.".to_string(),
            )
        })?;

        let text = response
            .text()
            .unwrap_or_else(|| "No results found.".to_string());
        let sources = response.grounding_sources();

        Ok(PainPointResult {
            summary: text.clone(),
            raw_text: text,
            sources,
        })
    }

    async fn generate_ideas(
        &self,
        topic: &str,
        pain_points_raw: &str,
    ) -> Result<Vec<AppIdea>, ResearchError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": ideas_prompt(topic, pain_points_raw) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": ideas_schema(),
                "thinkingConfig": { "thinkingBudget": IDEATION_THINKING_BUDGET },
            },
        });

        let response = self.generate(body).await.map_err(|cause| {
            error!("idea generation failed: {}", cause);
            ResearchError::RequestFailed("Failed to generate app ideas.".to_string())
        })?;

        let text = response.text().ok_or_else(|| {
            error!("idea generation returned no content");
            ResearchError::EmptyResponse("No ideas generated.".to_string())
        })?;

        parse_ideas(&text).map_err(|cause| {
            error!("idea generation returned unparsable content: {}", cause);
            ResearchError::InvalidResponse("Failed to generate app ideas.".to_string())
        })
    }

    async fn generate_build_plan(&self, idea: &AppIdea) -> Result<BuildPlan, ResearchError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": plan_prompt(idea) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": plan_schema(),
            },
        });

        let response = self.generate(body).await.map_err(|cause| {
            error!("build plan generation failed: {}", cause);
            ResearchError::RequestFailed("Failed to generate build plan.".to_string())
        })?;

        let text = response.text().ok_or_else(|| {
            error!("build plan generation returned no content");
            ResearchError::EmptyResponse("No build plan generated.".to_string())
        })?;

        parse_build_plan(&text).map_err(|cause| {
            error!("build plan returned unparsable content: {}", cause);
            ResearchError::InvalidResponse("Failed to generate build plan.".to_string())
        })
    }
}

// ============================================================================
// Prompts
// ============================================================================

fn search_prompt(topic: &str) -> String {
    format!(
        "You are an expert market researcher.\n\
         I want you to search the web (focusing on Reddit, IndieHackers, Twitter, and niche forums) \
         for RECENT complaints, struggles, and \"pain points\" related to the topic: \"{topic}\".\n\n\
         Look for statements like \"I hate when...\", \"Why is there no app for...\", \
         \"I wish I could...\", or \"It's so hard to...\".\n\n\
         Provide a concise summary of the 3-5 most significant problems people are currently \
         facing in this niche. Be specific about the problem, not just general advice.\n\n\
         FORMATTING RULES (IMPORTANT):\n\
         - Use '###' for the Title of each pain point (e.g. ### 1. The Subscription Fatigue).\n\
         - Use '**The Problem:**', '**The Opportunity:**', and '**What users are saying:**' \
         exactly as headers within the text.\n\
         - Use '>' Blockquotes for direct user quotes.\n\
         - Keep sentences clear and avoid excessive bolding within paragraphs."
    )
}

fn ideas_prompt(topic: &str, pain_points_raw: &str) -> String {
    format!(
        "You are a brilliant Product Strategist and Micro-SaaS developer.\n\n\
         The user is interested in the niche: \"{topic}\".\n\
         Based on the following market research regarding user pain points:\n\n\
         \"{pain_points_raw}\"\n\n\
         Generate 3 distinct, viable, and profitable App or Micro-SaaS ideas that solve these \
         specific problems. Focus on MVP-ready ideas."
    )
}

fn plan_prompt(idea: &AppIdea) -> String {
    format!(
        "You are a Senior Product Manager and Technical Lead.\n\
         I need a comprehensive build plan for the following Micro-SaaS idea:\n\n\
         Title: {title}\n\
         One Liner: {one_liner}\n\
         Core Features: {features}\n\
         Target Audience: {audience}\n\n\
         Please provide:\n\
         1. A 4-phase MVP Roadmap (e.g., Planning, Core Dev, Polish/Testing, Launch).\n\
         2. A detailed Product Requirement Document (PRD) in Markdown format.\n\
         \x20  IMPORTANT: Use strict Markdown structure.\n\
         \x20  - Use '#' for the document title.\n\
         \x20  - Use '##' for main sections (e.g., Overview, Problem, Solution, Features).\n\
         \x20  - Use '###' for subsections.\n\
         \x20  - Use bullet points for lists.\n\
         \x20  - Do NOT use numbered lists (1., 2.) for main section headers, use '##' instead.\n\
         3. A \"Vibe Coding\" Starter Prompt. This should be a single, detailed text prompt that \
         I can paste into an AI Coding Assistant (like Cursor, Windsurf, or Bolt) to generate the \
         initial project structure and base code. It should specify the tech stack (React, \
         Tailwind, Node, etc.) and file structure.\n\n\
         Return the data in JSON format.",
        title = idea.title,
        one_liner = idea.one_liner,
        features = idea.core_features.join(", "),
        audience = idea.target_audience,
    )
}

// ============================================================================
// Response schemas (JSON mode)
// ============================================================================

fn ideas_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING", "description": "Catchy name for the app" },
                "oneLiner": { "type": "STRING", "description": "A punchy 5-10 word value proposition" },
                "problemSolved": { "type": "STRING", "description": "Specifically which pain point this solves" },
                "targetAudience": { "type": "STRING", "description": "Who is the primary customer?" },
                "coreFeatures": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "List of 3-4 key MVP features"
                },
                "monetization": { "type": "STRING", "description": "How it makes money (e.g., Subscription, One-time, Ads)" },
                "techComplexity": {
                    "type": "STRING",
                    "enum": ["Low", "Medium", "High"],
                    "description": "Estimated coding effort"
                }
            },
            "required": ["title", "oneLiner", "problemSolved", "targetAudience", "coreFeatures", "monetization", "techComplexity"]
        }
    })
}

fn plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "roadmap": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "phase": { "type": "STRING" },
                        "duration": { "type": "STRING", "description": "Estimated time, e.g., '1 Week'" },
                        "tasks": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["phase", "duration", "tasks"]
                }
            },
            "prd": { "type": "STRING", "description": "Full PRD in Markdown format with # and ## headers" },
            "vibeCodingPrompt": { "type": "STRING", "description": "The AI coder prompt" }
        },
        "required": ["roadmap", "prd", "vibeCodingPrompt"]
    })
}

// ============================================================================
// Response envelope
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Default, Deserialize)]
struct WebSource {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or `None` when the
    /// backend produced nothing.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Web sources from the grounding metadata, in order. Empty when the
    /// answer was synthesized without grounding.
    fn grounding_sources(&self) -> Vec<Source> {
        let Some(metadata) = self
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
        else {
            return Vec::new();
        };

        metadata
            .grounding_chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .map(|web| Source {
                title: web.title.clone().unwrap_or_else(|| "Web Result".to_string()),
                uri: web.uri.clone().unwrap_or_else(|| "#".to_string()),
            })
            .collect()
    }
}

fn parse_ideas(text: &str) -> Result<Vec<AppIdea>, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

fn parse_build_plan(text: &str) -> Result<BuildPlan, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nichescout_core::TechComplexity;

    fn grounded_response() -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "### 1. Subscription Fatigue\n" },
                        { "text": "**The Problem:** too many apps." }
                    ]
                },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "title": "r/fitness thread", "uri": "https://reddit.com/r/fitness/1" } },
                        { "web": { "uri": "https://indiehackers.com/post/2" } },
                        { "retrievedContext": { "text": "non-web chunk" } }
                    ]
                }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn text_concatenates_parts_of_first_candidate() {
        let text = grounded_response().text().unwrap();
        assert!(text.starts_with("### 1. Subscription Fatigue"));
        assert!(text.contains("**The Problem:**"));
    }

    #[test]
    fn sources_fall_back_to_placeholders() {
        let sources = grounded_response().grounding_sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "r/fitness thread");
        // Missing title falls back, uri preserved
        assert_eq!(sources[1].title, "Web Result");
        assert_eq!(sources[1].uri, "https://indiehackers.com/post/2");
    }

    #[test]
    fn ungrounded_response_has_no_sources_and_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(response.text().is_none());
        assert!(response.grounding_sources().is_empty());
    }

    #[test]
    fn parses_three_schema_shaped_ideas() {
        let text = json!([
            {
                "title": "RepBuddy",
                "oneLiner": "Form checks without a trainer",
                "problemSolved": "No feedback on lifting form",
                "targetAudience": "Home gym lifters",
                "coreFeatures": ["Video analysis", "Progress log", "Reminders"],
                "monetization": "Subscription",
                "techComplexity": "High"
            },
            {
                "title": "MacroMate",
                "oneLiner": "Meal tracking in ten seconds",
                "problemSolved": "Logging food is tedious",
                "targetAudience": "Casual dieters",
                "coreFeatures": ["Photo logging", "Weekly digest"],
                "monetization": "Freemium",
                "techComplexity": "Medium"
            },
            {
                "title": "GymSlot",
                "oneLiner": "Never queue for a squat rack",
                "problemSolved": "Crowded gyms at peak hours",
                "targetAudience": "Commercial gym members",
                "coreFeatures": ["Live occupancy", "Slot booking"],
                "monetization": "B2B licensing",
                "techComplexity": "Low"
            }
        ])
        .to_string();

        let ideas = parse_ideas(&text).unwrap();
        assert_eq!(ideas.len(), 3);
        assert_eq!(ideas[0].tech_complexity, TechComplexity::High);
        assert_eq!(ideas[2].core_features.len(), 2);
    }

    #[test]
    fn unparsable_ideas_are_an_error() {
        assert!(parse_ideas("I'm sorry, I can't do that.").is_err());
    }

    #[test]
    fn parses_a_schema_shaped_build_plan() {
        let text = json!({
            "roadmap": [
                { "phase": "Planning", "duration": "1 Week", "tasks": ["Scope MVP", "Wireframes"] },
                { "phase": "Core Dev", "duration": "3 Weeks", "tasks": ["Build tracker"] }
            ],
            "prd": "# RepBuddy\n## Overview\n...",
            "vibeCodingPrompt": "Create a React + Tailwind app..."
        })
        .to_string();

        let plan = parse_build_plan(&text).unwrap();
        assert_eq!(plan.roadmap.len(), 2);
        assert_eq!(plan.roadmap[0].duration, "1 Week");
        assert!(plan.prd.starts_with("# RepBuddy"));
    }

    #[test]
    fn schemas_require_every_field() {
        let ideas = ideas_schema();
        let required = ideas["items"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 7);

        let plan = plan_schema();
        let required = plan["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "vibeCodingPrompt"));
    }
}
