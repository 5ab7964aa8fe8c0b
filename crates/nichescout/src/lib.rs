//! Nichescout - discover market pain points, generate micro-SaaS ideas.
//!
//! A single-page application that researches what users of a niche are
//! complaining about, turns the complaints into candidate product ideas, and
//! expands a chosen idea into a build plan (roadmap, PRD, coding-assistant
//! prompt). Research sessions and saved ideas persist per signed-in user.
//!
//! # Architecture
//!
//! - **Workflow**: the state machine in `nichescout-core`, driven here by a
//!   single coroutine and mirrored into a signal for the views
//! - **Research**: Gemini `generateContent` REST calls (grounded search,
//!   schema-constrained ideation and planning)
//! - **Persistence**: Supabase PostgREST over `search_history` and
//!   `saved_ideas`, rows owned per user
//! - **Auth**: Supabase GoTrue password grant feeding an explicit
//!   [`nichescout_core::UserSession`]

pub mod components;
pub mod config;
pub mod services;
pub mod utils;
