//! Remote service clients: research, persistence, and auth.
//!
//! Each client implements (or feeds) a trait from `nichescout-core`, so the
//! workflow and the tests never see HTTP.

pub mod auth;
pub mod gemini;
mod http;
pub mod supabase;

pub use auth::{AuthClient, AuthError};
pub use gemini::GeminiResearch;
pub use supabase::SupabaseStore;
