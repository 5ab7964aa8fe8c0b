//! Configuration resolution for backend credentials.
//!
//! Credentials are resolved env-first: a process environment variable wins
//! at runtime (desktop), falling back to values baked in at compile time
//! (the only option on web, where there is no process environment).

use anyhow::{anyhow, Result};

/// Environment variable for the Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variables for the Supabase project
const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Resolved backend credentials for the research and persistence services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub gemini_api_key: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl BackendConfig {
    /// Resolves all credentials, failing with the name of whichever is
    /// missing so the startup error is actionable.
    pub fn resolve() -> Result<Self> {
        Ok(Self {
            gemini_api_key: resolve_var(GEMINI_API_KEY_ENV, option_env!("GEMINI_API_KEY"))
                .ok_or_else(|| anyhow!("{} is not set", GEMINI_API_KEY_ENV))?,
            supabase_url: resolve_var(SUPABASE_URL_ENV, option_env!("SUPABASE_URL"))
                .ok_or_else(|| anyhow!("{} is not set", SUPABASE_URL_ENV))?,
            supabase_anon_key: resolve_var(
                SUPABASE_ANON_KEY_ENV,
                option_env!("SUPABASE_ANON_KEY"),
            )
            .ok_or_else(|| anyhow!("{} is not set", SUPABASE_ANON_KEY_ENV))?,
        })
    }
}

/// Runtime environment first, then the compile-time value.
fn resolve_var(name: &str, compiled: Option<&str>) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .or_else(|| compiled.map(str::to_string).filter(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_value_is_a_fallback() {
        assert_eq!(
            resolve_var("NICHESCOUT_TEST_UNSET_VAR", Some("compiled")),
            Some("compiled".to_string())
        );
        assert_eq!(resolve_var("NICHESCOUT_TEST_UNSET_VAR", Some("")), None);
        assert_eq!(resolve_var("NICHESCOUT_TEST_UNSET_VAR", None), None);
    }
}
