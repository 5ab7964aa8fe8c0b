//! Shared HTTP client for all remote services.
//!
//! reqwest works on both native and WASM platforms: hyper with rustls-tls
//! natively, the browser fetch() API on web. One pooled client is shared by
//! the research, persistence, and auth services for connection reuse.

use once_cell::sync::Lazy;

/// Global pooled HTTP client.
///
/// Configured with a 30 second timeout per request and an identifying user
/// agent. The builder options are not available on WASM, where the browser
/// owns both.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent("Nichescout/0.1.0 (market pain-point research)")
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client")
});

#[cfg(target_arch = "wasm32")]
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);
