// src/config.rs
// =============================================================================
// Process-wide settings, resolved once at startup from CLI flags and
// environment variables (see cli::Settings) and read-only afterwards.
//
// Nothing in here is request-scoped: every request borrows the same Config.
// =============================================================================

use std::time::Duration;

use url::Url;

/// Default model used for diagram generation
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
/// Default token budget for one diagram
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
/// Default deadline for any single upstream request
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for GitHub; requests go out unauthenticated without it
    pub github_token: Option<String>,
    /// API key for Anthropic; only /ai needs it
    pub claude_api_key: Option<String>,
    pub github_api_url: Url,
    pub anthropic_api_url: Url,
    pub model: String,
    pub max_tokens: u32,
    /// Per-request deadline applied by the shared HTTP client
    pub timeout: Duration,
}

/// Builds an endpoint URL by appending path segments to a base URL
///
/// Segments are percent-encoded individually, so names with spaces or '#'
/// survive. Empty segments are dropped.
pub fn endpoint<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty()
            .extend(segments.into_iter().filter(|s| !s.is_empty()));
    }
    url
}
