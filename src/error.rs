// src/error.rs
// =============================================================================
// The error taxonomy shared by every layer of the service.
//
// Lower layers (URL parsing, GitHub client, diagram requester) return
// Result<T, RepoTreeError>. Only the HTTP handlers and the CLI turn these
// into user-facing text, so the variants carry *which call failed* but no
// presentation details.
//
// Rust concepts:
// - snafu: derive Display/Error for an enum and get context selectors
//   (e.g. NetworkSnafu) for free
// - Associated functions on enums: status_code() maps an error to HTTP
// =============================================================================

use hyper::StatusCode;
use snafu::Snafu;

/// Every way a tree or diagram request can fail.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RepoTreeError {
    /// The `repo` value is not a usable GitHub URL (user error)
    #[snafu(display("{}", reason))]
    InvalidUrl { reason: String },

    /// Transport failure: DNS, connect, TLS, timeout...
    #[snafu(display("{} failed: {}", call, source))]
    Network {
        call: String,
        source: reqwest::Error,
    },

    /// The upstream answered, but not with JSON we understand
    #[snafu(display("{} returned malformed JSON: {}", call, source))]
    Decode {
        call: String,
        source: serde_json::Error,
    },

    /// The upstream answered with an error object or a non-success status
    #[snafu(display("{}: {}", call, message))]
    Upstream { call: String, message: String },

    /// A required credential is not configured
    #[snafu(display("{} not set in environment variables", name))]
    MissingCredential { name: String },

    /// The LLM answered successfully but with no non-blank text block
    #[snafu(display("empty response from Claude API"))]
    EmptyResponse,
}

impl RepoTreeError {
    /// HTTP status the handlers use when this error is reported before
    /// any body has been written.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RepoTreeError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Shorthand used across the crate.
pub type Result<T, E = RepoTreeError> = std::result::Result<T, E>;
