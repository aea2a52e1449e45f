// src/github/repo_url.rs
// =============================================================================
// Turns a repository URL typed by a user into an (owner, repo) pair.
//
// Accepted:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo/
//   - https://github.com/owner/repo/tree/dev/src   (extra segments ignored)
//
// Only the first two path segments are used. Branches or sub-paths embedded
// in the URL are NOT honoured; the default branch is always listed.
// =============================================================================

use crate::error::{InvalidUrlSnafu, Result};

/// The only prefix we accept
pub const GITHUB_PREFIX: &str = "https://github.com/";

/// Extracts owner and repository name from a GitHub URL
///
/// Example:
///   "https://github.com/rust-lang/rust" -> ("rust-lang", "rust")
pub fn parse_github_repo(url: &str) -> Result<(String, String)> {
    let Some(path) = url.strip_prefix(GITHUB_PREFIX) else {
        return InvalidUrlSnafu {
            reason: format!("URL must start with \"{}\"", GITHUB_PREFIX),
        }
        .fail();
    };
    let path = path.strip_suffix('/').unwrap_or(path);

    // Split by '/' to get owner and repo
    let parts: Vec<&str> = path.split('/').collect();

    if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
        return InvalidUrlSnafu {
            reason: "Invalid GitHub URL, must have at least 'owner/repo'",
        }
        .fail();
    }

    Ok((parts[0].to_string(), parts[1].to_string()))
}
