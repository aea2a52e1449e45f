// src/github/mod.rs
// =============================================================================
// This module handles everything that talks to GitHub.
//
// Currently implements:
// - Parsing GitHub URLs to extract owner/repo
// - Looking up a repository's default branch
// - Fetching the full recursive file listing via the Git Trees API
// - A legacy Contents API walker (one request per directory)
//
// Both listing strategies produce the same flat Vec<TreeEntry>, which the
// tree module turns into a hierarchy.
// =============================================================================

mod client;
mod types;
mod repo_url;

pub use client::GitHubClient;
pub use types::{EntryKind, ListingSource, TreeEntry};
pub use repo_url::parse_github_repo;
