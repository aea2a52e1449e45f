// src/github/client.rs
// =============================================================================
// Talks to the GitHub REST / Git API.
//
// Calls:
// 1. GET /repos/{owner}/{repo}                          -> default branch
// 2. GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1
// 3. GET /repos/{owner}/{repo}/contents/{dir}           (legacy walker)
//
// Every call goes through `get()`, which attaches the bearer token when one
// is configured and hands back the raw status + bytes. `decode()` then turns
// those bytes into the expected payload, or into an Upstream error when
// GitHub answered with its `{"message": "..."}` error object instead.
//
// No retries and no rate-limit handling: one failed call aborts the request.
// =============================================================================

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use tracing::{debug, warn};
use url::Url;

use super::types::{ContentsReply, Listing, ListingSource, RepoInfo, TreeEntry, TreeResponse};
use crate::config::{endpoint, Config};
use crate::error::{DecodeSnafu, NetworkSnafu, Result, UpstreamSnafu};

/// Branch used when the metadata object has no default_branch
pub const FALLBACK_BRANCH: &str = "main";

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    /// Wraps a shared reqwest client (cheap to clone, pooled connections)
    pub fn new(http: Client, config: &Config) -> Self {
        GitHubClient {
            http,
            api_url: config.github_api_url.clone(),
            token: config.github_token.clone(),
        }
    }

    /// Fetches the flat listing of a repository from the chosen API
    pub async fn fetch_listing(
        &self,
        owner: &str,
        repo: &str,
        source: ListingSource,
    ) -> Result<Listing> {
        match source {
            ListingSource::GitTree => {
                let branch = self.fetch_default_branch(owner, repo).await?;
                let response = self.fetch_git_tree(owner, repo, &branch).await?;
                Ok(Listing {
                    entries: response.tree,
                    truncated: response.truncated,
                })
            }
            ListingSource::Contents => {
                let entries = self.fetch_contents_entries(owner, repo).await?;
                Ok(Listing {
                    entries,
                    truncated: false,
                })
            }
        }
    }

    /// Looks up the repository's default branch, falling back to "main"
    pub async fn fetch_default_branch(&self, owner: &str, repo: &str) -> Result<String> {
        let call = "fetch default branch";
        let url = endpoint(&self.api_url, ["repos", owner, repo]);

        let (status, body) = self.get(url, call).await?;
        let info: RepoInfo = decode(call, status, &body)?;

        Ok(info
            .default_branch
            .filter(|branch| !branch.is_empty())
            .unwrap_or_else(|| FALLBACK_BRANCH.to_string()))
    }

    /// Fetches the whole recursive git tree of a branch (or commit SHA)
    ///
    /// A truncated tree is not an error: we log it and use what we got.
    pub async fn fetch_git_tree(
        &self,
        owner: &str,
        repo: &str,
        branch_or_sha: &str,
    ) -> Result<TreeResponse> {
        let call = "fetch git tree";
        let mut segments = vec!["repos", owner, repo, "git", "trees"];
        segments.extend(branch_or_sha.split('/'));
        let mut url = endpoint(&self.api_url, segments);
        url.query_pairs_mut().append_pair("recursive", "1");

        let (status, body) = self.get(url, call).await?;
        let response: TreeResponse = decode(call, status, &body)?;

        debug!(sha = %response.sha, entries = response.tree.len(), "fetched git tree");
        if response.truncated {
            warn!(
                owner,
                repo,
                entries = response.tree.len(),
                "the tree is truncated by GitHub, rendering a partial listing"
            );
        }

        Ok(response)
    }

    /// Legacy walker: lists every directory through the Contents API
    ///
    /// Directories are visited one at a time from an explicit work stack,
    /// never concurrently, so large repositories don't burst the rate limit.
    /// Output order doesn't matter: the renderer sorts.
    pub async fn fetch_contents_entries(&self, owner: &str, repo: &str) -> Result<Vec<TreeEntry>> {
        let call = "fetch repository contents";
        let mut entries = Vec::new();
        let mut pending = vec![String::new()];

        while let Some(dir) = pending.pop() {
            let mut segments = vec!["repos", owner, repo, "contents"];
            segments.extend(dir.split('/'));
            let url = endpoint(&self.api_url, segments);

            let (status, body) = self.get(url, call).await?;
            let reply: ContentsReply = decode(call, status, &body)?;

            for item in reply.into_items() {
                let entry = item.into_entry(&dir);
                if entry.kind.is_dir() {
                    pending.push(entry.path.clone());
                }
                entries.push(entry);
            }
        }

        debug!(owner, repo, entries = entries.len(), "walked contents API");
        Ok(entries)
    }

    /// Performs a GET, attaching "Authorization: Bearer ..." when we have a token
    async fn get(&self, url: Url, call: &str) -> Result<(StatusCode, Vec<u8>)> {
        debug!(%url, call, "GitHub request");

        let mut request = self.http.get(url).header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.context(NetworkSnafu { call })?;
        let status = response.status();
        let body = response.bytes().await.context(NetworkSnafu { call })?;

        Ok((status, body.to_vec()))
    }
}

/// Decodes a GitHub response body into `T`
///
/// - non-success status          -> Upstream (GitHub's message, or the status line)
/// - `{"message": ...}` object   -> Upstream
/// - anything else unparsable    -> Decode
fn decode<T: DeserializeOwned>(call: &str, status: StatusCode, body: &[u8]) -> Result<T> {
    let value = serde_json::from_slice::<serde_json::Value>(body);

    if !status.is_success() {
        let message = value
            .ok()
            .and_then(|value| error_message(&value))
            .unwrap_or_else(|| status.to_string());
        return UpstreamSnafu { call, message }.fail();
    }

    let value = value.context(DecodeSnafu { call })?;
    if let Some(message) = error_message(&value) {
        return UpstreamSnafu { call, message }.fail();
    }

    serde_json::from_value(value).context(DecodeSnafu { call })
}

/// GitHub reports errors as `{"message": "...", "documentation_url": "..."}`
fn error_message(value: &serde_json::Value) -> Option<String> {
    value
        .as_object()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is .context(NetworkSnafu { call })?
//    - snafu generates a "context selector" struct for each error variant
//    - .context() wraps the underlying error (here reqwest::Error) into
//      our RepoTreeError::Network variant and fills in the extra fields
//
// 2. Why decode into serde_json::Value first?
//    - GitHub can answer with either the payload or an error object
//    - Looking at the generic JSON first lets us tell the two apart before
//      committing to a concrete type
//
// 3. Why a Vec as a stack in the contents walker?
//    - async functions can't call themselves without boxing the future
//    - A work list (push directories, pop them one by one) avoids that and
//      keeps requests strictly sequential
// -----------------------------------------------------------------------------
