// src/app.rs
// =============================================================================
// The request pipelines shared by the HTTP handlers and the CLI:
//
//   tree:    owner/repo -> GitHub listing -> Node tree -> ASCII lines -> sink
//   diagram: owner/repo -> GitHub listing -> Node tree -> text -> LLM -> Mermaid
//
// App is built once at startup and shared (behind an Arc in the server).
// It holds only read-only state: the Config and a pooled reqwest Client, so
// concurrent requests never coordinate with each other.
// =============================================================================

use std::io;
use std::time::Instant;

use reqwest::Client;
use tracing::{debug, info};

use crate::config::Config;
use crate::diagram::generate_diagram;
use crate::error::{RepoTreeError, Result};
use crate::github::{GitHubClient, ListingSource};
use crate::tree::{build_tree, render_text, write_tree, LineSink, Node};

/// Sent as User-Agent on every upstream request; GitHub requires one
const USER_AGENT: &str = concat!("repo-tree/", env!("CARGO_PKG_VERSION"));

/// Banner written right before the first tree line
pub const STRUCTURE_BANNER: &str = "🥶 Project structure:";

/// How a streamed tree request ended, once the sink itself worked
#[derive(Debug)]
pub enum TreeOutcome {
    Rendered { nodes: usize, truncated: bool },
    /// The pipeline failed; the error was already written as "Error: ..."
    Failed(RepoTreeError),
}

pub struct App {
    config: Config,
    http: Client,
    github: GitHubClient,
}

impl App {
    /// Builds the shared HTTP client with an explicit request deadline
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let github = GitHubClient::new(http.clone(), &config);

        Ok(App {
            config,
            http,
            github,
        })
    }

    /// Fetches a listing and rebuilds it as a tree
    ///
    /// Returns the root plus whether GitHub truncated the listing.
    pub async fn fetch_tree(
        &self,
        owner: &str,
        repo: &str,
        source: ListingSource,
    ) -> Result<(Node, bool)> {
        let listing = self.github.fetch_listing(owner, repo, source).await?;
        debug!(owner, repo, entries = listing.entries.len(), "building tree");
        Ok((build_tree(&listing.entries), listing.truncated))
    }

    /// Streams the tree of a repository into `sink`
    ///
    /// Pipeline failures don't abort the output: they're written into the
    /// sink as "Error: <message>" (the HTTP status line is already gone by
    /// then) and reported back as TreeOutcome::Failed. Only a broken sink is
    /// an Err.
    pub async fn stream_tree<S>(
        &self,
        sink: &mut S,
        owner: &str,
        repo: &str,
        source: ListingSource,
    ) -> io::Result<TreeOutcome>
    where
        S: LineSink + ?Sized,
    {
        let started = Instant::now();
        sink.write_line(source.banner()).await?;

        let (root, truncated) = match self.fetch_tree(owner, repo, source).await {
            Ok(tree) => tree,
            Err(e) => {
                sink.write_line(&format!("Error: {}", e)).await?;
                return Ok(TreeOutcome::Failed(e));
            }
        };

        sink.write_line(STRUCTURE_BANNER).await?;
        write_tree(sink, &root).await?;

        let nodes = root.descendant_count();
        info!(
            owner,
            repo,
            nodes,
            truncated,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "rendered tree"
        );
        Ok(TreeOutcome::Rendered { nodes, truncated })
    }

    /// Produces a Mermaid diagram for a repository
    pub async fn describe_repo(
        &self,
        owner: &str,
        repo: &str,
        source: ListingSource,
    ) -> Result<String> {
        let (root, _) = self.fetch_tree(owner, repo, source).await?;
        let tree_text = render_text(&root);
        let diagram = generate_diagram(&self.http, &self.config, &tree_text).await?;
        info!(owner, repo, diagram_len = diagram.len(), "generated diagram");
        Ok(diagram)
    }
}
