// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands:
// - serve:    run the HTTP API (/tree and /ai)
// - tree:     print one repository's ASCII tree to stdout, streamed
// - diagram:  print one repository's Mermaid diagram to stdout
//
// Settings shared by all of them (credentials, upstream URLs, timeouts) can
// be passed as flags or picked up from the environment, e.g. GITHUB_TOKEN
// and CLAUDE_API_KEY.
// =============================================================================

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::config::{Config, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::github::ListingSource;
use crate::logging::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "repo-tree",
    version,
    about = "Render GitHub repositories as ASCII trees and architecture diagrams",
    long_about = "repo-tree fetches a GitHub repository's file listing, rebuilds it as a tree \
                  and draws it as ASCII art. It can also ask Claude for a Mermaid architecture \
                  diagram of the same tree. Run `repo-tree serve` for the HTTP API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub settings: Settings,

    /// How much to log (to stderr)
    #[arg(long, short, default_value = "info", value_enum, global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    ///
    /// Example: repo-tree serve --addr 127.0.0.1:8080
    Serve {
        /// Address to listen on
        #[arg(long, env = "REPO_TREE_ADDR", default_value = "0.0.0.0:8080")]
        addr: SocketAddr,
    },

    /// Print the ASCII tree of a repository
    ///
    /// Example: repo-tree tree https://github.com/rust-lang/cargo
    Tree {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Which GitHub API to list the repository with
        #[arg(long, value_enum, default_value_t = ListingSource::GitTree)]
        source: ListingSource,
    },

    /// Ask Claude for a Mermaid architecture diagram of a repository
    ///
    /// Example: repo-tree diagram https://github.com/rust-lang/cargo --json
    Diagram {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Which GitHub API to list the repository with
        #[arg(long, value_enum, default_value_t = ListingSource::GitTree)]
        source: ListingSource,

        /// Print {"diagram": "..."} instead of the raw diagram
        #[arg(long)]
        json: bool,
    },
}

/// Process-wide settings, turned into a Config at startup
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// GitHub token sent as a bearer credential (unauthenticated if absent)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub github_token: Option<String>,

    /// Anthropic API key, required for diagrams
    #[arg(long, env = "CLAUDE_API_KEY", hide_env_values = true, global = true)]
    pub claude_api_key: Option<String>,

    /// Base URL of the GitHub API
    #[arg(
        long,
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com",
        global = true
    )]
    pub github_api_url: Url,

    /// Base URL of the Anthropic API
    #[arg(
        long,
        env = "ANTHROPIC_API_URL",
        default_value = "https://api.anthropic.com",
        global = true
    )]
    pub anthropic_api_url: Url,

    /// Claude model used for diagrams
    #[arg(long, env = "CLAUDE_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Token budget for one diagram
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS, global = true)]
    pub max_tokens: u32,

    /// Deadline in seconds for each upstream request
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,
}

impl From<Settings> for Config {
    fn from(settings: Settings) -> Self {
        Config {
            github_token: settings.github_token.filter(|t| !t.trim().is_empty()),
            claude_api_key: settings.claude_api_key.filter(|k| !k.trim().is_empty()),
            github_api_url: settings.github_api_url,
            anthropic_api_url: settings.anthropic_api_url,
            model: settings.model,
            max_tokens: settings.max_tokens,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}
