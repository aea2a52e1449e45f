// src/main.rs
// =============================================================================
// This is the entry point of repo-tree.
//
// What happens here:
// 1. Parse command-line arguments (and environment variables) using clap
// 2. Set up logging
// 3. Build the shared App (config + HTTP client)
// 4. Dispatch to the appropriate subcommand handler
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod app;        // src/app.rs - tree and diagram pipelines
mod cli;        // src/cli.rs - command-line parsing
mod config;     // src/config.rs - process-wide settings
mod diagram;    // src/diagram/ - prompt, Claude client, fence extraction
mod error;      // src/error.rs - error taxonomy
mod github;     // src/github/ - GitHub-specific functionality
mod logging;    // src/logging.rs - tracing setup
mod server;     // src/server/ - HTTP handlers
mod tree;       // src/tree/ - tree building and ASCII rendering

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use app::{App, TreeOutcome};
use cli::{Cli, Commands};
use config::Config;
use github::{parse_github_repo, ListingSource};
use tree::StdoutSink;

#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = success
//   Ok(2) = the tree could not be fetched (error already printed)
//   Err   = anything else
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::setup_tracing(cli.log_level);

    let config = Config::from(cli.settings);
    let app = App::new(config)?;

    match cli.command {
        Commands::Serve { addr } => {
            server::serve(Arc::new(app), addr).await?;
            Ok(0)
        }
        Commands::Tree { repo_url, source } => handle_tree(&app, &repo_url, source).await,
        Commands::Diagram {
            repo_url,
            source,
            json,
        } => handle_diagram(&app, &repo_url, source, json).await,
    }
}

// Handles the 'tree' subcommand: same output as GET /tree, on stdout
async fn handle_tree(app: &App, repo_url: &str, source: ListingSource) -> Result<i32> {
    let (owner, repo) = parse_github_repo(repo_url)?;

    let mut stdout = StdoutSink::new();
    match app.stream_tree(&mut stdout, &owner, &repo, source).await? {
        TreeOutcome::Rendered { .. } => Ok(0),
        TreeOutcome::Failed(_) => Ok(2),
    }
}

// Handles the 'diagram' subcommand: same result as GET /ai, on stdout
async fn handle_diagram(
    app: &App,
    repo_url: &str,
    source: ListingSource,
    json: bool,
) -> Result<i32> {
    let (owner, repo) = parse_github_repo(repo_url)?;

    let diagram = app.describe_repo(&owner, &repo, source).await?;

    if json {
        let output = serde_json::json!({ "diagram": diagram });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", diagram);
    }

    Ok(0)
}
