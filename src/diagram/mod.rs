// src/diagram/mod.rs
// =============================================================================
// This module turns a rendered tree into a Mermaid architecture diagram.
//
// Steps:
// 1. prompt: embed the ASCII tree in a fixed instruction
// 2. claude: send it to the Anthropic Messages API
// 3. extract: strip any markdown fencing from the answer
//
// The diagram itself is not validated; that's the model's job.
// =============================================================================

mod claude;
mod extract;
mod prompt;

pub use extract::extract_diagram;
pub use prompt::build_prompt;

use reqwest::Client;

use crate::config::Config;
use crate::error::Result;

/// Asks the LLM for a Mermaid diagram of the given tree text
pub async fn generate_diagram(http: &Client, config: &Config, tree_text: &str) -> Result<String> {
    let prompt = build_prompt(tree_text);
    let reply = claude::complete(http, config, &prompt).await?;
    Ok(extract_diagram(&reply))
}
