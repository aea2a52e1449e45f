// src/diagram/claude.rs
// =============================================================================
// Minimal client for the Anthropic Messages API.
//
// Request:  POST {anthropic}/v1/messages
//           { "model": ..., "max_tokens": ..., "messages": [{"role": "user", ...}] }
// Response: { "content": [{"type": "text", "text": "..."}], ... }
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use tracing::debug;

use crate::config::{endpoint, Config};
use crate::error::{
    DecodeSnafu, EmptyResponseSnafu, MissingCredentialSnafu, NetworkSnafu, Result, UpstreamSnafu,
};

pub const API_KEY_VAR: &str = "CLAUDE_API_KEY";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Sends one user message and returns the text of the reply
pub async fn complete(http: &Client, config: &Config, prompt: &str) -> Result<String> {
    let call = "Claude API request";
    let api_key = config
        .claude_api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .context(MissingCredentialSnafu { name: API_KEY_VAR })?;

    let body = MessagesRequest {
        model: &config.model,
        max_tokens: config.max_tokens,
        messages: vec![Message {
            role: "user",
            content: prompt,
        }],
    };

    let url = endpoint(&config.anthropic_api_url, ["v1", "messages"]);
    debug!(%url, model = %config.model, prompt_len = prompt.len(), "sending diagram prompt");

    let response = http
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body)
        .send()
        .await
        .context(NetworkSnafu { call })?;

    let status = response.status();
    let bytes = response.bytes().await.context(NetworkSnafu { call })?;

    if !status.is_success() {
        return UpstreamSnafu {
            call,
            message: format!(
                "API request failed with status {}: {}",
                status.as_u16(),
                String::from_utf8_lossy(&bytes)
            ),
        }
        .fail();
    }

    let reply: MessagesResponse = serde_json::from_slice(&bytes).context(DecodeSnafu { call })?;
    first_text(reply.content).context(EmptyResponseSnafu)
}

/// Text of the first "text" block that has any non-blank content
fn first_text(blocks: Vec<ContentBlock>) -> Option<String> {
    blocks
        .into_iter()
        .find(|block| block.kind == "text" && !block.text.trim().is_empty())
        .map(|block| block.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(kind: &str, text: &str) -> ContentBlock {
        ContentBlock {
            kind: kind.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_first_text_prefers_text_blocks() {
        let blocks = vec![block("thinking", "hmm"), block("text", "graph TD")];
        assert_eq!(first_text(blocks).as_deref(), Some("graph TD"));
    }

    #[test]
    fn test_first_text_empty() {
        assert_eq!(first_text(vec![]), None);
    }

    #[test]
    fn test_first_text_ignores_untyped_and_blank_blocks() {
        assert_eq!(first_text(vec![block("tool_use", "")]), None);
        assert_eq!(first_text(vec![block("thinking", "graph TD")]), None);
        assert_eq!(first_text(vec![block("text", "  \n ")]), None);

        let blocks = vec![block("text", ""), block("text", "graph LR")];
        assert_eq!(first_text(blocks).as_deref(), Some("graph LR"));
    }

    #[test]
    fn test_request_serializes_like_the_api_expects() {
        let body = MessagesRequest {
            model: "m",
            max_tokens: 10,
            messages: vec![Message {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "m",
                "max_tokens": 10,
                "messages": [{"role": "user", "content": "hi"}]
            })
        );
    }
}
