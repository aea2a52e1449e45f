// src/tree/sink.rs
// =============================================================================
// Where rendered lines go.
//
// Some outputs can push each line to the reader immediately (an HTTP body
// channel, a terminal); others can only take the finished text. LineSink
// models that as a capability: `supports_flush()` tells the renderer which
// mode to use.
//
// Implementations in this crate:
// - String        -> in-memory buffer, no flushing
// - StdoutSink    -> terminal output for the `tree` subcommand
// - ChannelSink   -> streaming HTTP body (src/server/sink.rs)
// =============================================================================

use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};

#[async_trait]
pub trait LineSink: Send {
    /// Writes text as-is
    async fn write_text(&mut self, text: &str) -> io::Result<()>;

    /// Whether this sink can push partial output to its reader
    fn supports_flush(&self) -> bool {
        false
    }

    async fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Writes one line plus '\n', flushing when the sink supports it
    async fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_text(&format!("{}\n", line)).await?;
        if self.supports_flush() {
            self.flush().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl LineSink for String {
    async fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }
}

/// Standard output, flushed line by line
pub struct StdoutSink {
    stdout: Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        StdoutSink {
            stdout: tokio::io::stdout(),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineSink for StdoutSink {
    async fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.stdout.write_all(text.as_bytes()).await
    }

    fn supports_flush(&self) -> bool {
        true
    }

    async fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush().await
    }
}
