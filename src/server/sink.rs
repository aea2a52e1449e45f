// src/server/sink.rs
// =============================================================================
// A LineSink backed by a hyper body channel.
//
// Every write becomes one chunk of the chunked HTTP response and goes out to
// the client as soon as hyper can send it. That is what lets a browser watch
// a large repository appear line by line.
// =============================================================================

use std::io;

use async_trait::async_trait;
use hyper::body::{Bytes, Sender};

use crate::tree::LineSink;

pub struct ChannelSink {
    sender: Sender,
}

impl ChannelSink {
    pub fn new(sender: Sender) -> Self {
        ChannelSink { sender }
    }
}

#[async_trait]
impl LineSink for ChannelSink {
    async fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.sender
            .send_data(Bytes::copy_from_slice(text.as_bytes()))
            .await
            // The only way this fails is the client hanging up
            .map_err(|e| io::Error::new(io::ErrorKind::BrokenPipe, e))
    }

    fn supports_flush(&self) -> bool {
        true
    }
}
