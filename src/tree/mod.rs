// src/tree/mod.rs
// =============================================================================
// This module rebuilds and draws the repository hierarchy.
//
// Submodules:
// - node: Node type and build_tree() (flat listing -> nested tree)
// - render: ASCII rendering, buffered or streamed
// - sink: the LineSink trait the streaming renderer writes into
// =============================================================================

mod node;
mod render;
mod sink;

pub use node::{build_tree, Node};
pub use render::{render_text, write_tree};
pub use sink::{LineSink, StdoutSink};
