// src/tree/render.rs
// =============================================================================
// Draws a Node tree as ASCII art:
//
//     ├── Cargo.toml
//     └── src
//         ├── main.rs
//         └── util
//             └── mod.rs
//
// Rules:
// - Children are emitted in ascending lexicographic order of their names
//   (the HashMap inside Node has no meaningful order, so we sort here)
// - The last sibling gets "└── " and its descendants are indented with
//   spaces; every other sibling gets "├── " and descendants get "│   "
// - Only directories are descended into
//
// Everything is produced by one lazy iterator, TreeLines. The buffered text
// and the streaming writer both consume it, so they can't disagree.
// =============================================================================

use std::io;

use super::node::Node;
use super::sink::LineSink;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const INDENT: &str = "│   ";
const LAST_INDENT: &str = "    ";

/// Children of one directory still waiting to be drawn
struct Frame<'a> {
    prefix: String,
    children: std::vec::IntoIter<&'a Node>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a Node, prefix: String) -> Self {
        let mut children: Vec<&Node> = node.children.values().collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Frame {
            prefix,
            children: children.into_iter(),
        }
    }
}

/// Depth-first iterator over the rendered lines (without trailing newline)
///
/// Uses an explicit stack instead of recursion.
pub struct TreeLines<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Iterator for TreeLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let frame = self.stack.last_mut()?;

            let Some(child) = frame.children.next() else {
                // This directory is done, go back up
                self.stack.pop();
                continue;
            };

            let is_last = frame.children.len() == 0;
            let (branch, indent) = if is_last {
                (LAST_BRANCH, LAST_INDENT)
            } else {
                (BRANCH, INDENT)
            };

            let line = format!("{}{}{}", frame.prefix, branch, child.name);

            if child.is_dir {
                let prefix = format!("{}{}", frame.prefix, indent);
                self.stack.push(Frame::new(child, prefix));
            }

            return Some(line);
        }
    }
}

/// Lines for the children of `node`, each starting with `prefix`
pub fn render_lines<'a>(node: &'a Node, prefix: &str) -> TreeLines<'a> {
    TreeLines {
        stack: vec![Frame::new(node, prefix.to_string())],
    }
}

/// Buffered mode: the whole tree as one string, one line per node
pub fn render_text(root: &Node) -> String {
    let mut text = String::new();
    for line in render_lines(root, "") {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

/// Writes the tree into a sink, picking the mode the sink can handle
///
/// - sink supports flushing -> every line is written and flushed right away
/// - otherwise              -> the tree is rendered into one buffer and
///                             written in a single call
pub async fn write_tree<S>(sink: &mut S, root: &Node) -> io::Result<()>
where
    S: LineSink + ?Sized,
{
    if sink.supports_flush() {
        for line in render_lines(root, "") {
            sink.write_line(&line).await?;
        }
        Ok(())
    } else {
        sink.write_text(&render_text(root)).await
    }
}
