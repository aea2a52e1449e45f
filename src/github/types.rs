// src/github/types.rs
// =============================================================================
// Shapes of the GitHub API payloads we consume.
//
// - RepoInfo:      GET /repos/{owner}/{repo}            (only default_branch)
// - TreeResponse:  GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1
// - ContentItem:   GET /repos/{owner}/{repo}/contents/{path}   (legacy walker)
//
// Everything the tree builder needs ends up as a flat Vec<TreeEntry>, no
// matter which API produced it.
// =============================================================================

use clap::ValueEnum;
use serde::Deserialize;

/// Subset of the repository metadata object
#[derive(Debug, Clone, Deserialize)]
pub struct RepoInfo {
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Response of the recursive Git Trees API
#[derive(Debug, Clone, Deserialize)]
pub struct TreeResponse {
    #[serde(default)]
    pub sha: String,
    /// Set when GitHub hit its own size cap and left entries out
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
}

/// What kind of object a tree entry points at
///
/// GitHub sends this as a plain string; anything we don't know about
/// (e.g. "commit" for submodules) is kept verbatim and rendered as a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EntryKind {
    Blob,
    Tree,
    Other(String),
}

impl EntryKind {
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Tree)
    }
}

impl From<String> for EntryKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "blob" => EntryKind::Blob,
            "tree" => EntryKind::Tree,
            _ => EntryKind::Other(value),
        }
    }
}

/// One file or directory from a flat listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    /// Slash-separated path relative to the repository root
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TreeEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        TreeEntry {
            path: path.into(),
            kind,
            sha: None,
            url: None,
        }
    }

    pub fn blob(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Blob)
    }

    pub fn tree(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Tree)
    }
}

/// One record of the Contents API
#[derive(Debug, Clone, Deserialize)]
pub struct ContentItem {
    pub name: String,
    #[serde(default)]
    pub path: String,
    /// "file", "dir", "symlink" or "submodule"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl ContentItem {
    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }

    /// Converts to the common listing shape
    ///
    /// Older responses can omit `path`; the caller passes the directory
    /// the item was listed from so we can rebuild it.
    pub fn into_entry(self, parent: &str) -> TreeEntry {
        let kind = if self.is_dir() {
            EntryKind::Tree
        } else {
            EntryKind::Blob
        };
        let path = if !self.path.is_empty() {
            self.path
        } else if parent.is_empty() {
            self.name
        } else {
            format!("{}/{}", parent, self.name)
        };
        TreeEntry {
            path,
            kind,
            sha: None,
            url: self.url,
        }
    }
}

/// The Contents API answers a directory with an array and a file with a
/// single object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContentsReply {
    Many(Vec<ContentItem>),
    One(ContentItem),
}

impl ContentsReply {
    pub fn into_items(self) -> Vec<ContentItem> {
        match self {
            ContentsReply::Many(items) => items,
            ContentsReply::One(item) => vec![item],
        }
    }
}

/// Which GitHub API the flat listing is fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListingSource {
    /// One recursive Git Trees API call on the default branch
    #[default]
    GitTree,
    /// Legacy walker: one Contents API call per directory
    Contents,
}

impl ListingSource {
    /// First line written to a streaming /tree response
    pub fn banner(&self) -> &'static str {
        match self {
            ListingSource::GitTree => "🥶 Building the entire tree via Git Tree API...",
            ListingSource::Contents => "🥶 Building the tree via Contents API...",
        }
    }

    /// Parses the `source` query parameter (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        <ListingSource as ValueEnum>::from_str(value, true).ok()
    }
}

/// A flat listing plus whether GitHub cut it short
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub entries: Vec<TreeEntry>,
    pub truncated: bool,
}
