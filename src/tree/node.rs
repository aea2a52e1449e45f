// src/tree/node.rs
// =============================================================================
// The in-memory hierarchy rebuilt from a flat listing.
//
// GitHub hands us paths like:
//     src
//     src/main.rs
//     src/util/mod.rs
// and we turn them into:
//     (root) -> src -> main.rs
//                   -> util -> mod.rs
//
// Rules:
// - Every path segment becomes a Node; intermediate ones are created on demand
// - Intermediate segments are always directories
// - The final segment is a directory only if the entry says so ("tree")
// - Directory flags are OR-merged, so the order entries arrive in never
//   changes the result
//
// Nothing here recurses over depth: insertion, counting, comparison and
// dropping all walk the tree with an explicit stack.
// =============================================================================

use std::collections::HashMap;

use crate::github::TreeEntry;

/// A file or directory in the rebuilt tree
#[derive(Debug)]
pub struct Node {
    /// Final path segment (empty for the synthetic root)
    pub name: String,
    pub is_dir: bool,
    /// Children keyed by name; iteration order is NOT meaningful
    pub children: HashMap<String, Node>,
}

impl Node {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Node {
            name: name.into(),
            is_dir,
            children: HashMap::new(),
        }
    }

    /// The synthetic root that owns a whole tree
    pub fn root() -> Self {
        Node::new("", true)
    }

    /// Inserts a slash-separated path below this node
    ///
    /// Walks the segments iteratively, reusing existing nodes, so inserting
    /// the same path twice is a no-op and deep paths never grow the stack.
    /// Empty segments (leading, trailing or doubled slashes) are skipped.
    pub fn insert_path(&mut self, path: &str, is_dir: bool) {
        let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
        let mut current = self;

        while let Some(segment) = segments.next() {
            let is_last = segments.peek().is_none();

            let child = current
                .children
                .entry(segment.to_string())
                .or_insert_with(|| Node::new(segment, false));

            if is_last {
                child.is_dir |= is_dir;
            } else {
                child.is_dir = true;
            }

            current = child;
        }
    }

    /// Total number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<&Node> = vec![self];
        while let Some(node) = pending.pop() {
            count += node.children.len();
            pending.extend(node.children.values());
        }
        count
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending: Vec<(&Node, &Node)> = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.name != right.name
                || left.is_dir != right.is_dir
                || left.children.len() != right.children.len()
            {
                return false;
            }
            for (name, child) in &left.children {
                match right.children.get(name) {
                    Some(other_child) => pending.push((child, other_child)),
                    None => return false,
                }
            }
        }
        true
    }
}

impl Eq for Node {}

// The derived drop would recurse once per level
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Node> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

/// Builds a tree from a flat listing
pub fn build_tree(entries: &[TreeEntry]) -> Node {
    let mut root = Node::root();
    for entry in entries {
        root.insert_path(&entry.path, entry.kind.is_dir());
    }
    root
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `let mut current = self;` in insert_path?
//    - `current` is a mutable reference that we move down the tree
//    - Each loop iteration re-points it at the child we just found or made
//    - This is the iterative version of "insert into child, recursively"
//
// 2. What does entry().or_insert_with() do?
//    - Looks up a key in the HashMap
//    - If missing, calls the closure to create the value and inserts it
//    - Either way, returns a mutable reference to the value
//
// 3. Why `is_dir |= ...` instead of `is_dir = ...`?
//    - A path may show up as a file in one entry and as a parent in another
//    - OR-ing means "directory wins", whatever order the entries came in
//
// 4. Why a hand-written Drop?
//    - Each Node owns its children, so the default drop calls itself once
//      per level of nesting
//    - Draining children into a Vec first means each Node dropped at the
//      end of the loop body is already childless
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::EntryKind;

    fn sample_entries() -> Vec<TreeEntry> {
        vec![
            TreeEntry::tree("src"),
            TreeEntry::blob("src/main.rs"),
            TreeEntry::tree("src/util"),
            TreeEntry::blob("src/util/mod.rs"),
            TreeEntry::blob("README.md"),
            TreeEntry::blob("docs/guide/intro.md"),
            TreeEntry::new("vendor/lib", EntryKind::Other("commit".to_string())),
            TreeEntry::tree("empty"),
        ]
    }

    // Every permutation of a list, generated by Heap's algorithm
    fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
        fn heap<T: Clone>(k: usize, items: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
            if k <= 1 {
                out.push(items.clone());
                return;
            }
            for i in 0..k - 1 {
                heap(k - 1, items, out);
                if k % 2 == 0 {
                    items.swap(i, k - 1);
                } else {
                    items.swap(0, k - 1);
                }
            }
            heap(k - 1, items, out);
        }

        let mut items = items.to_vec();
        let mut out = Vec::new();
        let k = items.len();
        heap(k, &mut items, &mut out);
        out
    }

    #[test]
    fn test_build_creates_intermediate_directories() {
        let root = build_tree(&[TreeEntry::blob("a/b/c.txt")]);

        let a = &root.children["a"];
        assert!(a.is_dir);
        let b = &a.children["b"];
        assert!(b.is_dir);
        let c = &b.children["c.txt"];
        assert!(!c.is_dir);
        assert!(c.children.is_empty());
        assert_eq!(root.descendant_count(), 3);
    }

    #[test]
    fn test_root_is_synthetic_directory() {
        let root = build_tree(&[]);
        assert_eq!(root.name, "");
        assert!(root.is_dir);
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_duplicate_paths_are_merged() {
        let root = build_tree(&[
            TreeEntry::blob("a/b.txt"),
            TreeEntry::blob("a/b.txt"),
            TreeEntry::tree("a"),
        ]);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children["a"].children.len(), 1);
        assert_eq!(root.descendant_count(), 2);
    }

    #[test]
    fn test_submodule_is_a_leaf() {
        let root = build_tree(&[TreeEntry::new(
            "vendor/lib",
            EntryKind::Other("commit".to_string()),
        )]);
        assert!(root.children["vendor"].is_dir);
        assert!(!root.children["vendor"].children["lib"].is_dir);
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        let root = build_tree(&[TreeEntry::blob("/a//b.txt/"), TreeEntry::blob("")]);
        assert_eq!(root.children.len(), 1);
        assert!(root.children["a"].children.contains_key("b.txt"));
    }

    #[test]
    fn test_build_is_order_independent() {
        let entries = sample_entries();
        let expected = build_tree(&entries);

        // 8! = 40320 orderings of the sample listing
        for permutation in permutations(&entries) {
            assert_eq!(build_tree(&permutation), expected);
        }
    }

    #[test]
    fn test_very_deep_path_does_not_grow_the_stack() {
        const DEPTH: usize = 200_000;
        let path = vec!["d"; DEPTH].join("/");

        let first = build_tree(&[TreeEntry::blob(&path)]);
        let second = build_tree(&[TreeEntry::blob(&path)]);
        assert_eq!(first.descendant_count(), DEPTH);
        assert!(first == second);

        let other = build_tree(&[TreeEntry::tree(&path)]);
        assert!(first != other);
        // All three trees are dropped here
    }

    #[test]
    fn test_equality_ignores_insertion_order_but_not_shape() {
        let one = build_tree(&[TreeEntry::blob("a/b"), TreeEntry::blob("a/c")]);
        let two = build_tree(&[TreeEntry::blob("a/c"), TreeEntry::blob("a/b")]);
        let three = build_tree(&[TreeEntry::blob("a/b"), TreeEntry::blob("a/d")]);
        assert!(one == two);
        assert!(one != three);
    }

    #[test]
    fn test_file_then_child_path_is_order_independent() {
        // A path listed as a file and also used as a parent still ends up a
        // directory, whichever entry comes first
        let forward = build_tree(&[TreeEntry::blob("a"), TreeEntry::blob("a/b")]);
        let backward = build_tree(&[TreeEntry::blob("a/b"), TreeEntry::blob("a")]);
        assert_eq!(forward, backward);
        assert!(forward.children["a"].is_dir);
    }
}
