//! Sidebar tree built lazily from directory listings.
//!
//! The tree mirrors the repository below the content root. Directories are
//! loaded on first expansion; only documents (`README.md`) are kept as
//! leaves. Both the raw listings and the built child lists are cached for
//! the whole session.
//!
//! # Path Convention
//!
//! Every node is keyed by its full repository path (e.g. `writeups/pwn/heap`),
//! exactly as reported by the contents API. The root node is the content
//! root itself and is never rendered as a row.

use std::collections::HashMap;

use crate::config::DOCUMENT_LABEL;
use crate::core::error::FetchError;
use crate::core::ordering;
use crate::models::{DirectoryEntry, OrderSpec};

// ============================================================================
// Nodes
// ============================================================================

/// Load state of a directory node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Failed(String),
}

/// Directory or document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Directory {
        state: LoadState,
        /// Expansion as last set by the user
        expanded: bool,
    },
    Document,
}

/// A node of the sidebar tree.
#[derive(Clone, Debug)]
pub struct TreeNode {
    /// Full repository path (unique key)
    pub path: String,
    /// Entry name (last path segment)
    pub name: String,
    /// Text shown in the sidebar
    pub label: String,
    pub kind: NodeKind,
    /// Parent directory path (`None` for the root)
    pub parent: Option<String>,
    /// Child paths in display order (directories only, once loaded)
    pub children: Vec<String>,
    /// Visible under the current filter
    pub(crate) shown: bool,
    /// Container opened by the current filter
    pub(crate) forced_open: bool,
}

impl TreeNode {
    fn directory(path: &str, name: &str, parent: Option<&str>) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            label: name.to_string(),
            kind: NodeKind::Directory {
                state: LoadState::Unloaded,
                expanded: false,
            },
            parent: parent.map(String::from),
            children: Vec::new(),
            shown: true,
            forced_open: false,
        }
    }

    fn document(path: &str, name: &str, parent: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            label: DOCUMENT_LABEL.to_string(),
            kind: NodeKind::Document,
            parent: Some(parent.to_string()),
            children: Vec::new(),
            shown: true,
            forced_open: false,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn load_state(&self) -> Option<&LoadState> {
        match &self.kind {
            NodeKind::Directory { state, .. } => Some(state),
            NodeKind::Document => None,
        }
    }

    /// User expansion flag (always `false` for documents).
    pub fn is_expanded(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { expanded: true, .. })
    }

    /// Whether the node is visible under the current filter.
    #[inline]
    pub fn is_shown(&self) -> bool {
        self.shown
    }
}

// ============================================================================
// Expansion
// ============================================================================

/// Result of an expand/collapse request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// The directory was collapsed
    Collapsed,
    /// Reopened from the fragment cache without touching the network
    Reused,
    /// Built synchronously from a cached listing
    Built,
    /// A listing is already in flight for this directory
    Pending,
    /// The caller must fetch the listing for this path and call
    /// [`SidebarTree::complete_listing`]
    Fetch(String),
    /// Unknown path or not a directory
    Ignored,
}

/// Status shown next to a directory row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RowStatus {
    Idle,
    Loading,
    Failed(String),
}

/// One visible line of the sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TreeRow {
    pub path: String,
    pub label: String,
    pub depth: usize,
    pub is_dir: bool,
    /// Directory container currently open
    pub open: bool,
    pub status: RowStatus,
    /// The row of the active document
    pub active: bool,
}

// ============================================================================
// SidebarTree
// ============================================================================

/// Lazily loaded directory tree with session caches.
#[derive(Clone, Debug)]
pub struct SidebarTree {
    root: String,
    pub(crate) nodes: HashMap<String, TreeNode>,
    /// Raw listings by directory path (never invalidated)
    listings: HashMap<String, Vec<DirectoryEntry>>,
    /// Built child lists by directory path
    fragments: HashMap<String, Vec<String>>,
    order: OrderSpec,
    pub(crate) query: String,
    active: Option<String>,
}

impl SidebarTree {
    /// Create a tree rooted at the content directory.
    ///
    /// The root starts expanded but unloaded; call [`Self::expand`] on it
    /// to request the first listing.
    pub fn new(root: &str, order: OrderSpec) -> Self {
        let mut node = TreeNode::directory(root, root.rsplit('/').next().unwrap_or(root), None);
        node.kind = NodeKind::Directory {
            state: LoadState::Unloaded,
            expanded: true,
        };

        let mut nodes = HashMap::new();
        nodes.insert(root.to_string(), node);

        Self {
            root: root.to_string(),
            nodes,
            listings: HashMap::new(),
            fragments: HashMap::new(),
            order,
            query: String::new(),
            active: None,
        }
    }

    #[inline]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The root listing failed; it has no row of its own to retry from.
    pub fn root_failed(&self) -> bool {
        matches!(
            self.nodes.get(&self.root).and_then(TreeNode::load_state),
            Some(LoadState::Failed(_))
        )
    }

    pub fn node(&self, path: &str) -> Option<&TreeNode> {
        self.nodes.get(path)
    }

    /// Cached listing for a directory, if it was fetched this session.
    pub fn cached_listing(&self, path: &str) -> Option<&[DirectoryEntry]> {
        self.listings.get(path).map(Vec::as_slice)
    }

    // ------------------------------------------------------------------------
    // Expansion
    // ------------------------------------------------------------------------

    /// Expand a directory, loading it if needed.
    pub fn expand(&mut self, path: &str) -> Expansion {
        let Some(node) = self.nodes.get_mut(path) else {
            return Expansion::Ignored;
        };
        let NodeKind::Directory { state, expanded } = &mut node.kind else {
            return Expansion::Ignored;
        };
        *expanded = true;

        if self.fragments.contains_key(path) {
            self.reapply_filter();
            return Expansion::Reused;
        }

        match state {
            LoadState::Loading => Expansion::Pending,
            // Loaded without a fragment cannot happen; rebuild from the listing.
            LoadState::Unloaded | LoadState::Failed(_) | LoadState::Loaded => {
                *state = LoadState::Loading;
                match self.listings.get(path).cloned() {
                    Some(entries) => {
                        self.build(path, &entries);
                        Expansion::Built
                    }
                    None => Expansion::Fetch(path.to_string()),
                }
            }
        }
    }

    /// Collapse a directory. Children stay cached.
    pub fn collapse(&mut self, path: &str) -> Expansion {
        match self.nodes.get_mut(path).map(|n| &mut n.kind) {
            Some(NodeKind::Directory { expanded, .. }) => {
                *expanded = false;
                self.reapply_filter();
                Expansion::Collapsed
            }
            _ => Expansion::Ignored,
        }
    }

    /// Flip a directory's expansion, as a click on its row does.
    ///
    /// A failed directory is always re-expanded, which retries its listing.
    pub fn toggle(&mut self, path: &str) -> Expansion {
        let Some(node) = self.nodes.get(path) else {
            return Expansion::Ignored;
        };
        let failed = matches!(node.load_state(), Some(LoadState::Failed(_)));
        if node.is_expanded() && !failed {
            self.collapse(path)
        } else {
            self.expand(path)
        }
    }

    /// Finish a listing requested through [`Expansion::Fetch`].
    ///
    /// Returns `false` if the completion was ignored because the node is
    /// unknown or no longer loading. On failure the directory keeps no
    /// children and may be retried.
    pub fn complete_listing(
        &mut self,
        path: &str,
        result: Result<Vec<DirectoryEntry>, FetchError>,
    ) -> bool {
        let loading = matches!(
            self.nodes.get(path).and_then(TreeNode::load_state),
            Some(LoadState::Loading)
        );
        if !loading {
            return false;
        }

        match result {
            Ok(entries) => {
                self.listings.insert(path.to_string(), entries.clone());
                self.build(path, &entries);
            }
            Err(err) => {
                if let Some(NodeKind::Directory { state, .. }) =
                    self.nodes.get_mut(path).map(|n| &mut n.kind)
                {
                    *state = LoadState::Failed(err.to_string());
                }
            }
        }
        true
    }

    /// Create child stubs for a loaded directory and cache the fragment.
    fn build(&mut self, path: &str, entries: &[DirectoryEntry]) {
        let sorted = ordering::order(path, entries, &self.order);
        let mut children = Vec::with_capacity(sorted.len());

        for entry in &sorted {
            if self.nodes.contains_key(&entry.path) {
                continue;
            }
            let child = if entry.is_dir() {
                TreeNode::directory(&entry.path, &entry.name, Some(path))
            } else if entry.is_document() {
                TreeNode::document(&entry.path, &entry.name, path)
            } else {
                continue;
            };
            children.push(child.path.clone());
            self.nodes.insert(child.path.clone(), child);
        }

        self.fragments.insert(path.to_string(), children.clone());
        if let Some(node) = self.nodes.get_mut(path) {
            node.children = children;
            if let NodeKind::Directory { state, .. } = &mut node.kind {
                *state = LoadState::Loaded;
            }
        }
        self.reapply_filter();
    }

    // ------------------------------------------------------------------------
    // Active document
    // ------------------------------------------------------------------------

    /// Mark a document as active; any previous one is cleared.
    pub fn set_active(&mut self, path: Option<&str>) {
        self.active = path.map(String::from);
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Whether a directory's children are currently displayed.
    pub fn is_open(&self, node: &TreeNode) -> bool {
        if node.parent.is_none() {
            return true;
        }
        if self.query.is_empty() {
            node.is_expanded()
        } else {
            node.forced_open
        }
    }

    /// Flatten the visible part of the tree into rows, in display order.
    pub fn rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        if let Some(root) = self.nodes.get(&self.root) {
            self.push_rows(&root.children, 0, &mut rows);
        }
        rows
    }

    fn push_rows(&self, children: &[String], depth: usize, rows: &mut Vec<TreeRow>) {
        for path in children {
            let Some(node) = self.nodes.get(path) else {
                continue;
            };
            if !node.shown {
                continue;
            }

            let open = node.is_dir() && self.is_open(node);
            let status = match node.load_state() {
                Some(LoadState::Loading) => RowStatus::Loading,
                Some(LoadState::Failed(msg)) => RowStatus::Failed(msg.clone()),
                _ => RowStatus::Idle,
            };
            rows.push(TreeRow {
                path: node.path.clone(),
                label: node.label.clone(),
                depth,
                is_dir: node.is_dir(),
                open,
                status,
                active: self.active.as_deref() == Some(node.path.as_str()),
            });

            if open {
                self.push_rows(&node.children, depth + 1, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_listing() -> Vec<DirectoryEntry> {
        vec![
            DirectoryEntry::file("README.md", "w/README.md"),
            DirectoryEntry::file("logo.png", "w/logo.png"),
            DirectoryEntry::directory("web", "w/web"),
            DirectoryEntry::directory("pwn", "w/pwn"),
        ]
    }

    fn loaded_tree() -> SidebarTree {
        let mut tree = SidebarTree::new("w", OrderSpec::default());
        assert_eq!(tree.expand("w"), Expansion::Fetch("w".to_string()));
        assert!(tree.complete_listing("w", Ok(root_listing())));
        tree
    }

    fn labels(rows: &[TreeRow]) -> Vec<(&str, usize)> {
        rows.iter().map(|r| (r.path.as_str(), r.depth)).collect()
    }

    #[test]
    fn test_root_listing_builds_ordered_children() {
        let tree = loaded_tree();
        assert_eq!(
            labels(&tree.rows()),
            [("w/pwn", 0), ("w/web", 0), ("w/README.md", 0)]
        );
        // Non-document files are dropped silently
        assert!(tree.node("w/logo.png").is_none());
        assert_eq!(tree.node("w/README.md").unwrap().label, "README");
    }

    #[test]
    fn test_failed_root_can_be_retried() {
        let mut tree = SidebarTree::new("w", OrderSpec::default());
        assert!(!tree.root_failed());
        assert_eq!(tree.expand("w"), Expansion::Fetch("w".to_string()));
        assert!(tree.complete_listing("w", Err(FetchError::HttpError(403))));
        assert!(tree.root_failed());
        assert!(tree.rows().is_empty());

        assert_eq!(tree.expand("w"), Expansion::Fetch("w".to_string()));
        assert!(!tree.root_failed());
        assert!(tree.complete_listing("w", Ok(root_listing())));
        assert_eq!(tree.rows().len(), 3);
    }

    #[test]
    fn test_children_start_unloaded_and_collapsed() {
        let tree = loaded_tree();
        let pwn = tree.node("w/pwn").unwrap();
        assert_eq!(pwn.load_state(), Some(&LoadState::Unloaded));
        assert!(!pwn.is_expanded());
    }

    #[test]
    fn test_expand_loading_is_pending() {
        let mut tree = loaded_tree();
        assert_eq!(tree.expand("w/pwn"), Expansion::Fetch("w/pwn".to_string()));
        assert_eq!(tree.expand("w/pwn"), Expansion::Pending);
        assert_eq!(tree.rows()[0].status, RowStatus::Loading);
    }

    #[test]
    fn test_collapse_then_expand_reuses_fragment() {
        let mut tree = loaded_tree();
        tree.expand("w/pwn");
        tree.complete_listing(
            "w/pwn",
            Ok(vec![DirectoryEntry::directory("heap", "w/pwn/heap")]),
        );
        assert_eq!(tree.toggle("w/pwn"), Expansion::Collapsed);
        assert_eq!(labels(&tree.rows()).len(), 3);

        assert_eq!(tree.toggle("w/pwn"), Expansion::Reused);
        assert_eq!(
            labels(&tree.rows()),
            [("w/pwn", 0), ("w/pwn/heap", 1), ("w/web", 0), ("w/README.md", 0)]
        );
    }

    #[test]
    fn test_failed_listing_leaves_no_children_and_retries() {
        let mut tree = loaded_tree();
        tree.expand("w/web");
        tree.complete_listing("w/web", Err(FetchError::HttpError(403)));

        let web = tree.node("w/web").unwrap();
        assert_eq!(
            web.load_state(),
            Some(&LoadState::Failed("HTTP error: 403".to_string()))
        );
        assert!(web.children.is_empty());
        assert!(tree.cached_listing("w/web").is_none());

        // Clicking a failed directory retries
        assert_eq!(tree.toggle("w/web"), Expansion::Fetch("w/web".to_string()));
        tree.complete_listing(
            "w/web",
            Ok(vec![DirectoryEntry::file("README.md", "w/web/README.md")]),
        );
        assert_eq!(tree.node("w/web").unwrap().children, ["w/web/README.md"]);
    }

    #[test]
    fn test_completion_for_idle_node_is_ignored() {
        let mut tree = loaded_tree();
        assert!(!tree.complete_listing("w/pwn", Ok(vec![])));
        assert!(!tree.complete_listing("w/missing", Ok(vec![])));
        assert_eq!(
            tree.node("w/pwn").unwrap().load_state(),
            Some(&LoadState::Unloaded)
        );
    }

    #[test]
    fn test_out_of_order_completions() {
        let mut tree = loaded_tree();
        tree.expand("w/pwn");
        tree.expand("w/web");

        tree.complete_listing(
            "w/web",
            Ok(vec![DirectoryEntry::file("README.md", "w/web/README.md")]),
        );
        tree.complete_listing(
            "w/pwn",
            Ok(vec![DirectoryEntry::file("README.md", "w/pwn/README.md")]),
        );

        assert_eq!(
            labels(&tree.rows()),
            [
                ("w/pwn", 0),
                ("w/pwn/README.md", 1),
                ("w/web", 0),
                ("w/web/README.md", 1),
                ("w/README.md", 0),
            ]
        );
    }

    #[test]
    fn test_active_row() {
        let mut tree = loaded_tree();
        tree.set_active(Some("w/README.md"));
        let active: Vec<_> = tree.rows().into_iter().filter(|r| r.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].path, "w/README.md");

        tree.set_active(None);
        assert!(tree.rows().iter().all(|r| !r.active));
    }

    #[test]
    fn test_toggle_document_is_ignored() {
        let mut tree = loaded_tree();
        assert_eq!(tree.toggle("w/README.md"), Expansion::Ignored);
        assert_eq!(tree.toggle("nope"), Expansion::Ignored);
    }
}
