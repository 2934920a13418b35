//! Search filtering over the sidebar tree.

use crate::core::tree::{NodeKind, SidebarTree, TreeNode};
use crate::models::preferences::normalize_query;

/// Whether a node matches an already-normalized query.
///
/// Directories match on their name, documents on their full path.
fn matches(node: &TreeNode, query: &str) -> bool {
    match node.kind {
        NodeKind::Directory { .. } => node.name.to_lowercase().contains(query),
        NodeKind::Document => node.path.to_lowercase().contains(query),
    }
}

impl SidebarTree {
    /// Filter the tree by a free-text query (case-insensitive substring).
    ///
    /// With an empty query every node is shown and directories fall back to
    /// their user expansion state. Otherwise only matches and their ancestor
    /// directories are shown; ancestors are forced open, and a matching
    /// directory opens its own container one level deep. Recomputed from
    /// scratch on every call.
    pub fn apply_filter(&mut self, query: &str) {
        self.query = normalize_query(query);

        if self.query.is_empty() {
            for node in self.nodes.values_mut() {
                node.shown = true;
                node.forced_open = false;
            }
            return;
        }

        for node in self.nodes.values_mut() {
            node.shown = false;
            node.forced_open = false;
        }

        let root = self.root().to_string();
        let matched: Vec<String> = self
            .nodes
            .values()
            .filter(|n| n.path != root && matches(n, &self.query))
            .map(|n| n.path.clone())
            .collect();

        for path in matched {
            let Some(node) = self.nodes.get_mut(&path) else {
                continue;
            };
            node.shown = true;
            if node.is_dir() {
                node.forced_open = true;
            }

            let mut parent = node.parent.clone();
            while let Some(parent_path) = parent {
                let Some(ancestor) = self.nodes.get_mut(&parent_path) else {
                    break;
                };
                ancestor.shown = true;
                ancestor.forced_open = true;
                parent = ancestor.parent.clone();
            }
        }

        if let Some(root) = self.nodes.get_mut(&root) {
            root.shown = true;
        }
    }

    /// Re-run the filter with the current query, e.g. after new nodes load.
    pub(crate) fn reapply_filter(&mut self) {
        let query = std::mem::take(&mut self.query);
        self.apply_filter(&query);
    }
}

#[cfg(test)]
mod tests {
    use crate::core::tree::{Expansion, SidebarTree, TreeRow};
    use crate::models::{DirectoryEntry, OrderSpec};

    /// w/
    ///   crypto/         (loaded, collapsed)
    ///     rsa/          (loaded)
    ///       README.md
    ///     README.md
    ///   pwn/            (loaded, expanded)
    ///     heap/         (never expanded)
    ///     README.md
    ///   README.md
    fn fixture() -> SidebarTree {
        let mut tree = SidebarTree::new("w", OrderSpec::default());
        load(
            &mut tree,
            "w",
            vec![
                DirectoryEntry::directory("crypto", "w/crypto"),
                DirectoryEntry::directory("pwn", "w/pwn"),
                DirectoryEntry::file("README.md", "w/README.md"),
            ],
        );
        load(
            &mut tree,
            "w/crypto",
            vec![
                DirectoryEntry::directory("rsa", "w/crypto/rsa"),
                DirectoryEntry::file("README.md", "w/crypto/README.md"),
            ],
        );
        load(
            &mut tree,
            "w/crypto/rsa",
            vec![DirectoryEntry::file("README.md", "w/crypto/rsa/README.md")],
        );
        load(
            &mut tree,
            "w/pwn",
            vec![
                DirectoryEntry::directory("heap", "w/pwn/heap"),
                DirectoryEntry::file("README.md", "w/pwn/README.md"),
            ],
        );
        tree.collapse("w/crypto");
        tree
    }

    fn load(tree: &mut SidebarTree, path: &str, entries: Vec<DirectoryEntry>) {
        assert_eq!(tree.expand(path), Expansion::Fetch(path.to_string()));
        assert!(tree.complete_listing(path, Ok(entries)));
    }

    fn paths(rows: &[TreeRow]) -> Vec<&str> {
        rows.iter().map(|r| r.path.as_str()).collect()
    }

    fn expansion_snapshot(tree: &SidebarTree) -> Vec<(String, bool)> {
        let mut snapshot: Vec<_> = tree
            .nodes
            .values()
            .filter(|n| n.is_dir())
            .map(|n| (n.path.clone(), n.is_expanded()))
            .collect();
        snapshot.sort();
        snapshot
    }

    #[test]
    fn test_unfiltered_view() {
        let tree = fixture();
        assert_eq!(
            paths(&tree.rows()),
            [
                "w/crypto",
                "w/pwn",
                "w/pwn/heap",
                "w/pwn/README.md",
                "w/README.md"
            ]
        );
    }

    #[test]
    fn test_match_reveals_ancestors() {
        let mut tree = fixture();
        tree.apply_filter("RSA/readme");

        assert_eq!(
            paths(&tree.rows()),
            ["w/crypto", "w/crypto/rsa", "w/crypto/rsa/README.md"]
        );
    }

    #[test]
    fn test_visible_leaves_match_and_ancestors_are_visible() {
        let mut tree = fixture();
        tree.apply_filter("pwn");

        let rows = tree.rows();
        for row in rows.iter().filter(|r| !r.is_dir) {
            assert!(row.path.to_lowercase().contains("pwn"));
        }
        for node in tree.nodes.values().filter(|n| n.is_shown() && !n.is_dir()) {
            let mut parent = node.parent.clone();
            while let Some(p) = parent {
                let ancestor = tree.node(&p).unwrap();
                assert!(ancestor.is_shown());
                assert!(tree.is_open(ancestor));
                parent = ancestor.parent.clone();
            }
        }
    }

    #[test]
    fn test_matching_directory_opens_one_level() {
        let mut tree = fixture();
        tree.apply_filter("crypto");

        // Directory name matches "crypto" and every document path below it
        // contains "crypto", but the nested "rsa" directory itself does not.
        assert_eq!(
            paths(&tree.rows()),
            [
                "w/crypto",
                "w/crypto/rsa",
                "w/crypto/rsa/README.md",
                "w/crypto/README.md"
            ]
        );

        tree.apply_filter("heap");
        let rows = tree.rows();
        assert_eq!(paths(&rows), ["w/pwn", "w/pwn/heap"]);
        // The matched directory's container is open even though it has no children yet
        assert!(rows[1].open);
    }

    #[test]
    fn test_directory_match_does_not_show_unmatched_children() {
        let mut tree = fixture();
        tree.apply_filter("rsa");
        assert_eq!(
            paths(&tree.rows()),
            ["w/crypto", "w/crypto/rsa", "w/crypto/rsa/README.md"]
        );
        assert!(tree.node("w/crypto/README.md").map(|n| !n.is_shown()).unwrap());
    }

    #[test]
    fn test_no_matches_hides_everything() {
        let mut tree = fixture();
        tree.apply_filter("kernel");
        assert!(tree.rows().is_empty());
    }

    #[test]
    fn test_clearing_query_restores_expansion() {
        let mut tree = fixture();
        let before_rows = tree.rows();
        let before = expansion_snapshot(&tree);

        tree.apply_filter("rsa");
        tree.apply_filter("heap");
        tree.apply_filter("   ");

        assert_eq!(expansion_snapshot(&tree), before);
        assert_eq!(tree.rows(), before_rows);
        assert!(tree.nodes.values().all(|n| n.is_shown()));
    }

    #[test]
    fn test_filter_applies_to_nodes_loaded_later() {
        let mut tree = fixture();
        tree.apply_filter("tcache");
        assert!(tree.rows().is_empty());

        load(
            &mut tree,
            "w/pwn/heap",
            vec![DirectoryEntry::directory("tcache", "w/pwn/heap/tcache")],
        );
        assert_eq!(
            paths(&tree.rows()),
            ["w/pwn", "w/pwn/heap", "w/pwn/heap/tcache"]
        );
    }
}
