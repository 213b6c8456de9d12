//! The converted dependency graph.
//!
//! Nodes live in a petgraph arena and are addressed by [`NodeIndex`]; parent
//! and child relations are edges, so diamonds never create ownership cycles.
//! A synthetic root node stands for the resolution root: an edge from it is
//! the "root" parent entry of a node.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::path::PathBuf;

use depgraph_core::module::{ModuleId, ModuleKey};
use indexmap::IndexSet;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// One (module, configuration) pair of the converted graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: ModuleId,
    /// `group:name:revision` coordinate.
    pub module: String,
    pub configuration: String,
    /// The configuration plus everything it extends. Fixed at creation.
    pub configurations: BTreeSet<String>,
    /// Files of the module's default artifacts under `configurations`.
    pub files: IndexSet<PathBuf>,
}

impl GraphNode {
    pub fn new(
        id: ModuleId,
        configuration: &str,
        configurations: BTreeSet<String>,
        files: IndexSet<PathBuf>,
    ) -> Self {
        Self {
            module: id.coordinate(),
            id,
            configuration: configuration.to_string(),
            configurations,
            files,
        }
    }

    pub fn key(&self) -> ModuleKey {
        self.id.normalize()
    }

    pub fn contains_configuration(&self, configuration: &str) -> bool {
        self.configurations.contains(configuration)
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.module, self.configuration)
    }
}

/// Edge label: the files attributable to this particular parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentEdge {
    pub files: IndexSet<PathBuf>,
}

/// A converted graph backed by petgraph.
#[derive(Debug)]
pub struct ResolvedGraph {
    graph: DiGraph<GraphNode, ParentEdge>,
    /// Lookup from engine identity and configuration to node index.
    index: HashMap<(ModuleId, String), NodeIndex>,
    root: NodeIndex,
}

impl ResolvedGraph {
    /// Create a graph whose synthetic root is `root` in `configuration`.
    pub fn new(root: GraphNode) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(root);
        Self {
            graph,
            index: HashMap::new(),
            root,
        }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Add or retrieve a node. Each (module, configuration) pair gets exactly one index.
    pub fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        let key = (node.id.clone(), node.configuration.clone());
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    /// Link `child` under `parent` (`None` = root) and union `files` into that
    /// edge's file set.
    pub fn link(&mut self, parent: Option<NodeIndex>, child: NodeIndex, files: IndexSet<PathBuf>) {
        let parent = parent.unwrap_or(self.root);
        match self.graph.find_edge(parent, child) {
            Some(edge) => self.graph[edge].files.extend(files),
            None => {
                self.graph.add_edge(parent, child, ParentEdge { files });
            }
        }
    }

    /// Look up a node by engine identity and configuration.
    pub fn find_by_id(&self, id: &ModuleId, configuration: &str) -> Option<NodeIndex> {
        self.index
            .get(&(id.clone(), configuration.to_string()))
            .copied()
    }

    /// Look up a node by reduced identity and configuration.
    pub fn find(&self, key: &ModuleKey, configuration: &str) -> Option<NodeIndex> {
        self.nodes()
            .find(|(_, n)| n.configuration == configuration && &n.key() == key)
            .map(|(idx, _)| idx)
    }

    /// Get the node data for an index.
    pub fn node(&self, idx: NodeIndex) -> &GraphNode {
        &self.graph[idx]
    }

    /// All converted nodes in creation order (excluding root).
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode)> {
        self.graph
            .node_indices()
            .filter(move |&idx| idx != self.root)
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Children of a node, in link order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect();
        // petgraph walks adjacency lists newest first.
        children.reverse();
        children
    }

    /// Parents of a node in link order. `None` stands for the root.
    pub fn parents(&self, idx: NodeIndex) -> Vec<Option<NodeIndex>> {
        let mut parents: Vec<Option<NodeIndex>> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| self.as_parent(e.source()))
            .collect();
        parents.reverse();
        parents
    }

    /// Files attributed to the edge from `parent` (`None` = root), if linked.
    pub fn parent_files(&self, idx: NodeIndex, parent: Option<NodeIndex>) -> Option<&IndexSet<PathBuf>> {
        let parent = parent.unwrap_or(self.root);
        self.graph
            .find_edge(parent, idx)
            .map(|edge| &self.graph[edge].files)
    }

    /// Whether the node was reached through at least one root edge.
    pub fn is_first_level(&self, idx: NodeIndex) -> bool {
        self.graph.find_edge(self.root, idx).is_some()
    }

    /// Union of node files reachable from `starts`, depth-first, children after parents.
    pub fn collect_files<I>(&self, starts: I) -> IndexSet<PathBuf>
    where
        I: IntoIterator<Item = NodeIndex>,
    {
        let mut files = IndexSet::new();
        let mut visited = HashSet::new();
        let mut stack: Vec<NodeIndex> = starts.into_iter().collect();
        stack.reverse();
        while let Some(idx) = stack.pop() {
            if !visited.insert(idx) {
                continue;
            }
            files.extend(self.graph[idx].files.iter().cloned());
            let mut children = self.children(idx);
            children.reverse();
            stack.extend(children);
        }
        files
    }

    fn as_parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        (idx != self.root).then_some(idx)
    }

    /// Render the graph as a tree below the root.
    ///
    /// A node whose children were already listed is marked `(*)` and not
    /// expanded again. With `edge_files`, the files attributed to each
    /// parent/child edge are listed under the child.
    pub fn print_tree(&self, max_depth: Option<usize>, edge_files: bool) -> String {
        let mut out = format!("{}\n", self.graph[self.root]);
        let mut expanded = HashSet::new();
        self.render_children(&mut out, self.root, "", 1, max_depth, edge_files, &mut expanded);
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn render_children(
        &self,
        out: &mut String,
        parent: NodeIndex,
        indent: &str,
        depth: usize,
        max_depth: Option<usize>,
        edge_files: bool,
        expanded: &mut HashSet<NodeIndex>,
    ) {
        let children = self.children(parent);
        for (i, &child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let (branch, next_indent) = if last {
                ("└── ", format!("{indent}    "))
            } else {
                ("├── ", format!("{indent}│   "))
            };
            let has_children = !self.children(child).is_empty();
            let repeated = has_children && expanded.contains(&child);
            let marker = if repeated { " (*)" } else { "" };
            out.push_str(&format!("{indent}{branch}{}{marker}\n", self.graph[child]));

            if edge_files {
                if let Some(files) = self.parent_files(child, self.as_parent(parent)) {
                    for file in files {
                        out.push_str(&format!("{next_indent}· {}\n", file.display()));
                    }
                }
            }

            let deeper = max_depth.map_or(true, |max| depth < max);
            if has_children && !repeated && deeper {
                expanded.insert(child);
                self.render_children(out, child, &next_indent, depth + 1, max_depth, edge_files, expanded);
            }
        }
    }

    /// Shortest path from the root to a module, root included.
    ///
    /// Accepts either `group:name` or just `name`.
    pub fn find_path(&self, target_key: &str) -> Option<Vec<&GraphNode>> {
        let targets = self.resolve_key(target_key);
        if targets.is_empty() {
            return None;
        }

        let mut came_from: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([self.root]);
        let mut found = None;
        while let Some(idx) = queue.pop_front() {
            if targets.contains(&idx) {
                found = Some(idx);
                break;
            }
            for child in self.children(idx) {
                if child != self.root && !came_from.contains_key(&child) {
                    came_from.insert(child, idx);
                    queue.push_back(child);
                }
            }
        }

        let mut path = vec![found?];
        while let Some(&prev) = came_from.get(path.last()?) {
            path.push(prev);
        }
        path.reverse();
        Some(path.into_iter().map(|idx| &self.graph[idx]).collect())
    }

    /// Every node matching a user-provided key: exact `group:name` first,
    /// then bare module name.
    fn resolve_key(&self, key: &str) -> HashSet<NodeIndex> {
        let by_name = |exact: bool| -> HashSet<NodeIndex> {
            self.nodes()
                .filter(|(_, n)| if exact { n.key().short() == key } else { n.id.name == key })
                .map(|(idx, _)| idx)
                .collect()
        };
        let exact = by_name(true);
        if exact.is_empty() {
            by_name(false)
        } else {
            exact
        }
    }

    /// Number of converted nodes (excluding root).
    pub fn len(&self) -> usize {
        self.graph.node_count().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_node(group: &str, name: &str, configuration: &str) -> GraphNode {
        GraphNode::new(
            ModuleId::new(group, name, "1.0"),
            configuration,
            BTreeSet::from([configuration.to_string()]),
            IndexSet::new(),
        )
    }

    fn files(paths: &[&str]) -> IndexSet<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    fn sample() -> ResolvedGraph {
        ResolvedGraph::new(make_node("com.example", "app", "default"))
    }

    #[test]
    fn duplicate_add_returns_same_index() {
        let mut g = sample();
        let idx1 = g.add_node(make_node("org.example", "lib", "default"));
        let idx2 = g.add_node(make_node("org.example", "lib", "default"));
        let other = g.add_node(make_node("org.example", "lib", "runtime"));
        assert_eq!(idx1, idx2);
        assert_ne!(idx1, other);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn link_unions_files_for_same_parent() {
        let mut g = sample();
        let a = g.add_node(make_node("org.a", "a", "default"));
        let b = g.add_node(make_node("org.b", "b", "default"));
        g.link(Some(a), b, files(&["/x.jar"]));
        g.link(Some(a), b, files(&["/y.jar", "/x.jar"]));
        assert_eq!(g.parents(b), vec![Some(a)]);
        assert_eq!(g.parent_files(b, Some(a)), Some(&files(&["/x.jar", "/y.jar"])));
    }

    #[test]
    fn root_parent_is_none() {
        let mut g = sample();
        let a = g.add_node(make_node("org.a", "a", "default"));
        g.link(None, a, IndexSet::new());
        assert_eq!(g.parents(a), vec![None]);
        assert!(g.is_first_level(a));
        assert_eq!(g.children(g.root()), vec![a]);
    }

    #[test]
    fn tree_printing() {
        let mut g = sample();
        let a = g.add_node(make_node("org.a", "a", "default"));
        let b = g.add_node(make_node("org.b", "b", "runtime"));
        g.link(None, a, IndexSet::new());
        g.link(Some(a), b, IndexSet::new());

        let tree = g.print_tree(None, false);
        assert!(tree.contains("com.example:app:1.0 (default)"));
        assert!(tree.contains("└── org.a:a:1.0 (default)"));
        assert!(tree.contains("    └── org.b:b:1.0 (runtime)"));

        let shallow = g.print_tree(Some(1), false);
        assert!(!shallow.contains("org.b:b"));
    }

    #[test]
    fn tree_marks_repeated_subtrees_and_lists_edge_files() {
        let mut g = sample();
        let a = g.add_node(make_node("org.a", "a", "default"));
        let b = g.add_node(make_node("org.b", "b", "default"));
        let c = g.add_node(make_node("org.c", "c", "default"));
        g.link(None, a, files(&["/a.jar"]));
        g.link(None, b, IndexSet::new());
        g.link(Some(a), c, IndexSet::new());
        g.link(Some(b), a, files(&["/a-sources.jar"]));

        let tree = g.print_tree(None, true);
        assert_eq!(tree.matches("org.c:c:1.0").count(), 1);
        assert!(tree.contains("org.a:a:1.0 (default) (*)"));
        assert!(tree.contains("· /a.jar"));
        assert!(tree.contains("· /a-sources.jar"));
        assert!(!g.print_tree(None, false).contains("·"));
    }

    #[test]
    fn find_path_exact_and_partial() {
        let mut g = sample();
        let a = g.add_node(make_node("org.a", "a", "default"));
        let b = g.add_node(make_node("org.b", "my-lib", "default"));
        g.link(None, a, IndexSet::new());
        g.link(Some(a), b, IndexSet::new());

        let path = g.find_path("org.b:my-lib").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].id.name, "app");
        assert_eq!(path[2].id.name, "my-lib");

        assert_eq!(g.find_path("my-lib").unwrap().len(), 3);
        assert!(g.find_path("org.missing:lib").is_none());
    }

    #[test]
    fn find_path_prefers_shortest_route() {
        let mut g = sample();
        let a = g.add_node(make_node("org.a", "a", "default"));
        let b = g.add_node(make_node("org.b", "b", "default"));
        let t = g.add_node(make_node("org.t", "t", "default"));
        g.link(None, a, IndexSet::new());
        g.link(Some(a), b, IndexSet::new());
        g.link(Some(b), t, IndexSet::new());
        g.link(None, t, IndexSet::new());

        let path = g.find_path("org.t:t").unwrap();
        let names: Vec<_> = path.iter().map(|n| n.id.name.as_str()).collect();
        assert_eq!(names, vec!["app", "t"]);
    }

    #[test]
    fn collect_files_walks_children() {
        let mut g = sample();
        let mut a = make_node("org.a", "a", "default");
        a.files = files(&["/a.jar"]);
        let mut b = make_node("org.b", "b", "default");
        b.files = files(&["/b.jar", "/a.jar"]);
        let a = g.add_node(a);
        let b = g.add_node(b);
        g.link(Some(a), b, IndexSet::new());
        assert_eq!(g.collect_files([a]), files(&["/a.jar", "/b.jar"]));
    }
}
