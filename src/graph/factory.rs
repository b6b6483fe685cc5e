//! Node registry and dependency arena.
//!
//! [`NodeFactory`] owns every node of one analysis pass. Nodes are stored in a
//! petgraph [`DiGraph`] whose edges are the dependency edges; containment and
//! inheritance links are kept on the nodes themselves. Three name maps provide
//! create-or-get semantics for packages, classes and features.

use super::names::split_qualified;
use super::node::{Node, NodeId, NodeKind};
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Create-or-get registry for packages, classes and features, plus the
/// dependency edges between them.
///
/// # Example
///
/// ```rust
/// use depscope::graph::NodeFactory;
///
/// let mut factory = NodeFactory::new();
/// let a = factory.create_feature("a.A.a", false);
/// let b = factory.create_class("b.B", true);
/// factory.add_dependency(a, b);
///
/// assert_eq!(factory.packages().len(), 2);
/// assert!(factory.outbound(a).contains(&b));
/// assert!(factory.is_confirmed(factory.package("b").unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct NodeFactory {
    graph: DiGraph<Node, ()>,
    packages: HashMap<String, NodeId>,
    classes: HashMap<String, NodeId>,
    features: HashMap<String, NodeId>,
}

impl NodeFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            packages: HashMap::new(),
            classes: HashMap::new(),
            features: HashMap::new(),
        }
    }

    /// Returns the package with this name, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `name` - Dotted package name; the empty string is the default package
    /// * `confirmed` - Raises the explicit confirmation of an existing package
    ///   that is not yet confirmed; never lowers it
    pub fn create_package(&mut self, name: &str, confirmed: bool) -> NodeId {
        trace!(package = name, "create package");
        let id = match self.packages.get(name) {
            Some(&id) => id,
            None => {
                let id = self
                    .graph
                    .add_node(Node::new(name, name, NodeKind::Package, confirmed, None));
                self.packages.insert(name.to_string(), id);
                debug!(package = name, "added package");
                id
            }
        };
        self.confirm_existing(id, confirmed);
        id
    }

    /// Returns the class with this name, creating it and its package if needed.
    ///
    /// The package is everything before the last dot outside of parentheses.
    /// A name without a dot lands in the default package. A newly created
    /// package inherits `confirmed`.
    pub fn create_class(&mut self, name: &str, confirmed: bool) -> NodeId {
        trace!(class = name, "create class");
        let id = match self.classes.get(name) {
            Some(&id) => id,
            None => {
                let (package_name, simple_name) = split_qualified(name);
                let package = self.create_package(package_name, confirmed);
                let id = self.graph.add_node(Node::new(
                    name,
                    simple_name,
                    NodeKind::Class,
                    confirmed,
                    Some(package),
                ));
                self.graph[package].contents.insert(id);
                self.classes.insert(name.to_string(), id);
                debug!(class = name, "added class");
                id
            }
        };
        self.confirm_existing(id, confirmed);
        id
    }

    /// Returns the feature with this name, creating it, its class and its
    /// package if needed.
    ///
    /// The owning class is everything before the member's own dot, so
    /// `a.A.a(b.B)` belongs to `a.A` and `a.A.A()` is a constructor of `a.A`.
    pub fn create_feature(&mut self, name: &str, confirmed: bool) -> NodeId {
        trace!(feature = name, "create feature");
        let id = match self.features.get(name) {
            Some(&id) => id,
            None => {
                let (class_name, simple_name) = split_qualified(name);
                let class = self.create_class(class_name, confirmed);
                let id = self.graph.add_node(Node::new(
                    name,
                    simple_name,
                    NodeKind::Feature,
                    confirmed,
                    Some(class),
                ));
                self.graph[class].contents.insert(id);
                self.features.insert(name.to_string(), id);
                debug!(feature = name, "added feature");
                id
            }
        };
        self.confirm_existing(id, confirmed);
        id
    }

    /// Kind-dispatching form of the three `create_*` methods.
    pub fn create(&mut self, kind: NodeKind, name: &str, confirmed: bool) -> NodeId {
        match kind {
            NodeKind::Package => self.create_package(name, confirmed),
            NodeKind::Class => self.create_class(name, confirmed),
            NodeKind::Feature => self.create_feature(name, confirmed),
        }
    }

    fn confirm_existing(&mut self, id: NodeId, confirmed: bool) {
        if confirmed && !self.is_confirmed(id) {
            self.graph[id].confirmed = true;
            debug!(node = %self.graph[id].name, "confirmed");
        }
    }

    /// Looks up a package by exact name.
    pub fn package(&self, name: &str) -> Option<NodeId> {
        self.packages.get(name).copied()
    }

    /// Looks up a class by exact name.
    pub fn class(&self, name: &str) -> Option<NodeId> {
        self.classes.get(name).copied()
    }

    /// Looks up a feature by exact name.
    pub fn feature(&self, name: &str) -> Option<NodeId> {
        self.features.get(name).copied()
    }

    /// Looks up a node of the given kind by exact name.
    pub fn lookup(&self, kind: NodeKind, name: &str) -> Option<NodeId> {
        match kind {
            NodeKind::Package => self.package(name),
            NodeKind::Class => self.class(name),
            NodeKind::Feature => self.feature(name),
        }
    }

    pub fn packages(&self) -> &HashMap<String, NodeId> {
        &self.packages
    }

    pub fn classes(&self) -> &HashMap<String, NodeId> {
        &self.classes
    }

    pub fn features(&self) -> &HashMap<String, NodeId> {
        &self.features
    }

    /// Package ids sorted by name. The usual root collection for traversals.
    pub fn package_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.packages.values().copied().collect();
        self.sort_by_name(&mut ids);
        ids
    }

    /// Every node id, in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices()
    }

    /// Borrows a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this factory.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.graph[id]
    }

    /// Borrows a node, or `None` if `id` was not issued by this factory.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.graph.node_weight(id)
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.graph[id].name
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.graph[id].kind
    }

    /// Effective confirmation: the explicit flag, or any confirmed content.
    pub fn is_confirmed(&self, id: NodeId) -> bool {
        let node = &self.graph[id];
        node.confirmed || node.contents.iter().any(|&c| self.is_confirmed(c))
    }

    /// Sets the explicit flag only. Containers and contents are untouched.
    pub fn set_confirmed(&mut self, id: NodeId, confirmed: bool) {
        self.graph[id].confirmed = confirmed;
    }

    /// Nodes this node depends on, in creation order.
    pub fn outbound(&self, id: NodeId) -> Vec<NodeId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Nodes depending on this node, in creation order.
    pub fn inbound(&self, id: NodeId) -> Vec<NodeId> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: NodeId, direction: Direction) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.graph.neighbors_directed(id, direction).collect();
        ids.sort();
        ids
    }

    /// Returns true if the edge `from -> to` exists.
    pub fn has_dependency(&self, from: NodeId, to: NodeId) -> bool {
        self.graph.find_edge(from, to).is_some()
    }

    /// Returns false for a self-loop or an edge to one of `from`'s containers.
    /// Every other pair, including an edge to a descendant, is allowed.
    pub fn can_add_dependency(&self, from: NodeId, to: NodeId) -> bool {
        from != to && !self.is_ancestor(to, from)
    }

    /// Adds the edge `from -> to`.
    ///
    /// Returns false, without touching the graph, when the edge already
    /// exists or [`can_add_dependency`](Self::can_add_dependency) rejects it.
    pub fn add_dependency(&mut self, from: NodeId, to: NodeId) -> bool {
        if !self.can_add_dependency(from, to) || self.has_dependency(from, to) {
            return false;
        }
        self.graph.add_edge(from, to, ());
        trace!(from = %self.graph[from].name, to = %self.graph[to].name, "added dependency");
        true
    }

    /// Removes the edge `from -> to`. Returns false if it was absent.
    pub fn remove_dependency(&mut self, from: NodeId, to: NodeId) -> bool {
        let Some(edge) = self.graph.find_edge(from, to) else {
            return false;
        };
        self.graph.remove_edge(edge);
        trace!(from = %self.graph[from].name, to = %self.graph[to].name, "removed dependency");
        true
    }

    /// Removes every edge from `from` to one of `targets`.
    pub fn remove_dependencies(&mut self, from: NodeId, targets: impl IntoIterator<Item = NodeId>) {
        for to in targets {
            self.remove_dependency(from, to);
        }
    }

    /// Every dependency edge as `(from, to)`, sorted.
    pub fn dependencies(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges: Vec<(NodeId, NodeId)> = self
            .graph
            .edge_references()
            .map(|e| (e.source(), e.target()))
            .collect();
        edges.sort();
        edges
    }

    /// Direct container: package of a class, class of a feature.
    pub fn container(&self, id: NodeId) -> Option<NodeId> {
        self.graph[id].container
    }

    /// Containers from nearest to farthest, excluding the node itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = self.graph[id].container;
        while let Some(parent) = current {
            result.push(parent);
            current = self.graph[parent].container;
        }
        result
    }

    /// The node followed by its containers, nearest first.
    pub fn self_and_ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = vec![id];
        result.extend(self.ancestors(id));
        result
    }

    /// Returns true if `ancestor` strictly contains `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.graph[node].container;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.graph[parent].container;
        }
        false
    }

    /// Returns true if either node contains the other, or they are the same.
    pub fn is_related(&self, a: NodeId, b: NodeId) -> bool {
        a == b || self.is_ancestor(a, b) || self.is_ancestor(b, a)
    }

    /// Every node contained, directly or not, in `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.graph[id].contents.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.graph[current].contents.iter().rev().copied());
        }
        result
    }

    /// Classes of a package, features of a class.
    pub fn contents(&self, id: NodeId) -> Vec<NodeId> {
        self.graph[id].contents.iter().copied().collect()
    }

    /// Package owning a class, or `None` if `class` is not a class.
    pub fn package_of(&self, class: NodeId) -> Option<NodeId> {
        let node = &self.graph[class];
        if node.kind == NodeKind::Class {
            node.container
        } else {
            None
        }
    }

    /// Class owning a feature, or `None` if `feature` is not a feature.
    pub fn class_of(&self, feature: NodeId) -> Option<NodeId> {
        let node = &self.graph[feature];
        if node.kind == NodeKind::Feature {
            node.container
        } else {
            None
        }
    }

    /// Records that `class` declares `parent` as a superclass or interface.
    ///
    /// Returns false if either node is not a class, the two are the same, or
    /// the link already exists.
    pub fn add_parent(&mut self, class: NodeId, parent: NodeId) -> bool {
        if class == parent
            || self.graph[class].kind != NodeKind::Class
            || self.graph[parent].kind != NodeKind::Class
        {
            return false;
        }
        if !self.graph[class].parents.insert(parent) {
            return false;
        }
        self.graph[parent].children.insert(class);
        true
    }

    pub fn parents(&self, class: NodeId) -> Vec<NodeId> {
        self.graph[class].parents.iter().copied().collect()
    }

    pub fn children(&self, class: NodeId) -> Vec<NodeId> {
        self.graph[class].children.iter().copied().collect()
    }

    /// The class's own feature with this simple name, e.g. `a()` for `a.A.a()`.
    pub fn feature_named(&self, class: NodeId, simple_name: &str) -> Option<NodeId> {
        self.graph[class]
            .contents
            .iter()
            .copied()
            .find(|&f| self.graph[f].simple_name == simple_name)
    }

    /// Features with this simple name visible from `class`: its own feature
    /// first, then the inherited features of each declared parent, depth first.
    ///
    /// # Returns
    ///
    /// An empty vector when neither the class nor any ancestor declares it.
    pub fn inherited_features(&self, class: NodeId, simple_name: &str) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![class];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(feature) = self.feature_named(current, simple_name) {
                result.push(feature);
            }
            stack.extend(self.graph[current].parents.iter().rev().copied());
        }
        result
    }

    /// Sorts ids by fully qualified name.
    pub fn sort_by_name(&self, ids: &mut [NodeId]) {
        ids.sort_by(|&a, &b| self.graph[a].name.cmp(&self.graph[b].name));
    }

    /// Total number of nodes of every kind.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Total number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the factory holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new()
    }
}
