//! Strategy-driven graph copy.

use super::{copy_node, nearest};
use crate::graph::{NodeFactory, NodeId};
use crate::selection::TraversalStrategy;
use crate::visitor::{BasicTraversal, Visitor};

/// Copies the part of a graph a [`TraversalStrategy`] selects into a fresh
/// [`NodeFactory`].
///
/// Nodes in scope are recreated along with their containers. Edges are
/// copied from in-scope nodes only; the far end is moved up to its nearest
/// container (or itself) that is in filter, and dropped when there is none.
///
/// # Example
///
/// ```rust
/// use depscope::graph::NodeFactory;
/// use depscope::selection::ComprehensiveTraversalStrategy;
/// use depscope::transform::GraphCopier;
///
/// let mut source = NodeFactory::new();
/// let a = source.create_feature("a.A.a", true);
/// let b = source.create_class("b.B", false);
/// source.add_dependency(a, b);
///
/// let mut copier = GraphCopier::new(ComprehensiveTraversalStrategy);
/// copier.traverse_nodes(&source, source.package_ids());
/// let copy = copier.into_factory();
///
/// assert_eq!(copy.node_count(), source.node_count());
/// assert_eq!(copy.edge_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct GraphCopier<S> {
    strategy: S,
    target: NodeFactory,
}

impl<S: TraversalStrategy> GraphCopier<S> {
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            target: NodeFactory::new(),
        }
    }

    /// Copies into an existing factory instead of a fresh one.
    pub fn with_factory(strategy: S, target: NodeFactory) -> Self {
        Self { strategy, target }
    }

    /// Walks `roots` of `source` and copies what the strategy selects.
    pub fn traverse_nodes(&mut self, source: &NodeFactory, roots: impl IntoIterator<Item = NodeId>) {
        BasicTraversal::new(&mut *self).traverse_nodes(source, roots);
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.target
    }

    pub fn into_factory(self) -> NodeFactory {
        self.target
    }

    fn copy(&mut self, source: &NodeFactory, node: NodeId) {
        if self.strategy.is_in_scope(source.node(node)) {
            copy_node(source, &mut self.target, node);
        }
    }

    fn resolve_peer(&self, source: &NodeFactory, peer: NodeId) -> Option<NodeId> {
        nearest(source, peer, |n| self.strategy.is_in_filter(source.node(n)))
    }

    fn copy_edge(&mut self, source: &NodeFactory, current: NodeId, peer: NodeId, outbound: bool) {
        if !self.strategy.is_in_scope(source.node(current)) {
            return;
        }
        let Some(peer) = self.resolve_peer(source, peer) else {
            return;
        };

        let current = copy_node(source, &mut self.target, current);
        let peer = copy_node(source, &mut self.target, peer);
        if outbound {
            self.target.add_dependency(current, peer);
        } else {
            self.target.add_dependency(peer, current);
        }
    }
}

impl<S: TraversalStrategy> Visitor for GraphCopier<S> {
    fn visit_package(&mut self, graph: &NodeFactory, package: NodeId) {
        self.copy(graph, package);
    }

    fn visit_inbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.copy_edge(graph, current, peer, false);
    }

    fn visit_outbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.copy_edge(graph, current, peer, true);
    }

    fn visit_class(&mut self, graph: &NodeFactory, class: NodeId) {
        self.copy(graph, class);
    }

    fn visit_inbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.copy_edge(graph, current, peer, false);
    }

    fn visit_outbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.copy_edge(graph, current, peer, true);
    }

    fn visit_feature(&mut self, graph: &NodeFactory, feature: NodeId) {
        self.copy(graph, feature);
    }

    fn visit_inbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.copy_edge(graph, current, peer, false);
    }

    fn visit_outbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.copy_edge(graph, current, peer, true);
    }

    fn order(&self, graph: &NodeFactory, nodes: Vec<NodeId>) -> Vec<NodeId> {
        self.strategy.order(graph, nodes)
    }
}
