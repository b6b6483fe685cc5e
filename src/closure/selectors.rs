//! Building blocks for closure layers.

use crate::graph::{NodeFactory, NodeId};
use crate::selection::SelectionCriteria;
use crate::transform::copy_node;
use crate::visitor::{BasicTraversal, Visitor};
use std::collections::HashSet;

/// Which edges a closure follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClosureDirection {
    /// From a node to the nodes depending on it.
    Inbound,
    /// From a node to the nodes it depends on.
    Outbound,
}

impl ClosureDirection {
    /// Peers of `node` in this direction, in name order.
    pub fn peers(self, graph: &NodeFactory, node: NodeId) -> Vec<NodeId> {
        let mut peers = match self {
            ClosureDirection::Inbound => graph.inbound(node),
            ClosureDirection::Outbound => graph.outbound(node),
        };
        graph.sort_by_name(&mut peers);
        peers
    }

    /// Adds the edge between `node` and `peer` the way it points in the source.
    fn link(self, factory: &mut NodeFactory, node: NodeId, peer: NodeId) -> bool {
        match self {
            ClosureDirection::Inbound => factory.add_dependency(peer, node),
            ClosureDirection::Outbound => factory.add_dependency(node, peer),
        }
    }
}

impl std::fmt::Display for ClosureDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClosureDirection::Inbound => write!(f, "inbound"),
            ClosureDirection::Outbound => write!(f, "outbound"),
        }
    }
}

/// Collects the nodes matching a criteria among some roots and their
/// contents, and copies them into a factory.
pub struct ClosureStartSelector<'a> {
    criteria: &'a dyn SelectionCriteria,
    factory: &'a mut NodeFactory,
    selected: Vec<NodeId>,
    copied: Vec<NodeId>,
}

impl<'a> ClosureStartSelector<'a> {
    pub fn new(criteria: &'a dyn SelectionCriteria, factory: &'a mut NodeFactory) -> Self {
        Self {
            criteria,
            factory,
            selected: Vec::new(),
            copied: Vec::new(),
        }
    }

    pub fn traverse_nodes(&mut self, graph: &NodeFactory, roots: impl IntoIterator<Item = NodeId>) {
        BasicTraversal::new(&mut *self).traverse_nodes(graph, roots);
    }

    /// Matching nodes of the source graph.
    pub fn selected_nodes(&self) -> &[NodeId] {
        &self.selected
    }

    /// Their copies in the target factory.
    pub fn copied_nodes(&self) -> &[NodeId] {
        &self.copied
    }

    pub fn into_parts(self) -> (Vec<NodeId>, Vec<NodeId>) {
        (self.selected, self.copied)
    }

    fn select(&mut self, graph: &NodeFactory, node: NodeId) {
        if self.criteria.matches(graph.node(node)) {
            self.selected.push(node);
            self.copied.push(copy_node(graph, self.factory, node));
        }
    }
}

impl Visitor for ClosureStartSelector<'_> {
    fn visit_package(&mut self, graph: &NodeFactory, package: NodeId) {
        self.select(graph, package);
    }

    fn visit_class(&mut self, graph: &NodeFactory, class: NodeId) {
        self.select(graph, class);
    }

    fn visit_feature(&mut self, graph: &NodeFactory, feature: NodeId) {
        self.select(graph, feature);
    }

    fn order(&self, graph: &NodeFactory, mut nodes: Vec<NodeId>) -> Vec<NodeId> {
        graph.sort_by_name(&mut nodes);
        nodes
    }
}

/// One expansion step: follows the edges of a set of nodes in one direction
/// and copies every peer not already covered, along with the edge leading
/// to it.
///
/// Peers in the coverage set are skipped entirely, edge included.
pub struct ClosureLayerSelector<'a> {
    direction: ClosureDirection,
    factory: &'a mut NodeFactory,
    coverage: &'a HashSet<NodeId>,
    seen: HashSet<NodeId>,
    selected: Vec<NodeId>,
    copied: Vec<NodeId>,
}

impl<'a> ClosureLayerSelector<'a> {
    pub fn new(
        direction: ClosureDirection,
        factory: &'a mut NodeFactory,
        coverage: &'a HashSet<NodeId>,
    ) -> Self {
        Self {
            direction,
            factory,
            coverage,
            seen: HashSet::new(),
            selected: Vec::new(),
            copied: Vec::new(),
        }
    }

    pub fn direction(&self) -> ClosureDirection {
        self.direction
    }

    /// Expands each of `nodes`. Contents are not walked.
    pub fn traverse_nodes(&mut self, graph: &NodeFactory, nodes: impl IntoIterator<Item = NodeId>) {
        for node in nodes {
            let copy = copy_node(graph, self.factory, node);
            for peer in self.direction.peers(graph, node) {
                if self.coverage.contains(&peer) {
                    continue;
                }
                let peer_copy = copy_node(graph, self.factory, peer);
                self.direction.link(self.factory, copy, peer_copy);
                if self.seen.insert(peer) {
                    self.selected.push(peer);
                    self.copied.push(peer_copy);
                }
            }
        }
    }

    /// Newly reached nodes of the source graph.
    pub fn selected_nodes(&self) -> &[NodeId] {
        &self.selected
    }

    /// Their copies in the target factory.
    pub fn copied_nodes(&self) -> &[NodeId] {
        &self.copied
    }

    pub fn reset(&mut self) {
        self.seen.clear();
        self.selected.clear();
        self.copied.clear();
    }

    pub fn into_parts(self) -> (Vec<NodeId>, Vec<NodeId>) {
        (self.selected, self.copied)
    }
}
