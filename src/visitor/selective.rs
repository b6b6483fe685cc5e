//! Scope and filter gating in front of another visitor.

use super::Visitor;
use crate::graph::{NodeFactory, NodeId};
use crate::selection::TraversalStrategy;

/// Forwards only what a [`TraversalStrategy`] lets through.
///
/// Full visits require the node to be in scope. Edge visits require the
/// current node to be in scope and the peer to be in filter. Ordering comes
/// from the strategy.
#[derive(Debug)]
pub struct SelectiveVisitor<S, V> {
    strategy: S,
    delegate: V,
}

impl<S: TraversalStrategy, V: Visitor> SelectiveVisitor<S, V> {
    pub fn new(strategy: S, delegate: V) -> Self {
        Self { strategy, delegate }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn delegate(&self) -> &V {
        &self.delegate
    }

    pub fn into_inner(self) -> V {
        self.delegate
    }

    fn in_scope(&self, graph: &NodeFactory, node: NodeId) -> bool {
        self.strategy.is_in_scope(graph.node(node))
    }

    fn edge_passes(&self, graph: &NodeFactory, current: NodeId, peer: NodeId) -> bool {
        self.in_scope(graph, current) && self.strategy.is_in_filter(graph.node(peer))
    }
}

impl<S: TraversalStrategy, V: Visitor> Visitor for SelectiveVisitor<S, V> {
    fn visit_package(&mut self, graph: &NodeFactory, package: NodeId) {
        if self.in_scope(graph, package) {
            self.delegate.visit_package(graph, package);
        }
    }

    fn visit_inbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.edge_passes(graph, current, peer) {
            self.delegate.visit_inbound_package(graph, current, peer);
        }
    }

    fn visit_outbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.edge_passes(graph, current, peer) {
            self.delegate.visit_outbound_package(graph, current, peer);
        }
    }

    fn visit_class(&mut self, graph: &NodeFactory, class: NodeId) {
        if self.in_scope(graph, class) {
            self.delegate.visit_class(graph, class);
        }
    }

    fn visit_inbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.edge_passes(graph, current, peer) {
            self.delegate.visit_inbound_class(graph, current, peer);
        }
    }

    fn visit_outbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.edge_passes(graph, current, peer) {
            self.delegate.visit_outbound_class(graph, current, peer);
        }
    }

    fn visit_feature(&mut self, graph: &NodeFactory, feature: NodeId) {
        if self.in_scope(graph, feature) {
            self.delegate.visit_feature(graph, feature);
        }
    }

    fn visit_inbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.edge_passes(graph, current, peer) {
            self.delegate.visit_inbound_feature(graph, current, peer);
        }
    }

    fn visit_outbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.edge_passes(graph, current, peer) {
            self.delegate.visit_outbound_feature(graph, current, peer);
        }
    }

    fn order(&self, graph: &NodeFactory, nodes: Vec<NodeId>) -> Vec<NodeId> {
        self.delegate.order(graph, self.strategy.order(graph, nodes))
    }
}
