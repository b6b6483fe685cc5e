//! Identity pass-through wrapper.

use super::Visitor;
use crate::graph::{NodeFactory, NodeId};
use tracing::trace;

/// Forwards every callback unchanged to its delegate.
///
/// Sits anywhere in a chain without changing what the delegate sees. Each
/// forwarded callback is emitted as a `trace` event, which makes it handy for
/// watching a traversal.
#[derive(Debug, Default)]
pub struct VisitorDecorator<V> {
    delegate: V,
}

impl<V: Visitor> VisitorDecorator<V> {
    pub fn new(delegate: V) -> Self {
        Self { delegate }
    }

    pub fn delegate(&self) -> &V {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut V {
        &mut self.delegate
    }

    pub fn into_inner(self) -> V {
        self.delegate
    }
}

impl<V: Visitor> Visitor for VisitorDecorator<V> {
    fn visit_package(&mut self, graph: &NodeFactory, package: NodeId) {
        trace!(package = graph.name(package), "visit");
        self.delegate.visit_package(graph, package);
    }

    fn visit_inbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        trace!(current = graph.name(current), package = graph.name(peer), "inbound");
        self.delegate.visit_inbound_package(graph, current, peer);
    }

    fn visit_outbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        trace!(current = graph.name(current), package = graph.name(peer), "outbound");
        self.delegate.visit_outbound_package(graph, current, peer);
    }

    fn visit_class(&mut self, graph: &NodeFactory, class: NodeId) {
        trace!(class = graph.name(class), "visit");
        self.delegate.visit_class(graph, class);
    }

    fn visit_inbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        trace!(current = graph.name(current), class = graph.name(peer), "inbound");
        self.delegate.visit_inbound_class(graph, current, peer);
    }

    fn visit_outbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        trace!(current = graph.name(current), class = graph.name(peer), "outbound");
        self.delegate.visit_outbound_class(graph, current, peer);
    }

    fn visit_feature(&mut self, graph: &NodeFactory, feature: NodeId) {
        trace!(feature = graph.name(feature), "visit");
        self.delegate.visit_feature(graph, feature);
    }

    fn visit_inbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        trace!(current = graph.name(current), feature = graph.name(peer), "inbound");
        self.delegate.visit_inbound_feature(graph, current, peer);
    }

    fn visit_outbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        trace!(current = graph.name(current), feature = graph.name(peer), "outbound");
        self.delegate.visit_outbound_feature(graph, current, peer);
    }

    fn order(&self, graph: &NodeFactory, nodes: Vec<NodeId>) -> Vec<NodeId> {
        self.delegate.order(graph, nodes)
    }
}
