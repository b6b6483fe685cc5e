//! Visitor framework.
//!
//! A [`Visitor`] receives nine callbacks: a full visit per node kind, and an
//! inbound and outbound visit per kind for peers found while walking a
//! node's edge sets. [`BasicTraversal`] drives the walk; [`SelectiveVisitor`]
//! and [`VisitorDecorator`] wrap another visitor and forward to it.
//!
//! # Example
//!
//! ```rust
//! use depscope::graph::NodeFactory;
//! use depscope::visitor::{BasicTraversal, GraphStats};
//!
//! let mut factory = NodeFactory::new();
//! let a = factory.create_feature("a.A.a", false);
//! let b = factory.create_feature("b.B.b", false);
//! factory.add_dependency(a, b);
//!
//! let mut traversal = BasicTraversal::new(GraphStats::default());
//! traversal.traverse_nodes(&factory, factory.package_ids());
//!
//! let stats = traversal.into_inner();
//! assert_eq!(stats.features, 2);
//! assert_eq!(stats.outbound_features, 1);
//! ```

mod decorator;
mod selective;
mod stats;
mod traversal;

pub use decorator::VisitorDecorator;
pub use selective::SelectiveVisitor;
pub use stats::GraphStats;
pub use traversal::BasicTraversal;

use crate::graph::{NodeFactory, NodeId, NodeKind};

/// Callbacks for a walk over packages, classes and features.
///
/// Every method defaults to doing nothing. In the edge callbacks, `current`
/// is the node whose edge set is being walked and `peer` is the node at the
/// other end of the edge.
#[allow(unused_variables)]
pub trait Visitor {
    fn visit_package(&mut self, graph: &NodeFactory, package: NodeId) {}
    fn visit_inbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {}
    fn visit_outbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {}

    fn visit_class(&mut self, graph: &NodeFactory, class: NodeId) {}
    fn visit_inbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {}
    fn visit_outbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {}

    fn visit_feature(&mut self, graph: &NodeFactory, feature: NodeId) {}
    fn visit_inbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {}
    fn visit_outbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {}

    /// Order in which a collection is walked. Identity by default.
    fn order(&self, graph: &NodeFactory, nodes: Vec<NodeId>) -> Vec<NodeId> {
        nodes
    }
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn visit_package(&mut self, graph: &NodeFactory, package: NodeId) {
        (**self).visit_package(graph, package)
    }

    fn visit_inbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        (**self).visit_inbound_package(graph, current, peer)
    }

    fn visit_outbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        (**self).visit_outbound_package(graph, current, peer)
    }

    fn visit_class(&mut self, graph: &NodeFactory, class: NodeId) {
        (**self).visit_class(graph, class)
    }

    fn visit_inbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        (**self).visit_inbound_class(graph, current, peer)
    }

    fn visit_outbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        (**self).visit_outbound_class(graph, current, peer)
    }

    fn visit_feature(&mut self, graph: &NodeFactory, feature: NodeId) {
        (**self).visit_feature(graph, feature)
    }

    fn visit_inbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        (**self).visit_inbound_feature(graph, current, peer)
    }

    fn visit_outbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        (**self).visit_outbound_feature(graph, current, peer)
    }

    fn order(&self, graph: &NodeFactory, nodes: Vec<NodeId>) -> Vec<NodeId> {
        (**self).order(graph, nodes)
    }
}

/// Dispatches a full visit on the node's kind.
pub fn accept<V: Visitor + ?Sized>(visitor: &mut V, graph: &NodeFactory, node: NodeId) {
    match graph.kind(node) {
        NodeKind::Package => visitor.visit_package(graph, node),
        NodeKind::Class => visitor.visit_class(graph, node),
        NodeKind::Feature => visitor.visit_feature(graph, node),
    }
}

/// Dispatches an inbound visit on the peer's kind.
pub fn accept_inbound<V: Visitor + ?Sized>(
    visitor: &mut V,
    graph: &NodeFactory,
    current: NodeId,
    peer: NodeId,
) {
    match graph.kind(peer) {
        NodeKind::Package => visitor.visit_inbound_package(graph, current, peer),
        NodeKind::Class => visitor.visit_inbound_class(graph, current, peer),
        NodeKind::Feature => visitor.visit_inbound_feature(graph, current, peer),
    }
}

/// Dispatches an outbound visit on the peer's kind.
pub fn accept_outbound<V: Visitor + ?Sized>(
    visitor: &mut V,
    graph: &NodeFactory,
    current: NodeId,
    peer: NodeId,
) {
    match graph.kind(peer) {
        NodeKind::Package => visitor.visit_outbound_package(graph, current, peer),
        NodeKind::Class => visitor.visit_outbound_class(graph, current, peer),
        NodeKind::Feature => visitor.visit_outbound_feature(graph, current, peer),
    }
}
