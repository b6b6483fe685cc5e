//! Node and edge counts gathered by a traversal.

use super::Visitor;
use crate::graph::{NodeFactory, NodeId};
use serde::Serialize;

/// Counts what a traversal saw.
///
/// Edge counters are keyed on the peer's kind and only count the outbound
/// direction, so each edge walked from its source is counted once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub packages: usize,
    pub classes: usize,
    pub features: usize,
    pub confirmed_packages: usize,
    pub confirmed_classes: usize,
    pub confirmed_features: usize,
    pub outbound_packages: usize,
    pub outbound_classes: usize,
    pub outbound_features: usize,
}

impl GraphStats {
    pub fn nodes(&self) -> usize {
        self.packages + self.classes + self.features
    }

    pub fn dependencies(&self) -> usize {
        self.outbound_packages + self.outbound_classes + self.outbound_features
    }
}

impl Visitor for GraphStats {
    fn visit_package(&mut self, graph: &NodeFactory, package: NodeId) {
        self.packages += 1;
        if graph.is_confirmed(package) {
            self.confirmed_packages += 1;
        }
    }

    fn visit_outbound_package(&mut self, _graph: &NodeFactory, _current: NodeId, _peer: NodeId) {
        self.outbound_packages += 1;
    }

    fn visit_class(&mut self, graph: &NodeFactory, class: NodeId) {
        self.classes += 1;
        if graph.is_confirmed(class) {
            self.confirmed_classes += 1;
        }
    }

    fn visit_outbound_class(&mut self, _graph: &NodeFactory, _current: NodeId, _peer: NodeId) {
        self.outbound_classes += 1;
    }

    fn visit_feature(&mut self, graph: &NodeFactory, feature: NodeId) {
        self.features += 1;
        if graph.is_confirmed(feature) {
            self.confirmed_features += 1;
        }
    }

    fn visit_outbound_feature(&mut self, _graph: &NodeFactory, _current: NodeId, _peer: NodeId) {
        self.outbound_features += 1;
    }
}
