//! Lift dependencies to a coarser granularity.

use super::{copy_node, nearest};
use crate::graph::{NodeFactory, NodeId};
use crate::selection::SelectionCriteria;
use crate::visitor::{BasicTraversal, Visitor};

/// Rewrites dependencies at the granularity the scope and filter criteria
/// select.
///
/// Every node the scope matches is copied with its containers. An edge
/// `N -> P` is kept when `N`'s name passes the scope patterns and `P`'s name
/// passes the filter patterns, regardless of which kinds are enabled. It is
/// then lifted to `S -> T`, where `S` is the nearest container-or-self of
/// `N` the scope matches and `T` the nearest container-or-self of `P` the
/// filter matches. Edges between related nodes (one containing the other)
/// are dropped.
///
/// # Example
///
/// ```rust
/// use depscope::graph::{NodeFactory, NodeKind};
/// use depscope::selection::RegularExpressionSelectionCriteria;
/// use depscope::transform::GraphSummarizer;
///
/// let mut source = NodeFactory::new();
/// let a = source.create_feature("a.A.a", false);
/// let b = source.create_feature("b.B.b", false);
/// source.add_dependency(a, b);
///
/// let mut packages = RegularExpressionSelectionCriteria::new();
/// packages.set_matching(NodeKind::Class, false);
/// packages.set_matching(NodeKind::Feature, false);
///
/// let mut summarizer = GraphSummarizer::new(packages.clone(), packages);
/// summarizer.traverse_nodes(&source, source.package_ids());
/// let summary = summarizer.into_factory();
///
/// let a = summary.package("a").unwrap();
/// let b = summary.package("b").unwrap();
/// assert!(summary.has_dependency(a, b));
/// assert!(summary.classes().is_empty());
/// ```
pub struct GraphSummarizer {
    scope: Box<dyn SelectionCriteria>,
    filter: Box<dyn SelectionCriteria>,
    target: NodeFactory,
}

impl GraphSummarizer {
    pub fn new(
        scope: impl SelectionCriteria + 'static,
        filter: impl SelectionCriteria + 'static,
    ) -> Self {
        Self {
            scope: Box::new(scope),
            filter: Box::new(filter),
            target: NodeFactory::new(),
        }
    }

    /// Walks `roots` of `source` and summarizes what it finds.
    pub fn traverse_nodes(&mut self, source: &NodeFactory, roots: impl IntoIterator<Item = NodeId>) {
        BasicTraversal::new(&mut *self).traverse_nodes(source, roots);
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.target
    }

    pub fn into_factory(self) -> NodeFactory {
        self.target
    }

    fn copy(&mut self, source: &NodeFactory, node: NodeId) {
        if self.scope.matches(source.node(node)) {
            copy_node(source, &mut self.target, node);
        }
    }

    /// Lifts the source edge `from -> to`.
    fn summarize(&mut self, source: &NodeFactory, from: NodeId, to: NodeId) {
        if !self.scope.matches_name(source.kind(from), source.name(from))
            || !self.filter.matches_name(source.kind(to), source.name(to))
        {
            return;
        }

        let Some(from) = nearest(source, from, |n| self.scope.matches(source.node(n))) else {
            return;
        };
        let Some(to) = nearest(source, to, |n| self.filter.matches(source.node(n))) else {
            return;
        };
        if source.is_related(from, to) {
            return;
        }

        let from = copy_node(source, &mut self.target, from);
        let to = copy_node(source, &mut self.target, to);
        self.target.add_dependency(from, to);
    }
}

impl std::fmt::Debug for GraphSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphSummarizer")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Visitor for GraphSummarizer {
    fn visit_package(&mut self, graph: &NodeFactory, package: NodeId) {
        self.copy(graph, package);
    }

    fn visit_inbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.summarize(graph, peer, current);
    }

    fn visit_outbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.summarize(graph, current, peer);
    }

    fn visit_class(&mut self, graph: &NodeFactory, class: NodeId) {
        self.copy(graph, class);
    }

    fn visit_inbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.summarize(graph, peer, current);
    }

    fn visit_outbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.summarize(graph, current, peer);
    }

    fn visit_feature(&mut self, graph: &NodeFactory, feature: NodeId) {
        self.copy(graph, feature);
    }

    fn visit_inbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.summarize(graph, peer, current);
    }

    fn visit_outbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        self.summarize(graph, current, peer);
    }
}
