//! Traversal strategies: scope, filter and ordering.

use super::{ComprehensiveSelectionCriteria, SelectionCriteria};
use crate::graph::{Node, NodeFactory, NodeId};

/// Decides which nodes a traversal works on and which edges it keeps.
pub trait TraversalStrategy {
    /// Nodes in scope get a full visit.
    fn is_in_scope(&self, node: &Node) -> bool;

    /// Edge peers in filter are passed on.
    fn is_in_filter(&self, node: &Node) -> bool;

    /// Order in which a collection of nodes is walked. Identity by default.
    fn order(&self, _graph: &NodeFactory, nodes: Vec<NodeId>) -> Vec<NodeId> {
        nodes
    }
}

impl<T: TraversalStrategy + ?Sized> TraversalStrategy for Box<T> {
    fn is_in_scope(&self, node: &Node) -> bool {
        (**self).is_in_scope(node)
    }

    fn is_in_filter(&self, node: &Node) -> bool {
        (**self).is_in_filter(node)
    }

    fn order(&self, graph: &NodeFactory, nodes: Vec<NodeId>) -> Vec<NodeId> {
        (**self).order(graph, nodes)
    }
}

impl<T: TraversalStrategy + ?Sized> TraversalStrategy for &T {
    fn is_in_scope(&self, node: &Node) -> bool {
        (**self).is_in_scope(node)
    }

    fn is_in_filter(&self, node: &Node) -> bool {
        (**self).is_in_filter(node)
    }

    fn order(&self, graph: &NodeFactory, nodes: Vec<NodeId>) -> Vec<NodeId> {
        (**self).order(graph, nodes)
    }
}

/// Everything in scope, everything in filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComprehensiveTraversalStrategy;

impl TraversalStrategy for ComprehensiveTraversalStrategy {
    fn is_in_scope(&self, _node: &Node) -> bool {
        true
    }

    fn is_in_filter(&self, _node: &Node) -> bool {
        true
    }
}

/// Scope and filter backed by two selection criteria.
pub struct SelectiveTraversalStrategy {
    scope: Box<dyn SelectionCriteria>,
    filter: Box<dyn SelectionCriteria>,
}

impl SelectiveTraversalStrategy {
    pub fn new(
        scope: impl SelectionCriteria + 'static,
        filter: impl SelectionCriteria + 'static,
    ) -> Self {
        Self {
            scope: Box::new(scope),
            filter: Box::new(filter),
        }
    }

    pub fn scope(&self) -> &dyn SelectionCriteria {
        self.scope.as_ref()
    }

    pub fn filter(&self) -> &dyn SelectionCriteria {
        self.filter.as_ref()
    }
}

impl Default for SelectiveTraversalStrategy {
    fn default() -> Self {
        Self::new(ComprehensiveSelectionCriteria, ComprehensiveSelectionCriteria)
    }
}

impl std::fmt::Debug for SelectiveTraversalStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectiveTraversalStrategy").finish_non_exhaustive()
    }
}

impl TraversalStrategy for SelectiveTraversalStrategy {
    fn is_in_scope(&self, node: &Node) -> bool {
        self.scope.matches(node)
    }

    fn is_in_filter(&self, node: &Node) -> bool {
        self.filter.matches(node)
    }
}

/// Wraps another strategy and walks collections in name order.
#[derive(Debug, Clone, Default)]
pub struct SortedTraversalStrategy<S> {
    inner: S,
}

impl<S: TraversalStrategy> SortedTraversalStrategy<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: TraversalStrategy> TraversalStrategy for SortedTraversalStrategy<S> {
    fn is_in_scope(&self, node: &Node) -> bool {
        self.inner.is_in_scope(node)
    }

    fn is_in_filter(&self, node: &Node) -> bool {
        self.inner.is_in_filter(node)
    }

    fn order(&self, graph: &NodeFactory, nodes: Vec<NodeId>) -> Vec<NodeId> {
        let mut nodes = self.inner.order(graph, nodes);
        graph.sort_by_name(&mut nodes);
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;
    use crate::selection::{NullSelectionCriteria, RegularExpressionSelectionCriteria};

    #[test]
    fn test_comprehensive_strategy() {
        let mut factory = NodeFactory::new();
        let feature = factory.create_feature("a.A.a", false);
        let strategy = ComprehensiveTraversalStrategy;
        assert!(strategy.is_in_scope(factory.node(feature)));
        assert!(strategy.is_in_filter(factory.node(feature)));
    }

    #[test]
    fn test_selective_strategy_uses_both_criteria() {
        let mut factory = NodeFactory::new();
        let feature = factory.create_feature("a.A.a", false);
        let class = factory.class("a.A").unwrap();

        let mut scope = RegularExpressionSelectionCriteria::new();
        scope.set_matching(NodeKind::Feature, false);
        let strategy = SelectiveTraversalStrategy::new(scope, NullSelectionCriteria);

        assert!(strategy.is_in_scope(factory.node(class)));
        assert!(!strategy.is_in_scope(factory.node(feature)));
        assert!(!strategy.is_in_filter(factory.node(class)));
        assert!(strategy.scope().is_matching_classes());
        assert!(!strategy.filter().is_matching_classes());
    }

    #[test]
    fn test_sorted_strategy_orders_by_name() {
        let mut factory = NodeFactory::new();
        let c = factory.create_package("c", false);
        let a = factory.create_package("a", false);
        let b = factory.create_package("b", false);

        let strategy = SortedTraversalStrategy::new(ComprehensiveTraversalStrategy);
        assert_eq!(strategy.order(&factory, vec![c, a, b]), vec![a, b, c]);
        assert_eq!(
            ComprehensiveTraversalStrategy.order(&factory, vec![c, a, b]),
            vec![c, a, b]
        );
    }
}
