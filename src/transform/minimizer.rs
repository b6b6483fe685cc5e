//! Drop edges implied by more specific ones.

use super::GraphTransform;
use crate::graph::{NodeFactory, NodeId};
use std::collections::HashSet;
use tracing::debug;

/// Removes every edge `u -> v` for which some other edge `u' -> v'`
/// exists with `u'` equal to or contained in `u` and `v'` equal to or
/// contained in `v`.
///
/// Redundancy is decided against the edge set as it was before the call,
/// so the result does not depend on removal order.
///
/// # Example
///
/// ```rust
/// use depscope::graph::NodeFactory;
/// use depscope::transform::{GraphTransform, LinkMinimizer};
///
/// let mut graph = NodeFactory::new();
/// let a = graph.create_package("a", false);
/// let b = graph.create_package("b", false);
/// let b_b_b = graph.create_feature("b.B.b", false);
/// graph.add_dependency(a, b);
/// graph.add_dependency(a, b_b_b);
///
/// assert_eq!(LinkMinimizer.apply(&mut graph), 1);
/// assert_eq!(graph.outbound(a), vec![b_b_b]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkMinimizer;

impl LinkMinimizer {
    /// Whether another edge from `from` or its contents reaches `to` or its
    /// contents.
    fn is_redundant(
        graph: &NodeFactory,
        edges: &HashSet<(NodeId, NodeId)>,
        from: NodeId,
        to: NodeId,
    ) -> bool {
        let covered = |target: NodeId| target == to || graph.is_ancestor(to, target);

        std::iter::once(from).chain(graph.descendants(from)).any(|source| {
            graph.outbound(source).into_iter().any(|target| {
                (source, target) != (from, to) && edges.contains(&(source, target)) && covered(target)
            })
        })
    }
}

impl GraphTransform for LinkMinimizer {
    fn apply(&self, graph: &mut NodeFactory) -> usize {
        let edges: HashSet<(NodeId, NodeId)> = graph.dependencies().into_iter().collect();
        let redundant: Vec<(NodeId, NodeId)> = graph
            .dependencies()
            .into_iter()
            .filter(|&(from, to)| Self::is_redundant(graph, &edges, from, to))
            .collect();

        for &(from, to) in &redundant {
            graph.remove_dependency(from, to);
        }
        debug!(removed = redundant.len(), "minimized links");
        redundant.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{sample_graph, LinkMaximizer};

    fn outbound_names(graph: &NodeFactory, id: NodeId) -> Vec<&str> {
        let mut names: Vec<&str> = graph.outbound(id).into_iter().map(|n| graph.name(n)).collect();
        names.sort();
        names
    }

    #[test]
    fn test_feature_edge_supersedes_class_edges() {
        let mut graph = sample_graph();
        LinkMinimizer.apply(&mut graph);

        let test_main = graph.feature("test.main(String[])").unwrap();
        assert_eq!(
            outbound_names(&graph, test_main),
            vec![
                "java.lang.Object.Object()",
                "java.lang.String",
                "java.util.Collections.singleton(java.lang.Object)",
                "java.util.Set",
            ]
        );

        let test_class = graph.class("test").unwrap();
        assert!(graph.outbound(test_class).is_empty());

        let test_test = graph.feature("test.test()").unwrap();
        assert_eq!(outbound_names(&graph, test_test), vec!["java.lang.Object.Object()"]);
    }

    #[test]
    fn test_most_specific_edge_survives() {
        let mut graph = NodeFactory::new();
        let a = graph.create_package("a", false);
        let b = graph.create_package("b", false);
        let b_b = graph.create_class("b.B", false);
        let b_b_b = graph.create_feature("b.B.b", false);
        graph.add_dependency(a, b);
        graph.add_dependency(a, b_b);
        graph.add_dependency(a, b_b_b);

        assert_eq!(LinkMinimizer.apply(&mut graph), 2);
        assert_eq!(graph.outbound(a), vec![b_b_b]);
    }

    #[test]
    fn test_unrelated_edges_are_kept() {
        let mut graph = NodeFactory::new();
        let a = graph.create_class("a.A", false);
        let b = graph.create_class("b.B", false);
        let c = graph.create_class("c.C", false);
        graph.add_dependency(a, b);
        graph.add_dependency(a, c);

        assert_eq!(LinkMinimizer.apply(&mut graph), 0);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_minimize_undoes_maximize() {
        let original = sample_graph();
        let mut graph = original.clone();
        LinkMaximizer.apply(&mut graph);
        LinkMinimizer.apply(&mut graph);

        let mut minimized = original.clone();
        LinkMinimizer.apply(&mut minimized);

        assert_eq!(graph.dependencies(), minimized.dependencies());
    }
}
