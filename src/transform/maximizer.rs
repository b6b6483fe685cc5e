//! Explicit edges for every implied container-level dependency.

use super::GraphTransform;
use crate::graph::NodeFactory;
use tracing::debug;

/// Adds an edge from every container-or-self of a source to every
/// container-or-self of a target, for each existing edge.
///
/// Only edges present before the call are expanded, so a single pass is
/// enough and edges added along the way are not expanded again. Pairs
/// rejected by [`NodeFactory::can_add_dependency`] are skipped.
///
/// # Example
///
/// ```rust
/// use depscope::graph::NodeFactory;
/// use depscope::transform::{GraphTransform, LinkMaximizer};
///
/// let mut graph = NodeFactory::new();
/// let a = graph.create_feature("a.A.a", false);
/// let b = graph.create_feature("b.B.b", false);
/// graph.add_dependency(a, b);
///
/// let added = LinkMaximizer.apply(&mut graph);
///
/// assert_eq!(added, 8);
/// assert_eq!(graph.edge_count(), 9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkMaximizer;

impl GraphTransform for LinkMaximizer {
    fn apply(&self, graph: &mut NodeFactory) -> usize {
        let mut added = 0;
        for (from, to) in graph.dependencies() {
            for source in graph.self_and_ancestors(from) {
                for target in graph.self_and_ancestors(to) {
                    if graph.add_dependency(source, target) {
                        added += 1;
                    }
                }
            }
        }
        debug!(added, "maximized links");
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;
    use crate::transform::sample_graph;

    fn outbound_names(graph: &NodeFactory, id: NodeId) -> Vec<&str> {
        let mut names: Vec<&str> = graph.outbound(id).into_iter().map(|n| graph.name(n)).collect();
        names.sort();
        names
    }

    fn inbound_names(graph: &NodeFactory, id: NodeId) -> Vec<&str> {
        let mut names: Vec<&str> = graph.inbound(id).into_iter().map(|n| graph.name(n)).collect();
        names.sort();
        names
    }

    #[test]
    fn test_default_package_depends_on_everything_reached() {
        let mut graph = sample_graph();
        LinkMaximizer.apply(&mut graph);

        let default_package = graph.package("").unwrap();
        assert_eq!(
            outbound_names(&graph, default_package),
            vec![
                "java.lang",
                "java.lang.Object",
                "java.lang.Object.Object()",
                "java.lang.String",
                "java.util",
                "java.util.Collections",
                "java.util.Collections.singleton(java.lang.Object)",
                "java.util.Set",
            ]
        );
        assert!(graph.inbound(default_package).is_empty());
    }

    #[test]
    fn test_class_gets_edges_of_its_features() {
        let mut graph = sample_graph();
        LinkMaximizer.apply(&mut graph);

        let test_class = graph.class("test").unwrap();
        assert_eq!(outbound_names(&graph, test_class).len(), 8);

        let test_test = graph.feature("test.test()").unwrap();
        assert_eq!(
            outbound_names(&graph, test_test),
            vec!["java.lang", "java.lang.Object", "java.lang.Object.Object()"]
        );
    }

    #[test]
    fn test_targets_receive_container_inbounds() {
        let mut graph = sample_graph();
        LinkMaximizer.apply(&mut graph);

        let object_ctor = graph.feature("java.lang.Object.Object()").unwrap();
        assert_eq!(
            inbound_names(&graph, object_ctor),
            vec!["", "test", "test.main(String[])", "test.test()"]
        );

        let java_util = graph.package("java.util").unwrap();
        assert_eq!(
            inbound_names(&graph, java_util),
            vec!["", "test", "test.main(String[])"]
        );
        assert!(graph.outbound(java_util).is_empty());
    }

    #[test]
    fn test_edge_into_own_container_is_skipped() {
        let mut graph = NodeFactory::new();
        let a_a_a = graph.create_feature("a.A.a", false);
        let a_b = graph.create_class("a.B", false);
        graph.add_dependency(a_a_a, a_b);

        LinkMaximizer.apply(&mut graph);

        let a = graph.package("a").unwrap();
        let a_a = graph.class("a.A").unwrap();
        assert!(!graph.has_dependency(a, a));
        assert!(!graph.has_dependency(a_a_a, a));
        assert!(graph.has_dependency(a_a, a_b));
        assert!(graph.has_dependency(a, a_b));
    }

    #[test]
    fn test_maximize_is_idempotent() {
        let mut graph = sample_graph();
        LinkMaximizer.apply(&mut graph);
        let edges = graph.edge_count();

        assert_eq!(LinkMaximizer.apply(&mut graph), 0);
        assert_eq!(graph.edge_count(), edges);
    }
}
