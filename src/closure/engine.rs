//! Layer-by-layer transitive closure.

use super::{ClosureDirection, ClosureLayerSelector, ClosureStartSelector};
use crate::graph::{NodeFactory, NodeId};
use crate::selection::SelectionCriteria;
use std::collections::HashSet;
use tracing::debug;

/// Grows the closure of a start set one breadth-first layer at a time.
///
/// Layer 0 holds the roots (and their contents) that match the start
/// criteria. Each further layer holds the nodes first reached by following
/// edges of the previous layer in the configured direction. Nodes matching
/// the stop criteria still appear in their layer but are not expanded.
/// Everything reached is copied, with the edges that reached it, into the
/// engine's own [`NodeFactory`].
///
/// # Example
///
/// ```rust
/// use depscope::closure::{ClosureDirection, TransitiveClosureEngine};
/// use depscope::graph::NodeFactory;
/// use depscope::selection::{NullSelectionCriteria, RegularExpressionSelectionCriteria};
///
/// let mut graph = NodeFactory::new();
/// let a = graph.create_feature("a.A.a", false);
/// let b = graph.create_feature("b.B.b", false);
/// graph.add_dependency(a, b);
///
/// let start = RegularExpressionSelectionCriteria::with_global_includes("/a.A.a/").unwrap();
/// let mut engine = TransitiveClosureEngine::new(
///     &graph,
///     graph.package_ids(),
///     &start,
///     &NullSelectionCriteria,
///     ClosureDirection::Outbound,
/// );
/// engine.compute_all_layers();
///
/// assert_eq!(engine.nb_layers(), 2);
/// assert_eq!(engine.factory().name(engine.layer(1).unwrap()[0]), "b.B.b");
/// ```
pub struct TransitiveClosureEngine<'a> {
    graph: &'a NodeFactory,
    stop: &'a dyn SelectionCriteria,
    direction: ClosureDirection,
    factory: NodeFactory,
    coverage: HashSet<NodeId>,
    frontier: Vec<NodeId>,
    layers: Vec<Vec<NodeId>>,
}

impl<'a> TransitiveClosureEngine<'a> {
    /// Selects layer 0 among `roots` and their contents.
    ///
    /// # Arguments
    ///
    /// * `graph` - Source graph; never modified
    /// * `roots` - Nodes to pick the start set from
    /// * `start` - Picks the nodes of layer 0
    /// * `stop` - Nodes matching it are not expanded
    /// * `direction` - Which edges to follow
    pub fn new(
        graph: &'a NodeFactory,
        roots: impl IntoIterator<Item = NodeId>,
        start: &dyn SelectionCriteria,
        stop: &'a dyn SelectionCriteria,
        direction: ClosureDirection,
    ) -> Self {
        let mut factory = NodeFactory::new();
        let mut selector = ClosureStartSelector::new(start, &mut factory);
        selector.traverse_nodes(graph, roots);
        let (selected, copied) = selector.into_parts();

        let mut engine = Self {
            graph,
            stop,
            direction,
            factory,
            coverage: selected.iter().copied().collect(),
            frontier: selected,
            layers: Vec::new(),
        };
        engine.push_layer(copied);
        engine
    }

    /// Adds one layer if anything is left to reach.
    ///
    /// # Returns
    ///
    /// `false`, leaving the engine unchanged, at the fixpoint.
    pub fn compute_next_layer(&mut self) -> bool {
        let expandable: Vec<NodeId> = self
            .frontier
            .iter()
            .copied()
            .filter(|&node| !self.stop.matches(self.graph.node(node)))
            .collect();
        if expandable.is_empty() {
            return false;
        }

        let mut selector = ClosureLayerSelector::new(self.direction, &mut self.factory, &self.coverage);
        selector.traverse_nodes(self.graph, expandable);
        let (selected, copied) = selector.into_parts();
        if selected.is_empty() {
            return false;
        }

        self.coverage.extend(selected.iter().copied());
        self.frontier = selected;
        self.push_layer(copied);
        true
    }

    /// Adds layers until the fixpoint.
    pub fn compute_all_layers(&mut self) {
        while self.compute_next_layer() {}
        debug!(layers = self.nb_layers(), direction = %self.direction, "closure complete");
    }

    /// Adds at most `count` layers.
    pub fn compute_layers(&mut self, count: usize) {
        for _ in 0..count {
            if !self.compute_next_layer() {
                break;
            }
        }
    }

    pub fn nb_layers(&self) -> usize {
        self.layers.len()
    }

    /// Nodes of layer `index`, as ids in [`factory`](Self::factory), in name order.
    pub fn layer(&self, index: usize) -> Option<&[NodeId]> {
        self.layers.get(index).map(Vec::as_slice)
    }

    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    pub fn direction(&self) -> ClosureDirection {
        self.direction
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    pub fn into_factory(self) -> NodeFactory {
        self.factory
    }

    fn push_layer(&mut self, mut copied: Vec<NodeId>) {
        self.factory.sort_by_name(&mut copied);
        debug!(layer = self.layers.len(), nodes = copied.len(), "closure layer");
        self.layers.push(copied);
    }
}

impl std::fmt::Debug for TransitiveClosureEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitiveClosureEngine")
            .field("direction", &self.direction)
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{NullSelectionCriteria, RegularExpressionSelectionCriteria};

    fn chain() -> NodeFactory {
        let mut factory = NodeFactory::new();
        let a = factory.create_feature("a.A.a", false);
        let b = factory.create_feature("b.B.b", false);
        let c = factory.create_feature("c.C.c", false);
        factory.add_dependency(a, b);
        factory.add_dependency(b, c);
        factory
    }

    fn criteria(patterns: &str) -> RegularExpressionSelectionCriteria {
        RegularExpressionSelectionCriteria::with_global_includes(patterns).unwrap()
    }

    fn layer_names(engine: &TransitiveClosureEngine<'_>, index: usize) -> Vec<String> {
        engine
            .layer(index)
            .unwrap()
            .iter()
            .map(|&id| engine.factory().name(id).to_string())
            .collect()
    }

    #[test]
    fn test_outbound_starting_point() {
        let graph = chain();
        let start = criteria("/a.A.a/");
        let engine = TransitiveClosureEngine::new(
            &graph,
            graph.package_ids(),
            &start,
            &NullSelectionCriteria,
            ClosureDirection::Outbound,
        );

        assert_eq!(engine.nb_layers(), 1);
        assert_eq!(layer_names(&engine, 0), vec!["a.A.a"]);
        let a = engine.layer(0).unwrap()[0];
        assert!(engine.factory().outbound(a).is_empty());
        assert_eq!(engine.factory().node_count(), 3);
    }

    #[test]
    fn test_outbound_layers_reach_fixpoint() {
        let graph = chain();
        let start = criteria("/a.A.a/");
        let mut engine = TransitiveClosureEngine::new(
            &graph,
            graph.package_ids(),
            &start,
            &NullSelectionCriteria,
            ClosureDirection::Outbound,
        );

        assert!(engine.compute_next_layer());
        assert_eq!(engine.nb_layers(), 2);
        assert_eq!(layer_names(&engine, 1), vec!["b.B.b"]);

        assert!(engine.compute_next_layer());
        assert_eq!(layer_names(&engine, 2), vec!["c.C.c"]);

        assert!(!engine.compute_next_layer());
        assert!(!engine.compute_next_layer());
        assert_eq!(engine.nb_layers(), 3);

        let factory = engine.factory();
        assert_eq!(factory.packages().len(), 3);
        assert_eq!(factory.classes().len(), 3);
        assert_eq!(factory.features().len(), 3);
        for index in 0..2 {
            let node = engine.layer(index).unwrap()[0];
            assert_eq!(factory.outbound(node).len(), 1);
        }
        assert!(factory.outbound(engine.layer(2).unwrap()[0]).is_empty());
    }

    #[test]
    fn test_inbound_layers() {
        let graph = chain();
        let start = criteria("/c.C.c/");
        let mut engine = TransitiveClosureEngine::new(
            &graph,
            graph.package_ids(),
            &start,
            &NullSelectionCriteria,
            ClosureDirection::Inbound,
        );
        engine.compute_layers(4);

        assert_eq!(engine.nb_layers(), 3);
        assert_eq!(layer_names(&engine, 1), vec!["b.B.b"]);
        assert_eq!(layer_names(&engine, 2), vec!["a.A.a"]);

        let factory = engine.factory();
        let c = engine.layer(0).unwrap()[0];
        assert_eq!(factory.inbound(c).len(), 1);
        assert!(factory.inbound(engine.layer(2).unwrap()[0]).is_empty());
    }

    #[test]
    fn test_stop_criteria() {
        let graph = chain();
        let start = criteria("/c.C.c/");
        let stop = criteria("/b.B.b/");
        let mut engine =
            TransitiveClosureEngine::new(&graph, graph.package_ids(), &start, &stop, ClosureDirection::Inbound);
        engine.compute_all_layers();

        assert_eq!(engine.nb_layers(), 2);
        let b = engine.layer(1).unwrap()[0];
        assert_eq!(engine.factory().name(b), "b.B.b");
        assert!(engine.factory().inbound(b).is_empty());
    }

    #[test]
    fn test_stop_at_start() {
        let graph = chain();
        let start = criteria("/c.C.c/");
        let stop = RegularExpressionSelectionCriteria::new();
        let mut engine =
            TransitiveClosureEngine::new(&graph, graph.package_ids(), &start, &stop, ClosureDirection::Inbound);
        engine.compute_all_layers();

        assert_eq!(engine.nb_layers(), 1);
        let c = engine.layer(0).unwrap()[0];
        assert!(engine.factory().inbound(c).is_empty());
    }

    #[test]
    fn test_compute_one_layer_only() {
        let graph = chain();
        let start = criteria("/c.C.c/");
        let mut engine = TransitiveClosureEngine::new(
            &graph,
            graph.package_ids(),
            &start,
            &NullSelectionCriteria,
            ClosureDirection::Inbound,
        );
        engine.compute_layers(1);

        assert_eq!(engine.nb_layers(), 2);
        let b = engine.layer(1).unwrap()[0];
        assert!(engine.factory().inbound(b).is_empty());
    }

    #[test]
    fn test_outbound_from_whole_package() {
        let graph = chain();
        let start = criteria("/^a/");
        let stop = criteria("/^c/");
        let mut engine =
            TransitiveClosureEngine::new(&graph, graph.package_ids(), &start, &stop, ClosureDirection::Outbound);
        engine.compute_all_layers();

        assert_eq!(engine.nb_layers(), 3);
        assert_eq!(layer_names(&engine, 0), vec!["a", "a.A", "a.A.a"]);
        assert_eq!(layer_names(&engine, 1), vec!["b.B.b"]);
        assert_eq!(layer_names(&engine, 2), vec!["c.C.c"]);
    }

    #[test]
    fn test_inbound_to_whole_package() {
        let graph = chain();
        let start = criteria("/^c/");
        let stop = criteria("/^a/");
        let mut engine =
            TransitiveClosureEngine::new(&graph, graph.package_ids(), &start, &stop, ClosureDirection::Inbound);
        engine.compute_all_layers();

        assert_eq!(engine.nb_layers(), 3);
        assert_eq!(layer_names(&engine, 0), vec!["c", "c.C", "c.C.c"]);
        assert_eq!(layer_names(&engine, 1), vec!["b.B.b"]);
        assert_eq!(layer_names(&engine, 2), vec!["a.A.a"]);
    }

    #[test]
    fn test_nothing_matches_start() {
        let graph = chain();
        let mut engine = TransitiveClosureEngine::new(
            &graph,
            graph.package_ids(),
            &NullSelectionCriteria,
            &NullSelectionCriteria,
            ClosureDirection::Outbound,
        );
        engine.compute_all_layers();

        assert_eq!(engine.nb_layers(), 1);
        assert!(engine.layer(0).unwrap().is_empty());
        assert!(engine.into_factory().is_empty());
    }
}
