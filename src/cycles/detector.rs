//! Depth-first search for dependency cycles.

use super::Cycle;
use crate::graph::{NodeFactory, NodeId};
use crate::visitor::{BasicTraversal, Visitor};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Finds cycles in the dependency edges reachable from a set of roots.
///
/// Every node reached through containment from the roots starts its own
/// search along outbound edges, in name order. When an edge leads back to a
/// node already on the current path, the path from that node onward is
/// recorded. Cycles equal to one already found are ignored, so each cycle
/// keeps the path order of its first discovery.
///
/// # Example
///
/// ```rust
/// use depscope::cycles::CycleDetector;
/// use depscope::graph::NodeFactory;
///
/// let mut factory = NodeFactory::new();
/// let a = factory.create_package("a", false);
/// let b = factory.create_package("b", false);
/// factory.add_dependency(a, b);
/// factory.add_dependency(b, a);
///
/// let mut detector = CycleDetector::new();
/// detector.traverse_nodes(&factory, factory.package_ids());
///
/// let cycle = detector.cycles().iter().next().unwrap();
/// assert_eq!(cycle.names(), ["a", "b"]);
/// ```
#[derive(Debug, Default)]
pub struct CycleDetector {
    maximum_cycle_length: Option<usize>,
    cycles: BTreeSet<Cycle>,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths are never extended beyond `length` nodes, so longer cycles are
    /// not reported.
    pub fn with_maximum_cycle_length(length: usize) -> Self {
        Self {
            maximum_cycle_length: Some(length),
            cycles: BTreeSet::new(),
        }
    }

    pub fn maximum_cycle_length(&self) -> Option<usize> {
        self.maximum_cycle_length
    }

    /// Searches from `roots` and everything they contain.
    pub fn traverse_nodes(&mut self, graph: &NodeFactory, roots: impl IntoIterator<Item = NodeId>) {
        BasicTraversal::new(&mut *self).traverse_nodes(graph, roots);
        debug!(cycles = self.cycles.len(), "cycle detection done");
    }

    /// Cycles found so far, shortest first.
    pub fn cycles(&self) -> &BTreeSet<Cycle> {
        &self.cycles
    }

    pub fn into_cycles(self) -> BTreeSet<Cycle> {
        self.cycles
    }

    fn successors(graph: &NodeFactory, node: NodeId) -> std::vec::IntoIter<NodeId> {
        let mut outbound = graph.outbound(node);
        graph.sort_by_name(&mut outbound);
        outbound.into_iter()
    }

    fn can_extend(&self, path_len: usize) -> bool {
        self.maximum_cycle_length.map_or(true, |max| path_len < max)
    }

    fn search(&mut self, graph: &NodeFactory, start: NodeId) {
        if !self.can_extend(0) {
            return;
        }

        let mut path = vec![start];
        let mut on_path = HashSet::from([start]);
        let mut frames = vec![Self::successors(graph, start)];

        while let Some(successors) = frames.last_mut() {
            match successors.next() {
                Some(next) if on_path.contains(&next) => {
                    if let Some(position) = path.iter().position(|&n| n == next) {
                        self.record(graph, path[position..].to_vec());
                    }
                }
                Some(next) => {
                    if self.can_extend(path.len()) {
                        path.push(next);
                        on_path.insert(next);
                        frames.push(Self::successors(graph, next));
                    }
                }
                None => {
                    frames.pop();
                    if let Some(done) = path.pop() {
                        on_path.remove(&done);
                    }
                }
            }
        }
    }

    fn record(&mut self, graph: &NodeFactory, path: Vec<NodeId>) {
        if let Ok(cycle) = Cycle::new(graph, path) {
            if !self.cycles.contains(&cycle) {
                debug!(cycle = %cycle, "found cycle");
                self.cycles.insert(cycle);
            }
        }
    }
}

impl Visitor for CycleDetector {
    fn visit_package(&mut self, graph: &NodeFactory, package: NodeId) {
        self.search(graph, package);
    }

    fn visit_class(&mut self, graph: &NodeFactory, class: NodeId) {
        self.search(graph, class);
    }

    fn visit_feature(&mut self, graph: &NodeFactory, feature: NodeId) {
        self.search(graph, feature);
    }

    fn order(&self, graph: &NodeFactory, mut nodes: Vec<NodeId>) -> Vec<NodeId> {
        graph.sort_by_name(&mut nodes);
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        factory: NodeFactory,
        a: NodeId,
        b: NodeId,
        c: NodeId,
        d: NodeId,
        e: NodeId,
    }

    fn fixture() -> Fixture {
        let mut factory = NodeFactory::new();
        let a = factory.create_package("a", false);
        factory.create_feature("a.A.a", false);
        let b = factory.create_package("b", false);
        factory.create_feature("b.B.b", false);
        let c = factory.create_package("c", false);
        let d = factory.create_package("d", false);
        let e = factory.create_package("e", false);
        Fixture { factory, a, b, c, d, e }
    }

    fn detect(detector: &mut CycleDetector, factory: &NodeFactory) -> Vec<Vec<String>> {
        detector.traverse_nodes(factory, factory.package_ids());
        detector.cycles().iter().map(|c| c.names().to_vec()).collect()
    }

    #[test]
    fn test_no_dependencies() {
        let f = fixture();
        assert!(detect(&mut CycleDetector::new(), &f.factory).is_empty());
    }

    #[test]
    fn test_no_cycles() {
        let mut f = fixture();
        f.factory.add_dependency(f.a, f.b);
        assert!(detect(&mut CycleDetector::new(), &f.factory).is_empty());
    }

    #[test]
    fn test_one_length_2_package_cycle() {
        let mut f = fixture();
        f.factory.add_dependency(f.a, f.b);
        f.factory.add_dependency(f.b, f.a);

        assert_eq!(detect(&mut CycleDetector::new(), &f.factory), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_one_length_3_package_cycle() {
        let mut f = fixture();
        f.factory.add_dependency(f.a, f.b);
        f.factory.add_dependency(f.b, f.c);
        f.factory.add_dependency(f.c, f.a);

        assert_eq!(detect(&mut CycleDetector::new(), &f.factory), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_two_length_3_package_cycles() {
        let mut f = fixture();
        f.factory.add_dependency(f.a, f.b);
        f.factory.add_dependency(f.b, f.c);
        f.factory.add_dependency(f.c, f.a);
        f.factory.add_dependency(f.c, f.d);
        f.factory.add_dependency(f.d, f.e);
        f.factory.add_dependency(f.e, f.c);

        assert_eq!(
            detect(&mut CycleDetector::new(), &f.factory),
            vec![vec!["a", "b", "c"], vec!["c", "d", "e"]]
        );
    }

    #[test]
    fn test_length_2_and_length_3_package_cycles() {
        let mut f = fixture();
        f.factory.add_dependency(f.a, f.b);
        f.factory.add_dependency(f.b, f.a);
        f.factory.add_dependency(f.c, f.d);
        f.factory.add_dependency(f.d, f.e);
        f.factory.add_dependency(f.e, f.c);

        assert_eq!(
            detect(&mut CycleDetector::new(), &f.factory),
            vec![vec!["a", "b"], vec!["c", "d", "e"]]
        );
    }

    #[test]
    fn test_maximum_length() {
        let mut f = fixture();
        f.factory.add_dependency(f.a, f.b);
        f.factory.add_dependency(f.b, f.a);
        f.factory.add_dependency(f.c, f.d);
        f.factory.add_dependency(f.d, f.e);
        f.factory.add_dependency(f.e, f.c);

        let mut detector = CycleDetector::with_maximum_cycle_length(2);
        assert_eq!(detect(&mut detector, &f.factory), vec![vec!["a", "b"]]);
        assert_eq!(detector.maximum_cycle_length(), Some(2));
    }

    #[test]
    fn test_one_length_2_feature_cycle() {
        let mut f = fixture();
        let a_a_a = f.factory.feature("a.A.a").unwrap();
        let b_b_b = f.factory.feature("b.B.b").unwrap();
        f.factory.add_dependency(a_a_a, b_b_b);
        f.factory.add_dependency(b_b_b, a_a_a);

        assert_eq!(
            detect(&mut CycleDetector::new(), &f.factory),
            vec![vec!["a.A.a", "b.B.b"]]
        );
    }

    #[test]
    fn test_search_from_partial_roots_follows_edges() {
        let mut f = fixture();
        f.factory.add_dependency(f.c, f.d);
        f.factory.add_dependency(f.d, f.e);
        f.factory.add_dependency(f.e, f.c);

        let mut detector = CycleDetector::new();
        detector.traverse_nodes(&f.factory, [f.d]);

        let cycles: Vec<Vec<String>> = detector.cycles().iter().map(|c| c.names().to_vec()).collect();
        assert_eq!(cycles, vec![vec!["d", "e", "c"]]);
    }
}
