//! Bounded neighborhood around a seed set.

use super::{ClosureDirection, TransitiveClosureEngine};
use crate::graph::{NodeFactory, NodeId};
use crate::selection::{ComprehensiveTraversalStrategy, SelectionCriteria};
use crate::transform::GraphCopier;
use std::fmt;

/// How many layers to follow in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    /// Follow until nothing new is reached.
    #[default]
    Unbounded,
    /// Keep the seed nodes, follow nothing.
    DoNotFollow,
    /// Follow at most this many layers.
    Limited(usize),
}

impl Depth {
    /// `None` means unbounded.
    pub fn from_limit(limit: Option<usize>) -> Self {
        match limit {
            None => Depth::Unbounded,
            Some(0) => Depth::DoNotFollow,
            Some(n) => Depth::Limited(n),
        }
    }

    fn apply(self, engine: &mut TransitiveClosureEngine<'_>) {
        match self {
            Depth::Unbounded => engine.compute_all_layers(),
            Depth::DoNotFollow => {}
            Depth::Limited(n) => engine.compute_layers(n),
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Unbounded => write!(f, "unbounded"),
            Depth::DoNotFollow => write!(f, "0"),
            Depth::Limited(n) => write!(f, "{}", n),
        }
    }
}

impl std::str::FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unbounded" | "*" => Ok(Depth::Unbounded),
            other => other
                .parse::<usize>()
                .map(|n| Depth::from_limit(Some(n)))
                .map_err(|_| format!("Invalid depth: '{}'. Use a non-negative number or 'unbounded'", s)),
        }
    }
}

/// Slices the graph around the nodes a start criteria selects, following
/// inbound and outbound edges to independently bounded depths.
///
/// Both directions start from the same seed set, and their results are
/// merged into a single graph. By default inbound edges are not followed
/// and outbound edges are followed to the end.
///
/// # Example
///
/// ```rust
/// use depscope::closure::{Depth, TransitiveClosure};
/// use depscope::graph::NodeFactory;
/// use depscope::selection::{NullSelectionCriteria, RegularExpressionSelectionCriteria};
///
/// let mut graph = NodeFactory::new();
/// let caller = graph.create_package("caller", false);
/// let base = graph.create_package("base", false);
/// let callee = graph.create_package("callee", false);
/// graph.add_dependency(caller, base);
/// graph.add_dependency(base, callee);
///
/// let mut closure = TransitiveClosure::new(
///     RegularExpressionSelectionCriteria::new(),
///     NullSelectionCriteria,
/// );
/// closure.set_maximum_inbound_depth(Depth::Limited(1));
/// let slice = closure.compute(&graph, [base]);
///
/// assert_eq!(slice.packages().len(), 3);
/// ```
pub struct TransitiveClosure {
    start: Box<dyn SelectionCriteria>,
    stop: Box<dyn SelectionCriteria>,
    maximum_inbound_depth: Depth,
    maximum_outbound_depth: Depth,
}

impl TransitiveClosure {
    pub fn new(
        start: impl SelectionCriteria + 'static,
        stop: impl SelectionCriteria + 'static,
    ) -> Self {
        Self {
            start: Box::new(start),
            stop: Box::new(stop),
            maximum_inbound_depth: Depth::DoNotFollow,
            maximum_outbound_depth: Depth::Unbounded,
        }
    }

    pub fn maximum_inbound_depth(&self) -> Depth {
        self.maximum_inbound_depth
    }

    pub fn set_maximum_inbound_depth(&mut self, depth: Depth) {
        self.maximum_inbound_depth = depth;
    }

    pub fn maximum_outbound_depth(&self) -> Depth {
        self.maximum_outbound_depth
    }

    pub fn set_maximum_outbound_depth(&mut self, depth: Depth) {
        self.maximum_outbound_depth = depth;
    }

    /// Builds the slice around `roots` of `graph`.
    pub fn compute(&self, graph: &NodeFactory, roots: impl IntoIterator<Item = NodeId>) -> NodeFactory {
        let roots: Vec<NodeId> = roots.into_iter().collect();
        let mut result = NodeFactory::new();

        for (direction, depth) in [
            (ClosureDirection::Inbound, self.maximum_inbound_depth),
            (ClosureDirection::Outbound, self.maximum_outbound_depth),
        ] {
            let mut engine = TransitiveClosureEngine::new(
                graph,
                roots.iter().copied(),
                self.start.as_ref(),
                self.stop.as_ref(),
                direction,
            );
            depth.apply(&mut engine);

            let layer = engine.into_factory();
            let mut copier = GraphCopier::with_factory(ComprehensiveTraversalStrategy, result);
            copier.traverse_nodes(&layer, layer.package_ids());
            result = copier.into_factory();
        }
        result
    }
}

impl fmt::Debug for TransitiveClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitiveClosure")
            .field("maximum_inbound_depth", &self.maximum_inbound_depth)
            .field("maximum_outbound_depth", &self.maximum_outbound_depth)
            .finish_non_exhaustive()
    }
}
