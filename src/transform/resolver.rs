//! Fold calls on inherited members onto the declaring feature.

use super::GraphTransform;
use crate::graph::{NodeFactory, NodeId};
use tracing::debug;

/// For each feature, gives every caller an edge to each feature of the same
/// simple name that the feature's class inherits from its declared parents.
///
/// A call recorded against `Child.target()` where `target()` is really
/// declared on `Parent` thereby also shows up on `Parent.target()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureResolver;

impl FeatureResolver {
    fn resolutions(graph: &NodeFactory) -> Vec<(NodeId, NodeId)> {
        let mut features: Vec<NodeId> = graph.features().values().copied().collect();
        graph.sort_by_name(&mut features);

        let mut pairs = Vec::new();
        for feature in features {
            let Some(class) = graph.class_of(feature) else {
                continue;
            };
            let callers = graph.inbound(feature);
            if callers.is_empty() {
                continue;
            }
            let simple_name = graph.node(feature).simple_name();
            for inherited in graph.inherited_features(class, simple_name) {
                if inherited == feature {
                    continue;
                }
                pairs.extend(callers.iter().map(|&caller| (caller, inherited)));
            }
        }
        pairs
    }
}

impl GraphTransform for FeatureResolver {
    fn apply(&self, graph: &mut NodeFactory) -> usize {
        let mut added = 0;
        for (caller, inherited) in Self::resolutions(graph) {
            if graph.add_dependency(caller, inherited) {
                added += 1;
            }
        }
        debug!(added, "resolved inherited features");
        added
    }
}
