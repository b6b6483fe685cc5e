//! Graph transforms.
//!
//! [`GraphCopier`] and [`GraphSummarizer`] read a source graph and build a
//! fresh [`NodeFactory`]. The in-place transforms ([`LinkMaximizer`],
//! [`LinkMinimizer`], [`FeatureResolver`]) implement [`GraphTransform`] and
//! rewrite the edges of the graph they are given.

mod copier;
mod maximizer;
mod minimizer;
mod resolver;
mod summarizer;

pub use copier::GraphCopier;
pub use maximizer::LinkMaximizer;
pub use minimizer::LinkMinimizer;
pub use resolver::FeatureResolver;
pub use summarizer::GraphSummarizer;

use crate::graph::{NodeFactory, NodeId};

/// A transform that rewrites a graph's edges in place.
pub trait GraphTransform {
    /// Applies the transform and returns how many edges were added or removed.
    fn apply(&self, graph: &mut NodeFactory) -> usize;
}

/// Recreates `node` and its containers in `target`.
///
/// Every node created or looked up gets the source node's effective
/// confirmation. Confirmation is only ever raised on lookup.
pub(crate) fn copy_node(source: &NodeFactory, target: &mut NodeFactory, node: NodeId) -> NodeId {
    for ancestor in source.ancestors(node).into_iter().rev() {
        target.create(
            source.kind(ancestor),
            source.name(ancestor),
            source.is_confirmed(ancestor),
        );
    }
    target.create(source.kind(node), source.name(node), source.is_confirmed(node))
}

/// Nearest node among `node` and its containers that satisfies `accept`.
pub(crate) fn nearest(
    graph: &NodeFactory,
    node: NodeId,
    accept: impl Fn(NodeId) -> bool,
) -> Option<NodeId> {
    graph.self_and_ancestors(node).into_iter().find(|&n| accept(n))
}

/// The graph used across transform and closure tests.
///
/// ```text
/// test                      --> java.lang.Object
/// test.main(String[])       --> java.lang.Object
///                           --> java.lang.Object.Object()
///                           --> java.lang.String
///                           --> java.util.Collections.singleton(java.lang.Object)
///                           --> java.util.Set
/// test.test()               --> java.lang.Object.Object()
/// ```
#[cfg(test)]
pub(crate) fn sample_graph() -> NodeFactory {
    let mut factory = NodeFactory::new();
    let test_class = factory.create_class("test", false);
    let test_main = factory.create_feature("test.main(String[])", false);
    let test_test = factory.create_feature("test.test()", false);
    let object = factory.create_class("java.lang.Object", false);
    let object_ctor = factory.create_feature("java.lang.Object.Object()", false);
    let string = factory.create_class("java.lang.String", false);
    let singleton = factory.create_feature("java.util.Collections.singleton(java.lang.Object)", false);
    let set = factory.create_class("java.util.Set", false);

    factory.add_dependency(test_class, object);
    factory.add_dependency(test_main, object);
    factory.add_dependency(test_main, object_ctor);
    factory.add_dependency(test_main, string);
    factory.add_dependency(test_main, singleton);
    factory.add_dependency(test_main, set);
    factory.add_dependency(test_test, object_ctor);
    factory
}
