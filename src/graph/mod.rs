//! Graph module: the node model and its registry.
//!
//! A graph is a three-level containment tree (package, class, feature) with
//! an independent set of directed dependency edges over all three kinds.
//! [`NodeFactory`] is the only way to create nodes and edges.
//!
//! # Example
//!
//! ```rust
//! use depscope::graph::{NodeFactory, NodeKind};
//!
//! let mut factory = NodeFactory::new();
//! let main = factory.create_feature("test.main(java.lang.String[])", true);
//! let string = factory.create_class("java.lang.String", false);
//! factory.add_dependency(main, string);
//!
//! assert_eq!(factory.packages().len(), 2);
//! assert_eq!(factory.kind(main), NodeKind::Feature);
//! assert_eq!(factory.edge_count(), 1);
//! ```

mod factory;
pub(crate) mod names;
mod node;

pub use factory::NodeFactory;
pub use node::{Node, NodeId, NodeKind};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NAMES: &[&str] = &[
        "a", "a.A", "a.A.a", "a.A.b", "a.B", "a.B.a", "b", "b.B", "b.B.b", "", "A", "A.a",
    ];

    fn build(layout: &[(usize, usize, usize)]) -> (NodeFactory, Vec<NodeId>) {
        let mut factory = NodeFactory::new();
        let mut ids = Vec::new();
        for &(kind, name, _) in layout {
            let name = NAMES[name % NAMES.len()];
            let id = match kind % 3 {
                0 => factory.create_package(name, false),
                1 => factory.create_class(name, false),
                _ => factory.create_feature(name, false),
            };
            ids.push(id);
        }
        (factory, ids)
    }

    proptest! {
        #[test]
        fn prop_can_add_dependency_matches_containment(
            layout in prop::collection::vec((0usize..3, 0usize..12, 0usize..12), 1..12),
        ) {
            let (factory, ids) = build(&layout);
            for &x in &ids {
                for &y in &ids {
                    let expected = x != y && !factory.ancestors(x).contains(&y);
                    prop_assert_eq!(factory.can_add_dependency(x, y), expected);
                }
            }
        }

        #[test]
        fn prop_edges_stay_symmetric(
            layout in prop::collection::vec((0usize..3, 0usize..12, 0usize..12), 2..12),
            removals in prop::collection::vec((0usize..12, 0usize..12), 0..6),
        ) {
            let (mut factory, ids) = build(&layout);
            for (i, &(_, _, target)) in layout.iter().enumerate() {
                factory.add_dependency(ids[i], ids[target % ids.len()]);
            }
            for (from, to) in removals {
                factory.remove_dependency(ids[from % ids.len()], ids[to % ids.len()]);
            }
            for id in factory.node_ids() {
                for out in factory.outbound(id) {
                    prop_assert!(factory.inbound(out).contains(&id));
                }
                for inc in factory.inbound(id) {
                    prop_assert!(factory.outbound(inc).contains(&id));
                }
            }
        }

        #[test]
        fn prop_package_confirmation_aggregates(
            layout in prop::collection::vec((0usize..3, 0usize..12, 0usize..12), 1..12),
            confirm in prop::collection::vec(any::<bool>(), 12),
        ) {
            let (mut factory, ids) = build(&layout);
            for (i, &id) in ids.iter().enumerate() {
                if confirm[i % confirm.len()] {
                    factory.set_confirmed(id, true);
                }
            }
            for &package in factory.packages().values() {
                let expected = factory.node(package).is_explicitly_confirmed()
                    || factory.contents(package).iter().any(|&c| factory.is_confirmed(c));
                prop_assert_eq!(factory.is_confirmed(package), expected);
            }
        }
    }
}
