//! The default walk over roots and their contents.

use super::{accept, accept_inbound, accept_outbound, Visitor};
use crate::graph::{NodeFactory, NodeId};

/// Walks nodes depth first through containment and hands every callback to
/// its delegate.
///
/// For each node: full visit, then its inbound peers, then its outbound
/// peers, then its contents (classes of a package, features of a class).
/// Edge peers are never descended into. Collections are walked in the order
/// the delegate's [`Visitor::order`] returns. The walk uses an explicit
/// stack, so containment depth does not grow the call stack.
#[derive(Debug, Default)]
pub struct BasicTraversal<V> {
    delegate: V,
}

impl<V: Visitor> BasicTraversal<V> {
    pub fn new(delegate: V) -> Self {
        Self { delegate }
    }

    /// Walks `roots` and everything they contain.
    pub fn traverse_nodes(&mut self, graph: &NodeFactory, roots: impl IntoIterator<Item = NodeId>) {
        let roots = self.delegate.order(graph, roots.into_iter().collect());
        let mut stack: Vec<NodeId> = roots.into_iter().rev().collect();

        while let Some(node) = stack.pop() {
            accept(&mut self.delegate, graph, node);
            self.traverse_inbound(graph, node);
            self.traverse_outbound(graph, node);

            let contents = self.delegate.order(graph, graph.contents(node));
            stack.extend(contents.into_iter().rev());
        }
    }

    /// Visits every node depending on `node`.
    pub fn traverse_inbound(&mut self, graph: &NodeFactory, node: NodeId) {
        for peer in self.delegate.order(graph, graph.inbound(node)) {
            accept_inbound(&mut self.delegate, graph, node, peer);
        }
    }

    /// Visits every node `node` depends on.
    pub fn traverse_outbound(&mut self, graph: &NodeFactory, node: NodeId) {
        for peer in self.delegate.order(graph, graph.outbound(node)) {
            accept_outbound(&mut self.delegate, graph, node, peer);
        }
    }

    pub fn delegate(&self) -> &V {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut V {
        &mut self.delegate
    }

    pub fn into_inner(self) -> V {
        self.delegate
    }
}
