//! The cycle value type.

use crate::graph::{NodeFactory, NodeId};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors raised when building a [`Cycle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("A cycle needs at least one node")]
    EmptyPath,
}

/// A closed path through the dependency graph.
///
/// The path is kept in the order it was found; the edge from the last node
/// back to the first is implied. Two cycles are equal when they have the
/// same length and visit the same set of nodes, whatever the rotation or
/// direction. Cycles sort by length, then by their sorted node names.
#[derive(Debug, Clone)]
pub struct Cycle {
    path: Vec<NodeId>,
    names: Vec<String>,
    sorted_ids: Vec<NodeId>,
    sorted_names: Vec<String>,
}

impl Cycle {
    /// Builds a cycle from a path found in `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::EmptyPath`] if `path` is empty.
    pub fn new(graph: &NodeFactory, path: Vec<NodeId>) -> Result<Self, CycleError> {
        if path.is_empty() {
            return Err(CycleError::EmptyPath);
        }

        let names: Vec<String> = path.iter().map(|&id| graph.name(id).to_string()).collect();
        let mut sorted_ids = path.clone();
        sorted_ids.sort();
        let mut sorted_names = names.clone();
        sorted_names.sort();

        Ok(Self {
            path,
            names,
            sorted_ids,
            sorted_names,
        })
    }

    /// Nodes in the order they were found.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Node names in path order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.sorted_ids.binary_search(&node).is_ok()
    }
}

impl PartialEq for Cycle {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_ids == other.sorted_ids
    }
}

impl Eq for Cycle {}

impl Ord for Cycle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.sorted_names.cmp(&other.sorted_names))
            .then_with(|| self.sorted_ids.cmp(&other.sorted_ids))
    }
}

impl PartialOrd for Cycle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.names {
            write!(f, "{} --> ", name)?;
        }
        write!(f, "{}", self.names[0])
    }
}
