//! Node selection: criteria and traversal strategies.
//!
//! A [`SelectionCriteria`] decides whether a node (or a bare name of a given
//! kind) is selected. A [`TraversalStrategy`] pairs two of them: *scope*
//! picks the nodes a traversal works on, *filter* picks the peers whose
//! edges it keeps.
//!
//! # Example
//!
//! ```rust
//! use depscope::graph::{NodeFactory, NodeKind};
//! use depscope::selection::{RegularExpressionSelectionCriteria, SelectionCriteria};
//!
//! let mut factory = NodeFactory::new();
//! let feature = factory.create_feature("a.A.a", false);
//!
//! let mut criteria = RegularExpressionSelectionCriteria::new();
//! criteria.set_global_includes("/^a/").unwrap();
//! criteria.set_matching(NodeKind::Feature, false);
//!
//! assert!(!criteria.matches(factory.node(feature)));
//! assert!(criteria.matches_feature_name("a.A.a"));
//! ```

mod collection;
mod composite;
mod pattern;
mod strategy;

pub use collection::CollectionSelectionCriteria;
pub use composite::{ComprehensiveSelectionCriteria, NullSelectionCriteria, OrCompositeSelectionCriteria};
pub use pattern::{compile_pattern, parse_patterns, RegularExpressionSelectionCriteria};
pub use strategy::{
    ComprehensiveTraversalStrategy, SelectiveTraversalStrategy, SortedTraversalStrategy,
    TraversalStrategy,
};

use crate::graph::{Node, NodeKind};
use thiserror::Error;

/// Errors raised while building criteria from textual patterns.
#[derive(Debug, Error)]
pub enum CriteriaError {
    /// A `/.../` or `m#...#` pattern whose body is not a valid regex.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Predicate over nodes and node names.
pub trait SelectionCriteria {
    fn is_matching_packages(&self) -> bool;
    fn is_matching_classes(&self) -> bool;
    fn is_matching_features(&self) -> bool;

    fn matches_package_name(&self, name: &str) -> bool;
    fn matches_class_name(&self, name: &str) -> bool;
    fn matches_feature_name(&self, name: &str) -> bool;

    /// Whether nodes of this kind can be selected at all.
    fn is_matching(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Package => self.is_matching_packages(),
            NodeKind::Class => self.is_matching_classes(),
            NodeKind::Feature => self.is_matching_features(),
        }
    }

    /// Name test for a kind, ignoring whether the kind is enabled.
    fn matches_name(&self, kind: NodeKind, name: &str) -> bool {
        match kind {
            NodeKind::Package => self.matches_package_name(name),
            NodeKind::Class => self.matches_class_name(name),
            NodeKind::Feature => self.matches_feature_name(name),
        }
    }

    /// Kind enabled and name accepted.
    fn matches(&self, node: &Node) -> bool {
        self.is_matching(node.kind()) && self.matches_name(node.kind(), node.name())
    }
}

impl<T: SelectionCriteria + ?Sized> SelectionCriteria for Box<T> {
    fn is_matching_packages(&self) -> bool {
        (**self).is_matching_packages()
    }

    fn is_matching_classes(&self) -> bool {
        (**self).is_matching_classes()
    }

    fn is_matching_features(&self) -> bool {
        (**self).is_matching_features()
    }

    fn matches_package_name(&self, name: &str) -> bool {
        (**self).matches_package_name(name)
    }

    fn matches_class_name(&self, name: &str) -> bool {
        (**self).matches_class_name(name)
    }

    fn matches_feature_name(&self, name: &str) -> bool {
        (**self).matches_feature_name(name)
    }

    fn matches(&self, node: &Node) -> bool {
        (**self).matches(node)
    }
}
