//! Composite and constant criteria.

use super::SelectionCriteria;
use crate::graph::Node;

/// Short-circuit OR over any number of sub-criteria.
///
/// With no sub-criteria everything matches.
#[derive(Default)]
pub struct OrCompositeSelectionCriteria {
    criteria: Vec<Box<dyn SelectionCriteria>>,
}

impl OrCompositeSelectionCriteria {
    pub fn new(criteria: Vec<Box<dyn SelectionCriteria>>) -> Self {
        Self { criteria }
    }

    /// Appends a sub-criteria.
    pub fn push(&mut self, criteria: impl SelectionCriteria + 'static) {
        self.criteria.push(Box::new(criteria));
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    fn any(&self, test: impl Fn(&dyn SelectionCriteria) -> bool) -> bool {
        self.criteria.is_empty() || self.criteria.iter().any(|c| test(c.as_ref()))
    }
}

impl std::fmt::Debug for OrCompositeSelectionCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrCompositeSelectionCriteria")
            .field("criteria", &self.criteria.len())
            .finish()
    }
}

impl SelectionCriteria for OrCompositeSelectionCriteria {
    fn is_matching_packages(&self) -> bool {
        self.any(|c| c.is_matching_packages())
    }

    fn is_matching_classes(&self) -> bool {
        self.any(|c| c.is_matching_classes())
    }

    fn is_matching_features(&self) -> bool {
        self.any(|c| c.is_matching_features())
    }

    fn matches_package_name(&self, name: &str) -> bool {
        self.any(|c| c.matches_package_name(name))
    }

    fn matches_class_name(&self, name: &str) -> bool {
        self.any(|c| c.matches_class_name(name))
    }

    fn matches_feature_name(&self, name: &str) -> bool {
        self.any(|c| c.matches_feature_name(name))
    }

    fn matches(&self, node: &Node) -> bool {
        self.any(|c| c.matches(node))
    }
}

/// Matches every node and name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComprehensiveSelectionCriteria;

impl SelectionCriteria for ComprehensiveSelectionCriteria {
    fn is_matching_packages(&self) -> bool {
        true
    }

    fn is_matching_classes(&self) -> bool {
        true
    }

    fn is_matching_features(&self) -> bool {
        true
    }

    fn matches_package_name(&self, _name: &str) -> bool {
        true
    }

    fn matches_class_name(&self, _name: &str) -> bool {
        true
    }

    fn matches_feature_name(&self, _name: &str) -> bool {
        true
    }
}

/// Matches nothing. Typical stop criteria for an unbounded closure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSelectionCriteria;

impl SelectionCriteria for NullSelectionCriteria {
    fn is_matching_packages(&self) -> bool {
        false
    }

    fn is_matching_classes(&self) -> bool {
        false
    }

    fn is_matching_features(&self) -> bool {
        false
    }

    fn matches_package_name(&self, _name: &str) -> bool {
        false
    }

    fn matches_class_name(&self, _name: &str) -> bool {
        false
    }

    fn matches_feature_name(&self, _name: &str) -> bool {
        false
    }
}
