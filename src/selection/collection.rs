//! Criteria backed by explicit name sets.

use super::SelectionCriteria;
use std::collections::HashSet;

/// Selects names present in an include set and absent from an exclude set.
///
/// A missing include set means every name is included. The same sets apply
/// to all three kinds.
#[derive(Debug, Clone, Default)]
pub struct CollectionSelectionCriteria {
    include: Option<HashSet<String>>,
    exclude: HashSet<String>,
}

impl CollectionSelectionCriteria {
    pub fn new(include: Option<HashSet<String>>, exclude: HashSet<String>) -> Self {
        Self { include, exclude }
    }

    /// Criteria accepting exactly these names.
    pub fn including<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: Some(names.into_iter().map(Into::into).collect()),
            exclude: HashSet::new(),
        }
    }

    /// Adds names to the exclude set.
    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    fn matches_any_name(&self, name: &str) -> bool {
        let included = self.include.as_ref().map_or(true, |set| set.contains(name));
        included && !self.exclude.contains(name)
    }
}

impl SelectionCriteria for CollectionSelectionCriteria {
    fn is_matching_packages(&self) -> bool {
        true
    }

    fn is_matching_classes(&self) -> bool {
        true
    }

    fn is_matching_features(&self) -> bool {
        true
    }

    fn matches_package_name(&self, name: &str) -> bool {
        self.matches_any_name(name)
    }

    fn matches_class_name(&self, name: &str) -> bool {
        self.matches_any_name(name)
    }

    fn matches_feature_name(&self, name: &str) -> bool {
        self.matches_any_name(name)
    }
}
