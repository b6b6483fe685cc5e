//! Graph nodes: packages, classes and features.
//!
//! A [`Node`] only carries what belongs to the node itself (name, kind,
//! explicit confirmation, containment and inheritance links). Dependency
//! edges live in the factory's petgraph arena, so every operation that needs
//! them goes through [`NodeFactory`](super::NodeFactory).

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Handle to a node inside a [`NodeFactory`](super::NodeFactory).
///
/// Ids are only meaningful for the factory that issued them.
pub type NodeId = NodeIndex;

/// The three levels of the containment hierarchy.
///
/// Ordering follows containment depth: packages before classes before features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A dotted namespace, possibly the empty default package
    Package,
    /// `<package>.<SimpleClass>`
    Class,
    /// `<package>.<Class>.<member>`
    Feature,
}

impl NodeKind {
    /// Kind of the node one level up, if any.
    pub fn container_kind(self) -> Option<NodeKind> {
        match self {
            Self::Package => None,
            Self::Class => Some(Self::Package),
            Self::Feature => Some(Self::Class),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Package => write!(f, "package"),
            Self::Class => write!(f, "class"),
            Self::Feature => write!(f, "feature"),
        }
    }
}

impl std::str::FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "package" => Ok(Self::Package),
            "class" => Ok(Self::Class),
            "feature" => Ok(Self::Feature),
            _ => Err(format!(
                "Unknown node kind: '{}'. Valid kinds: package, class, feature",
                s
            )),
        }
    }
}

/// A package, class or feature in the dependency graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) simple_name: String,
    pub(crate) kind: NodeKind,
    pub(crate) confirmed: bool,
    pub(crate) container: Option<NodeId>,
    pub(crate) contents: BTreeSet<NodeId>,
    pub(crate) parents: BTreeSet<NodeId>,
    pub(crate) children: BTreeSet<NodeId>,
}

impl Node {
    pub(crate) fn new(
        name: impl Into<String>,
        simple_name: impl Into<String>,
        kind: NodeKind,
        confirmed: bool,
        container: Option<NodeId>,
    ) -> Self {
        Self {
            name: name.into(),
            simple_name: simple_name.into(),
            kind,
            confirmed,
            container,
            contents: BTreeSet::new(),
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }

    /// Fully qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name relative to the container: `A` for class `a.A`, `a(b.B)` for
    /// feature `a.A.a(b.B)`. Packages return their full name.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The explicit flag set by whoever created the node.
    ///
    /// This ignores contents; use
    /// [`NodeFactory::is_confirmed`](super::NodeFactory::is_confirmed) for
    /// the effective value.
    pub fn is_explicitly_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Owning package for a class, owning class for a feature.
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Classes of a package or features of a class. Empty for features.
    pub fn contents(&self) -> &BTreeSet<NodeId> {
        &self.contents
    }

    /// Declared parent classes. Only ever populated on classes.
    pub fn parents(&self) -> &BTreeSet<NodeId> {
        &self.parents
    }

    /// Classes declaring this class as a parent.
    pub fn children(&self) -> &BTreeSet<NodeId> {
        &self.children
    }

    pub fn is_package(&self) -> bool {
        self.kind == NodeKind::Package
    }

    pub fn is_class(&self) -> bool {
        self.kind == NodeKind::Class
    }

    pub fn is_feature(&self) -> bool {
        self.kind == NodeKind::Feature
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
