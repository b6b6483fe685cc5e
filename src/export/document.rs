//! Serializable snapshot of a traversal.

use crate::graph::{NodeFactory, NodeId, NodeKind};
use crate::selection::TraversalStrategy;
use crate::visitor::{BasicTraversal, SelectiveVisitor, Visitor};
use serde::{Deserialize, Serialize};

/// Packages, classes and features a traversal saw, with their edges.
///
/// This is also the input format of [`crate::loader`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    pub name: String,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inbound: Vec<EdgeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outbound: Vec<EdgeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub confirmed: bool,
    /// Declared parent classes, by name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inbound: Vec<EdgeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outbound: Vec<EdgeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureEntry {
    pub name: String,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inbound: Vec<EdgeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outbound: Vec<EdgeEntry>,
}

/// The far end of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEntry {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    #[serde(default)]
    pub confirmed: bool,
}

/// What a document keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub show_inbounds: bool,
    pub show_outbounds: bool,
    /// Keep nodes with no edges and nothing non-empty inside them.
    pub show_empty_nodes: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_inbounds: true,
            show_outbounds: true,
            show_empty_nodes: true,
        }
    }
}

impl PackageEntry {
    fn new(name: &str, confirmed: bool) -> Self {
        Self {
            name: name.to_string(),
            confirmed,
            inbound: Vec::new(),
            outbound: Vec::new(),
            classes: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.inbound.is_empty() && self.outbound.is_empty() && self.classes.is_empty()
    }
}

impl ClassEntry {
    fn new(name: &str, confirmed: bool) -> Self {
        Self {
            name: name.to_string(),
            confirmed,
            parents: Vec::new(),
            inbound: Vec::new(),
            outbound: Vec::new(),
            features: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.inbound.is_empty() && self.outbound.is_empty() && self.features.is_empty()
    }
}

impl FeatureEntry {
    fn new(name: &str, confirmed: bool) -> Self {
        Self {
            name: name.to_string(),
            confirmed,
            inbound: Vec::new(),
            outbound: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.inbound.is_empty() && self.outbound.is_empty()
    }
}

impl GraphDocument {
    /// Walks `roots` of `graph` under `strategy` and records what it sees.
    ///
    /// # Example
    ///
    /// ```rust
    /// use depscope::export::{GraphDocument, ReportOptions};
    /// use depscope::graph::NodeFactory;
    /// use depscope::selection::{ComprehensiveTraversalStrategy, SortedTraversalStrategy};
    ///
    /// let mut graph = NodeFactory::new();
    /// let a = graph.create_class("a.A", true);
    /// let b = graph.create_class("b.B", false);
    /// graph.add_dependency(a, b);
    ///
    /// let strategy = SortedTraversalStrategy::new(ComprehensiveTraversalStrategy);
    /// let document = GraphDocument::build(&graph, strategy, graph.package_ids(), ReportOptions::default());
    ///
    /// assert_eq!(document.packages.len(), 2);
    /// assert_eq!(document.packages[0].classes[0].outbound[0].name, "b.B");
    /// ```
    pub fn build<S: TraversalStrategy>(
        graph: &NodeFactory,
        strategy: S,
        roots: impl IntoIterator<Item = NodeId>,
        options: ReportOptions,
    ) -> Self {
        let visitor = SelectiveVisitor::new(strategy, DocumentBuilder::new(options));
        let mut traversal = BasicTraversal::new(visitor);
        traversal.traverse_nodes(graph, roots);
        traversal.into_inner().into_inner().into_document()
    }

    /// Number of packages, classes and features in the document.
    pub fn node_count(&self) -> usize {
        self.packages
            .iter()
            .map(|p| 1 + p.classes.len() + p.classes.iter().map(|c| c.features.len()).sum::<usize>())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    fn prune_empty_nodes(&mut self) {
        for package in &mut self.packages {
            for class in &mut package.classes {
                class.features.retain(|f| !f.is_empty());
            }
            package.classes.retain(|c| !c.is_empty());
        }
        self.packages.retain(|p| !p.is_empty());
    }
}

/// Visitor recording full visits and edge visits into a [`GraphDocument`].
///
/// Nodes are appended in visit order. A class or feature whose container was
/// not visited brings an entry for that container along, so the document
/// keeps the containment structure.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    options: ReportOptions,
    document: GraphDocument,
}

impl DocumentBuilder {
    pub fn new(options: ReportOptions) -> Self {
        Self {
            options,
            document: GraphDocument::default(),
        }
    }

    pub fn into_document(mut self) -> GraphDocument {
        if !self.options.show_empty_nodes {
            self.document.prune_empty_nodes();
        }
        self.document
    }

    fn package_entry(&mut self, graph: &NodeFactory, package: NodeId) -> &mut PackageEntry {
        let name = graph.name(package);
        let packages = &mut self.document.packages;
        if packages.last().map_or(true, |p| p.name != name) {
            packages.push(PackageEntry::new(name, graph.is_confirmed(package)));
        }
        let last = packages.len() - 1;
        &mut packages[last]
    }

    fn class_entry(&mut self, graph: &NodeFactory, class: NodeId) -> Option<&mut ClassEntry> {
        let package = graph.package_of(class)?;
        let name = graph.name(class);
        let classes = &mut self.package_entry(graph, package).classes;
        if classes.last().map_or(true, |c| c.name != name) {
            let mut entry = ClassEntry::new(name, graph.is_confirmed(class));
            entry.parents = graph.parents(class).into_iter().map(|p| graph.name(p).to_string()).collect();
            entry.parents.sort();
            classes.push(entry);
        }
        classes.last_mut()
    }

    fn feature_entry(&mut self, graph: &NodeFactory, feature: NodeId) -> Option<&mut FeatureEntry> {
        let class = graph.class_of(feature)?;
        let name = graph.name(feature);
        let features = &mut self.class_entry(graph, class)?.features;
        if features.last().map_or(true, |f| f.name != name) {
            features.push(FeatureEntry::new(name, graph.is_confirmed(feature)));
        }
        features.last_mut()
    }

    fn edge(graph: &NodeFactory, peer: NodeId) -> EdgeEntry {
        EdgeEntry {
            kind: graph.kind(peer),
            name: graph.name(peer).to_string(),
            confirmed: graph.is_confirmed(peer),
        }
    }
}

impl Visitor for DocumentBuilder {
    fn visit_package(&mut self, graph: &NodeFactory, package: NodeId) {
        self.package_entry(graph, package);
    }

    fn visit_inbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.options.show_inbounds {
            let edge = Self::edge(graph, peer);
            self.package_entry(graph, current).inbound.push(edge);
        }
    }

    fn visit_outbound_package(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.options.show_outbounds {
            let edge = Self::edge(graph, peer);
            self.package_entry(graph, current).outbound.push(edge);
        }
    }

    fn visit_class(&mut self, graph: &NodeFactory, class: NodeId) {
        self.class_entry(graph, class);
    }

    fn visit_inbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.options.show_inbounds {
            let edge = Self::edge(graph, peer);
            if let Some(entry) = self.class_entry(graph, current) {
                entry.inbound.push(edge);
            }
        }
    }

    fn visit_outbound_class(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.options.show_outbounds {
            let edge = Self::edge(graph, peer);
            if let Some(entry) = self.class_entry(graph, current) {
                entry.outbound.push(edge);
            }
        }
    }

    fn visit_feature(&mut self, graph: &NodeFactory, feature: NodeId) {
        self.feature_entry(graph, feature);
    }

    fn visit_inbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.options.show_inbounds {
            let edge = Self::edge(graph, peer);
            if let Some(entry) = self.feature_entry(graph, current) {
                entry.inbound.push(edge);
            }
        }
    }

    fn visit_outbound_feature(&mut self, graph: &NodeFactory, current: NodeId, peer: NodeId) {
        if self.options.show_outbounds {
            let edge = Self::edge(graph, peer);
            if let Some(entry) = self.feature_entry(graph, current) {
                entry.outbound.push(edge);
            }
        }
    }
}
