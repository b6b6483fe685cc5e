//! Reads a graph back from its JSON document form.
//!
//! The input is what [`crate::export::json::JsonExporter`] writes: packages
//! holding classes holding features, each with `inbound` and `outbound`
//! edges naming their peer by kind and full name.

use crate::export::{EdgeEntry, GraphDocument};
use crate::graph::names::split_qualified;
use crate::graph::{NodeFactory, NodeId};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Errors that can occur while loading a graph.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A class or feature listed under a container its name does not belong to.
    #[error("'{name}' is listed under '{container}'")]
    Misplaced { name: String, container: String },
}

/// Result type alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Loads a graph from a JSON file.
///
/// # Arguments
///
/// * `path` - Path to a JSON graph document
///
/// # Returns
///
/// A `LoadResult` containing the populated `NodeFactory` or an error.
pub fn load_file(path: &Path) -> LoadResult<NodeFactory> {
    let content = fs::read_to_string(path)?;
    let graph = load_str(&content)?;
    debug!(path = %path.display(), nodes = graph.node_count(), "loaded graph");
    Ok(graph)
}

/// Loads a graph from a JSON string.
///
/// # Example
///
/// ```
/// use depscope::loader::load_str;
///
/// let json = r#"{"packages": [
///     {"name": "a", "confirmed": true, "outbound": [{"type": "package", "name": "b"}]}
/// ]}"#;
/// let graph = load_str(json).unwrap();
///
/// let a = graph.package("a").unwrap();
/// let b = graph.package("b").unwrap();
/// assert!(graph.has_dependency(a, b));
/// assert!(!graph.is_confirmed(b));
/// ```
pub fn load_str(content: &str) -> LoadResult<NodeFactory> {
    let document: GraphDocument = serde_json::from_str(content)?;
    load_document(&document)
}

/// Builds a graph from a document.
///
/// Nodes take the confirmation their entry records. Peers named only in
/// edges are created unconfirmed unless the edge says otherwise.
pub fn load_document(document: &GraphDocument) -> LoadResult<NodeFactory> {
    let mut graph = NodeFactory::new();

    for package in &document.packages {
        let package_id = graph.create_package(&package.name, package.confirmed);
        link(&mut graph, package_id, &package.inbound, &package.outbound);

        for class in &package.classes {
            check_container(&class.name, &package.name)?;
            let class_id = graph.create_class(&class.name, class.confirmed);
            link(&mut graph, class_id, &class.inbound, &class.outbound);

            for parent in &class.parents {
                let parent_id = graph.create_class(parent, false);
                graph.add_parent(class_id, parent_id);
            }

            for feature in &class.features {
                check_container(&feature.name, &class.name)?;
                let feature_id = graph.create_feature(&feature.name, feature.confirmed);
                link(&mut graph, feature_id, &feature.inbound, &feature.outbound);
            }
        }
    }

    Ok(graph)
}

fn check_container(name: &str, container: &str) -> LoadResult<()> {
    if split_qualified(name).0 == container {
        Ok(())
    } else {
        Err(LoadError::Misplaced {
            name: name.to_string(),
            container: container.to_string(),
        })
    }
}

fn link(graph: &mut NodeFactory, node: NodeId, inbound: &[EdgeEntry], outbound: &[EdgeEntry]) {
    for edge in inbound {
        let peer = graph.create(edge.kind, &edge.name, edge.confirmed);
        graph.add_dependency(peer, node);
    }
    for edge in outbound {
        let peer = graph.create(edge.kind, &edge.name, edge.confirmed);
        graph.add_dependency(node, peer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{export_to_string, ExportFormat, ReportOptions};
    use crate::selection::{ComprehensiveTraversalStrategy, SortedTraversalStrategy};
    use std::io::Write;

    fn sample_json() -> &'static str {
        r#"{
            "packages": [
                {
                    "name": "app",
                    "confirmed": true,
                    "classes": [
                        {
                            "name": "app.Main",
                            "confirmed": true,
                            "parents": ["app.Base"],
                            "features": [
                                {
                                    "name": "app.Main.run()",
                                    "confirmed": true,
                                    "outbound": [
                                        {"type": "feature", "name": "util.Log.info(java.lang.String)", "confirmed": false},
                                        {"type": "class", "name": "util.Config"}
                                    ]
                                }
                            ]
                        }
                    ]
                }
            ]
        }"#
    }

    #[test]
    fn test_load_creates_nodes_and_edges() {
        let graph = load_str(sample_json()).unwrap();

        assert_eq!(graph.packages().len(), 2);
        assert_eq!(graph.classes().len(), 4);
        assert_eq!(graph.features().len(), 2);

        let run = graph.feature("app.Main.run()").unwrap();
        let mut names: Vec<&str> = graph.outbound(run).into_iter().map(|id| graph.name(id)).collect();
        names.sort();
        assert_eq!(names, vec!["util.Config", "util.Log.info(java.lang.String)"]);
    }

    #[test]
    fn test_load_keeps_confirmation() {
        let graph = load_str(sample_json()).unwrap();

        assert!(graph.is_confirmed(graph.feature("app.Main.run()").unwrap()));
        assert!(!graph.is_confirmed(graph.class("util.Config").unwrap()));
        assert!(!graph.is_confirmed(graph.package("util").unwrap()));
        assert!(!graph.is_confirmed(graph.class("app.Base").unwrap()));
    }

    #[test]
    fn test_load_parents() {
        let graph = load_str(sample_json()).unwrap();

        let main = graph.class("app.Main").unwrap();
        let base = graph.class("app.Base").unwrap();
        assert_eq!(graph.parents(main), vec![base]);
        assert_eq!(graph.children(base), vec![main]);
    }

    #[test]
    fn test_load_inbound_edges() {
        let json = r#"{"packages": [{"name": "b", "inbound": [{"type": "package", "name": "a"}]}]}"#;
        let graph = load_str(json).unwrap();

        let a = graph.package("a").unwrap();
        let b = graph.package("b").unwrap();
        assert!(graph.has_dependency(a, b));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_load_empty_document() {
        assert!(load_str("{}").unwrap().is_empty());
    }

    #[test]
    fn test_load_invalid_json() {
        let result = load_str("{ invalid json }");
        assert!(matches!(result.unwrap_err(), LoadError::Json(_)));
    }

    #[test]
    fn test_load_misplaced_class() {
        let json = r#"{"packages": [{"name": "a", "classes": [{"name": "b.B"}]}]}"#;
        let result = load_str(json);
        assert!(matches!(result.unwrap_err(), LoadError::Misplaced { .. }));
    }

    #[test]
    fn test_load_file_not_found() {
        let result = load_file(Path::new("/nonexistent/graph.json"));
        assert!(matches!(result.unwrap_err(), LoadError::Io(_)));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("depscope-loader-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(sample_json().as_bytes()).unwrap();

        let graph = load_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(graph.features().len(), 2);
    }

    #[test]
    fn test_exported_json_loads_back() {
        let graph = load_str(sample_json()).unwrap();
        let strategy = SortedTraversalStrategy::new(ComprehensiveTraversalStrategy);
        let document = GraphDocument::build(&graph, strategy, graph.package_ids(), ReportOptions::default());
        let json = export_to_string(ExportFormat::Json, &document).unwrap();

        let reloaded = load_str(&json).unwrap();

        assert_eq!(reloaded.node_count(), graph.node_count());
        assert_eq!(reloaded.edge_count(), graph.edge_count());
        assert_eq!(reloaded.parents(reloaded.class("app.Main").unwrap()).len(), 1);
    }
}
