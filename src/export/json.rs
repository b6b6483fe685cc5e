//! JSON export implementation.
//!
//! The output is the [`GraphDocument`] itself, so it can be read back with
//! [`crate::loader`].

use super::{Exporter, GraphDocument};
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, document: &GraphDocument, writer: &mut W) -> io::Result<()> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ReportOptions;
    use crate::graph::NodeFactory;
    use crate::selection::{ComprehensiveTraversalStrategy, SortedTraversalStrategy};

    fn create_test_document() -> GraphDocument {
        let mut graph = NodeFactory::new();
        let main = graph.create_feature("app.Main.main()", true);
        let helper = graph.create_class("util.Helper", false);
        graph.add_dependency(main, helper);

        let strategy = SortedTraversalStrategy::new(ComprehensiveTraversalStrategy);
        GraphDocument::build(&graph, strategy, graph.package_ids(), ReportOptions::default())
    }

    #[test]
    fn test_json_export_basic() {
        let document = create_test_document();
        let mut output = Vec::new();

        JsonExporter.export(&document, &mut output).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

        let packages = parsed["packages"].as_array().unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0]["name"], "app");
        assert_eq!(packages[0]["confirmed"], true);
    }

    #[test]
    fn test_json_export_edges() {
        let document = create_test_document();
        let mut output = Vec::new();

        JsonExporter.export(&document, &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let main = &parsed["packages"][0]["classes"][0]["features"][0];
        assert_eq!(main["outbound"][0]["type"], "class");
        assert_eq!(main["outbound"][0]["name"], "util.Helper");
        assert_eq!(main["outbound"][0]["confirmed"], false);
        // Empty edge lists are left out.
        assert!(main.get("inbound").is_none());
    }

    #[test]
    fn test_json_reads_back() {
        let document = create_test_document();
        let mut output = Vec::new();

        JsonExporter.export(&document, &mut output).unwrap();

        let parsed: GraphDocument = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed, document);
    }
}
