//! Cycle reports.

use super::xml::{escape, write_header};
use super::ExportFormat;
use crate::cycles::Cycle;
use crate::graph::{NodeFactory, NodeKind};
use serde::Serialize;
use std::io::{self, Write};

const INDENT: &str = "    ";

#[derive(Serialize)]
struct JsonCycle {
    length: usize,
    nodes: Vec<JsonCycleNode>,
}

#[derive(Serialize)]
struct JsonCycleNode {
    #[serde(rename = "type")]
    kind: NodeKind,
    name: String,
}

/// Writes `cycles` in the given format.
///
/// Text lists each cycle as its first node followed by one `-->` line per
/// step, each step indented one level further, ending back at the first node.
///
/// # Example
///
/// ```rust
/// use depscope::cycles::CycleDetector;
/// use depscope::export::{export_cycles, ExportFormat};
/// use depscope::graph::NodeFactory;
///
/// let mut graph = NodeFactory::new();
/// let a = graph.create_package("a", false);
/// let b = graph.create_package("b", false);
/// graph.add_dependency(a, b);
/// graph.add_dependency(b, a);
///
/// let mut detector = CycleDetector::new();
/// detector.traverse_nodes(&graph, graph.package_ids());
///
/// let mut output = Vec::new();
/// export_cycles(ExportFormat::Text, &graph, detector.cycles(), &mut output).unwrap();
/// assert_eq!(String::from_utf8(output).unwrap(), "a\n    --> b\n        --> a\n");
/// ```
pub fn export_cycles<'a, W: Write>(
    format: ExportFormat,
    graph: &NodeFactory,
    cycles: impl IntoIterator<Item = &'a Cycle>,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Text => write_text(cycles, writer),
        ExportFormat::Json => write_json(graph, cycles, writer),
        ExportFormat::Xml => write_xml(graph, cycles, writer),
    }
}

fn write_text<'a, W: Write>(cycles: impl IntoIterator<Item = &'a Cycle>, writer: &mut W) -> io::Result<()> {
    for cycle in cycles {
        let names = cycle.names();
        let Some(first) = names.first() else {
            continue;
        };
        writeln!(writer, "{}", first)?;
        for (depth, name) in names.iter().skip(1).chain(std::iter::once(first)).enumerate() {
            writeln!(writer, "{}--> {}", INDENT.repeat(depth + 1), name)?;
        }
    }
    Ok(())
}

fn write_json<'a, W: Write>(
    graph: &NodeFactory,
    cycles: impl IntoIterator<Item = &'a Cycle>,
    writer: &mut W,
) -> io::Result<()> {
    let cycles: Vec<JsonCycle> = cycles
        .into_iter()
        .map(|cycle| JsonCycle {
            length: cycle.len(),
            nodes: cycle
                .path()
                .iter()
                .map(|&id| JsonCycleNode {
                    kind: graph.kind(id),
                    name: graph.name(id).to_string(),
                })
                .collect(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&cycles)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    writeln!(writer, "{}", json)
}

fn write_xml<'a, W: Write>(
    graph: &NodeFactory,
    cycles: impl IntoIterator<Item = &'a Cycle>,
    writer: &mut W,
) -> io::Result<()> {
    write_header(writer)?;
    writeln!(writer, "<cycles>")?;
    for cycle in cycles {
        writeln!(writer, "{}<cycle>", INDENT)?;
        for &id in cycle.path() {
            writeln!(
                writer,
                "{}<node type=\"{}\">{}</node>",
                INDENT.repeat(2),
                graph.kind(id),
                escape(graph.name(id))
            )?;
        }
        writeln!(writer, "{}</cycle>", INDENT)?;
    }
    writeln!(writer, "</cycles>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycles::CycleDetector;

    fn two_cycles() -> (NodeFactory, CycleDetector) {
        let mut graph = NodeFactory::new();
        let a = graph.create_package("a", false);
        let b = graph.create_package("b", false);
        let c = graph.create_package("c", false);
        graph.add_dependency(a, b);
        graph.add_dependency(b, a);
        graph.add_dependency(b, c);
        graph.add_dependency(c, a);

        let mut detector = CycleDetector::new();
        detector.traverse_nodes(&graph, graph.package_ids());
        (graph, detector)
    }

    fn render(format: ExportFormat) -> String {
        let (graph, detector) = two_cycles();
        let mut output = Vec::new();
        export_cycles(format, &graph, detector.cycles(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_cycles_shortest_first() {
        let expected = "\
a
    --> b
        --> a
a
    --> b
        --> c
            --> a
";
        assert_eq!(render(ExportFormat::Text), expected);
    }

    #[test]
    fn test_json_cycles() {
        let parsed: serde_json::Value = serde_json::from_str(&render(ExportFormat::Json)).unwrap();

        let cycles = parsed.as_array().unwrap();
        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0]["length"], 2);
        assert_eq!(cycles[1]["nodes"][2]["name"], "c");
        assert_eq!(cycles[1]["nodes"][2]["type"], "package");
    }

    #[test]
    fn test_xml_cycles() {
        let output = render(ExportFormat::Xml);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[2], "<cycles>");
        assert_eq!(lines[3], "    <cycle>");
        assert_eq!(lines[4], "        <node type=\"package\">a</node>");
        assert_eq!(lines[5], "        <node type=\"package\">b</node>");
        assert_eq!(lines[6], "    </cycle>");
        assert_eq!(lines.last(), Some(&"</cycles>"));
    }

    #[test]
    fn test_no_cycles_text_is_empty() {
        let graph = NodeFactory::new();
        let mut output = Vec::new();
        export_cycles(ExportFormat::Text, &graph, &[], &mut output).unwrap();
        assert!(output.is_empty());
    }
}
