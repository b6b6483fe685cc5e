//! XML export implementation.
//!
//! Writes the `<dependencies>` document: one `<package>` element per
//! package with its `<name>`, its `<outbound>` and `<inbound>` edges and its
//! `<class>` elements, which nest `<feature>` elements the same way.

use super::{EdgeEntry, Exporter, GraphDocument};
use std::io::{self, Write};

/// XML exporter implementation.
pub struct XmlExporter;

const INDENT: &str = "    ";

pub(crate) fn write_header<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "<?xml version=\"1.0\" encoding=\"utf-8\" ?>")?;
    writeln!(writer)
}

/// Replaces the characters XML reserves.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn yes_no(confirmed: bool) -> &'static str {
    if confirmed {
        "yes"
    } else {
        "no"
    }
}

fn write_open<W: Write>(writer: &mut W, depth: usize, tag: &str, name: &str, confirmed: bool) -> io::Result<()> {
    let indent = INDENT.repeat(depth);
    writeln!(writer, "{}<{} confirmed=\"{}\">", indent, tag, yes_no(confirmed))?;
    writeln!(writer, "{}{}<name>{}</name>", indent, INDENT, escape(name))
}

fn write_edges<W: Write>(
    writer: &mut W,
    depth: usize,
    outbound: &[EdgeEntry],
    inbound: &[EdgeEntry],
) -> io::Result<()> {
    let indent = INDENT.repeat(depth);
    for (tag, edges) in [("outbound", outbound), ("inbound", inbound)] {
        for edge in edges {
            writeln!(
                writer,
                "{}<{} type=\"{}\" confirmed=\"{}\">{}</{}>",
                indent,
                tag,
                edge.kind,
                yes_no(edge.confirmed),
                escape(&edge.name),
                tag
            )?;
        }
    }
    Ok(())
}

impl Exporter for XmlExporter {
    fn export<W: Write>(&self, document: &GraphDocument, writer: &mut W) -> io::Result<()> {
        write_header(writer)?;
        writeln!(writer, "<dependencies>")?;

        for package in &document.packages {
            write_open(writer, 1, "package", &package.name, package.confirmed)?;
            write_edges(writer, 2, &package.outbound, &package.inbound)?;

            for class in &package.classes {
                write_open(writer, 2, "class", &class.name, class.confirmed)?;
                for parent in &class.parents {
                    writeln!(writer, "{}<parent>{}</parent>", INDENT.repeat(3), escape(parent))?;
                }
                write_edges(writer, 3, &class.outbound, &class.inbound)?;

                for feature in &class.features {
                    write_open(writer, 3, "feature", &feature.name, feature.confirmed)?;
                    write_edges(writer, 4, &feature.outbound, &feature.inbound)?;
                    writeln!(writer, "{}</feature>", INDENT.repeat(3))?;
                }

                writeln!(writer, "{}</class>", INDENT.repeat(2))?;
            }

            writeln!(writer, "{}</package>", INDENT)?;
        }

        writeln!(writer, "</dependencies>")
    }
}
