//! Plain text export implementation.
//!
//! Containers print their contents indented by four spaces under them, by
//! simple name. Edges print one level deeper than their node as
//! `<-- peer` (inbound) or `--> peer` (outbound), with the peer's full name.
//! Names of unconfirmed nodes carry a trailing ` *`.

use super::{EdgeEntry, Exporter, GraphDocument};
use crate::graph::names::split_qualified;
use std::io::{self, Write};

/// Text exporter implementation.
pub struct TextExporter;

const INDENT: &str = "    ";

fn marker(confirmed: bool) -> &'static str {
    if confirmed {
        ""
    } else {
        " *"
    }
}

fn write_node<W: Write>(writer: &mut W, depth: usize, name: &str, confirmed: bool) -> io::Result<()> {
    writeln!(writer, "{}{}{}", INDENT.repeat(depth), name, marker(confirmed))
}

fn write_edges<W: Write>(
    writer: &mut W,
    depth: usize,
    inbound: &[EdgeEntry],
    outbound: &[EdgeEntry],
) -> io::Result<()> {
    let indent = INDENT.repeat(depth);
    for edge in inbound {
        writeln!(writer, "{}<-- {}{}", indent, edge.name, marker(edge.confirmed))?;
    }
    for edge in outbound {
        writeln!(writer, "{}--> {}{}", indent, edge.name, marker(edge.confirmed))?;
    }
    Ok(())
}

impl Exporter for TextExporter {
    fn export<W: Write>(&self, document: &GraphDocument, writer: &mut W) -> io::Result<()> {
        for package in &document.packages {
            write_node(writer, 0, &package.name, package.confirmed)?;
            write_edges(writer, 1, &package.inbound, &package.outbound)?;

            for class in &package.classes {
                write_node(writer, 1, split_qualified(&class.name).1, class.confirmed)?;
                write_edges(writer, 2, &class.inbound, &class.outbound)?;

                for feature in &class.features {
                    write_node(writer, 2, split_qualified(&feature.name).1, feature.confirmed)?;
                    write_edges(writer, 3, &feature.inbound, &feature.outbound)?;
                }
            }
        }
        Ok(())
    }
}
