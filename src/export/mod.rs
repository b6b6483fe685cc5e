//! Reports over a dependency graph.
//!
//! A traversal records what it sees into a [`GraphDocument`], which the
//! exporters render as XML, JSON or plain text. Cycle lists have their own
//! renderer, [`export_cycles`].

mod cycles;
mod document;
pub mod json;
pub mod text;
pub mod xml;

pub use cycles::export_cycles;
pub use document::{
    ClassEntry, DocumentBuilder, EdgeEntry, FeatureEntry, GraphDocument, PackageEntry, ReportOptions,
};

use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// XML format - the `<dependencies>` document
    Xml,
    /// JSON format - machine-readable, loadable again
    Json,
    /// Text format - indented listing for reading
    #[default]
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(ExportFormat::Xml),
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: xml, json, text",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Xml => write!(f, "xml"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the document to the given writer.
    fn export<W: Write>(&self, document: &GraphDocument, writer: &mut W) -> io::Result<()>;
}

/// Export a document in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    document: &GraphDocument,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Xml => xml::XmlExporter.export(document, writer),
        ExportFormat::Json => json::JsonExporter.export(document, writer),
        ExportFormat::Text => text::TextExporter.export(document, writer),
    }
}

/// Export a document to a string.
pub fn export_to_string(format: ExportFormat, document: &GraphDocument) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, document, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
