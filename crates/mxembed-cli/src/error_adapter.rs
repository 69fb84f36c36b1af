//! Error adapter for converting MxEmbedError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! XML syntax errors carry the text that failed to parse, so they are
//! rendered with a labeled source snippet at the parser's position.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use mxembed::MxEmbedError;

/// Adapter for an XML syntax error with its source text.
pub struct XmlDiagnostic<'a> {
    message: String,
    span: SourceSpan,
    src: &'a str,
}

impl<'a> XmlDiagnostic<'a> {
    /// Create a diagnostic for an error at 1-based `row` and `col` of `src`.
    pub fn new(message: impl Into<String>, src: &'a str, row: u32, col: u32) -> Self {
        Self {
            message: message.into(),
            span: position_to_span(src, row, col),
            src,
        }
    }

    /// The byte span the diagnostic points at.
    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

impl fmt::Debug for XmlDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlDiagnostic")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for XmlDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for XmlDiagnostic<'_> {}

impl MietteDiagnostic for XmlDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("mxembed::xml"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), self.span),
        )))
    }
}

/// Adapter for non-XML [`MxEmbedError`] variants.
pub struct ErrorAdapter<'a>(pub &'a MxEmbedError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MxEmbedError::Io(_) => "mxembed::io",
            MxEmbedError::Token { .. } => "mxembed::token",
            MxEmbedError::RoundTrip { .. } => "mxembed::round_trip",
            MxEmbedError::Xml { .. } => "mxembed::xml",
            MxEmbedError::Host(_) => "mxembed::host",
            MxEmbedError::Catalog(_) => "mxembed::catalog",
            MxEmbedError::Config(_) => "mxembed::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            MxEmbedError::Token { .. } => {
                "diagram payloads are base64 of raw-deflated, percent-encoded XML"
            }
            MxEmbedError::Host(_) => {
                "the root element must carry the escaped <mxfile> wrapper in its `content` attribute"
            }
            MxEmbedError::Config(_) => "check the values in the TOML configuration file",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An XML error with source location information.
    Xml(XmlDiagnostic<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Xml(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Xml(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Xml(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Xml(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Xml(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Xml(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a 1-based row and character column into a one-character span.
fn position_to_span(src: &str, row: u32, col: u32) -> SourceSpan {
    let mut offset = 0;
    for (index, line) in src.split_inclusive('\n').enumerate() {
        if index + 1 == row as usize {
            let column = col.saturating_sub(1) as usize;
            let (start, len) = line
                .char_indices()
                .nth(column)
                .map_or((line.len(), 0), |(i, c)| (i, c.len_utf8()));
            return SourceSpan::new((offset + start).into(), len);
        }
        offset += line.len();
    }
    SourceSpan::new(src.len().into(), 0)
}

/// Convert an [`MxEmbedError`] into a list of reportable errors.
pub fn to_reportables(err: &MxEmbedError) -> Vec<Reportable<'_>> {
    match err {
        MxEmbedError::Xml { err: xml_err, src } => {
            let pos = xml_err.pos();
            vec![Reportable::Xml(XmlDiagnostic::new(
                xml_err.to_string(),
                src,
                pos.row,
                pos.col,
            ))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
