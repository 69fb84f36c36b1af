//! The `<mxfile>` wrapper that carries diagram tokens.
//!
//! A wrapper holds one `<diagram>` element per page:
//!
//! ```text
//! <mxfile host="Electron" agent="test-fixture" version="1.0"><diagram name="Page" id="p1">TOKEN</diagram></mxfile>
//! ```
//!
//! [`build_wrapper`] serializes it and [`escape_for_attribute`] prepares the
//! text for embedding as an attribute value of the host SVG. The two steps
//! are kept apart: escaping runs exactly once, on the finished wrapper.

use std::fmt::Write as _;

use serde::Deserialize;

use mxembed_codec::DiagramToken;

use crate::error::MxEmbedError;

/// Attributes written on the `<mxfile>` element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostAttributes {
    host: String,
    agent: String,
    version: String,
}

impl HostAttributes {
    /// Creates host attributes from their three values.
    pub fn new(
        host: impl Into<String>,
        agent: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            agent: agent.into(),
            version: version.into(),
        }
    }

    /// The application that wrote the file.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The agent string of the writer.
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// The file format version.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Default for HostAttributes {
    fn default() -> Self {
        Self::new("Electron", "test-fixture", "1.0")
    }
}

/// Page name and id of a diagram.
///
/// Neither value is validated here; callers that need unique ids enforce it
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramMetadata {
    name: String,
    id: String,
}

impl DiagramMetadata {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// One page of a wrapper: its metadata and compressed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEntry {
    metadata: DiagramMetadata,
    token: DiagramToken,
}

impl DiagramEntry {
    pub fn new(metadata: DiagramMetadata, token: DiagramToken) -> Self {
        Self { metadata, token }
    }

    pub fn metadata(&self) -> &DiagramMetadata {
        &self.metadata
    }

    pub fn token(&self) -> &DiagramToken {
        &self.token
    }
}

/// Serialized `<mxfile>` text, not yet escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperDocument(String);

impl WrapperDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The wrapper escaped for use as an attribute value.
    pub fn to_attribute_value(&self) -> String {
        escape_for_attribute(&self.0)
    }
}

/// Serialize `entries` into an `<mxfile>` wrapper.
///
/// Metadata and tokens are inserted verbatim. Metadata containing markup
/// characters produces a wrapper that is only readable after the
/// attribute-level escaping of [`escape_for_attribute`] is undone.
///
/// # Examples
///
/// ```
/// use mxembed::wrapper::{DiagramEntry, DiagramMetadata, HostAttributes, build_wrapper};
///
/// let entry = DiagramEntry::new(
///     DiagramMetadata::new("Page-1", "p1"),
///     mxembed_codec::tokenize("<mxGraphModel/>"),
/// );
/// let wrapper = build_wrapper(&[entry], &HostAttributes::default());
/// assert!(wrapper.as_str().starts_with(r#"<mxfile host="Electron" agent="test-fixture" version="1.0"><diagram name="Page-1" id="p1">"#));
/// ```
pub fn build_wrapper(entries: &[DiagramEntry], host: &HostAttributes) -> WrapperDocument {
    let mut text = String::new();
    write!(
        text,
        r#"<mxfile host="{}" agent="{}" version="{}">"#,
        host.host, host.agent, host.version
    )
    .expect("Writing to String buffer is infallible");

    for entry in entries {
        write!(
            text,
            r#"<diagram name="{}" id="{}">{}</diagram>"#,
            entry.metadata.name, entry.metadata.id, entry.token
        )
        .expect("Writing to String buffer is infallible");
    }

    text.push_str("</mxfile>");
    WrapperDocument(text)
}

/// Escape `& < > " '` so `text` can sit inside a double- or single-quoted
/// XML attribute.
///
/// The input must be raw text. Already-escaped input is escaped a second
/// time (`&amp;` becomes `&amp;amp;`).
///
/// # Examples
///
/// ```
/// use mxembed::wrapper::escape_for_attribute;
///
/// assert_eq!(escape_for_attribute(r#"<a b="c">&</a>"#), "&lt;a b=&quot;c&quot;&gt;&amp;&lt;/a&gt;");
/// ```
pub fn escape_for_attribute(text: &str) -> String {
    // `&` first: the later replacements introduce ampersands of their own.
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Content of a `<diagram>` element read back from a wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramPayload {
    /// Compressed token text.
    Token(String),
    /// An uncompressed `<mxGraphModel>` element, as written in the source.
    Inline(String),
}

/// A `<diagram>` element read back from a wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedDiagram {
    pub metadata: DiagramMetadata,
    pub payload: DiagramPayload,
}

/// A parsed `<mxfile>` wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWrapper {
    pub host: HostAttributes,
    pub diagrams: Vec<WrappedDiagram>,
}

/// Parse `<mxfile>` text back into host attributes and diagram payloads.
///
/// Missing attributes read as empty strings.
///
/// # Errors
///
/// Returns [`MxEmbedError::Xml`] for malformed XML and [`MxEmbedError::Host`]
/// when the root is not `<mxfile>`, there are no diagrams, or a diagram has
/// no content.
pub fn parse_wrapper(text: &str) -> Result<ParsedWrapper, MxEmbedError> {
    let document =
        roxmltree::Document::parse(text).map_err(|err| MxEmbedError::new_xml_error(err, text))?;

    let root = document.root_element();
    if !root.has_tag_name("mxfile") {
        return Err(MxEmbedError::Host(format!(
            "expected <mxfile> wrapper, found <{}>",
            root.tag_name().name()
        )));
    }

    let host = HostAttributes::new(
        attribute(root, "host"),
        attribute(root, "agent"),
        attribute(root, "version"),
    );

    let mut diagrams = Vec::new();
    for node in root.children().filter(|n| n.has_tag_name("diagram")) {
        let metadata = DiagramMetadata::new(attribute(node, "name"), attribute(node, "id"));

        let payload = if let Some(model) = node.children().find(|n| n.is_element()) {
            DiagramPayload::Inline(text[model.range()].to_string())
        } else {
            let token: String = node
                .children()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect();
            let token = token.trim();
            if token.is_empty() {
                return Err(MxEmbedError::Host(format!(
                    "diagram `{}` has no content",
                    metadata.id
                )));
            }
            DiagramPayload::Token(token.to_string())
        };

        diagrams.push(WrappedDiagram { metadata, payload });
    }

    if diagrams.is_empty() {
        return Err(MxEmbedError::Host("<mxfile> contains no diagrams".to_string()));
    }

    Ok(ParsedWrapper { host, diagrams })
}

fn attribute(node: roxmltree::Node<'_, '_>, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}
