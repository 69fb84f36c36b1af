//! Reading diagrams back out of host SVG documents.

use log::{debug, trace};
use roxmltree::{Document, ParsingOptions};

use mxembed_codec::detokenize;

use crate::{
    error::MxEmbedError,
    wrapper::{self, DiagramMetadata, DiagramPayload},
};

/// A diagram recovered from a host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDiagram {
    pub metadata: DiagramMetadata,
    pub xml: String,
}

/// Extract and decode every diagram embedded in `svg`.
///
/// The XML parser resolves the attribute escaping of the `content`
/// attribute, so the wrapper is parsed from the attribute's value as-is.
/// Compressed payloads are detokenized; inline `<mxGraphModel>` payloads are
/// returned unchanged.
///
/// # Errors
///
/// Returns [`MxEmbedError::Xml`] when the host or the wrapper is not
/// well-formed, [`MxEmbedError::Host`] when the root has no `content`
/// attribute or the wrapper has no diagrams, and [`MxEmbedError::Token`] when
/// a payload fails to decode.
pub fn extract_diagrams(svg: &str) -> Result<Vec<ExtractedDiagram>, MxEmbedError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    let document = Document::parse_with_options(svg, options)
        .map_err(|err| MxEmbedError::new_xml_error(err, svg))?;
    let root = document.root_element();

    let content = root.attribute("content").ok_or_else(|| {
        MxEmbedError::Host(format!(
            "<{}> root element has no content attribute",
            root.tag_name().name()
        ))
    })?;
    trace!(content_len = content.len(); "Found wrapper content");

    let parsed = wrapper::parse_wrapper(content)?;
    debug!(
        host = parsed.host.host(),
        diagrams = parsed.diagrams.len();
        "Parsed wrapper"
    );

    parsed
        .diagrams
        .into_iter()
        .map(|diagram| {
            let xml = match diagram.payload {
                DiagramPayload::Token(token) => {
                    detokenize(&token).map_err(|err| MxEmbedError::Token {
                        id: diagram.metadata.id().to_string(),
                        err,
                    })?
                }
                DiagramPayload::Inline(xml) => xml,
            };
            Ok(ExtractedDiagram {
                metadata: diagram.metadata,
                xml,
            })
        })
        .collect()
}
