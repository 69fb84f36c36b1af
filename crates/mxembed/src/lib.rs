//! mxembed - embed compressed draw.io diagrams in SVG files.
//!
//! A `.drawio.svg` file is an ordinary SVG whose root element carries the
//! draw.io source in a `content` attribute: an `<mxfile>` wrapper holding one
//! compressed token per diagram page. This crate builds such files from
//! diagram XML and reads the diagrams back out of them.

pub mod catalog;
pub mod config;
pub mod extract;
pub mod host;
pub mod wrapper;

mod error;

pub use mxembed_codec as codec;

pub use error::MxEmbedError;

use log::{debug, info, trace};

use mxembed_codec::{DiagramToken, tokenize_with_level, verify_round_trip};

use catalog::{DiagramSpec, FixtureSpec};
use config::AppConfig;
use extract::ExtractedDiagram;
use host::HostDocument;
use wrapper::{DiagramEntry, DiagramMetadata, WrapperDocument};

/// Builder for generating and reading `.drawio.svg` fixtures.
///
/// # Examples
///
/// ```rust
/// use mxembed::{FixtureBuilder, catalog::{DiagramSpec, FixtureSpec}, config::AppConfig};
///
/// let fixture = FixtureSpec::new(
///     "box.drawio.svg",
///     100,
///     50,
///     "    <rect width=\"100\" height=\"50\"/>",
///     vec![DiagramSpec::new("Box", "box", "<mxGraphModel/>")],
/// );
///
/// let builder = FixtureBuilder::new(AppConfig::default());
/// let svg = builder.render(&fixture).expect("Failed to render");
///
/// let diagrams = builder.extract(&svg).expect("Failed to extract");
/// assert_eq!(diagrams[0].xml, "<mxGraphModel/>");
/// ```
#[derive(Default)]
pub struct FixtureBuilder {
    config: AppConfig,
}

impl FixtureBuilder {
    /// Create a new fixture builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compress a single diagram into a token.
    ///
    /// # Errors
    ///
    /// See [`tokenize_xml`](Self::tokenize_xml).
    pub fn tokenize(&self, diagram: &DiagramSpec) -> Result<DiagramToken, MxEmbedError> {
        self.tokenize_xml(diagram.id(), diagram.xml())
    }

    /// Compress raw diagram XML into a token.
    ///
    /// When `codec.verify_round_trip` is enabled, the token is decoded again
    /// and compared with `xml`. `id` names the diagram in errors and logs.
    ///
    /// # Errors
    ///
    /// Returns [`MxEmbedError::Config`] for an invalid compression level and
    /// [`MxEmbedError::RoundTrip`] if verification fails.
    pub fn tokenize_xml(&self, id: &str, xml: &str) -> Result<DiagramToken, MxEmbedError> {
        let level = self
            .config
            .codec()
            .compression_level()
            .map_err(MxEmbedError::Config)?;

        let token = tokenize_with_level(xml, level);
        if self.config.codec().verify_round_trip() {
            verify_round_trip(xml, &token).map_err(|err| MxEmbedError::RoundTrip {
                id: id.to_string(),
                err,
            })?;
            trace!(id; "Verified token round trip");
        }

        Ok(token)
    }

    /// Tokenize `diagrams` and build their `<mxfile>` wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`MxEmbedError::Catalog`] when `diagrams` is empty, and the
    /// errors of [`tokenize`](Self::tokenize).
    pub fn wrap(&self, diagrams: &[DiagramSpec]) -> Result<WrapperDocument, MxEmbedError> {
        if diagrams.is_empty() {
            return Err(MxEmbedError::Catalog(
                "a wrapper needs at least one diagram".to_string(),
            ));
        }

        let entries = diagrams
            .iter()
            .map(|diagram| {
                let token = self.tokenize(diagram)?;
                debug!(id = diagram.id(), token_len = token.len(); "Encoded diagram");
                Ok(DiagramEntry::new(
                    DiagramMetadata::new(diagram.name(), diagram.id()),
                    token,
                ))
            })
            .collect::<Result<Vec<_>, MxEmbedError>>()?;

        Ok(wrapper::build_wrapper(&entries, self.config.host()))
    }

    /// Render the complete host SVG for `fixture`.
    ///
    /// # Errors
    ///
    /// Returns [`MxEmbedError::Catalog`] for an invalid fixture,
    /// [`MxEmbedError::Config`] for invalid output settings, and the errors
    /// of [`wrap`](Self::wrap).
    pub fn render(&self, fixture: &FixtureSpec) -> Result<String, MxEmbedError> {
        info!(path = fixture.path().display().to_string(); "Rendering fixture");
        fixture.validate()?;

        let comment = self.config.output().comment().map_err(MxEmbedError::Config)?;
        let wrapper = self.wrap(fixture.diagrams())?;

        let svg = HostDocument::new(fixture.width(), fixture.height(), &wrapper)
            .with_body(fixture.body())
            .with_comment(comment)
            .render();

        debug!(svg_len = svg.len(); "Fixture rendered");
        Ok(svg)
    }

    /// Extract and decode the diagrams embedded in a host SVG.
    ///
    /// # Errors
    ///
    /// See [`extract::extract_diagrams`].
    pub fn extract(&self, svg: &str) -> Result<Vec<ExtractedDiagram>, MxEmbedError> {
        extract::extract_diagrams(svg)
    }
}
