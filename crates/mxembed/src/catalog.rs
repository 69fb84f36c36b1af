//! Fixture catalogs.
//!
//! A [`Catalog`] lists the host documents to generate. Each [`FixtureSpec`]
//! names its output path, the SVG canvas size and body, and one or more
//! diagram pages. Catalogs come from [`Catalog::builtin`] or are deserialized
//! from TOML:
//!
//! ```toml
//! [[fixture]]
//! path = "simple-rect.drawio.svg"
//! width = 102
//! height = 52
//! body = '<rect width="100" height="50"/>'
//!
//! [[fixture.diagram]]
//! name = "Simple Rectangle"
//! id = "simple-rect"
//! xml = "<mxGraphModel>...</mxGraphModel>"
//! ```

mod builtin;

use std::{
    collections::HashSet,
    path::{Component, Path},
};

use serde::Deserialize;

use crate::error::MxEmbedError;

/// One diagram page of a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagramSpec {
    name: String,
    id: String,
    xml: String,
}

impl DiagramSpec {
    pub fn new(name: impl Into<String>, id: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            xml: xml.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The uncompressed `mxGraphModel` XML.
    pub fn xml(&self) -> &str {
        &self.xml
    }
}

/// A host document to generate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixtureSpec {
    /// Output path relative to the fixture directory.
    path: String,
    width: u32,
    height: u32,

    /// SVG markup for the visual body.
    #[serde(default)]
    body: String,

    #[serde(rename = "diagram", default)]
    diagrams: Vec<DiagramSpec>,
}

impl FixtureSpec {
    pub fn new(
        path: impl Into<String>,
        width: u32,
        height: u32,
        body: impl Into<String>,
        diagrams: Vec<DiagramSpec>,
    ) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            body: body.into(),
            diagrams,
        }
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn diagrams(&self) -> &[DiagramSpec] {
        &self.diagrams
    }

    /// Check that this fixture can be generated.
    ///
    /// # Errors
    ///
    /// Returns [`MxEmbedError::Catalog`] when the path is empty, absolute or
    /// leaves the output directory, the canvas has a zero dimension, there
    /// are no diagrams, or two diagrams share an id.
    pub fn validate(&self) -> Result<(), MxEmbedError> {
        let path = self.path();
        let contained = path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if self.path.is_empty() || !contained {
            return Err(MxEmbedError::Catalog(format!(
                "fixture path `{}` must be a relative path inside the output directory",
                self.path
            )));
        }

        if self.width == 0 || self.height == 0 {
            return Err(MxEmbedError::Catalog(format!(
                "fixture `{}` has an empty canvas ({}x{})",
                self.path, self.width, self.height
            )));
        }

        if self.diagrams.is_empty() {
            return Err(MxEmbedError::Catalog(format!(
                "fixture `{}` has no diagrams",
                self.path
            )));
        }

        let mut ids = HashSet::new();
        for diagram in &self.diagrams {
            if !ids.insert(diagram.id.as_str()) {
                return Err(MxEmbedError::Catalog(format!(
                    "fixture `{}` has duplicate diagram id `{}`",
                    self.path, diagram.id
                )));
            }
        }

        Ok(())
    }
}

/// An ordered list of fixtures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(rename = "fixture", default)]
    fixtures: Vec<FixtureSpec>,
}

impl Catalog {
    pub fn new(fixtures: Vec<FixtureSpec>) -> Self {
        Self { fixtures }
    }

    /// The reference fixtures: plain, labelled, connected, special-character,
    /// empty and nested-path diagrams.
    pub fn builtin() -> Self {
        Self::new(builtin::fixtures())
    }

    pub fn fixtures(&self) -> &[FixtureSpec] {
        &self.fixtures
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Validate every fixture and reject duplicate output paths.
    ///
    /// # Errors
    ///
    /// Returns the first [`MxEmbedError::Catalog`] found.
    pub fn validate(&self) -> Result<(), MxEmbedError> {
        let mut paths = HashSet::new();
        for fixture in &self.fixtures {
            fixture.validate()?;
            if !paths.insert(fixture.path()) {
                return Err(MxEmbedError::Catalog(format!(
                    "fixture path `{}` is used more than once",
                    fixture.path
                )));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a FixtureSpec;
    type IntoIter = std::slice::Iter<'a, FixtureSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fixtures.iter()
    }
}
