//! Host SVG document assembly.
//!
//! The host is a plain SVG 1.1 file whose root element carries the escaped
//! `<mxfile>` wrapper in its `content` attribute. draw.io reads the wrapper;
//! every other SVG viewer renders the visual body.

use std::fmt::Write as _;

use crate::wrapper::WrapperDocument;

/// An SVG document embedding a diagram wrapper.
///
/// # Examples
///
/// ```
/// use mxembed::{host::HostDocument, wrapper::{HostAttributes, build_wrapper}};
///
/// let wrapper = build_wrapper(&[], &HostAttributes::default());
/// let svg = HostDocument::new(10, 10, &wrapper)
///     .with_body("    <rect width=\"10\" height=\"10\"/>")
///     .render();
/// assert!(svg.contains(r#"viewBox="0 0 10 10""#));
/// ```
#[derive(Debug, Clone)]
pub struct HostDocument<'a> {
    width: u32,
    height: u32,
    wrapper: &'a WrapperDocument,
    body: &'a str,
    comment: Option<&'a str>,
}

impl<'a> HostDocument<'a> {
    /// Create a host document of `width` x `height` pixels around `wrapper`.
    ///
    /// The wrapper is escaped during [`render`](Self::render); it must not be
    /// escaped beforehand.
    pub fn new(width: u32, height: u32, wrapper: &'a WrapperDocument) -> Self {
        Self {
            width,
            height,
            wrapper,
            body: "",
            comment: None,
        }
    }

    /// Set the SVG markup placed inside the top-level `<g>`, inserted as-is.
    pub fn with_body(mut self, body: &'a str) -> Self {
        self.body = body;
        self
    }

    /// Set the comment written after the XML declaration.
    pub fn with_comment(mut self, comment: Option<&'a str>) -> Self {
        self.comment = comment;
        self
    }

    /// Render the complete SVG text, ending with a newline.
    pub fn render(&self) -> String {
        let mut svg = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        if let Some(comment) = self.comment {
            writeln!(svg, "<!-- {comment} -->").expect("Writing to String buffer is infallible");
        }
        svg.push_str(
            "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
        );
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.1" width="{w}px" height="{h}px" viewBox="0 0 {w} {h}" content="{content}">"#,
            w = self.width,
            h = self.height,
            content = self.wrapper.to_attribute_value(),
        )
        .expect("Writing to String buffer is infallible");
        svg.push_str("  <defs/>\n  <g>\n");
        svg.push_str(self.body);
        svg.push_str("\n  </g>\n</svg>\n");
        svg
    }
}
