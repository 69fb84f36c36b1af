//! The built-in reference fixtures.

use super::{DiagramSpec, FixtureSpec};

const MODEL_HEADER: &str = r#"<mxGraphModel dx="0" dy="0" grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" pageWidth="850" pageHeight="1100">
  <root>
    <mxCell id="0"/>
    <mxCell id="1" parent="0"/>
"#;

const MODEL_FOOTER: &str = "  </root>\n</mxGraphModel>";

/// Wrap `cells` in the page model shared by every fixture, after the two
/// default root cells.
fn graph_model(cells: &str) -> String {
    format!("{MODEL_HEADER}{cells}{MODEL_FOOTER}")
}

fn single_page(
    path: &str,
    (width, height): (u32, u32),
    (name, id): (&str, &str),
    cells: &str,
    body: &str,
) -> FixtureSpec {
    FixtureSpec::new(
        path,
        width,
        height,
        body,
        vec![DiagramSpec::new(name, id, graph_model(cells))],
    )
}

pub(super) fn fixtures() -> Vec<FixtureSpec> {
    vec![
        single_page(
            "simple-rect.drawio.svg",
            (102, 52),
            ("Simple Rectangle", "simple-rect"),
            r##"    <mxCell id="2" value="" style="rounded=0;whiteSpace=wrap;html=1;fillColor=#ffffff;strokeColor=#000000;" parent="1" vertex="1">
      <mxGeometry width="100" height="50" as="geometry"/>
    </mxCell>
"##,
            r##"    <rect x="0" y="0" width="100" height="50" fill="#ffffff" stroke="#000000" pointer-events="all"/>"##,
        ),
        single_page(
            "with-text.drawio.svg",
            (102, 52),
            ("With Text", "with-text"),
            r##"    <mxCell id="2" value="Hello World" style="rounded=1;whiteSpace=wrap;html=1;fillColor=#ffffff;strokeColor=#000000;" parent="1" vertex="1">
      <mxGeometry width="100" height="50" as="geometry"/>
    </mxCell>
"##,
            r##"    <rect x="0" y="0" width="100" height="50" rx="7.5" ry="7.5" fill="#ffffff" stroke="#000000" pointer-events="all"/>
    <g><text x="50" y="30" text-anchor="middle" font-family="Helvetica" font-size="12px">Hello World</text></g>"##,
        ),
        single_page(
            "two-boxes-arrow.drawio.svg",
            (262, 52),
            ("Two Boxes Arrow", "two-boxes"),
            r##"    <mxCell id="2" value="Box A" style="rounded=0;whiteSpace=wrap;html=1;" parent="1" vertex="1">
      <mxGeometry width="80" height="50" as="geometry"/>
    </mxCell>
    <mxCell id="3" value="Box B" style="rounded=0;whiteSpace=wrap;html=1;" parent="1" vertex="1">
      <mxGeometry x="180" width="80" height="50" as="geometry"/>
    </mxCell>
    <mxCell id="4" style="edgeStyle=orthogonalEdgeStyle;rounded=0;orthogonalLoop=1;jettySize=auto;html=1;" parent="1" source="2" target="3" edge="1">
      <mxGeometry relative="1" as="geometry"/>
    </mxCell>
"##,
            r##"    <rect x="0" y="0" width="80" height="50" fill="#ffffff" stroke="#000000"/>
    <rect x="180" y="0" width="80" height="50" fill="#ffffff" stroke="#000000"/>
    <path d="M 80 25 L 180 25" fill="none" stroke="#000000" stroke-miterlimit="10" pointer-events="stroke"/>"##,
        ),
        single_page(
            "special-chars.drawio.svg",
            (122, 52),
            ("Special Characters", "special-chars"),
            r##"    <mxCell id="2" value="&lt;test&gt; &amp; &quot;quotes&quot; ñ 日本語" style="rounded=0;whiteSpace=wrap;html=1;" parent="1" vertex="1">
      <mxGeometry width="120" height="50" as="geometry"/>
    </mxCell>
"##,
            r##"    <rect x="0" y="0" width="120" height="50" fill="#ffffff" stroke="#000000"/>
    <g><text x="60" y="30" text-anchor="middle" font-family="Helvetica" font-size="12px">&lt;test&gt; &amp; "quotes" ñ 日本語</text></g>"##,
        ),
        single_page(
            "empty-diagram.drawio.svg",
            (10, 10),
            ("Empty", "empty"),
            "",
            "    <!-- Empty diagram -->",
        ),
        single_page(
            "nested/deep/nested-box.drawio.svg",
            (102, 52),
            ("Nested Box", "nested"),
            r##"    <mxCell id="2" value="Nested" style="rounded=0;whiteSpace=wrap;html=1;" parent="1" vertex="1">
      <mxGeometry width="100" height="50" as="geometry"/>
    </mxCell>
"##,
            r##"    <rect x="0" y="0" width="100" height="50" fill="#ffffff" stroke="#000000"/>
    <g><text x="50" y="30" text-anchor="middle" font-family="Helvetica" font-size="12px">Nested</text></g>"##,
        ),
    ]
}
