//! Integration tests for the FixtureBuilder API
//!
//! These tests verify that the public API works and is usable.

use mxembed::{
    FixtureBuilder, MxEmbedError,
    catalog::{Catalog, DiagramSpec, FixtureSpec},
    config::{AppConfig, CodecConfig, HostAttributes, OutputConfig},
    wrapper::DiagramMetadata,
};

fn single_fixture(name: &str, id: &str, xml: &str) -> FixtureSpec {
    FixtureSpec::new(
        "test.drawio.svg",
        102,
        52,
        "    <rect x=\"0\" y=\"0\" width=\"100\" height=\"50\"/>",
        vec![DiagramSpec::new(name, id, xml)],
    )
}

#[test]
fn test_builder_api_exists() {
    let _builder = FixtureBuilder::default();
}

#[test]
fn test_render_simple_fixture() {
    let builder = FixtureBuilder::default();
    let svg = builder
        .render(&single_fixture("Simple", "simple", "<mxGraphModel/>"))
        .expect("Failed to render fixture");

    assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(svg.contains("<!-- Test fixture - regenerated with valid compression -->"));
    assert!(svg.contains(r#"width="102px" height="52px" viewBox="0 0 102 52""#));
    assert!(svg.contains("content=\"&lt;mxfile host=&quot;Electron&quot; agent=&quot;test-fixture&quot; version=&quot;1.0&quot;&gt;&lt;diagram name=&quot;Simple&quot; id=&quot;simple&quot;&gt;"));
    assert!(svg.ends_with("</svg>\n"));
}

#[test]
fn test_render_then_extract_builtin_catalog() {
    let builder = FixtureBuilder::default();
    let catalog = Catalog::builtin();

    for fixture in &catalog {
        let svg = builder.render(fixture).expect("Failed to render fixture");
        let diagrams = builder.extract(&svg).expect("Failed to extract fixture");

        assert_eq!(diagrams.len(), fixture.diagrams().len());
        for (extracted, expected) in diagrams.iter().zip(fixture.diagrams()) {
            assert_eq!(
                extracted.metadata,
                DiagramMetadata::new(expected.name(), expected.id())
            );
            assert_eq!(extracted.xml, expected.xml());
        }
    }
}

#[test]
fn test_special_metadata_is_escaped_once() {
    let builder = FixtureBuilder::default();
    let svg = builder
        .render(&single_fixture("<test> & \"quotes\"", "special", "<a/>"))
        .expect("Failed to render fixture");

    assert!(svg.contains("&lt;test&gt; &amp; &quot;quotes&quot;"));
    assert!(!svg.contains("&amp;amp;"));

    // The attribute value reads back as the raw wrapper text.
    let mut options = roxmltree::ParsingOptions::default();
    options.allow_dtd = true;
    let document = roxmltree::Document::parse_with_options(&svg, options).unwrap();
    let content = document.root_element().attribute("content").unwrap();
    assert!(content.contains(r#"<diagram name="<test> & "quotes"" id="special">"#));
}

#[test]
fn test_multi_page_fixture() {
    let fixture = FixtureSpec::new(
        "pages.drawio.svg",
        10,
        10,
        "",
        vec![
            DiagramSpec::new("Page-1", "p1", "<mxGraphModel><root/></mxGraphModel>"),
            DiagramSpec::new("Page-2", "p2", "<mxGraphModel>ñ</mxGraphModel>"),
        ],
    );

    let builder = FixtureBuilder::default();
    let svg = builder.render(&fixture).unwrap();
    let diagrams = builder.extract(&svg).unwrap();

    let xml: Vec<&str> = diagrams.iter().map(|d| d.xml.as_str()).collect();
    assert_eq!(
        xml,
        [
            "<mxGraphModel><root/></mxGraphModel>",
            "<mxGraphModel>ñ</mxGraphModel>"
        ]
    );
}

#[test]
fn test_custom_config() {
    let config = AppConfig::new(
        HostAttributes::new("mxembed", "integration", "2.0"),
        CodecConfig::new(1, false),
        OutputConfig::new(""),
    );
    let builder = FixtureBuilder::new(config);
    let svg = builder
        .render(&single_fixture("A", "a", "<mxGraphModel/>"))
        .unwrap();

    assert!(!svg.contains("<!--"));
    assert!(svg.contains("host=&quot;mxembed&quot; agent=&quot;integration&quot; version=&quot;2.0&quot;"));
    assert_eq!(builder.extract(&svg).unwrap()[0].xml, "<mxGraphModel/>");
}

#[test]
fn test_invalid_compression_level() {
    let config = AppConfig::new(
        HostAttributes::default(),
        CodecConfig::new(12, true),
        OutputConfig::default(),
    );
    let builder = FixtureBuilder::new(config);
    let err = builder
        .render(&single_fixture("A", "a", "<a/>"))
        .unwrap_err();
    assert!(matches!(err, MxEmbedError::Config(_)));
}

#[test]
fn test_tokenize_xml_uses_codec_settings() {
    let xml = "<mxGraphModel><root><mxCell id=\"0\"/></root></mxGraphModel>";
    let token = FixtureBuilder::default()
        .tokenize_xml("input.xml", xml)
        .expect("Failed to tokenize");
    assert_eq!(mxembed::codec::detokenize(token.as_str()).unwrap(), xml);

    let config = AppConfig::new(
        HostAttributes::default(),
        CodecConfig::new(12, true),
        OutputConfig::default(),
    );
    let err = FixtureBuilder::new(config)
        .tokenize_xml("input.xml", xml)
        .unwrap_err();
    assert!(matches!(err, MxEmbedError::Config(_)));
}

#[test]
fn test_wrap_requires_diagrams() {
    let err = FixtureBuilder::default().wrap(&[]).unwrap_err();
    assert!(matches!(err, MxEmbedError::Catalog(_)));
}

#[test]
fn test_invalid_fixture_is_rejected_before_rendering() {
    let fixture = FixtureSpec::new("../escape.svg", 10, 10, "", vec![DiagramSpec::new("A", "a", "")]);
    let err = FixtureBuilder::default().render(&fixture).unwrap_err();
    assert!(matches!(err, MxEmbedError::Catalog(_)));
}

#[test]
fn test_extract_rejects_plain_svg() {
    let err = FixtureBuilder::default()
        .extract(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#)
        .unwrap_err();
    assert!(matches!(err, MxEmbedError::Host(_)));
}
