use std::{fs, path::Path};

use clap::CommandFactory;
use tempfile::tempdir;

use mxembed::{FixtureBuilder, catalog::Catalog, codec};
use mxembed_cli::{Args, Command, load_catalog, run};

fn args(command: Command) -> Args {
    Args {
        command,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn cli_definition_is_consistent() {
    Args::command().debug_assert();
}

#[test]
fn e2e_generate_builtin_catalog() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("fixtures");

    run(&args(Command::Generate {
        catalog: None,
        output_dir: output_dir.to_string_lossy().to_string(),
    }))
    .expect("Failed to generate fixtures");

    let builder = FixtureBuilder::default();
    let catalog = Catalog::builtin();
    let mut failed = Vec::new();

    for fixture in &catalog {
        let path = output_dir.join(fixture.path());
        let svg = match fs::read_to_string(&path) {
            Ok(svg) => svg,
            Err(err) => {
                failed.push(format!("{}: {err}", path.display()));
                continue;
            }
        };

        match builder.extract(&svg) {
            Ok(diagrams) => {
                let xml: Vec<&str> = diagrams.iter().map(|d| d.xml.as_str()).collect();
                let expected: Vec<&str> = fixture.diagrams().iter().map(|d| d.xml()).collect();
                if xml != expected {
                    failed.push(format!("{}: decoded XML differs", path.display()));
                }
            }
            Err(err) => failed.push(format!("{}: {err}", path.display())),
        }
    }

    assert!(failed.is_empty(), "Fixtures failed:\n{}", failed.join("\n"));
    assert!(output_dir.join("nested/deep/nested-box.drawio.svg").is_file());
}

#[test]
fn e2e_generate_from_toml_catalog() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let catalog_path = temp_dir.path().join("catalog.toml");
    fs::write(
        &catalog_path,
        r#"
[[fixture]]
path = "pages/two.drawio.svg"
width = 20
height = 10
body = '    <rect width="20" height="10"/>'

[[fixture.diagram]]
name = "First"
id = "first"
xml = '<mxGraphModel><root><mxCell id="0"/></root></mxGraphModel>'

[[fixture.diagram]]
name = "Second"
id = "second"
xml = "<mxGraphModel><root><mxCell id=\"0\" value=\"ñ\"/></root></mxGraphModel>"
"#,
    )
    .unwrap();

    let output_dir = temp_dir.path().join("out");
    run(&args(Command::Generate {
        catalog: Some(catalog_path.to_string_lossy().to_string()),
        output_dir: output_dir.to_string_lossy().to_string(),
    }))
    .expect("Failed to generate fixtures");

    let svg = fs::read_to_string(output_dir.join("pages/two.drawio.svg")).unwrap();
    assert!(svg.contains(r#"    <rect width="20" height="10"/>"#));

    let diagrams = FixtureBuilder::default().extract(&svg).unwrap();
    assert_eq!(diagrams.len(), 2);
    assert_eq!(diagrams[1].metadata.id(), "second");
    assert_eq!(
        diagrams[1].xml,
        r#"<mxGraphModel><root><mxCell id="0" value="ñ"/></root></mxGraphModel>"#
    );
}

#[test]
fn e2e_invalid_catalog_is_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let catalog_path = temp_dir.path().join("catalog.toml");
    fs::write(
        &catalog_path,
        r#"
[[fixture]]
path = "../outside.drawio.svg"
width = 10
height = 10

[[fixture.diagram]]
name = "A"
id = "a"
xml = "<mxGraphModel/>"
"#,
    )
    .unwrap();

    let err = load_catalog(Some(&catalog_path)).unwrap_err();
    assert!(err.to_string().starts_with("Catalog error:"), "{err}");

    fs::write(&catalog_path, "[[fixture]]\npath = 3\n").unwrap();
    let err = load_catalog(Some(&catalog_path)).unwrap_err();
    assert!(err.to_string().starts_with("Catalog error:"), "{err}");
}

#[test]
fn e2e_encode_then_decode() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let xml = "<mxGraphModel><root><mxCell id=\"0\" value=\"日本語 &amp; co\"/></root></mxGraphModel>";
    let input = temp_dir.path().join("diagram.xml");
    let token_path = temp_dir.path().join("diagram.token");
    fs::write(&input, xml).unwrap();

    run(&args(Command::Encode {
        input: input.to_string_lossy().to_string(),
        output: Some(token_path.to_string_lossy().to_string()),
    }))
    .expect("Failed to encode");

    let token = fs::read_to_string(&token_path).unwrap();
    assert_eq!(codec::detokenize(token.trim()).unwrap(), xml);

    let output_dir = temp_dir.path().join("fixtures");
    run(&args(Command::Generate {
        catalog: None,
        output_dir: output_dir.to_string_lossy().to_string(),
    }))
    .unwrap();

    let decoded_path = temp_dir.path().join("decoded.xml");
    run(&args(Command::Decode {
        input: output_dir
            .join("with-text.drawio.svg")
            .to_string_lossy()
            .to_string(),
        output: Some(decoded_path.to_string_lossy().to_string()),
    }))
    .expect("Failed to decode");

    let decoded = fs::read_to_string(&decoded_path).unwrap();
    assert!(decoded.contains(r#"value="Hello World""#));
    assert!(decoded.ends_with("</mxGraphModel>\n"));
}

#[test]
fn e2e_encode_uses_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let xml = "<mxGraphModel><root/></mxGraphModel>";
    let input = temp_dir.path().join("diagram.xml");
    let token_path = temp_dir.path().join("diagram.token");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&input, xml).unwrap();
    fs::write(
        &config_path,
        "[codec]\ncompression_level = 0\nverify_round_trip = true\n",
    )
    .unwrap();

    let mut encode = args(Command::Encode {
        input: input.to_string_lossy().to_string(),
        output: Some(token_path.to_string_lossy().to_string()),
    });
    encode.config = Some(config_path.to_string_lossy().to_string());
    run(&encode).expect("Failed to encode");

    let stored = codec::tokenize_with_level(xml, 0);
    assert_eq!(fs::read_to_string(&token_path).unwrap(), format!("{stored}\n"));

    fs::write(&config_path, "[codec]\ncompression_level = 12\n").unwrap();
    assert!(run(&encode).is_err());
}

#[test]
fn e2e_decode_missing_file_fails() {
    let result = run(&args(Command::Decode {
        input: Path::new("does/not/exist.drawio.svg")
            .to_string_lossy()
            .to_string(),
        output: None,
    }));
    assert!(result.is_err());
}

#[test]
fn e2e_decode_plain_svg_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("plain.svg");
    fs::write(&input, r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#).unwrap();

    let result = run(&args(Command::Decode {
        input: input.to_string_lossy().to_string(),
        output: None,
    }));
    assert!(result.is_err());
}
