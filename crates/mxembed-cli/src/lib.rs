//! CLI logic for the mxembed fixture tool.
//!
//! This module contains the core CLI logic: loading configuration and
//! catalogs, dispatching the [`Command`], and all file I/O.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{fs, path::Path};

use log::{debug, info, warn};

use mxembed::{FixtureBuilder, MxEmbedError, catalog::Catalog};

/// Run the mxembed CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `MxEmbedError` for:
/// - File I/O errors
/// - Configuration or catalog loading errors
/// - Encoding errors while generating fixtures
/// - Malformed host documents or tokens while decoding
pub fn run(args: &Args) -> Result<(), MxEmbedError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = FixtureBuilder::new(app_config);

    match &args.command {
        Command::Generate {
            catalog,
            output_dir,
        } => {
            let catalog = load_catalog(catalog.as_ref())?;
            generate(&builder, &catalog, Path::new(output_dir))
        }
        Command::Encode { input, output } => {
            info!(input_path = input; "Encoding diagram");
            let xml = fs::read_to_string(input)?;
            let token = builder.tokenize_xml(input, &xml)?;
            write_output(output.as_deref(), &format!("{token}\n"))
        }
        Command::Decode { input, output } => {
            info!(input_path = input; "Decoding diagrams");
            let svg = fs::read_to_string(input)?;
            let diagrams = builder.extract(&svg)?;

            let mut text = String::new();
            for diagram in &diagrams {
                if diagrams.len() > 1 {
                    text.push_str(&format!(
                        "<!-- {} ({}) -->\n",
                        diagram.metadata.name(),
                        diagram.metadata.id()
                    ));
                }
                text.push_str(&diagram.xml);
                text.push('\n');
            }
            write_output(output.as_deref(), &text)
        }
    }
}

/// Load a TOML catalog, or the built-in catalog when `path` is `None`.
///
/// # Errors
///
/// Returns `MxEmbedError::Catalog` if the file cannot be parsed or fails
/// validation, and `MxEmbedError::Io` if it cannot be read.
pub fn load_catalog(path: Option<impl AsRef<Path>>) -> Result<Catalog, MxEmbedError> {
    let catalog = match path {
        Some(path) => {
            let path = path.as_ref();
            info!(path = path.display().to_string(); "Loading fixture catalog");
            let content = fs::read_to_string(path)?;
            toml::from_str::<Catalog>(&content)
                .map_err(|e| MxEmbedError::Catalog(format!("{}: {e}", path.display())))?
        }
        None => {
            debug!("Using built-in fixture catalog");
            Catalog::builtin()
        }
    };

    catalog.validate()?;
    if catalog.is_empty() {
        warn!("Fixture catalog is empty");
    }
    Ok(catalog)
}

/// Render every fixture of `catalog` into `output_dir`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns the first rendering or I/O error; fixtures written before it
/// remain on disk.
pub fn generate(
    builder: &FixtureBuilder,
    catalog: &Catalog,
    output_dir: &Path,
) -> Result<(), MxEmbedError> {
    info!(output_dir = output_dir.display().to_string(), fixtures = catalog.len(); "Regenerating fixtures");

    for fixture in catalog {
        let svg = builder.render(fixture)?;
        let path = output_dir.join(fixture.path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, svg)?;

        info!(path = fixture.path().display().to_string(); "Regenerated fixture");
    }

    info!(fixtures = catalog.len(); "All fixtures regenerated");
    Ok(())
}

fn write_output(output: Option<&str>, text: &str) -> Result<(), MxEmbedError> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!(output_file = path; "Output written");
        }
        None => print!("{text}"),
    }
    Ok(())
}
