//! Command-line argument definitions for the mxembed CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global options select the configuration file and logging
//! verbosity; the [`Command`] picks the operation.

use clap::{Parser, Subcommand};

/// Command-line arguments for the mxembed tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Operations supported by the CLI
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Regenerate a directory of .drawio.svg fixtures
    Generate {
        /// Fixture catalog (TOML); the built-in catalog when omitted
        #[arg(long)]
        catalog: Option<String>,

        /// Directory the fixtures are written to
        #[arg(short, long, default_value = "tests/fixtures")]
        output_dir: String,
    },

    /// Compress an mxGraphModel XML file into a diagram token
    Encode {
        /// Path to the input XML file
        input: String,

        /// Write the token here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the diagrams embedded in a .drawio.svg file
    Decode {
        /// Path to the input SVG file
        input: String,

        /// Write the decoded XML here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}
