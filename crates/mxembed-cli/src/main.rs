//! mxembed CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use mxembed::MxEmbedError;
use mxembed_cli::{Args, error_adapter::to_reportables};

fn main() {
    // Install miette's pretty panic hook before anything can panic
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = init_logger(&args.log_level);

    info!(log_level:?; "Starting mxembed");
    debug!(args:?; "Parsed arguments");

    // Dispatch the subcommand; all file I/O happens in the library
    if let Err(err) = mxembed_cli::run(&args) {
        report(&err);
        process::exit(1);
    }

    info!("Completed successfully");
}

/// Install `env_logger` at `level`, falling back to `warn` for unknown names.
fn init_logger(level: &str) -> LevelFilter {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    log_level
}

/// Render `err` through miette, one report per diagnostic.
fn report(err: &MxEmbedError) {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
    }
}
