//! xbel-import CLI Binary
//!
//! Streams the bookmark records of an XBEL document to stdout.

use clap::Parser;
use std::io::{self, BufWriter};
use std::process;
use xbel_import::logging::init_logging;
use xbel_import::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = init_logging(Some(&context.config().logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(2);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match context.execute(&cli.input, cli.format, &mut out) {
        Ok(summary) => {
            if cli.summary {
                match serde_json::to_string(&summary) {
                    Ok(json) => eprintln!("{}", json),
                    Err(e) => eprintln!("Error serializing summary: {}", e),
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
