//! CLI Tooling
//!
//! Runs one import and writes every record it produces, one per line. The
//! importer runs on its own thread; this side is the queue consumer.

use crate::config::{ConfigLoader, ImportConfig};
use crate::error::ImportError;
use crate::handler::ImportSummary;
use crate::importer::XbelImporter;
use crate::queue::ImportItem;
use crate::types::BookmarkRecord;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// xbel-import - stream bookmark records out of an XBEL document
#[derive(Parser, Debug)]
#[command(name = "xbel-import")]
#[command(about = "Convert an XBEL bookmark file into a stream of bookmark records")]
pub struct Cli {
    /// XBEL document to import ("-" reads standard input)
    pub input: PathBuf,

    /// Configuration file path (toml, yaml or json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Root folder every folder path starts with
    #[arg(long)]
    pub root: Option<String>,

    /// Separator between folder titles
    #[arg(long)]
    pub separator: Option<String>,

    /// Maximum number of records buffered between parser and writer
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Record output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Print the import summary to stderr when done
    #[arg(long, default_value = "false")]
    pub summary: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// How records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// Tab-separated folders, title, url
    Text,
}

/// Resolved configuration for one CLI invocation.
pub struct CliContext {
    config: ImportConfig,
}

impl CliContext {
    /// Load configuration and fold in command-line overrides.
    pub fn new(cli: &Cli) -> Result<Self, ImportError> {
        let mut config = ConfigLoader::load(cli.config.as_deref())?;
        if let Some(root) = &cli.root {
            config.root_folder = root.clone();
        }
        if let Some(separator) = &cli.separator {
            config.folder_separator = separator.clone();
        }
        if let Some(capacity) = cli.capacity {
            config.queue_capacity = capacity;
        }
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            config.logging.output = output.clone();
        }
        if cli.log_file.is_some() {
            config.logging.file = cli.log_file.clone();
        }
        config.validate()?;
        Ok(Self { config })
    }

    pub fn from_config(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import `input` and write its records to `out`.
    pub fn execute<W: Write>(
        &self,
        input: &Path,
        format: OutputFormat,
        out: &mut W,
    ) -> anyhow::Result<ImportSummary> {
        let reader = open_input(input)?;
        self.execute_reader(reader, format, out)
            .with_context(|| format!("Failed to import {}", input.display()))
    }

    /// Import from an already opened reader.
    pub fn execute_reader<R: BufRead + Send + 'static, W: Write>(
        &self,
        reader: R,
        format: OutputFormat,
        out: &mut W,
    ) -> anyhow::Result<ImportSummary> {
        let handle = XbelImporter::new(reader, self.config.clone()).spawn()?;

        let mut written = 0usize;
        let mut write_error = None;
        loop {
            let record = match handle.take() {
                ImportItem::Record(record) => record,
                ImportItem::EndOfStream => break,
            };
            if let Err(e) = write_record(out, &record, format) {
                warn!(error = %e, "Output closed; stopping import");
                handle.cancel();
                write_error = Some(e);
                break;
            }
            written += 1;
        }
        if write_error.is_none() {
            if let Err(e) = out.flush() {
                write_error = Some(e);
            }
        }

        let result = handle.join();
        if let Some(e) = write_error {
            return Err(e).context("Failed to write records");
        }
        let summary = result?;
        info!(written, "Wrote bookmark records");
        Ok(summary)
    }
}

fn open_input(input: &Path) -> anyhow::Result<Box<dyn BufRead + Send>> {
    if input.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn write_record<W: Write>(
    out: &mut W,
    record: &BookmarkRecord,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)
        }
        OutputFormat::Text => writeln!(
            out,
            "{}\t{}\t{}",
            record.folders().unwrap_or_default(),
            record.title().unwrap_or_default(),
            record.url().unwrap_or_default()
        ),
    }
}
